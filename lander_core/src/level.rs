use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformKind {
    Win,
    Lose,
}

impl From<PlatformKind> for EntityKind {
    fn from(kind: PlatformKind) -> EntityKind {
        match kind {
            PlatformKind::Win => EntityKind::WinPlatform,
            PlatformKind::Lose => EntityKind::LosePlatform,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackdropConfig {
    pub texture: PathBuf,
    pub position: Vec3,
    pub size: Vec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub texture: PathBuf,
    pub position: Vec3,
    /// Collision box extents.
    pub width: f32,
    pub height: f32,
    /// Visual size of the sprite.
    pub size: Vec2,
    pub kind: PlatformKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkingFrames {
    pub left: Vec<u32>,
    pub right: Vec<u32>,
    pub up: Vec<u32>,
    pub down: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub spritesheet: PathBuf,
    pub position: Vec3,
    pub speed: f32,
    pub width: f32,
    pub height: f32,
    pub atlas_cols: u32,
    pub atlas_rows: u32,
    pub walking: WalkingFrames,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesConfig {
    pub win: PathBuf,
    pub lose: PathBuf,
    pub size: Vec2,
}

/// Everything needed to build a playable scene: the backdrop, the platform
/// set, the two end-of-game overlays and the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    pub backdrop: BackdropConfig,
    pub platforms: Vec<PlatformConfig>,
    pub messages: MessagesConfig,
    pub player: PlayerConfig,
}

impl LevelConfig {
    pub fn load<P: AsRef<Path>>(at: P) -> Result<LevelConfig> {
        let at = at.as_ref();
        let file = File::open(at).map_err(|source| Error::Io {
            path: at.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);

        serde_json::from_reader(reader).map_err(|source| Error::Level {
            path: at.to_path_buf(),
            source,
        })
    }

    pub fn save<P: AsRef<Path>>(&self, at: P) -> Result<()> {
        let at = at.as_ref();
        let file = File::create(at).map_err(|source| Error::Io {
            path: at.to_path_buf(),
            source,
        })?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, self).map_err(|source| Error::LevelWrite {
            path: at.to_path_buf(),
            source,
        })
    }
}

/// The built-in scene: three jellyfish to avoid, two treasure chests to land
/// on, George as the lander.
impl Default for LevelConfig {
    fn default() -> Self {
        LevelConfig {
            backdrop: BackdropConfig {
                texture: PathBuf::from("assets/background.png"),
                position: Vec3::new(0.0, -1.5, 0.0),
                size: Vec2::new(11.5, 8.0),
            },
            platforms: vec![
                PlatformConfig {
                    texture: PathBuf::from("assets/jellyfish.png"),
                    position: Vec3::new(-3.5, 2.5, 0.0),
                    width: 1.5,
                    height: 2.0,
                    size: Vec2::new(1.5, 2.0),
                    kind: PlatformKind::Lose,
                },
                PlatformConfig {
                    texture: PathBuf::from("assets/jellyfish.png"),
                    position: Vec3::new(3.5, 2.5, 0.0),
                    width: 1.0,
                    height: 1.5,
                    size: Vec2::new(1.0, 1.5),
                    kind: PlatformKind::Lose,
                },
                PlatformConfig {
                    texture: PathBuf::from("assets/jellyfish.png"),
                    position: Vec3::new(1.5, 0.0, 0.0),
                    width: 0.8,
                    height: 2.0,
                    size: Vec2::new(0.8, 2.0),
                    kind: PlatformKind::Lose,
                },
                PlatformConfig {
                    texture: PathBuf::from("assets/treasure_chest.png"),
                    position: Vec3::new(-3.5, -2.5, 0.0),
                    width: 1.75,
                    height: 1.25,
                    size: Vec2::new(1.75, 1.25),
                    kind: PlatformKind::Win,
                },
                PlatformConfig {
                    texture: PathBuf::from("assets/treasure_chest.png"),
                    position: Vec3::new(3.5, -2.5, 0.0),
                    width: 1.75,
                    height: 1.25,
                    size: Vec2::new(1.75, 1.25),
                    kind: PlatformKind::Win,
                },
            ],
            messages: MessagesConfig {
                win: PathBuf::from("assets/win.png"),
                lose: PathBuf::from("assets/lost.png"),
                size: Vec2::new(5.0, 3.0),
            },
            player: PlayerConfig {
                spritesheet: PathBuf::from("assets/player_spritesheet.png"),
                position: Vec3::new(0.0, 0.0, 0.0),
                speed: 1.0,
                width: 0.9,
                height: 0.9,
                atlas_cols: 4,
                atlas_rows: 4,
                walking: WalkingFrames {
                    left: vec![4, 5, 6, 7],
                    right: vec![8, 9, 10, 12],
                    up: vec![12, 13, 14, 15],
                    down: vec![0, 1, 2, 3],
                },
            },
        }
    }
}
