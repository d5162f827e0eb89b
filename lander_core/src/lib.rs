use std::path::PathBuf;

pub use glam;

pub mod entity;
pub mod level;
pub mod shader;
pub mod sprite;
pub mod sprite_shader;
pub mod texture;
pub mod time;
pub mod world;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("cannot parse level {}: {source}", path.display())]
    Level {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot write level {}: {source}", path.display())]
    LevelWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("shader stage failed to compile: {0}")]
    ShaderCompile(String),
    #[error("shader program failed to link: {0}")]
    ShaderLink(String),
}

pub type Result<T> = std::result::Result<T, Error>;
