use std::ops::Range;
use std::path::Path;

use crate::entity::{Entity, EntityKind, Outcome, SpriteAnimation};
use crate::level::LevelConfig;
use crate::shader::Shader;
use crate::sprite::SpriteQuad;
use crate::Result;

/// Index handle into the world's entity arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(usize);

/// Owns every entity for the whole game in one contiguous arena. The layout
/// is fixed at construction: backdrop first, then the platforms, the two
/// message overlays, and the player last, so stepping can split the arena
/// into the player and the collidable slice without aliasing.
pub struct World {
    entities: Vec<Entity>,
    backdrop: EntityId,
    platforms: Range<usize>,
    win_message: EntityId,
    lose_message: EntityId,
    player: EntityId,
    outcome: Outcome,
}

impl World {
    /// Builds the arena from a level description. `load_texture` resolves an
    /// image path to the opaque handle the entity will carry; the caller
    /// keeps the textures alive for as long as the world is rendered.
    pub fn from_level(
        level: &LevelConfig,
        mut load_texture: impl FnMut(&Path) -> Result<u32>,
    ) -> Result<World> {
        let mut entities = Vec::with_capacity(level.platforms.len() + 4);

        let backdrop = EntityId(entities.len());
        let mut entity = Entity {
            position: level.backdrop.position,
            scale: level.backdrop.size.extend(1.0),
            texture: load_texture(&level.backdrop.texture)?,
            ..Entity::default()
        };
        entity.refresh_transform();
        entities.push(entity);

        let platforms = entities.len()..entities.len() + level.platforms.len();
        for platform in &level.platforms {
            let mut entity = Entity {
                position: platform.position,
                width: platform.width,
                height: platform.height,
                scale: platform.size.extend(1.0),
                kind: platform.kind.into(),
                texture: load_texture(&platform.texture)?,
                ..Entity::default()
            };
            entity.refresh_transform();
            entities.push(entity);
        }

        // The overlays stay hidden until the outcome is decided.
        let mut message_ids = [EntityId(0); 2];
        for (slot, texture) in message_ids
            .iter_mut()
            .zip([&level.messages.win, &level.messages.lose].iter())
        {
            *slot = EntityId(entities.len());
            let mut message = Entity {
                scale: level.messages.size.extend(1.0),
                kind: EntityKind::Message,
                texture: load_texture(texture)?,
                ..Entity::default()
            };
            message.refresh_transform();
            message.deactivate();
            entities.push(message);
        }

        let walking = &level.player.walking;
        let player = EntityId(entities.len());
        let mut entity = Entity {
            position: level.player.position,
            speed: level.player.speed,
            width: level.player.width,
            height: level.player.height,
            kind: EntityKind::Player,
            texture: load_texture(&level.player.spritesheet)?,
            animation: Some(SpriteAnimation::new(
                level.player.atlas_cols,
                level.player.atlas_rows,
                [
                    walking.left.clone(),
                    walking.right.clone(),
                    walking.up.clone(),
                    walking.down.clone(),
                ],
            )),
            ..Entity::default()
        };
        entity.refresh_transform();
        entities.push(entity);

        Ok(World {
            entities,
            backdrop,
            platforms,
            win_message: message_ids[0],
            lose_message: message_ids[1],
            player,
            outcome: Outcome::default(),
        })
    }

    /// Advances the player by one fixed sub-step against the platform set,
    /// merges the resulting events into the running outcome and reveals the
    /// matching overlay. Platforms, scenery and overlays are never stepped.
    pub fn step(&mut self, delta_time: f32) -> Outcome {
        let outcome = {
            let (rest, tail) = self.entities.split_at_mut(self.player.0);
            let player = &mut tail[0];
            player.update(delta_time, &rest[self.platforms.clone()])
        };

        self.outcome.merge(outcome);

        if self.outcome.won {
            self.entities[self.win_message.0].activate();
        }
        if self.outcome.lost {
            self.entities[self.lose_message.0].activate();
        }

        outcome
    }

    /// Draw order: backdrop behind everything, then the player, the
    /// platforms, and the overlays on top.
    pub fn render(&self, shader: &mut Shader, quad: &SpriteQuad) {
        self.entities[self.backdrop.0].render(shader, quad);
        self.entities[self.player.0].render(shader, quad);
        for platform in &self.entities[self.platforms.clone()] {
            platform.render(shader, quad);
        }
        self.entities[self.win_message.0].render(shader, quad);
        self.entities[self.lose_message.0].render(shader, quad);
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn player_id(&self) -> EntityId {
        self.player
    }

    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.entities[id.0]
    }

    pub fn entity_mut(&mut self, id: EntityId) -> &mut Entity {
        &mut self.entities[id.0]
    }

    pub fn player(&self) -> &Entity {
        &self.entities[self.player.0]
    }

    pub fn player_mut(&mut self) -> &mut Entity {
        &mut self.entities[self.player.0]
    }
}
