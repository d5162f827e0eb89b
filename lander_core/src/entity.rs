use glam::{Mat4, Vec3};

use crate::shader::Shader;
use crate::sprite::{atlas_rect, AtlasRect, SpriteQuad};

/// Vertical speed an unpiloted lander settles into. Braking on the Y axis
/// aims for this instead of zero, so the craft always drifts downward.
pub const IDLE_FALL_SPEED: f32 = -0.25;

/// Seconds an animation frame stays on screen before advancing.
const FRAME_HOLD: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    WinPlatform,
    LosePlatform,
    Message,
    Scenery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Events a single update can raise. Both bits can be set in one tick when
/// the player grazes a win and a lose platform at once; the caller merges
/// outcomes and never clears them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub won: bool,
    pub lost: bool,
}

impl Outcome {
    pub fn merge(&mut self, other: Outcome) {
        self.won |= other.won;
        self.lost |= other.lost;
    }

    pub fn decided(&self) -> bool {
        self.won || self.lost
    }
}

/// Sprite-sheet animation state. The four walking sequences are owned by the
/// entity; `facing` selects the active one by index.
#[derive(Debug, Clone)]
pub struct SpriteAnimation {
    pub cols: u32,
    pub rows: u32,
    sequences: [Vec<u32>; 4],
    facing: Direction,
    frame: usize,
    elapsed: f32,
}

impl SpriteAnimation {
    pub fn new(cols: u32, rows: u32, sequences: [Vec<u32>; 4]) -> SpriteAnimation {
        SpriteAnimation {
            cols,
            rows,
            sequences,
            facing: Direction::Left,
            frame: 0,
            elapsed: 0.0,
        }
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// Selects another walking sequence. The frame position carries over,
    /// re-wrapped so it always stays inside the new sequence.
    pub fn face(&mut self, direction: Direction) {
        self.facing = direction;
        if self.frame >= self.active_sequence().len() {
            self.frame = 0;
        }
    }

    /// Atlas cell the entity currently shows.
    pub fn current_index(&self) -> u32 {
        self.active_sequence()[self.frame]
    }

    fn active_sequence(&self) -> &[u32] {
        &self.sequences[self.facing as usize]
    }

    fn advance(&mut self, delta_time: f32, moving: bool) {
        if !moving {
            return;
        }

        self.elapsed += delta_time;
        if self.elapsed >= FRAME_HOLD {
            self.elapsed = 0.0;
            self.frame += 1;
            if self.frame >= self.active_sequence().len() {
                self.frame = 0;
            }
        }
    }
}

/// A drawable, optionally physical actor: the player, a platform, the
/// backdrop or a message overlay. Platforms and scenery are set up once and
/// only rendered afterwards; the player is stepped every fixed tick.
#[derive(Debug, Clone)]
pub struct Entity {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    /// Per-tick steering intent. Consumed (reset to zero) by every update.
    pub movement: Vec3,
    pub speed: f32,

    /// Collision box extents, centered at `position`.
    pub width: f32,
    pub height: f32,
    /// Visual size, baked into the model transform.
    pub scale: Vec3,

    pub kind: EntityKind,
    pub texture: u32,
    pub animation: Option<SpriteAnimation>,

    pub collided_top: bool,
    pub collided_bottom: bool,
    pub collided_left: bool,
    pub collided_right: bool,

    pub(crate) active: bool,
    pub(crate) model: Mat4,
}

impl Default for Entity {
    fn default() -> Self {
        Entity {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            movement: Vec3::ZERO,
            speed: 0.0,
            width: 0.0,
            height: 0.0,
            scale: Vec3::ONE,
            kind: EntityKind::Scenery,
            texture: 0,
            animation: None,
            collided_top: false,
            collided_bottom: false,
            collided_left: false,
            collided_right: false,
            active: true,
            model: Mat4::IDENTITY,
        }
    }
}

impl Entity {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn model(&self) -> &Mat4 {
        &self.model
    }

    /// Rebuilds the model transform from the current position and scale.
    /// Called by every update, and once at construction for entities that
    /// are never stepped.
    pub fn refresh_transform(&mut self) {
        self.model = Mat4::from_translation(self.position) * Mat4::from_scale(self.scale);
    }

    /// Advances animation and physics by exactly `delta_time` seconds (one
    /// fixed sub-step) and resolves collisions against `collidables`,
    /// Y axis before X so each axis is unclipped independently.
    pub fn update(&mut self, delta_time: f32, collidables: &[Entity]) -> Outcome {
        let mut outcome = Outcome::default();

        if !self.active {
            return outcome;
        }

        self.collided_top = false;
        self.collided_bottom = false;
        self.collided_left = false;
        self.collided_right = false;

        // Animation runs off this tick's steering intent, before it is consumed.
        let moving = self.movement.length() != 0.0;
        if let Some(animation) = self.animation.as_mut() {
            animation.advance(delta_time, moving);
        }

        // No horizontal intent: brake against the current velocity sign at
        // constant magnitude `speed`. Otherwise the intent drives directly.
        if self.movement.x == 0.0 {
            if self.velocity.x == 0.0 {
                self.acceleration.x = 0.0;
            } else if self.velocity.x > 0.0 {
                self.acceleration.x = -self.speed;
            } else {
                self.acceleration.x = self.speed;
            }
        } else {
            self.acceleration.x = self.movement.x * self.speed;
        }

        // Same policy vertically, except the rest target is the idle fall
        // speed. The comparisons against the exact literals are deliberate:
        // they are what gives the lander its drift.
        if self.movement.y == 0.0 {
            if self.velocity.y == IDLE_FALL_SPEED {
                self.acceleration.y = IDLE_FALL_SPEED;
            } else if self.velocity.y > IDLE_FALL_SPEED {
                self.acceleration.y = -self.speed;
            } else {
                self.acceleration.y = self.speed;
            }
        } else {
            self.acceleration.y = self.movement.y * self.speed;
        }

        self.movement = Vec3::ZERO;

        self.velocity += self.acceleration * delta_time;

        self.position.y += self.velocity.y * delta_time;
        outcome.merge(self.resolve_axis_y(collidables));

        self.position.x += self.velocity.x * delta_time;
        outcome.merge(self.resolve_axis_x(collidables));

        self.refresh_transform();

        outcome
    }

    /// Center-distance AABB overlap test. Inactive entities never collide.
    pub fn overlaps(&self, other: &Entity) -> bool {
        if !self.active || !other.active {
            return false;
        }

        let x_gap = (self.position.x - other.position.x).abs() - (self.width + other.width) / 2.0;
        let y_gap = (self.position.y - other.position.y).abs() - (self.height + other.height) / 2.0;

        x_gap < 0.0 && y_gap < 0.0
    }

    fn resolve_axis_y(&mut self, collidables: &[Entity]) -> Outcome {
        let mut outcome = Outcome::default();

        for other in collidables {
            if !self.overlaps(other) {
                continue;
            }

            match other.kind {
                EntityKind::LosePlatform => outcome.lost = true,
                EntityKind::WinPlatform => outcome.won = true,
                _ => (),
            }

            let distance = (self.position.y - other.position.y).abs();
            let overlap = (distance - self.height / 2.0 - other.height / 2.0).abs();

            if self.velocity.y > 0.0 {
                self.position.y -= overlap;
                self.velocity.y = 0.0;
                self.collided_top = true;
            } else if self.velocity.y < 0.0 {
                self.position.y += overlap;
                self.velocity.y = 0.0;
                self.collided_bottom = true;
            }
            // Resting contact (zero velocity) is not pushed back out.
        }

        outcome
    }

    fn resolve_axis_x(&mut self, collidables: &[Entity]) -> Outcome {
        let mut outcome = Outcome::default();

        for other in collidables {
            if !self.overlaps(other) {
                continue;
            }

            match other.kind {
                EntityKind::LosePlatform => outcome.lost = true,
                EntityKind::WinPlatform => outcome.won = true,
                _ => (),
            }

            let distance = (self.position.x - other.position.x).abs();
            let overlap = (distance - self.width / 2.0 - other.width / 2.0).abs();

            if self.velocity.x > 0.0 {
                self.position.x -= overlap;
                self.velocity.x = 0.0;
                self.collided_right = true;
            } else if self.velocity.x < 0.0 {
                self.position.x += overlap;
                self.velocity.x = 0.0;
                self.collided_left = true;
            }
        }

        outcome
    }

    /// Draws the entity as a textured unit quad under its model transform.
    /// With an animation the quad samples the current atlas cell, otherwise
    /// the whole texture.
    pub fn render(&self, shader: &mut Shader, quad: &SpriteQuad) {
        if !self.active {
            return;
        }

        shader.set_mat4("model", &self.model);

        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, self.texture);
        }

        let rect = match &self.animation {
            Some(animation) => atlas_rect(animation.current_index(), animation.cols, animation.rows),
            None => AtlasRect::FULL,
        };

        quad.draw(&rect.uvs());
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn walker() -> SpriteAnimation {
        SpriteAnimation::new(
            4,
            4,
            [
                vec![4, 5, 6, 7],
                vec![8, 9, 10, 12],
                vec![12, 13, 14, 15],
                vec![0, 1, 2, 3],
            ],
        )
    }

    fn platform(kind: EntityKind, position: Vec3, width: f32, height: f32) -> Entity {
        let mut entity = Entity {
            position,
            width,
            height,
            kind,
            ..Entity::default()
        };
        entity.refresh_transform();
        entity
    }

    #[test]
    fn inactive_entity_is_left_untouched() {
        let mut entity = Entity {
            position: Vec3::new(3.0, 4.0, 0.0),
            velocity: Vec3::new(1.0, 2.0, 0.0),
            movement: Vec3::new(1.0, 0.0, 0.0),
            speed: 1.0,
            animation: Some(walker()),
            ..Entity::default()
        };
        entity.deactivate();

        let before = entity.clone();
        let outcome = entity.update(0.1, &[]);

        assert_eq!(outcome, Outcome::default());
        assert_eq!(entity.position, before.position);
        assert_eq!(entity.velocity, before.velocity);
        assert_eq!(entity.movement, before.movement);
        assert_eq!(entity.animation.as_ref().unwrap().frame, 0);
    }

    #[test]
    fn braking_opposes_positive_horizontal_velocity() {
        let mut entity = Entity {
            velocity: Vec3::new(2.0, 0.0, 0.0),
            speed: 1.0,
            ..Entity::default()
        };

        entity.update(0.1, &[]);

        assert_relative_eq!(entity.acceleration.x, -1.0);
        assert_relative_eq!(entity.velocity.x, 1.9);
    }

    #[test]
    fn horizontal_velocity_decays_to_rest_without_intent() {
        let mut entity = Entity {
            velocity: Vec3::new(0.5, 0.0, 0.0),
            speed: 1.0,
            ..Entity::default()
        };

        // 0.5 drains in exactly eight ticks of 1.0 * 0.0625, monotonically.
        let mut previous = entity.velocity.x;
        for _ in 0..8 {
            entity.update(0.0625, &[]);
            assert!(entity.velocity.x < previous);
            previous = entity.velocity.x;
        }
        assert_eq!(entity.velocity.x, 0.0);

        // At rest the braking acceleration switches off.
        entity.update(0.0625, &[]);
        assert_eq!(entity.acceleration.x, 0.0);
        assert_eq!(entity.velocity.x, 0.0);
    }

    #[test]
    fn vertical_velocity_drifts_to_idle_fall_speed() {
        let mut entity = Entity {
            speed: 1.0,
            ..Entity::default()
        };

        let mut previous = entity.velocity.y;
        for _ in 0..4 {
            entity.update(0.0625, &[]);
            assert!(entity.velocity.y < previous);
            assert!(entity.velocity.y >= IDLE_FALL_SPEED);
            previous = entity.velocity.y;
        }
        assert_eq!(entity.velocity.y, IDLE_FALL_SPEED);

        // At the idle speed the acceleration pins to the same literal.
        entity.update(0.0625, &[]);
        assert_eq!(entity.acceleration.y, IDLE_FALL_SPEED);
    }

    #[test]
    fn direct_drive_overrides_braking() {
        let mut entity = Entity {
            velocity: Vec3::new(-1.0, 0.0, 0.0),
            movement: Vec3::new(1.0, 0.0, 0.0),
            speed: 2.0,
            ..Entity::default()
        };

        entity.update(0.5, &[]);

        assert_relative_eq!(entity.acceleration.x, 2.0);
        assert_relative_eq!(entity.velocity.x, 0.0);
        assert_eq!(entity.movement, Vec3::ZERO);
    }

    #[test]
    fn overlap_test_is_symmetric() {
        let a = platform(EntityKind::Scenery, Vec3::new(0.0, 0.0, 0.0), 1.0, 1.0);
        let b = platform(EntityKind::Scenery, Vec3::new(0.5, 0.5, 0.0), 1.0, 1.0);
        let c = platform(EntityKind::Scenery, Vec3::new(5.0, 0.0, 0.0), 1.0, 1.0);

        assert!(a.overlaps(&b));
        assert_eq!(a.overlaps(&b), b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert_eq!(a.overlaps(&c), c.overlaps(&a));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        // Gaps must be strictly negative: boxes sharing an edge are apart.
        let a = platform(EntityKind::Scenery, Vec3::new(0.0, 0.0, 0.0), 1.0, 1.0);
        let b = platform(EntityKind::Scenery, Vec3::new(1.0, 0.0, 0.0), 1.0, 1.0);

        assert!(!a.overlaps(&b));
    }

    #[test]
    fn inactive_entities_never_overlap() {
        let a = platform(EntityKind::Scenery, Vec3::new(0.0, 0.0, 0.0), 1.0, 1.0);
        let mut b = platform(EntityKind::Scenery, Vec3::new(0.0, 0.0, 0.0), 1.0, 1.0);
        b.deactivate();

        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn rising_into_a_platform_clamps_and_flags_top() {
        let mut player = Entity {
            position: Vec3::new(0.0, 5.0, 0.0),
            velocity: Vec3::new(0.0, 5.0, 0.0),
            width: 0.9,
            height: 0.9,
            speed: 1.0,
            kind: EntityKind::Player,
            ..Entity::default()
        };
        let wall = platform(EntityKind::Scenery, Vec3::new(0.0, 4.55, 0.0), 1.0, 1.25);

        player.update(0.0625, &[wall.clone()]);

        // Replay the integration to know where the unclip lands.
        let expected = {
            let velocity = 5.0f32 - 1.0 * 0.0625;
            let lifted = 5.0f32 + velocity * 0.0625;
            let distance = (lifted - wall.position.y).abs();
            let overlap = (distance - 0.9 / 2.0 - 1.25 / 2.0).abs();
            lifted - overlap
        };

        assert!(player.collided_top);
        assert!(!player.collided_bottom);
        assert_eq!(player.velocity.y, 0.0);
        assert_relative_eq!(player.position.y, expected);
    }

    #[test]
    fn falling_onto_a_platform_lands_and_flags_bottom() {
        let mut player = Entity {
            velocity: Vec3::new(0.0, -2.0, 0.0),
            width: 0.9,
            height: 0.9,
            speed: 1.0,
            kind: EntityKind::Player,
            ..Entity::default()
        };
        let floor = platform(EntityKind::Scenery, Vec3::new(0.0, -1.0, 0.0), 2.0, 1.0);

        player.update(0.0625, &[floor]);

        assert!(player.collided_bottom);
        assert!(!player.collided_top);
        assert_eq!(player.velocity.y, 0.0);
    }

    #[test]
    fn at_most_one_flag_per_axis() {
        let mut player = Entity {
            velocity: Vec3::new(0.0, -2.0, 0.0),
            width: 0.9,
            height: 0.9,
            speed: 1.0,
            kind: EntityKind::Player,
            ..Entity::default()
        };
        // Two stacked collidables both overlap the player's path; the first
        // zeroes the velocity, so the second cannot raise the opposite flag.
        let collidables = [
            platform(EntityKind::Scenery, Vec3::new(0.0, -1.0, 0.0), 2.0, 1.0),
            platform(EntityKind::Scenery, Vec3::new(0.0, -0.5, 0.0), 2.0, 1.0),
        ];

        player.update(0.0625, &collidables);

        assert!(!(player.collided_top && player.collided_bottom));
        assert!(!(player.collided_left && player.collided_right));
        assert!(player.collided_bottom);
    }

    #[test]
    fn lose_platform_reports_lost_not_won() {
        let mut player = Entity {
            velocity: Vec3::new(0.0, -2.0, 0.0),
            width: 0.9,
            height: 0.9,
            speed: 1.0,
            kind: EntityKind::Player,
            ..Entity::default()
        };
        let jellyfish = platform(EntityKind::LosePlatform, Vec3::new(0.0, -1.0, 0.0), 2.0, 1.0);

        let outcome = player.update(0.0625, &[jellyfish]);

        assert!(outcome.lost);
        assert!(!outcome.won);
    }

    #[test]
    fn grazing_win_and_lose_platforms_raises_both() {
        let mut player = Entity {
            velocity: Vec3::new(0.0, -2.0, 0.0),
            width: 0.9,
            height: 0.9,
            speed: 1.0,
            kind: EntityKind::Player,
            ..Entity::default()
        };
        let collidables = [
            platform(EntityKind::WinPlatform, Vec3::new(-0.4, -1.0, 0.0), 1.0, 1.0),
            platform(EntityKind::LosePlatform, Vec3::new(0.4, -1.0, 0.0), 1.0, 1.0),
        ];

        let outcome = player.update(0.0625, &collidables);

        assert!(outcome.won);
        assert!(outcome.lost);
    }

    #[test]
    fn outcome_merge_is_monotone() {
        let mut merged = Outcome::default();
        merged.merge(Outcome { won: true, lost: false });
        merged.merge(Outcome::default());

        assert!(merged.won);
        assert!(!merged.lost);
        assert!(merged.decided());
    }

    #[test]
    fn animation_stands_still_without_intent() {
        let mut entity = Entity {
            speed: 1.0,
            animation: Some(walker()),
            ..Entity::default()
        };

        for _ in 0..10 {
            entity.update(0.25, &[]);
        }

        assert_eq!(entity.animation.as_ref().unwrap().frame, 0);
    }

    #[test]
    fn animation_advances_while_moving() {
        let mut entity = Entity {
            speed: 1.0,
            animation: Some(walker()),
            ..Entity::default()
        };

        // 0.1 s ticks: the third one crosses the 0.25 s frame hold.
        for _ in 0..2 {
            entity.movement = Vec3::new(1.0, 0.0, 0.0);
            entity.update(0.1, &[]);
        }
        assert_eq!(entity.animation.as_ref().unwrap().frame, 0);

        entity.movement = Vec3::new(1.0, 0.0, 0.0);
        entity.update(0.1, &[]);
        assert_eq!(entity.animation.as_ref().unwrap().frame, 1);
    }

    #[test]
    fn animation_frame_wraps_at_sequence_end() {
        let mut entity = Entity {
            speed: 1.0,
            animation: Some(walker()),
            ..Entity::default()
        };

        for tick in 0..12 {
            entity.movement = Vec3::new(1.0, 0.0, 0.0);
            entity.update(0.25, &[]);

            let animation = entity.animation.as_ref().unwrap();
            assert_eq!(animation.frame, (tick + 1) % 4);
        }
    }

    #[test]
    fn facing_switch_rewraps_the_frame() {
        let mut animation = SpriteAnimation::new(2, 2, [vec![0, 1, 2, 3], vec![0, 1], vec![2], vec![3]]);
        animation.frame = 3;

        animation.face(Direction::Right);
        assert_eq!(animation.facing(), Direction::Right);
        assert_eq!(animation.frame, 0);

        animation.frame = 1;
        animation.face(Direction::Left);
        assert_eq!(animation.frame, 1);
    }

    #[test]
    fn update_rebuilds_the_model_transform() {
        let mut entity = Entity {
            velocity: Vec3::new(1.0, 0.0, 0.0),
            movement: Vec3::new(1.0, 0.0, 0.0),
            speed: 1.0,
            ..Entity::default()
        };

        entity.update(0.5, &[]);

        let expected = Mat4::from_translation(entity.position) * Mat4::from_scale(entity.scale);
        assert_eq!(*entity.model(), expected);
    }
}
