use glutin::event::VirtualKeyCode;

use lander_core::glam::Mat4;
use lander_core::level::LevelConfig;
use lander_core::shader::Shader;
use lander_core::sprite::SpriteQuad;
use lander_core::sprite_shader::get_sprite_shader;
use lander_core::texture::TextureBank;
use lander_core::time::{Delta, FixedStep, FIXED_TIMESTEP};
use lander_core::world::World;
use lander_core::Result;

use crate::fps::FpsCounter;
use crate::input::InputManager;

/// World units visible on screen, matching the 640x480 window's aspect.
const ORTHO_LEFT: f32 = -5.0;
const ORTHO_RIGHT: f32 = 5.0;
const ORTHO_BOTTOM: f32 = -3.75;
const ORTHO_TOP: f32 = 3.75;

/// Everything that lives for the duration of a session: the world, the GL
/// resources it draws with, and the frame/step clocks. The texture bank must
/// outlive the world, whose entities hold raw handles into it.
pub struct Game {
    world: World,
    textures: TextureBank,
    shader: Shader,
    quad: SpriteQuad,
    input: InputManager,
    delta: Delta,
    fixed: FixedStep,
    fps: FpsCounter,
}

impl Game {
    /// Requires a current GL context.
    pub fn new(level: &LevelConfig) -> Result<Game> {
        let mut shader = get_sprite_shader()?;
        shader.enable();
        shader.set_mat4(
            "projection",
            &Mat4::orthographic_rh_gl(
                ORTHO_LEFT,
                ORTHO_RIGHT,
                ORTHO_BOTTOM,
                ORTHO_TOP,
                -1.0,
                1.0,
            ),
        );
        shader.set_mat4("view", &Mat4::IDENTITY);

        let mut textures = TextureBank::new();
        let world = World::from_level(level, |path| textures.fetch(path))?;
        log::info!(
            "level ready: {} platforms, {} textures resident",
            level.platforms.len(),
            textures.len()
        );

        Ok(Game {
            world,
            textures,
            shader,
            quad: SpriteQuad::new(),
            input: InputManager::default(),
            delta: Delta::default(),
            fixed: FixedStep::default(),
            fps: FpsCounter::default(),
        })
    }

    pub fn key_event(&mut self, key: VirtualKeyCode, pressed: bool) {
        self.input.set_pressed(key, pressed);
    }

    pub fn wants_quit(&self) -> bool {
        self.input.is_pressed(VirtualKeyCode::Q)
    }

    /// Once per frame: turn the key state into the player's steering intent,
    /// then drain the banked wall-clock time in fixed sub-steps. Once the
    /// outcome is decided the world freezes but keeps rendering.
    pub fn advance(&mut self) {
        if let Some((movement, facing)) = self.input.steering() {
            let player = self.world.player_mut();
            player.movement = movement;
            if let Some(animation) = player.animation.as_mut() {
                animation.face(facing);
            }
        }

        self.fixed.push(self.delta.on_frame());
        while self.fixed.tick() {
            if self.world.outcome().decided() {
                continue;
            }
            self.world.step(FIXED_TIMESTEP);
        }
    }

    pub fn draw_frame(&mut self) {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        self.world.render(&mut self.shader, &self.quad);

        if let Some(stats) = self.fps.on_frame() {
            log::debug!("{:?}", stats);
        }
    }
}
