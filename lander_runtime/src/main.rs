use std::path::PathBuf;

use clap::Parser;
use glutin::dpi::LogicalSize;
use glutin::event::{ElementState, Event, KeyboardInput, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use glutin::window::WindowBuilder;
use glutin::ContextBuilder;

use lander_core::level::LevelConfig;

use crate::game::Game;

mod fps;
mod game;
mod input;

const WINDOW_WIDTH: u32 = 640;
const WINDOW_HEIGHT: u32 = 480;

const BG_RED: f32 = 0.1922;
const BG_GREEN: f32 = 0.549;
const BG_BLUE: f32 = 0.9059;
const BG_OPACITY: f32 = 1.0;

/// Lunar-lander arcade game: steer with the arrow keys, land on a treasure
/// chest, stay away from the jellyfish. Q quits.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Level description (JSON) to load instead of the built-in scene.
    #[arg(long)]
    level: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let level = match &args.level {
        Some(path) => {
            log::info!("loading level from {}", path.display());
            LevelConfig::load(path)?
        }
        None => LevelConfig::default(),
    };

    let el = EventLoop::new();
    let wb = WindowBuilder::new()
        .with_title("Lunar Lander")
        .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .with_resizable(false);

    let windowed_context = ContextBuilder::new().build_windowed(wb, &el).unwrap();
    let windowed_context = unsafe { windowed_context.make_current().unwrap() };

    gl::load_with(|symbol| windowed_context.get_proc_address(symbol));

    unsafe {
        let size = windowed_context.window().inner_size();
        gl::Viewport(0, 0, size.width as i32, size.height as i32);

        gl::ClearColor(BG_RED, BG_GREEN, BG_BLUE, BG_OPACITY);

        // Sprites carry alpha around their silhouettes.
        gl::Enable(gl::BLEND);
        gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
    }

    let mut game = Game::new(&level)?;

    el.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::LoopDestroyed => return,
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(physical_size) => {
                    windowed_context.resize(physical_size);
                    unsafe {
                        gl::Viewport(0, 0, physical_size.width as i32, physical_size.height as i32)
                    };
                }
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            virtual_keycode: Some(key),
                            state,
                            ..
                        },
                    ..
                } => {
                    game.key_event(key, state == ElementState::Pressed);
                }
                _ => (),
            },
            Event::MainEventsCleared => {
                if game.wants_quit() {
                    *control_flow = ControlFlow::Exit;
                    return;
                }

                game.advance();
                windowed_context.window().request_redraw();
            }
            Event::RedrawRequested(_) => {
                game.draw_frame();
                windowed_context.swap_buffers().unwrap();
            }
            _ => (),
        }
    });
}
