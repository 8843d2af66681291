use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{Key as WinitKey, NamedKey},
    window::{Fullscreen, Window},
};

use keymaze::{
    config::{Cli, GameConfig},
    controller::{FrameLoop, InputEvent, InputProcessor, Key, Modifiers},
    load_scene_assets, logging,
    model::{parse_map, Camera},
    view::{GpuContext, RenderScheduler, Renderer, SceneMeshes},
};

fn map_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(NamedKey::ArrowUp) => Key::ArrowUp,
        WinitKey::Named(NamedKey::ArrowDown) => Key::ArrowDown,
        WinitKey::Named(NamedKey::ArrowLeft) => Key::ArrowLeft,
        WinitKey::Named(NamedKey::ArrowRight) => Key::ArrowRight,
        WinitKey::Named(NamedKey::Space) => Key::Space,
        WinitKey::Named(NamedKey::Enter) => Key::Enter,
        WinitKey::Named(NamedKey::Escape) => Key::Escape,
        WinitKey::Character(s) => s.chars().next().map(Key::character).unwrap_or(Key::Other),
        _ => Key::Other,
    }
}

fn toggle_fullscreen(window: &Window) {
    if window.fullscreen().is_some() {
        window.set_fullscreen(None);
    } else {
        window.set_fullscreen(Some(Fullscreen::Borderless(None)));
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = GameConfig::resolve(&cli).context("Failed to load configuration")?;

    let world = parse_map(&config.map_path)
        .with_context(|| format!("Failed to load map {}", config.map_path.display()))?;
    let assets = load_scene_assets(config.models_dir()).context("Failed to load meshes")?;
    let meshes = SceneMeshes::from_registry(&assets)?;

    let event_loop = EventLoop::new()?;
    let window_attributes = Window::default_attributes()
        .with_title(config.title.as_str())
        .with_inner_size(LogicalSize::new(config.window_width, config.window_height));
    let window = Arc::new(event_loop.create_window(window_attributes)?);
    if config.fullscreen {
        toggle_fullscreen(&window);
    }

    let mut gpu = pollster::block_on(GpuContext::new(window.clone())).context("Failed to initialize GPU")?;
    let mut renderer =
        Renderer::new(&gpu, &assets, &config.textures_dir()).context("Failed to load textures")?;

    let input = InputProcessor::default();
    info!("Controls: {}", input.bindings().help());

    let size = window.inner_size();
    let mut game = FrameLoop::new(
        world,
        input,
        RenderScheduler::new(meshes),
        Camera::new(size.width, size.height),
        config.seed,
    );

    let mut pending: Vec<InputEvent> = Vec::new();
    let mut modifiers = Modifiers::default();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { ref event, window_id } if window_id == window.id() => match event {
            WindowEvent::CloseRequested => pending.push(InputEvent::CloseRequested),
            WindowEvent::ModifiersChanged(state) => {
                modifiers = Modifiers { alt: state.state().alt_key() };
            }
            WindowEvent::KeyboardInput {
                event: KeyEvent { logical_key, state, .. },
                ..
            } => {
                let key = map_key(logical_key);
                pending.push(match state {
                    ElementState::Pressed => InputEvent::KeyDown { key, modifiers },
                    ElementState::Released => InputEvent::KeyUp { key, modifiers },
                });
            }
            WindowEvent::Resized(physical_size) => {
                gpu.resize(physical_size.width, physical_size.height);
                renderer.resize(&gpu);
                game.resize(physical_size.width, physical_size.height);
            }
            WindowEvent::RedrawRequested => {
                let events = std::mem::take(&mut pending);
                let frame = game.step(&events);
                if frame.quit {
                    info!("Quitting after {} completed levels", game.levels_completed());
                    elwt.exit();
                    return;
                }
                if frame.toggle_fullscreen {
                    toggle_fullscreen(&window);
                }

                match renderer.render(&gpu, frame.view_proj, &frame.draw_list) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let (width, height) = (gpu.config.width, gpu.config.height);
                        gpu.resize(width, height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        error!("GPU out of memory");
                        elwt.exit();
                    }
                    Err(e) => warn!("Surface error: {e:?}"),
                }
            }
            _ => {}
        },
        Event::AboutToWait => window.request_redraw(),
        _ => {}
    })?;

    Ok(())
}

fn main() {
    logging::init();

    if let Err(e) = run() {
        error!("{e:#}");
        std::process::exit(1);
    }
}
