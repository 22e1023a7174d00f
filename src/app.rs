use crate::error::{RenderError, Result};
use crate::io::config::Config;
use crate::io::image::save_framebuffer;
use crate::pipeline::frame::{Command, FrameConfig};
use crate::pipeline::renderer::Renderer;
use crate::scene::camera::CameraInput;
use crate::scene::loader::init_render_context;
use crate::ui::input::InputMapper;
use log::info;
use minifb::{Key, Window, WindowOptions};
use std::path::Path;
use std::time::Instant;

fn log_command(command: Command, config: &FrameConfig) {
    match command {
        Command::CycleRenderMode => info!("Render mode: {:?}", config.render_mode),
        Command::CycleColorMode => info!("Color mode: {:?}", config.color_mode),
        Command::ToggleNormalMapping => info!("Normal mapping: {}", config.normal_mapping),
        Command::ToggleRotation => info!("Rotation: {}", config.rotate),
        Command::ToggleClearColor => info!("Clear color: {:06X}", config.background()),
        Command::CycleCullMode => info!("Cull mode: {:?}", config.cull_mode),
        Command::TogglePrintFps => info!("Print FPS: {}", config.print_fps),
    }
}

/// Runs the interactive window loop until the window closes or Escape is pressed.
pub fn run_gui(config: &Config) -> Result<()> {
    let (mut width, mut height) = (config.window.width, config.window.height);

    info!("Starting GUI mode ({}x{})...", width, height);
    info!(
        "Controls: WASD/Arrows=Move, RMB=Look, LMB=Dolly, LMB+RMB=Vertical, \
         F2=Rotation, F5=Color mode, F6=Normal map, F7=Depth view, F9=Cull mode, F10=Clear color, F11=Print FPS"
    );

    let options = WindowOptions {
        resize: true,
        ..WindowOptions::default()
    };
    let mut window = Window::new(&config.window.title, width, height, options)
        .map_err(|e| RenderError::Window(e.to_string()))?;
    window.set_target_fps(config.window.target_fps);

    let mut context = init_render_context(config);
    let mut renderer = Renderer::new(width, height);
    let mut frame_config = FrameConfig::from(&config.render);
    let mut input = InputMapper::new();

    let mut last_frame_time = Instant::now();
    let mut last_fps_update = Instant::now();
    let mut frame_count = 0;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let now = Instant::now();
        let dt = (now - last_frame_time).as_secs_f32();
        last_frame_time = now;

        for command in input.commands(&window) {
            frame_config = frame_config.apply(command);
            log_command(command, &frame_config);
        }

        let size = window.get_size();
        if size != (width, height) && size.0 > 0 && size.1 > 0 {
            (width, height) = size;
            renderer.resize(width, height);
            context.camera.set_aspect_ratio(width as f32 / height as f32);
            info!("Resized to {}x{}", width, height);
        }

        let camera_input = input.camera_input(&window);
        context.update(dt, &camera_input, &frame_config);
        renderer.render_frame(&mut context, &frame_config);

        window
            .update_with_buffer(renderer.framebuffer.color_buffer(), width, height)
            .map_err(|e| RenderError::Window(e.to_string()))?;

        frame_count += 1;
        let since = last_fps_update.elapsed().as_secs_f32();
        if since >= 1.0 {
            let fps = frame_count as f32 / since;
            if frame_config.print_fps {
                info!("FPS: {:.1}", fps);
            }
            window.set_title(&format!("{} - {:.1} FPS", config.window.title, fps));
            frame_count = 0;
            last_fps_update = Instant::now();
        }
    }

    Ok(())
}

/// Renders `frames` frames at a fixed time step and saves the last one.
pub fn run_headless<P: AsRef<Path>>(config: &Config, frames: usize, output: P) -> Result<()> {
    info!("Starting headless mode...");
    let start_time = Instant::now();

    let mut context = init_render_context(config);
    let mut renderer = Renderer::new(config.window.width, config.window.height);
    let frame_config = FrameConfig::from(&config.render);
    let idle = CameraInput::default();

    for frame in 0..frames.max(1) {
        if frame > 0 {
            context.update(config.output.frame_time, &idle, &frame_config);
        }
        let stats = renderer.render_frame(&mut context, &frame_config);
        info!(
            "Frame {}: {} triangles, {} fragments written",
            frame, stats.triangles, stats.fragments_written
        );
    }

    info!("Render completed in {:.2?}", start_time.elapsed());
    save_framebuffer(&renderer.framebuffer, output)
}
