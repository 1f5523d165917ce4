mod demo;

use anyhow::Context;
use clap::{Parser, Subcommand};
use simplengine_common::EngineConfig;
use simplengine_frame::Scheduler;
use simplengine_input::{InputState, Key};
use simplengine_render::{Camera, DebugSurface, SharedCamera, render_scene};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::demo::Demo;

#[derive(Parser)]
#[command(name = "simplengine-cli", about = "CLI tool for simplengine")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML engine configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version, crate info and the effective configuration
    Info,
    /// Run the headless demo scene on the frame scheduler
    Run {
        /// Target frame rate (overrides the config file)
        #[arg(short, long)]
        fps: Option<i64>,
        /// Seconds to run before stopping
        #[arg(short, long, default_value = "3")]
        seconds: f64,
        /// Number of falling crates
        #[arg(long, default_value = "5")]
        crates: usize,
        /// Print the last rendered frame
        #[arg(long)]
        dump: bool,
    },
    /// Convert a world point to screen space and back
    Project {
        x: f64,
        y: f64,
        #[arg(long, default_value = "0")]
        cam_x: f64,
        #[arg(long, default_value = "0")]
        cam_y: f64,
        /// Zoom (overrides the config file)
        #[arg(long)]
        zoom: Option<f64>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("simplengine-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", simplengine_common::crate_info());
            println!("kernel: {}", simplengine_kernel::crate_info());
            println!("render: {}", simplengine_render::crate_info());
            println!("input: {}", simplengine_input::crate_info());
            println!("frame: {}", simplengine_frame::crate_info());
            println!("config:\n{}", config.to_json()?);
        }
        Commands::Run {
            fps,
            seconds,
            crates,
            dump,
        } => run_demo(&config, fps, seconds, crates, dump)?,
        Commands::Project {
            x,
            y,
            cam_x,
            cam_y,
            zoom,
        } => {
            let mut camera = Camera::from_config(&config.camera);
            camera.center_on(cam_x, cam_y);
            if let Some(zoom) = zoom {
                camera.set_zoom(zoom);
            }
            let (w, h) = (config.screen.width, config.screen.height);
            let screen = camera.world_to_screen(x, y, w, h);
            let back = camera.screen_to_world(screen.x(), screen.y(), w, h);
            println!(
                "world ({x:.2}, {y:.2}) -> screen ({:.2}, {:.2}) on {w}x{h} at zoom {:.2}",
                screen.x(),
                screen.y(),
                camera.zoom()
            );
            println!("screen -> world ({:.2}, {:.2})", back.x(), back.y());
        }
    }

    Ok(())
}

fn run_demo(
    config: &EngineConfig,
    fps: Option<i64>,
    seconds: f64,
    crates: usize,
    dump: bool,
) -> anyhow::Result<()> {
    let half = Duration::try_from_secs_f64(seconds / 2.0)
        .with_context(|| format!("invalid run length {seconds}"))?;
    let scheduler = Scheduler::from_config(config);
    if let Some(fps) = fps {
        scheduler.set_target_fps(fps);
    }

    let camera = SharedCamera::new(Camera::from_config(&config.camera));
    let input = Arc::new(Mutex::new(InputState::new()));
    let demo = Arc::new(Mutex::new(Demo::new(crates)));
    let last_frame = Arc::new(Mutex::new(String::new()));

    {
        let demo = Arc::clone(&demo);
        let input = Arc::clone(&input);
        let camera = camera.clone();
        scheduler.set_update(move |dt| {
            let mut input = input.lock().unwrap_or_else(PoisonError::into_inner);
            demo.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .update(dt, &input, &camera);
            input.end_frame();
            Ok(())
        });
    }
    {
        let demo = Arc::clone(&demo);
        let last_frame = Arc::clone(&last_frame);
        let camera = camera.clone();
        let mut surface = DebugSurface::new(config.screen.width, config.screen.height);
        scheduler.set_render(move || {
            let view = camera.snapshot();
            {
                let demo = demo.lock().unwrap_or_else(PoisonError::into_inner);
                render_scene(&demo.scene, &view, &mut surface);
            }
            *last_frame.lock().unwrap_or_else(PoisonError::into_inner) = surface.dump();
            surface.present();
            Ok(())
        });
    }

    tracing::info!(
        target_fps = scheduler.target_fps(),
        seconds,
        crates,
        "running demo"
    );
    scheduler.start()?;

    // Stand-in input source: tap space halfway through.
    std::thread::sleep(half);
    {
        let mut input = input.lock().unwrap_or_else(PoisonError::into_inner);
        input.key_event(Key::Space, true);
    }
    std::thread::sleep(Duration::from_millis(50));
    input
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .key_event(Key::Space, false);
    std::thread::sleep(half.saturating_sub(Duration::from_millis(50)));

    scheduler.stop();

    let stats = scheduler.frame_stats();
    let demo = demo.lock().unwrap_or_else(PoisonError::into_inner);
    println!(
        "frames={} fps={} (target {}) faults={}",
        scheduler.frame_count(),
        scheduler.current_fps(),
        scheduler.target_fps(),
        scheduler.fault_count()
    );
    println!(
        "work: avg={:?} min={:?} max={:?} over {} frames",
        stats.average, stats.min, stats.max, stats.samples
    );
    println!(
        "scene: tick={} elapsed={:.2}s bodies={} landings={}",
        demo.scene.tick(),
        demo.scene.elapsed(),
        demo.scene.len(),
        demo.landings()
    );
    let cam = camera.snapshot();
    println!(
        "camera: pos=({:.1}, {:.1}) zoom={:.2}",
        cam.position().x(),
        cam.position().y(),
        cam.zoom()
    );
    if let Some(fault) = scheduler.last_fault() {
        println!("last fault: {fault}");
    }
    if dump {
        print!("{}", last_frame.lock().unwrap_or_else(PoisonError::into_inner));
    }

    Ok(())
}
