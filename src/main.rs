use clap::Parser;
use log::{error, info, warn};
use softraster::app::{run_gui, run_headless};
use softraster::io::config::Config;
use std::path::Path;
use std::process::ExitCode;

/// Software rasterizer.
#[derive(Parser, Debug)]
#[command(name = "softraster", version, about)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: String,

    /// Render without opening a window and save the result.
    #[arg(long)]
    headless: bool,

    /// Output image for headless mode. Overrides the config.
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Number of frames to simulate in headless mode. Overrides the config.
    #[arg(long)]
    frames: Option<usize>,
}

fn load_config(path: &str) -> Config {
    if !Path::new(path).exists() {
        warn!("Config '{}' not found, using defaults", path);
        return Config::default();
    }
    match Config::load(path) {
        Ok(config) => {
            info!("Loaded config from '{}'", path);
            config
        }
        Err(e) => {
            warn!("Failed to load config '{}': {}. Using defaults.", path, e);
            Config::default()
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config);

    let result = if cli.headless {
        let frames = cli.frames.unwrap_or(config.output.frames);
        let output = cli.output.clone().unwrap_or_else(|| config.output.path.clone());
        run_headless(&config, frames, output)
    } else {
        run_gui(&config)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
