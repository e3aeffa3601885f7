//! Finger pointer application for driving the mouse with hand gestures.

use anyhow::Result;
use clap::Parser;
use finger_pointer::app::{AppConfig, HandPointerApp};
use finger_pointer::config::Config;
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera index to use
    #[arg(short = 'c', long)]
    cam: Option<i32>,

    /// Requested capture width in pixels
    #[arg(long)]
    width: Option<i32>,

    /// Requested capture height in pixels
    #[arg(long)]
    height: Option<i32>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Disable the preview window
    #[arg(long)]
    no_gui: bool,

    /// Log pointer actions without moving the real pointer
    #[arg(long)]
    no_mouse: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Finger Pointer");

    // Load configuration if provided
    let mut settings = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Command line arguments override file settings
    if let Some(cam) = args.cam {
        settings.camera.index = cam;
    }
    if let Some(width) = args.width {
        settings.camera.width = width;
    }
    if let Some(height) = args.height {
        settings.camera.height = height;
    }
    if args.no_gui {
        settings.display.gui = false;
    }

    settings.validate()?;

    // Create and run application
    let config = AppConfig {
        settings,
        control_mouse: !args.no_mouse,
    };

    let mut app = HandPointerApp::new(config)?;
    app.run()?;

    Ok(())
}
