use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use hud_client::{
    Driver, DriverConfig, LandmarkDetector, RendererSink, ReplayDetector, SyntheticDetector,
};
use hud_core::GestureEngine;
use hud_shared::ControlConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Gesture HUD control loop", long_about = None)]
struct Args {
    /// Landmark source: 'synthetic' or 'replay:<path>' (JSON lines, one frame per line)
    #[arg(short, long, default_value = "synthetic")]
    source: String,

    /// Overlay width in pixels used for left/right ordering
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Detector frame rate
    #[arg(long, default_value_t = 30.0)]
    frame_hz: f64,

    /// Render tick rate
    #[arg(long, default_value_t = 60.0)]
    render_hz: f64,

    /// Stop after this many seconds (runs until the source ends otherwise)
    #[arg(long)]
    duration_secs: Option<f64>,

    /// JSON tuning file; missing keys keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Renderer base URL to POST control signals to (e.g., http://127.0.0.1:8080)
    #[arg(short, long)]
    renderer: Option<String>,

    /// Log a status line every N render ticks (0 disables)
    #[arg(long, default_value_t = 60)]
    status_every: u64,

    /// Seed for the synthetic source
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Run on a virtual clock instead of sleeping in real time
    #[arg(long)]
    fast: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn open_detector(source: &str, seed: u64) -> Result<Box<dyn LandmarkDetector>> {
    if source == "synthetic" {
        log::info!("Using synthetic landmark source (seed {})", seed);
        return Ok(Box::new(SyntheticDetector::new(seed).with_fist_period(240)));
    }

    let path = source
        .strip_prefix("replay:")
        .context("Source must be 'synthetic' or 'replay:<path>'")?;
    Ok(Box::new(ReplayDetector::open(path)?))
}

fn load_config(path: Option<&PathBuf>) -> Result<ControlConfig> {
    let Some(path) = path else {
        return Ok(ControlConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = ControlConfig::from_json(&text)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    log::info!("Loaded tuning from {}", path.display());
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("Gesture HUD client starting...");
    log::info!("Source: {}", args.source);

    let config = load_config(args.config.as_ref())?;
    let engine = GestureEngine::with_config(config).context("Invalid tuning")?;
    let detector =
        open_detector(&args.source, args.seed).context("Failed to initialize detector")?;

    let mut driver_config = DriverConfig::from_rates(args.frame_hz, args.render_hz);
    driver_config.width = args.width;
    driver_config.status_every = args.status_every;
    driver_config.duration = args
        .duration_secs
        .map(|secs| Duration::from_secs_f64(secs.max(0.0)));
    if args.fast && driver_config.duration.is_none() && args.source == "synthetic" {
        log::info!("Synthetic source never ends, limiting virtual run to 10s");
        driver_config.duration = Some(Duration::from_secs(10));
    }

    let mut driver = Driver::new(detector, engine, driver_config);
    if let Some(url) = args.renderer.as_deref() {
        let sink = RendererSink::new(url).context("Failed to build renderer client")?;
        log::info!("Publishing signals to {}", sink.url());
        driver = driver.with_sink(sink);
    }

    let summary = if args.fast {
        driver.run_virtual()
    } else {
        driver.run()
    }
    .context("Client error")?;

    log::info!("Run finished: {}", serde_json::to_string(&summary)?);

    Ok(())
}
