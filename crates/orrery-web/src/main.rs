//! Orrery desktop entry point
//!
//! Runs the navigator in a native window with the egui overlay standing in
//! for the web page.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;
    use orrery_core::OrreryConfig;
    use std::path::PathBuf;
    use tracing::{info, Level};
    use tracing_subscriber::FmtSubscriber;

    #[derive(Parser, Debug)]
    #[command(name = "orrery")]
    #[command(about = "Solar-system site navigator")]
    #[command(version)]
    struct Args {
        /// Path to configuration file
        #[arg(short, long, default_value = "orrery.toml")]
        config: PathBuf,

        /// Log level (trace, debug, info, warn, error)
        #[arg(short, long, default_value = "info")]
        log_level: String,

        /// Fixed starfield seed
        #[arg(long)]
        seed: Option<u64>,
    }

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Orrery v{}", env!("CARGO_PKG_VERSION"));

    let mut config = OrreryConfig::load_or_default(&args.config)?;
    if let Some(seed) = args.seed {
        config.starfield.seed = Some(seed);
    }

    info!(
        bodies = config.bodies.len(),
        stars = config.starfield.count,
        "Configuration loaded"
    );

    orrery_web::app::run(config)?;
    Ok(())
}

// The browser build starts from the library's wasm entry point
#[cfg(target_arch = "wasm32")]
fn main() {}
