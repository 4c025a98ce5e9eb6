//! HandsFree client - camera-tracked hand poses become held game inputs.
//!
//! Wires the external capability ports (landmark provider, OS input
//! injection, window inspection) to the control engine and runs the
//! frame-synchronous session loop.

mod config;
mod engine;
mod inject;
mod provider;
mod session;
mod window;

use clap::Parser;
use tracing::info;

use engine::profile::ControlProfile;
use engine::ControlEngine;

#[derive(Parser, Debug)]
#[command(name = "handsfree-client", about = "Hand-gesture game controller")]
struct Cli {
    /// Hand-tracker command producing JSON frame lines on stdout
    #[arg(long)]
    provider_cmd: String,

    /// Path to the window-title -> profile mapping
    #[arg(long, default_value = "profiles.json")]
    profiles: std::path::PathBuf,

    /// Initial control profile: default, mouse, fps, or racing
    #[arg(long, default_value = "default")]
    profile: String,

    /// Command printing the foreground window title (auto-switching)
    #[arg(long)]
    window_cmd: Option<String>,

    /// Disable window inspection and auto-switching
    #[arg(long)]
    no_auto_switch: bool,

    /// Log transitions without injecting OS input
    #[arg(long)]
    dry_run: bool,

    /// Exit after N seconds (testing)
    #[arg(long)]
    exit_after: Option<u64>,

    /// Show version and exit
    #[arg(long)]
    version: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("handsfree-client {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "handsfree_client=info".into()),
        )
        .init();

    info!("handsfree-client v{} starting", env!("CARGO_PKG_VERSION"));

    let initial = match ControlProfile::from_str(&cli.profile.to_ascii_lowercase()) {
        Some(profile) => profile,
        None => {
            eprintln!(
                "Unknown profile: {}. Use: default, mouse, fps, or racing",
                cli.profile,
            );
            std::process::exit(1);
        }
    };
    info!("initial profile: {}", initial.as_str());

    let profiles = config::ProfileMap::load(&cli.profiles);
    let mut engine = ControlEngine::new(initial);

    let mut provider = provider::SubprocessLandmarkProvider::spawn(&cli.provider_cmd)?;

    let mut sink: Box<dyn inject::InputSink> = if cli.dry_run {
        info!("dry run: OS input injection disabled");
        Box::new(inject::NullSink)
    } else {
        Box::new(inject::EnigoSink::new()?)
    };

    let inspector: Box<dyn window::WindowInspector> = if cli.no_auto_switch {
        Box::new(window::NullWindowInspector)
    } else {
        match cli.window_cmd {
            Some(command) => Box::new(window::CommandWindowInspector::new(command)),
            None => Box::new(window::CommandWindowInspector::default()),
        }
    };

    let session_config = session::SessionConfig {
        exit_after: cli.exit_after,
    };
    session::run(
        &mut engine,
        &mut provider,
        sink.as_mut(),
        inspector.as_ref(),
        &profiles,
        &session_config,
    )
}
