//! pulsed binary: foreground host for the heartbeat service.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use pulsed::config::{self, ServiceConfig};
use pulsed::host::{signals, ControlCode, TracingReporter};
use pulsed::observability;
use pulsed::ServiceController;

#[derive(Parser)]
#[command(name = "pulsed")]
#[command(about = "Heartbeat keep-alive service daemon", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply without one.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and exit.
    CheckConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match config::load_config(path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("pulsed: {}", error);
                return ExitCode::FAILURE;
            }
        },
        None => ServiceConfig::default(),
    };

    observability::logging::init(&config.observability.log_level);

    if let Some(Commands::CheckConfig) = cli.command {
        println!("configuration OK");
        return ExitCode::SUCCESS;
    }

    run(config)
}

fn run(config: ServiceConfig) -> ExitCode {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        server_enabled = config.listener.enabled,
        heartbeat_interval_ms = config.heartbeat.interval_ms,
        "pulsed starting"
    );

    let mut controller = ServiceController::new(config, Box::new(TracingReporter));
    if let Err(error) = controller.on_start() {
        tracing::error!(error = %error, "Service failed to start");
        return ExitCode::FAILURE;
    }

    let control = controller.control_handle();
    let exit = match signals::block_until_stop_signal() {
        Ok(()) => {
            tracing::info!("Stop signal received");
            ExitCode::SUCCESS
        }
        Err(error) => {
            // Could not register with the host control mechanism: stop the
            // service and exit with the platform error code.
            tracing::error!(error = %error, "Failed to register signal handlers");
            let code = error
                .raw_os_error()
                .and_then(|c| u8::try_from(c).ok())
                .unwrap_or(1);
            ExitCode::from(code)
        }
    };

    control.on_control(ControlCode::Stop);
    controller.wait_until_stopped();
    tracing::info!("Shutdown complete");
    exit
}
