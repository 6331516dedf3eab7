//! imagen-bridge - one Imagen request in, one JSON line on stdout.

mod adapters;
mod cassette;
mod cli;
mod config;
mod context;
mod dispatch;
mod envelope;
mod error;
mod params;
mod ports;

use std::path::Path;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;
use log::{debug, info, warn};

use crate::cli::Cli;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::envelope::Envelope;
use crate::error::BridgeError;
use crate::ports::ImageRequest;

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version keep clap's usual behavior. Every other
            // parse failure is the fixed invalid-arguments line, and it is
            // the only fault that exits nonzero.
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                err.exit();
            }
            debug!("argument parsing failed: {err}");
            println!("{}", Envelope::invalid_arguments().to_json());
            process::exit(1);
        }
    };

    let envelope = run(cli).await;
    println!("{}", envelope.to_json());
}

/// Drive one generation attempt end to end. Anything that goes wrong past
/// argument parsing comes back as the failure envelope, never as a nonzero
/// exit, so the caller can always parse stdout.
async fn run(cli: Cli) -> Envelope {
    let config_path = config::discover_config_path();
    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(message) => return Envelope::failure(BridgeError::Config(message).to_string()),
    };

    let (width, height) = match params::validate_dimensions(cli.width, cli.height) {
        Ok(dims) => dims,
        Err(err) => return Envelope::failure(err.to_string()),
    };

    let request = ImageRequest { prompt: cli.prompt, width, height };

    // Mode selection: live / recording / replaying, chosen by environment.
    let replay_path = std::env::var("IMAGEN_BRIDGE_REPLAY").ok();
    let is_recording =
        std::env::var("IMAGEN_BRIDGE_RECORD").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        info!("replaying from {cassette_path}");
        match ServiceContext::replaying(Path::new(cassette_path)) {
            Ok(ctx) => (ctx, None),
            Err(err) => return Envelope::failure(err.to_string()),
        }
    } else if is_recording {
        info!("recording enabled");
        let (ctx, session) = ServiceContext::recording(&cli.api_key, &config);
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&cli.api_key, &config), None)
    };

    let envelope = dispatch::dispatch(ctx.generator.as_ref(), &request).await;

    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => info!("cassette saved: {}", path.display()),
            Err(message) => warn!("failed to save cassette: {message}"),
        }
    }

    envelope
}
