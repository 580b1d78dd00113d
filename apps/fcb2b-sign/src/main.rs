//! fcb2b-sign - print a signed fcB2B service URL.
//!
//! Builds a GET request for a service URL taken from the fcB2B catalog, adds
//! the standard `GlobalIdentifier`, `TimeStamp` and `apiKey` parameters plus
//! any given on the command line, signs it, and prints the URL on stdout.
//!
//! # Usage
//!
//! ```text
//! FCB2B_SECRET_KEY=... fcb2b-sign --service StockCheck \
//!     https://host/path/StockCheck SupplierItemSKU=ABC123
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FCB2B_API_KEY` | `anonymous` | Value of the `apiKey` parameter |
//! | `FCB2B_SECRET_KEY` | *(unset)* | HMAC signing key |
//! | `FCB2B_REQUIREMENTS_FILE` | *(unset)* | JSON service requirement table |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use fcb2b_auth::{RequestDescription, sign_request};
use fcb2b_core::{ServiceName, ServiceRequirements, SigningConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fcb2b-sign")]
#[command(about = "Sign an fcB2B service request and print the URL")]
#[command(version)]
struct Cli {
    /// Service name used to check required parameters (e.g. StockCheck)
    #[arg(long)]
    service: Option<String>,

    /// Also print the string to sign on stderr
    #[arg(long)]
    show_string_to_sign: bool,

    /// Absolute https URL of the service
    service_url: String,

    /// Extra query parameters as NAME=VALUE
    #[arg(value_parser = parse_param)]
    params: Vec<(String, String)>,
}

/// Split `NAME=VALUE` at the first `=`.
fn parse_param(arg: &str) -> Result<(String, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {arg:?}"))?;
    if name.is_empty() {
        return Err(format!("empty parameter name in {arg:?}"));
    }
    Ok((name.to_owned(), value.to_owned()))
}

/// Initialize the tracing subscriber on stderr, leaving stdout for the URL.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Build and check the request described by `cli`.
fn build_request(
    cli: &Cli,
    config: &SigningConfig,
    requirements: &ServiceRequirements,
) -> Result<RequestDescription> {
    let mut request = RequestDescription::from_service_url(&cli.service_url)?
        .with_fresh_standard_params(&config.api_key);
    request
        .params_mut()
        .extend(cli.params.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    if let Some(service) = cli.service.as_deref().map(ServiceName::new) {
        if !requirements.is_known(&service) {
            info!(service = %service, "no service-specific parameters known");
        }
        request
            .validate(requirements, &service)
            .with_context(|| format!("request is incomplete for {service}"))?;
    }

    Ok(request)
}

/// Sign the request and write the URL to `out`, diagnostics to `err`.
fn run(
    cli: &Cli,
    config: &SigningConfig,
    requirements: &ServiceRequirements,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<()> {
    let request = build_request(cli, config, requirements)?;
    let signed = sign_request(&request, config).context("cannot sign request")?;

    info!(
        host = %request.host(),
        path = %request.path(),
        global_identifier = request.params().get("GlobalIdentifier").unwrap_or_default(),
        "signed request",
    );

    if cli.show_string_to_sign {
        writeln!(err, "{}", signed.canonical.string_to_sign)?;
    }
    writeln!(out, "{signed}")?;

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SigningConfig::from_env();

    init_tracing(&config.log_level)?;

    let requirements = ServiceRequirements::load(config.requirements_file.as_deref())
        .context("cannot load service requirements")?;

    run(
        &cli,
        &config,
        &requirements,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )
}
