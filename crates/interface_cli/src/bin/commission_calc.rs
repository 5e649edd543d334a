//! Commission Calculator Binary
//!
//! Reads a commission request as JSON and prints its allocation summary.
//!
//! # Usage
//!
//! ```bash
//! # Read a request file, print the summary as JSON
//! commission-calc --input deal.json --pretty
//!
//! # Read a stored configuration from stdin, supplying the deal value
//! echo '[{"percent": 100}]' | commission-calc --deal-value 1500 --format text
//! ```
//!
//! # Environment Variables
//!
//! * `COMMISSION_MODEL` - Calculation model: simple, advanced (default: advanced)
//! * `COMMISSION_LOG_LEVEL` - Log level or filter directive (default: warn)
//! * `COMMISSION_LOG_FORMAT` - Log format: text, json (default: text)
//! * `COMMISSION_CURRENCY` - Currency of the text report (default: EUR)
//! * `COMMISSION_CURRENCY_FORMAT` - symbol, code, french (default: symbol)
//! * `COMMISSION_APPLY_DEFAULT_LINES` - Use the default split when no lines are configured
//!
//! # Exit Status
//!
//! `0` on success, `1` on error, `2` with `--strict` when the lines do not add
//! up to the deal value.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::Currency;
use domain_commission::{AllocationEngine, CalculationModel};
use interface_cli::{
    build_report,
    config::{CalcConfig, LogFormat},
    render,
    request::{read_input, CalcRequest, Overrides},
};

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Parser, Debug)]
#[command(name = "commission-calc", version, about = "Split a deal value among its commission lines")]
struct Cli {
    /// Request file (stdin when omitted)
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Calculation model
    #[arg(long)]
    model: Option<CalculationModel>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t)]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Use the default partner split when no lines are configured
    #[arg(long = "with-defaults")]
    with_defaults: bool,

    /// Exit with status 2 when the lines do not add up to the deal value
    #[arg(long)]
    strict: bool,

    /// Deal value, overriding the input
    #[arg(long = "deal-value", allow_hyphen_values = true)]
    deal_value: Option<String>,

    /// Deposit percentage, overriding the input
    #[arg(long = "deposit-percent", allow_hyphen_values = true)]
    deposit_percent: Option<String>,

    /// Currency of the text report
    #[arg(long)]
    currency: Option<Currency>,

    /// Log format on stderr
    #[arg(long = "log-format", value_enum)]
    log_format: Option<LogFormat>,
}

fn main() -> anyhow::Result<ExitCode> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let (config, config_error) = match CalcConfig::from_env() {
        Ok(config) => (config, None),
        Err(error) => (CalcConfig::default(), Some(error)),
    };

    init_tracing(&config.log_level, cli.log_format.unwrap_or(config.log_format));
    if let Some(error) = config_error {
        tracing::warn!(%error, "Ignoring invalid COMMISSION_* configuration");
    }

    let text = read_input(cli.input.as_deref())?;
    let overrides = Overrides {
        deal_value: cli.deal_value.clone(),
        deposit_percent: cli.deposit_percent.clone(),
    };
    let mut request = CalcRequest::parse(&text)
        .and_then(|request| request.apply(&overrides))
        .context("Cannot build the commission request")?;
    if cli.with_defaults || config.apply_default_lines {
        request = request.with_default_lines();
    }

    let model = cli.model.or(request.model).unwrap_or(config.model);
    tracing::info!(
        %model,
        format = ?request.format,
        lines = request.lines.len(),
        sub_deals = request.sub_deals.len(),
        "Computing commission allocation"
    );

    let report = build_report(&request, AllocationEngine::new(model));
    let output = match cli.format {
        OutputFormat::Json => render::to_json(&report, cli.pretty)?,
        OutputFormat::Text => render::to_text(
            &report,
            cli.currency.unwrap_or(config.currency),
            config.currency_format,
        ),
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output.trim_end())?;
    stdout.flush()?;

    if cli.strict && !report.summary.matches_deal_value {
        tracing::warn!(
            difference = %report.summary.difference_to_deal_value,
            "Commission lines do not add up to the deal value"
        );
        return Ok(ExitCode::from(2));
    }

    Ok(ExitCode::SUCCESS)
}

/// Initializes the tracing subscriber, writing to stderr
///
/// # Arguments
///
/// * `log_level` - Filter used when `RUST_LOG` is not set
/// * `format` - Plain or JSON log lines
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(true))
            .init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_flags() {
        let cli = Cli::parse_from([
            "commission-calc",
            "--model",
            "simple",
            "--format",
            "text",
            "--deal-value",
            "-100",
            "--strict",
        ]);

        assert_eq!(cli.model, Some(CalculationModel::Simple));
        assert!(matches!(cli.format, OutputFormat::Text));
        assert_eq!(cli.deal_value.as_deref(), Some("-100"));
        assert!(cli.strict);
        assert!(cli.input.is_none());
    }
}
