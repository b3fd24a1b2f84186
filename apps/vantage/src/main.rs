use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vantage::headless::{resolve_config_path, run_headless, HeadlessArgs, HeadlessCommand};
use vantage::obs::{self, LogFormat};
use vantage_application::formatting::{InputKind, PARSE_ERROR_PREFIX};
use vantage_domain::value_objects::display_mode::DisplayMode;

#[derive(Parser, Debug)]
#[command(name = "vantage")]
#[command(about = "Format numeric values and build equity chart views as JSON.", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file path (TOML). If omitted, uses env VANTAGE_CONFIG.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Default log filter when VANTAGE_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Log output format: pretty | json
    #[arg(long, global = true, default_value = "pretty")]
    log_format: LogFormat,

    /// Serve Prometheus metrics on this address (host:port).
    #[arg(long, global = true, env = "VANTAGE_METRICS_ADDR")]
    metrics_addr: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Format a number, decimal string, or hex string for display.
    Format {
        value: String,

        /// Input kind: auto | number | decimal | hex
        #[arg(long, default_value = "auto")]
        kind: InputKind,

        /// Use full thousands-grouped output instead of K/M/B suffixes.
        #[arg(long)]
        grouped: bool,
    },
    /// Render a fraction as percent text (0.1234 -> 12.34).
    Percent {
        value: String,

        /// Fraction digits (defaults to config `format.percent_decimals`).
        #[arg(long)]
        decimals: Option<u32>,
    },
    /// Build the equity chart view from a .json or .csv history file.
    Chart {
        /// Equity history file (.json or .csv).
        #[arg(long)]
        input: PathBuf,

        /// Display mode: dollar | percent
        #[arg(long)]
        mode: Option<DisplayMode>,

        /// Initial account balance; derived from the first valid point if omitted.
        #[arg(long)]
        initial_balance: Option<f64>,
    },
}

fn main() {
    let cli = Cli::parse();

    let observability = obs::init_tracing(&cli.log_level, cli.log_format).and_then(|()| {
        let addr = obs::metrics_listen_addr(cli.metrics_addr.as_deref())?;
        obs::init_metrics(addr)
    });
    if let Err(err) = observability {
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    let command = match cli.command {
        Command::Format {
            value,
            kind,
            grouped,
        } => HeadlessCommand::Format {
            value,
            kind,
            grouped,
        },
        Command::Percent { value, decimals } => HeadlessCommand::Percent { value, decimals },
        Command::Chart {
            input,
            mode,
            initial_balance,
        } => HeadlessCommand::Chart {
            input,
            mode,
            initial_balance,
        },
    };

    let result = run_headless(HeadlessArgs {
        command,
        config_path: resolve_config_path(cli.config),
    });

    match result {
        Ok(json) => {
            println!(
                "{}",
                serde_json::to_string(&json)
                    .unwrap_or_else(|_| "{\"status\":\"error\",\"error\":\"json\"}".to_string())
            );
            std::process::exit(0);
        }
        Err(err) => {
            let code = if err.starts_with(PARSE_ERROR_PREFIX) {
                2
            } else {
                1
            };
            eprintln!("error: {err}");
            std::process::exit(code);
        }
    }
}
