//! Indexing-Check main entry point
//!
//! Command-line interface for the indexing posture monitoring plugin. The
//! summary line goes to stdout and the exit code follows monitoring
//! conventions (OK=0, WARNING=1, CRITICAL=2, UNKNOWN=3); all diagnostics
//! go to stderr so the plugin output stays parseable.

use clap::Parser;
use indexing_check::check::{run_check, PolicyMode, Severity, UnknownAction};
use indexing_check::config::{self, CheckConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Checks whether a list of URLs is allowed or forbidden to be indexed
///
/// Reads a file of URLs and verifies each one's robots.txt rules and
/// `<meta name="robots">` directives against the declared indexing mode,
/// reporting one Nagios-style status line.
#[derive(Parser, Debug)]
#[command(name = "indexing-check")]
#[command(version)]
#[command(about = "Nagios-style indexing posture check", long_about = None)]
struct Cli {
    /// File containing newline-delimited URLs to check
    #[arg(short = 'f', long = "filename", value_name = "FILE")]
    filename: PathBuf,

    /// Whether the URLs should be indexable (index) or hidden (noindex)
    #[arg(short, long, value_enum)]
    mode: PolicyMode,

    /// Status to assign to a URL whose robots.txt cannot be processed
    #[arg(short = 'u', long = "on-unknown", value_enum, default_value = "unknown")]
    on_unknown: UnknownAction,

    /// Maximum number of per-URL messages listed in the report
    #[arg(long = "max-error-messages", value_name = "N", default_value_t = 3)]
    max_error_messages: usize,

    /// Number of URLs checked concurrently
    #[arg(long, value_name = "N", default_value_t = 8)]
    concurrency: usize,

    /// Timeout for each robots.txt and page fetch, in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 10)]
    timeout: u64,

    /// Enable debug logging, including a JSON dump of per-URL outcomes
    #[arg(short, long)]
    debug: bool,
}

impl Cli {
    fn into_config(self) -> CheckConfig {
        CheckConfig {
            input_file: self.filename,
            mode: self.mode,
            on_unknown: self.on_unknown,
            max_error_messages: self.max_error_messages,
            max_concurrent_checks: self.concurrency,
            fetch_timeout: Duration::from_secs(self.timeout),
            debug: self.debug,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    let config = cli.into_config();

    if let Err(e) = config::validate(&config) {
        // Nagios reads the first line of stdout
        println!("{}: {}", Severity::Unknown.label(), e);
        std::process::exit(Severity::Unknown.exit_code());
    }

    match run_check(&config).await {
        Ok(report) => {
            println!("{}", report.render());
            std::process::exit(report.exit_code());
        }
        Err(e) => {
            tracing::error!("Check run failed: {}", e);
            println!("{}: {}", Severity::Unknown.label(), e);
            std::process::exit(Severity::Unknown.exit_code());
        }
    }
}

/// Sets up the tracing subscriber, writing to stderr
fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("indexing_check=debug,info")
    } else {
        EnvFilter::new("indexing_check=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
