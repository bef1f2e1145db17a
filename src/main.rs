use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;

use homeops::config;
use homeops::error::ApiResult;
use homeops::server;
use homeops::server::appstate::AppState;
use homeops::server::http::HttpServer;

/// Read-only health doctor for Home Assistant
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Configuration file (optional, defaults apply when missing)
    #[arg(short, long, default_value = "homeops.yaml")]
    config: Utf8PathBuf,
}

/*
 * Formatter function to output in syslog format. This makes sense when running
 * as a service (where output might go to a log file, or the system journal)
 */
#[allow(clippy::match_same_arms)]
fn syslog_format(
    buf: &mut pretty_env_logger::env_logger::fmt::Formatter,
    record: &log::Record,
) -> std::io::Result<()> {
    writeln!(
        buf,
        "<{}>{}: {}",
        match record.level() {
            log::Level::Error => 3,
            log::Level::Warn => 4,
            log::Level::Info => 6,
            log::Level::Debug => 7,
            log::Level::Trace => 7,
        },
        record.target(),
        record.args()
    )
}

fn init_logging() -> ApiResult<()> {
    /* Try to provide reasonable default filters, when RUST_LOG is not specified */
    const DEFAULT_LOG_FILTERS: &[&str] = &[
        "debug",
        "hyper_util=info",
        "reqwest=info",
        "tower_http::trace::on_request=info",
        "axum::rejection=trace",
    ];

    let log_filters = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTERS.join(","));

    /* Detect if we need syslog or human-readable formatting */
    if std::env::var("SYSTEMD_EXEC_PID").is_ok_and(|pid| pid == std::process::id().to_string()) {
        Ok(pretty_env_logger::env_logger::builder()
            .format(syslog_format)
            .parse_filters(&log_filters)
            .try_init()?)
    } else {
        Ok(pretty_env_logger::formatted_timed_builder()
            .parse_filters(&log_filters)
            .try_init()?)
    }
}

async fn run(args: Args) -> ApiResult<()> {
    init_logging()?;

    let config = config::parse(&args.config)?;
    log::debug!("Configuration loaded successfully");

    let appstate = AppState::from_config(config)?;

    let http = HttpServer::new(&appstate.config().server);
    http.install_signal_handlers()?;
    http.serve(server::build_service(appstate)).await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(err) = run(args).await {
        log::error!("HomeOps error: {err}");
        log::error!("Fatal error encountered, cannot continue.");
        std::process::exit(1);
    }
}
