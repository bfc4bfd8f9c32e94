use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use prospekt::utils::RunSummary;
use prospekt::{ScraperConfig, WebScraper};

#[derive(Parser)]
#[command(name = "prospekt")]
#[command(
    about = "Scrapes prospektmaschine.de hypermarket leaflets into a JSON file",
    long_about = None
)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[arg(long, help = "Leaflet listing page to fetch")]
    url: Option<String>,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "JSON file to write, overwritten on every run"
    )]
    output: Option<PathBuf>,

    #[arg(
        long,
        value_name = "SECS",
        help = "Request timeout in seconds (unbounded when omitted)",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: Option<u64>,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    fn into_config(self) -> ScraperConfig {
        let defaults = ScraperConfig::default();
        ScraperConfig {
            url: self.url.unwrap_or(defaults.url),
            output: self.output.unwrap_or(defaults.output),
            timeout: self.timeout.map(Duration::from_secs),
        }
    }
}

/// Runs one cycle and logs any run-level failure. Failures are reported on the
/// console only; the process still exits normally.
async fn execute(config: &ScraperConfig) -> Option<RunSummary> {
    let scraper = WebScraper::new(config.timeout)
        .inspect_err(|e| log::error!("Error creating scraper: {}", e))
        .ok()?;

    prospekt::run(&scraper, config)
        .await
        .inspect_err(|e| log::error!("Failed to run parser: {}", e))
        .ok()
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    let config = cli.into_config();

    if let Some(summary) = execute(&config).await {
        print!("{}", summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_uses_defaults() {
        let config = Cli::parse_from(["prospekt"]).into_config();

        assert_eq!(config.url, "https://www.prospektmaschine.de/hypermarkte/");
        assert_eq!(config.output, PathBuf::from("leaflets.json"));
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = Cli::parse_from([
            "prospekt",
            "--url",
            "http://localhost:8080/hypermarkte/",
            "-o",
            "out/leaflets.json",
            "--timeout",
            "15",
        ])
        .into_config();

        assert_eq!(config.url, "http://localhost:8080/hypermarkte/");
        assert_eq!(config.output, PathBuf::from("out/leaflets.json"));
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[tokio::test]
    async fn test_execute_failure_returns_without_output() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("addr").port()
        };
        let dir = tempfile::tempdir().expect("tempdir");
        let config = ScraperConfig {
            url: format!("http://127.0.0.1:{port}/hypermarkte/"),
            output: dir.path().join("leaflets.json"),
            timeout: Some(Duration::from_secs(10)),
        };

        assert!(execute(&config).await.is_none());
        assert!(!config.output.exists());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(Cli::try_parse_from(["prospekt", "--timeout", "0"]).is_err());
    }
}
