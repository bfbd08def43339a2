//! Command-line and environment configuration.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::engine::OrderMode;

pub const DEFAULT_CATALOG_PATH: &str = "data/catalog.json";
pub const LOG_FILTER_ENV: &str = "MEDIWISE_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Sequential,
    Random,
}

impl From<OrderArg> for OrderMode {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Sequential => OrderMode::Sequential,
            OrderArg::Random => OrderMode::Random,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "mediwise", version, about = "Medical reference and MCQ practice in the terminal", long_about = None)]
pub struct Config {
    /// JSON catalog of organ systems, topics and question banks
    #[arg(short, long, env = "MEDIWISE_CATALOG", default_value = DEFAULT_CATALOG_PATH)]
    pub catalog: PathBuf,

    /// Open this topic id straight away
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Question order for --topic; skips the order prompt
    #[arg(short, long, value_enum, requires = "topic")]
    pub order: Option<OrderArg>,

    /// Seed for random question order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (filter with MEDIWISE_LOG, default "info")
    #[arg(long, env = "MEDIWISE_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn order_mode(&self) -> Option<OrderMode> {
        self.order.map(OrderMode::from)
    }

    /// Install the tracing subscriber. Without a log file nothing is
    /// installed, because the terminal belongs to the UI.
    pub fn init_logging(&self) -> std::io::Result<()> {
        let Some(path) = &self.log_file else {
            return Ok(());
        };
        let file = File::create(path)?;
        let filter =
            EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["mediwise"]).unwrap();

        assert_eq!(config.catalog, PathBuf::from(DEFAULT_CATALOG_PATH));
        assert_eq!(config.topic, None);
        assert_eq!(config.order_mode(), None);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn topic_with_order_and_seed() {
        let config = Config::try_parse_from([
            "mediwise",
            "--catalog",
            "bank.json",
            "--topic",
            "delirium",
            "--order",
            "random",
            "--seed",
            "42",
        ])
        .unwrap();

        assert_eq!(config.catalog, PathBuf::from("bank.json"));
        assert_eq!(config.topic.as_deref(), Some("delirium"));
        assert_eq!(config.order_mode(), Some(OrderMode::Random));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn order_requires_topic() {
        assert!(Config::try_parse_from(["mediwise", "--order", "sequential"]).is_err());
    }

    #[test]
    fn unknown_order_is_rejected() {
        assert!(Config::try_parse_from(["mediwise", "-t", "x", "-o", "shuffled"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
