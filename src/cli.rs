use clap::Parser;
use std::path::PathBuf;

/// Courier - multi-agent message router
#[derive(Parser, Debug, Clone)]
#[command(name = "courier", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "COURIER_CONFIG", default_value = "courier.toml")]
    pub config: PathBuf,

    /// Server host address
    #[arg(long, env = "COURIER_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "COURIER_PORT")]
    pub port: Option<u16>,

    /// SQLite database url
    #[arg(long, env = "COURIER_DATABASE_URL")]
    pub database_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["courier"]);
        assert_eq!(cli.config, PathBuf::from("courier.toml"));
        assert!(cli.host.is_none());
        assert!(cli.port.is_none());
        assert!(cli.database_url.is_none());
    }

    #[test]
    fn test_cli_with_args() {
        let cli = Cli::parse_from([
            "courier",
            "--config",
            "demos/dispatch.toml",
            "--host",
            "0.0.0.0",
            "--port",
            "8001",
            "--database-url",
            "sqlite://dispatch.db",
        ]);
        assert_eq!(cli.config, PathBuf::from("demos/dispatch.toml"));
        assert_eq!(cli.host, Some("0.0.0.0".to_string()));
        assert_eq!(cli.port, Some(8001));
        assert_eq!(cli.database_url, Some("sqlite://dispatch.db".to_string()));
    }
}
