pub mod toml_config;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;

/// 命令列參數；有給的值會覆蓋 TOML 檔案中的設定
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "launch-dash")]
#[command(about = "Interactive dashboard for SpaceX launch records")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// URL of the launch records CSV
    #[arg(long)]
    pub dataset_url: Option<String>,

    /// Local launch records CSV, takes precedence over --dataset-url
    #[arg(long)]
    pub dataset_path: Option<String>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(short, long)]
    pub port: Option<u16>,

    /// Dataset download timeout in seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入 TOML (若有指定)，套用命令列覆蓋後再驗證
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(url) = &self.dataset_url {
            config.dataset.url = url.clone();
        }
        if let Some(path) = &self.dataset_path {
            config.dataset.path = Some(path.clone());
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(timeout) = self.timeout_seconds {
            config.dataset.timeout_seconds = timeout;
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_cli_flags() {
        let cli = CliConfig::parse_from([
            "launch-dash",
            "--dataset-path",
            "launches.csv",
            "--port",
            "9001",
            "--verbose",
        ]);

        assert_eq!(cli.dataset_path.as_deref(), Some("launches.csv"));
        assert_eq!(cli.port, Some(9001));
        assert!(cli.verbose);
        assert!(!cli.json_logs);
    }

    #[test]
    fn test_cli_overrides_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nhost = \"0.0.0.0\"\nport = 8123\n")
            .unwrap();

        let cli = CliConfig {
            config: Some(temp_file.path().to_str().unwrap().to_string()),
            port: Some(9999),
            ..Default::default()
        };

        let config = cli.resolve().unwrap();
        assert_eq!(config.host(), "0.0.0.0");
        assert_eq!(config.port(), 9999);
    }

    #[test]
    fn test_resolve_rejects_invalid_override() {
        let cli = CliConfig {
            dataset_url: Some("ftp://example.com/launches.csv".to_string()),
            ..Default::default()
        };
        assert!(cli.resolve().is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let cli = CliConfig {
            config: Some("/no/such/dashboard.toml".to_string()),
            ..Default::default()
        };
        assert!(cli.resolve().is_err());
    }
}
