use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "toon-compare")]
#[command(about = "Compare JSON and TOON token usage and LLM cost over a CSV dataset")]
pub struct CliConfig {
    #[arg(long, help = "TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    #[arg(long, help = "CSV dataset to serve")]
    pub dataset: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// 載入設定檔（若有），再以命令列參數覆蓋
    pub fn load_settings(&self) -> Result<TomlConfig> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(host) = &self.host {
            settings.server.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(dataset) = &self.dataset {
            settings.dataset.path = dataset.clone();
        }
        settings.llm.fill_api_key_from_env();

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_cli_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nhost = \"0.0.0.0\"\nport = 9000").unwrap();
        writeln!(file, "[dataset]\npath = \"jobs.csv\"").unwrap();

        let cli = CliConfig::parse_from([
            "toon-compare",
            "--config",
            file.path().to_str().unwrap(),
            "--port",
            "7000",
        ]);
        let settings = cli.load_settings().unwrap();

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 7000);
        assert_eq!(settings.dataset.path, "jobs.csv");
    }

    #[test]
    fn test_defaults_without_config_file() {
        let cli = CliConfig::parse_from(["toon-compare", "--dataset", "other.csv", "--port", "5001"]);
        let settings = cli.load_settings().unwrap();

        assert_eq!(settings.dataset.path, "other.csv");
        assert_eq!(settings.server.port, 5001);
        assert_eq!(settings.server.host, "127.0.0.1");
    }
}
