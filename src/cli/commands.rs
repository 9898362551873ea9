//! CLI command implementations

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::rest_api::ErrorMode;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Load configuration from a JSON file. A missing file yields defaults.
pub fn load_config(path: &Path) -> CliResult<HttpServerConfig> {
    let config = match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            HttpServerConfig::default()
        }
        Err(e) => {
            return Err(CliError::config_error(format!(
                "Failed to read config: {}",
                e
            )))
        }
    };

    validate(&config)?;
    Ok(config)
}

fn validate(config: &HttpServerConfig) -> CliResult<()> {
    if config.port == 0 {
        return Err(CliError::config_error("port must be > 0"));
    }

    if config.api_key.is_empty() {
        return Err(CliError::config_error("api_key must not be empty"));
    }

    Ok(())
}

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            host,
            port,
            data_file,
            legacy_errors,
        } => {
            let mut config = load_config(&config)?;
            apply_overrides(&mut config, host, port, data_file, legacy_errors);
            validate(&config)?;
            serve(config)
        }
        Command::CheckConfig { config } => check_config(&config),
    }
}

fn apply_overrides(
    config: &mut HttpServerConfig,
    host: Option<String>,
    port: Option<u16>,
    data_file: Option<PathBuf>,
    legacy_errors: bool,
) {
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if data_file.is_some() {
        config.data_file = data_file;
    }
    if legacy_errors {
        config.error_mode = ErrorMode::Legacy;
    }
}

/// Open the store and serve the HTTP API until stopped
pub fn serve(config: HttpServerConfig) -> CliResult<()> {
    let server = HttpServer::from_config(config)
        .map_err(|e| CliError::boot_failed(format!("Failed to open store: {}", e)))?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Print the effective configuration as JSON
pub fn check_config(path: &Path) -> CliResult<()> {
    let config = load_config(path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join("absent.json")).unwrap();
        assert_eq!(config, HttpServerConfig::default());
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cafedb.json");
        fs::write(
            &path,
            r#"{"port": 8000, "api_key": "s3cret", "data_file": "cafes.json"}"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.api_key, "s3cret");
        assert_eq!(config.data_file, Some(PathBuf::from("cafes.json")));
    }

    #[test]
    fn test_invalid_json_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cafedb.json");
        fs::write(&path, "{port:").unwrap();

        let err = load_config(&path).unwrap_err();
        assert_eq!(err.code().code(), "CAFE_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cafedb.json");
        fs::write(&path, r#"{"api_key": ""}"#).unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut config = HttpServerConfig::default();
        apply_overrides(
            &mut config,
            Some("127.0.0.1".to_string()),
            Some(9000),
            Some(PathBuf::from("/var/lib/cafes.json")),
            true,
        );

        assert_eq!(config.socket_addr(), "127.0.0.1:9000");
        assert_eq!(config.data_file, Some(PathBuf::from("/var/lib/cafes.json")));
        assert_eq!(config.error_mode, ErrorMode::Legacy);
    }
}
