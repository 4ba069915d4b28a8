use anyhow::{Context, Result, bail};
use clap::Parser;
use serde_json::{Map, Value};
use std::{env, fs, path::PathBuf};

/// Opaque settings handed to the handlers and the address-book service.
/// The HTTP layer never interprets them.
pub type ServiceConfig = Map<String, Value>;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub config_path: Option<PathBuf>,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Address book HTTP service")]
pub struct Args {
    /// Host to bind to (overrides ADDRSERVICE_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides ADDRSERVICE_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Attach tracebacks to error responses and log at debug level
    #[arg(short, long)]
    pub debug: bool,

    /// JSON file with service settings (overrides ADDRSERVICE_CONFIG)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    fn from_args(args: Args) -> Result<Self> {
        // --- Environment fallback ---
        let env_host = env::var("ADDRSERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match env::var("ADDRSERVICE_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing ADDRSERVICE_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => 8080,
            Err(err) => return Err(err).context("reading ADDRSERVICE_PORT"),
        };
        let env_debug = match env::var("ADDRSERVICE_DEBUG") {
            Ok(value) => parse_flag(&value)
                .with_context(|| format!("parsing ADDRSERVICE_DEBUG value `{}`", value))?,
            Err(_) => false,
        };
        let env_config = env::var_os("ADDRSERVICE_CONFIG").map(PathBuf::from);

        // --- Merge ---
        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            debug: args.debug || env_debug,
            config_path: args.config.or(env_config),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Load the service settings file, or an empty map when none is configured.
    pub fn load_service_config(&self) -> Result<ServiceConfig> {
        let Some(path) = &self.config_path else {
            return Ok(ServiceConfig::new());
        };

        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        parse_service_config(&raw).with_context(|| format!("parsing {}", path.display()))
    }
}

fn parse_service_config(raw: &str) -> Result<ServiceConfig> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        other => bail!("expected a JSON object, found {}", json_kind(&other)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("`{}` is not a boolean", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_config_must_be_an_object() {
        let cfg = parse_service_config(r#"{"logging": {"level": "info"}}"#).unwrap();
        assert!(cfg.contains_key("logging"));

        let err = parse_service_config("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("an array"));
        assert!(parse_service_config("{oops").is_err());
    }

    #[test]
    fn flags_accept_common_spellings() {
        assert!(parse_flag("TRUE").unwrap());
        assert!(parse_flag("1").unwrap());
        assert!(!parse_flag("off").unwrap());
        assert!(parse_flag("maybe").is_err());
    }

    #[test]
    fn missing_config_file_yields_empty_settings() {
        let cfg = AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            debug: false,
            config_path: None,
        };
        assert!(cfg.load_service_config().unwrap().is_empty());
        assert_eq!(cfg.addr(), "127.0.0.1:0");
    }
}
