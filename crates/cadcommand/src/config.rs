use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "config.json";
pub const CONFIG_ENV_VAR: &str = "CADCOMMAND_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub cad: CadConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub name: String,
    pub version: String,
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "CAD Command Server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            host: "127.0.0.1".to_string(),
            port: 4850,
        }
    }
}

/// CAD applications the backend can target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CadKind {
    #[default]
    Autocad,
    Gcad,
    Zwcad,
}

impl CadKind {
    /// Automation identifier of the target application.
    pub fn app_id(&self) -> &'static str {
        match self {
            CadKind::Autocad => "AutoCAD.Application",
            CadKind::Gcad => "GCAD.Application",
            CadKind::Zwcad => "ZWCAD.Application",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CadConfig {
    #[serde(rename = "type")]
    pub kind: CadKind,
    /// Seconds to wait for a freshly launched application. Read by automation
    /// backends only; kept so existing config files load unchanged.
    pub startup_wait_time: u64,
    /// Seconds between consecutive automation calls.
    pub command_delay: f64,
}

impl Default for CadConfig {
    fn default() -> Self {
        Self {
            kind: CadKind::Autocad,
            startup_wait_time: 20,
            command_delay: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub default_filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./output"),
            default_filename: cadcommand_nlp::DEFAULT_DRAWING_FILE.to_string(),
        }
    }
}

impl OutputConfig {
    /// Resolves a save target: relative paths land in the output directory.
    pub fn resolve(&self, file_path: &str) -> PathBuf {
        let path = Path::new(file_path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.directory.join(path)
        }
    }
}

/// Loads configuration from `path`, or `config.json` in the working directory.
///
/// Never fails: a missing file, unreadable file, or invalid JSON all fall back
/// to defaults.
pub fn load_config(path: Option<&Path>) -> Config {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

    if !path.exists() {
        tracing::info!("config file not found, using defaults: {}", path.display());
        return Config::default();
    }

    let data = match std::fs::read_to_string(&path) {
        Ok(data) => data,
        Err(error) => {
            tracing::warn!("error reading config {}: {error}; using defaults", path.display());
            return Config::default();
        }
    };

    match serde_json::from_str::<Config>(&data) {
        Ok(config) => {
            tracing::info!("loaded configuration from {}", path.display());
            config
        }
        Err(error) => {
            tracing::warn!("invalid JSON in config file: {error}; using defaults");
            Config::default()
        }
    }
}
