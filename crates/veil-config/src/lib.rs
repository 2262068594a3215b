use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for veil (`config.toml`)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub ocr: OcrConfig,

    #[serde(default)]
    pub face: FaceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Defaults to `<data_dir>/uploads`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_dir: Option<PathBuf>,

    /// Defaults to `<data_dir>/history.db`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    #[serde(default = "default_tesseract_cmd")]
    pub tesseract_cmd: String,

    #[serde(default = "default_language")]
    pub language: String,

    /// Tokens at or below this confidence are ignored
    #[serde(default = "default_min_confidence")]
    pub min_confidence: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceConfig {
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    #[serde(default = "default_min_face_size")]
    pub min_face_size: u32,

    #[serde(default = "default_score_threshold")]
    pub score_threshold: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            upload_dir: None,
            db_path: None,
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_cmd: default_tesseract_cmd(),
            language: default_language(),
            min_confidence: default_min_confidence(),
        }
    }
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            min_face_size: default_min_face_size(),
            score_threshold: default_score_threshold(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_data_dir() -> PathBuf {
    if let Some(dirs) = project_dirs() {
        dirs.data_dir().to_path_buf()
    } else {
        PathBuf::from("veil-data")
    }
}

fn default_tesseract_cmd() -> String {
    "tesseract".to_string()
}

fn default_language() -> String {
    "eng".to_string()
}

fn default_min_confidence() -> i32 {
    60
}

fn default_model_path() -> PathBuf {
    default_data_dir().join("seeta_fd_frontal_v1.0.bin")
}

fn default_min_face_size() -> u32 {
    20
}

fn default_score_threshold() -> f64 {
    2.0
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "veil", "veil")
}

impl StorageConfig {
    pub fn upload_dir(&self) -> PathBuf {
        self.upload_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("uploads"))
    }

    pub fn db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("history.db"))
    }
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`, writing the defaults there if it doesn't exist
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(path, content)?;
            Ok(config)
        }
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = project_dirs() {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("veil-config.toml")
        }
    }

    /// Point all storage at `data_dir`, dropping any explicit upload or db paths
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.storage = StorageConfig {
            data_dir: data_dir.into(),
            upload_dir: None,
            db_path: None,
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.ocr.min_confidence, 60);
        assert_eq!(config.ocr.tesseract_cmd, "tesseract");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.server.port, config.server.port);
        assert_eq!(parsed.storage.data_dir, config.storage.data_dir);
    }

    #[test]
    fn test_derived_paths() {
        let config = Config::default().with_data_dir("/srv/veil");
        assert_eq!(config.storage.upload_dir(), PathBuf::from("/srv/veil/uploads"));
        assert_eq!(config.storage.db_path(), PathBuf::from("/srv/veil/history.db"));
    }

    #[test]
    fn test_partial_file() {
        let toml_str = r#"
[server]
port = 8080

[storage]
data_dir = "/tmp/veil"
db_path = "/var/lib/veil/history.db"

[ocr]
min_confidence = 75
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.storage.upload_dir(), PathBuf::from("/tmp/veil/uploads"));
        assert_eq!(config.storage.db_path(), PathBuf::from("/var/lib/veil/history.db"));
        assert_eq!(config.ocr.min_confidence, 75);
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.face.min_face_size, 20);
    }

    #[test]
    fn test_load_from_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.server.port, 5000);

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.ocr.language, config.ocr.language);
    }
}
