//! Конфигурация для tabdb
//!
//! Предоставляет структуры конфигурации для хранилища, сети и логирования.
//! Источники по возрастанию приоритета: значения по умолчанию, TOML файл,
//! переменные окружения, аргументы командной строки.

use crate::common::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Имя каталога хранилища по умолчанию
pub const DEFAULT_STORAGE_DIRECTORY: &str = "databases";

/// Порт по умолчанию
pub const DEFAULT_PORT: u16 = 8888;

/// Основная конфигурация базы данных
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Корневой каталог: по одному подкаталогу на базу данных
    pub storage_directory: PathBuf,
    /// Настройки сети
    pub network: NetworkConfig,
    /// Настройки логирования
    pub logging: LoggingConfig,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            storage_directory: PathBuf::from(DEFAULT_STORAGE_DIRECTORY),
            network: NetworkConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Конфигурация сети
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Хост для прослушивания
    pub host: String,
    /// Порт для прослушивания
    pub port: u16,
    /// Максимальная длина одного запроса в байтах
    pub max_statement_length: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            max_statement_length: 64 * 1024,
        }
    }
}

/// Конфигурация логирования
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Уровень логирования (директива `EnvFilter`)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Загружает конфигурацию из TOML файла
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Разбирает конфигурацию из TOML строки
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::configuration(e.to_string()))
    }

    /// Сохраняет конфигурацию в TOML файл
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| Error::configuration(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Загружает конфигурацию из переменных окружения поверх текущей
    pub fn apply_env(mut self) -> Result<Self> {
        if let Ok(dir) = std::env::var("TABDB_STORAGE_DIR") {
            self.storage_directory = PathBuf::from(dir);
        }

        if let Ok(host) = std::env::var("TABDB_HOST") {
            self.network.host = host;
        }

        if let Ok(port) = std::env::var("TABDB_PORT") {
            self.network.port = port
                .parse()
                .map_err(|_| Error::configuration(format!("Invalid TABDB_PORT: {}", port)))?;
        }

        if let Ok(level) = std::env::var("TABDB_LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(self)
    }

    /// Загружает конфигурацию из переменных окружения
    pub fn from_env() -> Result<Self> {
        Self::default().apply_env()
    }

    /// Валидирует конфигурацию
    pub fn validate(&self) -> Result<()> {
        if self.storage_directory.as_os_str().is_empty() {
            return Err(Error::configuration("Storage directory cannot be empty"));
        }

        if self.network.port == 0 {
            return Err(Error::configuration("Port must be greater than 0"));
        }

        if self.network.max_statement_length == 0 {
            return Err(Error::configuration(
                "Max statement length must be greater than 0",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DatabaseConfig::default();
        assert_eq!(config.storage_directory, PathBuf::from("databases"));
        assert_eq!(config.network.port, 8888);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = DatabaseConfig::default();
        config.network.port = 0;
        assert!(config.validate().is_err());

        let mut config = DatabaseConfig::default();
        config.storage_directory = PathBuf::new();
        assert!(config.validate().is_err());

        let mut config = DatabaseConfig::default();
        config.network.max_statement_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DatabaseConfig::from_toml(
            r#"
            storage_directory = "/tmp/tabdb"

            [network]
            port = 9000
            "#,
        )
        .unwrap();

        assert_eq!(config.storage_directory, PathBuf::from("/tmp/tabdb"));
        assert_eq!(config.network.port, 9000);
        assert_eq!(config.network.host, "127.0.0.1");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_toml() {
        let result = DatabaseConfig::from_toml("storage_directory = [");
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = DatabaseConfig::default();
        config.logging.level = "debug".to_string();
        config.to_file(&path).unwrap();

        let loaded = DatabaseConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
