//! Обработка ошибок для tabdb
//!
//! Каждый вариант соответствует одному классу сбоев обработки запроса.
//! `Display` выдаёт только человекочитаемую причину: префикс `[ERROR]`
//! добавляет диспетчер.

use thiserror::Error;

/// Основной тип ошибки для tabdb
#[derive(Error, Debug)]
pub enum Error {
    /// Ошибка I/O операций
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Нераспознанный фрагмент запроса
    #[error("Invalid token detected: {token}")]
    Lexical { token: String },

    /// Нарушение грамматики
    #[error("{message}")]
    Syntax { message: String },

    /// Некорректная ссылка на колонки или значения
    #[error("{message}")]
    Semantic { message: String },

    /// Отсутствующая таблица/база данных или сбой хранилища
    #[error("{message}")]
    Resource { message: String },

    /// Ошибка конфигурации
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Тип результата для tabdb
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Создает лексическую ошибку
    pub fn lexical(token: impl Into<String>) -> Self {
        Self::Lexical {
            token: token.into(),
        }
    }

    /// Создает синтаксическую ошибку
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
        }
    }

    /// Создает семантическую ошибку
    pub fn semantic(message: impl Into<String>) -> Self {
        Self::Semantic {
            message: message.into(),
        }
    }

    /// Создает ошибку ресурса
    pub fn resource(message: impl Into<String>) -> Self {
        Self::Resource {
            message: message.into(),
        }
    }

    /// Создает ошибку конфигурации
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Ошибка "таблица не найдена"
    pub fn table_not_found(table: &str) -> Self {
        Self::resource(format!("Table '{}' does not exist.", table))
    }

    /// Ошибка "база данных не найдена"
    pub fn database_not_found(database: &str) -> Self {
        Self::resource(format!("Database '{}' does not exist.", database))
    }

    /// Ошибка "база данных не выбрана"
    pub fn no_database_selected() -> Self {
        Self::resource("No database selected.")
    }

    /// Ошибка, возникшая до выполнения команды (лексика, синтаксис, семантика)
    pub fn is_parse_stage(&self) -> bool {
        matches!(
            self,
            Self::Lexical { .. } | Self::Syntax { .. } | Self::Semantic { .. }
        )
    }
}
