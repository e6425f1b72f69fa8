//! tabdb - минимальное реляционное хранилище с текстовым языком запросов
//!
//! Запрос проходит путь: текст → фрагменты → классифицированные токены →
//! дескриптор команды (и дерево условия WHERE) → исполнитель → хранилище →
//! текстовый ответ `[OK]` или `[ERROR]`.

pub mod cli;
pub mod common;
pub mod executor;
pub mod network;
pub mod parser;
pub mod storage;

pub use common::error::{Error, Result};
pub use executor::{QueryExecutor, QueryResult};
pub use storage::{FileStorage, MemoryStorage, TableStorage};

/// Версия библиотеки
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
