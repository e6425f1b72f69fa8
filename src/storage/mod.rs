//! Хранилище таблиц tabdb
//!
//! Каталог на базу данных, файл на таблицу, строки UTF-8 с ячейками через
//! табуляцию. Исполнители видят хранилище только через [`TableStorage`]:
//! прочитать все строки таблицы и целиком заменить их новым набором.

pub mod file_storage;
pub mod memory_storage;
pub mod table;

#[cfg(test)]
pub mod tests;

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;
pub use table::{Table, ID_COLUMN, NULL_VALUE};

use crate::common::Result;

/// Контракт хранилища таблиц
pub trait TableStorage {
    /// Читает все строки таблицы. Отсутствующая таблица читается как пустая.
    fn read_table(&self, database: &str, table: &str) -> Result<Vec<String>>;

    /// Полностью перезаписывает таблицу. Таблица должна уже существовать.
    fn write_table(&mut self, database: &str, table: &str, lines: &[String]) -> Result<()>;

    /// Создает таблицу с заголовком
    fn create_table(&mut self, database: &str, table: &str, header: &[String]) -> Result<()>;

    /// Удаляет таблицу
    fn drop_table(&mut self, database: &str, table: &str) -> Result<()>;

    /// Создает пустую базу данных
    fn create_database(&mut self, database: &str) -> Result<()>;

    /// Проверяет существование базы данных
    fn database_exists(&self, database: &str) -> bool;

    /// Удаляет все таблицы базы данных и саму базу
    fn drop_database(&mut self, database: &str) -> Result<()>;

    /// Имена таблиц базы данных в алфавитном порядке
    fn list_tables(&self, database: &str) -> Result<Vec<String>>;
}

/// Имена баз данных и таблиц не зависят от регистра
pub(crate) fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}
