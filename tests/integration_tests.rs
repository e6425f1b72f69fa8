//! Интеграционные тесты для tabdb
//!
//! Прогоняют запросы через диспетчер поверх файлового хранилища во
//! временном каталоге.

mod integration;
