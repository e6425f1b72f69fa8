//! Тесты для сетевого интерфейса

mod server_tests;
