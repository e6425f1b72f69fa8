//! Тесты для хранилища таблиц
