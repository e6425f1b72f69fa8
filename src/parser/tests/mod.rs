//! Тесты фронтенда языка запросов

mod condition_tests;
