//! Модули интеграционных тестов

pub mod common;
pub mod full_cycle_tests;
pub mod persistence_tests;
