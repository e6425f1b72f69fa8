//! Тесты для исполнителя запросов


use crate::executor::{QueryExecutor, QueryResult};
use crate::storage::MemoryStorage;

/// Исполнитель над памятью с выбранной базой `school`
pub(crate) fn school() -> QueryExecutor<MemoryStorage> {
    let mut executor = QueryExecutor::new(MemoryStorage::new());
    assert_ok(&mut executor, "CREATE DATABASE school;");
    assert_ok(&mut executor, "USE school;");
    executor
}

pub(crate) fn assert_ok(executor: &mut QueryExecutor<MemoryStorage>, query: &str) -> QueryResult {
    let result = executor.execute(query);
    assert!(result.is_ok(), "{} -> {}", query, result);
    result
}

pub(crate) fn assert_error(executor: &mut QueryExecutor<MemoryStorage>, query: &str) -> String {
    let result = executor.execute(query);
    let text = result.to_string();
    assert!(text.starts_with("[ERROR] "), "{} -> {}", query, text);
    text
}
