//! Исполнитель запросов tabdb

pub mod context;
pub mod ddl;
pub mod dml;
pub mod executor;
pub mod join;
pub mod result;

#[cfg(test)]
pub mod tests;

pub use context::{ExecutionContext, Session};
pub use executor::QueryExecutor;
pub use result::QueryResult;
