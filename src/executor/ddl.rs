//! Структурные команды: USE, CREATE, ALTER, DROP

use crate::common::{Error, Result};
use crate::executor::context::ExecutionContext;
use crate::executor::result::QueryResult;
use crate::parser::{
    AlterStatement, AlterType, CreateDatabaseStatement, CreateTableStatement, DropStatement,
    UseStatement,
};
use crate::storage::{TableStorage, ID_COLUMN, NULL_VALUE};
use tracing::info;

/// USE: выбирает существующую базу данных
pub fn use_database<S: TableStorage>(
    context: &mut ExecutionContext<S>,
    statement: &UseStatement,
) -> Result<QueryResult> {
    context.select_database(&statement.database)?;
    info!(database = %statement.database, "database selected");
    Ok(QueryResult::Ok)
}

/// CREATE DATABASE: создает пустую базу, не меняя выбранную
pub fn create_database<S: TableStorage>(
    context: &mut ExecutionContext<S>,
    statement: &CreateDatabaseStatement,
) -> Result<QueryResult> {
    context.storage_mut().create_database(&statement.database)?;
    Ok(QueryResult::Ok)
}

/// CREATE TABLE: записывает заголовок `id` + объявленные колонки
pub fn create_table<S: TableStorage>(
    context: &mut ExecutionContext<S>,
    statement: &CreateTableStatement,
) -> Result<QueryResult> {
    let database = context.current_database()?;
    let header: Vec<String> = std::iter::once(ID_COLUMN.to_string())
        .chain(statement.columns.iter().cloned())
        .collect();

    context
        .storage_mut()
        .create_table(&database, &statement.table, &header)?;
    context.register_table(&database, &statement.table);
    Ok(QueryResult::Ok)
}

/// ALTER TABLE ADD/DROP. После изменения ширина каждой строки равна ширине заголовка.
pub fn alter_table<S: TableStorage>(
    context: &mut ExecutionContext<S>,
    statement: &AlterStatement,
) -> Result<QueryResult> {
    context.session().require_database()?;
    let mut table = context.read_table(&statement.table)?;
    let column = statement.column.as_str();

    if column.eq_ignore_ascii_case(ID_COLUMN) {
        return Err(Error::semantic("Cannot alter key column 'id'."));
    }

    match statement.alter_type {
        AlterType::Add => {
            if table.column_index(column).is_some() {
                return Err(Error::semantic(format!(
                    "Column '{}' already exists in table.",
                    column
                )));
            }
            table.header.push(column.to_string());
            for row in &mut table.rows {
                row.push(NULL_VALUE.to_string());
            }
        }
        AlterType::Drop => {
            let index = table.column_index(column).ok_or_else(|| {
                Error::semantic(format!("Column '{}' does not exist in table.", column))
            })?;
            table.header.remove(index);
            for row in &mut table.rows {
                if index < row.len() {
                    row.remove(index);
                }
            }
        }
    }

    let width = table.width();
    for row in &mut table.rows {
        if row.len() < width {
            row.resize(width, NULL_VALUE.to_string());
        }
    }

    context.write_table(&statement.table, &table)?;
    Ok(QueryResult::Ok)
}

/// DROP TABLE / DROP DATABASE
pub fn drop_object<S: TableStorage>(
    context: &mut ExecutionContext<S>,
    statement: &DropStatement,
) -> Result<QueryResult> {
    match statement {
        DropStatement::Table { table } => {
            let database = context.current_database()?;
            context.storage_mut().drop_table(&database, table)?;
            context.forget_table(&database, table);
        }
        DropStatement::Database { database } => {
            context.storage_mut().drop_database(database)?;
            context.forget_database(database);
            if context.session().is_selected(database) {
                context.session_mut().clear();
            }
            info!(database = %database, "database dropped");
        }
    }
    Ok(QueryResult::Ok)
}
