//! Команды над данными: INSERT, SELECT, UPDATE, DELETE

use crate::common::{Error, Result};
use crate::executor::context::ExecutionContext;
use crate::executor::result::QueryResult;
use crate::parser::token::strip_quotes;
use crate::parser::{
    ColumnSelection, DeleteStatement, InsertStatement, SelectStatement, UpdateStatement,
};
use crate::storage::table::join_cells;
use crate::storage::{Table, TableStorage, ID_COLUMN, NULL_VALUE};
use tracing::debug;

/// INSERT. Первая вставка в таблицу без заголовка задает имена колонок и
/// не добавляет строку данных.
pub fn insert<S: TableStorage>(
    context: &mut ExecutionContext<S>,
    statement: &InsertStatement,
) -> Result<QueryResult> {
    let database = context.current_database()?;
    let lines = context.storage().read_table(&database, &statement.table)?;

    let Some(mut table) = Table::from_lines(&lines) else {
        let header = header_from_values(&statement.values)?;
        debug!(table = %statement.table, columns = header.len(), "writing header from first insert");
        context
            .storage_mut()
            .write_table(&database, &statement.table, &[join_cells(&header)])?;
        return Ok(QueryResult::Ok);
    };

    let expected = table.width().saturating_sub(1);
    if statement.values.len() != expected {
        return Err(Error::semantic(format!(
            "Column count mismatch: Expected {}, but got {}.",
            expected,
            statement.values.len()
        )));
    }

    let id = table
        .next_id()
        .ok_or_else(|| Error::semantic("Invalid ID format in table."))?;
    let row: Vec<String> = std::iter::once(id.to_string())
        .chain(statement.values.iter().map(|v| strip_quotes(v).to_string()))
        .collect();
    table.rows.push(row);

    context.write_table(&statement.table, &table)?;
    Ok(QueryResult::Ok)
}

fn header_from_values(values: &[String]) -> Result<Vec<String>> {
    let mut header = vec![ID_COLUMN.to_string()];
    for value in values {
        let name = strip_quotes(value);
        if name.eq_ignore_ascii_case(ID_COLUMN) {
            continue;
        }
        if header[1..].iter().any(|existing| existing == name) {
            return Err(Error::semantic(format!(
                "Duplicate column name detected: {}",
                name
            )));
        }
        header.push(name.to_string());
    }
    Ok(header)
}

/// SELECT с проекцией и необязательным условием
pub fn select<S: TableStorage>(
    context: &mut ExecutionContext<S>,
    statement: &SelectStatement,
) -> Result<QueryResult> {
    context.session().require_database()?;
    let table = context.read_table(&statement.table)?;

    let indices: Vec<usize> = match &statement.columns {
        ColumnSelection::All => (0..table.width()).collect(),
        ColumnSelection::Columns(columns) => columns
            .iter()
            .map(|column| {
                table.column_index(column).ok_or_else(|| {
                    Error::semantic(format!("Column '{}' does not exist in table.", column))
                })
            })
            .collect::<Result<_>>()?,
    };

    let header: Vec<String> = indices.iter().map(|&i| table.header[i].clone()).collect();
    let rows = table
        .rows
        .iter()
        .filter(|row| {
            statement
                .condition
                .as_ref()
                .map_or(true, |condition| condition.evaluate(row, &table.header))
        })
        .map(|row| -> Vec<String> {
            indices
                .iter()
                .map(|&i| row.get(i).cloned().unwrap_or_else(|| NULL_VALUE.to_string()))
                .collect()
        })
        .collect();

    Ok(QueryResult::Rows { header, rows })
}

/// UPDATE. Колонки разрешаются по исходному заголовку до изменения строк.
pub fn update<S: TableStorage>(
    context: &mut ExecutionContext<S>,
    statement: &UpdateStatement,
) -> Result<QueryResult> {
    context.session().require_database()?;
    let mut table = context.read_table(&statement.table)?;

    let targets = statement
        .assignments
        .iter()
        .map(|assignment| {
            table
                .column_index(&assignment.column)
                .map(|index| (index, strip_quotes(&assignment.value).to_string()))
                .ok_or_else(|| Error::semantic("One or more columns do not exist."))
        })
        .collect::<Result<Vec<_>>>()?;

    let width = table.width();
    let mut updated = 0usize;
    for row in &mut table.rows {
        let matches = statement
            .condition
            .as_ref()
            .map_or(true, |condition| condition.evaluate(row, &table.header));
        if !matches {
            continue;
        }
        if row.len() < width {
            row.resize(width, NULL_VALUE.to_string());
        }
        for (index, value) in &targets {
            row[*index] = value.clone();
        }
        updated += 1;
    }
    debug!(table = %statement.table, rows = updated, "rows updated");

    context.write_table(&statement.table, &table)?;
    Ok(QueryResult::Ok)
}

/// DELETE. Без WHERE дерева условия нет, и ни одна строка не удаляется.
pub fn delete<S: TableStorage>(
    context: &mut ExecutionContext<S>,
    statement: &DeleteStatement,
) -> Result<QueryResult> {
    context.session().require_database()?;
    let mut table = context.read_table(&statement.table)?;

    let before = table.rows.len();
    if let Some(condition) = &statement.condition {
        let header = &table.header;
        table.rows.retain(|row| !condition.evaluate(row, header));
    }
    debug!(table = %statement.table, rows = before - table.rows.len(), "rows deleted");

    context.write_table(&statement.table, &table)?;
    Ok(QueryResult::Ok)
}
