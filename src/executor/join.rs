//! JOIN: соединение двух таблиц по равенству колонок вложенными циклами

use crate::common::{Error, Result};
use crate::executor::context::ExecutionContext;
use crate::executor::result::QueryResult;
use crate::parser::{values_equal, JoinStatement};
use crate::storage::{Table, TableStorage, ID_COLUMN, NULL_VALUE};
use tracing::debug;

/// Внутреннее соединение.
///
/// Строка результата: id строки первой таблицы, ее остальные колонки без
/// колонки соединения, затем колонки второй таблицы без колонки соединения.
/// Имена колонок в заголовке квалифицируются именем таблицы.
pub fn join<S: TableStorage>(
    context: &mut ExecutionContext<S>,
    statement: &JoinStatement,
) -> Result<QueryResult> {
    context.session().require_database()?;
    let (left, right) = match (
        context.read_table(&statement.table1),
        context.read_table(&statement.table2),
    ) {
        (Ok(left), Ok(right)) => (left, right),
        _ => return Err(Error::resource("One or both tables are empty.")),
    };

    let (Some(left_key), Some(right_key)) = (
        left.column_index(&statement.column1),
        right.column_index(&statement.column2),
    ) else {
        return Err(Error::semantic("One or both columns not found."));
    };

    let left_columns: Vec<usize> = (1..left.width()).filter(|&i| i != left_key).collect();
    let right_columns: Vec<usize> = (0..right.width()).filter(|&i| i != right_key).collect();

    let header: Vec<String> = std::iter::once(ID_COLUMN.to_string())
        .chain(qualified(&statement.table1, &left, &left_columns))
        .chain(qualified(&statement.table2, &right, &right_columns))
        .collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for left_row in &left.rows {
        let Some(left_value) = left_row.get(left_key) else {
            continue;
        };
        for right_row in &right.rows {
            let Some(right_value) = right_row.get(right_key) else {
                continue;
            };
            if !values_equal(left_value, right_value) {
                continue;
            }
            // Недостающие ячейки короткой строки заполняются NULL
            let row: Vec<String> = std::iter::once(cell(left_row, 0))
                .chain(left_columns.iter().map(|&i| cell(left_row, i)))
                .chain(right_columns.iter().map(|&i| cell(right_row, i)))
                .collect();
            rows.push(row);
        }
    }
    debug!(
        left = %statement.table1,
        right = %statement.table2,
        rows = rows.len(),
        "join completed"
    );

    Ok(QueryResult::Rows { header, rows })
}

fn cell(row: &[String], index: usize) -> String {
    row.get(index)
        .map_or(NULL_VALUE, String::as_str)
        .to_string()
}

fn qualified<'a>(
    table_name: &'a str,
    table: &'a Table,
    columns: &'a [usize],
) -> impl Iterator<Item = String> + 'a {
    columns
        .iter()
        .map(move |&i| format!("{}.{}", table_name, table.header[i]))
}
