//! Результат выполнения запроса и его текстовое представление

use crate::common::Error;
use crate::storage::table::join_cells;
use std::fmt;

/// Ответ на один запрос
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResult {
    /// Структурная команда выполнена
    Ok,
    /// Выборка: заголовок и строки
    Rows {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// Причина отказа без префикса
    Error(String),
}

impl QueryResult {
    pub fn error(message: impl Into<String>) -> Self {
        QueryResult::Error(message.into())
    }

    pub fn is_ok(&self) -> bool {
        !matches!(self, QueryResult::Error(_))
    }

    /// Строки выборки, если это выборка
    pub fn rows(&self) -> Option<&[Vec<String>]> {
        match self {
            QueryResult::Rows { rows, .. } => Some(rows),
            _ => None,
        }
    }
}

impl From<Error> for QueryResult {
    fn from(error: Error) -> Self {
        QueryResult::Error(error.to_string())
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryResult::Ok => f.write_str("[OK]"),
            QueryResult::Rows { header, rows } => {
                write!(f, "[OK]\n{}", join_cells(header))?;
                for row in rows {
                    write!(f, "\n{}", join_cells(row))?;
                }
                Ok(())
            }
            QueryResult::Error(message) => write!(f, "[ERROR] {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_response_text() {
        assert_eq!(QueryResult::Ok.to_string(), "[OK]");
        assert_eq!(
            QueryResult::error("No database selected.").to_string(),
            "[ERROR] No database selected."
        );
        assert_eq!(
            QueryResult::from(Error::table_not_found("marks")).to_string(),
            "[ERROR] Table 'marks' does not exist."
        );
    }

    #[test]
    fn test_rows_without_trailing_newline() {
        let result = QueryResult::Rows {
            header: cells(&["id", "name"]),
            rows: vec![cells(&["1", "Simon"]), cells(&["2", "Sion"])],
        };
        assert_eq!(result.to_string(), "[OK]\nid\tname\n1\tSimon\n2\tSion");

        let empty = QueryResult::Rows {
            header: cells(&["id", "name"]),
            rows: Vec::new(),
        };
        assert_eq!(empty.to_string(), "[OK]\nid\tname");
        assert!(empty.is_ok());
        assert!(!QueryResult::error("x").is_ok());
    }
}
