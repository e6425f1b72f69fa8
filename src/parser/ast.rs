//! Дескрипторы команд tabdb
//!
//! Результат разбора одного запроса. Для каждого вида запроса активна ровно
//! одна форма дескриптора.

use crate::parser::condition::Expression;
use std::fmt;

/// Разобранный запрос
#[derive(Debug, Clone, PartialEq)]
pub enum SqlStatement {
    Use(UseStatement),
    CreateDatabase(CreateDatabaseStatement),
    CreateTable(CreateTableStatement),
    Insert(InsertStatement),
    Select(SelectStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
    Alter(AlterStatement),
    Drop(DropStatement),
    Join(JoinStatement),
}

impl SqlStatement {
    /// Название вида запроса для логов
    pub fn kind(&self) -> &'static str {
        match self {
            SqlStatement::Use(_) => "USE",
            SqlStatement::CreateDatabase(_) => "CREATE DATABASE",
            SqlStatement::CreateTable(_) => "CREATE TABLE",
            SqlStatement::Insert(_) => "INSERT",
            SqlStatement::Select(_) => "SELECT",
            SqlStatement::Update(_) => "UPDATE",
            SqlStatement::Delete(_) => "DELETE",
            SqlStatement::Alter(_) => "ALTER",
            SqlStatement::Drop(DropStatement::Table { .. }) => "DROP TABLE",
            SqlStatement::Drop(DropStatement::Database { .. }) => "DROP DATABASE",
            SqlStatement::Join(_) => "JOIN",
        }
    }
}

/// USE
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseStatement {
    pub database: String,
}

/// CREATE DATABASE
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDatabaseStatement {
    pub database: String,
}

/// CREATE TABLE
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTableStatement {
    pub table: String,
    /// Колонки в порядке объявления, без `id`
    pub columns: Vec<String>,
}

/// INSERT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    pub table: String,
    /// Значения в исходном виде (строки ещё в кавычках)
    pub values: Vec<String>,
}

/// Проекция SELECT
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelection {
    /// `*`: все колонки в порядке заголовка
    All,
    /// Явный список колонок
    Columns(Vec<String>),
}

/// SELECT
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub table: String,
    pub columns: ColumnSelection,
    pub condition: Option<Expression>,
}

/// Присваивание `column = value` в UPDATE
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub column: String,
    pub value: String,
}

/// UPDATE
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub table: String,
    pub assignments: Vec<Assignment>,
    pub condition: Option<Expression>,
}

/// DELETE
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    pub table: String,
    pub condition: Option<Expression>,
}

/// Вид изменения в ALTER
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlterType {
    Add,
    Drop,
}

impl fmt::Display for AlterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlterType::Add => f.write_str("ADD"),
            AlterType::Drop => f.write_str("DROP"),
        }
    }
}

/// ALTER TABLE
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterStatement {
    pub table: String,
    pub alter_type: AlterType,
    pub column: String,
}

/// DROP
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropStatement {
    Table { table: String },
    Database { database: String },
}

/// JOIN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinStatement {
    pub table1: String,
    pub table2: String,
    pub column1: String,
    pub column2: String,
}
