//! Контекст выполнения: выбранная база данных, хранилище и список таблиц
//!
//! Контекст принадлежит диспетчеру и передается в каждый исполнитель явно.

use crate::common::{Error, Result};
use crate::storage::{normalize_name, Table, TableStorage};
use std::collections::HashMap;
use tracing::debug;

/// Сессия: текущая выбранная база данных
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    database: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Имя выбранной базы данных
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn select(&mut self, database: impl Into<String>) {
        self.database = Some(database.into());
    }

    pub fn clear(&mut self) {
        self.database = None;
    }

    /// Проверяет, выбрана ли указанная база данных
    pub fn is_selected(&self, database: &str) -> bool {
        self.database
            .as_deref()
            .is_some_and(|current| current.eq_ignore_ascii_case(database))
    }

    /// Имя выбранной базы данных или ошибка, если ничего не выбрано
    pub fn require_database(&self) -> Result<&str> {
        self.database().ok_or_else(Error::no_database_selected)
    }
}

/// Все, что нужно исполнителям для работы с данными
#[derive(Debug)]
pub struct ExecutionContext<S> {
    storage: S,
    session: Session,
    /// Известные таблицы по базам данных
    tables: HashMap<String, Vec<String>>,
}

impl<S: TableStorage> ExecutionContext<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            session: Session::new(),
            tables: HashMap::new(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Имя выбранной базы данных
    pub fn current_database(&self) -> Result<String> {
        self.session.require_database().map(str::to_string)
    }

    /// Выбирает базу данных и перечитывает список ее таблиц
    pub fn select_database(&mut self, database: &str) -> Result<()> {
        if !self.storage.database_exists(database) {
            return Err(Error::database_not_found(database));
        }
        let tables = self.storage.list_tables(database)?;
        debug!(database, tables = tables.len(), "loaded table list");
        self.tables.insert(normalize_name(database), tables);
        self.session.select(database);
        Ok(())
    }

    /// Таблицы выбранной базы данных
    pub fn known_tables(&self) -> &[String] {
        self.session
            .database()
            .and_then(|database| self.tables.get(&normalize_name(database)))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn register_table(&mut self, database: &str, table: &str) {
        let tables = self.tables.entry(normalize_name(database)).or_default();
        let table = normalize_name(table);
        if !tables.contains(&table) {
            tables.push(table);
        }
    }

    pub(crate) fn forget_table(&mut self, database: &str, table: &str) {
        if let Some(tables) = self.tables.get_mut(&normalize_name(database)) {
            tables.retain(|known| !known.eq_ignore_ascii_case(table));
        }
    }

    pub(crate) fn forget_database(&mut self, database: &str) {
        self.tables.remove(&normalize_name(database));
    }

    /// Читает таблицу выбранной базы данных. Таблица без заголовка считается отсутствующей.
    pub fn read_table(&self, table: &str) -> Result<Table> {
        let database = self.session.require_database()?;
        let lines = self.storage.read_table(database, table)?;
        Table::from_lines(&lines).ok_or_else(|| Error::table_not_found(table))
    }

    /// Полностью перезаписывает таблицу выбранной базы данных
    pub fn write_table(&mut self, table: &str, content: &Table) -> Result<()> {
        let database = self.current_database()?;
        self.storage.write_table(&database, table, &content.to_lines())
    }
}
