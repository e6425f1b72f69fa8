//! Хранилище в памяти с тем же контрактом, что и файловое.
//! Используется в тестах и бенчмарках.

use crate::common::{Error, Result};
use crate::storage::{normalize_name, TableStorage};
use std::collections::{BTreeMap, HashMap};

/// Базы данных и таблицы в памяти
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    databases: HashMap<String, BTreeMap<String, Vec<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Количество баз данных
    pub fn len(&self) -> usize {
        self.databases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.databases.is_empty()
    }

    fn tables_mut(&mut self, database: &str) -> Result<&mut BTreeMap<String, Vec<String>>> {
        self.databases
            .get_mut(&normalize_name(database))
            .ok_or_else(|| Error::database_not_found(database))
    }
}

impl TableStorage for MemoryStorage {
    fn read_table(&self, database: &str, table: &str) -> Result<Vec<String>> {
        Ok(self
            .databases
            .get(&normalize_name(database))
            .and_then(|tables| tables.get(&normalize_name(table)))
            .cloned()
            .unwrap_or_default())
    }

    fn write_table(&mut self, database: &str, table: &str, lines: &[String]) -> Result<()> {
        let stored = self
            .databases
            .get_mut(&normalize_name(database))
            .and_then(|tables| tables.get_mut(&normalize_name(table)))
            .ok_or_else(|| Error::table_not_found(table))?;
        *stored = lines.to_vec();
        Ok(())
    }

    fn create_table(&mut self, database: &str, table: &str, header: &[String]) -> Result<()> {
        let tables = self.tables_mut(database)?;
        let key = normalize_name(table);
        if tables.contains_key(&key) {
            return Err(Error::resource(format!("Table '{}' already exists.", table)));
        }
        tables.insert(key, vec![header.join("\t")]);
        Ok(())
    }

    fn drop_table(&mut self, database: &str, table: &str) -> Result<()> {
        self.databases
            .get_mut(&normalize_name(database))
            .and_then(|tables| tables.remove(&normalize_name(table)))
            .map(|_| ())
            .ok_or_else(|| Error::table_not_found(table))
    }

    fn create_database(&mut self, database: &str) -> Result<()> {
        let key = normalize_name(database);
        if self.databases.contains_key(&key) {
            return Err(Error::resource(format!(
                "Database '{}' already exists.",
                database
            )));
        }
        self.databases.insert(key, BTreeMap::new());
        Ok(())
    }

    fn database_exists(&self, database: &str) -> bool {
        self.databases.contains_key(&normalize_name(database))
    }

    fn drop_database(&mut self, database: &str) -> Result<()> {
        self.databases
            .remove(&normalize_name(database))
            .map(|_| ())
            .ok_or_else(|| Error::database_not_found(database))
    }

    fn list_tables(&self, database: &str) -> Result<Vec<String>> {
        self.databases
            .get(&normalize_name(database))
            .map(|tables| tables.keys().cloned().collect())
            .ok_or_else(|| Error::database_not_found(database))
    }
}
