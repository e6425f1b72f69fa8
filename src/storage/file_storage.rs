//! Файловое хранилище таблиц
//!
//! Каждая запись перезаписывает файл целиком, без журнала и без
//! промежуточного файла.

use crate::common::{Error, Result};
use crate::storage::{normalize_name, TableStorage};
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Хранилище в каталоге на диске
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Открывает хранилище, создавая корневой каталог при необходимости
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        debug!(root = %root.display(), "opened file storage");
        Ok(Self { root })
    }

    /// Корневой каталог хранилища
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn database_path(&self, database: &str) -> PathBuf {
        self.root.join(normalize_name(database))
    }

    fn table_path(&self, database: &str, table: &str) -> PathBuf {
        self.database_path(database).join(normalize_name(table))
    }

    fn write_lines(path: &Path, lines: &[String]) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        for line in lines {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }
}

impl TableStorage for FileStorage {
    fn read_table(&self, database: &str, table: &str) -> Result<Vec<String>> {
        let path = self.table_path(database, table);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(content.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read table");
                Ok(Vec::new())
            }
        }
    }

    fn write_table(&mut self, database: &str, table: &str, lines: &[String]) -> Result<()> {
        let path = self.table_path(database, table);
        if !path.is_file() {
            return Err(Error::table_not_found(table));
        }
        Self::write_lines(&path, lines).map_err(|e| {
            warn!(path = %path.display(), error = %e, "failed to write table");
            Error::resource("Could not update table.")
        })
    }

    fn create_table(&mut self, database: &str, table: &str, header: &[String]) -> Result<()> {
        if !self.database_exists(database) {
            return Err(Error::database_not_found(database));
        }
        let path = self.table_path(database, table);
        if path.exists() {
            return Err(Error::resource(format!("Table '{}' already exists.", table)));
        }
        Self::write_lines(&path, &[header.join("\t")]).map_err(|e| {
            warn!(path = %path.display(), error = %e, "failed to create table");
            Error::resource(format!("Could not create table '{}'.", table))
        })
    }

    fn drop_table(&mut self, database: &str, table: &str) -> Result<()> {
        let path = self.table_path(database, table);
        if !path.is_file() {
            return Err(Error::table_not_found(table));
        }
        fs::remove_file(&path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "failed to delete table");
            Error::resource(format!("Could not delete table '{}'.", table))
        })
    }

    fn create_database(&mut self, database: &str) -> Result<()> {
        let path = self.database_path(database);
        if path.exists() {
            return Err(Error::resource(format!(
                "Database '{}' already exists.",
                database
            )));
        }
        fs::create_dir_all(&path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "failed to create database");
            Error::resource("Could not create database.")
        })
    }

    fn database_exists(&self, database: &str) -> bool {
        self.database_path(database).is_dir()
    }

    fn drop_database(&mut self, database: &str) -> Result<()> {
        let path = self.database_path(database);
        if !path.is_dir() {
            return Err(Error::database_not_found(database));
        }
        let partial = || Error::resource(format!(
            "Could not delete some files in database '{}'.",
            database
        ));

        let mut all_deleted = true;
        for entry in fs::read_dir(&path)? {
            let entry_path = entry?.path();
            if let Err(e) = fs::remove_file(&entry_path) {
                warn!(path = %entry_path.display(), error = %e, "failed to delete file");
                all_deleted = false;
            }
        }
        if !all_deleted {
            return Err(partial());
        }
        fs::remove_dir(&path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "failed to delete database directory");
            partial()
        })
    }

    fn list_tables(&self, database: &str) -> Result<Vec<String>> {
        let path = self.database_path(database);
        if !path.is_dir() {
            return Err(Error::database_not_found(database));
        }
        let mut tables = Vec::new();
        for entry in fs::read_dir(&path)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                tables.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        tables.sort();
        Ok(tables)
    }
}
