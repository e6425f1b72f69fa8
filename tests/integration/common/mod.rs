//! Общие помощники для интеграционных тестов

use tabdb::{FileStorage, QueryExecutor};
use tempfile::TempDir;

/// Исполнитель над файловым хранилищем во временном каталоге
pub struct TestDatabase {
    pub dir: TempDir,
    pub executor: QueryExecutor<FileStorage>,
}

impl TestDatabase {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let executor = QueryExecutor::new(FileStorage::new(dir.path()).unwrap());
        Self { dir, executor }
    }

    /// Создает базу данных и выбирает ее
    pub fn with_database(name: &str) -> Self {
        let mut db = Self::new();
        db.ok(&format!("CREATE DATABASE {};", name));
        db.ok(&format!("USE {};", name));
        db
    }

    /// Новый исполнитель над тем же каталогом
    pub fn reopen(&self) -> QueryExecutor<FileStorage> {
        QueryExecutor::new(FileStorage::new(self.dir.path()).unwrap())
    }

    pub fn run(&mut self, query: &str) -> String {
        self.executor.execute(query).to_string()
    }

    pub fn ok(&mut self, query: &str) -> String {
        let response = self.run(query);
        assert!(response.starts_with("[OK]"), "{} -> {}", query, response);
        response
    }

    pub fn error(&mut self, query: &str) -> String {
        let response = self.run(query);
        assert!(response.starts_with("[ERROR]"), "{} -> {}", query, response);
        response
    }

    /// Заполняет таблицы marks и coursework
    pub fn seed_school(&mut self) {
        self.ok("CREATE TABLE marks (name, mark, pass);");
        self.ok("INSERT INTO marks VALUES ('Simon', 65, TRUE);");
        self.ok("INSERT INTO marks VALUES ('Sion', 55, TRUE);");
        self.ok("INSERT INTO marks VALUES ('Rob', 35, FALSE);");
        self.ok("INSERT INTO marks VALUES ('Chris', 20, FALSE);");
        self.ok("CREATE TABLE coursework (task, submission);");
        self.ok("INSERT INTO coursework VALUES ('OXO', 3);");
        self.ok("INSERT INTO coursework VALUES ('DB', 1);");
        self.ok("INSERT INTO coursework VALUES ('OXO', 4);");
        self.ok("INSERT INTO coursework VALUES ('STAG', 2);");
    }
}

/// Количество строк данных в ответе выборки
pub fn data_rows(response: &str) -> usize {
    response.lines().count().saturating_sub(2)
}
