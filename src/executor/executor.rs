//! Диспетчер запросов tabdb
//!
//! Разбирает запрос, вызывает нужный исполнитель и превращает любую ошибку
//! в ответ `[ERROR]`. При ошибке выбранная база данных восстанавливается.

use crate::common::Result;
use crate::executor::context::{ExecutionContext, Session};
use crate::executor::result::QueryResult;
use crate::executor::{ddl, dml, join};
use crate::parser::{SqlParser, SqlStatement};
use crate::storage::TableStorage;
use tracing::{debug, info, warn};

/// Исполнитель запросов над хранилищем
#[derive(Debug)]
pub struct QueryExecutor<S> {
    context: ExecutionContext<S>,
}

impl<S: TableStorage> QueryExecutor<S> {
    pub fn new(storage: S) -> Self {
        Self {
            context: ExecutionContext::new(storage),
        }
    }

    pub fn context(&self) -> &ExecutionContext<S> {
        &self.context
    }

    pub fn session(&self) -> &Session {
        self.context.session()
    }

    pub fn storage(&self) -> &S {
        self.context.storage()
    }

    /// Выполняет один запрос и возвращает ответ
    pub fn execute(&mut self, query: &str) -> QueryResult {
        if query.trim().is_empty() {
            return QueryResult::error("Empty command received.");
        }

        let previous = self.context.session().clone();
        match self.run(query) {
            Ok(result) => result,
            Err(e) => {
                if e.is_parse_stage() {
                    debug!(error = %e, "statement rejected");
                } else {
                    warn!(error = %e, "statement failed");
                }
                *self.context.session_mut() = previous;
                QueryResult::from(e)
            }
        }
    }

    fn run(&mut self, query: &str) -> Result<QueryResult> {
        let statement = SqlParser::new(query)?.parse()?;
        info!(kind = statement.kind(), "executing statement");
        self.execute_statement(&statement)
    }

    /// Выполняет уже разобранный запрос
    pub fn execute_statement(&mut self, statement: &SqlStatement) -> Result<QueryResult> {
        let context = &mut self.context;
        match statement {
            SqlStatement::Use(s) => ddl::use_database(context, s),
            SqlStatement::CreateDatabase(s) => ddl::create_database(context, s),
            SqlStatement::CreateTable(s) => ddl::create_table(context, s),
            SqlStatement::Alter(s) => ddl::alter_table(context, s),
            SqlStatement::Drop(s) => ddl::drop_object(context, s),
            SqlStatement::Insert(s) => dml::insert(context, s),
            SqlStatement::Select(s) => dml::select(context, s),
            SqlStatement::Update(s) => dml::update(context, s),
            SqlStatement::Delete(s) => dml::delete(context, s),
            SqlStatement::Join(s) => join::join(context, s),
        }
    }
}
