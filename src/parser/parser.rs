//! Парсер запросов tabdb
//!
//! Рекурсивный спуск: по одной процедуре на каждый вид запроса. Процедуры
//! потребляют классифицированный поток токенов и строят дескриптор команды.

use crate::common::{Error, Result};
use crate::parser::ast::*;
use crate::parser::condition::{ConditionParser, Expression};
use crate::parser::lexer::Lexer;
use crate::parser::token::{is_identifier, Token, TokenType};

/// Рекурсивный парсер запросов
pub struct SqlParser {
    tokens: Vec<Token>,
    position: usize,
}

impl SqlParser {
    /// Создает парсер: разбивает и классифицирует текст запроса
    pub fn new(input: &str) -> Result<Self> {
        let tokens = Lexer::new(input)?.tokenize()?;
        Ok(Self::from_tokens(tokens))
    }

    /// Создает парсер из уже классифицированных токенов
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Разбирает запрос, выбирая процедуру по ведущему ключевому слову
    pub fn parse(&mut self) -> Result<SqlStatement> {
        let leading = self
            .tokens
            .first()
            .filter(|t| t.token_type == TokenType::Keyword)
            .map(|t| t.value.to_ascii_uppercase())
            .ok_or_else(|| Error::syntax("Unknown or invalid command."))?;

        match leading.as_str() {
            "USE" => self.parse_use(),
            "CREATE" => match self.tokens.get(1) {
                Some(t) if t.is(TokenType::Keyword, "DATABASE") => self.parse_create_database(),
                Some(t) if t.is(TokenType::Keyword, "TABLE") => self.parse_create_table(),
                _ => Err(Error::syntax("Expected TABLE or DATABASE after CREATE.")),
            },
            "INSERT" => self.parse_insert(),
            "SELECT" => self.parse_select(),
            "UPDATE" => self.parse_update(),
            "DELETE" => self.parse_delete(),
            "ALTER" => self.parse_alter(),
            "DROP" => self.parse_drop(),
            "JOIN" => self.parse_join(),
            _ => Err(Error::syntax("Unknown or invalid command.")),
        }
    }

    /// USE <database>;
    pub fn parse_use(&mut self) -> Result<SqlStatement> {
        self.require_keyword("USE")?;
        let database = self.expect_identifier()?;
        self.validate_end_semicolon()?;
        Ok(SqlStatement::Use(UseStatement { database }))
    }

    /// CREATE DATABASE <database>;
    pub fn parse_create_database(&mut self) -> Result<SqlStatement> {
        self.require_keyword("CREATE")?;
        self.require_keyword("DATABASE")?;
        let database = self.expect_identifier()?;
        self.validate_end_semicolon()?;
        Ok(SqlStatement::CreateDatabase(CreateDatabaseStatement {
            database,
        }))
    }

    /// CREATE TABLE <table> [ ( <column> {, <column>} ) ];
    pub fn parse_create_table(&mut self) -> Result<SqlStatement> {
        self.require_keyword("CREATE")?;
        self.require_keyword("TABLE")?;
        let table = self.expect_identifier()?;

        let mut columns: Vec<String> = Vec::new();
        if self.match_token(TokenType::Symbol, &["("]) {
            loop {
                let column = self.expect_identifier()?;
                if column.eq_ignore_ascii_case("id")
                    || columns.iter().any(|c| c.eq_ignore_ascii_case(&column))
                {
                    return Err(Error::syntax(format!("Duplicate column name: {}", column)));
                }
                columns.push(column);
                if !self.match_token(TokenType::Symbol, &[","]) {
                    break;
                }
            }
            self.expect_value(TokenType::Symbol, &[")"])?;
        }

        self.validate_end_semicolon()?;
        Ok(SqlStatement::CreateTable(CreateTableStatement {
            table,
            columns,
        }))
    }

    /// INSERT INTO <table> VALUES ( <value> {, <value>} );
    pub fn parse_insert(&mut self) -> Result<SqlStatement> {
        self.require_keyword("INSERT")?;
        self.require_keyword("INTO")?;
        let table = self.expect_identifier()?;
        self.require_keyword("VALUES")?;

        self.expect_value(TokenType::Symbol, &["("])?;
        let values = self.parse_value_list()?;
        self.expect_value(TokenType::Symbol, &[")"])?;

        self.validate_end_semicolon()?;
        Ok(SqlStatement::Insert(InsertStatement { table, values }))
    }

    /// SELECT ( * | <column> {, <column>} ) FROM <table> [WHERE <condition>];
    pub fn parse_select(&mut self) -> Result<SqlStatement> {
        self.require_keyword("SELECT")?;
        let columns = if self.match_token(TokenType::Symbol, &["*"]) {
            ColumnSelection::All
        } else {
            ColumnSelection::Columns(self.parse_column_list()?)
        };
        self.expect_value(TokenType::Keyword, &["FROM"])?;
        let table = self.expect_identifier()?;

        let condition = if self.match_token(TokenType::Keyword, &["WHERE"]) {
            self.parse_where_conditions()?
        } else {
            None
        };

        self.validate_end_semicolon()?;
        Ok(SqlStatement::Select(SelectStatement {
            table,
            columns,
            condition,
        }))
    }

    /// UPDATE <table> SET <column> = <value> {, <column> = <value>} [WHERE <condition>];
    pub fn parse_update(&mut self) -> Result<SqlStatement> {
        self.require_keyword("UPDATE")?;
        let table = self.expect_identifier()?;
        self.require_keyword("SET")?;

        let mut assignments = Vec::new();
        loop {
            let column = self.expect_identifier()?;
            if column.eq_ignore_ascii_case("id") {
                return Err(Error::semantic("Cannot update ID column."));
            }
            self.expect_value(TokenType::Symbol, &["="])?;
            let value = self.expect(&[
                TokenType::Number,
                TokenType::String,
                TokenType::Identifier,
            ])?;
            assignments.push(Assignment { column, value });
            if !self.match_token(TokenType::Symbol, &[","]) {
                break;
            }
        }

        let condition = if self.match_token(TokenType::Keyword, &["WHERE"]) {
            self.parse_where_conditions()?
        } else {
            None
        };

        self.validate_end_semicolon()?;
        Ok(SqlStatement::Update(UpdateStatement {
            table,
            assignments,
            condition,
        }))
    }

    /// DELETE FROM <table> [WHERE <condition>];
    pub fn parse_delete(&mut self) -> Result<SqlStatement> {
        self.require_keyword("DELETE")?;
        self.require_keyword("FROM")?;
        let table = self.expect_identifier()?;

        let condition = if self.match_token(TokenType::Keyword, &["WHERE"]) {
            self.parse_where_conditions()?
        } else {
            None
        };

        self.validate_end_semicolon()?;
        Ok(SqlStatement::Delete(DeleteStatement { table, condition }))
    }

    /// ALTER TABLE <table> (ADD | DROP) <column>;
    pub fn parse_alter(&mut self) -> Result<SqlStatement> {
        self.require_keyword("ALTER")?;
        self.require_keyword("TABLE")?;
        let table = self.expect_identifier()?;

        let alter_type = if self.match_token(TokenType::Keyword, &["ADD"]) {
            AlterType::Add
        } else if self.match_token(TokenType::Keyword, &["DROP"]) {
            AlterType::Drop
        } else {
            return Err(Error::syntax("Expected ADD or DROP in ALTER TABLE."));
        };
        let column = self.expect_identifier()?;

        self.validate_end_semicolon()?;
        Ok(SqlStatement::Alter(AlterStatement {
            table,
            alter_type,
            column,
        }))
    }

    /// DROP (TABLE <table> | DATABASE <database>);
    pub fn parse_drop(&mut self) -> Result<SqlStatement> {
        self.require_keyword("DROP")?;
        let drop_type = self.expect(&[TokenType::Keyword])?;

        let statement = if drop_type.eq_ignore_ascii_case("TABLE") {
            DropStatement::Table {
                table: self.expect_identifier()?,
            }
        } else if drop_type.eq_ignore_ascii_case("DATABASE") {
            DropStatement::Database {
                database: self.expect_identifier()?,
            }
        } else {
            return Err(Error::syntax("Expected TABLE or DATABASE in DROP command."));
        };

        self.validate_end_semicolon()?;
        Ok(SqlStatement::Drop(statement))
    }

    /// JOIN <table1> AND <table2> ON <column1> AND <column2>;
    pub fn parse_join(&mut self) -> Result<SqlStatement> {
        self.require_keyword("JOIN")?;
        let table1 = self.expect_identifier()?;
        self.expect_value(TokenType::LogicalOperator, &["AND"])?;
        let table2 = self.expect_identifier()?;
        self.expect_value(TokenType::Keyword, &["ON"])?;
        let column1 = self.expect_identifier()?;
        self.expect_value(TokenType::LogicalOperator, &["AND"])?;
        let column2 = self.expect_identifier()?;

        self.validate_end_semicolon()?;
        Ok(SqlStatement::Join(JoinStatement {
            table1,
            table2,
            column1,
            column2,
        }))
    }
}

impl SqlParser {
    /// Потребляет токен, только если совпадают категория и текст (без учета регистра)
    fn match_token(&mut self, token_type: TokenType, values: &[&str]) -> bool {
        match self.tokens.get(self.position) {
            Some(token) if values.iter().any(|v| token.is(token_type, v)) => {
                self.position += 1;
                true
            }
            _ => false,
        }
    }

    /// Требует ключевое слово
    fn require_keyword(&mut self, keyword: &str) -> Result<()> {
        if self.match_token(TokenType::Keyword, &[keyword]) {
            Ok(())
        } else {
            Err(Error::syntax(format!("Expected {}.", keyword)))
        }
    }

    /// Потребляет токен безусловно и проверяет его категорию.
    ///
    /// `*` и логические литералы `TRUE`/`FALSE` пропускаются без проверки.
    fn expect(&mut self, expected: &[TokenType]) -> Result<String> {
        let token = self.advance()?;

        if token.value == "*" {
            return Ok(token.value);
        }
        if token.value.eq_ignore_ascii_case("TRUE") || token.value.eq_ignore_ascii_case("FALSE") {
            return Ok(token.value.to_ascii_uppercase());
        }

        if expected.contains(&token.token_type) {
            if token.token_type == TokenType::Identifier && !is_identifier(&token.value) {
                return Err(Error::syntax(format!("Invalid name format: {}", token.value)));
            }
            return Ok(token.value);
        }

        Err(Error::syntax(format!("Unexpected token: {}", token.value)))
    }

    /// Ожидает имя таблицы, базы данных или колонки
    fn expect_identifier(&mut self) -> Result<String> {
        let value = self.expect(&[TokenType::Identifier])?;
        if value == "*" || value == "TRUE" || value == "FALSE" {
            return Err(Error::syntax(format!("Invalid name format: {}", value)));
        }
        Ok(value)
    }

    /// Потребляет токен безусловно и требует категорию и одно из значений
    fn expect_value(&mut self, token_type: TokenType, values: &[&str]) -> Result<()> {
        let token = self.advance()?;
        if token.token_type != token_type {
            return Err(Error::syntax(format!(
                "Expected {} but found {}",
                token_type, token.token_type
            )));
        }
        if values.iter().any(|v| token.value.eq_ignore_ascii_case(v)) {
            Ok(())
        } else {
            Err(Error::syntax(format!("Unexpected value: {}", token.value)))
        }
    }

    fn advance(&mut self) -> Result<Token> {
        let token = self
            .tokens
            .get(self.position)
            .cloned()
            .ok_or_else(|| Error::syntax("Unexpected end of command."))?;
        self.position += 1;
        Ok(token)
    }

    /// Список колонок через запятую
    fn parse_column_list(&mut self) -> Result<Vec<String>> {
        let mut columns = Vec::new();
        loop {
            columns.push(self.expect_identifier()?);
            if !self.match_token(TokenType::Symbol, &[","]) {
                break;
            }
        }
        Ok(columns)
    }

    /// Список значений INSERT через запятую
    fn parse_value_list(&mut self) -> Result<Vec<String>> {
        let mut values = Vec::new();
        loop {
            values.push(self.expect(&[
                TokenType::String,
                TokenType::Number,
                TokenType::Identifier,
            ])?);
            if !self.match_token(TokenType::Symbol, &[","]) {
                break;
            }
        }
        Ok(values)
    }

    /// Захватывает токены условия до `;`, проверяя баланс скобок, и строит дерево
    fn parse_where_conditions(&mut self) -> Result<Option<Expression>> {
        let start = self.position;
        let mut depth = 0usize;

        while let Some(token) = self.tokens.get(self.position) {
            if token.is(TokenType::Symbol, ";") {
                break;
            }
            if token.is(TokenType::Symbol, "(") {
                depth += 1;
            } else if token.is(TokenType::Symbol, ")") {
                if depth == 0 {
                    return Err(Error::syntax("Unmatched closing parenthesis."));
                }
                depth -= 1;
            }
            self.position += 1;
        }

        if depth != 0 {
            return Err(Error::syntax("Unmatched opening parenthesis."));
        }

        let condition_tokens = &self.tokens[start..self.position];
        if condition_tokens.is_empty() {
            return Ok(None);
        }
        ConditionParser::new(condition_tokens).parse().map(Some)
    }

    /// Последний токен запроса обязан быть `;`
    fn validate_end_semicolon(&mut self) -> Result<()> {
        match self.tokens.get(self.position) {
            Some(token) if token.is(TokenType::Symbol, ";") => {
                self.position += 1;
            }
            _ => return Err(Error::syntax("Missing semicolon at the end.")),
        }
        if let Some(extra) = self.tokens.get(self.position) {
            return Err(Error::syntax(format!(
                "Unexpected token after semicolon: {}",
                extra.value
            )));
        }
        Ok(())
    }
}
