//! Лексический классификатор tabdb
//!
//! Присваивает каждому фрагменту ровно одну категорию. Порядок проверок:
//! ключевое слово, символ, логический оператор, оператор сравнения, число,
//! строковый литерал, идентификатор. Фрагмент, не подошедший ни под одну
//! категорию, отклоняет весь запрос.

use crate::common::{Error, Result};
use crate::parser::token::{
    is_identifier, is_keyword, is_logical_operator, is_number, is_operator, is_string_literal,
    is_symbol, Token, TokenType,
};
use crate::parser::tokenizer;
use tracing::debug;

/// Лексический анализатор запроса
pub struct Lexer {
    /// Фрагменты исходного текста
    fragments: Vec<String>,
}

impl Lexer {
    /// Создает лексический анализатор для текста запроса
    pub fn new(input: &str) -> Result<Self> {
        Ok(Self {
            fragments: tokenizer::tokenize(input)?,
        })
    }

    /// Классифицирует все фрагменты
    pub fn tokenize(&self) -> Result<Vec<Token>> {
        self.fragments
            .iter()
            .map(|fragment| {
                let token_type = classify(fragment)?;
                debug!(token = %fragment, category = %token_type, "classified token");
                Ok(Token::new(token_type, fragment.as_str()))
            })
            .collect()
    }
}

/// Определяет категорию одного фрагмента
pub fn classify(fragment: &str) -> Result<TokenType> {
    let token_type = if is_keyword(fragment) {
        TokenType::Keyword
    } else if is_symbol(fragment) {
        TokenType::Symbol
    } else if is_logical_operator(fragment) {
        TokenType::LogicalOperator
    } else if is_operator(fragment) {
        TokenType::Operator
    } else if is_number(fragment) {
        TokenType::Number
    } else if is_string_literal(fragment) {
        TokenType::String
    } else if is_identifier(fragment) {
        TokenType::Identifier
    } else {
        return Err(Error::lexical(fragment));
    };
    Ok(token_type)
}
