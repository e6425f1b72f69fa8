//! Токены языка запросов tabdb
//!
//! Определяет категории, которые лексический классификатор присваивает
//! фрагментам запроса, и наборы ключевых слов и операторов.

use lazy_static::lazy_static;
use std::collections::HashSet;
use std::fmt;

lazy_static! {
    /// Ключевые слова (сравнение без учета регистра, хранятся в верхнем регистре)
    static ref KEYWORDS: HashSet<&'static str> = [
        "USE", "SELECT", "FROM", "WHERE", "SET", "INSERT", "UPDATE", "DELETE", "CREATE",
        "DROP", "TABLE", "DATABASE", "ALTER", "INTO", "VALUES", "ADD", "JOIN", "ON",
    ]
    .into_iter()
    .collect();

    /// Символы пунктуации
    static ref SYMBOLS: HashSet<&'static str> =
        ["(", ")", ",", ";", "*", "="].into_iter().collect();

    /// Операторы сравнения
    static ref OPERATORS: HashSet<&'static str> =
        [">", "<", ">=", "<=", "==", "!="].into_iter().collect();
}

/// Категория токена
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Keyword,
    Identifier,
    Symbol,
    Operator,
    LogicalOperator,
    Number,
    String,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenType::Keyword => "KEYWORD",
            TokenType::Identifier => "IDENTIFIER",
            TokenType::Symbol => "SYMBOL",
            TokenType::Operator => "OPERATOR",
            TokenType::LogicalOperator => "LOGICAL_OPERATOR",
            TokenType::Number => "NUMBER",
            TokenType::String => "STRING",
        };
        f.write_str(name)
    }
}

/// Классифицированный токен: исходный текст и категория
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,
    pub value: String,
}

impl Token {
    pub fn new(token_type: TokenType, value: impl Into<String>) -> Self {
        Self {
            token_type,
            value: value.into(),
        }
    }

    /// Проверяет категорию и текст (без учета регистра)
    pub fn is(&self, token_type: TokenType, value: &str) -> bool {
        self.token_type == token_type && self.value.eq_ignore_ascii_case(value)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}('{}')", self.token_type, self.value)
    }
}

/// Ключевое слово (без учета регистра)
pub fn is_keyword(fragment: &str) -> bool {
    KEYWORDS.contains(fragment.to_ascii_uppercase().as_str())
}

/// Символ пунктуации
pub fn is_symbol(fragment: &str) -> bool {
    SYMBOLS.contains(fragment)
}

/// Логический оператор AND / OR
pub fn is_logical_operator(fragment: &str) -> bool {
    fragment.eq_ignore_ascii_case("AND") || fragment.eq_ignore_ascii_case("OR")
}

/// Оператор сравнения
pub fn is_operator(fragment: &str) -> bool {
    OPERATORS.contains(fragment)
}

/// Число: необязательный знак, цифры, необязательная дробная часть
pub fn is_number(fragment: &str) -> bool {
    let unsigned = fragment
        .strip_prefix('+')
        .or_else(|| fragment.strip_prefix('-'))
        .unwrap_or(fragment);
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(integer) && fraction.map_or(true, all_digits)
}

/// Строковый литерал в одинарных кавычках
pub fn is_string_literal(fragment: &str) -> bool {
    fragment.len() >= 2 && fragment.starts_with('\'') && fragment.ends_with('\'')
}

/// Идентификатор: `[A-Za-z0-9_]+`
pub fn is_identifier(fragment: &str) -> bool {
    !fragment.is_empty()
        && fragment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Снимает одну пару окружающих одинарных кавычек
pub fn strip_quotes(value: &str) -> &str {
    if is_string_literal(value) {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
