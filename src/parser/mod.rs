//! Фронтенд языка запросов tabdb
//!
//! Текст → фрагменты (`tokenizer`) → классифицированные токены (`lexer`) →
//! дескриптор команды (`parser`) с деревом условия (`condition`).

pub mod ast;
pub mod condition;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

// Переэкспортируем основные типы
pub use ast::*;
pub use condition::{compare, values_equal, ConditionParser, Expression, LogicalOperator};
pub use lexer::Lexer;
pub use parser::SqlParser;
pub use token::{Token, TokenType};
