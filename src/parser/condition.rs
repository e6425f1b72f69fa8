//! Условия WHERE: разбор в дерево выражений и вычисление над строкой
//!
//! Приоритет по возрастанию: OR, AND, атом в скобках. Цепочки на каждом
//! уровне левоассоциативны.

use crate::common::{Error, Result};
use crate::parser::token::{is_number, strip_quotes, Token, TokenType};
use std::fmt;
use tracing::debug;

/// Логическая связка
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOperator::And => f.write_str("AND"),
            LogicalOperator::Or => f.write_str("OR"),
        }
    }
}

/// Узел дерева условия. Неизменяем после построения.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// `column operator literal`, литерал хранится без кавычек
    Condition {
        column: String,
        operator: String,
        literal: String,
    },
    /// `left AND|OR right`
    Logical {
        operator: LogicalOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

impl Expression {
    /// Создает лист-условие, снимая кавычки с литерала
    pub fn condition(column: &str, operator: &str, literal: &str) -> Self {
        Expression::Condition {
            column: column.to_string(),
            operator: operator.to_string(),
            literal: strip_quotes(literal).to_string(),
        }
    }

    /// Создает логический узел
    pub fn logical(operator: LogicalOperator, left: Expression, right: Expression) -> Self {
        Expression::Logical {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Вычисляет условие для одной строки таблицы.
    ///
    /// Неизвестная колонка дает `false`, а не ошибку. Обе ветви логического
    /// узла вычисляются всегда.
    pub fn evaluate(&self, row: &[String], header: &[String]) -> bool {
        match self {
            Expression::Condition {
                column,
                operator,
                literal,
            } => {
                let Some(index) = header.iter().position(|h| h.eq_ignore_ascii_case(column))
                else {
                    return false;
                };
                match row.get(index) {
                    Some(cell) => compare(cell.trim(), operator, literal),
                    None => false,
                }
            }
            Expression::Logical {
                operator,
                left,
                right,
            } => {
                let left_result = left.evaluate(row, header);
                let right_result = right.evaluate(row, header);
                debug!("evaluating ({} {} {})", left_result, operator, right_result);
                match operator {
                    LogicalOperator::And => left_result && right_result,
                    LogicalOperator::Or => left_result || right_result,
                }
            }
        }
    }
}

/// Сравнивает значение ячейки с литералом.
///
/// Если оба значения числовые, сравнение идет как `f64` (`==`, `!=`, `>`,
/// `<`, `>=`, `<=`); иначе как текст без учета регистра (`==`, `!=`, `LIKE`
/// как вхождение подстроки). Неподходящий оператор дает `false`.
pub fn compare(value: &str, operator: &str, literal: &str) -> bool {
    if let Some((left, right)) = as_numbers(value, literal) {
        return match operator {
            "==" => left == right,
            "!=" => left != right,
            ">" => left > right,
            "<" => left < right,
            ">=" => left >= right,
            "<=" => left <= right,
            _ => false,
        };
    }

    match operator {
        "==" => value.to_lowercase() == literal.to_lowercase(),
        "!=" => value.to_lowercase() != literal.to_lowercase(),
        op if op.eq_ignore_ascii_case("LIKE") => {
            value.to_lowercase().contains(&literal.to_lowercase())
        }
        _ => false,
    }
}

/// Равенство по тому же правилу: числа как числа, иначе текст без учета регистра
pub fn values_equal(left: &str, right: &str) -> bool {
    compare(left.trim(), "==", right.trim())
}

fn as_numbers(left: &str, right: &str) -> Option<(f64, f64)> {
    if is_number(left) && is_number(right) {
        Some((left.parse().ok()?, right.parse().ok()?))
    } else {
        None
    }
}

/// Рекурсивный парсер условия по захваченным токенам
pub struct ConditionParser<'a> {
    tokens: &'a [Token],
    position: usize,
}

impl<'a> ConditionParser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Строит дерево; все токены должны быть израсходованы
    pub fn parse(mut self) -> Result<Expression> {
        let expression = self.parse_or()?;
        if let Some(token) = self.tokens.get(self.position) {
            return Err(Error::syntax(format!(
                "Unexpected token in condition: {}",
                token.value
            )));
        }
        Ok(expression)
    }

    fn parse_or(&mut self) -> Result<Expression> {
        let mut left = self.parse_and()?;
        while self.match_logical("OR") {
            let right = self.parse_and()?;
            left = Expression::logical(LogicalOperator::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expression> {
        let mut left = self.parse_atom()?;
        while self.match_logical("AND") {
            let right = self.parse_atom()?;
            left = Expression::logical(LogicalOperator::And, left, right);
        }
        Ok(left)
    }

    fn parse_atom(&mut self) -> Result<Expression> {
        if self.match_symbol("(") {
            let inner = self.parse_or()?;
            if !self.match_symbol(")") {
                return Err(Error::syntax("Unmatched opening parenthesis."));
            }
            return Ok(inner);
        }

        let column = self.next_token()?;
        if column.token_type != TokenType::Identifier {
            return Err(Error::syntax(format!(
                "Expected column name in condition, found: {}",
                column.value
            )));
        }
        let operator = self.next_token()?;
        let literal = self.next_token()?;
        if !matches!(
            literal.token_type,
            TokenType::String | TokenType::Number | TokenType::Identifier
        ) {
            return Err(Error::syntax(format!(
                "Expected value in condition, found: {}",
                literal.value
            )));
        }

        Ok(Expression::condition(
            &column.value,
            &operator.value,
            &literal.value,
        ))
    }

    fn next_token(&mut self) -> Result<&'a Token> {
        let token = self
            .tokens
            .get(self.position)
            .ok_or_else(|| Error::syntax("Incomplete condition."))?;
        self.position += 1;
        Ok(token)
    }

    fn match_logical(&mut self, keyword: &str) -> bool {
        self.match_token(TokenType::LogicalOperator, keyword)
    }

    fn match_symbol(&mut self, symbol: &str) -> bool {
        self.match_token(TokenType::Symbol, symbol)
    }

    fn match_token(&mut self, token_type: TokenType, value: &str) -> bool {
        match self.tokens.get(self.position) {
            Some(token) if token.is(token_type, value) => {
                self.position += 1;
                true
            }
            _ => false,
        }
    }
}
