//! Разбиение текста запроса на фрагменты
//!
//! Строковые литералы в одинарных кавычках сохраняются целиком вместе с
//! кавычками. Вне литералов двухсимвольные операторы сравнения выделяются
//! раньше односимвольных, поэтому `==` никогда не распадается на два `=`.

use crate::common::{Error, Result};

/// Двухсимвольные операторы сравнения
const MULTI_CHAR_OPERATORS: [&str; 4] = ["==", "!=", "<=", ">="];

/// Односимвольные символы и операторы, всегда образующие отдельный фрагмент
const SINGLE_CHAR_TOKENS: [char; 8] = ['(', ')', ',', ';', '*', '<', '>', '='];

/// Разбивает запрос на упорядоченную последовательность фрагментов
pub fn tokenize(query: &str) -> Result<Vec<String>> {
    let spans: Vec<&str> = query.split('\'').collect();
    // Нечетное число кавычек: последний литерал не закрыт
    if spans.len() % 2 == 0 {
        return Err(Error::syntax("Unterminated string literal."));
    }

    let mut fragments = Vec::new();
    for (index, span) in spans.iter().enumerate() {
        if index % 2 == 1 {
            // Табуляция разделяет ячейки в файле таблицы
            if span.contains('\t') {
                return Err(Error::syntax("String literal cannot contain a tab."));
            }
            fragments.push(format!("'{}'", span));
        } else {
            split_span(span, &mut fragments);
        }
    }

    Ok(fragments)
}

/// Разбивает участок вне литералов
fn split_span(span: &str, fragments: &mut Vec<String>) {
    let chars: Vec<char> = span.chars().collect();
    let mut current = String::new();
    let mut position = 0;

    while position < chars.len() {
        let ch = chars[position];

        if ch.is_whitespace() {
            flush(&mut current, fragments);
            position += 1;
            continue;
        }

        if let Some(&next) = chars.get(position + 1) {
            let pair: String = [ch, next].iter().collect();
            if MULTI_CHAR_OPERATORS.contains(&pair.as_str()) {
                flush(&mut current, fragments);
                fragments.push(pair);
                position += 2;
                continue;
            }
        }

        if SINGLE_CHAR_TOKENS.contains(&ch) {
            flush(&mut current, fragments);
            fragments.push(ch.to_string());
        } else {
            current.push(ch);
        }
        position += 1;
    }

    flush(&mut current, fragments);
}

fn flush(current: &mut String, fragments: &mut Vec<String>) {
    if !current.is_empty() {
        fragments.push(std::mem::take(current));
    }
}
