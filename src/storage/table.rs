//! Табличное значение: заголовок и строки данных
//!
//! Строка 0 файла таблицы является заголовком, колонка 0 которого всегда
//! `id`. Ячейки разделяются символом табуляции.

/// Разделитель ячеек в строке таблицы
pub const CELL_SEPARATOR: char = '\t';

/// Имя ключевой колонки
pub const ID_COLUMN: &str = "id";

/// Значение, которым заполняются отсутствующие ячейки
pub const NULL_VALUE: &str = "NULL";

/// Таблица в памяти
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Создает таблицу без строк данных
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    /// Разбирает строки хранилища. Пустой набор строк означает, что таблицы нет.
    pub fn from_lines(lines: &[String]) -> Option<Self> {
        let (header, rows) = lines.split_first()?;
        Some(Self {
            header: split_line(header),
            rows: rows
                .iter()
                .filter(|line| !line.is_empty())
                .map(|line| split_line(line))
                .collect(),
        })
    }

    /// Сериализует таблицу обратно в строки хранилища
    pub fn to_lines(&self) -> Vec<String> {
        std::iter::once(&self.header)
            .chain(self.rows.iter())
            .map(|cells| join_cells(cells))
            .collect()
    }

    /// Индекс колонки по имени без учета регистра
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h.eq_ignore_ascii_case(name))
    }

    /// Количество колонок заголовка
    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Следующий id: id последней строки + 1, либо 1 для пустой таблицы.
    /// `None`, если id последней строки не число или уже максимален.
    pub fn next_id(&self) -> Option<i64> {
        match self.rows.last() {
            None => Some(1),
            Some(row) => row
                .first()
                .and_then(|id| id.trim().parse::<i64>().ok())
                .and_then(|id| id.checked_add(1)),
        }
    }
}

/// Разбивает строку хранилища на ячейки
pub fn split_line(line: &str) -> Vec<String> {
    line.split(CELL_SEPARATOR).map(str::to_string).collect()
}

/// Склеивает ячейки в строку хранилища
pub fn join_cells(cells: &[String]) -> String {
    cells.join(&CELL_SEPARATOR.to_string())
}
