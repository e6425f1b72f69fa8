//! Соединение с клиентом: построчный протокол
//!
//! Одна строка от клиента является одним запросом. Каждый ответ завершается
//! последовательностью `"\n" + EOT + "\n"`.

use crate::common::Result;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufStream};

/// Маркер конца ответа (End Of Transmission)
pub const END_OF_TRANSMISSION: char = '\u{4}';

/// Запрос, прочитанный из соединения
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Текст запроса без завершающего перевода строки
    Statement(String),
    /// Строка длиннее допустимого; хранит прочитанную длину
    TooLong(usize),
}

/// Соединение с клиентом поверх произвольного потока
pub struct Connection<T> {
    stream: BufStream<T>,
    max_statement_length: usize,
}

impl<T: AsyncRead + AsyncWrite + Unpin> Connection<T> {
    pub fn new(stream: T, max_statement_length: usize) -> Self {
        Self {
            stream: BufStream::new(stream),
            max_statement_length,
        }
    }

    /// Читает следующую строку. `None` означает, что клиент закрыл соединение.
    pub async fn read_request(&mut self) -> Result<Option<Request>> {
        let limit = self.max_statement_length as u64 + 1;
        let mut buffer = Vec::new();
        let read = (&mut self.stream)
            .take(limit)
            .read_until(b'\n', &mut buffer)
            .await?;
        if read == 0 {
            return Ok(None);
        }

        if buffer.last() != Some(&b'\n') && read as u64 >= limit {
            let total = read + self.skip_line().await?;
            return Ok(Some(Request::TooLong(total)));
        }

        while matches!(buffer.last(), Some(b'\n' | b'\r')) {
            buffer.pop();
        }
        Ok(Some(Request::Statement(
            String::from_utf8_lossy(&buffer).into_owned(),
        )))
    }

    /// Пропускает остаток слишком длинной строки
    async fn skip_line(&mut self) -> Result<usize> {
        let mut skipped = 0;
        loop {
            let mut chunk = Vec::new();
            let read = (&mut self.stream)
                .take(8192)
                .read_until(b'\n', &mut chunk)
                .await?;
            skipped += read;
            if read == 0 || chunk.last() == Some(&b'\n') {
                return Ok(skipped);
            }
        }
    }

    /// Отправляет ответ с маркером конца
    pub async fn write_response(&mut self, response: &str) -> Result<()> {
        self.stream.write_all(response.as_bytes()).await?;
        self.stream
            .write_all(format!("\n{}\n", END_OF_TRANSMISSION).as_bytes())
            .await?;
        self.stream.flush().await?;
        Ok(())
    }
}
