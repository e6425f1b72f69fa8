//! Сетевой сервер tabdb
//!
//! Соединения принимаются и обслуживаются по одному: в каждый момент
//! выполняется не более одного запроса. Ошибка ввода-вывода на одном
//! соединении не останавливает сервер.

use crate::common::{NetworkConfig, Result};
use crate::executor::{QueryExecutor, QueryResult};
use crate::network::connection::{Connection, Request};
use crate::storage::TableStorage;
use std::future::Future;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// Сервер запросов
pub struct Server<S> {
    config: NetworkConfig,
    executor: QueryExecutor<S>,
}

impl<S: TableStorage> Server<S> {
    pub fn new(config: NetworkConfig, executor: QueryExecutor<S>) -> Self {
        Self { config, executor }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn executor(&self) -> &QueryExecutor<S> {
        &self.executor
    }

    /// Открывает слушающий сокет по адресу из конфигурации
    pub async fn bind(&self) -> Result<TcpListener> {
        let listener = TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        Ok(listener)
    }

    /// Слушает адрес из конфигурации, пока процесс не остановят
    pub async fn run(&mut self) -> Result<()> {
        let listener = self.bind().await?;
        self.serve(listener).await
    }

    /// Обслуживает соединения с уже открытого сокета
    pub async fn serve(&mut self, listener: TcpListener) -> Result<()> {
        self.serve_until(listener, std::future::pending()).await
    }

    /// Обслуживает соединения, пока не завершится `shutdown`
    pub async fn serve_until<F>(&mut self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        info!(address = %listener.local_addr()?, "server listening");
        tokio::pin!(shutdown);

        loop {
            let accepted = tokio::select! {
                _ = &mut shutdown => {
                    info!("server shutting down");
                    return Ok(());
                }
                accepted = listener.accept() => accepted,
            };

            let (stream, peer) = match accepted {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "failed to accept connection");
                    continue;
                }
            };

            info!(%peer, "connection established");
            if let Err(e) = self.handle_connection(stream).await {
                warn!(%peer, error = %e, "non-fatal I/O error, continuing");
            }
            info!(%peer, "connection closed");
        }
    }

    /// Обслуживает одно соединение до его закрытия клиентом
    pub async fn handle_connection<T>(&mut self, stream: T) -> Result<()>
    where
        T: AsyncRead + AsyncWrite + Unpin,
    {
        let max_length = self.config.max_statement_length;
        let mut connection = Connection::new(stream, max_length);

        while let Some(request) = connection.read_request().await? {
            let response = match request {
                Request::Statement(statement) => {
                    debug!(%statement, "received command");
                    self.executor.execute(&statement)
                }
                Request::TooLong(length) => {
                    warn!(length, max_length, "command too long");
                    QueryResult::error(format!(
                        "Command exceeds maximum length of {} bytes.",
                        max_length
                    ))
                }
            };
            connection.write_response(&response.to_string()).await?;
        }
        Ok(())
    }
}
