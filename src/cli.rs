//! CLI интерфейс для tabdb
//!
//! Запуск сервера, выполнение одного запроса и вывод информации о системе.

use crate::common::DatabaseConfig;
use crate::executor::QueryExecutor;
use crate::network::Server;
use crate::storage::FileStorage;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

/// Конфигурационный файл, который ищется в текущем каталоге
pub const DEFAULT_CONFIG_FILE: &str = "tabdb.toml";

/// tabdb - минимальное реляционное хранилище с текстовым языком запросов
#[derive(Debug, Parser)]
#[command(name = "tabdb")]
#[command(about = "tabdb - a minimal relational store with a textual query language")]
#[command(version)]
pub struct Cli {
    /// Конфигурационный файл
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Каталог хранилища
    #[arg(long, value_name = "DIR", global = true)]
    pub storage_dir: Option<PathBuf>,

    /// Уровень детализации логирования
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Запустить сервер
    Server {
        /// Порт для прослушивания
        #[arg(short, long)]
        port: Option<u16>,

        /// Хост для прослушивания
        #[arg(long)]
        host: Option<String>,
    },

    /// Выполнить один запрос и вывести ответ
    Query {
        /// Текст запроса
        query: String,

        /// База данных, выбираемая перед запросом
        #[arg(short, long)]
        database: Option<String>,
    },

    /// Показать информацию о системе
    Info,
}

impl Cli {
    /// Собирает конфигурацию: файл, затем окружение, затем аргументы
    pub fn load_config(&self) -> anyhow::Result<DatabaseConfig> {
        let config = match &self.config {
            Some(path) => DatabaseConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                DatabaseConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => DatabaseConfig::default(),
        };
        let mut config = config.apply_env()?;

        if let Some(dir) = &self.storage_dir {
            config.storage_directory = dir.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(Commands::Server { port, host }) = &self.command {
            if let Some(port) = port {
                config.network.port = *port;
            }
            if let Some(host) = host {
                config.network.host = host.clone();
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Выполняет команду
    pub async fn execute(&self, config: DatabaseConfig) -> anyhow::Result<()> {
        match &self.command {
            Some(Commands::Server { .. }) => run_server(config).await,
            Some(Commands::Query { query, database }) => {
                let response = execute_query(&config, query, database.as_deref())?;
                println!("{}", response);
                Ok(())
            }
            Some(Commands::Info) => {
                show_info(&config);
                Ok(())
            }
            None => {
                println!("tabdb v{}", crate::VERSION);
                println!("Use --help for usage");
                Ok(())
            }
        }
    }
}

/// Запускает сервер до Ctrl+C
async fn run_server(config: DatabaseConfig) -> anyhow::Result<()> {
    let storage = FileStorage::new(&config.storage_directory).with_context(|| {
        format!(
            "can't create storage folder {}",
            config.storage_directory.display()
        )
    })?;
    let mut server = Server::new(config.network.clone(), QueryExecutor::new(storage));
    let listener = server.bind().await.with_context(|| {
        format!(
            "failed to bind {}:{}",
            config.network.host, config.network.port
        )
    })?;

    server
        .serve_until(listener, async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    info!("server stopped");
    Ok(())
}

/// Выполняет один запрос над хранилищем и возвращает текст ответа
pub fn execute_query(
    config: &DatabaseConfig,
    query: &str,
    database: Option<&str>,
) -> anyhow::Result<String> {
    let storage = FileStorage::new(&config.storage_directory)?;
    let mut executor = QueryExecutor::new(storage);
    if let Some(database) = database {
        let response = executor.execute(&format!("USE {};", database));
        if !response.is_ok() {
            return Ok(response.to_string());
        }
    }
    Ok(executor.execute(query).to_string())
}

fn show_info(config: &DatabaseConfig) {
    println!("tabdb {}", crate::VERSION);
    println!("Storage: {}", config.storage_directory.display());
    println!(
        "Listen: {}:{}",
        config.network.host, config.network.port
    );
    println!("OS: {}", std::env::consts::OS);
    println!("Arch: {}", std::env::consts::ARCH);
}
