//! Сетевой интерфейс tabdb

pub mod connection;
pub mod server;

#[cfg(test)]
pub mod tests;

pub use connection::{Connection, Request, END_OF_TRANSMISSION};
pub use server::Server;
