//! Тесты для сетевого сервера

use crate::common::NetworkConfig;
use crate::executor::QueryExecutor;
use crate::network::Server;
use crate::storage::MemoryStorage;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

/// Читает один ответ до маркера конца
async fn read_response<R>(reader: &mut BufReader<R>) -> String
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut response = Vec::new();
    reader.read_until(b'\x04', &mut response).await.unwrap();
    let mut newline = String::new();
    reader.read_line(&mut newline).await.unwrap();
    assert_eq!(newline, "\n");
    let text = String::from_utf8(response).unwrap();
    text.trim_end_matches('\x04')
        .trim_end_matches('\n')
        .to_string()
}

#[test]
fn test_server_keeps_config() {
    let config = NetworkConfig {
        port: 0,
        ..Default::default()
    };
    let server = Server::new(config.clone(), QueryExecutor::new(MemoryStorage::new()));
    assert_eq!(server.config(), &config);
    assert!(server.executor().session().database().is_none());
}

#[tokio::test]
async fn test_round_trip_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let mut server = Server::new(
        NetworkConfig::default(),
        QueryExecutor::new(MemoryStorage::new()),
    );
    let handle = tokio::spawn(async move {
        server
            .serve_until(listener, async {
                let _ = shutdown_rx.await;
            })
            .await
    });

    let stream = TcpStream::connect(address).await.unwrap();
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);

    let script = [
        ("CREATE DATABASE school;", "[OK]"),
        ("USE school;", "[OK]"),
        ("CREATE TABLE marks (name, mark);", "[OK]"),
        ("INSERT INTO marks VALUES ('Simon', 65);", "[OK]"),
        ("SELECT * FROM marks;", "[OK]\nid\tname\tmark\n1\tSimon\t65"),
        ("", "[ERROR] Empty command received."),
        ("SELECT * FROM ghost;", "[ERROR] Table 'ghost' does not exist."),
    ];
    for (command, expected) in script {
        writer
            .write_all(format!("{}\n", command).as_bytes())
            .await
            .unwrap();
        assert_eq!(read_response(&mut reader).await, expected, "{}", command);
    }
    drop(writer);
    drop(reader);

    // Сервер продолжает принимать соединения после закрытия предыдущего
    let mut second = TcpStream::connect(address).await.unwrap();
    second.write_all(b"USE school;\n").await.unwrap();
    let mut reader = BufReader::new(second);
    assert_eq!(read_response(&mut reader).await, "[OK]");
    drop(reader);

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}
