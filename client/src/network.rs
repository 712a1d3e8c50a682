//! Client side of the framed JSON transport.

use log::debug;
use serde_json::Value;
use shared::codec::{read_frame, write_frame, write_json};
use shared::{Request, Response};
use std::io;
use tokio::net::TcpStream;

/// One TCP connection to a server of the family. Requests are answered in
/// order, so every call writes one frame and waits for exactly one back.
pub struct Connection {
    stream: TcpStream,
    server_addr: String,
}

impl Connection {
    pub async fn connect(server_addr: &str) -> io::Result<Self> {
        let stream = TcpStream::connect(server_addr).await?;
        debug!("Connected to {}", server_addr);

        Ok(Connection {
            stream,
            server_addr: server_addr.to_string(),
        })
    }

    pub fn server_addr(&self) -> &str {
        &self.server_addr
    }

    /// Sends a typed hangman request and decodes the reply.
    pub async fn request(&mut self, request: &Request) -> io::Result<Response> {
        write_json(&mut self.stream, request).await?;
        let frame = self.read_reply().await?;
        Ok(serde_json::from_slice(&frame)?)
    }

    /// Sends any JSON value, for services without typed requests.
    pub async fn send_value(&mut self, value: &Value) -> io::Result<Value> {
        write_json(&mut self.stream, value).await?;
        let frame = self.read_reply().await?;
        Ok(serde_json::from_slice(&frame)?)
    }

    /// Sends raw frame bytes as-is, valid JSON or not.
    pub async fn send_raw(&mut self, payload: &[u8]) -> io::Result<Value> {
        write_frame(&mut self.stream, payload).await?;
        let frame = self.read_reply().await?;
        Ok(serde_json::from_slice(&frame)?)
    }

    async fn read_reply(&mut self) -> io::Result<Vec<u8>> {
        read_frame(&mut self.stream).await?.ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "server closed the connection")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::net::TcpListener;

    /// Answers each frame with `{"ok": true, "echo": <request>}` until EOF.
    async fn echo_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            while let Ok(Some(frame)) = read_frame(&mut stream).await {
                let request: Value = serde_json::from_slice(&frame).unwrap_or(Value::Null);
                let reply = json!({"ok": true, "message": "echo", "echo": request});
                if write_json(&mut stream, &reply).await.is_err() {
                    break;
                }
            }
        });

        addr
    }

    #[tokio::test]
    async fn test_request_sends_tagged_json() {
        let addr = echo_server().await;
        let mut connection = Connection::connect(&addr).await.unwrap();

        let reply = connection
            .send_value(&serde_json::to_value(Request::GetLetters).unwrap())
            .await
            .unwrap();
        assert_eq!(reply["echo"], json!({"type": "get_letters"}));

        let response = connection
            .request(&Request::Name { name: "Ada".into() })
            .await
            .unwrap();
        assert!(response.ok);
        assert_eq!(response.message(), "echo");
    }

    #[tokio::test]
    async fn test_closed_server_is_an_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            drop(stream);
        });

        let mut connection = Connection::connect(&addr).await.unwrap();
        let err = connection.request(&Request::Quit).await.unwrap_err();
        assert!(matches!(
            err.kind(),
            io::ErrorKind::UnexpectedEof | io::ErrorKind::BrokenPipe | io::ErrorKind::ConnectionReset
        ));
    }
}
