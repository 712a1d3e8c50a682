//! Server network layer: the accept loop and the per-connection
//! request/response loop shared by every service in the family.

use crate::error::ServerError;
use async_trait::async_trait;
use log::{debug, error, info, warn};
use serde::Serialize;
use shared::codec::{read_frame, write_json};
use shared::envelope::parse_envelope;
use shared::{Envelope, Response};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;

/// One response plus whether the connection should close after it is sent.
#[derive(Debug)]
pub struct Reply<P> {
    pub response: Response<P>,
    pub close: bool,
}

impl<P> Reply<P> {
    pub fn respond(response: Response<P>) -> Self {
        Self {
            response,
            close: false,
        }
    }

    pub fn close(response: Response<P>) -> Self {
        Self {
            response,
            close: true,
        }
    }
}

/// A request/response protocol served over one connection at a time.
///
/// Each connection gets a fresh `Session` that lives exactly as long as the
/// connection and is only ever touched by that connection's task.
#[async_trait]
pub trait Service: Send + Sync + 'static {
    type Session: Default + Send;
    type Payload: Serialize + Default + Send + Sync;

    fn name(&self) -> &'static str;

    async fn handle(
        &self,
        session: &mut Self::Session,
        envelope: Envelope,
    ) -> Reply<Self::Payload>;
}

/// Listening socket plus the service every accepted connection is served by
pub struct Server<S> {
    listener: TcpListener,
    service: Arc<S>,
}

impl<S: Service> Server<S> {
    pub async fn bind(addr: &str, service: S) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr).await?;
        info!("{} server listening on {}", service.name(), listener.local_addr()?);

        Ok(Server {
            listener,
            service: Arc::new(service),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts connections forever, serving each on its own task.
    pub async fn run(self) -> Result<(), ServerError> {
        loop {
            info!("Server waiting for a connection");
            let (stream, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!("Failed to accept connection: {}", e);
                    continue;
                }
            };

            let service = Arc::clone(&self.service);
            tokio::spawn(async move {
                serve_connection(stream, peer, service).await;
            });
        }
    }
}

/// Serves one peer until it quits or disconnects.
///
/// Malformed frames are answered with an error and the loop continues; any
/// read or write failure is treated as the peer going away.
pub async fn serve_connection<S, T>(mut stream: T, peer: SocketAddr, service: Arc<S>)
where
    S: Service,
    T: AsyncRead + AsyncWrite + Unpin,
{
    info!("Client {} connected", peer);
    let mut session = S::Session::default();

    loop {
        let frame = match read_frame(&mut stream).await {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                info!("Client {} disconnected", peer);
                break;
            }
            Err(e) => {
                info!("Client {} disconnected: {}", peer, e);
                break;
            }
        };

        let reply = match parse_envelope(&frame) {
            Ok(envelope) => {
                debug!("Request from {}: {}", peer, serde_json::Value::Object(envelope.clone()));
                service.handle(&mut session, envelope).await
            }
            Err(e) => {
                warn!("Malformed request from {}: {}", peer, e);
                Reply::respond(Response::error(e.to_string()))
            }
        };

        if let Err(e) = write_json(&mut stream, &reply.response).await {
            info!("Client {} disconnected while writing: {}", peer, e);
            break;
        }

        if reply.close {
            info!("Client {} quit", peer);
            break;
        }
    }
}
