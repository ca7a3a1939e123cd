//! Websocket confirmation channel.
//!
//! Protocol: connect, send the quoted payment address as the first and only
//! outbound frame (this both identifies the subscription and signals the
//! client is listening), then wait for a single inbound message announcing
//! that payment was detected, then close.

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::debug;
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::types::PaymentConfirmation;

/// The notification channel seam the workflow is written against.
#[async_trait]
pub trait ConfirmationChannel {
    /// Open the channel and announce the payment address to watch.
    async fn subscribe(&mut self, payment_address: &str) -> ClientResult<()>;

    /// Wait for the next confirmation message.
    async fn next_confirmation(&mut self) -> ClientResult<PaymentConfirmation>;

    /// Close the channel. Safe to call when it was never opened.
    async fn close(&mut self) -> ClientResult<()>;
}

/// [`ConfirmationChannel`] over a tokio-tungstenite websocket.
pub struct WsConfirmationChannel {
    url: Url,
    stream: Option<WebSocketStream<MaybeTlsStream<TcpStream>>>,
}

impl WsConfirmationChannel {
    /// Create a channel for the server's `/ws` endpoint.
    pub fn new(url: Url) -> Self {
        Self { url, stream: None }
    }

    /// Whether the underlying socket is currently open.
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }
}

#[async_trait]
impl ConfirmationChannel for WsConfirmationChannel {
    async fn subscribe(&mut self, payment_address: &str) -> ClientResult<()> {
        if self.stream.is_some() {
            // Resubscribing without a reset would leak the previous socket.
            self.close().await?;
        }
        let (mut stream, _) = connect_async(self.url.as_str())
            .await
            .map_err(|e| ClientError::Channel(e.to_string()))?;
        stream
            .send(Message::Text(payment_address.to_string()))
            .await
            .map_err(|e| ClientError::Channel(e.to_string()))?;
        debug!(address = %payment_address, "subscribed for payment notification");
        self.stream = Some(stream);
        Ok(())
    }

    async fn next_confirmation(&mut self) -> ClientResult<PaymentConfirmation> {
        let stream = self.stream.as_mut().ok_or(ClientError::ChannelClosed)?;
        while let Some(frame) = stream.next().await {
            match frame.map_err(|e| ClientError::Channel(e.to_string()))? {
                Message::Text(payload) => {
                    return Ok(PaymentConfirmation::from_payload(&payload));
                }
                Message::Binary(payload) => {
                    let payload = String::from_utf8_lossy(&payload);
                    return Ok(PaymentConfirmation::from_payload(&payload));
                }
                Message::Ping(_) | Message::Pong(_) => continue,
                Message::Close(_) => break,
                _ => continue,
            }
        }
        // The server dropped the connection before notifying us.
        self.stream = None;
        Err(ClientError::ChannelClosed)
    }

    async fn close(&mut self) -> ClientResult<()> {
        if let Some(mut stream) = self.stream.take() {
            // Best effort: the server forgets the subscription on disconnect.
            let _ = stream.close(None).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recv_before_subscribe_is_closed() {
        let mut channel = WsConfirmationChannel::new(Url::parse("ws://localhost:1/ws").unwrap());
        assert!(!channel.is_open());
        assert!(matches!(
            channel.next_confirmation().await,
            Err(ClientError::ChannelClosed)
        ));
    }

    #[tokio::test]
    async fn test_close_without_open_is_ok() {
        let mut channel = WsConfirmationChannel::new(Url::parse("ws://localhost:1/ws").unwrap());
        assert!(channel.close().await.is_ok());
    }
}
