//! Live offer feed: a bounded publish-subscribe store of triggered offers,
//! served to dashboard clients over WebSocket.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::state::AppState;

/// Bounded queue length; lagging subscribers skip the events they missed.
const FEED_CAPACITY: usize = 64;

/// An offer decision published to live subscribers.
#[derive(Debug, Clone, Serialize)]
pub struct OfferEvent {
    #[serde(rename = "type")]
    pub offer_type: String,
    pub value: String,
    pub confidence: f64,
    pub latency_ms: f64,
}

/// Publish-subscribe store for triggered offers.
#[derive(Clone)]
pub struct OfferFeed {
    tx: broadcast::Sender<OfferEvent>,
}

impl OfferFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    /// Publish an event. A send without subscribers is not an error.
    pub fn publish(&self, event: OfferEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OfferEvent> {
        self.tx.subscribe()
    }
}

impl Default for OfferFeed {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn ws_upgrade(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.offers.subscribe();

    // Forward published offers to this client.
    let send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let Ok(payload) = serde_json::to_string(&event) else {
                        continue;
                    };
                    if sender.send(Message::Text(payload.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Consume incoming messages (pings, close frames) but ignore content.
    let recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if matches!(msg, Message::Close(_)) {
                break;
            }
        }
    });

    // Wait for either task to finish (client disconnect or feed close).
    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }
}
