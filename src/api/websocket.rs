use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;
use warp::ws::{Message, WebSocket};

use crate::error::Result;
use crate::interview::{ClientEvent, ConnectError, InterviewCoordinator, InterviewHub, ServerEvent};

pub async fn handle_interview_socket(websocket: WebSocket, hub: InterviewHub, token: Option<String>) {
    let connection_id = Uuid::new_v4().simple().to_string();
    let (mut ws_sender, mut ws_receiver) = websocket.split();

    tracing::info!(
        connection_id = %connection_id,
        has_token = token.is_some(),
        "Socket authentication attempt"
    );

    if let Err(e) = InterviewCoordinator::authenticate(token.as_deref()) {
        tracing::warn!(connection_id = %connection_id, error = %e, "Socket authentication failed");
        let frame = ServerEvent::ConnectError(ConnectError {
            message: e.to_string(),
        });
        if let Ok(text) = frame.to_json() {
            let _ = ws_sender.send(Message::text(text)).await;
        }
        let _ = ws_sender.send(Message::close()).await;
        return;
    }

    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    hub.connect(connection_id.clone(), tx);

    // Spawn task to send messages to client
    let sender_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if let Err(e) = ws_sender.send(message).await {
                tracing::error!(error = %e, "Failed to send WebSocket message");
                break;
            }
        }
    });

    let mut reason = "transport close";
    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(message) => {
                if message.is_close() {
                    reason = "client namespace disconnect";
                    break;
                }
                if let Err(e) = handle_websocket_message(&hub, &connection_id, message) {
                    tracing::warn!(connection_id = %connection_id, error = %e, "Dropping undecodable frame");
                }
            }
            Err(e) => {
                tracing::error!(connection_id = %connection_id, error = %e, "WebSocket error");
                reason = "transport error";
                break;
            }
        }
    }

    hub.disconnect(connection_id.clone(), reason);
    sender_task.abort();
    tracing::info!(connection_id = %connection_id, reason, "User disconnected");
}

fn handle_websocket_message(hub: &InterviewHub, connection_id: &str, message: Message) -> Result<()> {
    // Pings, pongs and binary frames carry no interview events
    let text = match message.to_str() {
        Ok(text) => text,
        Err(()) => return Ok(()),
    };

    tracing::debug!(connection_id = %connection_id, raw_message = %text, "Received interview frame");

    let event = ClientEvent::parse(text)?;
    hub.dispatch(connection_id.to_string(), event);
    Ok(())
}
