//! WebSocket session handler for a chat client.
//!
//! This actor manages a single client's connection, registering it with the
//! relay server on start and removing it on stop, and translating between
//! WebSocket frames and relay messages. It also serializes and sends server
//! messages to the client.
use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::error;
use uuid::Uuid;

use super::messages::{ClientWsMessage, ServerWsMessage};
use super::server::{Connect, Disconnect, Forward, ForwardKind, RelayServer, Skip, StartChat};
use super::types::ClientId;
use crate::server::ws_error::ws_error_message;

/// Represents one client's WebSocket connection.
pub struct ClientSession {
    pub id: ClientId,
    pub relay_addr: Addr<RelayServer>,
}

impl Actor for ClientSession {
    type Context = ws::WebsocketContext<Self>;

    /// Called when the session starts. Registers the client with the relay.
    fn started(&mut self, ctx: &mut Self::Context) {
        self.relay_addr.do_send(Connect {
            id: self.id,
            addr: ctx.address().recipient(),
        });
    }

    /// Called when the session stops. Removes the client from the relay.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.relay_addr.do_send(Disconnect { id: self.id });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ClientSession {
    /// Handles incoming WebSocket messages from the client.
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                // Parse the client message as JSON and dispatch to the relay.
                match serde_json::from_str::<ClientWsMessage>(&text) {
                    Ok(ClientWsMessage::StartChat) => {
                        self.relay_addr.do_send(StartChat { id: self.id });
                    }
                    Ok(ClientWsMessage::Offer(payload)) => {
                        self.relay_addr.do_send(Forward {
                            id: self.id,
                            kind: ForwardKind::Offer(payload),
                        });
                    }
                    Ok(ClientWsMessage::Answer(payload)) => {
                        self.relay_addr.do_send(Forward {
                            id: self.id,
                            kind: ForwardKind::Answer(payload),
                        });
                    }
                    Ok(ClientWsMessage::Candidate(payload)) => {
                        self.relay_addr.do_send(Forward {
                            id: self.id,
                            kind: ForwardKind::Candidate(payload),
                        });
                    }
                    Ok(ClientWsMessage::ChatMessage(message)) => {
                        self.relay_addr.do_send(Forward {
                            id: self.id,
                            kind: ForwardKind::Chat(message),
                        });
                    }
                    Ok(ClientWsMessage::Skip) | Ok(ClientWsMessage::StopChat) => {
                        self.relay_addr.do_send(Skip { id: self.id });
                    }
                    Ok(ClientWsMessage::Ping) => {
                        // Keep-alive; nothing to relay.
                    }
                    Err(_e) => {
                        // Invalid client message format.
                        ctx.text(ws_error_message(
                            "INVALID_MESSAGE",
                            "Invalid client message",
                            None,
                        ));
                    }
                }
            }
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(_)) => ctx.stop(),
            _ => (),
        }
    }
}

impl Handler<ServerWsMessage> for ClientSession {
    type Result = ();

    /// Handles messages sent from the relay to this session.
    fn handle(&mut self, msg: ServerWsMessage, ctx: &mut Self::Context) {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                // Serialization error: notify client and close connection.
                error!("[Relay] Failed to serialize server message: {}", e);
                ctx.text(ws_error_message("INTERNAL_ERROR", "Internal server error", None));
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Error,
                    description: Some("Internal server error".into()),
                }));
                ctx.stop();
            }
        }
    }
}

/// WebSocket endpoint for the chat relay.
///
/// Each accepted connection gets a freshly generated client id; clients are
/// anonymous and carry no identity across connections.
pub async fn ws_chat(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    let id = Uuid::new_v4();

    ws::start(
        ClientSession {
            id,
            relay_addr: data.relay_addr.clone(),
        },
        &req,
        stream,
    )
}
