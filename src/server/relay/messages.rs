use actix::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::ClientId;

// Message client -> server. Action names match the wire protocol spoken by
// the browser client, hence kebab-case.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "action", content = "data", rename_all = "kebab-case")]
pub enum ClientWsMessage {
    StartChat,
    Offer(Value),
    Answer(Value),
    Candidate(Value),
    ChatMessage(String),
    Skip,
    // Older clients say "stop-chat"; both dissolve the session the same way.
    StopChat,
    Ping,
}

// Message server -> client.
#[derive(Message, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data", rename_all = "kebab-case")]
pub enum ServerWsMessage {
    Connected {
        peer_id: ClientId,
    },
    NoUsers {
        message: String,
    },
    Offer(Value),
    Answer(Value),
    Candidate(Value),
    ChatMessage {
        sender: String,
        message: String,
    },
    ChatEnded,
    UserCount(usize),
    Error {
        message: String,
    },
}

impl ServerWsMessage {
    pub fn connected(peer_id: ClientId) -> Self {
        Self::Connected { peer_id }
    }
    pub fn no_users(message: &str) -> Self {
        Self::NoUsers {
            message: message.to_string(),
        }
    }
    pub fn chat_message(sender: &str, message: String) -> Self {
        Self::ChatMessage {
            sender: sender.to_string(),
            message,
        }
    }
}
