//! Relay server actor.
//!
//! Owns all shared pairing state: the registry of connected clients, the
//! FIFO waiting pool, and the session table. Every state transition
//! (pairing, forwarding, teardown) runs to completion inside a single
//! message handler, so transitions are serialized relative to each other.

use actix::prelude::*;
use std::collections::HashMap;
use log::{debug, error, info};
use serde_json::Value;

use super::error::RelayError;
use super::messages::ServerWsMessage;
use super::pool::{SessionTable, WaitingPool};
use super::types::ClientId;
use crate::config::relay::{CHAT_SENDER_TAG, NO_USERS_TEXT};

type ClientAddr = Recipient<ServerWsMessage>;

/// Why a session is being dissolved. A skip keeps both members around for a
/// new pairing; a disconnect removes the leaving member permanently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TeardownReason {
    Skip,
    Disconnect,
}

/// Main relay server actor.
pub struct RelayServer {
    /// Every currently connected client, reachable through its event channel.
    clients: HashMap<ClientId, ClientAddr>,
    /// Clients eligible for pairing, oldest first.
    waiting: WaitingPool,
    /// Active sessions, one entry per member.
    sessions: SessionTable,
}

/// Message: a client connection opened.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub id: ClientId,
    pub addr: ClientAddr,
}

/// Message: a client connection closed.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub id: ClientId,
}

/// Message: a client asked to be paired with a stranger.
#[derive(Message)]
#[rtype(result = "()")]
pub struct StartChat {
    pub id: ClientId,
}

/// Message: a client asked to leave its current session and look for a new
/// partner.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Skip {
    pub id: ClientId,
}

/// Message: payload to relay to the sender's session partner.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Forward {
    pub id: ClientId,
    pub kind: ForwardKind,
}

/// What is being relayed. Signaling payloads are opaque; chat text is
/// wrapped with a sender tag before delivery.
#[derive(Clone, Debug)]
pub enum ForwardKind {
    Offer(Value),
    Answer(Value),
    Candidate(Value),
    Chat(String),
}

impl ForwardKind {
    fn label(&self) -> &'static str {
        match self {
            ForwardKind::Offer(_) => "offer",
            ForwardKind::Answer(_) => "answer",
            ForwardKind::Candidate(_) => "candidate",
            ForwardKind::Chat(_) => "chat-message",
        }
    }
}

impl RelayServer {
    /// Create a new relay server with no connected clients.
    pub fn new() -> Self {
        Self {
            clients: HashMap::new(),
            waiting: WaitingPool::new(),
            sessions: SessionTable::new(),
        }
    }

    /// Send a message to one client. A missing client is not an error: the
    /// connection is gone and the message is simply dropped.
    fn send_to(&self, id: ClientId, msg: ServerWsMessage) {
        if let Some(addr) = self.clients.get(&id) {
            addr.do_send(msg);
        }
    }

    /// Broadcast the waiting-pool size to every connected client. Delivery
    /// is fire-and-forget.
    fn broadcast_user_count(&self) {
        let msg = ServerWsMessage::UserCount(self.waiting.len());
        for addr in self.clients.values() {
            addr.do_send(msg.clone());
        }
    }

    /// Pair `requester` with the longest-waiting other client, if any.
    fn try_pair(&mut self, requester: ClientId) {
        if self.sessions.contains(requester) {
            // Stale request: the client is already in a session.
            debug!("[Relay] Client {} requested pairing while already paired", requester);
            return;
        }
        if !self.clients.contains_key(&requester) {
            // The connection is already gone. A pairing request that raced a
            // disconnect must not re-enter the pool.
            debug!("[Relay] Pairing request from unregistered client {}", requester);
            return;
        }
        let partner = match self.waiting.oldest_other(requester) {
            Some(partner) => partner,
            None => {
                self.waiting.enqueue(requester);
                self.send_to(requester, ServerWsMessage::no_users(NO_USERS_TEXT));
                self.broadcast_user_count();
                return;
            }
        };
        // Reserve the session first: on rejection the pool is untouched.
        if let Err(e) = self.sessions.insert_pair(requester, partner) {
            error!("[Relay] Pairing {} with {} rejected: {}", requester, partner, e);
            return;
        }
        self.waiting.remove(requester);
        self.waiting.remove(partner);
        self.send_to(requester, ServerWsMessage::connected(partner));
        self.send_to(partner, ServerWsMessage::connected(requester));
        info!("[Relay] Paired {} with {}", requester, partner);
        self.broadcast_user_count();
    }

    /// Relay a payload to the sender's session partner.
    ///
    /// A sender without a session is not an error: the message is stale
    /// (e.g. it arrived after the partner already left) and is dropped.
    fn forward(&self, sender: ClientId, kind: ForwardKind) {
        let session = match self.sessions.get(sender) {
            Some(session) => session,
            None => {
                debug!("[Relay] Dropped {} from unpaired client {}", kind.label(), sender);
                return;
            }
        };
        let partner = match session.partner_of(sender) {
            Some(partner) => partner,
            None => {
                error!("[Relay] {}", RelayError::HalfOpenEntry(sender));
                return;
            }
        };
        let msg = match kind {
            ForwardKind::Offer(payload) => ServerWsMessage::Offer(payload),
            ForwardKind::Answer(payload) => ServerWsMessage::Answer(payload),
            ForwardKind::Candidate(payload) => ServerWsMessage::Candidate(payload),
            ForwardKind::Chat(text) => ServerWsMessage::chat_message(CHAT_SENDER_TAG, text),
        };
        self.send_to(partner, msg);
    }

    /// Dissolve the session `id` belongs to, notifying and re-queueing its
    /// members depending on the reason. Without a session this is a no-op;
    /// registry and pool removal on disconnect is the caller's job.
    fn teardown(&mut self, id: ClientId, reason: TeardownReason) {
        let partner = match self.sessions.remove_pair(id) {
            Ok(Some(partner)) => partner,
            Ok(None) => return,
            Err(e) => {
                error!("[Relay] Teardown for {} aborted: {}", id, e);
                return;
            }
        };
        match reason {
            TeardownReason::Skip => {
                // Both sides learn the session ended, and both become
                // eligible for a new pairing.
                self.send_to(partner, ServerWsMessage::ChatEnded);
                self.send_to(id, ServerWsMessage::ChatEnded);
                self.waiting.enqueue(id);
                self.waiting.enqueue(partner);
                info!("[Relay] Client {} skipped, session with {} dissolved", id, partner);
            }
            TeardownReason::Disconnect => {
                self.send_to(partner, ServerWsMessage::ChatEnded);
                if self.clients.contains_key(&partner) {
                    self.waiting.enqueue(partner);
                }
                info!("[Relay] Client {} disconnected, session with {} dissolved", id, partner);
            }
        }
    }
}

impl Actor for RelayServer {
    type Context = Context<Self>;
}

impl Handler<Connect> for RelayServer {
    type Result = ();

    /// Registers a new connection and makes it eligible for pairing.
    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        if self.clients.contains_key(&msg.id) {
            // Ids are generated fresh per connection; a collision is a bug.
            error!("[Relay] {}", RelayError::DuplicateClient(msg.id));
            return;
        }
        self.clients.insert(msg.id, msg.addr);
        self.waiting.enqueue(msg.id);
        debug!("[Relay] Client {} connected ({} waiting)", msg.id, self.waiting.len());
        self.broadcast_user_count();
    }
}

impl Handler<Disconnect> for RelayServer {
    type Result = ();

    /// Removes a connection permanently, dissolving its session if any.
    /// Safe to deliver more than once for the same id.
    fn handle(&mut self, msg: Disconnect, _ctx: &mut Self::Context) -> Self::Result {
        self.teardown(msg.id, TeardownReason::Disconnect);
        self.clients.remove(&msg.id);
        self.waiting.remove(msg.id);
        debug!("[Relay] Client {} disconnected ({} waiting)", msg.id, self.waiting.len());
        self.broadcast_user_count();
    }
}

impl Handler<StartChat> for RelayServer {
    type Result = ();

    /// Handles a client requesting a new pairing.
    fn handle(&mut self, msg: StartChat, _ctx: &mut Self::Context) -> Self::Result {
        self.try_pair(msg.id);
    }
}

impl Handler<Skip> for RelayServer {
    type Result = ();

    /// Handles a client leaving its session to look for someone new.
    fn handle(&mut self, msg: Skip, _ctx: &mut Self::Context) -> Self::Result {
        self.teardown(msg.id, TeardownReason::Skip);
        self.broadcast_user_count();
    }
}

impl Handler<Forward> for RelayServer {
    type Result = ();

    /// Handles a payload addressed to the sender's session partner.
    fn handle(&mut self, msg: Forward, _ctx: &mut Self::Context) -> Self::Result {
        self.forward(msg.id, msg.kind);
    }
}
