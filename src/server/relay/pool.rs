//! The two tables behind pairing: the FIFO waiting pool and the session
//! table. Both are plain data structures; serialization of access is the
//! relay server actor's job.

use std::collections::{HashMap, VecDeque};

use super::error::RelayError;
use super::types::{ClientId, Session};

/// FIFO pool of clients eligible for pairing.
///
/// Insertion order is significant: the longest-waiting client is matched
/// first. A client appears at most once.
pub struct WaitingPool {
    queue: VecDeque<ClientId>,
}

impl WaitingPool {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Appends a client unless it is already waiting.
    pub fn enqueue(&mut self, id: ClientId) {
        if !self.contains(id) {
            self.queue.push_back(id);
        }
    }

    /// Returns the oldest waiting client other than `excluding`, without
    /// removing it. Removal is explicit via `remove`.
    pub fn oldest_other(&self, excluding: ClientId) -> Option<ClientId> {
        self.queue.iter().copied().find(|&id| id != excluding)
    }

    /// Removes a client if present. Absent clients are a no-op.
    pub fn remove(&mut self, id: ClientId) {
        self.queue.retain(|&waiting| waiting != id);
    }

    pub fn contains(&self, id: ClientId) -> bool {
        self.queue.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Mapping from client id to its active session.
///
/// Entries always come in symmetric pairs: when two clients are paired, the
/// table holds one entry per member, both pointing at the same session.
pub struct SessionTable {
    entries: HashMap<ClientId, Session>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, id: ClientId) -> Option<Session> {
        self.entries.get(&id).copied()
    }

    pub fn contains(&self, id: ClientId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Pairs two clients, inserting one entry per member.
    ///
    /// Self-pairing and members that already belong to a session are
    /// rejected before anything is mutated.
    pub fn insert_pair(&mut self, a: ClientId, b: ClientId) -> Result<Session, RelayError> {
        if a == b {
            return Err(RelayError::SelfPair(a));
        }
        if self.entries.contains_key(&a) {
            return Err(RelayError::AlreadyPaired(a));
        }
        if self.entries.contains_key(&b) {
            return Err(RelayError::AlreadyPaired(b));
        }
        let session = Session::new(a, b);
        self.entries.insert(a, session);
        self.entries.insert(b, session);
        Ok(session)
    }

    /// Dissolves the session `id` belongs to, removing both entries at once,
    /// and returns the other member.
    ///
    /// An unpaired `id` is a no-op. A table holding only one direction of a
    /// pair is reported as an error and left untouched.
    pub fn remove_pair(&mut self, id: ClientId) -> Result<Option<ClientId>, RelayError> {
        let session = match self.entries.get(&id) {
            Some(session) => *session,
            None => return Ok(None),
        };
        let partner = session.partner_of(id).ok_or(RelayError::HalfOpenEntry(id))?;
        if self.entries.get(&partner) != Some(&session) {
            return Err(RelayError::HalfOpenEntry(partner));
        }
        self.entries.remove(&id);
        self.entries.remove(&partner);
        Ok(Some(partner))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
