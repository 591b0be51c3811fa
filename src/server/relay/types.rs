use uuid::Uuid;

/// Identifier assigned to a client connection when the WebSocket is
/// accepted. Stable for the lifetime of the connection, never reused while
/// the connection is open, and meaningless once it closes.
pub type ClientId = Uuid;

/// An active two-party pairing.
///
/// The pair is unordered: either member can be looked up to find the other.
/// The two members are always distinct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Session {
    pub participant_a: ClientId,
    pub participant_b: ClientId,
}

impl Session {
    pub fn new(participant_a: ClientId, participant_b: ClientId) -> Self {
        Session {
            participant_a,
            participant_b,
        }
    }

    /// Returns the other member of the session, or None if `id` is not a
    /// member at all.
    pub fn partner_of(&self, id: ClientId) -> Option<ClientId> {
        if id == self.participant_a {
            Some(self.participant_b)
        } else if id == self.participant_b {
            Some(self.participant_a)
        } else {
            None
        }
    }

    pub fn contains(&self, id: ClientId) -> bool {
        id == self.participant_a || id == self.participant_b
    }
}
