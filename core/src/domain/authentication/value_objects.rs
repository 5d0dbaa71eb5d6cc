use uuid::Uuid;

/// Caller identity resolved from a valid session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub session_id: Uuid,
}

impl Identity {
    pub fn id(&self) -> Uuid {
        self.user_id
    }
}
