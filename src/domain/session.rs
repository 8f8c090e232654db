use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated caller, passed by value into every operation that
/// needs to know who is acting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
}

/// A freshly issued session.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub access_token: String,
    pub identity: Identity,
}
