//! Account-related domain events.

use serde::{Deserialize, Serialize};

/// Events related to account lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AccountEvent {
    /// An account was removed; dependent files should be cleaned up.
    Deleted {
        /// The external account id.
        user_id: String,
        /// The username.
        username: String,
    },
}
