//! Business profile model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A registered business.
///
/// The `principal` is the subject of the caller's identity token; ownership
/// checks resolve a requester's principal to a business id and compare it
/// against the addressed resource's `business_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Business {
    /// Unique identifier for the business
    pub id: u64,

    /// Identity-token subject for the business owner
    pub principal: String,

    /// Display name of the business
    pub name: String,

    /// Timestamp when the business was registered (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the profile was last updated (UTC)
    pub updated_at: Timestamp,
}
