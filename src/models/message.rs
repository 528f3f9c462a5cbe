//! Messages returned by API endpoints that modify Pokemon.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Confirmation that an operation succeeded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "message": "Pokemon updated successfully." }))]
pub struct Confirmation {
    /// Human-readable confirmation message
    pub message: String,
}

impl Confirmation {
    /// Message returned when a Pokemon is updated.
    pub const UPDATED: &'static str = "Pokemon updated successfully.";

    /// Message returned when a Pokemon is deleted.
    pub const DELETED: &'static str = "Pokemon deleted successfully.";

    /// Creates a new [`Confirmation`] wrapping the given message.
    pub fn new<M>(message: M) -> Self
    where
        M: Into<String>,
    {
        Self { message: message.into() }
    }
}

/// Confirmation that a Pokemon was created, with its newly-assigned id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "message": "Pokemon created successfully.", "id": 152 }))]
pub struct Created {
    /// Human-readable confirmation message
    pub message: String,

    /// Id assigned to the new Pokemon
    pub id: i64,
}

impl Created {
    /// Message returned when a Pokemon is created.
    pub const MESSAGE: &'static str = "Pokemon created successfully.";

    /// Creates a new [`Created`] message for the given id.
    pub fn new(id: i64) -> Self {
        Self { message: Self::MESSAGE.into(), id }
    }
}
