//! Models used by the service, both for the store and for the API.

pub mod message;
pub mod pokemon;
