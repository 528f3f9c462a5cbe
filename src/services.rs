//! Services implementing the business logic of the Pokemon API.

pub mod pokemon;
