//! Helpers to validate Pokemon data.

use std::borrow::Cow;

use validator::ValidationError;

use crate::models::pokemon::PatchPokemon;

/// Validates that a [`PatchPokemon`] updates at least one field.
///
/// Field-level validations cannot detect this, since every field is optional. The error is
/// reported under the `__all__` key of the resulting [`ValidationErrors`](validator::ValidationErrors).
pub fn validate_patch_not_empty(patch_pokemon: &PatchPokemon) -> Result<(), ValidationError> {
    if patch_pokemon.is_empty() {
        let mut validation_error = ValidationError::new("empty_patch");
        validation_error.message = Some(Cow::from(
            "at least one of name, types, description or image must be specified",
        ));

        Err(validation_error)
    } else {
        Ok(())
    }
}
