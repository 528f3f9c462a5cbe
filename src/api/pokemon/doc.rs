//! [`IntoResponses`] wrappers for Pokemon REST API endpoints.
//!
//! These helper types are used to document the possible API responses using [`utoipa::path`].

use utoipa::IntoResponses;

use crate::api::errors::ErrorResponse;

/// [`IntoResponses`] wrapper for bad `id` path parameter errors.
#[derive(Debug, IntoResponses)]
#[response(status = BAD_REQUEST, description = "Invalid value for id path parameter")]
pub struct InvalidIdParamResponse(ErrorResponse);

/// [`IntoResponses`] wrapper for bad Pokemon request body errors.
#[derive(Debug, IntoResponses)]
#[response(
    status = BAD_REQUEST,
    description = "Missing or empty Pokemon fields in request body",
)]
pub struct InvalidPokemonBodyResponse(ErrorResponse);

/// [`IntoResponses`] wrapper for bad `id` path parameter OR bad Pokemon request body errors.
#[derive(Debug, IntoResponses)]
#[response(
    status = BAD_REQUEST,
    description = "Invalid value for id path parameter OR empty update in request body",
)]
pub struct InvalidIdParamOrPokemonBodyResponse(ErrorResponse);

/// [`IntoResponses`] wrapper for bad Pokemon patch request body errors.
#[derive(Debug, IntoResponses)]
#[response(status = BAD_REQUEST, description = "Empty update in request body")]
pub struct InvalidPatchBodyResponse(ErrorResponse);

/// [`IntoResponses`] wrapper for `Pokemon not found` errors.
#[derive(Debug, IntoResponses)]
#[response(status = NOT_FOUND, description = "Requested Pokemon not found")]
pub struct NotFoundResponse(ErrorResponse);

/// [`IntoResponses`] wrapper for duplicate Pokemon name errors.
#[derive(Debug, IntoResponses)]
#[response(status = CONFLICT, description = "A Pokemon with this name already exists")]
pub struct NameConflictResponse(ErrorResponse);

/// [`IntoResponses`] wrapper for internal server errors.
///
/// Can be used to document 5XX API error responses using [`utoipa::path`].
#[derive(Debug, IntoResponses)]
#[response(status = "5XX")]
pub struct ServerErrorResponse(#[to_response] ErrorResponse);
