//! Types and functions to implement proper error handling in the Pokemon API.

use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use diesel::result::DatabaseErrorKind;
use log::{error, trace};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TryFromInto};
use utoipa::{ToResponse, ToSchema};
use validator::ValidationErrors;

use crate::error::InputError;
use crate::helpers::error::recursive_error_message;
use crate::service_env::ServiceEnv;
use crate::Error;

/// Message returned when a Pokemon cannot be found.
pub const NOT_FOUND_MESSAGE: &str = "Pokemon not found.";

/// Message returned when a Pokemon name is already used by another Pokemon.
pub const CONFLICT_MESSAGE: &str = "A Pokemon with this name already exists.";

/// Message returned for server errors that are not related to a specific store operation.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

/// Message returned when no endpoint matches the method and path of a request.
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Resource not found.";

impl ResponseError for Error {
    /// Returns the [`StatusCode`] to use for this [`Error`].
    ///
    /// This function does the actual mapping between our internal errors and the resulting
    /// external HTTP [`StatusCode`].
    fn status_code(&self) -> StatusCode {
        let status_code = match self {
            Error::Input { .. } => Some(StatusCode::BAD_REQUEST),
            Error::Query { source, .. } => status_code_for_query_error(source),
            _ => None,
        };

        status_code.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Returns an appropriate [`HttpResponse`] to return when a REST API error occurs.
    ///
    /// Uses the context of this [`Error`] to craft the response (see [`ErrorResponse::from`]).
    /// Server errors are logged along with their whole chain of causes, since the response
    /// only contains a generic message.
    fn error_response(&self) -> HttpResponse<BoxBody> {
        let error_response: ErrorResponse = self.into();
        if error_response.status_code.is_server_error() {
            error!("{}", recursive_error_message(self));
        }

        HttpResponse::build(error_response.status_code).json(error_response)
    }
}

/// Helper function to get a [`StatusCode`] for a [query error](diesel::result::Error).
///
/// If the error is due to the request itself (like [`NotFound`](diesel::result::Error::NotFound)),
/// this method will return `Some` with an appropriate HTTP status code (like [`NOT_FOUND`](StatusCode::NOT_FOUND)).
/// Otherwise, it will return `None` and the caller can decide what status code to use.
pub fn status_code_for_query_error(error: &diesel::result::Error) -> Option<StatusCode> {
    match error {
        diesel::result::Error::NotFound => Some(StatusCode::NOT_FOUND),
        diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            Some(StatusCode::CONFLICT)
        },
        _ => None,
    }
}

#[cfg_attr(
    doc,
    doc = r"
        Struct used to return error information as JSON in [`HttpResponse`]s.

        # Notes

        The [`internal_error`](ErrorResponse::internal_error) field will only
        be populated when running in a [`Development`] environment (see [`ErrorResponse::from`]).

        [`Development`]: ServiceEnv::Development
    "
)]
#[cfg_attr(not(doc), doc = "Pokemon API error information")]
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, ToResponse)]
#[response(
    description = "Server error",
    example = json!({
        "status_code": 500,
        "error": "Failed to fetch Pokemon."
    }),
)]
pub struct ErrorResponse {
    /// HTTP status code
    #[serde_as(as = "TryFromInto<u16>")]
    #[schema(
        value_type = u16,
        minimum = 100,
        maximum = 999,
    )]
    pub status_code: StatusCode,

    /// Error message
    pub error: String,

    /// More details, when appropriate (like for deserialization or validation errors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    #[cfg_attr(
        doc,
        doc = r"
            Description of the internal error

            Only present when server is running in a [`Development`] environment.

            [`Development`]: ServiceEnv::Development
        "
    )]
    #[cfg_attr(
        not(doc),
        doc = "Description of the internal error (when server is running in development)"
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_error: Option<String>,
}

impl From<&Error> for ErrorResponse {
    /// Creates an [`ErrorResponse`] for an internal [`Error`].
    ///
    /// # Service environment
    ///
    /// Unless we run in a [`Development`] environment, the response will not include any
    /// information about the cause of a server error. In [`Development`], the
    /// [`internal_error`](ErrorResponse#structfield.internal_error) field contains the whole chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use actix_web::http::StatusCode;
    /// use pokemon_api::api::errors::ErrorResponse;
    /// use pokemon_api::error::{Operation, QueryContext};
    ///
    /// let error = diesel::result::Error::NotFound
    ///     .with_query_context(Operation::Fetch, || "failed to fetch pokemon with id 151");
    ///
    /// let error_response: ErrorResponse = (&error).into();
    ///
    /// assert_eq!(StatusCode::NOT_FOUND, error_response.status_code);
    /// assert_eq!("Pokemon not found.", error_response.error);
    /// ```
    ///
    /// [`Development`]: ServiceEnv::Development
    fn from(value: &Error) -> Self {
        Self {
            status_code: value.status_code(),
            error: Self::generate_message(value).into(),
            details: Self::generate_details(value),
            internal_error: Self::generate_internal_error(value),
        }
    }
}

impl ErrorResponse {
    /// Returns the value to use for the [`error`](ErrorResponse::error) field.
    ///
    /// This message never contains information about the internal cause of the error.
    fn generate_message(error: &Error) -> &'static str {
        match error {
            Error::Input { source, .. } => input_error_message(source),
            Error::Query { source, operation, .. } => match status_code_for_query_error(source) {
                Some(StatusCode::NOT_FOUND) => NOT_FOUND_MESSAGE,
                Some(StatusCode::CONFLICT) => CONFLICT_MESSAGE,
                _ => operation.failure_message(),
            },
            Error::EnvVar { .. } | Error::Pool { .. } => INTERNAL_ERROR_MESSAGE,
        }
    }

    /// Returns the value to use for the [`details`](ErrorResponse::details) field.
    ///
    /// This will return a value for input errors, so that user can know what to fix.
    fn generate_details(error: &Error) -> Option<String> {
        match error {
            Error::Input { source, .. } => Some(source.to_string()),
            _ => None,
        }
    }

    /// Returns the value to use for the [`internal_error`](ErrorResponse::internal_error) field.
    ///
    /// This will return `None` except when running in [`Development`](ServiceEnv::Development)
    /// environment (see [`from`](ErrorResponse::from)).
    fn generate_internal_error(error: &Error) -> Option<String> {
        if ServiceEnv::current().is_development() {
            Some(recursive_error_message(error))
        } else {
            None
        }
    }
}

/// Message returned when a path parameter cannot be parsed or is out of range.
const INVALID_PATH_PARAM_MESSAGE: &str = "Invalid path parameter.";

/// Returns the message describing an [`InputError`].
fn input_error_message(error: &InputError) -> &'static str {
    match error {
        InputError::Json(_) => "Invalid request body.",
        InputError::Path(_) => INVALID_PATH_PARAM_MESSAGE,
        InputError::Validation(errors) if errors.errors().contains_key("id") => {
            INVALID_PATH_PARAM_MESSAGE
        },
        InputError::Validation(errors) if is_empty_patch(errors) => "No fields to update.",
        InputError::Validation(_) => "All specified fields are required and must not be empty.",
    }
}

/// Returns `true` if the validation failed because an update did not specify any field.
fn is_empty_patch(errors: &ValidationErrors) -> bool {
    errors.errors().contains_key("__all__")
}

/// Default service used for requests that match no endpoint.
///
/// Returns a `404 Not Found` carrying an [`ErrorResponse`], like the errors of the endpoints
/// themselves, instead of `actix_web`'s empty response.
pub async fn route_not_found(req: HttpRequest) -> HttpResponse {
    trace!("No endpoint for {} {}", req.method(), req.path());

    HttpResponse::NotFound().json(ErrorResponse {
        status_code: StatusCode::NOT_FOUND,
        error: ROUTE_NOT_FOUND_MESSAGE.into(),
        details: None,
        internal_error: None,
    })
}

/// Generic error handler for `actix_web`'s various configs.
///
/// This handler accepts any type of error that can be turned into our [`Error`] type, then turns
/// that into an [`actix_web::error::Error`]. Since [`ResponseError`] is implemented for our
/// [`Error`] type, errors occurring before handlers are called (like [`JsonPayloadError`]s)
/// produce the same kind of responses as errors returned by handlers.
///
/// # Examples
///
/// ```no_run
/// use actix_web::web::{JsonConfig, PathConfig};
/// use pokemon_api::api::errors::actix_error_handler;
///
/// let json_config = JsonConfig::default().error_handler(actix_error_handler);
/// let path_config = PathConfig::default().error_handler(actix_error_handler);
/// ```
///
/// [`JsonPayloadError`]: actix_web::error::JsonPayloadError
pub fn actix_error_handler<E, R>(err: E, _req: &R) -> actix_web::error::Error
where
    E: Into<Error>,
{
    Into::<Error>::into(err).into()
}
