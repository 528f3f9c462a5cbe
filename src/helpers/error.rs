//! Helpers related to generation of error messages.

use std::error::Error as StdError;

/// Builds a message describing an error and its whole chain of [`source`]s.
///
/// Each source is appended on its own line, prefixed with `caused by: `. When backtrace
/// support is available (see [`backtrace_message`]), the error's backtrace is appended too.
///
/// Used to log store failures, whose cause is never returned to API callers.
///
/// [`source`]: std::error::Error::source
#[cfg(not(tarpaulin_include))]
pub fn recursive_error_message<E>(error: &E) -> String
where
    E: StdError,
{
    let mut message = error.to_string();

    let mut current: &dyn StdError = error;
    while let Some(source) = current.source() {
        message.push_str("\ncaused by: ");
        message.push_str(&source.to_string());
        current = source;
    }

    if let Some(backtrace) = backtrace_message(error) {
        message.push_str("\n\nBacktrace: ");
        message.push_str(&backtrace);
    }

    message
}

/// Returns the [`Backtrace`](std::backtrace::Backtrace) attached to an error, if any, as a string.
///
/// Requires a Nightly toolchain; the `backtrace_support` config is set by the build script.
#[cfg(not(tarpaulin_include))]
#[cfg(backtrace_support)]
pub fn backtrace_message<E>(error: &E) -> Option<String>
where
    E: StdError,
{
    std::error::request_ref::<std::backtrace::Backtrace>(error)
        .map(|backtrace| format!("{:#}", backtrace))
}

#[cfg(not(tarpaulin_include))]
#[cfg(not(backtrace_support))]
#[doc(hidden)]
pub fn backtrace_message<E>(_error: &E) -> Option<String>
where
    E: StdError,
{
    None
}
