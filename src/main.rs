//! Main Pokemon API web application crate.
//!
//! This crate opens the Pokemon store, registers the API endpoints and starts handling
//! HTTP connections. All the actual implementation is in the [lib crate](pokemon_api).
//!
//! For more information, see `README.md`.

use std::sync::Arc;

use actix_web::{web, HttpResponse, HttpServer, Responder};
use anyhow::Context;
use env_logger::Env;
use log::info;
use pokemon_api::db::{get_backend, open_store};
use pokemon_api::helpers::env::{env_var_or, load_optional_dotenv, optional_int_env_var};
use pokemon_api::pokemon_api_app;
use pokemon_api::service_env::ServiceEnv;
use rustc_version_runtime::version;
use serde::Serialize;

/// Default address to bind to (see [`get_server_address`]).
const DEFAULT_HTTP_ADDR: &str = "127.0.0.1";

/// Default HTTP port used for the Pokemon API (see [`get_http_port`]).
const DEFAULT_HTTP_PORT: u16 = 3002;

/// Main program body.
///
/// Takes care of setting up the Pokemon API, then serves its endpoints over HTTP until the
/// server is stopped. The store is closed on the way out.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let env_file_loaded = load_optional_dotenv()?;

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if !env_file_loaded {
        info!(".env file not found; skipped");
    }

    let backend = get_backend().with_context(|| "failed to determine store backend")?;
    info!("Opening {} Pokemon store", backend);
    let store = open_store().with_context(|| "failed to open Pokemon store")?;

    let server_address = get_server_address()?;
    let http_port = get_http_port()?;

    info!("Starting Pokemon API HTTP server");
    let server = {
        let store = Arc::clone(&store);
        HttpServer::new(move || {
            pokemon_api_app!(Arc::clone(&store)).route("/", web::get().to(hello))
        })
        .bind((server_address.as_str(), http_port))
        .with_context(|| format!("failed to bind to {}:{}", server_address, http_port))?
        .run()
    };

    info!(
        "Pokemon API server started in {}! Listening on {}:{}.",
        ServiceEnv::current(),
        server_address,
        http_port
    );
    info!("Rust version used: {}", version());
    if ServiceEnv::current().is_development() {
        info!("Backtrace support: {}", get_backtrace_support());
    }

    let result = server.await;

    info!("Closing Pokemon store");
    store.close();

    Ok(result?)
}

/// Returns the address to bind to for the Pokemon API.
///
/// By default, the server binds to `127.0.0.1`, which works locally. When deploying in production
/// (or in a Docker container), set the `HTTP_ADDR` environment variable to `0.0.0.0`.
fn get_server_address() -> anyhow::Result<String> {
    env_var_or("HTTP_ADDR", DEFAULT_HTTP_ADDR)
        .with_context(|| "failed to parse content of HTTP_ADDR environment variable")
}

/// Returns the HTTP port to use for the Pokemon API.
///
/// By default, the server will listen on port 3002. To override this, set the `PORT`
/// environment variable to a different value.
fn get_http_port() -> anyhow::Result<u16> {
    Ok(optional_int_env_var("PORT")
        .with_context(|| "failed to parse content of PORT environment variable")?
        .unwrap_or(DEFAULT_HTTP_PORT))
}

/// Returns a string representing the status of [`Backtrace`](std::backtrace::Backtrace) support on this platform.
fn get_backtrace_support() -> &'static str {
    #[cfg(backtrace_support)]
    match std::backtrace::Backtrace::capture().status() {
        std::backtrace::BacktraceStatus::Captured => "supported",
        std::backtrace::BacktraceStatus::Disabled => "disabled",
        std::backtrace::BacktraceStatus::Unsupported => "unsupported",
        _ => "unknown (unrecognized enum value)",
    }

    #[cfg(not(backtrace_support))]
    "unsupported (not Nightly toolchain)"
}

/// Handler for the `/` endpoint. Simply returns a hello message.
///
/// Could be used as a healthcheck of sorts.
async fn hello() -> impl Responder {
    HttpResponse::Ok().json(Hello::default())
}

/// Data returned by the `/` endpoint (see [`Hello::default`]).
#[derive(Debug, Serialize)]
struct Hello {
    message: &'static str,
}

impl Default for Hello {
    /// Returns the data that will be returned by the `/` endpoint.
    fn default() -> Self {
        Self { message: "Hello from the Pokemon API!" }
    }
}
