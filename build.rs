//! Pokemon API build script.

use rustc_version::version_meta;
use rustc_version::Channel::Nightly;

#[doc(hidden)]
fn main() {
    // Migrations are embedded in the `run_migrations` binary, one set per backend.
    println!("cargo:rerun-if-changed=migrations/mysql");
    println!("cargo:rerun-if-changed=migrations/postgres");

    // Backtrace exists in stable, but to use it with std::error::Error,
    // we need to be on the Nightly channel at least.
    if version_meta().unwrap().channel <= Nightly {
        println!("cargo:rustc-cfg=backtrace_support");
    }
}
