//! Package identity.

/// Name of this package.
pub const PACKAGE: &str = env!("CARGO_PKG_NAME");

/// Version of this package.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version shown by programs that do not declare their own.
#[must_use]
pub fn placeholder_version() -> String {
    format!("_._._ ({PACKAGE} {VERSION})")
}
