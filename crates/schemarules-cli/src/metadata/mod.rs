//! Live database connections for schema introspection.
//!
//! The core providers own the catalog SQL; this module only supplies a
//! [`schemarules_core::CatalogConnection`] backed by an `sqlx` pool.

#[cfg(feature = "metadata-provider")]
mod sqlx_catalog;

#[cfg(feature = "metadata-provider")]
pub use sqlx_catalog::SqlxCatalog;

/// Rewrites URL schemes `sqlx` does not register (`mariadb://`, `pgsql://`)
/// to the equivalent one it does.
pub fn normalize_url(url: &str) -> String {
    const ALIASES: &[(&str, &str)] = &[("mariadb://", "mysql://"), ("pgsql://", "postgres://")];

    for (alias, scheme) in ALIASES {
        if let Some(rest) = url.strip_prefix(alias) {
            return format!("{scheme}{rest}");
        }
    }
    url.to_string()
}
