//! Embedded templates
//!
//! Compiled into the binary from .hbs files at build time.

use eyre::{Result, eyre};
use handlebars::Handlebars;
use tracing::debug;

/// Generated package manifest
pub const CARGO_TOML: &str = include_str!("../../templates/cargo_toml.hbs");

/// Generated server entry point
pub const MAIN_RS: &str = include_str!("../../templates/main_rs.hbs");

pub const CARGO_TOML_NAME: &str = "cargo_toml";
pub const MAIN_RS_NAME: &str = "main_rs";

/// Build a registry holding every embedded template
///
/// HTML escaping is off: values are escaped for Rust or TOML before they
/// reach the template. Strict mode turns a missing field into an error.
pub fn registry() -> Result<Handlebars<'static>> {
    debug!("templates::registry: called");
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(handlebars::no_escape);
    hbs.set_strict_mode(true);
    hbs.register_template_string(CARGO_TOML_NAME, CARGO_TOML)
        .map_err(|e| eyre!("Failed to register template {}: {}", CARGO_TOML_NAME, e))?;
    hbs.register_template_string(MAIN_RS_NAME, MAIN_RS)
        .map_err(|e| eyre!("Failed to register template {}: {}", MAIN_RS_NAME, e))?;
    Ok(hbs)
}
