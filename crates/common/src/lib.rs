//! Shared types for the asteroid field: rectangles, colors, field configuration.
//!
//! # Invariants
//! - Every component receives its constants through `FieldConfig`; nothing
//!   reads process-wide globals.

mod config;
mod types;

pub use config::{ConfigError, FieldConfig, GridConfig, MAX_ASTEROID_LAYER, PlayerTuning};
pub use types::{Color, Rect};

pub fn crate_info() -> &'static str {
    "asterfield-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
