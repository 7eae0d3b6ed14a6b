//! Ship controls: actions, input sources, per-tick control snapshots.
//!
//! # Invariants
//! - The simulation sees one `ControlState` per tick and nothing else from input.
//! - Key bindings belong to the window layer, not to this crate.

pub mod action;

pub use action::{Action, ActionState, ControlState, InputSource};

pub fn crate_info() -> &'static str {
    "asterfield-input v0.1.0"
}
