//! Field kernel: ship physics and the per-tick simulation driver.
//!
//! # Invariants
//! - A tick runs to completion before the next begins; no stage sees a half-updated frame.
//! - All randomness comes from one generator seeded by `FieldConfig::seed`.
//! - All state mutations flow through `Simulation::tick`.

mod player;
mod sim;

pub use player::Player;
pub use sim::{SimError, Simulation};

pub fn crate_info() -> &'static str {
    "asterfield-kernel v0.1.0"
}
