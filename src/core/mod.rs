//! Core processing modules
//!
//! Contains intent resolution and spoken number parsing.

pub mod intent;
pub mod number;

pub use intent::{resolve, resolve_intent, Intent, Resolution};
pub use number::parse_number;
