//! Command handlers
//!
//! Pure helpers behind each intent. None of them perform I/O; the processor
//! turns their results into replies.

pub mod calc;
pub mod codegen;
pub mod collections;
pub mod convert;
pub mod game;
pub mod phrases;
pub mod story;
