//! LEXchat Library
//!
//! Core modules for the LEXchat voice/text assistant.

pub mod asr;
pub mod audio;
pub mod config;
pub mod core;
pub mod dialog;
pub mod draw;
pub mod error;
pub mod handlers;
pub mod history;
pub mod input;
pub mod processor;
pub mod search;
pub mod session;
pub mod tts;
pub mod utils;
pub mod voice;
