//! Input modes
//!
//! Commands and dialog answers arrive either typed on the console or
//! recorded from the microphone.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Voice,
    Text,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Voice => "voice",
            InputMode::Text => "text",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "voice" => Ok(InputMode::Voice),
            "text" => Ok(InputMode::Text),
            _ => Err(()),
        }
    }
}
