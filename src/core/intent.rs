//! Intent resolution
//!
//! Maps a normalized utterance to one of a closed set of intents. Keywords are
//! matched by containment in a fixed priority order; the first rule that
//! matches wins, so an utterance carrying several keywords always resolves the
//! same way. Only when nothing matches is the fuzzy vocabulary consulted.

use crate::utils::fuzzy::find_best_match;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use tracing::debug;

/// Minimum similarity for the fuzzy fallback
pub const FUZZY_CUTOFF: f64 = 0.45;

/// Labels the fuzzy fallback can resolve to
pub const INTENT_VOCABULARY: &[&str] = &[
    "search",
    "last search",
    "code",
    "draw",
    "joke",
    "fact",
    "time",
    "math",
    "story",
    "game",
    "help",
    "set voice",
    "history",
    "lists",
    "exit",
    "quit",
];

const FAREWELLS: &[&str] = &["exit", "quit", "goodbye", "bye"];
const CALCULATOR: &[&str] = &[
    "calc",
    "calculator",
    "math",
    "compute",
    "factorial",
    "sqrt",
    "prime",
];
const COLLECTIONS: &[&str] = &["list", "tuple", "set"];

lazy_static! {
    // Whole words only: "hi" must not fire inside "history" or "this"
    static ref GREETING_RE: Regex =
        Regex::new(r"\b(?:hello|hi|hey|good morning|good evening)\b").expect("valid regex");
}

/// Command category selected from an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Empty,
    Greeting,
    Exit,
    Help,
    SetVoice,
    Time,
    History,
    Joke,
    Fact,
    Search,
    LastSearch,
    Draw,
    Code,
    Math,
    Story,
    Weight,
    Temperature,
    Game,
    ListTypes,
    Unknown,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Empty => "empty",
            Intent::Greeting => "greeting",
            Intent::Exit => "exit",
            Intent::Help => "help",
            Intent::SetVoice => "set-voice",
            Intent::Time => "time",
            Intent::History => "history",
            Intent::Joke => "joke",
            Intent::Fact => "fact",
            Intent::Search => "search",
            Intent::LastSearch => "last-search",
            Intent::Draw => "draw",
            Intent::Code => "code",
            Intent::Math => "math",
            Intent::Story => "story",
            Intent::Weight => "weight",
            Intent::Temperature => "temperature",
            Intent::Game => "game",
            Intent::ListTypes => "list-types",
            Intent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of resolving an utterance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub intent: Intent,
    /// Vocabulary label chosen by the fuzzy fallback, if it was used
    pub suggestion: Option<&'static str>,
}

/// Lower-case and trim raw input
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

fn is_voice_command(text: &str) -> bool {
    text.contains("set voice")
        || text.starts_with("voice mode")
        || (text.contains("voice") && text.contains("set"))
}

/// Keyword rules only, in priority order
fn match_keywords(text: &str) -> Option<Intent> {
    let intent = if text.is_empty() {
        Intent::Empty
    } else if GREETING_RE.is_match(text) {
        Intent::Greeting
    } else if contains_any(text, FAREWELLS) {
        Intent::Exit
    } else if text.contains("help") || text.contains("commands") {
        Intent::Help
    } else if is_voice_command(text) {
        Intent::SetVoice
    } else if text.contains("time") {
        Intent::Time
    } else if text.contains("history") {
        Intent::History
    } else if text.contains("joke") {
        Intent::Joke
    } else if text.contains("fact") {
        Intent::Fact
    } else if text.contains("last search") {
        Intent::LastSearch
    } else if text.contains("search") {
        Intent::Search
    } else if text.contains("draw") || text.contains("turtle") {
        Intent::Draw
    } else if text.contains("code") {
        Intent::Code
    } else if contains_any(text, CALCULATOR) {
        Intent::Math
    } else if text.contains("story") {
        Intent::Story
    } else if text.contains("weight") {
        Intent::Weight
    } else if text.contains("temp") {
        Intent::Temperature
    } else if text.contains("game") || text.contains("rps") || text.contains("rock") {
        Intent::Game
    } else if contains_any(text, COLLECTIONS) {
        Intent::ListTypes
    } else {
        return None;
    };
    Some(intent)
}

/// Resolve an utterance, reporting whether the fuzzy fallback was needed
pub fn resolve(utterance: &str) -> Resolution {
    let text = normalize(utterance);

    if let Some(intent) = match_keywords(&text) {
        return Resolution {
            intent,
            suggestion: None,
        };
    }

    if let Some(best) = find_best_match(&text, INTENT_VOCABULARY, FUZZY_CUTOFF) {
        debug!("Fuzzy match '{}' -> '{}' ({:.2})", text, best.value, best.score);
        // Every vocabulary label carries its own keyword
        let intent = match_keywords(best.value).unwrap_or(Intent::Unknown);
        return Resolution {
            intent,
            suggestion: Some(best.value),
        };
    }

    Resolution {
        intent: Intent::Unknown,
        suggestion: None,
    }
}

/// Resolve an utterance to its intent
pub fn resolve_intent(utterance: &str) -> Intent {
    resolve(utterance).intent
}

/// Pull the requested mode out of a "set voice ..." utterance
pub fn extract_voice_mode(utterance: &str) -> Option<String> {
    let text = normalize(utterance);
    let stripped = text
        .replace("set voice to", " ")
        .replace("set voice", " ")
        .replace("voice mode", " ");

    stripped
        .split_whitespace()
        .find(|word| !matches!(*word, "set" | "voice" | "mode" | "to"))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_keywords() {
        assert_eq!(resolve_intent("tell me a joke"), Intent::Joke);
        assert_eq!(resolve_intent("a fun fact please"), Intent::Fact);
        assert_eq!(resolve_intent("what time is it"), Intent::Time);
        assert_eq!(resolve_intent("show history"), Intent::History);
        assert_eq!(resolve_intent("search"), Intent::Search);
        assert_eq!(resolve_intent("show last search"), Intent::LastSearch);
        assert_eq!(resolve_intent("turtle"), Intent::Draw);
        assert_eq!(resolve_intent("generate code"), Intent::Code);
        assert_eq!(resolve_intent("square root with sqrt"), Intent::Math);
        assert_eq!(resolve_intent("tell a story"), Intent::Story);
        assert_eq!(resolve_intent("convert weight"), Intent::Weight);
        assert_eq!(resolve_intent("temperature"), Intent::Temperature);
        assert_eq!(resolve_intent("rps"), Intent::Game);
        assert_eq!(resolve_intent("tuples"), Intent::ListTypes);
        assert_eq!(resolve_intent("commands"), Intent::Help);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(resolve_intent(""), Intent::Empty);
        assert_eq!(resolve_intent("   "), Intent::Empty);
    }

    #[test]
    fn test_input_is_normalized() {
        assert_eq!(resolve_intent("  TELL ME A JOKE  "), Intent::Joke);
    }

    #[test]
    fn test_greeting_wins_over_other_keywords() {
        assert_eq!(resolve_intent("hello tell me a joke"), Intent::Greeting);
        assert_eq!(resolve_intent("hi bye"), Intent::Greeting);
        assert_eq!(resolve_intent("good morning what time is it"), Intent::Greeting);
        assert_eq!(resolve_intent("hey, search something"), Intent::Greeting);
    }

    #[test]
    fn test_greeting_needs_whole_word() {
        assert_eq!(resolve_intent("history"), Intent::History);
        assert_eq!(resolve_intent("this is goodbye"), Intent::Exit);
    }

    #[test]
    fn test_farewells() {
        for text in ["bye", "goodbye now", "quit", "exit please", "ok bye then"] {
            assert_eq!(resolve_intent(text), Intent::Exit, "{}", text);
        }
    }

    #[test]
    fn test_priority_order() {
        // farewell beats help
        assert_eq!(resolve_intent("help me quit"), Intent::Exit);
        // time beats joke
        assert_eq!(resolve_intent("joke about time"), Intent::Time);
        // last search is distinguished from search
        assert_eq!(resolve_intent("last search"), Intent::LastSearch);
        // voice settings beat the "set" collection keyword
        assert_eq!(resolve_intent("set voice to calm"), Intent::SetVoice);
        assert_eq!(resolve_intent("voice mode energetic"), Intent::SetVoice);
        // weight before temperature
        assert_eq!(resolve_intent("weight and temperature"), Intent::Weight);
    }

    #[test]
    fn test_fuzzy_fallback() {
        let resolution = resolve("jok");
        assert_eq!(resolution.intent, Intent::Joke);
        assert_eq!(resolution.suggestion, Some("joke"));

        assert_eq!(resolve_intent("storie"), Intent::Story);
        assert_eq!(resolve_intent("histroy"), Intent::History);
    }

    #[test]
    fn test_fuzzy_miss_is_unknown() {
        let resolution = resolve("zzzzzzzzzz");
        assert_eq!(resolution.intent, Intent::Unknown);
        assert_eq!(resolution.suggestion, None);
    }

    #[test]
    fn test_vocabulary_labels_resolve_directly() {
        for label in INTENT_VOCABULARY {
            let resolution = resolve(label);
            assert_ne!(resolution.intent, Intent::Unknown, "{}", label);
            assert_eq!(resolution.suggestion, None, "{}", label);
        }
    }

    #[test]
    fn test_extract_voice_mode() {
        assert_eq!(extract_voice_mode("set voice to calm"), Some("calm".into()));
        assert_eq!(extract_voice_mode("set voice energetic"), Some("energetic".into()));
        assert_eq!(extract_voice_mode("voice mode balanced"), Some("balanced".into()));
        assert_eq!(extract_voice_mode("set the voice"), Some("the".into()));
        assert_eq!(extract_voice_mode("set voice"), None);
    }
}
