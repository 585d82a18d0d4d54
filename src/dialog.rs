//! Follow-up dialogs
//!
//! Handlers that need more input than the command itself carry a `Dialog`:
//! an ordered list of fields answered one turn at a time. Fields may depend
//! on earlier answers (the calculator asks for one or two operands, code
//! generation only asks for a file name when saving). A front end asks the
//! field returned by `next_field`, feeds the reply to `answer`, and repeats
//! until no field is left.

use crate::core::parse_number;
use crate::handlers::calc::Operation;
use crate::handlers::game::Choice;

/// One question in a dialog
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Stable key for the answer
    pub key: &'static str,
    /// Spoken before asking, if any
    pub question: Option<String>,
    /// Console prompt
    pub label: &'static str,
}

impl Field {
    fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            question: None,
            label,
        }
    }

    fn asking(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }
}

/// Why a dialog stopped early
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    VoiceMode,
    Search,
    Draw,
    Code,
    Math,
    Story,
    Weight,
    Temperature,
    Game,
    ListType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dialog {
    kind: DialogKind,
    answers: Vec<String>,
    /// File name offered when a code snippet is saved
    suggestion: Option<String>,
}

impl Dialog {
    pub fn new(kind: DialogKind) -> Self {
        Self {
            kind,
            answers: Vec::new(),
            suggestion: None,
        }
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Answer at `index`, or "" when absent
    pub fn get(&self, index: usize) -> &str {
        self.answers.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    pub fn set_suggestion(&mut self, name: impl Into<String>) {
        self.suggestion = Some(name.into());
    }

    pub fn is_complete(&self) -> bool {
        self.next_field().is_none()
    }

    /// The next field to ask, or None once every field is answered
    pub fn next_field(&self) -> Option<Field> {
        let step = self.answers.len();
        let field = match (self.kind, step) {
            (DialogKind::VoiceMode, 0) => Field::new("mode", "Mode: ")
                .asking("Which mode: calm, balanced, or energetic?"),

            (DialogKind::Search, 0) => {
                Field::new("query", "Search query: ").asking("What should I search for?")
            }

            (DialogKind::Draw, 0) => Field::new("shape", "Shape: ").asking(
                "Which shape would you like? (square, circle, triangle, star, heart, spiral, polygon:n, flower:n)",
            ),
            (DialogKind::Draw, 1) => Field::new("color", "Color: ").asking("What color?"),
            (DialogKind::Draw, 2) => {
                Field::new("size", "Size: ").asking("What size? (say a number)")
            }
            (DialogKind::Draw, 3) => {
                Field::new("speed", "Speed: ").asking("What speed? (1 slow - 10 fast)")
            }

            (DialogKind::Code, 0) => Field::new("language", "Language: ")
                .asking("Which language? Python, HTML, or JavaScript?"),
            (DialogKind::Code, 1) => Field::new("kind", "Kind: ")
                .asking("What kind of snippet? e.g., function, loop, basic, alert, class, form"),
            (DialogKind::Code, 2) => Field::new("save", "Save? (yes/no): ")
                .asking("Do you want me to save the snippet? say yes or no."),
            (DialogKind::Code, 3) if self.wants_save() => {
                let field = Field::new("filename", "Filename (or enter to accept): ");
                match &self.suggestion {
                    Some(name) => field.asking(format!("Say filename or I will save as {}.", name)),
                    None => field,
                }
            }

            (DialogKind::Math, 0) => Field::new("operation", "Operation: ").asking(
                "Math mode. Say operation: add, subtract, multiply, divide, power, factorial, sqrt, prime",
            ),
            (DialogKind::Math, 1) if self.math_arity() == 1 => Field::new("value", "Number: "),
            (DialogKind::Math, 1) => Field::new("first", "First number: "),
            (DialogKind::Math, 2) if self.math_arity() == 2 => {
                Field::new("second", "Second number: ")
            }

            (DialogKind::Story, 0) => Field::new("verb", "Verb: ")
                .asking("Let's make a short story! Give me a verb, a noun, and an adjective."),
            (DialogKind::Story, 1) => Field::new("noun", "Noun: "),
            (DialogKind::Story, 2) => Field::new("adjective", "Adjective: "),

            (DialogKind::Weight, 0) => Field::new("value", "Enter weight: "),
            (DialogKind::Weight, 1) => Field::new("unit", "Unit (K for kg / L for lbs): "),

            (DialogKind::Temperature, 0) => Field::new("value", "Enter temperature: "),
            (DialogKind::Temperature, 1) => Field::new("unit", "Unit (C/F): "),

            (DialogKind::Game, 0) => Field::new("choice", "Your choice: ")
                .asking("Let's play rock, paper, scissors! Say rock, paper, or scissors."),

            (DialogKind::ListType, 0) => {
                Field::new("type", "Type: ").asking("Which type? list, tuple, or set?")
            }

            _ => return None,
        };
        Some(field)
    }

    /// Record the answer to the current field
    ///
    /// A rejection ends the dialog; the message explains why.
    pub fn answer(&mut self, text: &str) -> Result<(), Rejection> {
        let Some(field) = self.next_field() else {
            return Err(Rejection("Nothing left to answer.".to_string()));
        };
        let text = text.trim();

        match (self.kind, field.key) {
            (DialogKind::Weight, "value") if parse_number(text).is_none() => {
                return Err(Rejection("Couldn't parse weight.".to_string()));
            }
            (DialogKind::Temperature, "value") if parse_number(text).is_none() => {
                return Err(Rejection("Couldn't parse temperature.".to_string()));
            }
            (DialogKind::Game, "choice") if text.parse::<Choice>().is_err() => {
                return Err(Rejection(
                    "I only play rock, paper, or scissors.".to_string(),
                ));
            }
            _ => {}
        }

        self.answers.push(text.to_string());
        Ok(())
    }

    fn wants_save(&self) -> bool {
        self.get(2).to_lowercase().starts_with('y')
    }

    /// Operand count for the chosen operation; unknown operations take two
    fn math_arity(&self) -> usize {
        self.get(0)
            .parse::<Operation>()
            .map(|op| op.arity())
            .unwrap_or(2)
    }
}
