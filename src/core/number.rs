//! Spoken number parsing
//!
//! Turns free-form answers ("twenty one", "3.5", "one hundred and five",
//! "about 40 kg") into a numeric value. An unparseable answer is `None`,
//! never an error: callers choose their own default.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"[a-z]+|\d+(?:\.\d+)?|-|\.").expect("valid regex");
    static ref EMBEDDED_RE: Regex = Regex::new(r"[-+]?\d*\.?\d+").expect("valid regex");
}

/// Value of a number word below one hundred
fn small_number(word: &str) -> Option<f64> {
    let value = match word {
        "zero" => 0,
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "thirteen" => 13,
        "fourteen" => 14,
        "fifteen" => 15,
        "sixteen" => 16,
        "seventeen" => 17,
        "eighteen" => 18,
        "nineteen" => 19,
        "twenty" => 20,
        "thirty" => 30,
        "forty" => 40,
        "fifty" => 50,
        "sixty" => 60,
        "seventy" => 70,
        "eighty" => 80,
        "ninety" => 90,
        _ => return None,
    };
    Some(value as f64)
}

fn finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a number from spoken or typed text
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    if let Some(value) = finite(&text) {
        return Some(value);
    }

    let cleaned = text.replace(',', "");
    let mut total = 0.0;
    let mut current = 0.0;

    for token in TOKEN_RE.find_iter(&cleaned).map(|m| m.as_str()) {
        if token.starts_with(|c: char| c.is_ascii_digit()) {
            if let Some(value) = finite(token) {
                current += value;
            }
            continue;
        }

        match token {
            "and" => {}
            "hundred" => {
                current = if current == 0.0 { 1.0 } else { current } * 100.0;
            }
            "thousand" | "million" => {
                let scale = if token == "thousand" { 1_000.0 } else { 1_000_000.0 };
                total += if current == 0.0 { 1.0 } else { current } * scale;
                current = 0.0;
            }
            word => {
                if let Some(value) = small_number(word) {
                    current += value;
                } else if let Some(value) = finite(word) {
                    current += value;
                }
            }
        }
    }

    // A word total of zero falls through to the digit scan
    let value = total + current;
    if value != 0.0 {
        return Some(value);
    }

    EMBEDDED_RE
        .find(&text)
        .and_then(|m| finite(m.as_str()))
}
