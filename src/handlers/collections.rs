//! Example collections for the list / tuple / set walkthrough

use std::collections::BTreeSet;

/// Printable example for the requested collection type
pub fn example(kind: &str) -> Option<String> {
    match kind.trim().to_lowercase().as_str() {
        "list" => Some(format!("{:?}", vec!["apple", "banana", "orange", "mango"])),
        "tuple" => Some(format!("{:?}", ("dog", "cat", "bird", "gorilla"))),
        "set" => {
            let cars: BTreeSet<&str> = ["toyota", "bmw", "rolls royce", "land rover"]
                .into_iter()
                .collect();
            Some(format!("{:?}", cars))
        }
        _ => None,
    }
}
