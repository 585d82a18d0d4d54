//! Fixed reply tables: jokes, facts, emoji and the help listing

use rand::seq::SliceRandom;

pub const JOKES: &[&str] = &[
    "Why did the computer go to the doctor? It caught a virus!",
    "Why was the math book sad? It had too many problems.",
    "Why don't scientists trust atoms? Because they make up everything!",
    "Why did the programmer quit the job? Because they didn't get arrays.",
    "Why was the cell phone wearing glasses? It lost its contacts!",
    "Why did the AI go to school? To improve its neural network!",
    "Why did the cookie go to the hospital? Because it felt crummy!",
    "Why did the computer sneeze? It caught a flu bug!",
    "Why do programmers prefer dark mode? Because light attracts bugs!",
    "Why was the JavaScript developer sad? They didn't Node how to Express themselves!",
    "Why did the computer break up with the internet? There was too much buffering!",
    "Why don't robots get tired? They recharge!",
    "Why did the robot go on vacation? It needed to unwind!",
    "Why was the computer cold? It left its Windows open!",
    "Why did the AI cross the road? To optimize the other side!",
    "Why do computers love coffee? Because it helps them process!",
    "Why did the function stop calling itself? It had a stack overflow!",
    "Why do Python programmers wear glasses? Because they can't C!",
    "Why did the neural network go to therapy? Too many layers of problems!",
];

pub const FUN_FACTS: &[&str] = &[
    "Honey never spoils.",
    "Octopuses have three hearts.",
    "Smiling can actually improve your mood.",
    "Bananas are berries; strawberries are not.",
    "There are more stars than grains of sand on Earth.",
    "Water can boil and freeze at once under special conditions.",
    "Wombat poop is cube-shaped.",
    "Sloths can hold their breath longer than dolphins.",
    "A day on Venus is longer than a year on Venus.",
    "Pineapples take two years to grow.",
];

pub const EMOJIS: &[&str] = &[
    "😜", "🔥", "💡", "🎨", "⚡", "🌟", "🧠", "😂", "😇", "🤩", "🚀", "🎯", "🎶", "🕹️", "📘",
    "🐍", "💻", "🎲", "💬", "✨", "❤️", "🦾", "🌈", "📡", "🧩", "🎁", "🔮",
];

pub const COMMANDS_HELP: &[&str] = &[
    "search — search the web",
    "last search — show last search",
    "code — generate code (python/html/js) & explain",
    "draw / turtle — draw shapes (square, circle, triangle, star, heart, spiral, polygon:n, flower:n)",
    "joke — tell a joke",
    "fact — tell a fun fact",
    "time — tell current time",
    "math / calc — calculator, factorial, sqrt, prime check",
    "story — build a short story",
    "weight / temperature — unit conversions",
    "game — rock-paper-scissors",
    "lists/tuples/sets — show examples and help",
    "set voice — change voice to calm/balanced/energetic",
    "history — show recent actions",
    "help — show this list",
    "exit / quit — exit program",
];

fn pick(items: &[&'static str]) -> &'static str {
    items.choose(&mut rand::thread_rng()).copied().unwrap_or("")
}

pub fn emoji() -> &'static str {
    pick(EMOJIS)
}

pub fn joke() -> String {
    format!("{} {}", pick(JOKES), emoji())
}

pub fn fact() -> String {
    format!("{} {}", pick(FUN_FACTS), emoji())
}

pub fn greeting(name: &str) -> String {
    let variants = [
        format!("Hello {} {}", name, emoji()),
        format!("Hi {}, ready when you are!", name),
        "Hey, what shall we do today?".to_string(),
    ];
    variants
        .choose(&mut rand::thread_rng())
        .cloned()
        .unwrap_or_default()
}

pub fn farewell(name: &str) -> String {
    format!("Goodbye {}. Take care!", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joke_comes_from_table() {
        let joke = joke();
        assert!(JOKES.iter().any(|j| joke.starts_with(j)));
    }

    #[test]
    fn test_fact_comes_from_table() {
        let fact = fact();
        assert!(FUN_FACTS.iter().any(|f| fact.starts_with(f)));
    }

    #[test]
    fn test_greeting_variants() {
        for _ in 0..20 {
            let g = greeting("Ada");
            assert!(g.contains("Ada") || g.starts_with("Hey"));
        }
    }
}
