//! Code snippet templates
//!
//! A handful of canned snippets per language, each with a one-line
//! explanation that is spoken after the code is printed.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
    Html,
    JavaScript,
    Unsupported,
}

impl Language {
    pub fn parse(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "" | "python" | "py" => Language::Python,
            "html" | "htm" => Language::Html,
            "javascript" | "js" => Language::JavaScript,
            _ => Language::Unsupported,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Language::Python => "py",
            Language::Html => "html",
            Language::JavaScript => "js",
            Language::Unsupported => "txt",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub language: Language,
    pub code: &'static str,
    pub explanation: &'static str,
}

impl Snippet {
    pub fn extension(&self) -> &'static str {
        self.language.extension()
    }
}

fn python(kind: &str) -> (&'static str, &'static str) {
    match kind {
        "function" => (
            "def greet(name):\n    \"\"\"Greet someone by name.\"\"\"\n    print(f\"Hello, {name}!\")\n",
            "Defines a function named greet that accepts one parameter name and prints a greeting.",
        ),
        "loop" => (
            "for i in range(5):\n    print(i)\n",
            "A for-loop printing numbers from 0 to 4.",
        ),
        "class" => (
            "class Person:\n    def __init__(self, name):\n        self.name = name\n\n    def greet(self):\n        print(f\"Hello, {self.name}!\")\n",
            "Defines a Person class with constructor and a greet method.",
        ),
        "file" => (
            "with open('data.txt','w') as f:\n    f.write('Hello world')\n",
            "Writes Hello world to a file named data.txt using a context manager.",
        ),
        _ => ("# Unknown python snippet", "Unknown snippet kind."),
    }
}

fn html(kind: &str) -> (&'static str, &'static str) {
    match kind {
        "basic" => (
            "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset='utf-8'>\n  <title>My Page</title>\n</head>\n<body>\n  <h1>Hello world</h1>\n</body>\n</html>\n",
            "A minimal HTML page with a heading.",
        ),
        "form" => (
            "<form action='#' method='post'>\n  <label for='name'>Name:</label>\n  <input id='name' name='name' type='text'>\n  <button type='submit'>Send</button>\n</form>\n",
            "A simple HTML form for user input.",
        ),
        _ => ("<!-- Unknown HTML snippet -->", "Unknown HTML snippet."),
    }
}

fn javascript(kind: &str) -> (&'static str, &'static str) {
    match kind {
        "console" => (
            "for (let i = 0; i < 5; i++) {\n  console.log(i);\n}\n",
            "Logs numbers 0 to 4 to the browser console.",
        ),
        "alert" => (
            "alert('Hello world!');\n",
            "Shows an alert popup in the browser.",
        ),
        _ => ("// Unknown JS snippet", "Unknown JS snippet."),
    }
}

/// Look up the snippet for a language and kind; empty kind means "function"
pub fn generate(language: &str, kind: &str) -> Snippet {
    let language = Language::parse(language);
    let kind = match kind.trim().to_lowercase() {
        k if k.is_empty() => "function".to_string(),
        k => k,
    };

    let (code, explanation) = match language {
        Language::Python => python(&kind),
        Language::Html => html(&kind),
        Language::JavaScript => javascript(&kind),
        Language::Unsupported => ("// Language not supported", "Language unsupported."),
    };

    Snippet {
        language,
        code,
        explanation,
    }
}

/// Default file name offered when saving a snippet
pub fn suggested_filename(language: &str, unix_time: i64) -> String {
    let label = match language.trim().to_lowercase() {
        l if l.is_empty() => "python".to_string(),
        l => l.split_whitespace().collect::<Vec<_>>().join("_"),
    };
    format!(
        "snippet_{}_{}.{}",
        label,
        unix_time,
        Language::parse(language).extension()
    )
}
