//! Command Processor
//!
//! Turns one line of input into a `Turn`: the replies to speak or print, an
//! optional follow-up question, and whether the session should go on.
//! Handlers that need more input open a `Dialog`; while one is pending the
//! next input is taken as its answer instead of a new command.

use crate::config::Config;
use crate::core::intent::{extract_voice_mode, normalize};
use crate::core::{parse_number, resolve, Intent};
use crate::dialog::{Dialog, DialogKind, Field, Rejection};
use crate::draw::{DrawRequest, DrawTicket, Painter, Shape};
use crate::error::LexResult;
use crate::handlers::calc::{self, Number, Operation};
use crate::handlers::game::{self, Choice, GameResult};
use crate::handlers::{codegen, collections, convert, phrases, story};
use crate::history::{Action, HistoryStore, RECENT_SHOWN};
use crate::input::InputMode;
use crate::search::{filter_results, LastSearchStore, WebSearch};
use crate::utils::truncate_chars;
use crate::voice::{VoiceMode, VoiceProfile};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const DEFAULT_SIZE: u32 = 100;
const DEFAULT_SPEED: u32 = 5;
const PRINTED_SNIPPET: usize = 300;
const SPOKEN_SNIPPET: usize = 220;

/// One piece of output
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Printed and spoken
    Say(String),
    /// Console only
    Print(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Say(text) | Reply::Print(text) => text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Flow {
    #[default]
    Continue,
    Stop,
}

/// Result of processing one input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Turn {
    pub replies: Vec<Reply>,
    /// Question still waiting for an answer
    pub prompt: Option<Field>,
    pub flow: Flow,
}

impl Turn {
    fn say(&mut self, text: impl Into<String>) {
        self.replies.push(Reply::Say(text.into()));
    }

    fn print(&mut self, text: impl Into<String>) {
        self.replies.push(Reply::Print(text.into()));
    }

    /// Concatenated reply text, for logs and assertions
    pub fn transcript(&self) -> String {
        self.replies
            .iter()
            .map(Reply::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub struct Processor {
    user_name: String,
    default_voice: VoiceMode,
    voice: VoiceProfile,
    history: HistoryStore,
    last_search: LastSearchStore,
    search: Arc<dyn WebSearch>,
    search_limit: usize,
    painter: Painter,
    snippets_dir: PathBuf,
    pending: Option<Dialog>,
    drawings: Vec<DrawTicket>,
    next_draw_id: u64,
}

impl Processor {
    pub fn new(config: &Config, search: Arc<dyn WebSearch>) -> Self {
        Self {
            user_name: config.user_name.clone(),
            default_voice: config.default_voice_mode,
            voice: VoiceProfile::for_mode(config.default_voice_mode),
            history: HistoryStore::new(config.history_path(), config.history_limit),
            last_search: LastSearchStore::new(config.last_search_path()),
            search,
            search_limit: config.search_results,
            painter: Painter::new(config.drawings_dir()),
            snippets_dir: config.snippets_dir(),
            pending: None,
            drawings: Vec::new(),
            next_draw_id: 1,
        }
    }

    /// Active voice profile
    pub fn voice(&self) -> &VoiceProfile {
        &self.voice
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn has_pending_dialog(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any half-answered dialog
    pub fn cancel(&mut self) {
        if let Some(dialog) = self.pending.take() {
            debug!("Cancelled {:?} dialog", dialog.kind());
        }
    }

    /// Process one line of input
    pub async fn process(&mut self, text: &str, mode: InputMode) -> Turn {
        let mut turn = Turn {
            replies: self.poll_drawings().await,
            ..Turn::default()
        };

        match self.pending.take() {
            Some(dialog) => self.continue_dialog(dialog, text, &mut turn).await,
            None => self.dispatch(text, mode, &mut turn).await,
        }
        turn
    }

    async fn dispatch(&mut self, text: &str, mode: InputMode, turn: &mut Turn) {
        let cmd = normalize(text);
        if cmd.is_empty() {
            return;
        }

        info!("Command ({}): '{}'", mode, cmd);
        self.history.record(Action::Command {
            cmd: cmd.clone(),
            mode: mode.to_string(),
        });

        let resolution = resolve(&cmd);
        if let Some(label) = resolution.suggestion {
            turn.say(format!("It sounds like you meant: {}. I'll try that.", label));
        }
        let source = resolution.suggestion.unwrap_or(cmd.as_str());
        debug!("Resolved '{}' -> {}", cmd, resolution.intent);

        match resolution.intent {
            Intent::Empty => {}
            Intent::Greeting => turn.say(phrases::greeting(&self.user_name)),
            Intent::Exit => {
                turn.say(phrases::farewell(&self.user_name));
                turn.flow = Flow::Stop;
            }
            Intent::Help => {
                turn.say("Here are things you can ask me. I'll also print them to console.");
                for line in phrases::COMMANDS_HELP {
                    turn.print(format!("- {}", line));
                }
            }
            Intent::SetVoice => match extract_voice_mode(source) {
                Some(token) => self.set_voice(&token, turn),
                None => self.open(DialogKind::VoiceMode, turn),
            },
            Intent::Time => {
                let now = chrono::Local::now().format("%H:%M:%S");
                turn.say(format!("The current time is {} {}", now, phrases::emoji()));
            }
            Intent::History => self.show_history(turn),
            Intent::Joke => turn.say(phrases::joke()),
            Intent::Fact => turn.say(phrases::fact()),
            Intent::LastSearch => self.show_last_search(turn),
            Intent::Search => self.open(DialogKind::Search, turn),
            Intent::Draw => self.open(DialogKind::Draw, turn),
            Intent::Code => self.open(DialogKind::Code, turn),
            Intent::Math => self.open(DialogKind::Math, turn),
            Intent::Story => self.open(DialogKind::Story, turn),
            Intent::Weight => self.open(DialogKind::Weight, turn),
            Intent::Temperature => self.open(DialogKind::Temperature, turn),
            Intent::Game => self.open(DialogKind::Game, turn),
            Intent::ListTypes => self.open(DialogKind::ListType, turn),
            Intent::Unknown => {
                turn.say("Sorry, I didn't quite catch that. Say 'help' to hear commands.")
            }
        }
    }

    fn open(&mut self, kind: DialogKind, turn: &mut Turn) {
        self.ask(Dialog::new(kind), turn);
    }

    /// Queue the dialog's next question
    fn ask(&mut self, dialog: Dialog, turn: &mut Turn) {
        if let Some(field) = dialog.next_field() {
            if let Some(question) = &field.question {
                turn.say(question.clone());
            }
            turn.prompt = Some(field);
            self.pending = Some(dialog);
        }
    }

    async fn continue_dialog(&mut self, mut dialog: Dialog, text: &str, turn: &mut Turn) {
        if let Err(Rejection(message)) = dialog.answer(text) {
            debug!("{:?} dialog ended: {}", dialog.kind(), message);
            turn.say(message);
            return;
        }

        if dialog.kind() == DialogKind::Code
            && dialog.answers().len() == 3
            && dialog.suggestion().is_none()
        {
            let name =
                codegen::suggested_filename(dialog.get(0), chrono::Utc::now().timestamp());
            dialog.set_suggestion(name);
        }

        if dialog.is_complete() {
            self.complete(dialog, turn).await;
        } else {
            self.ask(dialog, turn);
        }
    }

    async fn complete(&mut self, dialog: Dialog, turn: &mut Turn) {
        match dialog.kind() {
            DialogKind::VoiceMode => {
                let chosen = dialog
                    .get(0)
                    .split_whitespace()
                    .next()
                    .map(str::to_string)
                    .unwrap_or_else(|| self.default_voice.to_string());
                self.set_voice(&chosen, turn);
            }
            DialogKind::Search => {
                let query = dialog.get(0);
                if !query.is_empty() {
                    self.run_search(query, turn).await;
                }
            }
            DialogKind::Draw => self.start_drawing(&dialog, turn),
            DialogKind::Code => self.write_code(&dialog, turn),
            DialogKind::Math => turn.say(calculate(&dialog)),
            DialogKind::Story => {
                let words = [dialog.get(0), dialog.get(1), dialog.get(2)];
                turn.say(story::build_story(words[0], words[1], words[2]));
                self.history.record(Action::Story {
                    words: words.iter().map(|w| w.to_string()).collect(),
                });
            }
            DialogKind::Weight => {
                if let Some(value) = parse_number(dialog.get(0)) {
                    turn.say(convert::convert_weight(value, dialog.get(1)));
                }
            }
            DialogKind::Temperature => {
                if let Some(value) = parse_number(dialog.get(0)) {
                    turn.say(convert::convert_temperature(value, dialog.get(1)));
                }
            }
            DialogKind::Game => {
                if let Ok(player) = dialog.get(0).parse::<Choice>() {
                    let opponent = Choice::random();
                    turn.say(format!("I choose {}.", opponent));
                    turn.say(match game::play(player, opponent) {
                        GameResult::Tie => "It's a tie!",
                        GameResult::Win => "You win! 🎉",
                        GameResult::Loss => "I win! 😜",
                    });
                }
            }
            DialogKind::ListType => match collections::example(dialog.get(0)) {
                Some(example) => turn.print(example),
                None => turn.say("Unknown type."),
            },
        }
    }

    fn set_voice(&mut self, token: &str, turn: &mut Turn) {
        match token.parse::<VoiceMode>() {
            Ok(mode) => {
                self.voice = VoiceProfile::for_mode(mode);
                info!("🔊 Voice mode set to {}", mode);
                turn.say(format!("Voice mode set to {}.", mode));
            }
            Err(e) => {
                debug!("{}", e);
                turn.say("I only know calm, balanced, or energetic.");
            }
        }
    }

    fn show_history(&self, turn: &mut Turn) {
        match self.history.recent(RECENT_SHOWN) {
            Ok((0, _)) => turn.say("No history found."),
            Ok((total, entries)) => {
                turn.say(format!(
                    "I have {} history entries. Showing last {}.",
                    total, RECENT_SHOWN
                ));
                for entry in entries {
                    match serde_json::to_string(&entry) {
                        Ok(line) => turn.print(line),
                        Err(e) => warn!("Could not format history entry: {}", e),
                    }
                }
            }
            Err(e) => {
                warn!("Could not read history: {}", e);
                turn.say("No history found.");
            }
        }
    }

    fn show_last_search(&self, turn: &mut Turn) {
        match self.last_search.load() {
            Ok(Some(results)) => {
                turn.say("Here are your last saved search results:");
                for result in results {
                    turn.print(format!("\n📰 {}", result.title));
                    turn.print(format!("🔗 {}", result.link));
                    turn.print(format!(
                        "📄 {}",
                        result.snippet.chars().take(PRINTED_SNIPPET).collect::<String>()
                    ));
                }
            }
            Ok(None) => turn.say("No previous searches saved."),
            Err(e) => {
                warn!("Could not read last search: {}", e);
                turn.say("No previous searches saved.");
            }
        }
    }

    async fn run_search(&self, query: &str, turn: &mut Turn) {
        turn.say(format!("Searching the web for {} 🔍", query));

        let results = match self.search.search(query).await {
            Ok(results) => filter_results(results, self.search_limit),
            Err(e) => {
                error!("search_web error ({}): {}", self.search.name(), e);
                turn.say("Search failed due to an error.");
                return;
            }
        };
        info!("🔍 {} results for '{}'", results.len(), query);

        if let Err(e) = self.last_search.save(&results) {
            warn!("could not save last search: {}", e);
        }

        for result in &results {
            let title = if result.title.is_empty() {
                "Untitled result"
            } else {
                &result.title
            };
            turn.print(format!("\n📰 {}", title));
            turn.print(format!("🔗 {}", result.link));
            turn.print(format!("📄 {}", truncate_chars(&result.snippet, PRINTED_SNIPPET)));
            turn.say(title);
            if !result.snippet.is_empty() {
                turn.say(truncate_chars(&result.snippet, SPOKEN_SNIPPET));
            }
        }
        turn.say("Search results complete.");
        self.history.record(Action::Search {
            query: query.to_string(),
        });
    }

    fn start_drawing(&mut self, dialog: &Dialog, turn: &mut Turn) {
        let shape_text = non_empty(dialog.get(0), "square");
        let color = non_empty(dialog.get(1), "blue").to_string();
        let size = positive(dialog.get(2)).unwrap_or(DEFAULT_SIZE);
        let speed = positive(dialog.get(3)).unwrap_or(DEFAULT_SPEED);

        let shape = match shape_text.parse::<Shape>() {
            Ok(shape) => shape,
            Err(e) => {
                debug!("Rejected shape '{}': {}", shape_text, e);
                turn.say(e.to_string());
                return;
            }
        };

        turn.say(format!(
            "Okay, drawing {} in {} size {} speed {}.",
            shape, color, size, speed
        ));

        let request = DrawRequest {
            id: self.next_draw_id,
            shape,
            color: color.clone(),
            size,
            speed,
        };
        self.next_draw_id += 1;
        self.drawings.push(self.painter.submit(request));

        self.history.record(Action::Draw {
            shape: shape.to_string(),
            color,
            size,
            speed,
        });
    }

    fn write_code(&self, dialog: &Dialog, turn: &mut Turn) {
        let language = non_empty(dialog.get(0), "python").to_lowercase();
        let kind = non_empty(dialog.get(1), "function").to_lowercase();
        let snippet = codegen::generate(&language, &kind);

        turn.say("I generated the snippet and will explain it briefly.");
        turn.print(format!("\n--- CODE ---\n{}", snippet.code));
        turn.say(snippet.explanation);

        let wants_save = dialog.get(2).to_lowercase().starts_with('y');
        let mut file = None;
        if wants_save {
            let name = match dialog.get(3) {
                "" => dialog.suggestion().unwrap_or("snippet.txt").to_string(),
                given => given.to_string(),
            };
            match save_snippet(&self.snippets_dir, &name, snippet.code) {
                Ok(path) => {
                    turn.say(format!("Saved snippet to {}.", path.display()));
                    file = Some(path.display().to_string());
                }
                Err(e) => {
                    error!("save snippet error: {}", e);
                    turn.say("Failed to save snippet.");
                    return;
                }
            }
        }

        self.history.record(Action::Code {
            lang: language,
            kind,
            file,
        });
    }

    /// Report drawings that finished since the last turn
    pub async fn poll_drawings(&mut self) -> Vec<Reply> {
        let (done, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.drawings)
            .into_iter()
            .partition(DrawTicket::is_finished);
        self.drawings = pending;

        let mut replies = Vec::new();
        for ticket in done {
            replies.push(drawing_outcome(ticket).await);
        }
        replies
    }

    /// Wait for every outstanding drawing
    pub async fn finish_drawings(&mut self) -> Vec<Reply> {
        let mut replies = Vec::new();
        for ticket in std::mem::take(&mut self.drawings) {
            replies.push(drawing_outcome(ticket).await);
        }
        replies
    }
}

async fn drawing_outcome(ticket: DrawTicket) -> Reply {
    let (request, result) = ticket.wait().await;
    match result {
        Ok(path) => {
            info!("🎨 Drawing {} saved to {}", request.id, path.display());
            Reply::Say(format!("Drawing complete. Saved to {}.", path.display()))
        }
        Err(e) => {
            error!("Drawing {} ({}) failed: {}", request.id, request.shape, e);
            Reply::Say("Drawing failed due to an error.".to_string())
        }
    }
}

fn non_empty<'a>(text: &'a str, fallback: &'a str) -> &'a str {
    if text.trim().is_empty() {
        fallback
    } else {
        text
    }
}

/// Whole positive number spoken or typed in `text`
fn positive(text: &str) -> Option<u32> {
    parse_number(text)
        .filter(|v| *v >= 1.0)
        .map(|v| v.min(u32::MAX as f64) as u32)
}

fn save_snippet(dir: &Path, name: &str, code: &str) -> LexResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(name);
    std::fs::write(&path, code)?;
    Ok(path)
}

/// Evaluate a completed math dialog into its reply
fn calculate(dialog: &Dialog) -> String {
    let op_text = dialog.get(0);
    let op = op_text.parse::<Operation>();

    if matches!(op, Ok(op) if op.arity() == 1) {
        let Some(value) = parse_number(dialog.get(1)) else {
            return "Couldn't parse that number.".to_string();
        };
        let n = value as i64;
        return match op {
            Ok(Operation::Factorial) => match calc::factorial(n) {
                Ok(result) => format!("Factorial of {} is {}", n, result),
                Err(e) => e.to_string(),
            },
            Ok(Operation::Prime) => {
                let verdict = if calc::is_prime(n) { "a prime" } else { "not a prime" };
                format!("{} is {}.", n, verdict)
            }
            _ => match calc::square_root(value) {
                Ok(root) => format!("Square root of {} is {}", Number(value), Number(root)),
                Err(e) => e.to_string(),
            },
        };
    }

    let (Some(a), Some(b)) = (parse_number(dialog.get(1)), parse_number(dialog.get(2))) else {
        return "Couldn't parse numbers.".to_string();
    };
    match op.and_then(|op| calc::apply_binary(op, a, b)) {
        Ok(result) => format!("Result: {}", Number(result)),
        Err(e) => e.to_string(),
    }
}
