//! Interactive session
//!
//! Drives the console loop: pick an input mode, read a command (typed or
//! recorded), hand it to the `Processor`, speak the replies and answer any
//! follow-up questions until the processor says to stop.

use crate::asr::Transcriber;
use crate::audio::{self, ClipSource};
use crate::input::InputMode;
use crate::processor::{Flow, Processor, Reply, Turn};
use crate::tts::Speaker;
use anyhow::Result;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{error, info, warn};

/// Microphone plus speech-to-text backend
pub struct VoiceCapture {
    pub recorder: Arc<dyn ClipSource>,
    pub transcriber: Arc<dyn Transcriber>,
}

pub struct Session<R> {
    processor: Processor,
    speaker: Speaker,
    input: R,
    capture: Option<VoiceCapture>,
}

impl<R: AsyncBufRead + Unpin> Session<R> {
    pub fn new(processor: Processor, speaker: Speaker, input: R) -> Self {
        Self {
            processor,
            speaker,
            input,
            capture: None,
        }
    }

    pub fn with_capture(mut self, capture: VoiceCapture) -> Self {
        self.capture = Some(capture);
        self
    }

    pub fn processor(&self) -> &Processor {
        &self.processor
    }

    async fn say(&self, text: &str) {
        self.speaker.respond(self.processor.voice(), text).await;
    }

    async fn render(&self, replies: &[Reply]) {
        for reply in replies {
            match reply {
                Reply::Say(text) => self.say(text).await,
                Reply::Print(text) => println!("{}", text),
            }
        }
    }

    /// Prompt on the console and read one line; None at end of input
    pub async fn read_line(&mut self, label: &str) -> Result<Option<String>> {
        print!("{}", label);
        std::io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Record one clip and transcribe it; failures are spoken and yield None
    pub async fn listen(&self) -> Option<String> {
        let Some(capture) = &self.capture else {
            warn!("Voice input requested without a microphone backend");
            self.say("Speech service unavailable.").await;
            return None;
        };

        self.say(&format!(
            "Recording for {} seconds...",
            capture.recorder.seconds()
        ))
        .await;
        let pcm = match capture.recorder.record().await {
            Ok(pcm) => pcm,
            Err(e) => {
                error!("record_audio error: {}", e);
                self.say("Recording failed. Check microphone permissions.")
                    .await;
                return None;
            }
        };
        self.say("Finished recording.").await;

        if audio::is_silent(&pcm) {
            info!("Clip was silent");
            self.say("I couldn't understand that audio.").await;
            return None;
        }

        match capture.transcriber.transcribe(&pcm).await {
            Ok(text) if text.trim().is_empty() => {
                self.say("I couldn't understand that audio.").await;
                None
            }
            Ok(text) => {
                println!("-> (speech->text): {}", text);
                Some(text.to_lowercase())
            }
            Err(e) => {
                error!("{} transcription failed: {}", capture.transcriber.name(), e);
                self.say("Speech service unavailable.").await;
                None
            }
        }
    }

    /// Answer a dialog question in the current mode; end of input answers ""
    pub async fn ask(&mut self, label: &str, mode: InputMode) -> Result<String> {
        let answer = match mode {
            InputMode::Voice => self.listen().await,
            InputMode::Text => self.read_line(label).await?,
        };
        Ok(answer.unwrap_or_default())
    }

    /// Run one command through to the end of its dialog
    pub async fn run_command(&mut self, command: &str, mode: InputMode) -> Result<Flow> {
        let mut turn: Turn = self.processor.process(command, mode).await;
        loop {
            self.render(&turn.replies).await;
            if turn.flow == Flow::Stop {
                return Ok(Flow::Stop);
            }
            let Some(field) = turn.prompt.take() else {
                return Ok(Flow::Continue);
            };
            let answer = self.ask(field.label, mode).await?;
            turn = self.processor.process(&answer, mode).await;
        }
    }

    /// The interactive loop
    pub async fn run(&mut self) -> Result<()> {
        self.say("Welcome, I'm LEXchat. Say 'voice' to use voice or 'text' to type commands.")
            .await;

        loop {
            let Some(choice) = self.read_line("Mode (voice/text/quit): ").await? else {
                break;
            };
            let choice = choice.trim().to_lowercase();
            if choice == "quit" || choice == "exit" {
                self.say("Goodbye Sirs or Madams 🫣. Take care!").await;
                break;
            }
            let Ok(mode) = choice.parse::<InputMode>() else {
                self.say("Please type 'voice' or 'text'.").await;
                continue;
            };

            let command = match mode {
                InputMode::Voice => self.listen().await,
                InputMode::Text => match self.read_line("Enter command: ").await? {
                    Some(line) => Some(line),
                    None => break,
                },
            };
            let Some(command) = command.filter(|c| !c.trim().is_empty()) else {
                continue;
            };

            if self.run_command(&command, mode).await? == Flow::Stop {
                break;
            }
        }

        self.finish().await;
        Ok(())
    }

    /// Report outstanding drawings before shutting down
    pub async fn finish(&mut self) {
        self.processor.cancel();
        let replies = self.processor.finish_drawings().await;
        self.render(&replies).await;
    }

    /// Ctrl-C path
    pub async fn interrupt(&mut self) {
        self.say("Interrupted. Goodbye.").await;
        self.finish().await;
    }
}
