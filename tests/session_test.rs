use lexchat::input::InputMode;
use lexchat::processor::Flow;
use lexchat::session::{Session, VoiceCapture};
use lexchat::tts::Speaker;
use lexchat::voice::VoiceMode;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;
use tokio_test::io::Builder;

mod common;
use common::mock_asr::MockTranscriber;
use common::mock_mic::MockMic;
use common::mock_tts::MockTts;
use common::TestContext;

fn speaker(tts: &MockTts) -> Speaker {
    Speaker::new(Arc::new(tts.clone())).with_pause(Duration::ZERO)
}

fn capture(mic: &Arc<MockMic>, asr: &Arc<MockTranscriber>) -> VoiceCapture {
    VoiceCapture {
        recorder: mic.clone(),
        transcriber: asr.clone(),
    }
}

#[tokio::test]
async fn test_scripted_text_session() {
    let ctx = TestContext::new();
    let tts = MockTts::new();
    let stdin = Builder::new()
        .read(b"text\n")
        .read(b"calculate\n")
        .read(b"add\n")
        .read(b"two\n")
        .read(b"3\n")
        .read(b"keyboard\n")
        .read(b"quit\n")
        .build();

    let mut session = Session::new(ctx.processor(), speaker(&tts), BufReader::new(stdin));
    session.run().await.unwrap();

    assert!(tts.was_spoken("Welcome, I'm LEXchat."));
    assert!(tts.was_spoken("Math mode."));
    assert!(tts.was_spoken("Result: 5"));
    assert!(tts.was_spoken("Please type 'voice' or 'text'."));
    assert!(tts.was_spoken("Goodbye Sirs or Madams"));
}

#[tokio::test]
async fn test_farewell_ends_session() {
    let ctx = TestContext::new();
    let tts = MockTts::new();
    let stdin = Builder::new()
        .read(b"text\n")
        .read(b"set voice to energetic\n")
        .read(b"text\n")
        .read(b"bye\n")
        .build();

    let mut session = Session::new(ctx.processor(), speaker(&tts), BufReader::new(stdin));
    session.run().await.unwrap();

    assert_eq!(tts.mode_for("Welcome"), Some(VoiceMode::Calm));
    assert_eq!(tts.mode_for("Voice mode set"), Some(VoiceMode::Energetic));
    assert_eq!(tts.mode_for("Goodbye Tester"), Some(VoiceMode::Energetic));
    assert!(!tts.was_spoken("Goodbye Sirs or Madams"));
}

#[tokio::test]
async fn test_end_of_input_stops_session() {
    let ctx = TestContext::new();
    let tts = MockTts::new();
    let stdin = Builder::new().read(b"text\n").build();

    let mut session = Session::new(ctx.processor(), speaker(&tts), BufReader::new(stdin));
    session.run().await.unwrap();

    assert_eq!(tts.get_spoken().len(), 1);
}

#[tokio::test]
async fn test_voice_without_microphone_backend() {
    let ctx = TestContext::new();
    let tts = MockTts::new();
    let stdin = Builder::new().read(b"voice\n").read(b"exit\n").build();

    let mut session = Session::new(ctx.processor(), speaker(&tts), BufReader::new(stdin));
    session.run().await.unwrap();

    assert!(tts.was_spoken("Speech service unavailable."));
    assert!(session.processor().history().load().unwrap().is_empty());
}

#[tokio::test]
async fn test_run_command_answers_dialog_from_input() {
    let ctx = TestContext::new();
    let tts = MockTts::new();
    let stdin = Builder::new()
        .read(b"star\n")
        .read(b"green\n")
        .read(b"twenty\n")
        .read(b"ten\n")
        .build();

    let mut session = Session::new(ctx.processor(), speaker(&tts), BufReader::new(stdin));
    let flow = session.run_command("draw", InputMode::Text).await.unwrap();
    assert_eq!(flow, Flow::Continue);
    assert!(tts.was_spoken("Okay, drawing star in green size 20 speed 10."));

    session.finish().await;
    assert!(tts.was_spoken("Drawing complete."));
}

#[tokio::test]
async fn test_tts_failures_do_not_stop_the_session() {
    let ctx = TestContext::new();
    let tts = MockTts::new();
    *tts.should_fail.lock().unwrap() = true;
    let stdin = Builder::new()
        .read(b"text\n")
        .read(b"tell me a joke\n")
        .read(b"quit\n")
        .build();

    let mut session = Session::new(ctx.processor(), speaker(&tts), BufReader::new(stdin));
    session.run().await.unwrap();

    assert!(tts.get_spoken().is_empty());
    assert_eq!(session.processor().history().load().unwrap().len(), 1);
}

#[tokio::test]
async fn test_voice_command_and_answers_come_from_speech() {
    let ctx = TestContext::new();
    let tts = MockTts::new();
    let mic = Arc::new(MockMic::speaking());
    let asr = Arc::new(MockTranscriber::new(&["Weight", "ten", "K"]));
    let stdin = Builder::new().read(b"voice\n").read(b"quit\n").build();

    let mut session = Session::new(ctx.processor(), speaker(&tts), BufReader::new(stdin))
        .with_capture(capture(&mic, &asr));
    session.run().await.unwrap();

    assert!(tts.was_spoken("Recording for 1 seconds..."));
    assert!(tts.was_spoken("22.05 pounds"));
    assert_eq!(mic.recordings(), 3);
    assert_eq!(asr.received.lock().unwrap().len(), 3);
    assert_eq!(session.processor().history().load().unwrap().len(), 1);
}

#[tokio::test]
async fn test_voice_answer_in_dialog_uses_speech() {
    let ctx = TestContext::new();
    let tts = MockTts::new();
    let mic = Arc::new(MockMic::speaking());
    let asr = Arc::new(MockTranscriber::new(&["add", "two", "three"]));
    let stdin = Builder::new().build();

    let mut session = Session::new(ctx.processor(), speaker(&tts), BufReader::new(stdin))
        .with_capture(capture(&mic, &asr));
    let flow = session.run_command("calculate", InputMode::Voice).await.unwrap();

    assert_eq!(flow, Flow::Continue);
    assert!(tts.was_spoken("Result: 5"));
    assert_eq!(session.ask("Operation: ", InputMode::Voice).await.unwrap(), "");
}

#[tokio::test]
async fn test_failing_transcriber_is_spoken() {
    let ctx = TestContext::new();
    let tts = MockTts::new();
    let mic = Arc::new(MockMic::speaking());
    let asr = Arc::new(MockTranscriber::failing());
    let stdin = Builder::new().read(b"voice\n").read(b"quit\n").build();

    let mut session = Session::new(ctx.processor(), speaker(&tts), BufReader::new(stdin))
        .with_capture(capture(&mic, &asr));
    session.run().await.unwrap();

    assert!(tts.was_spoken("Speech service unavailable."));
    assert!(tts.was_spoken("Goodbye Sirs or Madams"));
    assert!(session.processor().history().load().unwrap().is_empty());
}

#[tokio::test]
async fn test_silent_or_failed_recording_skips_transcription() {
    let ctx = TestContext::new();
    let tts = MockTts::new();
    let asr = Arc::new(MockTranscriber::new(&["joke"]));
    let session = Session::new(
        ctx.processor(),
        speaker(&tts),
        BufReader::new(Builder::new().build()),
    )
    .with_capture(capture(&Arc::new(MockMic::silent()), &asr));
    assert_eq!(session.listen().await, None);
    assert!(tts.was_spoken("I couldn't understand that audio."));

    let broken = Arc::new(MockMic {
        should_fail: true,
        ..MockMic::speaking()
    });
    let session = Session::new(
        ctx.processor(),
        speaker(&tts),
        BufReader::new(Builder::new().build()),
    )
    .with_capture(capture(&broken, &asr));
    assert_eq!(session.listen().await, None);
    assert!(tts.was_spoken("Recording failed. Check microphone permissions."));

    assert!(asr.received.lock().unwrap().is_empty());
}
