/*
 * @file assistant.rs
 * @brief Implementation of Karibu's interactive chat runtime
 * @author Kevin Thomas
 * @date 2025
 *
 * MIT License
 *
 * Copyright (c) 2025 Kevin Thomas
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Chat assistant orchestration module.
//!
//! Drives the session from language choice through the listen/respond loop
//! to the farewell, in either text or voice mode.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::ai::{ChatModel, ChatSession, GeminiClient};
use crate::catalog::{Catalog, LanguageCode};
use crate::config::{self, AppConfig, SetupError};
use crate::console::{self, Console};
use crate::phrases::{Phrase, PhraseBook};
use crate::resolver;
use crate::speech::Voice;
use crate::translate::{GoogleTranslator, TranslationBridge};

/// First line printed on startup.
pub const BANNER: &str = "Karibu! Welcome to the Multilingual Chat System";

/// Inputs that end the conversation, compared after trimming and lowercasing.
pub const EXIT_PHRASES: [&str; 3] = ["quit", "exit", "bye"];

/// Printed when the mode answer is neither `1` nor `2`.
pub const INVALID_MODE_MESSAGE: &str = "Invalid choice. Please enter 1 or 2.";

/// How the user talks to the assistant for the whole session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatMode {
    /// Typed input, printed output.
    Text,
    /// Spoken input, printed and spoken output.
    Voice,
}

impl ChatMode {
    /// Maps the menu answer (`"1"` or `"2"`) to a mode.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Self::Text),
            "2" => Some(Self::Voice),
            _ => None,
        }
    }
}

/// Where the runtime currently is in the session lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Asking for the preferred language.
    ChooseLanguage,
    /// Asking for text or voice mode.
    ChooseMode,
    /// Creating the model and speech services.
    Setup,
    /// Showing the welcome message.
    Greet,
    /// Waiting for the next user turn.
    Listen,
    /// Producing a reply to the last turn.
    Respond,
    /// Showing the goodbye message.
    Farewell,
    /// The session has ended normally.
    Terminated,
}

/// Services created during setup, once the mode is known.
pub struct Backends {
    /// The generative model answering every turn.
    pub model: Box<dyn ChatModel>,
    /// Speech I/O; required in voice mode, ignored in text mode.
    pub voice: Option<Voice>,
}

/// Runs the interactive assistant on the terminal until the user exits.
///
/// # Details
/// Loads configuration, wires the Google-backed services and drives the
/// session. Fatal errors (setup failures, closed input) are reported on the
/// console and end the run normally.
///
/// # Returns
/// Always `Ok(())`; failures are reported rather than propagated.
pub async fn run_chat_assistant() -> Result<()> {
    let config = config::load_app_config();
    let outcome = start(&config).await;
    report_outcome(outcome, &mut io::stdout())
}

/// Reports how a session ended.
///
/// # Details
/// A failed session is printed as `Fatal error: {err}` on `out`. The run
/// still counts as finished, so the process exits with status 0.
///
/// # Returns
/// Always `Ok(())`.
pub fn report_outcome<W: Write>(outcome: Result<()>, out: &mut W) -> Result<()> {
    if let Err(err) = outcome {
        let message = format!("{:#}", err);
        debug!(error = %message, "session ended with a fatal error");
        if let Err(write_err) = writeln!(out, "Fatal error: {}", message) {
            debug!(error = %write_err, "could not print fatal error");
        }
    }
    Ok(())
}

/// Builds the terminal runtime and runs one session.
async fn start(config: &AppConfig) -> Result<()> {
    let client = config::http_client()?;
    let translator = GoogleTranslator::new(client.clone(), config.translate_base_url.clone());
    let mut runtime = ChatRuntime::new(
        Catalog::builtin(),
        PhraseBook::builtin(),
        console::stdio(),
        TranslationBridge::new(Box::new(translator)),
    );
    runtime
        .run(|mode| connect_google(client, config, mode))
        .await
}

/// Creates the Gemini model and, for voice mode, the speech services.
///
/// # Errors
/// Returns a [`SetupError`] if the credential is missing.
pub fn connect_google(
    client: reqwest::Client,
    config: &AppConfig,
    mode: ChatMode,
) -> Result<Backends, SetupError> {
    let model = GeminiClient::from_config(client.clone(), config)?;
    let voice = match mode {
        ChatMode::Voice => Some(Voice::from_config(client, config)?),
        ChatMode::Text => None,
    };
    Ok(Backends {
        model: Box::new(model),
        voice,
    })
}

/// Determines whether the user asked to end the conversation.
///
/// # Details
/// The whole utterance must be one of [`EXIT_PHRASES`]; "goodbye" or
/// "please quit" keep the conversation going.
pub fn is_exit_phrase(user_text: &str) -> bool {
    let normalized = user_text.trim().to_lowercase();
    EXIT_PHRASES.contains(&normalized.as_str())
}

/// Session driver owning the console and the translation bridge.
///
/// # Details
/// Generic over the console streams so the full session can be scripted in
/// tests.
pub struct ChatRuntime<R, W> {
    catalog: Catalog,
    phrases: PhraseBook,
    console: Console<R, W>,
    bridge: TranslationBridge,
    stage: Stage,
}

impl<R: BufRead, W: Write> ChatRuntime<R, W> {
    /// Creates a runtime ready to choose a language.
    pub fn new(
        catalog: Catalog,
        phrases: PhraseBook,
        console: Console<R, W>,
        bridge: TranslationBridge,
    ) -> Self {
        Self {
            catalog,
            phrases,
            console,
            bridge,
            stage: Stage::ChooseLanguage,
        }
    }

    /// Returns the lifecycle stage reached so far.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns the console, mainly so tests can inspect the transcript.
    pub fn console(&self) -> &Console<R, W> {
        &self.console
    }

    /// Runs one full session.
    ///
    /// # Arguments
    /// * `connect` - Creates the model (and voice services) once the mode is known.
    ///
    /// # Returns
    /// `Ok(())` after the farewell.
    ///
    /// # Errors
    /// Propagates setup failures and console errors, including closed input.
    pub async fn run<F>(&mut self, connect: F) -> Result<()>
    where
        F: FnOnce(ChatMode) -> Result<Backends, SetupError>,
    {
        self.console.say(BANNER)?;
        self.console.say("")?;
        self.console.say(&self.catalog.render_listing())?;

        let language = resolver::resolve(&self.catalog, &mut self.console)?;

        self.stage = Stage::ChooseMode;
        let mode = self.choose_mode(&language).await?;

        self.stage = Stage::Setup;
        let backends = connect(mode).context("Error setting up chat services")?;
        let voice = match mode {
            ChatMode::Voice => Some(
                backends
                    .voice
                    .context("Voice mode selected but no speech services are available")?,
            ),
            ChatMode::Text => None,
        };
        let mut session = ChatSession::initialize(backends.model, language);
        info!(language = %language, ?mode, "chat session ready");

        self.stage = Stage::Greet;
        let welcome = self.phrase(&language, Phrase::Welcome).await;
        self.respond(&welcome, voice.as_ref(), &language).await?;

        while self.process_iteration(&mut session, voice.as_ref()).await? {}
        self.stage = Stage::Terminated;
        info!(turns = session.history().len(), "chat session ended");
        Ok(())
    }

    /// Asks for text or voice mode until a valid answer arrives.
    async fn choose_mode(&mut self, language: &LanguageCode) -> Result<ChatMode> {
        let prompt = self.phrase(language, Phrase::ChooseFormat).await;
        loop {
            self.console.say("")?;
            self.console.say(&prompt)?;
            let choice = self.console.require_line()?;
            if let Some(mode) = ChatMode::from_choice(&choice) {
                info!(?mode, "chat mode selected");
                return Ok(mode);
            }
            self.console.say(INVALID_MODE_MESSAGE)?;
        }
    }

    /// Executes one listen-respond iteration.
    ///
    /// # Returns
    /// * `Ok(true)` to keep looping, `Ok(false)` after the farewell.
    async fn process_iteration(
        &mut self,
        session: &mut ChatSession,
        voice: Option<&Voice>,
    ) -> Result<bool> {
        let language = session.language();
        self.stage = Stage::Listen;
        let user_input = match self.listen(voice, &language).await? {
            Some(text) if !text.is_empty() => text,
            _ => return Ok(true),
        };

        if is_exit_phrase(&user_input) {
            self.stage = Stage::Farewell;
            let goodbye = self.phrase(&language, Phrase::Goodbye).await;
            self.respond(&goodbye, voice, &language).await?;
            return Ok(false);
        }

        self.stage = Stage::Respond;
        let response = session.converse(&self.bridge, &user_input).await;
        self.respond(&response, voice, &language).await?;
        Ok(true)
    }

    /// Reads one user turn from the keyboard or the microphone.
    ///
    /// # Returns
    /// * `Ok(Some(text))` - Trimmed input (may be empty in text mode).
    /// * `Ok(None)` - Voice recognition failed; the diagnostic was printed.
    async fn listen(
        &mut self,
        voice: Option<&Voice>,
        language: &LanguageCode,
    ) -> Result<Option<String>> {
        let Some(voice) = voice else {
            self.console.say("")?;
            self.console.prompt("You: ")?;
            return self.console.require_line().map(Some);
        };

        self.console.say("")?;
        self.console.say("Listening...")?;
        match voice.listen(language).await {
            Ok(text) => {
                let text = text.trim().to_string();
                if !text.is_empty() {
                    self.console.say("")?;
                    self.console.say(&format!("You said: {}", text))?;
                }
                Ok(Some(text))
            }
            Err(err) => {
                self.console.say(&err.to_string())?;
                Ok(None)
            }
        }
    }

    /// Prints a bot message and, in voice mode, speaks it.
    async fn respond(
        &mut self,
        text: &str,
        voice: Option<&Voice>,
        language: &LanguageCode,
    ) -> Result<()> {
        self.console.say("")?;
        self.console.say(&format!("Bot: {}", text))?;
        if let Some(voice) = voice {
            voice.speak(text, language).await;
        }
        Ok(())
    }

    /// Returns a canned phrase, or the English text rendered for `language`.
    async fn phrase(&self, language: &LanguageCode, phrase: Phrase) -> String {
        match self.phrases.canned(language, phrase) {
            Some(text) => text.to_string(),
            None => self.bridge.localize(phrase.english(), language).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::InputClosed;
    use crate::speech::RecognitionError;
    use crate::test_utils::{
        printed, scripted_console, FakeMicrophone, RecordingPlayer, ScriptedConsole, ScriptedModel,
        ScriptedRecognizer, ScriptedSynthesizer, ScriptedTranslator,
    };

    fn runtime(
        script: &str,
        translator: &ScriptedTranslator,
    ) -> ChatRuntime<std::io::Cursor<Vec<u8>>, Vec<u8>> {
        ChatRuntime::new(
            Catalog::builtin(),
            PhraseBook::builtin(),
            scripted_console(script),
            TranslationBridge::new(Box::new(translator.clone())),
        )
    }

    fn text_backends(
        model: &ScriptedModel,
    ) -> impl FnOnce(ChatMode) -> Result<Backends, SetupError> {
        let model = model.clone();
        move |_mode| {
            Ok(Backends {
                model: Box::new(model),
                voice: None,
            })
        }
    }

    fn transcript(console: &ScriptedConsole) -> String {
        printed(console)
    }

    #[test]
    fn exit_phrases_match_whole_input() {
        assert!(is_exit_phrase("bye"));
        assert!(is_exit_phrase("  QUIT "));
        assert!(is_exit_phrase("Exit"));
        assert!(!is_exit_phrase("goodbye"));
        assert!(!is_exit_phrase("please quit"));
        assert!(!is_exit_phrase(""));
    }

    #[test]
    fn mode_choices_map_to_modes() {
        assert_eq!(ChatMode::from_choice("1"), Some(ChatMode::Text));
        assert_eq!(ChatMode::from_choice(" 2 "), Some(ChatMode::Voice));
        assert_eq!(ChatMode::from_choice("3"), None);
        assert_eq!(ChatMode::from_choice("text"), None);
    }

    #[tokio::test]
    async fn swahili_text_session_end_to_end() {
        let translator = ScriptedTranslator::tagging();
        let model = ScriptedModel::replying(["Hello! How are you?"]);
        let mut runtime = runtime("sw\n1\nHello\nbye\n", &translator);

        runtime.run(text_backends(&model)).await.unwrap();

        let out = transcript(runtime.console());
        assert!(out.starts_with(BANNER));
        assert!(out.contains("Chagua muundo: 1 kwa maandishi, 2 kwa sauti"));
        assert!(out.contains("Bot: Karibu! Naweza kukusaidia vipi?"));
        assert!(out.contains("Bot: [sw] Hello! How are you?"));
        assert!(out.trim_end().ends_with("Bot: Kwaheri! Tutaonana tena!"));
        assert_eq!(model.prompts(), vec!["[en] Hello".to_string()]);
        assert_eq!(translator.targets(), vec!["en".to_string(), "sw".to_string()]);
        assert_eq!(runtime.stage(), Stage::Terminated);
    }

    #[tokio::test]
    async fn english_session_makes_no_translation_calls() {
        let translator = ScriptedTranslator::tagging();
        let model = ScriptedModel::replying(["Hi there!"]);
        let mut runtime = runtime("en\n1\nhello\nbye\n", &translator);

        runtime.run(text_backends(&model)).await.unwrap();

        let out = transcript(runtime.console());
        assert!(out.contains("Choose format: 1 for text, 2 for voice"));
        assert!(out.contains("Bot: Hello, how can I help you?"));
        assert!(out.contains("Bot: Hi there!"));
        assert!(out.contains("Bot: Goodbye! Take care!"));
        assert_eq!(model.prompts(), vec!["hello".to_string()]);
        assert_eq!(translator.call_count(), 0);
    }

    #[tokio::test]
    async fn invalid_mode_and_language_reprompt() {
        let translator = ScriptedTranslator::tagging();
        let model = ScriptedModel::default();
        let mut runtime = runtime("klingon\nfr\n3\n\n1\nquit\n", &translator);

        runtime.run(text_backends(&model)).await.unwrap();

        let out = transcript(runtime.console());
        assert_eq!(out.matches("is not supported").count(), 1);
        assert_eq!(out.matches(INVALID_MODE_MESSAGE).count(), 2);
        assert_eq!(
            out.matches("[fr] Choose format: 1 for text, 2 for voice").count(),
            3
        );
        assert!(out.contains("Bot: [fr] Goodbye! Take care!"));
        assert!(model.prompts().is_empty());
    }

    #[tokio::test]
    async fn blank_lines_do_not_reach_the_model() {
        let translator = ScriptedTranslator::tagging();
        let model = ScriptedModel::default();
        let mut runtime = runtime("en\n1\n\n   \nEXIT\n", &translator);

        runtime.run(text_backends(&model)).await.unwrap();

        assert!(model.prompts().is_empty());
        assert_eq!(runtime.stage(), Stage::Terminated);
    }

    #[tokio::test]
    async fn failed_turn_apologizes_and_continues() {
        let translator = ScriptedTranslator::tagging();
        let model = ScriptedModel::failing();
        let mut runtime = runtime("de\n1\nHallo\nNoch da?\nbye\n", &translator);

        runtime.run(text_backends(&model)).await.unwrap();

        let out = transcript(runtime.console());
        let apology = format!("Bot: [de] {}", Phrase::Apology.english());
        assert_eq!(out.matches(&apology).count(), 2);
        assert_eq!(model.prompts().len(), 2);
    }

    #[tokio::test]
    async fn setup_failure_is_fatal() {
        let translator = ScriptedTranslator::tagging();
        let mut runtime = runtime("en\n1\nhello\n", &translator);

        let err = runtime
            .run(|_| {
                Err(SetupError::MissingCredential {
                    name: config::API_KEY_VAR,
                })
            })
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains(config::API_KEY_VAR));
        assert_eq!(runtime.stage(), Stage::Setup);
        assert!(!transcript(runtime.console()).contains("Bot:"));
    }

    #[tokio::test]
    async fn closed_input_ends_the_session_with_an_error() {
        let translator = ScriptedTranslator::tagging();
        let model = ScriptedModel::replying(["ok"]);
        let mut runtime = runtime("en\n1\nhello\n", &translator);

        let err = runtime.run(text_backends(&model)).await.unwrap_err();

        assert!(err.downcast_ref::<InputClosed>().is_some());
        assert_eq!(runtime.stage(), Stage::Listen);
    }

    #[tokio::test]
    async fn voice_session_speaks_every_bot_message() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("output.mp3");
        let translator = ScriptedTranslator::tagging();
        let model = ScriptedModel::replying(["Hi"]);
        let recognizer = ScriptedRecognizer::script([
            Ok("habari".to_string()),
            Err(RecognitionError::Unintelligible),
            Ok("Bye".to_string()),
        ]);
        let synthesizer = ScriptedSynthesizer::working();
        let player = RecordingPlayer::default();
        let voice = Voice::new(
            Box::new(FakeMicrophone::loud()),
            Box::new(recognizer.clone()),
            Box::new(synthesizer.clone()),
            Box::new(player.clone()),
            output.clone(),
        );
        let model_handle = model.clone();
        let mut runtime = runtime("sw\n2\n", &translator);

        runtime
            .run(move |mode| {
                assert_eq!(mode, ChatMode::Voice);
                Ok(Backends {
                    model: Box::new(model_handle),
                    voice: Some(voice),
                })
            })
            .await
            .unwrap();

        let out = transcript(runtime.console());
        assert_eq!(out.matches("Listening...").count(), 3);
        assert!(out.contains("You said: habari"));
        assert!(out.contains("Could not understand audio"));
        assert!(out.contains("Bot: [sw] Hi"));
        assert_eq!(
            synthesizer.texts(),
            vec![
                "Karibu! Naweza kukusaidia vipi?".to_string(),
                "[sw] Hi".to_string(),
                "Kwaheri! Tutaonana tena!".to_string(),
            ]
        );
        assert_eq!(recognizer.languages(), vec!["sw-KE".to_string(); 3]);
        assert_eq!(player.played().len(), 3);
        assert!(player.played().iter().all(|(_, existed)| *existed));
        assert!(!output.exists());
        assert_eq!(model.prompts(), vec!["[en] habari".to_string()]);
    }

    #[tokio::test]
    async fn voice_mode_without_speech_services_is_fatal() {
        let translator = ScriptedTranslator::tagging();
        let model = ScriptedModel::default();
        let mut runtime = runtime("en\n2\n", &translator);

        let err = runtime.run(text_backends(&model)).await.unwrap_err();

        assert!(err.to_string().contains("Voice mode"));
        assert_eq!(runtime.stage(), Stage::Setup);
    }

    #[tokio::test]
    async fn missing_microphone_stops_voice_mode_at_setup() {
        let translator = ScriptedTranslator::tagging();
        let mut runtime = runtime("en\n2\nhello\n", &translator);

        let err = runtime
            .run(|_| Err(SetupError::MicrophoneUnavailable("no input device".to_string())))
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains("microphone unavailable"));
        assert_eq!(runtime.stage(), Stage::Setup);
        assert!(!transcript(runtime.console()).contains("Listening..."));
    }

    #[tokio::test]
    async fn fatal_errors_are_printed_and_swallowed() {
        let translator = ScriptedTranslator::tagging();
        let mut runtime = runtime("en\n1\n", &translator);
        let outcome = runtime
            .run(|_| {
                Err(SetupError::MissingCredential {
                    name: config::API_KEY_VAR,
                })
            })
            .await;

        let mut out = Vec::new();
        assert!(report_outcome(outcome, &mut out).is_ok());

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("Fatal error: Error setting up chat services: "));
        assert!(printed.contains("GOOGLE_API_KEY is not set"));
        assert_eq!(printed.lines().count(), 1);
    }

    #[test]
    fn successful_sessions_print_nothing() {
        let mut out = Vec::new();
        assert!(report_outcome(Ok(()), &mut out).is_ok());
        assert!(out.is_empty());
    }
}
