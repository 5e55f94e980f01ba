use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::SpeechError;

pub const DEFAULT_VOICE_PREFERENCES: [&str; 3] = ["Google", "Microsoft", "Samantha"];

/// Pause between finishing one page and starting the next.
pub const CONTINUATION_DELAY: Duration = Duration::from_millis(500);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    pub lang: Option<String>,
}

impl Voice {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            lang: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub voice: Option<Voice>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Utterance {
    pub fn new(text: String) -> Self {
        Self {
            text,
            voice: None,
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// Platform text-to-speech.
pub trait SpeechEngine {
    fn voices(&self) -> Vec<Voice>;
    /// Starts speaking, replacing anything in flight.
    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError>;
    fn cancel(&mut self);
    /// True exactly once after an utterance ran to its natural end. Never true
    /// for a cancelled utterance.
    fn poll_finished(&mut self) -> bool;
}

/// Text as it should be spoken: emoji dropped, dashes read as pauses, runs of
/// whitespace collapsed.
pub fn clean_for_speech(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if ('\u{1F300}'..='\u{1F9FF}').contains(&c) {
            continue;
        }
        let c = if matches!(c, '-' | '\u{2013}' | '\u{2014}') {
            ' '
        } else {
            c
        };
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }
    out
}

/// First voice whose name contains the earliest matching preference.
pub fn pick_voice(voices: &[Voice], preferences: &[String]) -> Option<Voice> {
    preferences
        .iter()
        .find_map(|pref| voices.iter().find(|v| v.name.contains(pref.as_str())))
        .cloned()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeechState {
    Idle,
    Speaking { page: usize },
    /// Waiting out [`CONTINUATION_DELAY`] before reading `page`.
    Settling { page: usize, resume_at: Instant },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpeechOutcome {
    Started,
    Stopped,
    Unavailable,
    Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeechStep {
    Nothing,
    PageFinished { page: usize },
    ResumeDue { page: usize },
}

pub struct SpeechPlayer {
    engine: Option<Box<dyn SpeechEngine>>,
    state: SpeechState,
    preferred_voices: Vec<String>,
    delay: Duration,
}

impl SpeechPlayer {
    pub fn new(engine: Option<Box<dyn SpeechEngine>>, preferred_voices: Vec<String>) -> Self {
        Self {
            engine,
            state: SpeechState::Idle,
            preferred_voices,
            delay: CONTINUATION_DELAY,
        }
    }

    pub fn unavailable() -> Self {
        Self::new(None, Vec::new())
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn is_available(&self) -> bool {
        self.engine.is_some()
    }

    pub fn state(&self) -> SpeechState {
        self.state
    }

    pub fn is_speaking(&self) -> bool {
        !matches!(self.state, SpeechState::Idle)
    }

    /// Idle -> Speaking.
    pub fn start(&mut self, page: usize, page_text: &str) -> SpeechOutcome {
        if self.engine.is_none() {
            return SpeechOutcome::Unavailable;
        }
        if self.is_speaking() {
            return SpeechOutcome::Started;
        }
        match self.speak_page(page, page_text) {
            Ok(()) => SpeechOutcome::Started,
            Err(e) => SpeechOutcome::Failed(e.to_string()),
        }
    }

    /// Any state -> Idle, cancelling the engine and any pending continuation.
    pub fn stop(&mut self) -> bool {
        let was_speaking = self.is_speaking();
        if let Some(engine) = self.engine.as_mut() {
            engine.cancel();
        }
        if was_speaking {
            debug!("speech stopped");
        }
        self.state = SpeechState::Idle;
        was_speaking
    }

    pub fn poll(&mut self, now: Instant) -> SpeechStep {
        match self.state {
            SpeechState::Idle => SpeechStep::Nothing,
            SpeechState::Speaking { page } => {
                let finished = self
                    .engine
                    .as_mut()
                    .map(|e| e.poll_finished())
                    .unwrap_or(true);
                if finished {
                    SpeechStep::PageFinished { page }
                } else {
                    SpeechStep::Nothing
                }
            }
            SpeechState::Settling { page, resume_at } => {
                if now >= resume_at {
                    SpeechStep::ResumeDue { page }
                } else {
                    SpeechStep::Nothing
                }
            }
        }
    }

    /// Speaking -> Settling on `page`.
    pub fn settle(&mut self, page: usize, now: Instant) {
        debug!(page, "speech settling before next page");
        self.state = SpeechState::Settling {
            page,
            resume_at: now + self.delay,
        };
    }

    /// Settling -> Speaking. Errors leave the player idle.
    pub fn resume(&mut self, page: usize, page_text: &str) -> Result<(), SpeechError> {
        self.speak_page(page, page_text).inspect_err(|e| {
            if !matches!(e, SpeechError::EmptyText) {
                warn!("speech continuation failed: {e}");
            }
            self.state = SpeechState::Idle;
        })
    }

    /// Speaking -> Idle after the last page finished on its own.
    pub fn finish(&mut self) {
        debug!("speech reached the last page");
        self.state = SpeechState::Idle;
    }

    fn speak_page(&mut self, page: usize, page_text: &str) -> Result<(), SpeechError> {
        let Some(engine) = self.engine.as_mut() else {
            return Ok(());
        };
        let text = clean_for_speech(page_text);
        if text.is_empty() {
            return Err(SpeechError::EmptyText);
        }
        let mut utterance = Utterance::new(text);
        utterance.voice = pick_voice(&engine.voices(), &self.preferred_voices);
        engine.speak(utterance)?;
        debug!(page, "speech started");
        self.state = SpeechState::Speaking { page };
        Ok(())
    }
}

impl Drop for SpeechPlayer {
    fn drop(&mut self) {
        if self.is_speaking() {
            if let Some(engine) = self.engine.as_mut() {
                engine.cancel();
            }
        }
    }
}
