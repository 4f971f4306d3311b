//! Session state container and submission lifecycle.
//!
//! One explicit container owns the five concerns the UI renders (file,
//! parse lifecycle, result, error, AI exchange) so they cannot drift out of
//! sync. Transitions:
//!
//! `Idle -> FileSelected -> Submitting -> { ResultReady | ErrorShown }`,
//! and from `ResultReady` the AI exchange cycles independently. Selecting a
//! new file or category from any state returns to `FileSelected` and discards
//! the result, the error, and the AI exchange together.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

use crate::config::Settings;
use crate::domain::{
    AiExchange, DocumentCategory, FileUpload, ParseResult, ParserConfig, UploadSelection,
};
use crate::error::ErrorModel;
use crate::routing;
use crate::services::{AiClient, ParserClient};

/// Where the session currently sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    FileSelected,
    Submitting,
    ResultReady,
    ErrorShown,
}

/// Point-in-time copy of the session for presentation.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub file_name: Option<String>,
    pub config: ParserConfig,
    pub result: Option<ParseResult>,
    pub error: Option<ErrorModel>,
    pub ai_exchange: Option<AiExchange>,
}

#[derive(Debug, Default)]
struct SessionState {
    selection: UploadSelection,
    result: Option<ParseResult>,
    error: Option<ErrorModel>,
    ai_exchange: Option<AiExchange>,
    submitting: bool,
    /// Token of the most recently initiated submission. A settlement whose
    /// token no longer matches is stale and must be discarded, never stored.
    generation: u64,
    /// Distinguishes AI settlements when questions are re-asked against the
    /// same result.
    ai_seq: u64,
}

impl SessionState {
    /// Discard everything that depended on the previous file/category choice
    /// and orphan any in-flight settlement.
    fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.result = None;
        self.error = None;
        self.ai_exchange = None;
        self.submitting = false;
    }

    fn phase(&self) -> SessionPhase {
        if self.submitting {
            SessionPhase::Submitting
        } else if self.result.is_some() {
            SessionPhase::ResultReady
        } else if self.error.is_some() {
            SessionPhase::ErrorShown
        } else if self.selection.file.is_some() {
            SessionPhase::FileSelected
        } else {
            SessionPhase::Idle
        }
    }
}

/// Orchestrates one user's selection, submission, and follow-up AI exchange.
///
/// Cheap to clone; clones share the same state. The lock is never held
/// across an await.
#[derive(Clone)]
pub struct ParserSession {
    parser: ParserClient,
    ai: AiClient,
    state: Arc<Mutex<SessionState>>,
}

impl ParserSession {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let parser = ParserClient::new(&settings.parser_base_url, settings.wake_timeout_seconds)?;
        let ai = AiClient::new(&settings.parser_base_url)?;
        Ok(Self {
            parser,
            ai,
            state: Arc::new(Mutex::new(SessionState::default())),
        })
    }

    /// Fire the best-effort wake-up ping without blocking the caller. Its
    /// outcome never touches session state.
    pub fn spawn_wake_ping(&self) {
        let parser = self.parser.clone();
        tokio::spawn(async move {
            parser.wake().await;
        });
    }

    /// Replace the current file. Clears the stored result, the error, and
    /// the AI exchange in one step.
    pub fn select_file(&self, file: FileUpload) {
        let mut state = self.state.lock();
        state.selection.file = Some(file);
        state.invalidate();
    }

    /// Switch the document category. Resets the extraction variant to the
    /// category default and discards dependent state; the file is kept.
    pub fn select_category(&self, category: DocumentCategory) {
        let mut state = self.state.lock();
        if state.selection.config.category() == category {
            return;
        }
        state.selection.config = ParserConfig::default_for(category);
        state.invalidate();
    }

    /// Switch the extraction variant within the current category. Passing a
    /// variant of another category is a programming error.
    pub fn select_config(&self, config: ParserConfig) {
        let mut state = self.state.lock();
        debug_assert_eq!(
            config.category(),
            state.selection.config.category(),
            "extraction variant does not belong to the selected category",
        );
        state.selection.config = config;
    }

    /// Submit the current selection for extraction.
    ///
    /// With no file chosen this short-circuits without a network call. The
    /// previous result, error, and AI exchange are cleared synchronously at
    /// initiation, before the request is dispatched, so the stored result
    /// always belongs to the most recently initiated submission. A settlement
    /// arriving after a newer initiation is returned to its caller but leaves
    /// session state untouched.
    pub async fn submit(&self) -> Result<ParseResult, ErrorModel> {
        let (endpoint, file, token) = {
            let mut state = self.state.lock();
            let Some(file) = state.selection.file.clone() else {
                let err = ErrorModel::no_file_selected();
                state.result = None;
                state.ai_exchange = None;
                state.error = Some(err.clone());
                return Err(err);
            };
            state.invalidate();
            state.submitting = true;
            (
                routing::route(&state.selection.config),
                file,
                state.generation,
            )
        };

        let outcome = self.parser.parse_document(&endpoint, &file).await;

        let mut state = self.state.lock();
        if state.generation != token {
            debug!(
                token,
                current = state.generation,
                "Discarding stale parse settlement"
            );
            return outcome;
        }
        state.submitting = false;
        match outcome {
            Ok(result) => {
                state.result = Some(result.clone());
                Ok(result)
            }
            Err(err) => {
                state.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Ask the AI a question about the stored result.
    ///
    /// Returns `None`, with no state change and no network call, when there
    /// is no stored result or the trimmed question is empty. The AI exchange
    /// has its own pending flag, independent of the parse lifecycle.
    pub async fn ask(&self, question: &str) -> Option<Result<String, String>> {
        let question = question.trim();

        let (document_data, token) = {
            let mut state = self.state.lock();
            let Some(result) = state.result.as_ref() else {
                return None;
            };
            if question.is_empty() {
                return None;
            }
            let document_data = result.payload.clone();
            state.ai_seq = state.ai_seq.wrapping_add(1);
            state.ai_exchange = Some(AiExchange::pending(question));
            (document_data, (state.generation, state.ai_seq))
        };

        let outcome = self.ai.ask(question, document_data).await;

        let mut state = self.state.lock();
        if (state.generation, state.ai_seq) != token {
            debug!("Discarding stale AI settlement");
            return Some(outcome);
        }
        if let Some(exchange) = state.ai_exchange.as_mut() {
            exchange.pending = false;
            match &outcome {
                Ok(answer) => exchange.answer = Some(answer.clone()),
                Err(err) => exchange.error = Some(err.clone()),
            }
        }
        Some(outcome)
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.lock().phase()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.lock().submitting
    }

    pub fn is_ai_pending(&self) -> bool {
        self.state
            .lock()
            .ai_exchange
            .as_ref()
            .is_some_and(|exchange| exchange.pending)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock();
        SessionSnapshot {
            phase: state.phase(),
            file_name: state.selection.file.as_ref().map(|f| f.name.clone()),
            config: state.selection.config,
            result: state.result.clone(),
            error: state.error.clone(),
            ai_exchange: state.ai_exchange.clone(),
        }
    }
}
