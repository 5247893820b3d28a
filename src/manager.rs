use crate::ai::{CompletionBackend, GenerationParams};
use crate::rentals::{RentalsSource, serialize_rentals};
use crate::transcript::Transcript;
use tokio::sync::Mutex;

/// Shown when the completion call fails. Never written into the transcript.
pub const FALLBACK_REPLY: &str = "Sorry, I could not get a response right now.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    Idle,
    AwaitingReferenceData,
    AwaitingCompletion,
}

/// Owns one conversation and runs its turns against the two collaborators.
///
/// Turns are serialized: the transcript lock is held from the user append
/// until the reply is recorded, so a second submission waits for the first.
pub struct ConversationManager<R, C> {
    rentals: R,
    backend: C,
    params: GenerationParams,
    transcript: Mutex<Transcript>,
    phase: std::sync::Mutex<TurnPhase>,
}

impl<R, C> ConversationManager<R, C>
where
    R: RentalsSource,
    C: CompletionBackend,
{
    pub fn new(rentals: R, backend: C) -> Self {
        Self::with_transcript(rentals, backend, GenerationParams::default(), Transcript::default())
    }

    pub fn with_params(rentals: R, backend: C, params: GenerationParams) -> Self {
        Self::with_transcript(rentals, backend, params, Transcript::default())
    }

    pub fn with_transcript(
        rentals: R,
        backend: C,
        params: GenerationParams,
        transcript: Transcript,
    ) -> Self {
        Self {
            rentals,
            backend,
            params,
            transcript: Mutex::new(transcript),
            phase: std::sync::Mutex::new(TurnPhase::Idle),
        }
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub async fn transcript(&self) -> Transcript {
        self.transcript.lock().await.clone()
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
            .lock()
            .map(|phase| *phase)
            .unwrap_or(TurnPhase::Idle)
    }

    fn set_phase(&self, next: TurnPhase) {
        tracing::debug!(phase = ?next, "conversation turn phase");
        if let Ok(mut phase) = self.phase.lock() {
            *phase = next;
        }
    }

    /// Runs one user turn and returns the text to show as the assistant's reply.
    ///
    /// Returns `None` without touching anything when `text` is blank.
    pub async fn submit_user_turn(&self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let mut transcript = self.transcript.lock().await;
        transcript.push_user(text);

        self.set_phase(TurnPhase::AwaitingReferenceData);
        let body = match self.rentals.fetch().await {
            Ok(data) => serialize_rentals(&data),
            Err(err) => {
                tracing::warn!(error = %err, "rentals fetch failed, continuing without data");
                String::new()
            }
        };
        transcript.install_reference_data(&body);

        self.set_phase(TurnPhase::AwaitingCompletion);
        let reply = match self
            .backend
            .complete(transcript.messages(), &self.params)
            .await
        {
            Ok(reply) => {
                transcript.push_assistant(reply.clone());
                reply
            }
            Err(err) => {
                tracing::warn!(error = %err, "completion failed, showing fallback reply");
                FALLBACK_REPLY.to_string()
            }
        };

        self.set_phase(TurnPhase::Idle);
        Some(reply)
    }
}
