use kickoff_completion::{ChatMessage, CompletionRequest, CompletionService};
use kickoff_conversation::{
    Language, SessionId, SessionLimitReached, Transcript, TranscriptError, Utterance,
    detect_document_request,
    language::FORMATTING_INSTRUCTION, normalize,
};
use kickoff_srs::{DocumentId, Provenance, SynthesisError, synthesize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub(crate) enum TurnState {
    Received,
    Appended,
    Completing,
    Normalizing,
    TriggerCheck,
    Synthesizing,
    Recorded,
    Responded,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum TurnError {
    #[error(transparent)]
    Completion(#[from] kickoff_completion::Error),
    #[error(transparent)]
    Transcript(#[from] TranscriptError),
    #[error(transparent)]
    SessionLimit(#[from] SessionLimitReached),
}

impl From<TurnError> for ApiError {
    fn from(err: TurnError) -> Self {
        match err {
            TurnError::Completion(e) => ApiError::Upstream(e.to_string()),
            TurnError::Transcript(e) => ApiError::Internal(e.to_string()),
            TurnError::SessionLimit(e) => ApiError::Unavailable(e.to_string()),
        }
    }
}

#[derive(Debug)]
pub(crate) struct TurnOutcome {
    pub(crate) reply: String,
    pub(crate) document: Option<DocumentId>,
    pub(crate) document_error: Option<SynthesisError>,
}

struct Turn<'a> {
    session_id: &'a SessionId,
    state: TurnState,
}

impl<'a> Turn<'a> {
    fn start(session_id: &'a SessionId) -> Self {
        tracing::debug!(session_id = %session_id, state = %TurnState::Received, "turn_state");
        Self {
            session_id,
            state: TurnState::Received,
        }
    }

    fn advance(&mut self, next: TurnState) {
        tracing::debug!(
            session_id = %self.session_id,
            from = %self.state,
            to = %next,
            "turn_state"
        );
        self.state = next;
    }
}

/// Persona, formatting guidance, then the whole transcript as alternating
/// messages.
pub(crate) fn chat_request(
    model: &str,
    transcript: &Transcript,
    language: Language,
) -> CompletionRequest {
    let mut messages = Vec::with_capacity(transcript.len() + 2);
    messages.push(ChatMessage::system(language.system_instruction()));
    messages.push(ChatMessage::system(FORMATTING_INSTRUCTION));
    messages.extend(transcript.to_chat_messages());

    CompletionRequest::new(model, messages)
}

/// Runs one user turn against the session, holding its lock throughout.
///
/// The turn works on a copy of the transcript and only writes it back once
/// the reply is final, with no await in between. A failed or dropped turn
/// therefore leaves the session exactly as it found it. A failed synthesis
/// still records and returns the reply, without the document link.
pub(crate) async fn run_turn(
    state: &AppState,
    session_id: &SessionId,
    message: String,
    language: Language,
) -> Result<TurnOutcome, TurnError> {
    let mut turn = Turn::start(session_id);

    let session = state.sessions.get_or_create(session_id).await?;
    let mut session = session.lock().await;

    let mut draft = session.transcript.clone();
    draft.append(Utterance::user(message.as_str()))?;
    turn.advance(TurnState::Appended);

    turn.advance(TurnState::Completing);
    let request = chat_request(&state.config.model, &draft, language);
    let raw = state
        .config
        .completion
        .complete(&request)
        .await
        .inspect_err(|e| {
            tracing::warn!(session_id = %session_id, error = %e, "turn_completion_failed");
        })?;

    turn.advance(TurnState::Normalizing);
    let mut reply = normalize(&raw);

    turn.advance(TurnState::TriggerCheck);
    let mut document = None;
    let mut document_error = None;

    if detect_document_request(&message) {
        turn.advance(TurnState::Synthesizing);
        match synthesize(
            state.config.completion.as_ref(),
            &state.config.model,
            &draft,
            language,
        )
        .await
        {
            Ok(content) => {
                let provenance = Provenance {
                    language,
                    source_turns: draft.len(),
                };
                let id = state.documents.put(content, provenance).await;
                let link = state.config.document_link(id);

                reply.push_str("\n\n");
                reply.push_str(&language.document_ready_notice(&link));

                tracing::info!(session_id = %session_id, document_id = %id, "srs_document_created");
                document = Some(id);
            }
            Err(e) => {
                tracing::error!(session_id = %session_id, error = %e, "srs_document_failed");
                document_error = Some(e);
            }
        }
    }

    draft.append(Utterance::assistant(reply.as_str()))?;
    session.transcript = draft;
    session.language = language;
    turn.advance(TurnState::Recorded);

    turn.advance(TurnState::Responded);
    Ok(TurnOutcome {
        reply,
        document,
        document_error,
    })
}

#[cfg(test)]
mod tests {
    use kickoff_completion::Role;

    use super::*;

    #[test]
    fn chat_request_frames_history() {
        let mut transcript = Transcript::new();
        transcript.append(Utterance::user("hi")).unwrap();
        transcript.append(Utterance::assistant("hello")).unwrap();
        transcript.append(Utterance::user("a shop")).unwrap();

        let request = chat_request("m", &transcript, Language::En);
        let roles: Vec<_> = request.messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                Role::System,
                Role::System,
                Role::User,
                Role::Assistant,
                Role::User
            ]
        );
        assert_eq!(request.messages[1].content, FORMATTING_INSTRUCTION);
        assert_eq!(request.messages[4].content, "a shop");
    }

    #[test]
    fn states_render_snake_case() {
        assert_eq!(TurnState::TriggerCheck.to_string(), "trigger_check");
    }
}
