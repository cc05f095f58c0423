pub mod language;
pub mod normalize;
pub mod session;
pub mod transcript;
pub mod trigger;

pub use language::Language;
pub use normalize::normalize;
pub use session::{
    DEFAULT_MAX_SESSIONS, InvalidSessionId, MAX_SESSION_ID_LEN, Session, SessionId,
    SessionLimitReached, SessionStore,
};
pub use transcript::{Role, Transcript, TranscriptError, Utterance};
pub use trigger::{DOCUMENT_KEYWORDS, detect_document_request};
