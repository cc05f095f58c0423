use kickoff_conversation::SessionStore;
use kickoff_srs::DocumentStore;

use crate::config::InterviewConfig;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: InterviewConfig,
    pub(crate) sessions: SessionStore,
    pub(crate) documents: DocumentStore,
}

impl AppState {
    pub(crate) fn new(config: InterviewConfig) -> Self {
        Self {
            sessions: SessionStore::new().with_max_sessions(config.max_sessions),
            config,
            documents: DocumentStore::new(),
        }
    }
}
