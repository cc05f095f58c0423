use crate::DocumentId;

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("document synthesis failed: {0}")]
    Completion(#[from] kickoff_completion::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("document not found: {0}")]
pub struct DocumentNotFound(pub String);

impl From<DocumentId> for DocumentNotFound {
    fn from(id: DocumentId) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("failed to pack document: {0}")]
    Pack(String),
}
