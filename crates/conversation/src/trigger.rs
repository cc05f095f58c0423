/// Words that mark a user utterance as a request for the requirements
/// document. Matching is case-insensitive substring matching, so "reports"
/// and "linked" count too.
pub const DOCUMENT_KEYWORDS: [&str; 6] = ["document", "report", "summary", "download", "link", "srs"];

pub fn detect_document_request(utterance: &str) -> bool {
    let lowered = utterance.to_lowercase();
    DOCUMENT_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}
