use kickoff_completion::ChatMessage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Speaker attributed to the entry at `position` under user-first
    /// alternation.
    pub fn for_position(position: usize) -> Self {
        if position % 2 == 0 {
            Role::User
        } else {
            Role::Assistant
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    pub role: Role,
    pub text: String,
}

impl Utterance {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

impl From<&Utterance> for ChatMessage {
    fn from(utterance: &Utterance) -> Self {
        match utterance.role {
            Role::User => ChatMessage::user(utterance.text.clone()),
            Role::Assistant => ChatMessage::assistant(utterance.text.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscriptError {
    #[error("out of turn: expected a {expected} utterance, got {found}")]
    OutOfTurn { expected: Role, found: Role },
}

/// Ordered record of one session's conversation.
///
/// Entries carry an explicit [`Role`], and [`Transcript::append`] only
/// accepts the role whose turn it is, so the sequence always alternates
/// starting with the user. Position parity and the stored tag therefore
/// always agree.
///
/// Not synchronized; callers serialize access (see [`crate::SessionStore`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<Utterance>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expected_role(&self) -> Role {
        Role::for_position(self.entries.len())
    }

    pub fn append(&mut self, utterance: Utterance) -> Result<(), TranscriptError> {
        let expected = self.expected_role();
        if utterance.role != expected {
            return Err(TranscriptError::OutOfTurn {
                expected,
                found: utterance.role,
            });
        }
        self.entries.push(utterance);
        Ok(())
    }

    /// Role-tagged view of every entry, in order. The iterator is lazy and
    /// can be cloned to restart it.
    pub fn render(&self) -> impl Iterator<Item = (Role, &str)> + Clone + '_ {
        self.entries.iter().enumerate().map(|(position, utterance)| {
            debug_assert_eq!(utterance.role, Role::for_position(position));
            (Role::for_position(position), utterance.text.as_str())
        })
    }

    pub fn to_chat_messages(&self) -> Vec<ChatMessage> {
        self.entries.iter().map(ChatMessage::from).collect()
    }

    pub fn entries(&self) -> &[Utterance] {
        &self.entries
    }

    pub fn last(&self) -> Option<&Utterance> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use kickoff_completion::Role as MessageRole;

    use super::*;

    fn conversation(turns: usize) -> Transcript {
        let mut transcript = Transcript::new();
        for i in 0..turns {
            let utterance = match Role::for_position(i) {
                Role::User => Utterance::user(format!("question {i}")),
                Role::Assistant => Utterance::assistant(format!("answer {i}")),
            };
            transcript.append(utterance).unwrap();
        }
        transcript
    }

    #[test]
    fn new_transcript_expects_user() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.expected_role(), Role::User);
    }

    #[test]
    fn even_positions_are_user() {
        for n in 0..9 {
            let transcript = conversation(n);
            assert_eq!(transcript.len(), n);
            for (i, (role, _)) in transcript.render().enumerate() {
                assert_eq!(role == Role::User, i % 2 == 0, "position {i} of {n}");
            }
        }
    }

    #[test]
    fn assistant_first_is_rejected() {
        let mut transcript = Transcript::new();
        let err = transcript
            .append(Utterance::assistant("hello"))
            .unwrap_err();
        assert_eq!(
            err,
            TranscriptError::OutOfTurn {
                expected: Role::User,
                found: Role::Assistant,
            }
        );
        assert!(transcript.is_empty());
    }

    #[test]
    fn two_user_utterances_in_a_row_are_rejected() {
        let mut transcript = conversation(1);
        assert!(transcript.append(Utterance::user("again")).is_err());
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn render_is_restartable() {
        let transcript = conversation(4);
        let rendered = transcript.render();
        let first: Vec<_> = rendered.clone().collect();
        let second: Vec<_> = rendered.collect();
        assert_eq!(first, second);
        assert_eq!(first[3], (Role::Assistant, "answer 3"));
    }

    #[test]
    fn chat_messages_keep_roles() {
        let messages = conversation(3).to_chat_messages();
        let roles: Vec<_> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::User, MessageRole::Assistant, MessageRole::User]
        );
        assert_eq!(messages[2].content, "question 2");
    }
}
