use indoc::indoc;
use kickoff_completion::{ChatMessage, CompletionRequest, CompletionService};
use kickoff_conversation::{Language, Role, Transcript};

use crate::SynthesisError;

const SYNTHESIS_GUIDELINES: &str = indoc! {"
    Guidelines:
    1. Start with an introduction that summarizes the project.
    2. Create logical sections based on the topics discussed in the conversation.
    3. Include every relevant detail that was mentioned, such as goals, scope, features, requirements and constraints.
    4. Use clear headings and subheadings to organize the information.
    5. If standard SRS sections apply but were not discussed, include them with a note that they need further discussion.
    6. Keep a logical flow from section to section.
"};

fn speaker_label(role: Role) -> &'static str {
    match role {
        Role::User => "Human",
        Role::Assistant => "Assistant",
    }
}

/// Single-shot prompt asking for an SRS built from `transcript` alone.
pub fn synthesis_prompt(transcript: &Transcript) -> String {
    let conversation = transcript
        .render()
        .map(|(role, text)| format!("{}: {}", speaker_label(role), text))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on the following conversation, create a comprehensive Software Requirements Specification (SRS) document. \
         Structure the document according to the information provided in the conversation.\n\n\
         {SYNTHESIS_GUIDELINES}\n\
         Conversation:\n{conversation}\n\n\
         Create the SRS document:"
    )
}

/// The synthesis request carries the system instruction and the prompt and
/// nothing else; the chat history is embedded in the prompt, never sent as
/// messages.
pub fn synthesis_request(model: &str, transcript: &Transcript, language: Language) -> CompletionRequest {
    CompletionRequest::new(
        model,
        vec![
            ChatMessage::system(language.system_instruction()),
            ChatMessage::user(synthesis_prompt(transcript)),
        ],
    )
}

pub async fn synthesize(
    service: &dyn CompletionService,
    model: &str,
    transcript: &Transcript,
    language: Language,
) -> Result<String, SynthesisError> {
    let request = synthesis_request(model, transcript, language);

    tracing::debug!(
        model,
        turns = transcript.len(),
        language = %language,
        "srs_synthesis_started"
    );

    let content = service.complete(&request).await?;

    tracing::debug!(chars = content.len(), "srs_synthesis_finished");
    Ok(content)
}
