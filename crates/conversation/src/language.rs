use indoc::indoc;
use serde::{Deserialize, Serialize};

/// Selects the instruction template and the user-facing phrasing of a
/// session. English is the primary language, Japanese the secondary one.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    #[strum(serialize = "en")]
    En,
    #[serde(rename = "ja", alias = "jp")]
    #[strum(serialize = "ja")]
    Ja,
}

const SYSTEM_INSTRUCTION_EN: &str = indoc! {"
    You are the Kickoff project assistant. You act as a managing director and project lead who helps clients shape a software project. Your job is to:
    1. Walk the user through describing their project and ask focused follow-up questions until the picture is complete.
    2. Summarize the project when useful: name, goals, scope, timeline, budget, required resources, risks and key stakeholders.
    3. Share industry-specific insight and project management best practice.
    4. Give rough cost and timeline estimates that reflect the project's complexity.
    5. Point out likely challenges together with ways to mitigate them.
    6. Recommend a delivery methodology that suits the project.
    7. Offer to prepare a downloadable Software Requirements Specification (SRS) when the conversation has enough substance.
    Keep a professional but friendly tone. Ask for clarification whenever something is ambiguous and volunteer information that makes the plan more complete.
"};

const SYSTEM_INSTRUCTION_JA: &str = indoc! {"
    あなたはKickoffプロジェクトアシスタントです。マネージングディレクター兼プロジェクトリーダーとして、クライアントがソフトウェアプロジェクトを具体化できるよう支援します。あなたの役割は次のとおりです。
    1. ユーザーがプロジェクトを説明できるよう導き、全体像が明確になるまで的確な質問を重ねる。
    2. 必要に応じて、プロジェクト名・目標・範囲・スケジュール・予算・必要なリソース・リスク・主要な関係者をまとめる。
    3. 業界特有の知見とプロジェクト管理のベストプラクティスを共有する。
    4. プロジェクトの複雑さを踏まえた概算の費用とスケジュールを提示する。
    5. 想定される課題とその対策を示す。
    6. プロジェクトに適した開発手法を提案する。
    7. 会話の内容が十分にそろったら、ダウンロード可能なソフトウェア要求仕様書(SRS)の作成を提案する。
    プロフェッショナルでありながら親しみやすい口調を保ってください。曖昧な点は確認し、計画をより完全にする情報を積極的に提供してください。
"};

/// Output-format guidance sent with every chat turn, after the persona.
pub const FORMATTING_INSTRUCTION: &str = "Format your responses concisely, using Markdown. Use a single newline between paragraphs. Use **bold** for emphasis, - for unordered lists, 1. for ordered lists, and `code` for inline code or ```language for code blocks. Avoid unnecessary spacing.";

impl Language {
    pub fn system_instruction(self) -> &'static str {
        match self {
            Language::En => SYSTEM_INSTRUCTION_EN,
            Language::Ja => SYSTEM_INSTRUCTION_JA,
        }
    }

    /// Addendum appended to a reply once a requirements document is ready
    /// at `link`.
    pub fn document_ready_notice(self, link: &str) -> String {
        match self {
            Language::En => format!(
                "I've prepared an SRS document based on our conversation. You can download it here: [Download SRS Document]({link})"
            ),
            Language::Ja => format!(
                "これまでの会話をもとにSRSドキュメントを作成しました。こちらからダウンロードできます:[SRSドキュメントをダウンロード]({link})"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_codes_and_alias() {
        let en: Language = serde_json::from_str(r#""en""#).unwrap();
        let ja: Language = serde_json::from_str(r#""ja""#).unwrap();
        let jp: Language = serde_json::from_str(r#""jp""#).unwrap();
        assert_eq!(en, Language::En);
        assert_eq!(ja, Language::Ja);
        assert_eq!(jp, Language::Ja);
        assert!(serde_json::from_str::<Language>(r#""fr""#).is_err());
    }

    #[test]
    fn english_is_primary() {
        assert_eq!(Language::default(), Language::En);
        assert_eq!(Language::Ja.to_string(), "ja");
    }

    #[test]
    fn instructions_differ_per_language() {
        assert!(Language::En.system_instruction().contains("Kickoff project assistant"));
        assert!(Language::Ja.system_instruction().contains("Kickoff"));
        assert_ne!(
            Language::En.system_instruction(),
            Language::Ja.system_instruction()
        );
    }

    #[test]
    fn notice_embeds_markdown_link() {
        let link = "http://localhost:3001/create_document/abc";
        assert!(
            Language::En
                .document_ready_notice(link)
                .ends_with("[Download SRS Document](http://localhost:3001/create_document/abc)")
        );
        assert!(
            Language::Ja
                .document_ready_notice(link)
                .contains("(http://localhost:3001/create_document/abc)")
        );
    }
}
