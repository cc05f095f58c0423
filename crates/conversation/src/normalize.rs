use std::sync::LazyLock;

use regex::Regex;

static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[0-9]+\.|-)\s").expect("valid list marker pattern"));

const FENCE: &str = "```";

/// Turns a raw model reply into tidy markdown.
///
/// - Paragraphs are separated by exactly one blank line; soft-wrapped lines
///   inside a paragraph are joined with single spaces.
/// - `1. ` and `- ` list markers that follow whitespace start a new line.
///   A marker glued to the previous word (`word1. `, `a- b`) is plain text.
/// - Fenced code blocks are kept verbatim, except that the opener is
///   trimmed and blank lines directly after it are dropped, so exactly one
///   newline follows the language tag.
///
/// Applying it twice gives the same result as applying it once. That only
/// holds while markers are recognised at paragraph start or after whitespace.
pub fn normalize(reply: &str) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut fence: Option<Vec<&str>> = None;

    for line in reply.lines() {
        let trimmed = line.trim();

        if let Some(code) = fence.as_mut() {
            if code.len() == 1 && trimmed.is_empty() {
                continue;
            }
            if trimmed.starts_with(FENCE) {
                code.push(trimmed);
                blocks.push(code.join("\n"));
                fence = None;
            } else {
                code.push(line.trim_end());
            }
            continue;
        }

        if trimmed.is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
        } else if trimmed.starts_with(FENCE) {
            flush_paragraph(&mut paragraph, &mut blocks);
            fence = Some(vec![trimmed]);
        } else {
            paragraph.push(trimmed);
        }
    }

    flush_paragraph(&mut paragraph, &mut blocks);

    // unterminated fence: keep what we have
    if let Some(mut code) = fence {
        while code.len() > 1 && code.last().is_some_and(|line| line.is_empty()) {
            code.pop();
        }
        blocks.push(code.join("\n"));
    }

    blocks.join("\n\n")
}

fn flush_paragraph(lines: &mut Vec<&str>, blocks: &mut Vec<String>) {
    if lines.is_empty() {
        return;
    }
    let joined = lines.join(" ");
    lines.clear();
    blocks.push(break_list_items(&joined));
}

fn break_list_items(text: &str) -> String {
    let mut items: Vec<&str> = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;

    for (i, c) in text.char_indices() {
        if i > 0 && prev.is_some_and(char::is_whitespace) && LIST_MARKER.is_match(&text[i..]) {
            items.push(text[start..i].trim_end());
            start = i;
        }
        prev = Some(c);
    }
    items.push(&text[start..]);

    items.join("\n")
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use quickcheck::{Arbitrary, Gen};

    use super::*;

    #[test]
    fn soft_wrapped_lines_are_joined() {
        let input = "This project is\n   an online shop\nfor books.";
        assert_eq!(normalize(input), "This project is an online shop for books.");
    }

    #[test]
    fn paragraphs_get_exactly_one_blank_line() {
        let input = "\n\nFirst paragraph.\n\n\n  \nSecond\nparagraph.\n\n";
        assert_eq!(normalize(input), "First paragraph.\n\nSecond paragraph.");
    }

    #[test]
    fn collapsed_numbered_list_is_restored() {
        let input = "Next steps: 1. Define scope 2. Estimate budget 3. Pick a stack";
        assert_eq!(
            normalize(input),
            "Next steps:\n1. Define scope\n2. Estimate budget\n3. Pick a stack"
        );
    }

    #[test]
    fn dash_items_are_split_but_hyphenated_words_are_not() {
        let input = "Risks:\n- vendor lock-in\n- scope creep";
        assert_eq!(normalize(input), "Risks:\n- vendor lock-in\n- scope creep");
    }

    #[test]
    fn list_at_paragraph_start_has_no_leading_newline() {
        let input = "Intro.\n\n1. first\n2. second";
        assert_eq!(normalize(input), "Intro.\n\n1. first\n2. second");
    }

    #[test]
    fn version_numbers_are_not_list_markers() {
        let input = "Upgrade from v1.2. to 2.0 soon";
        assert_eq!(normalize(input), "Upgrade from v1.2. to 2.0 soon");
    }

    #[test]
    fn markers_glued_to_a_word_stay_inline() {
        let input = "Build step1. compile then a- b";
        let once = normalize(input);
        assert_eq!(once, input);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn code_fence_opener_is_followed_by_one_newline() {
        let input = indoc! {"
            Example:

            ```python


            def total(items):
                return sum(items)
            ```
        "};
        assert_eq!(
            normalize(input),
            "Example:\n\n```python\ndef total(items):\n    return sum(items)\n```"
        );
    }

    #[test]
    fn code_block_content_is_not_unwrapped() {
        let input = "```sql\nSELECT *\n  FROM orders\n\n- not a list\n```\nAfter.";
        assert_eq!(
            normalize(input),
            "```sql\nSELECT *\n  FROM orders\n\n- not a list\n```\n\nAfter."
        );
    }

    #[test]
    fn unterminated_fence_keeps_content() {
        let input = "```rust\nfn main() {}\n\n\n";
        assert_eq!(normalize(input), "```rust\nfn main() {}");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t\n "), "");
    }

    #[derive(Debug, Clone)]
    struct Markdownish(String);

    impl Arbitrary for Markdownish {
        fn arbitrary(g: &mut Gen) -> Self {
            let pieces = [
                "word", "Word", " ", "  ", "\n", "\n\n", "\n \n", "1. ", "12. ", "- ", "-", ".",
                "2.", "```", "```rust", "\t", "\r\n", "é", "lock-in", "3.5 ",
            ];
            let len = usize::arbitrary(g) % 40;
            let text = (0..len)
                .map(|_| *g.choose(&pieces).unwrap())
                .collect::<String>();
            Markdownish(text)
        }
    }

    #[quickcheck_macros::quickcheck]
    fn prop_normalize_is_idempotent(input: Markdownish) -> bool {
        let once = normalize(&input.0);
        normalize(&once) == once
    }

    #[quickcheck_macros::quickcheck]
    fn prop_normalize_is_idempotent_on_any_text(input: String) -> bool {
        let once = normalize(&input);
        normalize(&once) == once
    }
}
