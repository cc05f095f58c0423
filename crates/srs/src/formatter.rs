use serde::Serialize;

pub const DOCUMENT_TITLE: &str = "Software Requirements Specification (SRS)";

const MAX_HEADING_DEPTH: u8 = 9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading { text: String, depth: u8 },
    Paragraph { text: String },
    Bullet { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outline {
    pub title: String,
    pub blocks: Vec<Block>,
}

/// Best-effort structural parse of synthesized text, line by line.
///
/// - A line starting with a digit, or with no lowercase and at least one
///   uppercase letter, is a heading. Its depth is the number of numeric
///   segments in a dotted leading token (`2.1` is depth 2), otherwise 1 for
///   uppercase lines and 2 for the rest.
/// - A line indented by two or more spaces is a bullet.
/// - Any other non-blank line is a paragraph. Blank lines are dropped.
///
/// Ambiguous lines (uppercase prose, indented numbered items) follow the
/// first matching rule.
pub fn format(content: &str) -> Outline {
    let blocks = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(classify)
        .collect();

    Outline {
        title: DOCUMENT_TITLE.to_string(),
        blocks,
    }
}

fn classify(line: &str) -> Block {
    let text = line.trim().to_string();

    let starts_with_digit = line.chars().next().is_some_and(|c| c.is_ascii_digit());
    if starts_with_digit || is_uppercase(line) {
        let depth = heading_depth(line);
        return Block::Heading { text, depth };
    }

    if line.starts_with("  ") {
        Block::Bullet { text }
    } else {
        Block::Paragraph { text }
    }
}

fn is_uppercase(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}

fn heading_depth(line: &str) -> u8 {
    let numbered = line
        .split_whitespace()
        .next()
        .filter(|token| token.contains('.'))
        .map(|token| {
            token
                .split('.')
                .filter(|segment| !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()))
                .count()
        })
        .unwrap_or(0);

    match numbered {
        0 if is_uppercase(line) => 1,
        0 => 2,
        n => n.min(MAX_HEADING_DEPTH as usize) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(text: &str, depth: u8) -> Block {
        Block::Heading {
            text: text.to_string(),
            depth,
        }
    }

    #[test]
    fn numbered_heading_at_start() {
        let outline = format("1. Introduction\nThis project builds a shop.");
        assert_eq!(outline.title, DOCUMENT_TITLE);
        assert_eq!(outline.blocks[0], heading("1. Introduction", 1));
        assert_eq!(
            outline.blocks[1],
            Block::Paragraph {
                text: "This project builds a shop.".to_string()
            }
        );
    }

    #[test]
    fn indented_line_is_bullet_with_marker_kept() {
        let outline = format("  - risk: vendor lock-in");
        assert_eq!(
            outline.blocks,
            vec![Block::Bullet {
                text: "- risk: vendor lock-in".to_string()
            }]
        );
    }

    #[test]
    fn depth_follows_numeric_segments() {
        let outline = format("2.1 Functional Requirements\n2.1.3. Checkout\n3 Scope\nOVERVIEW\nAPI NOTES 2\n");
        assert_eq!(
            outline.blocks,
            vec![
                heading("2.1 Functional Requirements", 2),
                heading("2.1.3. Checkout", 3),
                heading("3 Scope", 2),
                heading("OVERVIEW", 1),
                heading("API NOTES 2", 1),
            ]
        );
    }

    #[test]
    fn deep_numbering_is_clamped() {
        let outline = format("1.2.3.4.5.6.7.8.9.10.11 Too deep");
        assert_eq!(outline.blocks, vec![heading("1.2.3.4.5.6.7.8.9.10.11 Too deep", 9)]);
    }

    #[test]
    fn blank_lines_are_dropped() {
        let outline = format("\n\n   \nplain text\n\n");
        assert_eq!(
            outline.blocks,
            vec![Block::Paragraph {
                text: "plain text".to_string()
            }]
        );
        assert!(format("").blocks.is_empty());
    }

    #[test]
    fn indented_number_is_a_bullet() {
        let outline = format("  1. first step");
        assert_eq!(
            outline.blocks,
            vec![Block::Bullet {
                text: "1. first step".to_string()
            }]
        );
    }
}
