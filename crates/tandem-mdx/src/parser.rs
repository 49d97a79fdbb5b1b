//! Comparison page parser.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::codeblock::{extract_filename, CodeBlock, Language, Pane};
use crate::frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};

/// A parsed comparison page.
#[derive(Debug, Clone)]
pub struct ParsedDoc {
    /// Parsed frontmatter (if present)
    pub frontmatter: Option<Frontmatter>,

    /// Markdown content (without frontmatter)
    pub content: String,

    /// Extracted code blocks
    pub code_blocks: Vec<CodeBlock>,

    /// Document headings, in source order
    pub headings: Vec<Heading>,
}

/// A heading extracted from a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (1-6)
    pub depth: u8,
}

/// Errors that can occur when parsing a page.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Parse a comparison page.
///
/// Extracts frontmatter, code blocks with their pane markers, and the
/// document's headings.
pub fn parse_doc(source: &str) -> Result<ParsedDoc, ParseError> {
    // Extract frontmatter first
    let (frontmatter, content) = extract_frontmatter(source)?;

    let mut code_blocks = Vec::new();
    let mut headings = Vec::new();

    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(content, options);

    let mut current_code_block: Option<(String, usize)> = None; // (info, line)
    let mut current_heading: Option<(u8, String)> = None; // (depth, text)
    let mut line_number = 1;

    // Count lines in frontmatter to offset line numbers
    let frontmatter_lines = source.len() - content.len();
    let frontmatter_line_offset = source[..frontmatter_lines].lines().count();

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let info = match &kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                current_code_block = Some((info, line_number + frontmatter_line_offset));
            }

            Event::Text(text) => {
                if let Some((ref info, start_line)) = current_code_block {
                    let language = Language::from_info(info);
                    let pane = Pane::from_info(info);
                    let filename = extract_filename(info);

                    let mut block = CodeBlock::new(language, pane, text.to_string(), start_line);
                    block.filename = filename;
                    code_blocks.push(block);
                } else if let Some((_, ref mut heading_text)) = current_heading {
                    heading_text.push_str(&text);
                }

                // Count newlines in text for line tracking
                line_number += text.matches('\n').count();
            }

            Event::Code(text) => {
                // Inline code inside a heading still contributes to its title
                if let Some((_, ref mut heading_text)) = current_heading {
                    heading_text.push_str(&text);
                }
            }

            Event::End(TagEnd::CodeBlock) => {
                current_code_block = None;
            }

            Event::Start(Tag::Heading { level, .. }) => {
                current_heading = Some((level as u8, String::new()));
            }

            Event::End(TagEnd::Heading(_)) => {
                if let Some((depth, title)) = current_heading.take() {
                    let id = slugify(&title);
                    headings.push(Heading { title, id, depth });
                }
            }

            Event::SoftBreak | Event::HardBreak => {
                line_number += 1;
            }

            _ => {}
        }
    }

    Ok(ParsedDoc {
        frontmatter,
        content: content.to_string(),
        code_blocks,
        headings,
    })
}

/// Convert a heading to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
