//! Markdown-to-prose conversion.
//!
//! Markdown documents carry structure (headings, code, tables, front matter)
//! that would skew word and sentence statistics. Parsing with pulldown-cmark
//! lets us keep just the running prose.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Reduce a markdown document to its prose.
///
/// Headings, fenced and indented code, inline code, tables, HTML and YAML
/// front matter are dropped. Emphasis, link text, list items and block quotes
/// are kept as plain text. Block boundaries become spaces.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn strip_to_prose(text: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS;

    let mut prose = String::with_capacity(text.len());
    let mut hidden: usize = 0;

    for event in Parser::new_ext(text, options) {
        match event {
            Event::Start(
                Tag::CodeBlock(_) | Tag::Heading { .. } | Tag::Table(_) | Tag::MetadataBlock(_),
            ) => hidden += 1,
            Event::End(
                TagEnd::CodeBlock | TagEnd::Heading(_) | TagEnd::Table | TagEnd::MetadataBlock(_),
            ) => hidden = hidden.saturating_sub(1),

            Event::Text(t) if hidden == 0 => prose.push_str(&t),
            Event::SoftBreak | Event::HardBreak if hidden == 0 => prose.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Item) if hidden == 0 => prose.push(' '),

            _ => {}
        }
    }

    prose
}
