//! Paper collection XML parser.
//!
//! Expected shape:
//! ```text
//! <papers>
//!   <paper>
//!     <paper_title>…</paper_title>
//!     <authors><author>…</author>…</authors>
//!     <abstract>…</abstract>
//!     <content>…</content>
//!     <author_biography>…</author_biography>
//!   </paper>
//! </papers>
//! ```
//! The root element's name is not checked. Only direct `<paper>` children of
//! the root are records, only direct children of a paper are fields, and a
//! repeated field keeps its first occurrence. A field's text is the text that
//! precedes its first child element.

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, warn};

use confdoc_common::{ConfdocError, RawCollection, RawPaper, RequiredField, Result};

/// Where text events are currently being collected.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Capture {
    Field(RequiredField),
    Author,
}

/// Strip a surrounding markdown code fence (```` ```xml … ``` ````) if present.
/// Input without a fence is returned unchanged.
pub fn strip_markdown_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return raw;
    };
    let Some(newline) = rest.find('\n') else {
        return raw;
    };
    let body = &rest[newline + 1..];
    body.trim_end().strip_suffix("```").unwrap_or(body)
}

/// Parse a paper collection. Malformed markup yields `ConfdocError::Xml`,
/// well-formed markup of the wrong overall shape yields `ConfdocError::Structure`.
pub fn parse_papers_xml(xml: &str) -> Result<RawCollection> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut papers = Vec::new();
    let mut depth: usize = 0;
    let mut root_closed = false;
    let mut current: Option<RawPaper> = None;
    let mut in_authors = false;
    let mut capture: Option<(Capture, usize)> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            ConfdocError::Xml(format!("{} at byte {}", e, reader.error_position()))
        })?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                if depth == 0 && root_closed {
                    return Err(ConfdocError::Structure("more than one root element".into()));
                }
                // Text after a child element no longer belongs to the field.
                capture = None;
                depth += 1;

                let name = e.local_name();
                match (depth, name.as_ref()) {
                    (2, b"paper") => current = Some(RawPaper::default()),
                    (3, b"authors") => {
                        if let Some(p) = current.as_mut() {
                            if p.authors.is_none() {
                                p.authors = Some(Vec::new());
                                in_authors = true;
                            }
                        }
                    }
                    (3, tag) => {
                        if let Some(p) = current.as_mut() {
                            let field = std::str::from_utf8(tag).ok().and_then(RequiredField::from_tag);
                            if let Some(field) = field {
                                if open_field(p, field) {
                                    capture = Some((Capture::Field(field), depth));
                                }
                            }
                        }
                    }
                    (4, b"author") if in_authors => {
                        if let Some(authors) = current.as_mut().and_then(|p| p.authors.as_mut()) {
                            authors.push(String::new());
                            capture = Some((Capture::Author, depth));
                        }
                    }
                    _ => {}
                }

                if is_empty {
                    close_element(&mut depth, &mut capture, &mut in_authors, &mut current, &mut papers, &mut root_closed);
                }
            }
            Event::End(_) => {
                close_element(&mut depth, &mut capture, &mut in_authors, &mut current, &mut papers, &mut root_closed);
            }
            Event::Text(ref e) => {
                let text = e
                    .unescape()
                    .map_err(|err| ConfdocError::Xml(format!("{} at byte {}", err, reader.buffer_position())))?;
                if depth == 0 {
                    if !text.trim().is_empty() {
                        return Err(ConfdocError::Structure("text outside of the root element".into()));
                    }
                    continue;
                }
                append_text(&mut current, capture, depth, &text);
            }
            Event::CData(e) => {
                let raw = e.into_inner();
                let text = String::from_utf8_lossy(&raw);
                if depth == 0 {
                    return Err(ConfdocError::Structure("CDATA outside of the root element".into()));
                }
                append_text(&mut current, capture, depth, &text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(ConfdocError::Xml(format!("{} element(s) left unclosed", depth)));
    }
    if !root_closed {
        return Err(ConfdocError::Structure("no root element".into()));
    }

    debug!(papers = papers.len(), "Parsed paper collection");
    Ok(RawCollection { papers })
}

/// Mark a single-valued field as present. Returns false for a repeated field.
fn open_field(paper: &mut RawPaper, field: RequiredField) -> bool {
    let slot = match field {
        RequiredField::Title     => &mut paper.paper_title,
        RequiredField::Abstract  => &mut paper.abstract_text,
        RequiredField::Content   => &mut paper.content,
        RequiredField::Biography => &mut paper.author_biography,
        RequiredField::Authors   => return false,
    };
    if slot.is_some() {
        warn!(tag = field.tag(), "Ignoring repeated field");
        return false;
    }
    *slot = Some(String::new());
    true
}

fn append_text(current: &mut Option<RawPaper>, capture: Option<(Capture, usize)>, depth: usize, text: &str) {
    let (Some(paper), Some((target, at))) = (current.as_mut(), capture) else {
        return;
    };
    if at != depth {
        return;
    }
    let slot = match target {
        Capture::Field(RequiredField::Title)     => paper.paper_title.as_mut(),
        Capture::Field(RequiredField::Abstract)  => paper.abstract_text.as_mut(),
        Capture::Field(RequiredField::Content)   => paper.content.as_mut(),
        Capture::Field(RequiredField::Biography) => paper.author_biography.as_mut(),
        Capture::Field(RequiredField::Authors)   => None,
        Capture::Author => paper.authors.as_mut().and_then(|a| a.last_mut()),
    };
    if let Some(slot) = slot {
        slot.push_str(text);
    }
}

fn close_element(
    depth: &mut usize,
    capture: &mut Option<(Capture, usize)>,
    in_authors: &mut bool,
    current: &mut Option<RawPaper>,
    papers: &mut Vec<RawPaper>,
    root_closed: &mut bool,
) {
    if matches!(capture, Some((_, at)) if *at == *depth) {
        *capture = None;
    }
    match *depth {
        1 => *root_closed = true,
        2 => {
            if let Some(p) = current.take() {
                papers.push(p);
            }
        }
        3 => *in_authors = false,
        _ => {}
    }
    *depth = depth.saturating_sub(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_paper() {
        let xml = r#"<?xml version="1.0"?>
<papers>
  <paper>
    <paper_title>IoT Applications in Smart Homes</paper_title>
    <authors>
      <author>Olivia Martin</author>
    </authors>
    <abstract>This study explores IoT &amp; homes.</abstract>
    <content>The adoption of IoT.</content>
    <author_biography>Olivia Martin is an expert.</author_biography>
  </paper>
</papers>"#;

        let collection = parse_papers_xml(xml).unwrap();
        assert_eq!(collection.len(), 1);
        let p = &collection.papers[0];
        assert_eq!(p.paper_title.as_deref(), Some("IoT Applications in Smart Homes"));
        assert_eq!(p.authors, Some(vec!["Olivia Martin".to_string()]));
        assert_eq!(p.abstract_text.as_deref(), Some("This study explores IoT & homes."));
        assert_eq!(p.content.as_deref(), Some("The adoption of IoT."));
    }

    #[test]
    fn test_absent_and_blank_fields_are_distinguished() {
        let xml = "<papers><paper><paper_title/><authors></authors><content>   </content></paper></papers>";
        let p = &parse_papers_xml(xml).unwrap().papers[0];
        assert_eq!(p.paper_title.as_deref(), Some(""));
        assert_eq!(p.authors, Some(vec![]));
        assert_eq!(p.abstract_text, None);
        assert_eq!(p.content.as_deref(), Some("   "));
        assert_eq!(p.author_biography, None);
    }

    #[test]
    fn test_only_direct_children_count() {
        let xml = "<papers>\
            <archive><paper><paper_title>Nested</paper_title></paper></archive>\
            <paper><meta><abstract>deep</abstract></meta><abstract>top<b>bold</b> tail</abstract></paper>\
            </papers>";
        let collection = parse_papers_xml(xml).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.papers[0].abstract_text.as_deref(), Some("top"));
        assert_eq!(collection.papers[0].paper_title, None);
    }

    #[test]
    fn test_repeated_field_keeps_first() {
        let xml = "<papers><paper><abstract>first</abstract><abstract>second</abstract></paper></papers>";
        let p = &parse_papers_xml(xml).unwrap().papers[0];
        assert_eq!(p.abstract_text.as_deref(), Some("first"));
    }

    #[test]
    fn test_cdata_is_field_text() {
        let xml = "<papers><paper><content><![CDATA[a < b]]></content></paper></papers>";
        let p = &parse_papers_xml(xml).unwrap().papers[0];
        assert_eq!(p.content.as_deref(), Some("a < b"));
    }

    #[test]
    fn test_empty_root_has_no_papers() {
        let collection = parse_papers_xml("<papers/>").unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_malformed_inputs_are_structural_errors() {
        for xml in [
            "",
            "just some prose",
            "<papers><paper></papers>",
            "<papers><paper>",
            "<papers/><papers/>",
        ] {
            let err = parse_papers_xml(xml).unwrap_err();
            assert!(err.is_structural(), "expected structural error for {:?}, got {}", xml, err);
        }
    }

    #[test]
    fn test_strip_markdown_fence() {
        let fenced = "```xml\n<papers/>\n```\n";
        assert_eq!(strip_markdown_fence(fenced).trim(), "<papers/>");
        assert_eq!(strip_markdown_fence("<papers/>"), "<papers/>");
        // Unterminated fence: everything after the opening line.
        assert_eq!(strip_markdown_fence("```\n<papers/>").trim(), "<papers/>");
    }
}
