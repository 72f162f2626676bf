//! LaTeX document skeleton for a paper.

use std::sync::OnceLock;

use regex::Regex;

use confdoc_common::DocumentRecord;

use crate::indent;

fn blank_line_regex() -> &'static Regex {
    static BLANK_LINE: OnceLock<Regex> = OnceLock::new();
    BLANK_LINE.get_or_init(|| Regex::new(r"\n\s*\n").expect("blank line pattern compiles"))
}

/// Body text split on blank lines, each segment trimmed, empty segments dropped.
pub fn body_segments(content: &str) -> Vec<&str> {
    blank_line_regex()
        .split(content)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn latex_block(label: &str, lines: &str) -> String {
    format!("- **{}:**  \n  ```latex\n{}  ```\n\n", label, lines)
}

/// Render the paper as fenced LaTeX snippets: title page, abstract, body
/// (first segment under "Introduction", the rest as numbered sections) and
/// author biography.
pub fn render_document_template(record: &DocumentRecord) -> String {
    let mut doc = String::from("## LaTeX Document Generation\n\n");

    let title_page = format!(
        "  \\documentclass{{article}}\n  \\title{{{}}}\n  \\author{{{}}}\n  \\date{{\\today}}\n  \\begin{{document}}\n  \\maketitle\n",
        record.title,
        record.authors.join(" \\and "),
    );
    doc.push_str(&latex_block("Title Page", &title_page));

    let abstract_section = format!(
        "  \\begin{{abstract}}\n{}\n  \\end{{abstract}}\n",
        indent(&record.abstract_text, "  "),
    );
    doc.push_str(&latex_block("Abstract Section", &abstract_section));

    let mut body = String::from("  \\section{Introduction}\n");
    for (i, segment) in body_segments(&record.content).into_iter().enumerate() {
        if i > 0 {
            body.push_str(&format!("  \\section{{Section {}}}\n", i));
        }
        body.push_str(&format!("{}\n\n", indent(segment, "  ")));
    }
    doc.push_str(&latex_block("Main Content Section", &body));

    let biography = format!(
        "  \\section{{Author Biography}}\n{}\n\n  \\end{{document}}\n",
        indent(&record.biography, "  "),
    );
    doc.push_str(&latex_block("Author Biography Section", &biography));

    doc
}
