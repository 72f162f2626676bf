//! Shared fixtures for confdoc tests.

use confdoc_common::DocumentRecord;
use quick_xml::escape::escape;

pub use pretty_assertions;

/// The four-paper sample collection shipped in `demos/`.
pub const SAMPLE_PAPERS_XML: &str = include_str!("../../../demos/sample_papers.xml");

/// Titles of the sample papers, in document order.
pub const SAMPLE_TITLES: [&str; 4] = [
    "Deep Neural Networks for Stock Prediction",
    "IoT Applications in Smart Homes",
    "Solar Energy Efficiency",
    "Robotic Process Automation in Industry",
];

/// Builder for one `<paper>` element. The default paper is complete and valid.
#[derive(Debug, Clone)]
pub struct PaperXml {
    fields: Vec<(&'static str, Option<String>)>,
    authors: Option<Vec<String>>,
}

impl Default for PaperXml {
    fn default() -> Self {
        Self {
            fields: vec![
                ("paper_title", Some("Efficient Inference".to_string())),
                ("abstract", Some("AI helps.".to_string())),
                ("content", Some("AI improves efficiency. AI reduces cost.".to_string())),
                ("author_biography", Some("Ada is a researcher.".to_string())),
            ],
            authors: Some(vec!["Ada Lovelace".to_string()]),
        }
    }
}

impl PaperXml {
    /// Set a field's text. `tag` is one of `paper_title`, `abstract`,
    /// `content`, `author_biography`.
    pub fn with(mut self, tag: &'static str, text: &str) -> Self {
        match self.fields.iter_mut().find(|(t, _)| *t == tag) {
            Some(slot) => slot.1 = Some(text.to_string()),
            None => self.fields.push((tag, Some(text.to_string()))),
        }
        self
    }

    /// Drop an element entirely. `"authors"` drops the whole container.
    pub fn without(mut self, tag: &'static str) -> Self {
        if tag == "authors" {
            self.authors = None;
        } else if let Some(slot) = self.fields.iter_mut().find(|(t, _)| *t == tag) {
            slot.1 = None;
        }
        self
    }

    pub fn with_authors(mut self, authors: &[&str]) -> Self {
        self.authors = Some(authors.iter().map(|a| a.to_string()).collect());
        self
    }

    fn render(&self, out: &mut String) {
        fn element(out: &mut String, indent: &str, tag: &str, text: &str) {
            out.push_str(&format!("{indent}<{tag}>{}</{tag}>\n", escape(text)));
        }

        out.push_str("  <paper>\n");
        // Title first, then authors, then the remaining fields.
        let (title, rest) = self.fields.split_at(1);
        for (tag, text) in title {
            if let Some(text) = text {
                element(out, "    ", tag, text);
            }
        }
        if let Some(authors) = &self.authors {
            out.push_str("    <authors>\n");
            for author in authors {
                element(out, "      ", "author", author);
            }
            out.push_str("    </authors>\n");
        }
        for (tag, text) in rest {
            if let Some(text) = text {
                element(out, "    ", tag, text);
            }
        }
        out.push_str("  </paper>\n");
    }
}

/// Render a `<papers>` collection from builders.
pub fn paper_xml(papers: &[PaperXml]) -> String {
    let mut out = String::from("<papers>\n");
    for paper in papers {
        paper.render(&mut out);
    }
    out.push_str("</papers>\n");
    out
}

/// A validated record with the given abstract and content.
pub fn record(abstract_text: &str, content: &str) -> DocumentRecord {
    DocumentRecord {
        title: "Efficient Inference".to_string(),
        authors: vec!["Ada Lovelace".to_string(), "Alan Turing".to_string()],
        abstract_text: abstract_text.to_string(),
        content: content.to_string(),
        biography: "Ada is a researcher.".to_string(),
    }
}
