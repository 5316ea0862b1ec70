//! HTML snapshot form of rich documents.
//!
//! Supported content is paragraphs of text with hard breaks. Other block
//! elements become paragraphs; inline formatting is flattened to its text.

use std::rc::Rc;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Node, NodeData, RcDom};

use super::rich::{plain_text_paragraphs, Inline, Paragraph};

/// Serialized rich document, used as the undo snapshot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HtmlSnapshot(String);

impl HtmlSnapshot {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for HtmlSnapshot {
    fn from(markup: String) -> Self {
        Self(markup)
    }
}

/// Parse markup (or bare text) into paragraphs
pub(super) fn parse_paragraphs(markup: &str) -> Vec<Paragraph> {
    let dom = parse_document(RcDom::default(), Default::default()).one(markup);
    let mut collector = ParagraphCollector::default();
    collector.visit(&dom.document);
    collector.finish()
}

pub(super) fn serialize_paragraphs(paragraphs: &[Paragraph]) -> String {
    let mut out = String::new();
    for paragraph in paragraphs {
        out.push_str("<p>");
        for inline in paragraph.inlines() {
            match inline {
                Inline::Text(text) => escape_into(text, &mut out),
                Inline::HardBreak => out.push_str("<br>"),
            }
        }
        out.push_str("</p>");
    }
    out
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

#[derive(Default)]
struct ParagraphCollector {
    paragraphs: Vec<Paragraph>,
    current: Option<Paragraph>,
}

impl ParagraphCollector {
    fn visit(&mut self, node: &Rc<Node>) {
        match node.data {
            NodeData::Element { ref name, .. } => match name.local.as_ref() {
                "head" | "style" | "script" | "title" => {}
                "br" => self.current_mut().push_break(),
                "p" | "div" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "li" | "blockquote"
                | "pre" => {
                    self.open_block();
                    self.visit_children(node);
                    self.close_block();
                }
                _ => self.visit_children(node),
            },
            NodeData::Text { ref contents } => {
                let text = contents.borrow();
                self.push_text(&text);
            }
            _ => self.visit_children(node),
        }
    }

    fn visit_children(&mut self, node: &Rc<Node>) {
        for child in node.children.borrow().iter() {
            self.visit(child);
        }
    }

    fn current_mut(&mut self) -> &mut Paragraph {
        self.current.get_or_insert_with(Paragraph::new)
    }

    /// A blank open paragraph is only a container; drop it
    fn open_block(&mut self) {
        if let Some(paragraph) = self.current.take() {
            if !paragraph.text().trim().is_empty() {
                self.paragraphs.push(paragraph);
            }
        }
        self.current = Some(Paragraph::new());
    }

    fn close_block(&mut self) {
        if let Some(paragraph) = self.current.take() {
            self.paragraphs.push(paragraph);
        }
    }

    fn push_text(&mut self, text: &str) {
        match self.current.as_mut() {
            Some(paragraph) => paragraph.push_text(text),
            None if text.trim().is_empty() => {}
            None => {
                // Bare text outside any block follows the plain-text rules
                let mut chunks = plain_text_paragraphs(text).into_iter();
                if let Some(first) = chunks.next() {
                    self.current = Some(first);
                }
                for chunk in chunks {
                    self.close_block();
                    self.current = Some(chunk);
                }
            }
        }
    }

    fn finish(mut self) -> Vec<Paragraph> {
        self.close_block();
        self.paragraphs
    }
}
