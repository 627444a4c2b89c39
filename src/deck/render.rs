//! Rendering collaborators. Renderers only ever see `&Deck`.

use std::fmt::Write;

use super::slide::{Slide, SlideBody};
use super::Deck;

const DEFAULT_DOCUMENT_TITLE: &str = "Presentation";

/// Turns a deck snapshot into an output artifact.
pub trait DeckRenderer {
    fn render(&self, deck: &Deck) -> String;
}

/// Renders a standalone HTML document, one `<section>` per slide.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer;

impl DeckRenderer for HtmlRenderer {
    fn render(&self, deck: &Deck) -> String {
        let document_title = deck
            .title_slide()
            .and_then(Slide::title)
            .unwrap_or(DEFAULT_DOCUMENT_TITLE);

        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(out, "<title>{}</title>", escape_html(document_title));
        out.push_str("</head>\n<body>\n");
        for slide in deck.slides() {
            out.push_str(slide.markup());
            out.push('\n');
        }
        out.push_str("</body>\n</html>\n");
        out
    }
}

/// Renders the deck as pretty JSON for external exporters.
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer;

impl DeckRenderer for JsonRenderer {
    fn render(&self, deck: &Deck) -> String {
        match serde_json::to_string_pretty(deck) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("deck JSON serialization failed: {err}");
                "{\"slides\":[]}".to_string()
            }
        }
    }
}

pub(crate) fn slide_markup(slide: &Slide) -> String {
    let mut out = String::new();
    match slide.body() {
        SlideBody::Title { authors, date } => {
            out.push_str("<section class=\"slide slide-title\">");
            push_headings(&mut out, slide.title(), slide.subtitle());
            let _ = write!(
                out,
                "<p class=\"byline\">{}</p>",
                escape_html(&authors.join(", "))
            );
            let _ = write!(out, "<p class=\"date\">{}</p>", escape_html(date));
        }
        SlideBody::Agenda { points } => {
            out.push_str("<section class=\"slide slide-agenda\">");
            push_headings(&mut out, slide.title(), slide.subtitle());
            push_list(&mut out, points);
        }
        SlideBody::Content { columns } => {
            let _ = write!(
                out,
                "<section class=\"slide slide-content columns-{}\">",
                columns.len()
            );
            push_headings(&mut out, slide.title(), slide.subtitle());
            out.push_str("<div class=\"columns\">");
            for column in columns {
                out.push_str("<div class=\"column\">");
                push_list(&mut out, column);
                out.push_str("</div>");
            }
            out.push_str("</div>");
        }
    }
    out.push_str("</section>");
    out
}

fn push_headings(out: &mut String, title: Option<&str>, subtitle: Option<&str>) {
    if let Some(title) = title {
        let _ = write!(out, "<h1>{}</h1>", escape_html(title));
    }
    if let Some(subtitle) = subtitle {
        let _ = write!(out, "<h2>{}</h2>", escape_html(subtitle));
    }
}

fn push_list(out: &mut String, items: &[String]) {
    out.push_str("<ul>");
    for item in items {
        let _ = write!(out, "<li>{}</li>", escape_html(item));
    }
    out.push_str("</ul>");
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
