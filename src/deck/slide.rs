use std::fmt;

use serde::{Deserialize, Serialize};

use super::render::slide_markup;

/// Kind of a slide, which also decides where it may sit in the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideKind {
    /// Opening slide, always at index 0 when present
    Title,
    /// Agenda slide, directly after the title slide
    Agenda,
    /// Regular content slide
    Content,
}

impl fmt::Display for SlideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SlideKind::Title => "title",
            SlideKind::Agenda => "agenda",
            SlideKind::Content => "content",
        };
        write!(f, "{name}")
    }
}

/// Kind-specific payload of a slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlideBody {
    Title { authors: Vec<String>, date: String },
    Agenda { points: Vec<String> },
    Content { columns: Vec<Vec<String>> },
}

impl SlideBody {
    pub fn kind(&self) -> SlideKind {
        match self {
            SlideBody::Title { .. } => SlideKind::Title,
            SlideBody::Agenda { .. } => SlideKind::Agenda,
            SlideBody::Content { .. } => SlideKind::Content,
        }
    }
}

/// One entry of a [`Deck`](super::Deck).
///
/// The rendered markup is cached and refreshed by every setter, so readers can
/// call [`Slide::markup`] without re-rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slide {
    title: Option<String>,
    subtitle: Option<String>,
    #[serde(flatten)]
    body: SlideBody,
    #[serde(skip)]
    rendered_markup: String,
}

impl Slide {
    pub fn new(title: Option<String>, subtitle: Option<String>, body: SlideBody) -> Self {
        let mut slide = Self {
            title: non_blank(title),
            subtitle: non_blank(subtitle),
            body,
            rendered_markup: String::new(),
        };
        slide.refresh_markup();
        slide
    }

    pub fn kind(&self) -> SlideKind {
        self.body.kind()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn body(&self) -> &SlideBody {
        &self.body
    }

    /// Cached HTML for this slide.
    pub fn markup(&self) -> &str {
        &self.rendered_markup
    }

    pub(crate) fn set_title(&mut self, title: Option<String>) {
        self.title = non_blank(title);
        self.refresh_markup();
    }

    pub(crate) fn set_subtitle(&mut self, subtitle: Option<String>) {
        self.subtitle = non_blank(subtitle);
        self.refresh_markup();
    }

    /// Replaces the payload. The kind may not change, since that would break
    /// the deck's positional rules; a mismatched body is ignored.
    pub(crate) fn set_body(&mut self, body: SlideBody) -> bool {
        if body.kind() != self.kind() {
            log::warn!(
                "refusing to change a {} slide into a {} slide",
                self.kind(),
                body.kind()
            );
            return false;
        }
        self.body = body;
        self.refresh_markup();
        true
    }

    fn refresh_markup(&mut self) {
        self.rendered_markup = slide_markup(self);
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{Slide, SlideBody, SlideKind};

    fn content(columns: Vec<Vec<&str>>) -> SlideBody {
        SlideBody::Content {
            columns: columns
                .into_iter()
                .map(|col| col.into_iter().map(str::to_string).collect())
                .collect(),
        }
    }

    #[test]
    fn blank_subtitle_is_dropped() {
        let slide = Slide::new(Some("Intro".into()), Some("  ".into()), content(vec![vec!["a"]]));
        assert_eq!(slide.subtitle(), None);
        assert_eq!(slide.kind(), SlideKind::Content);
    }

    #[test]
    fn setters_refresh_markup() {
        let mut slide = Slide::new(Some("Old".into()), None, content(vec![vec!["a"]]));
        assert!(slide.markup().contains("Old"));
        slide.set_title(Some("New".into()));
        assert!(slide.markup().contains("New"));
        assert!(!slide.markup().contains("Old"));

        assert!(slide.set_body(content(vec![vec!["x"], vec!["y"]])));
        assert!(slide.markup().contains("columns-2"));
    }

    #[test]
    fn body_kind_cannot_change() {
        let mut slide = Slide::new(Some("C".into()), None, content(vec![vec!["a"]]));
        let before = slide.clone();
        assert!(!slide.set_body(SlideBody::Agenda {
            points: vec!["p".into()]
        }));
        assert_eq!(slide, before);
    }
}
