//! Ordered slide deck.
//!
//! Positional rules:
//!
//! 1. at most one title slide, at index 0;
//! 2. at most one agenda slide, right after the title slide (or first when
//!    there is no title slide);
//! 3. content slides fill the remaining positions.
//!
//! [`Deck::reorder_slide`] moves slides freely and does not re-check these
//! rules, so a caller may deliberately move the title slide away from the
//! front. `set_title_slide` puts the title back at 0 and re-seats an existing
//! agenda behind it. `set_agenda_slide` places the agenda directly after the
//! title wherever the title currently sits.

mod error;
mod render;
mod slide;

use serde::Serialize;

pub use error::DeckError;
pub use render::{DeckRenderer, HtmlRenderer, JsonRenderer};
pub use slide::{Slide, SlideBody, SlideKind};

/// Maximum number of bullet columns on a content slide.
pub const MAX_COLUMNS: usize = 3;

const AGENDA_TITLE: &str = "Agenda";

/// The slides under construction in one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Deck {
    slides: Vec<Slide>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn kinds(&self) -> Vec<SlideKind> {
        self.slides.iter().map(Slide::kind).collect()
    }

    pub fn title_slide(&self) -> Option<&Slide> {
        self.position_of(SlideKind::Title).map(|idx| &self.slides[idx])
    }

    pub fn agenda_slide(&self) -> Option<&Slide> {
        self.position_of(SlideKind::Agenda).map(|idx| &self.slides[idx])
    }

    /// Sets the title slide, replacing an existing one rather than adding a
    /// second. The title slide always ends up at index 0, with an existing
    /// agenda slide directly behind it.
    pub fn set_title_slide(
        &mut self,
        title: impl Into<String>,
        subtitle: Option<&str>,
        authors: Vec<String>,
        date: impl Into<String>,
    ) -> Result<&Slide, DeckError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DeckError::Validation(
                "title slide needs a non-empty title".to_string(),
            ));
        }
        let subtitle = subtitle.map(str::to_string);
        let body = SlideBody::Title {
            authors,
            date: date.into(),
        };

        match self.position_of(SlideKind::Title) {
            Some(idx) => {
                let mut slide = self.slides.remove(idx);
                slide.set_title(Some(title));
                slide.set_subtitle(subtitle);
                slide.set_body(body);
                self.slides.insert(0, slide);
            }
            None => self.slides.insert(0, Slide::new(Some(title), subtitle, body)),
        }
        if let Some(idx) = self.position_of(SlideKind::Agenda) {
            if idx != 1 {
                let agenda = self.slides.remove(idx);
                self.slides.insert(1, agenda);
            }
        }
        log::debug!("title slide set, deck has {} slides", self.slides.len());
        Ok(&self.slides[0])
    }

    /// Sets the agenda slide, replacing an existing one. It lands directly
    /// after the title slide, or first when there is none.
    pub fn set_agenda_slide(&mut self, points: Vec<String>) -> Result<&Slide, DeckError> {
        if points.is_empty() {
            return Err(DeckError::Validation(
                "agenda needs at least one point".to_string(),
            ));
        }
        let slide = Slide::new(
            Some(AGENDA_TITLE.to_string()),
            None,
            SlideBody::Agenda { points },
        );

        if let Some(idx) = self.position_of(SlideKind::Agenda) {
            self.slides.remove(idx);
        }
        let target = self.agenda_index();
        self.slides.insert(target, slide);
        log::debug!("agenda slide set at index {target}");
        Ok(&self.slides[target])
    }

    /// Appends a content slide with one to three bullet columns.
    pub fn add_content_slide(
        &mut self,
        title: impl Into<String>,
        subtitle: Option<&str>,
        columns: Vec<Vec<String>>,
    ) -> Result<&Slide, DeckError> {
        if columns.is_empty() || columns.len() > MAX_COLUMNS {
            return Err(DeckError::Validation(format!(
                "content slide needs 1 to {MAX_COLUMNS} columns, got {}",
                columns.len()
            )));
        }
        if let Some(idx) = columns.iter().position(Vec::is_empty) {
            return Err(DeckError::Validation(format!(
                "column {} has no bullet points",
                idx + 1
            )));
        }
        let slide = Slide::new(
            Some(title.into()),
            subtitle.map(str::to_string),
            SlideBody::Content { columns },
        );
        self.slides.push(slide);
        log::debug!("content slide appended at index {}", self.slides.len() - 1);
        Ok(&self.slides[self.slides.len() - 1])
    }

    /// Moves the slide at `from` to `to`, shifting the slides in between by
    /// one. Both indices must lie in `[0, len - 1]`.
    pub fn reorder_slide(&mut self, from: usize, to: usize) -> Result<(), DeckError> {
        let len = self.slides.len();
        for index in [from, to] {
            if index >= len {
                return Err(DeckError::IndexOutOfRange {
                    index: i64::try_from(index).unwrap_or(i64::MAX),
                    len,
                });
            }
        }
        if from != to {
            let slide = self.slides.remove(from);
            self.slides.insert(to, slide);
        }
        log::debug!("moved slide {from} -> {to}");
        Ok(())
    }

    /// Renders the deck as an HTML document.
    pub fn render(&self) -> String {
        HtmlRenderer.render(self)
    }

    /// Renders the deck with a caller-chosen renderer.
    pub fn render_with<R: DeckRenderer>(&self, renderer: &R) -> String {
        renderer.render(self)
    }

    /// Checks the positional rules. `reorder_slide` may legitimately break
    /// them; `set_title_slide` restores them, and so does `set_agenda_slide`
    /// when the title slide is at 0 or absent.
    pub fn check_layout(&self) -> Result<(), DeckError> {
        let mut titles = 0;
        let mut agendas = 0;
        for (idx, slide) in self.slides.iter().enumerate() {
            match slide.kind() {
                SlideKind::Title => {
                    titles += 1;
                    if idx != 0 {
                        return Err(DeckError::Validation(format!(
                            "title slide at index {idx}"
                        )));
                    }
                }
                SlideKind::Agenda => {
                    agendas += 1;
                    if idx != self.agenda_index() {
                        return Err(DeckError::Validation(format!(
                            "agenda slide at index {idx}"
                        )));
                    }
                }
                SlideKind::Content => {}
            }
        }
        if titles > 1 || agendas > 1 {
            return Err(DeckError::Validation(format!(
                "{titles} title and {agendas} agenda slides"
            )));
        }
        Ok(())
    }

    /// Directly after the title slide wherever it sits, else 0. Computed
    /// with any existing agenda slide already removed.
    fn agenda_index(&self) -> usize {
        self.position_of(SlideKind::Title).map_or(0, |idx| idx + 1)
    }

    fn position_of(&self, kind: SlideKind) -> Option<usize> {
        self.slides.iter().position(|slide| slide.kind() == kind)
    }
}
