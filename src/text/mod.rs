//! The text-commit bridge: a modal draft opened by the text tool.
//!
//! A draft collects text (optionally transliterated through a
//! [`SuggestionLookup`]) and, when confirmed, yields a `TextLabel` object for
//! the canvas to commit like any other shape.

use egui::{Color32, Pos2, pos2};

use crate::element::{DrawableObject, FontSpec, factory};

mod input_tools;
mod languages;
mod suggest;

pub use input_tools::InputToolsProvider;
pub use languages::{LANGUAGES, Language, label_for};
pub use suggest::{
    MIN_FRAGMENT_CHARS, SuggestionCallback, SuggestionLookup, SuggestionProvider,
    SuggestionRequest, parse_envelope, replace_trailing_word, trailing_word,
};

/// Footprint of the floating editor, used to keep it inside the canvas
pub const EDITOR_WIDTH: f32 = 340.0;
pub const EDITOR_HEIGHT: f32 = 200.0;

/// Where to show the editor for a click at `anchor` on a `width` x `height` canvas
pub fn editor_position(anchor: Pos2, width: f32, height: f32) -> Pos2 {
    pos2(
        anchor.x.min(width - EDITOR_WIDTH).max(0.0),
        anchor.y.min(height - EDITOR_HEIGHT).max(0.0),
    )
}

/// An open text draft
#[derive(Debug, Clone, PartialEq)]
pub struct TextDraft {
    /// Where the label is placed on confirm
    pub anchor: Pos2,
    /// Top-left corner of the editor window, canvas-local
    pub editor_pos: Pos2,
    pub text: String,
    pub color: Color32,
}

/// Holds at most one draft plus the suggestion lookup that serves it
#[derive(Debug)]
pub struct TextBridge {
    draft: Option<TextDraft>,
    language: String,
    font: FontSpec,
    lookup: SuggestionLookup,
}

impl TextBridge {
    pub fn new(lookup: SuggestionLookup, language: impl Into<String>, font: FontSpec) -> Self {
        Self {
            draft: None,
            language: language.into(),
            font,
            lookup,
        }
    }

    /// Open a draft at `anchor`, replacing any draft already open
    pub fn open(&mut self, anchor: Pos2, color: Color32, width: f32, height: f32) {
        if self.draft.is_some() {
            log::debug!("replacing open text draft");
        }
        self.lookup.clear();
        self.draft = Some(TextDraft {
            anchor,
            editor_pos: editor_position(anchor, width, height),
            text: String::new(),
            color,
        });
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&TextDraft> {
        self.draft.as_ref()
    }

    /// Replace the draft text and look up suggestions for its trailing word.
    /// Returns true when a provider request was issued.
    pub fn text_changed(&mut self, text: impl Into<String>) -> bool {
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };
        draft.text = text.into();
        self.lookup.text_changed(&draft.text, &self.language)
    }

    /// Swap the trailing word for `suggestion` and clear the suggestions
    pub fn apply_suggestion(&mut self, suggestion: &str) {
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        draft.text = replace_trailing_word(&draft.text, suggestion);
        self.lookup.clear();
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        let language = language.into();
        if language != self.language {
            log::debug!("transliteration language {} -> {}", self.language, language);
            self.language = language;
        }
        self.lookup.clear();
    }

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    pub fn set_font(&mut self, font: FontSpec) {
        self.font = font;
    }

    pub fn suggestions(&self) -> Vec<String> {
        self.lookup.suggestions()
    }

    /// Close the draft, returning the label to commit. Blank text yields nothing.
    pub fn confirm(&mut self) -> Option<DrawableObject> {
        let draft = self.draft.take()?;
        self.lookup.clear();
        if draft.text.trim().is_empty() {
            log::debug!("discarding blank text draft");
            return None;
        }
        Some(factory::text(
            draft.color,
            draft.anchor,
            draft.text,
            self.font.clone(),
        ))
    }

    pub fn cancel(&mut self) {
        if self.draft.take().is_some() {
            log::debug!("text draft cancelled");
        }
        self.lookup.clear();
    }
}
