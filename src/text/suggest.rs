use std::sync::Arc;

use log::{debug, warn};
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::SuggestionError;

/// Shortest trailing word that is worth a lookup
pub const MIN_FRAGMENT_CHARS: usize = 2;

/// One lookup: a word fragment in a given language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub fragment: String,
    pub language: String,
}

/// Called once with the provider's answer, possibly from another thread
pub type SuggestionCallback = Box<dyn FnOnce(Result<Vec<String>, SuggestionError>) + Send + 'static>;

/// Source of transliteration candidates.
///
/// Implementations must not block the caller; the answer is delivered
/// through `done` whenever it is ready.
pub trait SuggestionProvider {
    fn suggest(&self, request: SuggestionRequest, done: SuggestionCallback);
}

/// Text after the last whitespace character, empty when `text` ends in whitespace
pub fn trailing_word(text: &str) -> &str {
    text.rsplit(char::is_whitespace).next().unwrap_or("")
}

/// Replace the trailing word of `text` with `suggestion`.
///
/// Words are re-joined with single spaces and a trailing space is added so
/// typing can continue with the next word.
pub fn replace_trailing_word(text: &str, suggestion: &str) -> String {
    let mut words: Vec<&str> = text.split_whitespace().collect();
    match words.last_mut() {
        Some(last) => *last = suggestion,
        None => words.push(suggestion),
    }
    let mut replaced = words.join(" ");
    replaced.push(' ');
    replaced
}

/// Extract the candidates from an Input Tools style envelope:
/// `["SUCCESS", [[fragment, [candidates...], ...]]]`.
pub fn parse_envelope(value: &Value) -> Result<Vec<String>, SuggestionError> {
    let status = value.get(0).and_then(Value::as_str).ok_or(SuggestionError::Malformed)?;
    if status != "SUCCESS" {
        return Err(SuggestionError::Status(status.to_owned()));
    }
    let candidates = value
        .get(1)
        .and_then(|v| v.get(0))
        .and_then(|v| v.get(1))
        .and_then(Value::as_array)
        .ok_or(SuggestionError::Malformed)?;
    Ok(candidates
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_owned)
        .collect())
}

#[derive(Debug, Default)]
struct Inbox {
    /// The most recent request; responses for anything else are stale
    latest: Option<SuggestionRequest>,
    suggestions: Vec<String>,
}

impl Inbox {
    /// Returns true when the list changed
    fn set(&mut self, suggestions: Vec<String>) -> bool {
        if self.suggestions == suggestions {
            return false;
        }
        self.suggestions = suggestions;
        true
    }
}

type Notify = Arc<dyn Fn() + Send + Sync>;

/// Issues suggestion requests for the text being edited and keeps the
/// answer of the latest one.
///
/// Responses are matched against the most recent request: an answer for a
/// different trailing word or language arrives too late and is dropped.
#[derive(Clone)]
pub struct SuggestionLookup {
    provider: Arc<dyn SuggestionProvider + Send + Sync>,
    inbox: Arc<Mutex<Inbox>>,
    on_update: Option<Notify>,
}

impl std::fmt::Debug for SuggestionLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionLookup")
            .field("inbox", &*self.inbox.lock())
            .finish()
    }
}

impl SuggestionLookup {
    pub fn new(provider: Arc<dyn SuggestionProvider + Send + Sync>) -> Self {
        Self {
            provider,
            inbox: Arc::new(Mutex::new(Inbox::default())),
            on_update: None,
        }
    }

    /// Call `notify` after an answer changes the suggestions, e.g. to wake
    /// up the UI. It may run on the provider's thread.
    pub fn with_notifier(mut self, notify: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_update = Some(Arc::new(notify));
        self
    }

    /// React to an edit of the draft text.
    ///
    /// Returns true when a provider request was issued.
    pub fn text_changed(&self, text: &str, language: &str) -> bool {
        let fragment = trailing_word(text);
        if fragment.chars().count() < MIN_FRAGMENT_CHARS {
            self.clear();
            return false;
        }

        let request = SuggestionRequest {
            fragment: fragment.to_owned(),
            language: language.to_owned(),
        };
        self.inbox.lock().latest = Some(request.clone());
        debug!("requesting suggestions for '{}' ({})", request.fragment, request.language);

        let inbox = Arc::clone(&self.inbox);
        let on_update = self.on_update.clone();
        let expected = request.clone();
        self.provider.suggest(
            request,
            Box::new(move |result| {
                let changed = {
                    let mut inbox = inbox.lock();
                    if inbox.latest.as_ref() != Some(&expected) {
                        debug!("dropping stale suggestions for '{}'", expected.fragment);
                        return;
                    }
                    match result {
                        Ok(suggestions) => inbox.set(suggestions),
                        Err(err) => {
                            warn!("transliteration lookup failed: {err}");
                            inbox.set(Vec::new())
                        }
                    }
                };
                if let Some(notify) = on_update.filter(|_| changed) {
                    notify();
                }
            }),
        );
        true
    }

    /// Forget the current suggestions and ignore any pending answer
    pub fn clear(&self) {
        let mut inbox = self.inbox.lock();
        inbox.latest = None;
        inbox.set(Vec::new());
    }

    pub fn suggestions(&self) -> Vec<String> {
        self.inbox.lock().suggestions.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers every request immediately with the fragment itself
    struct Echo;

    impl SuggestionProvider for Echo {
        fn suggest(&self, request: SuggestionRequest, done: SuggestionCallback) {
            done(Ok(vec![request.fragment]));
        }
    }

    #[test]
    fn test_notifier_runs_when_suggestions_change() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let lookup = SuggestionLookup::new(Arc::new(Echo)).with_notifier(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(lookup.text_changed("nam", "hi"));
        assert_eq!(lookup.suggestions(), vec!["nam"]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Same answer again changes nothing
        lookup.text_changed("nam", "hi");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        lookup.text_changed("nama", "hi");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_trailing_word() {
        assert_eq!(trailing_word("namaste duniya"), "duniya");
        assert_eq!(trailing_word("namaste "), "");
        assert_eq!(trailing_word(""), "");
        assert_eq!(trailing_word("a\tbc"), "bc");
    }

    #[test]
    fn test_replace_trailing_word() {
        assert_eq!(replace_trailing_word("hello namaste", "नमस्ते"), "hello नमस्ते ");
        assert_eq!(replace_trailing_word("  hello   nam ", "नम"), "hello नम ");
        assert_eq!(replace_trailing_word("", "नम"), "नम ");
    }

    #[test]
    fn test_parse_success_envelope() {
        let value = json!(["SUCCESS", [["namaste", ["नमस्ते", "नमस्तें"], [], {}]]]);
        assert_eq!(parse_envelope(&value).unwrap(), vec!["नमस्ते", "नमस्तें"]);
    }

    #[test]
    fn test_parse_failure_envelopes() {
        assert!(matches!(
            parse_envelope(&json!(["FAILED_TO_PROCESS", []])),
            Err(SuggestionError::Status(_))
        ));
        assert!(matches!(parse_envelope(&json!({})), Err(SuggestionError::Malformed)));
        assert!(matches!(
            parse_envelope(&json!(["SUCCESS", []])),
            Err(SuggestionError::Malformed)
        ));
    }
}
