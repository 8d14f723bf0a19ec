/// A transliteration target offered in the language selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Input Tools language tag, e.g. `hi`
    pub tag: &'static str,
    pub label: &'static str,
}

pub const LANGUAGES: &[Language] = &[
    Language { tag: "hi", label: "Hindi" },
    Language { tag: "bn", label: "Bengali" },
    Language { tag: "gu", label: "Gujarati" },
    Language { tag: "kn", label: "Kannada" },
    Language { tag: "ml", label: "Malayalam" },
    Language { tag: "mr", label: "Marathi" },
    Language { tag: "ne", label: "Nepali" },
    Language { tag: "or", label: "Odia" },
    Language { tag: "pa", label: "Punjabi" },
    Language { tag: "sa", label: "Sanskrit" },
    Language { tag: "ta", label: "Tamil" },
    Language { tag: "te", label: "Telugu" },
    Language { tag: "ur", label: "Urdu" },
    Language { tag: "ar", label: "Arabic" },
    Language { tag: "fa", label: "Persian" },
    Language { tag: "ru", label: "Russian" },
    Language { tag: "el", label: "Greek" },
    Language { tag: "ja", label: "Japanese" },
];

/// Display label for a tag, falling back to the tag itself
pub fn label_for(tag: &str) -> &str {
    LANGUAGES
        .iter()
        .find(|lang| lang.tag == tag)
        .map(|lang| lang.label)
        .unwrap_or(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_lookup() {
        assert_eq!(label_for("hi"), "Hindi");
        assert_eq!(label_for("xx"), "xx");
    }
}
