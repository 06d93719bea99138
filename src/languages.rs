use lazy_static::lazy_static;

lazy_static! {
    /// Display name to Google TTS `tl` code, in the order the selector
    /// presents them. Fixed at startup, never mutated.
    static ref SUPPORTED_LANGUAGES: Vec<(&'static str, &'static str)> = vec![
        ("English", "en"),
        ("Spanish", "es"),
        ("French", "fr"),
        ("German", "de"),
        ("Italian", "it"),
        ("Japanese", "ja"),
        ("Korean", "ko"),
        ("Portuguese", "pt"),
        ("Russian", "ru"),
        ("Chinese", "zh"),
    ];
}

/// Display names in table order, for populating the language selector.
pub fn names() -> impl Iterator<Item = &'static str> {
    SUPPORTED_LANGUAGES.iter().map(|(name, _)| *name)
}

pub fn code_for(name: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, code)| *code)
}

pub fn is_supported_code(code: &str) -> bool {
    SUPPORTED_LANGUAGES.iter().any(|(_, c)| *c == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_ordered_and_complete() {
        let all: Vec<_> = names().collect();
        assert_eq!(all.len(), 10);
        assert_eq!(all.first(), Some(&"English"));
        assert_eq!(all.last(), Some(&"Chinese"));
    }

    #[test]
    fn name_lookup() {
        assert_eq!(code_for("French"), Some("fr"));
        assert_eq!(code_for("Chinese"), Some("zh"));
        assert_eq!(code_for("Klingon"), None);
        // Codes are not display names
        assert_eq!(code_for("fr"), None);
    }

    #[test]
    fn code_lookup() {
        assert!(is_supported_code("en"));
        assert!(is_supported_code("ja"));
        assert!(!is_supported_code("xx"));
        assert!(!is_supported_code(""));
    }
}
