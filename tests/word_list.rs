// Quiz vocabulary invariants. Native-friendly, no browser APIs.

use std::collections::HashSet;

#[test]
fn word_list_is_nonempty_and_unique() {
    assert!(!spell_sparkle::WORD_LIST.is_empty());
    let mut seen = HashSet::new();
    for w in spell_sparkle::WORD_LIST {
        assert!(seen.insert(*w), "duplicate word '{}' in WORD_LIST", w);
    }
}

#[test]
fn words_are_lowercase_ascii_letters() {
    for w in spell_sparkle::WORD_LIST {
        assert!(!w.is_empty());
        assert!(w.chars().all(|c| c.is_ascii_lowercase()), "word '{}' has non a-z chars", w);
    }
}

#[test]
fn default_config_uses_word_list() {
    let config = spell_sparkle::PageConfig::default();
    let words: Vec<&str> = config.words.iter().map(String::as_str).collect();
    assert_eq!(words, spell_sparkle::WORD_LIST);
}
