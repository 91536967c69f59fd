use std::fmt;

use kanjidesk_types::Command;
use unicode_normalization::UnicodeNormalization;

/// Ordered list of single characters to look up
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KanjiQuery {
    kanji: Vec<String>,
}

impl KanjiQuery {
    /// Split user text into characters.
    ///
    /// Text is NFC-normalized first so compatibility ideographs resolve to
    /// their unified form. Whitespace and control characters are dropped;
    /// order and repeats are kept.
    pub fn from_text(text: &str) -> Self {
        let kanji = text
            .trim()
            .nfc()
            .filter(|c| !c.is_whitespace() && !c.is_control())
            .map(String::from)
            .collect();

        Self { kanji }
    }

    pub fn is_empty(&self) -> bool {
        self.kanji.is_empty()
    }

    pub fn kanji(&self) -> &[String] {
        &self.kanji
    }

    pub fn to_command(&self) -> Command {
        Command::query(self.kanji.iter().cloned())
    }
}

impl fmt::Display for KanjiQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for k in &self.kanji {
            f.write_str(k)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_into_characters() {
        let query = KanjiQuery::from_text(" 漢 字\n");
        assert_eq!(query.kanji(), ["漢", "字"]);
        assert_eq!(query.to_string(), "漢字");
        assert_eq!(query.to_command(), Command::query(["漢", "字"]));
    }

    #[test]
    fn keeps_order_and_repeats() {
        let query = KanjiQuery::from_text("日本日");
        assert_eq!(query.kanji(), ["日", "本", "日"]);
    }

    #[test]
    fn normalizes_compatibility_ideographs() {
        // U+F900 is a compatibility ideograph for U+8C48
        let query = KanjiQuery::from_text("\u{F900}");
        assert_eq!(query.kanji(), ["\u{8C48}"]);
    }

    #[test]
    fn blank_text_is_empty() {
        assert!(KanjiQuery::from_text("  \t").is_empty());
        assert!(KanjiQuery::default().is_empty());
    }
}
