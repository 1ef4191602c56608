//! Text statistics for loaded sources

use serde::{Deserialize, Serialize};

const WORDS_PER_MINUTE: usize = 200;

/// Basic statistics over extracted text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub word_count: usize,
    pub character_count: usize,
    /// Estimated reading time in whole minutes (rounded up)
    pub reading_minutes: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        let word_count = text.split_whitespace().count();
        Self {
            word_count,
            character_count: text.chars().count(),
            reading_minutes: word_count.div_ceil(WORDS_PER_MINUTE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_counts_words_and_chars() {
        let stats = TextStats::of("one two  three\nfour");
        assert_eq!(stats.word_count, 4);
        assert_eq!(stats.character_count, 19);
        assert_eq!(stats.reading_minutes, 1);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        let text = "word ".repeat(401);
        assert_eq!(TextStats::of(&text).reading_minutes, 3);
        assert_eq!(TextStats::of("").reading_minutes, 0);
    }
}
