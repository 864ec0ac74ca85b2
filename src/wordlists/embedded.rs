//! Word list compiled into the binary

/// Common five-letter English words, one per line
pub const EMBEDDED_EN: &str = include_str!("../../data/words_en.txt");

/// Length of every word in [`EMBEDDED_EN`]
pub const EMBEDDED_WORD_LENGTH: usize = 5;
