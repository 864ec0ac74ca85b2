//! Word list loading utilities
//!
//! Lists are plain text, one word per line. Entries of the wrong length or
//! with anything but ASCII letters are skipped, so mixed-language lists can
//! be fed in as-is.

use super::WordPool;
use crate::core::Word;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Parse words of `word_length` letters from list text
///
/// Lines are trimmed and lowercased; blank lines are ignored.
///
/// # Examples
/// ```
/// use wordle_hybrid::wordlists::loader::parse_words;
///
/// let words = parse_words("Crane\n\nslate\ncranes\nfa\u{e7}on\n", 5);
/// assert_eq!(words.len(), 2);
/// assert_eq!(words[0].text(), "crane");
/// ```
#[must_use]
pub fn parse_words(content: &str, word_length: usize) -> Vec<Word> {
    let mut skipped = 0usize;
    let words: Vec<Word> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let word = Word::with_length(line, word_length).ok();
            if word.is_none() {
                skipped += 1;
            }
            word
        })
        .collect();

    if skipped > 0 {
        debug!(skipped, word_length, "skipped unusable word list entries");
    }
    words
}

/// Load words of `word_length` letters from a file
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
///
/// # Examples
/// ```no_run
/// use wordle_hybrid::wordlists::loader::load_from_file;
///
/// let words = load_from_file("data/words_en.txt", 5).unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P, word_length: usize) -> io::Result<Vec<Word>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let words = parse_words(&content, word_length);
    info!(path = %path.display(), words = words.len(), "loaded word list");
    Ok(words)
}

/// Load several files into one pool, in the order given
///
/// # Errors
///
/// Returns the first I/O error encountered.
pub fn load_pool<P: AsRef<Path>>(paths: &[P], word_length: usize) -> io::Result<WordPool> {
    let mut words = Vec::new();
    for path in paths {
        words.extend(load_from_file(path, word_length)?);
    }
    Ok(WordPool::from_words(word_length, words))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_keeps_only_matching_length() {
        let words = parse_words("crane\nslate\ntoolong\nabc\nirate", 5);
        let texts: Vec<&str> = words.iter().map(Word::text).collect();
        assert_eq!(texts, vec!["crane", "slate", "irate"]);
    }

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        let words = parse_words("  CRANE \r\nSlate\n", 5);
        let texts: Vec<&str> = words.iter().map(Word::text).collect();
        assert_eq!(texts, vec!["crane", "slate"]);
    }

    #[test]
    fn parse_skips_accents_and_symbols() {
        let words = parse_words("crâne\nc-ane\nplage\n", 5);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text(), "plage");
    }

    #[test]
    fn parse_other_lengths() {
        let words = parse_words("planet\ncrane\nstream", 6);
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn parse_empty() {
        assert!(parse_words("", 5).is_empty());
    }

    #[test]
    fn load_pool_concatenates_files_in_order() {
        let dir = std::env::temp_dir().join(format!("wordle_hybrid_loader_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let fr = dir.join("fr.txt");
        let en = dir.join("en.txt");
        fs::File::create(&fr).unwrap().write_all(b"plage\nmonde\n").unwrap();
        fs::File::create(&en).unwrap().write_all(b"crane\nmonde\n").unwrap();

        let pool = load_pool(&[&fr, &en], 5).unwrap();
        let texts: Vec<&str> = pool.words().iter().map(Word::text).collect();
        assert_eq!(texts, vec!["plage", "monde", "crane", "monde"]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_missing_file_errors() {
        assert!(load_from_file("/definitely/not/here.txt", 5).is_err());
    }
}
