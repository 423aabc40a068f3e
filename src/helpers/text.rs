//! Word counting and read-time estimation

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A run of letters or digits, apostrophes allowed inside ("don't")
    static ref WORD: Regex = Regex::new(r"[\p{Alphabetic}\p{Nd}]+(?:'[\p{Alphabetic}]+)*").unwrap();
}

/// Count words in plain text. CJK ideographs count one word each.
pub fn count_words(text: &str) -> usize {
    WORD.find_iter(text)
        .map(|m| {
            let cjk = m.as_str().chars().filter(|c| is_cjk(*c)).count();
            let rest = m.as_str().chars().any(|c| !is_cjk(c));
            cjk + usize::from(rest)
        })
        .sum()
}

/// Estimated minutes to read `text`, never less than one
pub fn read_time(text: &str, words_per_minute: u32) -> u32 {
    let words = count_words(text) as u32;
    words.div_ceil(words_per_minute.max(1)).max(1)
}

fn is_cjk(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}
