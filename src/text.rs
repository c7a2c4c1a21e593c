use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

use crate::error::{TwitterError, TwitterResult};

pub const CHARACTER_LIMIT: usize = 140;

/// Length of `text` as Twitter counts it: every space-separated word containing
/// a link is replaced by a shortlink of `shortlink_size` characters.
pub fn calculate_status_length(text: &str, shortlink_size: usize) -> usize {
    let words = text.split(' ').map(|word| {
        if word.contains("http://") || word.contains("https://") {
            shortlink_size
        } else {
            word.chars().count()
        }
    });

    let (count, total) = words.fold((0usize, 0usize), |(count, total), len| {
        (count + 1, total + len)
    });
    total + count.saturating_sub(1)
}

/// Splits `text` into segments no wider than `width`. Words are only broken when
/// a single word is wider than a segment. Line breaks count as spaces.
pub fn split_status(text: &str, width: usize) -> TwitterResult<Vec<String>> {
    if width == 0 {
        return Err(TwitterError::invalid(
            "continuation leaves no room for the status text",
        ));
    }
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return Err(TwitterError::invalid("status text may not be empty"));
    }

    let options = Options::new(width)
        .break_words(true)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation)
        .wrap_algorithm(WrapAlgorithm::FirstFit);
    Ok(textwrap::wrap(&text, options)
        .into_iter()
        .filter(|line| !line.is_empty())
        .map(|line| line.into_owned())
        .collect())
}
