use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::io::Write;

use islands_types::Post;

/// Runs of non-word characters collapse to a single space
static NON_WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\W+").expect("Failed to compile non-word regex"));

/// Words too common to be worth drawing
const STOP_WORDS: &[&str] = &[
    "a", "about", "also", "am", "an", "and", "are", "as", "at", "be", "both", "but", "by", "for",
    "from", "has", "have", "i", "in", "is", "it", "its", "m", "me", "my", "not", "of", "off",
    "on", "or", "s", "so", "some", "that", "the", "their", "these", "this", "to", "up", "was",
    "what", "who", "why", "with", "you", "your",
];

/// Join the content of `posts` into a single whitespace-normalized blob
///
/// ```
/// use islands_core::wordcloud::word_cloud_text;
/// use islands_types::Post;
///
/// let post = Post {
///     post_id: 1,
///     user_id: 1,
///     content: "Hello, world!".to_string(),
///     post_date: String::new(),
/// };
/// assert_eq!(word_cloud_text(&[post]), "Hello world");
/// ```
pub fn word_cloud_text(posts: &[Post]) -> String {
    let joined = posts
        .iter()
        .map(|p| p.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    NON_WORD_REGEX.replace_all(&joined, " ").trim().to_string()
}

/// Lowercased word counts without stop words, most frequent first.
/// Ties are broken alphabetically.
pub fn word_frequencies(text: &str, max_words: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in text.split_whitespace() {
        let word = word.to_lowercase();
        if STOP_WORDS.contains(&word.as_str()) {
            continue;
        }
        *counts.entry(word).or_default() += 1;
    }

    let mut frequencies: Vec<(String, usize)> = counts.into_iter().collect();
    frequencies.sort_by(|(a_word, a_count), (b_word, b_count)| {
        b_count.cmp(a_count).then_with(|| a_word.cmp(b_word))
    });
    frequencies.truncate(max_words);
    frequencies
}

/// Something that turns a text blob into a word cloud
pub trait WordCloudRenderer {
    fn render(&mut self, text: &str) -> Result<()>;
}

/// Draws the cloud as a frequency chart on a terminal-like writer
pub struct TerminalWordCloud<W: Write> {
    out: W,
    max_words: usize,
    bar_width: usize,
}

impl<W: Write> TerminalWordCloud<W> {
    pub fn new(out: W, max_words: usize, bar_width: usize) -> Self {
        Self {
            out,
            max_words,
            bar_width: bar_width.max(1),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> WordCloudRenderer for TerminalWordCloud<W> {
    fn render(&mut self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            writeln!(self.out, "No posts found!")?;
            return Ok(());
        }

        let frequencies = word_frequencies(text, self.max_words);
        if frequencies.is_empty() {
            writeln!(self.out, "No words left to draw.")?;
            return Ok(());
        }

        let top = frequencies[0].1;
        let label_width = frequencies
            .iter()
            .map(|(w, _)| w.chars().count())
            .max()
            .unwrap_or(0);

        writeln!(self.out, "\nWord Cloud:")?;
        for (word, count) in &frequencies {
            let bar = (count * self.bar_width).div_ceil(top);
            writeln!(
                self.out,
                "{:>width$} {} {}",
                word,
                "#".repeat(bar),
                count,
                width = label_width
            )?;
        }
        tracing::debug!(words = frequencies.len(), "Rendered word cloud");
        Ok(())
    }
}
