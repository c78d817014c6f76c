//! Gradual reveal of generated text.
//!
//! The reveal is a sequence of strictly growing prefixes, one character
//! longer each step, ending with the full text. Prefixes are produced on
//! demand, so a consumer can stop at any point by dropping the iterator or
//! stream.

use std::time::Duration;

use futures::stream::{self, Stream, StreamExt};

/// Expands every newline into a paragraph break for markdown surfaces.
pub fn expand_paragraphs(text: &str) -> String {
    text.replace('\n', "\n\n")
}

/// Iterator over the growing prefixes of a string. Always splits on
/// `char` boundaries.
#[derive(Debug, Clone)]
pub struct Reveal {
    text: String,
    end: usize,
}

impl Reveal {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            end: 0,
        }
    }
}

impl Iterator for Reveal {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let step = self.text[self.end..].chars().next()?.len_utf8();
        self.end += step;
        Some(self.text[..self.end].to_string())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.text[self.end..].chars().count();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Reveal {}

/// Paced version of [`Reveal`]: yields the first prefix immediately and each
/// following prefix after `delay`.
pub fn reveal_stream(text: String, delay: Duration) -> impl Stream<Item = String> {
    stream::iter(Reveal::new(text).enumerate()).then(move |(step, prefix)| async move {
        if step > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        prefix
    })
}
