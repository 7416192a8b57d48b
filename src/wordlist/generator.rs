//! Combinatorial word generator
//!
//! Words are enumerated with an explicit mixed-radix counter: one digit per
//! position, radix equal to the alphabet size, rightmost digit fastest. The
//! counter is the only state kept between words.

use std::iter::FusedIterator;
use std::ops::Range;

use super::{Alphabet, FormatMask};
use crate::config_error;
use crate::error::Result;

/// Validate parameters and build a generator positioned at the first word.
///
/// All validation happens here, so a caller never sees a failure after the
/// first word has been produced.
pub fn generate(alphabet: Alphabet, length: usize, mask: Option<FormatMask>) -> Result<WordGenerator> {
    WordGenerator::new(alphabet, length, mask)
}

/// Generator for every word of a fixed length over an alphabet
#[derive(Debug, Clone)]
pub struct WordGenerator {
    alphabet: Alphabet,
    length: usize,
    mask: Option<FormatMask>,
    /// Counter digits, most significant first
    digits: Vec<usize>,
    current_index: u128,
    /// Index range this generator covers
    start: u128,
    end: u128,
    total: u128,
}

impl WordGenerator {
    /// Create a generator over the full index space
    pub fn new(alphabet: Alphabet, length: usize, mask: Option<FormatMask>) -> Result<Self> {
        if length == 0 {
            return Err(config_error!("length must be at least 1, got {}", length));
        }
        if alphabet.is_empty() {
            return Err(config_error!("alphabet cannot be empty"));
        }
        if let Some(mask) = &mask {
            if mask.len() != length {
                return Err(config_error!(
                    "format mask has {} positions but length is {}",
                    mask.len(),
                    length
                ));
            }
        }
        let total = alphabet.total_combinations(length).ok_or_else(|| {
            config_error!(
                "{} characters at length {} is too large to enumerate",
                alphabet.len(),
                length
            )
        })?;

        Ok(Self {
            alphabet,
            length,
            mask,
            digits: vec![0; length],
            current_index: 0,
            start: 0,
            end: total,
            total,
        })
    }

    /// Total number of words in the full space
    pub fn total(&self) -> u128 {
        self.total
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn mask(&self) -> Option<&FormatMask> {
        self.mask.as_ref()
    }

    /// Index of the next word to be produced
    pub fn current_index(&self) -> u128 {
        self.current_index
    }

    /// Index range still to be produced
    pub fn range(&self) -> Range<u128> {
        self.current_index..self.end
    }

    /// Move the counter to `index`, clamped to this generator's range
    pub fn seek(&mut self, index: u128) {
        self.current_index = index.clamp(self.start, self.end);
        if self.current_index < self.total {
            self.fill_digits(self.current_index);
        }
    }

    /// Generator restricted to `range`, clamped to the full space
    pub fn slice(&self, range: Range<u128>) -> Self {
        let end = range.end.min(self.total);
        let start = range.start.min(end);
        let mut slice = Self {
            alphabet: self.alphabet.clone(),
            length: self.length,
            mask: self.mask.clone(),
            digits: vec![0; self.length],
            current_index: start,
            start,
            end,
            total: self.total,
        };
        slice.seek(start);
        slice
    }

    /// Split the remaining range into at most `workers` contiguous, disjoint,
    /// non-empty ranges. Earlier ranges take the remainder.
    pub fn partition_ranges(&self, workers: usize) -> Vec<Range<u128>> {
        let remaining = self.remaining();
        if remaining == 0 {
            return Vec::new();
        }
        let workers = (workers.max(1) as u128).min(remaining);
        let chunk = remaining / workers;
        let extra = remaining % workers;

        let mut ranges = Vec::with_capacity(workers as usize);
        let mut start = self.current_index;
        for i in 0..workers {
            let len = chunk + u128::from(i < extra);
            ranges.push(start..start + len);
            start += len;
        }
        ranges
    }

    /// Word at `index` in the full space, computed without replaying
    /// earlier words
    pub fn word_at(&self, index: u128) -> Option<String> {
        if index >= self.total {
            return None;
        }

        let chars = self.alphabet.chars();
        let base = chars.len() as u128;
        let mut result = vec![' '; self.length];
        let mut n = index;

        for i in (0..self.length).rev() {
            result[i] = self.render(i, chars[(n % base) as usize]);
            n /= base;
        }

        Some(result.into_iter().collect())
    }

    /// Generate next batch of words
    pub fn next_batch(&mut self, count: usize) -> Vec<String> {
        self.by_ref().take(count).collect()
    }

    pub fn is_exhausted(&self) -> bool {
        self.current_index >= self.end
    }

    /// Remaining count
    pub fn remaining(&self) -> u128 {
        self.end.saturating_sub(self.current_index)
    }

    /// Progress through the full space as a percentage
    pub fn progress_percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.current_index as f64 / self.total as f64) * 100.0
        }
    }

    fn fill_digits(&mut self, index: u128) {
        let base = self.alphabet.len() as u128;
        let mut n = index;
        for digit in self.digits.iter_mut().rev() {
            *digit = (n % base) as usize;
            n /= base;
        }
    }

    #[inline]
    fn render(&self, position: usize, c: char) -> char {
        match &self.mask {
            Some(mask) => mask.directives()[position].render(c),
            None => c,
        }
    }

    fn render_current(&self) -> String {
        let chars = self.alphabet.chars();
        let mut word = String::with_capacity(self.length);
        for (position, &digit) in self.digits.iter().enumerate() {
            word.push(self.render(position, chars[digit]));
        }
        word
    }

    /// Add one to the counter, carrying leftward
    fn increment(&mut self) {
        let radix = self.alphabet.len();
        for digit in self.digits.iter_mut().rev() {
            *digit += 1;
            if *digit < radix {
                return;
            }
            *digit = 0;
        }
    }
}

impl Iterator for WordGenerator {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_exhausted() {
            return None;
        }
        let word = self.render_current();
        self.current_index += 1;
        if !self.is_exhausted() {
            self.increment();
        }
        Some(word)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for WordGenerator {}
