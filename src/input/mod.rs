//! Line-oriented input: the text a path block is read from, and the typed
//! keyword/value fields it is parsed into.

pub mod field;
pub mod load;

pub use field::{FieldKind, FieldValue, Limits, ScalarField};
pub use load::LoadOptions;

use std::path::Path as FsPath;

use crate::error::{InputError, Result};
use crate::geometry::LineRange;

/// Line-indexed access to input text. Line numbers are 1-based.
pub trait LineSource {
    /// The text of line `number`.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NoSuchLine`] if `number` is out of range.
    fn line(&self, number: usize) -> Result<&str>;

    /// First content line after `number`, if any.
    fn next_line_number(&self, number: usize) -> Option<usize>;

    /// Last content line before `number`, if any.
    fn previous_line_number(&self, number: usize) -> Option<usize>;
}

/// An input file held in memory.
///
/// Blank lines and lines starting with `//` are kept for numbering but
/// skipped when stepping between lines.
#[derive(Debug, Clone, Default)]
pub struct InputFile {
    lines: Vec<String>,
}

impl InputFile {
    /// Splits `text` into lines.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_owned).collect(),
        }
    }

    /// Reads a file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`PolypathError::Io`](crate::error::PolypathError::Io) if the
    /// file cannot be read.
    pub fn from_path(path: impl AsRef<FsPath>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_text(&text))
    }

    /// Total number of lines, content or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn is_content(&self, number: usize) -> bool {
        number
            .checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .is_some_and(|line| {
                let text = line.trim();
                !text.is_empty() && !text.starts_with("//")
            })
    }

    /// Ranges of every `begin … end` block, delimiters included.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::UnterminatedBlock`] if a block is opened again,
    /// or the input ends, before its `end` line.
    pub fn find_blocks(&self, begin: &str, end: &'static str) -> Result<Vec<LineRange>> {
        let mut blocks = Vec::new();
        let mut open: Option<usize> = None;

        for number in 1..=self.lines.len() {
            if !self.is_content(number) {
                continue;
            }
            let text = self.lines[number - 1].trim();
            if text == begin {
                if let Some(line) = open {
                    return Err(InputError::UnterminatedBlock { line, end }.into());
                }
                open = Some(number);
            } else if text == end {
                if let Some(start) = open.take() {
                    blocks.push(LineRange::new(start, number));
                }
            }
        }

        match open {
            Some(line) => Err(InputError::UnterminatedBlock { line, end }.into()),
            None => Ok(blocks),
        }
    }
}

impl LineSource for InputFile {
    fn line(&self, number: usize) -> Result<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(String::as_str)
            .ok_or_else(|| InputError::NoSuchLine(number).into())
    }

    fn next_line_number(&self, number: usize) -> Option<usize> {
        (number + 1..=self.lines.len()).find(|&n| self.is_content(n))
    }

    fn previous_line_number(&self, number: usize) -> Option<usize> {
        (1..number.min(self.lines.len() + 1)).rev().find(|&n| self.is_content(n))
    }
}

/// Splits `keyword=value` at the first `=`, trimming both sides.
///
/// A line without `=` is all keyword with an empty value.
#[must_use]
pub fn token_pair(line: &str) -> (&str, &str) {
    match line.split_once('=') {
        Some((token, value)) => (token.trim(), value.trim()),
        None => (line.trim(), ""),
    }
}
