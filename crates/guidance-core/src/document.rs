//! Guidance documents and the text statistics reported about them

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GuidanceError, Result};

/// A unit of work: one guidance file read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub content: String,
    pub lines: usize,
}

impl Document {
    /// Read a document fresh from disk.
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| GuidanceError::io_operation("read", path.display(), e))?;
        Ok(Self::from_content(path.to_path_buf(), content))
    }

    /// Build a document from content already in memory.
    pub fn from_content(path: PathBuf, content: String) -> Self {
        let lines = count_lines(&content);
        Self {
            path,
            content,
            lines,
        }
    }
}

/// Number of lines, counting a final line without a trailing newline.
pub fn count_lines(text: &str) -> usize {
    text.lines().count()
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Line count of a file on disk.
pub fn count_file_lines(path: &Path) -> Result<usize> {
    let content = fs::read_to_string(path)
        .map_err(|e| GuidanceError::io_operation("read", path.display(), e))?;
    Ok(count_lines(&content))
}

/// Text statistics before and after compression.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct TextStats {
    pub original_lines: usize,
    pub compressed_lines: usize,
    pub original_words: usize,
    pub compressed_words: usize,
}

impl TextStats {
    pub fn measure(original: &str, compressed: &str) -> Self {
        Self {
            original_lines: count_lines(original),
            compressed_lines: count_lines(compressed),
            original_words: count_words(original),
            compressed_words: count_words(compressed),
        }
    }

    /// Percentage of lines removed (0.0 when the original is empty)
    pub fn line_reduction_pct(&self) -> f64 {
        reduction_pct(self.original_lines, self.compressed_lines)
    }

    /// Percentage of words removed (0.0 when the original is empty)
    pub fn word_reduction_pct(&self) -> f64 {
        reduction_pct(self.original_words, self.compressed_words)
    }
}

fn reduction_pct(before: usize, after: usize) -> f64 {
    if before == 0 {
        return 0.0;
    }
    (1.0 - after as f64 / before as f64) * 100.0
}
