//! Recursive character splitter with boundary preference.
//!
//! Splits document text on the highest-priority separator that occurs in it
//! (structural markers first, then newlines, then spaces); pieces that still
//! exceed the chunk size recurse on the remaining separators; when no
//! separator is left, falls back to fixed character windows that overlap by a
//! configured count. Adjacent small pieces are greedily merged so chunks fill
//! up to the size limit.
//!
//! Sizes are measured in characters, not bytes, so multi-byte text never
//! splits mid-codepoint. Splitting is deterministic for identical input and
//! configuration.

use repodigest_types::config::AnalyzerConfig;
use repodigest_types::document::{Chunk, Document};
use repodigest_types::error::SplitError;

/// Splits documents into bounded-size overlapping chunks.
#[derive(Debug, Clone)]
pub struct RecursiveSplitter {
    chunk_size: usize,
    overlap: usize,
    separators: Vec<String>,
}

impl RecursiveSplitter {
    /// Create a splitter.
    ///
    /// Separators are tried in the given order; earlier entries are
    /// higher-priority boundaries. Rejects `chunk_size == 0` and
    /// `overlap >= chunk_size` up front.
    pub fn new(
        chunk_size: usize,
        overlap: usize,
        separators: Vec<String>,
    ) -> Result<Self, SplitError> {
        if chunk_size == 0 {
            return Err(SplitError::ZeroChunkSize);
        }
        if overlap >= chunk_size {
            return Err(SplitError::OverlapExceedsChunkSize {
                overlap,
                chunk_size,
            });
        }
        Ok(Self {
            chunk_size,
            overlap,
            separators,
        })
    }

    /// Build a splitter from an [`AnalyzerConfig`].
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self, SplitError> {
        Self::new(
            config.chunk_size,
            config.chunk_overlap,
            config.separators.clone(),
        )
    }

    /// Split every document, preserving source metadata per chunk.
    ///
    /// Chunks appear in document order, and within a document in text order.
    pub fn split_documents(&self, documents: &[Document]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        for doc in documents {
            for piece in self.split_text(&doc.content) {
                if piece.is_empty() {
                    continue;
                }
                chunks.push(Chunk {
                    content: piece,
                    metadata: doc.metadata.clone(),
                });
            }
        }
        tracing::debug!(documents = documents.len(), chunks = chunks.len(), "split complete");
        chunks
    }

    /// Split a single text into pieces no larger than the chunk size.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_with(text, &self.separators)
    }

    fn split_with(&self, text: &str, separators: &[String]) -> Vec<String> {
        if char_len(text) <= self.chunk_size {
            return vec![text.to_string()];
        }

        // Highest-priority separator that actually occurs in this text.
        let Some(idx) = separators
            .iter()
            .position(|sep| text.contains(sep.as_str()))
        else {
            return self.char_windows(text);
        };
        let sep = &separators[idx];

        let mut chunks = Vec::new();
        let mut buffer = String::new();
        for piece in split_keeping_separator(text, sep) {
            let piece_len = char_len(&piece);
            if piece_len > self.chunk_size {
                // Too big even alone: recurse on the remaining separators.
                if !buffer.is_empty() {
                    chunks.push(std::mem::take(&mut buffer));
                }
                chunks.extend(self.split_with(&piece, &separators[idx + 1..]));
            } else if char_len(&buffer) + piece_len <= self.chunk_size {
                buffer.push_str(&piece);
            } else {
                chunks.push(std::mem::take(&mut buffer));
                buffer.push_str(&piece);
            }
        }
        if !buffer.is_empty() {
            chunks.push(buffer);
        }
        chunks
    }

    /// Last-resort slicing: fixed windows of `chunk_size` characters,
    /// each advancing by `chunk_size - overlap`, so adjacent windows share
    /// exactly `overlap` characters.
    fn char_windows(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let step = self.chunk_size - self.overlap;
        let mut windows = Vec::new();
        let mut start = 0;
        loop {
            let end = (start + self.chunk_size).min(chars.len());
            windows.push(chars[start..end].iter().collect());
            if end == chars.len() {
                break;
            }
            start += step;
        }
        windows
    }
}

/// Split on a separator, keeping each separator attached to the start of the
/// piece it introduced, so concatenating the pieces reproduces the input.
fn split_keeping_separator(text: &str, sep: &str) -> Vec<String> {
    let mut parts = text.split(sep);
    let mut pieces = Vec::new();
    if let Some(first) = parts.next() {
        if !first.is_empty() {
            pieces.push(first.to_string());
        }
    }
    for part in parts {
        pieces.push(format!("{sep}{part}"));
    }
    pieces
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use repodigest_types::document::SourceMetadata;

    fn splitter(size: usize, overlap: usize, seps: &[&str]) -> RecursiveSplitter {
        RecursiveSplitter::new(size, overlap, seps.iter().map(|s| s.to_string()).collect())
            .unwrap()
    }

    fn scala_separators() -> Vec<&'static str> {
        vec!["\nclass ", "\nobject ", "\n", " "]
    }

    #[test]
    fn test_rejects_overlap_not_smaller_than_chunk_size() {
        let err = RecursiveSplitter::new(100, 100, vec![]).unwrap_err();
        assert_eq!(
            err,
            SplitError::OverlapExceedsChunkSize {
                overlap: 100,
                chunk_size: 100
            }
        );
        assert!(RecursiveSplitter::new(100, 150, vec![]).is_err());
        assert!(RecursiveSplitter::new(100, 99, vec![]).is_ok());
    }

    #[test]
    fn test_rejects_zero_chunk_size() {
        let err = RecursiveSplitter::new(0, 0, vec![]).unwrap_err();
        assert_eq!(err, SplitError::ZeroChunkSize);
    }

    #[test]
    fn test_small_text_is_one_chunk() {
        let s = splitter(3000, 100, &scala_separators());
        let chunks = s.split_text("object Main extends App");
        assert_eq!(chunks, vec!["object Main extends App".to_string()]);
    }

    #[test]
    fn test_boundary_free_7000_chars_yields_3_overlapping_windows() {
        // No separator occurs, so the char-window fallback applies:
        // 0..3000, 2900..5900, 5800..7000.
        let text = "a".repeat(7000);
        let s = splitter(3000, 100, &scala_separators());
        let chunks = s.split_text(&text);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chars().count(), 3000);
        assert_eq!(chunks[1].chars().count(), 3000);
        assert_eq!(chunks[2].chars().count(), 1200);
        for c in &chunks {
            assert!(c.chars().count() <= 3000);
        }
    }

    #[test]
    fn test_adjacent_fallback_windows_share_exactly_overlap_chars() {
        // Distinct characters so the overlap check is meaningful.
        let text: String = (0..700).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let s = splitter(300, 10, &[]);
        let chunks = s.split_text(&text);

        assert_eq!(chunks.len(), 3);
        for pair in chunks.windows(2) {
            let prev: Vec<char> = pair[0].chars().collect();
            let tail: String = prev[prev.len() - 10..].iter().collect();
            let head: String = pair[1].chars().take(10).collect();
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn test_splits_on_highest_priority_boundary() {
        let text = "HEAD\nclass A\nclass B";
        let s = splitter(12, 2, &scala_separators());
        let chunks = s.split_text(text);

        assert_eq!(chunks, vec!["HEAD\nclass A".to_string(), "\nclass B".to_string()]);
    }

    #[test]
    fn test_recurses_to_lower_priority_separator() {
        // "aaaa bbbb cccc" has no newline; the space separator applies.
        let s = splitter(10, 2, &["\n", " "]);
        let chunks = s.split_text("aaaa bbbb cccc");
        assert_eq!(chunks, vec!["aaaa bbbb".to_string(), " cccc".to_string()]);
    }

    #[test]
    fn test_merged_pieces_preserve_content() {
        let text = "line one\nline two\nline three\nline four\nline five";
        let s = splitter(20, 0, &["\n"]);
        let chunks = s.split_text(text);

        assert!(chunks.iter().all(|c| c.chars().count() <= 20));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_no_chunk_exceeds_max_size() {
        let mut text = String::new();
        for i in 0..200 {
            text.push_str(&format!("word{i} "));
        }
        text.push_str(&"x".repeat(500));
        let s = splitter(64, 8, &["\n", " "]);
        for chunk in s.split_text(&text) {
            assert!(chunk.chars().count() <= 64, "oversized chunk: {chunk:?}");
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "class A { def f = 1 }\nclass B { def g = 2 }\n".repeat(200);
        let s = splitter(100, 10, &scala_separators());
        assert_eq!(s.split_text(&text), s.split_text(&text));
    }

    #[test]
    fn test_multibyte_text_splits_on_char_boundaries() {
        let text = "é".repeat(250);
        let s = splitter(100, 10, &[]);
        let chunks = s.split_text(&text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 100);
            assert!(chunk.chars().all(|c| c == 'é'));
        }
    }

    #[test]
    fn test_split_documents_inherits_metadata() {
        let docs = vec![
            Document {
                content: "x".repeat(250),
                metadata: SourceMetadata {
                    path: "src/A.scala".to_string(),
                    repo: "o/r".to_string(),
                    branch: "main".to_string(),
                },
            },
            Document {
                content: "short".to_string(),
                metadata: SourceMetadata {
                    path: "src/B.scala".to_string(),
                    repo: "o/r".to_string(),
                    branch: "main".to_string(),
                },
            },
        ];
        let s = splitter(100, 10, &[]);
        let chunks = s.split_documents(&docs);

        assert!(chunks.len() > 2);
        assert!(chunks[..chunks.len() - 1]
            .iter()
            .all(|c| c.metadata.path == "src/A.scala"));
        assert_eq!(chunks.last().unwrap().metadata.path, "src/B.scala");
        assert_eq!(chunks.last().unwrap().content, "short");
    }

    #[test]
    fn test_empty_document_produces_no_chunks() {
        let docs = vec![Document {
            content: String::new(),
            metadata: SourceMetadata {
                path: "empty.scala".to_string(),
                repo: "o/r".to_string(),
                branch: "main".to_string(),
            },
        }];
        let s = splitter(100, 10, &[]);
        assert!(s.split_documents(&docs).is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = AnalyzerConfig::default();
        let s = RecursiveSplitter::from_config(&config).unwrap();
        assert_eq!(s.chunk_size, 3000);
        assert_eq!(s.overlap, 100);
    }
}
