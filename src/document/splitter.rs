//! Recursive boundary-seeking text splitter
//!
//! Splits document text into overlapping chunks of bounded size. Cut points
//! prefer paragraph breaks, then sentence endings, then whitespace, falling
//! back to an arbitrary character cut so a chunk never exceeds the target
//! size.

/// Text splitter with target chunk size and overlap, both in characters
#[derive(Debug, Clone)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

/// Fraction of the window tail searched for a natural boundary
const BOUNDARY_SEARCH_FRACTION: usize = 5;

const SENTENCE_ENDINGS: [&str; 6] = [". ", "! ", "? ", ".\n", "!\n", "?\n"];

impl TextSplitter {
    /// Create a splitter
    ///
    /// Callers must ensure `chunk_size > chunk_overlap`; the config
    /// validator enforces this before a splitter is ever constructed.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        debug_assert!(chunk_size > chunk_overlap);
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Split text into an ordered sequence of chunk texts
    ///
    /// Each chunk is at most `chunk_size` characters; consecutive chunks
    /// share `chunk_overlap` characters (measured against the emitted end
    /// of the previous chunk, so boundary adjustment preserves the target).
    pub fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let total = chars.len();

        let mut chunks = Vec::new();
        if text.trim().is_empty() {
            return chunks;
        }

        let mut start = 0;
        while start < total {
            let window_end = (start + self.chunk_size).min(total);

            // The final window needs no boundary adjustment
            let end = if window_end == total {
                total
            } else {
                self.seek_boundary(&chars, start, window_end)
            };

            let chunk: String = chars[start..end].iter().collect();
            if !chunk.trim().is_empty() {
                chunks.push(chunk);
            }

            if end == total {
                break;
            }
            start = end - self.chunk_overlap;
        }

        chunks
    }

    /// Find a natural cut point near the end of the window
    ///
    /// Tries paragraph breaks first, then sentence endings, then plain
    /// whitespace, searching only the window tail. Falls back to the hard
    /// window end when no boundary is found. The returned cut always leaves
    /// more than `chunk_overlap` characters in the chunk so the next start
    /// strictly advances.
    fn seek_boundary(&self, chars: &[char], start: usize, window_end: usize) -> usize {
        let window: String = chars[start..window_end].iter().collect();
        let window_len = window_end - start;
        let search_start = window_len - window_len / BOUNDARY_SEARCH_FRACTION;

        let candidates = [
            Self::rfind_in_tail(&window, search_start, &["\n\n"]),
            Self::rfind_in_tail(&window, search_start, &SENTENCE_ENDINGS),
            Self::rfind_whitespace_in_tail(&window, search_start),
        ];

        for candidate in candidates.into_iter().flatten() {
            if candidate > self.chunk_overlap {
                return start + candidate;
            }
        }

        window_end
    }

    /// Rightmost occurrence of any pattern at or after `search_start`,
    /// returned as a char offset one past the pattern
    fn rfind_in_tail(window: &str, search_start: usize, patterns: &[&str]) -> Option<usize> {
        let char_positions: Vec<usize> = window.char_indices().map(|(i, _)| i).collect();
        let byte_start = *char_positions.get(search_start)?;

        let mut best: Option<usize> = None;
        for pattern in patterns {
            if let Some(byte_pos) = window[byte_start..].rfind(pattern) {
                let cut_byte = byte_start + byte_pos + pattern.len();
                let cut_char = window[..cut_byte].chars().count();
                best = Some(best.map_or(cut_char, |b: usize| b.max(cut_char)));
            }
        }
        best
    }

    fn rfind_whitespace_in_tail(window: &str, search_start: usize) -> Option<usize> {
        window
            .chars()
            .enumerate()
            .skip(search_start)
            .filter(|(_, c)| c.is_whitespace())
            .map(|(i, _)| i + 1)
            .last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_chunk() {
        let splitter = TextSplitter::new(1500, 100);
        let chunks = splitter.split("A short document.");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], "A short document.");
    }

    #[test]
    fn test_empty_text() {
        let splitter = TextSplitter::new(1500, 100);
        assert!(splitter.split("").is_empty());
        assert!(splitter.split("   \n  ").is_empty());
    }

    #[test]
    fn test_chunk_size_respected() {
        let splitter = TextSplitter::new(200, 20);
        let text = "word ".repeat(500);
        let chunks = splitter.split(&text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 200);
        }
    }

    #[test]
    fn test_overlap_between_consecutive_chunks() {
        let splitter = TextSplitter::new(1500, 100);
        // 3000 characters of unbroken text forces hard cuts at the window end
        let text: String = "a".repeat(3000);
        let chunks = splitter.split(&text);

        assert!(chunks.len() >= 2);
        for pair in chunks.windows(2) {
            let prev: Vec<char> = pair[0].chars().collect();
            let next: Vec<char> = pair[1].chars().collect();
            let tail: String = prev[prev.len() - 100..].iter().collect();
            let head: String = next[..100].iter().collect();
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn test_prefers_paragraph_boundary() {
        let splitter = TextSplitter::new(100, 10);
        let text = format!("{}\n\n{}", "x".repeat(85), "y".repeat(200));
        let chunks = splitter.split(&text);

        // First cut lands on the paragraph break inside the window tail
        assert!(chunks[0].ends_with("\n\n"));
        assert!(chunks[0].chars().count() <= 100);
    }

    #[test]
    fn test_prefers_sentence_boundary() {
        let splitter = TextSplitter::new(100, 10);
        let text = format!("{}. {}", "x".repeat(83), "y".repeat(200));
        let chunks = splitter.split(&text);

        assert!(chunks[0].ends_with(". "));
    }

    #[test]
    fn test_three_thousand_chars_at_default_settings() {
        let splitter = TextSplitter::new(1500, 100);
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(67); // ~3082 chars
        let chunks = splitter.split(&text);

        assert!(chunks.len() >= 2);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 1500);
        }
    }
}
