//! Document statistics shown in the repeated page header.

/// Summary statistics for a document, computed once from the full source text
/// and attached identically to every page.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DocumentStats {
    pub words: usize,
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub sentences: usize,
    pub paragraphs: usize,
}

impl DocumentStats {
    pub fn from_text(text: &str) -> DocumentStats {
        if text.is_empty() {
            return DocumentStats::default();
        }

        DocumentStats {
            words: text.split_whitespace().count(),
            characters: text.chars().count(),
            characters_no_spaces: text.chars().filter(|c| !c.is_whitespace()).count(),
            sentences: count_sentences(text),
            paragraphs: count_paragraphs(text),
        }
    }

    /// Estimated reading time in minutes, at 0.008 minutes per word
    pub fn reading_minutes(&self) -> f64 {
        0.008 * self.words as f64
    }
}

/// A sentence ends at a maximal run of `.`, `!`, or `?`
fn count_sentences(text: &str) -> usize {
    let mut count = 0;
    let mut in_terminator = false;
    for ch in text.chars() {
        let terminator = matches!(ch, '.' | '!' | '?');
        if terminator && !in_terminator {
            count += 1;
        }
        in_terminator = terminator;
    }
    count
}

/// Paragraphs are blocks of non-blank lines separated by blank lines
fn count_paragraphs(text: &str) -> usize {
    let mut count = 0;
    let mut in_paragraph = false;
    for line in text.split('\n') {
        let blank = line.trim().is_empty();
        if !blank && !in_paragraph {
            count += 1;
        }
        in_paragraph = !blank;
    }
    count
}
