//! Greedy word wrapping with full justification.
//!
//! A paragraph's runs are grouped into words (whitespace runs are the
//! separators), measured through the injected [TextMeasurer], and filled
//! line by line against the content width. Every closed line except the
//! paragraph's last has its slack redistributed evenly across the inter-word
//! gaps so its visible width matches the content width exactly; the last
//! line, and any line holding a single word, stays left-aligned at natural
//! spacing. A word that alone exceeds the content width is placed on its own
//! line and allowed to overflow — it is never truncated.

use crate::bionic::{Paragraph, Weight};
use crate::error::LayoutError;
use crate::measure::{validate, FontSpec, TextMeasurer, TextMetrics};
use crate::units::Pt;

/// A run, or a slice of one, with its resolved horizontal position and width
/// relative to the left edge of the content box
#[derive(Debug, Clone, PartialEq)]
pub struct LineFragment {
    pub text: String,
    pub weight: Weight,
    pub x: Pt,
    pub width: Pt,
}

/// An ordered sequence of positioned fragments sharing one baseline
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub fragments: Vec<LineFragment>,
    /// Occupied width, including inter-word gaps. Equals the content width
    /// for justified lines; may exceed it for a forced-overflow word.
    pub width: Pt,
    pub ascent: Pt,
    pub descent: Pt,
    /// Whether the slack was redistributed across the inter-word gaps
    pub justified: bool,
    /// Whether this is the final line of its paragraph; the compositor adds
    /// paragraph spacing after it
    pub ends_paragraph: bool,
}

impl Line {
    /// The vertical space this line occupies: its tallest extent plus leading
    pub fn height(&self, leading: Pt) -> Pt {
        self.ascent + self.descent + leading
    }
}

/// A measured bold or plain piece of a word
struct Piece {
    text: String,
    weight: Weight,
    metrics: TextMetrics,
}

/// A whitespace-delimited word: one plain piece, or a bold head and plain
/// tail in bionic mode
struct Word {
    pieces: Vec<Piece>,
    width: Pt,
}

/// Break a paragraph into lines that fit `content_width`, justifying every
/// line but the last.
pub fn layout_paragraph<M: TextMeasurer>(
    paragraph: &Paragraph,
    content_width: Pt,
    family: &str,
    size: Pt,
    measurer: &M,
) -> Result<Vec<Line>, LayoutError> {
    let plain = FontSpec::new(family, size, Weight::Plain);
    let bold = FontSpec::new(family, size, Weight::Bold);
    let space = validate(" ", measurer.measure(" ", &plain)?)?.width;

    // group runs into words; whitespace runs separate them
    let mut words: Vec<Word> = Vec::new();
    let mut current: Vec<Piece> = Vec::new();
    for run in &paragraph.runs {
        if run.text.chars().all(char::is_whitespace) {
            if !current.is_empty() {
                words.push(Word::new(std::mem::take(&mut current)));
            }
            continue;
        }

        let spec = match run.weight {
            Weight::Plain => &plain,
            Weight::Bold => &bold,
        };
        let metrics = validate(&run.text, measurer.measure(&run.text, spec)?)?;
        current.push(Piece {
            text: run.text.clone(),
            weight: run.weight,
            metrics,
        });
    }
    if !current.is_empty() {
        words.push(Word::new(current));
    }

    // greedy fill: tentatively append each word at natural spacing, closing
    // the line when it would overflow and at least one word is already placed
    let mut lines: Vec<Line> = Vec::new();
    let mut line_words: Vec<Word> = Vec::new();
    let mut line_width = Pt(0.0);
    for word in words {
        let tentative = if line_words.is_empty() {
            word.width
        } else {
            line_width + space + word.width
        };

        if !line_words.is_empty() && tentative > content_width {
            lines.push(close_line(
                std::mem::take(&mut line_words),
                space,
                content_width,
                true,
            ));
            line_width = word.width;
            line_words.push(word);
        } else {
            line_width = tentative;
            line_words.push(word);
        }
    }
    if !line_words.is_empty() {
        lines.push(close_line(line_words, space, content_width, false));
    }

    if let Some(last) = lines.last_mut() {
        last.ends_paragraph = true;
    }

    Ok(lines)
}

impl Word {
    fn new(pieces: Vec<Piece>) -> Word {
        let width = pieces.iter().map(|p| p.metrics.width).sum();
        Word { pieces, width }
    }
}

/// Position a closed line's fragments. Non-final lines with at least two
/// words absorb the slack into their gaps; everything else keeps the natural
/// space width.
fn close_line(words: Vec<Word>, space: Pt, content_width: Pt, non_final: bool) -> Line {
    let words_width: Pt = words.iter().map(|w| w.width).sum();
    let justified = non_final && words.len() >= 2;
    let gap = if justified {
        (content_width - words_width) / (words.len() - 1) as f32
    } else {
        space
    };

    let mut fragments = Vec::new();
    let mut ascent = Pt(0.0);
    let mut descent = Pt(0.0);
    let mut x = Pt(0.0);
    let word_count = words.len();
    for word in words {
        for piece in word.pieces {
            ascent = Pt(ascent.0.max(piece.metrics.ascent.0));
            descent = Pt(descent.0.max(piece.metrics.descent.0));
            fragments.push(LineFragment {
                text: piece.text,
                weight: piece.weight,
                x,
                width: piece.metrics.width,
            });
            x += piece.metrics.width;
        }
        x += gap;
    }

    let width = if justified {
        content_width
    } else {
        words_width + space * (word_count.saturating_sub(1) as f32)
    };

    Line {
        fragments,
        width,
        ascent,
        descent,
        justified,
        ends_paragraph: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bionic;
    use crate::measure::FixedMeasurer;

    fn measurer() -> FixedMeasurer {
        FixedMeasurer::new(Pt(10.0), Pt(8.0), Pt(2.0))
    }

    fn layout(text: &str, content_width: Pt) -> Vec<Line> {
        let paras = bionic::paragraphs(text);
        layout_paragraph(&paras[0], content_width, "test", Pt(12.0), &measurer()).unwrap()
    }

    #[test]
    fn single_line_is_left_aligned() {
        let lines = layout("Hello world", Pt(500.0));
        assert_eq!(lines.len(), 1);
        assert!(!lines[0].justified);
        assert!(lines[0].ends_paragraph);
        // "Hello" is 50 wide, natural space 10, "world" starts at 60
        assert_eq!(lines[0].fragments[1].x, Pt(60.0));
        assert_eq!(lines[0].width, Pt(110.0));
    }

    #[test]
    fn three_words_justify_into_two_lines() {
        // words of width 40 each, content width 100: two fit, the third wraps
        let lines = layout("aaaa bbbb cccc", Pt(100.0));
        assert_eq!(lines.len(), 2);

        let first = &lines[0];
        assert!(first.justified);
        assert_eq!(first.width, Pt(100.0));
        // the single gap absorbs 100 - 80 = 20
        assert_eq!(first.fragments[1].x, Pt(60.0));
        let last_frag = first.fragments.last().unwrap();
        assert!((last_frag.x + last_frag.width - Pt(100.0)).0.abs() < 1e-4);

        let second = &lines[1];
        assert!(!second.justified);
        assert!(second.ends_paragraph);
        assert_eq!(second.fragments[0].x, Pt(0.0));
    }

    #[test]
    fn oversized_word_overflows_on_its_own_line() {
        let lines = layout("abcdefghijklmnop xy", Pt(100.0));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].fragments.len(), 1);
        assert!(lines[0].width > Pt(100.0));
        assert!(!lines[0].justified);
        assert_eq!(lines[1].fragments[0].text, "xy");
    }

    #[test]
    fn bionic_pieces_stay_adjacent() {
        let paras = bionic::bionify("Hello world");
        let lines =
            layout_paragraph(&paras[0], Pt(500.0), "test", Pt(12.0), &measurer()).unwrap();
        let frags = &lines[0].fragments;
        assert_eq!(frags.len(), 4);
        assert_eq!(frags[0].text, "Hel");
        assert_eq!(frags[0].weight, Weight::Bold);
        // "lo" starts exactly where "Hel" ends
        assert_eq!(frags[1].x, frags[0].x + frags[0].width);
        assert_eq!(frags[1].weight, Weight::Plain);
    }

    #[test]
    fn justified_lines_fill_the_content_width_exactly() {
        let text = "the quick brown fox jumps over the lazy dog again and again";
        let lines = layout(text, Pt(200.0));
        assert!(lines.len() > 1);
        for line in &lines[..lines.len() - 1] {
            if line.justified {
                let last = line.fragments.last().unwrap();
                assert!((last.x + last.width - Pt(200.0)).0.abs() < 1e-3);
            }
        }
        // final line never exceeds the natural width
        let final_line = lines.last().unwrap();
        assert!(final_line.width <= Pt(200.0) + Pt(1e-3));
    }

    #[test]
    fn line_metrics_track_the_tallest_fragment() {
        let lines = layout("hello", Pt(500.0));
        assert_eq!(lines[0].ascent, Pt(8.0));
        assert_eq!(lines[0].descent, Pt(2.0));
        assert_eq!(lines[0].height(Pt(2.0)), Pt(12.0));
    }

    #[test]
    fn measurement_failure_aborts() {
        struct BrokenMeasurer;
        impl TextMeasurer for BrokenMeasurer {
            fn measure(&self, _: &str, _: &FontSpec) -> Result<TextMetrics, LayoutError> {
                Ok(TextMetrics {
                    width: Pt(f32::INFINITY),
                    ascent: Pt(1.0),
                    descent: Pt(1.0),
                })
            }
        }

        let paras = bionic::paragraphs("hello");
        let err = layout_paragraph(&paras[0], Pt(100.0), "test", Pt(12.0), &BrokenMeasurer)
            .unwrap_err();
        assert!(matches!(err, LayoutError::Measurement { .. }));
    }
}
