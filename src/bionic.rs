//! The bionic transformer: turns plain text into paragraphs of weighted runs.
//!
//! Bionic reading bolds the leading portion of each word to guide the eye.
//! Every word longer than three characters is split at its visual midpoint
//! (`ceil(chars / 2)`) into a bold head and a plain tail; shorter words are
//! left entirely plain. Whitespace between words is preserved as its own
//! plain run so that inter-word gaps measure correctly downstream.

/// The weight of a run of text, used to select the font face when measuring
/// and rendering
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Weight {
    Plain,
    Bold,
}

/// A contiguous span of text sharing one weight, owned by exactly one
/// [Paragraph]
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub weight: Weight,
}

impl Run {
    pub fn plain<S: ToString>(text: S) -> Run {
        Run {
            text: text.to_string(),
            weight: Weight::Plain,
        }
    }

    pub fn bold<S: ToString>(text: S) -> Run {
        Run {
            text: text.to_string(),
            weight: Weight::Bold,
        }
    }
}

/// A maximal block of text delimited by blank lines. Concatenating a
/// paragraph's runs in order reproduces its original text, including internal
/// whitespace.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// The original paragraph text, reassembled from the runs
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Split text into paragraphs of bionic runs. Pure: no state survives the
/// call, and identical input always yields identical output.
pub fn bionify(text: &str) -> Vec<Paragraph> {
    split_paragraphs(text)
        .into_iter()
        .map(|para| Paragraph {
            runs: chunk(&para)
                .into_iter()
                .flat_map(|c| match c {
                    Chunk::Whitespace(ws) => vec![Run::plain(ws)],
                    Chunk::Word(word) => split_word(&word),
                })
                .collect(),
        })
        .collect()
}

/// Split text into paragraphs where every run is plain: the non-bionic path
/// through the same pipeline
pub fn paragraphs(text: &str) -> Vec<Paragraph> {
    split_paragraphs(text)
        .into_iter()
        .map(|para| Paragraph {
            runs: chunk(&para)
                .into_iter()
                .map(|c| match c {
                    Chunk::Whitespace(ws) => Run::plain(ws),
                    Chunk::Word(word) => Run::plain(word),
                })
                .collect(),
        })
        .collect()
}

/// Split a word at its visual midpoint into a bold head and a plain tail.
/// Words of three characters or fewer stay a single plain run.
fn split_word(word: &str) -> Vec<Run> {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() <= 3 {
        return vec![Run::plain(word)];
    }

    let mid = chars.len().div_ceil(2);
    let head: String = chars[..mid].iter().collect();
    let tail: String = chars[mid..].iter().collect();
    vec![Run::bold(head), Run::plain(tail)]
}

enum Chunk {
    Word(String),
    Whitespace(String),
}

/// Split a paragraph into alternating word and whitespace chunks, preserving
/// the whitespace exactly
fn chunk(para: &str) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut in_whitespace = None;

    for ch in para.chars() {
        let ws = ch.is_whitespace();
        if Some(ws) != in_whitespace {
            if !current.is_empty() {
                chunks.push(match in_whitespace {
                    Some(true) => Chunk::Whitespace(std::mem::take(&mut current)),
                    _ => Chunk::Word(std::mem::take(&mut current)),
                });
            }
            in_whitespace = Some(ws);
        }
        current.push(ch);
    }
    if !current.is_empty() {
        chunks.push(match in_whitespace {
            Some(true) => Chunk::Whitespace(current),
            _ => Chunk::Word(current),
        });
    }

    chunks
}

/// Split text on blank lines (one or more whitespace-only lines) into
/// paragraph strings, preserving single line breaks within a paragraph
fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paras = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paras.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paras.push(current.join("\n"));
    }

    paras
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_world_runs() {
        let paras = bionify("Hello world");
        assert_eq!(paras.len(), 1);
        let runs = &paras[0].runs;
        let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
        let weights: Vec<Weight> = runs.iter().map(|r| r.weight).collect();
        assert_eq!(texts, vec!["Hel", "lo", " ", "wor", "ld"]);
        assert_eq!(
            weights,
            vec![
                Weight::Bold,
                Weight::Plain,
                Weight::Plain,
                Weight::Bold,
                Weight::Plain
            ]
        );
    }

    #[test]
    fn short_words_stay_plain() {
        let paras = bionify("a an the cat");
        for run in &paras[0].runs {
            if run.text == "cat" || run.text == "the" || run.text == "an" || run.text == "a" {
                assert_eq!(run.weight, Weight::Plain);
            }
        }
    }

    #[test]
    fn split_point_is_ceiling_of_half() {
        for word in ["word", "words", "reading", "justification"] {
            let runs = split_word(word);
            assert_eq!(runs.len(), 2);
            let expected_mid = word.chars().count().div_ceil(2);
            assert_eq!(runs[0].text.chars().count(), expected_mid);
            assert_eq!(format!("{}{}", runs[0].text, runs[1].text), word);
        }
    }

    #[test]
    fn runs_reassemble_paragraph_text() {
        let text = "The quick  brown fox\njumps over the lazy dog";
        let paras = bionify(text);
        assert_eq!(paras.len(), 1);
        assert_eq!(paras[0].text(), text);
    }

    #[test]
    fn blank_lines_delimit_paragraphs() {
        let paras = bionify("first paragraph\n\nsecond one\n\n\n\nthird");
        assert_eq!(paras.len(), 3);
        assert_eq!(paras[0].text(), "first paragraph");
        assert_eq!(paras[1].text(), "second one");
        assert_eq!(paras[2].text(), "third");
    }

    #[test]
    fn whitespace_only_line_is_a_delimiter() {
        let paras = paragraphs("one\n   \ntwo");
        assert_eq!(paras.len(), 2);
    }

    #[test]
    fn plain_mode_has_no_bold_runs() {
        let paras = paragraphs("Hello world again");
        assert!(paras[0].runs.iter().all(|r| r.weight == Weight::Plain));
    }

    #[test]
    fn empty_text_yields_no_paragraphs() {
        assert!(bionify("").is_empty());
        assert!(bionify("\n\n  \n").is_empty());
    }
}
