//! The pipeline front door: transform, break, compose, and emit in one
//! synchronous pass over an immutable snapshot of the document text.
//!
//! Nothing here is cached or mutated in place: every export call recomputes
//! the full paragraph/line/page structure from its inputs, so re-invoking
//! after an edit simply reruns the pipeline. A caller that tears down its
//! context mid-call can just discard the result.

use crate::bionic;
use crate::compose::{compose_pages, LayoutBudget, Page, PageHeader};
use crate::emit::{emit, Logo, RenderInstruction};
use crate::error::LayoutError;
use crate::geometry::PageGeometry;
use crate::linebreak::{layout_paragraph, Line};
use crate::measure::TextMeasurer;
use crate::stats::DocumentStats;
use crate::units::Pt;

/// Everything the layout pipeline needs besides the text itself
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub geometry: PageGeometry,
    pub font_family: String,
    pub font_size: Pt,
    /// Document title, repeated in every page header
    pub title: String,
    /// Whether to run the bionic transform before line breaking
    pub bionic: bool,
    /// Optional header logo drawn on the first page
    pub logo: Option<Logo>,
    pub budget: LayoutBudget,
}

impl LayoutOptions {
    pub fn new<S: ToString>(geometry: PageGeometry, font_family: S, font_size: Pt) -> LayoutOptions {
        LayoutOptions {
            geometry,
            font_family: font_family.to_string(),
            font_size,
            title: "Untitled".into(),
            bionic: false,
            logo: None,
            budget: LayoutBudget::default(),
        }
    }

    pub fn with_title<S: ToString>(mut self, title: S) -> LayoutOptions {
        self.title = title.to_string();
        self
    }

    pub fn with_bionic(mut self, bionic: bool) -> LayoutOptions {
        self.bionic = bionic;
        self
    }

    pub fn with_logo(mut self, logo: Logo) -> LayoutOptions {
        self.logo = Some(logo);
        self
    }
}

/// Run the full layout pipeline: paragraph transform, line breaking with
/// justification, and pagination. An empty document yields a single page
/// carrying only header metadata.
pub fn layout_document<M: TextMeasurer>(
    text: &str,
    opts: &LayoutOptions,
    measurer: &M,
) -> Result<Vec<Page>, LayoutError> {
    let header = PageHeader {
        title: opts.title.clone(),
        stats: DocumentStats::from_text(text),
    };

    let paragraphs = if opts.bionic {
        bionic::bionify(text)
    } else {
        bionic::paragraphs(text)
    };

    let content_width = opts.geometry.content_width();
    let mut lines: Vec<Line> = Vec::new();
    for paragraph in &paragraphs {
        lines.extend(layout_paragraph(
            paragraph,
            content_width,
            &opts.font_family,
            opts.font_size,
            measurer,
        )?);
    }

    compose_pages(lines, &opts.geometry, &header, &opts.budget)
}

/// Layout and emit in one call: the per-page draw instruction lists ready for
/// a rendering collaborator such as [crate::PdfRenderer]
pub fn render_document<M: TextMeasurer>(
    text: &str,
    opts: &LayoutOptions,
    measurer: &M,
) -> Result<Vec<Vec<RenderInstruction>>, LayoutError> {
    let pages = layout_document(text, opts, measurer)?;
    emit(&pages, opts, measurer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Margins;
    use crate::measure::FixedMeasurer;

    fn options() -> LayoutOptions {
        LayoutOptions::new(
            PageGeometry {
                size: (Pt(140.0), Pt(130.0)),
                margins: Margins::all(Pt(10.0)),
                header_height: Pt(30.0),
                leading: Pt(0.0),
                paragraph_spacing: Pt(0.0),
            },
            "test",
            Pt(12.0),
        )
        .with_title("Engine Test")
    }

    fn measurer() -> FixedMeasurer {
        FixedMeasurer::new(Pt(10.0), Pt(8.0), Pt(2.0))
    }

    #[test]
    fn empty_document_exports_one_empty_page() {
        let pages = layout_document("", &options(), &measurer()).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].lines.is_empty());
        assert_eq!(pages[0].header.stats.words, 0);
        assert_eq!(format!("{:.2}", pages[0].header.stats.reading_minutes()), "0.00");
    }

    #[test]
    fn bionic_flag_switches_the_transform() {
        let plain = layout_document("Hello world", &options(), &measurer()).unwrap();
        let bionic = layout_document(
            "Hello world",
            &options().with_bionic(true),
            &measurer(),
        )
        .unwrap();
        let plain_frags = plain[0].lines[0].line.fragments.len();
        let bionic_frags = bionic[0].lines[0].line.fragments.len();
        assert_eq!(plain_frags, 2);
        assert_eq!(bionic_frags, 4);
    }

    #[test]
    fn relayout_is_deterministic() {
        let text = "The quick brown fox jumps over the lazy dog.\n\nPack my box.";
        let first = layout_document(text, &options(), &measurer()).unwrap();
        let second = layout_document(text, &options(), &measurer()).unwrap();
        assert_eq!(first, second);
    }
}
