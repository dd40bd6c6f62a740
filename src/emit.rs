//! The render emitter: walks composed pages and produces primitive draw
//! instructions for an external rendering collaborator.
//!
//! Page one opens with the full banner (logo, centred title, stats lines,
//! and a rule closing the header block); later pages carry a light header in
//! the top margin strip. Every page gets a centred page number in the bottom
//! margin, then one text instruction per line fragment at its resolved
//! position. The emitter produces instructions only — turning them into an
//! actual document binary is the renderer's job.

use crate::bionic::Weight;
use crate::compose::Page;
use crate::engine::LayoutOptions;
use crate::error::LayoutError;
use crate::measure::{FontSpec, TextMeasurer};
use crate::units::Pt;

/// A primitive draw instruction. Coordinates follow the renderer contract:
/// text is placed with its left edge at `x` and baseline at `y`, images with
/// their lower-left corner at `(x, y)` scaled to the given extent, rules as
/// straight lines between the two points.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderInstruction {
    Text {
        text: String,
        x: Pt,
        y: Pt,
        font: FontSpec,
    },
    Image {
        resource: String,
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
    },
    Rule {
        x1: Pt,
        y1: Pt,
        x2: Pt,
        y2: Pt,
    },
}

/// The fixed header logo: the name of a registered image resource and the
/// extent to draw it at
#[derive(Debug, Clone, PartialEq)]
pub struct Logo {
    pub resource: String,
    pub width: Pt,
    pub height: Pt,
}

/// Emit draw instructions for every page, one instruction list per page. The
/// measurer is only consulted for header chrome (centring the title,
/// right-aligning the page number); body fragments already carry their
/// resolved positions.
pub fn emit<M: TextMeasurer>(
    pages: &[Page],
    opts: &LayoutOptions,
    measurer: &M,
) -> Result<Vec<Vec<RenderInstruction>>, LayoutError> {
    pages
        .iter()
        .map(|page| emit_page(page, opts, measurer))
        .collect()
}

/// Emit the draw instructions for a single page: header chrome first, then
/// body text runs.
pub fn emit_page<M: TextMeasurer>(
    page: &Page,
    opts: &LayoutOptions,
    measurer: &M,
) -> Result<Vec<RenderInstruction>, LayoutError> {
    let cb = opts.geometry.content_box();
    let title_font = FontSpec::new(&opts.font_family, opts.font_size * 1.5, Weight::Bold);
    let meta_font = FontSpec::new(&opts.font_family, opts.font_size * 0.75, Weight::Plain);

    let mut instructions = Vec::new();

    if page.number == 1 {
        // full banner inside the header block
        let mut stats_x = cb.x1;
        if let Some(logo) = &opts.logo {
            instructions.push(RenderInstruction::Image {
                resource: logo.resource.clone(),
                x: cb.x1,
                y: cb.y2 - logo.height,
                width: logo.width,
                height: logo.height,
            });
            stats_x = cb.x1 + logo.width + Pt(8.0);
        }

        let title_width = measurer.measure(&page.header.title, &title_font)?.width;
        let title_y = cb.y2 - title_font.size;
        instructions.push(RenderInstruction::Text {
            text: page.header.title.clone(),
            x: cb.x1 + (cb.width() - title_width) / 2.0,
            y: title_y,
            font: title_font,
        });

        let stats = &page.header.stats;
        let summary = format!(
            "{} words · {} characters · {} sentences · {} paragraphs",
            stats.words, stats.characters, stats.sentences, stats.paragraphs
        );
        let reading = format!("reading time {:.2} minutes", stats.reading_minutes());
        for (i, text) in [summary, reading].into_iter().enumerate() {
            instructions.push(RenderInstruction::Text {
                text,
                x: stats_x,
                y: title_y - meta_font.size * (1.6 + 1.4 * i as f32),
                font: meta_font.clone(),
            });
        }

        let rule_y = cb.y2 - opts.geometry.header_height + Pt(4.0);
        instructions.push(RenderInstruction::Rule {
            x1: cb.x1,
            y1: rule_y,
            x2: cb.x2,
            y2: rule_y,
        });
    } else {
        // light header in the top margin strip: title left, page number right
        let strip_y = cb.y2 + Pt(6.0);
        instructions.push(RenderInstruction::Text {
            text: page.header.title.clone(),
            x: cb.x1,
            y: strip_y,
            font: meta_font.clone(),
        });
        let label = format!("page {}", page.number);
        let label_width = measurer.measure(&label, &meta_font)?.width;
        instructions.push(RenderInstruction::Text {
            text: label,
            x: cb.x2 - label_width,
            y: strip_y,
            font: meta_font.clone(),
        });
    }

    // centred page number in the bottom margin
    let number = page.number.to_string();
    let number_width = measurer.measure(&number, &meta_font)?.width;
    instructions.push(RenderInstruction::Text {
        text: number,
        x: cb.x1 + (cb.width() - number_width) / 2.0,
        y: cb.y1 - meta_font.size - Pt(4.0),
        font: meta_font,
    });

    // body text, one instruction per fragment
    for positioned in &page.lines {
        for fragment in &positioned.line.fragments {
            instructions.push(RenderInstruction::Text {
                text: fragment.text.clone(),
                x: cb.x1 + fragment.x,
                y: positioned.baseline,
                font: FontSpec::new(&opts.font_family, opts.font_size, fragment.weight),
            });
        }
    }

    Ok(instructions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{LayoutBudget, PageHeader};
    use crate::engine::layout_document;
    use crate::geometry::{Margins, PageGeometry};
    use crate::measure::FixedMeasurer;
    use crate::stats::DocumentStats;

    fn options() -> LayoutOptions {
        LayoutOptions {
            geometry: PageGeometry {
                size: (Pt(200.0), Pt(130.0)),
                margins: Margins::all(Pt(10.0)),
                header_height: Pt(30.0),
                leading: Pt(0.0),
                paragraph_spacing: Pt(0.0),
            },
            font_family: "test".into(),
            font_size: Pt(12.0),
            title: "Sample".into(),
            bionic: false,
            logo: None,
            budget: LayoutBudget::default(),
        }
    }

    fn measurer() -> FixedMeasurer {
        FixedMeasurer::new(Pt(5.0), Pt(8.0), Pt(2.0))
    }

    #[test]
    fn first_page_has_banner_and_rule() {
        let pages = layout_document("hello world", &options(), &measurer()).unwrap();
        let instructions = emit_page(&pages[0], &options(), &measurer()).unwrap();
        assert!(instructions
            .iter()
            .any(|i| matches!(i, RenderInstruction::Rule { .. })));
        assert!(instructions.iter().any(|i| matches!(
            i,
            RenderInstruction::Text { text, font, .. }
                if text == "Sample" && font.weight == Weight::Bold
        )));
        // stats lines are present
        assert!(instructions.iter().any(|i| matches!(
            i,
            RenderInstruction::Text { text, .. } if text.contains("2 words")
        )));
    }

    #[test]
    fn later_pages_get_the_light_header() {
        let opts = options();
        let page = Page {
            number: 2,
            lines: Vec::new(),
            header: PageHeader {
                title: "Sample".into(),
                stats: DocumentStats::default(),
            },
        };
        let instructions = emit_page(&page, &opts, &measurer()).unwrap();
        assert!(!instructions
            .iter()
            .any(|i| matches!(i, RenderInstruction::Rule { .. })));
        assert!(instructions.iter().any(|i| matches!(
            i,
            RenderInstruction::Text { text, .. } if text == "page 2"
        )));
    }

    #[test]
    fn logo_is_drawn_at_the_top_left() {
        let mut opts = options();
        opts.logo = Some(Logo {
            resource: "logo".into(),
            width: Pt(20.0),
            height: Pt(20.0),
        });
        let pages = layout_document("hello", &opts, &measurer()).unwrap();
        let instructions = emit_page(&pages[0], &opts, &measurer()).unwrap();
        let cb = opts.geometry.content_box();
        assert!(instructions.iter().any(|i| matches!(
            i,
            RenderInstruction::Image { resource, x, y, .. }
                if resource == "logo" && *x == cb.x1 && *y == cb.y2 - Pt(20.0)
        )));
    }

    #[test]
    fn every_fragment_becomes_a_text_instruction() {
        let opts = options();
        let pages = layout_document("one two three", &opts, &measurer()).unwrap();
        let fragment_count: usize = pages[0]
            .lines
            .iter()
            .map(|l| l.line.fragments.len())
            .sum();
        let instructions = emit_page(&pages[0], &opts, &measurer()).unwrap();
        let body_texts = instructions
            .iter()
            .filter(|i| {
                matches!(i, RenderInstruction::Text { font, .. } if font.size == Pt(12.0))
            })
            .count();
        assert_eq!(body_texts, fragment_count);
    }
}
