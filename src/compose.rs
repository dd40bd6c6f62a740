//! The page compositor: splits a line stream into fixed-size pages.
//!
//! Composition is a closed-form accumulation over three states — filling the
//! first page (which loses the header block's height), filling a later page,
//! and done — with no trial placement or rollback: line heights are already
//! known from measurement. Every page except possibly the last holds at
//! least one line; a line taller than a whole page is force-placed alone on
//! its own page rather than dropped.

use crate::error::LayoutError;
use crate::geometry::PageGeometry;
use crate::linebreak::Line;
use crate::stats::DocumentStats;
use crate::units::Pt;

/// Header metadata computed once per document and attached identically to
/// every page (only the page number varies)
#[derive(Debug, Clone, PartialEq)]
pub struct PageHeader {
    pub title: String,
    pub stats: DocumentStats,
}

/// A line bound to its absolute baseline y-coordinate (page origin at the
/// bottom left, as in PDF)
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedLine {
    pub baseline: Pt,
    pub line: Line,
}

/// An ordered sequence of positioned lines within one page of the document
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number
    pub number: usize,
    pub lines: Vec<PositionedLine>,
    pub header: PageHeader,
}

/// Bound on pagination, guarding against pathological inputs. Exceeding it
/// aborts the export with [LayoutError::PageBudget] and no partial pages.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LayoutBudget {
    pub max_pages: usize,
}

impl Default for LayoutBudget {
    fn default() -> LayoutBudget {
        LayoutBudget { max_pages: 500 }
    }
}

enum Fill {
    FirstPage,
    LaterPage,
}

/// Split `lines` into pages. An empty line stream still yields a single page
/// carrying the header, so exporting an empty document stays idempotent.
pub fn compose_pages(
    lines: Vec<Line>,
    geometry: &PageGeometry,
    header: &PageHeader,
    budget: &LayoutBudget,
) -> Result<Vec<Page>, LayoutError> {
    let content_box = geometry.content_box();
    let page_dims = |state: &Fill| match state {
        Fill::FirstPage => (
            geometry.first_body_height(),
            content_box.y2 - geometry.header_height,
        ),
        Fill::LaterPage => (geometry.body_height(), content_box.y2),
    };

    let mut pages: Vec<Page> = Vec::new();
    let mut state = Fill::FirstPage;
    let mut current: Vec<PositionedLine> = Vec::new();
    let mut used = Pt(0.0);

    for line in lines {
        let height = line.height(geometry.leading);
        let (available, _) = page_dims(&state);

        // close the page when the next line would exceed the available
        // height; a too-tall line on an empty page is force-placed instead
        if !current.is_empty() && used + height > available {
            if pages.len() >= budget.max_pages {
                return Err(LayoutError::PageBudget {
                    limit: budget.max_pages,
                });
            }
            pages.push(Page {
                number: pages.len() + 1,
                lines: std::mem::take(&mut current),
                header: header.clone(),
            });
            state = Fill::LaterPage;
            used = Pt(0.0);
        }

        let (_, top) = page_dims(&state);
        let ends_paragraph = line.ends_paragraph;
        current.push(PositionedLine {
            baseline: top - used - line.ascent,
            line,
        });
        used += height;
        if ends_paragraph {
            used += geometry.paragraph_spacing;
        }
    }

    if pages.len() >= budget.max_pages && !current.is_empty() && !pages.is_empty() {
        return Err(LayoutError::PageBudget {
            limit: budget.max_pages,
        });
    }
    pages.push(Page {
        number: pages.len() + 1,
        lines: current,
        header: header.clone(),
    });

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Margins;

    fn header() -> PageHeader {
        PageHeader {
            title: "Test Document".into(),
            stats: DocumentStats::default(),
        }
    }

    /// geometry with a 100pt body, a 30pt first-page header, and no
    /// leading or paragraph spacing so line heights are exact
    fn geometry() -> PageGeometry {
        PageGeometry {
            size: (Pt(200.0), Pt(100.0)),
            margins: Margins::empty(),
            header_height: Pt(30.0),
            leading: Pt(0.0),
            paragraph_spacing: Pt(0.0),
        }
    }

    /// a line of the given total height (ascent + descent)
    fn line(ascent: f32, descent: f32) -> Line {
        Line {
            fragments: Vec::new(),
            width: Pt(0.0),
            ascent: Pt(ascent),
            descent: Pt(descent),
            justified: false,
            ends_paragraph: false,
        }
    }

    #[test]
    fn first_page_loses_the_header_height() {
        // five lines of height 25: the first page (70 available) takes two,
        // the second (100 available) takes the remaining three
        let lines = vec![line(20.0, 5.0); 5];
        let pages =
            compose_pages(lines, &geometry(), &header(), &LayoutBudget::default()).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].lines.len(), 2);
        assert_eq!(pages[1].lines.len(), 3);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[1].number, 2);
        // header metadata repeats identically
        assert_eq!(pages[0].header, pages[1].header);
    }

    #[test]
    fn baselines_step_down_from_the_top() {
        let lines = vec![line(20.0, 5.0); 2];
        let pages =
            compose_pages(lines, &geometry(), &header(), &LayoutBudget::default()).unwrap();
        // first page body starts below the header block: top = 100 - 30 = 70
        assert_eq!(pages[0].lines[0].baseline, Pt(50.0));
        assert_eq!(pages[0].lines[1].baseline, Pt(25.0));
    }

    #[test]
    fn too_tall_line_is_force_placed_alone() {
        let lines = vec![line(90.0, 30.0), line(20.0, 5.0)];
        let pages =
            compose_pages(lines, &geometry(), &header(), &LayoutBudget::default()).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].lines.len(), 1);
        assert_eq!(pages[1].lines.len(), 1);
    }

    #[test]
    fn empty_stream_still_yields_one_page() {
        let pages =
            compose_pages(Vec::new(), &geometry(), &header(), &LayoutBudget::default()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].number, 1);
        assert!(pages[0].lines.is_empty());
    }

    #[test]
    fn paragraph_spacing_counts_against_the_page() {
        let mut geometry = geometry();
        geometry.paragraph_spacing = Pt(30.0);
        let mut para_end = line(20.0, 5.0);
        para_end.ends_paragraph = true;
        // 25 + 30 spacing + 25 = 80 > 70: the second line moves to page two
        let lines = vec![para_end, line(20.0, 5.0)];
        let pages =
            compose_pages(lines, &geometry, &header(), &LayoutBudget::default()).unwrap();
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn exceeding_the_page_budget_fails() {
        let lines = vec![line(20.0, 5.0); 50];
        let err = compose_pages(
            lines,
            &geometry(),
            &header(),
            &LayoutBudget { max_pages: 2 },
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::PageBudget { limit: 2 }));
    }

    #[test]
    fn pages_never_overfill() {
        let lines = vec![line(15.0, 3.0); 40];
        let pages =
            compose_pages(lines, &geometry(), &header(), &LayoutBudget::default()).unwrap();
        for page in &pages {
            let total: Pt = pages_height(page);
            let available = if page.number == 1 { Pt(70.0) } else { Pt(100.0) };
            assert!(total <= available + Pt(1e-3));
        }

        fn pages_height(page: &Page) -> Pt {
            page.lines
                .iter()
                .map(|l| l.line.ascent + l.line.descent)
                .sum()
        }
    }
}
