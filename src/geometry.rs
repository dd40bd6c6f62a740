//! Fixed page geometry: sizes, margins, and the boxes derived from them.
//!
//! A [PageGeometry] is immutable configuration supplied by the caller; the
//! compositor never mutates it. There is no control preventing forced
//! overflow lines from extending past the content box — the geometry is the
//! target the layout aims for, and the overflow policy is documented on the
//! line breaker and compositor.

use crate::units::Pt;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }

    fn landscape(self) -> PageSize {
        if self.0 >= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }
}

/// A rectangle, specified by two opposite corners (lower-left and
/// upper-right, in page coordinates with the origin at the bottom left).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    pub x1: Pt,
    pub y1: Pt,
    pub x2: Pt,
    pub y2: Pt,
}

impl Rect {
    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}

/// Margins between the page edge and the content box. Applied symmetrically
/// to every page of a document.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise
    /// fashion starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<U: Into<Pt>>(value: U) -> Margins {
        let value = value.into();
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create margins with different vertical (top and bottom) and horizontal
    /// (left and right) values
    pub fn symmetric(vertical: Pt, horizontal: Pt) -> Margins {
        Margins {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::default()
    }
}

/// The fixed dimensions governing pagination: page size, margins, the height
/// of the first page's header block, per-line leading, and the extra space
/// inserted after each paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    pub size: PageSize,
    pub margins: Margins,
    /// Height of the banner (logo, title, stats, rule) on page one. Later
    /// pages carry only a light header in the margin strip.
    pub header_height: Pt,
    /// Extra vertical space added to every line's height
    pub leading: Pt,
    /// Extra vertical space after the final line of each paragraph
    pub paragraph_spacing: Pt,
}

impl PageGeometry {
    pub fn new(size: PageSize, margins: Margins, header_height: Pt) -> PageGeometry {
        PageGeometry {
            size,
            margins,
            header_height,
            leading: Pt(2.0),
            paragraph_spacing: Pt(5.0),
        }
    }

    /// Where content can live, i.e. within the margins
    pub fn content_box(&self) -> Rect {
        Rect {
            x1: self.margins.left,
            y1: self.margins.bottom,
            x2: self.size.0 - self.margins.right,
            y2: self.size.1 - self.margins.top,
        }
    }

    pub fn content_width(&self) -> Pt {
        self.content_box().width()
    }

    /// Vertical space available for body lines on pages after the first
    pub fn body_height(&self) -> Pt {
        self.content_box().height()
    }

    /// Vertical space available for body lines on the first page, below the
    /// header block
    pub fn first_body_height(&self) -> Pt {
        self.body_height() - self.header_height
    }
}
