//! The text measurement seam.
//!
//! The layout engine never talks to a font or rendering surface directly; it
//! measures text through the [TextMeasurer] trait so the backend can be
//! swapped between real font metrics ([crate::FontSet]) and the synthetic
//! [FixedMeasurer] used by tests and previews. Reproducible pagination
//! requires measurers to be deterministic for identical inputs.

use crate::bionic::Weight;
use crate::error::LayoutError;
use crate::units::Pt;

/// A font request: family name, size, and weight. The family is carried for
/// backends that resolve multiple families; [crate::FontSet] measures with
/// whichever faces it was loaded with.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: Pt,
    pub weight: Weight,
}

impl FontSpec {
    pub fn new<S: ToString>(family: S, size: Pt, weight: Weight) -> FontSpec {
        FontSpec {
            family: family.to_string(),
            size,
            weight,
        }
    }
}

/// The result of measuring a piece of text: its advance width and the
/// vertical extents of the font at the requested size. `descent` is the
/// distance from the baseline down to the bottom, as a positive value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextMetrics {
    pub width: Pt,
    pub ascent: Pt,
    pub descent: Pt,
}

/// Measures rendered text. Implementations must be deterministic: the same
/// text and font spec always produce the same metrics.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> Result<TextMetrics, LayoutError>;
}

/// A synthetic measurer where every character advances by the same fixed
/// amount, regardless of weight. Deterministic by construction, which makes
/// it the reference backend for tests and for cheap editing-time previews.
#[derive(Debug, Copy, Clone)]
pub struct FixedMeasurer {
    pub advance: Pt,
    pub ascent: Pt,
    pub descent: Pt,
}

impl FixedMeasurer {
    pub fn new(advance: Pt, ascent: Pt, descent: Pt) -> FixedMeasurer {
        FixedMeasurer {
            advance,
            ascent,
            descent,
        }
    }
}

impl TextMeasurer for FixedMeasurer {
    fn measure(&self, text: &str, _font: &FontSpec) -> Result<TextMetrics, LayoutError> {
        Ok(TextMetrics {
            width: self.advance * text.chars().count() as f32,
            ascent: self.ascent,
            descent: self.descent,
        })
    }
}

/// Reject non-finite metrics before they can poison a layout
pub(crate) fn validate(
    text: &str,
    metrics: TextMetrics,
) -> Result<TextMetrics, LayoutError> {
    for (value, quantity) in [
        (metrics.width, "width"),
        (metrics.ascent, "ascent"),
        (metrics.descent, "descent"),
    ] {
        if !value.0.is_finite() {
            return Err(LayoutError::Measurement {
                text: text.to_string(),
                quantity,
            });
        }
    }
    Ok(metrics)
}
