mod bionic;
pub use bionic::*;

mod compose;
pub use compose::*;

mod emit;
pub use emit::*;

mod engine;
pub use engine::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod geometry;
pub use geometry::*;

mod image;
pub use self::image::*;

mod linebreak;
pub use linebreak::*;

mod measure;
pub use measure::*;

mod pdf;
pub use pdf::*;

pub(crate) mod refs;

mod stats;
pub use stats::*;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
