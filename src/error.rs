use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum LayoutError {
    /// The text measurer returned a non-finite width, ascent, or descent for a
    /// piece of text. The pipeline aborts without emitting any pages so that a
    /// partial or corrupt export can never be produced.
    #[error("measuring {text:?} produced a non-finite {quantity}")]
    Measurement {
        text: String,
        quantity: &'static str,
    },

    /// Pagination exceeded the caller-configured page budget. Guards against
    /// pathological inputs; no partial output is returned.
    #[error("pagination exceeded the budget of {limit} pages")]
    PageBudget { limit: usize },

    /// A draw instruction referenced an image resource that was never
    /// registered with the renderer
    #[error("no image registered for resource {0:?}")]
    UnknownResource(String),

    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to parse the image
    Image(#[from] image::ImageError),
}
