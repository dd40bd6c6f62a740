use crate::error::LayoutError;
use crate::refs::{ObjectReferences, RefType};
use image::{ColorType, DynamicImage};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::Path;

/// A decoded raster image, ready to embed as a PDF image XObject. RGB JPEGs
/// keep their original bytes and are embedded directly; everything else is
/// re-encoded as a deflated RGB stream, with an alpha channel split off into
/// a soft mask.
pub struct Image {
    data: ImageData,
    pub width: u32,
    pub height: u32,
}

enum ImageData {
    /// Original JPEG bytes, embeddable as-is with DCTDecode
    Jpeg(Vec<u8>),
    Decoded(DynamicImage),
}

impl Image {
    pub fn load_from_disk<P: AsRef<Path>>(path: P) -> Result<Image, LayoutError> {
        Self::load(&std::fs::read(path)?)
    }

    pub fn load(bytes: &[u8]) -> Result<Image, LayoutError> {
        let format = image::guess_format(bytes)?;
        let decoded = image::load_from_memory_with_format(bytes, format)?;

        let data = if format == image::ImageFormat::Jpeg && decoded.color() == ColorType::Rgb8 {
            ImageData::Jpeg(bytes.to_vec())
        } else {
            ImageData::Decoded(decoded.clone())
        };

        Ok(Image {
            data,
            width: decoded.width(),
            height: decoded.height(),
        })
    }

    pub fn from_decoded(decoded: DynamicImage) -> Image {
        let width = decoded.width();
        let height = decoded.height();
        Image {
            data: ImageData::Decoded(decoded),
            width,
            height,
        }
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        index: usize,
        writer: &mut Pdf,
    ) -> Result<(), LayoutError> {
        let id = refs.gen(RefType::Image(index));
        let level = CompressionLevel::DefaultLevel as u8;

        let (filter, bytes, mask) = match &self.data {
            ImageData::Jpeg(bytes) => (Filter::DctDecode, bytes.clone(), None),
            ImageData::Decoded(decoded) => {
                use image::GenericImageView;
                let mask = decoded.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = decoded.pixels().map(|p| (p.2).0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });
                let bytes = compress_to_vec_zlib(decoded.to_rgb8().as_raw(), level);
                (Filter::FlateDecode, bytes, mask)
            }
        };

        let mut image = writer.image_xobject(id, bytes.as_slice());
        image.filter(filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);

        let mask_id = mask.as_ref().map(|_| refs.gen(RefType::ImageMask(index)));
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        if let (Some(mask_id), Some(mask)) = (mask_id, mask) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }

        Ok(())
    }
}
