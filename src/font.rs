use crate::bionic::Weight;
use crate::error::LayoutError;
use crate::measure::{validate, FontSpec, TextMeasurer, TextMetrics};
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use pdf_writer::types::{CidFontType, FontFlags, SystemInfo};
use pdf_writer::{Filter, Finish, Name, Pdf, Str};
use std::collections::HashMap;

/// A parsed TTF or OTF font face. The face is embedded in its entirety in
/// generated PDFs, so large fonts increase the output size accordingly.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, returning an error if the face cannot be
    /// parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, LayoutError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    /// Obtain the full name of the font. Panics if the font does not have a name
    pub fn name(&self) -> String {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
            .expect("font face has a name")
    }

    /// Obtain the family name of the font. Panics if the font does not have a
    /// font family
    pub fn family(&self) -> String {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FAMILY && name.is_unicode())
            .and_then(|name| name.to_string())
            .expect("font face has a family")
    }

    fn scaling(&self, size: Pt) -> f32 {
        size.0 / self.face.as_face_ref().units_per_em() as f32
    }

    /// Distance from the baseline to the top of the font at the given size
    pub fn ascent(&self, size: Pt) -> Pt {
        Pt(self.face.as_face_ref().ascender() as f32 * self.scaling(size))
    }

    /// Distance from the baseline to the bottom of the font at the given
    /// size. Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        Pt(self.face.as_face_ref().descender() as f32 * self.scaling(size))
    }

    /// Extra space between lines at the given size
    pub fn leading(&self, size: Pt) -> Pt {
        Pt(self.face.as_face_ref().line_gap() as f32 * self.scaling(size))
    }

    /// How much to vertically offset one row of text below another
    pub fn line_height(&self, size: Pt) -> Pt {
        self.leading(size) + self.ascent(size) - self.descent(size)
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|i| i.0)
    }

    /// The glyph for `ch`, falling back to the replacement character and then
    /// to a question mark. Panics if the face has none of the three.
    pub(crate) fn glyph_or_replacement(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .expect("font has a question mark glyph")
    }

    /// Calculate the advance width of a string at the given size, ignoring
    /// any characters the face has no glyph for
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let scaling = self.scaling(size);
        text.chars()
            .filter_map(|ch| self.glyph_id(ch))
            .map(|gid| {
                Pt(self
                    .face
                    .as_face_ref()
                    .glyph_hor_advance(GlyphId(gid))
                    .unwrap_or_default() as f32
                    * scaling)
            })
            .sum()
    }

    /// Every glyph the face's unicode cmap maps, sorted by glyph id
    fn glyph_map(&self) -> Vec<(u16, char)> {
        let mut map: HashMap<u16, char> = HashMap::new();
        if let Some(cmap) = self.face.as_face_ref().tables().cmap {
            for subtable in cmap.subtables.into_iter().filter(|t| t.is_unicode()) {
                subtable.codepoints(|codepoint: u32| {
                    if let Ok(ch) = char::try_from(codepoint) {
                        if let Some(gid) =
                            subtable.glyph_index(codepoint).filter(|gid| gid.0 > 0)
                        {
                            map.entry(gid.0).or_insert(ch);
                        }
                    }
                });
            }
        }

        let mut glyphs: Vec<(u16, char)> = map.into_iter().collect();
        glyphs.sort_by_key(|&(gid, _)| gid);
        glyphs
    }

    /// Embed the face as a Type0/CIDFontType2 font with Identity-H encoding,
    /// a full widths table, and a ToUnicode cmap for text extraction
    pub(crate) fn write(&self, refs: &mut ObjectReferences, index: usize, writer: &mut Pdf) {
        let type0_id = refs.gen(RefType::Font(index));
        let cid_id = refs.gen(RefType::CidFont(index));
        let descriptor_id = refs.gen(RefType::FontDescriptor(index));
        let data_id = refs.gen(RefType::FontData(index));
        let unicode_id = refs.gen(RefType::ToUnicode(index));

        let face = self.face.as_face_ref();
        let glyphs = self.glyph_map();
        let scaling = 1000.0 / face.units_per_em() as f32;
        let base_name = format!("F{index}");

        let mut type0 = writer.type0_font(type0_id);
        type0.base_font(Name(base_name.as_bytes()));
        type0.encoding_predefined(Name(b"Identity-H"));
        type0.descendant_font(cid_id);
        type0.to_unicode(unicode_id);
        type0.finish();

        let mut cid = writer.cid_font(cid_id);
        cid.subtype(CidFontType::Type2);
        cid.base_font(Name(base_name.as_bytes()));
        cid.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid.font_descriptor(descriptor_id);

        // widths in runs of consecutive glyph ids
        let mut widths = cid.widths();
        let mut start: u16 = 0;
        let mut run: Vec<f32> = Vec::new();
        for &(gid, _) in &glyphs {
            if !run.is_empty() && gid != start + run.len() as u16 {
                widths.consecutive(start, run.drain(..));
            }
            if run.is_empty() {
                start = gid;
            }
            run.push(face.glyph_hor_advance(GlyphId(gid)).unwrap_or_default() as f32 * scaling);
        }
        if !run.is_empty() {
            widths.consecutive(start, run);
        }
        widths.finish();

        cid.default_width(1000.0);
        cid.cid_to_gid_map_predefined(Name(b"Identity"));
        cid.finish();

        let name = self.name();
        let family = self.family();
        let mut flags = FontFlags::empty();
        if face.is_monospaced() {
            flags.set(FontFlags::FIXED_PITCH, true);
        }
        if face.is_italic() {
            flags.set(FontFlags::ITALIC, true);
        }

        let mut descriptor = writer.font_descriptor(descriptor_id);
        descriptor.name(Name(name.as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(face.weight().to_number());
        descriptor.flags(flags);
        let bbox = face.global_bounding_box();
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(1000.0),
        );
        descriptor.x_height(face.x_height().map(|h| h as f32 * scaling).unwrap_or(500.0));
        descriptor.stem_v(80.0);
        descriptor.font_file2(data_id);
        descriptor.finish();

        writer
            .stream(data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let cmap = to_unicode_cmap(&glyphs);
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            cmap.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(unicode_id, compressed.as_slice())
            .filter(Filter::FlateDecode);
    }
}

/// A ToUnicode CMap mapping glyph ids back to their characters, in bfchar
/// blocks of at most 100 entries
fn to_unicode_cmap(glyphs: &[(u16, char)]) -> String {
    let mut map: String = "/CIDInit /ProcSet findresource begin\n\
        12 dict begin\n\
        begincmap\n\
        /CIDSystemInfo\n\
        << /Registry (Adobe)\n\
        /Ordering (UCS) /Supplement 0 >> def\n\
        /CMapName /Adobe-Identity-UCS def\n\
        /CMapType 2 def\n\
        1 begincodespacerange\n\
        <0000> <FFFF>\n\
        endcodespacerange\n"
        .into();

    for block in glyphs.chunks(100) {
        map.push_str(&format!("{} beginbfchar\n", block.len()));
        for &(gid, ch) in block {
            map.push_str(&format!("<{gid:04x}> <{:04x}>\n", u32::from(ch)));
        }
        map.push_str("endbfchar\n");
    }

    map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");
    map
}

/// The regular and bold faces a document is set in. Serves both as the
/// production [TextMeasurer] backend and as the renderer's glyph source.
pub struct FontSet {
    pub regular: Font,
    pub bold: Font,
}

impl FontSet {
    pub fn new(regular: Font, bold: Font) -> FontSet {
        FontSet { regular, bold }
    }

    /// Parse a regular and a bold face from raw bytes
    pub fn load(regular: Vec<u8>, bold: Vec<u8>) -> Result<FontSet, LayoutError> {
        Ok(FontSet {
            regular: Font::load(regular)?,
            bold: Font::load(bold)?,
        })
    }

    pub fn face(&self, weight: Weight) -> &Font {
        match weight {
            Weight::Plain => &self.regular,
            Weight::Bold => &self.bold,
        }
    }

    /// The family name of the regular face
    pub fn family(&self) -> String {
        self.regular.family()
    }
}

impl TextMeasurer for FontSet {
    fn measure(&self, text: &str, font: &FontSpec) -> Result<TextMetrics, LayoutError> {
        let face = self.face(font.weight);
        validate(
            text,
            TextMetrics {
                width: face.width_of_text(text, font.size),
                ascent: face.ascent(font.size),
                // descender is negative in font space; metrics carry the
                // magnitude below the baseline
                descent: -face.descent(font.size),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_unicode_cmap_lists_every_glyph() {
        let glyphs = vec![(1u16, 'a'), (2, 'b'), (40, 'z')];
        let cmap = to_unicode_cmap(&glyphs);
        assert!(cmap.contains("3 beginbfchar"));
        assert!(cmap.contains("<0001> <0061>"));
        assert!(cmap.contains("<0028> <007a>"));
        assert!(cmap.contains("endcmap"));
    }
}
