//! The rendering collaborator: turns per-page draw instruction lists into a
//! complete PDF.
//!
//! The renderer owns nothing from the layout pipeline; it is handed the
//! instruction lists produced by [crate::emit], the page geometry, a
//! [FontSet] for glyph lookup and embedding, and any image resources that
//! instructions reference by name. Writing goes to any [std::io::Write]; the
//! caller decides what to do with the bytes.

use crate::bionic::Weight;
use crate::emit::RenderInstruction;
use crate::error::LayoutError;
use crate::font::FontSet;
use crate::geometry::PageGeometry;
use crate::image::Image;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use pdf_writer::{Finish, Name, Pdf, Ref, TextStr};
use std::io::Write;

/// General document metadata such as title, author, etc
#[derive(Default, Debug, Clone)]
pub struct Info {
    /// The title of the document.
    pub title: Option<String>,
    /// The author(s) of the document. No prescribed format.
    pub author: Option<String>,
    /// The subject of the document.
    pub subject: Option<String>,
    /// Keywords for the document. No prescribed format.
    pub keywords: Option<String>,
}

impl Info {
    pub fn new() -> Info {
        Info::default()
    }

    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn author<S: ToString>(&mut self, author: S) -> &mut Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn subject<S: ToString>(&mut self, subject: S) -> &mut Self {
        self.subject = Some(subject.to_string());
        self
    }

    pub fn keywords<S: ToString>(&mut self, keywords: S) -> &mut Self {
        self.keywords = Some(keywords.to_string());
        self
    }

    fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Info);
        let mut info = writer.document_info(id);

        if let Some(title) = &self.title {
            info.title(TextStr(title.as_str()));
        }
        if let Some(author) = &self.author {
            info.author(TextStr(author.as_str()));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject.as_str()));
        }
        if let Some(keywords) = &self.keywords {
            info.keywords(TextStr(keywords.as_str()));
        }
        info.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));

        use chrono::prelude::*;
        let now = Local::now();
        let offset = now.offset().fix();
        let offset_hours = offset.local_minus_utc() / (60 * 60);
        let offset_minutes = ((offset.local_minus_utc() - (offset_hours * (60 * 60))) / 60).abs();
        let date = pdf_writer::Date::new(now.year() as u16)
            .month(now.month() as u8)
            .day(now.day() as u8)
            .hour(now.hour() as u8)
            .minute(now.minute() as u8)
            .second(now.second() as u8)
            .utc_offset_hour(offset_hours as i8)
            .utc_offset_minute(offset_minutes as u8);
        info.creation_date(date);
    }
}

/// Renders emitted instruction lists into a PDF document. Fonts F0 (regular)
/// and F1 (bold) are embedded from the [FontSet]; image resources must be
/// registered under the names the instructions use.
pub struct PdfRenderer<'a> {
    fonts: &'a FontSet,
    images: Vec<(String, Image)>,
    info: Option<Info>,
}

impl<'a> PdfRenderer<'a> {
    pub fn new(fonts: &'a FontSet) -> PdfRenderer<'a> {
        PdfRenderer {
            fonts,
            images: Vec::new(),
            info: None,
        }
    }

    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Register an image under a resource name so that
    /// [RenderInstruction::Image] instructions can refer to it
    pub fn add_image<S: ToString>(&mut self, resource: S, image: Image) {
        self.images.push((resource.to_string(), image));
    }

    fn image_index(&self, resource: &str) -> Result<usize, LayoutError> {
        self.images
            .iter()
            .position(|(name, _)| name == resource)
            .ok_or_else(|| LayoutError::UnknownResource(resource.to_string()))
    }

    /// Encode one page's instructions as a PDF content stream
    fn render_content(&self, instructions: &[RenderInstruction]) -> Result<Vec<u8>, LayoutError> {
        let mut content: Vec<u8> = Vec::new();
        write!(&mut content, "q\n")?;

        // (font resource index, size) of the last Tf emitted
        let mut current: Option<(usize, Pt)> = None;

        for instruction in instructions {
            match instruction {
                RenderInstruction::Text { text, x, y, font } => {
                    let font_index = match font.weight {
                        Weight::Plain => 0,
                        Weight::Bold => 1,
                    };
                    if current != Some((font_index, font.size)) {
                        write!(&mut content, "/F{} {} Tf\n", font_index, font.size.0)?;
                        current = Some((font_index, font.size));
                    }

                    let face = self.fonts.face(font.weight);
                    write!(&mut content, "BT\n{} {} Td\n<", x.0, y.0)?;
                    for ch in text.chars() {
                        write!(&mut content, "{:04x}", face.glyph_or_replacement(ch))?;
                    }
                    write!(&mut content, "> Tj\nET\n")?;
                }
                RenderInstruction::Rule { x1, y1, x2, y2 } => {
                    write!(
                        &mut content,
                        "0.75 w\n{} {} m\n{} {} l\nS\n",
                        x1.0, y1.0, x2.0, y2.0
                    )?;
                }
                RenderInstruction::Image {
                    resource,
                    x,
                    y,
                    width,
                    height,
                } => {
                    let index = self.image_index(resource)?;
                    write!(
                        &mut content,
                        "q\n{} 0 0 {} {} {} cm\n/I{} Do\nQ\n",
                        width.0, height.0, x.0, y.0, index
                    )?;
                }
            }
        }

        write!(&mut content, "Q\n")?;
        Ok(content)
    }

    /// Write the whole document. The document is assembled in memory first,
    /// which is a limitation of the underlying pdf-writer implementation.
    pub fn write<W: Write>(
        &self,
        geometry: &PageGeometry,
        pages: &[Vec<RenderInstruction>],
        mut w: W,
    ) -> Result<(), LayoutError> {
        let mut refs = ObjectReferences::new();
        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = &self.info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        self.fonts.regular.write(&mut refs, 0, &mut writer);
        self.fonts.bold.write(&mut refs, 1, &mut writer);

        for (index, (_, image)) in self.images.iter().enumerate() {
            image.write(&mut refs, index, &mut writer)?;
        }

        let media_box = pdf_writer::Rect {
            x1: 0.0,
            y1: 0.0,
            x2: geometry.size.0 .0,
            y2: geometry.size.1 .0,
        };

        for (index, instructions) in pages.iter().enumerate() {
            let mut page = writer.page(refs.get(RefType::Page(index)).unwrap());
            page.media_box(media_box);
            page.art_box(geometry.content_box().into());
            page.parent(page_tree_id);

            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(Name(b"F0"), refs.get(RefType::Font(0)).unwrap());
            fonts.pair(Name(b"F1"), refs.get(RefType::Font(1)).unwrap());
            fonts.finish();
            if !self.images.is_empty() {
                let mut xobjects = resources.x_objects();
                for (i, _) in self.images.iter().enumerate() {
                    xobjects.pair(
                        Name(format!("I{i}").as_bytes()),
                        refs.get(RefType::Image(i)).unwrap(),
                    );
                }
                xobjects.finish();
            }
            resources.finish();

            let content_id = refs.gen(RefType::Content(index));
            page.contents(content_id);
            page.finish();

            let content = self.render_content(instructions)?;
            writer.stream(content_id, content.as_slice());
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}
