//! PDF assembly from flattened page rasters.
//!
//! Each page of the output document is a single full-page image XObject:
//! Flate-compressed DeviceRGB pixels drawn over the whole media box. The
//! media box is the raster size divided by the output scale, so the
//! output pages keep the source document's dimensions.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use super::DocumentAssembler;
use crate::error::{TarjaError, TarjaResult};
use crate::export::raster::PageRaster;

/// Builds the redacted output PDF with lopdf.
///
/// `finish` is terminal; the assembler is not reusable afterwards.
pub struct PdfAssembler {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
}

impl PdfAssembler {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            page_ids: Vec::new(),
        }
    }

    fn compress(pixels: &[u8]) -> TarjaResult<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(pixels).map_err(|e| TarjaError::Assemble {
            message: "image compression failed".to_string(),
            source: Some(Box::new(e)),
        })?;
        encoder.finish().map_err(|e| TarjaError::Assemble {
            message: "image compression failed".to_string(),
            source: Some(Box::new(e)),
        })
    }
}

impl Default for PdfAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentAssembler for PdfAssembler {
    fn append_page(&mut self, raster: &PageRaster, output_scale: f32) -> TarjaResult<()> {
        if raster.width() == 0 || raster.height() == 0 {
            return Err(TarjaError::Assemble {
                message: "cannot embed an empty raster".to_string(),
                source: None,
            });
        }

        let image_dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => raster.width() as i64,
            "Height" => raster.height() as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        };
        let image_id = self
            .doc
            .add_object(Stream::new(image_dict, Self::compress(raster.pixels())?));

        // Page dimensions restore the source size: pixels / output scale
        let page_width = raster.width() as f32 / output_scale;
        let page_height = raster.height() as f32 / output_scale;

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Real(page_width),
                        0.into(),
                        0.into(),
                        Object::Real(page_height),
                        0.into(),
                        0.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), content.encode()?));

        let resources = dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        };
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(page_width),
                Object::Real(page_height),
            ],
            "Contents" => content_id,
            "Resources" => resources,
        });
        self.page_ids.push(page_id);

        Ok(())
    }

    fn finish(&mut self) -> TarjaResult<Vec<u8>> {
        let kids: Vec<Object> = self.page_ids.iter().map(|&id| id.into()).collect();
        let pages = dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
        };
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        self.doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}
