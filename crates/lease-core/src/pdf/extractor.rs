//! PDF text and image extraction using lopdf and pdf-extract.

use image::{DynamicImage, GrayImage, RgbImage};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, trace};

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// Page tree levels searched for inherited resources.
const MAX_TREE_DEPTH: usize = 32;

/// PDF content extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create an extractor with no document loaded.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))
    }

    /// Decode an image XObject. Scanned leases are almost always JPEG pages
    /// or raw 8-bit gray/RGB samples; other encodings are skipped.
    fn decode_image(doc: &Document, obj: &Object) -> Option<DynamicImage> {
        let Object::Stream(stream) = obj else {
            return None;
        };
        let dict = &stream.dict;

        if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
            return None;
        }

        let width = dict.get(b"Width").ok()?.as_i64().ok()? as u32;
        let height = dict.get(b"Height").ok()?.as_i64().ok()? as u32;
        trace!("Found image object: {}x{}", width, height);

        match Self::first_name(doc, dict, b"Filter") {
            Some(b"DCTDecode") => {
                return image::load_from_memory_with_format(&stream.content, image::ImageFormat::Jpeg)
                    .ok();
            }
            Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => {
                trace!("Skipping image with unsupported filter");
                return None;
            }
            _ => {}
        }

        let bits = dict
            .get(b"BitsPerComponent")
            .ok()
            .and_then(|o| o.as_i64().ok())
            .unwrap_or(8);
        if bits != 8 {
            trace!("Unsupported bits per component: {}", bits);
            return None;
        }

        let data = stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone());
        let color_space = Self::first_name(doc, dict, b"ColorSpace").unwrap_or(b"DeviceRGB");
        let pixels = (width as usize) * (height as usize);

        match color_space {
            b"DeviceGray" | b"G" if data.len() >= pixels => {
                GrayImage::from_raw(width, height, data[..pixels].to_vec()).map(DynamicImage::ImageLuma8)
            }
            b"DeviceRGB" | b"RGB" if data.len() >= pixels * 3 => {
                RgbImage::from_raw(width, height, data[..pixels * 3].to_vec()).map(DynamicImage::ImageRgb8)
            }
            _ => {
                trace!(
                    "Could not decode image: colorspace={:?}, data_len={}",
                    String::from_utf8_lossy(color_space),
                    data.len()
                );
                None
            }
        }
    }

    /// Name value of a dictionary entry, taking the first element of arrays
    /// and following references.
    fn first_name<'a>(doc: &'a Document, dict: &'a Dictionary, key: &[u8]) -> Option<&'a [u8]> {
        match dict.get(key).ok()? {
            Object::Name(name) => Some(name.as_slice()),
            Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
            Object::Reference(r) => doc.get_object(*r).ok().and_then(|o| o.as_name().ok()),
            _ => None,
        }
    }

    /// Resources dictionary for a page, walking up the page tree when inherited.
    ///
    /// Stops after [`MAX_TREE_DEPTH`] levels so a cyclic `Parent` chain ends.
    fn page_resources(doc: &Document, page_id: ObjectId) -> Option<Dictionary> {
        let mut node_id = page_id;

        for _ in 0..MAX_TREE_DEPTH {
            let Object::Dictionary(dict) = doc.get_object(node_id).ok()? else {
                return None;
            };

            if let Ok(resources) = dict.get(b"Resources") {
                if let Ok((_, Object::Dictionary(res))) = doc.dereference(resources) {
                    return Some(res.clone());
                }
            }

            match dict.get(b"Parent") {
                Ok(Object::Reference(parent_id)) => node_id = *parent_id,
                _ => return None,
            }
        }

        debug!("Page tree deeper than {} levels above {:?}", MAX_TREE_DEPTH, page_id);
        None
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Leases exported with an empty user password open without prompting
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        self.document()?;
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    fn extract_images(&self, page: u32) -> Result<Vec<DynamicImage>> {
        let doc = self.document()?;
        let pages = doc.get_pages();
        let page_id = pages.get(&page).ok_or(PdfError::InvalidPage(page))?;

        let mut images = Vec::new();

        if let Some(resources) = Self::page_resources(doc, *page_id) {
            if let Ok(xobjects) = resources.get(b"XObject") {
                if let Ok((_, Object::Dictionary(xobj_dict))) = doc.dereference(xobjects) {
                    for (_name, obj_ref) in xobj_dict.iter() {
                        if let Ok((_, obj)) = doc.dereference(obj_ref) {
                            if let Some(img) = Self::decode_image(doc, obj) {
                                images.push(img);
                            }
                        }
                    }
                }
            }
        }

        debug!("Extracted {} images from page {}", images.len(), page);
        Ok(images)
    }
}
