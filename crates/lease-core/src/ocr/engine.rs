//! Pure Rust OCR engine wrapper using `pure-onnx-ocr`.

use std::path::Path;
use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use super::{reading_order_text, TextBox, TextRecognizer};
use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// OCR engine backed by `pure-onnx-ocr` (no external ONNX Runtime).
pub struct PureOcrEngine {
    engine: pure_onnx_ocr::engine::OcrEngine,
    keep_unk: bool,
}

impl PureOcrEngine {
    /// Load detection, recognition and dictionary files from the configured
    /// model directory.
    pub fn from_config(config: &OcrConfig) -> Result<Self, OcrError> {
        Self::from_dir(&config.model_dir, config)
    }

    /// Load the model files named in `config` from `model_dir`.
    pub fn from_dir(model_dir: &Path, config: &OcrConfig) -> Result<Self, OcrError> {
        let det_path = model_dir.join(&config.detection_model);
        let rec_path = model_dir.join(&config.recognition_model);
        let dict_path = model_dir.join(&config.dictionary);

        for path in [&det_path, &rec_path, &dict_path] {
            if !path.exists() {
                return Err(OcrError::ModelLoad(format!("missing {}", path.display())));
            }
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self {
            engine,
            keep_unk: config.keep_unk,
        })
    }

    /// Detect and recognize text lines in an image.
    pub fn process(&self, image: &DynamicImage) -> Result<Vec<TextBox>, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();
        debug!("Running OCR on {}x{} image", width, height);

        let results = self
            .engine
            .run_from_image(image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        let boxes: Vec<TextBox> = results
            .iter()
            .map(|r| TextBox {
                bbox: polygon_to_bbox(&r.bounding_box),
                text: if self.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                },
                confidence: r.confidence,
            })
            .collect();

        info!(
            "OCR complete: {} text boxes in {}ms",
            boxes.len(),
            start.elapsed().as_millis()
        );

        Ok(boxes)
    }
}

impl TextRecognizer for PureOcrEngine {
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        let mut boxes = self.process(image)?;
        Ok(reading_order_text(&mut boxes))
    }
}

/// Convert a `Polygon<f64>` to the `[f32; 8]` quadrilateral used by [`TextBox`].
fn polygon_to_bbox(polygon: &pure_onnx_ocr::Polygon<f64>) -> [f32; 8] {
    let mut bbox = [0.0f32; 8];
    for (i, coord) in polygon.exterior().coords().take(4).enumerate() {
        bbox[i * 2] = coord.x as f32;
        bbox[i * 2 + 1] = coord.y as f32;
    }
    bbox
}
