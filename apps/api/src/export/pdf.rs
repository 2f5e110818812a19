//! Single-page PDF export.
//!
//! A [`Rasterizer`] turns the rendered page into pixels at a fixed layout
//! width; the image is then scaled to fit an A4 page, centered horizontally
//! and pinned to the top edge, and handed to a [`PageWriter`].

use std::sync::Arc;

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("rasterization failed: {0}")]
    Raster(String),

    #[error("rasterizer returned an empty image")]
    EmptyRaster,

    #[error("raster buffer holds {actual} bytes, expected {expected}")]
    MalformedRaster { expected: usize, actual: usize },

    #[error("PDF write failed: {0}")]
    Write(String),
}

/// Page dimensions in CSS pixels (96 per inch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 793.7,
        height: 1122.52,
    };
}

/// Where the image lands on the page, in page units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub ratio: f32,
}

/// Scales an image to fit the page while keeping its aspect ratio.
/// Centered horizontally, top-aligned.
pub fn fit_to_page(page: PageSize, image_width: u32, image_height: u32) -> Placement {
    let (w, h) = (image_width as f32, image_height as f32);
    let ratio = (page.width / w).min(page.height / h);
    Placement {
        x: (page.width - w * ratio) / 2.0,
        y: 0.0,
        width: w * ratio,
        height: h * ratio,
        ratio,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    /// Layout width the page is forced to before capture.
    pub width: u32,
    pub scale: f32,
    pub background: &'static str,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            width: 800,
            scale: 2.0,
            background: "#ffffff",
        }
    }
}

/// 8-bit RGB pixels, row-major, no padding.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(
        &self,
        page_html: &str,
        options: &RasterOptions,
    ) -> Result<RasterImage, ExportError>;
}

pub trait PageWriter: Send + Sync {
    fn write_single_page(
        &self,
        page: PageSize,
        image: &RasterImage,
        placement: Placement,
    ) -> Result<Vec<u8>, ExportError>;
}

pub struct PdfExporter {
    rasterizer: Arc<dyn Rasterizer>,
    writer: Arc<dyn PageWriter>,
    page: PageSize,
    options: RasterOptions,
}

impl PdfExporter {
    pub fn new(rasterizer: Arc<dyn Rasterizer>, writer: Arc<dyn PageWriter>) -> Self {
        Self {
            rasterizer,
            writer,
            page: PageSize::A4,
            options: RasterOptions::default(),
        }
    }

    pub async fn export(&self, page_html: &str) -> Result<Vec<u8>, ExportError> {
        let image = self.rasterizer.rasterize(page_html, &self.options).await?;
        if image.width == 0 || image.height == 0 {
            return Err(ExportError::EmptyRaster);
        }
        let expected = image.width as usize * image.height as usize * 3;
        if image.pixels.len() != expected {
            return Err(ExportError::MalformedRaster {
                expected,
                actual: image.pixels.len(),
            });
        }
        let placement = fit_to_page(self.page, image.width, image.height);
        debug!(
            "Placing {}x{} raster at ratio {:.4}",
            image.width, image.height, placement.ratio
        );
        let bytes = self.writer.write_single_page(self.page, &image, placement)?;
        info!("Exported single-page PDF ({} bytes)", bytes.len());
        Ok(bytes)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// lopdf writer
// ────────────────────────────────────────────────────────────────────────────

/// CSS pixels to PDF points.
const PX_TO_PT: f32 = 0.75;

/// Writes one page holding one image XObject.
pub struct LopdfPageWriter;

impl PageWriter for LopdfPageWriter {
    fn write_single_page(
        &self,
        page: PageSize,
        image: &RasterImage,
        placement: Placement,
    ) -> Result<Vec<u8>, ExportError> {
        let page_width = page.width * PX_TO_PT;
        let page_height = page.height * PX_TO_PT;

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let image_stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width as i64,
                "Height" => image.height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            image.pixels.clone(),
        );
        let image_id = doc.add_object(image_stream);

        // PDF origin is bottom-left; the image hangs from the top edge.
        let width = placement.width * PX_TO_PT;
        let height = placement.height * PX_TO_PT;
        let x = placement.x * PX_TO_PT;
        let y = page_height - placement.y * PX_TO_PT - height;
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        width.into(),
                        0.into(),
                        0.into(),
                        height.into(),
                        x.into(),
                        y.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let encoded = content
            .encode()
            .map_err(|e| ExportError::Write(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page_width.into(), page_height.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::from(page_id)],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| ExportError::Write(e.to_string()))?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn test_fit_to_page_limited_by_height() {
        let page = PageSize {
            width: 600.0,
            height: 800.0,
        };
        let placement = fit_to_page(page, 1600, 4000);
        assert!((placement.ratio - 0.2).abs() < 1e-6);
        assert!((placement.width - 320.0).abs() < 1e-3);
        assert!((placement.height - 800.0).abs() < 1e-3);
        assert!((placement.x - 140.0).abs() < 1e-3);
        assert_eq!(placement.y, 0.0);
    }

    #[test]
    fn test_fit_to_page_limited_by_width_stays_top_aligned() {
        let page = PageSize {
            width: 600.0,
            height: 800.0,
        };
        let placement = fit_to_page(page, 1200, 400);
        assert!((placement.ratio - 0.5).abs() < 1e-6);
        assert!((placement.x).abs() < 1e-3);
        assert_eq!(placement.y, 0.0);
        assert!((placement.height - 200.0).abs() < 1e-3);
    }

    struct SolidRasterizer {
        width: u32,
        height: u32,
        seen: Mutex<Option<RasterOptions>>,
    }

    #[async_trait]
    impl Rasterizer for SolidRasterizer {
        async fn rasterize(
            &self,
            _page_html: &str,
            options: &RasterOptions,
        ) -> Result<RasterImage, ExportError> {
            *self.seen.lock().unwrap() = Some(options.clone());
            Ok(RasterImage {
                width: self.width,
                height: self.height,
                pixels: vec![255; (self.width * self.height * 3) as usize],
            })
        }
    }

    fn rasterizer(width: u32, height: u32) -> Arc<SolidRasterizer> {
        Arc::new(SolidRasterizer {
            width,
            height,
            seen: Mutex::new(None),
        })
    }

    #[tokio::test]
    async fn test_export_writes_a_pdf() {
        let raster = rasterizer(16, 24);
        let exporter = PdfExporter::new(raster.clone(), Arc::new(LopdfPageWriter));
        let bytes = exporter.export("<html></html>").await.unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let seen = raster.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.width, 800);
        assert_eq!(seen.scale, 2.0);
        assert_eq!(seen.background, "#ffffff");
    }

    #[tokio::test]
    async fn test_empty_raster_is_rejected() {
        let exporter = PdfExporter::new(rasterizer(0, 10), Arc::new(LopdfPageWriter));
        assert!(matches!(
            exporter.export("").await,
            Err(ExportError::EmptyRaster)
        ));
    }
}
