use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::{debug, warn};

use super::pdf::{ExportError, RasterImage, RasterOptions, Rasterizer};

const WIDTH_HEADER: &str = "x-raster-width";
const HEIGHT_HEADER: &str = "x-raster-height";

#[derive(Debug, Serialize)]
struct RasterRequest<'a> {
    html: &'a str,
    width: u32,
    scale: f32,
    background: &'a str,
}

/// Rasterizer backed by an external screenshot service.
///
/// The service receives the page as JSON and answers with raw RGB bytes, the
/// pixel dimensions carried in `x-raster-width` / `x-raster-height`.
#[derive(Clone)]
pub struct HttpRasterizer {
    client: Client,
    endpoint: String,
}

impl HttpRasterizer {
    pub fn new(endpoint: String) -> Result<Self, ExportError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| ExportError::Raster(e.to_string()))?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl Rasterizer for HttpRasterizer {
    async fn rasterize(
        &self,
        page_html: &str,
        options: &RasterOptions,
    ) -> Result<RasterImage, ExportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&RasterRequest {
                html: page_html,
                width: options.width,
                scale: options.scale,
                background: options.background,
            })
            .send()
            .await
            .map_err(|e| ExportError::Raster(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Rasterizer returned {status}: {body}");
            return Err(ExportError::Raster(format!("service returned {status}")));
        }

        let width = dimension(&response, WIDTH_HEADER)?;
        let height = dimension(&response, HEIGHT_HEADER)?;
        let pixels = response
            .bytes()
            .await
            .map_err(|e| ExportError::Raster(e.to_string()))?
            .to_vec();
        debug!("Rasterized page to {width}x{height}");
        Ok(RasterImage {
            width,
            height,
            pixels,
        })
    }
}

fn dimension(response: &Response, header: &str) -> Result<u32, ExportError> {
    response
        .headers()
        .get(header)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
        .ok_or_else(|| ExportError::Raster(format!("missing or invalid {header} header")))
}
