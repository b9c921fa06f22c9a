//! QR code rendering for short links.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;
use thiserror::Error;

/// Smallest edge, in pixels, of a rendered code
const MIN_DIMENSION: u32 = 200;

#[derive(Debug, Error)]
pub enum QrError {
    #[error("failed to encode QR code: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("failed to write QR image: {0}")]
    Image(#[from] image::ImageError),
    #[error("QR render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Render `text` as a PNG image
pub fn render_png(text: &str) -> Result<Vec<u8>, QrError> {
    let code = QrCode::new(text.as_bytes())?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(MIN_DIMENSION, MIN_DIMENSION)
        .build();

    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

fn to_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Render `text` as a `data:image/png;base64,...` URI.
///
/// Encoding runs on the blocking pool so request tasks are not stalled.
pub async fn render_data_uri(text: String) -> Result<String, QrError> {
    let png = tokio::task::spawn_blocking(move || render_png(&text)).await??;
    Ok(to_data_uri(&png))
}
