//! Frame encodings handed to the webview

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{codecs::jpeg::JpegEncoder, ImageEncoder, ImageError};
use thiserror::Error;

use super::shared_state::FrameResponse;

#[derive(Debug, Error)]
pub enum FrameCodecError {
    #[error("frame holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("JPEG encoding failed: {0}")]
    Encode(#[from] ImageError),
}

fn check_size(rgba: &[u8], width: u32, height: u32) -> Result<(), FrameCodecError> {
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(FrameCodecError::SizeMismatch {
            width,
            height,
            expected,
            actual: rgba.len(),
        });
    }
    Ok(())
}

/// Compress an RGBA frame to JPEG, dropping the alpha channel
pub fn encode_jpeg(
    rgba: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, FrameCodecError> {
    check_size(rgba, width, height)?;
    let rgb: Vec<u8> = rgba
        .chunks_exact(4)
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect();

    let mut jpeg_data = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg_data, quality).write_image(
        &rgb,
        width,
        height,
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(jpeg_data)
}

/// Wrap an RGBA frame for JSON transport
pub fn encode_base64(
    rgba: &[u8],
    width: u32,
    height: u32,
) -> Result<FrameResponse, FrameCodecError> {
    check_size(rgba, width, height)?;
    Ok(FrameResponse {
        data: STANDARD.encode(rgba),
        width,
        height,
    })
}
