//! JPEG encoding of frames.

use image::codecs::jpeg::JpegEncoder;
use image::ColorType;

use crate::error::{MediaError, MediaResult};
use crate::frame::Frame;

pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encode a frame as JPEG.
///
/// Three- and four-channel frames are taken as BGR(A), the OpenCV channel
/// order, and swizzled to RGB before encoding. Alpha is dropped.
pub fn encode_jpeg(frame: &Frame, quality: u8) -> MediaResult<Vec<u8>> {
    let quality = quality.clamp(1, 100);

    let (pixels, color) = match frame.channels() {
        1 => (frame.data().to_vec(), ColorType::L8),
        3 | 4 => (bgr_to_rgb(frame.data(), frame.channels() as usize), ColorType::Rgb8),
        other => {
            return Err(MediaError::encode_failed(format!(
                "unsupported channel count {}",
                other
            )))
        }
    };

    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode(&pixels, frame.width(), frame.height(), color)
        .map_err(|e| MediaError::encode_failed(e.to_string()))?;

    Ok(buf)
}

fn bgr_to_rgb(data: &[u8], channels: usize) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(data.len() / channels * 3);
    for px in data.chunks_exact(channels) {
        rgb.extend_from_slice(&[px[2], px[1], px[0]]);
    }
    rgb
}
