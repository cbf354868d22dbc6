//! Owned raster frames.

use gee_models::Rectangle;

use crate::error::{MediaError, MediaResult};

/// A decoded raster frame.
///
/// Pixels are stored row-major and interleaved, in the channel order the
/// decoder produced (BGR for three-channel video frames).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl Frame {
    /// Wrap a pixel buffer, checking its length against the dimensions.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> MediaResult<Self> {
        if width == 0 || height == 0 {
            return Err(MediaError::invalid_frame(format!(
                "zero-sized frame {}x{}",
                width, height
            )));
        }
        if !matches!(channels, 1 | 3 | 4) {
            return Err(MediaError::invalid_frame(format!(
                "unsupported channel count {}",
                channels
            )));
        }

        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(MediaError::invalid_frame(format!(
                "buffer holds {} bytes, {}x{}x{} needs {}",
                data.len(),
                width,
                height,
                channels,
                expected
            )));
        }

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// A frame filled with a single value.
    pub fn filled(width: u32, height: u32, channels: u8, value: u8) -> MediaResult<Self> {
        let len = width as usize * height as usize * channels as usize;
        Self::new(width, height, channels, vec![value; len])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Whether `rect` lies entirely inside the frame.
    pub fn contains(&self, rect: &Rectangle) -> bool {
        rect.fits_within(self.width, self.height)
    }

    /// Copy the pixels under `rect` into a new frame.
    pub fn crop(&self, rect: &Rectangle) -> MediaResult<Frame> {
        if !self.contains(rect) {
            return Err(MediaError::RegionOutOfBounds {
                rect: *rect,
                frame_width: self.width,
                frame_height: self.height,
            });
        }

        let pixel = self.channels as usize;
        let stride = self.width as usize * pixel;
        let row_len = rect.width as usize * pixel;
        let mut data = Vec::with_capacity(row_len * rect.height as usize);

        for row in rect.y as usize..(rect.y + rect.height) as usize {
            let start = row * stride + rect.x as usize * pixel;
            data.extend_from_slice(&self.data[start..start + row_len]);
        }

        Frame::new(rect.width, rect.height, self.channels, data)
    }
}
