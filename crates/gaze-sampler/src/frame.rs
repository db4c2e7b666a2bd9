//! Captured video frames.

/// Interleaved BGR frame, 3 bytes per pixel, rows top to bottom.
///
/// Replayed frames may carry geometry only, with an empty pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

pub const CHANNELS: usize = 3;

impl Frame {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    pub fn geometry_only(width: u32, height: u32) -> Self {
        Self::new(width, height, Vec::new())
    }

    pub fn has_pixels(&self) -> bool {
        self.data.len() == self.width as usize * self.height as usize * CHANNELS
            && !self.data.is_empty()
    }

    /// Mirrors the frame around its vertical axis (selfie view).
    pub fn mirror_horizontal(&mut self) {
        if !self.has_pixels() {
            return;
        }
        let row_len = self.width as usize * CHANNELS;
        for row in self.data.chunks_exact_mut(row_len) {
            let width = row_len / CHANNELS;
            for x in 0..width / 2 {
                let left = x * CHANNELS;
                let right = (width - 1 - x) * CHANNELS;
                for c in 0..CHANNELS {
                    row.swap(left + c, right + c);
                }
            }
        }
    }
}
