/// A single decoded frame: contiguous RGB bytes in row-major order.
///
/// Frames are transient: owned by whichever stage holds them between a
/// read and the corresponding write, never persisted. Pixel format
/// conversion happens at the ffmpeg boundary only.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// One row of pixels. `y` must be < height.
    pub fn row(&self, y: u32) -> &[u8] {
        let row_bytes = (self.width as usize) * (self.channels as usize);
        let start = (y as usize) * row_bytes;
        &self.data[start..start + row_bytes]
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

    /// Position of this frame within its source's decode order.
    pub fn index(&self) -> usize {
        self.index
    }
}
