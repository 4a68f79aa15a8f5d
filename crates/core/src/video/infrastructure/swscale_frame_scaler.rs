use crate::shared::frame::Frame;
use crate::video::domain::frame_scaler::FrameScaler;

/// Resizes frames through swscale with bilinear interpolation.
///
/// The scaling context is cached and rebuilt only when the source or
/// target geometry changes, so a steady stream of same-sized frames pays
/// the setup cost once.
pub struct SwscaleFrameScaler {
    context: Option<ffmpeg_next::software::scaling::Context>,
    src: (u32, u32),
    dst: (u32, u32),
}

// Safety: SwscaleFrameScaler is only used from a single thread at a time.
// The raw pointers inside ffmpeg types are not shared across threads.
unsafe impl Send for SwscaleFrameScaler {}

impl SwscaleFrameScaler {
    pub fn new() -> Self {
        Self {
            context: None,
            src: (0, 0),
            dst: (0, 0),
        }
    }

    fn context_for(
        &mut self,
        src: (u32, u32),
        dst: (u32, u32),
    ) -> Result<&mut ffmpeg_next::software::scaling::Context, Box<dyn std::error::Error>> {
        if self.context.is_none() || self.src != src || self.dst != dst {
            ffmpeg_next::init()?;
            self.context = Some(ffmpeg_next::software::scaling::Context::get(
                ffmpeg_next::format::Pixel::RGB24,
                src.0,
                src.1,
                ffmpeg_next::format::Pixel::RGB24,
                dst.0,
                dst.1,
                ffmpeg_next::software::scaling::Flags::BILINEAR,
            )?);
            self.src = src;
            self.dst = dst;
        }
        Ok(self.context.as_mut().unwrap())
    }
}

impl Default for SwscaleFrameScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScaler for SwscaleFrameScaler {
    fn scale(
        &mut self,
        frame: &Frame,
        width: u32,
        height: u32,
    ) -> Result<Frame, Box<dyn std::error::Error>> {
        if frame.width() == width && frame.height() == height {
            return Ok(frame.clone());
        }

        let scaler = self.context_for((frame.width(), frame.height()), (width, height))?;

        let mut src = ffmpeg_next::util::frame::video::Video::new(
            ffmpeg_next::format::Pixel::RGB24,
            frame.width(),
            frame.height(),
        );
        let stride = src.stride(0);
        let data = src.data_mut(0);
        for row in 0..frame.height() {
            let dst_start = row as usize * stride;
            let row_pixels = frame.row(row);
            data[dst_start..dst_start + row_pixels.len()].copy_from_slice(row_pixels);
        }

        let mut scaled = ffmpeg_next::util::frame::video::Video::empty();
        scaler.run(&src, &mut scaled)?;

        let out_stride = scaled.stride(0);
        let out_data = scaled.data(0);
        let row_bytes = width as usize * 3;
        let mut pixels = Vec::with_capacity(row_bytes * height as usize);
        for row in 0..height as usize {
            let start = row * out_stride;
            pixels.extend_from_slice(&out_data[start..start + row_bytes]);
        }

        Ok(Frame::new(pixels, width, height, 3, frame.index()))
    }
}
