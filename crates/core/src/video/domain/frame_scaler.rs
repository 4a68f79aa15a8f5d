use crate::shared::frame::Frame;

/// Resizes decoded frames to a target geometry.
///
/// Output dimensions are exact; the interpolation policy is an
/// implementation detail.
pub trait FrameScaler: Send {
    fn scale(
        &mut self,
        frame: &Frame,
        width: u32,
        height: u32,
    ) -> Result<Frame, Box<dyn std::error::Error>>;
}
