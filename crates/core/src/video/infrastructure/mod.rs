pub mod codec;
pub mod ffmpeg_reader;
pub mod ffmpeg_writer;
pub mod swscale_frame_scaler;

#[cfg(test)]
pub(crate) mod test_support;
