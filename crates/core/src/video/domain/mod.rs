pub mod frame_scaler;
pub mod video_reader;
pub mod video_writer;
