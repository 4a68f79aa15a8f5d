pub mod compression_level;
pub mod constants;
pub mod container_format;
pub mod error;
pub mod frame;
pub mod pipeline_config;
pub mod video_metadata;
