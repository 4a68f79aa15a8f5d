//! Streaming video concatenation and recompression.
//!
//! Two sequential stages over decoded frames: a merge stage that copies
//! every frame of a directory's videos into one output file, and a
//! recompression stage that rewrites that file at a scaled-down
//! resolution. Decode, encode and scaling go through ffmpeg.

pub mod discovery;
pub mod pipeline;
pub mod shared;
pub mod video;
