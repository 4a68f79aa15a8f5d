pub mod compress_video_use_case;
pub mod merge_videos_use_case;
pub mod progress_reporter;
pub mod retime_video_use_case;
