use ffmpeg_next::codec::Id;

/// Maps a codec identifier to the ffmpeg codec id used for encoding.
///
/// Two spellings arrive here: four-character codes from
/// [`ContainerFormat::fourcc`](crate::shared::container_format::ContainerFormat::fourcc)
/// (`mp4v`, `XVID`), and the codec names the reader probes out of a
/// source's header (`mpeg4`, `h264`, ...). Both the mp4v and XVID tags
/// are MPEG-4 part 2 streams as far as the encoder is concerned.
pub fn encoder_id(codec: &str) -> Option<Id> {
    match codec {
        "mp4v" | "MP4V" | "mpeg4" => Some(Id::MPEG4),
        "xvid" | "XVID" => Some(Id::MPEG4),
        "avc1" | "h264" | "H264" => Some(Id::H264),
        "hevc" | "hvc1" | "hev1" | "h265" => Some(Id::HEVC),
        "mjpg" | "MJPG" | "mjpeg" => Some(Id::MJPEG),
        "vp8" | "vp08" => Some(Id::VP8),
        "vp9" | "vp09" => Some(Id::VP9),
        _ => None,
    }
}

/// Resolves a codec identifier to an encoder.
///
/// Identifiers not in the fixed table fall through to ffmpeg's own name
/// lookup, so a probed codec name the table doesn't know can still be
/// reused for recompression.
pub fn find_encoder(codec: &str) -> Result<ffmpeg_next::Codec, Box<dyn std::error::Error>> {
    if let Some(id) = encoder_id(codec) {
        return ffmpeg_next::encoder::find(id)
            .ok_or_else(|| format!("no encoder available for codec '{codec}'").into());
    }
    ffmpeg_next::encoder::find_by_name(codec)
        .ok_or_else(|| format!("unknown codec identifier '{codec}'").into())
}
