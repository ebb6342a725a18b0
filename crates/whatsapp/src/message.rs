use {
    wabridge_media::MediaKind,
    waproto::whatsapp::{
        Message,
        message::{DocumentMessage, ImageMessage, VideoMessage},
    },
};

/// Result of uploading encrypted media to the WhatsApp media servers.
#[derive(Debug, Clone, Default)]
pub struct UploadedMedia {
    pub url: String,
    pub direct_path: String,
    pub media_key: Vec<u8>,
    pub file_enc_sha256: Vec<u8>,
    pub file_sha256: Vec<u8>,
    pub file_length: u64,
}

pub fn text_message(text: &str) -> Message {
    Message {
        conversation: Some(text.to_string()),
        ..Default::default()
    }
}

/// Build an image, video or document message carrying `caption`.
pub fn media_message(
    kind: MediaKind,
    upload: UploadedMedia,
    mime: &str,
    file_name: &str,
    caption: &str,
) -> Message {
    let mimetype = Some(mime.to_string());
    let caption = Some(caption.to_string());
    match kind {
        MediaKind::Image => Message {
            image_message: Some(
                ImageMessage {
                    mimetype,
                    caption,
                    url: Some(upload.url),
                    direct_path: Some(upload.direct_path),
                    media_key: Some(upload.media_key),
                    file_enc_sha256: Some(upload.file_enc_sha256),
                    file_sha256: Some(upload.file_sha256),
                    file_length: Some(upload.file_length),
                    ..Default::default()
                }
                .into(),
            ),
            ..Default::default()
        },
        MediaKind::Video => Message {
            video_message: Some(
                VideoMessage {
                    mimetype,
                    caption,
                    url: Some(upload.url),
                    direct_path: Some(upload.direct_path),
                    media_key: Some(upload.media_key),
                    file_enc_sha256: Some(upload.file_enc_sha256),
                    file_sha256: Some(upload.file_sha256),
                    file_length: Some(upload.file_length),
                    ..Default::default()
                }
                .into(),
            ),
            ..Default::default()
        },
        MediaKind::Document => Message {
            document_message: Some(
                DocumentMessage {
                    mimetype,
                    caption,
                    file_name: Some(file_name.to_string()),
                    url: Some(upload.url),
                    direct_path: Some(upload.direct_path),
                    media_key: Some(upload.media_key),
                    file_enc_sha256: Some(upload.file_enc_sha256),
                    file_sha256: Some(upload.file_sha256),
                    file_length: Some(upload.file_length),
                    ..Default::default()
                }
                .into(),
            ),
            ..Default::default()
        },
    }
}
