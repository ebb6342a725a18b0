/// Fallback when nothing better is known.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// How a piece of media is presented on the chat network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Document,
}

impl MediaKind {
    pub fn from_mime(mime: &str) -> Self {
        let essence = essence(mime);
        if essence.starts_with("image/") {
            Self::Image
        } else if essence.starts_with("video/") {
            Self::Video
        } else {
            Self::Document
        }
    }
}

/// Strip parameters (`; charset=...`) and lowercase.
pub fn essence(mime: &str) -> String {
    mime.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Detect a MIME type from magic bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.len() >= 8 && &bytes[4..8] == b"ftyp" {
        Some("video/mp4")
    } else if bytes.starts_with(b"%PDF-") {
        Some("application/pdf")
    } else {
        None
    }
}

/// Guess a MIME type from a file extension.
pub fn mime_from_extension(name: &str) -> Option<&'static str> {
    let ext = name.rsplit_once('.')?.1.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(mime)
}

/// Preferred extension for a MIME type.
pub fn extension_for(mime: &str) -> &'static str {
    match essence(mime).as_str() {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "video/mp4" => "mp4",
        "application/pdf" => "pdf",
        _ => "bin",
    }
}

/// Pick the MIME type for downloaded media.
///
/// A specific `Content-Type` header wins; a missing or generic one falls back
/// to sniffing the bytes, then to the file name's extension.
pub fn resolve_mime(header: Option<&str>, bytes: &[u8], file_name: &str) -> String {
    if let Some(header) = header.map(essence)
        && !header.is_empty()
        && header != OCTET_STREAM
    {
        return header;
    }
    sniff_mime(bytes)
        .or_else(|| mime_from_extension(file_name))
        .unwrap_or(OCTET_STREAM)
        .to_string()
}
