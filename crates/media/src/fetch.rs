use {
    anyhow::{Context, Result, bail},
    reqwest::header::CONTENT_TYPE,
    tracing::debug,
};

use crate::mime::{MediaKind, extension_for, resolve_mime};

/// Media downloaded from a URL, ready to be uploaded.
#[derive(Debug, Clone)]
pub struct FetchedMedia {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub file_name: String,
}

impl FetchedMedia {
    pub fn kind(&self) -> MediaKind {
        MediaKind::from_mime(&self.mime)
    }
}

/// Download `url` and work out what it is.
///
/// The MIME type is never used to reject media: anything the server returns
/// is accepted and typed as well as possible.
pub async fn fetch_media(http: &reqwest::Client, url: &str) -> Result<FetchedMedia> {
    let parsed = url::Url::parse(url).with_context(|| format!("invalid media URL '{url}'"))?;

    let resp = http
        .get(parsed.clone())
        .send()
        .await
        .with_context(|| format!("failed to fetch {url}"))?;

    let status = resp.status();
    if !status.is_success() {
        bail!("failed to fetch {url}: HTTP {status}");
    }

    let header = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let bytes = resp.bytes().await?.to_vec();

    let path_name = parsed
        .path_segments()
        .and_then(|mut segs| segs.next_back())
        .filter(|s| !s.is_empty())
        .unwrap_or("media")
        .to_string();
    let mime = resolve_mime(header.as_deref(), &bytes, &path_name);
    let file_name = if path_name.contains('.') {
        path_name
    } else {
        format!("{path_name}.{}", extension_for(&mime))
    };

    debug!(url, mime = %mime, size = bytes.len(), "fetched media");
    Ok(FetchedMedia {
        bytes,
        mime,
        file_name,
    })
}
