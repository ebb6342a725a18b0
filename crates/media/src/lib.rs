//! Media pipeline: fetch a media reference and detect its MIME type.

pub mod fetch;
pub mod mime;

pub use {
    fetch::{FetchedMedia, fetch_media},
    mime::MediaKind,
};
