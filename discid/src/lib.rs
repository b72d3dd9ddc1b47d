//! Stable identifiers for audio CDs, computed from the disc table of contents

#![allow(clippy::doc_markdown)]

pub mod device;
pub mod disc;
pub mod features;
pub mod id;
pub mod toc;
pub mod track;

use thiserror::Error;

/// Sectors of audio per second on a Red Book CD.
pub const SECTORS_PER_SECOND: u32 = 75;

/// Highest track number addressable in a TOC.
pub const MAX_TRACKS: u8 = 99;

#[derive(Debug, Error)]
pub enum DiscIdError {
    #[error("Illegal track number: {0}")]
    InvalidTrackNumber(u32),
    #[error("Illegal number of tracks: {0}")]
    InvalidTrackCount(usize),
    #[error("Invalid track offsets: {0}")]
    InvalidOffsets(String),
    #[error("Malformed TOC string: {0}")]
    MalformedToc(String),
    #[error("Not a number: '{0}'")]
    NotANumber(String),
    #[error("Error reading disc: {0}")]
    Device(String),
    #[error("Operation not available on this platform: {0}")]
    Unsupported(&'static str),
}

pub type DiscIdResult<T> = Result<T, DiscIdError>;
