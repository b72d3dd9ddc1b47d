//! The drive collaborator boundary: the raw TOC transport format and the
//! reader interface implemented by platform backends

use crate::toc::Toc;
use crate::{DiscIdError, DiscIdResult};

/// Slot count of a raw TOC buffer: slot 0 holds the leadout sector, slots
/// 1..=99 the track start offsets keyed by absolute track number.
pub const RAW_TOC_SLOTS: usize = 100;

/// A TOC exactly as a drive backend reports it, before validation.
///
/// The fixed-size buffer is a transport detail of the drive layer; the
/// engine's own [`Toc`] is sized to the actual track count.
#[derive(Debug, Clone)]
pub struct RawToc {
    pub first_track: u8,
    pub last_track: u8,
    pub offsets: [u32; RAW_TOC_SLOTS],
}

impl RawToc {
    /// Validate this transport buffer into the engine's [`Toc`].
    ///
    /// # Errors
    ///
    /// Returns [`DiscIdError::InvalidTrackNumber`] if the first/last track
    /// range cannot address the offset slots, and otherwise propagates the
    /// validator's error kinds.
    pub fn to_toc(&self) -> DiscIdResult<Toc> {
        if self.first_track == 0 {
            return Err(DiscIdError::InvalidTrackNumber(self.first_track.into()));
        }
        if self.last_track < self.first_track || usize::from(self.last_track) >= RAW_TOC_SLOTS {
            return Err(DiscIdError::InvalidTrackNumber(self.last_track.into()));
        }

        let leadout = self.offsets[0];
        let offsets = &self.offsets[usize::from(self.first_track)..=usize::from(self.last_track)];

        Toc::new(self.first_track, leadout, offsets)
    }
}

/// Reads raw TOCs from physical drives.
///
/// Implemented by platform backends; the engine itself never touches
/// hardware, never retries a failed read, and surfaces backend failure
/// detail verbatim as [`DiscIdError::Device`]. Retry and timeout policy
/// belong to the backend or its caller.
pub trait TocReader {
    /// Read the raw TOC from the drive identified by `device`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscIdError::Device`] with backend-provided detail when the
    /// drive cannot be read.
    fn read_raw_toc(&self, device: &str) -> DiscIdResult<RawToc>;
}

/// The conventional drive identifier for the current operating system.
#[must_use]
pub fn default_device() -> &'static str {
    if cfg!(target_os = "windows") {
        "D:"
    } else if cfg!(target_os = "macos") {
        "/dev/rdisk1"
    } else {
        "/dev/cdrom"
    }
}
