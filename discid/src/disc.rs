//! The disc session: holds the current TOC and serves the identifiers and
//! track data derived from it

use crate::device::{self, TocReader};
use crate::id;
use crate::toc::Toc;
use crate::track::{self, TrackInfo};
use crate::DiscIdResult;
use std::cell::OnceCell;
use std::fmt::{self, Display, Formatter};

/// The identifiers computed from one TOC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscIdentity {
    /// The MusicBrainz disc ID, 28 characters.
    pub disc_id: String,
    /// The freedb disc ID, 8 lowercase hex digits.
    pub freedb_id: String,
    /// URL of the disc submission wizard for this disc.
    pub submission_url: String,
}

impl DiscIdentity {
    fn compute(toc: &Toc) -> Self {
        Self {
            disc_id: id::disc_id(toc),
            freedb_id: id::freedb_id(toc),
            submission_url: id::submission_url(toc),
        }
    }
}

#[derive(Debug)]
struct DiscState {
    toc: Toc,
    device: Option<String>,
    identity: OnceCell<DiscIdentity>,
    tracks: OnceCell<Vec<TrackInfo>>,
}

impl DiscState {
    fn new(toc: Toc, device: Option<String>) -> Self {
        Self { toc, device, identity: OnceCell::new(), tracks: OnceCell::new() }
    }

    fn identity(&self) -> &DiscIdentity {
        self.identity.get_or_init(|| DiscIdentity::compute(&self.toc))
    }

    fn tracks(&self) -> &[TrackInfo] {
        self.tracks.get_or_init(|| track::tracks(&self.toc))
    }
}

/// A disc session, empty until a TOC is read, put, or parsed successfully.
///
/// Identifiers and track data are computed on first access and cached for
/// the lifetime of the current TOC. A failed transition always discards the
/// previous TOC first, so accessors never serve identifiers for a disc that
/// is no longer current.
///
/// Sessions are single-owner; transitions are not atomic, so sharing across
/// threads requires external locking.
#[derive(Debug, Default)]
pub struct Disc {
    state: Option<DiscState>,
}

impl Disc {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the TOC from a drive via the given backend and make it current.
    ///
    /// `device` names the drive to read; `None` selects the platform default
    /// device. The read is attempted once, without retry.
    ///
    /// # Errors
    ///
    /// Returns [`DiscIdError::Device`](crate::DiscIdError::Device) with the
    /// backend's detail text if the drive cannot be read, or the validator's
    /// specific error if the drive returned a structurally invalid TOC.
    /// Either way the session is left empty.
    pub fn read(&mut self, reader: &dyn TocReader, device: Option<&str>) -> DiscIdResult<()> {
        self.state = None;

        let device = device.unwrap_or_else(|| device::default_device());
        let raw = reader.read_raw_toc(device)?;
        let toc = raw.to_toc()?;

        log::debug!("Read TOC from '{device}': {toc}");
        self.state = Some(DiscState::new(toc, Some(device.into())));
        Ok(())
    }

    /// Make a TOC supplied directly as track offsets current, without
    /// touching a drive. `sectors` is the total disc length in sectors,
    /// i.e. the leadout.
    ///
    /// # Errors
    ///
    /// Returns the validator's specific error kind; the session is left
    /// empty on failure.
    pub fn put(&mut self, first_track: u8, sectors: u32, offsets: &[u32]) -> DiscIdResult<()> {
        self.state = None;

        let toc = Toc::new(first_track, sectors, offsets)?;
        self.state = Some(DiscState::new(toc, None));
        Ok(())
    }

    /// Parse a TOC string and make the result current.
    ///
    /// # Errors
    ///
    /// Returns the codec's or the validator's specific error kind; the
    /// session is left empty on failure.
    pub fn parse(&mut self, toc_string: &str) -> DiscIdResult<()> {
        self.state = None;

        let toc: Toc = toc_string.parse()?;
        self.state = Some(DiscState::new(toc, None));
        Ok(())
    }

    /// The MusicBrainz disc ID, or `None` while no TOC is set.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.state.as_ref().map(|state| state.identity().disc_id.as_str())
    }

    /// The freedb disc ID, or `None` while no TOC is set.
    #[must_use]
    pub fn freedb_id(&self) -> Option<&str> {
        self.state.as_ref().map(|state| state.identity().freedb_id.as_str())
    }

    /// URL of the disc submission wizard, or `None` while no TOC is set.
    #[must_use]
    pub fn submission_url(&self) -> Option<&str> {
        self.state.as_ref().map(|state| state.identity().submission_url.as_str())
    }

    /// The canonical TOC string, or `None` while no TOC is set.
    #[must_use]
    pub fn toc_string(&self) -> Option<String> {
        self.state.as_ref().map(|state| state.toc.to_string())
    }

    /// Number of the first track, or `None` while no TOC is set.
    #[must_use]
    pub fn first_track(&self) -> Option<u8> {
        self.state.as_ref().map(|state| state.toc.first_track())
    }

    /// Number of the last track, or `None` while no TOC is set.
    #[must_use]
    pub fn last_track(&self) -> Option<u8> {
        self.state.as_ref().map(|state| state.toc.last_track())
    }

    /// Length of the disc in sectors, or `None` while no TOC is set.
    #[must_use]
    pub fn sectors(&self) -> Option<u32> {
        self.state.as_ref().map(|state| state.toc.sectors())
    }

    /// Length of the disc in whole seconds, or `None` while no TOC is set.
    #[must_use]
    pub fn seconds(&self) -> Option<u32> {
        self.state.as_ref().map(|state| state.toc.seconds())
    }

    /// The derived track list, or `None` while no TOC is set.
    ///
    /// Computed once per TOC; repeated calls return the same cached slice.
    #[must_use]
    pub fn tracks(&self) -> Option<&[TrackInfo]> {
        self.state.as_ref().map(DiscState::tracks)
    }

    /// The device the current TOC was read from; `None` while no TOC is set
    /// or when it came from `put`/`parse`.
    #[must_use]
    pub fn device(&self) -> Option<&str> {
        self.state.as_ref().and_then(|state| state.device.as_deref())
    }

    /// The current validated TOC, or `None` while no TOC is set.
    #[must_use]
    pub fn toc(&self) -> Option<&Toc> {
        self.state.as_ref().map(|state| &state.toc)
    }
}

/// Renders the disc ID, or the empty string while no TOC is set.
impl Display for Disc {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id().unwrap_or_default())
    }
}
