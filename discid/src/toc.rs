//! TOC validation and the canonical TOC string form

use crate::track::sectors_to_seconds;
use crate::{DiscIdError, DiscIdResult, MAX_TRACKS};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A validated disc table of contents: the first track number, the leadout
/// sector, and one start offset per track.
///
/// A `Toc` is immutable once built; every read/put/parse produces a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toc {
    first_track: u8,
    leadout: u32,
    offsets: Vec<u32>,
}

impl Toc {
    /// Validate a raw (first track, leadout, offsets) triple.
    ///
    /// # Errors
    ///
    /// Returns the specific rule that failed, never a catch-all:
    /// [`DiscIdError::InvalidTrackNumber`] if `first_track` is outside
    /// `1..=99`, [`DiscIdError::InvalidTrackCount`] if the offset list is
    /// empty or runs past track 99, and [`DiscIdError::InvalidOffsets`] if
    /// any offset reaches the leadout or the offsets are not strictly
    /// increasing.
    pub fn new(first_track: u8, leadout: u32, offsets: &[u32]) -> DiscIdResult<Self> {
        if first_track == 0 || first_track > MAX_TRACKS {
            return Err(DiscIdError::InvalidTrackNumber(first_track.into()));
        }

        if offsets.is_empty() || offsets.len() > usize::from(MAX_TRACKS - first_track + 1) {
            return Err(DiscIdError::InvalidTrackCount(offsets.len()));
        }

        for (i, &offset) in offsets.iter().enumerate() {
            if offset >= leadout {
                return Err(DiscIdError::InvalidOffsets(format!(
                    "track {} starts at sector {offset}, at or past the leadout at {leadout}",
                    first_track + i as u8
                )));
            }
        }

        for window in offsets.windows(2) {
            if window[1] <= window[0] {
                return Err(DiscIdError::InvalidOffsets(format!(
                    "track starts not strictly increasing: {} then {}",
                    window[0], window[1]
                )));
            }
        }

        Ok(Self { first_track, leadout, offsets: offsets.into() })
    }

    /// Number of the first track on the disc.
    #[must_use]
    pub fn first_track(&self) -> u8 {
        self.first_track
    }

    /// Number of the last track on the disc.
    #[must_use]
    pub fn last_track(&self) -> u8 {
        self.first_track + (self.offsets.len() - 1) as u8
    }

    /// The leadout sector, one past the end of the last track. Equals the
    /// usable length of the disc in sectors.
    #[must_use]
    pub fn leadout(&self) -> u32 {
        self.leadout
    }

    /// Track start offsets in sectors, one per track in ascending order.
    #[must_use]
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// Length of the disc in sectors.
    #[must_use]
    pub fn sectors(&self) -> u32 {
        self.leadout
    }

    /// Length of the disc in whole seconds.
    #[must_use]
    pub fn seconds(&self) -> u32 {
        sectors_to_seconds(self.leadout)
    }
}

/// Renders the canonical TOC string:
/// `first_track last_track leadout offset_1 .. offset_N`.
impl Display for Toc {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.first_track, self.last_track(), self.leadout)?;
        for offset in &self.offsets {
            write!(f, " {offset}")?;
        }
        Ok(())
    }
}

impl FromStr for Toc {
    type Err = DiscIdError;

    /// Parses the canonical TOC string form. Structural checks are delegated
    /// to [`Toc::new`], so `parse(encode(t)) == t` for every valid TOC `t`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        if tokens.len() < 4 {
            return Err(DiscIdError::MalformedToc(format!(
                "expected at least 4 fields, found {}",
                tokens.len()
            )));
        }

        let first_track = parse_field(tokens[0])?;
        let last_track = parse_field(tokens[1])?;
        if last_track < first_track {
            return Err(DiscIdError::MalformedToc(format!(
                "last track {last_track} precedes first track {first_track}"
            )));
        }

        let leadout = parse_field(tokens[2])?;

        let track_count = (last_track - first_track + 1) as usize;
        if tokens.len() - 3 != track_count {
            return Err(DiscIdError::MalformedToc(format!(
                "expected {track_count} track offsets, found {}",
                tokens.len() - 3
            )));
        }

        let offsets =
            tokens[3..].iter().copied().map(parse_field).collect::<DiscIdResult<Vec<u32>>>()?;

        let first_track = u8::try_from(first_track)
            .map_err(|_| DiscIdError::InvalidTrackNumber(first_track))?;
        let toc = Toc::new(first_track, leadout, &offsets)?;

        log::trace!("Parsed TOC string into {toc}");

        Ok(toc)
    }
}

/// Parse one whitespace-delimited TOC field as a base-10 integer. Anything
/// beyond plain ASCII digits (signs, hex, trailing garbage) is rejected.
fn parse_field(token: &str) -> DiscIdResult<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DiscIdError::NotANumber(token.into()));
    }
    token.parse::<u32>().map_err(|_| DiscIdError::NotANumber(token.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FICTION_OFFSETS: &[u32] =
        &[150, 18901, 39738, 59557, 79152, 100126, 124833, 147278, 166336, 182560];
    const FICTION_LEADOUT: u32 = 206535;

    #[test]
    fn validate_accepts_fiction_disc() {
        let toc = Toc::new(1, FICTION_LEADOUT, FICTION_OFFSETS).unwrap();
        assert_eq!(toc.first_track(), 1);
        assert_eq!(toc.last_track(), 10);
        assert_eq!(toc.sectors(), 206535);
        assert_eq!(toc.offsets(), FICTION_OFFSETS);
    }

    #[test]
    fn validate_rejects_track_number_out_of_range() {
        assert!(matches!(
            Toc::new(0, FICTION_LEADOUT, FICTION_OFFSETS),
            Err(DiscIdError::InvalidTrackNumber(0))
        ));
        assert!(matches!(
            Toc::new(100, FICTION_LEADOUT, FICTION_OFFSETS),
            Err(DiscIdError::InvalidTrackNumber(100))
        ));
    }

    #[test]
    fn validate_rejects_bad_track_counts() {
        assert!(matches!(Toc::new(1, 1000, &[]), Err(DiscIdError::InvalidTrackCount(0))));

        // 100 offsets starting at track 1
        let offsets: Vec<u32> = (0..100).map(|i| 150 + 1000 * i).collect();
        assert!(matches!(
            Toc::new(1, 1_000_000, &offsets),
            Err(DiscIdError::InvalidTrackCount(100))
        ));

        // 98 offsets fit starting at track 1 but run past track 99 from track 3
        let offsets: Vec<u32> = (0..98).map(|i| 150 + 1000 * i).collect();
        assert!(Toc::new(1, 1_000_000, &offsets).is_ok());
        assert!(matches!(
            Toc::new(3, 1_000_000, &offsets),
            Err(DiscIdError::InvalidTrackCount(98))
        ));
    }

    #[test]
    fn validate_rejects_offset_at_or_past_leadout() {
        assert!(matches!(
            Toc::new(1, 182560, FICTION_OFFSETS),
            Err(DiscIdError::InvalidOffsets(_))
        ));
        assert!(matches!(Toc::new(1, 0, &[0]), Err(DiscIdError::InvalidOffsets(_))));
    }

    #[test]
    fn validate_rejects_non_increasing_offsets() {
        assert!(matches!(
            Toc::new(1, 10000, &[150, 150, 300]),
            Err(DiscIdError::InvalidOffsets(_))
        ));
        assert!(matches!(
            Toc::new(1, 10000, &[300, 150]),
            Err(DiscIdError::InvalidOffsets(_))
        ));
    }

    #[test]
    fn encode_matches_reference_string() {
        let toc = Toc::new(
            1,
            242457,
            &[150, 44942, 61305, 72755, 96360, 130485, 147315, 164275, 190702, 205412, 220437],
        )
        .unwrap();
        assert_eq!(
            toc.to_string(),
            "1 11 242457 150 44942 61305 72755 96360 130485 147315 164275 190702 205412 220437"
        );
    }

    #[test]
    fn parse_encode_round_trip() {
        let toc = Toc::new(1, FICTION_LEADOUT, FICTION_OFFSETS).unwrap();
        assert_eq!(toc.to_string().parse::<Toc>().unwrap(), toc);

        let toc = Toc::new(3, FICTION_LEADOUT, FICTION_OFFSETS).unwrap();
        assert_eq!(toc.to_string().parse::<Toc>().unwrap(), toc);
    }

    #[test]
    fn parse_rejects_missing_offsets() {
        assert!(matches!("1 2 242457".parse::<Toc>(), Err(DiscIdError::MalformedToc(_))));
        assert!(matches!("1 2 242457 150".parse::<Toc>(), Err(DiscIdError::MalformedToc(_))));
    }

    #[test]
    fn parse_rejects_non_numeric_tokens() {
        assert!(matches!("1 2 242457 150 a".parse::<Toc>(), Err(DiscIdError::NotANumber(_))));
        assert!(matches!("1 1 242457 +150".parse::<Toc>(), Err(DiscIdError::NotANumber(_))));
        assert!(matches!("x 1 242457 150".parse::<Toc>(), Err(DiscIdError::NotANumber(_))));
    }

    #[test]
    fn parse_rejects_reversed_track_range() {
        assert!(matches!("2 1 242457 150 300".parse::<Toc>(), Err(DiscIdError::MalformedToc(_))));
    }

    #[test]
    fn parse_applies_validator_rules() {
        // Structure is fine but track 2 starts before track 1 ends
        assert!(matches!(
            "1 2 242457 300 150".parse::<Toc>(),
            Err(DiscIdError::InvalidOffsets(_))
        ));
        // First track number too large for a TOC
        assert!(matches!(
            "100 100 242457 150".parse::<Toc>(),
            Err(DiscIdError::InvalidTrackNumber(100))
        ));
    }
}
