//! Per-track timing data derived from a validated TOC

use crate::toc::Toc;
use crate::SECTORS_PER_SECOND;

/// Convert a sector count to whole seconds.
///
/// 75 sectors make one second; partial seconds truncate toward zero, so
/// 149 sectors are still 1 second and 150 sectors are 2.
#[must_use]
pub fn sectors_to_seconds(sectors: u32) -> u32 {
    sectors / SECTORS_PER_SECOND
}

/// Timing data for a single track.
///
/// Derived from the TOC on demand, never stored independently: a track runs
/// from its own start offset to the next track's offset, or to the leadout
/// for the last track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackInfo {
    /// Absolute track number on the disc.
    pub number: u8,
    /// First sector of the track.
    pub start_sector: u32,
    /// Length of the track in sectors.
    pub sectors: u32,
}

impl TrackInfo {
    /// Sector one past the end of the track.
    #[must_use]
    pub fn end_sector(self) -> u32 {
        self.start_sector + self.sectors
    }

    /// Length of the track in whole seconds.
    #[must_use]
    pub fn seconds(self) -> u32 {
        sectors_to_seconds(self.sectors)
    }

    /// Start position of the track in whole seconds.
    #[must_use]
    pub fn start_time(self) -> u32 {
        sectors_to_seconds(self.start_sector)
    }

    /// End position of the track in whole seconds.
    #[must_use]
    pub fn end_time(self) -> u32 {
        sectors_to_seconds(self.end_sector())
    }
}

/// Derive the track list for a TOC, one entry per offset, ordered by
/// ascending track number.
#[must_use]
pub fn tracks(toc: &Toc) -> Vec<TrackInfo> {
    let offsets = toc.offsets();

    offsets
        .iter()
        .enumerate()
        .map(|(i, &start_sector)| {
            let end = offsets.get(i + 1).copied().unwrap_or(toc.leadout());
            TrackInfo {
                number: toc.first_track() + i as u8,
                start_sector,
                sectors: end - start_sector,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FICTION_OFFSETS: &[u32] =
        &[150, 18901, 39738, 59557, 79152, 100126, 124833, 147278, 166336, 182560];
    const FICTION_LEADOUT: u32 = 206535;

    #[test]
    fn second_conversion_boundaries() {
        assert_eq!(sectors_to_seconds(0), 0);
        assert_eq!(sectors_to_seconds(75), 1);
        assert_eq!(sectors_to_seconds(75 + 74), 1);
        assert_eq!(sectors_to_seconds(75 + 75), 2);
    }

    #[test]
    fn track_lengths_match_reference_disc() {
        let toc = Toc::new(1, FICTION_LEADOUT, FICTION_OFFSETS).unwrap();
        let tracks = tracks(&toc);

        let lengths: Vec<u32> = tracks.iter().map(|track| track.sectors).collect();
        assert_eq!(
            lengths,
            vec![18751, 20837, 19819, 19595, 20974, 24707, 22445, 19058, 16224, 23975]
        );

        let starts: Vec<u32> = tracks.iter().map(|track| track.start_sector).collect();
        assert_eq!(starts, FICTION_OFFSETS);
    }

    #[test]
    fn track_numbers_follow_first_track() {
        let toc = Toc::new(3, FICTION_LEADOUT, FICTION_OFFSETS).unwrap();
        assert_eq!(toc.last_track(), 12);

        let tracks = tracks(&toc);
        assert_eq!(tracks.len(), 10);

        let numbers: Vec<u8> = tracks.iter().map(|track| track.number).collect();
        assert_eq!(numbers, (3..=12).collect::<Vec<u8>>());
    }

    #[test]
    fn derived_track_fields() {
        let toc = Toc::new(1, FICTION_LEADOUT, FICTION_OFFSETS).unwrap();
        let first = tracks(&toc)[0];

        assert_eq!(first.start_sector, 150);
        assert_eq!(first.sectors, 18751);
        assert_eq!(first.end_sector(), 18901);
        assert_eq!(first.start_time(), 2);
        assert_eq!(first.seconds(), 250);
        assert_eq!(first.end_time(), 252);
    }
}
