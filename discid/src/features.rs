//! Capability negotiation: which optional disc operations this build and
//! platform provide

use std::sync::OnceLock;

/// Name of the TOC reading capability.
pub const READ_TOC: &str = "read-toc";
/// Name of the media catalog number retrieval capability.
pub const MEDIA_CATALOG_NUMBER: &str = "media-catalog-number";
/// Name of the per-track recording code retrieval capability.
pub const TRACK_RECORDING_CODE: &str = "track-recording-code";

/// An optional capability of the disc layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    ReadToc,
    MediaCatalogNumber,
    TrackRecordingCode,
}

impl Feature {
    pub const ALL: [Self; 3] =
        [Self::ReadToc, Self::MediaCatalogNumber, Self::TrackRecordingCode];

    /// Bitmask value of this feature.
    #[must_use]
    pub fn bit(self) -> u32 {
        match self {
            Self::ReadToc => 1 << 0,
            Self::MediaCatalogNumber => 1 << 1,
            Self::TrackRecordingCode => 1 << 2,
        }
    }

    /// Stable external name of this feature.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ReadToc => READ_TOC,
            Self::MediaCatalogNumber => MEDIA_CATALOG_NUMBER,
            Self::TrackRecordingCode => TRACK_RECORDING_CODE,
        }
    }

    /// Look up a feature by its stable name. An unknown name is not an error,
    /// it is simply no feature at all.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|feature| feature.name() == name)
    }
}

/// A set of features encoded as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureSet(u32);

impl FeatureSet {
    pub const EMPTY: Self = Self(0);

    #[must_use]
    pub fn new(features: &[Feature]) -> Self {
        Self(features.iter().fold(0, |bits, feature| bits | feature.bit()))
    }

    #[must_use]
    pub fn with(self, feature: Feature) -> Self {
        Self(self.0 | feature.bit())
    }

    #[must_use]
    pub fn contains(self, feature: Feature) -> bool {
        self.0 & feature.bit() != 0
    }

    /// The raw bitmask.
    #[must_use]
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Names of the features in this set, in declaration order.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        Feature::ALL
            .into_iter()
            .filter(|feature| self.contains(*feature))
            .map(Feature::name)
            .collect()
    }
}

static AVAILABLE: OnceLock<FeatureSet> = OnceLock::new();

/// Declare the capabilities of this build. Call once at startup, before any
/// capability query; returns `false` (and changes nothing) if the registry
/// was already initialized.
pub fn initialize(features: FeatureSet) -> bool {
    AVAILABLE.set(features).is_ok()
}

fn available() -> FeatureSet {
    AVAILABLE.get().copied().unwrap_or(FeatureSet::EMPTY)
}

/// Whether the named capability is available. Unknown names report
/// unavailable.
#[must_use]
pub fn has_feature(name: &str) -> bool {
    Feature::from_name(name).is_some_and(|feature| available().contains(feature))
}

/// Names of every available capability.
#[must_use]
pub fn feature_list() -> Vec<&'static str> {
    available().names()
}

#[cfg(test)]
mod tests {
    use super::*;

    // The process-wide registry itself is covered by the tests/features.rs
    // integration test, which owns its process.

    #[test]
    fn feature_bits_are_stable() {
        assert_eq!(Feature::ReadToc.bit(), 1);
        assert_eq!(Feature::MediaCatalogNumber.bit(), 2);
        assert_eq!(Feature::TrackRecordingCode.bit(), 4);
    }

    #[test]
    fn feature_names_round_trip() {
        for feature in Feature::ALL {
            assert_eq!(Feature::from_name(feature.name()), Some(feature));
        }
        assert_eq!(Feature::from_name("isrc"), None);
    }

    #[test]
    fn feature_set_operations() {
        let set = FeatureSet::new(&[Feature::ReadToc, Feature::TrackRecordingCode]);
        assert_eq!(set.bits(), 0b101);
        assert!(set.contains(Feature::ReadToc));
        assert!(!set.contains(Feature::MediaCatalogNumber));
        assert_eq!(set.names(), vec![READ_TOC, TRACK_RECORDING_CODE]);

        assert_eq!(FeatureSet::EMPTY.with(Feature::ReadToc), FeatureSet::new(&[Feature::ReadToc]));
        assert!(FeatureSet::EMPTY.names().is_empty());
    }
}
