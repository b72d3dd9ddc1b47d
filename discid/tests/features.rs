//! Tests for the process-wide capability registry.
//!
//! These live in an integration test so they own their process: the registry
//! initializes exactly once per process, which would race other tests if run
//! inside the library test binary.

use discid::features::{self, Feature, FeatureSet};

#[test]
fn registry_initializes_once() {
    // Before initialization every capability reads as unavailable
    assert!(!features::has_feature(features::READ_TOC));
    assert!(features::feature_list().is_empty());

    assert!(features::initialize(FeatureSet::new(&[Feature::ReadToc])));

    assert!(features::has_feature(features::READ_TOC));
    assert!(!features::has_feature(features::MEDIA_CATALOG_NUMBER));
    assert!(!features::has_feature(features::TRACK_RECORDING_CODE));
    assert_eq!(features::feature_list(), vec![features::READ_TOC]);

    // Unknown names are not an error, they are simply unavailable
    assert!(!features::has_feature("mcn"));
    assert!(!features::has_feature(""));

    // A second initialization is rejected and changes nothing
    assert!(!features::initialize(FeatureSet::new(&[Feature::MediaCatalogNumber])));
    assert!(!features::has_feature(features::MEDIA_CATALOG_NUMBER));
    assert_eq!(features::feature_list(), vec![features::READ_TOC]);
}
