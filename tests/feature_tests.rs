// Feature set encoding tests

use proptest::prelude::*;
use vizor::vision::Feature;

#[test]
fn test_query_value_contains_exact_subset_in_order() {
    let features = [Feature::Caption, Feature::Tags];
    assert_eq!(Feature::join(&features), "caption,tags");

    let features = [Feature::Read, Feature::DenseCaptions, Feature::People];
    assert_eq!(Feature::join(&features), "read,denseCaptions,people");
}

#[test]
fn test_wire_names_match_api() {
    assert_eq!(Feature::Caption.as_str(), "caption");
    assert_eq!(Feature::DenseCaptions.as_str(), "denseCaptions");
    assert_eq!(Feature::Tags.as_str(), "tags");
    assert_eq!(Feature::Objects.as_str(), "objects");
    assert_eq!(Feature::People.as_str(), "people");
    assert_eq!(Feature::SmartCrops.as_str(), "smartCrops");
    assert_eq!(Feature::Read.as_str(), "read");
}

#[test]
fn test_every_wire_name_parses_back() {
    for feature in Feature::ALL {
        assert_eq!(feature.as_str().parse::<Feature>().unwrap(), feature);
    }
}

#[test]
fn test_unknown_feature_is_rejected() {
    assert!("landmarks".parse::<Feature>().is_err());
    assert!("CAPTION".parse::<Feature>().is_err());
}

fn feature_strategy() -> impl Strategy<Value = Feature> {
    prop_oneof![
        Just(Feature::Caption),
        Just(Feature::DenseCaptions),
        Just(Feature::Tags),
        Just(Feature::Objects),
        Just(Feature::People),
        Just(Feature::SmartCrops),
        Just(Feature::Read),
    ]
}

proptest! {
    /// Encoding a feature set to the query string and parsing it back
    /// yields the original sequence (and therefore the original set).
    #[test]
    fn prop_csv_round_trip(features in prop::collection::vec(feature_strategy(), 1..16)) {
        let encoded = Feature::join(&features);
        let parsed = Feature::parse_list(&encoded).unwrap();
        prop_assert_eq!(parsed, features);
    }

    /// The encoded value contains one segment per requested feature.
    #[test]
    fn prop_csv_segment_count(features in prop::collection::vec(feature_strategy(), 1..16)) {
        let encoded = Feature::join(&features);
        prop_assert_eq!(encoded.split(',').count(), features.len());
    }
}
