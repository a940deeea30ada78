// Property-based tests for query filter logic.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;

use neoscan_engine::database::NeoDatabase;
use neoscan_engine::filter::Filter;
use neoscan_engine::neo::{parse_approach_time, CloseApproach, NearEarthObject};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// One NEO plus a handful of its approaches, as raw loader output.
#[derive(Debug, Clone)]
struct NeoFixture {
    designation: String,
    diameter: Option<f64>,
    hazardous: bool,
    approaches: Vec<(f64, f64)>, // (distance, velocity)
}

fn arb_neo(tag: usize) -> impl Strategy<Value = NeoFixture> {
    (
        proptest::option::of(0.001f64..100.0),
        any::<bool>(),
        proptest::collection::vec((0.0f64..2.0, 0.0f64..50.0), 0..4),
    )
        .prop_map(move |(diameter, hazardous, approaches)| NeoFixture {
            designation: format!("neo-{tag}"),
            diameter,
            hazardous,
            approaches,
        })
}

fn arb_population() -> impl Strategy<Value = Vec<NeoFixture>> {
    (1usize..6).prop_flat_map(|n| {
        (0..n).map(arb_neo).collect::<Vec<_>>()
    })
}

fn build_db(fixtures: &[NeoFixture]) -> NeoDatabase {
    let neos: Vec<NearEarthObject> = fixtures
        .iter()
        .map(|f| NearEarthObject::new(f.designation.clone(), None, f.diameter, f.hazardous))
        .collect();
    let approaches: Vec<CloseApproach> = fixtures
        .iter()
        .flat_map(|f| {
            f.approaches.iter().map(|&(distance, velocity)| {
                CloseApproach::new(
                    f.designation.clone(),
                    parse_approach_time("2025-Jan-03 14:30").unwrap(),
                    distance,
                    velocity,
                )
            })
        })
        .collect();
    NeoDatabase::new(neos, approaches)
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    /// Numeric bound filters never admit an approach outside the bounds.
    #[test]
    fn bounds_conjunction_is_sound(
        fixtures in arb_population(),
        min_d in 0.0f64..2.0,
        max_v in 0.0f64..50.0,
    ) {
        let db = build_db(&fixtures);
        let filters = [Filter::MinDistance(min_d), Filter::MaxVelocity(max_v)];
        for approach in db.query(&filters) {
            prop_assert!(approach.distance >= min_d);
            prop_assert!(approach.velocity <= max_v);
        }
    }

    /// Unknown diameters never pass a diameter bound, whatever the bound.
    #[test]
    fn unknown_diameter_never_passes_bounds(
        fixtures in arb_population(),
        bound in -100.0f64..100.0,
    ) {
        let db = build_db(&fixtures);
        for filter in [Filter::MinDiameter(bound), Filter::MaxDiameter(bound)] {
            let filters = [filter];
            for approach in db.query(&filters) {
                let neo = db.neo_of(approach).unwrap();
                prop_assert!(neo.diameter.is_some());
            }
        }
    }

    /// The hazardous filter partitions the linked approaches exactly.
    #[test]
    fn hazardous_filter_partitions(fixtures in arb_population()) {
        let db = build_db(&fixtures);
        let yes = db.query(&[Filter::Hazardous(true)]).count();
        let no = db.query(&[Filter::Hazardous(false)]).count();
        let all = db.query(&[]).count();
        prop_assert_eq!(yes + no, all);
    }

    /// An empty conjunction yields every linked approach in load order.
    #[test]
    fn empty_filter_is_identity(fixtures in arb_population()) {
        let db = build_db(&fixtures);
        let scanned: Vec<_> = db.query(&[]).map(|a| a.designation.clone()).collect();
        let expected: Vec<_> = db
            .approaches()
            .iter()
            .filter(|a| a.neo.is_some())
            .map(|a| a.designation.clone())
            .collect();
        prop_assert_eq!(scanned, expected);
    }

    /// Linkage invariant: every linked approach's owner carries its key.
    #[test]
    fn linkage_back_references_agree(fixtures in arb_population()) {
        let db = build_db(&fixtures);
        for approach in db.approaches() {
            if let Some(neo) = db.neo_of(approach) {
                prop_assert_eq!(&neo.designation, &approach.designation);
            }
        }
    }
}
