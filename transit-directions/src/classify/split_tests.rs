//! Scenario tests for trip splitting.

use super::*;
use crate::domain::{DirectionLabel, RouteId, SequenceIndex, StopId, StopVisit, TripId, TripStopSequence};
use crate::patterns::{RouteDirectionSpec, strathcona_county_patterns};

fn stop(s: &str) -> StopId {
    StopId::parse(s).unwrap()
}

fn trip(id: &str, stops: &[&str]) -> TripStopSequence {
    TripStopSequence::from_stops(TripId::new(id), stops.iter().map(|s| stop(s)))
}

fn out_and_back() -> RouteDirectionSpec {
    RouteDirectionSpec::builder("R")
        .direction("Out", &["T0"])
        .direction("In", &["T0"])
        .exclusive("T0", "*", "Out")
        .exclusive("*", "T0", "In")
        .build()
        .unwrap()
}

/// Three directions whose exclusive and shared keys overlap on every stop.
fn competing_keys() -> RouteDirectionSpec {
    RouteDirectionSpec::builder("R")
        .direction("Out", &["T0", "M1", "M2"])
        .direction("In", &["M2", "M1", "T0"])
        .direction("Loop", &["T0", "M2", "T0"])
        .derive_from_anchor_orders()
        .exclusive("T0", "*", "Out")
        .exclusive("*", "T0", "In")
        .shared(
            "M1",
            "*",
            &[DirectionLabel::headsign("In"), DirectionLabel::headsign("Out")],
        )
        .build()
        .unwrap()
}

/// (label, stops) of each sub-trip.
fn shape(sub_trips: &[SubTrip]) -> Vec<(String, Vec<&str>)> {
    sub_trips
        .iter()
        .map(|s| {
            (
                s.direction.to_string(),
                s.stop_visits().map(|v| v.stop_id.as_str()).collect(),
            )
        })
        .collect()
}

#[test]
fn out_and_back_splits_at_nearest_terminal() {
    let sub_trips = split_trip(&trip("t1", &["T0", "M1", "M2", "T0"]), &out_and_back()).unwrap();

    // M2 is one stop from the return and two from the departure
    assert_eq!(
        shape(&sub_trips),
        vec![
            ("Out".to_string(), vec!["T0", "M1"]),
            ("In".to_string(), vec!["M2", "T0"]),
        ]
    );
    for sub_trip in &sub_trips {
        let local: Vec<u32> = sub_trip.visits.iter().map(|v| v.local_sequence).collect();
        assert_eq!(local, vec![1, 2]);
    }
}

#[test]
fn equidistant_visit_prefers_before_wildcard() {
    let sub_trips =
        split_trip(&trip("t2", &["T0", "M1", "M2", "M3", "T0"]), &out_and_back()).unwrap();

    assert_eq!(
        shape(&sub_trips),
        vec![
            ("Out".to_string(), vec!["T0", "M1", "M2"]),
            ("In".to_string(), vec!["M3", "T0"]),
        ]
    );
}

#[test]
fn terminals_anchor_their_own_trip() {
    let spec = RouteDirectionSpec::builder("R")
        .direction("Up", &["X", "Y"])
        .direction("Down", &["Y", "X"])
        .exclusive("X", "Y", "Up")
        .exclusive("Y", "X", "Down")
        .build()
        .unwrap();

    let sub_trips = split_trip(&trip("t3", &["X", "a", "b", "Y"]), &spec).unwrap();
    assert_eq!(
        shape(&sub_trips),
        vec![("Up".to_string(), vec!["X", "a", "b", "Y"])]
    );

    let sub_trips = split_trip(&trip("t4", &["Y", "c", "X"]), &spec).unwrap();
    assert_eq!(
        shape(&sub_trips),
        vec![("Down".to_string(), vec!["Y", "c", "X"])]
    );
}

#[test]
fn uncovered_topology_is_fatal() {
    let spec = out_and_back();
    let trip = trip("t5", &["P", "Q", "R"]);

    let err = split_trip(&trip, &spec).unwrap_err();
    assert_eq!(err.stop_id, stop("P"));

    let failures = unclassifiable_visits(&trip, &spec);
    let stops: Vec<&str> = failures.iter().map(|e| e.stop_id.as_str()).collect();
    assert_eq!(stops, vec!["P", "Q", "R"]);
}

#[test]
fn partly_covered_trip_lists_each_failure() {
    // Nothing matches until "B" has been passed
    let spec = RouteDirectionSpec::builder("R")
        .direction("Up", &["B"])
        .direction("Down", &["B", "C"])
        .exclusive("B", "*", "Up")
        .exclusive("C", "*", "Down")
        .build()
        .unwrap();

    let trip = trip("t6", &["p", "q", "B", "r"]);
    let failures = unclassifiable_visits(&trip, &spec);
    let at: Vec<u32> = failures.iter().map(|e| e.sequence_index.0).collect();
    assert_eq!(at, vec![1, 2, 3]);
    assert_eq!(split_trip(&trip, &spec).unwrap_err(), failures[0]);
}

#[test]
fn conflated_trip_splits_at_turnaround() {
    let spec = RouteDirectionSpec::builder("401")
        .direction("Ordze TC", &["1973", "1292", "4000"])
        .direction("Downtown", &["4000", "1457", "1973"])
        .derive_from_anchor_orders()
        .exclusive("1292", "*", "Ordze TC")
        .exclusive("*", "1457", "Downtown")
        .build()
        .unwrap();

    let sub_trips = split_trip(
        &trip("conflated", &["1973", "1292", "4000", "1457", "1973"]),
        &spec,
    )
    .unwrap();

    assert_eq!(
        shape(&sub_trips),
        vec![
            ("Ordze TC".to_string(), vec!["1973", "1292", "4000"]),
            ("Downtown".to_string(), vec!["1457", "1973"]),
        ]
    );
    assert_eq!(sub_trips[1].visits[0].visit.sequence_index, SequenceIndex(4));
    assert_eq!(sub_trips[1].visits[0].local_sequence, 1);
}

#[test]
fn derived_pattern_without_turnaround_keys_rejects_mid_trip_terminal() {
    let spec = RouteDirectionSpec::builder("401")
        .direction("Ordze TC", &["1973", "1292", "4000"])
        .direction("Downtown", &["4000", "1457", "1973"])
        .derive_from_anchor_orders()
        .build()
        .unwrap();

    let trip = trip("conflated", &["1973", "1292", "4000", "1457", "1973"]);
    let failures = unclassifiable_visits(&trip, &spec);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].stop_id, stop("4000"));
}

#[test]
fn shared_wildcards_split_by_their_own_preference() {
    let spec = RouteDirectionSpec::builder("R")
        .direction("A", &["S", "E"])
        .direction("B", &["S", "E"])
        .shared(
            "S",
            "*",
            &[DirectionLabel::headsign("B"), DirectionLabel::headsign("A")],
        )
        .shared(
            "*",
            "E",
            &[DirectionLabel::headsign("A"), DirectionLabel::headsign("B")],
        )
        .build()
        .unwrap();

    let trip = trip("shared", &["S", "m1", "m2", "m3", "m4", "E"]);
    let sub_trips = split_trip(&trip, &spec).unwrap();
    assert_eq!(
        shape(&sub_trips),
        vec![
            ("B".to_string(), vec!["S", "m1", "m2"]),
            ("A".to_string(), vec!["m3", "m4", "E"]),
        ]
    );

    let m2 = classify_visit(&trip, &trip.visits()[2], &spec).unwrap();
    assert_eq!(m2.tier, MatchTier::BeforeShared);
    assert_eq!(m2.score, 2);
    let m3 = classify_visit(&trip, &trip.visits()[3], &spec).unwrap();
    assert_eq!(m3.tier, MatchTier::AfterShared);
    assert_eq!(m3.score, 2);
}

#[test]
fn strathcona_401_both_patterns() {
    let registry = strathcona_county_patterns().unwrap();
    let spec = registry.lookup(&RouteId::new("401")).unwrap();

    let sub_trips = split_trip(&trip("a", &["1973", "x", "1292", "y", "4000"]), spec).unwrap();
    assert_eq!(sub_trips.len(), 1);
    assert_eq!(sub_trips[0].direction, DirectionLabel::headsign("Ordze TC"));
    assert_eq!(sub_trips[0].len(), 5);

    let sub_trips = split_trip(&trip("b", &["4000", "1457", "1973"]), spec).unwrap();
    assert_eq!(sub_trips.len(), 1);
    assert_eq!(sub_trips[0].direction, DirectionLabel::headsign("Downtown"));
}

#[test]
fn strathcona_494_shared_corridor() {
    let registry = strathcona_county_patterns().unwrap();
    let spec = registry.lookup(&RouteId::new("494")).unwrap();

    let sub_trips = split_trip(&trip("c", &["4000", "5005", "5023", "4036", "8000"]), spec).unwrap();
    assert_eq!(
        shape(&sub_trips),
        vec![(
            "Bethel TT".to_string(),
            vec!["4000", "5005", "5023", "4036", "8000"]
        )]
    );
}

#[test]
fn strathcona_440_loop_then_branch() {
    let registry = strathcona_county_patterns().unwrap();
    let spec = registry.lookup(&RouteId::new("440")).unwrap();

    let loop_only = trip(
        "loop",
        &["8000", "7199", "7124", "7011", "1068", "7102", "8000"],
    );
    let sub_trips = split_trip(&loop_only, spec).unwrap();
    assert_eq!(sub_trips.len(), 1);
    assert_eq!(sub_trips[0].direction, DirectionLabel::headsign("Bethel TT"));

    let branch_only = trip("branch", &["8000", "1090", "7024", "7199"]);
    let sub_trips = split_trip(&branch_only, spec).unwrap();
    assert_eq!(sub_trips.len(), 1);
    assert_eq!(sub_trips[0].direction, DirectionLabel::headsign("Heritage Hls"));

    // The feed runs the loop and the branch as one trip; the terminal
    // visit between them opens the branch
    let conflated = trip(
        "both",
        &[
            "8000", "7199", "7124", "7011", "1068", "7102", "8000", "1090", "7024", "7199",
        ],
    );
    let sub_trips = split_trip(&conflated, spec).unwrap();
    assert_eq!(
        shape(&sub_trips),
        vec![
            (
                "Bethel TT".to_string(),
                vec!["8000", "7199", "7124", "7011", "1068", "7102"]
            ),
            (
                "Heritage Hls".to_string(),
                vec!["8000", "1090", "7024", "7199"]
            ),
        ]
    );
}

#[test]
fn strathcona_443a_school_loops() {
    let registry = strathcona_county_patterns().unwrap();
    let spec = registry.lookup(&RouteId::new("443A")).unwrap();

    let afternoon = trip("pm", &["8000", "1013", "6079", "6115", "2000", "1011", "8000"]);
    let sub_trips = split_trip(&afternoon, spec).unwrap();
    assert_eq!(sub_trips.len(), 1);
    assert_eq!(sub_trips[0].direction, DirectionLabel::headsign("PM"));

    // Both loops in one trip; the terminal between them closes the first
    let both = trip(
        "am-pm",
        &[
            "8000", "1013", "2001", "6035", "6126", "1009", "1011", "8000", "1013", "6079",
            "6115", "2000", "1011", "8000",
        ],
    );
    let sub_trips = split_trip(&both, spec).unwrap();
    assert_eq!(
        shape(&sub_trips),
        vec![
            (
                "AM".to_string(),
                vec!["8000", "1013", "2001", "6035", "6126", "1009", "1011", "8000"]
            ),
            (
                "PM".to_string(),
                vec!["1013", "6079", "6115", "2000", "1011", "8000"]
            ),
        ]
    );
}

#[test]
fn strathcona_433a_single_terminal_trip() {
    let registry = strathcona_county_patterns().unwrap();
    let spec = registry.lookup(&RouteId::new("433A")).unwrap();

    // Nothing before the terminal names it
    let err = split_trip(&trip("abj", &["a", "8113", "b", "c"]), spec).unwrap_err();
    assert_eq!(err.stop_id, stop("a"));

    let sub_trips = split_trip(&trip("abj", &["8113", "b", "c"]), spec).unwrap();
    assert_eq!(
        shape(&sub_trips),
        vec![("ABJ Sch".to_string(), vec!["8113", "b", "c"])]
    );

    let sub_trips = split_trip(&trip("charlton", &["d", "e", "8114"]), spec).unwrap();
    assert_eq!(
        shape(&sub_trips),
        vec![("Charlton Hts".to_string(), vec!["d", "e", "8114"])]
    );
}

#[test]
fn sub_trips_keep_raw_feed_indices() {
    let visit = |s: &str, idx: u32| StopVisit::new(stop(s), SequenceIndex(idx));
    let trip = TripStopSequence::new(
        TripId::new("gaps"),
        vec![visit("T0", 3), visit("M1", 7), visit("M2", 40), visit("T0", 41)],
    )
    .unwrap();

    let sub_trips = split_trip(&trip, &out_and_back()).unwrap();
    let raw: Vec<Vec<u32>> = sub_trips
        .iter()
        .map(|s| s.stop_visits().map(|v| v.sequence_index.0).collect())
        .collect();
    assert_eq!(raw, vec![vec![3, 7], vec![40, 41]]);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Trips that leave the terminal first, so every visit has evidence.
    fn departing_trip() -> impl Strategy<Value = TripStopSequence> {
        prop::collection::vec(
            (prop::sample::select(vec!["T0", "M1", "M2", "M3"]), 1u32..5),
            0..30,
        )
        .prop_map(|rest| {
            let mut idx = 1;
            let mut visits = vec![StopVisit::new(stop("T0"), SequenceIndex(idx))];
            for (s, gap) in rest {
                idx += gap;
                visits.push(StopVisit::new(stop(s), SequenceIndex(idx)));
            }
            TripStopSequence::new(TripId::new("p"), visits).unwrap()
        })
    }

    proptest! {
        #[test]
        fn sub_trips_partition_the_trip(trip in departing_trip()) {
            let sub_trips = split_trip(&trip, &out_and_back()).unwrap();

            let rejoined: Vec<&StopVisit> = sub_trips.iter().flat_map(|s| s.stop_visits()).collect();
            let original: Vec<&StopVisit> = trip.visits().iter().collect();
            prop_assert_eq!(rejoined, original);

            for sub_trip in &sub_trips {
                prop_assert!(!sub_trip.is_empty());
                for (i, visit) in sub_trip.visits.iter().enumerate() {
                    prop_assert_eq!(visit.local_sequence as usize, i + 1);
                    prop_assert_eq!(&visit.direction, &sub_trip.direction);
                }
            }
            for pair in sub_trips.windows(2) {
                prop_assert_ne!(pair[0].direction_index, pair[1].direction_index);
            }
        }

        #[test]
        fn split_is_deterministic(trip in departing_trip()) {
            // Each build gets fresh hash maps
            let first = split_trip(&trip, &competing_keys());
            prop_assert!(first.is_ok());
            prop_assert_eq!(first, split_trip(&trip, &competing_keys()));
            prop_assert_eq!(
                split_trip(&trip, &out_and_back()),
                split_trip(&trip, &out_and_back())
            );
        }
    }
}
