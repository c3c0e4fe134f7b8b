//! Built-in patterns for Strathcona County Transit.
//!
//! The Strathcona County feed publishes both travel patterns of these
//! routes under one raw direction id (or conflates them in a single trip),
//! so every trip has to be classified from its stop order.

use super::{ConfigurationError, PatternRegistry, RouteDirectionSpec, RouteDirectionSpecBuilder};

const BETHEL_TT: &str = "Bethel TT";
const ORDZE_TC: &str = "Ordze TC";
const DOWNTOWN: &str = "Downtown";
const GOV_CTR: &str = "Gov Ctr";
const GOV_CTR_NAIT: &str = "Gov Ctr / NAIT";
const U_OF_ALBERTA: &str = "U of Alberta";
const MILLENNIUM_PLACE: &str = "Millennium Pl";
const EMERALD_HILLS: &str = "Emerald Hls";
const EMERALD_HILLS_ABJ: &str = "Emerald Hls / ABJ Sch";
const ABJ: &str = "ABJ Sch";
const SUMMERWOOD: &str = "Summerwood";
const DAVIDSON_CREEK: &str = "Davidson Crk";
const CHARLTON_HEIGHTS: &str = "Charlton Hts";
const HERITAGE_HILLS: &str = "Heritage Hls";
const NOTTINGHAM: &str = "Nottingham";
const BRENTWOOD: &str = "Brentwood";
const VILLAGE: &str = "Village";
const BROADMOOR: &str = "Broadmoor";
const CITP: &str = "Ctr in the Park";
const REGENCY: &str = "Regency";
const AM: &str = "AM";
const PM: &str = "PM";

/// Two-direction route with memberships derived from the anchor orders.
fn two_way(
    route_id: &str,
    first: (&str, &[&str]),
    second: (&str, &[&str]),
) -> RouteDirectionSpecBuilder {
    RouteDirectionSpec::builder(route_id)
        .direction(first.0, first.1)
        .direction(second.0, second.1)
        .derive_from_anchor_orders()
}

/// Route 433A has a different terminal pair in each direction.
///
/// The derived pairs never cover a trip that only shows one terminal, so
/// each terminal also carries its own wildcard key.
fn charlton_heights_433a() -> RouteDirectionSpecBuilder {
    two_way(
        "433A",
        (CHARLTON_HEIGHTS, &["7921", "7330", "8114"]),
        (ABJ, &["8113", "7319", "7920"]),
    )
    .exclusive("7921", "*", CHARLTON_HEIGHTS)
    .exclusive("*", "8114", CHARLTON_HEIGHTS)
    .exclusive("8113", "*", ABJ)
    .exclusive("*", "7920", ABJ)
}

/// Route 443A runs a morning and an afternoon school loop out of Bethel.
///
/// Both loops share the terminal, 1013 and 1011, so derived pairs would
/// send the first visits of the afternoon loop to the morning one. Only the
/// stops served by a single loop are evidence here.
fn school_loops_443a() -> RouteDirectionSpecBuilder {
    let builder = RouteDirectionSpec::builder("443A")
        .direction(
            AM,
            &["8000", "1013", "2001", "6035", "6126", "1009", "1011", "8000"],
        )
        .direction(PM, &["8000", "1013", "6079", "6115", "2000", "1011", "8000"]);

    let am_only = ["2001", "6035", "6126", "1009"];
    let pm_only = ["6079", "6115", "2000"];

    let builder = am_only.iter().fold(builder, |b, stop| {
        b.exclusive(stop, "*", AM).exclusive("*", stop, AM)
    });
    pm_only.iter().fold(builder, |b, stop| {
        b.exclusive(stop, "*", PM).exclusive("*", stop, PM)
    })
}

/// Create the Strathcona County Transit registry.
///
/// Anchor orders list the terminals and the stops that tell the two
/// patterns apart; "4000" is Ordze Transit Centre and "8000" is Bethel
/// Transit Terminal.
pub fn strathcona_county_patterns() -> Result<PatternRegistry, ConfigurationError> {
    PatternRegistry::builder()
        .route(two_way(
            "401",
            (ORDZE_TC, &["1973", "1292", "4000"]),
            (DOWNTOWN, &["4000", "1457", "1973"]),
        ))
        .route(two_way(
            "403",
            (ORDZE_TC, &["1732", "1629", "4000"]),
            (GOV_CTR, &["4000", "1794", "1973"]),
        ))
        .route(two_way(
            "404",
            (ORDZE_TC, &["2636", "2722", "4000"]),
            (U_OF_ALBERTA, &["4000", "2752", "2638", "2625", "2636"]),
        ))
        .route(two_way(
            "411",
            (BETHEL_TT, &["1973", "1439", "1292", "8000"]),
            (DOWNTOWN, &["8000", "2289", "1973"]),
        ))
        .route(two_way(
            "413",
            (
                BETHEL_TT,
                &["1223", "1973", "1732", "1643", "1629", "8005", "8000"],
            ),
            (GOV_CTR_NAIT, &["8000", "8004", "1728", "1898", "1973", "1227"]),
        ))
        .route(two_way(
            "414",
            (BETHEL_TT, &["2636", "8000"]),
            (U_OF_ALBERTA, &["8000", "2636"]),
        ))
        .route(two_way(
            "420",
            (BETHEL_TT, &["8800", "8811", "8000"]),
            (MILLENNIUM_PLACE, &["8000", "8700", "8800"]),
        ))
        .route(two_way(
            "430",
            (BETHEL_TT, &["7921", "7436", "8000"]),
            (EMERALD_HILLS_ABJ, &["8000", "8304", "7921"]),
        ))
        .route(two_way(
            "431",
            (BETHEL_TT, &["7920", "8849", "8000"]),
            (EMERALD_HILLS, &["8000", "7437", "7920"]),
        ))
        .route(two_way(
            "432",
            (BETHEL_TT, &["7870", "7508", "8000"]),
            (SUMMERWOOD, &["8000", "8304", "7870"]),
        ))
        .route(two_way(
            "433",
            (BETHEL_TT, &["7272", "7431", "8000"]),
            (DAVIDSON_CREEK, &["8000", "8135", "7272"]),
        ))
        .route(charlton_heights_433a())
        // The Bethel-bound pattern starts and ends at the terminal
        .route(two_way(
            "440",
            (
                BETHEL_TT,
                &["8000", "7199", "7124", "7011", "1068", "7102", "8000"],
            ),
            (HERITAGE_HILLS, &["8000", "1090", "7024", "7199"]),
        ))
        .route(two_way(
            "441",
            (BETHEL_TT, &["4000", "9157", "8000"]),
            (ORDZE_TC, &["8000", "9240", "9115", "4939", "4933", "4000"]),
        ))
        .route(two_way(
            "441A",
            (BETHEL_TT, &["9115", "9157", "9239", "9160", "8000"]),
            (REGENCY, &["8000", "9150", "9240", "9115", "9157"]),
        ))
        .route(two_way(
            "442",
            (BETHEL_TT, &["9015", "9180", "8000"]),
            (NOTTINGHAM, &["8000", "1002", "9015"]),
        ))
        .route(two_way(
            "443",
            (BETHEL_TT, &["4000", "6012", "8000"]),
            (ORDZE_TC, &["8000", "1088", "6065", "4000"]),
        ))
        .route(school_loops_443a())
        .route(two_way(
            "443B",
            (BETHEL_TT, &["6048", "1024", "8000"]),
            (CITP, &["8000", "1033", "6029"]),
        ))
        .route(two_way(
            "450",
            (BETHEL_TT, &["2001", "6072", "8000"]),
            (CITP, &["8000", "8105", "2001"]),
        ))
        .route(two_way(
            "451",
            (BETHEL_TT, &["4000", "5040", "8000"]),
            (ORDZE_TC, &["8000", "5005", "5115", "4000"]),
        ))
        .route(two_way(
            "451A",
            (BETHEL_TT, &["5040", "5078", "8000"]),
            (VILLAGE, &["8000", "5083", "5115"]),
        ))
        .route(two_way(
            "451B",
            (BETHEL_TT, &["5041", "5138", "8000"]),
            (BROADMOOR, &["8000", "5005", "5041"]),
        ))
        .route(two_way(
            "490",
            (
                BETHEL_TT,
                &["8800", "8806", "8812", "8814", "8803", "7526", "8000"],
            ),
            (MILLENNIUM_PLACE, &["8000", "8816", "8010", "8700", "8800"]),
        ))
        .route(two_way(
            "491",
            (
                BETHEL_TT,
                &["7807", "7508", "7406", "7312", "7229", "8138", "8000"],
            ),
            (
                SUMMERWOOD,
                &["8000", "8010", "8816", "8101", "7604", "7807"],
            ),
        ))
        .route(two_way(
            "492",
            (
                BETHEL_TT,
                &["9157", "9225", "7199", "7011", "1042", "1052", "1001", "8000"],
            ),
            (
                REGENCY,
                &["8000", "8010", "8816", "8101", "1002", "9015", "9157"],
            ),
        ))
        .route(two_way(
            "493",
            (
                BETHEL_TT,
                &[
                    "6097", "6115", "6065", "6048", "1004", "1090", "7006", "8111", "8000",
                ],
            ),
            (
                BRENTWOOD,
                &[
                    "8000", "8010", "8816", "8101", "7011", "1042", "1071", "2001", "6079", "6091",
                    "6097",
                ],
            ),
        ))
        // Both patterns run Main Blvd between 5005 and 4036
        .route(two_way(
            "494",
            (
                BETHEL_TT,
                &[
                    "4000", "6012", "9353", "9180", "1001", "1004", "5005", "5023", "4036", "8013",
                    "8000",
                ],
            ),
            (
                ORDZE_TC,
                &[
                    "8000", "8010", "8816", "1013", "1014", "5005", "5011", "5023", "4036", "5041",
                    "5065", "5089", "5115", "4000",
                ],
            ),
        ))
        .build()
}
