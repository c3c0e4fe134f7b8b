//! Transit trip direction classification.
//!
//! Some transit feeds publish two travel patterns of a route under one
//! direction, or run both in a single trip. This crate recovers the real
//! direction of every stop visit from the order of the stops themselves,
//! using per-route patterns of anchor stops, and splits conflated trips
//! into single-direction sub-trips.

pub mod classify;
pub mod domain;
pub mod patterns;
