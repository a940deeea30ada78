//! Entity model for near-Earth objects and their close approaches.
//!
//! Two record types:
//! - [`NearEarthObject`] — a minor planet or comet, keyed by its NASA
//!   primary designation
//! - [`CloseApproach`] — one recorded pass of an NEO near Earth
//!
//! Optional attributes (IAU name, diameter) are `Option`s, not sentinel
//! values: an unknown diameter is `None` and fails every numeric range
//! predicate, rather than relying on NaN comparison semantics.
//!
//! The two types form a bidirectional relation. It is resolved arena-style:
//! [`NeoId`] and [`ApproachId`] index into the master lists owned by
//! `NeoDatabase`, so neither entity owns the other.

use chrono::{NaiveDateTime, ParseError};
use serde::{Deserialize, Serialize};

/// Index of an NEO in the database's master list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NeoId(pub usize);

/// Index of a close approach in the database's master list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApproachId(pub usize);

/// Source format for close-approach timestamps: `2025-Jan-03 14:30`.
pub const CD_INPUT_FORMAT: &str = "%Y-%b-%d %H:%M";

/// Display format for timestamps: `2025-01-03 14:30`.
/// Seconds are omitted — the source data carries no seconds precision.
pub const TIME_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a close-approach timestamp in source format (`YYYY-MMM-DD HH:MM`, UTC).
pub fn parse_approach_time(s: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(s.trim(), CD_INPUT_FORMAT)
}

// ── NearEarthObject ─────────────────────────────────────────────────

/// A near-Earth object.
///
/// `designation` is required, unique across the loaded set, and never empty
/// after a well-formed load. `approaches` is populated once during database
/// construction and append-only thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearEarthObject {
    /// NASA primary designation. Primary key.
    pub designation: String,
    /// IAU name, when one has been assigned.
    pub name: Option<String>,
    /// Diameter in kilometers. `None` when unknown.
    pub diameter: Option<f64>,
    /// Potentially hazardous per NASA's flag.
    pub hazardous: bool,
    /// Linked close approaches, in the order they were supplied.
    pub approaches: Vec<ApproachId>,
}

impl NearEarthObject {
    /// Create an NEO, normalizing quirks of the source data: an empty or
    /// whitespace name becomes `None`, and a non-finite or negative
    /// diameter becomes `None` (unknown).
    pub fn new(
        designation: impl Into<String>,
        name: Option<String>,
        diameter: Option<f64>,
        hazardous: bool,
    ) -> Self {
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let diameter = diameter.filter(|d| d.is_finite() && *d >= 0.0);
        Self {
            designation: designation.into(),
            name,
            diameter,
            hazardous,
            approaches: Vec::new(),
        }
    }

    /// Full name: `"433 (Eros)"` when named, else the designation alone.
    pub fn fullname(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", self.designation, name),
            None => self.designation.clone(),
        }
    }
}

impl std::fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hazard = if self.hazardous { "IS" } else { "IS NOT" };
        match self.diameter {
            Some(d) => write!(
                f,
                "NEO {} has a diameter of {:.3} km and {} potentially hazardous.",
                self.fullname(),
                d,
                hazard
            ),
            None => write!(
                f,
                "NEO {} has an unknown diameter and {} potentially hazardous.",
                self.fullname(),
                hazard
            ),
        }
    }
}

// ── CloseApproach ───────────────────────────────────────────────────

/// One recorded close approach of an NEO to Earth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseApproach {
    /// Raw join key from the source row. Vestigial once `neo` is set;
    /// the canonical reference is the `neo` index.
    pub designation: String,
    /// Approach time, UTC.
    pub time: NaiveDateTime,
    /// Nominal approach distance in astronomical units.
    pub distance: f64,
    /// Relative velocity in kilometers per second.
    pub velocity: f64,
    /// Owning NEO, resolved during database construction. Stays `None`
    /// for orphans whose designation matched no loaded NEO.
    pub neo: Option<NeoId>,
}

impl CloseApproach {
    /// Create an unlinked approach. Non-finite distance/velocity collapse
    /// to 0.0, matching the loader's defaulting rule for bad numerics.
    pub fn new(
        designation: impl Into<String>,
        time: NaiveDateTime,
        distance: f64,
        velocity: f64,
    ) -> Self {
        Self {
            designation: designation.into(),
            time,
            distance: if distance.is_finite() { distance } else { 0.0 },
            velocity: if velocity.is_finite() { velocity } else { 0.0 },
            neo: None,
        }
    }

    /// Approach time as `YYYY-MM-DD HH:MM`, seconds omitted.
    pub fn time_str(&self) -> String {
        self.time.format(TIME_DISPLAY_FORMAT).to_string()
    }

    /// One-line human-readable summary, given the linked NEO.
    pub fn summary(&self, neo: &NearEarthObject) -> String {
        format!(
            "On {}, {} approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.time_str(),
            neo.fullname(),
            self.distance,
            self.velocity
        )
    }
}
