//! Query predicates over close approaches and their linked NEOs.
//!
//! A query is an ordered conjunction of independent [`Filter`]s. Each
//! predicate inspects one attribute of the approach or its NEO and never
//! mutates state. Absent optional attributes fail their predicate without
//! error: an unknown diameter fails both diameter bounds, an absent name
//! fails a name-equality filter.

use chrono::NaiveDate;

use crate::neo::{CloseApproach, NearEarthObject};

/// A single query predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Approach occurs on exactly this calendar date.
    Date(NaiveDate),
    /// Approach occurs on or after this date.
    StartDate(NaiveDate),
    /// Approach occurs on or before this date.
    EndDate(NaiveDate),
    /// Approach distance >= this many au.
    MinDistance(f64),
    /// Approach distance <= this many au.
    MaxDistance(f64),
    /// Relative velocity >= this many km/s.
    MinVelocity(f64),
    /// Relative velocity <= this many km/s.
    MaxVelocity(f64),
    /// NEO diameter >= this many km. Unknown diameter never matches.
    MinDiameter(f64),
    /// NEO diameter <= this many km. Unknown diameter never matches.
    MaxDiameter(f64),
    /// NEO hazard flag equals this value.
    Hazardous(bool),
    /// NEO primary designation equals this string (case-sensitive).
    Designation(String),
    /// NEO name equals this string. Unnamed NEOs never match.
    Name(String),
}

impl Filter {
    /// Does `approach`, linked to `neo`, satisfy this predicate?
    pub fn matches(&self, approach: &CloseApproach, neo: &NearEarthObject) -> bool {
        match self {
            Filter::Date(d) => approach.time.date() == *d,
            Filter::StartDate(d) => approach.time.date() >= *d,
            Filter::EndDate(d) => approach.time.date() <= *d,
            Filter::MinDistance(x) => approach.distance >= *x,
            Filter::MaxDistance(x) => approach.distance <= *x,
            Filter::MinVelocity(x) => approach.velocity >= *x,
            Filter::MaxVelocity(x) => approach.velocity <= *x,
            Filter::MinDiameter(x) => neo.diameter.is_some_and(|d| d >= *x),
            Filter::MaxDiameter(x) => neo.diameter.is_some_and(|d| d <= *x),
            Filter::Hazardous(h) => neo.hazardous == *h,
            Filter::Designation(des) => neo.designation == *des,
            Filter::Name(name) => neo.name.as_deref() == Some(name.as_str()),
        }
    }
}

/// Query criteria as supplied by the user, one optional field per knob.
///
/// `build` turns the supplied criteria into the filter conjunction the
/// database scans with. Unset criteria contribute no filter.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub min_distance: Option<f64>,
    pub max_distance: Option<f64>,
    pub min_velocity: Option<f64>,
    pub max_velocity: Option<f64>,
    pub min_diameter: Option<f64>,
    pub max_diameter: Option<f64>,
    pub hazardous: Option<bool>,
    pub designation: Option<String>,
    pub name: Option<String>,
}

impl QueryOptions {
    /// Assemble the filter conjunction, one filter per supplied criterion.
    pub fn build(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        if let Some(d) = self.date {
            filters.push(Filter::Date(d));
        }
        if let Some(d) = self.start_date {
            filters.push(Filter::StartDate(d));
        }
        if let Some(d) = self.end_date {
            filters.push(Filter::EndDate(d));
        }
        if let Some(x) = self.min_distance {
            filters.push(Filter::MinDistance(x));
        }
        if let Some(x) = self.max_distance {
            filters.push(Filter::MaxDistance(x));
        }
        if let Some(x) = self.min_velocity {
            filters.push(Filter::MinVelocity(x));
        }
        if let Some(x) = self.max_velocity {
            filters.push(Filter::MaxVelocity(x));
        }
        if let Some(x) = self.min_diameter {
            filters.push(Filter::MinDiameter(x));
        }
        if let Some(x) = self.max_diameter {
            filters.push(Filter::MaxDiameter(x));
        }
        if let Some(h) = self.hazardous {
            filters.push(Filter::Hazardous(h));
        }
        if let Some(des) = &self.designation {
            filters.push(Filter::Designation(des.clone()));
        }
        if let Some(name) = &self.name {
            filters.push(Filter::Name(name.clone()));
        }
        filters
    }
}
