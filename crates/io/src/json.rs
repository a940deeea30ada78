// Close-approach JSON loader and JSON export

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use neoscan_engine::neo::{parse_approach_time, CloseApproach, NearEarthObject};

use crate::DataError;

/// Field names the close-approach source must declare in `fields`.
pub const REQUIRED_FIELDS: [&str; 4] = ["des", "cd", "dist", "v_rel"];

/// Read close approaches from a `{ "fields": [...], "data": [[...], ...] }`
/// document (NASA JPL close-approach format).
///
/// Any required field name absent from `fields` fails the load. Within a
/// row, a missing or unparseable `dist`/`v_rel` defaults to 0.0; an
/// unparseable `cd` is fatal, since an approach without a time cannot be
/// filtered or exported.
pub fn load_approaches(path: &Path) -> Result<Vec<CloseApproach>, DataError> {
    let content = std::fs::read_to_string(path).map_err(|e| DataError::Io(e.to_string()))?;
    let document: Value =
        serde_json::from_str(&content).map_err(|e| DataError::Parse(e.to_string()))?;

    let fields: Vec<&str> = document
        .get("fields")
        .and_then(Value::as_array)
        .map(|a| a.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let position = |name: &str| fields.iter().position(|f| *f == name);
    let des_idx = position("des");
    let cd_idx = position("cd");
    let dist_idx = position("dist");
    let v_rel_idx = position("v_rel");

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .zip([des_idx, cd_idx, dist_idx, v_rel_idx])
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataError::MissingFields(missing));
    }
    // Guarded by the missing-fields check above.
    let (des_idx, cd_idx, dist_idx, v_rel_idx) = (
        des_idx.unwrap(),
        cd_idx.unwrap(),
        dist_idx.unwrap(),
        v_rel_idx.unwrap(),
    );

    let rows = document
        .get("data")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut approaches = Vec::with_capacity(rows.len());
    for (row, entry) in rows.iter().enumerate() {
        let cells = entry.as_array().ok_or_else(|| {
            DataError::Parse(format!("data row {} is not an array", row + 1))
        })?;

        let text = |i: usize| cells.get(i).and_then(Value::as_str).unwrap_or("");
        // Values arrive as strings in the JPL format, but tolerate raw numbers.
        let number = |i: usize| match cells.get(i) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        };

        let cd = text(cd_idx);
        let time = parse_approach_time(cd).map_err(|e| {
            DataError::Parse(format!("data row {}: bad cd {:?}: {e}", row + 1, cd))
        })?;

        approaches.push(CloseApproach::new(
            text(des_idx),
            time,
            number(dist_idx),
            number(v_rel_idx),
        ));
    }

    Ok(approaches)
}

// ── Export ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct NeoRecord {
    designation: String,
    name: String,
    /// `null` when unknown — JSON has no NaN.
    diameter_km: Option<f64>,
    potentially_hazardous: bool,
}

#[derive(Debug, Serialize)]
struct ApproachRecord {
    datetime_utc: String,
    distance_au: f64,
    velocity_km_s: f64,
    neo: NeoRecord,
}

/// Write close approaches (paired with their linked NEOs) as a
/// pretty-printed JSON array of objects.
pub fn write_json<'a, I>(results: I, path: &Path) -> Result<(), String>
where
    I: IntoIterator<Item = (&'a CloseApproach, &'a NearEarthObject)>,
{
    let records: Vec<ApproachRecord> = results
        .into_iter()
        .map(|(approach, neo)| ApproachRecord {
            datetime_utc: approach.time_str(),
            distance_au: approach.distance,
            velocity_km_s: approach.velocity,
            neo: NeoRecord {
                designation: neo.designation.clone(),
                name: neo.name.clone().unwrap_or_default(),
                diameter_km: neo.diameter,
                potentially_hazardous: neo.hazardous,
            },
        })
        .collect();

    let file = File::create(path).map_err(|e| e.to_string())?;
    serde_json::to_writer_pretty(BufWriter::new(file), &records).map_err(|e| e.to_string())?;
    Ok(())
}
