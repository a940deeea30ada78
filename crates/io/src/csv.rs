// NEO CSV loader and close-approach CSV export

use std::path::Path;

use neoscan_engine::neo::{CloseApproach, NearEarthObject};

use crate::DataError;

/// Fixed export header. Column order is part of the output contract.
pub const EXPORT_FIELDS: [&str; 7] = [
    "datetime_utc",
    "distance_au",
    "velocity_km_s",
    "designation",
    "name",
    "diameter_km",
    "potentially_hazardous",
];

/// Read near-Earth objects from a header-keyed CSV file.
///
/// Required column: `pdes` (primary designation). Optional columns:
/// `name`, `diameter` (km), `pha` (`Y` = hazardous, anything else not).
/// Empty name and empty/unparseable diameter load as unknown; a row with
/// an empty designation is malformed and fails the load.
pub fn load_neos(path: &Path) -> Result<Vec<NearEarthObject>, DataError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| DataError::Io(e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| DataError::Parse(e.to_string()))?
        .clone();
    let col = |name: &str| headers.iter().position(|h| h == name);

    let pdes_idx = col("pdes").ok_or_else(|| DataError::MissingFields(vec!["pdes".to_string()]))?;
    let name_idx = col("name");
    let diameter_idx = col("diameter");
    let pha_idx = col("pha");

    let mut neos = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|e| DataError::Parse(format!("row {}: {e}", row + 1)))?;

        let designation = record.get(pdes_idx).unwrap_or("").trim();
        if designation.is_empty() {
            return Err(DataError::Parse(format!("row {}: empty pdes", row + 1)));
        }

        let name = name_idx
            .and_then(|i| record.get(i))
            .map(str::to_string);
        let diameter = diameter_idx
            .and_then(|i| record.get(i))
            .and_then(|s| s.trim().parse::<f64>().ok());
        let hazardous = pha_idx.and_then(|i| record.get(i)) == Some("Y");

        neos.push(NearEarthObject::new(designation, name, diameter, hazardous));
    }

    Ok(neos)
}

/// Write close approaches (paired with their linked NEOs) as CSV.
///
/// `name` is the empty string for unnamed NEOs, `diameter_km` the empty
/// string when unknown, and `potentially_hazardous` the literal `True` or
/// `False`.
pub fn write_csv<'a, I>(results: I, path: &Path) -> Result<(), String>
where
    I: IntoIterator<Item = (&'a CloseApproach, &'a NearEarthObject)>,
{
    let mut writer = csv::Writer::from_path(path).map_err(|e| e.to_string())?;
    writer.write_record(EXPORT_FIELDS).map_err(|e| e.to_string())?;

    for (approach, neo) in results {
        let record = [
            approach.time_str(),
            approach.distance.to_string(),
            approach.velocity.to_string(),
            neo.designation.clone(),
            neo.name.clone().unwrap_or_default(),
            neo.diameter.map(|d| d.to_string()).unwrap_or_default(),
            if neo.hazardous { "True" } else { "False" }.to_string(),
        ];
        writer.write_record(&record).map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    use neoscan_engine::neo::parse_approach_time;

    #[test]
    fn test_load_neos_normalizes_blanks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("neos.csv");
        fs::write(
            &path,
            "pdes,name,diameter,pha\n433,Eros,16.84,N\n2025AB,,,Y\n",
        )
        .unwrap();

        let neos = load_neos(&path).unwrap();
        assert_eq!(neos.len(), 2);

        assert_eq!(neos[0].designation, "433");
        assert_eq!(neos[0].name.as_deref(), Some("Eros"));
        assert_eq!(neos[0].diameter, Some(16.84));
        assert!(!neos[0].hazardous);

        assert_eq!(neos[1].designation, "2025AB");
        assert_eq!(neos[1].name, None);
        assert_eq!(neos[1].diameter, None);
        assert!(neos[1].hazardous);
    }

    #[test]
    fn test_load_neos_unparseable_diameter_is_unknown() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("neos.csv");
        fs::write(&path, "pdes,name,diameter,pha\n1,,garbage,N\n").unwrap();

        let neos = load_neos(&path).unwrap();
        assert_eq!(neos[0].diameter, None);
    }

    #[test]
    fn test_load_neos_missing_pdes_column_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("neos.csv");
        fs::write(&path, "name,diameter,pha\nEros,16.84,N\n").unwrap();

        assert_eq!(
            load_neos(&path),
            Err(DataError::MissingFields(vec!["pdes".to_string()]))
        );
    }

    #[test]
    fn test_load_neos_designations_unique_and_non_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("neos.csv");
        fs::write(&path, "pdes,name,diameter,pha\n433,Eros,16.84,N\n719,Albert,,N\n").unwrap();

        let neos = load_neos(&path).unwrap();
        let mut seen = std::collections::HashSet::new();
        for neo in &neos {
            assert!(!neo.designation.is_empty());
            assert!(seen.insert(neo.designation.clone()), "duplicate designation");
        }
    }

    #[test]
    fn test_lowercase_pha_is_not_hazardous() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("neos.csv");
        fs::write(&path, "pdes,name,diameter,pha\n1,,,y\n").unwrap();

        let neos = load_neos(&path).unwrap();
        assert!(!neos[0].hazardous);
    }

    #[test]
    fn test_write_csv_header_and_blank_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let neo = NearEarthObject::new("2025AB", None, None, true);
        let approach = CloseApproach::new(
            "2025AB",
            parse_approach_time("2025-Jan-03 14:30").unwrap(),
            0.05,
            12.3,
        );

        write_csv([(&approach, &neo)], &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("datetime_utc,distance_au,velocity_km_s,designation,name,diameter_km,potentially_hazardous")
        );
        assert_eq!(lines.next(), Some("2025-01-03 14:30,0.05,12.3,2025AB,,,True"));
    }

    #[test]
    fn test_write_csv_named_neo_with_diameter() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let neo = NearEarthObject::new("433", Some("Eros".to_string()), Some(16.84), false);
        let approach = CloseApproach::new(
            "433",
            parse_approach_time("2020-Jan-01 00:00").unwrap(),
            1.5,
            8.0,
        );

        write_csv([(&approach, &neo)], &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("2020-01-01 00:00,1.5,8,433,Eros,16.84,False"));
    }
}
