//! District dataset ingestion.
//!
//! The dataset is a GeoJSON `FeatureCollection`; only `properties.code` and
//! `properties.name` matter here, geometry is ignored. Each feature is
//! validated and its code coerced to a string exactly once, at ingestion.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, FeatureField, Result};
use crate::region::{self, Province};

/// One administrative district from the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictFeature {
    pub code: String,
    pub name: String,
}

impl DistrictFeature {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Province owning this district, if its code is in the table.
    #[must_use]
    pub fn province(&self) -> Option<Province> {
        region::province_code(&self.code)
    }

    /// Canonical display name used as the visit-state key.
    #[must_use]
    pub fn display_name(&self) -> String {
        region::display_name(&self.code, &self.name)
    }
}

/// Coerce a JSON code value to its string form.
///
/// Strings pass through. Integral numbers (including `11010.0`) render
/// without a fraction. Other types, `null` included, are rejected.
#[must_use]
pub fn coerce_code(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else {
                n.as_f64().map(format_float_code)
            }
        }
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn format_float_code(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Ingested dataset, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureCollection {
    pub features: Vec<DistrictFeature>,
}

impl FeatureCollection {
    /// Parse a GeoJSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Dataset`] when the text is not JSON and
    /// [`Error::InvalidFeature`] when a feature lacks a usable code or name.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Read and parse a GeoJSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatasetMissing`] when the file does not exist, plus
    /// every error of [`FeatureCollection::from_json`].
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                Error::DatasetMissing {
                    path: path.to_path_buf(),
                }
            } else {
                Error::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let collection = Self::from_json(&text)?;
        debug!(
            path = %path.display(),
            districts = collection.len(),
            "loaded district dataset"
        );
        Ok(collection)
    }

    /// Validate an already-parsed GeoJSON value.
    ///
    /// A document without a `features` array is an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFeature`] for the first bad feature.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Some(raw) = value.get("features").and_then(Value::as_array) else {
            return Ok(Self::default());
        };

        let features = raw
            .iter()
            .enumerate()
            .map(|(index, feature)| ingest_feature(index, feature))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { features })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DistrictFeature> {
        self.features.iter()
    }
}

impl From<Vec<DistrictFeature>> for FeatureCollection {
    fn from(features: Vec<DistrictFeature>) -> Self {
        Self { features }
    }
}

fn ingest_feature(index: usize, feature: &Value) -> Result<DistrictFeature> {
    let properties = feature
        .get("properties")
        .filter(|p| p.is_object())
        .ok_or(Error::InvalidFeature {
            index,
            field: FeatureField::Properties,
        })?;

    // A null code is an empty code: the district keeps its bare name.
    let code = match properties.get("code") {
        Some(Value::Null) => Some(String::new()),
        Some(value) => coerce_code(value),
        None => None,
    }
    .ok_or(Error::InvalidFeature {
        index,
        field: FeatureField::Code,
    })?;

    let name = properties
        .get("name")
        .and_then(Value::as_str)
        .ok_or(Error::InvalidFeature {
            index,
            field: FeatureField::Name,
        })?;

    Ok(DistrictFeature::new(code, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_string_and_numeric_codes() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "code": "11010", "name": "종로구" }, "geometry": null },
                { "type": "Feature", "properties": { "code": 22010, "name": "중구" } },
                { "type": "Feature", "properties": { "code": 37310.0, "name": "군위군" } }
            ]
        });

        let collection = FeatureCollection::from_value(&doc).expect("valid dataset");
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.features[0].code, "11010");
        assert_eq!(collection.features[1].code, "22010");
        assert_eq!(collection.features[2].code, "37310");
        assert_eq!(collection.features[2].display_name(), "대구광역시 군위군");
    }

    #[test]
    fn missing_code_is_a_contract_violation() {
        let doc = json!({ "features": [
            { "properties": { "code": "11010", "name": "종로구" } },
            { "properties": { "name": "중구" } }
        ]});

        let err = FeatureCollection::from_value(&doc).expect_err("code is required");
        assert!(matches!(
            err,
            Error::InvalidFeature {
                index: 1,
                field: FeatureField::Code
            }
        ));
    }

    #[test]
    fn null_code_keeps_the_bare_name() {
        let collection = FeatureCollection::from_json(
            r#"{"features":[{"properties":{"code":null,"name":"군위군"}}]}"#,
        )
        .expect("null code is accepted");
        let feature = &collection.features[0];
        assert_eq!(feature.code, "");
        assert_eq!(feature.province(), None);
        assert_eq!(feature.display_name(), "군위군");
    }

    #[test]
    fn non_scalar_code_and_missing_name_are_rejected() {
        for code in [json!(true), json!(["37310"]), json!({ "v": 1 })] {
            let doc = json!({ "features": [ { "properties": { "code": code, "name": "x" } } ] });
            assert!(matches!(
                FeatureCollection::from_value(&doc),
                Err(Error::InvalidFeature { field: FeatureField::Code, .. })
            ));
        }

        let no_name = json!({ "features": [ { "properties": { "code": "11010" } } ] });
        assert!(matches!(
            FeatureCollection::from_value(&no_name),
            Err(Error::InvalidFeature { field: FeatureField::Name, .. })
        ));

        let no_props = json!({ "features": [ { "geometry": null } ] });
        assert!(matches!(
            FeatureCollection::from_value(&no_props),
            Err(Error::InvalidFeature { field: FeatureField::Properties, .. })
        ));
    }

    #[test]
    fn document_without_features_is_empty() {
        let collection = FeatureCollection::from_value(&json!({})).expect("empty");
        assert!(collection.is_empty());
    }

    #[test]
    fn invalid_json_maps_to_dataset_error() {
        let err = FeatureCollection::from_json("{not json").expect_err("parse error");
        assert!(matches!(err, Error::Dataset { .. }));
    }

    #[test]
    fn missing_file_maps_to_dataset_missing() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let err = FeatureCollection::from_path(&dir.path().join("sigungu.json"))
            .expect_err("missing file");
        assert!(matches!(err, Error::DatasetMissing { .. }));
    }

    #[test]
    fn unreadable_file_is_a_read_error() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let err = FeatureCollection::from_path(dir.path()).expect_err("directory");
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn coerce_code_rejects_non_scalar_values() {
        assert_eq!(coerce_code(&json!("37310")), Some("37310".to_string()));
        assert_eq!(coerce_code(&json!(11010)), Some("11010".to_string()));
        assert_eq!(coerce_code(&json!(true)), None);
        assert_eq!(coerce_code(&json!(["11"])), None);
    }
}
