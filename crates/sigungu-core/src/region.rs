//! District code → province resolution.
//!
//! A sigungu code is a numeric string whose first two digits name the
//! province-level division (sido) that owns it. One district breaks the rule:
//! 군위군 (`37310…`) moved from 경상북도 to 대구광역시 in 2023 but kept its
//! old code, so every code starting with [`REASSIGNED_TO_DAEGU`] resolves to
//! [`Province::Daegu`].
//!
//! The province table below is the only copy in the crate; every lookup goes
//! through [`Province::from_code`].

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Code prefix of the district reassigned from 경상북도 to 대구광역시.
pub const REASSIGNED_TO_DAEGU: &str = "37310";

/// One of the 17 province-level divisions known to the dataset.
///
/// Codes in the `4x` range used by some editions of the standard are not
/// part of this table and resolve to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Province {
    Seoul,
    Busan,
    Daegu,
    Incheon,
    Gwangju,
    Daejeon,
    Ulsan,
    Sejong,
    Gyeonggi,
    Gangwon,
    Chungbuk,
    Chungnam,
    Jeonbuk,
    Jeonnam,
    Gyeongbuk,
    Gyeongnam,
    Jeju,
}

const PROVINCES: [(Province, &str, &str); 17] = [
    (Province::Seoul, "11", "서울특별시"),
    (Province::Busan, "21", "부산광역시"),
    (Province::Daegu, "22", "대구광역시"),
    (Province::Incheon, "23", "인천광역시"),
    (Province::Gwangju, "24", "광주광역시"),
    (Province::Daejeon, "25", "대전광역시"),
    (Province::Ulsan, "26", "울산광역시"),
    (Province::Sejong, "29", "세종특별자치시"),
    (Province::Gyeonggi, "31", "경기도"),
    (Province::Gangwon, "32", "강원도"),
    (Province::Chungbuk, "33", "충청북도"),
    (Province::Chungnam, "34", "충청남도"),
    (Province::Jeonbuk, "35", "전라북도"),
    (Province::Jeonnam, "36", "전라남도"),
    (Province::Gyeongbuk, "37", "경상북도"),
    (Province::Gyeongnam, "38", "경상남도"),
    (Province::Jeju, "39", "제주특별자치도"),
];

impl Province {
    /// Look up a province by its exact two-character code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        PROVINCES
            .iter()
            .find(|(_, c, _)| *c == code)
            .map(|(province, _, _)| *province)
    }

    /// All provinces in code order.
    pub fn all() -> impl Iterator<Item = Self> {
        PROVINCES.iter().map(|(province, _, _)| *province)
    }

    /// Two-character province code, e.g. `"22"`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        PROVINCES[self as usize].1
    }

    /// Official display name, e.g. `"대구광역시"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        PROVINCES[self as usize].2
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing a [`Province`] from text fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown province '{0}'")]
pub struct UnknownProvince(pub String);

impl FromStr for Province {
    type Err = UnknownProvince;

    /// Accepts a two-character code (`"22"`) or an official name (`"대구광역시"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::from_code(trimmed)
            .or_else(|| Self::all().find(|p| p.name() == trimmed))
            .ok_or_else(|| UnknownProvince(s.to_string()))
    }
}

impl Serialize for Province {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Province {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A district code as passed to the resolver functions.
///
/// Codes are text, but callers holding a numeric code can pass it directly;
/// it is rendered in decimal before the prefix is taken.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DistrictCode<'a>(Cow<'a, str>);

impl DistrictCode<'_> {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> From<&'a str> for DistrictCode<'a> {
    fn from(code: &'a str) -> Self {
        Self(Cow::Borrowed(code))
    }
}

impl<'a> From<&'a String> for DistrictCode<'a> {
    fn from(code: &'a String) -> Self {
        Self(Cow::Borrowed(code.as_str()))
    }
}

impl From<String> for DistrictCode<'_> {
    fn from(code: String) -> Self {
        Self(Cow::Owned(code))
    }
}

impl From<u64> for DistrictCode<'_> {
    fn from(code: u64) -> Self {
        Self(Cow::Owned(code.to_string()))
    }
}

impl From<i64> for DistrictCode<'_> {
    fn from(code: i64) -> Self {
        Self(Cow::Owned(code.to_string()))
    }
}

impl fmt::Display for DistrictCode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve the province that owns a district code.
///
/// Takes the first two characters of `code`, except that codes starting with
/// [`REASSIGNED_TO_DAEGU`] always resolve to 대구광역시.
#[must_use]
pub fn province_code<'a>(code: impl Into<DistrictCode<'a>>) -> Option<Province> {
    let code = code.into();
    let code = code.as_str();
    if code.starts_with(REASSIGNED_TO_DAEGU) {
        return Some(Province::Daegu);
    }
    let prefix_end = code.char_indices().nth(2).map_or(code.len(), |(i, _)| i);
    Province::from_code(&code[..prefix_end])
}

/// Official name of the province that owns a district code.
#[must_use]
pub fn province_name<'a>(code: impl Into<DistrictCode<'a>>) -> Option<&'static str> {
    province_code(code).map(Province::name)
}

/// Canonical display name: `"{province} {district}"`.
///
/// An empty code or an unknown province leaves `district_name` unchanged.
#[must_use]
pub fn display_name<'a>(code: impl Into<DistrictCode<'a>>, district_name: &str) -> String {
    let code = code.into();
    if code.is_empty() {
        return district_name.to_string();
    }
    match province_name(code) {
        Some(province) => format!("{province} {district_name}"),
        None => district_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_discriminant() {
        for (idx, (province, code, name)) in PROVINCES.iter().enumerate() {
            assert_eq!(*province as usize, idx);
            assert_eq!(province.code(), *code);
            assert_eq!(province.name(), *name);
        }
    }

    #[test]
    fn every_listed_prefix_resolves() {
        for province in Province::all() {
            let code = format!("{}110", province.code());
            assert_eq!(province_code(&code), Some(province));
            assert!(province_name(&code).is_some());
        }
        assert_eq!(Province::all().count(), 17);
    }

    #[test]
    fn unlisted_prefixes_are_unknown() {
        for prefix in ["41", "42", "48", "50", "00", "99", "27", "30"] {
            assert_eq!(province_code(&format!("{prefix}110")), None, "{prefix}");
        }
    }

    #[test]
    fn gunwi_is_reassigned_to_daegu() {
        assert_eq!(province_code("37310"), Some(Province::Daegu));
        assert_eq!(province_code("3731012"), Some(Province::Daegu));
        assert_eq!(province_code("37320"), Some(Province::Gyeongbuk));
        assert_eq!(display_name("37310XX", "군위군"), "대구광역시 군위군");
    }

    #[test]
    fn display_name_prefixes_province() {
        assert_eq!(display_name("11010", "종로구"), "서울특별시 종로구");
        assert_eq!(display_name("39010", "제주시"), "제주특별자치도 제주시");
    }

    #[test]
    fn display_name_degrades_to_district_name() {
        assert_eq!(display_name("", "어딘가"), "어딘가");
        assert_eq!(display_name("41110", "수원시"), "수원시");
        assert_eq!(display_name("1", "짧은코드"), "짧은코드");
    }

    #[test]
    fn numeric_codes_resolve_like_text() {
        assert_eq!(display_name(37_310_u64, "군위군"), "대구광역시 군위군");
        assert_eq!(province_code(11_010_u64), Some(Province::Seoul));
        assert_eq!(province_name(39_020_i64), Some("제주특별자치도"));
        assert_eq!(province_code(41_110_u64), None);
        assert_eq!(DistrictCode::from(22_010_i64).as_str(), "22010");
        assert_eq!(province_code(String::from("3731099")), Some(Province::Daegu));
    }

    #[test]
    fn short_and_non_ascii_codes_do_not_panic() {
        assert_eq!(province_code(""), None);
        assert_eq!(province_code("1"), None);
        assert_eq!(province_code("서울"), None);
        assert_eq!(province_code("1서"), None);
    }

    #[test]
    fn parses_code_or_name() {
        assert_eq!("22".parse::<Province>(), Ok(Province::Daegu));
        assert_eq!("경상북도".parse::<Province>(), Ok(Province::Gyeongbuk));
        assert!("41".parse::<Province>().is_err());
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&Province::Sejong).expect("serialize");
        assert_eq!(json, "\"29\"");
        let back: Province = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, Province::Sejong);
    }
}
