//! Course catalog data types

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One course record as returned by the catalog API.
///
/// The API has no stable schema, so only the keys we read are modeled and
/// every value is coerced to a string on the way in. `None` means the key
/// was absent or `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCourseRecord {
    /// Subject area code, e.g. "CHEM"
    #[serde(default, deserialize_with = "lenient_string")]
    pub subj_area_cd: Option<String>,
    /// Subject area display name, e.g. "Chemistry (CHEM)"
    #[serde(default, deserialize_with = "lenient_string")]
    pub subj_area_nm: Option<String>,
    /// Course title, e.g. "20A. Chemical Structure"
    #[serde(default, deserialize_with = "lenient_string")]
    pub course_title: Option<String>,
    /// Unit range, e.g. "4.0" or "2.0 to 4.0"
    #[serde(default, deserialize_with = "lenient_string")]
    pub unt_rng: Option<String>,
    /// Career level, e.g. "Lower Division Courses"
    #[serde(default, deserialize_with = "lenient_string")]
    pub crs_career_lvl_nm: Option<String>,
    /// Full description text
    #[serde(default, deserialize_with = "lenient_string")]
    pub crs_desc: Option<String>,
}

impl RawCourseRecord {
    /// Deduplication key: trimmed (subject code, course title).
    pub fn dedup_key(&self) -> (String, String) {
        (trimmed(&self.subj_area_cd), trimmed(&self.course_title))
    }

    pub fn description(&self) -> &str {
        self.crs_desc.as_deref().unwrap_or("")
    }
}

/// One entry of the subject area listing
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SubjectArea {
    #[serde(default, deserialize_with = "lenient_string")]
    pub subj_area_cd: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub display_value: Option<String>,
}

impl SubjectArea {
    pub fn code(&self) -> String {
        trimmed(&self.subj_area_cd)
    }

    pub fn name(&self) -> String {
        trimmed(&self.display_value)
    }
}

/// Output row. Field order is the column order of both exports.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub subject_area: String,
    pub course_name: String,
    pub units: String,
    pub level: String,
    pub description: String,
}

impl NormalizedRow {
    pub const HEADERS: [&'static str; 5] =
        ["subject_area", "course_name", "units", "level", "description"];

    pub fn fields(&self) -> [&str; 5] {
        [
            self.subject_area.as_str(),
            self.course_name.as_str(),
            self.units.as_str(),
            self.level.as_str(),
            self.description.as_str(),
        ]
    }
}

pub(crate) fn trimmed(value: &Option<String>) -> String {
    value.as_deref().unwrap_or("").trim().to_string()
}

/// Accept strings, numbers and booleans; map `null` and anything
/// structured to `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}
