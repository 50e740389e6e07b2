//! Raw record → output row normalization

use std::collections::HashSet;

use super::matcher::mentions_math_31a;
use super::types::{trimmed, NormalizedRow, RawCourseRecord};

/// Deduplicate, re-check and flatten raw records into sorted output rows.
///
/// The key is claimed before the description is checked, so a later record
/// with the same (subject code, title) is dropped even if the first one
/// did not match. Search results are not filtered upstream; the matcher
/// check here is what guarantees every row mentions Mathematics 31A.
pub fn normalize(records: &[RawCourseRecord]) -> Vec<NormalizedRow> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut rows = Vec::new();

    for record in records {
        if !seen.insert(record.dedup_key()) {
            continue;
        }

        let description = record.description().trim();
        if !mentions_math_31a(description) {
            continue;
        }

        rows.push(NormalizedRow {
            subject_area: trimmed(&record.subj_area_nm),
            course_name: trimmed(&record.course_title),
            units: trimmed(&record.unt_rng),
            level: trimmed(&record.crs_career_lvl_nm),
            description: description.to_string(),
        });
    }

    rows.sort_by(|a, b| {
        (a.subject_area.as_str(), a.course_name.as_str())
            .cmp(&(b.subject_area.as_str(), b.course_name.as_str()))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, name: &str, title: &str, desc: &str) -> RawCourseRecord {
        RawCourseRecord {
            subj_area_cd: Some(code.to_string()),
            subj_area_nm: Some(name.to_string()),
            course_title: Some(title.to_string()),
            unt_rng: Some("4.0".to_string()),
            crs_career_lvl_nm: Some("Lower Division Courses".to_string()),
            crs_desc: Some(desc.to_string()),
        }
    }

    #[test]
    fn test_sorted_by_subject_then_course() {
        let records = vec![
            record("MATH", "Mathematics (MATH)", "31B. Integration", "Requisite: Mathematics 31A."),
            record("CHEM", "Chemistry (CHEM)", "20A. Chemical Structure", "Requisite: Math 31A."),
            record("MATH", "Mathematics (MATH)", "32A. Calculus of Several Variables", "Requisite: Mathematics 31A."),
        ];
        let rows = normalize(&records);
        let keys: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.subject_area.as_str(), r.course_name.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("Chemistry (CHEM)", "20A. Chemical Structure"),
                ("Mathematics (MATH)", "31B. Integration"),
                ("Mathematics (MATH)", "32A. Calculus of Several Variables"),
            ]
        );
    }

    #[test]
    fn test_first_occurrence_wins() {
        let records = vec![
            record("PHYSICS", "Physics (PHYSICS)", "1A. Mechanics", "Requisite: Mathematics 31A."),
            record("PHYSICS ", "Physics (PHYSICS)", " 1A. Mechanics", "Corequisite: Math 31A, 31B."),
        ];
        let rows = normalize(&records);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "Requisite: Mathematics 31A.");
    }

    // The key ignores the description: a non-matching first record hides a
    // matching duplicate that follows it.
    #[test]
    fn test_duplicate_after_non_matching_first_is_dropped() {
        let records = vec![
            record("ECON", "Economics (ECON)", "11. Microeconomic Theory", "Requisite: course 1."),
            record("ECON", "Economics (ECON)", "11. Microeconomic Theory", "Requisite: Mathematics 31A."),
        ];
        assert!(normalize(&records).is_empty());
    }

    #[test]
    fn test_non_matching_records_are_dropped() {
        let records = vec![
            record("MATH", "Mathematics (MATH)", "131A. Analysis", "Requisite: Mathematics 33A."),
            record("MATH", "Mathematics (MATH)", "170A. Probability", "Requisite: Mathematics 131A."),
        ];
        assert!(normalize(&records).is_empty());
    }

    #[test]
    fn test_missing_fields_become_empty_and_text_is_trimmed() {
        let records = vec![RawCourseRecord {
            subj_area_cd: Some("LIFESCI".to_string()),
            course_title: Some("  30A. Mathematics for Life Scientists ".to_string()),
            crs_desc: Some("  Requisite: Mathematics 31A.\n".to_string()),
            ..Default::default()
        }];
        let rows = normalize(&records);
        assert_eq!(
            rows,
            vec![NormalizedRow {
                subject_area: String::new(),
                course_name: "30A. Mathematics for Life Scientists".to_string(),
                units: String::new(),
                level: String::new(),
                description: "Requisite: Mathematics 31A.".to_string(),
            }]
        );
    }

    #[test]
    fn test_idempotent() {
        let records = vec![
            record("STATS", "Statistics (STATS)", "20. Introduction", "Requisite: MATH 31A."),
            record("CHEM", "Chemistry (CHEM)", "14A. Atomic", "Requisite: Math. 31A."),
            record("STATS", "Statistics (STATS)", "20. Introduction", "Requisite: MATH 31A."),
        ];
        assert_eq!(normalize(&records), normalize(&records));
    }
}
