//! Default option lists for the skill and qualification selectors.

use crate::models::OptionRecord;

pub const SKILL_OPTIONS: &[(&str, &str)] = &[
    ("JavaScript", "JavaScript"),
    ("TypeScript", "TypeScript"),
    ("React", "React"),
    ("Node.js", "Node.js"),
    ("Python", "Python"),
    ("Java", "Java"),
    ("Go", "Go"),
    ("Rust", "Rust"),
    ("SQL", "SQL"),
    ("MongoDB", "MongoDB"),
    ("AWS", "AWS"),
    ("Docker", "Docker"),
];

pub const QUALIFICATION_OPTIONS: &[(&str, &str)] = &[
    ("High School", "High School"),
    ("Diploma", "Diploma"),
    ("B.Tech", "B.Tech"),
    ("B.Sc", "B.Sc"),
    ("BCA", "BCA"),
    ("M.Tech", "M.Tech"),
    ("M.Sc", "M.Sc"),
    ("MCA", "MCA"),
    ("MBA", "MBA"),
    ("PhD", "PhD"),
];

fn records(options: &[(&str, &str)]) -> Vec<OptionRecord> {
    options
        .iter()
        .map(|(value, label)| OptionRecord::new(*value, *label))
        .collect()
}

pub fn skill_options() -> Vec<OptionRecord> {
    records(SKILL_OPTIONS)
}

pub fn qualification_options() -> Vec<OptionRecord> {
    records(QUALIFICATION_OPTIONS)
}

/// Skills are creatable: unknown values become custom entries.
pub fn skill(value: &str) -> OptionRecord {
    find(SKILL_OPTIONS, value).unwrap_or_else(|| OptionRecord::custom(value))
}

/// Qualifications must come from the list.
pub fn qualification(value: &str) -> Option<OptionRecord> {
    find(QUALIFICATION_OPTIONS, value)
}

fn find(options: &[(&str, &str)], value: &str) -> Option<OptionRecord> {
    options
        .iter()
        .find(|(v, _)| v.eq_ignore_ascii_case(value))
        .map(|(v, l)| OptionRecord::new(*v, *l))
}
