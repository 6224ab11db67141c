//! Course mapping table.
//!
//! Associates a course code with the group it is listed under on the
//! portal's course page and its display names. Built once, never mutated.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::result::{HarvesterError, HarvesterResult};

/// One course on the portal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseEntry {
    /// Course code as printed on the course card (e.g. "LA103")
    pub code: String,
    /// Group header the card is listed under
    pub group: String,
    /// Short display name
    pub name: String,
    /// Long display name
    pub full_name: String,
}

impl CourseEntry {
    /// Create an entry whose display names equal its code
    #[must_use]
    pub fn new(code: impl Into<String>, group: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            name: code.clone(),
            full_name: code.clone(),
            code,
            group: group.into(),
        }
    }
}

const EID: &str = "Entrepreneurship, Innovation and Design";
const MP3: &str = "Management Project - III";
const MS: &str = "Management Strategy";
const GD: &str = "Global Dynamics";
const MR: &str = "Market Research";

/// Cohort 1 course list as (code, group)
const BUILTIN: &[(&str, &str)] = &[
    ("CRBL101", EID),
    ("FIFI103", EID),
    ("FIFI104", EID),
    ("LEIP101", EID),
    ("PRTC204", EID),
    ("CAP023", MP3),
    ("CAP024", MP3),
    ("CAP025", MP3),
    ("CAP301", MP3),
    ("COMM203", MP3),
    ("STC101", MP3),
    ("MAST204", MS),
    ("MAST205", MS),
    ("LA103", GD),
    ("MAST103", GD),
    ("SAMA103", MR),
];

/// Immutable course table keyed by code
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseCatalog {
    courses: HashMap<String, CourseEntry>,
}

impl CourseCatalog {
    /// The built-in cohort table
    #[must_use]
    pub fn builtin() -> Self {
        let courses = BUILTIN
            .iter()
            .map(|(code, group)| ((*code).to_string(), CourseEntry::new(*code, *group)))
            .collect();
        Self { courses }
    }

    /// Build a table, rejecting repeated codes
    pub fn from_entries(entries: impl IntoIterator<Item = CourseEntry>) -> HarvesterResult<Self> {
        let mut courses = HashMap::new();
        for entry in entries {
            if courses.contains_key(&entry.code) {
                return Err(HarvesterError::DuplicateCourse { code: entry.code });
            }
            let _ = courses.insert(entry.code.clone(), entry);
        }
        Ok(Self { courses })
    }

    /// Build a table from a JSON array of entries
    pub fn from_json(json: &str) -> HarvesterResult<Self> {
        let entries: Vec<CourseEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Entry for `code`, if present
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&CourseEntry> {
        self.courses.get(code)
    }

    /// Entry for `code`
    ///
    /// # Errors
    ///
    /// [`HarvesterError::CourseNotFound`] when the code is not in the table.
    pub fn lookup(&self, code: &str) -> HarvesterResult<&CourseEntry> {
        self.get(code)
            .ok_or_else(|| HarvesterError::course_not_found(code))
    }

    /// Whether `code` is in the table
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.courses.contains_key(code)
    }

    /// Number of courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// All entries sorted by code
    #[must_use]
    pub fn entries(&self) -> Vec<&CourseEntry> {
        let mut entries: Vec<_> = self.courses.values().collect();
        entries.sort_by(|a, b| a.code.cmp(&b.code));
        entries
    }

    /// Distinct group names, sorted
    #[must_use]
    pub fn groups(&self) -> Vec<&str> {
        self.courses
            .values()
            .map(|entry| entry.group.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Entries listed under `group`, sorted by code
    #[must_use]
    pub fn in_group(&self, group: &str) -> Vec<&CourseEntry> {
        let mut entries: Vec<_> = self
            .courses
            .values()
            .filter(|entry| entry.group == group)
            .collect();
        entries.sort_by(|a, b| a.code.cmp(&b.code));
        entries
    }
}

/// Course codes shown by default when no selection is given.
///
/// Empty for the current cohort: every course must be selected explicitly.
#[must_use]
pub fn default_visible() -> BTreeSet<String> {
    BTreeSet::new()
}
