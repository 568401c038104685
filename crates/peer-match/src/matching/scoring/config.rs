use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Table of majors considered adjacent to each other.
///
/// Lookups are exact and case-sensitive; a pair is related when either side lists the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelatedMajors {
    table: BTreeMap<String, Vec<String>>,
}

impl RelatedMajors {
    pub fn new(table: BTreeMap<String, Vec<String>>) -> Self {
        Self { table }
    }

    pub fn empty() -> Self {
        Self::new(BTreeMap::new())
    }

    pub fn insert<I, S>(&mut self, major: impl Into<String>, related: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table
            .entry(major.into())
            .or_default()
            .extend(related.into_iter().map(Into::into));
    }

    pub fn related_to(&self, major: &str) -> &[String] {
        self.table.get(major).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn relates(&self, left: &str, right: &str) -> bool {
        self.lists(left, right) || self.lists(right, left)
    }

    fn lists(&self, major: &str, candidate: &str) -> bool {
        self.related_to(major).iter().any(|related| related == candidate)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for RelatedMajors {
    fn default() -> Self {
        let mut majors = Self::empty();
        majors.insert(
            "Computer Science",
            [
                "Information Systems",
                "Information Technology",
                "Software Engineering",
            ],
        );
        majors.insert(
            "Business Administration",
            ["Management", "Accounting", "Finance"],
        );
        majors.insert(
            "Mechanical Engineering",
            ["Industrial Engineering", "Electrical Engineering"],
        );
        majors
    }
}

const DEFAULT_BASIC_WEIGHT: f64 = 0.40;
const DEFAULT_INTEREST_WEIGHT: f64 = 0.35;
const DEFAULT_DIVERSITY_WEIGHT: f64 = 0.25;

/// Share of each sub-score in the final compatibility score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreWeights {
    pub basic: f64,
    pub interest: f64,
    pub diversity: f64,
}

impl ScoreWeights {
    /// Replace any negative or non-finite weight with its default.
    pub fn sanitized(self) -> Self {
        fn pick(value: f64, fallback: f64) -> f64 {
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                fallback
            }
        }

        Self {
            basic: pick(self.basic, DEFAULT_BASIC_WEIGHT),
            interest: pick(self.interest, DEFAULT_INTEREST_WEIGHT),
            diversity: pick(self.diversity, DEFAULT_DIVERSITY_WEIGHT),
        }
    }

    pub fn sum(&self) -> f64 {
        self.basic + self.interest + self.diversity
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            basic: DEFAULT_BASIC_WEIGHT,
            interest: DEFAULT_INTEREST_WEIGHT,
            diversity: DEFAULT_DIVERSITY_WEIGHT,
        }
    }
}

/// Scoring rubric handed to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    #[serde(default)]
    pub related_majors: RelatedMajors,
    #[serde(default)]
    pub weights: ScoreWeights,
}
