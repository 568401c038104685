use std::fmt;

use serde::{Deserialize, Serialize};

use super::availability::Availability;

/// Identifier wrapper for student profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub String);

impl ProfileId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account role; only students take part in peer matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Student,
    Mentor,
    Admin,
}

/// Weight a student attaches to one of their own career interests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const fn weight(self) -> u32 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerInterest {
    pub industry: String,
    pub role: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    pub skill_id: String,
    #[serde(default)]
    pub level: i32,
    #[serde(default)]
    pub target_level: i32,
}

/// Stored user row as handed over by the profile store.
///
/// `availability` keeps the raw encoded value; it is only interpreted when a [`Profile`] is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: ProfileId,
    pub name: String,
    pub role: UserRole,
    pub major: String,
    pub year: i32,
    #[serde(default)]
    pub availability: Option<serde_json::Value>,
    #[serde(default)]
    pub career_interests: Vec<CareerInterest>,
    #[serde(default)]
    pub skills: Vec<SkillEntry>,
}

impl StudentRecord {
    pub fn is_student(&self) -> bool {
        self.role == UserRole::Student
    }

    /// Scoring view of the record with availability decoded.
    pub fn profile(&self) -> Profile {
        Profile {
            id: self.id.clone(),
            major: self.major.clone(),
            year: self.year,
            availability: Availability::from_stored(&self.id, self.availability.as_ref()),
            career_interests: self.career_interests.clone(),
            skills: self.skills.clone(),
        }
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            major: self.major.clone(),
            year: self.year,
            career_interests: self.career_interests.clone(),
            skills: self.skills.clone(),
        }
    }
}

/// Read-only input to the scoring engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: ProfileId,
    pub major: String,
    pub year: i32,
    pub availability: Availability,
    pub career_interests: Vec<CareerInterest>,
    pub skills: Vec<SkillEntry>,
}

/// Public slice of a student shown next to a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: ProfileId,
    pub name: String,
    pub major: String,
    pub year: i32,
    pub career_interests: Vec<CareerInterest>,
    pub skills: Vec<SkillEntry>,
}
