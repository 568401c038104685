use std::collections::BTreeSet;

use super::super::domain::Profile;
use super::config::RelatedMajors;

pub(crate) const MAX_SUB_SCORE: f64 = 100.0;

const EXACT_MAJOR_POINTS: u32 = 30;
const RELATED_MAJOR_POINTS: u32 = 20;
const POINTS_PER_COMMON_SLOT: u32 = 5;
const MAX_AVAILABILITY_POINTS: u32 = 50;

const INDUSTRY_MATCH_POINTS: u32 = 40;
const ROLE_MATCH_POINTS: u32 = 30;
const FULL_MATCH_BONUS: u32 = 30;

const DIVERSITY_BASE: u32 = 50;
const DIFFERENT_MAJOR_BONUS: u32 = 20;
const DIFFERENT_YEAR_BONUS: u32 = 15;
const PARTIAL_SKILL_OVERLAP_BONUS: u32 = 15;

/// Raw sub-scores before rounding for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SubScores {
    pub basic: f64,
    pub interest: f64,
    pub diversity: f64,
}

pub(crate) fn score_pair(
    requester: &Profile,
    candidate: &Profile,
    related_majors: &RelatedMajors,
) -> SubScores {
    SubScores {
        basic: f64::from(basic_compatibility(requester, candidate, related_majors)),
        interest: interest_alignment(requester, candidate),
        diversity: f64::from(diversity_balance(requester, candidate)),
    }
}

pub(crate) fn basic_compatibility(
    requester: &Profile,
    candidate: &Profile,
    related_majors: &RelatedMajors,
) -> u32 {
    let total = major_points(&requester.major, &candidate.major, related_majors)
        + year_points(requester.year, candidate.year)
        + availability_points(requester, candidate);
    total.min(100)
}

pub(crate) fn major_points(left: &str, right: &str, related_majors: &RelatedMajors) -> u32 {
    if left == right {
        EXACT_MAJOR_POINTS
    } else if related_majors.relates(left, right) {
        RELATED_MAJOR_POINTS
    } else {
        0
    }
}

pub(crate) fn year_points(left: i32, right: i32) -> u32 {
    match year_gap(left, right) {
        0 => 20,
        1 => 15,
        2 => 10,
        3 => 5,
        _ => 0,
    }
}

fn year_gap(left: i32, right: i32) -> u64 {
    (i64::from(left) - i64::from(right)).unsigned_abs()
}

pub(crate) fn availability_points(requester: &Profile, candidate: &Profile) -> u32 {
    let common = requester
        .availability
        .common_slots(&candidate.availability)
        .min(MAX_AVAILABILITY_POINTS as usize) as u32;
    (common * POINTS_PER_COMMON_SLOT).min(MAX_AVAILABILITY_POINTS)
}

/// Weighted overlap of career interests, driven by the requester's priorities only.
///
/// `total_weight` counts each requester interest once, regardless of how many candidate interests
/// it was compared with.
pub(crate) fn interest_alignment(requester: &Profile, candidate: &Profile) -> f64 {
    if requester.career_interests.is_empty() || candidate.career_interests.is_empty() {
        return 0.0;
    }

    let mut score: u64 = 0;
    let mut total_weight: u64 = 0;

    for interest in &requester.career_interests {
        let weight = u64::from(interest.priority.weight());

        for other in &candidate.career_interests {
            let industry_match = interest.industry == other.industry;
            let role_match = interest.role == other.role;

            if industry_match {
                score += weight * u64::from(INDUSTRY_MATCH_POINTS);
            }
            if role_match {
                score += weight * u64::from(ROLE_MATCH_POINTS);
            }
            if industry_match && role_match {
                score += weight * u64::from(FULL_MATCH_BONUS);
            }
        }

        total_weight += weight;
    }

    if total_weight == 0 {
        return 0.0;
    }

    ((score as f64 / total_weight as f64) * 2.0).min(MAX_SUB_SCORE)
}

pub(crate) fn diversity_balance(requester: &Profile, candidate: &Profile) -> u32 {
    let mut score = DIVERSITY_BASE;

    if requester.major != candidate.major {
        score += DIFFERENT_MAJOR_BONUS;
    }
    if year_gap(requester.year, candidate.year) > 0 {
        score += DIFFERENT_YEAR_BONUS;
    }
    if skills_partially_overlap(requester, candidate) {
        score += PARTIAL_SKILL_OVERLAP_BONUS;
    }

    score.min(100)
}

fn skills_partially_overlap(requester: &Profile, candidate: &Profile) -> bool {
    let left: BTreeSet<&str> = requester
        .skills
        .iter()
        .map(|skill| skill.skill_id.as_str())
        .collect();
    let right: BTreeSet<&str> = candidate
        .skills
        .iter()
        .map(|skill| skill.skill_id.as_str())
        .collect();

    let shared = left.intersection(&right).next().is_some();
    let distinct = left.symmetric_difference(&right).next().is_some();
    shared && distinct
}
