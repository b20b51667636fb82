use serde::{Deserialize, Serialize};

use super::config::{MatchPolicy, SkillRule};
use super::EligibilityReport;
use crate::marketplace::matching::domain::{CandidateSnapshot, JobPosting};

/// Why the eligibility gate turned a candidate away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum EligibilityFailure {
    InsufficientCredentials { required: u32, actual: u32 },
    InsufficientExperience { required: u32, actual: u32 },
    SkillMismatch { missing: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFactor {
    SkillOverlap,
    Experience,
    Credentials,
}

/// Discrete contribution to a match score, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: MatchFactor,
    pub ratio: f32,
    pub weight: f32,
    pub notes: String,
}

pub(crate) fn evaluate(
    job: &JobPosting,
    snapshot: &CandidateSnapshot,
    matchable_credentials: u32,
    policy: &MatchPolicy,
) -> EligibilityReport {
    let mut failures = Vec::new();

    let required_credentials = job.min_verified_credentials.unwrap_or(0);
    if matchable_credentials < required_credentials {
        failures.push(EligibilityFailure::InsufficientCredentials {
            required: required_credentials,
            actual: matchable_credentials,
        });
    }

    let required_years = job.min_years.unwrap_or(0);
    if snapshot.years_experience < required_years {
        failures.push(EligibilityFailure::InsufficientExperience {
            required: required_years,
            actual: snapshot.years_experience,
        });
    }

    let missing_skills: Vec<String> = job
        .required_skills
        .iter()
        .filter(|skill| !snapshot.skills.contains(*skill))
        .cloned()
        .collect();
    let overlap = job.required_skills.len() - missing_skills.len();
    let skill_gate_met = match policy.skill_rule {
        SkillRule::AnyOverlap => job.required_skills.is_empty() || overlap >= 1,
        SkillRule::AllRequired => missing_skills.is_empty(),
    };
    if !skill_gate_met {
        failures.push(EligibilityFailure::SkillMismatch {
            missing: missing_skills,
        });
    }

    let skill_ratio = ratio(overlap as u32, job.required_skills.len() as u32);
    let experience_ratio = ratio(snapshot.years_experience, required_years);
    let credential_ratio = ratio(matchable_credentials, required_credentials);

    let (skill_weight, experience_weight, credential_weight) = policy.sanitized_weights();
    let weight_sum = skill_weight + experience_weight + credential_weight;
    let weighted = (skill_ratio * skill_weight
        + experience_ratio * experience_weight
        + credential_ratio * credential_weight)
        / weight_sum;
    let score = (weighted * 100.0).round().clamp(0.0, 100.0) as u8;

    let components = vec![
        ScoreComponent {
            factor: MatchFactor::SkillOverlap,
            ratio: skill_ratio,
            weight: skill_weight,
            notes: format!(
                "{overlap} of {} required skill(s) present",
                job.required_skills.len()
            ),
        },
        ScoreComponent {
            factor: MatchFactor::Experience,
            ratio: experience_ratio,
            weight: experience_weight,
            notes: format!(
                "{} year(s) against a minimum of {required_years}",
                snapshot.years_experience
            ),
        },
        ScoreComponent {
            factor: MatchFactor::Credentials,
            ratio: credential_ratio,
            weight: credential_weight,
            notes: format!(
                "{matchable_credentials} verified credential(s) against a minimum of {required_credentials}"
            ),
        },
    ];

    EligibilityReport {
        failures,
        score,
        components,
    }
}

/// Capped achievement ratio; an absent requirement counts as satisfied.
fn ratio(actual: u32, required: u32) -> f32 {
    if required == 0 {
        return 1.0;
    }
    (actual as f32 / required as f32).min(1.0)
}
