use serde::{Deserialize, Serialize};

const DEFAULT_SKILL_WEIGHT: f32 = 0.5;
const DEFAULT_EXPERIENCE_WEIGHT: f32 = 0.3;
const DEFAULT_CREDENTIAL_WEIGHT: f32 = 0.2;

/// How the skill part of the eligibility gate is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillRule {
    /// At least one required skill must be present.
    AnyOverlap,
    /// Every required skill must be present.
    AllRequired,
}

/// Policy dials for the matching engine. The weights are normalised over
/// their sum when scoring, so they express relative importance rather than
/// exact fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPolicy {
    pub skill_rule: SkillRule,
    pub skill_weight: f32,
    pub experience_weight: f32,
    pub credential_weight: f32,
}

impl MatchPolicy {
    /// Weights with non-finite or non-positive configurations replaced by the
    /// defaults, so a bad config cannot produce NaN scores.
    pub(crate) fn sanitized_weights(&self) -> (f32, f32, f32) {
        let sane = |weight: f32, fallback: f32| {
            if weight.is_finite() && weight >= 0.0 {
                weight
            } else {
                fallback
            }
        };
        let skill = sane(self.skill_weight, DEFAULT_SKILL_WEIGHT);
        let experience = sane(self.experience_weight, DEFAULT_EXPERIENCE_WEIGHT);
        let credential = sane(self.credential_weight, DEFAULT_CREDENTIAL_WEIGHT);
        if skill + experience + credential <= f32::EPSILON {
            return (
                DEFAULT_SKILL_WEIGHT,
                DEFAULT_EXPERIENCE_WEIGHT,
                DEFAULT_CREDENTIAL_WEIGHT,
            );
        }
        (skill, experience, credential)
    }
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            skill_rule: SkillRule::AnyOverlap,
            skill_weight: DEFAULT_SKILL_WEIGHT,
            experience_weight: DEFAULT_EXPERIENCE_WEIGHT,
            credential_weight: DEFAULT_CREDENTIAL_WEIGHT,
        }
    }
}
