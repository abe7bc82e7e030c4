//! Outcome profiles and the single-key resolver.

use super::{AnswerSet, DECISIVE_KEY, FALLBACK_OUTCOME, default_outcomes};
use crate::config::ConfigError;

/// A duck the quiz can hand out.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct OutcomeProfile {
    /// Lowercase lookup id, matched against the lowercased decisive answer.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Primary, background, accent.
    pub palette: [String; 3],
}

impl OutcomeProfile {
    pub fn new(id: &str, title: &str, description: &str, palette: [&str; 3]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            palette: palette.map(str::to_string),
        }
    }

    pub fn primary(&self) -> &str {
        &self.palette[0]
    }

    pub fn background(&self) -> &str {
        &self.palette[1]
    }

    pub fn accent(&self) -> &str {
        &self.palette[2]
    }
}

/// Immutable profile table with exactly one fallback entry.
#[derive(Clone, Debug)]
pub struct OutcomeTable {
    profiles: Vec<OutcomeProfile>,
    decisive_key: String,
    fallback: usize,
}

impl OutcomeTable {
    pub fn new(
        profiles: Vec<OutcomeProfile>,
        decisive_key: &str,
        fallback_id: &str,
    ) -> Result<Self, ConfigError> {
        for (i, p) in profiles.iter().enumerate() {
            if p.id != p.id.to_lowercase() {
                return Err(ConfigError::OutcomeIdNotLowercase(p.id.clone()));
            }
            if profiles[..i].iter().any(|other| other.id == p.id) {
                return Err(ConfigError::DuplicateOutcome(p.id.clone()));
            }
        }
        let fallback = profiles
            .iter()
            .position(|p| p.id == fallback_id)
            .ok_or_else(|| ConfigError::UnknownFallback(fallback_id.to_string()))?;
        Ok(Self {
            profiles,
            decisive_key: decisive_key.to_string(),
            fallback,
        })
    }

    pub fn profiles(&self) -> &[OutcomeProfile] {
        &self.profiles
    }

    pub fn get(&self, id: &str) -> Option<&OutcomeProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn fallback(&self) -> &OutcomeProfile {
        &self.profiles[self.fallback]
    }

    /// Picks the profile named by the decisive answer (case-insensitive), or the
    /// fallback. Other answers never influence the choice.
    pub fn resolve(&self, answers: &AnswerSet) -> &OutcomeProfile {
        answers
            .get(&self.decisive_key)
            .map(str::to_lowercase)
            .and_then(|id| self.get(&id))
            .unwrap_or_else(|| self.fallback())
    }
}

impl Default for OutcomeTable {
    fn default() -> Self {
        let profiles = default_outcomes();
        let fallback = profiles
            .iter()
            .position(|p| p.id == FALLBACK_OUTCOME)
            .unwrap_or(0);
        Self {
            profiles,
            decisive_key: DECISIVE_KEY.to_string(),
            fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_case_insensitive() {
        let table = OutcomeTable::default();
        let answers: AnswerSet = [("habitat", "City")].into_iter().collect();
        assert_eq!(table.resolve(&answers).id, "city");
        let answers: AnswerSet = [("habitat", "mOuNtAiN")].into_iter().collect();
        assert_eq!(table.resolve(&answers).id, "mountain");
    }

    #[test]
    fn test_resolve_falls_back_to_plains() {
        let table = OutcomeTable::default();
        assert_eq!(table.resolve(&AnswerSet::new()).id, "plains");
        let answers: AnswerSet = [("habitat", "desert")].into_iter().collect();
        assert_eq!(table.resolve(&answers).id, "plains");
    }

    #[test]
    fn test_other_answers_do_not_matter() {
        let table = OutcomeTable::default();
        let a: AnswerSet = [("color", "Blue"), ("food", "Nuts"), ("habitat", "Swamp")]
            .into_iter()
            .collect();
        let b: AnswerSet = [("color", "Red"), ("food", "Seeds"), ("habitat", "Swamp")]
            .into_iter()
            .collect();
        assert_eq!(table.resolve(&a), table.resolve(&b));
    }

    #[test]
    fn test_new_rejects_missing_fallback() {
        let err = OutcomeTable::new(default_outcomes(), "habitat", "ocean").unwrap_err();
        assert_eq!(err, ConfigError::UnknownFallback("ocean".into()));
    }

    #[test]
    fn test_new_rejects_duplicate_id() {
        let mut profiles = default_outcomes();
        profiles.push(profiles[2].clone());
        assert_eq!(
            OutcomeTable::new(profiles, "habitat", "plains").unwrap_err(),
            ConfigError::DuplicateOutcome("mountain".into())
        );
    }

    #[test]
    fn test_every_profile_reachable_by_option() {
        let table = OutcomeTable::default();
        for profile in table.profiles() {
            let option = profile.id.to_uppercase();
            let answers: AnswerSet = [("habitat", option.as_str())].into_iter().collect();
            assert_eq!(table.resolve(&answers), profile);
        }
    }

    #[test]
    fn test_new_rejects_uppercase_id() {
        let mut profiles = default_outcomes();
        profiles[0].id = "Swamp".into();
        assert!(matches!(
            OutcomeTable::new(profiles, "habitat", "plains"),
            Err(ConfigError::OutcomeIdNotLowercase(_))
        ));
    }
}
