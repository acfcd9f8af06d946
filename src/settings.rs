//! Tower rules and difficulty presets
//!
//! Settings are plain data; the tower copies them at construction.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CHEATING_CHANCES, PROTECTED_TOP_LAYERS};
use crate::error::Result;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    /// Only structure and exhausted stability can bring the tower down
    Casual,
    #[default]
    Standard,
    /// Standard plus the top layers are off limits
    Strict,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Casual => "Casual",
            Difficulty::Standard => "Standard",
            Difficulty::Strict => "Strict",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "casual" | "easy" => Some(Difficulty::Casual),
            "standard" | "normal" => Some(Difficulty::Standard),
            "strict" | "hard" => Some(Difficulty::Strict),
            _ => None,
        }
    }

    /// Whether removals roll against stability
    pub fn random_collapse(&self) -> bool {
        match self {
            Difficulty::Casual => false,
            Difficulty::Standard => true,
            Difficulty::Strict => true,
        }
    }

    pub fn cheat_rule(&self) -> CheatRule {
        match self {
            Difficulty::Casual | Difficulty::Standard => CheatRule::Off,
            Difficulty::Strict => CheatRule::ProtectedTop(PROTECTED_TOP_LAYERS),
        }
    }
}

/// Which removals count as cheating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CheatRule {
    /// Any block may be pulled
    #[default]
    Off,
    /// Pulling from the top `n` layers is cheating
    ProtectedTop(usize),
}

impl CheatRule {
    /// True if pulling from `layer` of a tower `height` layers tall breaks the rule
    pub fn forbids(&self, height: usize, layer: usize) -> bool {
        match *self {
            CheatRule::Off => false,
            CheatRule::ProtectedTop(n) => height.saturating_sub(layer) <= n,
        }
    }
}

/// Tower rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerSettings {
    /// Seed for friction draws and stability rolls
    pub seed: u64,
    /// Preset the other fields were derived from
    pub difficulty: Difficulty,
    /// Roll for collapse after every removal
    pub random_collapse: bool,
    pub cheat_rule: CheatRule,
    /// Cheating attempts tolerated before disqualification
    pub cheating_chances: u32,
}

impl Default for TowerSettings {
    fn default() -> Self {
        Self::from_preset(Difficulty::default())
    }
}

impl TowerSettings {
    /// Create settings from a difficulty preset (applies preset defaults)
    pub fn from_preset(preset: Difficulty) -> Self {
        let mut settings = Self {
            seed: 0,
            difficulty: preset,
            random_collapse: true,
            cheat_rule: CheatRule::Off,
            cheating_chances: DEFAULT_CHEATING_CHANCES,
        };
        settings.apply_preset(preset);
        settings
    }

    /// Apply a difficulty preset (updates preset-dependent rules, keeps the seed)
    pub fn apply_preset(&mut self, preset: Difficulty) {
        self.difficulty = preset;
        self.random_collapse = preset.random_collapse();
        self.cheat_rule = preset.cheat_rule();
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        log::debug!("Loaded tower settings: {:?}", settings);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TowerError;

    #[test]
    fn test_presets() {
        let casual = TowerSettings::from_preset(Difficulty::Casual);
        assert!(!casual.random_collapse);
        assert_eq!(casual.cheat_rule, CheatRule::Off);

        let standard = TowerSettings::default();
        assert_eq!(standard.difficulty, Difficulty::Standard);
        assert!(standard.random_collapse);
        assert_eq!(standard.cheat_rule, CheatRule::Off);

        let strict = TowerSettings::from_preset(Difficulty::Strict);
        assert_eq!(strict.cheat_rule, CheatRule::ProtectedTop(3));
        assert_eq!(strict.cheating_chances, 3);
    }

    #[test]
    fn test_apply_preset_keeps_seed() {
        let mut settings = TowerSettings::default().with_seed(77);
        settings.apply_preset(Difficulty::Casual);
        assert_eq!(settings.seed, 77);
        assert!(!settings.random_collapse);
    }

    #[test]
    fn test_difficulty_names() {
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Strict));
        assert_eq!(Difficulty::from_str("casual"), Some(Difficulty::Casual));
        assert_eq!(Difficulty::from_str("wobbly"), None);
        assert_eq!(Difficulty::Standard.as_str(), "Standard");
    }

    #[test]
    fn test_cheat_rule_top_layers() {
        let rule = CheatRule::ProtectedTop(3);
        // Tower of 5: layers 2, 3, 4 are the top three
        assert!(!rule.forbids(5, 0));
        assert!(!rule.forbids(5, 1));
        assert!(rule.forbids(5, 2));
        assert!(rule.forbids(5, 4));
        assert!(!CheatRule::Off.forbids(5, 4));
    }

    #[test]
    fn test_from_json_partial() {
        let settings = TowerSettings::from_json(r#"{"seed": 42, "random_collapse": false}"#).unwrap();
        assert_eq!(settings.seed, 42);
        assert!(!settings.random_collapse);
        assert_eq!(settings.cheat_rule, CheatRule::Off);
        assert_eq!(settings.cheating_chances, DEFAULT_CHEATING_CHANCES);
    }

    #[test]
    fn test_json_round_trip_and_errors() {
        let settings = TowerSettings::from_preset(Difficulty::Strict).with_seed(9);
        let json = settings.to_json().unwrap();
        assert_eq!(TowerSettings::from_json(&json).unwrap(), settings);

        let err = TowerSettings::from_json("{\"seed\": \"nope\"}").unwrap_err();
        assert!(matches!(err, TowerError::Settings(_)));
    }
}
