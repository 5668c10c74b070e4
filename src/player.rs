use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_NAME_CHARS: usize = 24;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Boy,
    Girl,
}

impl Gender {
    pub fn toggle(self) -> Self {
        match self {
            Gender::Boy => Gender::Girl,
            Gender::Girl => Gender::Boy,
        }
    }

    /// Suffix used to pick gendered locale strings.
    pub fn key(self) -> &'static str {
        match self {
            Gender::Boy => "boy",
            Gender::Girl => "girl",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: Uuid,
    pub name: String,
    pub gender: Gender,
}

impl PlayerProfile {
    /// `None` when the trimmed name is empty.
    pub fn new(name: &str, gender: Gender) -> Option<Self> {
        Self::with_id(Uuid::new_v4(), name, gender)
    }

    /// Keeps an existing id, so renaming does not fork leaderboard rows.
    pub fn with_id(id: Uuid, name: &str, gender: Gender) -> Option<Self> {
        let name = clean_name(name)?;
        Some(Self { id, name, gender })
    }
}

pub fn clean_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_NAME_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_rejected() {
        assert!(PlayerProfile::new("   ", Gender::Girl).is_none());
    }

    #[test]
    fn test_name_trimmed_and_capped() {
        let p = PlayerProfile::new("  Noa  ", Gender::Girl).unwrap();
        assert_eq!(p.name, "Noa");
        let long = "x".repeat(40);
        let p = PlayerProfile::new(&long, Gender::Boy).unwrap();
        assert_eq!(p.name.chars().count(), MAX_NAME_CHARS);
    }

    #[test]
    fn test_with_id_preserves_identity() {
        let p = PlayerProfile::new("Dan", Gender::Boy).unwrap();
        let renamed = PlayerProfile::with_id(p.id, "Danny", Gender::Boy).unwrap();
        assert_eq!(p.id, renamed.id);
    }

    #[test]
    fn test_gender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Gender::Girl).unwrap(), "\"girl\"");
        assert_eq!(Gender::Boy.toggle(), Gender::Girl);
    }
}
