use serde::{Deserialize, Serialize};
use std::fmt;

/// Coaching persona used to shape the task prompt.
///
/// Unknown tone strings resolve to `General` instead of failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Tone {
    Creative,
    Regimen,
    #[default]
    General,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Creative => "creative",
            Tone::Regimen => "regimen",
            Tone::General => "general",
        }
    }
}

impl From<&str> for Tone {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "creative" => Tone::Creative,
            "regimen" => Tone::Regimen,
            _ => Tone::General,
        }
    }
}

impl From<String> for Tone {
    fn from(value: String) -> Self {
        Tone::from(value.as_str())
    }
}

impl From<Option<&str>> for Tone {
    fn from(value: Option<&str>) -> Self {
        value.map(Tone::from).unwrap_or_default()
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tones() {
        assert_eq!(Tone::from("creative"), Tone::Creative);
        assert_eq!(Tone::from("regimen"), Tone::Regimen);
        assert_eq!(Tone::from("general"), Tone::General);
        assert_eq!(Tone::from(" Creative "), Tone::Creative);
    }

    #[test]
    fn test_unknown_tone_falls_back_to_general() {
        assert_eq!(Tone::from("mystery"), Tone::General);
        assert_eq!(Tone::from(""), Tone::General);
        assert_eq!(Tone::from(None::<&str>), Tone::General);
    }

    #[test]
    fn test_deserialize_unknown_tone() {
        let tone: Tone = serde_json::from_str("\"mystery\"").unwrap();
        assert_eq!(tone, Tone::General);
        assert_eq!(serde_json::to_string(&Tone::Regimen).unwrap(), "\"regimen\"");
    }
}
