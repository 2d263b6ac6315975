use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Envelope returned by the summarize endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SummarizeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<AnalysisResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dates: Vec<DateEntry>,
    #[serde(default)]
    pub importance: Option<Importance>,
    #[serde(default)]
    pub suggested_articles: Option<Vec<SuggestedArticle>>,
    #[serde(default)]
    pub report_url: Option<String>,
}

/// A key date; bare strings from older backends decode with no context.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "WireDate")]
pub struct DateEntry {
    pub date: String,
    pub context: Option<String>,
}

impl DateEntry {
    pub fn bare(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            context: None,
        }
    }

    pub fn display_text(&self) -> String {
        match self.context.as_deref().map(str::trim) {
            Some(context) if !context.is_empty() => format!("{}: {}", self.date, context),
            _ => self.date.clone(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireDate {
    Bare(String),
    Detailed {
        date: String,
        #[serde(default)]
        context: Option<String>,
    },
}

impl From<WireDate> for DateEntry {
    fn from(wire: WireDate) -> Self {
        match wire {
            WireDate::Bare(date) => DateEntry::bare(date),
            WireDate::Detailed { date, context } => DateEntry { date, context },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Importance {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub high: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub medium: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub low: Vec<String>,
}

impl Importance {
    pub fn items(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::High => &self.high,
            Tier::Medium => &self.medium,
            Tier::Low => &self.low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SuggestedArticle {
    #[serde(default)]
    pub article: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Importance tier; response keys are `high`, `medium`, `low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tier {
    #[default]
    High,
    Medium,
    Low,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::High, Tier::Medium, Tier::Low];

    pub fn key(self) -> &'static str {
        match self {
            Tier::High => "high",
            Tier::Medium => "medium",
            Tier::Low => "low",
        }
    }

    /// Tab label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            Tier::High => "very-important",
            Tier::Medium => "important",
            Tier::Low => "not-so-important",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Tier::High => "exclamation-circle",
            Tier::Medium => "info-circle",
            Tier::Low => "comment",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "very-important" | "1" => Ok(Tier::High),
            "medium" | "important" | "2" => Ok(Tier::Medium),
            "low" | "not-so-important" | "3" => Ok(Tier::Low),
            other => Err(format!("unknown importance tier '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_parses_keys_labels_and_positions() {
        assert_eq!("high".parse::<Tier>(), Ok(Tier::High));
        assert_eq!("Important".parse::<Tier>(), Ok(Tier::Medium));
        assert_eq!("3".parse::<Tier>(), Ok(Tier::Low));
        assert!("urgent".parse::<Tier>().is_err());
    }

    #[test]
    fn date_text_skips_blank_context() {
        let entry = DateEntry {
            date: "2024-03-01".to_string(),
            context: Some("  ".to_string()),
        };
        assert_eq!(entry.display_text(), "2024-03-01");
    }
}
