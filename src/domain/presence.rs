use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::FilterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hunger {
    #[default]
    Hungry,
    Full,
}

impl Hunger {
    pub fn label(self) -> &'static str {
        match self {
            Hunger::Hungry => "Hungry",
            Hunger::Full => "Full",
        }
    }
}

impl FromStr for Hunger {
    type Err = FilterError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "hungry" => Ok(Hunger::Hungry),
            "full" => Ok(Hunger::Full),
            other => Err(FilterError::InvalidInput(format!(
                "hunger must be `hungry` or `full`, got `{other}`"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OnlineStatus {
    #[default]
    #[serde(rename = "Online")]
    Online,
    #[serde(rename = "Do Not Disturb")]
    DoNotDisturb,
    #[serde(rename = "Appear Offline")]
    AppearOffline,
}

impl OnlineStatus {
    pub const ALL: [OnlineStatus; 3] = [
        OnlineStatus::Online,
        OnlineStatus::DoNotDisturb,
        OnlineStatus::AppearOffline,
    ];

    /// Option label shown in the status picker.
    pub fn option_label(self) -> &'static str {
        match self {
            OnlineStatus::Online => "Online",
            OnlineStatus::DoNotDisturb => "Do Not Disturb",
            OnlineStatus::AppearOffline => "Appear Offline",
        }
    }

    /// Label shown to others; "Appear Offline" reads as plain "Offline".
    pub fn display_label(self) -> &'static str {
        match self {
            OnlineStatus::AppearOffline => "Offline",
            other => other.option_label(),
        }
    }
}

impl FromStr for OnlineStatus {
    type Err = FilterError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key: String = raw
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "online" => Ok(OnlineStatus::Online),
            "dnd" | "donotdisturb" => Ok(OnlineStatus::DoNotDisturb),
            "offline" | "appearoffline" => Ok(OnlineStatus::AppearOffline),
            _ => Err(FilterError::InvalidInput(format!(
                "unknown status `{}`; expected online, dnd, or offline",
                raw.trim()
            ))),
        }
    }
}

/// Lightweight indicator shown in the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presence {
    pub hunger: Hunger,
    pub status: OnlineStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Presence {
    fn default() -> Self {
        Self {
            hunger: Hunger::Hungry,
            status: OnlineStatus::Online,
            updated_at: None,
        }
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} · {}", self.status.display_label(), self.hunger.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_header_reads_online_hungry() {
        assert_eq!(Presence::default().to_string(), "Online · Hungry");
    }

    #[test]
    fn appear_offline_displays_as_offline() {
        let presence = Presence {
            hunger: Hunger::Full,
            status: OnlineStatus::AppearOffline,
            updated_at: None,
        };
        assert_eq!(presence.to_string(), "Offline · Full");
    }

    #[test]
    fn status_serializes_with_option_labels() {
        let json = serde_json::to_string(&OnlineStatus::DoNotDisturb).unwrap();
        assert_eq!(json, "\"Do Not Disturb\"");
    }

    #[test]
    fn status_parses_shorthand() {
        assert_eq!("dnd".parse::<OnlineStatus>().unwrap(), OnlineStatus::DoNotDisturb);
        assert_eq!("Appear Offline".parse::<OnlineStatus>().unwrap(), OnlineStatus::AppearOffline);
        assert!("away".parse::<OnlineStatus>().is_err());
    }
}
