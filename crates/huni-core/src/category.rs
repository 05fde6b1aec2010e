use serde::{Deserialize, Serialize};

/// The ten semantic buckets used for both querying and scoring.
///
/// The set is closed: every classified facility lands in exactly one of
/// these. `ALL` is the fetch order for a scoring run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Health,
    Education,
    Market,
    Transport,
    Walkability,
    Recreation,
    Safety,
    Accessibility,
    Police,
    Religious,
}

impl Category {
    /// All categories in fetch order.
    pub const ALL: [Self; 10] = [
        Self::Health,
        Self::Education,
        Self::Market,
        Self::Transport,
        Self::Walkability,
        Self::Recreation,
        Self::Safety,
        Self::Accessibility,
        Self::Police,
        Self::Religious,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Education => "education",
            Self::Market => "market",
            Self::Transport => "transport",
            Self::Walkability => "walkability",
            Self::Recreation => "recreation",
            Self::Safety => "safety",
            Self::Accessibility => "accessibility",
            Self::Police => "police",
            Self::Religious => "religious",
        }
    }

    /// Parse a category name as used by the custom POI store.
    ///
    /// The legacy `"custom"` label maps to [`Category::Recreation`];
    /// unknown labels return `None`.
    #[must_use]
    pub fn from_poi_label(label: &str) -> Option<Self> {
        match label {
            "health" => Some(Self::Health),
            "education" => Some(Self::Education),
            "market" => Some(Self::Market),
            "transport" => Some(Self::Transport),
            "walkability" => Some(Self::Walkability),
            "recreation" | "custom" => Some(Self::Recreation),
            "safety" => Some(Self::Safety),
            "accessibility" => Some(Self::Accessibility),
            "police" => Some(Self::Police),
            "religious" => Some(Self::Religious),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
