use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Age band of the child an activity plan is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "Infant (0-6 months)")]
    InfantYoung,
    #[serde(rename = "Infant (6-12 months)")]
    InfantOlder,
    #[default]
    #[serde(rename = "Toddler (1-2 years)")]
    ToddlerYoung,
    #[serde(rename = "Toddler (2-3 years)")]
    ToddlerOlder,
    #[serde(rename = "Preschooler (3-5 years)")]
    Preschool,
}

impl AgeGroup {
    /// All age groups, youngest first.
    pub const ALL: [AgeGroup; 5] = [
        Self::InfantYoung,
        Self::InfantOlder,
        Self::ToddlerYoung,
        Self::ToddlerOlder,
        Self::Preschool,
    ];

    /// Label used in prompts and persisted data.
    pub fn label(self) -> &'static str {
        match self {
            Self::InfantYoung => "Infant (0-6 months)",
            Self::InfantOlder => "Infant (6-12 months)",
            Self::ToddlerYoung => "Toddler (1-2 years)",
            Self::ToddlerOlder => "Toddler (2-3 years)",
            Self::Preschool => "Preschooler (3-5 years)",
        }
    }

    /// Short kebab-case name accepted on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Self::InfantYoung => "infant-young",
            Self::InfantOlder => "infant-older",
            Self::ToddlerYoung => "toddler-young",
            Self::ToddlerOlder => "toddler-older",
            Self::Preschool => "preschool",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AgeGroup {
    type Err = AgeGroupParseError;

    /// Accepts either the slug (`toddler-young`) or the full label
    /// (`Toddler (1-2 years)`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|g| g.slug().eq_ignore_ascii_case(wanted) || g.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AgeGroupParseError(s.to_owned()))
    }
}

/// Error returned when parsing an invalid [`AgeGroup`] string.
#[derive(Debug, Clone)]
pub struct AgeGroupParseError(pub String);

impl fmt::Display for AgeGroupParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid age group: {:?} (expected one of infant-young, infant-older, toddler-young, toddler-older, preschool)",
            self.0
        )
    }
}

impl std::error::Error for AgeGroupParseError {}

// ---------------------------------------------------------------------------

/// Skill area an activity targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Fine Motor")]
    FineMotor,
    #[serde(rename = "Gross Motor")]
    GrossMotor,
    #[serde(rename = "Language")]
    Language,
    #[serde(rename = "Cognitive")]
    Cognitive,
    #[serde(rename = "Sensory Play")]
    SensoryPlay,
}

impl Category {
    /// The four developmental categories, in the order the prompt lists them.
    pub const DEVELOPMENTAL: [Category; 4] = [
        Self::FineMotor,
        Self::GrossMotor,
        Self::Language,
        Self::Cognitive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::FineMotor => "Fine Motor",
            Self::GrossMotor => "Gross Motor",
            Self::Language => "Language",
            Self::Cognitive => "Cognitive",
            Self::SensoryPlay => "Sensory Play",
        }
    }

    pub fn is_developmental(self) -> bool {
        !matches!(self, Self::SensoryPlay)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Fine Motor" => Ok(Self::FineMotor),
            "Gross Motor" => Ok(Self::GrossMotor),
            "Language" => Ok(Self::Language),
            "Cognitive" => Ok(Self::Cognitive),
            "Sensory Play" => Ok(Self::SensoryPlay),
            other => Err(CategoryParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Category`] string.
#[derive(Debug, Clone)]
pub struct CategoryParseError(pub String);

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid activity category: {:?}", self.0)
    }
}

impl std::error::Error for CategoryParseError {}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// An activity as produced by the completion service, before it has an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDraft {
    pub title: String,
    pub category: Category,
    pub description: String,
    pub materials: Vec<String>,
    pub duration: String,
    pub safety_tip: String,
    pub tags: Vec<String>,
}

/// One generated play idea. The `id` is assigned locally and is the
/// de-duplication key for plans and favorites.
///
/// Serializes to the same camelCase shape that is kept in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub title: String,
    pub description: String,
    pub materials: Vec<String>,
    pub duration: String,
    pub safety_tip: String,
    pub tags: Vec<String>,
    pub category: Category,
}

impl Activity {
    pub fn from_draft(id: impl Into<String>, draft: ActivityDraft) -> Self {
        let ActivityDraft {
            title,
            category,
            description,
            materials,
            duration,
            safety_tip,
            tags,
        } = draft;
        Self {
            id: id.into(),
            title,
            description,
            materials,
            duration,
            safety_tip,
            tags,
            category,
        }
    }

    /// Drop the id, returning the fields the service produced.
    pub fn to_draft(&self) -> ActivityDraft {
        ActivityDraft {
            title: self.title.clone(),
            category: self.category,
            description: self.description.clone(),
            materials: self.materials.clone(),
            duration: self.duration.clone(),
            safety_tip: self.safety_tip.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Input to one plan generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityRequest {
    pub age_group: AgeGroup,
    pub child_interests: Option<String>,
    pub materials_available: Option<String>,
}

impl ActivityRequest {
    /// Build a request, treating blank hints as absent.
    pub fn new(
        age_group: AgeGroup,
        child_interests: Option<String>,
        materials_available: Option<String>,
    ) -> Self {
        Self {
            age_group,
            child_interests: non_blank(child_interests),
            materials_available: non_blank(materials_available),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}
