use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable candidate identifier assigned by the storage layer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CandidateId(pub u64);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a candidate is willing to work.
///
/// Parsed case-insensitively, so `"Remote"` and `"On-site"` as well as
/// `"remote"` and `"onsite"` are accepted. Anything else, including
/// `null`, is `Unspecified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum RemotePreference {
    Remote,
    Hybrid,
    Onsite,
    #[default]
    Unspecified,
}

impl RemotePreference {
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "remote" | "fully remote" | "remote-only" => Self::Remote,
            "hybrid" => Self::Hybrid,
            "onsite" | "on-site" | "on site" | "in-office" | "office" => Self::Onsite,
            _ => Self::Unspecified,
        }
    }
}

impl From<Option<String>> for RemotePreference {
    fn from(label: Option<String>) -> Self {
        label.as_deref().map_or(Self::Unspecified, Self::parse)
    }
}

/// The four embedding columns stored per candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingField {
    Profile,
    Skills,
    Experience,
    Resume,
}

impl EmbeddingField {
    pub const ALL: [EmbeddingField; 4] = [
        EmbeddingField::Profile,
        EmbeddingField::Skills,
        EmbeddingField::Experience,
        EmbeddingField::Resume,
    ];

    /// Fields a candidate must have embedded to be eligible for vector search.
    pub const REQUIRED: [EmbeddingField; 3] = [
        EmbeddingField::Profile,
        EmbeddingField::Skills,
        EmbeddingField::Experience,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Skills => "skills",
            Self::Experience => "experience",
            Self::Resume => "resume",
        }
    }

    /// Column name in the relational candidate table.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Profile => "profile_embedding",
            Self::Skills => "skills_embedding",
            Self::Experience => "experience_embedding",
            Self::Resume => "resume_embedding",
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

/// Stored embedding vectors. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateEmbeddings {
    pub profile: Option<Vec<f32>>,
    pub skills: Option<Vec<f32>>,
    pub experience: Option<Vec<f32>>,
    pub resume: Option<Vec<f32>>,
}

impl CandidateEmbeddings {
    pub fn get(&self, field: EmbeddingField) -> Option<&[f32]> {
        match field {
            EmbeddingField::Profile => self.profile.as_deref(),
            EmbeddingField::Skills => self.skills.as_deref(),
            EmbeddingField::Experience => self.experience.as_deref(),
            EmbeddingField::Resume => self.resume.as_deref(),
        }
    }

    pub fn set(&mut self, field: EmbeddingField, vector: Vec<f32>) {
        let slot = match field {
            EmbeddingField::Profile => &mut self.profile,
            EmbeddingField::Skills => &mut self.skills,
            EmbeddingField::Experience => &mut self.experience,
            EmbeddingField::Resume => &mut self.resume,
        };
        *slot = Some(vector);
    }

    /// True when profile, skills, and experience vectors are all present.
    pub fn has_required(&self) -> bool {
        EmbeddingField::REQUIRED
            .iter()
            .all(|f| self.get(*f).is_some())
    }
}

/// A candidate profile as held by the storage layer. Read-only to the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: CandidateId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Fractional years are allowed (stored as `decimal(3,1)`).
    #[serde(default)]
    pub years_experience: f64,
    #[serde(default)]
    pub salary_expectation: Option<u32>,
    #[serde(default)]
    pub remote_preference: RemotePreference,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Free-text summary, used as the résumé text.
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, skip_serializing)]
    pub embeddings: CandidateEmbeddings,
}

impl CandidateRecord {
    /// Case-insensitive whole-element skill membership.
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s.eq_ignore_ascii_case(skill))
    }

    pub fn embedding(&self, field: EmbeddingField) -> Option<&[f32]> {
        self.embeddings.get(field)
    }

    /// Summary text when present and non-blank.
    pub fn resume_text(&self) -> Option<&str> {
        self.summary
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn company_or_unknown(&self) -> &str {
        self.company.as_deref().unwrap_or("Unknown")
    }

    pub fn location_or_unknown(&self) -> &str {
        self.location.as_deref().unwrap_or("Unknown")
    }
}
