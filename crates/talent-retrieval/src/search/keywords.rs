//! Token extraction for keyword search: stopword-filtered informative
//! tokens plus recognised skill names from a curated vocabulary.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// A recognised skill and the pattern that detects it in free text.
pub struct SkillPattern {
    /// Canonical skill name, compared case-insensitively with candidate skills.
    pub name: &'static str,
    pub regex: &'static LazyLock<Option<Regex>>,
}

macro_rules! skill_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Languages ──────────────────────────────────────────────────────────────
skill_pattern!(RE_JAVASCRIPT, r"(?i)\b(?:javascript|ecmascript)\b");
skill_pattern!(RE_TYPESCRIPT, r"(?i)\btypescript\b");
skill_pattern!(RE_PYTHON, r"(?i)\bpython\b");
skill_pattern!(RE_JAVA, r"(?i)\bjava\b");
skill_pattern!(RE_GO, r"(?i:\bgolang\b)|\bGo\b");
skill_pattern!(RE_RUST, r"(?i)\brust\b");
skill_pattern!(RE_CPP, r"(?i)\bc\+\+");
skill_pattern!(RE_CSHARP, r"(?i)\bc#");
skill_pattern!(RE_RUBY, r"(?i)\bruby\b");
skill_pattern!(RE_PHP, r"(?i)\bphp\b");
skill_pattern!(RE_SWIFT, r"(?i)\bswift\b");
skill_pattern!(RE_KOTLIN, r"(?i)\bkotlin\b");
skill_pattern!(RE_SQL, r"(?i)\bsql\b");

// ── Frameworks ─────────────────────────────────────────────────────────────
skill_pattern!(RE_REACT, r"(?i)\breact(?:\.?js)?\b");
skill_pattern!(RE_ANGULAR, r"(?i)\bangular(?:js)?\b");
skill_pattern!(RE_VUE, r"(?i)\bvue(?:\.?js)?\b");
skill_pattern!(RE_NODE, r"(?i)\bnode(?:\.?js)?\b");
skill_pattern!(RE_DJANGO, r"(?i)\bdjango\b");
skill_pattern!(RE_SPRING, r"(?i)\bspring(?:\s+boot)?\b");
skill_pattern!(RE_RAILS, r"(?i)\brails\b");
skill_pattern!(RE_GRAPHQL, r"(?i)\bgraphql\b");
skill_pattern!(RE_TENSORFLOW, r"(?i)\btensorflow\b");
skill_pattern!(RE_PYTORCH, r"(?i)\bpytorch\b");
skill_pattern!(RE_ML, r"(?i)\bmachine\s+learning\b");

// ── Data stores and streaming ──────────────────────────────────────────────
skill_pattern!(RE_POSTGRES, r"(?i)\bpostgres(?:ql)?\b");
skill_pattern!(RE_MYSQL, r"(?i)\bmysql\b");
skill_pattern!(RE_MONGODB, r"(?i)\bmongo(?:db)?\b");
skill_pattern!(RE_REDIS, r"(?i)\bredis\b");
skill_pattern!(RE_KAFKA, r"(?i)\bkafka\b");
skill_pattern!(RE_SPARK, r"(?i)\b(?:apache\s+)?spark\b");

// ── Cloud and infrastructure ───────────────────────────────────────────────
skill_pattern!(RE_AWS, r"(?i)\b(?:aws|amazon\s+web\s+services)\b");
skill_pattern!(RE_GCP, r"(?i)\b(?:gcp|google\s+cloud)\b");
skill_pattern!(RE_AZURE, r"(?i)\bazure\b");
skill_pattern!(RE_DOCKER, r"(?i)\bdocker\b");
skill_pattern!(RE_KUBERNETES, r"(?i)\b(?:kubernetes|k8s)\b");
skill_pattern!(RE_TERRAFORM, r"(?i)\bterraform\b");

static SKILL_VOCABULARY: [SkillPattern; 36] = [
    SkillPattern { name: "JavaScript", regex: &RE_JAVASCRIPT },
    SkillPattern { name: "TypeScript", regex: &RE_TYPESCRIPT },
    SkillPattern { name: "Python", regex: &RE_PYTHON },
    SkillPattern { name: "Java", regex: &RE_JAVA },
    SkillPattern { name: "Go", regex: &RE_GO },
    SkillPattern { name: "Rust", regex: &RE_RUST },
    SkillPattern { name: "C++", regex: &RE_CPP },
    SkillPattern { name: "C#", regex: &RE_CSHARP },
    SkillPattern { name: "Ruby", regex: &RE_RUBY },
    SkillPattern { name: "PHP", regex: &RE_PHP },
    SkillPattern { name: "Swift", regex: &RE_SWIFT },
    SkillPattern { name: "Kotlin", regex: &RE_KOTLIN },
    SkillPattern { name: "SQL", regex: &RE_SQL },
    SkillPattern { name: "React", regex: &RE_REACT },
    SkillPattern { name: "Angular", regex: &RE_ANGULAR },
    SkillPattern { name: "Vue", regex: &RE_VUE },
    SkillPattern { name: "Node.js", regex: &RE_NODE },
    SkillPattern { name: "Django", regex: &RE_DJANGO },
    SkillPattern { name: "Spring", regex: &RE_SPRING },
    SkillPattern { name: "Rails", regex: &RE_RAILS },
    SkillPattern { name: "GraphQL", regex: &RE_GRAPHQL },
    SkillPattern { name: "TensorFlow", regex: &RE_TENSORFLOW },
    SkillPattern { name: "PyTorch", regex: &RE_PYTORCH },
    SkillPattern { name: "Machine Learning", regex: &RE_ML },
    SkillPattern { name: "PostgreSQL", regex: &RE_POSTGRES },
    SkillPattern { name: "MySQL", regex: &RE_MYSQL },
    SkillPattern { name: "MongoDB", regex: &RE_MONGODB },
    SkillPattern { name: "Redis", regex: &RE_REDIS },
    SkillPattern { name: "Kafka", regex: &RE_KAFKA },
    SkillPattern { name: "Spark", regex: &RE_SPARK },
    SkillPattern { name: "AWS", regex: &RE_AWS },
    SkillPattern { name: "GCP", regex: &RE_GCP },
    SkillPattern { name: "Azure", regex: &RE_AZURE },
    SkillPattern { name: "Docker", regex: &RE_DOCKER },
    SkillPattern { name: "Kubernetes", regex: &RE_KUBERNETES },
    SkillPattern { name: "Terraform", regex: &RE_TERRAFORM },
];

static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "and", "for", "with", "are", "you", "our", "who", "will", "have", "has", "this",
        "that", "from", "into", "your", "all", "any", "can", "able", "looking", "seeking",
        "need", "needs", "want", "wanted", "must", "should", "strong", "good", "great",
        "experience", "experienced", "years", "year", "role", "team", "work", "working", "plus",
        "etc", "including", "required", "requirements", "preferred", "knowledge", "someone",
        "candidate", "job", "position", "join", "ideal", "also", "well", "not", "but",
    ]
    .into_iter()
    .collect()
});

/// The curated skill vocabulary, in detection order.
pub fn skill_vocabulary() -> &'static [SkillPattern] {
    &SKILL_VOCABULARY
}

/// Lowercase, stopword-filtered tokens of at least `min_len` characters,
/// deduplicated in first-seen order and capped at `max`.
pub fn informative_tokens(text: &str, min_len: usize, max: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    text.split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .map(str::to_lowercase)
        .filter(|t| t.chars().count() >= min_len)
        .filter(|t| !STOPWORDS.contains(t.as_str()))
        .filter(|t| seen.insert(t.clone()))
        .take(max)
        .collect()
}

/// Canonical names of vocabulary skills mentioned in `text`.
pub fn skill_tokens(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for pattern in skill_vocabulary() {
        let hit = pattern
            .regex
            .as_ref()
            .is_some_and(|re| re.is_match(text));
        if hit && !found.iter().any(|f| f == pattern.name) {
            found.push(pattern.name.to_string());
        }
    }
    found
}
