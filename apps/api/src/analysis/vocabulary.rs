//! Skill vocabulary — canonical skills, their aliases, and the normalization
//! rules shared by vocabulary loading and text scanning.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Stable canonical identifier for a skill: its normalized canonical name.
pub type SkillId = String;

/// One skill definition from the configuration source: a canonical display
/// name plus alternate surface forms (synonyms, abbreviations, spelling
/// variants) that denote the same skill.
#[derive(Debug, Clone, Deserialize)]
pub struct SkillDef {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Vocabulary configuration errors. All fatal at startup.
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("ambiguous alias '{alias}': maps to both '{first}' and '{second}'")]
    AmbiguousAlias {
        alias: String,
        first: SkillId,
        second: SkillId,
    },

    #[error("skill '{name}' has an alias that normalizes to nothing")]
    BlankAlias { name: String },

    #[error("failed to read skills file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse skills file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only alias lookup table. Built once at startup; lookup is a pure
/// function of normalized alias text, safe for unbounded concurrent readers.
#[derive(Debug)]
pub struct Vocabulary {
    alias_to_skill: HashMap<String, SkillId>,
    labels: HashMap<SkillId, String>,
    max_alias_tokens: usize,
}

impl Vocabulary {
    /// Builds the vocabulary from skill definitions, applying `normalize_term`
    /// to every alias. A canonical name is always an alias of its own skill.
    ///
    /// The same normalized alias mapped to two different canonical skills is
    /// a fatal configuration error, never silently resolved.
    pub fn from_defs(mut defs: Vec<SkillDef>) -> Result<Self, VocabularyError> {
        // Fixed insertion order (alphabetical by canonical id) so results
        // reproduce across runs regardless of the source ordering.
        defs.sort_by_key(|d| normalize_term(&d.name));

        let mut alias_to_skill: HashMap<String, SkillId> = HashMap::new();
        let mut labels = HashMap::new();
        let mut max_alias_tokens = 0;

        for def in defs {
            let id = normalize_term(&def.name);
            if id.is_empty() {
                return Err(VocabularyError::BlankAlias { name: def.name });
            }
            labels.insert(id.clone(), def.name.trim().to_string());

            for alias in std::iter::once(&def.name).chain(def.aliases.iter()) {
                let key = normalize_term(alias);
                if key.is_empty() {
                    return Err(VocabularyError::BlankAlias {
                        name: def.name.clone(),
                    });
                }
                max_alias_tokens = max_alias_tokens.max(key.split(' ').count());
                if let Some(existing) = alias_to_skill.get(&key) {
                    if *existing != id {
                        return Err(VocabularyError::AmbiguousAlias {
                            alias: key,
                            first: existing.clone(),
                            second: id.clone(),
                        });
                    }
                } else {
                    alias_to_skill.insert(key, id.clone());
                }
            }
        }

        Ok(Self {
            alias_to_skill,
            labels,
            max_alias_tokens,
        })
    }

    /// Loads skill definitions from a JSON file:
    /// `[{"name": "JavaScript", "aliases": ["js", "ecmascript"]}, ...]`.
    pub fn from_json_file(path: &Path) -> Result<Self, VocabularyError> {
        let raw = std::fs::read_to_string(path)?;
        let defs: Vec<SkillDef> = serde_json::from_str(&raw)?;
        Self::from_defs(defs)
    }

    /// The curated built-in skill table.
    pub fn builtin() -> Result<Self, VocabularyError> {
        Self::from_defs(builtin_defs())
    }

    /// Looks up an already-normalized span and returns its canonical skill id.
    pub fn lookup(&self, normalized: &str) -> Option<&SkillId> {
        self.alias_to_skill.get(normalized)
    }

    /// Canonical display label for a skill id. Unknown ids echo back as-is,
    /// so the returned borrow is tied to both inputs.
    pub fn label<'a>(&'a self, id: &'a str) -> &'a str {
        self.labels.get(id).map(String::as_str).unwrap_or(id)
    }

    /// Longest alias in word tokens. Bounds the extractor's sliding window.
    pub fn max_alias_tokens(&self) -> usize {
        self.max_alias_tokens
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Punctuation stripped from token edges. Interior characters survive, so
/// "c++", "c#", "ci/cd" and "scikit-learn" keep their meaning while
/// "python," and the "python-" of a dashed list lose their tails.
fn is_edge_punct(c: char) -> bool {
    matches!(
        c,
        ',' | '.'
            | ';'
            | ':'
            | '('
            | ')'
            | '['
            | ']'
            | '{'
            | '}'
            | '"'
            | '\''
            | '!'
            | '?'
            | '\\'
            | '|'
            | '*'
            | '`'
            | '-'
    )
}

/// Splits raw text into normalized word tokens: lowercased, edge punctuation
/// stripped, empty tokens dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(is_edge_punct).to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Canonical normalization for a skill mention: lowercase, trim, collapse
/// internal whitespace, strip surrounding punctuation. Two strings are the
/// same mention iff they normalize equal.
pub fn normalize_term(s: &str) -> String {
    tokenize(s).join(" ")
}

fn def(name: &str, aliases: &[&str]) -> SkillDef {
    SkillDef {
        name: name.to_string(),
        aliases: aliases.iter().map(|s| s.to_string()).collect(),
    }
}

/// Curated default skill table. Replaced wholesale by `SKILLS_PATH` when set.
fn builtin_defs() -> Vec<SkillDef> {
    vec![
        // Languages
        def("JavaScript", &["js", "ecmascript"]),
        def("TypeScript", &["ts"]),
        def("Python", &[]),
        def("Rust", &[]),
        def("Go", &["golang"]),
        def("Java", &[]),
        def("C++", &["cpp"]),
        def("C#", &["csharp"]),
        def("Ruby", &[]),
        def("PHP", &[]),
        def("Swift", &[]),
        def("Kotlin", &[]),
        def("Scala", &[]),
        def("SQL", &[]),
        def("HTML", &[]),
        def("CSS", &[]),
        // Web frameworks
        def("React", &["reactjs", "react.js"]),
        def("Vue", &["vuejs", "vue.js"]),
        def("Angular", &["angularjs"]),
        def("Node.js", &["nodejs", "node"]),
        def("Express", &["expressjs"]),
        def("Django", &[]),
        def("Flask", &[]),
        def("Spring Boot", &["spring"]),
        def("GraphQL", &[]),
        def("REST", &["restful"]),
        def("gRPC", &[]),
        // Infrastructure
        def("Docker", &[]),
        def("Kubernetes", &["k8s"]),
        def("Terraform", &[]),
        def("Ansible", &[]),
        def("Jenkins", &[]),
        def("CI/CD", &["cicd", "continuous integration"]),
        def("AWS", &["amazon web services"]),
        def("Azure", &[]),
        def("GCP", &["google cloud", "google cloud platform"]),
        def("Linux", &[]),
        def("Git", &[]),
        def("Microservices", &[]),
        def("DevOps", &[]),
        // Data stores
        def("PostgreSQL", &["postgres"]),
        def("MySQL", &[]),
        def("MongoDB", &["mongo"]),
        def("Redis", &[]),
        def("Elasticsearch", &["elastic search"]),
        def("Kafka", &["apache kafka"]),
        def("Spark", &["apache spark"]),
        def("Hadoop", &[]),
        def("Airflow", &[]),
        // Data science / ML
        def("Machine Learning", &["ml"]),
        def("Deep Learning", &[]),
        def("NLP", &["natural language processing"]),
        def("TensorFlow", &[]),
        def("PyTorch", &[]),
        def("Pandas", &[]),
        def("NumPy", &[]),
        def("scikit-learn", &["sklearn"]),
        def("Data Analysis", &["data analytics"]),
        // Practices
        def("Agile", &["scrum"]),
        def("TDD", &["test driven development", "test-driven development"]),
    ]
}
