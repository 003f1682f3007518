//! Skill extraction — maps document text to the canonical skills it mentions.

use std::collections::HashSet;

use crate::analysis::vocabulary::{tokenize, SkillId, Vocabulary};

/// Ordered set of canonical skills found in one document. Each skill appears
/// at most once, in first-occurrence order, however many times the text
/// mentions it.
#[derive(Debug, Default, Clone)]
pub struct SkillSet {
    ordered: Vec<SkillId>,
    seen: HashSet<SkillId>,
}

impl SkillSet {
    fn insert(&mut self, id: SkillId) {
        if self.seen.insert(id.clone()) {
            self.ordered.push(id);
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Skills in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = &SkillId> {
        self.ordered.iter()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// Scans text for skill mentions with a bounded sliding window, widest span
/// first, so multi-word aliases ("machine learning") win over their
/// single-word substrings ("learning"). A matched span is consumed whole;
/// its tokens are not re-matched as shorter aliases.
///
/// Empty text yields an empty set, which is valid, not an error.
pub fn extract_skills(text: &str, vocabulary: &Vocabulary) -> SkillSet {
    let tokens = tokenize(text);
    let max_window = vocabulary.max_alias_tokens();
    let mut skills = SkillSet::default();

    let mut i = 0;
    while i < tokens.len() {
        let mut advance = 1;
        let upper = max_window.min(tokens.len() - i);
        for width in (1..=upper).rev() {
            let span = tokens[i..i + width].join(" ");
            if let Some(id) = vocabulary.lookup(&span) {
                skills.insert(id.clone());
                advance = width;
                break;
            }
        }
        i += advance;
    }

    skills
}
