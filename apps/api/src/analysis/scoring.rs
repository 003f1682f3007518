//! Match scoring and result assembly.

use serde::Serialize;

use crate::analysis::skills::SkillSet;
use crate::analysis::vocabulary::{SkillId, Vocabulary};

/// Outcome of comparing a resume skill set against a job skill set, in
/// canonical skill ids. Both lists follow first-occurrence order in the job
/// text, so identical inputs always produce identical output.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub score: u32,
    pub matched: Vec<SkillId>,
    pub missing: Vec<SkillId>,
}

/// Coverage score: how much of the job's stated requirements the resume
/// covers. The denominator is the job's skill set, never the resume's, so a
/// resume padded with irrelevant skills cannot inflate the score.
pub fn score_match(resume: &SkillSet, job: &SkillSet) -> MatchOutcome {
    // An empty requirement set is trivially satisfied.
    if job.is_empty() {
        return MatchOutcome {
            score: 100,
            matched: Vec::new(),
            missing: Vec::new(),
        };
    }

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for id in job.iter() {
        if resume.contains(id) {
            matched.push(id.clone());
        } else {
            missing.push(id.clone());
        }
    }

    let score = (100.0 * matched.len() as f64 / job.len() as f64).round() as u32;
    MatchOutcome {
        score: score.min(100),
        matched,
        missing,
    }
}

/// Terminal output of one analysis request. Constructed once, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub score: u32,
    pub resume_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Maps canonical ids back to display labels. Pure and total: the alias that
/// triggered a match never leaks into the output — a resume saying "JS" is
/// reported as "JavaScript".
pub fn assemble(outcome: &MatchOutcome, vocabulary: &Vocabulary) -> AnalysisResult {
    let labels = |ids: &[SkillId]| -> Vec<String> {
        ids.iter()
            .map(|id| vocabulary.label(id).to_string())
            .collect()
    };

    AnalysisResult {
        score: outcome.score,
        resume_skills: labels(&outcome.matched),
        missing_skills: labels(&outcome.missing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::skills::extract_skills;
    use crate::analysis::vocabulary::SkillDef;

    fn vocab(names: &[&str]) -> Vocabulary {
        Vocabulary::from_defs(
            names
                .iter()
                .map(|name| SkillDef {
                    name: name.to_string(),
                    aliases: Vec::new(),
                })
                .collect(),
        )
        .unwrap()
    }

    fn set(text: &str, vocab: &Vocabulary) -> SkillSet {
        extract_skills(text, vocab)
    }

    #[test]
    fn test_coverage_scenario_two_of_three() {
        let vocab = vocab(&["Python", "Go", "Docker", "Kubernetes"]);
        let resume = set("Python, Go, Docker", &vocab);
        let job = set("Requires Python, Kubernetes, Go", &vocab);

        let outcome = score_match(&resume, &job);
        assert_eq!(outcome.score, 67); // round(100 * 2/3)
        assert_eq!(outcome.matched, vec!["python", "go"]);
        assert_eq!(outcome.missing, vec!["kubernetes"]);
    }

    #[test]
    fn test_empty_job_set_is_trivially_satisfied() {
        let vocab = vocab(&["Python"]);
        let resume = set("Python", &vocab);
        let job = set("", &vocab);

        let outcome = score_match(&resume, &job);
        assert_eq!(outcome.score, 100);
        assert!(outcome.matched.is_empty());
        assert!(outcome.missing.is_empty());
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let vocab = vocab(&["Python", "Rust"]);
        let resume = set("Python", &vocab);
        let job = set("Rust", &vocab);

        let outcome = score_match(&resume, &job);
        assert_eq!(outcome.score, 0);
        assert!(outcome.matched.is_empty());
        assert_eq!(outcome.missing, vec!["rust"]);
    }

    #[test]
    fn test_full_coverage_scores_100() {
        let vocab = vocab(&["Python", "Go"]);
        let resume = set("Go and Python and more", &vocab);
        let job = set("Python, Go", &vocab);

        let outcome = score_match(&resume, &job);
        assert_eq!(outcome.score, 100);
        assert!(outcome.missing.is_empty());
    }

    #[test]
    fn test_resume_verbosity_does_not_inflate_score() {
        let vocab = vocab(&["Python", "Go", "Docker", "Rust", "Java"]);
        let sparse = set("Python", &vocab);
        let padded = set("Python Docker Rust Java", &vocab);
        let job = set("Python and Go", &vocab);

        // Extra resume skills irrelevant to the job change nothing.
        assert_eq!(score_match(&sparse, &job).score, score_match(&padded, &job).score);
    }

    #[test]
    fn test_matched_and_missing_are_disjoint_and_cover_job() {
        let vocab = vocab(&["Python", "Go", "Docker", "Kubernetes", "Rust"]);
        let resume = set("Go Rust", &vocab);
        let job = set("Python Go Docker Kubernetes", &vocab);

        let outcome = score_match(&resume, &job);
        for id in &outcome.matched {
            assert!(!outcome.missing.contains(id));
        }
        assert_eq!(outcome.matched.len() + outcome.missing.len(), job.len());
    }

    #[test]
    fn test_score_bounded_and_rounded() {
        let vocab = vocab(&["A1", "B2", "C3", "D4", "E5", "F6", "G7"]);
        let resume = set("a1 b2 c3 d4 e5", &vocab);
        let job = set("a1 b2 c3 d4 e5 f6 g7", &vocab);

        let outcome = score_match(&resume, &job);
        assert_eq!(outcome.score, 71); // round(100 * 5/7) = round(71.43)
        assert!(outcome.score <= 100);
    }

    #[test]
    fn test_ordering_follows_job_text() {
        let vocab = vocab(&["Python", "Go", "Docker"]);
        let resume = set("Python Go Docker", &vocab);
        let job = set("Docker then Go then Python", &vocab);

        let outcome = score_match(&resume, &job);
        assert_eq!(outcome.matched, vec!["docker", "go", "python"]);
    }

    #[test]
    fn test_assemble_reports_canonical_labels() {
        let vocab = Vocabulary::from_defs(vec![
            SkillDef {
                name: "JavaScript".to_string(),
                aliases: vec!["js".to_string()],
            },
            SkillDef {
                name: "Kubernetes".to_string(),
                aliases: vec!["k8s".to_string()],
            },
        ])
        .unwrap();

        // Resume says "JS", job says "javascript" and "k8s": synonyms match.
        let resume = extract_skills("shipped JS apps", &vocab);
        let job = extract_skills("javascript and k8s required", &vocab);

        let result = assemble(&score_match(&resume, &job), &vocab);
        assert_eq!(result.score, 50);
        assert_eq!(result.resume_skills, vec!["JavaScript"]);
        assert_eq!(result.missing_skills, vec!["Kubernetes"]);
    }

    #[test]
    fn test_result_serializes_to_wire_shape() {
        let result = AnalysisResult {
            score: 67,
            resume_skills: vec!["Python".to_string(), "Go".to_string()],
            missing_skills: vec!["Kubernetes".to_string()],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["score"], 67);
        assert_eq!(json["resume_skills"][0], "Python");
        assert_eq!(json["missing_skills"][0], "Kubernetes");
    }
}
