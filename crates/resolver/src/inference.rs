use crate::resolve::Resolver;
use crate::tables::normalize;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Scores are kept in tenths so accumulation is exact.
const DESCRIPTOR_POINTS: u32 = 3;
const FEATURE_POINTS: u32 = 4;
const NEARBY_POINTS: u32 = 2;
const FULL_POINTS: u32 = 10;
const CONFIDENT_POINTS: u32 = 7;

const MAX_CANDIDATES: usize = 3;
const MAX_FEATURES_IN_QUESTION: usize = 3;

const FOLLOW_UP_QUESTIONS: &[&str] = &[
    "Are you near any stairs or elevators?",
    "Can you see any room numbers or signs?",
    "Are you in a quiet study area or a more active space?",
    "Do you see any service desks or help stations nearby?",
    "Are there computer workstations in your vicinity?",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub node_id: String,
    pub label: String,
    /// In `[0, 1]`
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inference {
    /// Best first, at most three
    pub candidates: Vec<Candidate>,
    pub needs_clarification: bool,
    /// Empty unless clarification is needed
    pub questions: Vec<String>,
}

impl Inference {
    /// The single confident candidate, if any
    #[must_use]
    pub fn located(&self) -> Option<&Candidate> {
        if self.needs_clarification {
            None
        } else {
            self.candidates.first()
        }
    }
}

impl Resolver {
    /// Guess where a user is from a description of their surroundings.
    ///
    /// An alias mentioned anywhere in the text wins outright. Otherwise
    /// descriptors (+0.3 per node), features (+0.4) and nearby phrases (+0.2)
    /// accumulate per node, clamped to 1.0.
    #[must_use]
    pub fn infer(&self, description: &str) -> Inference {
        let text = normalize(description);
        let tables = &self.tables;

        if !text.is_empty() {
            if let Some(alias) = tables
                .aliases
                .iter()
                .find(|a| text.contains(a.phrase.as_str()))
            {
                log::debug!("Description names alias '{}'", alias.phrase);
                let node = &tables.nodes[alias.node];
                return Inference {
                    candidates: vec![Candidate {
                        node_id: node.id.clone(),
                        label: node.label.clone(),
                        confidence: 1.0,
                    }],
                    needs_clarification: false,
                    questions: Vec::new(),
                };
            }
        }

        // (node, points) in order of first contribution
        let mut scores: Vec<(usize, u32)> = Vec::new();
        let mut add = |node: usize, points: u32| {
            match scores.iter_mut().find(|(n, _)| *n == node) {
                Some((_, total)) => *total += points,
                None => scores.push((node, points)),
            }
        };

        if !text.is_empty() {
            for descriptor in &tables.descriptors {
                if text.contains(descriptor.phrase.as_str()) {
                    for &node in &descriptor.nodes {
                        add(node, DESCRIPTOR_POINTS);
                    }
                }
            }

            for (node, profile) in tables.profiles.iter().enumerate() {
                for feature in &profile.features {
                    if text.contains(feature.normalized.as_str()) {
                        add(node, FEATURE_POINTS);
                    }
                }
                for nearby in &profile.nearby {
                    if text.contains(nearby.normalized.as_str()) {
                        add(node, NEARBY_POINTS);
                    }
                }
            }
        }

        // Stable: equal scores keep first-contribution order
        scores.sort_by(|a, b| b.1.cmp(&a.1));
        scores.truncate(MAX_CANDIDATES);
        log::debug!("Inference scores: {scores:?}");

        let needs_clarification = scores.len() > 1
            || scores
                .first()
                .map_or(true, |(_, points)| *points < CONFIDENT_POINTS);

        let candidates: Vec<Candidate> = scores
            .iter()
            .map(|&(node, points)| {
                let entry = &tables.nodes[node];
                Candidate {
                    node_id: entry.id.clone(),
                    label: entry.label.clone(),
                    confidence: points.min(FULL_POINTS) as f32 / FULL_POINTS as f32,
                }
            })
            .collect();

        let questions = if needs_clarification {
            self.clarifying_questions(&scores)
        } else {
            Vec::new()
        };

        Inference {
            candidates,
            needs_clarification,
            questions,
        }
    }

    fn clarifying_questions(&self, scores: &[(usize, u32)]) -> Vec<String> {
        let mut seen = HashSet::new();
        let features: Vec<&str> = scores
            .iter()
            .flat_map(|(node, _)| self.tables.profiles[*node].features.iter())
            .filter(|f| seen.insert(f.normalized.as_str()))
            .map(|f| f.display.as_str())
            .take(MAX_FEATURES_IN_QUESTION)
            .collect();

        let mut questions = Vec::with_capacity(FOLLOW_UP_QUESTIONS.len() + 1);
        if !features.is_empty() {
            questions.push(format!(
                "Do you see any of these features: {}?",
                features.join(", ")
            ));
        }
        questions.extend(FOLLOW_UP_QUESTIONS.iter().map(|q| q.to_string()));
        questions
    }
}
