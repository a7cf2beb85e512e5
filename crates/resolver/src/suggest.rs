use crate::resolve::Resolver;
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32String};
use serde::{Deserialize, Serialize};

/// "Did you mean" entry offered after a failed resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub node_id: String,
    pub label: String,
}

impl Resolver {
    /// Rank nodes by fuzzy match of `query` against their labels and aliases.
    ///
    /// The matcher needs `&mut`, so one is built per call and the resolver
    /// stays shareable.
    #[must_use]
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<Suggestion> {
        if query.trim().is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut matcher = Matcher::new(Config::DEFAULT);
        let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);
        let tables = &self.tables;

        let mut best: Vec<Option<u32>> = vec![None; tables.nodes.len()];
        let mut consider = |node: usize, text: &str, matcher: &mut Matcher| {
            let haystack = Utf32String::from(text);
            if let Some(score) = pattern.score(haystack.slice(..), matcher) {
                let slot = &mut best[node];
                *slot = Some(slot.map_or(score, |prev| prev.max(score)));
            }
        };

        for (i, node) in tables.nodes.iter().enumerate() {
            consider(i, &node.label, &mut matcher);
        }
        for alias in &tables.aliases {
            consider(alias.node, &alias.phrase, &mut matcher);
        }

        let mut scored: Vec<(usize, u32)> = best
            .into_iter()
            .enumerate()
            .filter_map(|(i, score)| score.map(|s| (i, s)))
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.truncate(limit);

        scored
            .into_iter()
            .map(|(i, _)| Suggestion {
                node_id: tables.nodes[i].id.clone(),
                label: tables.nodes[i].label.clone(),
            })
            .collect()
    }
}
