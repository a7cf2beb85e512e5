use crate::error::{ResolveError, Result};
use crate::tables::{normalize, LocationTables};
use serde::{Deserialize, Serialize};
use wayfinder_floorplan::{FloorPlan, FloorPlanDocument};

/// Minimum similarity (0..=1) for a fuzzy label match to be accepted
pub const FUZZY_ACCEPT_THRESHOLD: f64 = 0.6;

/// Which resolution step produced the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Query equals an alias
    Alias,
    /// Longest alias contained in, or containing, the query
    Substring,
    /// Closest node label by similarity ratio
    Fuzzy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub node_id: String,
    pub label: String,
    pub tier: MatchTier,
    /// Alias phrase or lowercase label that matched
    pub matched: String,
    /// 1.0 for alias tiers, the similarity ratio for fuzzy matches
    pub similarity: f64,
}

/// Maps free-text phrases to floor plan nodes.
///
/// Immutable after construction; all lookups are pure.
#[derive(Debug, Clone)]
pub struct Resolver {
    pub(crate) tables: LocationTables,
}

impl Resolver {
    pub fn from_document(doc: &FloorPlanDocument, plan: &FloorPlan) -> Result<Self> {
        Ok(Self {
            tables: LocationTables::build(doc, plan)?,
        })
    }

    /// Resolver over the bundled library floor plan
    #[must_use]
    pub fn builtin(plan: &FloorPlan) -> Self {
        Self::from_document(&FloorPlanDocument::builtin(), plan)
            .expect("bundled location tables must validate")
    }

    /// Resolve `text` to exactly one node: exact alias, then longest
    /// substring alias, then fuzzy label match.
    pub fn resolve(&self, text: &str) -> Result<Resolution> {
        let query = normalize(text);
        if query.is_empty() {
            return Err(no_match(text));
        }

        if let Some(&i) = self.tables.alias_lookup.get(&query) {
            let alias = &self.tables.aliases[i];
            log::debug!("'{query}' resolved by alias to {}", self.tables.nodes[alias.node].id);
            return Ok(self.resolution(alias.node, MatchTier::Alias, &alias.phrase, 1.0));
        }

        if let Some(i) = self.longest_alias(&query, true) {
            let alias = &self.tables.aliases[i];
            log::debug!(
                "'{query}' resolved by substring alias '{}' to {}",
                alias.phrase,
                self.tables.nodes[alias.node].id
            );
            return Ok(self.resolution(alias.node, MatchTier::Substring, &alias.phrase, 1.0));
        }

        let mut best: Option<(usize, f64)> = None;
        for (i, node) in self.tables.nodes.iter().enumerate() {
            let score = strsim::normalized_levenshtein(&query, &node.label_normalized);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((i, score));
            }
        }

        match best {
            Some((i, score)) if score >= FUZZY_ACCEPT_THRESHOLD => {
                let node = &self.tables.nodes[i];
                log::debug!("'{query}' resolved fuzzily to {} ({score:.2})", node.id);
                Ok(self.resolution(i, MatchTier::Fuzzy, &node.label_normalized, score))
            }
            _ => Err(no_match(text)),
        }
    }

    /// Longest alias appearing inside `text`, ignoring aliases that merely
    /// contain it. Used to pull place names out of longer sentences.
    #[must_use]
    pub fn alias_within(&self, text: &str) -> Option<Resolution> {
        let query = normalize(text);
        if query.is_empty() {
            return None;
        }
        self.longest_alias(&query, false).map(|i| {
            let alias = &self.tables.aliases[i];
            self.resolution(alias.node, MatchTier::Substring, &alias.phrase, 1.0)
        })
    }

    /// Label of a node known to the tables
    #[must_use]
    pub fn label_of(&self, node_id: &str) -> Option<&str> {
        self.tables
            .nodes
            .iter()
            .find(|n| n.id == node_id)
            .map(|n| n.label.as_str())
    }

    /// First maximal-length alias in table order. Strict `>` keeps the
    /// earliest alias on ties.
    fn longest_alias(&self, query: &str, either_direction: bool) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for (i, alias) in self.tables.aliases.iter().enumerate() {
            let hit = query.contains(alias.phrase.as_str())
                || (either_direction && alias.phrase.contains(query));
            if !hit {
                continue;
            }
            let len = alias.phrase.chars().count();
            if best.map_or(true, |(_, top)| len > top) {
                best = Some((i, len));
            }
        }
        best.map(|(i, _)| i)
    }

    fn resolution(&self, node: usize, tier: MatchTier, matched: &str, similarity: f64) -> Resolution {
        let entry = &self.tables.nodes[node];
        Resolution {
            node_id: entry.id.clone(),
            label: entry.label.clone(),
            tier,
            matched: matched.to_string(),
            similarity,
        }
    }
}

fn no_match(text: &str) -> ResolveError {
    ResolveError::NoMatch {
        query: text.to_string(),
    }
}
