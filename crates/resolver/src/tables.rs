use crate::error::{ResolveError, Result};
use std::collections::HashMap;
use wayfinder_floorplan::{FloorPlan, FloorPlanDocument};

/// Lowercase and trim; every phrase and query goes through this before matching.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Phrase as written in the floor plan plus its matching form
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Phrase {
    pub display: String,
    pub normalized: String,
}

impl Phrase {
    fn new(raw: &str) -> Option<Self> {
        let normalized = normalize(raw);
        (!normalized.is_empty()).then(|| Self {
            display: raw.trim().to_string(),
            normalized,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct AliasEntry {
    pub phrase: String,
    pub node: usize,
}

#[derive(Debug, Clone)]
pub(crate) struct Descriptor {
    pub phrase: String,
    pub nodes: Vec<usize>,
}

/// Per-node record used to score lost-user descriptions
#[derive(Debug, Clone, Default)]
pub(crate) struct NodeProfile {
    pub features: Vec<Phrase>,
    pub nearby: Vec<Phrase>,
}

#[derive(Debug, Clone)]
pub(crate) struct NodeEntry {
    pub id: String,
    pub label: String,
    pub label_normalized: String,
}

/// Immutable phrase tables. Nodes are referred to by their position in
/// document order, which is also the tie-break order everywhere.
#[derive(Debug, Clone)]
pub(crate) struct LocationTables {
    pub nodes: Vec<NodeEntry>,
    pub aliases: Vec<AliasEntry>,
    pub alias_lookup: HashMap<String, usize>,
    pub descriptors: Vec<Descriptor>,
    pub profiles: Vec<NodeProfile>,
}

impl LocationTables {
    pub fn build(doc: &FloorPlanDocument, plan: &FloorPlan) -> Result<Self> {
        let mut position: HashMap<&str, usize> = HashMap::new();
        let mut nodes = Vec::with_capacity(doc.nodes.len());
        let mut profiles = Vec::with_capacity(doc.nodes.len());

        for record in &doc.nodes {
            let id = record.id.trim();
            let node = plan
                .node(id)
                .map_err(|_| ResolveError::Table(format!("'{id}' is not a floor plan node")))?;
            position.insert(id, nodes.len());
            nodes.push(NodeEntry {
                id: node.id.clone(),
                label: node.label.clone(),
                label_normalized: normalize(&node.label),
            });
            profiles.push(NodeProfile {
                features: record.features.iter().filter_map(|f| Phrase::new(f)).collect(),
                nearby: record.nearby.iter().filter_map(|n| Phrase::new(n)).collect(),
            });
        }

        let mut aliases: Vec<AliasEntry> = Vec::new();
        let mut alias_lookup: HashMap<String, usize> = HashMap::new();
        for record in &doc.aliases {
            let phrase = normalize(&record.phrase);
            if phrase.is_empty() {
                continue;
            }
            let node = position.get(record.node.trim()).copied().ok_or_else(|| {
                ResolveError::Table(format!(
                    "alias '{phrase}' references unknown node '{}'",
                    record.node
                ))
            })?;
            match alias_lookup.get(&phrase).map(|&i| aliases[i].node) {
                Some(existing) if existing == node => continue,
                Some(existing) => {
                    return Err(ResolveError::Table(format!(
                        "alias '{phrase}' is bound to both '{}' and '{}'",
                        nodes[existing].id, nodes[node].id
                    )));
                }
                None => {}
            }
            alias_lookup.insert(phrase.clone(), aliases.len());
            aliases.push(AliasEntry { phrase, node });
        }

        let mut descriptors = Vec::with_capacity(doc.descriptors.len());
        for record in &doc.descriptors {
            let phrase = normalize(&record.phrase);
            if phrase.is_empty() {
                continue;
            }
            let members = record
                .nodes
                .iter()
                .map(|id| {
                    position.get(id.trim()).copied().ok_or_else(|| {
                        ResolveError::Table(format!(
                            "descriptor '{phrase}' references unknown node '{id}'"
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            descriptors.push(Descriptor {
                phrase,
                nodes: members,
            });
        }

        Ok(Self {
            nodes,
            aliases,
            alias_lookup,
            descriptors,
            profiles,
        })
    }
}
