use crate::error::Result;
use crate::types::FloorPlan;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

/// Render state of a single node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    #[default]
    Normal,
    Highlighted,
}

/// Per-request display state for every node of a plan.
///
/// The plan itself carries no display state; each request projects its path
/// onto its own overlay and hands that to the renderer.
#[derive(Debug, Clone)]
pub struct HighlightOverlay<'a> {
    plan: &'a FloorPlan,
    states: Vec<DisplayState>,
    path: Vec<NodeIndex>,
}

impl<'a> HighlightOverlay<'a> {
    /// Overlay with every node in [`DisplayState::Normal`]
    #[must_use]
    pub fn new(plan: &'a FloorPlan) -> Self {
        Self {
            plan,
            states: vec![DisplayState::Normal; plan.node_count()],
            path: Vec::new(),
        }
    }

    /// Reset every node, then highlight each node of `path`.
    ///
    /// Unknown ids fail before any state changes.
    pub fn project<S: AsRef<str>>(&mut self, path: &[S]) -> Result<()> {
        let indices = path
            .iter()
            .map(|id| self.plan.index_of(id.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        self.states.fill(DisplayState::Normal);
        for idx in &indices {
            self.states[idx.index()] = DisplayState::Highlighted;
        }
        self.path = indices;
        Ok(())
    }

    pub fn state(&self, id: &str) -> Result<DisplayState> {
        let idx = self.plan.index_of(id)?;
        Ok(self.states[idx.index()])
    }

    /// Highlighted nodes in path order, without repeats
    #[must_use]
    pub fn highlighted_nodes(&self) -> Vec<&'a str> {
        let mut seen = vec![false; self.states.len()];
        let plan = self.plan;
        self.path
            .iter()
            .filter(|idx| !std::mem::replace(&mut seen[idx.index()], true))
            .map(|idx| plan.id_at(*idx))
            .collect()
    }

    /// Consecutive path pairs that are joined by a hallway
    #[must_use]
    pub fn highlighted_edges(&self) -> Vec<(&'a str, &'a str)> {
        let plan = self.plan;
        self.path
            .windows(2)
            .filter(|pair| plan.graph.find_edge(pair[0], pair[1]).is_some())
            .map(|pair| (plan.id_at(pair[0]), plan.id_at(pair[1])))
            .collect()
    }

    /// Every node with its state, in document order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, DisplayState)> + '_ {
        let plan = self.plan;
        plan.graph
            .node_indices()
            .map(move |idx| (plan.id_at(idx), self.states[idx.index()]))
    }
}

impl FloorPlan {
    /// Project `path` onto a fresh overlay
    pub fn highlight<S: AsRef<str>>(&self, path: &[S]) -> Result<HighlightOverlay<'_>> {
        let mut overlay = HighlightOverlay::new(self);
        overlay.project(path)?;
        Ok(overlay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FloorPlanError;
    use pretty_assertions::assert_eq;

    #[test]
    fn marks_path_and_resets_the_rest() {
        let plan = FloorPlan::builtin();
        let mut overlay = plan
            .highlight(&["mainEntrance", "circulation", "toCafeBergson"])
            .unwrap();

        assert_eq!(overlay.state("circulation").unwrap(), DisplayState::Highlighted);
        assert_eq!(overlay.state("vocalBooth").unwrap(), DisplayState::Normal);
        assert_eq!(
            overlay.highlighted_edges(),
            vec![("mainEntrance", "circulation"), ("circulation", "toCafeBergson")]
        );

        overlay.project(&["vocalBooth"]).unwrap();
        assert_eq!(overlay.state("circulation").unwrap(), DisplayState::Normal);
        assert_eq!(overlay.highlighted_nodes(), vec!["vocalBooth"]);
        assert!(overlay.highlighted_edges().is_empty());

        let highlighted = overlay
            .iter()
            .filter(|(_, state)| *state == DisplayState::Highlighted)
            .count();
        assert_eq!(highlighted, 1);
    }

    #[test]
    fn overlays_are_independent() {
        let plan = FloorPlan::builtin();
        let first = plan.highlight(&["circulation"]).unwrap();
        let second = plan.highlight(&["referenceCollection"]).unwrap();
        assert_eq!(first.state("referenceCollection").unwrap(), DisplayState::Normal);
        assert_eq!(second.state("circulation").unwrap(), DisplayState::Normal);
    }

    #[test]
    fn unknown_node_leaves_overlay_untouched() {
        let plan = FloorPlan::builtin();
        let mut overlay = plan.highlight(&["circulation"]).unwrap();
        let err = overlay.project(&["circulation", "attic"]).unwrap_err();
        assert!(matches!(err, FloorPlanError::UnknownNode(id) if id == "attic"));
        assert_eq!(overlay.state("circulation").unwrap(), DisplayState::Highlighted);
    }
}
