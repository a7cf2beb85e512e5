use crate::heading::Movement;
use serde::{Deserialize, Serialize};
use std::fmt;
use wayfinder_floorplan::{FloorPlan, Result, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionKind {
    /// Walk from one node to the next
    Movement,
    /// Fixed note about what to look for on arrival
    Landmark,
}

/// One numbered line of directions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// 1-based
    pub step: usize,
    pub kind: InstructionKind,
    pub text: String,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.step, self.text)
    }
}

/// Turns node paths into walking directions
pub struct DirectionSynthesizer<'a> {
    plan: &'a FloorPlan,
}

impl<'a> DirectionSynthesizer<'a> {
    #[must_use]
    pub fn new(plan: &'a FloorPlan) -> Self {
        Self { plan }
    }

    /// One movement sentence per segment, each followed by the destination's
    /// landmark note when it has one. A single-node path yields nothing;
    /// callers report "already there" instead.
    pub fn synthesize<S: AsRef<str>>(&self, path: &[S]) -> Result<Vec<Instruction>> {
        let nodes = path
            .iter()
            .map(|id| self.plan.node(id.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut lines: Vec<(InstructionKind, String)> = Vec::new();
        for pair in nodes.windows(2) {
            let (current, next) = (pair[0], pair[1]);
            let (dx, dy) = current.position.delta_to(next.position);
            let movement = Movement::classify(dx, dy);
            log::trace!(
                "{} -> {}: d=({dx}, {dy}) {:?}",
                current.id,
                next.id,
                movement
            );

            lines.push((
                InstructionKind::Movement,
                movement.describe(&current.label, &next.label),
            ));
            if let Some(landmark) = &next.landmark {
                lines.push((InstructionKind::Landmark, landmark.clone()));
            }
        }

        Ok(lines
            .into_iter()
            .enumerate()
            .map(|(i, (kind, text))| Instruction {
                step: i + 1,
                kind,
                text,
            })
            .collect())
    }

    /// Human-readable block for a route: a header and numbered steps, or the
    /// "already there" message for a single-node route.
    pub fn render(&self, route: &Route) -> Result<String> {
        if route.is_stationary() {
            return Ok(ALREADY_THERE.to_string());
        }

        let start = self.plan.node(route.start())?;
        let goal = self.plan.node(route.goal())?;
        let steps = self
            .synthesize(&route.path)?
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");

        Ok(format!(
            "Directions from {} to {}:\n\n{steps}",
            start.label, goal.label
        ))
    }
}

/// Reply for a route whose start is its goal
pub const ALREADY_THERE: &str = "You are already at your destination!";
