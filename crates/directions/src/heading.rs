use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinate difference treated as "slight" rather than straight ahead
pub const SLIGHT_TURN_TOLERANCE: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heading {
    North,
    South,
    East,
    West,
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Heading::North => "north",
            Heading::South => "south",
            Heading::East => "east",
            Heading::West => "west",
        })
    }
}

/// Sideways component of a segment relative to its heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Deviation {
    Straight,
    /// East-west leg drifting by more than the tolerance
    SlightRight,
    SlightLeft,
    /// North-south leg entered from the side
    TurnRight,
    TurnLeft,
}

/// Movement of one path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Movement {
    pub heading: Heading,
    pub deviation: Deviation,
}

impl Movement {
    /// Classify the displacement `(dx, dy)`.
    ///
    /// Mostly east-west legs take the slight right/left from `dy` the same way
    /// whichever way they head: `dy > 20` is "slightly to your right" for both
    /// east and west. Product has not confirmed the west-bound wording, so it
    /// stays as it is.
    #[must_use]
    pub fn classify(dx: f64, dy: f64) -> Self {
        if dx.abs() > dy.abs() {
            let heading = if dx > 0.0 { Heading::East } else { Heading::West };
            let deviation = if dy > SLIGHT_TURN_TOLERANCE {
                Deviation::SlightRight
            } else if dy < -SLIGHT_TURN_TOLERANCE {
                Deviation::SlightLeft
            } else {
                Deviation::Straight
            };
            Self { heading, deviation }
        } else {
            let heading = if dy > 0.0 { Heading::North } else { Heading::South };
            let deviation = if dx > SLIGHT_TURN_TOLERANCE {
                Deviation::TurnRight
            } else if dx < -SLIGHT_TURN_TOLERANCE {
                Deviation::TurnLeft
            } else {
                Deviation::Straight
            };
            Self { heading, deviation }
        }
    }

    /// Sentence for moving from `from` to `to`
    #[must_use]
    pub fn describe(&self, from: &str, to: &str) -> String {
        let heading = self.heading;
        let east_west = matches!(heading, Heading::East | Heading::West);
        match (self.deviation, east_west) {
            (Deviation::Straight, true) => {
                format!("From {from}, continue straight {heading} along the hallway to reach {to}")
            }
            (Deviation::Straight, false) => {
                format!("From {from}, head straight {heading} to reach {to}")
            }
            (Deviation::SlightRight, _) => {
                format!("From {from}, head {heading} and slightly to your right to reach {to}")
            }
            (Deviation::SlightLeft, _) => {
                format!("From {from}, head {heading} and slightly to your left to reach {to}")
            }
            (Deviation::TurnRight, _) => {
                format!("From {from}, turn right and head {heading} to reach {to}")
            }
            (Deviation::TurnLeft, _) => {
                format!("From {from}, turn left and head {heading} to reach {to}")
            }
        }
    }
}
