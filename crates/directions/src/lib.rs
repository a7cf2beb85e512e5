//! # Wayfinder Directions
//!
//! Natural-language, direction-aware instructions from a floor plan path.
//!
//! Each segment `(current, next)` is classified by its displacement: mostly
//! east-west legs read as "continue straight east along the hallway" or
//! "head west and slightly to your left"; mostly north-south legs read as
//! "turn right and head north" or "head straight south". A node's landmark
//! note follows the segment that arrives there.

mod heading;
mod synthesizer;

pub use heading::{Deviation, Heading, Movement, SLIGHT_TURN_TOLERANCE};
pub use synthesizer::{DirectionSynthesizer, Instruction, InstructionKind, ALREADY_THERE};
