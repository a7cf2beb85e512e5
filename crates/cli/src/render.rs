//! Plain-text output for `--format text`.

use anyhow::Result;
use wayfinder_navigator::Wayfinder;
use wayfinder_protocol::{
    ErrorEnvelope, HighlightResponse, InferenceResponse, LocationEntry, LostUserResponse,
    MatchTier, ResolveResponse, RouteResponse,
};

pub(crate) fn locations(locations: &[LocationEntry]) -> String {
    locations
        .iter()
        .map(|l| format!("{}\t{}", l.id, l.label))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn resolution(resolution: &ResolveResponse) -> String {
    let how = match resolution.tier {
        MatchTier::Alias => "known name",
        MatchTier::Substring => "partial name",
        MatchTier::Fuzzy => "closest spelling",
    };
    format!("{} ({}), matched by {how}", resolution.label, resolution.node_id)
}

pub(crate) fn inference(inference: &InferenceResponse) -> String {
    let mut lines: Vec<String> = inference
        .candidates
        .iter()
        .map(|c| format!("{} ({}): {:.1}", c.label, c.node_id, c.confidence))
        .collect();

    if inference.needs_clarification {
        if lines.is_empty() {
            lines.push("I couldn't tell where you are from that description.".to_string());
        }
        lines.push(String::new());
        lines.push("Could you tell me a bit more?".to_string());
        lines.extend(inference.questions.iter().map(|q| format!("- {q}")));
    }
    lines.join("\n")
}

pub(crate) fn route(wayfinder: &Wayfinder, route: &RouteResponse) -> Result<String> {
    Ok(wayfinder.render_route(route)?)
}

pub(crate) fn highlight(highlight: &HighlightResponse) -> String {
    highlight.highlighted_nodes.join(" -> ")
}

pub(crate) fn lost_user(wayfinder: &Wayfinder, response: &LostUserResponse) -> Result<String> {
    let mut out = inference(&response.inference);
    if let Some(place) = &response.unresolved_destination {
        out.push_str(&format!("\n\nI couldn't find a location matching '{place}'."));
        if !response.suggestions.is_empty() {
            let names: Vec<&str> = response.suggestions.iter().map(|s| s.label.as_str()).collect();
            out.push_str(&format!("\nDid you mean: {}?", names.join(", ")));
        }
    }
    if let Some(directions) = &response.route {
        out.push_str("\n\n");
        out.push_str(&route(wayfinder, directions)?);
    }
    Ok(out)
}

pub(crate) fn error(envelope: &ErrorEnvelope) -> String {
    let mut out = envelope.message.clone();
    if !envelope.suggestions.is_empty() {
        let names: Vec<&str> = envelope
            .suggestions
            .iter()
            .map(|s| s.label.as_str())
            .collect();
        out.push_str(&format!("\nDid you mean: {}?", names.join(", ")));
    }
    if let Some(hint) = &envelope.hint {
        out.push('\n');
        out.push_str(hint);
    }
    out
}
