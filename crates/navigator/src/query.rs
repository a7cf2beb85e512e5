/// Words that introduce where the user wants to go. "get to" is caught by
/// its final word.
const DESTINATION_MARKERS: &[&str] = &["to", "find", "reach"];

/// Words that introduce where the user is
const START_MARKERS: &[&str] = &["from", "at", "in", "near"];

/// Place phrases pulled out of a routing question
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteQuery {
    pub start: Option<String>,
    pub destination: Option<String>,
}

/// Split a question like "how do I get from 1south to the info commons?"
/// into a start phrase and a destination phrase.
///
/// Markers only match whole words. The destination runs from the first
/// destination marker to the next start marker (or the end); the start runs
/// from the first start marker to the next destination marker (or the end).
/// Without a destination marker, the words before the start clause are the
/// destination ("where is the cafe from here").
#[must_use]
pub fn parse_route_query(question: &str) -> RouteQuery {
    let words: Vec<String> = question
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect();

    let is_destination = |w: &str| DESTINATION_MARKERS.contains(&w);
    let is_start = |w: &str| START_MARKERS.contains(&w);

    let first_destination = words.iter().position(|w| is_destination(w));
    let first_start = words.iter().position(|w| is_start(w));

    let clause = |from: usize, stop: &dyn Fn(&str) -> bool| -> Option<String> {
        let phrase: Vec<&str> = words[from..]
            .iter()
            .map(String::as_str)
            .take_while(|w| !stop(w))
            .collect();
        (!phrase.is_empty()).then(|| phrase.join(" "))
    };

    let destination = match (first_destination, first_start) {
        (Some(i), _) => clause(i + 1, &is_start),
        (None, Some(0)) => None,
        (None, Some(j)) => Some(words[..j].join(" ")),
        (None, None) => None,
    };
    let start = first_start.and_then(|j| clause(j + 1, &is_destination));

    RouteQuery { start, destination }
}
