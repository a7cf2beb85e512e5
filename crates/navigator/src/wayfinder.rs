use crate::error::{NavigatorError, Result};
use crate::query::parse_route_query;
use std::path::Path;
use wayfinder_directions::DirectionSynthesizer;
use wayfinder_floorplan::{FloorPlan, FloorPlanDocument, FloorPlanError, Route};
use wayfinder_protocol::{
    CandidateLocation, ErrorEnvelope, HighlightResponse, HighlightedEdge, InferenceResponse,
    LocationEntry, LostUserResponse, MatchTier, ResolveResponse, RouteResponse, Suggestion,
};
use wayfinder_resolver::{Inference, ResolveError, Resolution, Resolver};

const SUGGESTION_LIMIT: usize = 3;

const _: fn() = || {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Wayfinder>();
};

/// The wayfinding core: floor plan, phrase tables and the operations the
/// host exposes. Read-only once built; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Wayfinder {
    plan: FloorPlan,
    resolver: Resolver,
}

impl Wayfinder {
    /// Build from a document. Any integrity failure here must stop startup.
    pub fn from_document(doc: &FloorPlanDocument) -> Result<Self> {
        let plan = FloorPlan::from_document(doc)?;
        let resolver = Resolver::from_document(doc, &plan)?;
        Ok(Self { plan, resolver })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        log::debug!("Loading floor plan from {}", path.display());
        Self::from_document(&FloorPlanDocument::from_file(path)?)
    }

    /// The bundled library floor plan
    #[must_use]
    pub fn builtin() -> Self {
        let plan = FloorPlan::builtin();
        let resolver = Resolver::builtin(&plan);
        Self { plan, resolver }
    }

    #[must_use]
    pub fn plan(&self) -> &FloorPlan {
        &self.plan
    }

    #[must_use]
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Every location, in floor plan order, for pickers
    #[must_use]
    pub fn list_locations(&self) -> Vec<LocationEntry> {
        self.plan
            .nodes()
            .map(|node| LocationEntry {
                id: node.id.clone(),
                label: node.label.clone(),
            })
            .collect()
    }

    pub fn resolve_location(&self, text: &str) -> Result<ResolveResponse> {
        let resolution = self.resolver.resolve(text)?;
        Ok(resolve_response(text, resolution))
    }

    #[must_use]
    pub fn infer_location(&self, description: &str) -> InferenceResponse {
        inference_response(self.resolver.infer(description))
    }

    /// Shortest route between two node ids, with numbered directions
    pub fn route(&self, start_id: &str, goal_id: &str) -> Result<RouteResponse> {
        let route = self.plan.shortest_route(start_id, goal_id)?;
        log::debug!(
            "Route {start_id} -> {goal_id}: {:?} (weight {})",
            route.path,
            route.total_weight
        );
        self.route_response(route)
    }

    /// Route between free-text places; no start means the default start
    pub fn route_between(&self, from: Option<&str>, to: &str) -> Result<RouteResponse> {
        let start = match from {
            Some(text) => self.resolver.resolve(text)?.node_id,
            None => self.plan.default_start().id.clone(),
        };
        let goal = self.resolver.resolve(to)?.node_id;
        self.route(&start, &goal)
    }

    /// Text block for a route answer: a header and the numbered steps, or the
    /// "already there" message.
    pub fn render_route(&self, route: &RouteResponse) -> Result<String> {
        let route = Route {
            path: route.path.clone(),
            total_weight: route.total_weight,
        };
        Ok(DirectionSynthesizer::new(&self.plan).render(&route)?)
    }

    /// Nodes and edges of `path` to emphasise on the map
    pub fn highlight_and_project<S: AsRef<str>>(&self, path: &[S]) -> Result<HighlightResponse> {
        let overlay = self.plan.highlight(path)?;
        Ok(HighlightResponse {
            highlighted_nodes: overlay
                .highlighted_nodes()
                .into_iter()
                .map(str::to_string)
                .collect(),
            highlighted_edges: overlay
                .highlighted_edges()
                .into_iter()
                .map(|(from, to)| HighlightedEdge {
                    from: from.to_string(),
                    to: to.to_string(),
                })
                .collect(),
        })
    }

    /// Answer a routing question such as "how do I get from 1south to the
    /// info commons?".
    ///
    /// A question with no marker words at all ("periodicals please") is
    /// matched against the whole text. Once a start or destination clause is
    /// found, only the destination clause can name the goal.
    pub fn ask(&self, question: &str) -> Result<RouteResponse> {
        if !question.chars().any(char::is_alphanumeric) {
            return Err(NavigatorError::InvalidRequest(
                "ask needs a question naming a destination".to_string(),
            ));
        }

        let parsed = parse_route_query(question);
        log::debug!("Parsed route query: {parsed:?}");

        let goal = match (&parsed.destination, &parsed.start) {
            (Some(phrase), _) => self.resolve_phrase(phrase),
            (None, None) => self.resolver.alias_within(question),
            (None, Some(_)) => None,
        }
        .ok_or_else(|| ResolveError::NoMatch {
            query: parsed
                .destination
                .clone()
                .unwrap_or_else(|| question.to_string()),
        })?;

        let start = match parsed.start.as_deref().and_then(|p| self.resolve_phrase(p)) {
            Some(start) => start.node_id,
            None => self.plan.default_start().id.clone(),
        };

        self.route(&start, &goal.node_id)
    }

    /// Place a lost user from their description, then route them to
    /// `destination` (or the default start). No directions are produced while
    /// the location is still ambiguous, or when `destination` names no
    /// location; the inference is returned either way.
    pub fn assist_lost_user(
        &self,
        description: &str,
        destination: Option<&str>,
    ) -> Result<LostUserResponse> {
        let inference = self.resolver.infer(description);
        let located = inference.located().map(|c| c.node_id.clone());

        let mut response = LostUserResponse {
            inference: inference_response(inference),
            destination: None,
            route: None,
            highlight: None,
            unresolved_destination: None,
            suggestions: Vec::new(),
        };

        let goal = match destination {
            Some(text) => match self.resolver.resolve(text) {
                Ok(resolution) => resolution.node_id,
                Err(ResolveError::NoMatch { query }) => {
                    log::debug!("Lost user destination '{query}' matched nothing");
                    response.suggestions = self.suggest(&query, SUGGESTION_LIMIT);
                    response.unresolved_destination = Some(query);
                    return Ok(response);
                }
                Err(err) => return Err(err.into()),
            },
            None => self.plan.default_start().id.clone(),
        };

        if let Some(start) = located {
            let route = self.route(&start, &goal)?;
            response.highlight = Some(self.highlight_and_project(&route.path)?);
            response.destination = Some(goal);
            response.route = Some(route);
        }

        Ok(response)
    }

    #[must_use]
    pub fn suggest(&self, text: &str, limit: usize) -> Vec<Suggestion> {
        self.resolver
            .suggest(text, limit)
            .into_iter()
            .map(|s| Suggestion {
                node_id: s.node_id,
                label: s.label,
            })
            .collect()
    }

    /// Wire form of a failure, with "did you mean" entries for unmatched
    /// place names.
    #[must_use]
    pub fn error_envelope(&self, err: &NavigatorError) -> ErrorEnvelope {
        let (message, hint, suggestions) = match err {
            NavigatorError::Resolve(ResolveError::NoMatch { query }) => (
                format!("I couldn't find a location matching '{}'.", query.trim()),
                Some(
                    "Please rephrase, pick one of the suggestions, or describe what you can see around you."
                        .to_string(),
                ),
                self.suggest(query, SUGGESTION_LIMIT),
            ),
            NavigatorError::FloorPlan(FloorPlanError::NoPath { .. }) => (
                "No path found between these locations.".to_string(),
                None,
                Vec::new(),
            ),
            other => (other.to_string(), None, Vec::new()),
        };

        ErrorEnvelope {
            code: err.code().to_string(),
            message,
            hint,
            suggestions,
        }
    }

    fn resolve_phrase(&self, phrase: &str) -> Option<Resolution> {
        self.resolver
            .alias_within(phrase)
            .or_else(|| self.resolver.resolve(phrase).ok())
    }

    fn route_response(&self, route: Route) -> Result<RouteResponse> {
        let directions = DirectionSynthesizer::new(&self.plan)
            .synthesize(&route.path)?
            .iter()
            .map(ToString::to_string)
            .collect();
        Ok(RouteResponse {
            already_there: route.is_stationary(),
            path: route.path,
            total_weight: route.total_weight,
            directions,
        })
    }
}

fn resolve_response(query: &str, resolution: Resolution) -> ResolveResponse {
    ResolveResponse {
        query: query.to_string(),
        node_id: resolution.node_id,
        label: resolution.label,
        tier: match resolution.tier {
            wayfinder_resolver::MatchTier::Alias => MatchTier::Alias,
            wayfinder_resolver::MatchTier::Substring => MatchTier::Substring,
            wayfinder_resolver::MatchTier::Fuzzy => MatchTier::Fuzzy,
        },
    }
}

fn inference_response(inference: Inference) -> InferenceResponse {
    InferenceResponse {
        candidates: inference
            .candidates
            .into_iter()
            .map(|c| CandidateLocation {
                node_id: c.node_id,
                label: c.label,
                confidence: c.confidence,
            })
            .collect(),
        needs_clarification: inference.needs_clarification,
        questions: inference.questions,
    }
}
