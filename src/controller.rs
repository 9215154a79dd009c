use crate::host::{ContentResolver, ResolvedContent};
use crate::route::{Location, parse_route};
use crate::trail::{Crumb, Trail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    /// A content lookup is in flight for the request with this sequence
    /// number.
    Resolving(u64),
}

/// Handed out by `observe`; the matching `commit` must present it back.
/// The sequence number is what keeps a slow resolution for an old signal
/// from overwriting a newer one.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveRequest {
    pub seq: u64,
    pub location: Location,
}

/// Drives the trail from routing-signal changes. Owns all mutable state
/// (trail, tracked current location, request sequencing) so tests can run a
/// fresh controller each.
#[derive(Debug, Default)]
pub struct Controller {
    trail: Trail,
    current: Option<Location>,
    seq: u64,
    state: ControllerState,
}

impl Default for ControllerState {
    fn default() -> Self {
        ControllerState::Idle
    }
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// React to a routing-signal change. Returns a resolve request when the
    /// signal names a location different from the tracked current one;
    /// unrecognized signals and same-id changes are no-ops.
    ///
    /// Issuing a new request supersedes any in-flight one: the old request's
    /// commit will be rejected as stale.
    pub fn observe(&mut self, signal: &str) -> Option<ResolveRequest> {
        let location = parse_route(signal)?;

        if let Some(current) = &self.current
            && current.id == location.id
        {
            return None;
        }

        self.seq += 1;
        self.state = ControllerState::Resolving(self.seq);
        Some(ResolveRequest {
            seq: self.seq,
            location,
        })
    }

    /// Commit the outcome of a resolve request. Stale requests (a newer
    /// signal has been observed since, or the controller was deactivated)
    /// are dropped without touching any state. A miss (`None` content)
    /// returns to idle leaving the trail and current location unchanged.
    /// Returns true when the trail was updated.
    pub fn commit(
        &mut self,
        request: &ResolveRequest,
        resolved: Option<ResolvedContent>,
        cap: usize,
    ) -> bool {
        if self.state != ControllerState::Resolving(request.seq) {
            return false;
        }

        self.state = ControllerState::Idle;

        let Some(content) = resolved else {
            return false;
        };

        self.trail.upsert(
            Crumb {
                id: request.location.id.clone(),
                kind: content.kind,
                label: content.title,
            },
            cap,
        );
        self.current = Some(request.location.clone());
        true
    }

    /// One full synchronous cycle: observe the signal, resolve through the
    /// collaborator, commit. Returns true when the trail changed.
    pub fn navigate(&mut self, signal: &str, resolver: &dyn ContentResolver, cap: usize) -> bool {
        match self.observe(signal) {
            Some(request) => {
                let resolved = resolver.resolve(&request.location.id);
                self.commit(&request, resolved, cap)
            }
            None => false,
        }
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn current(&self) -> Option<&Location> {
        self.current.as_ref()
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Synchronous teardown: empties the trail, forgets the current
    /// location, and invalidates any in-flight request.
    pub fn deactivate(&mut self) {
        self.trail.clear();
        self.current = None;
        self.state = ControllerState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::LocationKind;
    use std::collections::HashMap;

    struct MapResolver(HashMap<String, ResolvedContent>);

    impl MapResolver {
        fn with(entries: &[(&str, &str)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(id, title)| {
                        (
                            id.to_string(),
                            ResolvedContent {
                                kind: LocationKind::Page,
                                title: title.to_string(),
                            },
                        )
                    })
                    .collect(),
            )
        }
    }

    impl ContentResolver for MapResolver {
        fn resolve(&self, id: &str) -> Option<ResolvedContent> {
            self.0.get(id).cloned()
        }
    }

    fn trail_ids(controller: &Controller) -> Vec<String> {
        controller
            .trail()
            .entries()
            .iter()
            .map(|e| e.id.clone())
            .collect()
    }

    #[test]
    fn navigate_records_a_visit() {
        let resolver = MapResolver::with(&[("abc", "Alpha")]);
        let mut controller = Controller::new();
        assert!(controller.navigate("#/page/abc", &resolver, 8));
        assert_eq!(trail_ids(&controller), ["abc"]);
        assert_eq!(controller.current().unwrap().id, "abc");
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[test]
    fn unrecognized_signal_is_a_noop() {
        let resolver = MapResolver::with(&[("abc", "Alpha")]);
        let mut controller = Controller::new();
        controller.navigate("#/page/abc", &resolver, 8);
        assert!(!controller.navigate("#/search", &resolver, 8));
        assert_eq!(trail_ids(&controller), ["abc"]);
        assert_eq!(controller.current().unwrap().id, "abc");
    }

    #[test]
    fn same_id_signal_change_short_circuits() {
        let resolver = MapResolver::with(&[("abc", "Alpha")]);
        let mut controller = Controller::new();
        controller.navigate("#/page/abc", &resolver, 8);
        // hash decoration changed, id did not: no new request
        assert!(controller.observe("#/page/abc?anchor=bottom").is_none());
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[test]
    fn resolution_miss_leaves_state_unchanged() {
        let resolver = MapResolver::with(&[("abc", "Alpha")]);
        let mut controller = Controller::new();
        controller.navigate("#/page/abc", &resolver, 8);
        assert!(!controller.navigate("#/page/deleted", &resolver, 8));
        assert_eq!(trail_ids(&controller), ["abc"]);
        assert_eq!(controller.current().unwrap().id, "abc");
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[test]
    fn miss_does_not_update_current_so_retry_is_possible() {
        let mut controller = Controller::new();
        let miss = MapResolver::with(&[]);
        controller.navigate("#/page/late", &miss, 8);
        // the page appears afterwards; the same signal must resolve again
        let hit = MapResolver::with(&[("late", "Late page")]);
        assert!(controller.navigate("#/page/late", &hit, 8));
        assert_eq!(trail_ids(&controller), ["late"]);
    }

    #[test]
    fn stale_commit_is_dropped() {
        let mut controller = Controller::new();
        let old = controller.observe("#/page/first").unwrap();
        let new = controller.observe("#/page/second").unwrap();

        // the slow, superseded resolution arrives last in wall-clock order
        // but must not win
        let committed_new = controller.commit(
            &new,
            Some(ResolvedContent {
                kind: LocationKind::Page,
                title: "Second".to_string(),
            }),
            8,
        );
        let committed_old = controller.commit(
            &old,
            Some(ResolvedContent {
                kind: LocationKind::Page,
                title: "First".to_string(),
            }),
            8,
        );

        assert!(committed_new);
        assert!(!committed_old);
        assert_eq!(trail_ids(&controller), ["second"]);
        assert_eq!(controller.current().unwrap().id, "second");
    }

    #[test]
    fn superseded_request_leaves_newer_resolution_in_flight() {
        let mut controller = Controller::new();
        let old = controller.observe("#/page/first").unwrap();
        let _new = controller.observe("#/page/second").unwrap();

        // stale commit must not knock the controller out of Resolving for
        // the newer request
        controller.commit(
            &old,
            Some(ResolvedContent {
                kind: LocationKind::Page,
                title: "First".to_string(),
            }),
            8,
        );
        assert!(matches!(controller.state(), ControllerState::Resolving(_)));
    }

    #[test]
    fn revisiting_an_older_trail_entry_repromotes_it() {
        let resolver = MapResolver::with(&[("a", "A"), ("b", "B"), ("c", "C")]);
        let mut controller = Controller::new();
        controller.navigate("#/page/c", &resolver, 8);
        controller.navigate("#/page/b", &resolver, 8);
        controller.navigate("#/page/a", &resolver, 8);
        // b is in the trail but not current, so it resolves again and moves
        // to the front
        assert!(controller.navigate("#/page/b", &resolver, 8));
        assert_eq!(trail_ids(&controller), ["b", "a", "c"]);
    }

    #[test]
    fn cap_is_enforced_through_navigation() {
        let resolver =
            MapResolver::with(&[("a", "A"), ("b", "B"), ("c", "C"), ("d", "D")]);
        let mut controller = Controller::new();
        for id in ["a", "b", "c", "d"] {
            controller.navigate(&format!("#/page/{}", id), &resolver, 2);
        }
        assert_eq!(trail_ids(&controller), ["d", "c", "b"]);
    }

    #[test]
    fn deactivate_clears_everything() {
        let resolver = MapResolver::with(&[("abc", "Alpha")]);
        let mut controller = Controller::new();
        controller.navigate("#/page/abc", &resolver, 8);
        controller.deactivate();
        assert!(controller.trail().is_empty());
        assert!(controller.current().is_none());
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[test]
    fn commit_after_deactivate_is_ignored() {
        let mut controller = Controller::new();
        let request = controller.observe("#/page/abc").unwrap();
        controller.deactivate();
        let committed = controller.commit(
            &request,
            Some(ResolvedContent {
                kind: LocationKind::Page,
                title: "Alpha".to_string(),
            }),
            8,
        );
        assert!(!committed);
        assert!(controller.trail().is_empty());
    }

    #[test]
    fn crumb_kind_comes_from_resolved_content() {
        // route says block, resolver reports what the id actually is
        let mut controller = Controller::new();
        let request = controller.observe("#/page/p1?block=blk9").unwrap();
        assert_eq!(request.location.kind, LocationKind::Block);
        controller.commit(
            &request,
            Some(ResolvedContent {
                kind: LocationKind::Block,
                title: "block text".to_string(),
            }),
            8,
        );
        assert_eq!(controller.trail().entries()[0].kind, LocationKind::Block);
        assert_eq!(controller.trail().entries()[0].id, "blk9");
    }
}
