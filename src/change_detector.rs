//! Cheap per-tick structural change detection.
//!
//! Running a full resync every display tick would walk the entire external
//! tree. The detector instead answers "did anything structural happen?" from
//! O(groups + cached nodes) worth of count queries, and the engine only
//! resyncs when it says yes. The host API offers no change notifications, so
//! polling a heuristic predicate is the intended mode of operation.

use crate::node_cache::NodeCache;
use crate::traits::{SceneNode, SceneSource};

/// Snapshot of the last-observed top-level shape, compared each tick.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    group_count: usize,
    group_child_counts: Vec<usize>,
    primed: bool,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the source's current shape. Call right after a resync.
    pub fn observe<S: SceneSource>(&mut self, source: &S) {
        let groups = source.groups();
        self.group_count = groups.len();
        self.group_child_counts = groups.iter().map(|g| g.root_ids.len()).collect();
        self.primed = true;
    }

    /// Forgets the observed shape, forcing the next check to report a change.
    pub fn reset(&mut self) {
        self.primed = false;
    }

    /// Decides whether a full resync is required this tick.
    ///
    /// True when the number of top-level groups changed, any group's
    /// immediate child count changed, any cached node's reported child count
    /// differs from its last-observed value, or a cached identity no longer
    /// resolves (the backing object was destroyed).
    ///
    /// This is a heuristic, not a complete diff: a node removed and another
    /// added in its place within one tick, with no observed count changing,
    /// is missed until some count does change. Accepted approximation.
    pub fn needs_resync<S: SceneSource>(&self, source: &S, cache: &NodeCache) -> bool {
        if !self.primed {
            return true;
        }

        let groups = source.groups();
        if groups.len() != self.group_count {
            return true;
        }
        for (group, &observed) in groups.iter().zip(&self.group_child_counts) {
            if group.root_ids.len() != observed {
                return true;
            }
        }

        for (id, slot) in cache.identities() {
            let Some(expected) = cache.tree().get(slot).map(|n| n.expected_child_count) else {
                continue;
            };
            match source.get_node(id) {
                None => return true,
                Some(node) => {
                    if node.num_children() != expected {
                        return true;
                    }
                }
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node_cache::mock::{MockObject, MockScene};
    use crate::node_cache::ResyncOptions;

    fn synced(scene: &MockScene) -> (NodeCache, ChangeDetector) {
        let mut cache = NodeCache::new();
        cache.resync(scene, &ResyncOptions::default());
        let mut detector = ChangeDetector::new();
        detector.observe(scene);
        (cache, detector)
    }

    fn scene_one() -> MockScene {
        MockScene::new(vec![(
            "Scene1",
            vec![
                MockObject::new(1, "A"),
                MockObject::new(2, "B").with_children(vec![MockObject::new(3, "C")]),
            ],
        )])
    }

    #[test]
    fn test_unprimed_detector_requests_resync() {
        let scene = scene_one();
        let cache = NodeCache::new();
        let detector = ChangeDetector::new();
        assert!(detector.needs_resync(&scene, &cache));
    }

    #[test]
    fn test_steady_state_needs_no_resync() {
        let scene = scene_one();
        let (cache, detector) = synced(&scene);
        assert!(!detector.needs_resync(&scene, &cache));
    }

    #[test]
    fn test_group_count_change_detected() {
        let (cache, detector) = synced(&scene_one());
        let next = MockScene::new(vec![
            ("Scene1", vec![MockObject::new(1, "A")]),
            ("Scene2", vec![]),
        ]);
        assert!(detector.needs_resync(&next, &cache));
    }

    #[test]
    fn test_group_child_count_change_detected() {
        let (cache, detector) = synced(&scene_one());
        let next = MockScene::new(vec![(
            "Scene1",
            vec![
                MockObject::new(1, "A"),
                MockObject::new(2, "B").with_children(vec![MockObject::new(3, "C")]),
                MockObject::new(4, "D"),
            ],
        )]);
        assert!(detector.needs_resync(&next, &cache));
    }

    #[test]
    fn test_child_count_change_below_top_level_detected() {
        let (cache, detector) = synced(&scene_one());
        // B gained a second child; group counts are unchanged.
        let next = MockScene::new(vec![(
            "Scene1",
            vec![
                MockObject::new(1, "A"),
                MockObject::new(2, "B")
                    .with_children(vec![MockObject::new(3, "C"), MockObject::new(4, "D")]),
            ],
        )]);
        assert!(detector.needs_resync(&next, &cache));
    }

    #[test]
    fn test_destroyed_identity_detected() {
        let (cache, detector) = synced(&scene_one());
        // A was destroyed upstream but the group still lists it: counts all
        // match, and only the dangling-identity check trips.
        let mut next = MockScene::new(vec![(
            "Scene1",
            vec![
                MockObject::new(1, "A"),
                MockObject::new(2, "B").with_children(vec![MockObject::new(3, "C")]),
            ],
        )]);
        next.objects.remove(&1);
        assert!(detector.needs_resync(&next, &cache));
    }

    #[test]
    fn test_equal_count_swap_is_the_documented_blind_spot() {
        let (cache, detector) = synced(&scene_one());
        // A (id 1) removed, A' (id 1) with identical shape added: every count
        // matches, so the heuristic reports steady state.
        let swapped = MockScene::new(vec![(
            "Scene1",
            vec![
                MockObject::new(1, "A-prime"),
                MockObject::new(2, "B").with_children(vec![MockObject::new(3, "C")]),
            ],
        )]);
        assert!(!detector.needs_resync(&swapped, &cache));
    }

    #[test]
    fn test_reset_forces_resync() {
        let scene = scene_one();
        let (cache, mut detector) = synced(&scene);
        detector.reset();
        assert!(detector.needs_resync(&scene, &cache));
    }
}
