use crate::libs::synteny::kdtree::{KdTree, SpatialIndex};
use crate::libs::synteny::point::{PairKey, Point, PointStore};

/// Hits lying within `max_dist` (L1) of their nearest anchor.
///
/// Lazy and single-pass; hits come out in input order. The index is only
/// read.
pub fn synteny_liftover<'a, I>(
    hits: &'a [Point],
    index: &'a I,
    max_dist: u64,
) -> impl Iterator<Item = Point> + 'a
where
    I: SpatialIndex,
{
    hits.iter()
        .filter(move |hit| index.nearest(hit, max_dist).is_some())
        .copied()
}

/// Lifts the hits of every chromosome pair that has anchors.
///
/// One [`KdTree`] is built per anchor pair, visited in key order.
pub fn liftover_store(
    hits: &PointStore,
    anchors: &PointStore,
    max_dist: u64,
) -> Vec<(PairKey, Point)> {
    let mut lifted = vec![];

    for (key, pair_anchors) in anchors.iter() {
        let pair_hits = hits.get(key);
        if pair_hits.is_empty() {
            continue;
        }

        let tree = KdTree::build(pair_anchors);
        let before = lifted.len();
        lifted.extend(
            synteny_liftover(pair_hits, &tree, max_dist).map(|p| (key.clone(), p)),
        );

        log::debug!(
            "{}-{}: {} anchors, {} of {} hits lifted",
            key.0,
            key.1,
            pair_anchors.len(),
            lifted.len() - before,
            pair_hits.len()
        );
    }

    lifted
}
