use crate::libs::synteny::point::Point;

/// Nearest-neighbour lookup over a fixed set of points under L1 distance.
pub trait SpatialIndex {
    /// Indexes `points`; the index owns a copy.
    fn build(points: &[Point]) -> Self
    where
        Self: Sized;

    /// Nearest indexed point to `query` with its distance, if that distance
    /// is at most `max_dist`.
    fn nearest(&self, query: &Point, max_dist: u64) -> Option<(Point, u64)>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A node in the KD-tree, either a Leaf or an Internal node.
enum KdNode {
    Leaf {
        leaf_idx: usize,
    },
    Internal {
        cut_coord: u64,
        lo: Box<KdNode>,
        hi: Box<KdNode>,
    },
}

/// A 2D KD-tree over points, splitting alternately on x and y.
///
/// Every point of `lo` has a coordinate `<= cut_coord` along the splitting
/// axis and every point of `hi` one `>= cut_coord`, so a subtree on the far
/// side of the cut is at least `|coord - cut_coord|` away.
pub struct KdTree {
    points: Vec<Point>,
    root: Option<Box<KdNode>>,
}

impl KdTree {
    fn build_recursive(indices: &mut [usize], points: &[Point], dim: usize) -> Box<KdNode> {
        if indices.len() == 1 {
            return Box::new(KdNode::Leaf {
                leaf_idx: indices[0],
            });
        }

        indices.sort_by_key(|&i| points[i].coord(dim));

        let mid = indices.len() / 2;
        let cut_coord = points[indices[mid]].coord(dim);

        let (left_indices, right_indices) = indices.split_at_mut(mid);

        let lo = Self::build_recursive(left_indices, points, 1 - dim);
        let hi = Self::build_recursive(right_indices, points, 1 - dim);

        Box::new(KdNode::Internal { cut_coord, lo, hi })
    }

    fn nearest_recursive(
        &self,
        node: &KdNode,
        query: &Point,
        dim: usize,
        max_dist: u64,
        best: &mut Option<(usize, u64)>,
    ) {
        match node {
            KdNode::Leaf { leaf_idx } => {
                let dist = query.l1(&self.points[*leaf_idx]);
                let better = match best {
                    Some((_, d)) => dist < *d,
                    None => dist <= max_dist,
                };
                if better {
                    *best = Some((*leaf_idx, dist));
                }
            }
            KdNode::Internal { cut_coord, lo, hi } => {
                let coord = query.coord(dim);
                let (near, far) = if coord < *cut_coord {
                    (lo, hi)
                } else {
                    (hi, lo)
                };

                self.nearest_recursive(near, query, 1 - dim, max_dist, best);

                let limit = best.map(|(_, d)| d).unwrap_or(max_dist);
                if coord.abs_diff(*cut_coord) <= limit {
                    self.nearest_recursive(far, query, 1 - dim, max_dist, best);
                }
            }
        }
    }
}

impl SpatialIndex for KdTree {
    fn build(points: &[Point]) -> Self {
        let points = points.to_vec();
        if points.is_empty() {
            return KdTree { points, root: None };
        }

        let mut indices: Vec<usize> = (0..points.len()).collect();
        let root = Self::build_recursive(&mut indices, &points, 0);

        KdTree {
            points,
            root: Some(root),
        }
    }

    fn nearest(&self, query: &Point, max_dist: u64) -> Option<(Point, u64)> {
        let root = self.root.as_ref()?;

        let mut best = None;
        self.nearest_recursive(root, query, 0, max_dist, &mut best);

        best.map(|(idx, dist)| (self.points[idx], dist))
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}

/// Brute-force scan, adequate for small anchor sets.
pub struct LinearIndex {
    points: Vec<Point>,
}

impl SpatialIndex for LinearIndex {
    fn build(points: &[Point]) -> Self {
        LinearIndex {
            points: points.to_vec(),
        }
    }

    fn nearest(&self, query: &Point, max_dist: u64) -> Option<(Point, u64)> {
        self.points
            .iter()
            .map(|p| (*p, query.l1(p)))
            .filter(|&(_, d)| d <= max_dist)
            .min_by_key(|&(_, d)| d)
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}
