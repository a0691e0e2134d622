use crate::libs::synteny::error::SyntenyError;
use crate::libs::synteny::grouper::Grouper;
use crate::libs::synteny::point::{PairKey, Point, PointStore};
use itertools::Itertools;
use rayon::prelude::*;
use std::collections::HashSet;

/// Thresholds of the single-linkage scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanParams {
    /// Maximal distance along the query axis between linked points
    pub x_dist: u64,
    /// Maximal distance along the subject axis between linked points
    pub y_dist: u64,
    /// Clusters scoring below this are discarded
    pub min_score: usize,
}

impl Default for ScanParams {
    fn default() -> Self {
        ScanParams {
            x_dist: 20,
            y_dist: 20,
            min_score: 6,
        }
    }
}

impl ScanParams {
    pub fn new(x_dist: u64, y_dist: u64, min_score: usize) -> Result<Self, SyntenyError> {
        let params = ScanParams {
            x_dist,
            y_dist,
            min_score,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), SyntenyError> {
        if self.x_dist == 0 {
            return Err(SyntenyError::NonPositiveDistance { name: "x_dist" });
        }
        if self.y_dist == 0 {
            return Err(SyntenyError::NonPositiveDistance { name: "y_dist" });
        }
        if self.min_score < 1 {
            return Err(SyntenyError::InvalidMinScore(self.min_score));
        }
        Ok(())
    }
}

/// Number of non-redundant matches: distinct coordinates on the smaller axis.
///
/// A cluster dominated by one repeated gene scores low on that axis.
pub fn cluster_score(points: &[Point]) -> usize {
    let xs: HashSet<u64> = points.iter().map(|p| p.x).collect();
    let ys: HashSet<u64> = points.iter().map(|p| p.y).collect();
    std::cmp::min(xs.len(), ys.len())
}

/// A collinear block: points linked by the single-linkage scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    points: Vec<Point>,
}

impl Cluster {
    /// Members are sorted and deduplicated.
    pub fn new(mut points: Vec<Point>) -> Self {
        points.sort_unstable();
        points.dedup();
        Cluster { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn score(&self) -> usize {
        cluster_score(&self.points)
    }

    /// (min x, max x); `None` for an empty cluster.
    pub fn x_span(&self) -> Option<(u64, u64)> {
        // members are sorted by x first
        Some((self.points.first()?.x, self.points.last()?.x))
    }

    /// (min y, max y); `None` for an empty cluster.
    pub fn y_span(&self) -> Option<(u64, u64)> {
        self.points.iter().map(|p| p.y).minmax().into_option()
    }
}

/// Single-linkage clustering of the points of one chromosome pair.
///
/// Points are sorted by `(x, y)`. Each point looks back at its predecessors
/// until the x distance exceeds `x_dist`; any predecessor within `y_dist`
/// on the other axis is joined. Every point ends up in exactly one cluster
/// and clusters scoring below `min_score` are dropped.
pub fn synteny_scan(points: &[Point], params: &ScanParams) -> Vec<Cluster> {
    let mut points = points.to_vec();
    points.sort_unstable();
    points.dedup();

    let n = points.len();
    let mut grouper = Grouper::new(n);

    for i in 0..n {
        for j in (0..i).rev() {
            let del_x = points[i].x - points[j].x;
            if del_x > params.x_dist {
                break;
            }
            let del_y = points[i].y.abs_diff(points[j].y);
            if del_y > params.y_dist {
                continue;
            }
            grouper.join(i, j);
        }
    }

    grouper
        .groups()
        .into_iter()
        .map(|ids| Cluster::new(ids.into_iter().map(|i| points[i]).collect()))
        .filter(|c| c.score() >= params.min_score)
        .collect()
}

/// Runs [`synteny_scan`] on every chromosome pair of the store.
///
/// Pairs are independent and scanned on the rayon pool; results are
/// concatenated in key order.
pub fn batch_scan(store: &PointStore, params: &ScanParams) -> Vec<Cluster> {
    let groups: Vec<(&PairKey, &[Point])> = store.iter().collect();

    let per_pair: Vec<Vec<Cluster>> = groups
        .par_iter()
        .map(|(key, points)| {
            let clusters = synteny_scan(points, params);
            log::debug!(
                "{}-{}: {} points, {} clusters",
                key.0,
                key.1,
                points.len(),
                clusters.len()
            );
            clusters
        })
        .collect();

    per_pair.into_iter().flatten().collect()
}

/// [`batch_scan`] over a flat list of keyed points.
pub fn batch_scan_pairs(points: &[(PairKey, Point)], params: &ScanParams) -> Vec<Cluster> {
    let store: PointStore = points.iter().cloned().collect();
    batch_scan(&store, params)
}
