use crate::libs::synteny::error::SyntenyError;
use itertools::Itertools;
use std::collections::{BTreeMap, HashMap, HashSet};

/// A block projected onto a reference axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Range {
    pub seqid: String,
    pub start: u64,
    pub end: u64,
    pub score: u64,
    pub id: usize,
}

impl Range {
    /// A reversed `start`/`end` pair is swapped.
    pub fn new(seqid: &str, start: u64, end: u64, score: u64, id: usize) -> Self {
        let (start, end) = if start <= end {
            (start, end)
        } else {
            (end, start)
        };
        Range {
            seqid: seqid.to_string(),
            start,
            end,
            score,
            id,
        }
    }

    pub fn overlaps(&self, other: &Range) -> bool {
        self.seqid == other.seqid && self.start < other.end && other.start < self.end
    }
}

/// Mutually non-overlapping ranges, sorted by `(seqid, start, end)`.
pub type Track = Vec<Range>;

/// Iteration cap of [`chain_tracks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainParams {
    pub max_iterations: usize,
}

impl Default for ChainParams {
    fn default() -> Self {
        ChainParams {
            max_iterations: 100,
        }
    }
}

impl ChainParams {
    pub fn new(max_iterations: usize) -> Result<Self, SyntenyError> {
        if max_iterations < 1 {
            return Err(SyntenyError::InvalidIterations(max_iterations));
        }
        Ok(ChainParams { max_iterations })
    }
}

/// Tracks selected pass by pass, plus whatever the iteration cap left over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainResult {
    pub tracks: Vec<Track>,
    /// Total score of each track
    pub scores: Vec<u64>,
    /// Ranges still in the pool when the cap was hit
    pub unassigned: Vec<Range>,
}

/// Maximum-weight subset of mutually non-overlapping ranges.
///
/// Weighted interval scheduling: ranges sorted by `(seqid, end, start)`, each
/// either skipped or stacked on the best solution among the ranges that end
/// at or before its start. Ties are resolved towards taking the range, so a
/// non-empty input always yields a non-empty selection.
///
/// Returns the selected ranges and their total score.
pub fn range_chain(ranges: &[Range]) -> (Track, u64) {
    if ranges.is_empty() {
        return (vec![], 0);
    }

    let mut sorted: Vec<&Range> = ranges.iter().collect();
    sorted.sort_by(|a, b| {
        a.seqid
            .cmp(&b.seqid)
            .then(a.end.cmp(&b.end))
            .then(a.start.cmp(&b.start))
    });

    let n = sorted.len();
    // best[k]: optimum over sorted[..k]
    let mut best = vec![0u64; n + 1];
    let mut prev = vec![0usize; n + 1];
    let mut took = vec![false; n + 1];

    for k in 1..=n {
        let cur = sorted[k - 1];
        // compatible predecessors form a prefix of sorted[..k - 1]
        let p = sorted[..k - 1].partition_point(|r| {
            (r.seqid.as_str(), r.end) <= (cur.seqid.as_str(), cur.start)
        });

        let with = cur.score + best[p];
        if with >= best[k - 1] {
            best[k] = with;
            prev[k] = p;
            took[k] = true;
        } else {
            best[k] = best[k - 1];
        }
    }

    let mut selected = vec![];
    let mut k = n;
    while k > 0 {
        if took[k] {
            selected.push(sorted[k - 1].clone());
            k = prev[k];
        } else {
            k -= 1;
        }
    }
    selected.sort_by(|a, b| {
        a.seqid
            .cmp(&b.seqid)
            .then(a.start.cmp(&b.start))
            .then(a.end.cmp(&b.end))
    });

    (selected, best[n])
}

/// Stacks ranges into successive tracks.
///
/// Each pass takes the best chain of the remaining pool via [`range_chain`]
/// and removes its members. Stops when the pool is empty or after
/// `max_iterations` passes; the remainder is returned as `unassigned`.
pub fn chain_tracks(ranges: Vec<Range>, max_iterations: usize) -> ChainResult {
    let mut pool = ranges;
    let mut result = ChainResult::default();

    log::info!("Chain started: {} blocks", pool.len());
    let mut iteration = 0;
    while !pool.is_empty() {
        if iteration >= max_iterations {
            break;
        }

        let (selected, score) = range_chain(&pool);
        let ids: HashSet<usize> = selected.iter().map(|r| r.id).collect();
        pool.retain(|r| !ids.contains(&r.id));

        if pool.is_empty() {
            log::info!("Chain {}: score={} done!", iteration, score);
        } else {
            log::info!(
                "Chain {}: score={} {} blocks remained..",
                iteration,
                score,
                pool.len()
            );
        }

        result.tracks.push(selected);
        result.scores.push(score);
        iteration += 1;
    }

    if !pool.is_empty() {
        log::warn!(
            "Iteration cap {} reached, {} blocks unassigned",
            max_iterations,
            pool.len()
        );
    }
    result.unassigned = pool;

    result
}

/// Multiplicity histogram of closed intervals over positions `0..size`.
///
/// Maps each depth `k` (0 included) to the number of positions covered by
/// exactly `k` intervals. Intervals are clipped to the extent.
pub fn range_depth(ranges: &[(u64, u64)], size: u64) -> BTreeMap<usize, u64> {
    let mut depths: BTreeMap<usize, u64> = BTreeMap::new();
    if size == 0 {
        return depths;
    }

    // +1 at start, -1 just past the end
    let mut events: Vec<(u64, i64)> = Vec::with_capacity(ranges.len() * 2);
    for &(a, b) in ranges {
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        if a >= size {
            continue;
        }
        let b = std::cmp::min(b, size - 1);
        events.push((a, 1));
        events.push((b + 1, -1));
    }
    events.push((size, 0));
    events.sort_unstable();

    let mut depth: i64 = 0;
    let mut last = 0u64;
    for (pos, delta) in events {
        if pos > last {
            *depths.entry(depth as usize).or_default() += pos - last;
            last = pos;
        }
        depth += delta;
    }

    depths
}

/// Gaps between closed intervals, per seqid.
///
/// Intervals are sorted and overlapping or abutting ones merged first. Each
/// gap is `(seqid, prev_end + 1, next_start - 1)`. When `sizes` carries the
/// length of a seqid, the flanks `1..first_start` and `last_end..=size` are
/// reported too. Coordinates are 1-based.
pub fn range_interleave(
    ranges: &[(String, u64, u64)],
    sizes: Option<&HashMap<String, u64>>,
) -> Vec<(String, u64, u64)> {
    let merged = range_merge(ranges);
    let mut gaps = vec![];

    for (seqid, group) in &merged.into_iter().chunk_by(|r| r.0.clone()) {
        let group: Vec<(String, u64, u64)> = group.collect();
        let size = sizes.and_then(|s| s.get(&seqid)).copied();

        if size.is_some() {
            let first_start = group[0].1;
            if first_start > 1 {
                gaps.push((seqid.clone(), 1, first_start - 1));
            }
        }

        for (a, b) in group.iter().tuple_windows() {
            let (istart, iend) = (a.2 + 1, b.1 - 1);
            if istart <= iend {
                gaps.push((seqid.clone(), istart, iend));
            }
        }

        if let Some(size) = size {
            let last_end = group[group.len() - 1].2;
            if last_end < size {
                gaps.push((seqid.clone(), last_end + 1, size));
            }
        }
    }

    gaps
}

/// Sorts closed intervals and merges those that overlap or abut.
pub fn range_merge(ranges: &[(String, u64, u64)]) -> Vec<(String, u64, u64)> {
    let mut sorted: Vec<(String, u64, u64)> = ranges
        .iter()
        .map(|(c, a, b)| {
            if a <= b {
                (c.clone(), *a, *b)
            } else {
                (c.clone(), *b, *a)
            }
        })
        .collect();
    sorted.sort();

    let mut merged: Vec<(String, u64, u64)> = vec![];
    for r in sorted {
        match merged.last_mut() {
            Some(last) if last.0 == r.0 && r.1 <= last.2 + 1 => {
                last.2 = std::cmp::max(last.2, r.2);
            }
            _ => merged.push(r),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn ids(track: &[Range]) -> Vec<usize> {
        track.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_range_new_and_overlap() {
        let a = Range::new("A", 10, 0, 1, 1);
        assert_eq!((a.start, a.end), (0, 10));

        let b = Range::new("A", 5, 15, 1, 2);
        let c = Range::new("A", 10, 20, 1, 3);
        let d = Range::new("B", 5, 15, 1, 4);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!b.overlaps(&d));
    }

    #[test]
    fn test_chain_params() {
        assert_eq!(ChainParams::new(0), Err(SyntenyError::InvalidIterations(0)));
        assert_eq!(ChainParams::new(3).unwrap().max_iterations, 3);
        assert_eq!(ChainParams::default().max_iterations, 100);
    }

    #[test]
    fn test_range_chain_picks_heavier_pair() {
        let ranges = vec![
            Range::new("A", 0, 10, 5, 1),
            Range::new("A", 5, 15, 3, 2),
            Range::new("A", 20, 30, 4, 3),
        ];

        let (selected, score) = range_chain(&ranges);
        assert_eq!(ids(&selected), vec![1, 3]);
        assert_eq!(score, 9);
    }

    #[test]
    fn test_chain_tracks_scenario() {
        let ranges = vec![
            Range::new("A", 0, 10, 5, 1),
            Range::new("A", 5, 15, 3, 2),
            Range::new("A", 20, 30, 4, 3),
        ];

        let result = chain_tracks(ranges, 2);
        assert_eq!(result.tracks.len(), 2);
        assert_eq!(ids(&result.tracks[0]), vec![1, 3]);
        assert_eq!(ids(&result.tracks[1]), vec![2]);
        assert_eq!(result.scores, vec![9, 3]);
        assert!(result.unassigned.is_empty());
    }

    #[test]
    fn test_chain_tracks_cap_surfaces_leftover() {
        let ranges = vec![
            Range::new("A", 0, 10, 5, 1),
            Range::new("A", 2, 12, 4, 2),
            Range::new("A", 4, 14, 3, 3),
        ];

        let result = chain_tracks(ranges, 1);
        assert_eq!(result.tracks.len(), 1);
        assert_eq!(ids(&result.tracks[0]), vec![1]);
        assert_eq!(ids(&result.unassigned), vec![2, 3]);
    }

    #[test]
    fn test_chain_zero_scores_terminate() {
        let ranges = vec![
            Range::new("A", 0, 10, 0, 1),
            Range::new("A", 5, 15, 0, 2),
            Range::new("A", 8, 9, 0, 3),
        ];

        let result = chain_tracks(ranges, 100);
        let placed: usize = result.tracks.iter().map(|t| t.len()).sum();
        assert_eq!(placed, 3);
        assert!(result.tracks.iter().all(|t| !t.is_empty()));
        assert!(result.unassigned.is_empty());
    }

    #[test]
    fn test_chain_empty() {
        assert_eq!(range_chain(&[]), (vec![], 0));
        let result = chain_tracks(vec![], 10);
        assert!(result.tracks.is_empty());
        assert!(result.unassigned.is_empty());
    }

    #[test]
    fn test_chain_separate_seqids_do_not_conflict() {
        let ranges = vec![
            Range::new("A", 0, 10, 5, 1),
            Range::new("B", 0, 10, 5, 2),
            Range::new("B", 5, 8, 1, 3),
        ];

        let (selected, score) = range_chain(&ranges);
        assert_eq!(ids(&selected), vec![1, 2]);
        assert_eq!(score, 10);
    }

    #[test]
    fn test_chain_point_ranges() {
        // single-gene blocks have start == end
        let ranges = vec![
            Range::new("A", 3, 5, 2, 1),
            Range::new("A", 5, 5, 2, 2),
            Range::new("A", 5, 9, 2, 3),
        ];

        let (selected, score) = range_chain(&ranges);
        assert_eq!(ids(&selected), vec![1, 2, 3]);
        assert_eq!(score, 6);
    }

    fn brute_force_best(ranges: &[Range]) -> u64 {
        let n = ranges.len();
        let mut best = 0u64;
        for mask in 0u32..(1 << n) {
            let chosen: Vec<&Range> = (0..n)
                .filter(|i| mask & (1 << i) != 0)
                .map(|i| &ranges[i])
                .collect();
            let ok = chosen
                .iter()
                .tuple_combinations()
                .all(|(a, b)| !a.overlaps(b));
            if ok {
                best = std::cmp::max(best, chosen.iter().map(|r| r.score).sum::<u64>());
            }
        }
        best
    }

    #[test]
    fn test_range_chain_optimal_random() {
        let mut rng = SmallRng::seed_from_u64(2024);

        for _ in 0..200 {
            let n = rng.gen_range(1..=10);
            let ranges: Vec<Range> = (0..n)
                .map(|i| {
                    let start = rng.gen_range(0..40);
                    let len = rng.gen_range(0..12);
                    let seqid = if rng.gen_bool(0.8) { "A" } else { "B" };
                    Range::new(seqid, start, start + len, rng.gen_range(0..10), i)
                })
                .collect();

            let (selected, score) = range_chain(&ranges);
            assert!(!selected.is_empty());
            assert_eq!(score, selected.iter().map(|r| r.score).sum::<u64>());
            for (a, b) in selected.iter().tuple_combinations() {
                assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
            }
            assert_eq!(score, brute_force_best(&ranges));
        }
    }

    #[test]
    fn test_range_depth() {
        let depths = range_depth(&[(30, 50), (40, 60)], 100);
        assert_eq!(depths.get(&0), Some(&(30 + 39)));
        assert_eq!(depths.get(&1), Some(&(10 + 10)));
        assert_eq!(depths.get(&2), Some(&11));
        assert_eq!(depths.values().sum::<u64>(), 100);
    }

    #[test]
    fn test_range_depth_clip_and_empty() {
        assert!(range_depth(&[(0, 5)], 0).is_empty());

        let depths = range_depth(&[], 10);
        assert_eq!(depths, BTreeMap::from([(0, 10)]));

        let depths = range_depth(&[(5, 20), (50, 60)], 10);
        assert_eq!(depths, BTreeMap::from([(0, 5), (1, 5)]));
    }

    #[test]
    fn test_range_depth_identity_random() {
        let mut rng = SmallRng::seed_from_u64(99);
        let size = 500;

        for _ in 0..50 {
            let ranges: Vec<(u64, u64)> = (0..rng.gen_range(0..30))
                .map(|_| {
                    let a = rng.gen_range(0..size);
                    let b = rng.gen_range(a..size);
                    (a, b)
                })
                .collect();

            let depths = range_depth(&ranges, size);
            let weighted: u64 = depths.iter().map(|(&k, &v)| k as u64 * v).sum();
            let lengths: u64 = ranges.iter().map(|(a, b)| b - a + 1).sum();
            assert_eq!(weighted, lengths);
            assert_eq!(depths.values().sum::<u64>(), size);
        }
    }

    fn t(c: &str, a: u64, b: u64) -> (String, u64, u64) {
        (c.to_string(), a, b)
    }

    #[test]
    fn test_range_interleave() {
        let ranges = vec![t("1", 30, 40), t("1", 45, 50), t("1", 10, 30)];
        assert_eq!(range_interleave(&ranges, None), vec![t("1", 41, 44)]);

        let ranges = vec![t("1", 30, 40), t("1", 42, 50)];
        assert_eq!(range_interleave(&ranges, None), vec![t("1", 41, 41)]);

        let sizes = HashMap::from([("1".to_string(), 70)]);
        assert_eq!(
            range_interleave(&ranges, Some(&sizes)),
            vec![t("1", 1, 29), t("1", 41, 41), t("1", 51, 70)]
        );
    }

    #[test]
    fn test_range_interleave_multiple_seqids() {
        let ranges = vec![t("2", 5, 8), t("1", 1, 3), t("2", 1, 3), t("1", 10, 12)];
        let sizes = HashMap::from([("2".to_string(), 8)]);
        assert_eq!(
            range_interleave(&ranges, Some(&sizes)),
            vec![t("1", 4, 9), t("2", 4, 4)]
        );
        assert!(range_interleave(&[], None).is_empty());
    }

    #[test]
    fn test_range_interleave_partition_random() {
        let mut rng = SmallRng::seed_from_u64(5);
        let size = 300u64;

        for _ in 0..50 {
            let ranges: Vec<(String, u64, u64)> = (0..rng.gen_range(1..15))
                .map(|_| {
                    let a = rng.gen_range(1..=size);
                    let b = rng.gen_range(a..=size);
                    t("c", a, b)
                })
                .collect();
            let sizes = HashMap::from([("c".to_string(), size)]);
            let gaps = range_interleave(&ranges, Some(&sizes));

            // ranges and gaps tile 1..=size exactly once
            let mut cover = vec![0u32; size as usize + 1];
            for (_, a, b) in range_merge(&ranges).iter().chain(gaps.iter()) {
                for pos in *a..=*b {
                    cover[pos as usize] += 1;
                }
            }
            assert!(cover[1..].iter().all(|&c| c == 1));
        }
    }

    #[test]
    fn test_range_merge() {
        let ranges = vec![t("1", 10, 20), t("1", 21, 25), t("1", 15, 18), t("1", 30, 31)];
        assert_eq!(range_merge(&ranges), vec![t("1", 10, 25), t("1", 30, 31)]);
    }
}
