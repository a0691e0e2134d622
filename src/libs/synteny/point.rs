use crate::libs::synteny::order::GeneOrder;
use std::collections::{BTreeMap, HashSet};

/// A matched pair projected onto two coordinate axes.
///
/// `x` indexes the query order and `y` the subject order (or a physical
/// coordinate, depending on the caller). Ordering is by `(x, y)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub x: u64,
    pub y: u64,
}

impl Point {
    pub fn new(x: u64, y: u64) -> Self {
        Point { x, y }
    }

    /// Manhattan distance.
    pub fn l1(&self, other: &Point) -> u64 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Coordinate along axis `dim` (0 for x, 1 for y).
    pub fn coord(&self, dim: usize) -> u64 {
        if dim == 0 {
            self.x
        } else {
            self.y
        }
    }
}

impl From<(u64, u64)> for Point {
    fn from((x, y): (u64, u64)) -> Self {
        Point { x, y }
    }
}

/// (query chromosome, subject chromosome)
pub type PairKey = (String, String);

/// Points grouped by chromosome pair, iterated in key order.
#[derive(Debug, Clone, Default)]
pub struct PointStore {
    groups: BTreeMap<PairKey, Vec<Point>>,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: PairKey, point: Point) {
        self.groups.entry(key).or_default().push(point);
    }

    /// Points of one chromosome pair; empty when the pair is absent.
    pub fn get(&self, key: &PairKey) -> &[Point] {
        self.groups.get(key).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, &[Point])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &PairKey> {
        self.groups.keys()
    }

    /// Number of chromosome pairs.
    pub fn num_pairs(&self) -> usize {
        self.groups.len()
    }

    /// Total number of points.
    pub fn len(&self) -> usize {
        self.groups.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(|v| v.is_empty())
    }

    /// Maps identifier pairs onto points.
    ///
    /// Unmapped identifiers are dropped. With `dedup`, repeated
    /// `(query, subject)` pairs are kept once.
    pub fn from_pairs<I, S>(pairs: I, mapper: &PairMapper, dedup: bool) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut store = PointStore::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut unmapped = 0usize;

        for (query, subject) in pairs {
            let (query, subject) = (query.as_ref(), subject.as_ref());

            let Some((key, point)) = mapper.map(query, subject) else {
                unmapped += 1;
                continue;
            };

            if dedup && !seen.insert((query.to_string(), subject.to_string())) {
                continue;
            }

            store.push(key, point);
        }

        if unmapped > 0 {
            log::debug!("{} pairs with unmapped identifiers dropped", unmapped);
        }

        store
    }
}

impl FromIterator<(PairKey, Point)> for PointStore {
    fn from_iter<T: IntoIterator<Item = (PairKey, Point)>>(iter: T) -> Self {
        let mut store = PointStore::new();
        for (key, point) in iter {
            store.push(key, point);
        }
        store
    }
}

/// Converts `(query, subject)` identifiers into keyed points using the two
/// gene orders.
pub struct PairMapper<'a> {
    qorder: &'a GeneOrder,
    sorder: &'a GeneOrder,
    is_self: bool,
}

impl<'a> PairMapper<'a> {
    /// `is_self` marks a genome compared against itself; each unordered pair
    /// is then reported once, with the smaller ordinal on the query side.
    pub fn new(qorder: &'a GeneOrder, sorder: &'a GeneOrder, is_self: bool) -> Self {
        PairMapper {
            qorder,
            sorder,
            is_self,
        }
    }

    pub fn map(&self, query: &str, subject: &str) -> Option<(PairKey, Point)> {
        let (qi, q) = self.qorder.get(query)?;
        let (si, s) = self.sorder.get(subject)?;

        let (qi, si, q, s) = if self.is_self && qi > si {
            (si, qi, s, q)
        } else {
            (qi, si, q, s)
        };

        Some((
            (q.seqid.clone(), s.seqid.clone()),
            Point::new(qi as u64, si as u64),
        ))
    }
}
