use indexmap::IndexMap;
use petgraph::unionfind::UnionFind;

/// Disjoint sets over the dense ids `0..n`.
///
/// Joins use path compression; membership is recovered in a single pass
/// that maps every id to its root.
pub struct Grouper {
    uf: UnionFind<usize>,
    len: usize,
}

impl Grouper {
    pub fn new(n: usize) -> Self {
        Grouper {
            uf: UnionFind::new(n),
            len: n,
        }
    }

    /// Returns `true` if `a` and `b` were in different groups.
    pub fn join(&mut self, a: usize, b: usize) -> bool {
        self.uf.union(a, b)
    }

    pub fn find(&mut self, a: usize) -> usize {
        self.uf.find_mut(a)
    }

    pub fn joined(&self, a: usize, b: usize) -> bool {
        self.uf.equiv(a, b)
    }

    /// All groups, singletons included.
    ///
    /// Members are ascending and groups are ordered by their smallest member.
    pub fn groups(mut self) -> Vec<Vec<usize>> {
        let mut slot_of_root: IndexMap<usize, usize> = IndexMap::new();
        let mut groups: Vec<Vec<usize>> = vec![];

        for id in 0..self.len {
            let root = self.uf.find_mut(id);
            let slot = *slot_of_root.entry(root).or_insert_with(|| {
                groups.push(vec![]);
                groups.len() - 1
            });
            groups[slot].push(id);
        }

        groups
    }
}

/// Groups string labels joined pairwise, e.g. genes linked by anchors.
#[derive(Default)]
pub struct LabelGrouper {
    labels: IndexMap<String, usize>,
    edges: Vec<(usize, usize)>,
}

impl LabelGrouper {
    pub fn new() -> Self {
        Self::default()
    }

    fn intern(&mut self, label: &str) -> usize {
        if let Some(&id) = self.labels.get(label) {
            return id;
        }
        let id = self.labels.len();
        self.labels.insert(label.to_string(), id);
        id
    }

    pub fn join(&mut self, a: &str, b: &str) {
        let a = self.intern(a);
        let b = self.intern(b);
        self.edges.push((a, b));
    }

    pub fn num_labels(&self) -> usize {
        self.labels.len()
    }

    /// Each group sorted; groups sorted by their first label.
    pub fn into_groups(self) -> Vec<Vec<String>> {
        let mut grouper = Grouper::new(self.labels.len());
        for &(a, b) in &self.edges {
            grouper.join(a, b);
        }

        let names: Vec<String> = self.labels.into_keys().collect();
        let mut groups: Vec<Vec<String>> = grouper
            .groups()
            .into_iter()
            .map(|ids| {
                let mut g: Vec<String> = ids.into_iter().map(|i| names[i].clone()).collect();
                g.sort();
                g
            })
            .collect();
        groups.sort();

        groups
    }
}
