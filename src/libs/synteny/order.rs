use crate::libs::synteny::error::SyntenyError;
use anyhow::Context;
use std::collections::HashMap;
use std::io::BufRead;

/// One row of a gene order table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gene {
    pub seqid: String,
    /// 0-based, inclusive
    pub start: u64,
    /// 0-based, exclusive
    pub end: u64,
    pub accn: String,
}

impl Gene {
    /// Midpoint in 1-based coordinates.
    pub fn mid(&self) -> u64 {
        (self.start + 1 + self.end) / 2
    }
}

/// Maps a gene/marker accession to its ordinal position along a genome.
///
/// Rows are sorted by `(seqid, start, accn)`; the ordinal of a gene is its
/// index after sorting, so neighbouring genes on a chromosome get
/// consecutive ordinals.
#[derive(Debug, Clone, Default)]
pub struct GeneOrder {
    genes: Vec<Gene>,
    index_of: HashMap<String, usize>,
}

impl GeneOrder {
    pub fn new(mut genes: Vec<Gene>) -> Self {
        genes.sort_by(|a, b| {
            a.seqid
                .cmp(&b.seqid)
                .then(a.start.cmp(&b.start))
                .then(a.accn.cmp(&b.accn))
        });

        let mut index_of = HashMap::with_capacity(genes.len());
        for (i, g) in genes.iter().enumerate() {
            // first occurrence wins
            index_of.entry(g.accn.clone()).or_insert(i);
        }

        GeneOrder { genes, index_of }
    }

    /// Reads BED-like rows: `seqid start end accn [...]`.
    ///
    /// Blank lines, comments and `track`/`browser` headers are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> anyhow::Result<Self> {
        let mut genes = vec![];

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty()
                || line.starts_with('#')
                || line.starts_with("track")
                || line.starts_with("browser")
            {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            let malformed = || SyntenyError::Malformed {
                kind: "bed",
                line: i + 1,
                content: line.to_string(),
            };
            if fields.len() < 4 {
                return Err(malformed().into());
            }
            let start = fields[1].parse::<u64>().map_err(|_| malformed())?;
            let end = fields[2].parse::<u64>().map_err(|_| malformed())?;

            genes.push(Gene {
                seqid: fields[0].to_string(),
                start,
                end,
                accn: fields[3].to_string(),
            });
        }

        Ok(Self::new(genes))
    }

    pub fn from_path(path: &str) -> anyhow::Result<Self> {
        Self::from_reader(intspan::reader(path))
            .with_context(|| format!("failed to load gene order from {}", path))
    }

    /// Ordinal index and gene record of an accession.
    pub fn get(&self, accn: &str) -> Option<(usize, &Gene)> {
        self.index_of.get(accn).map(|&i| (i, &self.genes[i]))
    }

    pub fn contains(&self, accn: &str) -> bool {
        self.index_of.contains_key(accn)
    }

    pub fn gene(&self, idx: usize) -> &Gene {
        &self.genes[idx]
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}
