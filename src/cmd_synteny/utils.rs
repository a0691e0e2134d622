use clap::{Arg, Command};
use synteny::libs::synteny::GeneOrder;

/// Adds `--qbed` and `--sbed`.
pub fn add_beds(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("qbed")
            .long("qbed")
            .required(true)
            .num_args(1)
            .help("Gene order of the query genome (BED)"),
    )
    .arg(
        Arg::new("sbed")
            .long("sbed")
            .required(true)
            .num_args(1)
            .help("Gene order of the subject genome (BED)"),
    )
}

/// Loads both gene orders. Identical paths mean a self comparison.
pub fn check_beds(args: &clap::ArgMatches) -> anyhow::Result<(GeneOrder, GeneOrder, bool)> {
    let qbed_file = args.get_one::<String>("qbed").unwrap();
    let sbed_file = args.get_one::<String>("sbed").unwrap();

    let is_self = qbed_file == sbed_file;
    if is_self {
        log::debug!("Looks like self-self comparison.");
    }

    let qorder = GeneOrder::from_path(qbed_file)?;
    let sorder = if is_self {
        qorder.clone()
    } else {
        GeneOrder::from_path(sbed_file)?
    };

    Ok((qorder, sorder, is_self))
}

/// `prefix` of `path/prefix.rest`
pub fn genome_name(path: &str) -> String {
    let file_name = std::path::Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string());
    file_name.split('.').next().unwrap_or_default().to_string()
}

/// Count, min, max, mean and median of a list of sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub count: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub median: f64,
    pub sum: usize,
}

impl SummaryStats {
    pub fn new(values: &[usize]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        let count = sorted.len();
        let sum: usize = sorted.iter().sum();
        let median = if count % 2 == 1 {
            sorted[count / 2] as f64
        } else {
            (sorted[count / 2 - 1] + sorted[count / 2]) as f64 / 2.0
        };

        Some(SummaryStats {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean: sum as f64 / count as f64,
            median,
            sum,
        })
    }
}

impl std::fmt::Display for SummaryStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "count={} min={} max={} mean={:.2} median={:.1} sum={}",
            self.count, self.min, self.max, self.mean, self.median, self.sum
        )
    }
}
