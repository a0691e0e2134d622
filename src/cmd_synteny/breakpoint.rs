use clap::*;
use itertools::Itertools;
use std::io::Write;
use synteny::libs::synteny::{range_interleave, synteny_scan, Gene, GeneOrder, Point, ScanParams};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("breakpoint")
        .about("Identify breakpoints where collinearity ends")
        .after_help(
            r###"
Identifies breakpoints where collinearity ends.

<hits> holds marker hits on scaffolds as BED rows (scaffold start end marker),
e.g. converted from a BLAST of markers (query) against scaffolds (subject).
<markers> holds marker locations in the related species. A hit named
`marker.N` that is not found in <markers> is looked up as `marker`.

Processing:
  1. On each scaffold, a hit becomes the point (marker ordinal in the related
     genome, midpoint on the scaffold).
  2. Points are clustered by single linkage with --xdist / --ydist; blocks
     with fewer than -n markers are dropped.
  3. The gaps between consecutive blocks along the scaffold are reported.

Output: BED rows `scaffold start end` of the gaps.

Examples:
1. Breakpoints of an assembly against a genetic map:
   synteny breakpoint markers.scaffolds.bed markers.bed --ydist 100000

"###,
        )
        .arg(
            Arg::new("hits")
                .required(true)
                .index(1)
                .help("Marker hits on scaffolds (BED)"),
        )
        .arg(
            Arg::new("markers")
                .required(true)
                .index(2)
                .help("Marker locations in the related genome (BED)"),
        )
        .arg(
            Arg::new("xdist")
                .long("xdist")
                .num_args(1)
                .default_value("20")
                .value_parser(value_parser!(u64))
                .help("xdist (in related genome) cutoff"),
        )
        .arg(
            Arg::new("ydist")
                .long("ydist")
                .num_args(1)
                .default_value("200000")
                .value_parser(value_parser!(u64))
                .help("ydist (in current genome) cutoff"),
        )
        .arg(
            Arg::new("n")
                .short('n')
                .num_args(1)
                .default_value("5")
                .value_parser(value_parser!(usize))
                .help("Number of markers in a block"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let hits = GeneOrder::from_path(args.get_one::<String>("hits").unwrap())?;
    let order = GeneOrder::from_path(args.get_one::<String>("markers").unwrap())?;
    let params = ScanParams::new(
        *args.get_one::<u64>("xdist").unwrap(),
        *args.get_one::<u64>("ydist").unwrap(),
        *args.get_one::<usize>("n").unwrap(),
    )?;

    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());

    //----------------------------
    // Operating
    //----------------------------
    for (scaffold, bs) in &hits.genes().iter().chunk_by(|g| g.seqid.clone()) {
        let bs: Vec<&Gene> = bs.collect();
        let points = marker_points(&bs, &order);

        let blocks = synteny_scan(&points, &params);
        let sblocks: Vec<(String, u64, u64)> = blocks
            .iter()
            .filter_map(|b| b.y_span())
            .map(|(lo, hi)| (scaffold.clone(), lo, hi))
            .collect();

        for (ch, start, end) in range_interleave(&sblocks, None) {
            writer.write_fmt(format_args!("{}\t{}\t{}\n", ch, start - 1, end))?;
        }
    }

    Ok(())
}

/// (marker ordinal, hit midpoint) of hits whose marker is known.
fn marker_points(bs: &[&Gene], order: &GeneOrder) -> Vec<Point> {
    bs.iter()
        .filter_map(|b| {
            let found = order.get(&b.accn).or_else(|| {
                b.accn
                    .rsplit_once('.')
                    .and_then(|(accn, _)| order.get(accn))
            });
            found.map(|(x, _)| Point::new(x as u64, b.mid()))
        })
        .collect()
}
