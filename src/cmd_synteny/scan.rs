use super::utils::{add_beds, check_beds, SummaryStats};
use clap::*;
use synteny::libs::synteny::{
    batch_scan, read_pairs, write_blocks, AnchorBlock, PairMapper, PointStore, ScanParams,
};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("scan")
        .about("Pull syntenic anchors from matches by single linkage")
        .after_help(
            r###"
Clusters matches into collinear blocks.

Processing:
  1. Map each (query, subject) row onto gene ordinals via --qbed/--sbed.
     Unknown genes and repeated pairs are dropped. When --qbed and --sbed
     are the same file, each pair keeps the smaller ordinal on the left.
  2. Group the points by chromosome pair.
  3. Within a pair, sort by query ordinal and link every point to earlier
     points that are within --dist on both axes (single linkage).
  4. Keep blocks whose score, the number of distinct genes on the smaller
     side, is at least -n.

Input: BLAST tabular or any table whose first two columns are query and subject.

Output: anchor blocks, each introduced by a `###` line.

Examples:
1. Self comparison:
   synteny scan grape.grape.blast --qbed grape.bed --sbed grape.bed -o grape.anchors

2. Stricter blocks, 4 threads:
   synteny scan a.b.blast --qbed a.bed --sbed b.bed --dist 5 -n 8 --parallel 4

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Match table, e.g. BLAST tabular"),
        )
        .arg(
            Arg::new("dist")
                .long("dist")
                .num_args(1)
                .default_value("10")
                .value_parser(value_parser!(u64))
                .help("Extent of flanking regions to search"),
        )
        .arg(
            Arg::new("n")
                .short('n')
                .num_args(1)
                .default_value("5")
                .value_parser(value_parser!(usize))
                .help("Minimum number of anchors in a cluster"),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .short('p')
                .num_args(1)
                .default_value("1")
                .value_parser(value_parser!(usize))
                .help("Number of threads for parallel processing"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        );

    add_beds(cmd)
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let opt_dist = *args.get_one::<u64>("dist").unwrap();
    let opt_n = *args.get_one::<usize>("n").unwrap();
    let params = ScanParams::new(opt_dist, opt_dist, opt_n)?;

    let opt_parallel = *args.get_one::<usize>("parallel").unwrap();
    rayon::ThreadPoolBuilder::new()
        .num_threads(opt_parallel)
        .build_global()?;

    let (qorder, sorder, is_self) = check_beds(args)?;
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());

    //----------------------------
    // Operating
    //----------------------------
    let pairs = read_pairs(intspan::reader(infile))?;
    let mapper = PairMapper::new(&qorder, &sorder, is_self);
    let store = PointStore::from_pairs(pairs, &mapper, true);
    log::debug!(
        "{} points in {} chromosome pairs",
        store.len(),
        store.num_pairs()
    );

    let clusters = batch_scan(&store, &params);

    //----------------------------
    // Output
    //----------------------------
    let blocks: Vec<AnchorBlock> = clusters
        .iter()
        .map(|c| {
            c.points()
                .iter()
                .map(|p| {
                    (
                        qorder.gene(p.x as usize).accn.clone(),
                        sorder.gene(p.y as usize).accn.clone(),
                    )
                })
                .collect()
        })
        .collect();
    write_blocks(&mut writer, &blocks)?;

    let nanchors: Vec<usize> = clusters.iter().map(|c| c.len()).collect();
    log::info!(
        "A total of {} anchors found in {} clusters.",
        nanchors.iter().sum::<usize>(),
        nanchors.len()
    );
    if let Some(stats) = SummaryStats::new(&nanchors) {
        log::info!("{}", stats);
    }

    Ok(())
}
