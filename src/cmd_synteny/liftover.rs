use super::utils::{add_beds, check_beds};
use clap::*;
use std::io::Write;
use synteny::libs::synteny::{liftover_store, read_pairs, PairMapper, PointStore};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("liftover")
        .about("Pull matches lying next to anchors")
        .after_help(
            r###"
Given a list of anchors (syntenic gene pairs), chooses the matches that are
close to them.

For every match, the nearest anchor of the same chromosome pair is looked up
in a k-d tree; the match is reported when the Manhattan distance between the
two, in gene ordinals, is at most --dist.

The anchor file holds one pair per row; `#` lines are ignored:

    geneA   geneB
    geneC   geneD

Output: `query subject lifted`, one row per match.

Examples:
1. Extend anchors with nearby BLAST hits:
   synteny liftover a.b.blast a.b.anchors --qbed a.bed --sbed b.bed

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Match table, e.g. BLAST tabular"),
        )
        .arg(
            Arg::new("anchors")
                .required(true)
                .index(2)
                .help("Anchor file"),
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
    let anchor_file = args.get_one::<String>("anchors").unwrap();
    let opt_dist = *args.get_one::<u64>("dist").unwrap();
    if opt_dist == 0 {
        anyhow::bail!("--dist must be positive");
    }

    let (qorder, sorder, is_self) = check_beds(args)?;
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());

    //----------------------------
    // Operating
    //----------------------------
    let mapper = PairMapper::new(&qorder, &sorder, is_self);
    let hits = read_pairs(intspan::reader(infile))?;
    let hits = PointStore::from_pairs(hits, &mapper, true);
    let anchors = read_pairs(intspan::reader(anchor_file))?;
    let anchors = PointStore::from_pairs(anchors, &mapper, false);

    let lifted = liftover_store(&hits, &anchors, opt_dist);

    //----------------------------
    // Output
    //----------------------------
    for (_, p) in &lifted {
        let query = &qorder.gene(p.x as usize).accn;
        let subject = &sorder.gene(p.y as usize).accn;
        writer.write_fmt(format_args!("{}\t{}\tlifted\n", query, subject))?;
    }
    log::info!("{} new pairs found", lifted.len());

    Ok(())
}
