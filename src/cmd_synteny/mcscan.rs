use clap::*;
use std::collections::HashMap;
use std::io::Write;
use synteny::libs::synteny::{chain_tracks, read_blocks, ChainParams, GeneOrder, Range};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("mcscan")
        .about("Stack synteny blocks on a reference gene order")
        .after_help(
            r###"
Stacks synteny blocks on a reference bed, MCSCAN style.

Processing:
  1. Each anchor block is placed on the reference by the ordinals of its
     genes found in <bed> (the side of the block present in <bed> is used);
     its score is the number of such genes.
  2. The heaviest set of non-overlapping blocks becomes track 1; those
     blocks are removed and the process repeats for --iter passes at most.

Output: the first column is the reference gene, then one column per track
holding the partner gene, or `.` when the track has none there.

Blocks still unplaced when --iter runs out are reported on stderr and, with
--unassigned, written as `id start end score` rows.

Examples:
1. Stack blocks on the grape gene order:
   synteny mcscan grape.bed grape.peach.anchors -o grape.peach.tracks

2. Compact view with at most 3 tracks:
   synteny mcscan grape.bed grape.peach.anchors --iter 3 --ascii

"###,
        )
        .arg(
            Arg::new("bed")
                .required(true)
                .index(1)
                .help("Reference gene order (BED)"),
        )
        .arg(
            Arg::new("anchors")
                .required(true)
                .index(2)
                .help("Anchor file"),
        )
        .arg(
            Arg::new("iter")
                .long("iter")
                .num_args(1)
                .default_value("100")
                .value_parser(value_parser!(usize))
                .help("Max number of chains to output"),
        )
        .arg(
            Arg::new("ascii")
                .long("ascii")
                .action(ArgAction::SetTrue)
                .help("Output symbols rather than gene names"),
        )
        .arg(
            Arg::new("unassigned")
                .long("unassigned")
                .num_args(1)
                .help("Write blocks left out of all tracks to this file"),
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
    let order = GeneOrder::from_path(args.get_one::<String>("bed").unwrap())?;
    let anchor_file = args.get_one::<String>("anchors").unwrap();
    let params = ChainParams::new(*args.get_one::<usize>("iter").unwrap())?;
    let is_ascii = args.get_flag("ascii");

    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());

    //----------------------------
    // Ranges
    //----------------------------
    let blocks = read_blocks(intspan::reader(anchor_file))?;

    let mut ranges: Vec<Range> = vec![];
    let mut block_pairs: Vec<HashMap<String, String>> = Vec::with_capacity(blocks.len());
    for (i, block) in blocks.into_iter().enumerate() {
        let (mut q, mut s): (Vec<String>, Vec<String>) = block.into_iter().unzip();
        if !order.contains(&q[0]) {
            std::mem::swap(&mut q, &mut s);
        }

        let mut ordinals: Vec<u64> = q
            .iter()
            .filter_map(|x| order.get(x).map(|(idx, _)| idx as u64))
            .collect();
        block_pairs.push(q.into_iter().zip(s).collect());

        if ordinals.is_empty() {
            log::debug!("Block {} has no gene in the reference", i);
            continue;
        }
        ordinals.sort_unstable();

        ranges.push(Range::new(
            "0",
            ordinals[0],
            ordinals[ordinals.len() - 1],
            ordinals.len() as u64,
            i,
        ));
    }

    //----------------------------
    // Chaining
    //----------------------------
    let result = chain_tracks(ranges, params.max_iterations);

    if let Some(outfile) = args.get_one::<String>("unassigned") {
        let mut unassigned_writer = intspan::writer(outfile);
        for r in &result.unassigned {
            unassigned_writer.write_fmt(format_args!(
                "{}\t{}\t{}\t{}\n",
                r.id, r.start, r.end, r.score
            ))?;
        }
    }

    //----------------------------
    // Output
    //----------------------------
    let track_ids: Vec<Vec<usize>> = result
        .tracks
        .iter()
        .map(|t| t.iter().map(|r| r.id).collect())
        .collect();

    let sep = if is_ascii { "" } else { "\t" };
    for gene in order.genes() {
        let id = &gene.accn;
        let mut atoms: Vec<&str> = vec![];
        for ids in &track_ids {
            let anchor = ids
                .iter()
                .find_map(|tid| block_pairs[*tid].get(id))
                .map(|s| s.as_str());
            let atom = match anchor {
                Some(_) if is_ascii => "x",
                Some(s) => s,
                None => ".",
            };
            atoms.push(atom);
        }

        writer.write_fmt(format_args!("{}\t{}\n", id, atoms.join(sep)))?;
    }

    Ok(())
}
