use super::utils::{add_beds, check_beds, genome_name};
use clap::*;
use std::io::Write;
use synteny::libs::synteny::{range_depth, read_blocks, GeneOrder};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("depth")
        .about("Depths of synteny blocks along both genomes")
        .after_help(
            r###"
Calculates the depths in the two genomes in comparison, given in --qbed and
--sbed. The synteny blocks are layered on the genomes, and the multiplicity
is summarized for each.

Each block covers the gene ordinals from its first to its last gene on
either side. For every depth, the number of gene positions covered exactly
that many times is reported:

    Genome grape depths:
    Depth 0: 120 of 1000 (12.0%)
    Depth 1: 700 of 1000 (70.0%)
    ...

Examples:
1. Depths of grape vs peach blocks:
   synteny depth grape.peach.anchors --qbed grape.bed --sbed peach.bed

"###,
        )
        .arg(
            Arg::new("anchors")
                .required(true)
                .index(1)
                .help("Anchor file"),
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
    let anchor_file = args.get_one::<String>("anchors").unwrap();
    let (qorder, sorder, _) = check_beds(args)?;
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());

    //----------------------------
    // Operating
    //----------------------------
    let mut qranges: Vec<(u64, u64)> = vec![];
    let mut sranges: Vec<(u64, u64)> = vec![];
    for block in read_blocks(intspan::reader(anchor_file))? {
        let (q, s): (Vec<String>, Vec<String>) = block.into_iter().unzip();
        if let Some(r) = ordinal_span(&q, &qorder) {
            qranges.push(r);
        }
        if let Some(r) = ordinal_span(&s, &sorder) {
            sranges.push(r);
        }
    }

    //----------------------------
    // Output
    //----------------------------
    for (bed, order, ranges) in [("qbed", &qorder, &qranges), ("sbed", &sorder, &sranges)] {
        let name = genome_name(args.get_one::<String>(bed).unwrap());
        let size = order.len() as u64;

        writer.write_fmt(format_args!("Genome {} depths:\n", name))?;
        for (depth, count) in range_depth(ranges, size) {
            writer.write_fmt(format_args!(
                "Depth {}: {} of {} ({:.1}%)\n",
                depth,
                count,
                size,
                count as f64 * 100.0 / size as f64
            ))?;
        }
    }

    Ok(())
}

/// First and last ordinal of the genes found in `order`.
fn ordinal_span(genes: &[String], order: &GeneOrder) -> Option<(u64, u64)> {
    let ordinals: Vec<u64> = genes
        .iter()
        .filter_map(|g| order.get(g).map(|(idx, _)| idx as u64))
        .collect();
    let min = *ordinals.iter().min()?;
    let max = *ordinals.iter().max()?;
    Some((min, max))
}
