use clap::*;
use std::io::Write;
use synteny::libs::synteny::{read_pairs, LabelGrouper};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("group")
        .about("Cluster the anchors into ortho-groups")
        .after_help(
            r###"
Groups the anchors into ortho-groups. Genes linked by an anchor pair, directly
or through other genes, end up in the same group.

Multiple anchor files can be given.

Output: one group per line, members sorted and joined by commas.

Examples:
1. Groups from two comparisons:
   synteny group a.b.anchors a.c.anchors

"###,
        )
        .arg(
            Arg::new("infiles")
                .required(true)
                .num_args(1..)
                .index(1)
                .help("Anchor file(s) to process"),
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
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());

    let mut grouper = LabelGrouper::new();
    for infile in args.get_many::<String>("infiles").unwrap() {
        for (a, b) in read_pairs(intspan::reader(infile))? {
            grouper.join(&a, &b);
        }
    }

    let groups = grouper.into_groups();
    let nmembers: usize = groups.iter().map(|g| g.len()).sum();
    log::info!(
        "Created {} groups with {} members.",
        groups.len(),
        nmembers
    );

    for g in &groups {
        writer.write_fmt(format_args!("{}\n", g.join(",")))?;
    }

    Ok(())
}
