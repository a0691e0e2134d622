extern crate clap;
use clap::*;
use env_logger::Env;

mod cmd_synteny;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let app = Command::new("synteny")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`synteny` - Synteny block detection and chaining")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_synteny::scan::make_subcommand())
        .subcommand(cmd_synteny::liftover::make_subcommand())
        .subcommand(cmd_synteny::mcscan::make_subcommand())
        .subcommand(cmd_synteny::depth::make_subcommand())
        .subcommand(cmd_synteny::breakpoint::make_subcommand())
        .subcommand(cmd_synteny::group::make_subcommand())
        .after_help(
            r###"Subcommand groups:

* Blocks:
    * scan       - Collinear blocks from matches by single linkage
    * liftover   - Pull matches lying next to anchors

* Tracks:
    * mcscan     - Stack blocks on a reference gene order
    * depth      - Multiplicity of blocks along both genomes
    * breakpoint - Gaps where collinearity ends

* Groups:
    * group      - Ortho-groups from anchor pairs

Logging goes to stderr; set RUST_LOG=debug for per-pair details.

"###,
        );

    // Check which subcommand the user ran...
    match app.get_matches().subcommand() {
        Some(("scan", sub_matches)) => cmd_synteny::scan::execute(sub_matches),
        Some(("liftover", sub_matches)) => cmd_synteny::liftover::execute(sub_matches),
        Some(("mcscan", sub_matches)) => cmd_synteny::mcscan::execute(sub_matches),
        Some(("depth", sub_matches)) => cmd_synteny::depth::execute(sub_matches),
        Some(("breakpoint", sub_matches)) => cmd_synteny::breakpoint::execute(sub_matches),
        Some(("group", sub_matches)) => cmd_synteny::group::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
