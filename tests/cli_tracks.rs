use assert_cmd::prelude::*;
use std::process::Command;
use tempfile::TempDir;

#[test]
fn command_mcscan() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("synteny")?;
    let output = cmd
        .arg("mcscan")
        .arg("tests/synteny/q.bed")
        .arg("tests/synteny/stack.anchors")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let stderr = String::from_utf8(output.stderr)?;

    assert_eq!(stdout.lines().count(), 15);
    // track 1: a3-a8 block, a10-a11 block, lone a13; track 2: a1-a4 block
    assert!(stdout.contains("a1\t.\tb1\n"));
    assert!(stdout.contains("a3\tc3\tb3\n"));
    assert!(stdout.contains("a9\t.\t.\n"));
    assert!(stdout.contains("a10\td10\t.\n"));
    assert!(stdout.contains("a13\tb20\t.\n"));
    assert!(stderr.contains("Chain 0: score=9"));
    assert!(stderr.contains("Chain 1: score=4 done!"));

    Ok(())
}

#[test]
fn command_mcscan_ascii() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("synteny")?;
    let output = cmd
        .arg("mcscan")
        .arg("tests/synteny/q.bed")
        .arg("tests/synteny/stack.anchors")
        .arg("--ascii")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("a1\t.x\n"));
    assert!(stdout.contains("a3\txx\n"));
    assert!(stdout.contains("a15\t..\n"));

    Ok(())
}

#[test]
fn command_mcscan_unassigned() -> anyhow::Result<()> {
    let tempdir = TempDir::new()?;
    let leftover = tempdir.path().join("leftover.tsv");

    let mut cmd = Command::cargo_bin("synteny")?;
    let output = cmd
        .arg("mcscan")
        .arg("tests/synteny/q.bed")
        .arg("tests/synteny/stack.anchors")
        .arg("--iter")
        .arg("1")
        .arg("--unassigned")
        .arg(&leftover)
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let stderr = String::from_utf8(output.stderr)?;

    assert!(stdout.contains("a1\t.\n"));
    assert!(stdout.contains("a3\tc3\n"));
    assert!(stderr.contains("1 blocks unassigned"));
    assert_eq!(std::fs::read_to_string(&leftover)?, "0\t0\t3\t4\n");

    Ok(())
}

#[test]
fn command_mcscan_invalid_iter() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("synteny")?;
    cmd.arg("mcscan")
        .arg("tests/synteny/q.bed")
        .arg("tests/synteny/stack.anchors")
        .arg("--iter")
        .arg("0")
        .assert()
        .failure();

    Ok(())
}

#[test]
fn command_depth() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("synteny")?;
    let output = cmd
        .arg("depth")
        .arg("tests/synteny/q.s.anchors")
        .arg("--qbed")
        .arg("tests/synteny/q.bed")
        .arg("--sbed")
        .arg("tests/synteny/s.bed")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(
        stdout,
        "\
Genome q depths:
Depth 0: 4 of 15 (26.7%)
Depth 1: 11 of 15 (73.3%)
Genome s depths:
Depth 0: 4 of 15 (26.7%)
Depth 1: 11 of 15 (73.3%)
"
    );

    Ok(())
}

#[test]
fn command_depth_stacked() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("synteny")?;
    let output = cmd
        .arg("depth")
        .arg("tests/synteny/stack.anchors")
        .arg("--qbed")
        .arg("tests/synteny/q.bed")
        .arg("--sbed")
        .arg("tests/synteny/s.bed")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    // a1-a4 and a3-a8 overlap on a3, a4; the b20/a13 block maps on neither side
    assert!(stdout.contains(
        "Genome q depths:\nDepth 0: 5 of 15 (33.3%)\nDepth 1: 8 of 15 (53.3%)\nDepth 2: 2 of 15 (13.3%)\n"
    ));
    // b1-b4 is the only block with subject genes in s.bed
    assert!(stdout.contains(
        "Genome s depths:\nDepth 0: 11 of 15 (73.3%)\nDepth 1: 4 of 15 (26.7%)\n"
    ));

    Ok(())
}

#[test]
fn command_breakpoint() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("synteny")?;
    let output = cmd
        .arg("breakpoint")
        .arg("tests/synteny/hits.bed")
        .arg("tests/synteny/markers.bed")
        .arg("--xdist")
        .arg("5")
        .arg("--ydist")
        .arg("5000")
        .arg("-n")
        .arg("3")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout, "scaffold1\t3050\t20049\n");

    Ok(())
}

#[test]
fn command_breakpoint_one_block() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("synteny")?;
    let output = cmd
        .arg("breakpoint")
        .arg("tests/synteny/hits.bed")
        .arg("tests/synteny/markers.bed")
        .arg("--xdist")
        .arg("5")
        .arg("--ydist")
        .arg("20000")
        .arg("-n")
        .arg("3")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.is_empty());

    Ok(())
}
