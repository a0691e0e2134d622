use std::io::{self, BufRead, Write};

/// Pairs of one block in an anchor file.
pub type AnchorBlock = Vec<(String, String)>;

/// Reads `###`-delimited blocks of `query subject` rows.
///
/// Any line starting with `#` opens a new block; rows before the first
/// header form a block of their own. Columns past the second are ignored,
/// as are rows with fewer than two columns. Empty blocks are not returned.
pub fn read_blocks<R: BufRead>(reader: R) -> anyhow::Result<Vec<AnchorBlock>> {
    let mut blocks: Vec<AnchorBlock> = vec![];
    let mut current: AnchorBlock = vec![];

    for line in reader.lines() {
        let line = line?;
        if line.starts_with('#') {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(pair) = split_pair(&line) {
            current.push(pair);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    Ok(blocks)
}

/// Reads `query subject` rows, skipping headers and comments.
///
/// Suits both anchor files and tabular BLAST output.
pub fn read_pairs<R: BufRead>(reader: R) -> anyhow::Result<Vec<(String, String)>> {
    let mut pairs = vec![];
    for line in reader.lines() {
        let line = line?;
        if line.starts_with('#') {
            continue;
        }
        if let Some(pair) = split_pair(&line) {
            pairs.push(pair);
        }
    }
    Ok(pairs)
}

fn split_pair(line: &str) -> Option<(String, String)> {
    let mut fields = line.split_whitespace();
    let a = fields.next()?;
    let b = fields.next()?;
    Some((a.to_string(), b.to_string()))
}

/// Writes blocks, each introduced by a `###` line.
pub fn write_blocks<W: Write>(writer: &mut W, blocks: &[AnchorBlock]) -> io::Result<()> {
    for block in blocks {
        writeln!(writer, "###")?;
        for (a, b) in block {
            writeln!(writer, "{}\t{}", a, b)?;
        }
    }
    Ok(())
}
