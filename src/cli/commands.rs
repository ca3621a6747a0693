// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Subcommand implementations.

use std::error::Error;
use std::fs;
use std::io::{self, BufRead, BufReader, Read, Write};

use serde::Serialize;
use skipset::{
    decode_base64, encode_base64, encode_ids, encode_ids_with_runs, high_key, ScriptParams,
    SkipListFactory, SkipSet, Verdict,
};

use super::display::*;

type CliResult = Result<(), Box<dyn Error>>;

/// Chunks listed by `inspect` before the table is cut short.
const MAX_LISTED_CHUNKS: usize = 64;

/// Read a file, or stdin for `-`.
fn read_input(input: &str) -> io::Result<Vec<u8>> {
    if input == "-" {
        let mut bytes = Vec::new();
        io::stdin().lock().read_to_end(&mut bytes)?;
        Ok(bytes)
    } else {
        fs::read(input)
    }
}

/// Raw portable-format bytes, decoding base64 first when asked.
fn read_set_bytes(input: &str, base64: bool) -> Result<Vec<u8>, Box<dyn Error>> {
    let bytes = read_input(input)?;
    if base64 {
        Ok(decode_base64(std::str::from_utf8(&bytes)?)?)
    } else {
        Ok(bytes)
    }
}

fn load_set(input: &str, base64: bool) -> Result<SkipSet, Box<dyn Error>> {
    let bytes = read_set_bytes(input, base64)?;
    Ok(SkipSet::from_bytes(&bytes)?)
}

pub fn run_inspect(input: &str, base64: bool) -> CliResult {
    let bytes = read_set_bytes(input, base64)?;
    let raw_len = bytes.len();
    let set = SkipSet::from_bytes(&bytes)?;
    let index = set.index();

    title("SKIP SET");
    section_top("SUMMARY");
    row(&format!(" Source       {}", input));
    row(&format!(" Size         {}", format_size(raw_len)));
    row(&format!(" Chunks       {}", index.chunk_count()));
    row(&format!(" Members      {}", paint(Style::Emphasis, &index.len().to_string())));
    row(&format!(
        " Fingerprint  {}",
        paint(Style::Hash, &format!("{:08x}", index.fingerprint()))
    ));
    section_bot();

    if index.is_empty() {
        return Ok(());
    }

    section_top("CHUNKS");
    row(&paint(
        Style::Dim,
        &format!(
            " {}  {}  {}  {}",
            pad_left("key", 5),
            pad_right("variant", 8),
            pad_left("members", 7),
            "id range"
        ),
    ));
    for chunk in index.chunks().take(MAX_LISTED_CHUNKS) {
        row(&format!(
            " {}  {}  {}  {}..={}",
            pad_left(&chunk.key.to_string(), 5),
            pad_right(&kind_badge(chunk.kind), 8),
            pad_left(&chunk.cardinality.to_string(), 7),
            chunk.first,
            chunk.last,
        ));
    }
    let hidden = index.chunk_count().saturating_sub(MAX_LISTED_CHUNKS);
    if hidden > 0 {
        row(&paint(Style::Dim, &format!(" ... {} more chunks", hidden)));
    }
    section_bot();
    Ok(())
}

pub fn run_contains(input: &str, base64: bool, ids: &[u32]) -> CliResult {
    let set = load_set(input, base64)?;
    let width = ids.iter().map(|id| id.to_string().len()).max().unwrap_or(0);
    for &id in ids {
        println!(
            "{}  {}  {}",
            pad_left(&id.to_string(), width),
            membership_label(set.contains(id)),
            paint(Style::Dim, &format!("chunk {}", high_key(id)))
        );
    }
    Ok(())
}

/// Parse ids separated by whitespace or commas.
fn parse_ids(text: &str) -> Result<Vec<u32>, String> {
    text.split(|c: char| c.is_ascii_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<u32>()
                .map_err(|e| format!("invalid id {:?}: {}", token, e))
        })
        .collect()
}

pub fn run_encode(runs: bool, raw: Option<&str>) -> CliResult {
    let mut text = String::new();
    io::stdin().lock().read_to_string(&mut text)?;
    let ids = parse_ids(&text)?;

    let mut buf = Vec::new();
    if runs {
        encode_ids_with_runs(ids, &mut buf);
    } else {
        encode_ids(ids, &mut buf);
    }

    match raw {
        Some(path) => {
            fs::write(path, &buf)?;
            eprintln!("wrote {} to {}", format_size(buf.len()), path);
        }
        None => println!("{}", encode_base64(&buf)),
    }
    Ok(())
}

#[derive(Serialize)]
struct ScoredLine {
    line: usize,
    score: f64,
    #[serde(flatten)]
    verdict: Verdict,
}

pub fn run_score(params: &str, docs: Option<&str>) -> CliResult {
    let params = ScriptParams::from_path(params)?;
    let factory = SkipListFactory::new(&params)?;
    let leaf = factory.new_leaf();
    let policy = factory.policy();

    let reader: Box<dyn BufRead> = match docs {
        Some(path) => Box::new(BufReader::new(fs::File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: serde_json::Value = serde_json::from_str(&line)
            .map_err(|e| format!("line {}: invalid JSON: {}", number + 1, e))?;
        let verdict = leaf.explain(&doc);
        let scored = ScoredLine {
            line: number + 1,
            score: policy.score(verdict),
            verdict,
        };
        writeln!(out, "{}", serde_json::to_string(&scored)?)?;
    }
    Ok(())
}
