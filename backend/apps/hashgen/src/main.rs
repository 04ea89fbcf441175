//! Credential file generator
//!
//! Reads `username:password` lines on stdin and writes the credential
//! document the gate loads: a JSON array of `{username, password}` with
//! each password replaced by its Argon2id PHC hash.
//!
//! ```text
//! $ printf 'chris:danny bliss\n' | hashgen > users.json
//! ```

use std::io::{self, BufRead, Write};

use anyhow::{Context, bail};
use clap::Parser;
use gate::models::CredentialRecord;
use platform::password::ClearTextPassword;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "hashgen", version, about = "Hash username:password lines into a gate credential file")]
struct Cli {
    /// Refuse passwords shorter than 8 or longer than 128 characters,
    /// blank ones, and ones with control characters
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let stdin = io::stdin();
    let records = hash_lines(stdin.lock(), cli.strict)?;

    let mut out = io::stdout().lock();
    write_document(&mut out, &records)?;
    out.flush()?;

    Ok(())
}

/// Split a line on its first `:`
///
/// `Ok(None)` for a blank line. The password keeps any further colons.
/// An empty username or password is an error: the gate rejects empty
/// signin fields, so such an entry could never be used.
fn parse_line(line_no: usize, line: &str) -> anyhow::Result<Option<(&str, &str)>> {
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() {
        return Ok(None);
    }

    match line.split_once(':') {
        Some(("", _)) => bail!("empty username on line {line_no}"),
        Some((_, "")) => bail!("empty password on line {line_no}"),
        Some((username, password)) => Ok(Some((username, password))),
        None => bail!("malformed input on line {line_no}: expected username:password"),
    }
}

fn hash_lines<R: BufRead>(input: R, strict: bool) -> anyhow::Result<Vec<CredentialRecord>> {
    let mut records = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.context("reading stdin")?;
        let Some((username, password)) = parse_line(line_no, &line)? else {
            continue;
        };

        let password = if strict {
            ClearTextPassword::new(password.to_string())
                .with_context(|| format!("line {line_no} ({username})"))?
        } else {
            ClearTextPassword::candidate(password)
        };

        let hash = password
            .hash()
            .with_context(|| format!("hashing password on line {line_no}"))?;

        records.push(CredentialRecord {
            username: username.to_string(),
            password: hash.as_phc_string().to_string(),
        });
    }

    Ok(records)
}

/// Pretty JSON, tab indented
fn write_document<W: Write>(out: W, records: &[CredentialRecord]) -> anyhow::Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(out, formatter);
    records.serialize(&mut serializer)?;
    Ok(())
}
