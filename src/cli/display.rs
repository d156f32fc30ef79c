//! Repository result rendering
//!
//! Terminals get padded, coloured columns with relative times and a summary
//! header. Pipes get tab separated rows with RFC 3339 times.

use crate::models::{RepositoriesResult, Repository};
use chrono::{DateTime, SecondsFormat, Utc};
use crossterm::style::Stylize;
use std::io::{self, Write};

struct Row {
    name: String,
    description: String,
    info: String,
    private: bool,
    updated: String,
}

/// Write a repository table for `result`.
pub fn display_results(
    out: &mut impl Write,
    result: &RepositoriesResult,
    tty: bool,
    now: DateTime<Utc>,
) -> io::Result<()> {
    let rows: Vec<Row> = result
        .items
        .iter()
        .map(|repo| Row {
            name: repo.full_name.clone(),
            description: collapse_whitespace(repo.description.as_deref().unwrap_or_default()),
            info: tags(repo).join(", "),
            private: repo.private,
            updated: match (repo.updated_at, tty) {
                (Some(at), true) => fuzzy_ago_abbr(now, at),
                (Some(at), false) => at.to_rfc3339_opts(SecondsFormat::Secs, true),
                (None, _) => String::new(),
            },
        })
        .collect();

    if !tty {
        for row in &rows {
            writeln!(out, "{}\t{}\t{}\t{}", row.name, row.description, row.info, row.updated)?;
        }
        return Ok(());
    }

    if rows.is_empty() {
        writeln!(out, "\nNo repositories matched your search")?;
        return Ok(());
    }
    writeln!(out, "\nShowing {} of {} repositories\n", rows.len(), result.total)?;

    let name_w = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);
    let desc_w = rows.iter().map(|r| r.description.chars().count()).max().unwrap_or(0);
    let info_w = rows.iter().map(|r| r.info.chars().count()).max().unwrap_or(0);

    for row in &rows {
        let info = format!("{:<info_w$}", row.info);
        let info = if row.private { info.yellow() } else { info.dark_grey() };
        writeln!(
            out,
            "{}  {:<desc_w$}  {}  {}",
            format!("{:<name_w$}", row.name).bold(),
            row.description,
            info,
            row.updated.as_str().dark_grey(),
        )?;
    }
    Ok(())
}

fn tags(repo: &Repository) -> Vec<&'static str> {
    let mut tags = vec![if repo.private { "private" } else { "public" }];
    if repo.fork {
        tags.push("fork");
    }
    if repo.archived {
        tags.push("archived");
    }
    tags
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `42m`, `5h`, `12d`, or a date once older than 30 days
pub fn fuzzy_ago_abbr(now: DateTime<Utc>, at: DateTime<Utc>) -> String {
    let ago = now.signed_duration_since(at);
    if ago.num_hours() < 1 {
        format!("{}m", ago.num_minutes().max(0))
    } else if ago.num_hours() < 24 {
        format!("{}h", ago.num_hours())
    } else if ago.num_days() < 30 {
        format!("{}d", ago.num_days())
    } else {
        at.format("%b %e, %Y").to_string()
    }
}

/// Pretty printed JSON array of the matched items
pub fn display_json(out: &mut impl Write, result: &RepositoriesResult) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &result.items)?;
    writeln!(out)
}
