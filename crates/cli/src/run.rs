//! Executes a parsed command against a table file.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use fwbt::Table;
use tracing::info;

use crate::bytes::{decode, encode};

/// Runs the subcommand in `matches`, writing human-readable output to `out`.
pub fn run<W: Write>(matches: &ArgMatches, out: &mut W) -> Result<()> {
    let utf8 = matches.get_flag("utf8");
    let Some((name, sub)) = matches.subcommand() else {
        anyhow::bail!("no command given");
    };
    let file = path_arg(sub, "file")?;

    match name {
        "info" => {
            let table = load(file)?;
            print_header(&table, out)?;
        }
        "dump" => {
            let table = load(file)?;
            print_header(&table, out)?;
            for (i, entry) in table.iter().enumerate() {
                writeln!(
                    out,
                    "{i}: {} => {}",
                    encode(&entry.key, utf8),
                    encode(&entry.value, utf8)
                )?;
            }
        }
        "get" => {
            let table = load(file)?;
            let key = decode(str_arg(sub, "key")?, utf8)?;
            let value = table.get(&key).ok_or(fwbt::Error::KeyNotFound)?;
            writeln!(out, "{}", encode(value, utf8))?;
        }
        "set" => {
            let mut table = load(file)?;
            let key = decode(str_arg(sub, "key")?, utf8)?;
            let value = decode(str_arg(sub, "value")?, utf8)?;
            let replaced = table
                .set(key, value, sub.get_flag("replace"))
                .map_err(fwbt::Error::from)?;
            info!(replaced = replaced.is_some(), "set entry");
            store(sub, file, &table)?;
        }
        "rm" => {
            let mut table = load(file)?;
            let key = decode(str_arg(sub, "key")?, utf8)?;
            table.remove_by_key(&key)?;
            store(sub, file, &table)?;
        }
        "rm-index" => {
            let mut table = load(file)?;
            let index = *sub
                .get_one::<usize>("index")
                .context("missing argument: index")?;
            table.remove_by_index(index)?;
            store(sub, file, &table)?;
        }
        "new" => {
            let key_width = *sub
                .get_one::<u32>("key-width")
                .context("missing argument: key-width")?;
            let value_width = *sub
                .get_one::<u32>("value-width")
                .context("missing argument: value-width")?;
            let table = Table::new(key_width, value_width)?;
            fwbt::save(file, &table)
                .with_context(|| format!("failed to write {}", file.display()))?;
            info!(path = %file.display(), "created empty table");
        }
        other => anyhow::bail!("unknown command: {other}"),
    }
    Ok(())
}

fn print_header<W: Write>(table: &Table, out: &mut W) -> Result<()> {
    writeln!(out, "Header Info:")?;
    for line in table.header().to_string().lines() {
        writeln!(out, "\t{line}")?;
    }
    Ok(())
}

fn load(path: &Path) -> Result<Table> {
    fwbt::load(path).with_context(|| format!("failed to load {}", path.display()))
}

fn store(sub: &ArgMatches, file: &Path, table: &Table) -> Result<()> {
    let target = sub.get_one::<PathBuf>("out").map_or(file, PathBuf::as_path);
    fwbt::save(target, table).with_context(|| format!("failed to write {}", target.display()))?;
    info!(path = %target.display(), entry_count = table.len(), "wrote table");
    Ok(())
}

fn path_arg<'a>(sub: &'a ArgMatches, name: &str) -> Result<&'a Path> {
    sub.get_one::<PathBuf>(name)
        .map(PathBuf::as_path)
        .with_context(|| format!("missing argument: {name}"))
}

fn str_arg<'a>(sub: &'a ArgMatches, name: &str) -> Result<&'a str> {
    sub.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing argument: {name}"))
}
