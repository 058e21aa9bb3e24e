//! `matecon convert`: read workbooks, build the material tree, write the
//! cp932 text file next to the first input.

use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::{info, warn};

use crate::cli::{AppContext, ConvertArgs};
use crate::core::book::{BookContainer, ReadOptions};
use crate::core::material::Material;
use crate::infra::config::{Config, load_config};
use crate::infra::io::{ExcelFileSet, output_path_for, write_text_file};
use crate::infra::xlsx::read_books;

pub fn run(args: ConvertArgs, ctx: &AppContext) -> Result<()> {
    let config = load_config().unwrap_or_else(|err| {
        warn!(%err, "configuration ignored");
        Config::default()
    });

    let files = ExcelFileSet::from_args(&args.files)?;
    let options = config.read_options(args.include_hidden, args.strict);
    let output = resolve_output(&args, &config, &files)?;

    if ctx.dry_run {
        if !ctx.quiet {
            println!("{}", "DRY RUN: Would convert:".yellow());
            for path in files.paths() {
                println!("  {}", path.display());
            }
            println!("  Output: {}", output.display());
            println!("  Options: {:?}", options);
        }
        return Ok(());
    }

    let container = read_with_progress(&files, options, ctx)?;
    let material = Material::from_container(container).context("Failed to build material tree")?;
    let lines = material.format_lines().context("Failed to format material lines")?;

    let overwrite = args.force || config.overwrite;
    let quiet = ctx.quiet;
    let confirm = move |path: &Path| overwrite || ask_overwrite(path, quiet);

    match write_text_file(&output, &lines, &confirm)? {
        Some(written) => {
            info!(path = %written.display(), lines = lines.len(), "conversion finished");
            if !ctx.quiet {
                println!("{} {}", "Wrote".green(), written.display());
            }
        }
        None => {
            if !ctx.quiet {
                eprintln!("{} {} (use --force to overwrite)", "Skipped".yellow(), output.display());
            }
        }
    }

    Ok(())
}

/// `--output` wins; otherwise the first input renamed to `.txt`, relocated
/// into the configured output directory when one is set.
fn resolve_output(args: &ConvertArgs, config: &Config, files: &ExcelFileSet) -> Result<PathBuf> {
    if let Some(explicit) = &args.output {
        return Ok(explicit.clone());
    }

    let first = files
        .first()
        .ok_or_else(|| anyhow::anyhow!("no valid input files"))?;

    Ok(output_path_for(first.path(), config.output_dir.as_deref()))
}

/// Read every book with a progress bar that stays hidden when quiet.
pub fn read_with_progress(
    files: &ExcelFileSet,
    options: ReadOptions,
    ctx: &AppContext,
) -> Result<BookContainer> {
    let pb = progress_bar(files.len() as u64, ctx)?;

    let container = read_books(&files.paths(), options, |book| {
        pb.set_message(book.name());
        pb.inc(1);
    })
    .context("Failed to read workbooks")?;

    pb.finish_and_clear();
    Ok(container)
}

fn progress_bar(len: u64, ctx: &AppContext) -> Result<ProgressBar> {
    if ctx.quiet {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .context("invalid progress template")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

/// Interactive confirmation; anything but `y`/`yes` declines, and so does a
/// non-terminal stdin.
fn ask_overwrite(path: &Path, quiet: bool) -> bool {
    if quiet || !std::io::stdin().is_terminal() {
        return false;
    }

    eprint!("{} exists. Overwrite? [y/N] ", path.display());
    if std::io::stderr().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(files: Vec<String>) -> ConvertArgs {
        ConvertArgs { files, output: None, force: false, strict: false, include_hidden: false }
    }

    #[test]
    fn explicit_output_wins() {
        let dir = TempDir::new().unwrap();
        let book = dir.path().join("橋梁.xlsx");
        std::fs::write(&book, b"PK").unwrap();

        let files = ExcelFileSet::from_args(&[book.display().to_string()]).unwrap();
        let config = Config { output_dir: Some(dir.path().join("out")), ..Config::default() };

        let default = resolve_output(&args(vec![]), &config, &files).unwrap();
        assert_eq!(default, dir.path().join("out").join("橋梁.txt"));

        let mut explicit = args(vec![]);
        explicit.output = Some(PathBuf::from("x.txt"));
        assert_eq!(resolve_output(&explicit, &config, &files).unwrap(), PathBuf::from("x.txt"));
    }

    #[test]
    fn quiet_never_prompts() {
        assert!(!ask_overwrite(Path::new("out.txt"), true));
    }
}
