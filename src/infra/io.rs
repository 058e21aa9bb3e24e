use std::borrow::Cow;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use encoding_rs::SHIFT_JIS;
use indexmap::IndexMap;
use tracing::{debug, info, instrument, warn};

use crate::core::error::InputError;

/// Workbook extensions accepted as input (compared case-insensitively)
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["xlsx", "xlsm"];

/// Extension of the generated text file
pub const OUTPUT_EXTENSION: &str = "txt";

/// A validated input workbook path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcelFile {
    path: PathBuf,
}

impl ExcelFile {
    /// Validate `path`: it exists, is a regular file, carries an accepted
    /// extension and can be opened for reading.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, InputError> {
        let path = path.into();

        if !path.exists() {
            return Err(InputError::NotFound(path));
        }
        if !path.is_file() {
            return Err(InputError::NotAFile(path));
        }

        let accepted = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| ACCEPTED_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(e)));
        if !accepted {
            return Err(InputError::UnsupportedExtension(path));
        }

        if let Err(source) = File::open(&path) {
            return Err(InputError::Unopenable { path, source });
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Identity used for duplicate detection
    fn key(&self) -> PathBuf {
        dunce::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone())
    }
}

/// Insertion-ordered set of validated input workbooks
#[derive(Debug, Clone, Default)]
pub struct ExcelFileSet {
    files: IndexMap<PathBuf, ExcelFile>,
}

impl ExcelFileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file; the same file (by canonical path) can only be added once.
    pub fn add(&mut self, file: ExcelFile) -> Result<(), InputError> {
        let key = file.key();
        if self.files.contains_key(&key) {
            return Err(InputError::Duplicate(file.path));
        }
        self.files.insert(key, file);
        Ok(())
    }

    /// Validate and add a raw path
    pub fn add_path(&mut self, path: impl Into<PathBuf>) -> Result<(), InputError> {
        self.add(ExcelFile::new(path)?)
    }

    /// Register every argument, skipping invalid ones with a warning.
    /// Fails when nothing valid remains.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let mut set = Self::new();

        for arg in args {
            let path = clean_path_arg(arg.as_ref());
            match set.add_path(&path) {
                Ok(()) => debug!(path = %path.display(), "input registered"),
                Err(err) => warn!(%err, "skipping input"),
            }
        }

        if set.is_empty() {
            anyhow::bail!("no valid input files");
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn first(&self) -> Option<&ExcelFile> {
        self.files.values().next()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExcelFile> {
        self.files.values()
    }

    pub fn paths(&self) -> Vec<&Path> {
        self.iter().map(ExcelFile::path).collect()
    }
}

/// Strip surrounding whitespace and quotes, then expand a leading `~`.
pub fn clean_path_arg(arg: &str) -> PathBuf {
    let trimmed = arg.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    let expanded: Cow<str> = shellexpand::tilde(trimmed);
    PathBuf::from(expanded.as_ref())
}

/// Output location for a conversion whose first input is `first_input`.
pub fn output_path_for(first_input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let renamed = first_input.with_extension(OUTPUT_EXTENSION);

    match (output_dir, renamed.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => renamed,
    }
}

/// Decides whether an existing output file may be replaced
pub trait ConfirmOverwrite {
    fn confirm(&self, path: &Path) -> bool;
}

impl<F> ConfirmOverwrite for F
where
    F: Fn(&Path) -> bool,
{
    fn confirm(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Encode `lines` as Shift_JIS (cp932), one `\n` per line.
pub fn encode_lines(lines: &[String]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(lines.iter().map(|l| l.len() + 1).sum());

    for (i, line) in lines.iter().enumerate() {
        let (bytes, _, had_errors) = SHIFT_JIS.encode(line);
        if had_errors {
            let ch = first_unmappable(line).unwrap_or('?');
            anyhow::bail!("line {}: character {:?} has no Shift_JIS mapping", i + 1, ch);
        }
        out.extend_from_slice(&bytes);
        out.push(b'\n');
    }

    Ok(out)
}

fn first_unmappable(line: &str) -> Option<char> {
    let mut buf = [0u8; 4];
    line.chars().find(|ch| SHIFT_JIS.encode(ch.encode_utf8(&mut buf)).2)
}

/// Write `lines` to `path`. An existing file is replaced only when `confirm`
/// agrees; otherwise nothing is written and `Ok(None)` is returned.
#[instrument(skip_all, fields(path = %path.display(), lines = lines.len()))]
pub fn write_text_file(
    path: &Path,
    lines: &[String],
    confirm: &dyn ConfirmOverwrite,
) -> Result<Option<PathBuf>> {
    if path.exists() && !confirm.confirm(path) {
        info!("overwrite declined");
        return Ok(None);
    }

    let bytes = encode_lines(lines)
        .with_context(|| format!("Failed to encode {}", path.display()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!("output written");

    Ok(Some(path.to_path_buf()))
}
