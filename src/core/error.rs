//! Error taxonomy for input registration and conversion.

use std::path::PathBuf;

/// File registration failures, raised before any workbook is parsed
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("not an Excel workbook (.xlsx/.xlsm): {}", .0.display())]
    UnsupportedExtension(PathBuf),

    #[error("cannot open {}: {source}", path.display())]
    Unopenable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file already added: {}", .0.display())]
    Duplicate(PathBuf),
}

/// Conversion failures: reading, tree construction, formatting, emission
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("failed to read workbook {}: {message}", path.display())]
    Workbook { path: PathBuf, message: String },

    #[error("{}: no valid sheets", path.display())]
    NoValidSheets { path: PathBuf },

    #[error("cannot determine parent for level {level} row at position {index}")]
    MissingParent { level: u8, index: usize },

    #[error("block `{name}` has no quantity values")]
    UndefinedBlockQuantity { name: String },

    #[error("quantity is not numeric: `{0}`")]
    NonNumericQuantity(String),

    #[error("no material data")]
    NoMaterialData,
}

/// Why a sheet failed the hierarchy well-formedness check
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyViolation {
    #[error("first row is level {found}, expected level 1")]
    FirstNotTopLevel { found: u8 },

    #[error("level jumps from {from} to {to} at table row {row}")]
    LevelJump { from: u8, to: u8, row: usize },

    #[error("level {level} repeats at table row {row}")]
    RepeatedLevel { level: u8, row: usize },
}

/// Header detection failure for a single grid
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("header row not found")]
pub struct HeaderNotFound;
