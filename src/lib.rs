//! **matecon** - Convert material take-off workbooks into JIP-MATERIAL fixed-width text
//!
//! Header-driven table detection over freely laid-out sheets, a five-level
//! hierarchy tree with BLOCK/DETAIL/PAINT leaves, and cp932 output.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Core pipeline - classify rows, build the tree, format and emit lines
pub mod core {
    /// Typed cell values and rows
    #[macro_use]
    pub mod cell;

    /// Domain error types
    pub mod error;

    /// Row classification into hierarchy levels
    pub mod classify;

    /// Per-level fixed-width column templates
    pub mod template;

    /// Line rendering and BLOCK quantity aggregation
    pub mod format;

    /// Header detection and table extraction
    pub mod locate;

    /// Workbook, sheet and container model
    pub mod book;
    pub use book::{BookContainer, BookNode, CellSource, ReadOptions, SheetNode};

    /// Material hierarchy tree
    pub mod material;
    pub use material::{Material, MaterialNode, MaterialTree};

    /// Header block and pre-order line emission
    pub mod emit;

    /// `convert` command
    pub mod convert;
    pub use convert::run as convert_run;

    /// `tree` command: books, sheets and the material hierarchy
    pub mod tree;
    pub use tree::run as tree_run;
}

/// Infrastructure - Configuration, workbook reading, file I/O
pub mod infra {
    /// Configuration management with TOML support
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Input registration and cp932 text output
    pub mod io;
    pub use io::{ExcelFile, ExcelFileSet, write_text_file};

    /// calamine workbook reader
    pub mod xlsx;
    pub use xlsx::{XlsxSource, read_books};

    /// Display-width and half-width helpers
    pub mod utils;
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use core::{convert_run, tree_run};
pub use infra::{Config, load_config};

// Core types for external consumers
pub use core::error::{ConvertError, InputError};
pub use core::{Material, MaterialTree, ReadOptions};
