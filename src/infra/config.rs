use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};
use crate::core::book::ReadOptions;

/// Config file names searched in the working directory, first match wins
pub const CONFIG_FILES: [&str; 4] =
    ["matecon.toml", "matecon.yaml", "matecon.json", ".matecon.toml"];

/// Environment variable prefix (`MATECON_STRICT_HIERARCHY=true`, ...)
pub const ENV_PREFIX: &str = "MATECON";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Read hidden worksheets too
    pub include_hidden_sheets: bool,

    /// Exclude sheets whose level sequence is malformed
    pub strict_hierarchy: bool,

    /// Replace an existing output file without asking
    pub overwrite: bool,

    /// Directory for generated text files (defaults to next to the first input)
    pub output_dir: Option<PathBuf>,
}

impl Config
{
    /// Reader options, with CLI flags able to switch features on
    pub fn read_options(
        &self,
        include_hidden: bool,
        strict: bool,
    ) -> ReadOptions
    {
        ReadOptions {
            include_hidden: include_hidden || self.include_hidden_sheets,
            strict_hierarchy: strict || self.strict_hierarchy,
        }
    }
}

pub fn load_config() -> Result<Config>
{
    load_config_from(Path::new("."))
}

/// Layer the first config file found in `dir` under `MATECON_*` variables.
pub fn load_config_from(dir: &Path) -> Result<Config>
{
    let mut builder = config::Config::builder();

    for name in &CONFIG_FILES
    {
        let path = dir.join(name);
        if path.exists()
        {
            builder = builder.add_source(config::File::from(path));
            break;
        }
    }

    // Single-level keys, so split on the double underscore only
    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__"),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join(CONFIG_FILES[0]);

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if ctx.dry_run
    {
        if !ctx.quiet
        {
            println!("Would create config file at {}", config_path.display());
        }
        return Ok(());
    }

    let toml_string =
        toml::to_string_pretty(&Config::default()).context("Failed to serialize default config")?;

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests
{
    use super::*;
    use tempfile::TempDir;

    fn ctx() -> AppContext
    {
        AppContext { quiet: true, no_color: true, dry_run: false }
    }

    #[test]
    fn defaults_without_files()
    {
        let dir = TempDir::new().unwrap();
        let cfg = load_config_from(dir.path()).unwrap();
        assert!(!cfg.strict_hierarchy);
        assert!(!cfg.include_hidden_sheets);
        assert_eq!(cfg.output_dir, None);
    }

    #[test]
    fn file_values_are_read()
    {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("matecon.toml"),
            "strict_hierarchy = true\noutput_dir = \"out\"\n",
        )
        .unwrap();

        let cfg = load_config_from(dir.path()).unwrap();
        assert!(cfg.strict_hierarchy);
        assert_eq!(cfg.output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn cli_flags_switch_options_on()
    {
        let cfg = Config { strict_hierarchy: true, ..Config::default() };
        let opts = cfg.read_options(true, false);
        assert!(opts.include_hidden);
        assert!(opts.strict_hierarchy);
    }

    #[test]
    fn init_refuses_to_clobber()
    {
        let dir = TempDir::new().unwrap();
        let args = || InitArgs { path: dir.path().to_path_buf(), force: false };

        init(args(), &ctx()).unwrap();
        let written = std::fs::read_to_string(dir.path().join("matecon.toml")).unwrap();
        let parsed: Config = toml::from_str(&written).unwrap();
        assert_eq!(parsed, Config::default());

        assert!(init(args(), &ctx()).is_err());
        init(InitArgs { force: true, ..args() }, &ctx()).unwrap();
    }
}
