//! CLI command implementations

use anyhow::{Context, bail};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use strindex_core::escape;
use strindex_core::{
    CaretSpec, ConfigLoader, EditorSession, JavaSourceTree, ResultExt, StrIndexConfig,
    StrIndexError,
};
use tracing::{debug, info, warn};

use crate::output::{self, CaretReport, LiteralReport};
use crate::{ConfigFormat, OutputFormat};

/// Read a source file, `-` meaning standard input
fn read_source(file: &Path) -> anyhow::Result<String> {
    if file == Path::new("-") {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read standard input")?;
        return Ok(source);
    }
    fs::read_to_string(file).map_err(|e| StrIndexError::io_error(file, e).into())
}

/// Explicit config, or the first one found walking up from the source file
///
/// A broken discovered config is reported and replaced by the defaults; a
/// broken explicit one is an error.
fn load_config(config_path: Option<&Path>, file: &Path) -> anyhow::Result<StrIndexConfig> {
    let config = match config_path {
        Some(path) => ConfigLoader::load(Some(path), None)?,
        None => {
            let start_dir = match file.parent() {
                Some(parent) if !parent.as_os_str().is_empty() && file != Path::new("-") => {
                    parent
                }
                _ => Path::new("."),
            };
            ConfigLoader::load(None, Some(start_dir))
                .log_and_continue()
                .unwrap_or_default()
        }
    };
    debug!("Using configuration {:?}", config);
    Ok(config)
}

/// Position of the caret inside the string value it is editing
pub fn at_command(
    file: &Path,
    carets: &[CaretSpec],
    format: OutputFormat,
    compact: bool,
    indexing: bool,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let source = read_source(file)?;
    let mut config = load_config(config_path.as_deref(), file)?;
    if compact {
        config.display.compact_single_line = true;
    }

    let offsets = carets
        .iter()
        .map(|caret| caret.resolve(&source))
        .collect::<strindex_core::Result<Vec<_>>>()?;
    let (Some(&primary), Some(&offset)) = (carets.first(), offsets.first()) else {
        bail!("No caret given");
    };
    if offsets.len() > 1 {
        warn!(
            "{} carets given, a position is only reported for a single caret",
            offsets.len()
        );
    }

    let mut session = EditorSession::new(source, config);
    session.set_indexing(indexing);
    session.carets_moved(offsets);
    info!("Caret {} at offset {:?}", primary, offset);

    let report = CaretReport::new(
        primary,
        u32::from(offset),
        carets.len(),
        session.position(),
        session.display_text(),
    );
    output::print_caret_report(&report, format)
}

/// Decoded value of every string literal in a file
pub fn literals_command(file: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let source = read_source(file)?;
    let tree = JavaSourceTree::parse(source);
    for error in tree.lexer_errors() {
        warn!("{} at {:?}", error.message, error.span);
    }

    let reports: Vec<LiteralReport> = tree
        .string_literals()
        .iter()
        .map(|literal| {
            let value = literal
                .is_terminated()
                .then(|| escape::decode(literal.raw_content(), literal.kind()))
                .flatten();
            LiteralReport::new(tree.text(), literal, value)
        })
        .collect();
    output::print_literal_reports(&reports, format)
}

/// Write a configuration file with the default settings
pub fn config_init_command(format: ConfigFormat, force: bool) -> anyhow::Result<()> {
    let (path, content) = match format {
        ConfigFormat::Toml => (
            PathBuf::from(".strindexrc.toml"),
            toml::to_string_pretty(&StrIndexConfig::default())?,
        ),
        ConfigFormat::Json => (
            PathBuf::from(".strindexrc.json"),
            serde_json::to_string_pretty(&StrIndexConfig::default())?,
        ),
    };

    if path.exists() && !force {
        bail!(
            "Configuration file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }
    fs::write(&path, content).map_err(|e| StrIndexError::io_error(&path, e))?;
    println!("Created {}", path.display());
    Ok(())
}

/// Print the configuration in effect for the current directory
pub fn config_show_command(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = ConfigLoader::load(config_path.as_deref(), None)?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
