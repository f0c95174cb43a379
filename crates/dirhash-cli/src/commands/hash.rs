//! Hash command: Scan, hash, then report

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use dirhash_core::rules::{KqlOptions, KqlQuery, YaraRule};
use dirhash_core::{FileRecord, HashAlgorithm, HashEngine, OutputFormat, Scanner, output};
use tracing::{info, warn};

use crate::cli::Cli;

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub found: usize,
    pub hashed: usize,
    pub failed: usize,
}

/// Run the hash command, echoing terminal output to `out`
///
/// Per-file hashing failures are logged and counted but do not fail the run.
///
/// # Errors
/// Returns an error if the algorithm list is invalid, the input directory
/// cannot be scanned, or any report or rule file cannot be written.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<RunSummary> {
    let mut engine = HashEngine::from_names(&cli.algorithms)?;
    if let Some(jobs) = cli.jobs {
        engine = engine.with_max_workers(jobs);
    }

    let files = Scanner::new(&cli.input_dir)
        .scan()
        .with_context(|| format!("Error enumerating files in {}", cli.input_dir.display()))?;
    let found = files.len();
    info!("Found {} files to process", found);

    let mut batch = engine.run(files).context("Error hashing files")?;
    batch.sort_by_path();

    let failed = batch.failures.len();
    if let Some(first) = batch.first_error() {
        warn!("{} files could not be hashed (first: {})", failed, first);
    }
    info!("Successfully processed {} files", batch.files.len());

    let format = OutputFormat::from(cli.format);
    if cli.echo_to_terminal() {
        echo(&batch.files, format, out)?;
    }

    if let Some(path) = &cli.output {
        output::write_report_file(&batch.files, format, path)
            .with_context(|| format!("Error writing output file {}", path.display()))?;
        info!("Output written to: {} (format: {})", path.display(), format);
    }

    if let Some(path) = &cli.yara {
        write_yara(cli, engine.algorithms(), &batch.files, path)?;
    }

    if let Some(path) = &cli.kql {
        write_kql(cli, engine.algorithms(), &batch.files, path)?;
    }

    Ok(RunSummary {
        found,
        hashed: batch.files.len(),
        failed,
    })
}

fn echo<W: Write>(files: &[FileRecord], format: OutputFormat, out: &mut W) -> Result<()> {
    if format == OutputFormat::Json {
        output::write_report(files, format, &mut *out)?;
    } else {
        out.write_all(output::render_table(files, format).as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

fn write_yara(
    cli: &Cli,
    algorithms: &[HashAlgorithm],
    files: &[FileRecord],
    path: &Path,
) -> Result<()> {
    let rule = if cli.yara_hash_only {
        YaraRule::from_hashes(files, &cli.yara_rule_name, algorithms)
    } else {
        YaraRule::from_files(files, &cli.yara_rule_name)
    }
    .context("Error generating YARA rule")?;

    fs::write(path, rule.to_string())
        .with_context(|| format!("Error writing YARA rule to {}", path.display()))?;
    info!("YARA rule written to: {} (rule name: {})", path.display(), rule.name);
    Ok(())
}

fn write_kql(
    cli: &Cli,
    algorithms: &[HashAlgorithm],
    files: &[FileRecord],
    path: &Path,
) -> Result<()> {
    let options = KqlOptions {
        tables: cli.kql_tables.clone(),
        hash_types: algorithms.to_vec(),
        include_filenames: !cli.kql_hash_only,
        ..KqlOptions::default()
    };
    let query =
        KqlQuery::generate(files, &cli.kql_name, options).context("Error generating KQL query")?;

    fs::write(path, format!("{query}\n"))
        .with_context(|| format!("Error writing KQL query to {}", path.display()))?;
    info!("KQL query written to: {} (query name: {})", path.display(), query.name);
    Ok(())
}
