use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use marc_completeness::pipeline::{discover_marc_files, evaluate_file, EvalConfig};
use marc_completeness::report::{ReportFormat, DEFAULT_SUFFIX};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::error;

#[derive(Parser, Debug)]
#[command(
    name = "marc-completeness",
    version,
    about = "Score the completeness of MARC records and summarize each file"
)]
pub struct Cli {
    /// MARC files to evaluate; prompts when none are given and --all is not set
    pub files: Vec<PathBuf>,

    /// Evaluate every .mrc file in --dir
    #[arg(long, conflicts_with = "files")]
    pub all: bool,

    /// Directory searched by --all
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Appended to each input file stem to name its report
    #[arg(long, default_value = DEFAULT_SUFFIX)]
    pub suffix: String,

    /// Report format
    #[arg(long, value_enum, default_value = "csv")]
    pub format: Format,

    /// Directory for reports (defaults to each input's directory)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Score records on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Format {
    Csv,
    Json,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    fn config(&self) -> EvalConfig {
        EvalConfig {
            suffix: self.suffix.clone(),
            format: match self.format {
                Format::Csv => ReportFormat::Csv,
                Format::Json => ReportFormat::Json,
            },
            parallel: !self.sequential,
            output_dir: self.output_dir.clone(),
        }
    }

    fn select_files(&self) -> Result<Vec<PathBuf>> {
        if self.all {
            return Ok(discover_marc_files(&self.dir)?);
        }
        if !self.files.is_empty() {
            return Ok(self.files.clone());
        }

        let stdin = io::stdin();
        let mut input = stdin.lock();
        let answer = prompt(&mut input, "Evaluate all .mrc files in directory y/n?")?;
        if answer == "y" {
            Ok(discover_marc_files(&self.dir)?)
        } else {
            let name = prompt(&mut input, "Enter the .mrc filename to evaluate: ")?;
            if name.is_empty() {
                bail!("no file name given");
            }
            Ok(vec![PathBuf::from(name)])
        }
    }
}

fn prompt(input: &mut impl BufRead, question: &str) -> Result<String> {
    print!("{question}");
    io::stdout().flush()?;
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read answer from stdin")?;
    Ok(line.trim().to_string())
}

/// Evaluate the selected files one after another.
///
/// A failing file is logged and the remaining files still run; the overall
/// result is an error if any file failed.
pub fn run(cli: &Cli) -> Result<()> {
    let files = cli.select_files()?;
    if files.is_empty() {
        bail!("no .mrc files found in {}", cli.dir.display());
    }

    let config = cli.config();
    let mut failed = 0usize;
    for file in &files {
        match evaluate_file(file, &config) {
            Ok(report) => {
                if !cli.quiet {
                    println!(
                        "{}: {} records, mean {:.2} -> {}",
                        report.input.display(),
                        report.record_count,
                        report.mean,
                        report.output.display()
                    );
                }
            },
            Err(e) => {
                error!(file = %file.display(), error = %e, "evaluation failed");
                failed += 1;
            },
        }
    }

    if failed > 0 {
        bail!("{failed} of {} files failed", files.len());
    }
    Ok(())
}
