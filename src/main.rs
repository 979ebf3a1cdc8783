//! CLI for md2hwpx - Markdown to HWPX report converter

use chrono::Local;
use clap::{Parser, Subcommand};
use md2hwpx::{
    write_sample_template, ConvertOptions, Language, MarkdownToHwpx, MissingSectionPolicy,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert one Markdown report into an HWPX file
    Convert {
        /// Input Markdown file path
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// HWPX template containing {{NAME}} placeholders
        #[arg(short, long, value_name = "FILE")]
        template: PathBuf,

        /// Output HWPX file path (default: report_<timestamp>.hwpx)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Convert every Markdown file in a directory
    Batch {
        /// Markdown file or directory
        #[arg(value_name = "PATH")]
        input: PathBuf,

        /// HWPX template containing {{NAME}} placeholders
        #[arg(short, long, value_name = "FILE")]
        template: PathBuf,

        /// Output directory (default: next to each input)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Search subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Parse inputs and list outputs without writing anything
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Write a sample template with every placeholder
    Template {
        /// Output HWPX file path
        #[arg(value_name = "FILE")]
        output: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct CommonArgs {
    /// Text for {{DATE}} (default: today)
    #[arg(long)]
    date: Option<String>,

    /// Leave headings of missing sections empty instead of using default labels
    #[arg(long)]
    omit_missing: bool,

    /// Directory for temporary extraction
    #[arg(long, value_name = "DIR")]
    scratch_dir: Option<PathBuf>,

    /// Language for localization (default: ko)
    #[arg(long, default_value = "ko")]
    lang: String,

    /// Keep cached line layout in rewritten sections
    #[arg(long)]
    keep_line_segments: bool,
}

impl CommonArgs {
    fn options(&self) -> Result<ConvertOptions, String> {
        let language = Language::from_code(&self.lang)
            .ok_or_else(|| format!("unsupported language: {}", self.lang))?;
        Ok(ConvertOptions {
            missing_sections: if self.omit_missing {
                MissingSectionPolicy::Omit
            } else {
                MissingSectionPolicy::DefaultLabel
            },
            language,
            scratch_dir: self.scratch_dir.clone(),
            clean_line_segments: !self.keep_line_segments,
        })
    }

    fn date(&self, language: Language) -> String {
        self.date
            .clone()
            .unwrap_or_else(|| language.strategy().format_date(Local::now().date_naive()))
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            template,
            output,
            common,
        } => run_convert(&input, &template, output, &common),
        Commands::Batch {
            input,
            template,
            output,
            recursive,
            dry_run,
            common,
        } => run_batch(&input, &template, output.as_deref(), recursive, dry_run, &common),
        Commands::Template { output } => write_sample_template(&output)
            .map(|path| println!("Sample template written to {}", path.display()))
            .map_err(|e| e.to_string()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_convert(
    input: &Path,
    template: &Path,
    output: Option<PathBuf>,
    common: &CommonArgs,
) -> Result<(), String> {
    let options = common.options()?;
    let date = common.date(options.language);
    let markdown = fs::read_to_string(input)
        .map_err(|e| format!("cannot read {}: {}", input.display(), e))?;
    let output = output.unwrap_or_else(default_output);

    let path = MarkdownToHwpx::new(options)
        .convert(&markdown, template, &output, &date)
        .map_err(|e| e.to_string())?;
    println!("Successfully converted to {}", path.display());
    Ok(())
}

fn run_batch(
    input: &Path,
    template: &Path,
    output_dir: Option<&Path>,
    recursive: bool,
    dry_run: bool,
    common: &CommonArgs,
) -> Result<(), String> {
    let options = common.options()?;
    let date = common.date(options.language);
    let converter = MarkdownToHwpx::new(options);

    let files = collect_markdown(input, recursive)
        .map_err(|e| format!("cannot list {}: {}", input.display(), e))?;
    if files.is_empty() {
        println!("No Markdown files found in {}", input.display());
        return Ok(());
    }

    let mut failed = 0usize;
    for file in &files {
        let output = batch_output(file, output_dir);
        let result = fs::read_to_string(file)
            .map_err(|e| e.to_string())
            .and_then(|markdown| {
                if dry_run {
                    converter.parse(&markdown).map(|_| ()).map_err(|e| e.to_string())
                } else {
                    converter
                        .convert(&markdown, template, &output, &date)
                        .map(|_| ())
                        .map_err(|e| e.to_string())
                }
            });

        match result {
            Ok(()) if dry_run => {
                println!("[DRY] {} -> {}", file.display(), output.display())
            }
            Ok(()) => println!("[OK] {} -> {}", file.display(), output.display()),
            Err(e) => {
                failed += 1;
                println!("[FAIL] {}: {}", file.display(), e);
            }
        }
    }

    println!(
        "Total: {}, succeeded: {}, failed: {}",
        files.len(),
        files.len() - failed,
        failed
    );
    if failed > 0 {
        return Err(format!("{} file(s) failed", failed));
    }
    Ok(())
}

fn default_output() -> PathBuf {
    PathBuf::from(format!("report_{}.hwpx", Local::now().format("%Y%m%d_%H%M%S")))
}

fn batch_output(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let name = input.with_extension("hwpx");
    match (output_dir, name.file_name()) {
        (Some(dir), Some(file_name)) => dir.join(file_name),
        _ => name,
    }
}

/// Lists `*.md` files under `path`, sorted. A file path is returned as is.
fn collect_markdown(path: &Path, recursive: bool) -> std::io::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry_path = entry?.path();
        if entry_path.is_dir() {
            if recursive {
                files.extend(collect_markdown(&entry_path, true)?);
            }
        } else if entry_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
        {
            files.push(entry_path);
        }
    }
    files.sort();
    Ok(files)
}
