use anyhow::Result;
use clap::{Parser, Subcommand};
use mdsplit::headers;
use mdsplit::pipeline::run_split;
use mdsplit::splitter::SplitOptions;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "mdsplit", version, about = "Split Markdown documents at heading boundaries")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Split a Markdown file into size-bounded sections
    Split {
        /// Path to the Markdown file
        file: PathBuf,

        /// Maximum fragment size in KB
        #[arg(long, default_value_t = 30.0)]
        max_size_kb: f64,

        /// Minimum fragment size in KB, merged towards on a best-effort basis
        #[arg(long, default_value_t = 10.0)]
        min_size_kb: f64,

        /// Deepest heading level used when splitting (1-6)
        #[arg(long, default_value_t = 6)]
        max_header_level: u8,
    },

    /// Rewrite numbered level-1 headings to the depth their number encodes
    AdjustHeaders {
        /// Path to the Markdown file
        file: PathBuf,

        /// Output path (defaults to <stem>_head.<ext> next to the input)
        output: Option<PathBuf>,
    },
}

fn kb_to_bytes(kb: f64) -> usize {
    (kb * 1024.0).round() as usize
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Split {
            file,
            max_size_kb,
            min_size_kb,
            max_header_level,
        } => {
            let options = SplitOptions {
                max_bytes: kb_to_bytes(max_size_kb),
                min_bytes: kb_to_bytes(min_size_kb),
                max_heading_level: max_header_level,
            };

            let start = Instant::now();
            eprintln!("[split] Splitting {}", file.display());
            let report = run_split(&file, &options)?;

            for (path, size) in report.files.iter().zip(&report.fragment_sizes) {
                eprintln!(
                    "[split]   {} ({:.2} KB)",
                    path.file_name().unwrap_or_default().to_string_lossy(),
                    *size as f64 / 1024.0
                );
            }

            println!("Fragments:   {}", report.files.len());
            println!("Total size:  {:.2} KB", report.total_bytes as f64 / 1024.0);
            println!("Output dir:  {}", report.output_dir.display());
            println!("Elapsed:     {:.2}s", start.elapsed().as_secs_f64());

            if !report.oversized.is_empty() {
                eprintln!(
                    "[split] Warning: {} fragment(s) still exceed {:.2} KB:",
                    report.oversized.len(),
                    options.max_bytes as f64 / 1024.0
                );
                for path in &report.oversized {
                    eprintln!(
                        "[split]   {}",
                        path.file_name().unwrap_or_default().to_string_lossy()
                    );
                }
            }
        }

        Command::AdjustHeaders { file, output } => {
            eprintln!("[headers] Adjusting {}", file.display());
            let written = headers::adjust_headers_file(&file, output.as_deref())?;
            println!("Written: {}", written.display());
        }
    }

    Ok(())
}
