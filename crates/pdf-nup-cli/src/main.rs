mod logger;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use pdf_nup::{ImpositionOptions, ImpositionStatistics, ImposeMode, PagesPerSheet, PaperSize};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfnup", about = "N-up and foldable booklet PDF imposition", version)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Impose a PDF with several pages per sheet
    Impose {
        /// Input PDF file (defaults to the input_file of --config)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output PDF file
        #[arg(short, long, required_unless_present = "stats_only")]
        output: Option<PathBuf>,

        /// JSON options file; flags given here override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Write an options file for later use with `impose --config`
    Config {
        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Input PDF file to record in the options
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },
}

#[derive(Args)]
struct LayoutArgs {
    /// Source pages per output sheet: 2, 4, 8 or 16
    #[arg(short = 'n', long)]
    pages_per_sheet: Option<usize>,

    /// Output paper size: A4, A3, Letter or Legal (other names use A4)
    #[arg(long)]
    paper: Option<String>,

    /// Layout mode: any value starting with "fold" selects the foldable
    /// booklet layout, anything else is sequential
    #[arg(long)]
    mode: Option<String>,
}

impl LayoutArgs {
    fn apply(&self, options: &mut ImpositionOptions) -> Result<()> {
        if let Some(n) = self.pages_per_sheet {
            options.pages_per_sheet = PagesPerSheet::try_from(n)?;
        }
        if let Some(paper) = &self.paper {
            options.paper_size = PaperSize::from_name(paper);
        }
        if let Some(mode) = &self.mode {
            options.mode = ImposeMode::from_name(mode);
        }
        Ok(())
    }
}

fn print_statistics(stats: &ImpositionStatistics) {
    println!("Imposition Statistics:");
    println!("  Source pages: {}", stats.source_pages);
    println!("  Grid: {} x {}", stats.columns, stats.rows);
    println!("  Output sheets: {}", stats.output_sheets);
    if let Some(pairs) = stats.sheet_pairs {
        println!("  Front/back pairs: {}", pairs);
    }
    println!("  Empty cells: {}", stats.empty_cells);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logger::StderrLogger::new(logger::level_from_flags(cli.verbose, cli.quiet))
        .init()
        .context("failed to install logger")?;

    match cli.command {
        Commands::Impose {
            input,
            output,
            config,
            layout,
            stats_only,
        } => {
            let mut options = match &config {
                Some(path) => ImpositionOptions::load(path)
                    .await
                    .with_context(|| format!("failed to load {}", path.display()))?,
                None => ImpositionOptions::default(),
            };
            layout.apply(&mut options)?;

            let Some(input) = input.or_else(|| options.input_file.clone()) else {
                bail!("no input PDF given (use --input or a config with input_file)");
            };

            let source = pdf_nup::load_pdf(&input)
                .await
                .with_context(|| format!("failed to load {}", input.display()))?;

            let stats = pdf_nup::calculate_statistics(&source, &options)?;
            print_statistics(&stats);

            if stats_only {
                return Ok(());
            }

            let Some(output) = output else {
                bail!("--output is required unless --stats-only is set");
            };

            let imposed = pdf_nup::impose(&source, &options).await?;
            pdf_nup::save_pdf(imposed, &output).await?;
            println!("Imposed → {}", output.display());
        }

        Commands::Config {
            output,
            input,
            layout,
        } => {
            let mut options = ImpositionOptions {
                input_file: input,
                ..Default::default()
            };
            layout.apply(&mut options)?;

            options.save(&output).await?;
            println!("Options → {}", output.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_records_single_input() {
        let cli = Cli::try_parse_from(["pdfnup", "config", "-o", "opts.json", "-i", "a.pdf"])
            .unwrap();

        match cli.command {
            Commands::Config { input, .. } => assert_eq!(input, Some(PathBuf::from("a.pdf"))),
            _ => panic!("Expected config command"),
        }
    }

    #[test]
    fn test_config_rejects_multiple_inputs() {
        let result = Cli::try_parse_from([
            "pdfnup", "config", "-o", "opts.json", "-i", "a.pdf", "b.pdf",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_layout_flags_override_options() {
        let cli = Cli::try_parse_from([
            "pdfnup", "impose", "-i", "in.pdf", "-o", "out.pdf", "-n", "8", "--paper", "legal",
            "--mode", "fold",
        ])
        .unwrap();

        let Commands::Impose { layout, .. } = cli.command else {
            panic!("Expected impose command");
        };
        let mut options = ImpositionOptions::default();
        layout.apply(&mut options).unwrap();

        assert_eq!(options.pages_per_sheet, PagesPerSheet::Eight);
        assert_eq!(options.paper_size, PaperSize::Legal);
        assert_eq!(options.mode, ImposeMode::Foldable);
    }
}
