/*!
 * Command-line interface for projectmd
 */

use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use projectmd::config::{Args, Config};
use projectmd::logger::init_logging;
use projectmd::report::{Reporter, ScanReport};
use projectmd::scanner::Scanner;
use projectmd::sink::{deliver, Delivery};
use projectmd::tokenizer::create_tokenizer;
use projectmd::writer::MarkdownWriter;
use projectmd::ProjectMdError;

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "projectmd", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> projectmd::Result<()> {
    let config = Config::from_args(args)?;
    config.validate()?;

    let tokenizer = create_tokenizer(config.tokenizer, config.encoding);

    let progress = ProgressBar::new_spinner();
    if let Ok(style) =
        ProgressStyle::default_spinner().template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim}")
    {
        progress.set_style(style);
    }
    progress.set_prefix("Scanning");
    progress.enable_steady_tick(Duration::from_millis(100));

    let start_time = Instant::now();

    let scanner = Scanner::from_config(&config, Arc::new(progress.clone()));
    let tree = scanner.scan()?;

    progress.set_prefix("Rendering");
    let writer = MarkdownWriter::new(config.target_dir.clone());
    let document = writer.write(&tree);
    let text_bytes = writer.text_bytes(&tree);
    let tokens = tokenizer.count_tokens(&document);
    let duration = start_time.elapsed();

    progress.finish_and_clear();

    let delivery = deliver(&document, &config.output)?;

    let (directories, text_files, binary_files) = tree.counts();
    let report = ScanReport {
        root: config.target_dir.display().to_string(),
        destination: delivery.describe(),
        directories,
        text_files,
        binary_files,
        text_bytes,
        document_bytes: document.len(),
        tokens,
        method: tokenizer.method(),
        duration,
    };

    let mut summary = Reporter::summary(&report);
    if config.stats {
        summary = format!("{}\n\n{}", summary, Reporter::table(&report));
    }

    // Keep stdout clean when it carries the document
    if delivery.used_stdout() {
        eprintln!("{}", summary);
    } else {
        println!("{}", summary);
    }

    match delivery {
        Delivery::StdoutFallback(e) => Err(ProjectMdError::Clipboard(e)),
        _ => Ok(()),
    }
}
