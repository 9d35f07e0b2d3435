use book_builder::persist::{FileStore, Store};
use book_builder::session::Session;
use book_builder::generate::ExportFormat;
use book_builder::{config, generate, output, preview};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `debug`).
const LOG_ENV: &str = "BOOK_BUILDER_LOG";

#[derive(Parser)]
#[command(name = "book-builder")]
#[command(about = "Assemble a multi-page book and export it as a standalone HTML file")]
#[command(long_about = "\
Assemble a multi-page book and export it as a standalone HTML file

Every command is one session: a saved book from the previous run is offered
back first, the command runs, and the book is auto-saved when it holds a
title, an author or at least one page.

  book-builder title \"The Lighthouse\"
  book-builder author \"Ada Keeper\"
  book-builder add-page --title Arrival --content \"The keeper climbed...\"
  book-builder add-page --content \"No title needed\" --image images/storm.png
  book-builder preview
  book-builder export --output dist
  book-builder export --format md

Run 'book-builder gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Working directory holding config.toml and the auto-save store
    #[arg(long, default_value = ".", global = true)]
    dir: PathBuf,

    /// Answer yes to every question (restore saved book, confirm clear,
    /// overwrite an existing export)
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Set the book title
    Title { text: String },
    /// Set the book author
    Author { text: String },
    /// Append a page (needs a title or some content)
    AddPage {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
        /// Image URL or path
        #[arg(long, default_value = "")]
        image: String,
    },
    /// List the book's title, author and pages
    Show,
    /// Print the preview HTML fragment
    Preview,
    /// Write the book as a standalone HTML document or a Markdown file
    Export {
        /// Output directory (defaults to --dir)
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Html)]
        format: Format,
    },
    /// Discard the book (asks first unless it is already empty)
    Clear,
    /// Delete the auto-saved book without starting a session
    Forget,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Html,
    Md,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Html => ExportFormat::Html,
            Format::Md => ExportFormat::Markdown,
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run_session(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_session(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = config::load_config(&cli.dir)?;
    let mut store = FileStore::new(cli.dir.join(&config.storage.dir));

    if let Command::Forget = cli.command {
        store.remove(&config.storage.slot)?;
        println!("Forgot saved book");
        return Ok(());
    }

    let mut session =
        Session::new(store, &config.storage.slot).with_untitled_page(&config.labels.untitled_page);
    let restored = session.restore(|saved| {
        cli.yes || ask(&output::format_restore_prompt(saved))
    });
    if let Some(line) = output::format_restore(restored) {
        println!("{}", line);
    }

    let result = run(cli, &config, &mut session);
    // Auto-save happens even when the command itself failed.
    session.conclude(result)
}

fn run(
    cli: &Cli,
    config: &config::BuilderConfig,
    session: &mut Session<FileStore>,
) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Command::Title { text } => {
            session.set_title(text);
            println!("Title: {}", text);
        }
        Command::Author { text } => {
            session.set_author(text);
            println!("Author: {}", text);
        }
        Command::AddPage {
            title,
            content,
            image,
        } => {
            let page = session.add_page(title, content, image)?.clone();
            let index = session.book().pages.len();
            println!("{}", output::format_added_page(index, &page));
        }
        Command::Show => {
            output::print_book(session.book());
        }
        Command::Preview => {
            let fragment = preview::render_preview(session.book(), &config.labels);
            println!("{}", fragment.into_string());
        }
        Command::Export {
            output: out_dir,
            format,
        } => {
            let out_dir = out_dir.clone().unwrap_or_else(|| cli.dir.clone());
            let path = generate::export(session.book(), &out_dir, config, (*format).into(), |path| {
                cli.yes || ask(&format!("{} exists. Overwrite?", path.display()))
            })?;
            println!("{}", output::format_export(&path, session.book()));
        }
        Command::Clear => {
            let outcome = session.clear(|| cli.yes || ask("Really clear everything?"));
            println!("{}", output::format_clear(outcome));
        }
        Command::Forget | Command::GenConfig => {}
    }
    Ok(())
}

/// Ask a yes/no question on the terminal. Anything but `y`/`yes` is no.
fn ask(question: &str) -> bool {
    eprint!("{} [y/N] ", question);
    if std::io::stderr().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match std::io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
