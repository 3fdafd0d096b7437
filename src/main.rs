use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use md2h::{CONFIG_FILE_NAME, Config};

#[derive(Parser)]
#[command(name = "md2h")]
#[command(about = "Convert Markdown files to standalone HTML pages")]
struct Cli {
    /// Also convert Markdown files in subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Config file (defaults to md2h.toml in the scanned directory, if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory to scan
    #[arg(default_value = ".")]
    dir: PathBuf,
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path),
        None => Config::load_or_default(&cli.dir.join(CONFIG_FILE_NAME)),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let place = if cli.dir == Path::new(".") {
        "current directory".to_string()
    } else {
        cli.dir.display().to_string()
    };
    if cli.recursive {
        println!("Scanning {place} and subdirectories for Markdown files...");
    } else {
        println!("Scanning {place} for Markdown files...");
    }

    let files = match md2h::find_markdown_files(&cli.dir, cli.recursive) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if files.is_empty() {
        println!("No Markdown files found.");
        return;
    }

    println!("Found {} Markdown file(s).\n", files.len());

    let summary = md2h::convert_all(&files, &config);

    println!(
        "\nProcessed {}/{} files successfully.",
        summary.succeeded, summary.total
    );
}
