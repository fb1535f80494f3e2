use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
struct Cli {
    /// Print the file list as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Directory to start searching for tsconfig.json from
    #[arg(default_value = ".")]
    pub cwd: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let files = tsconfig_files::files_from_tsconfig_sync(&cli.cwd)?;
    let mut stdout = io::stdout().lock();
    if cli.json {
        writeln!(stdout, "{}", serde_json::to_string_pretty(&files)?)?;
    } else {
        for file in files {
            writeln!(stdout, "{}", file.display())?;
        }
    }

    Ok(())
}
