use anyhow::Context;
use clap::Parser;
use log::info;
use std::fs;
use std::path::PathBuf;

/// s19-to-bin: Convert an S-record memory image into a flat binary image
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to input S19 file
    pub s19_file: PathBuf,

    /// Path to output binary file to be created
    pub output_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args: Args = Args::parse();

    let s19 = fs::read_to_string(&args.s19_file)
        .with_context(|| format!("Failed to read S19 file {}", args.s19_file.display()))?;
    let image = s19_to_bin::convert(&s19)
        .with_context(|| format!("Failed to convert {}", args.s19_file.display()))?;
    fs::write(&args.output_file, &image)
        .with_context(|| format!("Failed to write {}", args.output_file.display()))?;

    info!(
        "Wrote {} bytes to {}",
        image.len(),
        args.output_file.display()
    );
    Ok(())
}
