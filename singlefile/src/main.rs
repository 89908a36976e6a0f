use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::info;
use singlefile_rs::{BundleConfig, Bundler, OutputMode, RunOutput, SingleFileError};
use std::io::Write;
use std::path::PathBuf;

/// singlefile: Generate a single-file HTML document from a set of input JS files and an HTML document
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about,
    long_about = None,
    after_help = "One of -m or -s must be specified."
)]
struct Args {
    /// Input files to embed (JavaScript modules, WebAssembly binaries or other assets)
    #[clap(required = true)]
    pub input_files: Vec<PathBuf>,

    /// Root path for the import map
    #[clap(short, long = "root", default_value = ".")]
    pub root_path: PathBuf,

    /// Output file to write the combined content [default: <source>.onefile.html]
    #[clap(short, long = "output")]
    pub output_file: Option<PathBuf>,

    /// Show the import map and exit
    #[clap(short, long)]
    pub map_only: bool,

    /// HTML file to inject the import map into
    #[clap(short = 's', long = "source")]
    pub html_file: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Args = Args::parse();

    let mode = match OutputMode::from_flags(args.map_only, args.html_file, args.output_file) {
        Ok(mode) => mode,
        Err(err) => Args::command()
            .error(ErrorKind::ArgumentConflict, err.to_string())
            .exit(),
    };
    let config = BundleConfig::new(args.input_files, args.root_path, mode);

    if let Err(err) = run(config) {
        if let Some(err) = err.downcast_ref::<SingleFileError>() {
            if err.is_configuration() {
                Args::command()
                    .error(ErrorKind::ValueValidation, err.to_string())
                    .exit()
            }
        }
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(config: BundleConfig) -> anyhow::Result<()> {
    match Bundler::new(config).run()? {
        RunOutput::ImportMap(tag) => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{tag}").context("Failed to write import map to stdout")?;
        }
        RunOutput::Bundle(path) => {
            info!("Bundle written to {}", path.display());
        }
    }
    Ok(())
}
