use anyhow::{Context, Result};
use clap::Parser;
use maven_build_model::output::ModelFormatter;
use maven_build_model::{cli, descriptor, logging};
use tracing::info;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    logging::init(logging::Verbosity::from_flags(args.verbose, args.quiet));
    args.validate().context("Invalid arguments")?;

    info!(
        descriptors = args.descriptors.len(),
        format = args.format.as_str(),
        "merging build descriptors"
    );

    let build = descriptor::load_all(&args.descriptors).context("Failed to load descriptors")?;
    let rendered =
        ModelFormatter::format(&build, args.format).context("Failed to render build model")?;

    println!("{rendered}");
    Ok(())
}
