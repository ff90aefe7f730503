use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Parser, Debug)]
#[command(name = "mvnmodel")]
#[command(about = "Merge Maven build descriptors and print the resulting build model", long_about = None)]
pub struct Args {
    /// Build descriptor to merge (JSON or YAML). Applied in the order given.
    #[arg(short, long = "descriptor", value_name = "FILE", required = true)]
    pub descriptors: Vec<PathBuf>,

    /// Output format (json, yaml)
    #[arg(short = 'f', long, default_value = "json")]
    pub format: OutputFormat,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        for descriptor in &self.descriptors {
            validate_descriptor_path(descriptor)?;
        }
        Ok(())
    }
}

pub fn validate_descriptor_path(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Descriptor does not exist: {}", path.display());
    }
    if !path.is_file() {
        anyhow::bail!("Descriptor is not a file: {}", path.display());
    }
    Ok(())
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}
