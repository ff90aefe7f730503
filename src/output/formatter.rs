use anyhow::Result;

use crate::build::MavenBuild;
use crate::cli::OutputFormat;

pub struct ModelFormatter;

impl ModelFormatter {
    /// Renders the merged build, preserving first-add order everywhere.
    pub fn format(build: &MavenBuild, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(build)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(build)?),
        }
    }
}
