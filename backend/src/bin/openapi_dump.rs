//! Print an OpenAPI document as JSON.
#![expect(clippy::print_stdout, reason = "the document is the program's output")]

use clap::{Parser, ValueEnum};
use color_eyre::eyre::Result;
use migo_api::doc::{ApiDocV1, ApiDocV2};
use utoipa::OpenApi;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DocVersion {
    V1,
    V2,
}

#[derive(Debug, Parser)]
#[command(about = "Print the Migo API OpenAPI document")]
struct Cli {
    /// API version to print.
    #[arg(long = "version", value_enum, default_value = "v1")]
    api_version: DocVersion,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let doc = match cli.api_version {
        DocVersion::V1 => ApiDocV1::openapi(),
        DocVersion::V2 => ApiDocV2::openapi(),
    };
    println!("{}", doc.to_pretty_json()?);
    Ok(())
}
