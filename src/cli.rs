use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::record::NumericField;

#[derive(Debug, Parser)]
#[command(author, version, about = "Ingest and rank BACEN complaint reports", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the available (tipo, ano, periodicidade, periodo) combinations
    Catalog(CatalogArgs),
    /// Fetch one period's report, normalize it, and print the ranking
    Rank(RankArgs),
    /// Show the complaint breakdown for a single institution
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Restrict to one institution-type category
    #[arg(long)]
    pub tipo: Option<String>,
    /// Restrict to one year
    #[arg(long)]
    pub ano: Option<String>,
    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
}

/// The upstream query parameters selecting one report file. All four are
/// required unless the report is read from a local file.
#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Institution-type category (e.g. "Consórcio")
    #[arg(long)]
    pub tipo: Option<String>,
    /// Reporting year
    #[arg(long)]
    pub ano: Option<String>,
    /// Reporting granularity (e.g. "TRIMESTRAL")
    #[arg(long)]
    pub periodicidade: Option<String>,
    /// Period unit within the chosen granularity
    #[arg(long)]
    pub periodo: Option<String>,
}

#[derive(Debug, Args)]
pub struct RankArgs {
    #[command(flatten)]
    pub query: QueryArgs,
    /// Read the raw report from a local file instead of fetching
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,
    /// Numeric field to rank by
    #[arg(long = "by", value_enum, default_value = "index")]
    pub by: RankField,
    /// Number of ranked rows to project
    #[arg(long, default_value_t = crate::rank::DEFAULT_TOP_N)]
    pub top: usize,
    /// Write the ranked table as a semicolon-delimited CSV file
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub query: QueryArgs,
    /// Read the raw report from a local file instead of fetching
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,
    /// Institution name (case-insensitive; substring match allowed)
    #[arg(long)]
    pub entity: String,
    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum RankField {
    Index,
    Founded,
    RegulatedOther,
    Unregulated,
    Total,
}

impl From<RankField> for NumericField {
    fn from(field: RankField) -> Self {
        match field {
            RankField::Index => NumericField::Index,
            RankField::Founded => NumericField::Founded,
            RankField::RegulatedOther => NumericField::RegulatedOther,
            RankField::Unregulated => NumericField::Unregulated,
            RankField::Total => NumericField::Total,
        }
    }
}
