pub mod catalog;
pub mod cli;
pub mod delimiter;
pub mod encoding;
pub mod error;
pub mod export;
pub mod fetch;
pub mod locale;
pub mod parse;
pub mod pipeline;
pub mod rank;
pub mod record;
pub mod resolve;
pub mod table;

use std::{env, fs, sync::OnceLock, time::Duration};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{LevelFilter, info};

use crate::cli::{CatalogArgs, Cli, Commands, InspectArgs, QueryArgs, RankArgs};
use crate::fetch::{Fetcher, RawPayload, ReportQuery};
use crate::locale::format_locale_opt;
use crate::record::NormalizedTable;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("rdr_ranking", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Catalog(args) => handle_catalog(&args),
        Commands::Rank(args) => handle_rank(&args),
        Commands::Inspect(args) => handle_inspect(&args),
    }
}

fn handle_catalog(args: &CatalogArgs) -> Result<()> {
    let fetcher = Fetcher::new(Duration::from_secs(args.timeout))?;
    let catalog = fetcher
        .catalog()
        .context("Loading the ranking catalog")?;
    let rows: Vec<Vec<String>> = catalog
        .flatten()
        .into_iter()
        .filter(|row| args.tipo.as_ref().is_none_or(|tipo| &row.tipo == tipo))
        .filter(|row| args.ano.as_ref().is_none_or(|ano| &row.ano == ano))
        .map(|row| vec![row.tipo, row.ano, row.periodicidade, row.periodo])
        .collect();
    info!("{} combination(s) available", rows.len());
    let headers = ["tipo", "ano", "periodicidade", "periodo"]
        .map(String::from)
        .to_vec();
    table::print_table(&headers, &rows);
    Ok(())
}

fn handle_rank(args: &RankArgs) -> Result<()> {
    let payload = load_payload(args.input.as_deref(), &args.query, args.timeout)?;
    let normalized = pipeline::normalize(&payload)?;
    if normalized.is_empty() {
        println!("No data for this query.");
        return Ok(());
    }

    let ranking = rank::rank_by(&normalized, args.by.into());
    let top = ranking.top(args.top);
    info!(
        "{} ranked row(s), {} without a value for the ranking field",
        ranking.ranked.len(),
        ranking.unranked.len()
    );

    let headers = [
        "Rank",
        normalized.entity_header.as_str(),
        "Índice",
        "Reguladas Procedentes",
        "Reguladas Outras",
        "Não Reguladas",
        "Total",
    ]
    .map(String::from)
    .to_vec();
    let rows: Vec<Vec<String>> = top
        .iter()
        .map(|entry| {
            let record = &entry.record;
            vec![
                entry.rank_label(),
                record.entity_name.clone(),
                entry.index_display(),
                optional_count(record.complaints_founded),
                optional_count(record.complaints_regulated_other),
                optional_count(record.complaints_unregulated),
                optional_count(record.complaints_total),
            ]
        })
        .collect();
    table::print_table(&headers, &rows);

    if let Some(path) = &args.output {
        export::write_ranking_csv(Some(path.as_path()), &normalized.entity_header, top)
            .with_context(|| format!("Exporting ranking to {path:?}"))?;
        info!("ranking written to {path:?}");
    }
    Ok(())
}

fn handle_inspect(args: &InspectArgs) -> Result<()> {
    let payload = load_payload(args.input.as_deref(), &args.query, args.timeout)?;
    let normalized = pipeline::normalize(&payload)?;
    if normalized.is_empty() {
        println!("No data for this query.");
        return Ok(());
    }
    let Some(record) = normalized.find_entity(&args.entity) else {
        bail!(
            "no institution matching '{}' among {} record(s)",
            args.entity,
            normalized.len()
        );
    };
    print_breakdown(&normalized, record);
    Ok(())
}

fn print_breakdown(table: &NormalizedTable, record: &record::CanonicalRecord) {
    println!("{}: {}", table.entity_header, record.entity_name);
    println!("Índice: {}", format_locale_opt(record.index_value));
    println!(
        "Reguladas Procedentes: {}",
        optional_count(record.complaints_founded)
    );
    println!(
        "Reguladas Outras: {}",
        optional_count(record.complaints_regulated_other)
    );
    println!(
        "Não Reguladas: {}",
        optional_count(record.complaints_unregulated)
    );
    println!("Total: {}", optional_count(record.complaints_total));
}

fn optional_count(value: Option<i64>) -> String {
    value.map(|count| count.to_string()).unwrap_or_default()
}

fn load_payload(
    input: Option<&std::path::Path>,
    query: &QueryArgs,
    timeout_secs: u64,
) -> Result<RawPayload> {
    if let Some(path) = input {
        let bytes =
            fs::read(path).with_context(|| format!("Reading report file {path:?}"))?;
        return Ok(RawPayload {
            bytes,
            content_type: None,
        });
    }
    let report_query = report_query(query)?;
    let fetcher = Fetcher::new(Duration::from_secs(timeout_secs))?;
    let payload = fetcher.ranking_file(&report_query)?;
    Ok(payload)
}

fn report_query(query: &QueryArgs) -> Result<ReportQuery> {
    match (&query.tipo, &query.ano, &query.periodicidade, &query.periodo) {
        (Some(tipo), Some(ano), Some(periodicidade), Some(periodo)) => Ok(ReportQuery {
            tipo: tipo.clone(),
            ano: ano.clone(),
            periodicidade: periodicidade.clone(),
            periodo: periodo.clone(),
        }),
        _ => bail!("--tipo, --ano, --periodicidade, and --periodo are required unless --input is given"),
    }
}
