// src/main.rs
use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_unlimited::{
    CommandLineInput, ListBlockChildrenParameters, ListDatabasesParameters, ListRequest,
    ListResponse, ListUsersParameters, NotionHttpClient, QueryDatabaseParameters, RunConfig,
    SearchParameters, Unlimited,
};
use std::fs;

/// Sets up logging configuration.
///
/// Console output goes to stderr so stdout stays clean JSON.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_unlimited.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Drains the requested listing through the HTTP client.
async fn fetch_everything(config: &RunConfig) -> anyhow::Result<ListResponse> {
    let client = NotionHttpClient::new(&config.client)?;
    let unlimited = Unlimited::new(client);
    let page_size = Some(config.page_size);
    let start_cursor = config.start_cursor.clone();

    let response = match &config.request {
        ListRequest::Children { block_id } => {
            let params = ListBlockChildrenParameters {
                start_cursor,
                page_size,
                ..ListBlockChildrenParameters::new(block_id.clone())
            };
            unlimited.list_block_children(params).await?
        }
        ListRequest::Query {
            database_id,
            filter,
            sorts,
        } => {
            let params = QueryDatabaseParameters {
                filter: filter.clone(),
                sorts: sorts.clone(),
                start_cursor,
                page_size,
                ..QueryDatabaseParameters::new(database_id.clone())
            };
            unlimited.query_database(params).await?
        }
        #[allow(deprecated)]
        ListRequest::Databases => {
            let params = ListDatabasesParameters {
                start_cursor,
                page_size,
            };
            unlimited.list_databases(params).await?
        }
        ListRequest::Users => {
            let params = ListUsersParameters {
                start_cursor,
                page_size,
            };
            unlimited.list_users(params).await?
        }
        ListRequest::Search {
            query,
            filter,
            sort,
        } => {
            let params = SearchParameters {
                query: query.clone(),
                filter: filter.clone(),
                sort: sort.clone(),
                start_cursor,
                page_size,
            };
            unlimited.search(params).await?
        }
    };

    Ok(response)
}

/// Writes the aggregated listing to the requested destination.
fn deliver(config: &RunConfig, response: &ListResponse) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(response)?;

    match &config.output_file {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "✓ {} records written to {}",
                response.results.len(),
                path.display()
            );
        }
        None => {
            println!("{}", json);
            eprintln!("✓ {} records", response.results.len());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose).map_err(|e| anyhow::anyhow!(e))?;

    let config = RunConfig::resolve(cli).context("Invalid configuration")?;
    let response = fetch_everything(&config)
        .await
        .context("Failed to list Notion objects")?;
    deliver(&config, &response)?;

    Ok(())
}
