use crate::constants::{
    API_KEY_ENV, BASE_URL_ENV, NOTION_API_BASE_URL, NOTION_API_PAGE_SIZE, NOTION_API_VERSION,
};
use crate::error::AppError;
use crate::types::{ApiKey, NotionId, PageSize, ValidationError};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use url::Url;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: ListCommand,

    /// Write the aggregated JSON to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output_file: Option<PathBuf>,

    /// Results requested per page (1-100)
    #[arg(long, global = true, default_value_t = NOTION_API_PAGE_SIZE)]
    pub page_size: u8,

    /// Resume a previous scan from this cursor
    #[arg(long, global = true)]
    pub start_cursor: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Which listing to drain.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ListCommand {
    /// Every child block of a block or page
    Children {
        /// Block/page URL or ID
        block: String,
    },
    /// Every row of a database
    Query {
        /// Database URL or ID
        database: String,
        /// Filter object as JSON
        #[arg(long)]
        filter: Option<String>,
        /// Sorts array as JSON
        #[arg(long)]
        sorts: Option<String>,
    },
    /// Every database shared with the integration (deprecated endpoint)
    Databases,
    /// Every user in the workspace
    Users,
    /// Every page and database matching a search
    Search {
        /// Text to search titles for
        #[arg(long)]
        query: Option<String>,
        /// Filter object as JSON
        #[arg(long)]
        filter: Option<String>,
        /// Sort object as JSON
        #[arg(long)]
        sort: Option<String>,
    },
}

/// Connection settings for [`crate::NotionHttpClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: ApiKey,
    pub base_url: Url,
    pub notion_version: String,
}

impl ClientConfig {
    /// Settings for the public API with the given token.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: default_base_url(),
            notion_version: NOTION_API_VERSION.to_string(),
        }
    }

    /// Resolves settings from the environment.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key_str = std::env::var(API_KEY_ENV).map_err(|_| {
            AppError::MissingConfiguration(format!("{} environment variable not set", API_KEY_ENV))
        })?;
        let mut config = Self::new(ApiKey::new(api_key_str)?);

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config = config.with_base_url(&base_url)?;
        }
        Ok(config)
    }

    /// Points the client at another API root (proxy, fixture server).
    pub fn with_base_url(self, base_url: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            ..self
        })
    }
}

fn default_base_url() -> Url {
    Url::parse(NOTION_API_BASE_URL).expect("NOTION_API_BASE_URL should be a valid URL")
}

/// Parses an API root, ensuring a trailing slash so endpoints join below it.
fn parse_base_url(input: &str) -> Result<Url, ValidationError> {
    let with_slash = if input.ends_with('/') {
        input.to_string()
    } else {
        format!("{}/", input)
    };
    let url = Url::parse(&with_slash).map_err(|e| ValidationError::InvalidUrl {
        url: input.to_string(),
        reason: e.to_string(),
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ValidationError::InvalidUrl {
            url: input.to_string(),
            reason: "unsupported scheme".to_string(),
        });
    }
    Ok(url)
}

/// Resolved configuration for one CLI run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub client: ClientConfig,
    pub request: ListRequest,
    pub page_size: PageSize,
    pub start_cursor: Option<String>,
    pub output_file: Option<PathBuf>,
    pub verbose: bool,
}

/// A validated [`ListCommand`].
#[derive(Debug, Clone, PartialEq)]
pub enum ListRequest {
    Children {
        block_id: NotionId,
    },
    Query {
        database_id: NotionId,
        filter: Option<serde_json::Value>,
        sorts: Option<serde_json::Value>,
    },
    Databases,
    Users,
    Search {
        query: Option<String>,
        filter: Option<serde_json::Value>,
        sort: Option<serde_json::Value>,
    },
}

impl ListRequest {
    /// Validates IDs and JSON arguments of a command.
    pub fn from_command(command: ListCommand) -> Result<Self, ValidationError> {
        Ok(match command {
            ListCommand::Children { block } => ListRequest::Children {
                block_id: NotionId::parse(&block)?,
            },
            ListCommand::Query {
                database,
                filter,
                sorts,
            } => ListRequest::Query {
                database_id: NotionId::parse(&database)?,
                filter: parse_json_arg("filter", filter)?,
                sorts: parse_json_arg("sorts", sorts)?,
            },
            ListCommand::Databases => ListRequest::Databases,
            ListCommand::Users => ListRequest::Users,
            ListCommand::Search {
                query,
                filter,
                sort,
            } => ListRequest::Search {
                query,
                filter: parse_json_arg("filter", filter)?,
                sort: parse_json_arg("sort", sort)?,
            },
        })
    }
}

fn parse_json_arg(
    field: &'static str,
    raw: Option<String>,
) -> Result<Option<serde_json::Value>, ValidationError> {
    raw.map(|text| {
        serde_json::from_str(&text).map_err(|e| ValidationError::InvalidJson {
            field,
            reason: e.to_string(),
        })
    })
    .transpose()
}

impl RunConfig {
    /// Resolves a complete run configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, ClientConfig::from_env()?)
    }

    /// Resolves CLI input against already-resolved client settings.
    pub fn resolve_with(cli: CommandLineInput, client: ClientConfig) -> Result<Self, AppError> {
        Ok(RunConfig {
            client,
            request: ListRequest::from_command(cli.command)?,
            page_size: PageSize::new(cli.page_size)?,
            start_cursor: cli.start_cursor,
            output_file: cli.output_file,
            verbose: cli.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client() -> ClientConfig {
        ClientConfig::new(ApiKey::new("secret_abcdefghijklmnopqrstuvwxyz").unwrap())
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let config = client().with_base_url("http://localhost:8080/v1").unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8080/v1/");
        assert_eq!(client().base_url.as_str(), NOTION_API_BASE_URL);
    }

    #[test]
    fn base_url_rejects_other_schemes() {
        assert!(matches!(
            client().with_base_url("ftp://example.com"),
            Err(ValidationError::InvalidUrl { .. })
        ));
        assert!(client().with_base_url("not a url").is_err());
    }

    #[test]
    fn resolves_query_command() {
        let cli = CommandLineInput::parse_from([
            "notion-unlimited",
            "query",
            "550e8400-e29b-41d4-a716-446655440000",
            "--filter",
            r#"{"property":"Done","checkbox":{"equals":true}}"#,
            "--page-size",
            "25",
            "--start-cursor",
            "c1",
        ]);
        let config = RunConfig::resolve_with(cli, client()).unwrap();

        assert_eq!(
            config.request,
            ListRequest::Query {
                database_id: NotionId::parse("550e8400e29b41d4a716446655440000").unwrap(),
                filter: Some(serde_json::json!({"property":"Done","checkbox":{"equals":true}})),
                sorts: None,
            }
        );
        assert_eq!(config.page_size.get(), 25);
        assert_eq!(config.start_cursor.as_deref(), Some("c1"));
        assert!(!config.verbose);
    }

    #[test]
    fn defaults_to_maximum_page_size() {
        let cli = CommandLineInput::parse_from(["notion-unlimited", "users"]);
        let config = RunConfig::resolve_with(cli, client()).unwrap();
        assert_eq!(config.request, ListRequest::Users);
        assert_eq!(config.page_size, PageSize::MAX);
    }

    #[test]
    fn output_file_flag_is_global() {
        let cli = CommandLineInput::parse_from([
            "notion-unlimited",
            "databases",
            "--output-file",
            "all.json",
        ]);
        let config = RunConfig::resolve_with(cli, client()).unwrap();
        assert_eq!(config.output_file, Some(PathBuf::from("all.json")));

        let cli = CommandLineInput::parse_from(["notion-unlimited", "-o", "users.json", "users"]);
        assert_eq!(cli.output_file, Some(PathBuf::from("users.json")));
    }

    #[test]
    fn rejects_bad_arguments() {
        let cli = CommandLineInput::parse_from(["notion-unlimited", "search", "--filter", "{"]);
        assert!(matches!(
            RunConfig::resolve_with(cli, client()),
            Err(AppError::Validation(ValidationError::InvalidJson { field: "filter", .. }))
        ));

        let cli = CommandLineInput::parse_from(["notion-unlimited", "children", "nope"]);
        assert!(RunConfig::resolve_with(cli, client()).is_err());

        let cli = CommandLineInput::parse_from(["notion-unlimited", "users", "--page-size", "0"]);
        assert!(RunConfig::resolve_with(cli, client()).is_err());
    }
}
