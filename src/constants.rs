// src/constants.rs
//! Domain constants that define the operational boundaries of the client.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results at most.
///
/// Also the default page size requested by the CLI: larger pages mean
/// fewer round-trips while draining a cursor chain.
pub const NOTION_API_PAGE_SIZE: u8 = 100;

/// The `Notion-Version` header sent with every request.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// Root of the public Notion REST API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1/";

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Environment variable holding the integration token.
pub const API_KEY_ENV: &str = "NOTION_API_KEY";

/// Environment variable overriding the API root (proxies, recorded fixtures).
pub const BASE_URL_ENV: &str = "NOTION_API_BASE_URL";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing unparseable response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
