// Immutable per-session server connection context

use url::Url;

use super::version::{Protocol, ServerVersion};
use crate::error::{LocatorError, Result};

/// Size of chunks uploaded to the server (8 MB)
pub const UPLOAD_CHUNK_SIZE: usize = 8_000_000;

/// Page size used when the caller does not pick one
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

/// First page of any paged listing
pub const DEFAULT_PAGE_NUMBER: u32 = 1;

/// Everything needed to address one site of one server.
///
/// Fields are private and only readable; target another server, site or
/// version by building a new context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConnectionContext {
    protocol: Protocol,
    server_host: String,
    site_segment: String,
    server_version: ServerVersion,
    page_size: u32,
}

impl ServerConnectionContext {
    /// Build a context, rejecting hosts that would not form a valid base URL
    pub fn new(
        protocol: Protocol,
        server_host: &str,
        site_segment: &str,
        server_version: ServerVersion,
        page_size: u32,
    ) -> Result<Self> {
        let server_host = server_host.trim();
        validate_host(protocol, server_host)?;

        if page_size == 0 {
            return Err(LocatorError::invalid_context("page size must be positive"));
        }

        let context = Self {
            protocol,
            server_host: server_host.to_string(),
            site_segment: site_segment.trim().to_string(),
            server_version,
            page_size,
        };

        tracing::debug!(
            host = %context.server_host,
            site = %context.site_segment,
            api_version = context.api_version(),
            "built server connection context"
        );

        Ok(context)
    }

    /// Context for the default site with the default page size
    pub fn with_defaults(
        protocol: Protocol,
        server_host: &str,
        server_version: ServerVersion,
    ) -> Result<Self> {
        Self::new(protocol, server_host, "", server_version, DEFAULT_PAGE_SIZE)
    }

    /// Infer protocol, host, site and server generation from a browser content URL
    pub fn from_content_url(content_url: &str, page_size: u32) -> Result<Self> {
        super::content_url::parse(content_url, page_size)
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    /// Empty for the default site
    pub fn site_segment(&self) -> &str {
        &self.site_segment
    }

    pub fn is_default_site(&self) -> bool {
        self.site_segment.is_empty()
    }

    pub fn server_version(&self) -> ServerVersion {
        self.server_version
    }

    pub fn api_version(&self) -> &'static str {
        self.server_version.api_version()
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fixed for the life of the process, whatever the context
    pub fn upload_chunk_size(&self) -> usize {
        UPLOAD_CHUNK_SIZE
    }

    /// `scheme://host`
    pub fn server_url(&self) -> String {
        format!("{}://{}", self.protocol.scheme(), self.server_host)
    }

    /// `scheme://host/api/{apiVersion}`
    pub fn api_root(&self) -> String {
        format!("{}/api/{}", self.server_url(), self.api_version())
    }
}

fn validate_host(protocol: Protocol, host: &str) -> Result<()> {
    if host.is_empty() {
        return Err(LocatorError::invalid_context("server host is empty"));
    }
    if host.contains("://") {
        return Err(LocatorError::invalid_context(format!(
            "server host '{}' must not include a scheme",
            host
        )));
    }
    if host.contains(['/', '?', '#', '%']) || host.chars().any(char::is_whitespace) {
        return Err(LocatorError::invalid_context(format!(
            "server host '{}' is not a bare host name",
            host
        )));
    }

    let base = format!("{}://{}/", protocol.scheme(), host);
    let parsed = Url::parse(&base).map_err(|e| {
        LocatorError::invalid_context(format!("server host '{}' is invalid: {}", host, e))
    })?;
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(LocatorError::invalid_context(format!(
            "server host '{}' has no host component",
            host
        )));
    }

    Ok(())
}
