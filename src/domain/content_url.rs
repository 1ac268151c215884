// Infers server identity from a user-facing content URL
//
// e.g. https://online.example.com/#/site/finance/workbooks

use super::context::ServerConnectionContext;
use super::version::{Protocol, ServerVersion};
use crate::error::{LocatorError, Result};

const PROTOCOL_INDICATOR: &str = "://";
const SITE_MARKER: &str = "#";
const SITE_KEYWORD: &str = "site";

/// The pieces a content URL gives away, before they become a context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedContentUrl {
    pub protocol: Protocol,
    pub server_host: String,
    pub site_segment: String,
    pub server_version: ServerVersion,
}

impl ParsedContentUrl {
    pub fn parse(content_url: &str) -> Result<Self> {
        let url = content_url.trim();

        let idx_protocol = match url.find(PROTOCOL_INDICATOR) {
            Some(idx) if idx > 0 => idx,
            _ => {
                return Err(LocatorError::MissingProtocol {
                    url: url.to_string(),
                })
            }
        };

        let scheme = &url[..idx_protocol];
        let protocol = Protocol::classify(scheme);
        if protocol == Protocol::Http && !scheme.eq_ignore_ascii_case("http") {
            tracing::warn!(scheme, url, "unrecognized scheme, treating as http");
        }

        let after_protocol = &url[idx_protocol + PROTOCOL_INDICATOR.len()..];
        let parts: Vec<&str> = after_protocol.split('/').collect();
        let server_host = parts[0];

        let unrecognized = || LocatorError::UnrecognizedUrlShape {
            url: url.to_string(),
        };

        let site_segment = match (parts.get(1), parts.get(2)) {
            (Some(&SITE_MARKER), Some(&SITE_KEYWORD)) => {
                let site = parts.get(3).ok_or_else(unrecognized)?;
                if site.is_empty() {
                    return Err(unrecognized());
                }
                site.to_string()
            }
            // Default site
            (Some(&SITE_MARKER), _) => String::new(),
            _ => return Err(unrecognized()),
        };

        Ok(Self {
            protocol,
            server_host: server_host.to_string(),
            site_segment,
            server_version: ServerVersion::HASH_ROUTED,
        })
    }

    pub fn into_context(self, page_size: u32) -> Result<ServerConnectionContext> {
        let inferred = self.server_version;
        self.into_context_with_version(inferred, page_size)
    }

    /// Use a known server version instead of the inferred generation
    pub fn into_context_with_version(
        self,
        server_version: ServerVersion,
        page_size: u32,
    ) -> Result<ServerConnectionContext> {
        ServerConnectionContext::new(
            self.protocol,
            &self.server_host,
            &self.site_segment,
            server_version,
            page_size,
        )
    }
}

/// Parse a content URL straight into a connection context
pub fn parse(content_url: &str, page_size: u32) -> Result<ServerConnectionContext> {
    ParsedContentUrl::parse(content_url)?.into_context(page_size)
}
