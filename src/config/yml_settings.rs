use serde::{Deserialize, Serialize};

use crate::domain::{
    ParsedContentUrl, Protocol, ServerConnectionContext, ServerVersion, DEFAULT_PAGE_SIZE,
};
use crate::error::{LocatorError, Result};

/// Connection settings as written in a YAML file.
///
/// A server is given either as a browser `content_url` or as the explicit
/// `server` + `protocol` + `site` triple.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct ConnectionSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Protocol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_version: Option<ServerVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl ConnectionSettings {
    pub fn from_content_url(content_url: &str) -> Self {
        Self {
            content_url: Some(content_url.to_string()),
            ..Self::default()
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn to_context(&self) -> Result<ServerConnectionContext> {
        let explicit = self.server.is_some() || self.protocol.is_some() || self.site.is_some();

        match (&self.content_url, explicit) {
            (Some(content_url), false) => {
                let parsed = ParsedContentUrl::parse(content_url)?;
                match self.server_version {
                    Some(version) => parsed.into_context_with_version(version, self.page_size()),
                    None => parsed.into_context(self.page_size()),
                }
            }
            (None, true) => {
                let server = self
                    .server
                    .as_deref()
                    .ok_or_else(|| LocatorError::invalid_context("'server' is required"))?;
                let protocol = self
                    .protocol
                    .ok_or_else(|| LocatorError::invalid_context("'protocol' is required"))?;
                ServerConnectionContext::new(
                    protocol,
                    server,
                    self.site.as_deref().unwrap_or_default(),
                    self.server_version.unwrap_or_default(),
                    self.page_size(),
                )
            }
            (Some(_), true) => Err(LocatorError::invalid_context(
                "give either 'content_url' or 'server'/'protocol'/'site', not both",
            )),
            (None, false) => Err(LocatorError::invalid_context(
                "one of 'content_url' or 'server'/'protocol'/'site' is required",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde() {
        let settings = ConnectionSettings {
            server: Some("tableau.example.com".to_string()),
            protocol: Some(Protocol::Https),
            site: Some("finance".to_string()),
            server_version: Some(ServerVersion::Server2019_1),
            page_size: Some(250),
            ..ConnectionSettings::default()
        };

        let yml = serde_yaml::to_string(&settings).unwrap();
        let deserde: ConnectionSettings = serde_yaml::from_str(&yml).unwrap();
        assert_eq!(settings, deserde);
    }

    #[test]
    fn test_skip_none_fields_in_yaml() {
        let settings = ConnectionSettings::from_content_url("https://host/#/site/a/home");

        let yml = serde_yaml::to_string(&settings).unwrap();

        assert!(yml.contains("content_url:"));
        assert!(!yml.contains("server:"));
        assert!(!yml.contains("page_size:"));
    }

    #[test]
    fn test_skip_none_fields_in_json() {
        let settings = ConnectionSettings {
            server: Some("host".to_string()),
            protocol: Some(Protocol::Http),
            ..ConnectionSettings::default()
        };

        let json = serde_json::to_string(&settings).unwrap();

        assert!(json.contains("\"protocol\":\"http\""));
        assert!(!json.contains("\"content_url\""));
        assert!(!json.contains("\"site\""));
    }

    #[test]
    fn test_content_url_context() {
        let ctx = ConnectionSettings::from_content_url("https://host.example.com/#/site/ops/views")
            .to_context()
            .unwrap();
        assert_eq!(ctx.site_segment(), "ops");
        assert_eq!(ctx.server_version(), ServerVersion::HASH_ROUTED);
        assert_eq!(ctx.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_version_override() {
        let settings = ConnectionSettings {
            server_version: Some(ServerVersion::Server2021_1),
            ..ConnectionSettings::from_content_url("https://host.example.com/#/")
        };
        assert_eq!(settings.to_context().unwrap().api_version(), "3.11");
    }

    #[test]
    fn test_explicit_context() {
        let settings = ConnectionSettings {
            server: Some("host.example.com".to_string()),
            protocol: Some(Protocol::Http),
            page_size: Some(20),
            ..ConnectionSettings::default()
        };
        let ctx = settings.to_context().unwrap();
        assert_eq!(ctx.server_url(), "http://host.example.com");
        assert!(ctx.is_default_site());
        assert_eq!(ctx.page_size(), 20);
    }

    #[test]
    fn test_neither_or_both_forms_rejected() {
        assert!(matches!(
            ConnectionSettings::default().to_context(),
            Err(LocatorError::InvalidContext { .. })
        ));

        let both = ConnectionSettings {
            server: Some("host".to_string()),
            ..ConnectionSettings::from_content_url("https://host/#/")
        };
        assert!(matches!(both.to_context(), Err(LocatorError::InvalidContext { .. })));
    }

    #[test]
    fn test_missing_protocol_rejected() {
        let settings = ConnectionSettings {
            server: Some("host".to_string()),
            ..ConnectionSettings::default()
        };
        assert!(matches!(settings.to_context(), Err(LocatorError::InvalidContext { .. })));
    }
}
