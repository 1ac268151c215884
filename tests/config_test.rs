// Integration tests for loading connection settings from YAML files

use std::io::Write;
use tableau_locator::config::{self, ConnectionSettings};
use tableau_locator::{Protocol, ResourceLocator, ServerVersion};
use tempfile::NamedTempFile;

fn write_settings(yml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yml.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_content_url_settings() {
    let file = write_settings(
        "content_url: https://online.example.com/#/site/finance/home\npage_size: 200\n",
    );

    let settings = config::load_settings(file.path()).unwrap();
    assert_eq!(settings.page_size, Some(200));

    let locator = ResourceLocator::new(settings.to_context().unwrap()).unwrap();
    assert_eq!(
        locator.users("s", locator.first_page()).unwrap(),
        "https://online.example.com/api/2.0/sites/s/users?pageSize=200&pageNumber=1"
    );
}

#[test]
fn test_load_explicit_settings() {
    let file = write_settings(
        "server: tableau.example.com\nprotocol: https\nsite: ops\nserver_version: \"2020.1\"\n",
    );

    let settings = config::load_settings(file.path()).unwrap();
    assert_eq!(
        settings,
        ConnectionSettings {
            server: Some("tableau.example.com".to_string()),
            protocol: Some(Protocol::Https),
            site: Some("ops".to_string()),
            server_version: Some(ServerVersion::Server2020_1),
            ..ConnectionSettings::default()
        }
    );

    let ctx = settings.to_context().unwrap();
    assert_eq!(ctx.api_root(), "https://tableau.example.com/api/3.7");
    assert_eq!(ctx.site_segment(), "ops");
}

#[test]
fn test_unknown_server_version_is_rejected() {
    let file = write_settings("server: h\nprotocol: http\nserver_version: \"7.0\"\n");
    let err = config::load_settings(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("Unknown server version"));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = config::load_settings(dir.path().join("absent.yml")).unwrap_err();
    assert!(err.to_string().contains("Could not read settings file"));
}

#[test]
fn test_malformed_yaml() {
    let file = write_settings("page_size: [1, 2\n");
    let err = config::load_settings(file.path()).unwrap_err();
    assert!(err.to_string().contains("Invalid yaml configuration"));
}
