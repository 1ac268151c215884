// Integration tests for sharing one locator across threads

use std::sync::Arc;
use std::thread;

use tableau_locator::{ResourceLocator, ViewFilter};

mod common;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_locator_is_send_and_sync() {
    assert_send_sync::<ResourceLocator>();
}

fn resolve_all(locator: &ResourceLocator) -> Vec<String> {
    let filter = ViewFilter::new("Region", "West");
    vec![
        locator.sign_in().unwrap(),
        locator.users("s", locator.first_page()).unwrap(),
        locator.view_data("s", "v", Some(&filter)).unwrap(),
        locator.upload("s").append_chunk("sess").unwrap(),
        locator.delete_datasource_tag("s", "d", "q4/final?").unwrap(),
    ]
}

#[test]
fn test_shared_locator_resolves_identically() {
    let locator = Arc::new(common::locator());
    let expected = resolve_all(&locator);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let locator = Arc::clone(&locator);
            thread::spawn(move || (0..50).map(|_| resolve_all(&locator)).collect::<Vec<_>>())
        })
        .collect();

    for handle in handles {
        for urls in handle.join().unwrap() {
            assert_eq!(urls, expected);
        }
    }
}
