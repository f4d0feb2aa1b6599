//! End-to-end resolution through the booted chain.

use urlshort::lifecycle::{build_chain, StartupError};
use urlshort::routing::{Action, Resolver};
use urlshort::store::DEFAULT_SEED;
use urlshort::RouteStore;

mod common;

use common::Fixture;

const YAML: &str = "- path: /b\n  url: https://y.example\n";
const JSON: &str = r#"[{"path": "/a", "url": "https://z.example"}]"#;

#[test]
fn test_overlays_take_precedence_over_store() {
    let fixture = Fixture::new(YAML, JSON).with_store_seed(&[("/a", "https://x.example")]);

    let chain = build_chain(&fixture.config).unwrap();

    assert_eq!(chain.resolve("/a"), Action::Redirect("https://z.example".into()));
    assert_eq!(chain.resolve("/b"), Action::Redirect("https://y.example".into()));
    assert_eq!(chain.resolve("/c"), Action::Respond("Hello, world!\n".into()));
}

#[test]
fn test_store_entries_visible_when_no_overlay_claims_them() {
    let fixture = Fixture::new(YAML, JSON).with_store_seed(&[("/only-store", "https://s.example")]);

    let chain = build_chain(&fixture.config).unwrap();
    assert_eq!(chain.resolve("/only-store"), Action::Redirect("https://s.example".into()));
}

#[test]
fn test_unmatched_paths_always_reach_default_responder() {
    let mut fixture = Fixture::new(YAML, JSON);
    fixture.config.responder.body = "nothing to see".into();

    let chain = build_chain(&fixture.config).unwrap();
    for path in ["/", "/c", "/a/", "/B", "", "/b?x=1"] {
        assert_eq!(chain.resolve(path), Action::Respond("nothing to see".into()));
    }
}

#[test]
fn test_repeated_boots_keep_seed_set() {
    let fixture = Fixture::new("", "[]");

    build_chain(&fixture.config).unwrap();
    build_chain(&fixture.config).unwrap();

    let store = RouteStore::open(&fixture.config.store.path).unwrap();
    let routes = store.load_all().unwrap();
    assert_eq!(routes.len(), DEFAULT_SEED.len());
    for (path, url) in DEFAULT_SEED {
        assert_eq!(routes.get(*path).map(String::as_str), Some(*url));
    }
}

#[test]
fn test_duplicate_paths_in_overlay_last_wins() {
    let json = r#"[{"path": "/d", "url": "https://one.example"},
                   {"path": "/d", "url": "https://two.example"}]"#;
    let fixture = Fixture::new("", json);

    let chain = build_chain(&fixture.config).unwrap();
    assert_eq!(chain.resolve("/d"), Action::Redirect("https://two.example".into()));
}

#[test]
fn test_malformed_overlay_produces_no_chain() {
    let yaml = "\
- path: /ok-1
  url: https://ok.example/1
- path: /ok-2
  url: https://ok.example/2
- path: [not, a, string]
  url: https://bad.example
";
    let fixture = Fixture::new(yaml, "[]");

    assert!(matches!(build_chain(&fixture.config), Err(StartupError::Overlay(_))));
}
