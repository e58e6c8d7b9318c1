use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn from_lookup_defaults() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.storage_path, PathBuf::from(DEFAULT_STORAGE_PATH));
    assert!(cfg.request_timeout.is_none());
    assert!(cfg.connect_timeout.is_none());
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        ("JOBBOARD_API_BASE_URL", "https://jobs.example.test/api/v1/"),
        ("JOBBOARD_STORAGE_PATH", "/tmp/jb.json"),
        ("JOBBOARD_REQUEST_TIMEOUT_SECS", "30"),
        ("JOBBOARD_CONNECT_TIMEOUT_SECS", " 5 "),
    ]))
    .unwrap();
    assert_eq!(cfg.api_base_url, "https://jobs.example.test/api/v1");
    assert_eq!(cfg.storage_path, PathBuf::from("/tmp/jb.json"));
    assert_eq!(cfg.request_timeout, Some(Duration::from_secs(30)));
    assert_eq!(cfg.connect_timeout, Some(Duration::from_secs(5)));
}

#[test]
fn from_lookup_blank_base_url_errors() {
    let err = ClientConfig::from_lookup(lookup_from(&[("JOBBOARD_API_BASE_URL", " / ")])).unwrap_err();
    assert_eq!(err, ConfigError::Empty { var: "JOBBOARD_API_BASE_URL" });
}

#[test]
fn from_lookup_bad_timeout_errors() {
    let err = ClientConfig::from_lookup(lookup_from(&[("JOBBOARD_REQUEST_TIMEOUT_SECS", "soon")])).unwrap_err();
    assert!(err.to_string().contains("JOBBOARD_REQUEST_TIMEOUT_SECS"));
}

#[test]
fn from_lookup_blank_storage_path_uses_default() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[("JOBBOARD_STORAGE_PATH", "  ")])).unwrap();
    assert_eq!(cfg.storage_path, PathBuf::from(DEFAULT_STORAGE_PATH));
}

#[test]
fn endpoint_joins_with_single_slash() {
    let cfg = ClientConfig::default();
    assert_eq!(cfg.endpoint("/auth/login"), "http://localhost:8000/api/v1/auth/login");
    assert_eq!(cfg.endpoint("jobs"), "http://localhost:8000/api/v1/jobs");
}

#[test]
fn with_base_url_normalises_and_rejects_blank() {
    let cfg = ClientConfig::default().with_base_url("https://jobs.example.test/api/v1/").unwrap();
    assert_eq!(cfg.api_base_url, "https://jobs.example.test/api/v1");
    assert_eq!(
        ClientConfig::default().with_base_url("  ").unwrap_err(),
        ConfigError::Empty { var: "JOBBOARD_API_BASE_URL" }
    );
}

#[test]
fn normalize_base_url_trims() {
    assert_eq!(normalize_base_url(" http://a/b// ").as_deref(), Some("http://a/b"));
    assert_eq!(normalize_base_url(""), None);
}
