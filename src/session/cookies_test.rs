use reqwest::cookie::CookieStore as _;

use super::*;

fn api_url() -> Url {
    Url::parse("http://localhost:8000/api/v1/auth/login").unwrap()
}

fn refresh_url() -> Url {
    Url::parse("http://localhost:8000/api/v1/auth/refresh").unwrap()
}

fn accept(jar: &PersistentCookieJar, header: &'static str) {
    let value = HeaderValue::from_static(header);
    jar.set_cookies(&mut std::iter::once(&value), &api_url());
}

#[test]
fn set_cookie_is_persisted_and_survives_reload() {
    let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let jar = PersistentCookieJar::load(storage.clone()).unwrap();
    assert!(jar.is_empty());

    accept(&jar, "refresh_token=r1; Path=/; HttpOnly");
    assert!(storage.get(COOKIE_STORAGE_KEY).unwrap().is_some());

    let reloaded = PersistentCookieJar::load(storage).unwrap();
    assert_eq!(reloaded.len(), 1);
    let sent = reloaded.cookies(&refresh_url()).unwrap();
    assert_eq!(sent.to_str().unwrap(), "refresh_token=r1");
}

#[test]
fn rotated_cookie_replaces_saved_value() {
    let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let jar = PersistentCookieJar::load(storage.clone()).unwrap();
    accept(&jar, "refresh_token=r1; Path=/; HttpOnly");
    accept(&jar, "refresh_token=r2; Path=/; HttpOnly");

    let reloaded = PersistentCookieJar::load(storage).unwrap();
    assert_eq!(reloaded.cookies(&refresh_url()).unwrap().to_str().unwrap(), "refresh_token=r2");
}

#[test]
fn expired_cookie_is_not_sent_after_reload() {
    let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let jar = PersistentCookieJar::load(storage.clone()).unwrap();
    accept(&jar, "refresh_token=r1; Path=/; HttpOnly");
    accept(&jar, "refresh_token=; Path=/; Max-Age=0");

    let reloaded = PersistentCookieJar::load(storage).unwrap();
    assert!(reloaded.cookies(&refresh_url()).is_none());
}

#[test]
fn corrupt_jar_starts_empty() {
    let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    storage.set(COOKIE_STORAGE_KEY, "{not json").unwrap();
    let jar = PersistentCookieJar::load(storage).unwrap();
    assert!(jar.is_empty());
}

#[test]
fn clear_drops_memory_and_storage() {
    let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let jar = PersistentCookieJar::load(storage.clone()).unwrap();
    accept(&jar, "refresh_token=r1; Path=/; HttpOnly");

    jar.clear().unwrap();
    assert!(jar.is_empty());
    assert!(jar.cookies(&refresh_url()).is_none());
    assert_eq!(storage.get(COOKIE_STORAGE_KEY).unwrap(), None);
}

#[test]
fn in_memory_jar_works_without_durable_storage() {
    let jar = PersistentCookieJar::in_memory();
    accept(&jar, "refresh_token=r1; Path=/");
    assert!(jar.cookies(&refresh_url()).is_some());
}
