//! Process-wide session: durable storage, shared state, and operations.

pub mod cookies;
pub mod state;
pub mod storage;
pub mod store;

pub use cookies::{COOKIE_STORAGE_KEY, PersistentCookieJar};
pub use state::{ACCESS_TOKEN_KEY, SESSION_STORAGE_KEY, SessionHandle, SessionRecord};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{AuthApi, SessionStore};
