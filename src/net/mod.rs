//! HTTP gateway: wire types, the base transport, and its decorator layers.

pub mod auth_layer;
pub mod gateway;
pub mod refresh;
pub mod transport;
pub mod types;

pub use auth_layer::WithAuth;
pub use gateway::Gateway;
pub use refresh::{HttpRefresher, REFRESH_PATH, TokenRefresher, WithRefreshRetry};
pub use transport::{ApiRequest, ApiResponse, HttpCall, ReqwestTransport};
