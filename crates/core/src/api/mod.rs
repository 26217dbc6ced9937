pub mod client;
pub mod http;
pub mod request;
pub mod session;
pub mod traits;
