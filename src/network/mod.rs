pub mod http_client;
pub mod request;

pub use http_client::{HttpClient, HttpClientConfig};
pub use request::{BasicAuth, Request, RequestBuilder};
