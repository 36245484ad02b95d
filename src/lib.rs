//! Fluent builder for HTTP requests executed through `reqwest`
//!
//! ```no_run
//! use request_builder::RequestBuilder;
//!
//! # async fn run() -> request_builder::Result<()> {
//! let client = reqwest::Client::new();
//! let response = RequestBuilder::new("https://api.example.com")
//!     .set_path("/v1/items")
//!     .set_method("POST")
//!     .set_content_type_json()
//!     .set_body(r#"{"x":1}"#)
//!     .build()
//!     .execute(&client)
//!     .await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod form_data;
pub mod network;

pub use error::{ConstructionError, Error, Result};
pub use form_data::FormData;
pub use network::{BasicAuth, HttpClient, HttpClientConfig, Request, RequestBuilder};
