//! # Pushline APNs
//!
//! A thin client for Apple's remote notification gateway. Every call builds
//! exactly one HTTP request, dispatches it, and classifies the reply.
//!
//! ## Features
//!
//! - **Two environments**: production and development gateways
//! - **Every push type**: `alert`, `background`, `voip`, `liveactivity`, ...
//! - **Future or callback**: `send(..).await`, or `dispatch(.., completion)`
//!   with a cancellable [`SendHandle`]
//! - **Plain classification**: transport failure, non-200 reply, or success
//!
//! There is no retry, batching, or token generation: the authorization token
//! is supplied by the caller.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pushline_apns::{Client, Configuration, NotificationType, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let configuration = Configuration::new("device-token", "provider-jwt", "com.example.app");
//!     let client = Client::new(configuration, Server::Development)?;
//!
//!     // Plain text alert
//!     client.send_message("Hello!").await?;
//!
//!     // Raw payload with an explicit push type
//!     let response = client
//!         .send(r#"{"aps":{"content-available":1}}"#, NotificationType::Background)
//!         .await?;
//!     println!("apns-id: {:?}", response.apns_id());
//!     Ok(())
//! }
//! ```
//!
//! ## Callback dispatch
//!
//! ```rust,ignore
//! let handle = client.dispatch_message("Hello!", |result| match result {
//!     Ok(response) => println!("delivered: {}", response.status()),
//!     Err(err) => eprintln!("failed: {}", err),
//! })?;
//!
//! // Changed our mind: the completion fires with a cancellation error.
//! handle.cancel();
//! ```

mod client;
mod configuration;
mod error;
mod handle;
mod payload;
mod push_type;
mod request;
mod response;
mod server;

pub use client::{BuildError, Client, ClientBuilder, ClientOptions};
pub use configuration::Configuration;
pub use error::{ApnsErrorBody, PushError, Result, TransportError};
pub use handle::SendHandle;
pub use payload::{DEFAULT_SOUND, message_payload};
pub use push_type::{NotificationType, UnknownPushType};
pub use request::{APNS_PRIORITY, APNS_PUSH_TYPE, APNS_TOPIC, BACKGROUND_PRIORITY};
pub use response::Response;
pub use server::{DEVELOPMENT_HOST, PRODUCTION_HOST, Server, UnknownServer, device_url};

/// Prelude for common imports.
///
/// ```
/// use pushline_apns::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::{Client, ClientOptions};
    pub use crate::configuration::Configuration;
    pub use crate::error::{PushError, Result, TransportError};
    pub use crate::handle::SendHandle;
    pub use crate::push_type::NotificationType;
    pub use crate::response::Response;
    pub use crate::server::Server;
}
