//! # rill-http
//!
//! The dispatch layer of rill: per-request scope/request/response types and
//! the [`App`] dispatcher that wires them to the routing core.
//!
//! A dispatch call walks a fixed pipeline: build the [`Request`] from the
//! transport [`Scope`], resolve the path through the cached route table,
//! invoke the matched handler (sync or suspending), serialize its return
//! value to JSON, and write the response to the transport as exactly two
//! ordered messages — [`Message::ResponseStart`] then
//! [`Message::ResponseBody`]. An unmatched path becomes a 404 with the JSON
//! body `"Not found"`; every other failure propagates to the caller as a
//! [`DispatchError`].
//!
//! ## Quick start
//!
//! ```
//! use rill_http::{App, MessageLog, Request, Scope};
//! use rill_router::Params;
//! use serde_json::json;
//!
//! async fn hello(
//!     _req: Request,
//!     params: Params,
//! ) -> Result<serde_json::Value, rill_http::HandlerError> {
//!     Ok(json!({ "hello": params.get("name") }))
//! }
//!
//! # futures::executor::block_on(async {
//! let app = App::new().route("/hello/{name}", hello).unwrap();
//!
//! let mut log = MessageLog::new();
//! app.dispatch(Scope::http("/hello/world", Vec::new()), &mut log)
//!     .await
//!     .unwrap();
//! # });
//! ```

mod dispatch;
mod error;
mod request;
mod response;
mod scope;

pub use dispatch::{App, Handler, HandlerFuture};
pub use error::{DispatchError, HandlerError, Result};
pub use request::{QueryArgs, Request};
pub use response::{CONTENT_TYPE_JSON, Headers, Response};
pub use scope::{Message, MessageLog, Scope, Sender};
