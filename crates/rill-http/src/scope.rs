//! Transport-facing types: the inbound scope and the two-phase outbound
//! protocol.

use std::io;

use futures::future::BoxFuture;

/// Per-request metadata supplied by the transport layer.
///
/// The transport adapter builds one `Scope` per inbound request; the core
/// only reads the path and the raw query string. Body receive stays a
/// transport concern and is not part of the scope.
#[derive(Debug, Clone)]
pub struct Scope {
    /// URL scheme (`http` or `https`).
    pub scheme: String,
    /// Server host and port, when the transport knows them.
    pub server: Option<(String, u16)>,
    /// Mount prefix the application is served under.
    pub root_path: String,
    /// Request path, percent-decoded by the transport.
    pub path: String,
    /// Raw query string bytes, without the leading `?`.
    pub query_string: Vec<u8>,
}

impl Scope {
    /// Builds a plain HTTP scope with just a path and query string.
    pub fn http(path: impl Into<String>, query_string: impl Into<Vec<u8>>) -> Self {
        Self {
            scheme: "http".to_string(),
            server: None,
            root_path: String::new(),
            path: path.into(),
            query_string: query_string.into(),
        }
    }
}

/// One outbound transport message.
///
/// Every dispatch writes exactly two, in order: `ResponseStart` followed by
/// `ResponseBody`. They are never reordered or batched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Status line and headers.
    ResponseStart {
        /// HTTP status code.
        status: u16,
        /// Header name/value pairs as raw bytes.
        headers: Vec<(Vec<u8>, Vec<u8>)>,
    },
    /// The response payload.
    ResponseBody {
        /// Serialized body bytes.
        body: Vec<u8>,
    },
}

/// Outbound half of a transport connection.
///
/// Implementations may suspend while flushing; the dispatcher awaits each
/// send before issuing the next.
pub trait Sender: Send {
    /// Writes one message to the peer.
    fn send(&mut self, message: Message) -> BoxFuture<'_, io::Result<()>>;
}

/// A [`Sender`] that records messages in memory.
///
/// Used by tests and demos in place of a real connection.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the messages written so far, in order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Consumes the log, returning the recorded messages.
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

impl Sender for MessageLog {
    fn send(&mut self, message: Message) -> BoxFuture<'_, io::Result<()>> {
        self.messages.push(message);
        Box::pin(async { Ok(()) })
    }
}
