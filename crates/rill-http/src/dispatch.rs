//! Request dispatch: resolve, invoke, serialize, send.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use rill_router::{Params, PatternError, ResolutionCache, RouteTable};

use crate::error::{DispatchError, HandlerError, Result};
use crate::request::Request;
use crate::response::Response;
use crate::scope::{Message, Scope, Sender};

/// Future returned by an adapted handler.
pub type HandlerFuture = BoxFuture<'static, Result<Value>>;

/// A registered handler, adapted to a uniform async signature.
///
/// Registration wraps the application function so that by the time it sits
/// in the route table, sync and async handlers look identical: both take
/// the request plus extracted parameters and produce a JSON value.
pub type Handler = Arc<dyn Fn(Request, Params) -> HandlerFuture + Send + Sync>;

/// The dispatcher: routes inbound requests to handlers and writes the
/// response over the two-phase send contract.
///
/// Built once at startup; route registration is a consuming builder, and
/// serving happens through `&self`, so one `App` can run any number of
/// concurrent dispatch calls. Each call's request and parameter state is
/// private to that call.
///
/// # Example
///
/// ```
/// use rill_http::{App, MessageLog, Request, Scope};
/// use rill_router::Params;
/// use serde_json::json;
///
/// # futures::executor::block_on(async {
/// let app = App::new()
///     .route_fn("/hello/{name}", |_req: Request, params: Params| {
///         Ok(json!({ "hello": params.get("name") }))
///     })
///     .unwrap();
///
/// let mut log = MessageLog::new();
/// app.dispatch(Scope::http("/hello/world", Vec::new()), &mut log)
///     .await
///     .unwrap();
/// assert_eq!(log.messages().len(), 2);
/// # });
/// ```
pub struct App {
    table: RouteTable<Handler>,
    cache: ResolutionCache<Handler>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates an app with the default resolution cache capacity.
    pub fn new() -> Self {
        Self {
            table: RouteTable::new(),
            cache: ResolutionCache::new(),
        }
    }

    /// Creates an app with a custom resolution cache capacity.
    pub fn with_cache_capacity(capacity: usize) -> Self {
        Self {
            table: RouteTable::new(),
            cache: ResolutionCache::with_capacity(capacity),
        }
    }

    /// Registers an async handler for a route template.
    ///
    /// The handler may suspend before producing its result; dispatch awaits
    /// completion. A malformed template fails registration and leaves the
    /// table unchanged.
    pub fn route<F, Fut, T>(
        mut self,
        template: &str,
        handler: F,
    ) -> std::result::Result<Self, PatternError>
    where
        F: Fn(Request, Params) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<T, HandlerError>> + Send + 'static,
        T: Serialize,
    {
        let adapted: Handler = Arc::new(move |request, params| {
            let fut = handler(request, params);
            Box::pin(async move {
                let content = fut.await.map_err(DispatchError::Handler)?;
                Ok(serde_json::to_value(content)?)
            })
        });
        self.table.register(template, adapted)?;
        Ok(self)
    }

    /// Registers a synchronous handler for a route template.
    ///
    /// The function runs to completion inside the dispatch call; its result
    /// is wrapped in an already-completed future.
    pub fn route_fn<F, T>(
        mut self,
        template: &str,
        handler: F,
    ) -> std::result::Result<Self, PatternError>
    where
        F: Fn(Request, Params) -> std::result::Result<T, HandlerError> + Send + Sync + 'static,
        T: Serialize,
    {
        let adapted: Handler = Arc::new(move |request, params| {
            let outcome = handler(request, params)
                .map_err(DispatchError::Handler)
                .and_then(|content| Ok(serde_json::to_value(content)?));
            Box::pin(async move { outcome })
        });
        self.table.register(template, adapted)?;
        Ok(self)
    }

    /// Returns the number of registered routes.
    pub fn route_count(&self) -> usize {
        self.table.len()
    }

    /// Serves one request: resolve the path, invoke the matched handler,
    /// serialize its result, and write the response as `ResponseStart`
    /// followed by `ResponseBody`.
    ///
    /// An unmatched path is recovered locally into a 404 response. Handler
    /// and serialization failures abort the dispatch with nothing written;
    /// the caller (the transport layer) decides what reaches the peer.
    pub async fn dispatch<S: Sender>(&self, scope: Scope, sender: &mut S) -> Result<()> {
        let request = Request::from_scope(scope);

        let response = match self.cache.get_or_resolve(request.path(), &self.table) {
            None => {
                warn!(path = request.path(), "no route matched");
                Response::not_found()
            }
            Some(resolved) => {
                debug!(
                    path = request.path(),
                    params = resolved.params.len(),
                    "route matched"
                );
                let content = (resolved.handler)(request, resolved.params).await?;
                Response::json(&content)?
            }
        };

        send_response(response, sender).await
    }
}

/// Writes the response as two ordered, sequential messages.
async fn send_response<S: Sender>(response: Response, sender: &mut S) -> Result<()> {
    sender
        .send(Message::ResponseStart {
            status: response.status(),
            headers: response.headers().as_byte_pairs(),
        })
        .await?;
    sender
        .send(Message::ResponseBody {
            body: response.into_body(),
        })
        .await?;
    Ok(())
}
