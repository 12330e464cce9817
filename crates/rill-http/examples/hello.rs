//! Three-route demo application driven through an in-memory sender.
//!
//! Run with: `cargo run --example hello`

use rill_http::{App, HandlerError, Message, MessageLog, Request, Scope};
use rill_router::Params;
use serde_json::{Value, json};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

fn index(_req: Request, _params: Params) -> Result<Value, HandlerError> {
    Ok(json!({ "hello": "Welcome to rill" }))
}

async fn hello(_req: Request, params: Params) -> Result<Value, HandlerError> {
    Ok(json!({ "hello": params.get("name") }))
}

async fn repo_issues(_req: Request, params: Params) -> Result<Value, HandlerError> {
    let idx: i64 = params.parse("idx").ok_or("repository index must be an integer")?;
    Ok(json!({
        "repository": idx,
        "label": params.get("label"),
        "issues": [
            { "name": "Add method views", "content": "Would be useful to..." },
            { "name": "GraphQL support", "content": "Hi, any plans for..." },
        ],
    }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = App::new()
        .route_fn("/", index)?
        .route("/hello/{name}", hello)?
        .route("/repo/{idx}/issues/{label}", repo_issues)?;

    info!("registered {} routes", app.route_count());

    for path in ["/", "/hello/world", "/repo/7/issues/bug", "/nope"] {
        let mut log = MessageLog::new();
        app.dispatch(Scope::http(path, Vec::new()), &mut log).await?;

        for message in log.messages() {
            match message {
                Message::ResponseStart { status, .. } => {
                    info!("{path} -> {status}");
                }
                Message::ResponseBody { body } => {
                    info!("{path} body: {}", String::from_utf8_lossy(body));
                }
            }
        }
    }

    Ok(())
}
