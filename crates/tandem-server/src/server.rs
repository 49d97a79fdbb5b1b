//! Development server implementation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use tokio::sync::RwLock;
use tower_http::services::ServeDir;

use tandem_compare::{inject_panels, pair_blocks, splice_panels, CompareLabels};
use tandem_mdx::parse_doc;

use crate::watcher::{FileWatcher, WatchEvent};
use crate::websocket::{hmr_client_script, HmrHub, HmrMessage};

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Directory containing docs
    pub docs_dir: PathBuf,

    /// Labels over the comparison columns
    pub labels: CompareLabels,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs"),
            labels: CompareLabels::default(),
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address {0}: {1}")]
    InvalidAddress(String, String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),
}

/// Shared server state.
struct ServerState {
    config: DevServerConfig,
    hmr: HmrHub,
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Start the development server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr_str = format!("{}:{}", self.config.host, self.config.port);
        let addr: SocketAddr = addr_str
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ServerError::InvalidAddress(addr_str.clone(), e.to_string())
            })?;

        let state = Arc::new(RwLock::new(ServerState {
            config: self.config.clone(),
            hmr: HmrHub::new(),
        }));

        // Set up file watcher
        let watch_paths = vec![self.config.docs_dir.clone()];

        let (watcher, mut rx) =
            FileWatcher::new(&watch_paths).map_err(|e| ServerError::WatchError(e.to_string()))?;

        // Spawn file watch handler
        let state_clone = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&state_clone, event).await;
            }
            // Keep watcher alive
            drop(watcher);
        });

        // Build router
        let app = Router::new()
            .route("/", get(index_handler))
            .route("/__hmr", get(ws_handler))
            .route("/__hmr.js", get(hmr_script_handler))
            .nest_service("/docs", ServeDir::new(&self.config.docs_dir))
            .with_state(state);

        tracing::info!("Starting dev server at http://{}", addr);

        // Open browser if configured
        if self.config.open {
            let url = format!("http://{}", addr);
            let _ = open::that(&url);
        }

        // Start server
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Handle file watch events.
async fn handle_watch_event(state: &Arc<RwLock<ServerState>>, event: WatchEvent) {
    let state = state.read().await;

    match event {
        WatchEvent::MarkdownChanged(path) => {
            tracing::info!("Page modified: {}", path.display());

            match std::fs::read_to_string(&path) {
                Ok(source) => match render_page_html(&source, &state.config.labels) {
                    Ok((_, html)) => {
                        state.hmr.send(HmrMessage::UpdateContent {
                            path: path.display().to_string(),
                            html,
                        });
                    }
                    Err(e) => {
                        tracing::warn!("Failed to render {}: {}", path.display(), e);
                        state.hmr.send(HmrMessage::Reload);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", path.display(), e);
                    state.hmr.send(HmrMessage::Reload);
                }
            }
        }

        WatchEvent::StyleChanged(path) => {
            tracing::info!("Stylesheet modified: {}", path.display());
            state.hmr.send(HmrMessage::Reload);
        }

        WatchEvent::Created(_) | WatchEvent::Deleted(_) | WatchEvent::Modified(_) => {
            state.hmr.send(HmrMessage::Reload);
        }
    }
}

/// Handler for the index page.
async fn index_handler(State(state): State<Arc<RwLock<ServerState>>>) -> impl IntoResponse {
    let state = state.read().await;

    let index_path = state.config.docs_dir.join("index.mdx");

    let content = if index_path.exists() {
        match std::fs::read_to_string(&index_path) {
            Ok(source) => match render_page_html(&source, &state.config.labels) {
                Ok((title, html)) => {
                    format!(
                        r#"<h1>{}</h1>
<div class="content">{}</div>"#,
                        title, html
                    )
                }
                Err(e) => format!("<p>Error parsing index.mdx: {}</p>", e),
            },
            Err(e) => format!("<p>Error reading index.mdx: {}</p>", e),
        }
    } else {
        "<h1>Welcome</h1><p>Create docs/index.mdx to get started.</p>".to_string()
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Tandem Dev</title>
  <style>
    body {{ font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; }}
    h1 {{ font-size: 2rem; }}
    pre {{ background: #f5f5f5; padding: 1rem; border-radius: 0.5rem; overflow-x: auto; }}
    .side-by-side {{ display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }}
    .pane-label {{ font-weight: 600; font-size: 0.875rem; }}
    .pane-filename {{ font-family: ui-monospace, monospace; font-size: 0.75rem; color: #6b7280; }}
  </style>
</head>
<body>
  <article>
  {}
  </article>
  <script src="/__hmr.js"></script>
</body>
</html>"#,
        content
    ))
}

/// Handler for the hot-reload WebSocket endpoint.
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<RwLock<ServerState>>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Handle a WebSocket connection.
async fn handle_ws(mut socket: WebSocket, state: Arc<RwLock<ServerState>>) {
    let mut rx = {
        let state = state.read().await;
        state.hmr.subscribe()
    };

    // Send connected message
    let Ok(msg) = serde_json::to_string(&HmrMessage::Connected) else {
        return;
    };
    if socket.send(Message::Text(msg.into())).await.is_err() {
        return;
    }

    // Forward hot-reload messages to the client
    while let Ok(hmr_msg) = rx.recv().await {
        let Ok(json) = serde_json::to_string(&hmr_msg) else {
            continue;
        };
        if socket.send(Message::Text(json.into())).await.is_err() {
            break;
        }
    }
}

/// Handler for the hot-reload client script.
async fn hmr_script_handler(State(state): State<Arc<RwLock<ServerState>>>) -> impl IntoResponse {
    let state = state.read().await;
    let ws_url = format!(
        "ws://{}:{}/__hmr",
        state.config.host, state.config.port
    );
    let script = hmr_client_script(&ws_url);
    ([("content-type", "application/javascript")], script)
}

/// Render a page's content to HTML, comparison panels included.
///
/// Returns the page title and the rendered body HTML.
fn render_page_html(
    source: &str,
    labels: &CompareLabels,
) -> Result<(String, String), tandem_mdx::ParseError> {
    let doc = parse_doc(source)?;

    let (panels, issues) = pair_blocks(&doc.code_blocks);
    for issue in &issues {
        tracing::warn!("{}", issue);
    }

    let processed = splice_panels(&doc.content, &panels);
    let html = render_markdown(&processed);
    let html = inject_panels(&html, &panels, labels);

    let title = doc
        .frontmatter
        .map(|f| f.title)
        .unwrap_or_else(|| "Documentation".to_string());

    Ok((title, html))
}

/// Simple markdown to HTML renderer for the dev preview.
fn render_markdown(content: &str) -> String {
    use pulldown_cmark::{html, Options, Parser};

    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(content, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_server_with_default_config() {
        let server = DevServer::new(DevServerConfig::default());
        assert_eq!(server.config.port, 7777);
    }

    #[test]
    fn renders_markdown() {
        let md = "# Hello\n\nWorld";
        let html = render_markdown(md);

        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<p>World</p>"));
    }

    #[test]
    fn renders_page_with_panels() {
        let source = r#"---
title: Redirects
---

# Redirects

```tsx left
redirect('/login');
```

```tsx right
return redirect('/login');
```
"#;

        let (title, html) = render_page_html(source, &CompareLabels::default()).unwrap();

        assert_eq!(title, "Redirects");
        assert!(html.contains(r#"<div class="side-by-side">"#));
        assert!(html.contains("Next.js"));
        assert!(!html.contains("tandem:panel"));
    }
}
