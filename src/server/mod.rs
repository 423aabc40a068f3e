//! Preview server
//!
//! Serves the generated site from the public directory and answers
//! `/search` and `/api/posts` from the in-memory corpus.

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::{Corpus, PostSummary};
use crate::filter::FilterCriteria;
use crate::helpers::url_for;
use crate::templates::{Listing, TemplateRenderer};
use crate::Site;

/// Server state, read-only once the server starts
pub struct ServerState {
    corpus: Corpus,
    config: SiteConfig,
    renderer: TemplateRenderer,
    public_dir: PathBuf,
}

impl ServerState {
    pub fn new(site: &Site, corpus: Corpus) -> Result<Self> {
        Ok(Self {
            corpus,
            config: site.config.clone(),
            renderer: TemplateRenderer::new()?,
            public_dir: site.public_dir.clone(),
        })
    }

    /// Search results page for `criteria`
    pub fn search_page(&self, criteria: &FilterCriteria) -> Result<String> {
        let posts = self.corpus.filter(criteria);
        let subheading = format!("{} of {} articles", posts.len(), self.corpus.len());
        let heading = if criteria.is_unrestricted() {
            "All Articles"
        } else {
            "Search Results"
        };
        let listing = Listing::new(
            &self.config,
            &self.corpus,
            heading,
            &subheading,
            criteria,
            &posts,
        );
        self.renderer
            .render_listing(&self.config, &self.corpus, &listing)
    }

    /// Summaries of the posts matching `criteria`, in corpus order
    pub fn summaries(&self, criteria: &FilterCriteria) -> Vec<PostSummary> {
        let root = url_for(&self.config, "");
        self.corpus
            .filter(criteria)
            .into_iter()
            .map(|p| p.summary(&root))
            .collect()
    }
}

/// Build the router
pub fn router(state: Arc<ServerState>) -> Router {
    let static_files =
        ServeDir::new(&state.public_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/search", get(search_handler))
        .route("/search/", get(search_handler))
        .route("/api/posts", get(api_posts_handler))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the preview server
pub async fn start(site: &Site, corpus: Corpus, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(ServerState::new(site, corpus)?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn search_handler(
    State(state): State<Arc<ServerState>>,
    Query(criteria): Query<FilterCriteria>,
) -> Response {
    tracing::debug!("search {:?}", criteria);
    match state.search_page(&criteria) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render search page: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

async fn api_posts_handler(
    State(state): State<Arc<ServerState>>,
    Query(criteria): Query<FilterCriteria>,
) -> Json<Vec<PostSummary>> {
    Json(state.summaries(&criteria))
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
