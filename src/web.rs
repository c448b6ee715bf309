use crate::data::{self, Category, Page};
use crate::lists::{self, BookmarkEntry, BookmarkList, ListEntry, RecentList};
use crate::loader::{LoadOptions, load_json};
use crate::partials::{self, PartialSet, PartialsError, Theme};
use crate::session::{
    ProfileForm, SessionProfile, SessionRegistry, generate_session_id, is_valid_session_id,
};
use crate::storage::{MemoryStore, Storage};
use crate::widgets::{self, GeoOptions, GeoProvider};
use askama::Template;
use axum::{
    Json, Router,
    extract::{Form, Path as RoutePath, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use chrono::Local;
use cookie::Cookie;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use serde_json::{Value, json};
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::info;

type SharedState = Arc<AppState>;

const SESSION_COOKIE: &str = "nextstep_session";
/// Relative path of the careers dataset under the site root.
pub const CAREERS_DATA_PATH: &str = "data/careers.json";

pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub sessions: SessionRegistry,
    pub partials: PartialSet,
    pub site_root: PathBuf,
    pub base_url: String,
    pub geo: Option<Arc<dyn GeoProvider>>,
}

#[derive(Clone)]
pub struct WebConfig {
    pub addr: SocketAddr,
    /// Directory holding `partials/` and `data/`.
    pub site_root: PathBuf,
    pub base_url: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            site_root: PathBuf::from("."),
            base_url: "http://127.0.0.1:8080".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum WebError {
    Io(std::io::Error),
    Partials(PartialsError),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebError::Io(err) => write!(f, "io error: {err}"),
            WebError::Partials(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for WebError {}

impl From<std::io::Error> for WebError {
    fn from(value: std::io::Error) -> Self {
        WebError::Io(value)
    }
}

impl From<PartialsError> for WebError {
    fn from(value: PartialsError) -> Self {
        WebError::Partials(value)
    }
}

/// Serve the site. Fragment loading happens up front; a missing fragment
/// aborts startup rather than producing degraded pages.
pub async fn serve(config: WebConfig, storage: Arc<dyn Storage>) -> Result<(), WebError> {
    let partials = PartialSet::load_from(&config.site_root)?;
    let state = Arc::new(AppState {
        storage,
        sessions: SessionRegistry::new(),
        partials,
        site_root: config.site_root.clone(),
        base_url: config.base_url.clone(),
        geo: None,
    });
    let router = build_router(state);
    info!(
        %config.addr,
        site_root = %config.site_root.display(),
        base = %config.base_url,
        "Binding HTTP listener"
    );
    let listener = TcpListener::bind(config.addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server exited");
    Ok(())
}

fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/profile", post(submit_profile))
        .route("/visit", get(visit))
        .route("/bookmarks/toggle", post(toggle_bookmark))
        .route("/bookmarks/clear", post(clear_bookmarks))
        .route("/bookmarks/export", get(export_bookmarks))
        .route("/theme/toggle", post(toggle_theme))
        .route("/nav/toggle", post(toggle_nav))
        .route("/api/recent", get(api_recent))
        .route("/api/bookmarks", get(api_bookmarks))
        .route("/healthz", get(health))
        .route("/:page", get(site_page))
        .fallback(not_found)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CompressionLayer::new())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

struct SessionHandle {
    id: String,
    store: Arc<MemoryStore>,
    is_new: bool,
}

fn session_handle(state: &AppState, headers: &HeaderMap) -> SessionHandle {
    let existing = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| {
            Cookie::split_parse(raw.to_string())
                .filter_map(Result::ok)
                .find(|cookie| cookie.name() == SESSION_COOKIE)
                .map(|cookie| cookie.value().to_string())
        })
        .filter(|id| is_valid_session_id(id));
    match existing {
        Some(id) => SessionHandle {
            store: state.sessions.store(&id),
            id,
            is_new: false,
        },
        None => {
            let id = generate_session_id();
            SessionHandle {
                store: state.sessions.store(&id),
                id,
                is_new: true,
            }
        }
    }
}

fn with_session_cookie(mut response: Response, handle: &SessionHandle) -> Response {
    if handle.is_new {
        let cookie = Cookie::build((SESSION_COOKIE, handle.id.clone()))
            .path("/")
            .http_only(true)
            .build();
        if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}

fn redirect_back(headers: &HeaderMap) -> Redirect {
    let target = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .map(local_path)
        .unwrap_or_else(|| "/".to_string());
    Redirect::to(&target)
}

/// Reduce a referer value to a local path; anything unexpected goes home.
fn local_path(referer: &str) -> String {
    if referer.starts_with('/') && !referer.starts_with("//") {
        return referer.to_string();
    }
    if let Some(scheme_end) = referer.find("://") {
        let rest = &referer[scheme_end + 3..];
        if let Some(slash) = rest.find('/') {
            return rest[slash..].to_string();
        }
    }
    "/".to_string()
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

fn visit_link(label: &str, href: &str) -> String {
    format!(
        "/visit?label={}&href={}",
        encode_component(label),
        encode_component(href)
    )
}

fn slugify(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}

struct PageChrome {
    theme: Theme,
    title: String,
    header_html: String,
    footer_html: String,
}

fn page_chrome(state: &AppState, session: &dyn Storage, page: &Page) -> PageChrome {
    let profile = SessionProfile::load(session);
    PageChrome {
        theme: partials::load_theme(state.storage.as_ref()),
        title: format!("NextStep Navigator • {}", page.title),
        header_html: partials::paint_header(
            &state.partials.header,
            page.file,
            profile.as_ref(),
            partials::nav_open(session),
        ),
        footer_html: partials::stamp_year(&state.partials.footer),
    }
}

const SHELL_STYLE: &str = r#"
      .site-header { display: flex; flex-wrap: wrap; gap: 1rem; align-items: center; padding: 1rem; }
      .site-nav { display: flex; gap: 1rem; flex-basis: 100%; }
      .site-nav a.is-active { font-weight: 700; text-decoration: underline; }
      .site-nav.is-open { outline: 2px solid currentColor; }
      .site-footer { padding: 1rem; margin-top: 2rem; border-top: 1px solid #ccc; }
      html[data-theme="dark"] body { background: #111827; color: #e5e7eb; }
      .tile, .sugg-card, .recent-card { display: block; height: 100%; }
"#;

fn render_shell(chrome: &PageChrome, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en" data-theme="{theme}">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{title}</title>
    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.8/dist/css/bootstrap.min.css" rel="stylesheet" integrity="sha384-sRIl4kxILFvY47J16cr9ZwB07vP4J8+LH7qKQnuqkuIAvNWLzeN8tE5YBujZqJLB" crossorigin="anonymous">
    <style>{style}</style>
  </head>
  <body>
    {header}
    <main class="container py-4">
{content}
    </main>
    {footer}
  </body>
</html>"#,
        theme = chrome.theme,
        title = chrome.title,
        style = SHELL_STYLE,
        header = chrome.header_html,
        content = content,
        footer = chrome.footer_html,
    )
}

fn render_notice_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>NextStep Navigator</title>
  </head>
  <body>
    <main class="container py-4">
      <p>{message}</p>
      <a href="/">Back to home</a>
    </main>
  </body>
</html>"#,
        message = partials::escape_html(message),
    )
}

struct CategoryOption {
    value: &'static str,
    title: &'static str,
    checked: bool,
}

fn category_title(category: Category) -> &'static str {
    match category {
        Category::Student => "Student",
        Category::Graduate => "Graduate",
        Category::Professional => "Professional",
    }
}

struct TileView {
    title: &'static str,
    text: &'static str,
    visit_href: String,
}

struct RecoView {
    title: &'static str,
    meta: &'static str,
    href: &'static str,
    visit_href: String,
    id: String,
    bookmarked: bool,
}

struct RecentView {
    label: String,
    href: String,
    ago: String,
}

#[derive(Template)]
#[template(
    source = r#"<section class="hero">
  <h1>Shape your next step</h1>
  <p class="lead">Explore careers, quizzes, and resources tailored to you.</p>
</section>

{% if form_error.is_some() %}
<div id="utError" class="alert alert-danger">{{ form_error.as_ref().unwrap() }}</div>
{% endif %}
{% if greeting.is_some() %}
<p id="greeting" class="fs-4">{{ greeting.as_ref().unwrap() }}</p>
{% endif %}

<form id="welcomeForm" method="post" action="/profile" class="row g-3 align-items-center">
  <div class="col-12 col-md-4">
    <input id="userName" name="userName" class="form-control" placeholder="Your name" value="{{ name_value }}" required>
  </div>
  <div class="col-12 col-md-6">
    {% for option in category_options %}
    <label class="form-check form-check-inline">
      <input class="form-check-input" type="radio" name="userType" value="{{ option.value }}"{% if option.checked %} checked{% endif %}>
      <span class="form-check-label">{{ option.title }}</span>
    </label>
    {% endfor %}
  </div>
  <div class="col-12 col-md-2">
    <button type="submit" class="btn btn-primary">Save</button>
  </div>
</form>

<section id="tailoredMenu" class="row g-3 mt-3">
  {% for tile in menu %}
  <div class="col-12 col-sm-6 col-lg-3">
    <a href="{{ tile.visit_href }}" class="tile border rounded p-3">
      <div class="tile-title fw-bold">{{ tile.title }}</div>
      <p class="tile-text mb-0">{{ tile.text }}</p>
    </a>
  </div>
  {% endfor %}
</section>

<h2 class="mt-4">Recommended for you</h2>
<section id="suggestions" class="row g-3">
  {% for card in recommendations %}
  <div class="col-12 col-md-6 col-lg-4">
    <div class="sugg-card border rounded p-3">
      <div class="sugg-title fw-bold">{{ card.title }}</div>
      <div class="sugg-meta text-muted">{{ card.meta }}</div>
      <a href="{{ card.visit_href }}">Open →</a>
      <form method="post" action="/bookmarks/toggle" class="d-inline ms-2">
        <input type="hidden" name="id" value="{{ card.id }}">
        <input type="hidden" name="label" value="{{ card.title }}">
        <input type="hidden" name="href" value="{{ card.href }}">
        <button type="submit" class="btn btn-sm btn-link p-0">{% if card.bookmarked %}Saved ♥{% else %}Save ♡{% endif %}</button>
      </form>
    </div>
  </div>
  {% endfor %}
</section>

<h2 class="mt-4">Recently viewed</h2>
<section id="recentlyViewed" class="row g-3">
  {% if recent.len() == 0 %}
  <div class="col-12"><div class="text-secondary">No items yet.</div></div>
  {% else %}
  {% for item in recent %}
  <div class="col-12 col-md-6 col-lg-4">
    <div class="recent-card border rounded p-3">
      <div class="recent-title fw-bold">{{ item.label }}</div>
      <div class="recent-meta text-muted">{{ item.ago }}</div>
      <a href="{{ item.href }}">Open →</a>
    </div>
  </div>
  {% endfor %}
  {% endif %}
</section>

<h2 class="mt-4">Bookmarks</h2>
<section id="bookmarkPanel">
  <ul id="bookmarkList" class="list-unstyled">
    {% if bookmarks.len() == 0 %}
    <li class="text-muted">No bookmarks yet.</li>
    {% else %}
    {% for entry in bookmarks %}
    <li>{{ entry.label }} <a href="{{ entry.href }}" class="text-muted">{{ entry.href }}</a></li>
    {% endfor %}
    {% endif %}
  </ul>
  <a class="btn btn-sm btn-outline-secondary" href="/bookmarks/export">Export</a>
  <form method="post" action="/bookmarks/clear" class="d-inline">
    <button type="submit" class="btn btn-sm btn-outline-danger">Clear</button>
  </form>
</section>

<section id="widgets" class="row g-3 mt-4">
  <div class="col-auto">Local time: <strong id="clockNow">{{ clock }}</strong></div>
  <div class="col-auto">Near: <span id="geoCity">{{ geo }}</span></div>
  <div class="col-auto">Visitors: <span id="visitorCount">{{ visitors }}</span></div>
</section>"#,
    ext = "html"
)]
struct HomeTemplate {
    greeting: Option<String>,
    form_error: Option<&'static str>,
    name_value: String,
    category_options: Vec<CategoryOption>,
    menu: Vec<TileView>,
    recommendations: Vec<RecoView>,
    recent: Vec<RecentView>,
    bookmarks: Vec<BookmarkEntry>,
    clock: String,
    geo: String,
    visitors: String,
}

#[derive(Template)]
#[template(
    source = r#"<section>
  <h1>{{ title }}</h1>
  <p class="lead">{{ blurb }}</p>
  <p class="text-muted">Use the tailored menu on the home page to jump to what matters for you.</p>
</section>"#,
    ext = "html"
)]
struct SitePageTemplate {
    title: &'static str,
    blurb: &'static str,
}

struct CareerRow {
    title: String,
    field: String,
}

#[derive(Template)]
#[template(
    source = r#"<section>
  <h1>{{ title }}</h1>
  <p class="lead">{{ blurb }}</p>
  <p id="resultCount" class="text-muted">{{ result_note }}</p>
  {% if rows.len() > 0 %}
  <table class="table">
    <thead><tr><th>Career</th><th>Field</th></tr></thead>
    <tbody>
      {% for row in rows %}
      <tr><td>{{ row.title }}</td><td>{{ row.field }}</td></tr>
      {% endfor %}
    </tbody>
  </table>
  {% endif %}
</section>"#,
    ext = "html"
)]
struct CareersTemplate {
    title: &'static str,
    blurb: &'static str,
    result_note: String,
    rows: Vec<CareerRow>,
}

fn render_home(
    state: &AppState,
    session: &SessionHandle,
    form_error: Option<&'static str>,
    name_value: Option<String>,
) -> String {
    let profile = SessionProfile::load(session.store.as_ref());
    let category = profile.as_ref().and_then(|p| p.category);
    let greeting = profile.as_ref().map(|p| data::greeting(&p.name, p.category));
    let name_value = name_value
        .or_else(|| profile.as_ref().map(|p| p.name.clone()))
        .unwrap_or_default();

    let category_options = Category::ALL
        .iter()
        .map(|&value| CategoryOption {
            value: value.as_str(),
            title: category_title(value),
            checked: category == Some(value),
        })
        .collect();

    let menu = data::menu_for(category)
        .iter()
        .map(|item| TileView {
            title: item.title,
            text: item.text,
            visit_href: visit_link(item.title, item.href),
        })
        .collect();

    let bookmark_list = BookmarkList::new(state.storage.clone());
    let bookmarks = bookmark_list.read();
    let recommendations = data::recommendations_for(category)
        .iter()
        .map(|card| {
            let id = slugify(card.title);
            RecoView {
                title: card.title,
                meta: card.meta,
                href: card.href,
                visit_href: visit_link(card.title, card.href),
                bookmarked: bookmarks.iter().any(|entry| entry.id == id),
                id,
            }
        })
        .collect();

    let recent_list = RecentList::new(state.storage.clone());
    let now = lists::now_ms();
    let recent = recent_list
        .read()
        .into_iter()
        .map(|entry| RecentView {
            ago: lists::time_ago(entry.ts, now),
            label: entry.label,
            href: entry.href,
        })
        .collect();

    let template = HomeTemplate {
        greeting,
        form_error,
        name_value,
        category_options,
        menu,
        recommendations,
        recent,
        bookmarks,
        clock: widgets::clock_text(Local::now()),
        geo: widgets::geolocation_display(state.geo.as_deref(), &GeoOptions::default()),
        visitors: widgets::bump_visit_counter(state.storage.as_ref()),
    };
    let content = template
        .render()
        .unwrap_or_else(|err| partials::escape_html(&err.to_string()));
    let chrome = page_chrome(state, session.store.as_ref(), data::home_page());
    render_shell(&chrome, &content)
}

async fn home(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let session = session_handle(&state, &headers);
    let body = render_home(&state, &session, None, None);
    // The recent grid shows state from before this visit, so the visit is
    // recorded after rendering.
    RecentList::new(state.storage.clone()).push(data::home_page().title, "/");
    with_session_cookie(Html(body).into_response(), &session)
}

#[derive(Debug, Deserialize)]
struct ProfilePayload {
    #[serde(rename = "userName", default)]
    user_name: String,
    #[serde(rename = "userType", default)]
    user_type: Option<String>,
}

async fn submit_profile(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Form(payload): Form<ProfilePayload>,
) -> Response {
    let session = session_handle(&state, &headers);
    let form = ProfileForm {
        name: payload.user_name.clone(),
        category: payload.user_type,
    };
    match form.validate() {
        Ok(profile) => {
            if let Err(err) = profile.save(session.store.as_ref()) {
                tracing::warn!(error = %err, "failed to save session profile");
            }
            with_session_cookie(Redirect::to("/").into_response(), &session)
        }
        Err(err) => {
            let body = render_home(&state, &session, Some(err.message()), Some(payload.user_name));
            with_session_cookie(Html(body).into_response(), &session)
        }
    }
}

#[derive(Debug, Deserialize)]
struct VisitParams {
    label: Option<String>,
    href: Option<String>,
}

async fn visit(State(state): State<SharedState>, Query(params): Query<VisitParams>) -> Redirect {
    let label = params.label.unwrap_or_default();
    let href = params.href.unwrap_or_default();
    RecentList::new(state.storage.clone()).push(&label, &href);
    let target = if href.starts_with('/') && !href.starts_with("//") {
        href
    } else {
        "/".to_string()
    };
    Redirect::to(&target)
}

#[derive(Debug, Deserialize)]
struct BookmarkPayload {
    #[serde(default)]
    id: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    href: String,
}

async fn toggle_bookmark(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Form(payload): Form<BookmarkPayload>,
) -> Redirect {
    BookmarkList::new(state.storage.clone()).toggle(&BookmarkEntry {
        id: payload.id,
        href: payload.href,
        label: payload.label,
    });
    redirect_back(&headers)
}

async fn clear_bookmarks(State(state): State<SharedState>, headers: HeaderMap) -> Redirect {
    BookmarkList::new(state.storage.clone()).clear();
    redirect_back(&headers)
}

async fn export_bookmarks(State(state): State<SharedState>) -> Response {
    match BookmarkList::new(state.storage.clone()).export() {
        Some(export) => {
            let disposition = format!("attachment; filename=\"{}\"", export.filename);
            (
                [
                    (
                        header::CONTENT_TYPE,
                        "text/plain; charset=utf-8".to_string(),
                    ),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                export.body,
            )
                .into_response()
        }
        None => Html(render_notice_page("No bookmarks to export.")).into_response(),
    }
}

async fn toggle_theme(State(state): State<SharedState>, headers: HeaderMap) -> Redirect {
    partials::toggle_theme(state.storage.as_ref());
    redirect_back(&headers)
}

async fn toggle_nav(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let session = session_handle(&state, &headers);
    partials::toggle_nav(session.store.as_ref());
    with_session_cookie(redirect_back(&headers).into_response(), &session)
}

async fn site_page(
    State(state): State<SharedState>,
    RoutePath(slug): RoutePath<String>,
    headers: HeaderMap,
) -> Response {
    let Some(page) = data::page_by_slug(&slug) else {
        return not_found().await.into_response();
    };
    let session = session_handle(&state, &headers);
    RecentList::new(state.storage.clone()).push(page.title, &format!("/{}", page.slug));

    let content = if page.slug == "careers" {
        render_careers(&state, page)
    } else {
        SitePageTemplate {
            title: page.title,
            blurb: page.blurb,
        }
        .render()
        .unwrap_or_else(|err| partials::escape_html(&err.to_string()))
    };
    let chrome = page_chrome(&state, session.store.as_ref(), page);
    with_session_cookie(
        Html(render_shell(&chrome, &content)).into_response(),
        &session,
    )
}

fn render_careers(state: &AppState, page: &Page) -> String {
    let options = LoadOptions {
        fallback: json!([]),
        ..Default::default()
    };
    let outcome = load_json(&state.site_root.join(CAREERS_DATA_PATH), &options);
    let rows: Vec<CareerRow> = outcome
        .value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let title = item.get("title")?.as_str()?.trim();
                    if title.is_empty() {
                        return None;
                    }
                    Some(CareerRow {
                        title: title.to_string(),
                        field: item
                            .get("field")
                            .and_then(Value::as_str)
                            .unwrap_or("General")
                            .to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default();
    let result_note = match &outcome.notice {
        Some(notice) => notice.message.clone(),
        None => format!("{} careers loaded.", rows.len()),
    };
    CareersTemplate {
        title: page.title,
        blurb: page.blurb,
        result_note,
        rows,
    }
    .render()
    .unwrap_or_else(|err| partials::escape_html(&err.to_string()))
}

async fn api_recent(State(state): State<SharedState>) -> Json<Vec<ListEntry>> {
    Json(RecentList::new(state.storage.clone()).read())
}

async fn api_bookmarks(State(state): State<SharedState>) -> Json<Vec<BookmarkEntry>> {
    Json(BookmarkList::new(state.storage.clone()).read())
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "nextstep-web" }))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Html(render_notice_page("That page does not exist.")),
    )
}
