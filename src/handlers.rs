use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tera::Context;
use tracing::{error, warn};

use crate::analytics;
use crate::content;
use crate::error::HubQueryError;
use crate::models::{ChartSeries, ErrorBody, Hub, HubsResponse, LiveStats, RegionStats};
use crate::query::{empty_string_as_none_str, summarize, HubQueryParams};
use crate::state::AppState;

/// Number of active hubs featured on the home page.
const FEATURED_HUBS: usize = 3;

/// A hub flattened for the templates.
#[derive(Debug, Serialize)]
struct HubRow {
    id: String,
    name: String,
    region: String,
    country: String,
    address: String,
    status: &'static str,
    latitude: f64,
    longitude: f64,
    active_users: u64,
    total_users: u64,
    uptime: String,
    bandwidth: String,
    partner: String,
    services: String,
}

impl From<&Hub> for HubRow {
    fn from(hub: &Hub) -> Self {
        Self {
            id: hub.id.clone(),
            name: hub.name.clone(),
            region: hub.location.region.clone(),
            country: hub.location.country.clone(),
            address: hub.location.address.clone(),
            status: hub.status.as_str(),
            latitude: hub.location.latitude,
            longitude: hub.location.longitude,
            active_users: hub.active_users(),
            total_users: hub.total_users(),
            uptime: format_uptime(hub.uptime()),
            bandwidth: hub
                .connectivity
                .as_ref()
                .and_then(|c| c.bandwidth.clone())
                .unwrap_or_else(|| "-".into()),
            partner: hub.partner.clone().unwrap_or_default(),
            services: hub.services.join(", "),
        }
    }
}

/// `0.987` → `"98.7%"`.
fn format_uptime(uptime: f64) -> String {
    format!("{:.1}%", uptime * 100.0)
}

fn render_template(
    tera: &tera::Tera,
    template: &str,
    context: &Context,
) -> Result<Html<String>, (StatusCode, &'static str)> {
    tera.render(template, context).map(Html).map_err(|e| {
        error!("Template render error for '{}': {}", template, e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Render error")
    })
}

fn internal_error(message: &str) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "Internal server error".into(),
            message: message.into(),
        }),
    )
}

/// Query string of the `/hubs` page: the listing parameters plus the
/// in-page search and partner filter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubsPageParams {
    #[serde(default, deserialize_with = "empty_string_as_none_str")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none_str")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none_str")]
    pub limit: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none_str")]
    pub last_key: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none_str")]
    pub q: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none_str")]
    pub partner: Option<String>,
}

impl HubsPageParams {
    fn listing(&self) -> HubQueryParams {
        HubQueryParams {
            region: self.region.clone(),
            status: self.status.clone(),
            limit: self.limit.clone(),
            last_key: self.last_key.clone(),
        }
    }
}

/// Narrows a fetched page by free text (name, address or region) and by
/// exact partner.
fn filter_page<'a>(hubs: &'a [Hub], q: Option<&str>, partner: Option<&str>) -> Vec<&'a Hub> {
    let q_lower = q.map(str::to_lowercase);
    hubs.iter()
        .filter(|h| {
            let mut matches = true;

            if let Some(ref q) = q_lower {
                matches &= h.name.to_lowercase().contains(q)
                    || h.location.address.to_lowercase().contains(q)
                    || h.location.region.to_lowercase().contains(q);
            }

            if let Some(p) = partner {
                matches &= h.partner.as_deref() == Some(p);
            }

            matches
        })
        .collect()
}

/// Builds the `/hubs` link for the page after `response`, if any.
fn next_page_href(params: &HubsPageParams, response: &HubsResponse) -> Option<String> {
    let last_key = response.pagination.last_key.as_ref()?;
    let carried = [
        ("region", &params.region),
        ("status", &params.status),
        ("limit", &params.limit),
        ("q", &params.q),
        ("partner", &params.partner),
    ];
    let mut query: Vec<String> = carried
        .iter()
        .filter_map(|&(name, value)| {
            value
                .as_deref()
                .map(|v| format!("{}={}", name, urlencoding::encode(v)))
        })
        .collect();
    // The cursor is already percent-encoded; encode once more for the URL.
    query.push(format!("lastKey={}", urlencoding::encode(last_key)));
    Some(format!("/hubs?{}", query.join("&")))
}

/// GET / - Home page with headline figures and featured hubs.
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    let hubs = match state.hubs.scan_all().await {
        Ok(hubs) => hubs,
        Err(e) => {
            error!("Error loading hubs for home page: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load hubs").into_response();
        }
    };

    let summary = summarize(&hubs);
    let featured: Vec<HubRow> = hubs
        .iter()
        .filter(|h| h.status.is_active())
        .take(FEATURED_HUBS)
        .map(HubRow::from)
        .collect();
    let live = state.live.read().await.clone();

    let mut context = Context::new();
    context.insert("summary", &summary);
    context.insert("network_uptime", &format_uptime(summary.average_uptime));
    context.insert("featured", &featured);
    context.insert("live", &live);
    context.insert("live_uptime", &format!("{:.1}%", live.uptime));

    render_template(&state.tera, "home.html", &context).into_response()
}

/// GET /hubs - Hub directory backed by the hub listing service.
pub async fn hubs_page(
    State(state): State<Arc<AppState>>,
    params: Result<Query<HubsPageParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => {
            warn!("Rejected /hubs query string: {}", rejection.body_text());
            return (StatusCode::BAD_REQUEST, "Invalid query parameters").into_response();
        }
    };

    let response = match state.hubs.list_hubs(&params.listing()).await {
        Ok(response) => response,
        Err(e) => {
            let status = e.status_code();
            if let HubQueryError::Upstream(ref source) = e {
                error!("Error fetching hubs: {}", source);
            }
            return (status, e.body().message).into_response();
        }
    };

    let partners: Vec<&str> = response
        .hubs
        .iter()
        .filter_map(|h| h.partner.as_deref())
        .unique()
        .sorted()
        .collect();
    let rows: Vec<HubRow> = filter_page(
        &response.hubs,
        params.q.as_deref(),
        params.partner.as_deref(),
    )
    .into_iter()
    .map(HubRow::from)
    .collect();

    let mut context = Context::new();
    context.insert("hubs", &rows);
    context.insert("fetched", &response.hubs.len());
    context.insert("summary", &response.summary);
    context.insert("average_uptime", &format_uptime(response.summary.average_uptime));
    context.insert("next_href", &next_page_href(&params, &response));
    context.insert("partners", &partners);
    context.insert("region_filter", params.region.as_deref().unwrap_or_default());
    context.insert("status_filter", params.status.as_deref().unwrap_or_default());
    context.insert("limit", params.limit.as_deref().unwrap_or_default());
    context.insert("q", params.q.as_deref().unwrap_or_default());
    context.insert("partner_filter", params.partner.as_deref().unwrap_or_default());

    render_template(&state.tera, "hubs.html", &context).into_response()
}

/// GET /analytics - Analytics dashboard; charts read the JSON endpoints.
pub async fn analytics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let context = Context::new();
    render_template(&state.tera, "analytics.html", &context)
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectQuery {
    #[serde(default, deserialize_with = "empty_string_as_none_str")]
    pub q: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none_str")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none_str")]
    pub country: Option<String>,
}

/// Selects a tab or region on the single-selection pages.
#[derive(Debug, Default, Deserialize)]
pub struct SelectQuery {
    #[serde(default, deserialize_with = "empty_string_as_none_str")]
    pub tab: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none_str")]
    pub region: Option<String>,
}

/// GET /projects - Project portfolio with search, status and country filters.
pub async fn projects(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProjectQuery>,
) -> impl IntoResponse {
    let projects = content::filter_projects(
        query.q.as_deref(),
        query.status.as_deref(),
        query.country.as_deref(),
    );
    let kenya = content::PROJECTS
        .iter()
        .filter(|p| p.location.contains("Kenya"))
        .count();
    let active = content::PROJECTS
        .iter()
        .filter(|p| p.status == content::ProjectStatus::Active)
        .count();
    let reached: u64 = content::PROJECTS.iter().map(|p| p.users).sum();

    let mut context = Context::new();
    context.insert("projects", &projects);
    context.insert("total_projects", &content::PROJECTS.len());
    context.insert("kenya_projects", &kenya);
    context.insert("active_projects", &active);
    context.insert("people_reached", &reached);
    context.insert("countries", content::PROJECT_COUNTRIES);
    context.insert("q", query.q.as_deref().unwrap_or_default());
    context.insert("status_filter", query.status.as_deref().unwrap_or_default());
    context.insert("country_filter", query.country.as_deref().unwrap_or_default());

    render_template(&state.tera, "projects.html", &context)
}

/// GET /solutions - Programme solutions and organisational benefits.
pub async fn solutions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut context = Context::new();
    context.insert("solutions", content::SOLUTIONS);
    context.insert("benefits", content::ORGANISATION_BENEFITS);
    render_template(&state.tera, "solutions.html", &context)
}

/// GET /content - Content library.
pub async fn content_library(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut context = Context::new();
    context.insert("items", content::CONTENT_LIBRARY);
    render_template(&state.tera, "content.html", &context)
}

/// GET /impact - Impact stories.
pub async fn impact(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut context = Context::new();
    context.insert("stories", content::IMPACT_STORIES);
    render_template(&state.tera, "impact.html", &context)
}

/// GET /education - Education portal; `?tab=` picks the section.
pub async fn education(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SelectQuery>,
) -> impl IntoResponse {
    let mut context = Context::new();
    context.insert("tabs", content::PORTAL_TABS);
    context.insert("active_tab", content::portal_tab(query.tab.as_deref()));
    render_template(&state.tera, "education.html", &context)
}

/// GET /connect - How to get online; `?region=` picks the region.
pub async fn connect(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SelectQuery>,
) -> impl IntoResponse {
    let mut context = Context::new();
    context.insert("regions", content::CONNECT_REGIONS);
    context.insert("selected", content::connect_region(query.region.as_deref()));
    render_template(&state.tera, "connect.html", &context)
}

/// GET /api/hubs - Page of hubs with summary and continuation key.
pub async fn api_list_hubs(
    State(state): State<Arc<AppState>>,
    params: Result<Query<HubQueryParams>, QueryRejection>,
) -> Result<Json<HubsResponse>, HubQueryError> {
    let Query(params) = params.inspect_err(|rejection| {
        warn!("Rejected /api/hubs query string: {}", rejection.body_text());
    })?;
    state.hubs.list_hubs(&params).await.map(Json)
}

/// OPTIONS /api/hubs - Preflight; the API header layer does the rest.
pub async fn api_hubs_options() -> StatusCode {
    StatusCode::OK
}

/// GET /api/analytics/regions - Per-region totals using Polars.
pub async fn api_region_breakdown(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RegionStats>>, (StatusCode, Json<ErrorBody>)> {
    let hubs = state.hubs.scan_all().await.map_err(|e| {
        error!("Error loading hubs for region analytics: {}", e);
        internal_error("Failed to fetch hubs")
    })?;

    analytics::region_breakdown(&hubs).map(Json).map_err(|e| {
        error!("Polars aggregation error: {}", e);
        internal_error("Failed to compute analytics")
    })
}

/// GET /api/analytics/status - Hub count per status.
pub async fn api_status_breakdown(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ChartSeries>, (StatusCode, Json<ErrorBody>)> {
    let hubs = state.hubs.scan_all().await.map_err(|e| {
        error!("Error loading hubs for status analytics: {}", e);
        internal_error("Failed to fetch hubs")
    })?;
    Ok(Json(analytics::status_breakdown(&hubs)))
}

/// GET /api/analytics/services - Hub count per service category.
pub async fn api_services_breakdown(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ChartSeries>, (StatusCode, Json<ErrorBody>)> {
    let hubs = state.hubs.scan_all().await.map_err(|e| {
        error!("Error loading hubs for service analytics: {}", e);
        internal_error("Failed to fetch hubs")
    })?;
    Ok(Json(analytics::services_breakdown(&hubs)))
}

/// GET /api/live-stats - Current simulated counters.
pub async fn api_live_stats(State(state): State<Arc<AppState>>) -> Json<LiveStats> {
    Json(state.live.read().await.clone())
}
