//! Content store catalog adapter
//!
//! Queries the hosted content store over HTTP: one database per record
//! collection, `POST {base}/databases/{id}/query` with bearer auth,
//! records returned as pages of dynamically shaped `properties`.
//! Property coercion lives in [`record`](super::record); everything
//! downstream of this adapter sees typed entities only.
//!
//! Expected collection schemas:
//!
//! | Collection | Properties read                                              |
//! |------------|--------------------------------------------------------------|
//! | Questions  | `Question` (title), `QID` (rich_text, falls back to page id), `Type` (select), `Options` (multi_select), `Order` (number) |
//! | Goals      | `Goal Name` (title), `Goal ID` (rich_text, falls back to page id), `Description` (rich_text) |
//! | Services   | `Service Name` (title), `Goal ID` (rich_text), `Description` (rich_text), `Docs URL` (url), `Tags` (multi_select) |
//! | Rules      | `From Question` (rich_text), `Match Type` (select), `Match Choices` (multi_select), `Next Node Type` (select), `Next Question` (rich_text), `Next Goals` (multi_select), `Priority` (number) |

use super::record;
use crate::config::FileCatalogConfig;
use async_trait::async_trait;
use compass_application::ports::catalog::{Catalog, CatalogError};
use compass_domain::{Goal, MatchType, NextNodeType, Question, RoutingRule, Service};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

/// Connection settings for the content store
#[derive(Debug, Clone)]
pub struct HttpCatalogConfig {
    pub base_url: String,
    /// Bearer token; `None` for unauthenticated stores
    pub token: Option<String>,
    pub questions_db: String,
    pub goals_db: String,
    pub services_db: String,
    pub rules_db: String,
    pub timeout: Duration,
}

impl HttpCatalogConfig {
    /// Build from the `[catalog]` config section, reading the API token
    /// from the configured environment variable.
    pub fn from_file_config(config: &FileCatalogConfig) -> Result<Self, String> {
        let require = |field: &str, value: &Option<String>| {
            value
                .clone()
                .ok_or_else(|| format!("catalog.{} is required for the http source", field))
        };

        Ok(Self {
            base_url: require("base_url", &config.base_url)?,
            token: std::env::var(&config.token_env).ok(),
            questions_db: require("questions_db", &config.questions_db)?,
            goals_db: require("goals_db", &config.goals_db)?,
            services_db: require("services_db", &config.services_db)?,
            rules_db: require("rules_db", &config.rules_db)?,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }
}

/// Catalog adapter backed by the hosted content store
pub struct HttpCatalog {
    client: reqwest::Client,
    config: HttpCatalogConfig,
}

impl HttpCatalog {
    pub fn new(config: HttpCatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CatalogError::Other(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Query one database, returning its result pages
    async fn query(&self, database_id: &str, body: Value) -> Result<Vec<Value>, CatalogError> {
        let url = format!(
            "{}/databases/{}/query",
            self.config.base_url.trim_end_matches('/'),
            database_id
        );
        debug!("Querying catalog database {}", database_id);

        let mut request = self.client.post(&url).json(&body);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                CatalogError::Timeout
            } else {
                CatalogError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::ConnectionFailed(format!(
                "HTTP {} from {}",
                status.as_u16(),
                url
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;

        payload
            .get("results")
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| CatalogError::InvalidResponse("response has no results array".into()))
    }

    /// All questions, order ascending
    async fn questions_sorted(&self) -> Result<Vec<Question>, CatalogError> {
        let pages = self
            .query(
                &self.config.questions_db,
                json!({ "sorts": [{ "property": "Order", "direction": "ascending" }] }),
            )
            .await?;
        Ok(pages.iter().map(parse_question).collect())
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn first_question(&self) -> Result<Option<Question>, CatalogError> {
        Ok(self.questions_sorted().await?.into_iter().next())
    }

    async fn question(&self, id: &str) -> Result<Option<Question>, CatalogError> {
        // Ids may be either the QID property or the raw page id, so
        // match client-side rather than guessing a filter property.
        Ok(self.questions_sorted().await?.into_iter().find(|q| q.id == id))
    }

    async fn goals(&self) -> Result<Vec<Goal>, CatalogError> {
        let pages = self
            .query(
                &self.config.goals_db,
                json!({ "sorts": [{ "property": "Goal ID", "direction": "ascending" }] }),
            )
            .await?;
        Ok(pages.iter().map(parse_goal).collect())
    }

    async fn goals_by_ids(&self, ids: &[String]) -> Result<Vec<Goal>, CatalogError> {
        let all = self.goals().await?;
        Ok(ids
            .iter()
            .filter_map(|id| all.iter().find(|g| &g.id == id).cloned())
            .collect())
    }

    async fn services_for_goal(&self, goal_id: &str) -> Result<Vec<Service>, CatalogError> {
        let pages = self
            .query(
                &self.config.services_db,
                json!({
                    "filter": { "property": "Goal ID", "rich_text": { "equals": goal_id } },
                    "sorts": [{ "property": "Service Name", "direction": "ascending" }]
                }),
            )
            .await?;
        Ok(pages.iter().map(parse_service).collect())
    }

    async fn rules_from(&self, from_question_id: &str) -> Result<Vec<RoutingRule>, CatalogError> {
        let pages = self
            .query(
                &self.config.rules_db,
                json!({
                    "filter": {
                        "property": "From Question",
                        "rich_text": { "equals": from_question_id }
                    }
                }),
            )
            .await?;
        Ok(pages.iter().filter_map(parse_rule).collect())
    }
}

fn page_id(page: &Value) -> String {
    page.get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn parse_question(page: &Value) -> Question {
    let properties = &page["properties"];

    let id = record::rich_text(properties, "QID").unwrap_or_else(|| page_id(page));
    let text =
        record::title_text(properties, "Question").unwrap_or_else(|| "No title".to_string());
    let kind = record::select_name(properties, "Type")
        .and_then(|name| name.parse().ok())
        .unwrap_or_default();

    let mut question = Question::new(id, text, kind);
    for name in record::multi_select_names(properties, "Options") {
        // The store models options as bare tags; value doubles as label
        question = question.with_option(name.clone(), name);
    }
    question
}

fn parse_goal(page: &Value) -> Goal {
    let properties = &page["properties"];

    let id = record::rich_text(properties, "Goal ID").unwrap_or_else(|| page_id(page));
    let title =
        record::title_text(properties, "Goal Name").unwrap_or_else(|| "No title".to_string());

    let mut goal = Goal::new(id, title);
    if let Some(description) = record::rich_text(properties, "Description") {
        goal = goal.with_description(description);
    }
    goal
}

fn parse_service(page: &Value) -> Service {
    let properties = &page["properties"];

    let mut service = Service::new(
        page_id(page),
        record::title_text(properties, "Service Name").unwrap_or_else(|| "No title".to_string()),
    );
    if let Some(description) = record::rich_text(properties, "Description") {
        service = service.with_description(description);
    }
    if let Some(url) = record::url(properties, "Docs URL") {
        service = service.with_docs_url(url);
    }
    for tag in record::multi_select_names(properties, "Tags") {
        service = service.with_tag(tag);
    }
    service
}

/// Parse a rule page; unusable pages are skipped with a warning
fn parse_rule(page: &Value) -> Option<RoutingRule> {
    let properties = &page["properties"];
    let id = page_id(page);

    let Some(from_question_id) = record::rich_text(properties, "From Question") else {
        warn!("Rule {} has no From Question; skipping", id);
        return None;
    };

    // Unrecognized match types are kept and fail closed at evaluation
    let match_type = match record::select_name(properties, "Match Type").as_deref() {
        Some("AnyOf") => MatchType::AnyOf,
        Some("AllOf") => MatchType::AllOf,
        Some("NoneOf") => MatchType::NoneOf,
        Some("Always") => MatchType::Always,
        _ => MatchType::Unknown,
    };

    let next_node_type = match record::select_name(properties, "Next Node Type").as_deref() {
        Some("Question") => NextNodeType::Question,
        Some("Goal") => NextNodeType::Goal,
        Some("End") => NextNodeType::End,
        other => {
            warn!("Rule {} has unusable next node type {:?}; skipping", id, other);
            return None;
        }
    };

    let next_goals = record::multi_select_names(properties, "Next Goals");

    Some(RoutingRule {
        id,
        from_question_id,
        match_type,
        match_choices: record::multi_select_names(properties, "Match Choices"),
        next_node_type,
        next_question_id: record::rich_text(properties, "Next Question"),
        next_goal_ids: (!next_goals.is_empty()).then_some(next_goals),
        priority: record::number(properties, "Priority").unwrap_or(0),
    })
}
