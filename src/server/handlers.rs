//! Request handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, warn};

use super::pages::{Outcome, render_index};
use crate::error::{Result, SympredictError};
use crate::predictor::DiseasePrediction;
use crate::service::SymptomService;

pub type AppState = Arc<SymptomService>;

/// Form field carrying one symptom name per value.
pub const SYMPTOMS_FIELD: &str = "symptoms";

/// Form field carrying the page's selection as one comma-joined value.
pub const SELECTION_FIELD: &str = "selected_symptoms";

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub symptoms: Vec<String>,
}

/// Collect the selected symptoms from a urlencoded body.
///
/// Every `symptoms` value is one name. The `selected_symptoms` value
/// written by the page script is a comma-separated list. Order of first
/// appearance is kept and repeats are dropped.
pub fn parse_selection(body: &[u8]) -> Vec<String> {
    let mut selected: Vec<String> = Vec::new();
    let mut push = |name: &str| {
        let name = name.trim();
        if !name.is_empty() && !selected.iter().any(|s| s == name) {
            selected.push(name.to_string());
        }
    };

    for (key, value) in url::form_urlencoded::parse(body) {
        if key == SYMPTOMS_FIELD {
            push(&value);
        } else if key == SELECTION_FIELD {
            value.split(',').for_each(&mut push);
        }
    }
    selected
}

/// Run a prediction on the blocking pool, off the async workers.
pub async fn predict_blocking(service: AppState, symptoms: Vec<String>) -> Result<DiseasePrediction> {
    tokio::task::spawn_blocking(move || service.predict_disease(&symptoms))
        .await
        .map_err(|e| SympredictError::server(format!("prediction task failed: {e}")))?
}

fn log_failure(error: &SympredictError) {
    if error.is_internal() {
        error!(error = %error, "prediction produced an inconsistent result");
    } else {
        warn!(error = %error, "prediction failed");
    }
}

pub async fn index(State(service): State<AppState>) -> Html<String> {
    Html(render_index(service.catalog().names(), &[], None))
}

pub async fn submit(State(service): State<AppState>, body: String) -> Response {
    let selected = parse_selection(body.as_bytes());
    debug!(symptoms = ?selected, "prediction requested");

    let result = predict_blocking(service.clone(), selected.clone()).await;
    let names = service.catalog().names();
    match result {
        Ok(prediction) => {
            Html(render_index(names, &selected, Some(Outcome::Prediction(&prediction)))).into_response()
        }
        Err(SympredictError::AmbiguousVote {
            rf,
            naive_bayes,
            svm,
        }) => Html(render_index(
            names,
            &selected,
            Some(Outcome::Inconclusive {
                random_forest: &rf,
                naive_bayes: &naive_bayes,
                svm: &svm,
            }),
        ))
        .into_response(),
        Err(e) => {
            log_failure(&e);
            let message = e.to_string();
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_index(names, &selected, Some(Outcome::Failure(&message)))),
            )
                .into_response()
        }
    }
}

pub async fn search(
    State(service): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<String>> {
    Json(
        service
            .search(&params.query)
            .into_iter()
            .map(str::to_string)
            .collect(),
    )
}

pub async fn symptoms(State(service): State<AppState>) -> Json<Vec<String>> {
    Json(service.catalog().names().to_vec())
}

pub async fn predict(
    State(service): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Response {
    match predict_blocking(service, request.symptoms).await {
        Ok(prediction) => Json(prediction).into_response(),
        Err(SympredictError::AmbiguousVote {
            rf,
            naive_bayes,
            svm,
        }) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "inconclusive: all three models disagree",
                "predictions": {
                    "rf_model_prediction": rf,
                    "naive_bayes_prediction": naive_bayes,
                    "svm_model_prediction": svm,
                }
            })),
        )
            .into_response(),
        Err(e) => {
            log_failure(&e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

pub async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        include_str!("../../assets/app.js"),
    )
}

pub async fn health() -> &'static str {
    "ok"
}
