use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderName, Method, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::SpecCheckError;
use crate::models::{AnalysisResult, SpecRequest};
use crate::service::SpecCheckService;

/// Application state shared across handlers
pub struct AppState {
    pub service: SpecCheckService,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

// Permissive cross-origin policy on every response, errors included, with
// the browser client's headers explicitly allowed. Preflight OPTIONS is
// answered by the layer.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SpecRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, SpecCheckError> {
    // Map axum's plain-text rejection into the JSON error envelope so every
    // non-200 response carries `{ "error": ... }`.
    let Json(request) = body.map_err(|e| SpecCheckError::InvalidBody(e.body_text()))?;
    let result = state.service.analyze(&request).await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalyzeSpecs;
    use crate::error::Result;
    use crate::models::{
        AnalysisPayload, FpsEstimates, GameRequirements, Recommendation, RequirementTier,
    };
    use crate::requirements::ResolveRequirements;
    use async_trait::async_trait;

    struct FixedResolver(GameRequirements);

    #[async_trait]
    impl ResolveRequirements for FixedResolver {
        async fn resolve(&self, _game: &str) -> Result<GameRequirements> {
            Ok(self.0.clone())
        }
    }

    struct FixedAnalyzer(AnalysisPayload);

    #[async_trait]
    impl AnalyzeSpecs for FixedAnalyzer {
        async fn analyze(
            &self,
            _specs: &SpecRequest,
            _requirements: &GameRequirements,
        ) -> Result<AnalysisPayload> {
            Ok(self.0.clone())
        }
    }

    fn stub_service() -> SpecCheckService {
        SpecCheckService::with_steps(
            Box::new(FixedResolver(GameRequirements {
                minimum: RequirementTier {
                    gpu: "GTX 960".to_string(),
                    cpu: "i5-2500K".to_string(),
                    ram: "8GB".to_string(),
                },
                recommended: RequirementTier {
                    gpu: "RTX 2060".to_string(),
                    cpu: "i7-8700K".to_string(),
                    ram: "16GB".to_string(),
                },
            })),
            Box::new(FixedAnalyzer(AnalysisPayload {
                can_run: true,
                minimum_met: true,
                recommended_met: true,
                fps_estimates: FpsEstimates {
                    low_720p: 120.0,
                    medium_1080p: 90.0,
                    high_1080p: 70.0,
                    ultra_1440p: 45.0,
                },
                recommendations: Recommendation {
                    resolution: "1080p".to_string(),
                    settings: "High".to_string(),
                    expected_fps: 70.0,
                    reasoning: "Clears the recommended tier.".to_string(),
                },
            })),
        )
    }

    async fn spawn_app() -> String {
        let app = router(Arc::new(AppState {
            service: stub_service(),
        }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn request_body() -> serde_json::Value {
        serde_json::json!({
            "game": "Example Game",
            "gpu": "RTX 3060",
            "cpu": "i7-10700K",
            "ram": "16GB"
        })
    }

    #[tokio::test]
    async fn test_analyze_success_carries_cors_headers() {
        let base = spawn_app().await;
        let response = reqwest::Client::new()
            .post(format!("{base}/analyze"))
            .header("Origin", "http://example.com")
            .json(&request_body())
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["canRun"], true);
        assert_eq!(body["gameRequirements"]["minimum"]["gpu"], "GTX 960");
    }

    #[tokio::test]
    async fn test_validation_error_carries_envelope_and_cors() {
        let base = spawn_app().await;
        let mut invalid = request_body();
        invalid["gpu"] = serde_json::json!("");
        let response = reqwest::Client::new()
            .post(format!("{base}/analyze"))
            .header("Origin", "http://example.com")
            .json(&invalid)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "missing required field: gpu");
    }

    #[tokio::test]
    async fn test_malformed_body_gets_json_error_envelope() {
        let base = spawn_app().await;
        let response = reqwest::Client::new()
            .post(format!("{base}/analyze"))
            .header("Origin", "http://example.com")
            .header("Content-Type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
        assert!(
            response
                .headers()
                .get("content-type")
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("application/json")
        );
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .starts_with("invalid request body:")
        );
    }

    #[tokio::test]
    async fn test_preflight_options_is_answered() {
        let base = spawn_app().await;
        let response = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, format!("{base}/analyze"))
            .header("Origin", "http://example.com")
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "content-type")
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );
        let allowed = response
            .headers()
            .get("access-control-allow-headers")
            .unwrap()
            .to_str()
            .unwrap()
            .to_ascii_lowercase();
        assert!(allowed.contains("content-type"));
    }
}
