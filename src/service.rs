use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::analysis::{AnalyzeSpecs, ComparativeAnalyzer};
use crate::config::Config;
use crate::error::{Result, SpecCheckError};
use crate::models::{AnalysisPayload, AnalysisResult, GameRequirements, SpecRequest};
use crate::presentation::FpsRating;
use crate::requirements::{RequirementResolver, ResolveRequirements};
use crate::transport::{GatewayTransport, Transport};
use crate::validation;

/// Orchestrates one analysis: validation, single-flight guard, the two
/// strictly sequential generator steps, and composition of the result.
pub struct SpecCheckService {
    resolver: Box<dyn ResolveRequirements>,
    analyzer: Box<dyn AnalyzeSpecs>,
    in_flight: AtomicBool,
}

impl SpecCheckService {
    pub fn new(cfg: &Config) -> Result<Self> {
        let api_key = cfg.require_api_key()?;
        let transport: Arc<dyn Transport> = Arc::new(GatewayTransport::new(
            api_key,
            cfg.generator.api_url.clone(),
        ));

        Ok(Self::with_steps(
            Box::new(RequirementResolver::new(
                Arc::clone(&transport),
                cfg.generator.model.clone(),
            )),
            Box::new(ComparativeAnalyzer::new(
                transport,
                cfg.generator.model.clone(),
            )),
        ))
    }

    pub fn with_steps(
        resolver: Box<dyn ResolveRequirements>,
        analyzer: Box<dyn AnalyzeSpecs>,
    ) -> Self {
        Self {
            resolver,
            analyzer,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Run the full pipeline for one request. Either the complete
    /// `AnalysisResult` is produced or an error surfaces; there is no
    /// partial-success state.
    pub async fn analyze(&self, request: &SpecRequest) -> Result<AnalysisResult> {
        validation::validate_request(request)?;

        // Single-flight: at most one analysis in progress per service
        // instance. Overlapping callers are rejected, not queued.
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SpecCheckError::InFlight)?;

        let outcome = self.run(request).await;
        self.in_flight.store(false, Ordering::Release);
        outcome
    }

    async fn run(&self, request: &SpecRequest) -> Result<AnalysisResult> {
        tracing::info!(
            game = %request.game,
            gpu = %request.gpu,
            cpu = %request.cpu,
            ram = %request.ram,
            "Analyzing specs"
        );

        // The second step depends on the first's output, so a requirement
        // failure means the analysis call is never issued.
        let requirements = self.resolver.resolve(&request.game).await?;
        let payload = self.analyzer.analyze(request, &requirements).await?;

        tracing::info!(
            expected_fps = payload.recommendations.expected_fps,
            rating = ?FpsRating::classify(payload.recommendations.expected_fps),
            "Analysis complete"
        );

        Ok(compose(payload, requirements))
    }
}

/// Build the canonical result: the analysis payload verbatim plus the
/// resolved requirements. Pure; neither input is altered.
pub fn compose(analysis: AnalysisPayload, requirements: GameRequirements) -> AnalysisResult {
    AnalysisResult {
        analysis,
        game_requirements: requirements,
    }
}
