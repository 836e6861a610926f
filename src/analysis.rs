use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::extract;
use crate::models::{AnalysisPayload, ChatMessage, ChatRequest, GameRequirements, SpecRequest};
use crate::transport::Transport;

pub struct ComparativeAnalyzer {
    tx: Arc<dyn Transport>,
    model: String,
}

impl ComparativeAnalyzer {
    pub fn new(tx: Arc<dyn Transport>, model: String) -> Self {
        Self { tx, model }
    }
}

#[async_trait]
pub trait AnalyzeSpecs: Send + Sync {
    async fn analyze(
        &self,
        specs: &SpecRequest,
        requirements: &GameRequirements,
    ) -> Result<AnalysisPayload>;
}

#[async_trait]
impl AnalyzeSpecs for ComparativeAnalyzer {
    async fn analyze(
        &self,
        specs: &SpecRequest,
        requirements: &GameRequirements,
    ) -> Result<AnalysisPayload> {
        tracing::info!("Analyzing specs against requirements for game: {}", specs.game);

        // No benchmark table is supplied; accuracy is bounded by the
        // generator's own knowledge of the named hardware.
        let prompt = format!(
            r#"You are a gaming hardware expert. Compare the user's PC specs with the game requirements and provide a detailed analysis.

User's PC Specs:
- GPU: {gpu}
- CPU: {cpu}
- RAM: {ram}

Game: {game}
Minimum Requirements:
- GPU: {min_gpu}
- CPU: {min_cpu}
- RAM: {min_ram}

Recommended Requirements:
- GPU: {rec_gpu}
- CPU: {rec_cpu}
- RAM: {rec_ram}

Return ONLY a JSON object with this exact structure (no markdown, no code blocks):
{{
  "canRun": boolean (can the game run at all),
  "minimumMet": boolean (meets minimum requirements),
  "recommendedMet": boolean (meets recommended requirements),
  "fpsEstimates": {{
    "low720p": number (FPS at low settings 720p),
    "medium1080p": number (FPS at medium settings 1080p),
    "high1080p": number (FPS at high settings 1080p),
    "ultra1440p": number (FPS at ultra settings 1440p)
  }},
  "recommendations": {{
    "resolution": "recommended resolution (e.g., 1080p, 1440p)",
    "settings": "recommended graphics settings (e.g., Low, Medium, High, Ultra)",
    "expectedFps": number (expected FPS with these settings),
    "reasoning": "brief explanation of why these settings are optimal"
  }}
}}

Be realistic with FPS estimates based on actual hardware capabilities."#,
            gpu = specs.gpu,
            cpu = specs.cpu,
            ram = specs.ram,
            game = specs.game,
            min_gpu = requirements.minimum.gpu,
            min_cpu = requirements.minimum.cpu,
            min_ram = requirements.minimum.ram,
            rec_gpu = requirements.recommended.gpu,
            rec_cpu = requirements.recommended.cpu,
            rec_ram = requirements.recommended.ram,
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
        };

        let response = self.tx.chat(&request).await?;
        tracing::debug!("Analysis response: {}", response.content());

        extract::parse_payload(response.content())
    }
}
