use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::extract;
use crate::models::{ChatMessage, ChatRequest, GameRequirements};
use crate::transport::Transport;

pub struct RequirementResolver {
    tx: Arc<dyn Transport>,
    model: String,
}

impl RequirementResolver {
    pub fn new(tx: Arc<dyn Transport>, model: String) -> Self {
        Self { tx, model }
    }
}

#[async_trait]
pub trait ResolveRequirements: Send + Sync {
    async fn resolve(&self, game: &str) -> Result<GameRequirements>;
}

#[async_trait]
impl ResolveRequirements for RequirementResolver {
    async fn resolve(&self, game: &str) -> Result<GameRequirements> {
        tracing::info!("Resolving requirements for game: {}", game);

        // Unknown or nonexistent games never fail this step: the generator
        // is directed to degrade to estimates for a modern AAA title.
        let prompt = format!(
            r#"You are a gaming hardware expert. Provide the minimum and recommended system requirements for the game "{game}".

Return ONLY a JSON object with this exact structure (no markdown, no code blocks, just pure JSON):
{{
  "minimum": {{
    "gpu": "GPU model",
    "cpu": "CPU model",
    "ram": "RAM amount"
  }},
  "recommended": {{
    "gpu": "GPU model",
    "cpu": "CPU model",
    "ram": "RAM amount"
  }}
}}

If the game doesn't exist or you're not sure, use reasonable estimates for a modern AAA game."#
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
        };

        let response = self.tx.chat(&request).await?;
        tracing::debug!("Game requirements response: {}", response.content());

        extract::parse_payload(response.content())
    }
}
