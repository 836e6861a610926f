use serde::{Deserialize, Serialize};

/// One analysis request as submitted by the user. All four fields are
/// free-form strings; presence is validated, content is not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecRequest {
    pub game: String,
    pub gpu: String,
    pub cpu: String,
    pub ram: String,
}

/// One tier of hardware requirements. Display strings only, never parsed
/// into structured hardware identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementTier {
    pub gpu: String,
    pub cpu: String,
    pub ram: String,
}

/// Minimum and recommended requirements for a game. Both tiers must be
/// present or the resolution step fails as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRequirements {
    pub minimum: RequirementTier,
    pub recommended: RequirementTier,
}

/// Frame-rate estimates per settings tier. No ordering is enforced between
/// tiers; the generator is trusted to produce the expected relationship.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FpsEstimates {
    pub low_720p: f64,
    pub medium_1080p: f64,
    pub high_1080p: f64,
    pub ultra_1440p: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub resolution: String,
    pub settings: String,
    pub expected_fps: f64,
    pub reasoning: String,
}

/// Shape of the comparative-analysis reply. Deserializing into this type is
/// the schema gate: a missing or mistyped field rejects the whole payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPayload {
    pub can_run: bool,
    pub minimum_met: bool,
    pub recommended_met: bool,
    pub fps_estimates: FpsEstimates,
    pub recommendations: Recommendation,
}

/// The canonical result record: every field of the analysis payload
/// verbatim, plus the requirements resolved by the first generator call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub analysis: AnalysisPayload,
    pub game_requirements: GameRequirements,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

// Generator gateway request format
#[derive(Debug, Serialize, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

// Generator gateway response format. An unexpected shape deserializes to no
// choices, which downstream treats as empty content.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
}

impl ChatResponse {
    /// First choice's message content, or `""` when the response carried
    /// none. Empty content then fails extraction rather than erroring here.
    pub fn content(&self) -> &str {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .unwrap_or_default()
    }
}
