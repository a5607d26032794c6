use serde::{Deserialize, Serialize};

/// Request body sent to the metamorphosis engine.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SeedPayload {
    pub seed_logic: String,
}

/// Engine response. `data` is opaque; a missing key deserializes to null.
#[derive(Debug, Deserialize, Clone)]
pub struct EngineResponse {
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Debug, Serialize, Clone)]
pub struct ErrorResponse {
    pub error: String,
}
