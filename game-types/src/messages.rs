use serde::{Deserialize, Serialize};
use ts_rs::TS;

// Request/response bodies for the HTTP API. Field names follow the wire
// contract the browser client already speaks (Portuguese keys), so every
// struct renames its fields on serialization.

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RegisterRequest {
    pub id: String,
    #[serde(default)]
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginRequest {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginResponse {
    #[serde(rename = "mensagem")]
    pub message: String,
    #[serde(rename = "dados")]
    pub data: PlayerData,
}

/// The slice of a player record the client needs to restore a session.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayerData {
    pub id: String,
    pub avatar: String,
    #[serde(rename = "nivel")]
    pub level: i32,
    #[serde(rename = "vidas")]
    pub lives: i32,
    #[serde(rename = "historico")]
    pub history: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaveHistoryRequest {
    pub id: String,
    #[serde(rename = "historico")]
    pub history: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckIdRequest {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckIdResponse {
    #[serde(rename = "existe")]
    pub exists: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UpdateProgressRequest {
    pub id: String,
    #[serde(rename = "nivelAtual")]
    pub level: i32,
    #[serde(rename = "vidas")]
    pub lives: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RestartProgressRequest {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RankingEntry {
    pub id: String,
    #[serde(rename = "nivelMaximo")]
    pub max_level: i32,
    pub avatar: String,
}
