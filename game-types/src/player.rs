use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayerRecord {
    pub id: String,
    pub avatar: String,
    pub level: i32,
    pub max_level: i32,
    pub lives: i32,
    pub history: Vec<String>,
    pub created_at: String, // ISO 8601 string for simplicity
}
