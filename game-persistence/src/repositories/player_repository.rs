use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::entities::{players, prelude::*};
use game_types::{PlayerRecord, RankingEntry, StoreError};

const STARTING_LEVEL: i32 = 1;
const STARTING_LIVES: i32 = 3;

pub struct PlayerRepository {
    db: DatabaseConnection,
}

impl PlayerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_record(model: players::Model) -> PlayerRecord {
        // Tolerate malformed stored history the same way the client
        // tolerates a missing one.
        let history = serde_json::from_str(&model.history).unwrap_or_else(|err| {
            tracing::warn!(player = %model.id, "malformed stored history: {}", err);
            Vec::new()
        });

        PlayerRecord {
            id: model.id,
            avatar: model.avatar,
            level: model.level,
            max_level: model.max_level,
            lives: model.lives,
            history,
            created_at: model.created_at.to_rfc3339(),
        }
    }

    fn now() -> chrono::DateTime<chrono::FixedOffset> {
        chrono::Utc::now().into()
    }

    pub async fn create(&self, id: &str, avatar: &str) -> Result<PlayerRecord, StoreError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(StoreError::InvalidArgument);
        }
        if self.exists(id).await? {
            return Err(StoreError::Conflict { id: id.to_string() });
        }

        let now = Self::now();
        let player = players::ActiveModel {
            id: Set(id.to_string()),
            avatar: Set(avatar.to_string()),
            level: Set(STARTING_LEVEL),
            max_level: Set(STARTING_LEVEL),
            lives: Set(STARTING_LIVES),
            history: Set("[]".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Players::insert(player)
            .exec(&self.db)
            .await
            .map_err(StoreError::backend)?;

        self.find(id).await
    }

    pub async fn find(&self, id: &str) -> Result<PlayerRecord, StoreError> {
        let model = Players::find_by_id(id.trim())
            .one(&self.db)
            .await
            .map_err(StoreError::backend)?;

        model
            .map(Self::model_to_record)
            .ok_or_else(|| StoreError::NotFound {
                id: id.trim().to_string(),
            })
    }

    pub async fn exists(&self, id: &str) -> Result<bool, StoreError> {
        let model = Players::find_by_id(id.trim())
            .one(&self.db)
            .await
            .map_err(StoreError::backend)?;
        Ok(model.is_some())
    }

    /// Replace the stored guess history wholesale. Unknown ids are a no-op.
    pub async fn update_history(&self, id: &str, history: &[String]) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(history).map_err(StoreError::backend)?;

        Players::update_many()
            .col_expr(players::Column::History, Expr::value(encoded))
            .col_expr(players::Column::UpdatedAt, Expr::value(Self::now()))
            .filter(players::Column::Id.eq(id.trim()))
            .exec(&self.db)
            .await
            .map_err(StoreError::backend)?;

        Ok(())
    }

    /// Apply a level/lives change in one statement. `max_level` ratchets via
    /// `MAX(max_level, ?)` inside the same UPDATE, so two concurrent writers
    /// cannot lose the high-water mark. Unknown ids are a no-op.
    pub async fn update_progress(&self, id: &str, level: i32, lives: i32) -> Result<(), StoreError> {
        Players::update_many()
            .col_expr(players::Column::Level, Expr::value(level))
            .col_expr(players::Column::Lives, Expr::value(lives))
            .col_expr(
                players::Column::MaxLevel,
                Expr::cust_with_values("MAX(max_level, ?)", [level]),
            )
            .col_expr(players::Column::UpdatedAt, Expr::value(Self::now()))
            .filter(players::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(StoreError::backend)?;

        Ok(())
    }

    /// Send the player back to level 1 with fresh lives. `max_level` is
    /// deliberately untouched, it is the ranking score.
    pub async fn reset_progress(&self, id: &str) -> Result<(), StoreError> {
        Players::update_many()
            .col_expr(players::Column::Level, Expr::value(STARTING_LEVEL))
            .col_expr(players::Column::Lives, Expr::value(STARTING_LIVES))
            .col_expr(players::Column::UpdatedAt, Expr::value(Self::now()))
            .filter(players::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(StoreError::backend)?;

        Ok(())
    }

    /// Top-N players by best-ever level.
    pub async fn ranking(&self, limit: u64) -> Result<Vec<RankingEntry>, StoreError> {
        let models = Players::find()
            .order_by_desc(players::Column::MaxLevel)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(StoreError::backend)?;

        Ok(models
            .into_iter()
            .map(|model| RankingEntry {
                id: model.id,
                max_level: model.max_level,
                avatar: model.avatar,
            })
            .collect())
    }
}
