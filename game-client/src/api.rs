use anyhow::{Context, Result};
use reqwest::StatusCode;

use game_types::{
    CheckIdRequest, CheckIdResponse, LoginRequest, LoginResponse, PlayerData, RankingEntry,
    RegisterRequest, RestartProgressRequest, SaveHistoryRequest, UpdateProgressRequest,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterStatus {
    Created,
    AlreadyExists,
}

/// Thin wrapper over the backend's HTTP contract.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub async fn register(&self, id: &str, avatar: &str) -> Result<RegisterStatus> {
        let response = self
            .http
            .post(format!("{}/api/cadastro", self.base_url))
            .json(&RegisterRequest {
                id: id.to_string(),
                avatar: avatar.to_string(),
            })
            .send()
            .await
            .context("falha de conexão no cadastro")?;

        match response.status() {
            StatusCode::OK => Ok(RegisterStatus::Created),
            StatusCode::CONFLICT => Ok(RegisterStatus::AlreadyExists),
            status => {
                let body = response.text().await.unwrap_or_default();
                anyhow::bail!("cadastro recusado ({status}): {body}")
            }
        }
    }

    pub async fn login(&self, id: &str) -> Result<Option<PlayerData>> {
        let response = self
            .http
            .post(format!("{}/api/login", self.base_url))
            .json(&LoginRequest { id: id.to_string() })
            .send()
            .await
            .context("falha de conexão no login")?;

        match response.status() {
            StatusCode::OK => {
                let login: LoginResponse =
                    response.json().await.context("resposta de login inválida")?;
                Ok(Some(login.data))
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => {
                let body = response.text().await.unwrap_or_default();
                anyhow::bail!("login recusado ({status}): {body}")
            }
        }
    }

    pub async fn check_id(&self, id: &str) -> Result<bool> {
        let response = self
            .http
            .post(format!("{}/api/verificar-id", self.base_url))
            .json(&CheckIdRequest { id: id.to_string() })
            .send()
            .await
            .context("falha de conexão ao verificar id")?
            .error_for_status()
            .context("erro ao verificar id")?;

        let check: CheckIdResponse = response.json().await?;
        Ok(check.exists)
    }

    pub async fn save_history(&self, id: &str, history: &[String]) -> Result<()> {
        self.http
            .post(format!("{}/api/salvar-historico", self.base_url))
            .json(&SaveHistoryRequest {
                id: id.to_string(),
                history: history.to_vec(),
            })
            .send()
            .await
            .context("falha de conexão ao salvar histórico")?
            .error_for_status()
            .context("erro ao salvar histórico")?;
        Ok(())
    }

    pub async fn update_progress(&self, id: &str, level: i32, lives: i32) -> Result<()> {
        self.http
            .post(format!("{}/api/atualizar-nivel", self.base_url))
            .json(&UpdateProgressRequest {
                id: id.to_string(),
                level,
                lives,
            })
            .send()
            .await
            .context("falha de conexão ao atualizar nível")?
            .error_for_status()
            .context("erro ao atualizar nível")?;
        Ok(())
    }

    pub async fn reset_progress(&self, id: &str) -> Result<()> {
        self.http
            .post(format!("{}/api/reiniciar-nivel", self.base_url))
            .json(&RestartProgressRequest { id: id.to_string() })
            .send()
            .await
            .context("falha de conexão ao reiniciar nível")?
            .error_for_status()
            .context("erro ao reiniciar nível")?;
        Ok(())
    }

    pub async fn ranking(&self) -> Result<Vec<RankingEntry>> {
        let response = self
            .http
            .get(format!("{}/api/ranking", self.base_url))
            .send()
            .await
            .context("falha de conexão ao carregar ranking")?
            .error_for_status()
            .context("erro ao carregar ranking")?;

        Ok(response.json().await?)
    }
}
