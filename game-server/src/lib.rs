use std::sync::Arc;
use warp::Filter;
use warp::Reply;
use warp::http::StatusCode;

use game_persistence::repositories::PlayerRepository;
use game_types::{
    CheckIdRequest, CheckIdResponse, LoginRequest, LoginResponse, PlayerData, RegisterRequest,
    RestartProgressRequest, SaveHistoryRequest, StoreError, UpdateProgressRequest,
};

pub mod config;

/// Ranking is always the top ten, matching what the client renders.
const RANKING_LIMIT: u64 = 10;

pub fn create_routes(
    player_repository: Arc<PlayerRepository>,
    allowed_origin: String,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let repository_filter = warp::any().map({
        let player_repository = player_repository.clone();
        move || player_repository.clone()
    });

    let register = warp::path!("api" / "cadastro")
        .and(warp::post())
        .and(warp::body::json())
        .and(repository_filter.clone())
        .and_then(handle_register);

    let login = warp::path!("api" / "login")
        .and(warp::post())
        .and(warp::body::json())
        .and(repository_filter.clone())
        .and_then(handle_login);

    let save_history = warp::path!("api" / "salvar-historico")
        .and(warp::post())
        .and(warp::body::json())
        .and(repository_filter.clone())
        .and_then(handle_save_history);

    let check_id = warp::path!("api" / "verificar-id")
        .and(warp::post())
        .and(warp::body::json())
        .and(repository_filter.clone())
        .and_then(handle_check_id);

    let update_progress = warp::path!("api" / "atualizar-nivel")
        .and(warp::post())
        .and(warp::body::json())
        .and(repository_filter.clone())
        .and_then(handle_update_progress);

    let restart_progress = warp::path!("api" / "reiniciar-nivel")
        .and(warp::post())
        .and(warp::body::json())
        .and(repository_filter.clone())
        .and_then(handle_restart_progress);

    let ranking = warp::path!("api" / "ranking")
        .and(warp::get())
        .and(repository_filter.clone())
        .and_then(handle_ranking);

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    // CORS configuration: the browser client lives on a single known origin
    let cors = warp::cors()
        .allow_origin(allowed_origin.as_str())
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST"]);

    register
        .or(login)
        .or(save_history)
        .or(check_id)
        .or(update_progress)
        .or(restart_progress)
        .or(ranking)
        .or(health)
        .with(cors)
        .with(warp::log("logoritmos"))
}

fn text_reply(message: &str, status: StatusCode) -> warp::reply::Response {
    warp::reply::with_status(message.to_string(), status).into_response()
}

async fn handle_register(
    request: RegisterRequest,
    repository: Arc<PlayerRepository>,
) -> Result<warp::reply::Response, warp::Rejection> {
    match repository.create(&request.id, &request.avatar).await {
        Ok(_) => Ok(text_reply("Cadastro realizado com sucesso", StatusCode::OK)),
        Err(StoreError::InvalidArgument) => {
            Ok(text_reply("ID inválido", StatusCode::BAD_REQUEST))
        }
        Err(StoreError::Conflict { .. }) => {
            Ok(text_reply("Usuário já existe", StatusCode::CONFLICT))
        }
        Err(err) => {
            tracing::error!("Failed to register player: {}", err);
            Ok(text_reply("Erro ao cadastrar", StatusCode::INTERNAL_SERVER_ERROR))
        }
    }
}

async fn handle_login(
    request: LoginRequest,
    repository: Arc<PlayerRepository>,
) -> Result<warp::reply::Response, warp::Rejection> {
    if request.id.trim().is_empty() {
        return Ok(text_reply("ID inválido", StatusCode::BAD_REQUEST));
    }

    match repository.find(&request.id).await {
        Ok(record) => {
            let response = LoginResponse {
                message: format!("Login bem-sucedido para {}", record.id),
                data: PlayerData {
                    id: record.id,
                    avatar: record.avatar,
                    level: record.level,
                    lives: record.lives,
                    history: record.history,
                },
            };
            Ok(warp::reply::json(&response).into_response())
        }
        Err(StoreError::NotFound { .. }) => {
            Ok(text_reply("Usuário não encontrado", StatusCode::NOT_FOUND))
        }
        Err(err) => {
            tracing::error!("Failed to log player in: {}", err);
            Ok(text_reply(
                "Erro ao buscar usuário",
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

async fn handle_save_history(
    request: SaveHistoryRequest,
    repository: Arc<PlayerRepository>,
) -> Result<warp::reply::Response, warp::Rejection> {
    if request.id.trim().is_empty() {
        return Ok(text_reply("Dados inválidos", StatusCode::BAD_REQUEST));
    }

    match repository.update_history(&request.id, &request.history).await {
        Ok(()) => Ok(text_reply("Histórico salvo com sucesso", StatusCode::OK)),
        Err(err) => {
            tracing::error!("Failed to save history: {}", err);
            Ok(text_reply(
                "Erro ao salvar histórico",
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

async fn handle_check_id(
    request: CheckIdRequest,
    repository: Arc<PlayerRepository>,
) -> Result<warp::reply::Response, warp::Rejection> {
    match repository.exists(&request.id).await {
        Ok(exists) => Ok(warp::reply::json(&CheckIdResponse { exists }).into_response()),
        Err(err) => {
            tracing::error!("Failed to check player id: {}", err);
            Ok(text_reply("Erro interno", StatusCode::INTERNAL_SERVER_ERROR))
        }
    }
}

async fn handle_update_progress(
    request: UpdateProgressRequest,
    repository: Arc<PlayerRepository>,
) -> Result<warp::reply::Response, warp::Rejection> {
    match repository
        .update_progress(&request.id, request.level, request.lives)
        .await
    {
        Ok(()) => Ok(text_reply("✅ Nível atualizado!", StatusCode::OK)),
        Err(err) => {
            tracing::error!("Failed to update progress: {}", err);
            Ok(text_reply(
                "Erro ao atualizar nível",
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

async fn handle_restart_progress(
    request: RestartProgressRequest,
    repository: Arc<PlayerRepository>,
) -> Result<warp::reply::Response, warp::Rejection> {
    match repository.reset_progress(&request.id).await {
        Ok(()) => Ok(text_reply(
            "✅ Nível reiniciado para 1 e vidas restauradas para 3",
            StatusCode::OK,
        )),
        Err(err) => {
            tracing::error!("Failed to restart progress: {}", err);
            Ok(text_reply(
                "Erro ao reiniciar nível",
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

async fn handle_ranking(
    repository: Arc<PlayerRepository>,
) -> Result<warp::reply::Response, warp::Rejection> {
    match repository.ranking(RANKING_LIMIT).await {
        Ok(ranking) => Ok(warp::reply::json(&ranking).into_response()),
        Err(err) => {
            tracing::error!("Failed to fetch ranking: {}", err);
            Ok(warp::reply::with_status(
                warp::reply::json(&serde_json::json!({
                    "error": "Erro ao carregar ranking"
                })),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .into_response())
        }
    }
}
