mod api;

use std::io::{self, Write};

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use tracing::warn;

use api::{ApiClient, RegisterStatus};
use game_core::{GameRun, range_max};
use game_types::{GuessOutcome, GuessRejection, HintDirection, PlayerData, RankingEntry};

const AVATAR_STYLES: &[&str] = &[
    "bottts",
    "adventurer",
    "fun-emoji",
    "lorelei",
    "thumbs",
    "shapes",
    "notionists",
];

fn avatar_url(name: &str) -> String {
    let style = AVATAR_STYLES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("bottts");
    format!("https://api.dicebear.com/7.x/{style}/png?seed={name}")
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("falha ao ler a entrada")?;
    Ok(line.trim().to_string())
}

fn hearts(lives: u32) -> String {
    (0..3).map(|i| if i < lives { "❤️" } else { "🤍" }).collect()
}

fn print_level(run: &GameRun) {
    println!();
    println!(
        "🧠 Nível {} — Adivinhe entre 1 e {}. Você tem {} tentativas. {}",
        run.level,
        range_max(run.level),
        run.session.attempts_allowed,
        hearts(run.lives)
    );
}

fn print_ranking(ranking: &[RankingEntry]) {
    let medals = ["🥇", "🥈", "🥉"];
    println!("🏆 Ranking:");
    for (index, entry) in ranking.iter().take(3).enumerate() {
        println!(
            "  {} {} - Nível Máximo {}",
            medals[index], entry.id, entry.max_level
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let base_url =
        std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let client = ApiClient::new(base_url);

    let player = sign_in(&client).await?;
    println!("🛸 Olá {}! Continuando do nível {}.", player.id, player.level.max(1));

    play(&client, player).await
}

/// Registration and login failures block the session, unlike in-game
/// persistence which is best-effort.
async fn sign_in(client: &ApiClient) -> Result<PlayerData> {
    loop {
        let name = prompt("Digite seu nome: ")?;
        if name.len() < 3 {
            println!("⚠️ Digite um nome válido com pelo menos 3 caracteres!");
            continue;
        }

        if client.check_id(&name).await? {
            match client.login(&name).await? {
                Some(player) => return Ok(player),
                None => anyhow::bail!("usuário sumiu entre a verificação e o login"),
            }
        }

        match client.register(&name, &avatar_url(&name)).await? {
            RegisterStatus::Created => {
                println!("✅ Cadastro realizado com sucesso");
                return client
                    .login(&name)
                    .await?
                    .context("login após o cadastro falhou");
            }
            RegisterStatus::AlreadyExists => {
                println!("⚠️ Usuário já existe. Escolha outro nome.");
            }
        }
    }
}

async fn play(client: &ApiClient, player: PlayerData) -> Result<()> {
    let mut run = GameRun::new(
        player.id.clone(),
        player.level.max(1) as u32,
        player.lives.clamp(0, 3) as u32,
    );
    let mut level_guesses: Vec<String> = Vec::new();

    print_level(&run);

    loop {
        let line = prompt("Palpite: ")?;
        match run.submit_guess(&line) {
            GuessOutcome::Rejected(reason) => match reason {
                GuessRejection::NotANumber => println!("🚫 Digite um número válido!"),
                GuessRejection::OutOfRange { min, max } => {
                    println!("🚫 Número inválido! Escolha entre {min} e {max}.")
                }
                GuessRejection::AlreadyTried => println!("⚠️ Você já tentou esse número!"),
                GuessRejection::RoundClosed => println!("⏳ Aguarde a próxima rodada."),
            },
            GuessOutcome::Hint {
                direction,
                remaining,
            } => {
                level_guesses.push(line);
                match direction {
                    HintDirection::TooLow => println!("🔻 Chutou baixo! Tenta mais alto."),
                    HintDirection::TooHigh => println!("🔺 Chutou alto! Tenta mais baixo."),
                }
                println!("🎯 Tentativas restantes: {remaining}");
                println!("📜 Palpites anteriores: {}", level_guesses.join(", "));
            }
            GuessOutcome::Won { secret, next_level } => {
                level_guesses.push(line);
                println!("🎉 Acertou! O número era {secret}. Vamos para o nível {next_level}...");
                persist_progress(client, &run).await;
                persist_history(client, &run.player, &level_guesses).await;
                level_guesses.clear();
                show_ranking(client).await;
                print_level(&run);
            }
            GuessOutcome::LifeLost { secret, lives_left } => {
                level_guesses.push(line);
                println!("💔 O número secreto era {secret}. Vidas restantes: {lives_left}");
                persist_progress(client, &run).await;
                persist_history(client, &run.player, &level_guesses).await;
                level_guesses.clear();
                prompt("Pressione Enter para continuar...")?;
                run.resume_level();
                print_level(&run);
            }
            GuessOutcome::GameOver { secret } => {
                level_guesses.clear();
                println!("💀 Game Over! O número era {secret}.");
                let again = prompt("Jogar novamente? (s/n): ")?;
                if !again.eq_ignore_ascii_case("s") {
                    println!("👋 Até a próxima!");
                    return Ok(());
                }
                if let Err(err) = client.reset_progress(&run.player).await {
                    warn!("não foi possível reiniciar o nível no servidor: {err:#}");
                }
                run.restart();
                print_level(&run);
            }
            GuessOutcome::FinalVictory { secret } => {
                println!("👑 Você zerou o jogo! O número era {secret}.");
                persist_progress(client, &run).await;
                show_ranking(client).await;
                return Ok(());
            }
        }
    }
}

// In-game persistence is best-effort: a flaky backend must never stop the run.

async fn persist_progress(client: &ApiClient, run: &GameRun) {
    if let Err(err) = client
        .update_progress(&run.player, run.level as i32, run.lives as i32)
        .await
    {
        warn!("não foi possível salvar o progresso: {err:#}");
    }
}

async fn persist_history(client: &ApiClient, id: &str, history: &[String]) {
    if let Err(err) = client.save_history(id, history).await {
        warn!("não foi possível salvar o histórico: {err:#}");
    }
}

async fn show_ranking(client: &ApiClient) {
    match client.ranking().await {
        Ok(ranking) => print_ranking(&ranking),
        Err(err) => warn!("não foi possível carregar o ranking: {err:#}"),
    }
}
