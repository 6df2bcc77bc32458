use game_core::{GameRun, GuessSession, MIN_GUESS};

pub fn run_with_secret(level: u32, lives: u32, secret: u32) -> GameRun {
    let mut run = GameRun::new("TestPlayer", level, lives);
    run.session = GuessSession::with_secret(level, secret);
    run
}

/// Pin the current level's secret so a scripted guess can hit it.
pub fn fix_secret(run: &mut GameRun, secret: u32) {
    run.session = GuessSession::with_secret(run.level, secret);
}

/// Submit wrong guesses until the level's budget is spent, returning the
/// final outcome (a lost life or the end of the run).
pub fn lose_level(run: &mut GameRun) -> game_types::GuessOutcome {
    let secret = run.session.secret;
    let mut outcome = run.submit_guess("not-a-number");
    let mut candidate = MIN_GUESS;
    for _ in 0..run.session.attempts_allowed {
        while candidate == secret || run.session.guesses.contains(&i64::from(candidate)) {
            candidate += 1;
        }
        outcome = run.submit_guess(&candidate.to_string());
    }
    outcome
}
