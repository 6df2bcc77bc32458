use game_types::{GuessOutcome, GuessRejection, HintDirection, RunPhase};
use tracing::debug;

use crate::progression::{MAX_LEVEL, MIN_GUESS, STARTING_LIVES, attempt_budget, range_max, secret_number};
use crate::run_events::{RunEvent, RunEventBus};

/// One level's worth of guessing: the secret, the attempt budget derived
/// from the level's range, and every distinct number tried so far.
#[derive(Debug)]
pub struct GuessSession {
    pub level: u32,
    pub secret: u32,
    pub attempts_allowed: u32,
    pub guesses: Vec<i64>,
}

impl GuessSession {
    pub fn start(level: u32) -> Self {
        let max = range_max(level);
        Self::with_secret(level, secret_number(MIN_GUESS, max))
    }

    /// Session with a predetermined secret. The normal entry point is
    /// [`GuessSession::start`].
    pub fn with_secret(level: u32, secret: u32) -> Self {
        Self {
            level,
            secret,
            attempts_allowed: attempt_budget(MIN_GUESS, range_max(level)),
            guesses: Vec::new(),
        }
    }

    pub fn remaining(&self) -> u32 {
        self.attempts_allowed.saturating_sub(self.guesses.len() as u32)
    }
}

/// A player's run across levels: current level, remaining lives, and the
/// live [`GuessSession`]. Outcomes that change level or lives are the
/// caller's cue to persist progress; the run itself never touches I/O.
pub struct GameRun {
    pub player: String,
    pub level: u32,
    pub lives: u32,
    pub phase: RunPhase,
    pub session: GuessSession,
    pub events: RunEventBus,
}

impl GameRun {
    pub fn new(player: impl Into<String>, level: u32, lives: u32) -> Self {
        let level = level.max(1);
        Self {
            player: player.into(),
            level,
            lives,
            phase: RunPhase::Playing,
            session: GuessSession::start(level),
            events: RunEventBus::new(),
        }
    }

    fn start_level(&mut self, level: u32) {
        self.level = level;
        self.session = GuessSession::start(level);
        self.events.publish(RunEvent::LevelStarted {
            level,
            range_max: range_max(level),
            attempts: self.session.attempts_allowed,
        });
    }

    /// Feed one raw guess through the state machine.
    ///
    /// Unparseable, out-of-range, and repeated inputs bounce back without
    /// consuming an attempt. A wrong guess on the last attempt costs a life;
    /// losing the last life ends the run and resets the level to 1.
    pub fn submit_guess(&mut self, raw: &str) -> GuessOutcome {
        if self.phase != RunPhase::Playing {
            return GuessOutcome::Rejected(GuessRejection::RoundClosed);
        }

        let Ok(guess) = raw.trim().parse::<i64>() else {
            return GuessOutcome::Rejected(GuessRejection::NotANumber);
        };

        let max = range_max(self.session.level);
        if guess < i64::from(MIN_GUESS) || guess > i64::from(max) {
            return GuessOutcome::Rejected(GuessRejection::OutOfRange {
                min: MIN_GUESS,
                max,
            });
        }

        if self.session.guesses.contains(&guess) {
            return GuessOutcome::Rejected(GuessRejection::AlreadyTried);
        }

        self.session.guesses.push(guess);
        let remaining = self.session.remaining();

        if guess == i64::from(self.session.secret) {
            let secret = self.session.secret;
            let next_level = self.session.level + 1;

            if next_level > MAX_LEVEL {
                self.level = next_level;
                self.phase = RunPhase::FinalVictory;
                debug!(player = %self.player, secret, "final level cleared");
                self.events.publish(RunEvent::FinalVictory { secret });
                return GuessOutcome::FinalVictory { secret };
            }

            debug!(player = %self.player, next_level, "level cleared");
            self.events.publish(RunEvent::LevelWon {
                level: self.session.level,
                secret,
            });
            self.start_level(next_level);
            return GuessOutcome::Won { secret, next_level };
        }

        if remaining == 0 {
            let secret = self.session.secret;
            self.lives = self.lives.saturating_sub(1);

            if self.lives == 0 {
                self.level = 1;
                self.phase = RunPhase::GameOver;
                debug!(player = %self.player, secret, "run ended");
                self.events.publish(RunEvent::RunEnded { secret });
                return GuessOutcome::GameOver { secret };
            }

            self.phase = RunPhase::LifeLost;
            debug!(player = %self.player, lives_left = self.lives, "life lost");
            self.events.publish(RunEvent::LifeLost {
                lives_left: self.lives,
                secret,
            });
            return GuessOutcome::LifeLost {
                secret,
                lives_left: self.lives,
            };
        }

        let direction = if guess < i64::from(self.session.secret) {
            HintDirection::TooLow
        } else {
            HintDirection::TooHigh
        };
        self.events.publish(RunEvent::HintGiven {
            direction,
            remaining,
        });
        GuessOutcome::Hint {
            direction,
            remaining,
        }
    }

    /// Retry the current level with a fresh secret after a lost life.
    pub fn resume_level(&mut self) {
        if self.phase == RunPhase::LifeLost {
            self.phase = RunPhase::Playing;
            self.start_level(self.level);
        }
    }

    /// Full reset back to level 1 with fresh lives.
    pub fn restart(&mut self) {
        self.phase = RunPhase::Playing;
        self.lives = STARTING_LIVES;
        self.start_level(1);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::run_events::RunEventHandler;

    fn run_with_secret(level: u32, lives: u32, secret: u32) -> GameRun {
        let mut run = GameRun::new("tester", level, lives);
        run.session = GuessSession::with_secret(level, secret);
        run
    }

    /// Burn every attempt of the current level without hitting the secret.
    fn exhaust_attempts(run: &mut GameRun) -> GuessOutcome {
        let secret = run.session.secret;
        let mut outcome = GuessOutcome::Rejected(GuessRejection::RoundClosed);
        let mut candidate = MIN_GUESS;
        for _ in 0..run.session.attempts_allowed {
            while candidate == secret || run.session.guesses.contains(&i64::from(candidate)) {
                candidate += 1;
            }
            outcome = run.submit_guess(&candidate.to_string());
        }
        outcome
    }

    struct Recorder(Arc<Mutex<Vec<RunEvent>>>);

    impl RunEventHandler for Recorder {
        fn handle_event(&mut self, event: RunEvent) {
            self.0.lock().unwrap().push(event);
        }
    }

    #[test]
    fn test_invalid_input_costs_nothing() {
        let mut run = run_with_secret(1, 3, 7);
        assert_eq!(
            run.submit_guess("abc"),
            GuessOutcome::Rejected(GuessRejection::NotANumber)
        );
        assert_eq!(
            run.submit_guess(""),
            GuessOutcome::Rejected(GuessRejection::NotANumber)
        );
        assert!(run.session.guesses.is_empty());
        assert_eq!(run.session.remaining(), 5);
    }

    #[test]
    fn test_out_of_range_costs_nothing() {
        let mut run = run_with_secret(1, 3, 7);
        assert_eq!(
            run.submit_guess("0"),
            GuessOutcome::Rejected(GuessRejection::OutOfRange { min: 1, max: 20 })
        );
        assert_eq!(
            run.submit_guess("21"),
            GuessOutcome::Rejected(GuessRejection::OutOfRange { min: 1, max: 20 })
        );
        assert!(run.session.guesses.is_empty());
    }

    #[test]
    fn test_duplicate_guess_costs_nothing() {
        let mut run = run_with_secret(1, 3, 7);
        run.submit_guess("3");
        assert_eq!(run.session.remaining(), 4);
        assert_eq!(
            run.submit_guess("3"),
            GuessOutcome::Rejected(GuessRejection::AlreadyTried)
        );
        assert_eq!(run.session.remaining(), 4);
    }

    #[test]
    fn test_hints_point_at_the_secret() {
        let mut run = run_with_secret(1, 3, 10);
        assert_eq!(
            run.submit_guess("4"),
            GuessOutcome::Hint {
                direction: HintDirection::TooLow,
                remaining: 4
            }
        );
        assert_eq!(
            run.submit_guess("15"),
            GuessOutcome::Hint {
                direction: HintDirection::TooHigh,
                remaining: 3
            }
        );
        assert_eq!(run.phase, RunPhase::Playing);
    }

    #[test]
    fn test_correct_guess_advances_level() {
        let mut run = run_with_secret(1, 3, 7);
        assert_eq!(
            run.submit_guess("7"),
            GuessOutcome::Won {
                secret: 7,
                next_level: 2
            }
        );
        assert_eq!(run.level, 2);
        assert_eq!(run.session.level, 2);
        assert!(run.session.guesses.is_empty());
        assert_eq!(run.lives, 3);
    }

    #[test]
    fn test_exhausting_attempts_costs_exactly_one_life() {
        let mut run = run_with_secret(1, 3, 20);
        let outcome = exhaust_attempts(&mut run);
        assert_eq!(
            outcome,
            GuessOutcome::LifeLost {
                secret: 20,
                lives_left: 2
            }
        );
        assert_eq!(run.lives, 2);
        assert_eq!(run.phase, RunPhase::LifeLost);
        // Level unchanged; resume deals a fresh secret for the same level.
        assert_eq!(run.level, 1);
        run.resume_level();
        assert_eq!(run.phase, RunPhase::Playing);
        assert_eq!(run.session.level, 1);
        assert!(run.session.guesses.is_empty());
    }

    #[test]
    fn test_guesses_ignored_until_level_resumes() {
        let mut run = run_with_secret(1, 3, 20);
        exhaust_attempts(&mut run);
        assert_eq!(
            run.submit_guess("5"),
            GuessOutcome::Rejected(GuessRejection::RoundClosed)
        );
    }

    #[test]
    fn test_losing_last_life_ends_the_run() {
        let mut run = run_with_secret(4, 1, 80);
        let outcome = exhaust_attempts(&mut run);
        assert_eq!(outcome, GuessOutcome::GameOver { secret: 80 });
        assert_eq!(run.lives, 0);
        assert_eq!(run.level, 1);
        assert_eq!(run.phase, RunPhase::GameOver);

        // Only an explicit restart reopens play.
        assert_eq!(
            run.submit_guess("1"),
            GuessOutcome::Rejected(GuessRejection::RoundClosed)
        );
        run.restart();
        assert_eq!(run.phase, RunPhase::Playing);
        assert_eq!(run.level, 1);
        assert_eq!(run.lives, STARTING_LIVES);
    }

    #[test]
    fn test_clearing_level_ten_is_final_victory() {
        let mut run = run_with_secret(10, 2, 512);
        assert_eq!(
            run.submit_guess("512"),
            GuessOutcome::FinalVictory { secret: 512 }
        );
        assert_eq!(run.phase, RunPhase::FinalVictory);
        assert_eq!(run.level, 11);
    }

    #[test]
    fn test_budget_matches_level_range() {
        let run = GameRun::new("tester", 1, 3);
        assert_eq!(run.session.attempts_allowed, 5);
        let run = GameRun::new("tester", 10, 3);
        assert_eq!(run.session.attempts_allowed, 10);
    }

    #[test]
    fn test_events_track_transitions() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut run = run_with_secret(1, 3, 7);
        run.events.add_handler(Box::new(Recorder(seen.clone())));

        run.submit_guess("3");
        run.submit_guess("7");

        let events = seen.lock().unwrap();
        assert!(matches!(events[0], RunEvent::HintGiven { .. }));
        assert!(matches!(events[1], RunEvent::LevelWon { level: 1, secret: 7 }));
        assert!(matches!(events[2], RunEvent::LevelStarted { level: 2, .. }));
    }
}
