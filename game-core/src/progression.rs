use rand::Rng;

/// Highest playable level; clearing it ends the run.
pub const MAX_LEVEL: u32 = 10;
/// Lives at the start of a fresh run.
pub const STARTING_LIVES: u32 = 3;
/// Lower bound of every guessing range.
pub const MIN_GUESS: u32 = 1;

/// Upper bound of the guessable range for a level.
///
/// Levels 1-5 grow by twenties, 6-9 by hundreds, and everything from
/// level 10 up plays on the full 1..=1000 range.
pub fn range_max(level: u32) -> u32 {
    if level <= 5 {
        level * 20
    } else if level <= 9 {
        level * 100
    } else {
        1000
    }
}

/// Guesses allowed per level: `ceil(log2(max - min + 1))`, the binary-search
/// bound for pinning down one of the possible values. A player guessing
/// optimally always has exactly enough attempts, never a spare one.
pub fn attempt_budget(min: u32, max: u32) -> u32 {
    let span = max.saturating_sub(min) + 1;
    span.next_power_of_two().trailing_zeros()
}

/// Uniform random secret in `[min, max]` inclusive.
pub fn secret_number(min: u32, max: u32) -> u32 {
    rand::thread_rng().gen_range(min..=max)
}
