use game_types::HintDirection;

/// State transitions surface as events so the presentation layer can drive
/// its animation loops (confetti, hearts, trophies) without reaching into
/// the session itself.
#[derive(Debug, Clone)]
pub enum RunEvent {
    LevelStarted {
        level: u32,
        range_max: u32,
        attempts: u32,
    },
    HintGiven {
        direction: HintDirection,
        remaining: u32,
    },
    LevelWon {
        level: u32,
        secret: u32,
    },
    LifeLost {
        lives_left: u32,
        secret: u32,
    },
    RunEnded {
        secret: u32,
    },
    FinalVictory {
        secret: u32,
    },
}

/// Event handler trait for processing run events
pub trait RunEventHandler {
    fn handle_event(&mut self, event: RunEvent);
}

/// Simple event bus for distributing run events
pub struct RunEventBus {
    handlers: Vec<Box<dyn RunEventHandler>>,
}

impl RunEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn RunEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: RunEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for RunEventBus {
    fn default() -> Self {
        Self::new()
    }
}
