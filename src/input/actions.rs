//! Game action definitions
//!
//! Keyboard/mouse layout of the prototype:
//! - WASD = move
//! - Left Shift = run
//! - Left mouse = grab a card / swing / cast on release
//! - Right mouse = drop a held card

/// All actions the simulation reads from the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (WASD)
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    // Modifier
    Run,            // Left Shift - 1.5x player speed while held

    // Pointer
    PrimaryClick,   // LMB
    SecondaryClick, // RMB
}

impl Action {
    pub const COUNT: usize = 7;

    pub const ALL: [Action; Self::COUNT] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Run,
        Action::PrimaryClick,
        Action::SecondaryClick,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// A set of actions, one flag per action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSet([bool; Action::COUNT]);

impl ActionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, action: Action) -> Self {
        self.insert(action);
        self
    }

    pub fn insert(&mut self, action: Action) {
        self.0[action.index()] = true;
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0[action.index()]
    }

    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(|&held| held)
    }
}
