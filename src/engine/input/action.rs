// Game action, axis and player slot definitions

use std::fmt;

/// Local player slot. The arena supports exactly two local players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    /// Both slots, in scan order
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    /// Zero-based index (P1 = 0, P2 = 1)
    pub fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    /// The opposing slot
    pub fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Short tag used in logs and HUD text ("P1", "P2")
    pub fn tag(self) -> &'static str {
        match self {
            Self::One => "P1",
            Self::Two => "P2",
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Represents all discrete in-game actions (buttons)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Jump,
    Attack,
    Crouch,
    Throw,
    /// Toggle the held item in and out of the hand
    SelectItem,
}

impl Action {
    /// Button name as exposed by the host's input map
    pub fn name(self) -> &'static str {
        match self {
            Self::Jump => "Jump",
            Self::Attack => "Attack",
            Self::Crouch => "Crouch",
            Self::Throw => "Throw",
            Self::SelectItem => "MushroomSelection",
        }
    }
}

/// Continuous per-player input axes, each in -1.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Strafe left/right
    MoveX,
    /// Forward/backward
    MoveY,
    /// Turn left/right
    LookX,
}

impl Axis {
    /// Axis name as exposed by the host's input map
    pub fn name(self) -> &'static str {
        match self {
            Self::MoveX => "Horizontal",
            Self::MoveY => "Vertical",
            Self::LookX => "Mouse X",
        }
    }
}
