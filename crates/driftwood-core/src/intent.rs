use serde::{Deserialize, Serialize};

/// Per-tick input snapshot produced by the input collaborator.
///
/// Flags describe keys held during the tick; the simulation decides what a
/// held key means (e.g. a held jump re-arms the wall-jump lockout).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Intent {
    pub move_left: bool,
    pub move_right: bool,
    pub move_down: bool,
    pub jump: bool,
    pub attack: bool,
}

impl Intent {
    /// Horizontal intent in {-1, 0, 1}. Opposing keys cancel out.
    pub fn horizontal(&self) -> f32 {
        match (self.move_left, self.move_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    pub fn right() -> Self {
        Self {
            move_right: true,
            ..Default::default()
        }
    }

    pub fn left() -> Self {
        Self {
            move_left: true,
            ..Default::default()
        }
    }

    pub fn jump() -> Self {
        Self {
            jump: true,
            ..Default::default()
        }
    }

    pub fn down() -> Self {
        Self {
            move_down: true,
            ..Default::default()
        }
    }

    pub fn attack() -> Self {
        Self {
            attack: true,
            ..Default::default()
        }
    }
}
