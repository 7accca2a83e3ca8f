/// Control values the player reads once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// Raw horizontal axis in `[-1, 1]`.
    pub horizontal: f32,
    /// Smoothed vertical axis in `[-1, 1]`.
    pub vertical: f32,
    /// Jump went down this tick.
    pub jump_pressed: bool,
    /// Punch went down this tick.
    pub punch_pressed: bool,
}

impl PlayerInput {
    /// Hold the horizontal axis.
    #[must_use]
    pub fn walking(horizontal: f32) -> Self {
        Self {
            horizontal,
            ..Self::default()
        }
    }

    /// Hold the vertical axis.
    #[must_use]
    pub fn climbing(vertical: f32) -> Self {
        Self {
            vertical,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn jump() -> Self {
        Self {
            jump_pressed: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn punch() -> Self {
        Self {
            punch_pressed: true,
            ..Self::default()
        }
    }
}
