/// Normalized per-tick intent, merged upstream from keyboard, touch and gamepad.
/// Read-only to the simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    /// Jump in platform levels, swim/fly up in free-fly levels.
    pub jump: bool,
    pub down: bool,
    pub fire: bool,
}

impl InputSnapshot {
    pub const LEFT: u32 = 1 << 0;
    pub const RIGHT: u32 = 1 << 1;
    pub const JUMP: u32 = 1 << 2;
    pub const DOWN: u32 = 1 << 3;
    pub const FIRE: u32 = 1 << 4;

    pub const IDLE: InputSnapshot =
        InputSnapshot { left: false, right: false, jump: false, down: false, fire: false };

    /// Decode the bitmask hosts send across the bridge.
    pub fn from_bits(bits: u32) -> Self {
        Self {
            left: bits & Self::LEFT != 0,
            right: bits & Self::RIGHT != 0,
            jump: bits & Self::JUMP != 0,
            down: bits & Self::DOWN != 0,
            fire: bits & Self::FIRE != 0,
        }
    }

    pub fn bits(&self) -> u32 {
        let mut bits = 0;
        if self.left {
            bits |= Self::LEFT;
        }
        if self.right {
            bits |= Self::RIGHT;
        }
        if self.jump {
            bits |= Self::JUMP;
        }
        if self.down {
            bits |= Self::DOWN;
        }
        if self.fire {
            bits |= Self::FIRE;
        }
        bits
    }

    // -- Builder pattern --

    pub fn with_left(mut self) -> Self {
        self.left = true;
        self
    }

    pub fn with_right(mut self) -> Self {
        self.right = true;
        self
    }

    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }

    pub fn with_down(mut self) -> Self {
        self.down = true;
        self
    }

    pub fn with_fire(mut self) -> Self {
        self.fire = true;
        self
    }

    /// -1, 0 or 1. Left wins when both are held.
    pub fn horizontal(&self) -> f32 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }
}
