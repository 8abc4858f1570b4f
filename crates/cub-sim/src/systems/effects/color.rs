//! Particle tint, packed as 0xRRGGBBAA.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xFFFFFFFF);
    /// Sand dust (persistent marker).
    pub const SAND: Color = Color(0xD97706FF);
    /// Cave dust (persistent marker).
    pub const ROCK_DUST: Color = Color(0x525252FF);

    pub const BUBBLE: Color = Color(0xFFFFFF66);
    pub const SPEED_LINE: Color = Color(0xFFFFFF33);

    pub const EMBER_RED: Color = Color(0xEF4444FF);
    pub const EMBER_AMBER: Color = Color(0xF59E0BFF);
    pub const HEART: Color = Color(0xF472B6FF);
    pub const SAND_WALL: Color = Color(0xF59E0BFF);

    /// Opaque colors that mark long-lived ambient particles.
    const PERSISTENT: [Color; 3] = [Color::WHITE, Color::SAND, Color::ROCK_DUST];

    pub fn alpha(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Ambient markers do not decay: any translucent tint, or one of the
    /// persistent opaque markers (snow, sand, rock dust).
    pub fn is_ambient(self) -> bool {
        self.alpha() < 0xFF || Self::PERSISTENT.contains(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translucent_tints_are_ambient() {
        assert!(Color::BUBBLE.is_ambient());
        assert!(Color::SPEED_LINE.is_ambient());
    }

    #[test]
    fn snow_is_ambient_but_sparks_fade() {
        assert!(Color::WHITE.is_ambient());
        assert!(!Color::EMBER_RED.is_ambient());
        assert!(!Color::HEART.is_ambient());
    }
}
