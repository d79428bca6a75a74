use bounce_core::playground::HeldKeys;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Arrow keys and WASD, as reported by the key event's display name.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Self::Up),
            "ArrowDown" | "s" | "S" => Some(Self::Down),
            "ArrowLeft" | "a" | "A" => Some(Self::Left),
            "ArrowRight" | "d" | "D" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Update the held set for a key press or release. Unknown keys change nothing.
#[must_use]
pub fn apply_key(mut keys: HeldKeys, key: &str, pressed: bool) -> HeldKeys {
    match Direction::from_key(key) {
        Some(Direction::Up) => keys.up = pressed,
        Some(Direction::Down) => keys.down = pressed,
        Some(Direction::Left) => keys.left = pressed,
        Some(Direction::Right) => keys.right = pressed,
        None => {}
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_track_held_keys() {
        let keys = apply_key(HeldKeys::default(), "ArrowRight", true);
        let keys = apply_key(keys, "w", true);
        assert!(keys.right && keys.up);

        let keys = apply_key(keys, "ArrowRight", false);
        assert!(!keys.right && keys.up);
        assert_eq!(apply_key(keys, "Enter", true), keys);
    }
}
