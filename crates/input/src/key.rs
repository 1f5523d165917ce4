use serde::{Deserialize, Serialize};

/// Keys tracked by [`crate::InputState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    Escape,
    Backspace,
    Tab,
    Shift,
    Ctrl,
    Alt,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

impl Key {
    /// Map a virtual-key code (ASCII letters/digits, common control codes
    /// and 112..=123 for F1..F12) to a key.
    #[rustfmt::skip]
    pub fn from_code(code: u32) -> Option<Key> {
        const LETTERS: [Key; 26] = [
            Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
            Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
            Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
        ];
        const DIGITS: [Key; 10] = [
            Key::Num0, Key::Num1, Key::Num2, Key::Num3, Key::Num4,
            Key::Num5, Key::Num6, Key::Num7, Key::Num8, Key::Num9,
        ];
        const FUNCTION: [Key; 12] = [
            Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6,
            Key::F7, Key::F8, Key::F9, Key::F10, Key::F11, Key::F12,
        ];

        match code {
            65..=90 => Some(LETTERS[(code - 65) as usize]),
            48..=57 => Some(DIGITS[(code - 48) as usize]),
            112..=123 => Some(FUNCTION[(code - 112) as usize]),
            8 => Some(Key::Backspace),
            9 => Some(Key::Tab),
            10 => Some(Key::Enter),
            16 => Some(Key::Shift),
            17 => Some(Key::Ctrl),
            18 => Some(Key::Alt),
            27 => Some(Key::Escape),
            32 => Some(Key::Space),
            37 => Some(Key::ArrowLeft),
            38 => Some(Key::ArrowUp),
            39 => Some(Key::ArrowRight),
            40 => Some(Key::ArrowDown),
            _ => None,
        }
    }
}

/// Mouse buttons tracked by [`crate::InputState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits() {
        assert_eq!(Key::from_code(65), Some(Key::A));
        assert_eq!(Key::from_code(90), Some(Key::Z));
        assert_eq!(Key::from_code(48), Some(Key::Num0));
        assert_eq!(Key::from_code(57), Some(Key::Num9));
    }

    #[test]
    fn control_and_function_keys() {
        assert_eq!(Key::from_code(32), Some(Key::Space));
        assert_eq!(Key::from_code(38), Some(Key::ArrowUp));
        assert_eq!(Key::from_code(112), Some(Key::F1));
        assert_eq!(Key::from_code(123), Some(Key::F12));
    }

    #[test]
    fn unknown_code() {
        assert_eq!(Key::from_code(0), None);
        assert_eq!(Key::from_code(500), None);
    }
}
