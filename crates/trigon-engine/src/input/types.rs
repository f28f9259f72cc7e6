/// Keyboard key identifier.
///
/// Only keys the application binds get a variant; everything else keeps its
/// platform code in `Key::Unknown`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Unknown(u32),
}

/// Key transition state.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-agnostic input event consumed by `InputState`.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Window focus changed.
    Focused(bool),

    Key {
        key: Key,
        state: KeyState,
        /// True for OS auto-repeat.
        repeat: bool,
    },
}
