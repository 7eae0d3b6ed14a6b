use std::collections::HashSet;

/// A ship control the simulation understands.
///
/// The simulation consumes actions, never raw key events; key bindings live in
/// whatever window layer feeds an [`InputSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Thrust,
    RotateLeft,
    RotateRight,
    ToggleDebug,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::Thrust,
        Action::RotateLeft,
        Action::RotateRight,
        Action::ToggleDebug,
    ];
}

/// Anything that can answer "is this action held / was it just pressed".
pub trait InputSource {
    fn is_held(&self, action: Action) -> bool;

    /// True only on the frame the action went down.
    fn just_pressed(&self, action: Action) -> bool;
}

/// Held and pressed-this-frame action sets, fed by press/release events.
#[derive(Debug, Clone, Default)]
pub struct ActionState {
    held: HashSet<Action>,
    pressed: HashSet<Action>,
}

impl ActionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: Action) {
        // Key repeat delivers presses for an already held key; only the first counts.
        if self.held.insert(action) {
            self.pressed.insert(action);
            tracing::trace!(?action, "action pressed");
        }
    }

    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    /// Forget "just pressed" edges once a tick has consumed them.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }
}

impl InputSource for ActionState {
    fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    fn just_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }
}

/// Controls sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlState {
    pub thrust: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub toggle_debug: bool,
}

impl ControlState {
    pub fn sample<S: InputSource + ?Sized>(source: &S) -> Self {
        Self {
            thrust: source.is_held(Action::Thrust),
            rotate_left: source.is_held(Action::RotateLeft),
            rotate_right: source.is_held(Action::RotateRight),
            toggle_debug: source.just_pressed(Action::ToggleDebug),
        }
    }
}
