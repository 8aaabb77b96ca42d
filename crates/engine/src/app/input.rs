use crate::grid::Facing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
}

const ACTION_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    interact_pressed: bool,
    actions: ActionStates,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Edge-triggered: true only on the frame the interact key went down.
    pub fn interact_pressed(&self) -> bool {
        self.interact_pressed
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_interact_pressed(mut self, interact_pressed: bool) -> Self {
        self.interact_pressed = interact_pressed;
        self
    }

    pub fn with_quit_requested(mut self, quit_requested: bool) -> Self {
        self.quit_requested = quit_requested;
        self
    }

    /// Resolve held directions to a single desired facing. Fixed priority:
    /// up, down, left, right.
    pub fn desired_facing(&self) -> Option<Facing> {
        if self.is_down(InputAction::MoveUp) {
            Some(Facing::Up)
        } else if self.is_down(InputAction::MoveDown) {
            Some(Facing::Down)
        } else if self.is_down(InputAction::MoveLeft) {
            Some(Facing::Left)
        } else if self.is_down(InputAction::MoveRight) {
            Some(Facing::Right)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desired_facing_resolves_with_fixed_priority() {
        let snapshot = InputSnapshot::empty()
            .with_action_down(InputAction::MoveDown, true)
            .with_action_down(InputAction::MoveRight, true);
        assert_eq!(snapshot.desired_facing(), Some(Facing::Down));

        let all = InputSnapshot::empty()
            .with_action_down(InputAction::MoveUp, true)
            .with_action_down(InputAction::MoveDown, true)
            .with_action_down(InputAction::MoveLeft, true)
            .with_action_down(InputAction::MoveRight, true);
        assert_eq!(all.desired_facing(), Some(Facing::Up));

        assert_eq!(InputSnapshot::empty().desired_facing(), None);
    }

    #[test]
    fn builders_do_not_leak_into_other_flags() {
        let snapshot = InputSnapshot::empty().with_interact_pressed(true);
        assert!(snapshot.interact_pressed());
        assert!(!snapshot.quit_requested());
        assert_eq!(snapshot.desired_facing(), None);
    }
}
