use super::audio::AudioSink;
use super::input::InputSnapshot;
use crate::grid::{Facing, TileLayerError, TilePoint, Vec2, WorldObjectError};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKey {
    Overworld,
    Interior,
}

/// Where the player reappears outdoors after leaving an interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnSpawn {
    pub tile: TilePoint,
    pub facing: Facing,
}

/// Data handed to the next scene on a switch. Scenes share nothing else;
/// everything a successor needs travels in the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenePayload {
    EnterInterior {
        interior_id: String,
        return_to: ReturnSpawn,
    },
    ReturnOutside {
        spawn: TilePoint,
        facing: Facing,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    SwitchTo {
        key: SceneKey,
        payload: ScenePayload,
    },
    Quit,
}

#[derive(Debug, Error)]
pub enum SceneLoadError {
    #[error(transparent)]
    Layer(#[from] TileLayerError),
    #[error(transparent)]
    Objects(#[from] WorldObjectError),
    #[error("placement document is not valid JSON: {0}")]
    BadDocument(#[from] serde_json::Error),
    #[error("scene expects a {expected} payload")]
    MissingPayload { expected: &'static str },
    #[error("unknown interior '{0}'")]
    UnknownInterior(String),
}

/// Everything a renderer needs to draw one actor: continuous position,
/// facing for sprite selection, and the derived draw depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorSnapshot {
    pub position_px: Vec2,
    pub facing: Facing,
    pub depth: i32,
}

/// A scene is torn down and fully rebuilt on every entry. `load` receives
/// the payload of the switch that entered it (`None` for the initial scene)
/// and must fail rather than limp on missing or invalid world data.
pub trait Scene {
    fn load(
        &mut self,
        payload: Option<ScenePayload>,
        audio: &mut dyn AudioSink,
    ) -> Result<(), SceneLoadError>;
    fn update(
        &mut self,
        delta_ms: f32,
        input: &InputSnapshot,
        audio: &mut dyn AudioSink,
    ) -> SceneCommand;
    fn unload(&mut self);
    fn actors(&self) -> Vec<ActorSnapshot> {
        Vec::new()
    }
    fn debug_title(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneStatus {
    Running,
    Switched(SceneKey),
    QuitRequested,
}

struct SceneRuntime {
    scene: Box<dyn Scene>,
    is_loaded: bool,
}

pub struct SceneMachine {
    overworld: SceneRuntime,
    interior: SceneRuntime,
    active_scene: SceneKey,
}

impl SceneMachine {
    pub fn new(overworld: Box<dyn Scene>, interior: Box<dyn Scene>) -> Self {
        Self {
            overworld: SceneRuntime {
                scene: overworld,
                is_loaded: false,
            },
            interior: SceneRuntime {
                scene: interior,
                is_loaded: false,
            },
            active_scene: SceneKey::Overworld,
        }
    }

    pub fn active_scene(&self) -> SceneKey {
        self.active_scene
    }

    pub fn load_active(&mut self, audio: &mut dyn AudioSink) -> Result<(), SceneLoadError> {
        let runtime = self.runtime_mut(self.active_scene);
        if runtime.is_loaded {
            return Ok(());
        }
        runtime.scene.load(None, audio)?;
        runtime.is_loaded = true;
        Ok(())
    }

    pub fn update_active(
        &mut self,
        delta_ms: f32,
        input: &InputSnapshot,
        audio: &mut dyn AudioSink,
    ) -> Result<SceneStatus, SceneLoadError> {
        let command = self
            .runtime_mut(self.active_scene)
            .scene
            .update(delta_ms, input, audio);
        match command {
            SceneCommand::None => Ok(SceneStatus::Running),
            SceneCommand::Quit => Ok(SceneStatus::QuitRequested),
            SceneCommand::SwitchTo { key, payload } => {
                self.switch_to(key, payload, audio)?;
                Ok(SceneStatus::Switched(key))
            }
        }
    }

    pub fn actors_active(&self) -> Vec<ActorSnapshot> {
        self.runtime_ref(self.active_scene).scene.actors()
    }

    pub fn debug_title_active(&self) -> Option<String> {
        self.runtime_ref(self.active_scene).scene.debug_title()
    }

    pub fn shutdown_all(&mut self) {
        for runtime in [&mut self.overworld, &mut self.interior] {
            if runtime.is_loaded {
                runtime.scene.unload();
                runtime.is_loaded = false;
            }
        }
    }

    /// Unload the current scene, then rebuild the target from its payload.
    /// The outgoing scene is dead before the target loads, so nothing of it
    /// can leak into (or mutate) its successor.
    fn switch_to(
        &mut self,
        next_scene: SceneKey,
        payload: ScenePayload,
        audio: &mut dyn AudioSink,
    ) -> Result<(), SceneLoadError> {
        let from = self.active_scene;
        let current = self.runtime_mut(from);
        if current.is_loaded {
            current.scene.unload();
            current.is_loaded = false;
        }

        let target = self.runtime_mut(next_scene);
        target.scene.load(Some(payload), audio)?;
        target.is_loaded = true;
        self.active_scene = next_scene;
        info!(from = ?from, to = ?next_scene, "scene_switched");
        Ok(())
    }

    fn runtime_mut(&mut self, key: SceneKey) -> &mut SceneRuntime {
        match key {
            SceneKey::Overworld => &mut self.overworld,
            SceneKey::Interior => &mut self.interior,
        }
    }

    fn runtime_ref(&self, key: SceneKey) -> &SceneRuntime {
        match key {
            SceneKey::Overworld => &self.overworld,
            SceneKey::Interior => &self.interior,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::audio::NullAudio;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    enum ProbeEvent {
        Loaded(SceneKey, Option<ScenePayload>),
        Unloaded(SceneKey),
    }

    struct ProbeScene {
        key: SceneKey,
        next_command: SceneCommand,
        events: Rc<RefCell<Vec<ProbeEvent>>>,
    }

    impl Scene for ProbeScene {
        fn load(
            &mut self,
            payload: Option<ScenePayload>,
            _audio: &mut dyn AudioSink,
        ) -> Result<(), SceneLoadError> {
            self.events
                .borrow_mut()
                .push(ProbeEvent::Loaded(self.key, payload));
            Ok(())
        }

        fn update(
            &mut self,
            _delta_ms: f32,
            _input: &InputSnapshot,
            _audio: &mut dyn AudioSink,
        ) -> SceneCommand {
            std::mem::replace(&mut self.next_command, SceneCommand::None)
        }

        fn unload(&mut self) {
            self.events
                .borrow_mut()
                .push(ProbeEvent::Unloaded(self.key));
        }
    }

    fn probe_machine(
        overworld_command: SceneCommand,
    ) -> (SceneMachine, Rc<RefCell<Vec<ProbeEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let overworld = ProbeScene {
            key: SceneKey::Overworld,
            next_command: overworld_command,
            events: Rc::clone(&events),
        };
        let interior = ProbeScene {
            key: SceneKey::Interior,
            next_command: SceneCommand::None,
            events: Rc::clone(&events),
        };
        (
            SceneMachine::new(Box::new(overworld), Box::new(interior)),
            events,
        )
    }

    fn enter_payload() -> ScenePayload {
        ScenePayload::EnterInterior {
            interior_id: "hut".to_string(),
            return_to: ReturnSpawn {
                tile: TilePoint::new(3, 4),
                facing: Facing::Up,
            },
        }
    }

    #[test]
    fn switch_unloads_current_before_loading_target_with_payload() {
        let (mut machine, events) = probe_machine(SceneCommand::SwitchTo {
            key: SceneKey::Interior,
            payload: enter_payload(),
        });
        let mut audio = NullAudio;
        machine.load_active(&mut audio).unwrap();

        let status = machine
            .update_active(16.0, &InputSnapshot::empty(), &mut audio)
            .unwrap();

        assert_eq!(status, SceneStatus::Switched(SceneKey::Interior));
        assert_eq!(machine.active_scene(), SceneKey::Interior);
        assert_eq!(
            *events.borrow(),
            vec![
                ProbeEvent::Loaded(SceneKey::Overworld, None),
                ProbeEvent::Unloaded(SceneKey::Overworld),
                ProbeEvent::Loaded(SceneKey::Interior, Some(enter_payload())),
            ]
        );
    }

    #[test]
    fn load_active_is_idempotent_until_unloaded() {
        let (mut machine, events) = probe_machine(SceneCommand::None);
        let mut audio = NullAudio;
        machine.load_active(&mut audio).unwrap();
        machine.load_active(&mut audio).unwrap();
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn quit_command_surfaces_without_unloading() {
        let (mut machine, events) = probe_machine(SceneCommand::Quit);
        let mut audio = NullAudio;
        machine.load_active(&mut audio).unwrap();

        let status = machine
            .update_active(16.0, &InputSnapshot::empty(), &mut audio)
            .unwrap();

        assert_eq!(status, SceneStatus::QuitRequested);
        assert_eq!(events.borrow().len(), 1);

        machine.shutdown_all();
        assert_eq!(
            events.borrow().last(),
            Some(&ProbeEvent::Unloaded(SceneKey::Overworld))
        );
    }
}
