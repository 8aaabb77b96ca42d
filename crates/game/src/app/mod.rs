pub(crate) mod gameplay;

use engine::{
    AudioSink, InputAction, InputSnapshot, MusicTrack, SceneLoadError, SceneMachine, SceneStatus,
    SoundCue,
};
use tracing::{debug, info};

const FIXED_DELTA_MS: f32 = 1000.0 / 60.0;
const DEMO_RNG_SEED: u64 = 0x5eed;
// 30 seconds of simulated time at 60 Hz.
const DEMO_TICK_COUNT: u32 = 1800;

/// Audio sink that logs cues instead of playing them.
#[derive(Debug, Default)]
struct TracingAudio;

impl AudioSink for TracingAudio {
    fn play_sfx(&mut self, cue: SoundCue) {
        debug!(cue = ?cue, "sfx");
    }

    fn play_bgm(&mut self, track: MusicTrack) {
        info!(track = ?track, "bgm");
    }
}

/// Headless drive of the demo town: fixed 60 Hz deltas and a scripted input
/// tape that walks into a house, pokes around, and comes back out while the
/// locals wander.
pub(crate) fn run_demo() -> Result<(), SceneLoadError> {
    let (overworld, interior) = gameplay::build_scene_pair(DEMO_RNG_SEED)?;
    let mut machine = SceneMachine::new(overworld, interior);
    let mut audio = TracingAudio;
    machine.load_active(&mut audio)?;

    for tick in 0..DEMO_TICK_COUNT {
        let input = scripted_input(tick);
        match machine.update_active(FIXED_DELTA_MS, &input, &mut audio)? {
            SceneStatus::Running => {}
            SceneStatus::Switched(key) => info!(scene = ?key, tick, "demo_scene_switch"),
            SceneStatus::QuitRequested => break,
        }
    }

    let actor_count = machine.actors_active().len();
    if let Some(title) = machine.debug_title_active() {
        info!(state = %title, actor_count, "demo_finished");
    }
    machine.shutdown_all();
    Ok(())
}

fn scripted_input(tick: u32) -> InputSnapshot {
    match tick {
        // Three tiles left onto the door column, then up through the door.
        0..=41 => InputSnapshot::empty().with_action_down(InputAction::MoveLeft, true),
        42..=179 => InputSnapshot::empty().with_action_down(InputAction::MoveUp, true),
        // Poke the interact key a couple of times inside.
        240 => InputSnapshot::empty().with_interact_pressed(true),
        300 => InputSnapshot::empty().with_interact_pressed(true),
        // Head back down to the exit and outside again.
        360..=479 => InputSnapshot::empty().with_action_down(InputAction::MoveDown, true),
        // Stand still and let the locals wander.
        _ => InputSnapshot::empty(),
    }
}
