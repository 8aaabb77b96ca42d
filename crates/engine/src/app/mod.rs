mod audio;
mod dialogue;
mod input;
mod scene;

pub use audio::{AudioSink, MusicTrack, NullAudio, SoundCue};
pub use dialogue::DialogueBox;
pub use input::{InputAction, InputSnapshot};
pub use scene::{
    ActorSnapshot, ReturnSpawn, Scene, SceneCommand, SceneKey, SceneLoadError, SceneMachine,
    ScenePayload, SceneStatus,
};
