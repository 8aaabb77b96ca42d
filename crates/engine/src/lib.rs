pub mod app;
pub mod grid;

pub use app::{
    ActorSnapshot, AudioSink, DialogueBox, InputAction, InputSnapshot, MusicTrack, NullAudio,
    ReturnSpawn, Scene, SceneCommand, SceneKey, SceneLoadError, SceneMachine, ScenePayload,
    SceneStatus, SoundCue,
};
pub use grid::{
    find_nearest_tile, manhattan_ring, parse_world_objects, tile_anchor_px, tile_from_anchor_px,
    Facing, GridMover, MoverConfig, MoverTick, PlacementRecord, StepArrival, StepStart, TileLayer,
    TileLayerError, TilePoint, Vec2, WorldObject, WorldObjectError, ANCHOR_OFFSET_X_PX,
    ANCHOR_OFFSET_Y_PX, EMPTY_GID, TILE_SIZE_PX,
};
