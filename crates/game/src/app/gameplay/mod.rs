use std::collections::HashMap;

use engine::{
    find_nearest_tile, parse_world_objects, ActorSnapshot, AudioSink, DialogueBox, Facing,
    GridMover, InputSnapshot, MoverConfig, MusicTrack, PlacementRecord, ReturnSpawn, Scene,
    SceneCommand, SceneKey, SceneLoadError, ScenePayload, SoundCue, TileLayer, TilePoint,
    WorldObject, EMPTY_GID,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

const PLAYER_STEP_DURATION_MS: f32 = 120.0;
const NPC_STEP_DURATION_MS: f32 = 140.0;
const NPC_TURN_INTERVAL_MS: f32 = 100.0;
const CHARACTER_BASE_DEPTH: i32 = 10;
const NPC_HOME_HALF_EXTENT: i32 = 1;
const NPC_SPAWN_NUDGE_RADIUS: i32 = 8;
const RETURN_SPAWN_SEARCH_RADIUS: i32 = 10;

const GID_GRASS: u16 = 1;
const GID_DIRT_PATH: u16 = 2;
const GID_WATER: u16 = 5;
const GID_BRICK_STREET: u16 = 7;
const GID_COBBLESTONE_ROAD: u16 = 8;
const GID_FLOWERS: u16 = 14;
const WALKABLE_GROUND_GIDS: [u16; 5] = [
    GID_GRASS,
    GID_DIRT_PATH,
    GID_BRICK_STREET,
    GID_COBBLESTONE_ROAD,
    GID_FLOWERS,
];

const DEFAULT_OVERWORLD_SPAWN: TilePoint = TilePoint::new(10, 10);
const INTERIOR_PLAYER_SPAWN: TilePoint = TilePoint::new(10, 12);
const PLAYER_SPAWN_OBJECT_NAME: &str = "player_spawn";
const FALLBACK_DIALOGUE_LINE: &str = "...";

include!("types.rs");
include!("occupancy.rs");
include!("policy.rs");
include!("scheduler.rs");
include!("portal.rs");
include!("scene_impl.rs");
include!("util.rs");

pub(crate) fn build_scene_pair(
    rng_seed: u64,
) -> Result<(Box<dyn Scene>, Box<dyn Scene>), SceneLoadError> {
    let overworld = OverworldScene::new(demo_overworld_content()?, demo_npc_catalog(), rng_seed);
    let interior = InteriorScene::new(demo_interior_contents()?);
    Ok((Box::new(overworld), Box::new(interior)))
}
