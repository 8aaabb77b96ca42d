#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NpcId(usize);

/// Inclusive rectangle an ambient NPC may wander in. Fixed at spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HomeRegion {
    min: TilePoint,
    max: TilePoint,
}

impl HomeRegion {
    fn centered_on(tile: TilePoint) -> Self {
        Self {
            min: TilePoint::new(tile.x - NPC_HOME_HALF_EXTENT, tile.y - NPC_HOME_HALF_EXTENT),
            max: TilePoint::new(tile.x + NPC_HOME_HALF_EXTENT, tile.y + NPC_HOME_HALF_EXTENT),
        }
    }

    fn contains(&self, tile: TilePoint) -> bool {
        tile.x >= self.min.x && tile.x <= self.max.x && tile.y >= self.min.y && tile.y <= self.max.y
    }
}

#[derive(Debug, Clone)]
struct NpcDef {
    id: String,
    lines: Vec<String>,
}

impl NpcDef {
    fn new(id: &str, lines: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            lines: lines.iter().map(|line| line.to_string()).collect(),
        }
    }

    /// Looked up at interaction time, not cached at spawn, so dialogue
    /// edits take effect on the next talk.
    fn current_line(&self) -> &str {
        self.lines
            .first()
            .map(String::as_str)
            .unwrap_or(FALLBACK_DIALOGUE_LINE)
    }
}

#[derive(Debug)]
struct NpcRuntime {
    def: NpcDef,
    mover: GridMover,
    home: HomeRegion,
}

impl NpcRuntime {
    fn new(def: NpcDef, spawn: TilePoint) -> Self {
        let mut mover =
            GridMover::new(MoverConfig::default().with_step_duration_ms(NPC_STEP_DURATION_MS));
        mover.set_tile_position(spawn);
        Self {
            def,
            mover,
            home: HomeRegion::centered_on(spawn),
        }
    }

    fn tile(&self) -> TilePoint {
        self.mover.tile()
    }

    /// Draw depth, derived from the current tile on every query.
    fn depth(&self) -> i32 {
        CHARACTER_BASE_DEPTH + self.tile().y
    }

    fn face_toward(&mut self, target: TilePoint) {
        if let Some(facing) = Facing::toward(self.tile(), target) {
            self.mover.set_facing(facing);
        }
    }
}

/// Renderer view of the player and every NPC. Depth is derived from the
/// logical tile on each call, never cached on the actor.
fn actor_snapshots(player: &GridMover, npcs: &[NpcRuntime]) -> Vec<ActorSnapshot> {
    let mut actors = Vec::with_capacity(npcs.len() + 1);
    actors.push(ActorSnapshot {
        position_px: player.position_px(),
        facing: player.facing(),
        depth: CHARACTER_BASE_DEPTH + player.tile().y,
    });
    for npc in npcs {
        actors.push(ActorSnapshot {
            position_px: npc.mover.position_px(),
            facing: npc.mover.facing(),
            depth: npc.depth(),
        });
    }
    actors
}

#[derive(Debug, Clone)]
struct SignPost {
    tile: TilePoint,
    text: String,
}

/// Authored data a scene is rebuilt from on every entry.
#[derive(Debug, Clone)]
struct WorldContent {
    ground: TileLayer,
    collision: TileLayer,
    objects: Vec<WorldObject>,
}
