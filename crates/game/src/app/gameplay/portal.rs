/// Door tile to interior id, built once per scene load. Read-only for the
/// rest of the scene's lifetime.
#[derive(Debug, Default)]
struct DoorRegistry {
    interior_by_tile: HashMap<TilePoint, String>,
}

impl DoorRegistry {
    fn from_objects(objects: &[WorldObject]) -> Self {
        let mut interior_by_tile = HashMap::new();
        for object in objects {
            if let WorldObject::Door { tile, interior } = object {
                interior_by_tile.insert(*tile, interior.clone());
            }
        }
        Self { interior_by_tile }
    }

    fn contains(&self, tile: TilePoint) -> bool {
        self.interior_by_tile.contains_key(&tile)
    }

    fn interior_at(&self, tile: TilePoint) -> Option<&str> {
        self.interior_by_tile.get(&tile).map(String::as_str)
    }

    fn door_count(&self) -> usize {
        self.interior_by_tile.len()
    }
}

/// Preferred return positions relative to the door, tried in order before
/// any search: directly below, two below, then fanning out along the row
/// below the door.
const RETURN_CANDIDATE_OFFSETS: [(i32, i32); 6] =
    [(0, 1), (0, 2), (-1, 1), (1, 1), (-2, 1), (2, 1)];

/// Where the player reappears after leaving the interior behind `door`.
/// Computed at door-entry time, against the occupancy of that moment, and
/// carried through the interior in the scene payload.
fn return_spawn_for_door(
    door: TilePoint,
    ground: &TileLayer,
    collision: &TileLayer,
    doors: &DoorRegistry,
    index: &InteractionIndex,
) -> ReturnSpawn {
    let is_free = |tile: TilePoint| {
        !doors.contains(tile)
            && !index.is_npc_occupied(tile)
            && is_walkable_outside(tile, ground, collision, doors)
    };

    for (dx, dy) in RETURN_CANDIDATE_OFFSETS {
        let candidate = TilePoint::new(door.x + dx, door.y + dy);
        if is_free(candidate) {
            return ReturnSpawn {
                tile: candidate,
                facing: Facing::Up,
            };
        }
    }

    let below = TilePoint::new(door.x, door.y + 1);
    let below_further = TilePoint::new(door.x, door.y + 2);
    let found = find_nearest_tile(below, RETURN_SPAWN_SEARCH_RADIUS, is_free)
        .or_else(|| find_nearest_tile(below_further, RETURN_SPAWN_SEARCH_RADIUS, is_free));

    // Degraded worst case: the doorstep. Never the door tile itself, which
    // would immediately re-trigger the transition.
    ReturnSpawn {
        tile: found.unwrap_or(below),
        facing: Facing::Up,
    }
}
