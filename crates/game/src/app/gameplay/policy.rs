fn is_walkable_ground(gid: u16) -> bool {
    WALKABLE_GROUND_GIDS.contains(&gid)
}

/// Outdoor blocked check, in fixed rule order: NPC occupancy first, then the
/// door exception (a door tile is enterable no matter what terrain or
/// collision is authored under it), then bounds, ground whitelist, and the
/// collision layer.
fn is_blocked_outdoor(
    tile: TilePoint,
    ground: &TileLayer,
    collision: &TileLayer,
    doors: &DoorRegistry,
    index: &InteractionIndex,
) -> bool {
    if index.is_npc_occupied(tile) {
        return true;
    }
    if doors.contains(tile) {
        return false;
    }
    if !ground.in_bounds(tile) {
        return true;
    }
    let Some(gid) = ground.gid_at(tile) else {
        return true;
    };
    if !is_walkable_ground(gid) {
        return true;
    }
    collision.blocks(tile)
}

/// Indoors there is no ground whitelist: any in-bounds tile without
/// authored collision is walkable.
fn is_blocked_indoor(tile: TilePoint, collision: &TileLayer, index: &InteractionIndex) -> bool {
    if index.is_npc_occupied(tile) {
        return true;
    }
    if !collision.in_bounds(tile) {
        return true;
    }
    collision.blocks(tile)
}

/// Ambient NPCs obey the outdoor rule plus their own constraints: never
/// outside the home region, never onto a door, never onto the player.
fn is_npc_blocked(
    tile: TilePoint,
    home: HomeRegion,
    player_tile: TilePoint,
    ground: &TileLayer,
    collision: &TileLayer,
    doors: &DoorRegistry,
    index: &InteractionIndex,
) -> bool {
    if !home.contains(tile) {
        return true;
    }
    if doors.contains(tile) {
        return true;
    }
    if tile == player_tile {
        return true;
    }
    is_blocked_outdoor(tile, ground, collision, doors, index)
}

/// Terrain-only walkability used by spawn placement and the return-spawn
/// resolver: ignores occupancy, keeps the door exception.
fn is_walkable_outside(
    tile: TilePoint,
    ground: &TileLayer,
    collision: &TileLayer,
    doors: &DoorRegistry,
) -> bool {
    if !ground.in_bounds(tile) {
        return false;
    }
    if doors.contains(tile) {
        return true;
    }
    let Some(gid) = ground.gid_at(tile) else {
        return false;
    };
    is_walkable_ground(gid) && !collision.blocks(tile)
}
