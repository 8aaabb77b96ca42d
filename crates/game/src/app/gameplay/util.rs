const GID_BUILDING: u16 = 3;
const GID_FLOOR: u16 = 21;

const DEMO_OVERWORLD_PLACEMENTS: &str = r#"[
  {"type": "door", "name": "padua_home", "x": 112, "y": 112},
  {"type": "door", "name": "milan_home", "x": 256, "y": 112},
  {"type": "sign", "name": "town_sign", "x": 176, "y": 144,
   "properties": {"text": "Welcome to Brightbrook."}},
  {"type": "npc", "name": "ash", "x": 208, "y": 192},
  {"type": "npc", "name": "birch", "x": 96, "y": 192},
  {"type": "spawn", "name": "player_spawn", "x": 160, "y": 192}
]"#;

/// Demo town: two houses on a brick street, a pond, a road, and a couple of
/// locals. Layers are built programmatically, placements go through the
/// same record path authored documents would.
fn demo_overworld_content() -> Result<WorldContent, SceneLoadError> {
    let (width, height) = (24u32, 18u32);
    let mut ground = TileLayer::filled(width, height, GID_GRASS);
    for x in 0..width as i32 {
        ground.set_gid(TilePoint::new(x, 10), GID_COBBLESTONE_ROAD);
    }
    for y in 5..16 {
        ground.set_gid(TilePoint::new(10, y), GID_DIRT_PATH);
    }
    for x in 5..=18 {
        ground.set_gid(TilePoint::new(x, 8), GID_BRICK_STREET);
    }
    for y in 3..=5 {
        for x in 3..=6 {
            ground.set_gid(TilePoint::new(x, y), GID_WATER);
        }
    }
    for (x, y) in [(14, 12), (15, 12), (14, 13)] {
        ground.set_gid(TilePoint::new(x, y), GID_FLOWERS);
    }

    let mut collision = TileLayer::filled(width, height, EMPTY_GID);
    // House footprints, door tiles included: the door exception in the
    // blocked policy is what lets the player through.
    for (x0, x1) in [(6, 9), (15, 17)] {
        for y in 5..=7 {
            for x in x0..=x1 {
                collision.set_gid(TilePoint::new(x, y), GID_BUILDING);
            }
        }
    }

    let records: Vec<PlacementRecord> = serde_json::from_str(DEMO_OVERWORLD_PLACEMENTS)?;
    let objects = parse_world_objects(&records)?;
    Ok(WorldContent {
        ground,
        collision,
        objects,
    })
}

fn demo_interior_room(placements: &str) -> Result<WorldContent, SceneLoadError> {
    let (width, height) = (20u32, 15u32);
    let ground = TileLayer::filled(width, height, GID_FLOOR);
    let mut collision = TileLayer::filled(width, height, EMPTY_GID);
    for x in 0..width as i32 {
        collision.set_gid(TilePoint::new(x, 0), GID_BUILDING);
        collision.set_gid(TilePoint::new(x, height as i32 - 1), GID_BUILDING);
    }
    for y in 0..height as i32 {
        collision.set_gid(TilePoint::new(0, y), GID_BUILDING);
        collision.set_gid(TilePoint::new(width as i32 - 1, y), GID_BUILDING);
    }
    for x in 4..=6 {
        collision.set_gid(TilePoint::new(x, 6), GID_BUILDING);
    }

    let records: Vec<PlacementRecord> = serde_json::from_str(placements)?;
    let objects = parse_world_objects(&records)?;
    Ok(WorldContent {
        ground,
        collision,
        objects,
    })
}

fn demo_interior_contents() -> Result<HashMap<String, WorldContent>, SceneLoadError> {
    let mut interiors = HashMap::new();
    interiors.insert(
        "padua_home".to_string(),
        demo_interior_room(
            r#"[
              {"type": "npc", "name": "nonna", "x": 96, "y": 160,
               "properties": {"text": "Make yourself at home, dear."}},
              {"type": "exit", "name": "exit", "x": 160, "y": 208}
            ]"#,
        )?,
    );
    interiors.insert(
        "milan_home".to_string(),
        demo_interior_room(
            r#"[
              {"type": "npc", "name": "marco", "x": 208, "y": 144,
               "properties": {"text": "The rain never reaches in here."}},
              {"type": "exit", "name": "exit", "x": 160, "y": 208}
            ]"#,
        )?,
    );
    Ok(interiors)
}

fn demo_npc_catalog() -> HashMap<String, NpcDef> {
    let defs = [
        NpcDef::new("ash", &["Fine weather for standing around."]),
        NpcDef::new("birch", &["The road goes all the way to the coast."]),
    ];
    defs.into_iter().map(|def| (def.id.clone(), def)).collect()
}
