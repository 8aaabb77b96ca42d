struct OverworldScene {
    content: WorldContent,
    catalog: HashMap<String, NpcDef>,
    rng_seed: u64,
    player: GridMover,
    npcs: Vec<NpcRuntime>,
    signs: Vec<SignPost>,
    doors: DoorRegistry,
    index: InteractionIndex,
    scheduler: TurnScheduler,
    dialogue: DialogueBox,
}

impl OverworldScene {
    fn new(content: WorldContent, catalog: HashMap<String, NpcDef>, rng_seed: u64) -> Self {
        Self {
            content,
            catalog,
            rng_seed,
            player: GridMover::new(
                MoverConfig::default().with_step_duration_ms(PLAYER_STEP_DURATION_MS),
            ),
            npcs: Vec::new(),
            signs: Vec::new(),
            doors: DoorRegistry::default(),
            index: InteractionIndex::default(),
            scheduler: TurnScheduler::new(rng_seed),
            dialogue: DialogueBox::default(),
        }
    }

    fn authored_player_spawn(&self) -> (TilePoint, Facing) {
        let spawn = self.content.objects.iter().find_map(|object| match object {
            WorldObject::Spawn { tile, name } if name == PLAYER_SPAWN_OBJECT_NAME => Some(*tile),
            _ => None,
        });
        (spawn.unwrap_or(DEFAULT_OVERWORLD_SPAWN), Facing::Down)
    }

    /// NPC placements may be authored on decorative or occupied tiles; each
    /// spawn is nudged to the nearest free walkable tile, seeing the NPCs
    /// already placed before it.
    fn spawn_npcs(&mut self) {
        self.npcs.clear();
        for object in &self.content.objects {
            let WorldObject::Npc { tile, id, .. } = object else {
                continue;
            };
            let Some(def) = self.catalog.get(id) else {
                warn!(npc = %id, "npc_without_catalog_entry_skipped");
                continue;
            };
            let spawn = {
                let (ground, collision) = (&self.content.ground, &self.content.collision);
                let (doors, index) = (&self.doors, &self.index);
                find_nearest_tile(*tile, NPC_SPAWN_NUDGE_RADIUS, |candidate| {
                    !doors.contains(candidate)
                        && !index.is_npc_occupied(candidate)
                        && is_walkable_outside(candidate, ground, collision, doors)
                })
            };
            let Some(spawn) = spawn else {
                warn!(npc = %id, x = tile.x, y = tile.y, "npc_spawn_has_no_free_tile_nearby");
                continue;
            };
            let npc_id = NpcId(self.npcs.len());
            self.index.insert_npc(spawn, npc_id);
            self.npcs.push(NpcRuntime::new(def.clone(), spawn));
        }
    }
}

impl Scene for OverworldScene {
    fn load(
        &mut self,
        payload: Option<ScenePayload>,
        _audio: &mut dyn AudioSink,
    ) -> Result<(), SceneLoadError> {
        self.doors = DoorRegistry::from_objects(&self.content.objects);
        self.index = InteractionIndex::default();
        self.dialogue = DialogueBox::default();
        self.scheduler = TurnScheduler::new(self.rng_seed);
        self.signs = self
            .content
            .objects
            .iter()
            .filter_map(|object| match object {
                WorldObject::Sign { tile, text } => Some(SignPost {
                    tile: *tile,
                    text: text.clone(),
                }),
                _ => None,
            })
            .collect();
        self.spawn_npcs();
        self.index.rebuild(&self.npcs, &self.signs);

        let (spawn, facing) = match payload {
            Some(ScenePayload::ReturnOutside { spawn, facing }) => (spawn, facing),
            Some(ScenePayload::EnterInterior { .. }) => {
                return Err(SceneLoadError::MissingPayload {
                    expected: "return-outside",
                })
            }
            None => self.authored_player_spawn(),
        };
        self.player = GridMover::new(
            MoverConfig::default().with_step_duration_ms(PLAYER_STEP_DURATION_MS),
        );
        self.player.set_tile_position(spawn);
        self.player.set_facing(facing);

        info!(
            scene = "overworld",
            npc_count = self.npcs.len(),
            door_count = self.doors.door_count(),
            spawn_x = spawn.x,
            spawn_y = spawn.y,
            "scene_loaded"
        );
        Ok(())
    }

    fn update(
        &mut self,
        delta_ms: f32,
        input: &InputSnapshot,
        audio: &mut dyn AudioSink,
    ) -> SceneCommand {
        if input.quit_requested() {
            return SceneCommand::Quit;
        }

        for npc in &mut self.npcs {
            npc.mover.advance(delta_ms);
        }

        if input.interact_pressed() {
            handle_interact(
                &self.player,
                &self.index,
                &mut self.npcs,
                &mut self.dialogue,
                audio,
            );
        }

        // Dialogue freezes new player steps; an in-flight step still
        // finishes interpolating.
        let desired = if self.dialogue.is_open() {
            None
        } else {
            input.desired_facing()
        };
        let tick = {
            let Self {
                player,
                content,
                doors,
                index,
                ..
            } = self;
            player.update(delta_ms, desired, |tile| {
                is_blocked_outdoor(tile, &content.ground, &content.collision, doors, index)
            })
        };
        if tick.started.is_some() {
            audio.play_sfx(SoundCue::Step);
        }
        if let Some(arrival) = tick.arrived {
            if !self.dialogue.is_open() {
                if let Some(interior) = self.doors.interior_at(arrival.tile) {
                    let interior_id = interior.to_string();
                    let return_to = return_spawn_for_door(
                        arrival.tile,
                        &self.content.ground,
                        &self.content.collision,
                        &self.doors,
                        &self.index,
                    );
                    audio.play_sfx(SoundCue::Door);
                    info!(
                        interior = %interior_id,
                        return_x = return_to.tile.x,
                        return_y = return_to.tile.y,
                        "door_entered"
                    );
                    return SceneCommand::SwitchTo {
                        key: SceneKey::Interior,
                        payload: ScenePayload::EnterInterior {
                            interior_id,
                            return_to,
                        },
                    };
                }
            }
        }

        let Self {
            scheduler,
            npcs,
            content,
            doors,
            index,
            dialogue,
            player,
            ..
        } = self;
        scheduler.tick(
            delta_ms,
            dialogue.is_open(),
            player.tile(),
            &content.ground,
            &content.collision,
            doors,
            index,
            npcs,
        );

        SceneCommand::None
    }

    fn unload(&mut self) {
        self.npcs.clear();
        self.signs.clear();
        self.index = InteractionIndex::default();
        self.doors = DoorRegistry::default();
        self.dialogue = DialogueBox::default();
        self.scheduler = TurnScheduler::new(self.rng_seed);
        info!(scene = "overworld", "scene_unloaded");
    }

    fn actors(&self) -> Vec<ActorSnapshot> {
        actor_snapshots(&self.player, &self.npcs)
    }

    fn debug_title(&self) -> Option<String> {
        let tile = self.player.tile();
        Some(format!(
            "overworld player=({}, {}) depth={} npcs={}",
            tile.x,
            tile.y,
            CHARACTER_BASE_DEPTH + tile.y,
            self.npcs.len()
        ))
    }
}

struct InteriorScene {
    interiors: HashMap<String, WorldContent>,
    interior_id: String,
    return_to: ReturnSpawn,
    collision: TileLayer,
    exit_tile: Option<TilePoint>,
    player: GridMover,
    npcs: Vec<NpcRuntime>,
    signs: Vec<SignPost>,
    index: InteractionIndex,
    dialogue: DialogueBox,
}

impl InteriorScene {
    fn new(interiors: HashMap<String, WorldContent>) -> Self {
        Self {
            interiors,
            interior_id: String::new(),
            return_to: ReturnSpawn {
                tile: DEFAULT_OVERWORLD_SPAWN,
                facing: Facing::Down,
            },
            collision: TileLayer::filled(0, 0, EMPTY_GID),
            exit_tile: None,
            player: GridMover::new(
                MoverConfig::default().with_step_duration_ms(PLAYER_STEP_DURATION_MS),
            ),
            npcs: Vec::new(),
            signs: Vec::new(),
            index: InteractionIndex::default(),
            dialogue: DialogueBox::default(),
        }
    }

    /// Interior NPCs stand still and need a line to say; records without
    /// text or on blocked tiles are dropped.
    fn spawn_npcs(&mut self, objects: &[WorldObject]) {
        self.npcs.clear();
        for object in objects {
            let WorldObject::Npc { tile, id, text, .. } = object else {
                continue;
            };
            let Some(text) = text else {
                continue;
            };
            if is_blocked_indoor(*tile, &self.collision, &self.index) {
                warn!(npc = %id, x = tile.x, y = tile.y, "interior_npc_on_blocked_tile_skipped");
                continue;
            }
            let npc_id = NpcId(self.npcs.len());
            self.index.insert_npc(*tile, npc_id);
            self.npcs.push(NpcRuntime::new(
                NpcDef {
                    id: id.clone(),
                    lines: vec![text.clone()],
                },
                *tile,
            ));
        }
    }
}

impl Scene for InteriorScene {
    fn load(
        &mut self,
        payload: Option<ScenePayload>,
        audio: &mut dyn AudioSink,
    ) -> Result<(), SceneLoadError> {
        let Some(ScenePayload::EnterInterior {
            interior_id,
            return_to,
        }) = payload
        else {
            return Err(SceneLoadError::MissingPayload {
                expected: "enter-interior",
            });
        };
        let Some(content) = self.interiors.get(&interior_id).cloned() else {
            return Err(SceneLoadError::UnknownInterior(interior_id));
        };

        self.collision = content.collision;
        self.exit_tile = content.objects.iter().find_map(|object| match object {
            WorldObject::Exit { tile } => Some(*tile),
            _ => None,
        });
        if self.exit_tile.is_none() {
            warn!(interior = %interior_id, "interior_has_no_exit_tile");
        }
        self.signs = content
            .objects
            .iter()
            .filter_map(|object| match object {
                WorldObject::Sign { tile, text } => Some(SignPost {
                    tile: *tile,
                    text: text.clone(),
                }),
                _ => None,
            })
            .collect();
        self.index = InteractionIndex::default();
        self.dialogue = DialogueBox::default();
        self.spawn_npcs(&content.objects);
        self.index.rebuild(&self.npcs, &self.signs);

        self.player = GridMover::new(
            MoverConfig::default().with_step_duration_ms(PLAYER_STEP_DURATION_MS),
        );
        self.player.set_tile_position(INTERIOR_PLAYER_SPAWN);
        self.player.set_facing(Facing::Down);
        self.interior_id = interior_id;
        self.return_to = return_to;

        audio.play_bgm(MusicTrack::Interior);
        info!(
            scene = "interior",
            interior = %self.interior_id,
            npc_count = self.npcs.len(),
            "scene_loaded"
        );
        Ok(())
    }

    fn update(
        &mut self,
        delta_ms: f32,
        input: &InputSnapshot,
        audio: &mut dyn AudioSink,
    ) -> SceneCommand {
        if input.quit_requested() {
            return SceneCommand::Quit;
        }

        if input.interact_pressed() {
            handle_interact(
                &self.player,
                &self.index,
                &mut self.npcs,
                &mut self.dialogue,
                audio,
            );
        }

        let desired = if self.dialogue.is_open() {
            None
        } else {
            input.desired_facing()
        };
        let tick = {
            let Self {
                player,
                collision,
                index,
                ..
            } = self;
            player.update(delta_ms, desired, |tile| {
                is_blocked_indoor(tile, collision, index)
            })
        };
        if tick.started.is_some() {
            audio.play_sfx(SoundCue::Step);
        }
        if let Some(arrival) = tick.arrived {
            if !self.dialogue.is_open() && Some(arrival.tile) == self.exit_tile {
                audio.play_sfx(SoundCue::Door);
                audio.play_bgm(MusicTrack::Overworld);
                info!(
                    interior = %self.interior_id,
                    spawn_x = self.return_to.tile.x,
                    spawn_y = self.return_to.tile.y,
                    "interior_exited"
                );
                return SceneCommand::SwitchTo {
                    key: SceneKey::Overworld,
                    payload: ScenePayload::ReturnOutside {
                        spawn: self.return_to.tile,
                        facing: self.return_to.facing,
                    },
                };
            }
        }

        SceneCommand::None
    }

    fn unload(&mut self) {
        self.npcs.clear();
        self.signs.clear();
        self.index = InteractionIndex::default();
        self.dialogue = DialogueBox::default();
        self.exit_tile = None;
        info!(scene = "interior", interior = %self.interior_id, "scene_unloaded");
    }

    fn actors(&self) -> Vec<ActorSnapshot> {
        actor_snapshots(&self.player, &self.npcs)
    }

    fn debug_title(&self) -> Option<String> {
        let tile = self.player.tile();
        Some(format!(
            "interior {} player=({}, {}) depth={}",
            self.interior_id,
            tile.x,
            tile.y,
            CHARACTER_BASE_DEPTH + tile.y
        ))
    }
}
