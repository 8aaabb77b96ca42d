#[derive(Debug, Clone, Copy, PartialEq)]
enum TurnPhase {
    Cooldown { remaining_ms: f32 },
    WaitingArrival { npc: NpcId },
}

/// Round-robin wander scheduler for ambient NPCs. At most one NPC turn is
/// outstanding; the next cooldown starts when the walking NPC arrives, so
/// the cadence is measured from the end of a turn, not its start.
#[derive(Debug)]
struct TurnScheduler {
    phase: TurnPhase,
    next_slot: usize,
    rng: SmallRng,
}

impl TurnScheduler {
    fn new(rng_seed: u64) -> Self {
        Self {
            phase: TurnPhase::Cooldown {
                remaining_ms: NPC_TURN_INTERVAL_MS,
            },
            next_slot: 0,
            rng: SmallRng::seed_from_u64(rng_seed),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn tick(
        &mut self,
        delta_ms: f32,
        dialogue_open: bool,
        player_tile: TilePoint,
        ground: &TileLayer,
        collision: &TileLayer,
        doors: &DoorRegistry,
        index: &mut InteractionIndex,
        npcs: &mut [NpcRuntime],
    ) {
        if npcs.is_empty() {
            return;
        }
        match self.phase {
            TurnPhase::WaitingArrival { npc } => {
                let still_moving = npcs
                    .get(npc.0)
                    .map(|runtime| runtime.mover.is_moving())
                    .unwrap_or(false);
                if !still_moving {
                    self.phase = TurnPhase::Cooldown {
                        remaining_ms: NPC_TURN_INTERVAL_MS,
                    };
                }
            }
            TurnPhase::Cooldown { remaining_ms } => {
                let remaining = remaining_ms - delta_ms;
                if remaining > 0.0 {
                    self.phase = TurnPhase::Cooldown {
                        remaining_ms: remaining,
                    };
                    return;
                }
                self.phase = TurnPhase::Cooldown {
                    remaining_ms: NPC_TURN_INTERVAL_MS,
                };
                if dialogue_open {
                    // Skipped, not queued. The cycle keeps its cadence and
                    // the slot stays on the same NPC.
                    return;
                }
                self.take_turn(player_tile, ground, collision, doors, index, npcs);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn take_turn(
        &mut self,
        player_tile: TilePoint,
        ground: &TileLayer,
        collision: &TileLayer,
        doors: &DoorRegistry,
        index: &mut InteractionIndex,
        npcs: &mut [NpcRuntime],
    ) {
        let slot = self.next_slot % npcs.len();
        self.next_slot = (slot + 1) % npcs.len();
        let id = NpcId(slot);
        let npc = &mut npcs[slot];
        let home = npc.home;
        let from = npc.tile();

        let allowed: Vec<Facing> = Facing::ALL
            .into_iter()
            .filter(|facing| {
                let to = from.offset(*facing);
                !is_npc_blocked(to, home, player_tile, ground, collision, doors, index)
            })
            .collect();
        if allowed.is_empty() {
            // Boxed in this turn; the cooldown already restarted.
            return;
        }

        // Uniform random primary choice, then the remaining allowed facings
        // in their fixed order in case the primary is rejected.
        let primary = self.rng.gen_range(0..allowed.len());
        let attempts = std::iter::once(allowed[primary]).chain(
            allowed
                .iter()
                .enumerate()
                .filter(move |(i, _)| *i != primary)
                .map(|(_, facing)| *facing),
        );
        for facing in attempts {
            let started = npc.mover.try_step(facing, |to| {
                is_npc_blocked(to, home, player_tile, ground, collision, doors, index)
            });
            if let Some(start) = started {
                index.move_npc(id, start.from, start.to);
                debug!(
                    npc = %npc.def.id,
                    from_x = start.from.x,
                    from_y = start.from.y,
                    to_x = start.to.x,
                    to_y = start.to.y,
                    "npc_step"
                );
                self.phase = TurnPhase::WaitingArrival { npc: id };
                return;
            }
        }
    }
}
