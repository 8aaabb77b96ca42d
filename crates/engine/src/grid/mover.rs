use super::{tile_anchor_px, tile_from_anchor_px, Facing, TilePoint, Vec2};

pub const DEFAULT_STEP_DURATION_MS: f32 = 120.0;
pub const DEFAULT_HOLD_REPEAT_MS: f32 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoverConfig {
    pub step_duration_ms: f32,
    pub hold_repeat_ms: f32,
}

impl Default for MoverConfig {
    fn default() -> Self {
        Self {
            step_duration_ms: DEFAULT_STEP_DURATION_MS,
            hold_repeat_ms: DEFAULT_HOLD_REPEAT_MS,
        }
    }
}

impl MoverConfig {
    pub fn with_step_duration_ms(mut self, step_duration_ms: f32) -> Self {
        self.step_duration_ms = step_duration_ms;
        self
    }
}

/// Emitted synchronously when a step begins, before any interpolation has
/// run, so callers can commit occupancy for the destination immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepStart {
    pub from: TilePoint,
    pub to: TilePoint,
    pub facing: Facing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepArrival {
    pub tile: TilePoint,
    pub facing: Facing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoverTick {
    pub started: Option<StepStart>,
    pub arrived: Option<StepArrival>,
}

#[derive(Debug, Clone, Copy)]
struct StepInFlight {
    from: TilePoint,
    to: TilePoint,
    facing: Facing,
    elapsed_ms: f32,
}

/// Per-actor tile-to-tile movement. The continuous pixel position is the
/// authoritative state; the tile coordinate is derived from it. At most one
/// step is in flight at a time and a step cannot be interrupted mid-tile.
#[derive(Debug)]
pub struct GridMover {
    position: Vec2,
    facing: Facing,
    config: MoverConfig,
    in_flight: Option<StepInFlight>,
    hold_elapsed_ms: f32,
    holding: bool,
}

impl GridMover {
    pub fn new(config: MoverConfig) -> Self {
        Self {
            position: tile_anchor_px(TilePoint::new(0, 0)),
            facing: Facing::Down,
            config,
            in_flight: None,
            hold_elapsed_ms: 0.0,
            holding: false,
        }
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
    }

    pub fn position_px(&self) -> Vec2 {
        self.position
    }

    pub fn is_moving(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Logical tile of the actor. While a step is in flight this is the tile
    /// being departed, not the interpolated nearest tile, so occupancy and
    /// depth stay stable for the whole step.
    pub fn tile(&self) -> TilePoint {
        match self.in_flight {
            Some(step) => step.from,
            None => tile_from_anchor_px(self.position),
        }
    }

    /// Teleport to the exact anchor of `tile`. Spawn placement only: no
    /// blocked-policy check, and any in-flight step is discarded.
    pub fn set_tile_position(&mut self, tile: TilePoint) {
        self.position = tile_anchor_px(tile);
        self.in_flight = None;
        self.hold_elapsed_ms = 0.0;
        self.holding = false;
    }

    /// Attempt one step. Facing turns toward `facing` unconditionally before
    /// the destination is tested, so a rejected step still turns in place.
    /// Returns `None` without any state change while a step is in flight.
    pub fn try_step(
        &mut self,
        facing: Facing,
        mut is_blocked: impl FnMut(TilePoint) -> bool,
    ) -> Option<StepStart> {
        if self.in_flight.is_some() {
            return None;
        }
        self.facing = facing;
        let from = self.tile();
        let to = from.offset(facing);
        if is_blocked(to) {
            return None;
        }
        self.in_flight = Some(StepInFlight {
            from,
            to,
            facing,
            elapsed_ms: 0.0,
        });
        Some(StepStart { from, to, facing })
    }

    /// Advance the in-flight interpolation. On completion the position snaps
    /// to the destination anchor and the arrival is reported exactly once.
    pub fn advance(&mut self, delta_ms: f32) -> Option<StepArrival> {
        let config = self.config;
        let step = self.in_flight.as_mut()?;
        step.elapsed_ms += delta_ms;
        let t = if config.step_duration_ms > 0.0 {
            (step.elapsed_ms / config.step_duration_ms).min(1.0)
        } else {
            1.0
        };
        let from_px = tile_anchor_px(step.from);
        let to_px = tile_anchor_px(step.to);
        self.position = Vec2 {
            x: from_px.x + (to_px.x - from_px.x) * t,
            y: from_px.y + (to_px.y - from_px.y) * t,
        };
        if step.elapsed_ms < config.step_duration_ms {
            return None;
        }
        let arrived = StepArrival {
            tile: step.to,
            facing: step.facing,
        };
        self.in_flight = None;
        Some(arrived)
    }

    /// Per-frame drive: advances any in-flight step, then applies
    /// hold-to-walk input. The first frame a direction is held steps
    /// immediately; a continued hold repeats once the held time crosses the
    /// repeat threshold. The hold timer is frozen while a step is in flight
    /// and reset when the direction is released.
    pub fn update(
        &mut self,
        delta_ms: f32,
        desired: Option<Facing>,
        is_blocked: impl FnMut(TilePoint) -> bool,
    ) -> MoverTick {
        let mut tick = MoverTick {
            started: None,
            arrived: self.advance(delta_ms),
        };
        let Some(facing) = desired else {
            self.holding = false;
            self.hold_elapsed_ms = 0.0;
            return tick;
        };
        if self.in_flight.is_some() {
            return tick;
        }
        if !self.holding {
            self.holding = true;
            self.hold_elapsed_ms = 0.0;
            tick.started = self.try_step(facing, is_blocked);
            return tick;
        }
        self.hold_elapsed_ms += delta_ms;
        if self.hold_elapsed_ms < self.config.hold_repeat_ms {
            return tick;
        }
        self.hold_elapsed_ms = 0.0;
        tick.started = self.try_step(facing, is_blocked);
        tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mover_at(tile: TilePoint) -> GridMover {
        let mut mover = GridMover::new(MoverConfig::default());
        mover.set_tile_position(tile);
        mover
    }

    fn never_blocked(_tile: TilePoint) -> bool {
        false
    }

    #[test]
    fn blocked_step_keeps_tile_but_turns_in_place() {
        let mut mover = mover_at(TilePoint::new(3, 3));
        mover.set_facing(Facing::Down);

        let started = mover.try_step(Facing::Left, |_| true);

        assert_eq!(started, None);
        assert_eq!(mover.tile(), TilePoint::new(3, 3));
        assert_eq!(mover.facing(), Facing::Left);
        assert!(!mover.is_moving());
    }

    #[test]
    fn step_reports_departing_tile_until_arrival() {
        let mut mover = mover_at(TilePoint::new(2, 2));

        let started = mover.try_step(Facing::Right, never_blocked);
        assert_eq!(
            started,
            Some(StepStart {
                from: TilePoint::new(2, 2),
                to: TilePoint::new(3, 2),
                facing: Facing::Right,
            })
        );

        // Past the halfway point the nearest tile is the destination, but the
        // logical tile is still the origin.
        assert_eq!(mover.advance(100.0), None);
        assert!(mover.is_moving());
        assert_eq!(mover.tile(), TilePoint::new(2, 2));

        let arrived = mover.advance(20.0);
        assert_eq!(
            arrived,
            Some(StepArrival {
                tile: TilePoint::new(3, 2),
                facing: Facing::Right,
            })
        );
        assert_eq!(mover.tile(), TilePoint::new(3, 2));
        assert_eq!(mover.position_px(), tile_anchor_px(TilePoint::new(3, 2)));
    }

    #[test]
    fn try_step_is_rejected_while_in_flight() {
        let mut mover = mover_at(TilePoint::new(0, 0));
        mover.try_step(Facing::Down, never_blocked);
        assert_eq!(mover.facing(), Facing::Down);

        let second = mover.try_step(Facing::Up, never_blocked);

        assert_eq!(second, None);
        // A rejected mid-flight request does not even turn.
        assert_eq!(mover.facing(), Facing::Down);
    }

    #[test]
    fn arrival_overshoot_snaps_to_destination_anchor() {
        let mut mover = mover_at(TilePoint::new(1, 1));
        mover.try_step(Facing::Down, never_blocked);

        let arrived = mover.advance(5000.0);

        assert_eq!(
            arrived.map(|a| a.tile),
            Some(TilePoint::new(1, 2)),
        );
        assert_eq!(mover.position_px(), tile_anchor_px(TilePoint::new(1, 2)));
    }

    #[test]
    fn tap_produces_exactly_one_step() {
        let mut mover = mover_at(TilePoint::new(4, 4));

        let tick = mover.update(10.0, Some(Facing::Right), never_blocked);
        assert!(tick.started.is_some());

        let mut extra_starts = 0;
        for _ in 0..60 {
            let tick = mover.update(10.0, None, never_blocked);
            if tick.started.is_some() {
                extra_starts += 1;
            }
        }
        assert_eq!(extra_starts, 0);
        assert_eq!(mover.tile(), TilePoint::new(5, 4));
    }

    #[test]
    fn held_direction_repeat_cadence_is_deterministic() {
        // 10 ms frames, 120 ms steps, 150 ms repeat threshold: the first
        // step fires on frame 1, arrival lands on frame 13, the frozen hold
        // timer then accumulates to 150 ms by frame 27, and the pattern
        // repeats every 26 frames.
        let mut mover = mover_at(TilePoint::new(0, 0));
        let mut start_frames = Vec::new();
        for frame in 1..=53 {
            let tick = mover.update(10.0, Some(Facing::Down), never_blocked);
            if tick.started.is_some() {
                start_frames.push(frame);
            }
        }
        assert_eq!(start_frames, vec![1, 27, 53]);
        // The third step is still in flight, so the logical tile is its
        // origin.
        assert_eq!(mover.tile(), TilePoint::new(0, 2));
    }

    #[test]
    fn releasing_direction_resets_hold_timer() {
        let mut mover = mover_at(TilePoint::new(0, 0));
        mover.update(10.0, Some(Facing::Right), |_| true);
        // Accumulate most of a repeat interval against the wall, release,
        // then hold again: the fresh hold steps immediately.
        for _ in 0..12 {
            mover.update(10.0, Some(Facing::Right), |_| true);
        }
        mover.update(10.0, None, never_blocked);

        let tick = mover.update(10.0, Some(Facing::Right), never_blocked);
        assert!(tick.started.is_some());
    }

    #[test]
    fn set_tile_position_discards_in_flight_step() {
        let mut mover = mover_at(TilePoint::new(0, 0));
        mover.try_step(Facing::Right, never_blocked);
        mover.advance(60.0);

        mover.set_tile_position(TilePoint::new(9, 9));

        assert!(!mover.is_moving());
        assert_eq!(mover.tile(), TilePoint::new(9, 9));
        assert_eq!(mover.position_px(), tile_anchor_px(TilePoint::new(9, 9)));
        assert_eq!(mover.advance(120.0), None);
    }
}
