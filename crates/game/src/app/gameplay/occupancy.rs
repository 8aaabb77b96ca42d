/// Tile-keyed lookup for everything the player can bump into or talk to.
/// Owned by the active scene and rebuilt from live state on every scene
/// start; nothing in it survives a scene switch.
#[derive(Debug, Default)]
struct InteractionIndex {
    npc_by_tile: HashMap<TilePoint, NpcId>,
    sign_text_by_tile: HashMap<TilePoint, String>,
}

impl InteractionIndex {
    fn rebuild(&mut self, npcs: &[NpcRuntime], signs: &[SignPost]) {
        self.npc_by_tile.clear();
        self.sign_text_by_tile.clear();
        for (slot, npc) in npcs.iter().enumerate() {
            self.npc_by_tile.insert(npc.tile(), NpcId(slot));
        }
        for sign in signs {
            self.sign_text_by_tile.insert(sign.tile, sign.text.clone());
        }
    }

    fn insert_npc(&mut self, tile: TilePoint, id: NpcId) {
        self.npc_by_tile.insert(tile, id);
    }

    /// Re-key an NPC at step start, before its interpolation has run, so no
    /// later mover in the same tick can claim the destination.
    fn move_npc(&mut self, id: NpcId, from: TilePoint, to: TilePoint) {
        if self.npc_by_tile.get(&from) == Some(&id) {
            self.npc_by_tile.remove(&from);
        }
        self.npc_by_tile.insert(to, id);
    }

    fn npc_at(&self, tile: TilePoint) -> Option<NpcId> {
        self.npc_by_tile.get(&tile).copied()
    }

    fn is_npc_occupied(&self, tile: TilePoint) -> bool {
        self.npc_by_tile.contains_key(&tile)
    }

    fn sign_text_at(&self, tile: TilePoint) -> Option<&str> {
        self.sign_text_by_tile.get(&tile).map(String::as_str)
    }
}

/// Interact key dispatch, shared by both scenes. An open dialogue consumes
/// the press; otherwise the tile in front of the player is targeted, and a
/// sign on that tile wins over an NPC on the same tile.
fn handle_interact(
    player: &GridMover,
    index: &InteractionIndex,
    npcs: &mut [NpcRuntime],
    dialogue: &mut DialogueBox,
    audio: &mut dyn AudioSink,
) {
    if dialogue.is_open() {
        audio.play_sfx(SoundCue::Blip);
        dialogue.advance();
        return;
    }
    let front = player.tile().offset(player.facing());
    if let Some(text) = index.sign_text_at(front) {
        audio.play_sfx(SoundCue::Blip);
        dialogue.start(text);
        return;
    }
    let Some(id) = index.npc_at(front) else {
        return;
    };
    let Some(npc) = npcs.get_mut(id.0) else {
        return;
    };
    npc.face_toward(player.tile());
    audio.play_sfx(SoundCue::Blip);
    dialogue.start(npc.def.current_line());
}
