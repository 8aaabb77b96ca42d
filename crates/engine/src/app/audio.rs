/// One-shot effects fired by gameplay. The names are the contract; how (or
/// whether) a frontend renders them is its business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Step,
    Door,
    Blip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Overworld,
    Interior,
}

/// Fire-and-forget audio output. Gameplay never waits on a cue and never
/// observes playback state.
pub trait AudioSink {
    fn play_sfx(&mut self, cue: SoundCue);
    fn play_bgm(&mut self, track: MusicTrack);
}

/// Sink that drops everything, for headless runs.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_sfx(&mut self, _cue: SoundCue) {}

    fn play_bgm(&mut self, _track: MusicTrack) {}
}
