//! Audio cues behind a pluggable sink
//!
//! The game only decides *what* to play; an `AudioSink` does the playing.
//! Clips that fail to load are logged once and skipped for the rest of the run.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::settings::Settings;
use crate::sim::{Cue, LevelId};

/// Sound clips used by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clip {
    /// Egg collected
    Chirp,
    /// Something good happened
    Yay,
    /// Roasted (one-shot)
    Awh,
    /// Roasted (looping)
    Roasted,
    /// Per-level background track
    Music(LevelId),
}

impl Clip {
    /// Every clip, in preload order
    pub const ALL: [Clip; 7] = [
        Clip::Chirp,
        Clip::Yay,
        Clip::Awh,
        Clip::Roasted,
        Clip::Music(LevelId::One),
        Clip::Music(LevelId::Two),
        Clip::Music(LevelId::Three),
    ];

    /// Asset path relative to the asset directory
    pub fn path(&self) -> &'static str {
        match self {
            Clip::Chirp => "data/chirp.wav",
            Clip::Yay => "data/yay.wav",
            Clip::Awh => "data/awh.wav",
            Clip::Roasted => "data/roasted.wav",
            Clip::Music(LevelId::One) => "data/level1.wav",
            Clip::Music(LevelId::Two) => "data/level2.wav",
            Clip::Music(LevelId::Three) => "data/level3.wav",
        }
    }

    pub fn is_music(&self) -> bool {
        matches!(self, Clip::Music(_))
    }
}

/// Something that can play clips
pub trait AudioSink {
    /// Prepare a clip for playback
    fn load(&mut self, clip: Clip) -> Result<()>;
    /// Play once
    fn play(&mut self, clip: Clip, volume: f32);
    /// Play until stopped
    fn start_loop(&mut self, clip: Clip, volume: f32);
    fn stop(&mut self, clip: Clip);
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn load(&mut self, _clip: Clip) -> Result<()> {
        Ok(())
    }

    fn play(&mut self, _clip: Clip, _volume: f32) {}

    fn start_loop(&mut self, _clip: Clip, _volume: f32) {}

    fn stop(&mut self, _clip: Clip) {}
}

/// Resolves clips against an asset directory and logs playback
#[derive(Debug, Clone)]
pub struct FileSink {
    asset_dir: PathBuf,
}

impl FileSink {
    pub fn new(asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
        }
    }

    pub fn asset_dir(&self) -> &Path {
        &self.asset_dir
    }

    fn resolve(&self, clip: Clip) -> PathBuf {
        self.asset_dir.join(clip.path())
    }
}

impl AudioSink for FileSink {
    fn load(&mut self, clip: Clip) -> Result<()> {
        let path = self.resolve(clip);
        let meta = std::fs::metadata(&path)
            .with_context(|| format!("Failed to open audio asset {}", path.display()))?;
        if !meta.is_file() {
            bail!("Audio asset {} is not a file", path.display());
        }
        Ok(())
    }

    fn play(&mut self, clip: Clip, volume: f32) {
        log::debug!("play {} at {:.2}", clip.path(), volume);
    }

    fn start_loop(&mut self, clip: Clip, volume: f32) {
        log::debug!("loop {} at {:.2}", clip.path(), volume);
    }

    fn stop(&mut self, clip: Clip) {
        log::debug!("stop {}", clip.path());
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    /// Clips that failed to load; never retried
    unavailable: HashSet<Clip>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    /// Selected background track
    music: Option<Clip>,
    music_playing: bool,
}

impl<S: AudioSink> AudioManager<S> {
    /// Create the manager and preload every clip
    pub fn new(mut sink: S, settings: &Settings) -> Self {
        let mut unavailable = HashSet::new();
        for clip in Clip::ALL {
            if let Err(e) = sink.load(clip) {
                log::warn!("Audio disabled for {}: {e:#}", clip.path());
                unavailable.insert(clip);
            }
        }
        Self {
            sink,
            unavailable,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.start_muted,
            music: None,
            music_playing: false,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn is_available(&self, clip: Clip) -> bool {
        !self.unavailable.contains(&clip)
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    /// Effective volume for a clip
    fn volume(&self, clip: Clip) -> f32 {
        let channel = if clip.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel
    }

    fn play(&mut self, clip: Clip) {
        if self.muted || !self.is_available(clip) {
            return;
        }
        let vol = self.volume(clip);
        self.sink.play(clip, vol);
    }

    fn start_loop(&mut self, clip: Clip) -> bool {
        if self.muted || !self.is_available(clip) {
            return false;
        }
        let vol = self.volume(clip);
        self.sink.start_loop(clip, vol);
        true
    }

    fn stop(&mut self, clip: Clip) {
        if self.is_available(clip) {
            self.sink.stop(clip);
        }
    }

    /// Play the sound attached to a game event
    pub fn play_cue(&mut self, cue: Cue) {
        match cue {
            Cue::Chirp => self.play(Clip::Chirp),
            Cue::Cheer => self.play(Clip::Yay),
        }
    }

    /// Switch to a level's track and start it unless muted
    pub fn play_music(&mut self, level: LevelId) {
        self.stop_music();
        self.music = Some(Clip::Music(level));
        self.resume_music();
    }

    /// Restart the selected track
    pub fn resume_music(&mut self) {
        if self.music_playing {
            return;
        }
        if let Some(track) = self.music {
            self.music_playing = self.start_loop(track);
        }
    }

    pub fn stop_music(&mut self) {
        if let Some(track) = self.music.filter(|_| self.music_playing) {
            self.stop(track);
        }
        self.music_playing = false;
    }

    /// One "awh" then the roasted loop
    pub fn start_roasted(&mut self) {
        self.play(Clip::Awh);
        self.start_loop(Clip::Roasted);
    }

    pub fn stop_roasted(&mut self) {
        self.stop(Clip::Roasted);
    }
}
