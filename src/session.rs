//! Game session: level progression, reset, mute and player intents
//!
//! The session is the single writer of all game state. A presentation
//! adapter feeds it frame time and input intents, then reads the level,
//! the HUD and the queued `SessionEvent`s back out.

use glam::Vec2;
use serde::Serialize;

use crate::audio::{AudioManager, AudioSink};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{EntityId, GameEvent, Level, LevelId, RoastCause, SessionFlags, tick};
use crate::view::Camera;

/// Notifications for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionEvent {
    /// A new level was built
    LevelChanged { level: LevelId },
    /// The level's introduction is up; the level waits for `dismiss_intro`
    IntroShown { level: LevelId },
    /// The chicken was roasted
    GameOver { cause: RoastCause },
    /// The golden egg was collected
    Won,
    /// Past the last level
    Completed,
    MuteChanged { muted: bool },
    /// Show or hide the reset button
    ResetButton { visible: bool },
}

/// Walking direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    Left,
    Right,
}

impl Walk {
    fn speed(self) -> f32 {
        match self {
            Walk::Left => -WALK_SPEED,
            Walk::Right => WALK_SPEED,
        }
    }
}

/// Turns player intents into changes on the current level's chicken.
///
/// Outlives levels and resets, so the shot budget is spent once per session.
#[derive(Debug, Clone, Default)]
pub struct ChickenController {
    shots_fired: u32,
}

impl ChickenController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shots_fired(&self) -> u32 {
        self.shots_fired
    }

    pub fn shots_left(&self) -> u32 {
        MAX_SHOTS.saturating_sub(self.shots_fired)
    }

    pub fn start_walking(&self, level: &mut Level, direction: Walk) {
        level.chicken.start_walking(direction.speed());
    }

    pub fn stop_walking(&self, level: &mut Level) {
        level.chicken.stop_walking();
    }

    /// Jump where the level allows it and the chicken is standing
    pub fn jump(&self, level: &mut Level) -> bool {
        level.jump_enabled() && level.chicken.jump(JUMP_IMPULSE)
    }

    /// Fire water along the chicken's direction of motion
    pub fn shoot(&mut self, level: &mut Level, flags: &SessionFlags) -> Option<EntityId> {
        if !flags.water_collected || self.shots_fired >= MAX_SHOTS {
            return None;
        }
        let origin = level.chicken.pos;
        let direction = level.chicken.direction();
        self.shots_fired += 1;
        Some(level.spawn_projectile(origin, direction))
    }
}

/// Serializable summary of a session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub level: u32,
    pub steps: u64,
    pub credits: u32,
    pub roasted: bool,
    pub complete: bool,
    pub water_collected: bool,
    pub reward_collected: bool,
    pub time_left: Option<u32>,
    pub shots_fired: u32,
    pub muted: bool,
    pub finished: bool,
    pub chicken_pos: Vec2,
    pub entities: usize,
}

/// One play session across all levels
pub struct GameSession<S: AudioSink> {
    settings: Settings,
    level: Level,
    flags: SessionFlags,
    controller: ChickenController,
    audio: AudioManager<S>,
    camera: Camera,
    /// The roasted loop should be audible (kept across mute)
    roasted_sound_playing: bool,
    intro_showing: bool,
    reset_visible: bool,
    finished: bool,
    accumulator: f32,
    steps: u64,
    events: Vec<SessionEvent>,
}

impl<S: AudioSink> GameSession<S> {
    pub fn new(settings: Settings, sink: S) -> Self {
        let flags = SessionFlags::default();
        let level = Level::new(LevelId::One, &flags);
        let camera = Camera::new(level.chicken.pos);
        let audio = AudioManager::new(sink, &settings);
        let mut session = Self {
            settings,
            level,
            flags,
            controller: ChickenController::new(),
            audio,
            camera,
            roasted_sound_playing: false,
            intro_showing: false,
            reset_visible: false,
            finished: false,
            accumulator: 0.0,
            steps: 0,
            events: Vec::new(),
        };
        session.events.push(SessionEvent::LevelChanged {
            level: LevelId::One,
        });
        session.show_intro();
        session.audio.play_music(LevelId::One);
        session
    }

    // === Accessors ===

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn flags(&self) -> SessionFlags {
        self.flags
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn controller(&self) -> &ChickenController {
        &self.controller
    }

    pub fn audio(&self) -> &AudioManager<S> {
        &self.audio
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn is_muted(&self) -> bool {
        self.audio.is_muted()
    }

    pub fn roasted_sound_playing(&self) -> bool {
        self.roasted_sound_playing
    }

    pub fn intro_showing(&self) -> bool {
        self.intro_showing
    }

    pub fn reset_visible(&self) -> bool {
        self.reset_visible
    }

    /// Every level has been played through
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Simulation steps run so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Take the queued notifications
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            level: self.level.id().number(),
            steps: self.steps,
            credits: self.level.chicken.credits,
            roasted: self.level.is_game_over(),
            complete: self.level.is_complete(&self.flags),
            water_collected: self.flags.water_collected,
            reward_collected: self.flags.reward_collected,
            time_left: self.level.countdown().map(|c| c.time_left()),
            shots_fired: self.controller.shots_fired(),
            muted: self.is_muted(),
            finished: self.finished,
            chicken_pos: self.level.chicken.pos,
            entities: self.level.entities().len(),
        }
    }

    // === Loop ===

    /// Advance by a frame's worth of time in fixed steps
    pub fn update(&mut self, frame_dt: f32) {
        if !self.level.is_running() {
            self.accumulator = 0.0;
            return;
        }
        let dt = frame_dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            // Consume before stepping; a level change clears the accumulator
            self.accumulator -= SIM_DT;
            self.step();
            substeps += 1;
        }
    }

    fn step(&mut self) {
        if !self.level.is_running() {
            return;
        }
        let events = tick(&mut self.level, &mut self.flags, SIM_DT);
        self.steps += 1;
        self.camera.follow(self.level.chicken.pos, self.level.id());
        for event in events {
            self.handle(event);
        }
    }

    fn handle(&mut self, event: GameEvent) {
        if let Some(cue) = event.cue() {
            self.audio.play_cue(cue);
        }
        match event {
            GameEvent::Roasted { cause } => self.on_roasted(cause),
            GameEvent::ReachedExit { level } => {
                log::info!("Level {} cleared", level.number());
                self.advance_level();
            }
            GameEvent::Won => {
                self.reset_visible = true;
                self.events.push(SessionEvent::Won);
                self.events
                    .push(SessionEvent::ResetButton { visible: true });
            }
            other => log::trace!("{other:?}"),
        }
    }

    fn on_roasted(&mut self, cause: RoastCause) {
        self.audio.stop_music();
        if !self.audio.is_muted() {
            self.audio.start_roasted();
        }
        self.roasted_sound_playing = true;
        self.reset_visible = true;
        self.events.push(SessionEvent::GameOver { cause });
        self.events
            .push(SessionEvent::ResetButton { visible: true });
    }

    fn show_intro(&mut self) {
        if self.settings.show_intros {
            self.level.stop();
            self.intro_showing = true;
            self.events.push(SessionEvent::IntroShown {
                level: self.level.id(),
            });
        } else {
            self.intro_showing = false;
            self.level.start();
        }
    }

    /// Replace the current level
    fn load_level(&mut self, id: LevelId) {
        self.level.halt();
        self.level = Level::new(id, &self.flags);
        self.camera = Camera::new(self.level.chicken.pos);
        self.accumulator = 0.0;
        self.events.push(SessionEvent::LevelChanged { level: id });
    }

    // === Operations ===

    /// Close the introduction and start the level
    pub fn dismiss_intro(&mut self) {
        if !self.intro_showing {
            return;
        }
        self.intro_showing = false;
        self.level.start();
    }

    /// Move on to the next level, or finish the session after the last one
    pub fn advance_level(&mut self) {
        let Some(next) = self.level.id().next() else {
            if !self.finished {
                log::info!("Well done! Game completed.");
                self.finished = true;
                self.level.stop();
                self.events.push(SessionEvent::Completed);
            }
            return;
        };
        log::info!("Entering level {}", next.number());
        self.load_level(next);
        self.audio.play_music(next);
        self.show_intro();
    }

    /// Start over from the first level
    pub fn reset_session(&mut self) {
        self.reset_visible = false;
        self.events
            .push(SessionEvent::ResetButton { visible: false });

        self.audio.stop_roasted();
        self.roasted_sound_playing = false;
        self.audio.stop_music();

        if !self.settings.carry_flags_across_reset {
            self.flags = SessionFlags::default();
        }
        self.load_level(LevelId::One);
        self.finished = false;
        self.intro_showing = false;

        self.audio.play_music(LevelId::One);
        self.level.start();
        log::info!("Game reset");
    }

    pub fn toggle_mute(&mut self) {
        if self.audio.is_muted() {
            self.audio.set_muted(false);
            if self.roasted_sound_playing {
                self.audio.start_roasted();
            } else {
                self.audio.resume_music();
            }
        } else {
            self.audio.stop_music();
            self.audio.stop_roasted();
            self.audio.set_muted(true);
        }
        let muted = self.audio.is_muted();
        log::debug!("Muted: {muted}");
        self.events.push(SessionEvent::MuteChanged { muted });
    }

    // === Intents ===

    pub fn start_walking(&mut self, direction: Walk) {
        self.controller.start_walking(&mut self.level, direction);
    }

    pub fn stop_walking(&mut self) {
        self.controller.stop_walking(&mut self.level);
    }

    pub fn jump(&mut self) -> bool {
        self.controller.jump(&mut self.level)
    }

    pub fn shoot(&mut self) -> Option<EntityId> {
        self.controller.shoot(&mut self.level, &self.flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Clip;
    use crate::audio::tests::{Call, RecordingSink};
    use crate::sim::EntityKind;

    fn session() -> GameSession<RecordingSink> {
        GameSession::new(Settings::default(), RecordingSink::default())
    }

    fn started() -> GameSession<RecordingSink> {
        let mut s = session();
        s.dismiss_intro();
        s.drain_events();
        s
    }

    fn roast(s: &mut GameSession<RecordingSink>) {
        let pos = s.level.chicken.pos;
        s.level.spawn(EntityKind::Fire, pos);
        s.update(SIM_DT);
        assert!(s.level().is_game_over());
    }

    fn calls(s: &GameSession<RecordingSink>) -> &[Call] {
        &s.audio().sink().calls
    }

    #[test]
    fn test_starts_paused_on_intro() {
        let mut s = session();
        assert_eq!(s.level().id(), LevelId::One);
        assert!(s.intro_showing());
        assert!(!s.level().is_running());
        assert_eq!(
            s.drain_events(),
            vec![
                SessionEvent::LevelChanged {
                    level: LevelId::One
                },
                SessionEvent::IntroShown {
                    level: LevelId::One
                },
            ]
        );
        assert_eq!(calls(&s), &[Call::Loop(Clip::Music(LevelId::One))]);

        let before = s.level().chicken.pos;
        s.update(1.0);
        assert_eq!(s.level().chicken.pos, before);
        assert_eq!(s.steps(), 0);

        s.dismiss_intro();
        s.update(SIM_DT);
        assert_eq!(s.steps(), 1);
        assert!(s.level().chicken.pos.y < before.y);
    }

    #[test]
    fn test_long_frames_are_capped() {
        let mut s = started();
        s.update(10.0);
        assert!(s.steps() <= MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_roast_plays_once_and_shows_reset() {
        let mut s = started();
        roast(&mut s);
        assert!(s.roasted_sound_playing());
        assert!(s.reset_visible());
        assert!(s.drain_events().contains(&SessionEvent::GameOver {
            cause: RoastCause::Fire
        }));
        let tail = &calls(&s)[calls(&s).len() - 3..];
        assert_eq!(
            tail,
            &[
                Call::Stop(Clip::Music(LevelId::One)),
                Call::Play(Clip::Awh),
                Call::Loop(Clip::Roasted),
            ]
        );
    }

    #[test]
    fn test_reset_scenario() {
        let mut s = started();
        s.flags.water_collected = true;
        s.level.chicken.credits = 7;
        roast(&mut s);

        s.reset_session();
        assert_eq!(s.level().id(), LevelId::One);
        assert_eq!(s.level().chicken.credits, 0);
        assert!(!s.level().is_game_over());
        assert!(s.level().is_running());
        assert!(!s.intro_showing());
        assert!(!s.roasted_sound_playing());
        assert!(!s.reset_visible());
        assert!(s.flags().water_collected);
        assert!(s.audio().is_music_playing());
    }

    #[test]
    fn test_reset_from_level2_gives_fresh_timer() {
        let mut s = started();
        s.advance_level();
        s.dismiss_intro();
        for _ in 0..5 * TICKS_PER_SECOND {
            s.update(SIM_DT);
        }
        let used = s.level().countdown().map(|c| c.time_left());
        assert!(used.is_some_and(|t| t < LEVEL2_TIME_LIMIT));

        s.reset_session();
        assert_eq!(s.level().id(), LevelId::One);
        assert_eq!(s.level().chicken.credits, 0);
        assert!(!s.level().is_game_over());
        assert!(s.level().countdown().is_none());

        s.advance_level();
        assert_eq!(s.level().id(), LevelId::Two);
        assert_eq!(
            s.level().countdown().map(|c| c.time_left()),
            Some(LEVEL2_TIME_LIMIT)
        );
    }

    #[test]
    fn test_reset_from_level3_keeps_water() {
        let mut s = started();
        s.advance_level();
        s.advance_level();
        s.dismiss_intro();
        s.flags.water_collected = true;
        s.level.chicken.credits = 12;

        s.reset_session();
        assert_eq!(s.level().id(), LevelId::One);
        assert_eq!(s.level().chicken.credits, 0);
        assert!(!s.level().is_game_over());
        assert!(s.flags().water_collected);
    }

    #[test]
    fn test_exit_without_intro_keeps_stepping() {
        let settings = Settings {
            show_intros: false,
            ..Settings::default()
        };
        let mut s = GameSession::new(settings, RecordingSink::default());
        assert!(s.level().is_running());
        let nest = s.level().find(EntityKind::Nest).map(|e| e.pos).unwrap();
        s.level.chicken.pos = nest + Vec2::new(0.0, 5.05);

        s.update(SIM_DT);
        assert_eq!(s.level().id(), LevelId::Two);
        assert!(s.level().is_running());
        assert_eq!(s.accumulator, 0.0);

        let before = s.steps();
        s.update(SIM_DT);
        assert_eq!(s.steps(), before + 1);
    }

    #[test]
    fn test_reset_can_clear_flags() {
        let settings = Settings {
            carry_flags_across_reset: false,
            ..Settings::default()
        };
        let mut s = GameSession::new(settings, RecordingSink::default());
        s.flags.water_collected = true;
        s.flags.reward_collected = true;
        s.reset_session();
        assert_eq!(s.flags(), SessionFlags::default());
    }

    #[test]
    fn test_mute_round_trip() {
        let mut s = started();
        s.level.chicken.credits = 5;
        let before = s.snapshot();

        s.toggle_mute();
        assert!(s.is_muted());
        assert!(!s.audio().is_music_playing());
        s.toggle_mute();
        assert!(!s.is_muted());
        assert!(s.audio().is_music_playing());
        assert_eq!(s.snapshot(), before);
        assert_eq!(
            s.drain_events(),
            vec![
                SessionEvent::MuteChanged { muted: true },
                SessionEvent::MuteChanged { muted: false },
            ]
        );
    }

    #[test]
    fn test_unmute_resumes_roasted_loop() {
        let mut s = started();
        roast(&mut s);
        s.toggle_mute();
        assert!(s.roasted_sound_playing());
        assert_eq!(calls(&s).last(), Some(&Call::Stop(Clip::Roasted)));

        s.toggle_mute();
        assert_eq!(calls(&s).last(), Some(&Call::Loop(Clip::Roasted)));
        assert!(!s.audio().is_music_playing());
    }

    #[test]
    fn test_roast_while_muted_stays_silent() {
        let mut s = started();
        s.toggle_mute();
        let n = calls(&s).len();
        roast(&mut s);
        assert!(s.roasted_sound_playing());
        assert_eq!(calls(&s).len(), n);
    }

    #[test]
    fn test_level_progression() {
        let mut s = started();
        s.advance_level();
        assert_eq!(s.level().id(), LevelId::Two);
        assert!(s.intro_showing());
        assert!(!s.level().countdown().is_some_and(|c| c.is_running()));
        s.dismiss_intro();
        assert!(s.level().countdown().is_some_and(|c| c.is_running()));

        s.advance_level();
        assert_eq!(s.level().id(), LevelId::Three);
        s.advance_level();
        assert!(s.finished());
        assert_eq!(s.level().id(), LevelId::Three);
        s.advance_level();

        let completed = s
            .drain_events()
            .iter()
            .filter(|e| **e == SessionEvent::Completed)
            .count();
        assert_eq!(completed, 1);
    }

    #[test]
    fn test_intro_pauses_countdown() {
        let mut s = started();
        s.advance_level();
        for _ in 0..600 {
            s.update(SIM_DT);
        }
        assert_eq!(
            s.level().countdown().map(|c| c.time_left()),
            Some(LEVEL2_TIME_LIMIT)
        );
    }

    #[test]
    fn test_nest_leads_to_level2() {
        let mut s = started();
        let nest = s.level().find(EntityKind::Nest).map(|e| e.pos).unwrap();
        s.level.chicken.pos = nest + Vec2::new(0.0, 5.05);
        s.update(SIM_DT);
        assert_eq!(s.level().id(), LevelId::Two);
        assert!(s.drain_events().contains(&SessionEvent::LevelChanged {
            level: LevelId::Two
        }));
    }

    #[test]
    fn test_shots_need_water_and_run_out() {
        let mut s = started();
        assert_eq!(s.shoot(), None);

        s.flags.water_collected = true;
        for _ in 0..MAX_SHOTS {
            assert!(s.shoot().is_some());
        }
        assert_eq!(s.shoot(), None);
        assert_eq!(s.level().count(EntityKind::WaterProjectile), 3);

        // The budget survives a reset
        s.reset_session();
        assert_eq!(s.shoot(), None);
        assert_eq!(s.controller().shots_left(), 0);
    }

    #[test]
    fn test_stationary_shot_has_no_velocity() {
        let mut s = started();
        s.flags.water_collected = true;
        let id = s.shoot().unwrap();
        assert_eq!(s.level().entity(id).map(|e| e.vel), Some(Vec2::ZERO));

        s.start_walking(Walk::Left);
        let id = s.shoot().unwrap();
        assert_eq!(
            s.level().entity(id).map(|e| e.vel),
            Some(Vec2::new(-PROJECTILE_SPEED, 0.0))
        );
    }

    #[test]
    fn test_jump_only_on_level2() {
        let mut s = started();
        s.level.chicken.grounded = true;
        assert!(!s.jump());

        s.advance_level();
        s.dismiss_intro();
        s.level.chicken.grounded = true;
        assert!(s.jump());
        assert_eq!(s.level().chicken.vel.y, JUMP_IMPULSE);
    }

    #[test]
    fn test_win_keeps_level_running() {
        let mut s = started();
        s.advance_level();
        s.advance_level();
        s.dismiss_intro();
        s.drain_events();

        let pos = s.level.chicken.pos;
        s.level.spawn(EntityKind::GoldEgg, pos);
        s.update(SIM_DT);
        let events = s.drain_events();
        assert!(events.contains(&SessionEvent::Won));
        assert!(s.reset_visible());
        assert!(s.level().is_running());
        assert!(s.snapshot().complete);
    }

    #[test]
    fn test_snapshot_serializes() {
        let s = session();
        let json = serde_json::to_value(s.snapshot()).unwrap();
        assert_eq!(json["level"], 1);
        assert_eq!(json["credits"], 0);
        assert!(json["time_left"].is_null());
    }
}
