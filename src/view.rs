//! Read-only presentation helpers
//!
//! What a renderer needs besides the sprites themselves: where the camera
//! looks, what to draw where, the HUD strings and the per-level introductions.

use glam::Vec2;

use crate::audio::AudioSink;
use crate::consts::*;
use crate::session::GameSession;
use crate::sim::{Level, LevelId};

/// Camera that trails the chicken, pulled slightly back toward where the
/// level started
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Chicken position when the level was built
    anchor: Vec2,
    centre: Vec2,
}

impl Camera {
    pub fn new(anchor: Vec2) -> Self {
        Self {
            anchor,
            centre: anchor,
        }
    }

    pub fn centre(&self) -> Vec2 {
        self.centre
    }

    /// Recompute the view centre for this step
    pub fn follow(&mut self, chicken_pos: Vec2, level: LevelId) {
        let dx = (self.anchor.x - chicken_pos.x) * CAMERA_EASE_X;
        let dy = (self.anchor.y - chicken_pos.y) * CAMERA_EASE_Y;
        let mut y = chicken_pos.y + dy;
        if level == LevelId::Three {
            y = y.max(LEVEL3_CAMERA_FLOOR);
        }
        self.centre = Vec2::new(chicken_pos.x + dx, y);
    }
}

/// One entity sprite to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw<'a> {
    pub sprite: &'a str,
    pub pos: Vec2,
    /// Display height in world units
    pub height: f32,
}

/// Sprites for every placed entity, in id order
pub fn sprites(level: &Level) -> Vec<SpriteDraw<'_>> {
    level
        .entities()
        .iter()
        .map(|e| SpriteDraw {
            sprite: e.sprite(),
            pos: e.pos,
            // Borders stretch to their collision box
            height: match e.spec().sprite_height {
                h if h > 0.0 => h,
                _ => e.half_extents.y * 2.0,
            },
        })
        .collect()
}

pub const COOKED_TEXT: &str = "Oh no! You're cooked! Game Over!";
pub const TIME_UP_TEXT: &str = "Time's up! The nest burnt down! Game Over!";
pub const WON_TEXT: &str = "Golden egg collected! You won!";
pub const RESET_LABEL: &str = "Reset Game";
/// Clock turns red below this many seconds
pub const CLOCK_WARNING_SECS: u32 = 10;

/// HUD contents for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    /// "Eggs collected: N", hidden after the win
    pub credits: Option<String>,
    /// Centred game over / win banner
    pub banner: Option<&'static str>,
    /// Level 2 clock as `m:s`
    pub clock: Option<String>,
    pub clock_warning: bool,
    pub mute_glyph: &'static str,
    pub reset_visible: bool,
    pub background: &'static str,
    pub chicken_sprite: &'static str,
}

impl Hud {
    pub fn from_session<S: AudioSink>(session: &GameSession<S>) -> Self {
        let level = session.level();
        let id = level.id();
        let complete = level.is_complete(&session.flags());
        let game_over = level.is_game_over();
        let time_left = level.countdown().map(|c| c.time_left());

        let credits = (!(id == LevelId::Three && complete))
            .then(|| format!("Eggs collected: {}", level.chicken.credits));

        let banner = match (id, time_left) {
            (LevelId::Two, Some(0)) => Some(TIME_UP_TEXT),
            _ if game_over => Some(COOKED_TEXT),
            (LevelId::Three, _) if complete => Some(WON_TEXT),
            _ => None,
        };

        let clock = level
            .countdown()
            .filter(|c| c.time_left() > 0 && !game_over)
            .map(|c| format!("{}:{}", c.minutes_left(), c.seconds_left()));
        let clock_warning = time_left.is_some_and(|t| t < CLOCK_WARNING_SECS);

        Self {
            credits,
            banner,
            clock,
            clock_warning,
            mute_glyph: if session.is_muted() { "🔇" } else { "🔊" },
            reset_visible: session.reset_visible(),
            background: id.background(),
            chicken_sprite: if game_over {
                "data/roastChicken.gif"
            } else {
                "data/chicken.GIF"
            },
        }
    }
}

/// Story shown before a level starts
pub fn intro_text(level: LevelId) -> &'static str {
    match level {
        LevelId::One => {
            "Welcome to Happy Chicken!\n\n\
             Collect the eggs and avoid the fires so that you\n\
             don't get cooked.\n\
             After reaching the ground, go into the nest to go\n\
             home and proceed to the next level!\n\n\
             Have Fun!"
        }
        LevelId::Two => {
            "Great job! You're home!\n\n\
             But oh no! The nest is burning down!\n\
             Collect all the eggs and avoid the fires so that\n\
             you don't get cooked.\n\
             Climb upwards to find the door to exit the nest\n\
             before the nest burns down!\n\n\
             Hurry!"
        }
        LevelId::Three => {
            "Phew! You escaped the nest in time!\n\n\
             Collect the eggs and avoid the fires so that you\n\
             don't get cooked.\n\
             Do beware of the moving fires!\n\
             After reaching the ground, collect the water bucket\n\
             and shoot water thrice to extinguish the last fire\n\
             in order to collect the golden egg and win the game!\n\n\
             Have fun!"
        }
    }
}

/// Key help for a level
pub fn controls_text(level: LevelId) -> &'static str {
    match level {
        LevelId::One => "Controls:\n← Move left     → Move right",
        LevelId::Two => "Controls:\n← Move left     → Move right     [ Space ] - Jump",
        LevelId::Three => "Controls:\n← Move left     → Move right     [ Shift ] - Shoot water",
    }
}

/// Label of the button that closes the intro
pub fn start_button_label(level: LevelId) -> &'static str {
    match level {
        LevelId::One => "Click me to start!",
        LevelId::Two | LevelId::Three => "Click me to continue!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullSink;
    use crate::settings::Settings;

    #[test]
    fn test_camera_eases_toward_anchor() {
        let mut camera = Camera::new(Vec2::new(0.0, 100.0));
        camera.follow(Vec2::new(10.0, 0.0), LevelId::One);
        let c = camera.centre();
        assert!((c.x - 8.0).abs() < 1e-4);
        assert!((c.y - 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_level3_camera_floor() {
        let mut camera = Camera::new(Vec2::new(0.0, 115.5));
        camera.follow(Vec2::new(0.0, -110.0), LevelId::Three);
        assert_eq!(camera.centre().y, LEVEL3_CAMERA_FLOOR);
        camera.follow(Vec2::new(0.0, -110.0), LevelId::One);
        assert!(camera.centre().y < LEVEL3_CAMERA_FLOOR);
    }

    #[test]
    fn test_fresh_session_hud() {
        let session = GameSession::new(Settings::default(), NullSink);
        let hud = Hud::from_session(&session);
        assert_eq!(hud.credits.as_deref(), Some("Eggs collected: 0"));
        assert_eq!(hud.banner, None);
        assert_eq!(hud.clock, None);
        assert_eq!(hud.mute_glyph, "🔊");
        assert!(!hud.reset_visible);
        assert_eq!(hud.background, "data/background1.jpg");
    }

    #[test]
    fn test_level2_clock() {
        let mut session = GameSession::new(Settings::default(), NullSink);
        session.advance_level();
        let hud = Hud::from_session(&session);
        assert_eq!(hud.clock.as_deref(), Some("2:0"));
        assert!(!hud.clock_warning);
    }

    #[test]
    fn test_sprites_follow_catalog_and_overrides() {
        use crate::sim::{EntityKind, SessionFlags};

        let level = Level::new(LevelId::Two, &SessionFlags::default());
        let draws = sprites(&level);
        assert_eq!(draws.len(), level.entities().len());

        let door = level.find(EntityKind::Door).map(|e| e.pos);
        let door_draw = draws.iter().find(|d| Some(d.pos) == door).unwrap();
        assert_eq!(door_draw.sprite, "data/door.png");
        assert_eq!(door_draw.height, 12.0);

        // The level 2 ground is soil, not the default grass
        let ground = level.find(EntityKind::Ground).map(|e| e.pos);
        let ground_draw = draws.iter().find(|d| Some(d.pos) == ground).unwrap();
        assert_eq!(ground_draw.sprite, "data/soil.jpg");

        let border = level.find(EntityKind::Border).map(|e| e.pos);
        let border_draw = draws.iter().find(|d| Some(d.pos) == border).unwrap();
        assert_eq!(border_draw.height, 100.0);
    }

    #[test]
    fn test_intro_texts_per_level() {
        assert!(intro_text(LevelId::One).starts_with("Welcome to Happy Chicken!"));
        assert!(intro_text(LevelId::Two).contains("burning down"));
        assert!(intro_text(LevelId::Three).contains("golden egg"));
        assert!(controls_text(LevelId::Two).contains("Jump"));
        assert!(controls_text(LevelId::Three).contains("Shoot water"));
        assert_eq!(start_button_label(LevelId::One), "Click me to start!");
    }
}
