use crate::timeline::Playfield;

/// How long a judgment stays on screen, in seconds
pub const JUDGMENT_DISPLAY_TIME: f64 = 0.5;

/// Configuration for a [`Session`](super::Session)
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub playfield: Playfield,
    pub judgment_display_time: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            playfield: Playfield::default(),
            judgment_display_time: JUDGMENT_DISPLAY_TIME,
        }
    }
}

impl SessionConfig {
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }
}

/// Builder for SessionConfig
#[derive(Debug, Clone, Default)]
pub struct SessionConfigBuilder {
    playfield: Option<Playfield>,
    judgment_display_time: Option<f64>,
}

impl SessionConfigBuilder {
    pub fn playfield(mut self, playfield: Playfield) -> Self {
        self.playfield = Some(playfield);
        self
    }

    pub fn judgment_display_time(mut self, seconds: f64) -> Self {
        self.judgment_display_time = Some(seconds);
        self
    }

    pub fn build(self) -> SessionConfig {
        let default = SessionConfig::default();
        SessionConfig {
            playfield: self.playfield.unwrap_or(default.playfield),
            judgment_display_time: self
                .judgment_display_time
                .unwrap_or(default.judgment_display_time),
        }
    }
}
