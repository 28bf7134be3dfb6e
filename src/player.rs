use serde::{Deserialize, Serialize};

/// Playback bounds selected by a chapter click, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackWindow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,

    pub end: f64,
}

/// Coordinator state: at most one video plays at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PlayerState {
    Idle,
    Active {
        id: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        window: Option<PlaybackWindow>,
    },
}

/// Command for the playback widget, emitted when bounded playback reaches
/// the end of its window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum PlayerCommand {
    SeekAndPause { to: f64 },
}

/// Session-scoped single-player coordinator.
///
/// Selecting a new player implicitly stops the prior one (last-write-wins).
/// A chapter selection bounds playback: once the widget reports progress at
/// or past the window end, the coordinator asks it to seek back to the
/// window start and pause. The window stays in place so replaying the
/// chapter loops within the same bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCoordinator {
    state: PlayerState,
}

impl Default for PlayerCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerCoordinator {
    pub fn new() -> Self {
        Self {
            state: PlayerState::Idle,
        }
    }

    /// Make `id` the active player, unbounded. Clears any chapter window.
    pub fn select(&mut self, id: impl Into<String>) {
        self.state = PlayerState::Active {
            id: id.into(),
            window: None,
        };
    }

    /// Make `id` the active player, bounded to `[start, end]`.
    pub fn select_chapter(&mut self, id: impl Into<String>, start: f64, end: f64) {
        self.state = PlayerState::Active {
            id: id.into(),
            window: Some(PlaybackWindow {
                start: Some(start),
                end,
            }),
        };
    }

    pub fn clear(&mut self) {
        self.state = PlayerState::Idle;
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn current_player_id(&self) -> Option<&str> {
        match &self.state {
            PlayerState::Active { id, .. } => Some(id),
            PlayerState::Idle => None,
        }
    }

    /// Whether `id` is the one player allowed to be playing right now.
    pub fn is_playing(&self, id: &str) -> bool {
        self.current_player_id() == Some(id)
    }

    /// Feed a playback progress report. Returns the widget command when
    /// bounded playback has reached the end of its window.
    pub fn on_progress(&self, played_seconds: f64) -> Option<PlayerCommand> {
        match &self.state {
            PlayerState::Active {
                window: Some(window),
                ..
            } if played_seconds >= window.end => Some(PlayerCommand::SeekAndPause {
                to: window.start.unwrap_or(0.0),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_player_exclusivity() {
        let mut player = PlayerCoordinator::new();
        assert_eq!(player.state(), &PlayerState::Idle);

        player.select("v1");
        assert!(player.is_playing("v1"));

        player.select("v2");
        assert_eq!(
            player.state(),
            &PlayerState::Active {
                id: "v2".to_string(),
                window: None,
            }
        );
        assert!(!player.is_playing("v1"));
    }

    #[test]
    fn test_chapter_bounding_seeks_back_and_pauses() {
        let mut player = PlayerCoordinator::new();
        player.select_chapter("v1", 10.0, 20.0);

        assert_eq!(player.on_progress(19.9), None);
        assert_eq!(
            player.on_progress(20.0),
            Some(PlayerCommand::SeekAndPause { to: 10.0 })
        );

        // Bounded, not one-shot: the window survives so a replay loops.
        assert_eq!(
            player.on_progress(21.3),
            Some(PlayerCommand::SeekAndPause { to: 10.0 })
        );
    }

    #[test]
    fn test_plain_select_clears_the_window() {
        let mut player = PlayerCoordinator::new();
        player.select_chapter("v1", 10.0, 20.0);

        player.select("v1");
        assert_eq!(
            player.state(),
            &PlayerState::Active {
                id: "v1".to_string(),
                window: None,
            }
        );
        assert_eq!(player.on_progress(25.0), None);
    }

    #[test]
    fn test_missing_window_start_falls_back_to_zero() {
        let player = PlayerCoordinator {
            state: PlayerState::Active {
                id: "v1".to_string(),
                window: Some(PlaybackWindow {
                    start: None,
                    end: 5.0,
                }),
            },
        };

        assert_eq!(
            player.on_progress(5.0),
            Some(PlayerCommand::SeekAndPause { to: 0.0 })
        );
    }

    #[test]
    fn test_idle_ignores_progress_and_clear_resets() {
        let mut player = PlayerCoordinator::new();
        assert_eq!(player.on_progress(100.0), None);

        player.select_chapter("v1", 0.0, 10.0);
        player.clear();
        assert_eq!(player.state(), &PlayerState::Idle);
        assert_eq!(player.on_progress(100.0), None);
    }
}
