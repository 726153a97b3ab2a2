use super::UnknownStateName;

/// Watch-while player type reported by the host player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerType {
    /// Either no video, or a short-form video is playing.
    None,
    /// A short-form video is playing over a previously opened regular video.
    Hidden,
    WatchWhileMinimized,
    WatchWhileMaximized,
    WatchWhileFullscreen,
    WatchWhileSlidingMaximizedFullscreen,
    WatchWhileSlidingMinimizedMaximized,
    WatchWhileSlidingMinimizedDismissed,
    WatchWhileSlidingFullscreenDismissed,
    /// Home feed inline playback.
    InlineMinimal,
    VirtualRealityFullscreen,
    WatchWhilePictureInPicture,
}

impl PlayerType {
    pub fn from_name(name: &str) -> Result<Self, UnknownStateName> {
        let value = match name {
            "NONE" => Self::None,
            "HIDDEN" => Self::Hidden,
            "WATCH_WHILE_MINIMIZED" => Self::WatchWhileMinimized,
            "WATCH_WHILE_MAXIMIZED" => Self::WatchWhileMaximized,
            "WATCH_WHILE_FULLSCREEN" => Self::WatchWhileFullscreen,
            "WATCH_WHILE_SLIDING_MAXIMIZED_FULLSCREEN" => {
                Self::WatchWhileSlidingMaximizedFullscreen
            }
            "WATCH_WHILE_SLIDING_MINIMIZED_MAXIMIZED" => Self::WatchWhileSlidingMinimizedMaximized,
            "WATCH_WHILE_SLIDING_MINIMIZED_DISMISSED" => Self::WatchWhileSlidingMinimizedDismissed,
            "WATCH_WHILE_SLIDING_FULLSCREEN_DISMISSED" => {
                Self::WatchWhileSlidingFullscreenDismissed
            }
            "INLINE_MINIMAL" => Self::InlineMinimal,
            "VIRTUAL_REALITY_FULLSCREEN" => Self::VirtualRealityFullscreen,
            "WATCH_WHILE_PICTURE_IN_PICTURE" => Self::WatchWhilePictureInPicture,
            other => {
                return Err(UnknownStateName {
                    cell: "player_type",
                    name: other.to_string(),
                });
            }
        };
        Ok(value)
    }

    /// No video, or a short-form video is on screen.
    pub fn is_none_or_hidden(self) -> bool {
        matches!(self, Self::None | Self::Hidden)
    }

    pub fn is_none_hidden_or_sliding_minimized(self) -> bool {
        self.is_none_or_hidden() || self == Self::WatchWhileSlidingMinimizedDismissed
    }

    pub fn is_none_hidden_or_minimized(self) -> bool {
        self.is_none_hidden_or_sliding_minimized() || self == Self::WatchWhileMinimized
    }

    /// A regular video is front and center; swipe gestures are eligible.
    pub fn is_maximized_or_fullscreen(self) -> bool {
        matches!(self, Self::WatchWhileMaximized | Self::WatchWhileFullscreen)
    }
}

/// Video playback state. May lag the actual playback state depending on
/// which producer callback last reported it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoState {
    New,
    Playing,
    Paused,
    RecoverableError,
    UnrecoverableError,
    Ended,
}

impl VideoState {
    pub fn from_name(name: &str) -> Result<Self, UnknownStateName> {
        let value = match name {
            "NEW" => Self::New,
            "PLAYING" => Self::Playing,
            "PAUSED" => Self::Paused,
            "RECOVERABLE_ERROR" => Self::RecoverableError,
            "UNRECOVERABLE_ERROR" => Self::UnrecoverableError,
            "ENDED" => Self::Ended,
            other => {
                return Err(UnknownStateName {
                    cell: "video_state",
                    name: other.to_string(),
                });
            }
        };
        Ok(value)
    }
}

/// Visibility state of the fullscreen player controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerControlsVisibility {
    Unknown,
    WillHide,
    Hidden,
    WillShow,
    Shown,
}

impl PlayerControlsVisibility {
    pub fn from_name(name: &str) -> Result<Self, UnknownStateName> {
        let value = match name {
            "PLAYER_CONTROLS_VISIBILITY_UNKNOWN" => Self::Unknown,
            "PLAYER_CONTROLS_VISIBILITY_WILL_HIDE" => Self::WillHide,
            "PLAYER_CONTROLS_VISIBILITY_HIDDEN" => Self::Hidden,
            "PLAYER_CONTROLS_VISIBILITY_WILL_SHOW" => Self::WillShow,
            "PLAYER_CONTROLS_VISIBILITY_SHOWN" => Self::Shown,
            other => {
                return Err(UnknownStateName {
                    cell: "player_controls",
                    name: other.to_string(),
                });
            }
        };
        Ok(value)
    }

    pub fn is_visible(self) -> bool {
        self == Self::Shown
    }
}

/// Bottom sheet open/closed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BottomSheetState {
    Closed,
    Open,
}

impl BottomSheetState {
    pub fn from_name(name: &str) -> Result<Self, UnknownStateName> {
        let value = match name {
            "CLOSED" => Self::Closed,
            "OPEN" => Self::Open,
            other => {
                return Err(UnknownStateName {
                    cell: "bottom_sheet",
                    name: other.to_string(),
                });
            }
        };
        Ok(value)
    }

    pub fn is_open(self) -> bool {
        self == Self::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_type_resolves_symbolic_names() {
        assert_eq!(
            PlayerType::from_name("WATCH_WHILE_FULLSCREEN").unwrap(),
            PlayerType::WatchWhileFullscreen
        );
        assert!(PlayerType::from_name("WATCH_WHILE_UPSIDE_DOWN").is_err());
    }

    #[test]
    fn gating_predicates() {
        assert!(PlayerType::None.is_none_or_hidden());
        assert!(PlayerType::WatchWhileMinimized.is_none_hidden_or_minimized());
        assert!(!PlayerType::WatchWhileMinimized.is_maximized_or_fullscreen());
        assert!(PlayerType::WatchWhileFullscreen.is_maximized_or_fullscreen());
        assert!(PlayerType::WatchWhileMaximized.is_maximized_or_fullscreen());
    }

    #[test]
    fn controls_visibility_resolves_host_names() {
        let state =
            PlayerControlsVisibility::from_name("PLAYER_CONTROLS_VISIBILITY_SHOWN").unwrap();
        assert!(state.is_visible());
        assert!(!PlayerControlsVisibility::Hidden.is_visible());
    }

    #[test]
    fn bottom_sheet_round_trip() {
        assert!(BottomSheetState::from_name("OPEN").unwrap().is_open());
        assert!(!BottomSheetState::from_name("CLOSED").unwrap().is_open());
    }
}
