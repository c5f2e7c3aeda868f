//! Input events understood by the orbit controls
//!
//! These arrive from the frontend as JSON, e.g.
//! `{"kind":"pointer_down","pointer_id":1,"button":"primary","x":10,"y":20}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    /// Left mouse button (DOM button 0)
    Primary,
    /// Wheel button (DOM button 1)
    Middle,
    /// Right mouse button (DOM button 2)
    Secondary,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` value
    pub fn from_dom(button: i16) -> Option<Self> {
        match button {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// Arrow keys that pan the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanKey {
    Up,
    Down,
    Left,
    Right,
}

impl PanKey {
    /// Map a DOM `KeyboardEvent.code` value
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            _ => None,
        }
    }
}

/// One raw input event, in viewport pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlEvent {
    PointerDown {
        pointer_id: u32,
        button: PointerButton,
        x: f32,
        y: f32,
    },
    PointerMove {
        pointer_id: u32,
        x: f32,
        y: f32,
    },
    PointerUp {
        pointer_id: u32,
    },
    /// The host lost the pointer (touch cancelled, capture lost)
    PointerCancel {
        pointer_id: u32,
    },
    /// Positive `delta_y` scrolls down
    Wheel {
        delta_y: f32,
    },
    Key {
        key: PanKey,
    },
    /// The window lost focus; any drag in progress is over
    Blur,
}
