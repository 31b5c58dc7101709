//! Controller kinds and their button sets

use std::fmt;

/// The kind of controller being emulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerKind {
    /// Pro Controller (the default for script execution)
    #[default]
    ProController,

    /// Left Joy-Con half
    JoyConL,

    /// Right Joy-Con half
    JoyConR,
}

const PRO_BUTTONS: &[&str] = &[
    "y", "x", "b", "a", "r", "zr", "minus", "plus", "r_stick", "l_stick", "home", "capture",
    "down", "up", "right", "left", "l", "zl",
];

const JOYCON_L_BUTTONS: &[&str] = &[
    "minus", "l_stick", "capture", "down", "up", "right", "left", "sr", "sl", "l", "zl",
];

const JOYCON_R_BUTTONS: &[&str] = &[
    "y", "x", "b", "a", "sr", "sl", "r", "zr", "plus", "r_stick", "home",
];

impl ControllerKind {
    /// All button names this controller kind carries
    pub fn buttons(&self) -> &'static [&'static str] {
        match self {
            ControllerKind::ProController => PRO_BUTTONS,
            ControllerKind::JoyConL => JOYCON_L_BUTTONS,
            ControllerKind::JoyConR => JOYCON_R_BUTTONS,
        }
    }

    /// Look up the canonical name for a button, if this kind carries it
    pub fn button(&self, key: &str) -> Option<&'static str> {
        self.buttons().iter().find(|name| **name == key).copied()
    }

    /// Check whether this kind carries the given button
    pub fn has_button(&self, key: &str) -> bool {
        self.button(key).is_some()
    }
}

impl fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerKind::ProController => write!(f, "Pro Controller"),
            ControllerKind::JoyConL => write!(f, "Joy-Con (L)"),
            ControllerKind::JoyConR => write!(f, "Joy-Con (R)"),
        }
    }
}
