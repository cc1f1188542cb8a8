//! Opaque build-settings levels.
//!
//! The project graph stores build settings but never evaluates them;
//! `$(VAR)` expansion belongs to a different layer. A [`Level`] is an
//! ordered list of named settings with front-to-back precedence: the
//! first entry with a matching name wins.

mod level;
mod list;

pub use level::{Level, Setting, SettingValue};
pub use list::parse_list;
