//! Core conversation state machine
//!
//! Pure stage transitions driven by a data table of rules per stage.

pub mod effect;
pub mod event;
pub mod policy;
pub mod state;
pub(crate) mod transition;
pub mod trigger;

#[cfg(test)]
mod proptests;

pub use event::Event;
pub use policy::ReplyKind;
pub use state::{HistoryEntry, Level, Mode, Profile, Role, Session, Stage, Subject, GREETING};
pub use transition::transition;
