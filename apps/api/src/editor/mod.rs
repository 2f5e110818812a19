//! Authoring side: the toolbar, per-section list editors, the skills editor and
//! the editing sessions that tie them to one document.

pub mod handlers;
pub mod registry;
pub mod sections;
pub mod session;
pub mod skills;
pub mod toolbar;

use thiserror::Error;

pub use registry::SessionRegistry;
pub use session::{EditOp, EditingSession, SessionSnapshot};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("{section} has no entry at index {index} (length {len})")]
    IndexOutOfRange {
        section: &'static str,
        index: usize,
        len: usize,
    },

    #[error("unknown skill category '{0}'")]
    UnknownCategory(String),
}
