//! Error taxonomy.
//!
//! Degenerate geometry (zero/negative sizes, disjoint clips, out-of-bounds
//! writes) is never an error anywhere in the crate; errors are reserved for
//! misuse of the API, failing user handlers, and the terminal itself.

use std::io;

use crate::tree::ControlId;

/// Errors surfaced by the toolkit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `Console::start` was called while already running.
    #[error("console is already started")]
    AlreadyStarted,

    /// A lifecycle operation required a running console.
    #[error("console is not started")]
    NotStarted,

    /// A child was attached to a control that cannot hold children.
    #[error("control {0:?} cannot hold children")]
    NotAParent(ControlId),

    /// A name is already taken in the target control's tree.
    #[error("a control named {0:?} already exists in this tree")]
    DuplicateName(String),

    /// Attaching would make a control its own ancestor.
    #[error("attachment would create a parent cycle")]
    ParentCycle,

    /// A window operation was given a control that is not a top-level
    /// window of this console.
    #[error("control {0:?} is not a top-level window of this console")]
    NotTopLevel(ControlId),

    /// A user event handler returned an error and the control did not opt
    /// into suppression.
    #[error("event handler failed: {0}")]
    Handler(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
