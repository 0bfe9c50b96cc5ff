//! Directory-activity events derived from raw `notify` events

use std::path::PathBuf;

use notify::{
    event::{ModifyKind, RenameMode},
    EventKind,
};

/// Operation kind of an observed filesystem notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
    Create,
    Write,
    Remove,
    Rename,
    Other,
}

impl FsOp {
    /// Whether this operation counts as activity for the last-write gauge
    pub const fn marks_write(self) -> bool {
        matches!(self, Self::Create | Self::Write)
    }
}

/// One path touched by one operation. Transient, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEvent {
    pub path: PathBuf,
    pub op: FsOp,
}

/// Split a `notify` event into per-path [`FsEvent`]s.
///
/// A path renamed *into* a watched directory is reported as a create, since
/// from the watcher's point of view a new entry appeared there. A paired
/// rename (`Both`) yields a rename for the source and a create for the
/// destination.
pub fn classify(event: &notify::Event) -> Vec<FsEvent> {
    match event.kind {
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => event
            .paths
            .iter()
            .enumerate()
            .map(|(i, path)| FsEvent {
                path: path.clone(),
                op: if i == 0 { FsOp::Rename } else { FsOp::Create },
            })
            .collect(),
        kind => {
            let op = op_for(kind);
            event
                .paths
                .iter()
                .map(|path| FsEvent {
                    path: path.clone(),
                    op,
                })
                .collect()
        }
    }
}

const fn op_for(kind: EventKind) -> FsOp {
    match kind {
        EventKind::Create(_) | EventKind::Modify(ModifyKind::Name(RenameMode::To)) => FsOp::Create,
        EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Any) => FsOp::Write,
        EventKind::Modify(ModifyKind::Name(_)) => FsOp::Rename,
        EventKind::Remove(_) => FsOp::Remove,
        // metadata, access, any/other
        _ => FsOp::Other,
    }
}
