/// Integrity violations raised while the catalogue is being built.
///
/// Any of these aborts the whole build: a catalogue that failed to load is
/// never handed to the query phase.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueError {
    #[error("stop {0:?} is already in the catalogue")]
    DuplicateStop(String),

    #[error("bus {0:?} is already in the catalogue")]
    DuplicateBus(String),

    #[error("unknown stop {0:?}")]
    UnknownStop(String),

    #[error("bus {0:?} has no stops")]
    EmptyRoute(String),

    #[error("ring bus {0:?} must start and end at the same stop")]
    RingNotClosed(String),
}
