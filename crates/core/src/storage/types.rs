use std::fmt;

/// Lifecycle of a local store handle.
///
/// `Unopened -> Open -> Closed`. A closed store never reopens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Unopened,
    Open,
    Closed,
}

impl fmt::Display for StoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreState::Unopened => "unopened",
            StoreState::Open => "open",
            StoreState::Closed => "closed",
        };
        f.write_str(name)
    }
}
