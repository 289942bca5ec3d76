//! Named collections held by the record store.

use std::fmt;

/// One JSON array document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Incidents,
    Alerts,
}

impl Collection {
    /// Every collection, in initialisation order.
    pub const ALL: [Self; 3] = [Self::Users, Self::Incidents, Self::Alerts];

    /// File name under the data directory.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Users => "users.json",
            Self::Incidents => "incidents.json",
            Self::Alerts => "alerts.json",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}
