use serde::{Deserialize, Serialize};

/// One scheduled event row as scraped from a sport's schedule table.
///
/// Field values are normalized at scrape time: no embedded line breaks,
/// whitespace runs collapsed, and the portal's trailing "Power Points"
/// decoration stripped from the opponent. Uniqueness of (date, opponent)
/// within one sport's listing is assumed by the selection UI, not enforced
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDescriptor {
    /// Free-text date in the portal's own format, e.g. "12/4 4:00pm".
    pub date: String,
    /// Result column as rendered, e.g. "W 123-47" or empty when unplayed.
    pub result: String,
    pub opponent: String,
}
