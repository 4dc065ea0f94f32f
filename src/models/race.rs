//! Race result structures as produced by the scan/edit surface and consumed
//! read-only by the submission engine.

use serde::{Deserialize, Serialize};

/// The fixed set of race types the portal renders headings for.
///
/// The serialized form is the exact heading text, which is also what the
/// submission engine matches against the portal's section headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaceType {
    #[serde(rename = "200 MR")]
    MedleyRelay200,
    #[serde(rename = "200 Free")]
    Free200,
    #[serde(rename = "200 IM")]
    Im200,
    #[serde(rename = "50 Free")]
    Free50,
    #[serde(rename = "100 Fly")]
    Fly100,
    #[serde(rename = "100 Free")]
    Free100,
    #[serde(rename = "500 Free")]
    Free500,
    #[serde(rename = "200 FR")]
    FreeRelay200,
    #[serde(rename = "100 Back")]
    Back100,
    #[serde(rename = "100 Breast")]
    Breast100,
    #[serde(rename = "400 FR")]
    FreeRelay400,
}

impl RaceType {
    /// All race types in meet program order.
    pub const ALL: [RaceType; 11] = [
        RaceType::MedleyRelay200,
        RaceType::Free200,
        RaceType::Im200,
        RaceType::Free50,
        RaceType::Fly100,
        RaceType::Free100,
        RaceType::Free500,
        RaceType::FreeRelay200,
        RaceType::Back100,
        RaceType::Breast100,
        RaceType::FreeRelay400,
    ];

    /// The heading text the portal renders for this race.
    pub fn label(self) -> &'static str {
        match self {
            RaceType::MedleyRelay200 => "200 MR",
            RaceType::Free200 => "200 Free",
            RaceType::Im200 => "200 IM",
            RaceType::Free50 => "50 Free",
            RaceType::Fly100 => "100 Fly",
            RaceType::Free100 => "100 Free",
            RaceType::Free500 => "500 Free",
            RaceType::FreeRelay200 => "200 FR",
            RaceType::Back100 => "100 Back",
            RaceType::Breast100 => "100 Breast",
            RaceType::FreeRelay400 => "400 FR",
        }
    }

    /// Parse a heading back into a race type (exact match).
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.label() == label)
    }
}

impl std::fmt::Display for RaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One finishing entry: one swimmer for individual races, several for relays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    /// Swimmer names in lane order, stored "First Last".
    pub swimmers: Vec<String>,
    pub place: u32,
    /// Free-text time as scanned, e.g. "1:23.45".
    pub time: String,
}

/// All entries for one race of a meet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceResult {
    pub race: RaceType,
    pub results: Vec<ResultItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for race in RaceType::ALL {
            assert_eq!(RaceType::from_label(race.label()), Some(race));
        }
        assert_eq!(RaceType::from_label("600 Free"), None);
        assert_eq!(RaceType::from_label("200 free"), None);
    }

    #[test]
    fn test_serde_uses_heading_text() {
        let json = serde_json::to_string(&RaceType::MedleyRelay200).unwrap();
        assert_eq!(json, "\"200 MR\"");

        let parsed: RaceType = serde_json::from_str("\"500 Free\"").unwrap();
        assert_eq!(parsed, RaceType::Free500);
    }

    #[test]
    fn test_race_result_wire_shape() {
        let json = r#"{
            "race": "400 FR",
            "results": [
                { "swimmers": ["John Smith", "Amy Jones"], "place": 2, "time": "3:41.20" }
            ]
        }"#;
        let parsed: RaceResult = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.race, RaceType::FreeRelay400);
        assert_eq!(parsed.results[0].swimmers.len(), 2);
        assert_eq!(parsed.results[0].place, 2);
    }
}
