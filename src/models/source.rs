use serde::{Deserialize, Serialize};
use std::fmt;

/// Booking site an offer was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Teescan,
    Golfpang,
}

impl Source {
    pub fn key(&self) -> &'static str {
        match self {
            Source::Teescan => "teescan",
            Source::Golfpang => "golfpang",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "teescan" => Some(Source::Teescan),
            "golfpang" => Some(Source::Golfpang),
            _ => None,
        }
    }

    /// Single-letter badge shown next to a price cell.
    pub fn badge(&self) -> &'static str {
        match self {
            Source::Teescan => "T",
            Source::Golfpang => "G",
        }
    }

    /// Whether an occupant from this source gives up its cell to a later
    /// offer. Teescan occupants always keep their cell; adding a source
    /// means answering this question for it here.
    pub fn yields_cell(&self) -> bool {
        match self {
            Source::Teescan => false,
            Source::Golfpang => true,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Source::Teescan).unwrap(),
            "\"teescan\""
        );
        assert_eq!(
            serde_json::from_str::<Source>("\"golfpang\"").unwrap(),
            Source::Golfpang
        );
    }

    #[test]
    fn key_round_trips() {
        for source in [Source::Teescan, Source::Golfpang] {
            assert_eq!(Source::from_key(source.key()), Some(source));
        }
        assert_eq!(Source::from_key("unknown"), None);
    }

    #[test]
    fn only_golfpang_yields_its_cell() {
        assert!(!Source::Teescan.yields_cell());
        assert!(Source::Golfpang.yields_cell());
    }
}
