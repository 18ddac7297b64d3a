//! Timezone enumeration
//!
//! Closed set of IANA zone names a city may carry. Validated at input
//! boundaries and stored as TEXT.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::errors::SalonHubError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeZone {
    #[serde(rename = "Europe/Kaliningrad")]
    EuropeKaliningrad,
    #[serde(rename = "Europe/Moscow")]
    EuropeMoscow,
    #[serde(rename = "Europe/Samara")]
    EuropeSamara,
    #[serde(rename = "Asia/Yekaterinburg")]
    AsiaYekaterinburg,
    #[serde(rename = "Asia/Omsk")]
    AsiaOmsk,
    #[serde(rename = "Asia/Novosibirsk")]
    AsiaNovosibirsk,
    #[serde(rename = "Asia/Krasnoyarsk")]
    AsiaKrasnoyarsk,
    #[serde(rename = "Asia/Irkutsk")]
    AsiaIrkutsk,
    #[serde(rename = "Asia/Yakutsk")]
    AsiaYakutsk,
    #[serde(rename = "Asia/Vladivostok")]
    AsiaVladivostok,
    #[serde(rename = "Asia/Magadan")]
    AsiaMagadan,
    #[serde(rename = "Asia/Anadyr")]
    AsiaAnadyr,
}

impl TimeZone {
    pub const ALL: [TimeZone; 12] = [
        TimeZone::EuropeKaliningrad,
        TimeZone::EuropeMoscow,
        TimeZone::EuropeSamara,
        TimeZone::AsiaYekaterinburg,
        TimeZone::AsiaOmsk,
        TimeZone::AsiaNovosibirsk,
        TimeZone::AsiaKrasnoyarsk,
        TimeZone::AsiaIrkutsk,
        TimeZone::AsiaYakutsk,
        TimeZone::AsiaVladivostok,
        TimeZone::AsiaMagadan,
        TimeZone::AsiaAnadyr,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeZone::EuropeKaliningrad => "Europe/Kaliningrad",
            TimeZone::EuropeMoscow => "Europe/Moscow",
            TimeZone::EuropeSamara => "Europe/Samara",
            TimeZone::AsiaYekaterinburg => "Asia/Yekaterinburg",
            TimeZone::AsiaOmsk => "Asia/Omsk",
            TimeZone::AsiaNovosibirsk => "Asia/Novosibirsk",
            TimeZone::AsiaKrasnoyarsk => "Asia/Krasnoyarsk",
            TimeZone::AsiaIrkutsk => "Asia/Irkutsk",
            TimeZone::AsiaYakutsk => "Asia/Yakutsk",
            TimeZone::AsiaVladivostok => "Asia/Vladivostok",
            TimeZone::AsiaMagadan => "Asia/Magadan",
            TimeZone::AsiaAnadyr => "Asia/Anadyr",
        }
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeZone {
    type Err = SalonHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeZone::ALL
            .iter()
            .find(|tz| tz.as_str() == s)
            .copied()
            .ok_or_else(|| SalonHubError::InvalidTimeZone(s.to_string()))
    }
}

impl TryFrom<String> for TimeZone {
    type Error = SalonHubError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_zone() {
        for tz in TimeZone::ALL {
            assert_eq!(tz.as_str().parse::<TimeZone>().unwrap(), tz);
        }
    }

    #[test]
    fn rejects_unknown_zone() {
        assert!("Europe/Berlin".parse::<TimeZone>().is_err());
        assert!("".parse::<TimeZone>().is_err());
    }

    #[test]
    fn serde_uses_iana_names() {
        let json = serde_json::to_string(&TimeZone::EuropeMoscow).unwrap();
        assert_eq!(json, "\"Europe/Moscow\"");
        let tz: TimeZone = serde_json::from_str("\"Asia/Anadyr\"").unwrap();
        assert_eq!(tz, TimeZone::AsiaAnadyr);
    }
}
