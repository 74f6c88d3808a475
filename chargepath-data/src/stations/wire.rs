//! Request and response bodies of the station lookup API.
//!
//! Coordinates travel as decimal strings in the request. Responses nest the
//! station list one level deep: `{ "response": [ { "response": [ … ] } ] }`.

use chargepath_core::ChargingStation;
use geo::Coord;
use serde::{Deserialize, Serialize};

use super::StationRegion;

/// Body of a station lookup request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StationQuery {
    lat: String,
    long: String,
    state_id: String,
    city_id: String,
}

impl StationQuery {
    /// Query stations around a coordinate.
    pub(crate) fn near(location: Coord<f64>) -> Self {
        Self {
            lat: location.y.to_string(),
            long: location.x.to_string(),
            state_id: String::new(),
            city_id: String::new(),
        }
    }

    /// Query every station registered in an administrative region.
    pub(crate) fn in_region(region: &StationRegion) -> Self {
        Self {
            lat: String::new(),
            long: String::new(),
            state_id: region.state_id.clone(),
            city_id: region.city_id.clone(),
        }
    }
}

/// Outer response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct StationEnvelope {
    #[serde(default)]
    response: Option<Vec<StationBatch>>,
}

#[derive(Debug, Deserialize)]
struct StationBatch {
    #[serde(default)]
    response: Option<Vec<StationRecord>>,
}

impl StationEnvelope {
    /// Stations of the first batch; a missing list is an empty result.
    pub(crate) fn into_records(self) -> Vec<StationRecord> {
        self.response
            .and_then(|batches| batches.into_iter().next())
            .and_then(|batch| batch.response)
            .unwrap_or_default()
    }
}

/// One station as listed by the service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct StationRecord {
    id: u64,
    #[serde(default)]
    station_name: Option<String>,
    #[serde(default)]
    address: Option<String>,
    lat: f64,
    lng: f64,
    #[serde(default)]
    pincode: Option<Pincode>,
}

/// Postal codes arrive either quoted or as bare numbers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum Pincode {
    Text(String),
    Number(u64),
}

impl From<Pincode> for String {
    fn from(pincode: Pincode) -> Self {
        match pincode {
            Pincode::Text(text) => text,
            Pincode::Number(number) => number.to_string(),
        }
    }
}

impl From<StationRecord> for ChargingStation {
    fn from(record: StationRecord) -> Self {
        let mut station = Self::new(
            record.id,
            record.address.unwrap_or_default(),
            Coord {
                x: record.lng,
                y: record.lat,
            },
        );
        station.name = record.station_name;
        station.pincode = record
            .pincode
            .map(String::from)
            .filter(|pincode| !pincode.trim().is_empty());
        station
    }
}
