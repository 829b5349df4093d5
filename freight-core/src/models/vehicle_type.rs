use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Van,
    Truck,
    Trailer,
}

impl VehicleType {
    pub const ALL: [VehicleType; 3] = [Self::Van, Self::Truck, Self::Trailer];

    /// Wire value sent to the booking service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Van => "van",
            Self::Truck => "truck",
            Self::Trailer => "trailer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Van => "Van",
            Self::Truck => "Truck",
            Self::Trailer => "Trailer",
        }
    }

    /// Case-insensitive, whitespace-tolerant parse of the wire value.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "van" => Some(Self::Van),
            "truck" => Some(Self::Truck),
            "trailer" => Some(Self::Trailer),
            _ => None,
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
