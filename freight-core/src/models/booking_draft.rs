use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::VehicleType;

/// A validated booking form, ready to be priced or booked.
///
/// Serialized in the camelCase shape the booking service expects, with
/// `weight` as a plain JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub pickup_location: String,
    pub dropoff_location: String,
    pub vehicle_type: VehicleType,
    pub goods_type: String,
    /// Kilograms, always greater than zero.
    #[serde(with = "rust_decimal::serde::float")]
    pub weight: Decimal,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_with_service_field_names() {
        let draft = BookingDraft {
            pickup_location: "A".to_string(),
            dropoff_location: "B".to_string(),
            vehicle_type: VehicleType::Van,
            goods_type: "boxes".to_string(),
            weight: dec!(10),
        };

        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            json!({
                "pickupLocation": "A",
                "dropoffLocation": "B",
                "vehicleType": "van",
                "goodsType": "boxes",
                "weight": 10.0
            })
        );
    }

    #[test]
    fn deserializes_integer_weight() {
        let draft: BookingDraft = serde_json::from_value(json!({
            "pickupLocation": "Depot 4",
            "dropoffLocation": "Harbour",
            "vehicleType": "trailer",
            "goodsType": "pallets",
            "weight": 1250
        }))
        .unwrap();

        assert_eq!(draft.vehicle_type, VehicleType::Trailer);
        assert_eq!(draft.weight, dec!(1250));
    }
}
