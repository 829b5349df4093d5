use serde::{Deserialize, Serialize};

/// Response of the booking endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingReceipt {
    pub tracking_id: String,
}

/// Shipment status snapshot. Every field is displayed exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingRecord {
    pub status: String,
    pub current_location: String,
    pub driver_name: String,
    pub estimated_delivery: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn tracking_record_uses_camel_case_keys() {
        let record: TrackingRecord = serde_json::from_str(
            r#"{
                "status": "In Transit",
                "currentLocation": "Leeds",
                "driverName": "Sam Okafor",
                "estimatedDelivery": "2026-10-21"
            }"#,
        )
        .unwrap();

        assert_eq!(
            record,
            TrackingRecord {
                status: "In Transit".to_string(),
                current_location: "Leeds".to_string(),
                driver_name: "Sam Okafor".to_string(),
                estimated_delivery: "2026-10-21".to_string(),
            }
        );
    }

    #[test]
    fn booking_receipt_reads_tracking_id() {
        let receipt: BookingReceipt = serde_json::from_str(r#"{"trackingId":"T123"}"#).unwrap();
        assert_eq!(receipt.tracking_id, "T123");
    }
}
