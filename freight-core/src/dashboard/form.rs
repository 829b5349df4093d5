use std::fmt;

use rust_decimal::Decimal;

use crate::models::{BookingDraft, VehicleType};

/// Booking form fields, named as the service names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    PickupLocation,
    DropoffLocation,
    VehicleType,
    GoodsType,
    Weight,
}

impl FieldName {
    pub const ALL: [FieldName; 5] = [
        Self::PickupLocation,
        Self::DropoffLocation,
        Self::VehicleType,
        Self::GoodsType,
        Self::Weight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PickupLocation => "pickupLocation",
            Self::DropoffLocation => "dropoffLocation",
            Self::VehicleType => "vehicleType",
            Self::GoodsType => "goodsType",
            Self::Weight => "weight",
        }
    }

    /// Form label, also used to prefix validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PickupLocation => "Pickup Location",
            Self::DropoffLocation => "Drop-off Location",
            Self::VehicleType => "Vehicle Type",
            Self::GoodsType => "Goods Type",
            Self::Weight => "Weight (kg)",
        }
    }

    /// Accepts the wire name or its snake_case spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "pickupLocation" | "pickup_location" => Some(Self::PickupLocation),
            "dropoffLocation" | "dropoff_location" => Some(Self::DropoffLocation),
            "vehicleType" | "vehicle_type" => Some(Self::VehicleType),
            "goodsType" | "goods_type" => Some(Self::GoodsType),
            "weight" => Some(Self::Weight),
            _ => None,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The booking form exactly as typed.
///
/// Nothing is checked on entry; [`BookingForm::validate`] applies the
/// required/number rules when a request is about to be sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub pickup_location: String,
    pub dropoff_location: String,
    /// Empty until a vehicle is selected.
    pub vehicle_type: String,
    pub goods_type: String,
    pub weight: String,
}

impl BookingForm {
    pub fn get(
        &self,
        field: FieldName,
    ) -> &str {
        match field {
            FieldName::PickupLocation => &self.pickup_location,
            FieldName::DropoffLocation => &self.dropoff_location,
            FieldName::VehicleType => &self.vehicle_type,
            FieldName::GoodsType => &self.goods_type,
            FieldName::Weight => &self.weight,
        }
    }

    pub fn set(
        &mut self,
        field: FieldName,
        value: String,
    ) {
        let slot = match field {
            FieldName::PickupLocation => &mut self.pickup_location,
            FieldName::DropoffLocation => &mut self.dropoff_location,
            FieldName::VehicleType => &mut self.vehicle_type,
            FieldName::GoodsType => &mut self.goods_type,
            FieldName::Weight => &mut self.weight,
        };
        *slot = value;
    }

    /// Fill every field from an existing draft.
    pub fn from_draft(draft: &BookingDraft) -> Self {
        Self {
            pickup_location: draft.pickup_location.clone(),
            dropoff_location: draft.dropoff_location.clone(),
            vehicle_type: draft.vehicle_type.as_str().to_string(),
            goods_type: draft.goods_type.clone(),
            weight: draft.weight.to_string(),
        }
    }

    /// Parse the form into a [`BookingDraft`], collecting one message per
    /// offending field.
    ///
    /// Rules:
    /// - every field is required
    /// - vehicle type must be van, truck or trailer
    /// - weight must be a number greater than zero
    pub fn validate(&self) -> Result<BookingDraft, Vec<String>> {
        let mut errors = Vec::new();

        let pickup_location = required_text(FieldName::PickupLocation, self, &mut errors);
        let dropoff_location = required_text(FieldName::DropoffLocation, self, &mut errors);
        let vehicle_type = self.parse_vehicle_type(&mut errors);
        let goods_type = required_text(FieldName::GoodsType, self, &mut errors);
        let weight = self.parse_weight(&mut errors);

        match (
            pickup_location,
            dropoff_location,
            vehicle_type,
            goods_type,
            weight,
        ) {
            (
                Some(pickup_location),
                Some(dropoff_location),
                Some(vehicle_type),
                Some(goods_type),
                Some(weight),
            ) => Ok(BookingDraft {
                pickup_location,
                dropoff_location,
                vehicle_type,
                goods_type,
                weight,
            }),
            _ => Err(errors),
        }
    }

    fn parse_vehicle_type(
        &self,
        errors: &mut Vec<String>,
    ) -> Option<VehicleType> {
        let field = FieldName::VehicleType;
        if self.vehicle_type.trim().is_empty() {
            errors.push(format!("{} is required", field.label()));
            return None;
        }
        let parsed = VehicleType::parse(&self.vehicle_type);
        if parsed.is_none() {
            errors.push(format!(
                "{} must be one of van, truck, trailer",
                field.label()
            ));
        }
        parsed
    }

    fn parse_weight(
        &self,
        errors: &mut Vec<String>,
    ) -> Option<Decimal> {
        let field = FieldName::Weight;
        if self.weight.trim().is_empty() {
            errors.push(format!("{} is required", field.label()));
            return None;
        }
        match parse_weight(&self.weight) {
            Some(w) if w > Decimal::ZERO => Some(w),
            Some(_) => {
                errors.push(format!("{} must be greater than zero", field.label()));
                None
            }
            None => {
                errors.push(format!("{} must be a valid number", field.label()));
                None
            }
        }
    }
}

fn required_text(
    field: FieldName,
    form: &BookingForm,
    errors: &mut Vec<String>,
) -> Option<String> {
    let value = form.get(field).trim();
    if value.is_empty() {
        errors.push(format!("{} is required", field.label()));
        None
    } else {
        Some(value.to_string())
    }
}

/// Parses a weight, accepting commas as thousands separators
/// (e.g. `"1,250.5"`). Returns `None` for anything that is not a number.
pub fn parse_weight(s: &str) -> Option<Decimal> {
    s.trim().replace(',', "").parse().ok()
}

/// The tracking input is required; surrounding whitespace is dropped.
pub fn validate_tracking_query(query: &str) -> Result<String, Vec<String>> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        Err(vec!["Tracking ID is required".to_string()])
    } else {
        Ok(trimmed.to_string())
    }
}
