//! Plain-text rendering of the dashboard.

use std::fmt;

use freight_core::{DashboardState, FieldName, Operation, Tab, VehicleType};

const EMPTY: &str = "—";

/// Renders the whole dashboard: tab bar, banners, then the active tab.
pub fn render(state: &DashboardState) -> String {
    DashboardView(state).to_string()
}

struct DashboardView<'a>(&'a DashboardState);

impl fmt::Display for DashboardView<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let state = self.0;

        writeln!(f, "=== User Dashboard ===")?;
        writeln!(
            f,
            "{}   {}",
            tab_button(state, Tab::Book),
            tab_button(state, Tab::Track)
        )?;

        if let Some(notice) = &state.notice {
            writeln!(f, "** {notice} ** (type 'dismiss' to close)")?;
        }
        if let Some(error) = &state.error {
            writeln!(f, "!! {error} (type 'clear' to hide)")?;
        }
        writeln!(f)?;

        match state.active_tab {
            Tab::Book => write_booking(f, state),
            Tab::Track => write_tracking(f, state),
        }
    }
}

fn tab_button(
    state: &DashboardState,
    tab: Tab,
) -> String {
    let mark = if state.active_tab == tab { 'x' } else { ' ' };
    format!("[{mark}] {}", tab.label())
}

fn write_booking(
    f: &mut fmt::Formatter<'_>,
    state: &DashboardState,
) -> fmt::Result {
    writeln!(f, "Book a Vehicle")?;
    for field in FieldName::ALL {
        let raw = state.form.get(field);
        let shown = match field {
            FieldName::VehicleType if raw.trim().is_empty() => "Select a vehicle type",
            FieldName::VehicleType => VehicleType::parse(raw).map_or(raw, |v| v.label()),
            _ if raw.is_empty() => EMPTY,
            _ => raw,
        };
        write_row(f, field.label(), shown)?;
    }

    if let Some(price) = state.price() {
        if state.is_estimate_stale() {
            writeln!(f, "  Estimated Price: {price} (form changed since this quote)")?;
        } else {
            writeln!(f, "  Estimated Price: {price}")?;
        }
    }
    if state.is_pending(Operation::Estimate) {
        writeln!(f, "  Calculating estimate...")?;
    }
    if state.is_pending(Operation::Booking) {
        writeln!(f, "  Submitting booking...")?;
    }
    Ok(())
}

fn write_tracking(
    f: &mut fmt::Formatter<'_>,
    state: &DashboardState,
) -> fmt::Result {
    writeln!(f, "Track Shipment")?;
    let query = if state.tracking_query.is_empty() {
        EMPTY
    } else {
        &state.tracking_query
    };
    write_row(f, "Tracking ID", query)?;
    if state.is_pending(Operation::Tracking) {
        writeln!(f, "  Tracking shipment...")?;
    }

    if let Some(record) = &state.tracking {
        writeln!(f)?;
        writeln!(f, "Tracking Information")?;
        write_row(f, "Status", &record.status)?;
        write_row(f, "Current Location", &record.current_location)?;
        write_row(f, "Driver", &record.driver_name)?;
        write_row(f, "Estimated Delivery", &record.estimated_delivery)?;
    }
    Ok(())
}

fn write_row(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: &str,
) -> fmt::Result {
    writeln!(f, "  {label:<18} : {value}")
}
