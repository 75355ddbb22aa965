//! Best-effort conversion between GitHub's wire timestamps and display strings.
//!
//! Neither direction ever fails: a value that does not parse is handed back
//! unchanged so the user still sees what the server sent.

use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use tracing::debug;

/// Timestamp format of the connector wire representation, e.g. `2010/02/02 22:58:39 -0800`
pub const WIRE_FORMAT: &str = "%Y/%m/%d %H:%M:%S %z";

/// Default display format, e.g. `Feb 02, 2010 10:58:39 PM`
pub const DEFAULT_DISPLAY_FORMAT: &str = "%b %d, %Y %I:%M:%S %p";

#[derive(Debug, Clone)]
pub struct DateConverter<Tz: TimeZone = Local> {
    zone: Tz,
    display_format: String,
}

impl DateConverter<Local> {
    /// Display dates in the machine's local time zone
    pub fn local() -> Self {
        Self::new(Local)
    }
}

impl Default for DateConverter<Local> {
    fn default() -> Self {
        Self::local()
    }
}

impl<Tz: TimeZone> DateConverter<Tz>
where
    Tz::Offset: Display,
{
    pub fn new(zone: Tz) -> Self {
        Self {
            zone,
            display_format: DEFAULT_DISPLAY_FORMAT.to_string(),
        }
    }

    /// Override the display pattern (chrono `strftime` syntax)
    pub fn with_display_format(mut self, format: &str) -> Self {
        self.display_format = format.to_string();
        self
    }

    /// Reformat a wire timestamp for display, or return it unchanged
    pub fn to_display(&self, wire: &str) -> String {
        if wire.trim().is_empty() {
            return wire.to_string();
        }

        match DateTime::parse_from_str(wire.trim(), WIRE_FORMAT) {
            Ok(instant) => instant
                .with_timezone(&self.zone)
                .format(&self.display_format)
                .to_string(),
            Err(e) => {
                debug!(value = wire, error = %e, "keeping unparseable GitHub date");
                wire.to_string()
            }
        }
    }

    /// Reformat a display string back to the wire format, or return it unchanged.
    ///
    /// The display format carries no offset, so a time inside the repeated hour
    /// of a daylight-saving fall-back is read as its first occurrence.
    pub fn to_wire(&self, shown: &str) -> String {
        if shown.trim().is_empty() {
            return shown.to_string();
        }

        let local = match NaiveDateTime::parse_from_str(shown.trim(), &self.display_format) {
            Ok(local) => local,
            Err(e) => {
                debug!(value = shown, error = %e, "keeping unparseable display date");
                return shown.to_string();
            }
        };

        match self.zone.from_local_datetime(&local).earliest() {
            Some(instant) => instant.format(WIRE_FORMAT).to_string(),
            None => shown.to_string(),
        }
    }
}
