use crate::core::value::Value;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    /// No location source exists at all.
    #[error("geolocation is not supported")]
    Unsupported,
    /// A source exists but the request was denied, timed out or failed.
    #[error("geolocation request failed: {0}")]
    Failed(String),
}

impl GeolocationError {
    /// Text shown to the user. The two cases must read differently.
    pub fn notice(&self) -> &'static str {
        match self {
            Self::Unsupported => "Geolocation is not supported on this device.",
            Self::Failed(_) => "Unable to retrieve location. Please allow location access.",
        }
    }
}

/// Host capability yielding the device position. Called once per request,
/// never retried.
pub trait GeolocationProvider: Send + Sync {
    fn request_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Used when no location source is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unavailable;

impl GeolocationProvider for Unavailable {
    fn request_position(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

impl GeolocationProvider for FixedPosition {
    fn request_position(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}

/// Captured position of one form instance.
///
/// Coordinates and display text live in one value so a capture replaces all
/// three derived fields in a single assignment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationCapture {
    coordinates: Option<Coordinates>,
    display: String,
}

impl LocationCapture {
    pub fn captured(coordinates: Coordinates) -> Self {
        Self {
            display: coordinates.to_string(),
            coordinates: Some(coordinates),
        }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn latitude(&self) -> Value {
        Value::from(self.coordinates.map(|c| c.latitude))
    }

    pub fn longitude(&self) -> Value {
        Value::from(self.coordinates.map(|c| c.longitude))
    }

    pub fn display(&self) -> &str {
        self.display.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::{Coordinates, GeolocationError, LocationCapture};
    use crate::core::value::Value;

    #[test]
    fn capture_sets_all_three_fields_together() {
        let capture = LocationCapture::captured(Coordinates::new(12.34, 56.78));
        assert_eq!(capture.latitude(), Value::Float(12.34));
        assert_eq!(capture.longitude(), Value::Float(56.78));
        assert_eq!(capture.display(), "12.34, 56.78");
    }

    #[test]
    fn empty_capture_serializes_as_null() {
        let capture = LocationCapture::default();
        assert_eq!(capture.latitude(), Value::None);
        assert_eq!(capture.longitude(), Value::None);
        assert_eq!(capture.display(), "");
    }

    #[test]
    fn unsupported_and_failed_notices_differ() {
        let unsupported = GeolocationError::Unsupported.notice();
        let failed = GeolocationError::Failed("denied".to_string()).notice();
        assert!(!unsupported.is_empty());
        assert!(!failed.is_empty());
        assert_ne!(unsupported, failed);
    }
}
