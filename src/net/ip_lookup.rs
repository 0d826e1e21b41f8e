use crate::core::geolocation::{Coordinates, GeolocationError, GeolocationProvider};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct LookupResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Approximate position from an IP geolocation endpoint answering
/// `{"latitude": .., "longitude": ..}`.
pub struct IpLookup {
    agent: ureq::Agent,
    url: String,
}

impl IpLookup {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            url: url.into(),
        }
    }
}

impl GeolocationProvider for IpLookup {
    fn request_position(&self) -> Result<Coordinates, GeolocationError> {
        debug!(url = %self.url, "requesting position");
        let body = self
            .agent
            .get(self.url.as_str())
            .call()
            .map_err(|err| GeolocationError::Failed(err.to_string()))?
            .into_string()
            .map_err(|err| GeolocationError::Failed(err.to_string()))?;
        parse_position(body.as_str())
    }
}

fn parse_position(body: &str) -> Result<Coordinates, GeolocationError> {
    let response: LookupResponse = serde_json::from_str(body)
        .map_err(|err| GeolocationError::Failed(format!("malformed response: {err}")))?;
    match (response.latitude, response.longitude) {
        (Some(latitude), Some(longitude)) => Ok(Coordinates::new(latitude, longitude)),
        _ => Err(GeolocationError::Failed(
            "response has no coordinates".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_position;
    use crate::core::geolocation::{Coordinates, GeolocationError};

    #[test]
    fn reads_latitude_and_longitude() {
        let position =
            parse_position(r#"{"ip":"1.2.3.4","latitude":52.23,"longitude":21.01}"#)
                .expect("position");
        assert_eq!(position, Coordinates::new(52.23, 21.01));
    }

    #[test]
    fn missing_coordinates_is_a_failure() {
        assert!(matches!(
            parse_position(r#"{"error":true,"reason":"RateLimited"}"#),
            Err(GeolocationError::Failed(_))
        ));
        assert!(matches!(
            parse_position("<html>"),
            Err(GeolocationError::Failed(_))
        ));
    }
}
