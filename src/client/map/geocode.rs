use dioxus_logger::tracing;
use serde::Deserialize;
use serde_json::Value;

use crate::model::geo::GeoCoordinates;

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/";

#[derive(Deserialize)]
struct Place {
    lat: Option<Value>,
    lon: Option<Value>,
}

/// Address lookup against a Nominatim compatible endpoint.
#[derive(Clone)]
pub struct Geocoder {
    client: reqwest::Client,
    endpoint: String,
}

impl Default for Geocoder {
    fn default() -> Self {
        Self::with_endpoint(NOMINATIM_URL)
    }
}

impl Geocoder {
    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
        }
    }

    /// Looks up `address` and returns the coordinates of the first result.
    ///
    /// Every failure (empty address, transport error, non-2xx status, unreadable body, result
    /// without coordinates) is reported as `None`.
    pub async fn locate(&self, address: &str) -> Option<GeoCoordinates> {
        let address = address.trim();
        if address.is_empty() {
            return None;
        }

        let response = match self
            .client
            .get(&self.endpoint)
            .query(&[("format", "json"), ("limit", "1"), ("q", address)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Geocoding request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!("Geocoding request returned {}", response.status());
            return None;
        }

        let places: Vec<Place> = response.json().await.ok()?;
        let place = places.into_iter().next()?;

        Some(GeoCoordinates::new(
            coordinate(place.lat?)?,
            coordinate(place.lon?)?,
        ))
    }
}

// Nominatim sends coordinates as strings, other implementations as numbers.
fn coordinate(value: Value) -> Option<f64> {
    match value {
        Value::String(value) => value.trim().parse().ok(),
        Value::Number(value) => value.as_f64(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};

    use crate::{client::map::geocode::Geocoder, model::geo::GeoCoordinates};

    fn search_query(address: &str) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("format".into(), "json".into()),
            Matcher::UrlEncoded("limit".into(), "1".into()),
            Matcher::UrlEncoded("q".into(), address.into()),
        ])
    }

    /// Expect the first result to be used
    #[tokio::test]
    async fn returns_first_result() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(search_query("1600 Amphitheatre Parkway, Mountain View"))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"lat": "37.422", "lon": "-122.084", "display_name": "Google"},
                    {"lat": "1.5", "lon": "2.5"}]"#,
            )
            .create();

        let geocoder = Geocoder::with_endpoint(&format!("{}/", server.url()));
        let result = geocoder
            .locate("1600 Amphitheatre Parkway, Mountain View")
            .await;

        mock.assert();
        assert_eq!(result, Some(GeoCoordinates::new(37.422, -122.084)));
    }

    /// Expect an empty address to be rejected without any request
    #[tokio::test]
    async fn skips_empty_address() {
        let mut server = Server::new_async().await;
        let mock = server.mock("GET", "/").expect(0).create();

        let geocoder = Geocoder::with_endpoint(&format!("{}/", server.url()));
        let result = geocoder.locate("   ").await;

        mock.assert();
        assert!(result.is_none());
    }

    /// Expect no result, an error status and a result without coordinates to be not found
    #[tokio::test]
    async fn reports_failures_as_not_found() {
        let mut server = Server::new_async().await;
        let _empty = server
            .mock("GET", "/")
            .match_query(search_query("nowhere"))
            .with_status(200)
            .with_body("[]")
            .create();
        let _error = server
            .mock("GET", "/")
            .match_query(search_query("server error"))
            .with_status(503)
            .create();
        let _partial = server
            .mock("GET", "/")
            .match_query(search_query("partial"))
            .with_status(200)
            .with_body(r#"[{"lat": "37.422"}]"#)
            .create();

        let geocoder = Geocoder::with_endpoint(&format!("{}/", server.url()));

        assert!(geocoder.locate("nowhere").await.is_none());
        assert!(geocoder.locate("server error").await.is_none());
        assert!(geocoder.locate("partial").await.is_none());
    }
}
