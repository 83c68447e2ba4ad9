use std::future::Future;

use crate::config::RoutingConfig;
use crate::error::RoutingError;
use crate::models::{Coordinate, FeatureCollection};

const BODY_EXCERPT_CHARS: usize = 200;

/// Driving directions between two geographic points.
///
/// Implementations return the route as an ordered `[lon, lat]` sequence, or
/// an error. They never return an empty path.
pub trait RoutingService: Send + Sync + 'static {
    fn route(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> impl Future<Output = Result<Vec<Coordinate>, RoutingError>> + Send;
}

/// OpenRouteService `GET /v2/directions/{profile}` client.
pub struct OpenRouteServiceClient {
    http: reqwest::Client,
    config: RoutingConfig,
}

impl OpenRouteServiceClient {
    pub fn new(config: RoutingConfig) -> Result<Self, RoutingError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            config,
        })
    }
}

impl RoutingService for OpenRouteServiceClient {
    async fn route(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<Vec<Coordinate>, RoutingError> {
        let start = start.to_query_value();
        let end = end.to_query_value();
        tracing::debug!("requesting {} start={start} end={end}", self.config.profile);

        let response = self
            .http
            .get(self.config.directions_url())
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("start", start.as_str()),
                ("end", end.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RoutingError::Status {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        let path = parse_route(&body)?;
        tracing::info!("routing service returned {} points", path.len());
        Ok(path)
    }
}

/// Extracts the first feature's coordinates from a directions response.
pub fn parse_route(body: &str) -> Result<Vec<Coordinate>, RoutingError> {
    let collection: FeatureCollection = serde_json::from_str(body)?;
    let feature = collection
        .features
        .into_iter()
        .next()
        .ok_or_else(|| RoutingError::Malformed("response has no features".into()))?;

    let path = feature
        .geometry
        .coordinates
        .iter()
        .enumerate()
        .map(|(idx, position)| match position.as_slice() {
            [lon, lat, ..] => Ok(Coordinate {
                lon: *lon,
                lat: *lat,
            }),
            _ => Err(RoutingError::Malformed(format!(
                "position {idx} has {} ordinates",
                position.len()
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if path.is_empty() {
        return Err(RoutingError::Malformed("route geometry is empty".into()));
    }
    Ok(path)
}

fn excerpt(body: &str) -> String {
    let mut out: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
    if body.chars().count() > BODY_EXCERPT_CHARS {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {"summary": {"distance": 1234.5, "duration": 300.0}},
            "geometry": {
                "type": "LineString",
                "coordinates": [[8.681495, 49.41461], [8.686507, 49.41943, 112.3], [8.687872, 49.420318]]
            }
        }],
        "bbox": [8.681495, 49.41461, 8.687872, 49.420318]
    }"#;

    #[test]
    fn test_parse_route_takes_first_feature() {
        let path = parse_route(SAMPLE).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], Coordinate { lon: 8.681495, lat: 49.41461 });
        // Elevation ordinates are dropped.
        assert_eq!(path[1], Coordinate { lon: 8.686507, lat: 49.41943 });
    }

    #[test]
    fn test_parse_route_without_features() {
        let err = parse_route(r#"{"type":"FeatureCollection","features":[]}"#).unwrap_err();
        assert!(matches!(err, RoutingError::Malformed(_)));
    }

    #[test]
    fn test_parse_route_with_empty_geometry() {
        let body = r#"{"features":[{"geometry":{"coordinates":[]}}]}"#;
        assert!(matches!(parse_route(body), Err(RoutingError::Malformed(_))));
    }

    #[test]
    fn test_parse_route_with_short_position() {
        let body = r#"{"features":[{"geometry":{"coordinates":[[1.0, 2.0], [3.0]]}}]}"#;
        let err = parse_route(body).unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed routing response: position 1 has 1 ordinates"
        );
    }

    #[test]
    fn test_parse_route_rejects_garbage() {
        assert!(matches!(parse_route("<html>"), Err(RoutingError::Malformed(_))));
    }

    #[test]
    fn test_excerpt_truncates_long_bodies() {
        let long = "x".repeat(BODY_EXCERPT_CHARS + 10);
        let short = excerpt(&long);
        assert_eq!(short.chars().count(), BODY_EXCERPT_CHARS + 1);
        assert!(short.ends_with('…'));
        assert_eq!(excerpt("bad key"), "bad key");
    }
}
