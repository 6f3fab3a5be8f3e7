//! Google directions backend.

use super::api::{
    DirectionsLeg, DirectionsRequest, GoogleMapHandle, GoogleMapsApi, GooglePolylineHandle,
    PolylineOptions, TravelMode,
};
use crate::error::GeoMapError;
use crate::geo::GeoPoint;
use crate::map::BoxFuture;
use crate::service::{GeoMapDirectionResult, GeoMapDirectionServiceImplementation};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Wide outline drawn under the route.
const BACKGROUND_STROKE: (&str, f64) = ("rgb(51, 121, 195)", 8.0);
/// Route line drawn on top.
const FOREGROUND_STROKE: (&str, f64) = ("rgb(0, 179, 253)", 5.0);

pub struct GoogleDirectionService {
    api: Arc<dyn GoogleMapsApi>,
    map: Arc<dyn GoogleMapHandle>,
    lines: Mutex<Vec<Arc<dyn GooglePolylineHandle>>>,
}

impl GoogleDirectionService {
    pub fn new(api: Arc<dyn GoogleMapsApi>, map: Arc<dyn GoogleMapHandle>) -> Self {
        Self {
            api,
            map,
            lines: Mutex::new(Vec::new()),
        }
    }

    /// Number of polylines currently drawn.
    pub fn line_count(&self) -> usize {
        self.lines.lock().unwrap().len()
    }

    async fn route(
        &self,
        from: GeoPoint,
        to: GeoPoint,
    ) -> Result<GeoMapDirectionResult, GeoMapError> {
        let request = DirectionsRequest {
            origin: from,
            destination: to,
            travel_mode: TravelMode::Driving,
        };
        let result = self.api.route(request)?.await;

        let route = result.routes.into_iter().next().ok_or_else(|| {
            let status = result
                .status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "no routes".to_string());
            warn!(from = %from, to = %to, status = %status, "No route found");
            GeoMapError::NoRouteFound(status)
        })?;
        let legs = route.legs.ok_or(GeoMapError::MalformedRouteLegs)?;
        let (first, last) = match (legs.first(), legs.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(GeoMapError::MalformedRouteLegs),
        };

        let path = flatten_path(&legs);
        debug!(legs = legs.len(), points = path.len(), "Painting route");

        for (color, weight) in [BACKGROUND_STROKE, FOREGROUND_STROKE] {
            let line = self.api.create_polyline(PolylineOptions {
                path: path.clone(),
                stroke_color: color.to_string(),
                stroke_opacity: 1.0,
                stroke_weight: weight,
            })?;
            line.set_map(Some(Arc::clone(&self.map)));
            self.lines.lock().unwrap().push(line);
        }

        Ok(GeoMapDirectionResult {
            start: first.start_location,
            end: last.end_location,
        })
    }

    fn clear_lines(&self) {
        let lines: Vec<_> = self.lines.lock().unwrap().drain(..).collect();
        if !lines.is_empty() {
            debug!(count = lines.len(), "Clearing route lines");
        }
        for line in lines {
            line.set_map(None);
        }
    }
}

impl GeoMapDirectionServiceImplementation for GoogleDirectionService {
    fn paint_route(
        &self,
        from: GeoPoint,
        to: GeoPoint,
    ) -> BoxFuture<'_, Result<GeoMapDirectionResult, GeoMapError>> {
        Box::pin(self.route(from, to))
    }

    fn clear(&self) -> BoxFuture<'_, ()> {
        Box::pin(async move { self.clear_lines() })
    }
}

/// Concatenates every step path, leg by leg, in order.
pub fn flatten_path(legs: &[DirectionsLeg]) -> Vec<GeoPoint> {
    legs.iter()
        .flat_map(|leg| leg.steps.iter())
        .flat_map(|step| step.path.iter().copied())
        .collect()
}
