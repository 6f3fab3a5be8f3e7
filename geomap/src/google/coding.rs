//! Google geocoder backend.

use super::api::{GeocoderQuery, GeocoderResponse, GoogleMapsApi, GoogleStatus};
use super::places::convert_address;
use crate::config::GeoMapProvider;
use crate::error::GeoMapError;
use crate::geo::GeoPoint;
use crate::map::BoxFuture;
use crate::service::{
    GeoMapCodingServiceImplementation, GeoMapPlaceDetails, GeocoderRequest, GeocoderResult,
};
use std::sync::Arc;
use tracing::debug;

pub struct GoogleCodingService {
    api: Arc<dyn GoogleMapsApi>,
}

impl GoogleCodingService {
    pub fn new(api: Arc<dyn GoogleMapsApi>) -> Self {
        Self { api }
    }

    async fn reverse_geocode(
        &self,
        point: GeoPoint,
    ) -> Result<Vec<GeoMapPlaceDetails>, GeoMapError> {
        let query = GeocoderQuery {
            location: Some(point),
            ..Default::default()
        };
        let (results, status) = self.api.geocode(query)?.await;

        match status {
            GoogleStatus::Ok => Ok(results.iter().map(convert_result).collect()),
            GoogleStatus::ZeroResults => {
                debug!(point = %point, "Nothing found at location");
                Ok(Vec::new())
            }
            status => Err(GeoMapError::PlaceQuery {
                status: status.to_string(),
            }),
        }
    }

    async fn forward_geocode(
        &self,
        request: GeocoderRequest,
    ) -> Result<GeocoderResult, GeoMapError> {
        let (label, query) = match request {
            GeocoderRequest::Query(address) => (
                address.clone(),
                GeocoderQuery {
                    address: Some(address),
                    ..Default::default()
                },
            ),
            GeocoderRequest::Structured { country } => (
                country.clone(),
                GeocoderQuery {
                    country: Some(country),
                    ..Default::default()
                },
            ),
        };
        let (results, status) = self.api.geocode(query)?.await;

        match status {
            GoogleStatus::Ok | GoogleStatus::ZeroResults => results
                .first()
                .map(|r| GeocoderResult {
                    position: r.location,
                    view_bounds: r.viewport,
                })
                .ok_or(GeoMapError::PlaceNotFound(label)),
            status => Err(GeoMapError::PlaceQuery {
                status: status.to_string(),
            }),
        }
    }
}

impl GeoMapCodingServiceImplementation for GoogleCodingService {
    fn reverse(
        &self,
        point: GeoPoint,
    ) -> BoxFuture<'_, Result<Vec<GeoMapPlaceDetails>, GeoMapError>> {
        Box::pin(self.reverse_geocode(point))
    }

    fn geocode(
        &self,
        request: GeocoderRequest,
    ) -> BoxFuture<'_, Result<GeocoderResult, GeoMapError>> {
        Box::pin(self.forward_geocode(request))
    }
}

fn convert_result(result: &GeocoderResponse) -> GeoMapPlaceDetails {
    GeoMapPlaceDetails {
        address: convert_address(&result.address_components),
        formatted_address: result.formatted_address.clone(),
        location: Some(result.location),
        types: result.types.clone(),
        ..GeoMapPlaceDetails::new(GeoMapProvider::Google, result.place_id.clone())
    }
}
