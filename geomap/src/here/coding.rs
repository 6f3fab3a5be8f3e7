//! HERE geocoder backend.

use super::api::{HereGeocodeQuery, HereLocation, HerePlatform};
use super::places::{convert_address, query_error};
use crate::config::GeoMapProvider;
use crate::error::GeoMapError;
use crate::geo::GeoPoint;
use crate::map::BoxFuture;
use crate::service::{
    GeoMapCodingServiceImplementation, GeoMapPlaceDetails, GeocoderRequest, GeocoderResult,
};
use std::sync::Arc;

pub struct HereCodingService {
    platform: Arc<dyn HerePlatform>,
}

impl HereCodingService {
    pub fn new(platform: Arc<dyn HerePlatform>) -> Self {
        Self { platform }
    }

    async fn reverse_geocode(
        &self,
        point: GeoPoint,
    ) -> Result<Vec<GeoMapPlaceDetails>, GeoMapError> {
        match self.platform.reverse_geocode(point)?.await {
            Ok(locations) => Ok(locations.iter().map(convert_location).collect()),
            Err(err) if err.is_not_found() => Ok(Vec::new()),
            Err(err) => Err(query_error(err)),
        }
    }

    async fn forward_geocode(
        &self,
        request: GeocoderRequest,
    ) -> Result<GeocoderResult, GeoMapError> {
        let (label, query) = match request {
            GeocoderRequest::Query(text) => (
                text.clone(),
                HereGeocodeQuery {
                    searchtext: Some(text),
                    country: None,
                },
            ),
            GeocoderRequest::Structured { country } => (
                country.clone(),
                HereGeocodeQuery {
                    searchtext: None,
                    country: Some(country),
                },
            ),
        };

        let locations = match self.platform.geocode(query)?.await {
            Ok(locations) => locations,
            Err(err) if err.is_not_found() => Vec::new(),
            Err(err) => return Err(query_error(err)),
        };
        locations
            .first()
            .map(|location| GeocoderResult {
                position: location.position,
                view_bounds: location.view,
            })
            .ok_or(GeoMapError::PlaceNotFound(label))
    }
}

impl GeoMapCodingServiceImplementation for HereCodingService {
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

fn convert_location(location: &HereLocation) -> GeoMapPlaceDetails {
    GeoMapPlaceDetails {
        address: convert_address(&location.address),
        formatted_address: location.address.label.clone().unwrap_or_default(),
        location: Some(location.position),
        types: location.match_type.iter().cloned().collect(),
        ..GeoMapPlaceDetails::new(GeoMapProvider::Here, location.location_id.clone())
    }
}
