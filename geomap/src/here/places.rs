//! HERE places backend.

use super::api::{HereAddress, HerePlace, HerePlaceQuery, HerePlatform, HereServiceError};
use crate::config::GeoMapProvider;
use crate::error::GeoMapError;
use crate::geo::{haversine_distance, GeoPoint};
use crate::map::BoxFuture;
use crate::service::{
    GeoMapPlace, GeoMapPlaceDetails, GeoMapPlacesServiceImplementation, PlaceAddress,
};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct HerePlacesService {
    platform: Arc<dyn HerePlatform>,
}

impl HerePlacesService {
    pub fn new(platform: Arc<dyn HerePlatform>) -> Self {
        Self { platform }
    }

    async fn search_places(
        &self,
        needle: String,
        center: GeoPoint,
        radius: f64,
    ) -> Result<Vec<GeoMapPlace>, GeoMapError> {
        let query = HerePlaceQuery {
            q: needle,
            at: center,
            radius,
        };
        let response = self.platform.search_places(query).map_err(|err| {
            warn!(error = %err, "HERE place search threw");
            GeoMapError::from(err)
        })?;

        match response.await {
            Ok(items) => Ok(items.iter().map(convert_place).collect()),
            Err(err) if err.is_not_found() => {
                debug!(error = %err, "HERE place search found nothing");
                Ok(Vec::new())
            }
            Err(err) => Err(query_error(err)),
        }
    }

    async fn lookup(&self, place_id: String) -> Result<GeoMapPlaceDetails, GeoMapError> {
        match self.platform.lookup_place(place_id.clone())?.await {
            Ok(Some(place)) => Ok(convert_details(&place)),
            Ok(None) => Err(GeoMapError::PlaceNotFound(place_id)),
            Err(err) if err.is_not_found() => Err(GeoMapError::PlaceNotFound(place_id)),
            Err(err) => Err(query_error(err)),
        }
    }
}

impl GeoMapPlacesServiceImplementation for HerePlacesService {
    fn get(&self, place_id: String) -> BoxFuture<'_, Result<GeoMapPlaceDetails, GeoMapError>> {
        Box::pin(self.lookup(place_id))
    }

    fn search(
        &self,
        needle: String,
        center: GeoPoint,
        radius: f64,
    ) -> BoxFuture<'_, Result<Vec<GeoMapPlace>, GeoMapError>> {
        Box::pin(self.search_places(needle, center, radius))
    }

    fn distance_between(&self, from: GeoPoint, to: GeoPoint, radius: Option<f64>) -> f64 {
        haversine_distance(from, to, radius)
    }
}

pub(crate) fn query_error(err: HereServiceError) -> GeoMapError {
    GeoMapError::PlaceQuery {
        status: err.status.to_string(),
    }
}

fn convert_place(place: &HerePlace) -> GeoMapPlace {
    GeoMapPlace {
        provider: GeoMapProvider::Here,
        id: place.id.clone(),
        name: place.title.clone(),
        formatted_address: formatted_address(place),
        location: place.position.unwrap_or_default(),
    }
}

fn formatted_address(place: &HerePlace) -> String {
    place
        .address
        .label
        .clone()
        .or_else(|| place.vicinity.clone())
        .unwrap_or_default()
}

fn convert_details(place: &HerePlace) -> GeoMapPlaceDetails {
    GeoMapPlaceDetails {
        name: Some(place.title.clone()),
        address: convert_address(&place.address),
        formatted_address: formatted_address(place),
        location: place.position,
        icon: place.icon.clone(),
        types: place.categories.clone(),
        formatted_phone_number: place.phone.clone(),
        website: place.website.clone(),
        ..GeoMapPlaceDetails::new(GeoMapProvider::Here, place.id.clone())
    }
}

pub(crate) fn convert_address(address: &HereAddress) -> PlaceAddress {
    PlaceAddress {
        country: address.country.clone(),
        country_code: address.country_code.clone(),
        county: address.county.clone(),
        district: address.district.clone(),
        state: address.state.clone(),
        postal_code: address.postal_code.clone(),
        locality: address.city.clone(),
        route: address.street.clone(),
        street_number: address.house_number.clone(),
    }
}
