//! Google places backend.

use super::api::{
    AddressComponent, FindPlaceRequest, GoogleMapsApi, GoogleStatus, LocationBias,
    PlaceDetailsRequest, PlaceResult,
};
use crate::config::GeoMapProvider;
use crate::error::GeoMapError;
use crate::geo::GeoPoint;
use crate::map::BoxFuture;
use crate::service::{
    GeoMapPlace, GeoMapPlaceDetails, GeoMapPlacesServiceImplementation, PlaceAddress,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Fields requested from `findPlaceFromQuery`.
pub const SEARCH_FIELDS: [&str; 4] = ["formatted_address", "name", "place_id", "geometry"];

pub struct GooglePlacesService {
    api: Arc<dyn GoogleMapsApi>,
}

impl GooglePlacesService {
    pub fn new(api: Arc<dyn GoogleMapsApi>) -> Self {
        Self { api }
    }

    async fn search_places(
        &self,
        needle: String,
        center: GeoPoint,
        radius: f64,
    ) -> Result<Vec<GeoMapPlace>, GeoMapError> {
        let request = FindPlaceRequest {
            query: needle,
            fields: SEARCH_FIELDS.iter().map(|f| f.to_string()).collect(),
            location_bias: Some(LocationBias { center, radius }),
        };

        let (results, status) = self.api.find_place_from_query(request).map_err(|err| {
            warn!(error = %err, "Google place search threw");
            GeoMapError::from(err)
        })?.await;

        match status {
            GoogleStatus::Ok => Ok(results.iter().map(convert_place).collect()),
            status if status.is_empty_result() => {
                debug!(status = %status, "Google place search found nothing");
                Ok(Vec::new())
            }
            status => Err(GeoMapError::PlaceQuery {
                status: status.to_string(),
            }),
        }
    }

    async fn place_details(&self, place_id: String) -> Result<GeoMapPlaceDetails, GeoMapError> {
        let request = PlaceDetailsRequest {
            place_id: place_id.clone(),
        };
        let (result, status) = self.api.get_details(request)?.await;

        match (status, result) {
            (GoogleStatus::Ok, Some(result)) => Ok(convert_details(&result, &place_id)),
            (GoogleStatus::Ok, None) => Err(GeoMapError::PlaceNotFound(place_id)),
            (status, _) if status.is_empty_result() => Err(GeoMapError::PlaceNotFound(place_id)),
            (status, _) => Err(GeoMapError::PlaceQuery {
                status: status.to_string(),
            }),
        }
    }
}

impl GeoMapPlacesServiceImplementation for GooglePlacesService {
    fn get(&self, place_id: String) -> BoxFuture<'_, Result<GeoMapPlaceDetails, GeoMapError>> {
        Box::pin(self.place_details(place_id))
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
        self.api.compute_distance_between(from, to, radius)
    }
}

fn convert_place(result: &PlaceResult) -> GeoMapPlace {
    GeoMapPlace {
        provider: GeoMapProvider::Google,
        id: result.place_id.clone().unwrap_or_default(),
        name: result.name.clone().unwrap_or_default(),
        formatted_address: result.formatted_address.clone().unwrap_or_default(),
        location: result.location.unwrap_or_default(),
    }
}

pub(crate) fn convert_details(result: &PlaceResult, fallback_id: &str) -> GeoMapPlaceDetails {
    GeoMapPlaceDetails {
        provider: GeoMapProvider::Google,
        id: result
            .place_id
            .clone()
            .unwrap_or_else(|| fallback_id.to_string()),
        name: result.name.clone(),
        address: convert_address(&result.address_components),
        formatted_address: result.formatted_address.clone().unwrap_or_default(),
        location: result.location,
        icon: result.icon.clone(),
        permanently_closed: result.permanently_closed,
        types: result.types.clone(),
        formatted_phone_number: result.formatted_phone_number.clone(),
        website: result.website.clone(),
    }
}

/// Maps address components to their fields by component type.
pub(crate) fn convert_address(components: &[AddressComponent]) -> PlaceAddress {
    let long = |kind: &str| {
        components
            .iter()
            .find(|c| c.has_type(kind))
            .map(|c| c.long_name.clone())
    };
    let country = components.iter().find(|c| c.has_type("country"));

    PlaceAddress {
        country: country.map(|c| c.long_name.clone()),
        country_code: country.map(|c| c.short_name.clone()),
        county: long("administrative_area_level_2"),
        district: long("sublocality"),
        state: long("administrative_area_level_1"),
        postal_code: long("postal_code"),
        locality: long("locality"),
        route: long("route"),
        street_number: long("street_number"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::google::mock::MockGoogleApi;

    fn place(id: &str, name: &str) -> PlaceResult {
        PlaceResult {
            place_id: Some(id.to_string()),
            name: Some(name.to_string()),
            formatted_address: Some(format!("{} street", name)),
            location: Some(GeoPoint::new(52.5, 13.4)),
            ..Default::default()
        }
    }

    fn component(long: &str, short: &str, types: &[&str]) -> AddressComponent {
        AddressComponent {
            long_name: long.to_string(),
            short_name: short.to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
        }
    }

    async fn search_with(api: MockGoogleApi) -> Result<Vec<GeoMapPlace>, GeoMapError> {
        let service = GooglePlacesService::new(Arc::new(api));
        service
            .search("coffee".to_string(), GeoPoint::new(52.5, 13.4), 500.0)
            .await
    }

    #[tokio::test]
    async fn test_search_ok_preserves_vendor_order() {
        let api = MockGoogleApi::new().with_find_place(
            vec![place("b", "Second"), place("a", "First")],
            GoogleStatus::Ok,
        );
        let places = search_with(api).await.unwrap();
        let ids: Vec<_> = places.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(places[0].provider, GeoMapProvider::Google);
        assert_eq!(places[0].formatted_address, "Second street");
    }

    #[tokio::test]
    async fn test_search_zero_results_is_empty() {
        let api = MockGoogleApi::new().with_find_place(vec![], GoogleStatus::ZeroResults);
        assert_eq!(search_with(api).await, Ok(vec![]));
    }

    #[tokio::test]
    async fn test_search_not_found_is_empty() {
        let api = MockGoogleApi::new().with_find_place(vec![], GoogleStatus::NotFound);
        assert_eq!(search_with(api).await, Ok(vec![]));
    }

    #[tokio::test]
    async fn test_search_other_status_fails() {
        let api = MockGoogleApi::new().with_find_place(vec![], GoogleStatus::OverQueryLimit);
        assert_eq!(
            search_with(api).await,
            Err(GeoMapError::PlaceQuery {
                status: "OVER_QUERY_LIMIT".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_search_throw_becomes_vendor_call() {
        let api = MockGoogleApi::new().throwing("InvalidValueError");
        assert_eq!(
            search_with(api).await,
            Err(GeoMapError::VendorCall("InvalidValueError".to_string()))
        );
    }

    #[tokio::test]
    async fn test_search_request_shape() {
        let api = Arc::new(MockGoogleApi::new());
        let service = GooglePlacesService::new(Arc::clone(&api) as Arc<dyn GoogleMapsApi>);
        let center = GeoPoint::new(48.1, 11.6);
        let _ = service.search("museum".to_string(), center, 2_000.0).await;

        let requests = api.find_place_requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, "museum");
        assert_eq!(
            requests[0].fields,
            vec!["formatted_address", "name", "place_id", "geometry"]
        );
        assert_eq!(
            requests[0].location_bias,
            Some(LocationBias {
                center,
                radius: 2_000.0
            })
        );
    }

    #[tokio::test]
    async fn test_get_maps_details() {
        let mut result = place("xyz", "Rathaus");
        result.address_components = vec![
            component("12", "12", &["street_number"]),
            component("Marktplatz", "Marktplatz", &["route"]),
            component("Bremen", "Bremen", &["locality", "political"]),
            component("Mitte", "Mitte", &["sublocality", "political"]),
            component("Bremen", "HB", &["administrative_area_level_1"]),
            component("Germany", "DE", &["country", "political"]),
            component("28195", "28195", &["postal_code"]),
        ];
        result.website = Some("https://example.org".to_string());

        let api = MockGoogleApi::new().with_details(Some(result), GoogleStatus::Ok);
        let service = GooglePlacesService::new(Arc::new(api));
        let details = service.get("xyz".to_string()).await.unwrap();

        assert_eq!(details.id, "xyz");
        assert_eq!(details.name.as_deref(), Some("Rathaus"));
        assert_eq!(details.website.as_deref(), Some("https://example.org"));
        assert_eq!(
            details.address,
            PlaceAddress {
                country: Some("Germany".to_string()),
                country_code: Some("DE".to_string()),
                county: None,
                district: Some("Mitte".to_string()),
                state: Some("Bremen".to_string()),
                postal_code: Some("28195".to_string()),
                locality: Some("Bremen".to_string()),
                route: Some("Marktplatz".to_string()),
                street_number: Some("12".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let api = MockGoogleApi::new().with_details(None, GoogleStatus::NotFound);
        let service = GooglePlacesService::new(Arc::new(api));
        assert_eq!(
            service.get("missing".to_string()).await,
            Err(GeoMapError::PlaceNotFound("missing".to_string()))
        );
    }

    #[tokio::test]
    async fn test_get_denied() {
        let api = MockGoogleApi::new().with_details(None, GoogleStatus::RequestDenied);
        let service = GooglePlacesService::new(Arc::new(api));
        assert_eq!(
            service.get("p".to_string()).await,
            Err(GeoMapError::PlaceQuery {
                status: "REQUEST_DENIED".to_string()
            })
        );
    }
}
