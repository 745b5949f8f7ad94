use super::*;

#[test]
fn from_param_reads_json_coordinates() {
    let location = Location::from_param(r#"{"lat":37.77,"lng":-122.41}"#).unwrap();
    assert_eq!(
        location,
        Location::Coords(Coordinates {
            lat: 37.77,
            lng: -122.41
        })
    );
}

#[test]
fn from_param_reads_bare_coordinate_pair() {
    let location = Location::from_param("37.77,-122.41").unwrap();
    assert_eq!(
        location,
        Location::Coords(Coordinates {
            lat: 37.77,
            lng: -122.41
        })
    );
}

#[test]
fn from_param_rejects_malformed_json_object() {
    let result = Location::from_param(r#"{"lat": 37.77, "lng": }"#);
    assert!(
        matches!(result, Err(CoreError::InvalidCoordinates(_))),
        "expected InvalidCoordinates, got: {result:?}"
    );
}

#[test]
fn from_param_rejects_non_numeric_json_coordinates() {
    let result = Location::from_param(r#"{"lat":"north","lng":"west"}"#);
    assert!(matches!(result, Err(CoreError::InvalidCoordinates(_))));
}

#[test]
fn from_param_rejects_out_of_range_json_coordinates() {
    let result = Location::from_param(r#"{"lat":137.0,"lng":0.0}"#);
    assert!(matches!(result, Err(CoreError::InvalidCoordinates(_))));
}

#[test]
fn from_param_treats_plain_text_as_address() {
    let location = Location::from_param("  1600 Amphitheatre Pkwy, Mountain View ").unwrap();
    assert_eq!(
        location,
        Location::Address("1600 Amphitheatre Pkwy, Mountain View".to_string())
    );
}

#[test]
fn from_param_decodes_json_string_literal_as_address() {
    let location = Location::from_param(r#""Dearborn, MI""#).unwrap();
    assert_eq!(location, Location::Address("Dearborn, MI".to_string()));
}

#[test]
fn from_param_keeps_out_of_range_pair_as_address() {
    // Looks numeric but is not a valid coordinate pair.
    let location = Location::from_param("10001, 500").unwrap();
    assert_eq!(location, Location::Address("10001, 500".to_string()));
}

#[test]
fn to_param_round_trips_through_from_param() {
    let coords = Location::Coords(Coordinates {
        lat: 42.3223,
        lng: -83.1763,
    });
    assert_eq!(Location::from_param(&coords.to_param()).unwrap(), coords);

    let address = Location::Address("Paterson, NJ".to_string());
    assert_eq!(Location::from_param(&address.to_param()).unwrap(), address);
}

#[test]
fn to_param_keeps_coordinate_like_addresses_as_addresses() {
    for text in ["40.7,-73.9", r#"{"lat":1,"lng":2}"#, "\"quoted\" St"] {
        let address = Location::Address(text.to_string());
        let param = address.to_param();
        assert!(param.starts_with('"'), "address not encoded as string: {param}");
        assert_eq!(Location::from_param(&param).unwrap(), address);
    }
}

#[test]
fn from_param_json_string_literal_is_never_coordinates() {
    let location = Location::from_param(r#""37.77,-122.41""#).unwrap();
    assert_eq!(location, Location::Address("37.77,-122.41".to_string()));
}

#[test]
fn invalid_radius_message_names_bounds_and_input() {
    let err = CoreError::InvalidRadius("abc".to_string());
    assert_eq!(
        err.to_string(),
        "radius must be an integer between 1 and 50000, got \"abc\""
    );
}

#[test]
fn coordinates_display_is_upstream_location_format() {
    let coords = Coordinates {
        lat: 40.5,
        lng: -74.25,
    };
    assert_eq!(coords.to_string(), "40.5,-74.25");
}

#[test]
fn parse_radius_defaults_when_absent_or_blank() {
    assert_eq!(parse_radius(None).unwrap(), DEFAULT_RADIUS_METERS);
    assert_eq!(parse_radius(Some("  ")).unwrap(), DEFAULT_RADIUS_METERS);
}

#[test]
fn parse_radius_accepts_in_range_values() {
    assert_eq!(parse_radius(Some("1500")).unwrap(), 1500);
    assert_eq!(parse_radius(Some("50000")).unwrap(), MAX_RADIUS_METERS);
}

#[test]
fn parse_radius_rejects_invalid_values() {
    for raw in ["0", "-5", "50001", "five", "12.5"] {
        let result = parse_radius(Some(raw));
        assert!(
            matches!(result, Err(CoreError::InvalidRadius(ref r)) if r == raw),
            "expected InvalidRadius for {raw}, got: {result:?}"
        );
    }
}

#[test]
fn search_query_defaults() {
    let query = SearchQuery::new(Location::Address("Queens, NY".to_string()));
    assert_eq!(query.radius, 5000);
    assert_eq!(query.keyword, "halal meat");
}

#[test]
fn search_query_keyword_decodes_plus_and_ignores_blank() {
    let query = SearchQuery::new(Location::Address("x".to_string())).with_keyword("zabiha+butcher");
    assert_eq!(query.keyword, "zabiha butcher");

    let query = SearchQuery::new(Location::Address("x".to_string())).with_keyword(" + ");
    assert_eq!(query.keyword, "halal meat");
}

#[test]
fn place_result_serializes_camel_case_and_omits_absent_fields() {
    let place = PlaceResult {
        id: "p1".to_string(),
        name: "Crescent Meats".to_string(),
        address: "1 Main St".to_string(),
        distance: 0.0,
        rating: Some(4.6),
        total_ratings: Some(210),
        photo_url: None,
        vicinity: None,
        location: Coordinates { lat: 1.0, lng: 2.0 },
    };
    let json = serde_json::to_value(&place).expect("serialize");
    assert_eq!(json["totalRatings"], 210);
    assert_eq!(json["location"]["lng"], 2.0);
    assert!(json.get("photoUrl").is_none());
    assert!(json.get("vicinity").is_none());
}

#[test]
fn error_envelope_has_empty_results_and_message() {
    let envelope = SearchResponse::error("Failed to fetch places");
    let json = serde_json::to_value(&envelope).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "results": [],
            "status": "error",
            "message": "Failed to fetch places"
        })
    );
    assert!(!envelope.is_success());
}

#[test]
fn success_envelope_omits_message() {
    let json = serde_json::to_value(SearchResponse::success(Vec::new())).expect("serialize");
    assert_eq!(json, serde_json::json!({ "results": [], "status": "success" }));
}

#[test]
fn envelope_without_status_does_not_decode() {
    let result = serde_json::from_str::<SearchResponse>(r#"{"error":"Location is required"}"#);
    assert!(result.is_err());
}
