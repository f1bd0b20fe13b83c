use airportdb_core::prelude::*;
use airportdb_core::haversine_m;

const JFK: (f64, f64) = (40.6413, -73.7781);
const LHR: (f64, f64) = (51.4700, -0.4543);
const LGA: (f64, f64) = (40.7769, -73.8740);
const EWR: (f64, f64) = (40.6895, -74.1745);
const BOS: (f64, f64) = (42.3656, -71.0096);

fn new_airport(id: i32, name: &str, (lat, lon): (f64, f64)) -> NewAirport {
    NewAirport {
        airport_id: id,
        name: name.to_string(),
        city: "City".to_string(),
        country: "Country".to_string(),
        latitude: lat,
        longitude: lon,
    }
}

async fn seeded() -> AirportService<MemoryStore> {
    let svc = AirportService::new(MemoryStore::new());
    svc.init_schema().await.unwrap();
    for (id, name, at) in [
        (1, "JFK", JFK),
        (2, "LHR", LHR),
        (3, "LGA", LGA),
        (4, "EWR", EWR),
        (5, "BOS", BOS),
    ] {
        svc.insert_airport(new_airport(id, name, at)).await.unwrap();
    }
    svc
}

#[tokio::test]
async fn jfk_lhr_six_thousand_in_five_thousand_out() {
    let svc = seeded().await;

    let wide = svc.airports_within_radius(1, 6_000_000.0).await.unwrap();
    assert!(wide.neighbors.iter().any(|n| n.name == "LHR"));

    let narrow = svc.airports_within_radius(1, 5_000_000.0).await.unwrap();
    assert!(narrow.neighbors.iter().all(|n| n.name != "LHR"));
    assert_eq!(narrow.len(), 3); // LGA, EWR, BOS
}

#[tokio::test]
async fn origin_is_never_its_own_neighbor() {
    let svc = seeded().await;
    for id in 1..=5 {
        let hits = svc.airports_within_radius(id, 20_000_000.0).await.unwrap();
        assert_eq!(hits.origin.airport_id, id);
        assert!(hits.neighbors.iter().all(|n| n.airport_id != id));
        assert_eq!(hits.len(), 4);
    }
}

#[tokio::test]
async fn results_are_nearest_first() {
    let svc = seeded().await;
    let hits = svc.airports_within_radius(1, 20_000_000.0).await.unwrap();
    let names: Vec<&str> = hits.neighbors.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["LGA", "EWR", "BOS", "LHR"]);
    assert!(hits
        .neighbors
        .windows(2)
        .all(|w| w[0].distance_m <= w[1].distance_m));
}

#[tokio::test]
async fn boundary_is_inclusive() {
    let svc = seeded().await;
    let d = haversine_m(JFK.0, JFK.1, LGA.0, LGA.1);

    let at = svc.airports_within_radius(1, d).await.unwrap();
    assert!(at.neighbors.iter().any(|n| n.airport_id == 3));

    let below = svc
        .airports_within_radius(1, d * (1.0 - 1e-9))
        .await
        .unwrap();
    assert!(below.neighbors.iter().all(|n| n.airport_id != 3));
}

#[tokio::test]
async fn reported_distance_matches_haversine() {
    let svc = seeded().await;
    let hits = svc.airports_within_radius(1, 100_000.0).await.unwrap();
    let lga = hits.neighbors.iter().find(|n| n.airport_id == 3).unwrap();
    let expected = haversine_m(JFK.0, JFK.1, LGA.0, LGA.1);
    assert!((lga.distance_m - expected).abs() < 1e-6);
    assert!((lga.distance_km() - 17.108).abs() < 0.01);
}

#[tokio::test]
async fn missing_origin_differs_from_empty_result() {
    let svc = seeded().await;

    let missing = svc.airports_within_radius(999, 1_000.0).await;
    assert!(matches!(missing, Err(AirportError::NotFound(999))));

    let lonely = svc.airports_within_radius(2, 1_000.0).await.unwrap();
    assert_eq!(lonely.origin.name, "LHR");
    assert!(lonely.is_empty());
}

#[tokio::test]
async fn zero_radius_finds_only_coincident_points() {
    let svc = seeded().await;
    assert!(svc.airports_within_radius(1, 0.0).await.unwrap().is_empty());

    svc.insert_airport(new_airport(6, "JFK twin", JFK))
        .await
        .unwrap();
    let hits = svc.airports_within_radius(1, 0.0).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits.neighbors[0].airport_id, 6);
    assert_eq!(hits.neighbors[0].distance_m, 0.0);
}

#[tokio::test]
async fn negative_or_nan_radius_is_rejected() {
    let svc = seeded().await;
    for r in [-1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            svc.airports_within_radius(1, r).await,
            Err(AirportError::InvalidArgument(_))
        ));
    }
}

#[tokio::test]
async fn duplicate_insert_conflicts() {
    let svc = AirportService::new(MemoryStore::new());
    let first = svc.insert_airport(new_airport(42, "First", JFK)).await;
    assert!(first.is_ok());

    let second = svc.insert_airport(new_airport(42, "Second", LHR)).await;
    assert!(matches!(second, Err(AirportError::Conflict(42))));

    // the original row is untouched
    assert_eq!(svc.airport(42).await.unwrap().name, "First");
}

#[tokio::test]
async fn invalid_manual_input_writes_nothing() {
    let svc = AirportService::new(MemoryStore::new());

    let mut bad_lat = new_airport(1, "X", JFK);
    bad_lat.latitude = 95.0;
    assert!(matches!(
        svc.insert_airport(bad_lat).await,
        Err(AirportError::InvalidArgument(_))
    ));

    let mut blank = new_airport(2, "X", JFK);
    blank.name = "  ".into();
    assert!(matches!(
        svc.insert_airport(blank).await,
        Err(AirportError::InvalidArgument(_))
    ));

    assert!(svc.store().is_empty());
}

#[tokio::test]
async fn manual_insert_is_visible_immediately_with_defaults() {
    let svc = AirportService::new(MemoryStore::new());
    svc.insert_airport(new_airport(7, "Fresh", BOS)).await.unwrap();

    let a = svc.airport(7).await.unwrap();
    assert_eq!(a.airport_type.as_deref(), Some("airport"));
    assert_eq!(a.source.as_deref(), Some("manual"));
    assert_eq!((a.latitude, a.longitude), BOS);
    assert!(matches!(
        svc.airport(8).await,
        Err(AirportError::NotFound(8))
    ));
}

#[tokio::test]
async fn boxed_store_behaves_the_same() {
    let store: Box<dyn SpatialStore> = Box::new(MemoryStore::new());
    let svc = AirportService::new(store);
    svc.insert_airport(new_airport(1, "JFK", JFK)).await.unwrap();
    svc.insert_airport(new_airport(3, "LGA", LGA)).await.unwrap();
    let hits = svc.airports_within_radius(1, 50_000.0).await.unwrap();
    assert_eq!(hits.len(), 1);
}
