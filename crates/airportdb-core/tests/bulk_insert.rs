use airportdb_core::prelude::*;
use std::sync::Arc;

// Excerpt of OpenFlights airports.dat
const OPENFLIGHTS: &str = r#"3797,"John F Kennedy International Airport","New York","United States","JFK","KJFK",40.63980103,-73.77890015,13,-5,"A","America/New_York","airport","OurAirports"
3697,"La Guardia Airport","New York","United States","LGA","KLGA",40.77719879,-73.87259674,21,-5,"A","America/New_York","airport","OurAirports"
3494,"Newark Liberty International Airport","Newark","United States","EWR","KEWR",40.692501068115234,-74.168701171875,18,-5,"A","America/New_York","airport","OurAirports"
507,"London Heathrow Airport","London","United Kingdom","LHR","EGLL",51.4706,-0.461941,83,0,"E","Europe/London","airport","OurAirports"
1382,"Charles de Gaulle International Airport","Paris","France","CDG","LFPG",49.012798,2.55,392,1,"E","Europe/Paris","airport","OurAirports"
"#;

#[tokio::test]
async fn clean_file_inserts_everything() {
    let svc = AirportService::new(MemoryStore::new());
    let report = svc.bulk_insert(OPENFLIGHTS).await.unwrap();

    assert_eq!(report.inserted, 5);
    assert_eq!(report.skipped(), 0);

    let jfk = svc.airport(3797).await.unwrap();
    assert_eq!(jfk.iata.as_deref(), Some("JFK"));
    assert_eq!(jfk.tz_database_time_zone.as_deref(), Some("America/New_York"));
    assert_eq!(jfk.source.as_deref(), Some("OurAirports"));

    let near = svc.airports_within_radius(3797, 50_000.0).await.unwrap();
    let ids: Vec<i32> = near.neighbors.iter().map(|n| n.airport_id).collect();
    assert_eq!(ids, [3697, 3494]);
}

#[tokio::test]
async fn non_numeric_latitude_line_is_skipped() {
    let text = OPENFLIGHTS.replace("51.4706", "\"not-a-number\"");
    let svc = AirportService::new(MemoryStore::new());
    let report = svc.bulk_insert(&text).await.unwrap();

    assert_eq!(report.inserted, 4);
    assert_eq!(report.skipped(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.line, 4);
    assert!(failure.raw.contains("London Heathrow"));
    assert!(failure.reason.contains("latitude"));
    assert!(matches!(
        svc.airport(507).await,
        Err(AirportError::NotFound(507))
    ));
}

#[tokio::test]
async fn n_rows_with_m_malformed_inserts_n_minus_m() {
    let mut text = String::from(OPENFLIGHTS);
    text.push_str("9001,\"Too short\",\"X\"\n"); // wrong width
    text.push_str("abc,\"Bad id\",\"X\",\"Y\",\\N,\\N,1.0,2.0,0,0,\"U\",\\N,\"airport\",\"manual\"\n");
    text.push_str("9003,\"Off the map\",\"X\",\"Y\",\\N,\\N,95.0,2.0,0,0,\"U\",\\N,\"airport\",\"manual\"\n");
    text.push_str("9004,\"Fine\",\"X\",\"Y\",\\N,\\N,-45.0,170.0,0,12,\"U\",\\N,\"airport\",\"manual\"\n");

    let svc = AirportService::new(MemoryStore::new());
    let report = svc.bulk_insert(&text).await.unwrap();

    assert_eq!(report.total(), 9);
    assert_eq!(report.inserted, 6);
    assert_eq!(report.skipped(), 3);
    let lines: Vec<usize> = report.failures.iter().map(|f| f.line).collect();
    assert_eq!(lines, [6, 7, 8]);

    let fine = svc.airport(9004).await.unwrap();
    assert_eq!(fine.iata, None);
    assert_eq!(fine.timezone, Some(12.0));
}

#[tokio::test]
async fn duplicate_ids_in_a_batch_do_not_abort_it() {
    let store = Arc::new(MemoryStore::new());
    let svc = AirportService::new(Arc::clone(&store));

    let first = svc.bulk_insert(OPENFLIGHTS).await.unwrap();
    assert_eq!(first.inserted, 5);

    // Re-loading the same file: every row conflicts, none are fatal.
    let again = svc.bulk_insert(OPENFLIGHTS).await.unwrap();
    assert_eq!(again.inserted, 0);
    assert_eq!(again.skipped(), 5);
    assert!(again.failures[0].reason.contains("already exists"));
    assert_eq!(store.len(), 5);
}

#[tokio::test]
async fn semicolon_file_is_sniffed() {
    let text = "1;Alpha;Here;Land;;;10.0;10.0\n2;Beta;There;Land;;;10.1;10.1\n";
    let svc = AirportService::new(MemoryStore::new());
    let report = svc.bulk_insert(text).await.unwrap();
    assert_eq!(report.inserted, 2);

    let hits = svc.airports_within_radius(1, 20_000.0).await.unwrap();
    assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn empty_input_is_rejected_before_parsing() {
    let svc = AirportService::new(MemoryStore::new());
    for text in ["", "   ", "\n\n"] {
        assert!(matches!(
            svc.bulk_insert(text).await,
            Err(AirportError::InvalidArgument(_))
        ));
    }
}

#[tokio::test]
async fn all_lines_bad_is_still_a_report() {
    let svc = AirportService::new(MemoryStore::new());
    let report = svc
        .bulk_insert("x,y,z,w,a,b,c,d\nq,r,s,t,e,f,g,h\n")
        .await
        .unwrap();
    assert_eq!(report.inserted, 0);
    assert_eq!(report.skipped(), 2);
}

#[tokio::test]
async fn whitespace_only_line_is_a_failed_record() {
    let svc = AirportService::new(MemoryStore::new());
    let report = svc
        .bulk_insert("1,A,X,Y,,,1.0,1.0\n   \n2,B,X,Y,,,2.0,2.0\n")
        .await
        .unwrap();
    assert_eq!(report.inserted, 2);
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.failures[0].line, 2);
    assert!(report.failures[0].reason.starts_with("malformed"));
    // every non-empty record is accounted for
    assert_eq!(report.total(), 3);
}

#[tokio::test]
async fn empty_lines_are_not_records() {
    let svc = AirportService::new(MemoryStore::new());
    let report = svc
        .bulk_insert("\n1,A,X,Y,,,1.0,1.0\n\n\n2,B,X,Y,,,2.0,2.0\n\n")
        .await
        .unwrap();
    assert_eq!(report.total(), 2);
    assert_eq!(report.inserted, 2);
}
