use athletrack_api::client::{ApiError, AthleTrackApi};
use athletrack_api::{Side, TeamRegistration};
use mockito::{Matcher, Server, ServerGuard};
use std::io::Write;
use std::time::Duration;

const MATCH_JSON: &str = r#"{
    "_id": "m1",
    "team_1": { "_id": "a", "team_details": { "name": "Lalitpur Lions", "logo": "lions.png" } },
    "team_2": { "_id": "b", "team_details": { "name": "Pokhara Peaks", "logo": "peaks.png" } },
    "player_stats": [
        { "player_id": "a1", "team_id": "a", "points": 2, "assists": 1, "rebounds": 3 },
        { "player_id": "a2", "team_id": "a", "points": 2, "assists": 0, "rebounds": 5 },
        { "player_id": "a3", "team_id": "a", "points": 3, "assists": 4, "rebounds": 1 },
        { "player_id": "b1", "team_id": "b", "points": 5, "assists": 2, "rebounds": 7 }
    ]
}"#;

fn api_for(server: &ServerGuard) -> AthleTrackApi {
    AthleTrackApi::new(&server.url(), Duration::from_secs(5))
}

async fn mock_player(server: &mut ServerGuard, id: &str, name: &str) -> mockito::Mock {
    server
        .mock("GET", format!("/api/player/getPlayerById/{id}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{ "_id": "{id}", "name": "{name}" }}"#))
        .create_async()
        .await
}

async fn mock_match(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock("GET", "/api/match/matches/m1/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(MATCH_JSON)
        .create_async()
        .await
}

#[tokio::test]
async fn fetch_tournaments_reads_all_tournaments() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/tournaments/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{ "allTournaments": [
                { "_id": "t1", "name": "Kathmandu Hoops Open", "prizePool": { "firstPrize": "100" } },
                { "_id": "t2", "name": "Valley Cup" }
            ] }"#,
        )
        .create_async()
        .await;

    let tournaments = api_for(&server).fetch_tournaments().await.unwrap();
    mock.assert_async().await;
    assert_eq!(tournaments.len(), 2);
    assert_eq!(tournaments[0].prize_pool.first, 100);
    assert_eq!(tournaments[1].name, "Valley Cup");
}

#[tokio::test]
async fn aggregate_joins_every_player_in_stat_order() {
    let mut server = Server::new_async().await;
    let _m = mock_match(&mut server).await;
    let _p1 = mock_player(&mut server, "a1", "Aarav").await;
    let _p2 = mock_player(&mut server, "a2", "Bikash").await;
    let _p3 = mock_player(&mut server, "a3", "Chirag").await;
    let _p4 = mock_player(&mut server, "b1", "Dipesh").await;

    let agg = api_for(&server).fetch_match_aggregate("m1").await.unwrap();
    assert_eq!(agg.team_1.score, 7);
    assert_eq!(agg.team_2.score, 5);
    assert_eq!(agg.team_2.logo.as_deref(), Some("peaks.png"));
    let names: Vec<_> = agg.player_stats.iter().map(|l| l.player_name.as_str()).collect();
    assert_eq!(names, ["Aarav", "Bikash", "Chirag", "Dipesh"]);
    assert_eq!(agg.players_for(Side::First).count(), 3);
}

#[tokio::test]
async fn aggregate_keeps_stat_order_when_early_lookups_are_slow() {
    let mut server = Server::new_async().await;
    let _m = mock_match(&mut server).await;
    let _slow = server
        .mock("GET", "/api/player/getPlayerById/a1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_millis(400));
            w.write_all(br#"{ "_id": "a1", "name": "Aarav" }"#)
        })
        .create_async()
        .await;
    let _p2 = mock_player(&mut server, "a2", "Bikash").await;
    let _p3 = mock_player(&mut server, "a3", "Chirag").await;
    let _p4 = mock_player(&mut server, "b1", "Dipesh").await;

    let agg = api_for(&server).fetch_match_aggregate("m1").await.unwrap();
    let names: Vec<_> = agg.player_stats.iter().map(|l| l.player_name.as_str()).collect();
    assert_eq!(names, ["Aarav", "Bikash", "Chirag", "Dipesh"]);
}

#[tokio::test]
async fn aggregate_counts_points_of_entries_without_player() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/match/matches/m1/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "_id": "m1",
                "team_1": { "_id": "a" },
                "team_2": { "_id": "b" },
                "player_stats": [
                    { "player_id": "a1", "team_id": "a", "points": 2, "assists": null },
                    { "team_id": "b", "points": 5 },
                    { "player_id": "", "team_id": "b", "points": "3" }
                ]
            }"#,
        )
        .create_async()
        .await;
    let _p1 = mock_player(&mut server, "a1", "Aarav").await;

    let agg = api_for(&server).fetch_match_aggregate("m1").await.unwrap();
    assert_eq!((agg.team_1.score, agg.team_2.score), (2, 8));
    assert_eq!(agg.player_stats.len(), 1);
    assert_eq!(agg.player_stats[0].assists, 0);
}

#[tokio::test]
async fn aggregate_drops_failed_player_lookups() {
    let mut server = Server::new_async().await;
    let _m = mock_match(&mut server).await;
    let _p1 = mock_player(&mut server, "a1", "Aarav").await;
    let _p3 = mock_player(&mut server, "a3", "Chirag").await;
    let _missing = server
        .mock("GET", "/api/player/getPlayerById/a2")
        .with_status(404)
        .create_async()
        .await;
    let _broken = server
        .mock("GET", "/api/player/getPlayerById/b1")
        .with_status(500)
        .create_async()
        .await;

    let agg = api_for(&server).fetch_match_aggregate("m1").await.unwrap();
    assert_eq!(agg.player_stats.len(), 2);
    assert_eq!(agg.player_stats[0].player_name, "Aarav");
    assert_eq!(agg.player_stats[1].player_name, "Chirag");
    assert_eq!((agg.team_1.score, agg.team_2.score), (7, 5));
}

#[tokio::test]
async fn aggregate_fails_when_match_is_missing() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/match/matches/nope/")
        .with_status(404)
        .create_async()
        .await;

    let err = api_for(&server).fetch_match_aggregate("nope").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)), "got {err}");
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/team/teams")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{ not json")
        .create_async()
        .await;

    let err = api_for(&server).fetch_teams().await.unwrap_err();
    assert!(matches!(err, ApiError::Parsing(_, _)), "got {err}");
}

#[tokio::test]
async fn fetch_matches_skips_unmappable_records() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/match/matches/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"[{MATCH_JSON}, {{ "_id": "broken" }}]"#))
        .create_async()
        .await;

    let matches = api_for(&server).fetch_matches().await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, "m1");
}

#[tokio::test]
async fn register_team_posts_team_document() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/team/teams")
        .match_body(Matcher::PartialJsonString(
            r#"{ "tournament_id": "t1", "team_details": { "name": "Lions" } }"#.to_string(),
        ))
        .with_status(201)
        .create_async()
        .await;

    let reg = TeamRegistration {
        tournament_id: "t1".into(),
        team_name: "Lions".into(),
        origin: "Lalitpur".into(),
        coach_name: "Ram".into(),
        coach_phone: "9800000000".into(),
        players: vec!["Sita".into()],
    };
    api_for(&server).register_team(&reg).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn register_team_surfaces_server_rejection() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/api/team/teams")
        .with_status(400)
        .create_async()
        .await;

    let err = api_for(&server)
        .register_team(&TeamRegistration::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Api(_, _)), "got {err}");
}
