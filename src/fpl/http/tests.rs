//! Unit tests for the FPL HTTP client against a mocked API

use super::*;
use serde_json::json;
use wiremock::{
    matchers::{body_json, body_string_contains, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

async fn client_for(server: &MockServer) -> FplClient {
    FplClient::with_urls(
        &format!("{}/api/", server.uri()),
        &format!("{}/accounts/login/", server.uri()),
    )
    .unwrap()
}

fn standings_page_json(page: u32, ranks: &[u32], has_next: Value) -> Value {
    json!({
        "league": {"id": 314, "name": "Overall"},
        "new_entries": {"has_next": false, "page": 1, "results": [{"entry": 9000}]},
        "standings": {
            "has_next": has_next,
            "page": page,
            "results": ranks
                .iter()
                .map(|r| json!({"rank": r, "entry": 1000 + r}))
                .collect::<Vec<_>>()
        }
    })
}

#[cfg(test)]
mod fetch_tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_general_info_keeps_rows_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/bootstrap-static/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "events": [{"id": 1}, {"id": 2}],
                "phases": [{"id": 1, "name": "Overall"}],
                "teams": [{"id": 2, "name": "Aston Villa"}, {"id": 1, "name": "Arsenal"}],
                "elements": [
                    {"id": 5, "element_type": 2, "team": 1, "now_cost": 55, "ep_next": "3.1", "total_points": 40},
                    {"id": 3, "element_type": 4, "team": 2, "now_cost": 80, "ep_next": null, "total_points": 12}
                ],
                "element_types": [{"id": 1, "singular_name_short": "GKP"}],
                "total_players": 11000000,
                "game_settings": {"squad_squadsize": 15}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let info = client.fetch_general_info().await.unwrap();

        assert_eq!(info.events.len(), 2);
        let team_ids: Vec<_> = info.teams.column("id").map(|v| v.unwrap().clone()).collect();
        assert_eq!(team_ids, vec![json!(2), json!(1)]);
        assert_eq!(info.extra["total_players"], json!(11000000));
        assert!(info.extra.contains_key("game_settings"));

        let elements = info.typed_elements().unwrap();
        assert_eq!(elements[0].id, ElementId::new(5));
        assert_eq!(elements[1].ep_next, None);
    }

    #[tokio::test]
    async fn test_fetch_fixtures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/fixtures/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "event": 1, "team_h": 1, "team_a": 2},
                {"id": 2, "event": 1, "team_h": 3, "team_a": 4}
            ])))
            .mount(&server)
            .await;

        let fixtures = client_for(&server).await.fetch_fixtures().await.unwrap();
        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures.columns()[0], "id");
    }

    #[tokio::test]
    async fn test_fetch_elements_one_request_per_id() {
        let server = MockServer::start().await;
        for id in [1, 2] {
            Mock::given(method("GET"))
                .and(path(format!("/api/element-summary/{id}/")))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "fixtures": [{"id": 100 + id}],
                    "history": [{"element": id, "round": 1}],
                    "history_past": []
                })))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = client_for(&server).await;
        let out = client
            .fetch_elements(&[ElementId::new(2), ElementId::new(1)])
            .await
            .unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out[&ElementId::new(1)]["history"].len(), 1);
        assert!(out[&ElementId::new(2)]["history_past"].is_empty());
    }

    #[tokio::test]
    async fn test_fetch_elements_aborts_on_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/element-summary/1/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"history": []})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/element-summary/2/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/element-summary/3/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"history": []})))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .fetch_elements(&[ElementId::new(1), ElementId::new(2), ElementId::new(3)])
            .await
            .unwrap_err();
        assert!(matches!(err, FplError::Http(_)));
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/fixtures/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.fetch_fixtures().await.unwrap_err();
        assert!(matches!(err, FplError::Json(_)));
    }

    #[tokio::test]
    async fn test_unexpected_shape() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/fixtures/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detail": "Not found."})))
            .mount(&server)
            .await;

        let err = client_for(&server).await.fetch_fixtures().await.unwrap_err();
        assert!(matches!(err, FplError::UnexpectedShape { .. }));
    }

    #[tokio::test]
    async fn test_fetch_gameweek_live() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/event/7/live/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "elements": [
                    {"id": 1, "stats": {"minutes": 90, "total_points": 6}, "explain": []},
                    {"id": 2, "stats": {"minutes": 0, "total_points": 0}, "explain": []}
                ]
            })))
            .mount(&server)
            .await;

        let table = client_for(&server)
            .await
            .fetch_gameweek_live(Gameweek::new(7).unwrap())
            .await
            .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0]["stats"]["minutes"], json!(90));
    }

    #[tokio::test]
    async fn test_fetch_managers_and_history() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/entry/77/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 77,
                "name": "Route One",
                "summary_overall_points": 1500,
                "leagues": {"classic": [], "h2h": []}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/entry/77/history/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "current": [{"event": 1, "points": 60}, {"event": 2, "points": 48}],
                "past": [{"season_name": "2022/23", "rank": 12345}],
                "chips": []
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let managers = client.fetch_managers(&[ManagerId::new(77)]).await.unwrap();
        let entry = &managers[&ManagerId::new(77)];
        assert_eq!(entry.len(), 1);
        assert_eq!(entry.rows()[0]["name"], json!("Route One"));

        let histories = client
            .fetch_manager_histories(&[ManagerId::new(77)])
            .await
            .unwrap();
        let history = &histories[&ManagerId::new(77)];
        assert_eq!(history["current"].len(), 2);
        assert_eq!(history["past"].len(), 1);
        assert!(history["chips"].is_empty());
    }
}

#[cfg(test)]
mod league_tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_league_first_page_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/leagues-classic/314/standings/"))
            .and(query_param("page_standings", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(standings_page_json(1, &[1, 2], json!(true))),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/leagues-classic/314/standings/"))
            .and(query_param("page_standings", "2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(standings_page_json(2, &[3], json!(false))),
            )
            .expect(0)
            .mount(&server)
            .await;

        let league = client_for(&server)
            .await
            .fetch_league(LeagueId::new(314), false)
            .await
            .unwrap();

        assert_eq!(league.standings.len(), 2);
        assert_eq!(league.new_entries.len(), 1);
        assert_eq!(league.league["name"], json!("Overall"));
    }

    #[tokio::test]
    async fn test_fetch_league_all_pages_concatenates_in_order() {
        let server = MockServer::start().await;
        let pages = [
            (1, vec![1, 2], json!(true)),
            (2, vec![3, 4], json!(true)),
            (3, vec![5], json!(false)),
        ];
        for (page, ranks, has_next) in pages {
            Mock::given(method("GET"))
                .and(path("/api/leagues-classic/314/standings/"))
                .and(query_param("page_standings", page.to_string()))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(standings_page_json(page, &ranks, has_next)),
                )
                .expect(1)
                .mount(&server)
                .await;
        }

        let league = client_for(&server)
            .await
            .fetch_league(LeagueId::new(314), true)
            .await
            .unwrap();

        let ranks: Vec<_> = league
            .standings
            .column("rank")
            .map(|v| v.unwrap().as_u64().unwrap())
            .collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_fetch_league_numeric_has_next() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/leagues-classic/314/standings/"))
            .and(query_param("page_standings", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(standings_page_json(1, &[1], json!(2))),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/leagues-classic/314/standings/"))
            .and(query_param("page_standings", "2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(standings_page_json(2, &[2], json!(0))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let league = client_for(&server)
            .await
            .fetch_league(LeagueId::new(314), true)
            .await
            .unwrap();
        assert_eq!(league.standings.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_league_stalled_pagination_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/leagues-classic/314/standings/"))
            .and(query_param("page_standings", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(standings_page_json(1, &[1], json!(true))),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/leagues-classic/314/standings/"))
            .and(query_param("page_standings", "2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(standings_page_json(2, &[], json!(true))),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .fetch_league(LeagueId::new(314), true)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("page 2"));
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(3)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!("")));
    }
}

#[cfg(test)]
mod auth_tests {
    use super::*;

    fn my_team_json() -> Value {
        json!({
            "picks": [
                {"element": 1, "position": 1, "selling_price": 45, "purchase_price": 45,
                 "multiplier": 1, "is_captain": false, "is_vice_captain": false}
            ],
            "chips": [{"name": "wildcard", "status_for_entry": "available"}],
            "transfers": {"bank": 5, "limit": 1, "made": 0, "value": 1000}
        })
    }

    #[tokio::test]
    async fn test_login_success_follows_redirect() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/accounts/login/"))
            .and(body_string_contains("app=plfpl-web"))
            .and(body_string_contains("login=me%40example.com"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("Location", format!("{}/?state=success", server.uri()).as_str())
                    .insert_header("Set-Cookie", "pl_profile=session123; Path=/"),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/my-team/4950591/"))
            .and(header("cookie", "pl_profile=session123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(my_team_json()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let creds = Credentials::new("me@example.com", "secret");
        let fetched = client
            .fetch_my_team(ManagerId::new(4950591), Some(&creds))
            .await
            .unwrap();

        assert_eq!(fetched.auth, Some(AuthOutcome::Authenticated));
        assert_eq!(fetched.team.picks.len(), 1);
        assert_eq!(fetched.team.chips.len(), 1);
        assert_eq!(fetched.team.transfers["bank"], json!(5));
    }

    #[tokio::test]
    async fn test_login_rejection_is_reported_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/accounts/login/"))
            .respond_with(ResponseTemplate::new(302).insert_header(
                "Location",
                format!("{}/?state=fail&reason=credentials", server.uri()).as_str(),
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let outcome = client
            .login(&Credentials::new("me@example.com", "wrong"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AuthOutcome::Rejected {
                reason: "login state `fail`".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_my_team_without_credentials_skips_login() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/accounts/login/"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/my-team/1/"))
            .and(header("cookie", "pl_profile=abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(my_team_json()))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client.set_profile_cookie("abc123").unwrap();
        let fetched = client.fetch_my_team(ManagerId::new(1), None).await.unwrap();

        assert!(fetched.auth.is_none());
        assert_eq!(fetched.team.squad().unwrap()[0].selling_price, 45);
    }

    #[tokio::test]
    async fn test_unauthenticated_my_team_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/my-team/1/"))
            .respond_with(ResponseTemplate::new(403).set_body_json(
                json!({"detail": "Authentication credentials were not provided."}),
            ))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .fetch_my_team(ManagerId::new(1), None)
            .await
            .unwrap_err();
        assert!(matches!(err, FplError::Http(_)));
    }

    #[test]
    fn test_login_outcome_without_state() {
        let url = Url::parse("https://users.premierleague.com/accounts/login/").unwrap();
        match login_outcome(200, &url) {
            AuthOutcome::Rejected { reason } => assert!(reason.contains("HTTP 200")),
            AuthOutcome::Authenticated => panic!("Expected rejection"),
        }
    }
}

#[cfg(test)]
mod submit_tests {
    use super::*;
    use crate::fpl::types::{LineupPick, Transfer};

    #[tokio::test]
    async fn test_submit_transfers_posts_payload_with_ajax_headers() {
        let server = MockServer::start().await;
        let request = TransferRequest {
            chip: None,
            entry: ManagerId::new(4950591),
            event: Gameweek::new(3).unwrap(),
            transfers: vec![Transfer {
                element_in: ElementId::new(275),
                element_out: ElementId::new(482),
                purchase_price: 45,
                selling_price: 45,
            }],
        };

        Mock::given(method("POST"))
            .and(path("/api/transfers/"))
            .and(header("x-requested-with", "XMLHttpRequest"))
            .and(header("content-type", "application/json"))
            .and(header("referer", "https://fantasy.premierleague.com/transfers"))
            .and(body_json(json!({
                "chip": null,
                "entry": 4950591,
                "event": 3,
                "transfers": [{"element_in": 275, "element_out": 482, "purchase_price": 45, "selling_price": 45}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .await
            .submit_transfers(&request)
            .await
            .unwrap();
        assert!(response.is_success());
        assert_eq!(response.body, "{\"ok\":true}");
    }

    #[tokio::test]
    async fn test_submit_picks_returns_raw_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/my-team/9/"))
            .and(header("referer", "https://fantasy.premierleague.com/my-team"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let request = LineupRequest {
            chip: None,
            picks: vec![LineupPick {
                element: ElementId::new(1),
                is_captain: true,
                is_vice_captain: false,
                position: 1,
            }],
        };
        let response = client_for(&server)
            .await
            .submit_picks(ManagerId::new(9), &request)
            .await
            .unwrap();

        assert_eq!(response.status, 403);
        assert_eq!(response.body, "forbidden");
        assert!(!response.is_success());
    }
}
