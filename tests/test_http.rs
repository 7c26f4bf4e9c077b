use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use monopoly_be::{
    config::{GameConfig, PricePolicy},
    create_app,
    games::board::{FixedDice, GameEngine},
    middleware::{create_rate_limiter, spawn_rate_limiter_cleanup},
    state::AppState,
};
use std::time::Duration;
use rand::{SeedableRng, rngs::StdRng};
use serde_json::{Value, json};
use tower::ServiceExt;

fn create_test_app(faces: Vec<u8>) -> (Router, AppState) {
    let config = GameConfig {
        price_policy: PricePolicy::Fixed(500),
        ..GameConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(3);
    let engine = GameEngine::with_dice(config, &mut rng, FixedDice::new(faces)).unwrap();
    let state = AppState::new(engine);
    (create_app(state.clone(), create_rate_limiter(10_000)), state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn join(app: &Router, id: &str, amount: f64, wallet: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/join",
        Some(json!({ "player_id": id, "usdt_amount": amount, "wallet_addr": wallet })),
    )
    .await
}

#[tokio::test]
async fn test_game_flow_over_http() {
    let (app, _) = create_test_app(vec![3]);

    let (status, player) = join(&app, "P1", 10.0, "W1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        player,
        json!({
            "id": "P1",
            "usdt_locked": 10.0,
            "game_coins": 8000,
            "wallet_addr": "W1",
            "position": 0
        })
    );

    let (status, roll) = send(&app, Method::POST, "/roll", Some(json!({ "player_id": "P1" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(roll, json!({ "player_id": "P1", "dice": 3, "position": 3 }));

    let trade = json!({ "player_id": "P1", "property_idx": 3 });
    let (status, body) = send(&app, Method::POST, "/buy", Some(trade.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Property bought", "price": 500 }));

    let (status, body) = send(&app, Method::POST, "/buy", Some(trade.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Property 3 already owned");
    assert_eq!(body["kind"], "state_conflict");

    let (_, properties) = send(&app, Method::GET, "/properties", None).await;
    assert_eq!(properties.as_array().unwrap().len(), 61);
    assert_eq!(properties[3], json!({ "index": 3, "price": 500, "owner": "P1" }));
    assert_eq!(properties[4]["owner"], "");

    let (status, body) = send(&app, Method::POST, "/sell", Some(trade)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Property sold", "price": 250 }));

    let (_, player) = send(&app, Method::GET, "/players/P1", None).await;
    assert_eq!(player["game_coins"], 7750);

    let (status, end) = send(&app, Method::POST, "/end", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(end["winner"], "P1");
    assert_eq!(end["payouts"][0]["wallet_addr"], "W1");
    assert_eq!(end["payouts"][0]["usdt"], 8.0);
}

#[tokio::test]
async fn test_join_rejections() {
    let (app, _) = create_test_app(vec![1]);

    let (status, body) = join(&app, "P1", 2.5, "W1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Minimum 3 USDT required");

    let (status, body) = send(
        &app,
        Method::POST,
        "/join",
        Some(json!({ "player_id": "P1", "usdt_amount": "ten" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request");

    let (_, players) = send(&app, Method::GET, "/players", None).await;
    assert_eq!(players, json!([]));
}

#[tokio::test]
async fn test_unknown_player_and_bad_index() {
    let (app, _) = create_test_app(vec![1]);
    join(&app, "P1", 10.0, "W1").await;

    let (status, body) = send(&app, Method::POST, "/roll", Some(json!({ "player_id": "ghost" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Player not found: ghost");
    assert_eq!(body["kind"], "not_found");

    let (status, body) = send(
        &app,
        Method::POST,
        "/buy",
        Some(json!({ "player_id": "P1", "property_idx": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid property index: -1");

    let (status, body) = send(
        &app,
        Method::POST,
        "/sell",
        Some(json!({ "player_id": "P1", "property_idx": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "You do not own property 0");

    let (status, _) = send(&app, Method::GET, "/players/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_end_without_players_is_rejected() {
    let (app, _) = create_test_app(vec![1]);

    let (status, body) = send(&app, Method::POST, "/end", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No players have joined the game");
}

#[tokio::test]
async fn test_cors_preflight_returns_no_content() {
    let (app, _) = create_test_app(vec![1]);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/join")
        .header(header::ORIGIN, "http://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_joins_are_all_recorded() {
    let (app, state) = create_test_app(vec![1]);

    let joins = (0..50).map(|i| {
        let app = app.clone();
        tokio::spawn(async move {
            let stake = 3.0 + i as f64;
            join(&app, &format!("P{i:02}"), stake, &format!("W{i}")).await.0
        })
    });
    let statuses = futures::future::join_all(joins).await;
    assert!(
        statuses
            .into_iter()
            .all(|s| s.unwrap() == StatusCode::OK)
    );

    let expected: f64 = (0..50).map(|i| (3.0 + i as f64) * 0.8).sum();
    {
        let game = state.game.lock().await;
        assert_eq!(game.list_players().len(), 50);
        assert!((game.total_stake() - expected).abs() < 1e-6);
    }

    let (_, summary) = send(&app, Method::GET, "/game", None).await;
    assert_eq!(summary["player_count"], 50);
}

#[tokio::test]
async fn test_huge_stake_does_not_break_settlement() {
    let (app, _) = create_test_app(vec![1]);

    for id in ["A", "B"] {
        let (status, body) = join(&app, id, 1e16, "W").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "invalid_input");
    }
    let (status, _) = join(&app, "C", f64::MAX, "W").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    join(&app, "P1", 10.0, "W1").await;
    join(&app, "P2", 1.25e12, "W2").await;

    let (status, end) = send(&app, Method::POST, "/end", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(end["winner"], "P2");

    let (status, summary) = send(&app, Method::GET, "/game", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["player_count"], 2);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (app, _) = create_test_app(vec![1]);

    let (status, _) = send(&app, Method::GET, "/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rate_limiter_forgets_idle_clients() {
    // 60_000 per minute replenishes a cell every millisecond
    let rate_limiter = create_rate_limiter(60_000);
    for ip in ["10.0.0.1", "10.0.0.2", "10.0.0.3"] {
        assert!(rate_limiter.check_key(&ip.to_string()).is_ok());
    }
    assert_eq!(rate_limiter.len(), 3);

    let cleanup = spawn_rate_limiter_cleanup(rate_limiter.clone(), Duration::from_millis(10));
    tokio::time::sleep(Duration::from_millis(100)).await;
    cleanup.abort();

    assert_eq!(rate_limiter.len(), 0);
}
