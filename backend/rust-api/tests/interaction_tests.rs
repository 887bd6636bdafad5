mod common;

use axum::http::StatusCode;
use serde_json::json;

async fn answer(
    app: &axum::Router,
    player_id: &str,
    question_id: &str,
    selected: &str,
) -> (StatusCode, serde_json::Value) {
    common::send_json(
        app,
        "POST",
        "/api/interactions",
        json!({
            "player_id": player_id,
            "question_id": question_id,
            "selected_answer": selected
        }),
    )
    .await
}

#[tokio::test]
async fn test_correct_answer() {
    let app = common::create_test_app().await;
    let player_id = common::create_player(&app, "Ada", "female").await;

    let (status, json) = answer(&app, &player_id, "q1", "b").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["is_correct"], true);
    assert_eq!(json["money_change"], 10);
    assert_eq!(json["experience_gain"], 10);
    assert_eq!(json["correct_answer"], "b");
    assert_eq!(json["interaction"]["player_id"], player_id.as_str());
    assert_eq!(json["interaction"]["question_id"], "q1");
    assert_eq!(json["interaction"]["selected_answer"], "b");
    assert_eq!(json["interaction"]["money_change"], 10);

    let (_, player) = common::get(&app, &format!("/api/players/{}", player_id)).await;
    assert_eq!(player["money"], 110);
    assert_eq!(player["experience"], 10);
}

#[tokio::test]
async fn test_wrong_answer_penalty() {
    let app = common::create_test_app().await;
    let player_id = common::create_player(&app, "Ben", "male").await;

    let (status, json) = answer(&app, &player_id, "q4", "c").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["is_correct"], false);
    assert_eq!(json["money_change"], -7);
    assert_eq!(json["experience_gain"], 5);
    assert_eq!(json["correct_answer"], "b");

    let (_, player) = common::get(&app, &format!("/api/players/{}", player_id)).await;
    assert_eq!(player["money"], 93);
    assert_eq!(player["experience"], 5);
}

#[tokio::test]
async fn test_money_can_go_negative() {
    let app = common::create_test_app().await;
    let player_id = common::create_player(&app, "Cat", "female").await;

    common::send_json(
        &app,
        "PUT",
        &format!("/api/players/{}", player_id),
        json!({ "money": 2 }),
    )
    .await;

    let (status, _) = answer(&app, &player_id, "q2", "a").await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, player) = common::get(&app, &format!("/api/players/{}", player_id)).await;
    assert_eq!(player["money"], -3);
}

#[tokio::test]
async fn test_invalid_answer_option() {
    let app = common::create_test_app().await;
    let player_id = common::create_player(&app, "Dan", "male").await;

    let (status, json) = answer(&app, &player_id, "q1", "e").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("selected_answer"));
}

#[tokio::test]
async fn test_missing_fields() {
    let app = common::create_test_app().await;

    let (status, _) = common::send_json(
        &app,
        "POST",
        "/api/interactions",
        json!({ "question_id": "q1", "selected_answer": "a" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_question_and_player() {
    let app = common::create_test_app().await;
    let player_id = common::create_player(&app, "Fay", "female").await;

    let (status, json) = answer(&app, &player_id, "q404", "a").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Question not found");

    let (status, json) = answer(&app, "ghost", "q1", "b").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Player not found");

    // neither attempt left a trace
    let (_, history) =
        common::get(&app, &format!("/api/interactions/player/{}", player_id)).await;
    assert_eq!(history, json!([]));
    let (_, player) = common::get(&app, &format!("/api/players/{}", player_id)).await;
    assert_eq!(player["money"], 100);
}

#[tokio::test]
async fn test_history_newest_first() {
    let app = common::create_test_app().await;
    let player_id = common::create_player(&app, "Gus", "male").await;

    for question_id in ["q1", "q2", "q3"] {
        let (status, _) = answer(&app, &player_id, question_id, "c").await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, json) =
        common::get(&app, &format!("/api/interactions/player/{}", player_id)).await;

    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().unwrap();
    let question_ids: Vec<&str> = rows
        .iter()
        .map(|row| row["question_id"].as_str().unwrap())
        .collect();
    assert_eq!(question_ids, vec!["q3", "q2", "q1"]);

    assert_eq!(rows[0]["question_text"], "Complete: I ___ to the store yesterday.");
    assert_eq!(rows[0]["correct_answer"], "c");
    assert_eq!(rows[0]["difficulty"], "easy");
    assert_eq!(rows[0]["category"], "grammar");
    assert_eq!(rows[0]["is_correct"], true);
    assert_eq!(rows[2]["is_correct"], false);
}

#[tokio::test]
async fn test_history_is_capped_at_fifty() {
    let app = common::create_test_app().await;
    let player_id = common::create_player(&app, "Hal", "male").await;

    for _ in 0..52 {
        answer(&app, &player_id, "q5", "c").await;
    }

    let (status, json) =
        common::get(&app, &format!("/api/interactions/player/{}", player_id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 50);
}

#[tokio::test]
async fn test_history_for_unknown_player() {
    let app = common::create_test_app().await;

    let (status, json) = common::get(&app, "/api/interactions/player/nobody").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn test_stats_after_interactions() {
    let app = common::create_test_app().await;
    let player_id = common::create_player(&app, "Ivo", "male").await;

    answer(&app, &player_id, "q1", "b").await; // +10
    answer(&app, &player_id, "q4", "b").await; // +15
    answer(&app, &player_id, "q2", "a").await; // -5

    let (status, stats) =
        common::get(&app, &format!("/api/players/{}/stats", player_id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_interactions"], 3);
    assert_eq!(stats["correct_answers"], 2);
    assert_eq!(stats["total_money_earned"], 25);
    assert_eq!(stats["accuracy_percentage"], 66.67);
}

#[tokio::test]
async fn test_stats_without_interactions() {
    let app = common::create_test_app().await;
    let player_id = common::create_player(&app, "Jo", "female").await;

    let (status, stats) =
        common::get(&app, &format!("/api/players/{}/stats", player_id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_interactions"], 0);
    assert_eq!(stats["correct_answers"], 0);
    assert_eq!(stats["total_money_earned"], 0);
    assert_eq!(stats["accuracy_percentage"], 0.0);
}

#[tokio::test]
async fn test_play_through_scenario() {
    let app = common::create_test_app().await;
    let player_id = common::create_player(&app, "Pat", "female").await;

    let (status, question) =
        common::get(&app, "/api/questions/random?difficulty=easy&category=grammar").await;
    assert_eq!(status, StatusCode::OK);
    let question_id = question["id"].as_str().unwrap();
    let correct = question["correct_answer"].as_str().unwrap();
    let reward = question["reward"].as_i64().unwrap();

    let (status, result) = answer(&app, &player_id, question_id, correct).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(result["is_correct"], true);

    let (_, player) = common::get(&app, &format!("/api/players/{}", player_id)).await;
    assert_eq!(player["money"].as_i64().unwrap(), 100 + reward);
    assert_eq!(player["experience"], 10);

    let (_, stats) = common::get(&app, &format!("/api/players/{}/stats", player_id)).await;
    assert_eq!(stats["total_interactions"], 1);
    assert_eq!(stats["accuracy_percentage"], 100.0);
}
