mod common;

use axum::http::StatusCode;

fn ids(json: &serde_json::Value) -> Vec<String> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_list_all_questions_ordered() {
    let app = common::create_test_app().await;

    let (status, json) = common::get(&app, "/api/questions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&json), vec!["q1", "q3", "q2", "q5", "q4"]);

    let pairs: Vec<(String, String)> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|q| {
            (
                q["difficulty"].as_str().unwrap().to_string(),
                q["category"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    let mut sorted = pairs.clone();
    sorted.sort();
    assert_eq!(pairs, sorted);
}

#[tokio::test]
async fn test_list_by_category() {
    let app = common::create_test_app().await;

    let (status, json) = common::get(&app, "/api/questions?category=vocabulary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&json), vec!["q2", "q5"]);
}

#[tokio::test]
async fn test_list_with_no_match_is_empty() {
    let app = common::create_test_app().await;

    let (status, json) =
        common::get(&app, "/api/questions?difficulty=hard&category=grammar").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn test_random_question_by_filters() {
    let app = common::create_test_app().await;

    let (status, json) =
        common::get(&app, "/api/questions/random?difficulty=easy&category=grammar").await;

    assert_eq!(status, StatusCode::OK);
    let id = json["id"].as_str().unwrap();
    assert!(id == "q1" || id == "q3", "unexpected question {}", id);
    assert_eq!(json["difficulty"], "easy");
    assert_eq!(json["category"], "grammar");
    assert!(json["option_a"].is_string());
    assert!(json["correct_answer"].is_string());
}

#[tokio::test]
async fn test_random_question_medium() {
    let app = common::create_test_app().await;

    let (status, json) =
        common::get(&app, "/api/questions/random?difficulty=medium&category=grammar").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], "q4");
    assert_eq!(json["reward"], 15);
}

#[tokio::test]
async fn test_random_question_without_match() {
    let app = common::create_test_app().await;

    // defaults are easy/general, which the seed does not contain
    let (status, json) = common::get(&app, "/api/questions/random").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No questions found for specified criteria");

    let (status, _) =
        common::get(&app, "/api/questions/random?difficulty=medium&category=vocabulary").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_question_by_id() {
    let app = common::create_test_app().await;

    let (status, json) = common::get(&app, "/api/questions/q2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["option_c"], "joyful");

    let (status, _) = common::get(&app, "/api/questions/q42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_query_gets_json_error() {
    let app = common::create_test_app().await;

    let (status, json) =
        common::get(&app, "/api/questions?difficulty=easy&difficulty=medium").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
    assert!(json["error"].as_str().unwrap().contains("difficulty"));

    let (status, json) =
        common::get(&app, "/api/questions/random?category=a&category=b").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
}
