use futures_util::future::{join, join_all};
use serde_json::{json, Value};
use test_startup::*;

#[actix_rt::test]
async fn create_comment_with_and_without_review() {
    let app = spawn_app().await;
    let movie_id = app.create_movie("Inception", 2010).await;
    let review_id = app.create_review(&movie_id, "Great").await;

    let on_movie = app
        .create("/comments/", json!({ "movie": movie_id, "content": "Nice" }))
        .await;
    assert_eq!(on_movie["review"], Value::Null);
    assert_eq!(on_movie["user_name"], "Anonymous");

    let on_review = app
        .create(
            "/comments/",
            json!({ "movie": movie_id, "review": review_id, "content": "Agreed" }),
        )
        .await;
    assert_eq!(on_review["review"], review_id.as_str());
}

#[actix_rt::test]
async fn blank_comment_is_rejected() {
    let app = spawn_app().await;
    let movie_id = app.create_movie("Inception", 2010).await;

    let res = app
        .post("/comments/", &json!({ "movie": movie_id, "content": "   " }))
        .await;
    assert_eq!(res.status().as_u16(), 400);
    let body = res.json::<Value>().await.unwrap();
    assert!(body["errors"]["content"].is_array());
}

#[actix_rt::test]
async fn comment_references_must_exist() {
    let app = spawn_app().await;
    let movie_id = app.create_movie("Inception", 2010).await;

    let res = app
        .post(
            "/comments/",
            &json!({ "movie": uuid::Uuid::new_v4(), "content": "Orphan" }),
        )
        .await;
    assert_eq!(res.status().as_u16(), 400);

    let res = app
        .post(
            "/comments/",
            &json!({ "movie": movie_id, "review": uuid::Uuid::new_v4(), "content": "Orphan" }),
        )
        .await;
    assert_eq!(res.status().as_u16(), 400);
    let body = res.json::<Value>().await.unwrap();
    assert!(body["errors"]["review"].is_array());
}

#[actix_rt::test]
async fn comment_review_must_belong_to_the_same_movie() {
    let app = spawn_app().await;
    let inception = app.create_movie("Inception", 2010).await;
    let memento = app.create_movie("Memento", 2000).await;
    let memento_review = app.create_review(&memento, "Backwards").await;

    let res = app
        .post(
            "/comments/",
            &json!({ "movie": inception, "review": memento_review, "content": "Mixed up" }),
        )
        .await;
    assert_eq!(res.status().as_u16(), 400);
    let body = res.json::<Value>().await.unwrap();
    assert_eq!(
        body["errors"]["review"][0],
        "Review does not belong to the selected movie."
    );
}

#[actix_rt::test]
async fn comment_filters() {
    let app = spawn_app().await;
    let inception = app.create_movie("Inception", 2010).await;
    let memento = app.create_movie("Memento", 2000).await;
    let review_id = app.create_review(&inception, "Top").await;

    app.create(
        "/comments/",
        json!({ "movie": inception, "review": review_id, "content": "first" }),
    )
    .await;
    app.create("/comments/", json!({ "movie": inception, "content": "second" }))
        .await;
    app.create(
        "/comments/",
        json!({ "movie": inception, "review": review_id, "content": "third" }),
    )
    .await;
    app.create("/comments/", json!({ "movie": memento, "content": "elsewhere" }))
        .await;

    let contents = |comments: Value| {
        comments
            .as_array()
            .unwrap()
            .iter()
            .map(|comment| comment["content"].as_str().unwrap().to_string())
            .collect::<Vec<_>>()
    };

    let by_review = app
        .get_json(&format!("/comments/?review_id={}", review_id))
        .await;
    assert_eq!(contents(by_review), vec!["third", "first"]);

    let by_movie = app
        .get_json(&format!("/comments/?movie_id={}", inception))
        .await;
    assert_eq!(contents(by_movie), vec!["third", "second", "first"]);

    let both = app
        .get_json(&format!(
            "/comments/?movie_id={}&review_id={}",
            memento, review_id
        ))
        .await;
    assert_eq!(contents(both), vec!["elsewhere"]);

    let empty_movie = app
        .get_json(&format!("/comments/?movie_id=&review_id={}", review_id))
        .await;
    assert_eq!(contents(empty_movie), vec!["third", "first"]);

    let all = app.get_json("/comments/").await;
    assert_eq!(all.as_array().unwrap().len(), 4);
}

#[actix_rt::test]
async fn comments_stay_on_their_reviews_movie_while_it_moves() {
    let app = spawn_app().await;
    let inception = app.create_movie("Inception", 2010).await;
    let memento = app.create_movie("Memento", 2000).await;

    for round in 0..5 {
        let review_id = app
            .create_review(&inception, &format!("Round {}", round))
            .await;
        let comment = json!({ "movie": inception, "review": review_id, "content": "Racing" });
        let creates = join_all((0..10).map(|_| app.post("/comments/", &comment)));
        let review_path = format!("/reviews/{}/", review_id);
        let review_patch = json!({ "movie": memento });
        let moving = app.patch(&review_path, &review_patch);

        let (responses, moved) = join(creates, moving).await;
        assert_eq!(moved.status().as_u16(), 200);
        for res in responses {
            let status = res.status().as_u16();
            assert!(status == 201 || status == 400, "unexpected status {}", status);
        }
    }

    let mismatched = sqlx::query_scalar::<_, i64>(
        r#"
            SELECT COUNT(*) FROM comments c
            JOIN reviews r ON r.id = c.review_id
            WHERE c.movie_id <> r.movie_id
        "#,
    )
    .fetch_one(&app.db_pool)
    .await
    .expect("Failed to count comments");
    assert_eq!(mismatched, 0);
}

#[actix_rt::test]
async fn update_and_delete_comment() {
    let app = spawn_app().await;
    let movie_id = app.create_movie("Inception", 2010).await;
    let review_id = app.create_review(&movie_id, "Top").await;
    let comment = app
        .create(
            "/comments/",
            json!({ "movie": movie_id, "review": review_id, "content": "Draft" }),
        )
        .await;
    let path = format!("/comments/{}/", comment["id"].as_str().unwrap());

    let res = app.patch(&path, &json!({ "content": "Edited" })).await;
    assert_eq!(res.status().as_u16(), 200);
    let edited = res.json::<Value>().await.unwrap();
    assert_eq!(edited["content"], "Edited");
    assert_eq!(edited["review"], review_id.as_str());
    assert_eq!(edited["created_at"], comment["created_at"]);

    let res = app.patch(&path, &json!({ "review": null })).await;
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.json::<Value>().await.unwrap()["review"], Value::Null);

    let res = app
        .put(
            &path,
            &json!({ "movie": movie_id, "user_name": "critic", "content": "Final" }),
        )
        .await;
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.json::<Value>().await.unwrap()["user_name"], "critic");

    assert_eq!(app.delete(&path).await.status().as_u16(), 204);
    assert_eq!(app.get(&path).await.status().as_u16(), 404);
}
