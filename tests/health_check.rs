use serde::Deserialize;
use serde_json::json;
use test_startup::*;

#[derive(Deserialize)]
struct Summary {
    total_movies: i64,
    recent_movies: Vec<RecentMovie>,
}

#[derive(Deserialize)]
struct RecentMovie {
    title: String,
    release_year: i32,
}

#[actix_rt::test]
async fn check_server_health() {
    let app = spawn_app().await;

    let res = app
        .client
        .get(app.address.as_str())
        .send()
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());
    let body = res
        .json::<Summary>()
        .await
        .expect("Failed to parse the response body");
    assert_eq!(body.total_movies, 0);
    assert!(body.recent_movies.is_empty());
}

#[actix_rt::test]
async fn landing_lists_five_most_recent_movies() {
    let app = spawn_app().await;
    for (index, year) in (2001..=2007).enumerate() {
        app.create(
            "/movies/",
            json!({
                "title": format!("Movie {}", index),
                "director": "Someone",
                "release_year": year,
                "rating": 3
            }),
        )
        .await;
    }

    let body = app
        .client
        .get(app.address.as_str())
        .send()
        .await
        .expect("Failed to execute request")
        .json::<Summary>()
        .await
        .expect("Failed to parse the response body");

    assert_eq!(body.total_movies, 7);
    let years = body
        .recent_movies
        .iter()
        .map(|movie| movie.release_year)
        .collect::<Vec<_>>();
    assert_eq!(years, vec![2007, 2006, 2005, 2004, 2003]);
    assert_eq!(body.recent_movies[0].title, "Movie 6");
}
