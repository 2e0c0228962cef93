use dotenv::dotenv;
use movie_reviews_backend::configuration::get_configuration;
use movie_reviews_backend::startup;
use movie_reviews_backend::telemetry::{get_subscriber, init_subscriber};
use sqlx::PgPool;
use std::net::TcpListener;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let subscriber = get_subscriber("movie_reviews", "info", std::io::stdout);
    init_subscriber(subscriber)?;

    let configuration = get_configuration("configuration").map_err(|err| {
        std::io::Error::new(
            std::io::ErrorKind::Other,
            format!(
                "Failed to read `configuration.json`. Please make sure it exists and is valid JSON: {}",
                err
            ),
        )
    })?;

    let connection_pool = PgPool::connect(configuration.database.connection_string().as_str())
        .await
        .map_err(std::io::Error::other)?;
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .map_err(std::io::Error::other)?;

    let listener = TcpListener::bind(configuration.address())?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    startup::run_server(listener, connection_pool, &configuration)?.await
}
