use crate::configuration::Settings;
use crate::routes::{comment_source, handler, movie_source, rating_source, review_source};
use crate::util::{json_config, path_config, query_config};

use actix_web::{
    dev::Server,
    middleware::NormalizePath,
    web::{self, Data},
    App, HttpServer,
};
use sqlx::PgPool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

use actix_cors::Cors;
use actix_web::http::header;

pub const API_PREFIX: &str = "/api/v1";

fn configure_cors(allowed_origin: &str) -> Cors {
    let mut cors = Cors::default();
    cors = if allowed_origin == "*" {
        cors.allow_any_origin()
    } else {
        cors.allowed_origin(allowed_origin)
    };
    cors.allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}

pub fn run_server(
    listener: TcpListener,
    db_pool: PgPool,
    settings: &Settings,
) -> Result<Server, std::io::Error> {
    let db_pool = Data::new(db_pool);
    let allowed_origin = settings.allowed_origin.clone();

    let server: Server = HttpServer::new(move || {
        let cors = configure_cors(allowed_origin.as_str());
        App::new()
            .wrap(NormalizePath::trim())
            .wrap(cors)
            .wrap(TracingLogger::default())
            .app_data(json_config())
            .app_data(path_config())
            .app_data(query_config())
            .app_data(db_pool.clone())
            .service(
                web::scope(API_PREFIX)
                    .service(movie_source())
                    .service(review_source())
                    .service(rating_source())
                    .service(comment_source()),
            )
            .route("/", web::get().to(handler))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
