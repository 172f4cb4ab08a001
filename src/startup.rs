use actix_files as fs;
use actix_web::dev::Server;
use actix_web::{guard, middleware::Logger, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;

use crate::configuration::Settings;
use crate::error::{AppError, ValidationError};
use crate::logger::LoggerMiddleware;
use crate::metrics::{HitCounter, HitCounterMiddleware};
use crate::middleware::JwtMiddleware;
use crate::routes::{
    create_chirp, create_user, delete_chirp, get_chirp, health_check, list_chirps, login, metrics,
    polka_webhook, refresh, reset, revoke, update_user,
};
use crate::store::Store;

/// Decode failures become 400s in the standard error envelope
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::Validation(ValidationError::MalformedBody(err.to_string())).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AppError::Validation(ValidationError::MalformedBody(err.to_string())).into()
    })
}

pub fn run(
    listener: TcpListener,
    store: Arc<dyn Store>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let store: web::Data<dyn Store> = web::Data::from(store);
    let hits = Arc::new(HitCounter::new());
    let hits_data = web::Data::from(hits.clone());
    let jwt_config = web::Data::new(settings.jwt.clone());
    let app_config = web::Data::new(settings.application.clone());
    let webhook_config = web::Data::new(settings.webhook.clone());
    let secret = settings.jwt.secret.clone();
    let filepath_root = settings.application.filepath_root.clone();

    let server = HttpServer::new(move || {
        App::new()
            // Global middleware
            .wrap(Logger::default())
            .wrap(LoggerMiddleware)

            // Shared state
            .app_data(json_config())
            .app_data(query_config())
            .app_data(store.clone())
            .app_data(hits_data.clone())
            .app_data(jwt_config.clone())
            .app_data(app_config.clone())
            .app_data(webhook_config.clone())

            .route("/healthz", web::get().to(health_check))
            .service(
                web::scope("/admin")
                    .route("/metrics", web::get().to(metrics))
                    .route("/reset", web::post().to(reset)),
            )
            .service(
                web::scope("/api")
                    .route("/healthz", web::get().to(health_check))

                    // Guarded resources carrying JwtMiddleware are registered
                    // before the public routes sharing their path.
                    .service(
                        web::resource("/users")
                            .guard(guard::Put())
                            .wrap(JwtMiddleware::new(&secret))
                            .route(web::put().to(update_user)),
                    )
                    .route("/users", web::post().to(create_user))
                    .route("/login", web::post().to(login))
                    .route("/refresh", web::post().to(refresh))
                    .route("/revoke", web::post().to(revoke))
                    .service(
                        web::resource("/chirps")
                            .guard(guard::Post())
                            .wrap(JwtMiddleware::new(&secret))
                            .route(web::post().to(create_chirp)),
                    )
                    .route("/chirps", web::get().to(list_chirps))
                    .service(
                        web::resource("/chirps/{chirp_id}")
                            .guard(guard::Delete())
                            .wrap(JwtMiddleware::new(&secret))
                            .route(web::delete().to(delete_chirp)),
                    )
                    .route("/chirps/{chirp_id}", web::get().to(get_chirp))
                    .route("/polka/webhooks", web::post().to(polka_webhook)),
            )

            // Front-end bundle; every hit is counted
            .service(
                web::scope("/app")
                    .wrap(HitCounterMiddleware::new(hits.clone()))
                    .service(fs::Files::new("/", &filepath_root).index_file("index.html")),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
