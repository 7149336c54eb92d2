use actix_web::{get, middleware, post, web, App, HttpResponse, HttpServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod message_database;
mod service;
mod store;

use config::Config;
use error::Error;
use message_database::NewMessage;
use service::Service;
use store::Store;

struct AppState {
    service: Service,
}

#[get("/")]
async fn get_messages(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    info!("listing stored messages");
    let messages = web::block(move || data.service.list_messages()).await??;
    Ok(HttpResponse::Ok().json(messages))
}

#[post("/")]
async fn post_message(body: web::Bytes, data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    info!("appending new message");
    let new_message = NewMessage::from_json(&body)?;
    let messages = web::block(move || data.service.append_message(new_message)).await??;
    Ok(HttpResponse::Ok().json(messages))
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_messages).service(post_message);
}

/// Compact logs on stdout; `RUST_LOG` overrides the default filter.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,actix_web=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stdout)
        .try_init();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = Config::from_env();
    let app_data = web::Data::new(AppState {
        service: Service::new(Store::new(&config.store_path)),
    });

    info!(
        host = %config.host,
        port = config.port,
        store = %config.store_path.display(),
        "message board listening"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(app_data.clone())
            .configure(routes)
    })
    .bind(config.bind_addr())?
    .run()
    .await
}
