mod cors;
mod health;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use common::{env_config::Config, http};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env().expect("Failed to load configuration");

    // init logger
    if config.console_logging_enabled || config.log_file.is_some() {
        logger::setup(
            config.console_logging_enabled,
            config.log_file.as_deref(),
            !config.is_production(),
        )
        .expect("Failed to set up logger");
    }

    // collaborators: identity provider and usage procedures
    let identity = api_auth::identity_provider(&config);
    let store = db::connect_usage_store(&config)
        .await
        .expect("Failed to set up usage store");
    let store_data = web::Data::from(store);

    let origin = config.cors_allowed_origin.clone();
    let console_logging_enabled = config.console_logging_enabled;

    log::info!(
        "Starting server on {}:{} with {} workers",
        config.server_host,
        config.server_port,
        config.num_workers
    );

    HttpServer::new(move || {
        App::new()
            .app_data(store_data.clone())
            .app_data(http::query_config())
            .wrap(logger::middleware(console_logging_enabled)) // 2nd
            .wrap(cors::middleware(&origin)) // 1st
            .service(ui::mount_ui())
            .service(
                web::scope("/api")
                    .service(health::get_health)
                    .service(
                        api_usage::mount_usage()
                            .wrap(api_auth::auth_middleware(identity.clone())),
                    ),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
