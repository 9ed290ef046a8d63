//! Entry point: loads settings, prepares the database and serves the API.

use actix_web::{App, HttpServer, middleware, web};

use hoots::db::{establish_connection_pool, run_migrations};
use hoots::models::config::ServerConfig;
use hoots::repository::DieselRepository;
use hoots::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let pool = establish_connection_pool(&config.database_url).map_err(|e| {
        log::error!("Failed to open database {}: {e}", config.database_url);
        std::io::Error::other(e)
    })?;

    {
        let mut conn = pool.get().map_err(std::io::Error::other)?;
        run_migrations(&mut conn).map_err(|e| {
            log::error!("Failed to run migrations: {e}");
            std::io::Error::other(e)
        })?;
    }

    let repo = web::Data::new(DieselRepository::new(pool));
    let jwt = web::Data::new(config.jwt.clone());

    log::info!("Listening on {}:{}", config.address, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(repo.clone())
            .app_data(jwt.clone())
            .configure(routes::configure)
    })
    .bind((config.address.as_str(), config.port))?
    .run()
    .await
}
