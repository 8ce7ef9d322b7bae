use actix_web::web::Data;
use actix_web::{middleware, App, HttpServer};
use common::estimator::RateModel;
use log::{error, info};
use skill_forecast_backend::{configure, cors_headers, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = ServerConfig::from_env();

    // the rate model is loaded once and shared read-only by every worker
    let rate_model = match RateModel::load(&server_config.model_path) {
        Ok(rate_model) => rate_model,
        Err(e) => {
            error!(
                "cannot load rate model from {}: {}",
                server_config.model_path.to_string_lossy(),
                e
            );
            return Err(std::io::Error::other(e));
        }
    };

    info!(
        "rate model loaded from {}",
        server_config.model_path.to_string_lossy()
    );

    let rate_model = Data::new(rate_model);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(cors_headers())
            .wrap(middleware::Logger::default())
            .app_data(rate_model.clone())
            .configure(configure)
    });

    if let Some(workers) = server_config.workers {
        server = server.workers(workers);
    }

    info!("listening on {}", server_config.bind_address);

    server.bind(&server_config.bind_address)?.run().await
}
