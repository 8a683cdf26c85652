use actix_web::web;

use crate::extractors::{path_config, query_config};

pub mod cars;
pub mod drivers;
pub mod health;

/// Register every route plus the extractor error handlers.
/// Shared by `main.rs` and the route tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(path_config()).app_data(query_config());

    health::configure_routes(cfg);
    cfg.service(web::scope("/cars").configure(cars::configure_routes));
    cfg.service(web::scope("/drivers").configure(drivers::configure_routes));
}
