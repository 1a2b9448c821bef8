mod errors;
mod logging;
mod initialization;
mod handlers;
mod aggregator;
mod manager_smhi;

use std::time::Duration;
use actix_web::middleware::{Condition, Logger};
use actix_web::{web, App, HttpServer};
use log::info;
use crate::aggregator::{StationDataAggregator, STATION_ID};
use crate::errors::UnrecoverableError;
use crate::handlers::{health, index, station_data};
use crate::initialization::config;
use crate::manager_smhi::SMHI;

pub struct AppState {
    aggregator: StationDataAggregator,
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let config = config()?;

    let smhi = SMHI::new(
        &config.smhi.base_url,
        STATION_ID,
        Duration::from_secs(config.smhi.timeout_secs),
    )?;
    let state = web::Data::new(AppState { aggregator: StationDataAggregator::new(smhi) });
    let development = config.development;

    info!("listening on {}:{}", config.web_server.bind_address, config.web_server.bind_port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Condition::new(development, Logger::default()))
            .service(index)
            .service(health)
            .service(station_data)
    })
        .bind((config.web_server.bind_address, config.web_server.bind_port))?
        .run()
        .await?;

    info!("server stopped");
    Ok(())
}
