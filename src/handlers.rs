use actix_web::{get, web, HttpResponse, Responder};
use chrono::Local;
use log::{error, info};
use serde::Serialize;
use crate::AppState;

pub const BANNER: &str = "SMHI Weather API - Heatwave Detection Service";
const SERVICE_NAME: &str = "SMHI Weather API";

#[derive(Serialize)]
struct Health {
    status: &'static str,
    service: &'static str,
    timestamp: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(BANNER)
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(Health {
        status: "healthy",
        service: SERVICE_NAME,
        timestamp: Local::now().to_rfc3339(),
    })
}

#[get("/data")]
async fn station_data(data: web::Data<AppState>) -> impl Responder {
    match data.aggregator.station_report().await {
        Ok(report) => {
            info!("serving {} records", report.data.len());
            HttpResponse::Ok().json(report)
        },
        Err(e) => {
            error!("failed to build station report: {}", e);
            HttpResponse::InternalServerError().json(ErrorBody { error: e.to_string() })
        }
    }
}
