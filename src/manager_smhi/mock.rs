//! Local stand-in for the SMHI observation API used by tests.

use std::collections::HashMap;
use actix_web::{web, App, HttpResponse, HttpServer};
use crate::manager_smhi::models::Parameter;

const EMPTY_DOCUMENT: &str = r#"{"value": []}"#;

/// Canned upstream responses. Parameters without a document get an empty series.
#[derive(Clone, Default)]
pub struct UpstreamFixture {
    documents: HashMap<u8, String>,
    failing: Option<u8>,
}

impl UpstreamFixture {
    pub fn with_document(mut self, parameter: Parameter, json: &str) -> Self {
        self.documents.insert(parameter.id(), json.to_string());
        self
    }

    pub fn failing(mut self, parameter: Parameter) -> Self {
        self.failing = Some(parameter.id());
        self
    }
}

async fn serve(path: web::Path<(u8, String)>, fixture: web::Data<UpstreamFixture>) -> HttpResponse {
    let (parameter, _station) = path.into_inner();

    if fixture.failing == Some(parameter) {
        return HttpResponse::InternalServerError().finish();
    }

    let body = fixture.documents.get(&parameter)
        .cloned()
        .unwrap_or_else(|| EMPTY_DOCUMENT.to_string());

    HttpResponse::Ok().content_type("application/json").body(body)
}

/// Starts the stand-in on a free local port and returns its base url
pub fn spawn_upstream(fixture: UpstreamFixture) -> String {
    let fixture = web::Data::new(fixture);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(fixture.clone())
            .route(
                "/api/version/1.0/parameter/{parameter}/station/{station}/period/latest-months/data.json",
                web::get().to(serve),
            )
    })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    format!("http://{}", addr)
}
