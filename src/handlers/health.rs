use actix_web::{get, web, HttpResponse};
use serde::Serialize;

use crate::config::AppSettings;

/// Liveness report; also names the model the drafts come from.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport<'a> {
    status: &'static str,
    service: &'a str,
    environment: &'a str,
    version: &'static str,
    completion_model: &'a str,
}

#[get("/health")]
pub async fn health_check(settings: web::Data<AppSettings>) -> HttpResponse {
    HttpResponse::Ok().json(HealthReport {
        status: "ok",
        service: &settings.app.name,
        environment: &settings.app.environment,
        version: env!("CARGO_PKG_VERSION"),
        completion_model: &settings.llm.model,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_health_reports_service_and_model() {
        let settings = AppSettings::from_lookup(|key| match key {
            "OPENAI_API_KEY" => Some("sk-test".to_string()),
            "ENVIRONMENT" => Some("staging".to_string()),
            _ => None,
        })
        .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(settings))
                .service(health_check),
        )
        .await;

        let body: Value =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request())
                .await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "inspiration-server");
        assert_eq!(body["environment"], "staging");
        assert_eq!(body["completionModel"], "gpt-3.5-turbo");
        assert!(body.get("apiKey").is_none());
    }
}
