// Contract tests for POST /legal-documents/{kind}/render

use actix_web::{test, web, App};
use fleetrent::config::CompanyProfile;
use fleetrent::core::{BusinessClock, Currency};
use fleetrent::middleware::{json_error_handler, query_error_handler};
use fleetrent::modules::legal::controllers::render_document;
use fleetrent::modules::legal::LegalDocumentGenerator;
use serde_json::{json, Value};

macro_rules! render_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(
                    LegalDocumentGenerator::new(CompanyProfile::default()).unwrap(),
                ))
                .app_data(web::Data::new(Currency::QAR))
                .app_data(web::Data::new(BusinessClock::default()))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .route(
                    "/legal-documents/{kind}/render",
                    web::post().to(render_document),
                ),
        )
        .await
    };
}

fn case_body() -> Value {
    json!({
        "customer": {
            "full_name": "خالد يوسف",
            "national_id": "28563400981"
        },
        "vehicle": {
            "plate_number": "654321",
            "make": "Nissan",
            "model": "Patrol",
            "year": 2021
        },
        "contract": {
            "contract_number": "CNT-2024-031",
            "start_date": "2024-02-01",
            "end_date": "2025-01-31",
            "monthly_amount": "4000"
        },
        "claim": {
            "overdue_rent": "8000",
            "late_penalty": "1200",
            "days_overdue": 64
        },
        "violations": [
            { "violation_number": "V-1", "fine_amount": "300" }
        ]
    })
}

#[actix_web::test]
async fn test_render_returns_html_with_reference_headers() {
    let app = render_app!();

    let req = test::TestRequest::post()
        .uri("/legal-documents/explanatory_memo/render?as_of=2024-09-10")
        .set_json(case_body())
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
    assert_eq!(
        resp.headers().get("x-reference-number").unwrap(),
        "ALR/2024/CNT-2024-031/MEMO"
    );
    let hash = resp
        .headers()
        .get("x-content-sha256")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(hash.len(), 64);

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains("خالد يوسف"));
    // 8,000 + 1,200 + 30% damages (2,760)
    assert!(html.contains("11,960.00"));
}

#[actix_web::test]
async fn test_render_each_kind() {
    let app = render_app!();

    let mut body = case_body();
    body["documents"] = json!([{ "name": "صورة البطاقة الشخصية" }]);

    for kind in [
        "explanatory_memo",
        "claims_statement",
        "criminal_complaint",
        "documents_list",
        "violations_transfer",
    ] {
        let req = test::TestRequest::post()
            .uri(&format!("/legal-documents/{}/render", kind))
            .set_json(body.clone())
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200, "{} failed to render", kind);
    }
}

#[actix_web::test]
async fn test_unknown_kind_is_not_found() {
    let app = render_app!();

    let req = test::TestRequest::post()
        .uri("/legal-documents/eviction_notice/render")
        .set_json(case_body())
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_missing_required_data_is_bad_request() {
    let app = render_app!();

    let mut body = case_body();
    body["violations"] = json!([]);

    let req = test::TestRequest::post()
        .uri("/legal-documents/violations_transfer/render")
        .set_json(body)
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 400);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("violation"));
}

#[actix_web::test]
async fn test_missing_customer_is_bad_request() {
    let app = render_app!();

    let mut body = case_body();
    body.as_object_mut().unwrap().remove("customer");

    let req = test::TestRequest::post()
        .uri("/legal-documents/explanatory_memo/render")
        .set_json(body)
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_out_of_range_claim_is_bad_request() {
    let app = render_app!();

    let mut body = case_body();
    body["claim"]["overdue_rent"] = json!("79000000000000000000000000000");
    body["claim"]["late_penalty"] = json!("79000000000000000000000000000");

    let req = test::TestRequest::post()
        .uri("/legal-documents/claims_statement/render")
        .set_json(body)
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}
