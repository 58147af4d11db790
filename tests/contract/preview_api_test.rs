// Contract tests for the schedule and late fine preview endpoints
//
// Both endpoints are pure computations and run without a database.

use actix_web::{test, web, App};
use fleetrent::core::{BusinessClock, Currency};
use fleetrent::middleware::json_error_handler;
use fleetrent::modules::fines::controllers::preview_fine;
use fleetrent::modules::schedules::controllers::preview_schedule;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => s.parse().unwrap(),
        other => other.to_string().parse().unwrap(),
    }
}

macro_rules! preview_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(Currency::QAR))
                .app_data(web::Data::new(BusinessClock::default()))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .route("/payment-schedules/preview", web::post().to(preview_schedule))
                .route("/late-fines/preview", web::post().to(preview_fine)),
        )
        .await
    };
}

#[actix_web::test]
async fn test_schedule_preview_response_shape() {
    let app = preview_app!();

    let req = test::TestRequest::post()
        .uri("/payment-schedules/preview")
        .set_json(json!({
            "start_date": "2024-01-15",
            "monthly_amount": "100",
            "contract_amount": "1000",
            "total_paid": "250",
            "as_of": "2024-04-01"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["as_of"], "2024-04-01");
    assert!(body.get("contract_id").is_none());

    let installments = body["installments"].as_array().unwrap();
    assert_eq!(installments.len(), 10);
    assert_eq!(installments[0]["installment_number"], 1);
    assert_eq!(installments[0]["due_date"], "2024-02-01");
    assert_eq!(installments[0]["status"], "paid");
    assert_eq!(installments[1]["status"], "paid");
    assert_eq!(installments[2]["status"], "pending");
    assert_eq!(installments[3]["status"], "upcoming");

    let summary = &body["summary"];
    assert_eq!(summary["installment_count"], 10);
    assert_eq!(summary["paid_count"], 2);
    assert_eq!(summary["overdue_count"], 0);
    assert_eq!(decimal(&summary["remaining_balance"]), dec!(750));
    assert_eq!(summary["next_due"]["installment_number"], 3);
}

#[actix_web::test]
async fn test_schedule_preview_rejects_negative_payment() {
    let app = preview_app!();

    let req = test::TestRequest::post()
        .uri("/payment-schedules/preview")
        .set_json(json!({
            "start_date": "2024-01-15",
            "monthly_amount": "100",
            "contract_amount": "1000",
            "total_paid": "-5"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 400);
}

#[actix_web::test]
async fn test_schedule_preview_rejects_malformed_body() {
    let app = preview_app!();

    let req = test::TestRequest::post()
        .uri("/payment-schedules/preview")
        .set_json(json!({ "monthly_amount": "100" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_fine_preview_after_grace() {
    let app = preview_app!();

    let req = test::TestRequest::post()
        .uri("/late-fines/preview")
        .set_json(json!({
            "contract_amount": "1000",
            "end_date": "2024-03-01",
            "as_of": "2024-03-18",
            "settings": {
                "fine_type": "percentage",
                "rate": "1",
                "grace_period_days": 7
            }
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["days_overdue"], 17);
    assert_eq!(body["effective_days"], 10);
    assert_eq!(body["fine_type"], "percentage");
    assert_eq!(body["capped"], false);
    assert_eq!(decimal(&body["fine_amount"]), dec!(100));
    assert_eq!(decimal(&body["total_due"]), dec!(1100));
}

#[actix_web::test]
async fn test_fine_preview_reports_cap() {
    let app = preview_app!();

    let req = test::TestRequest::post()
        .uri("/late-fines/preview")
        .set_json(json!({
            "contract_amount": "1000",
            "end_date": "2024-03-01",
            "as_of": "2024-04-01",
            "settings": {
                "fine_type": "fixed_daily",
                "rate": "25",
                "max_fine_amount": "200"
            }
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(decimal(&body["fine_amount"]), dec!(200));
    assert_eq!(body["capped"], true);
}

#[actix_web::test]
async fn test_fine_preview_rejects_invalid_settings() {
    let app = preview_app!();

    let req = test::TestRequest::post()
        .uri("/late-fines/preview")
        .set_json(json!({
            "contract_amount": "1000",
            "end_date": "2024-03-01",
            "settings": {
                "fine_type": "percentage",
                "rate": "150"
            }
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_fine_preview_out_of_range_is_bad_request() {
    let app = preview_app!();

    let req = test::TestRequest::post()
        .uri("/late-fines/preview")
        .set_json(json!({
            "contract_amount": "79000000000000000000000000",
            "end_date": "2000-01-01",
            "as_of": "2024-01-01",
            "settings": {
                "fine_type": "percentage",
                "rate": "100"
            }
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("out of range"));
}

#[actix_web::test]
async fn test_schedule_preview_out_of_range_is_bad_request() {
    let app = preview_app!();

    let req = test::TestRequest::post()
        .uri("/payment-schedules/preview")
        .set_json(json!({
            "start_date": "2024-01-15",
            "monthly_amount": "0.0000000000000000000000001",
            "contract_amount": "79000000000000000000000000",
            "total_paid": "0"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}
