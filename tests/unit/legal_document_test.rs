// Legal document rendering tests

use chrono::NaiveDate;
use fleetrent::config::CompanyProfile;
use fleetrent::core::Currency;
use fleetrent::modules::legal::models::{
    AttachedDocument, ClaimFigures, ContractDetails, CustomerParty, InvoiceClaim, LegalCaseData,
    TrafficViolation, VehicleDetails,
};
use fleetrent::modules::legal::services::{content_sha256, format_duration_ar, ClaimTotals};
use fleetrent::modules::legal::{DocumentKind, LegalDocumentGenerator};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Autoescaped form of `text` as it appears in rendered HTML
fn escaped(text: &str) -> String {
    text.replace('/', "&#x2F;")
}

fn generator() -> LegalDocumentGenerator {
    LegalDocumentGenerator::new(CompanyProfile::default()).unwrap()
}

fn full_case() -> LegalCaseData {
    LegalCaseData {
        customer: CustomerParty {
            full_name: "محمد أحمد".to_string(),
            national_id: Some("28763400123".to_string()),
            nationality: Some("قطري".to_string()),
            phone: Some("+97455512345".to_string()),
            ..Default::default()
        },
        vehicle: VehicleDetails {
            plate_number: Some("123456".to_string()),
            make: Some("Toyota".to_string()),
            model: Some("Camry".to_string()),
            year: Some(2022),
            chassis_number: Some("JT2BF22K1W0123456".to_string()),
        },
        contract: ContractDetails {
            contract_number: "CNT-2024-017".to_string(),
            start_date: date(2024, 1, 1),
            end_date: Some(date(2024, 12, 31)),
            monthly_amount: dec!(1500),
            contract_amount: Some(dec!(18000)),
        },
        claim: ClaimFigures {
            overdue_rent: dec!(3000),
            late_penalty: dec!(500),
            damages: None,
            days_overdue: 75,
        },
        invoices: vec![
            InvoiceClaim {
                invoice_number: "INV-001".to_string(),
                due_date: date(2024, 5, 1),
                total_amount: dec!(1500),
                paid_amount: dec!(500),
                days_late: 60,
                penalty: dec!(150),
            },
            InvoiceClaim {
                invoice_number: "INV-002".to_string(),
                due_date: date(2024, 6, 1),
                total_amount: dec!(1500),
                paid_amount: dec!(0),
                days_late: 30,
                penalty: dec!(75),
            },
        ],
        violations: vec![TrafficViolation {
            violation_number: "V-88172".to_string(),
            violation_date: Some(date(2024, 4, 12)),
            violation_type: Some("تجاوز السرعة".to_string()),
            location: Some("الدوحة".to_string()),
            fine_amount: dec!(500),
        }],
        documents: vec![
            AttachedDocument {
                name: "نسخة من عقد الإيجار".to_string(),
                attached: true,
            },
            AttachedDocument {
                name: "كشف حساب".to_string(),
                attached: false,
            },
        ],
        notes: None,
        currency: None,
    }
}

#[test]
fn test_every_kind_renders_for_full_case() {
    let generator = generator();
    let data = full_case();

    for kind in DocumentKind::ALL {
        let document = generator
            .render(kind, &data, Currency::QAR, date(2024, 8, 15))
            .unwrap();

        assert_eq!(document.kind, kind);
        assert_eq!(document.title, kind.title_ar());
        assert!(document.html.contains("dir=\"rtl\""), "{} is not RTL", kind);
        assert!(document.html.contains("محمد أحمد"), "{} lacks the customer", kind);
        assert!(document.html.contains(&generator.company().name_ar));
        assert!(document.html.contains(&escaped("15/08/2024")));
        assert_eq!(document.content_sha256, content_sha256(&document.html));
    }
}

#[test]
fn test_reference_number_format() {
    let document = generator()
        .render(
            DocumentKind::ExplanatoryMemo,
            &full_case(),
            Currency::QAR,
            date(2024, 8, 15),
        )
        .unwrap();

    assert_eq!(document.reference_number, "ALR/2024/CNT-2024-017/MEMO");
    assert!(document.html.contains(&escaped("ALR/2024/CNT-2024-017/MEMO")));
}

#[test]
fn test_memo_shows_claim_totals() {
    let html = generator()
        .render(
            DocumentKind::ExplanatoryMemo,
            &full_case(),
            Currency::QAR,
            date(2024, 8, 15),
        )
        .unwrap()
        .html;

    // 3,000 + 500 + 30% damages (1,050)
    assert!(html.contains("1,050.00"));
    assert!(html.contains("4,550.00"));
    assert!(html.contains("شهرين"));
}

#[test]
fn test_claim_totals_default_damages() {
    let totals = ClaimTotals::compute(&full_case(), Currency::QAR).unwrap();

    assert_eq!(totals.damages, dec!(1050.00));
    assert_eq!(totals.total_claim, dec!(4550.00));
    assert_eq!(totals.invoices_amount, dec!(3000));
    assert_eq!(totals.invoices_paid, dec!(500));
    assert_eq!(totals.invoices_remaining, dec!(2500));
    assert_eq!(totals.invoices_due, dec!(2725));
    assert_eq!(totals.violations_amount, dec!(500));
}

#[test]
fn test_explicit_damages_are_kept() {
    let mut data = full_case();
    data.claim.damages = Some(dec!(0));

    let totals = ClaimTotals::compute(&data, Currency::QAR).unwrap();
    assert_eq!(totals.damages, dec!(0));
    assert_eq!(totals.total_claim, dec!(3500));
}

#[test]
fn test_duration_wording() {
    assert_eq!(format_duration_ar(45), "45 يوم");
    assert_eq!(format_duration_ar(59), "59 يوم");
    assert_eq!(format_duration_ar(60), "شهرين");
    assert_eq!(format_duration_ar(100), "3 أشهر");
    assert_eq!(format_duration_ar(400), "13 شهر");
}

#[test]
fn test_complaint_requires_plate_number() {
    let mut data = full_case();
    data.vehicle.plate_number = Some("  ".to_string());

    let err = generator()
        .render(
            DocumentKind::CriminalComplaint,
            &data,
            Currency::QAR,
            date(2024, 8, 15),
        )
        .unwrap_err();
    assert!(err.to_string().contains("plate number"));
}

#[test]
fn test_violations_transfer_requires_violations() {
    let mut data = full_case();
    data.violations.clear();

    let result = generator().render(
        DocumentKind::ViolationsTransfer,
        &data,
        Currency::QAR,
        date(2024, 8, 15),
    );
    assert!(result.is_err());
}

#[test]
fn test_claims_statement_requires_something_to_claim() {
    let mut data = full_case();
    data.invoices.clear();
    data.claim.overdue_rent = dec!(0);

    let result = generator().render(
        DocumentKind::ClaimsStatement,
        &data,
        Currency::QAR,
        date(2024, 8, 15),
    );
    assert!(result.is_err());
}

#[test]
fn test_documents_list_marks_missing_attachments() {
    let html = generator()
        .render(
            DocumentKind::DocumentsList,
            &full_case(),
            Currency::QAR,
            date(2024, 8, 15),
        )
        .unwrap()
        .html;

    assert!(html.contains("نسخة من عقد الإيجار"));
    assert!(html.contains("غير مرفق"));
}

#[test]
fn test_customer_input_is_escaped() {
    let mut data = full_case();
    data.customer.full_name = "<script>alert(1)</script>".to_string();
    data.notes = Some("<b>urgent</b>".to_string());

    let html = generator()
        .render(
            DocumentKind::ExplanatoryMemo,
            &data,
            Currency::QAR,
            date(2024, 8, 15),
        )
        .unwrap()
        .html;

    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<b>urgent</b>"));
    assert!(html.contains(&escaped("&lt;b&gt;urgent&lt;/b&gt;")));
}

#[test]
fn test_case_currency_overrides_default() {
    let mut data = full_case();
    data.currency = Some(Currency::KWD);

    let html = generator()
        .render(
            DocumentKind::ExplanatoryMemo,
            &data,
            Currency::QAR,
            date(2024, 8, 15),
        )
        .unwrap()
        .html;

    assert!(html.contains("4,550.000"));
    assert!(html.contains(Currency::KWD.arabic_name()));
}

#[test]
fn test_same_input_same_hash() {
    let generator = generator();
    let data = full_case();
    let a = generator
        .render(DocumentKind::ClaimsStatement, &data, Currency::QAR, date(2024, 8, 15))
        .unwrap();
    let b = generator
        .render(DocumentKind::ClaimsStatement, &data, Currency::QAR, date(2024, 8, 15))
        .unwrap();

    assert_eq!(a.content_sha256, b.content_sha256);
    assert_eq!(a.content_sha256.len(), 64);
}
