// Amendment workflow tests: propose, review, sign and apply

use chrono::NaiveDate;
use fleetrent::core::Currency;
use fleetrent::modules::amendments::models::amendment_number;
use fleetrent::modules::amendments::{
    AmendmentStatus, AmendmentType, AmendmentValues, ContractAmendment, CreateAmendmentRequest,
};
use fleetrent::modules::contracts::{Contract, ContractStatus, CreateContractRequest};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn active_contract() -> Contract {
    let mut contract = Contract::new(
        CreateContractRequest {
            contract_number: "CNT-2024-017".to_string(),
            customer_id: "cust-1".to_string(),
            vehicle_id: Some("veh-1".to_string()),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
            monthly_amount: dec!(1500),
            contract_amount: dec!(18000),
            currency: None,
            terms: None,
        },
        Currency::QAR,
    )
    .unwrap();
    contract.change_status(ContractStatus::Active).unwrap();
    contract
}

fn extension(end: NaiveDate, signature: bool) -> CreateAmendmentRequest {
    CreateAmendmentRequest {
        amendment_type: AmendmentType::ExtendDuration,
        reason: "Customer asked for three more months".to_string(),
        new_values: AmendmentValues {
            end_date: Some(end),
            contract_amount: Some(dec!(22500)),
            ..Default::default()
        },
        requires_customer_signature: signature,
    }
}

fn propose(contract: &Contract, request: CreateAmendmentRequest) -> ContractAmendment {
    ContractAmendment::propose(
        contract,
        request,
        amendment_number(&contract.contract_number, 1),
        Some("staff-1".to_string()),
    )
    .unwrap()
}

#[test]
fn test_full_workflow_applies_new_values() {
    let mut contract = active_contract();
    let mut amendment = propose(&contract, extension(date(2025, 3, 31), false));

    assert_eq!(amendment.status, AmendmentStatus::Pending);
    assert_eq!(amendment.amendment_number, "AMD-CNT-2024-017-01");
    assert_eq!(amendment.original_values.end_date, Some(date(2024, 12, 31)));
    assert_eq!(amendment.original_values.contract_amount, Some(dec!(18000)));
    assert!(amendment.original_values.monthly_amount.is_none());

    amendment.approve("manager-1", Some("OK".to_string())).unwrap();
    assert_eq!(amendment.status, AmendmentStatus::Approved);
    assert_eq!(amendment.reviewed_by.as_deref(), Some("manager-1"));
    assert!(amendment.reviewed_at.is_some());

    amendment.apply(&mut contract).unwrap();
    assert_eq!(amendment.status, AmendmentStatus::Applied);
    assert!(amendment.applied_at.is_some());
    assert_eq!(contract.end_date, date(2025, 3, 31));
    assert_eq!(contract.contract_amount, dec!(22500));
    assert_eq!(contract.monthly_amount, dec!(1500));
}

#[test]
fn test_unchanged_values_are_rejected() {
    let contract = active_contract();
    let request = CreateAmendmentRequest {
        amendment_type: AmendmentType::ChangeAmount,
        reason: "No-op".to_string(),
        new_values: AmendmentValues {
            monthly_amount: Some(dec!(1500)),
            ..Default::default()
        },
        requires_customer_signature: false,
    };

    let result = ContractAmendment::propose(&contract, request, "AMD-X-01".to_string(), None);
    assert!(result.is_err());
}

#[test]
fn test_extension_must_move_end_date_forward() {
    let contract = active_contract();
    let result = ContractAmendment::propose(
        &contract,
        extension(date(2024, 6, 30), false),
        "AMD-X-01".to_string(),
        None,
    );
    assert!(result.is_err());
}

#[test]
fn test_type_must_match_changed_fields() {
    let contract = active_contract();
    let request = CreateAmendmentRequest {
        amendment_type: AmendmentType::ChangeVehicle,
        reason: "Wrong type".to_string(),
        new_values: AmendmentValues {
            monthly_amount: Some(dec!(1700)),
            ..Default::default()
        },
        requires_customer_signature: false,
    };

    assert!(ContractAmendment::propose(&contract, request, "AMD-X-01".to_string(), None).is_err());
}

#[test]
fn test_reason_is_required() {
    let contract = active_contract();
    let mut request = extension(date(2025, 3, 31), false);
    request.reason = "   ".to_string();

    assert!(ContractAmendment::propose(&contract, request, "AMD-X-01".to_string(), None).is_err());
}

#[test]
fn test_suspended_contract_cannot_be_amended() {
    let mut contract = active_contract();
    contract.change_status(ContractStatus::Suspended).unwrap();

    let result = ContractAmendment::propose(
        &contract,
        extension(date(2025, 3, 31), false),
        "AMD-X-01".to_string(),
        None,
    );
    assert!(result.is_err());
}

#[test]
fn test_reject_requires_reason_and_is_final() {
    let contract = active_contract();
    let mut amendment = propose(&contract, extension(date(2025, 3, 31), false));

    assert!(amendment.reject("manager-1", "").is_err());
    amendment.reject("manager-1", "Vehicle is booked").unwrap();
    assert_eq!(amendment.status, AmendmentStatus::Rejected);
    assert_eq!(amendment.review_notes.as_deref(), Some("Vehicle is booked"));

    assert!(amendment.approve("manager-1", None).is_err());
    assert!(amendment.cancel("staff-1", "Too late").is_err());
}

#[test]
fn test_cancel_pending() {
    let contract = active_contract();
    let mut amendment = propose(&contract, extension(date(2025, 3, 31), false));

    amendment.cancel("staff-1", "Customer withdrew").unwrap();
    assert_eq!(amendment.status, AmendmentStatus::Cancelled);
}

#[test]
fn test_pending_amendment_cannot_be_applied() {
    let mut contract = active_contract();
    let mut amendment = propose(&contract, extension(date(2025, 3, 31), false));

    assert!(amendment.apply(&mut contract).is_err());
    assert_eq!(contract.end_date, date(2024, 12, 31));
}

#[test]
fn test_signature_gates_apply() {
    let mut contract = active_contract();
    let mut amendment = propose(&contract, extension(date(2025, 3, 31), true));
    amendment.approve("manager-1", None).unwrap();

    assert!(amendment.apply(&mut contract).is_err());
    assert_eq!(amendment.status, AmendmentStatus::Approved);

    amendment.record_customer_signature().unwrap();
    assert!(amendment.customer_signed_at.is_some());
    assert!(amendment.record_customer_signature().is_err());

    amendment.apply(&mut contract).unwrap();
    assert_eq!(contract.end_date, date(2025, 3, 31));
}

#[test]
fn test_signature_not_required_is_rejected() {
    let contract = active_contract();
    let mut amendment = propose(&contract, extension(date(2025, 3, 31), false));
    assert!(amendment.record_customer_signature().is_err());
}

#[test]
fn test_apply_twice_fails() {
    let mut contract = active_contract();
    let mut amendment = propose(&contract, extension(date(2025, 3, 31), false));
    amendment.approve("manager-1", None).unwrap();
    amendment.apply(&mut contract).unwrap();

    assert!(amendment.apply(&mut contract).is_err());
}

#[test]
fn test_apply_on_cancelled_contract_fails() {
    let mut contract = active_contract();
    let mut amendment = propose(&contract, extension(date(2025, 3, 31), false));
    amendment.approve("manager-1", None).unwrap();
    contract.change_status(ContractStatus::Cancelled).unwrap();

    assert!(amendment.apply(&mut contract).is_err());
    assert_eq!(amendment.status, AmendmentStatus::Approved);
}

#[test]
fn test_invalid_resulting_terms_rejected_at_proposal() {
    let contract = active_contract();
    let request = CreateAmendmentRequest {
        amendment_type: AmendmentType::ChangeDates,
        reason: "Typo".to_string(),
        new_values: AmendmentValues {
            start_date: Some(date(2025, 6, 1)),
            ..Default::default()
        },
        requires_customer_signature: false,
    };

    assert!(ContractAmendment::propose(&contract, request, "AMD-X-01".to_string(), None).is_err());
}
