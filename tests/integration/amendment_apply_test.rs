// Integration tests for the amendment workflow against MySQL
//
// Covers transactional application onto the contract and serialization
// of concurrent workflow steps on the same amendment.

#[path = "../helpers/mod.rs"]
mod helpers;

use fleetrent::amendments::{
    AmendmentRepository, AmendmentService, AmendmentStatus, AmendmentType, AmendmentValues,
    CreateAmendmentRequest,
};
use fleetrent::contracts::ContractService;
use fleetrent::core::{AppError, Currency, Result};
use helpers::*;
use rust_decimal::Decimal;

fn extension(requires_customer_signature: bool) -> CreateAmendmentRequest {
    CreateAmendmentRequest {
        amendment_type: AmendmentType::ExtendDuration,
        reason: "Customer requested two more months".to_string(),
        new_values: AmendmentValues {
            end_date: Some(date(2025, 1, 14)),
            contract_amount: Some(Decimal::new(18000, 0)),
            ..Default::default()
        },
        requires_customer_signature,
    }
}

#[tokio::test]
#[ignore = "Requires test database configuration"]
async fn test_apply_writes_new_terms_onto_contract() -> Result<()> {
    let pool = create_test_pool().await;
    let contract = seed_active_contract(&pool).await;
    let service = AmendmentService::new(pool.clone(), Currency::QAR);
    let contracts = ContractService::new(pool.clone(), Currency::QAR);

    let amendment = service
        .create(&contract.id, extension(false), Some("staff-1".to_string()))
        .await?;
    assert_eq!(amendment.status, AmendmentStatus::Pending);
    assert_eq!(amendment.original_values.end_date, Some(date(2024, 11, 14)));

    service.approve(&amendment.id, "manager-1", None).await?;
    let applied = service.apply(&amendment.id).await?;
    assert_eq!(applied.status, AmendmentStatus::Applied);
    assert!(applied.applied_at.is_some());

    let updated = contracts.get_contract(&contract.id).await?;
    assert_eq!(updated.end_date, date(2025, 1, 14));
    assert_eq!(updated.contract_amount, Decimal::new(18000, 0));
    assert_eq!(updated.monthly_amount, contract.monthly_amount);

    let stored = service.get(&amendment.id).await?;
    assert_eq!(stored.status, AmendmentStatus::Applied);

    Ok(())
}

#[tokio::test]
#[ignore = "Requires test database configuration"]
async fn test_failed_apply_leaves_contract_and_amendment_untouched() -> Result<()> {
    let pool = create_test_pool().await;
    let contract = seed_active_contract(&pool).await;
    let service = AmendmentService::new(pool.clone(), Currency::QAR);
    let contracts = ContractService::new(pool.clone(), Currency::QAR);

    // Signature required but never recorded
    let amendment = service.create(&contract.id, extension(true), None).await?;
    service.approve(&amendment.id, "manager-1", None).await?;

    let err = service.apply(&amendment.id).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let unchanged = contracts.get_contract(&contract.id).await?;
    assert_eq!(unchanged.end_date, contract.end_date);
    assert_eq!(unchanged.contract_amount, contract.contract_amount);

    let stored = service.get(&amendment.id).await?;
    assert_eq!(stored.status, AmendmentStatus::Approved);
    assert!(stored.applied_at.is_none());

    // Once signed the same amendment applies
    service.record_customer_signature(&amendment.id).await?;
    service.apply(&amendment.id).await?;
    let updated = contracts.get_contract(&contract.id).await?;
    assert_eq!(updated.end_date, date(2025, 1, 14));

    Ok(())
}

#[tokio::test]
#[ignore = "Requires test database configuration"]
async fn test_reject_after_apply_does_not_overwrite_status() -> Result<()> {
    let pool = create_test_pool().await;
    let contract = seed_active_contract(&pool).await;
    let service = AmendmentService::new(pool.clone(), Currency::QAR);

    let amendment = service.create(&contract.id, extension(false), None).await?;
    service.approve(&amendment.id, "manager-1", None).await?;
    service.apply(&amendment.id).await?;

    let err = service
        .reject(&amendment.id, "manager-2", "Too late")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let stored = service.get(&amendment.id).await?;
    assert_eq!(stored.status, AmendmentStatus::Applied);
    assert_eq!(stored.reviewed_by.as_deref(), Some("manager-1"));

    Ok(())
}

#[tokio::test]
#[ignore = "Requires test database configuration"]
async fn test_concurrent_approve_and_reject_only_one_wins() -> Result<()> {
    let pool = create_test_pool().await;
    let contract = seed_active_contract(&pool).await;
    let service = AmendmentService::new(pool.clone(), Currency::QAR);

    let amendment = service.create(&contract.id, extension(false), None).await?;

    let (approved, rejected) = tokio::join!(
        service.approve(&amendment.id, "manager-1", None),
        service.reject(&amendment.id, "manager-2", "Not justified"),
    );
    assert!(
        approved.is_ok() != rejected.is_ok(),
        "exactly one review must succeed"
    );

    let stored = service.get(&amendment.id).await?;
    let expected = if approved.is_ok() {
        AmendmentStatus::Approved
    } else {
        AmendmentStatus::Rejected
    };
    assert_eq!(stored.status, expected);

    Ok(())
}

#[tokio::test]
#[ignore = "Requires test database configuration"]
async fn test_signature_survives_concurrent_approval() -> Result<()> {
    let pool = create_test_pool().await;
    let contract = seed_active_contract(&pool).await;
    let service = AmendmentService::new(pool.clone(), Currency::QAR);

    let amendment = service.create(&contract.id, extension(true), None).await?;

    let (signed, approved) = tokio::join!(
        service.record_customer_signature(&amendment.id),
        service.approve(&amendment.id, "manager-1", None),
    );
    signed?;
    approved?;

    let stored = service.get(&amendment.id).await?;
    assert_eq!(stored.status, AmendmentStatus::Approved);
    assert!(stored.customer_signed_at.is_some());

    Ok(())
}

#[tokio::test]
#[ignore = "Requires test database configuration"]
async fn test_duplicate_amendment_number_is_validation_error() -> Result<()> {
    let pool = create_test_pool().await;
    let contract = seed_active_contract(&pool).await;
    let service = AmendmentService::new(pool.clone(), Currency::QAR);
    let repository = AmendmentRepository::new(pool.clone());

    let first = service.create(&contract.id, extension(false), None).await?;
    assert!(first.amendment_number.ends_with("-01"));

    let mut duplicate = first.clone();
    duplicate.id = uuid::Uuid::new_v4().to_string();

    let err = repository.create(&duplicate).await.unwrap_err();
    match err {
        AppError::Validation(message) => {
            assert!(message.contains(&first.amendment_number));
        }
        other => panic!("expected a validation error, got {:?}", other),
    }

    // The next proposal takes the following sequence number
    let second = service.create(&contract.id, extension(false), None).await?;
    assert!(second.amendment_number.ends_with("-02"));

    Ok(())
}
