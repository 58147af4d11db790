// LegalDocumentService
// Generates documents for stored contracts, uploads them and records them
//
// Claim figures default to what the system knows:
// - overdue rent: overdue installments of the payment schedule
// - late penalty / days overdue: current late fine assessment
// - damages: generator default (share of rent plus penalty)

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::{AppError, Currency, Result};
use crate::modules::contracts::{Contract, ContractService};
use crate::modules::customers::{Customer, CustomerRepository};
use crate::modules::fines::LateFineService;
use crate::modules::legal::{
    models::{
        AttachedDocument, ClaimFigures, ContractDetails, CustomerParty, DocumentKind,
        GeneratedDocument, InvoiceClaim, LegalCaseData, LegalDocumentRecord, TrafficViolation,
        VehicleDetails,
    },
    repositories::LegalDocumentRepository,
    services::{DocumentStorage, LegalDocumentGenerator},
};
use crate::modules::schedules::PaymentScheduleGenerator;
use crate::modules::vehicles::{Vehicle, VehicleRepository};

/// Case details the database does not hold, plus figure overrides
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateDocumentRequest {
    #[serde(default)]
    pub invoices: Vec<InvoiceClaim>,
    #[serde(default)]
    pub violations: Vec<TrafficViolation>,
    #[serde(default)]
    pub documents: Vec<AttachedDocument>,
    pub overdue_rent: Option<Decimal>,
    pub late_penalty: Option<Decimal>,
    pub damages: Option<Decimal>,
    pub days_overdue: Option<i64>,
    pub customer_nationality: Option<String>,
    pub chassis_number: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractDocument {
    pub record: LegalDocumentRecord,
    pub title: String,
    pub html: String,
}

pub struct LegalDocumentService {
    repository: LegalDocumentRepository,
    contracts: ContractService,
    customers: CustomerRepository,
    vehicles: VehicleRepository,
    fines: LateFineService,
    generator: Arc<LegalDocumentGenerator>,
    storage: DocumentStorage,
    default_currency: Currency,
}

impl LegalDocumentService {
    pub fn new(
        pool: MySqlPool,
        default_currency: Currency,
        generator: Arc<LegalDocumentGenerator>,
        storage: DocumentStorage,
    ) -> Self {
        Self {
            repository: LegalDocumentRepository::new(pool.clone()),
            contracts: ContractService::new(pool.clone(), default_currency),
            customers: CustomerRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            fines: LateFineService::new(pool, default_currency),
            generator,
            storage,
            default_currency,
        }
    }

    pub async fn generate_for_contract(
        &self,
        contract_id: &str,
        kind: DocumentKind,
        request: GenerateDocumentRequest,
        today: NaiveDate,
    ) -> Result<ContractDocument> {
        let contract = self.contracts.get_contract(contract_id).await?;
        let customer = self
            .customers
            .find_by_id(&contract.customer_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Customer {} not found", contract.customer_id))
            })?;
        let vehicle = match contract.vehicle_id {
            Some(ref vehicle_id) => self.vehicles.find_by_id(vehicle_id).await?,
            None => None,
        };

        let claim = self.claim_figures(&contract, &request, today).await?;
        let data = case_data(&contract, &customer, vehicle.as_ref(), claim, request);

        let document = self
            .generator
            .render(kind, &data, self.default_currency, today)?;
        let storage_path = self.store(&contract, &document, today).await?;

        let record = LegalDocumentRecord {
            id: Uuid::new_v4().to_string(),
            contract_id: contract.id.clone(),
            kind,
            reference_number: document.reference_number.clone(),
            storage_path,
            content_sha256: document.content_sha256.clone(),
            created_at: chrono::Utc::now().naive_utc(),
        };
        if let Err(e) = self.repository.create(&record).await {
            if let Some(ref path) = record.storage_path {
                warn!(
                    contract_id,
                    path = path.as_str(),
                    error = %e,
                    "Legal document uploaded but not recorded, stored object is orphaned"
                );
            }
            return Err(e);
        }

        info!(
            document_id = record.id.as_str(),
            contract_id,
            kind = kind.as_str(),
            reference_number = record.reference_number.as_str(),
            stored = record.storage_path.is_some(),
            "Legal document generated"
        );

        Ok(ContractDocument {
            record,
            title: document.title,
            html: document.html,
        })
    }

    pub async fn list_for_contract(&self, contract_id: &str) -> Result<Vec<LegalDocumentRecord>> {
        self.contracts.get_contract(contract_id).await?;
        self.repository.list_by_contract(contract_id).await
    }

    /// Stored HTML of a previously generated document
    pub async fn content(&self, id: &str) -> Result<Vec<u8>> {
        let record = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Legal document {} not found", id)))?;

        let path = record.storage_path.ok_or_else(|| {
            AppError::not_found(format!("Legal document {} was not stored", id))
        })?;
        let store = self
            .storage
            .store()
            .ok_or_else(|| AppError::Configuration("Document storage is not configured".into()))?;

        store.download(&path).await
    }

    async fn claim_figures(
        &self,
        contract: &Contract,
        request: &GenerateDocumentRequest,
        today: NaiveDate,
    ) -> Result<ClaimFigures> {
        let overdue_rent = match request.overdue_rent {
            Some(amount) => amount,
            None => {
                let input = contract.schedule_input();
                let schedule = PaymentScheduleGenerator::generate(&input, today)?;
                PaymentScheduleGenerator::summarize(&schedule, &input).overdue_amount
            }
        };

        let (late_penalty, days_overdue) = match (request.late_penalty, request.days_overdue) {
            (Some(penalty), Some(days)) => (penalty, days),
            (penalty, days) => {
                let assessment = self.fines.assess_contract(&contract.id, today).await?;
                (
                    penalty.unwrap_or(assessment.fine_amount),
                    days.unwrap_or(assessment.days_overdue.max(0)),
                )
            }
        };

        Ok(ClaimFigures {
            overdue_rent,
            late_penalty,
            damages: request.damages,
            days_overdue,
        })
    }

    async fn store(
        &self,
        contract: &Contract,
        document: &GeneratedDocument,
        today: NaiveDate,
    ) -> Result<Option<String>> {
        let Some(store) = self.storage.store() else {
            return Ok(None);
        };

        let path = format!(
            "contracts/{}/{}-{}-{}.html",
            contract.id,
            document.kind,
            today.format("%Y%m%d"),
            &document.content_sha256[..12]
        );

        match store
            .upload(&path, "text/html; charset=utf-8", document.html.clone().into_bytes())
            .await
        {
            Ok(stored) => Ok(Some(stored)),
            Err(e) => {
                warn!(
                    contract_id = contract.id.as_str(),
                    path = path.as_str(),
                    error = %e,
                    "Legal document upload failed"
                );
                Err(e)
            }
        }
    }
}

fn case_data(
    contract: &Contract,
    customer: &Customer,
    vehicle: Option<&Vehicle>,
    claim: ClaimFigures,
    request: GenerateDocumentRequest,
) -> LegalCaseData {
    LegalCaseData {
        customer: CustomerParty {
            full_name: customer.full_name.clone(),
            customer_code: Some(customer.customer_code.clone()),
            national_id: customer.national_id.clone(),
            nationality: request.customer_nationality,
            phone: customer.phone.clone(),
            email: customer.email.clone(),
        },
        vehicle: VehicleDetails {
            plate_number: vehicle.map(|v| v.plate_number.clone()),
            make: vehicle.and_then(|v| v.make.clone()),
            model: vehicle.and_then(|v| v.model.clone()),
            year: vehicle.and_then(|v| v.year),
            chassis_number: request.chassis_number,
        },
        contract: ContractDetails {
            contract_number: contract.contract_number.clone(),
            start_date: contract.start_date,
            end_date: Some(contract.end_date),
            monthly_amount: contract.monthly_amount,
            contract_amount: Some(contract.contract_amount),
        },
        claim,
        invoices: request.invoices,
        violations: request.violations,
        documents: request.documents,
        notes: request.notes,
        currency: Some(contract.currency),
    }
}
