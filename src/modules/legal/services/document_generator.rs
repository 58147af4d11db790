// LegalDocumentGenerator
// Renders printable Arabic legal documents from case data
//
// Templates are compiled into the binary and autoescaped (.html names).
// All amounts and dates are formatted here; templates only place strings.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tera::{Context, Tera};

use crate::config::CompanyProfile;
use crate::core::{format_document_date, AppError, Currency, Result};
use crate::modules::legal::models::{
    CustomerParty, DocumentKind, GeneratedDocument, LegalCaseData,
};

/// Share of overdue rent plus penalty claimed as damages when none is given
pub const DEFAULT_DAMAGES_RATE: Decimal = Decimal::from_parts(30, 0, 0, false, 2);

const TEMPLATES: [(&str, &str); 6] = [
    ("base.html", include_str!("../../../../templates/legal/base.html")),
    (
        "explanatory_memo.html",
        include_str!("../../../../templates/legal/explanatory_memo.html"),
    ),
    (
        "claims_statement.html",
        include_str!("../../../../templates/legal/claims_statement.html"),
    ),
    (
        "criminal_complaint.html",
        include_str!("../../../../templates/legal/criminal_complaint.html"),
    ),
    (
        "documents_list.html",
        include_str!("../../../../templates/legal/documents_list.html"),
    ),
    (
        "violations_transfer.html",
        include_str!("../../../../templates/legal/violations_transfer.html"),
    ),
];

/// Totals derived from the claim figures, invoices and violations
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimTotals {
    pub overdue_rent: Decimal,
    pub late_penalty: Decimal,
    pub damages: Decimal,
    /// late penalty + overdue rent + damages
    pub total_claim: Decimal,
    pub invoices_amount: Decimal,
    pub invoices_paid: Decimal,
    pub invoices_remaining: Decimal,
    pub invoices_penalty: Decimal,
    /// remaining + penalties over all invoices
    pub invoices_due: Decimal,
    pub violations_amount: Decimal,
}

impl ClaimTotals {
    pub fn compute(data: &LegalCaseData, currency: Currency) -> Result<Self> {
        let overdue_rent = data.claim.overdue_rent;
        let late_penalty = data.claim.late_penalty;
        let damages = match data.claim.damages {
            Some(damages) => damages,
            None => overdue_rent
                .checked_add(late_penalty)
                .and_then(|base| base.checked_mul(DEFAULT_DAMAGES_RATE))
                .map(|damages| currency.round(damages))
                .ok_or_else(|| out_of_range("Damages"))?,
        };

        let invoices = &data.invoices;
        let invoices_remaining =
            checked_sum(invoices.iter().map(|i| i.remaining()), "Invoice balance")?;
        let invoices_penalty = checked_sum(invoices.iter().map(|i| i.penalty), "Invoice penalties")?;

        Ok(Self {
            overdue_rent,
            late_penalty,
            damages,
            total_claim: checked_sum([late_penalty, overdue_rent, damages], "Total claim")?,
            invoices_amount: checked_sum(invoices.iter().map(|i| i.total_amount), "Invoice total")?,
            invoices_paid: checked_sum(invoices.iter().map(|i| i.paid_amount), "Invoice payments")?,
            invoices_remaining,
            invoices_penalty,
            invoices_due: checked_sum([invoices_remaining, invoices_penalty], "Invoice amount due")?,
            violations_amount: checked_sum(
                data.violations.iter().map(|v| v.fine_amount),
                "Violation fines",
            )?,
        })
    }
}

fn checked_sum(amounts: impl IntoIterator<Item = Decimal>, what: &str) -> Result<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
        .ok_or_else(|| out_of_range(what))
}

fn out_of_range(what: &str) -> AppError {
    AppError::validation(format!("{} is out of range", what))
}

/// Overdue duration as printed: days below 60, whole months from 60 on
pub fn format_duration_ar(days: i64) -> String {
    if days < 60 {
        return format!("{} يوم", days);
    }

    match days / 30 {
        2 => "شهرين".to_string(),
        months @ 3..=10 => format!("{} أشهر", months),
        months => format!("{} شهر", months),
    }
}

/// `<prefix>/<yyyy>/<contract number>/<kind code>`
pub fn reference_number(
    prefix: &str,
    today: NaiveDate,
    contract_number: &str,
    kind: DocumentKind,
) -> String {
    format!(
        "{}/{}/{}/{}",
        prefix,
        today.year(),
        contract_number.trim(),
        kind.code()
    )
}

pub fn content_sha256(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

pub struct LegalDocumentGenerator {
    tera: Tera,
    company: CompanyProfile,
}

impl LegalDocumentGenerator {
    pub fn new(company: CompanyProfile) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())?;

        Ok(Self { tera, company })
    }

    pub fn company(&self) -> &CompanyProfile {
        &self.company
    }

    /// Render one document kind for `data` dated `today`
    pub fn render(
        &self,
        kind: DocumentKind,
        data: &LegalCaseData,
        default_currency: Currency,
        today: NaiveDate,
    ) -> Result<GeneratedDocument> {
        self.check_required(kind, data)?;

        let currency = data.currency.unwrap_or(default_currency);
        let reference = reference_number(
            &self.company.reference_prefix,
            today,
            &data.contract.contract_number,
            kind,
        );

        let totals = ClaimTotals::compute(data, currency)?;
        let view = DocumentView::build(
            kind,
            data,
            &totals,
            currency,
            &self.company,
            &reference,
            today,
        );
        let context = Context::from_serialize(&view)?;
        let html = self.tera.render(&kind.template_name(), &context)?;

        Ok(GeneratedDocument {
            kind,
            title: kind.title_ar().to_string(),
            reference_number: reference,
            content_sha256: content_sha256(&html),
            html,
        })
    }

    fn check_required(&self, kind: DocumentKind, data: &LegalCaseData) -> Result<()> {
        let mut missing = Vec::new();

        if self.company.name_ar.trim().is_empty() {
            missing.push("company name");
        }
        if data.customer.full_name.trim().is_empty() {
            missing.push("customer name");
        }
        if data.contract.contract_number.trim().is_empty() {
            missing.push("contract number");
        }

        match kind {
            DocumentKind::CriminalComplaint => {
                if data.vehicle.plate().is_none() {
                    missing.push("plate number");
                }
            }
            DocumentKind::ViolationsTransfer => {
                if data.vehicle.plate().is_none() {
                    missing.push("plate number");
                }
                if data.violations.is_empty() {
                    missing.push("at least one violation");
                }
            }
            DocumentKind::ClaimsStatement => {
                if data.invoices.is_empty() && data.claim.overdue_rent <= Decimal::ZERO {
                    missing.push("unpaid invoices or an overdue amount");
                }
            }
            DocumentKind::DocumentsList => {
                if data.documents.is_empty() {
                    missing.push("at least one document");
                }
            }
            DocumentKind::ExplanatoryMemo => {}
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(format!(
                "Cannot generate {}: missing {}",
                kind,
                missing.join(", ")
            )))
        }
    }
}

#[derive(Serialize)]
struct DocumentView<'a> {
    title: &'static str,
    reference_number: &'a str,
    date: String,
    currency: &'static str,
    company: &'a CompanyProfile,
    customer: &'a CustomerParty,
    vehicle: VehicleView<'a>,
    contract: ContractView,
    claim: ClaimView,
    invoices: Vec<InvoiceRow<'a>>,
    violations: Vec<ViolationRow<'a>>,
    violations_count: usize,
    violations_total: String,
    documents: Vec<DocumentRow<'a>>,
    notes: Option<&'a str>,
}

#[derive(Serialize)]
struct VehicleView<'a> {
    plate_number: Option<&'a str>,
    description: String,
    year: Option<i32>,
    chassis_number: Option<&'a str>,
}

#[derive(Serialize)]
struct ContractView {
    contract_number: String,
    start_date: String,
    end_date: Option<String>,
    monthly_amount: String,
    contract_amount: Option<String>,
}

#[derive(Serialize)]
struct ClaimView {
    overdue_rent: String,
    late_penalty: String,
    damages: String,
    total_claim: String,
    days_overdue: i64,
    overdue_duration: String,
    invoices_amount: String,
    invoices_paid: String,
    invoices_remaining: String,
    invoices_penalty: String,
    invoices_due: String,
}

#[derive(Serialize)]
struct InvoiceRow<'a> {
    number: usize,
    invoice_number: &'a str,
    due_date: String,
    total_amount: String,
    paid_amount: String,
    remaining: String,
    days_late: i64,
    penalty: String,
}

#[derive(Serialize)]
struct ViolationRow<'a> {
    number: usize,
    violation_number: &'a str,
    violation_date: Option<String>,
    violation_type: &'a str,
    location: &'a str,
    fine_amount: String,
}

#[derive(Serialize)]
struct DocumentRow<'a> {
    number: usize,
    name: &'a str,
    attached: bool,
}

impl<'a> DocumentView<'a> {
    fn build(
        kind: DocumentKind,
        data: &'a LegalCaseData,
        totals: &ClaimTotals,
        currency: Currency,
        company: &'a CompanyProfile,
        reference_number: &'a str,
        today: NaiveDate,
    ) -> Self {
        let money = |amount: Decimal| currency.format_grouped(amount);

        Self {
            title: kind.title_ar(),
            reference_number,
            date: format_document_date(today),
            currency: currency.arabic_name(),
            company,
            customer: &data.customer,
            vehicle: VehicleView {
                plate_number: data.vehicle.plate(),
                description: data.vehicle.description(),
                year: data.vehicle.year,
                chassis_number: data.vehicle.chassis_number.as_deref(),
            },
            contract: ContractView {
                contract_number: data.contract.contract_number.trim().to_string(),
                start_date: format_document_date(data.contract.start_date),
                end_date: data.contract.end_date.map(format_document_date),
                monthly_amount: money(data.contract.monthly_amount),
                contract_amount: data.contract.contract_amount.map(money),
            },
            claim: ClaimView {
                overdue_rent: money(totals.overdue_rent),
                late_penalty: money(totals.late_penalty),
                damages: money(totals.damages),
                total_claim: money(totals.total_claim),
                days_overdue: data.claim.days_overdue,
                overdue_duration: format_duration_ar(data.claim.days_overdue),
                invoices_amount: money(totals.invoices_amount),
                invoices_paid: money(totals.invoices_paid),
                invoices_remaining: money(totals.invoices_remaining),
                invoices_penalty: money(totals.invoices_penalty),
                invoices_due: money(totals.invoices_due),
            },
            invoices: data
                .invoices
                .iter()
                .enumerate()
                .map(|(i, invoice)| InvoiceRow {
                    number: i + 1,
                    invoice_number: &invoice.invoice_number,
                    due_date: format_document_date(invoice.due_date),
                    total_amount: money(invoice.total_amount),
                    paid_amount: money(invoice.paid_amount),
                    remaining: money(invoice.remaining()),
                    days_late: invoice.days_late,
                    penalty: money(invoice.penalty),
                })
                .collect(),
            violations: data
                .violations
                .iter()
                .enumerate()
                .map(|(i, violation)| ViolationRow {
                    number: i + 1,
                    violation_number: &violation.violation_number,
                    violation_date: violation.violation_date.map(format_document_date),
                    violation_type: violation
                        .violation_type
                        .as_deref()
                        .unwrap_or("مخالفة مرورية"),
                    location: violation.location.as_deref().unwrap_or("غير محدد"),
                    fine_amount: money(violation.fine_amount),
                })
                .collect(),
            violations_count: data.violations.len(),
            violations_total: money(totals.violations_amount),
            documents: data
                .documents
                .iter()
                .enumerate()
                .map(|(i, document)| DocumentRow {
                    number: i + 1,
                    name: &document.name,
                    attached: document.attached,
                })
                .collect(),
            notes: data
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty()),
        }
    }
}
