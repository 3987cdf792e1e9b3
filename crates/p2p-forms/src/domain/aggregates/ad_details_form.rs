//! Ad Details Form Aggregate

use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::{FormPhase, PaymentMethodSelection, SubmissionOutcome, SubmissionStatus};
use crate::domain::events::{DomainEvent, FormKind, FormSnapshot, Notifier};
use crate::domain::services::{validate_ad_amounts, AdField, AmountValidation};
use crate::domain::validation::{ErrorKind, ValidationResult};
use crate::domain::value_objects::{AdFormAmounts, AdFormData, Amount, FormId, FormNotice, TradeType};
use crate::error::{FormError, Result};

const FAILURE_TITLE: &str = "Failed to create ad";
const CREATED_TITLE: &str = "Ad created";
const CREATED_MESSAGE: &str = "You've successfully created Ad.";

/// Validated ad, ready for the creation collaborator
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdDraft {
    pub trade_type: TradeType,
    pub amounts: AdFormAmounts,
    pub payment_method_names: Vec<String>,
}

/// Ad details form aggregate root
///
/// Raw inputs are kept as typed so that an unparseable value can be shown
/// back to the user next to its error.
#[derive(Debug)]
pub struct AdDetailsForm {
    id: FormId,
    phase: FormPhase,
    seeded: bool,
    trade_type: TradeType,
    inputs: HashMap<AdField, String>,
    validation: AmountValidation,
    notice: Option<FormNotice>,
    notifier: Notifier<AdFormData>,
    events: Vec<DomainEvent>,
}

impl AdDetailsForm {
    /// Open the form, optionally seeded from an existing ad
    pub fn open(initial: Option<&AdFormData>) -> Self {
        let trade_type = initial.map(|d| d.trade_type).unwrap_or_default();
        let inputs: HashMap<AdField, String> = AdField::ALL
            .into_iter()
            .map(|field| {
                let value = initial.map(|d| seed_value(d, field)).unwrap_or_default();
                (field, value)
            })
            .collect();

        let id = FormId::new();
        let validation = validate_inputs(&inputs);
        let form_data = numeric_view(trade_type, &inputs);
        let notifier = Notifier::new(FormSnapshot {
            form_id: id.clone(),
            revision: 0,
            category: Some(trade_type.as_str().to_string()),
            is_valid: validation.is_valid(),
            form_data,
        });

        let events = vec![DomainEvent::Opened {
            form_id: id.clone(),
            kind: FormKind::AdDetails,
            opened_at: Utc::now(),
        }];

        Self {
            id,
            phase: FormPhase::Editing,
            seeded: initial.is_some(),
            trade_type,
            inputs,
            validation,
            notice: None,
            notifier,
            events,
        }
    }

    pub fn id(&self) -> &FormId {
        &self.id
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Opened from an existing ad
    pub fn is_edit(&self) -> bool {
        self.seeded
    }

    pub fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    pub fn input(&self, field: AdField) -> &str {
        self.inputs.get(&field).map(String::as_str).unwrap_or_default()
    }

    pub fn validation(&self) -> &ValidationResult {
        &self.validation.result
    }

    pub fn is_valid(&self) -> bool {
        self.validation.is_valid()
    }

    pub fn notice(&self) -> Option<&FormNotice> {
        self.notice.as_ref()
    }

    /// Numeric view of the inputs; unparseable values read as zero
    pub fn form_data(&self) -> AdFormData {
        numeric_view(self.trade_type, &self.inputs)
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<FormSnapshot<AdFormData>> {
        self.notifier.subscribe()
    }

    pub fn set_trade_type(&mut self, trade_type: TradeType) -> Result<()> {
        self.phase.ensure_editable()?;
        self.trade_type = trade_type;
        self.notice = None;
        debug!(form_id = %self.id, %trade_type, "trade type set");
        self.revalidate();
        Ok(())
    }

    pub fn edit_amount(&mut self, field: AdField, value: impl Into<String>) -> Result<()> {
        self.phase.ensure_editable()?;
        self.inputs.insert(field, value.into());
        self.notice = None;
        self.revalidate();
        Ok(())
    }

    /// Edit by wire name (`totalAmount`, `fixedRate`, ...)
    pub fn edit_amount_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let field = AdField::from_name(name).ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        self.edit_amount(field, value)
    }

    pub fn begin_submission(&mut self, selection: &PaymentMethodSelection) -> Result<AdDraft> {
        if let Err(err) = self.phase.ensure_editable() {
            warn!(form_id = %self.id, error = %err, "submit rejected");
            return Err(err);
        }

        let amounts = self.validation.amounts.ok_or(FormError::InvalidForm)?;
        if !selection.is_valid() {
            return Err(FormError::NoPaymentMethodSelected);
        }

        self.phase = FormPhase::Submitting;
        self.notice = None;
        self.events.push(DomainEvent::SubmissionStarted {
            form_id: self.id.clone(),
            started_at: Utc::now(),
        });
        debug!(form_id = %self.id, trade_type = %self.trade_type, "ad submission started");

        Ok(AdDraft {
            trade_type: self.trade_type,
            amounts,
            payment_method_names: selection.selected_method_names(),
        })
    }

    pub fn complete_submission(&mut self, outcome: SubmissionOutcome) -> Result<SubmissionStatus> {
        if self.phase != FormPhase::Submitting {
            return Err(FormError::NotSubmitting);
        }

        let status = match outcome {
            SubmissionOutcome::Accepted { data } => {
                self.phase = FormPhase::Closed;
                self.notice = Some(FormNotice::success(CREATED_TITLE, CREATED_MESSAGE));
                self.events.push(DomainEvent::SubmissionSucceeded {
                    form_id: self.id.clone(),
                    completed_at: Utc::now(),
                });
                self.events.push(DomainEvent::Closed {
                    form_id: self.id.clone(),
                    submitted: true,
                });
                info!(form_id = %self.id, "ad created");
                return Ok(SubmissionStatus::Accepted { data });
            }
            SubmissionOutcome::Rejected { code, message, field } => {
                self.phase = FormPhase::Editing;
                self.record_failure(&code);
                warn!(form_id = %self.id, %code, "ad rejected");

                match field.as_deref().and_then(AdField::from_name) {
                    Some(ad_field) => {
                        self.validation
                            .result
                            .reject(ad_field.name(), ErrorKind::Submission, message.clone());
                        self.validation.amounts = None;
                        SubmissionStatus::Rejected { field: Some(ad_field.name().to_string()), message }
                    }
                    None => {
                        self.notice = Some(FormNotice::error(FAILURE_TITLE, message.clone()));
                        SubmissionStatus::Rejected { field: None, message }
                    }
                }
            }
            SubmissionOutcome::Failed { reason } => {
                self.phase = FormPhase::Editing;
                self.record_failure(&reason);
                warn!(form_id = %self.id, %reason, "ad submission failed");

                let notice = FormNotice::unexpected(FAILURE_TITLE);
                self.notice = Some(notice.clone());
                SubmissionStatus::Failed { notice }
            }
        };

        self.publish();
        Ok(status)
    }

    pub fn close(&mut self) -> Result<()> {
        match self.phase {
            FormPhase::Closed => Ok(()),
            FormPhase::Submitting => Err(FormError::SubmissionInProgress),
            FormPhase::AwaitingCategory | FormPhase::Editing => {
                self.phase = FormPhase::Closed;
                self.events.push(DomainEvent::Closed {
                    form_id: self.id.clone(),
                    submitted: false,
                });
                Ok(())
            }
        }
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn revalidate(&mut self) {
        self.validation = validate_inputs(&self.inputs);
        self.publish();
    }

    fn publish(&self) {
        self.notifier.publish(
            Some(self.trade_type.as_str().to_string()),
            self.validation.is_valid(),
            self.form_data(),
        );
    }

    fn record_failure(&mut self, reason: &str) {
        self.events.push(DomainEvent::SubmissionFailed {
            form_id: self.id.clone(),
            reason: reason.to_string(),
            failed_at: Utc::now(),
        });
    }
}

fn seed_value(data: &AdFormData, field: AdField) -> String {
    let value = match field {
        AdField::TotalAmount => data.total_amount,
        AdField::FixedRate => data.fixed_rate,
        AdField::MinAmount => data.min_amount,
        AdField::MaxAmount => data.max_amount,
    };
    if value.is_zero() {
        String::new()
    } else {
        value.normalize().to_string()
    }
}

fn validate_inputs(inputs: &HashMap<AdField, String>) -> AmountValidation {
    let get = |field: AdField| inputs.get(&field).map(String::as_str).unwrap_or_default();
    validate_ad_amounts(
        get(AdField::TotalAmount),
        get(AdField::FixedRate),
        get(AdField::MinAmount),
        get(AdField::MaxAmount),
    )
}

fn numeric_view(trade_type: TradeType, inputs: &HashMap<AdField, String>) -> AdFormData {
    let number = |field: AdField| {
        inputs
            .get(&field)
            .and_then(|raw| Amount::parse(raw).ok())
            .map_or(Decimal::ZERO, |amount| amount.value())
    };
    AdFormData {
        trade_type,
        total_amount: number(AdField::TotalAmount),
        fixed_rate: number(AdField::FixedRate),
        min_amount: number(AdField::MinAmount),
        max_amount: number(AdField::MaxAmount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::SavedPaymentMethod;

    fn filled(total: &str, rate: &str, min: &str, max: &str) -> AdDetailsForm {
        let mut form = AdDetailsForm::open(None);
        form.edit_amount(AdField::TotalAmount, total).unwrap();
        form.edit_amount(AdField::FixedRate, rate).unwrap();
        form.edit_amount(AdField::MinAmount, min).unwrap();
        form.edit_amount(AdField::MaxAmount, max).unwrap();
        form
    }

    fn selection() -> PaymentMethodSelection {
        let mut selection = PaymentMethodSelection::new(vec![SavedPaymentMethod {
            id: 5,
            display_name: "PayPal".into(),
            method: "paypal".into(),
            method_type: "ewallet".into(),
            fields: Default::default(),
        }]);
        selection.toggle(5).unwrap();
        selection
    }

    #[test]
    fn test_blank_form_is_invalid() {
        let form = AdDetailsForm::open(None);
        assert!(!form.is_valid());
        assert!(!form.is_edit());
        assert_eq!(form.trade_type(), TradeType::Buy);
        assert_eq!(form.validation().message("totalAmount"), Some("Total amount is required"));
    }

    #[test]
    fn test_cross_field_errors_follow_edits() {
        let mut form = filled("100", "1", "150", "200");
        assert!(form.validation().has_error("minAmount"));

        form.edit_amount(AdField::MinAmount, "50").unwrap();
        assert!(form.is_valid());

        form.edit_amount(AdField::MaxAmount, "30").unwrap();
        assert_eq!(
            form.validation().message("maxAmount"),
            Some("Maximum amount must be greater than or equal to minimum amount.")
        );
    }

    #[test]
    fn test_broadcast_numeric_view() {
        let mut form = AdDetailsForm::open(None);
        let mut rx = form.subscribe();
        form.edit_amount(AdField::TotalAmount, "abc").unwrap();
        form.set_trade_type(TradeType::Sell).unwrap();

        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.category.as_deref(), Some("sell"));
        assert_eq!(snapshot.form_data.total_amount, Decimal::ZERO);
        assert!(!snapshot.is_valid);
        assert_eq!(form.input(AdField::TotalAmount), "abc");
    }

    #[test]
    fn test_seeded_form() {
        let data = AdFormData {
            trade_type: TradeType::Sell,
            total_amount: Decimal::new(1000, 0),
            fixed_rate: Decimal::new(155, 1),
            min_amount: Decimal::new(10, 0),
            max_amount: Decimal::new(500, 0),
        };
        let form = AdDetailsForm::open(Some(&data));
        assert!(form.is_edit());
        assert!(form.is_valid());
        assert_eq!(form.input(AdField::FixedRate), "15.5");
        assert_eq!(form.form_data(), data);
    }

    #[test]
    fn test_unknown_amount_name() {
        let mut form = AdDetailsForm::open(None);
        assert_eq!(
            form.edit_amount_by_name("price", "1"),
            Err(FormError::UnknownField("price".into()))
        );
        assert!(form.edit_amount_by_name("fixedRate", "1").is_ok());
    }

    #[test]
    fn test_submit_needs_payment_method() {
        let mut form = filled("100", "1", "50", "80");
        let empty = PaymentMethodSelection::default();
        assert_eq!(form.begin_submission(&empty), Err(FormError::NoPaymentMethodSelected));
        assert_eq!(form.phase(), FormPhase::Editing);
    }

    #[test]
    fn test_submit_lifecycle() {
        let mut form = filled("100", "1", "50", "80");
        let draft = form.begin_submission(&selection()).unwrap();
        assert_eq!(draft.payment_method_names, vec!["paypal"]);
        assert_eq!(draft.amounts.max_amount.value(), Decimal::new(80, 0));

        assert_eq!(form.begin_submission(&selection()), Err(FormError::SubmissionInProgress));
        assert_eq!(form.edit_amount(AdField::MinAmount, "1"), Err(FormError::SubmissionInProgress));

        let status = form
            .complete_submission(SubmissionOutcome::Failed { reason: "timeout".into() })
            .unwrap();
        assert!(!status.is_accepted());
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.notice().unwrap().message, FormNotice::GENERIC_FAILURE);

        form.begin_submission(&selection()).unwrap();
        form.complete_submission(SubmissionOutcome::Accepted { data: None }).unwrap();
        assert_eq!(form.phase(), FormPhase::Closed);
        let notice = form.notice().unwrap();
        assert!(!notice.is_error());
        assert_eq!(notice.message, "You've successfully created Ad.");
    }

    #[test]
    fn test_invalid_form_not_submitted() {
        let mut form = filled("100", "1", "150", "200");
        assert_eq!(form.begin_submission(&selection()), Err(FormError::InvalidForm));
    }

    #[test]
    fn test_rejection_anchored_to_amount() {
        let mut form = filled("100", "1", "50", "80");
        form.begin_submission(&selection()).unwrap();
        form.complete_submission(SubmissionOutcome::Rejected {
            code: "InsufficientBalance".into(),
            message: "Not enough balance".into(),
            field: Some("totalAmount".into()),
        })
        .unwrap();

        assert_eq!(form.validation().message("totalAmount"), Some("Not enough balance"));
        assert_eq!(form.begin_submission(&selection()), Err(FormError::InvalidForm));
    }
}
