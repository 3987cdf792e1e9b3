//! Ad commands

use anyhow::Result;
use p2p_forms::{
    validate_ad_amounts, AdDefaults, AdDetailsForm, AdField, AdService, AdUseCases,
    InMemoryAdGateway, PaymentMethodSelection, SavedPaymentMethod, TracingEventPublisher,
    TradeType,
};
use std::sync::Arc;

use crate::output::{print_notice, print_validation, OutputFormat};
use crate::AdAmounts;

pub fn validate(amounts: &AdAmounts, format: OutputFormat) -> Result<()> {
    let validation =
        validate_ad_amounts(&amounts.total, &amounts.rate, &amounts.min, &amounts.max);
    print_validation(format, &validation.result)
}

pub async fn create(
    trade_type: TradeType,
    amounts: &AdAmounts,
    methods: &[String],
    description: &str,
    defaults: AdDefaults,
    format: OutputFormat,
) -> Result<()> {
    let mut form = AdDetailsForm::open(None);
    form.set_trade_type(trade_type)?;
    form.edit_amount(AdField::TotalAmount, amounts.total.as_str())?;
    form.edit_amount(AdField::FixedRate, amounts.rate.as_str())?;
    form.edit_amount(AdField::MinAmount, amounts.min.as_str())?;
    form.edit_amount(AdField::MaxAmount, amounts.max.as_str())?;

    if !form.is_valid() {
        print_validation(format, form.validation())?;
        anyhow::bail!("ad details have errors");
    }

    let available: Vec<SavedPaymentMethod> = methods
        .iter()
        .zip(1..)
        .map(|(method, id)| SavedPaymentMethod {
            id,
            display_name: method.clone(),
            method: method.clone(),
            method_type: String::new(),
            fields: Default::default(),
        })
        .collect();
    let mut selection = PaymentMethodSelection::new(available);
    for id in 1..=methods.len() as u64 {
        selection.toggle(id)?;
    }

    let gateway = Arc::new(InMemoryAdGateway::new());
    let service = AdService::new(gateway.clone(), Arc::new(TracingEventPublisher), defaults);
    let status = service.submit(&mut form, &selection, description).await?;
    if let Some(notice) = form.notice() {
        print_notice(notice);
    }

    match gateway.ads().await.first() {
        Some(payload) => format.print(payload),
        None => format.print(&status),
    }
}
