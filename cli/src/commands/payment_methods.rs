//! Payment method commands

use anyhow::{Context, Result};
use p2p_forms::{
    category_display_name, display_details, InMemoryPaymentMethodGateway, PaymentMethodForm,
    PaymentMethodService, PaymentMethodUseCases, SavedPaymentMethod, SubmissionStatus,
    TracingEventPublisher,
};
use serde::Serialize;
use std::fs;
use std::sync::Arc;
use tabled::Tabled;

use super::parse_assignment;
use crate::output::{print_notice, print_validation, OutputFormat};
use crate::PaymentMethodCommands;

#[derive(Serialize, Tabled)]
struct SavedRow {
    id: u64,
    category: &'static str,
    method: String,
    primary: String,
    secondary: String,
}

pub async fn handle(action: PaymentMethodCommands, format: OutputFormat) -> Result<()> {
    match action {
        PaymentMethodCommands::Add { category, fields, notes, saved } => {
            let existing = match saved {
                Some(path) => read_saved(&path)?,
                None => Vec::new(),
            };
            add(&category, &fields, notes, existing, format).await
        }
        PaymentMethodCommands::Show { file } => {
            let rows: Vec<SavedRow> = read_saved(&file)?
                .iter()
                .map(|method| {
                    let display = display_details(method);
                    SavedRow {
                        id: method.id,
                        category: category_display_name(&method.method_type),
                        method: method.display_name.clone(),
                        primary: display.primary,
                        secondary: display.secondary,
                    }
                })
                .collect();
            format.print_rows(&rows)
        }
    }
}

async fn add(
    category: &str,
    fields: &[String],
    notes: Option<String>,
    existing: Vec<SavedPaymentMethod>,
    format: OutputFormat,
) -> Result<()> {
    let mut form = PaymentMethodForm::open();
    form.select_category(category)?;
    for raw in fields {
        let (name, value) = parse_assignment(raw).map_err(anyhow::Error::msg)?;
        form.edit_field(&name, value)?;
    }
    if let Some(notes) = notes {
        form.edit_field("instructions", notes)?;
    }

    if !form.is_valid() {
        print_validation(format, form.validation())?;
        anyhow::bail!("payment method form has errors");
    }

    let service = PaymentMethodService::new(
        Arc::new(InMemoryPaymentMethodGateway::with_methods(existing)),
        Arc::new(TracingEventPublisher),
    );
    let status = service.submit(&mut form).await?;

    if let Some(notice) = form.notice() {
        print_notice(notice);
    }
    if let SubmissionStatus::Rejected { field: Some(_), .. } = &status {
        print_validation(format, form.validation())?;
    }
    format.print(&status)
}

fn read_saved(path: &str) -> Result<Vec<SavedPaymentMethod>> {
    let content = fs::read_to_string(path).with_context(|| format!("cannot read {path}"))?;
    serde_json::from_str(&content).with_context(|| format!("{path} is not a list of payment methods"))
}
