//! Payment methods accepted by an ad

use std::collections::BTreeSet;
use tracing::debug;

use crate::domain::value_objects::SavedPaymentMethod;
use crate::error::{FormError, Result};

pub const SELECT_AT_LEAST_ONE: &str = "Select at least one payment method for your ad";

/// Multi-select over the user's saved payment methods
#[derive(Clone, Debug, Default)]
pub struct PaymentMethodSelection {
    available: Vec<SavedPaymentMethod>,
    selected: BTreeSet<u64>,
}

impl PaymentMethodSelection {
    pub fn new(available: Vec<SavedPaymentMethod>) -> Self {
        Self { available, selected: BTreeSet::new() }
    }

    pub fn available(&self) -> &[SavedPaymentMethod] {
        &self.available
    }

    /// Flip one method in or out of the selection
    pub fn toggle(&mut self, id: u64) -> Result<bool> {
        if !self.available.iter().any(|m| m.id == id) {
            return Err(FormError::UnknownPaymentMethod(id));
        }

        let selected = if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        };
        debug!(payment_method_id = id, selected, "payment method toggled");
        Ok(selected)
    }

    pub fn is_selected(&self, id: u64) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected_ids(&self) -> &BTreeSet<u64> {
        &self.selected
    }

    /// Category keys of the selected methods, in display order, without
    /// duplicates
    pub fn selected_method_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for method in self.available.iter().filter(|m| self.selected.contains(&m.id)) {
            if !names.contains(&method.method) {
                names.push(method.method.clone());
            }
        }
        names
    }

    pub fn is_valid(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Message shown under the picker while nothing is selected
    pub fn hint(&self) -> Option<&'static str> {
        (!self.is_valid()).then_some(SELECT_AT_LEAST_ONE)
    }
}
