//! Domain services
//!
//! Stateless rules that span more than one field or value object.

pub mod ad_amounts;
pub mod display;

pub use ad_amounts::{validate_ad_amounts, AdField, AmountValidation};
pub use display::{category_display_name, display_details, mask_account, MethodDisplay};
