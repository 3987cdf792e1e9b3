//! Ad creation through the application service

use std::sync::Arc;

use p2p_forms::{
    AdDefaults, AdDetailsForm, AdField, AdService, AdUseCases, FormError, FormPhase,
    InMemoryAdGateway, InMemoryEventPublisher, PaymentMethodSelection, SavedPaymentMethod,
    ServiceError, TradeType,
};
use rust_decimal::Decimal;

fn saved(id: u64, method: &str) -> SavedPaymentMethod {
    SavedPaymentMethod {
        id,
        display_name: method.to_string(),
        method: method.to_string(),
        method_type: "ewallet".to_string(),
        fields: Default::default(),
    }
}

fn form(total: &str, rate: &str, min: &str, max: &str) -> AdDetailsForm {
    let mut form = AdDetailsForm::open(None);
    form.set_trade_type(TradeType::Sell).unwrap();
    for (field, value) in AdField::ALL.into_iter().zip([total, rate, min, max]) {
        form.edit_amount(field, value).unwrap();
    }
    form
}

#[test]
fn test_cross_field_cases() {
    assert!(form("100", "1", "50", "80").is_valid());

    let min_over_total = form("100", "1", "150", "200");
    assert!(min_over_total.validation().has_error("minAmount"));
    assert!(!min_over_total.validation().has_error("maxAmount"));

    let max_under_min = form("100", "1", "50", "30");
    assert!(max_under_min.validation().has_error("maxAmount"));
    assert!(!max_under_min.validation().has_error("minAmount"));
}

#[tokio::test]
async fn test_create_ad() {
    let gateway = Arc::new(InMemoryAdGateway::new());
    let defaults = AdDefaults { payment_currency: "MYR".into(), ..AdDefaults::default() };
    let service = AdService::new(gateway.clone(), Arc::new(InMemoryEventPublisher::new()), defaults);

    let mut selection = PaymentMethodSelection::new(vec![saved(1, "alipay"), saved(2, "skrill")]);
    selection.toggle(2).unwrap();

    let mut ad = form("1000", "15.5", "10", "500");
    let status = service.submit(&mut ad, &selection, "Fast release").await.unwrap();
    assert!(status.is_accepted());
    assert_eq!(ad.phase(), FormPhase::Closed);

    let ads = gateway.ads().await;
    assert_eq!(ads.len(), 1);
    let payload = &ads[0];
    assert_eq!(payload.trade_type, TradeType::Sell);
    assert_eq!(payload.payment_currency, "MYR");
    assert_eq!(payload.available_amount, Decimal::new(1000, 0));
    assert_eq!(payload.exchange_rate, Decimal::new(155, 1));
    assert_eq!(payload.payment_method_names, vec!["skrill"]);
    assert_eq!(payload.order_expiry_period, 15);
}

#[tokio::test]
async fn test_ad_without_payment_method_is_refused() {
    let gateway = Arc::new(InMemoryAdGateway::new());
    let service = AdService::new(
        gateway.clone(),
        Arc::new(InMemoryEventPublisher::new()),
        AdDefaults::default(),
    );
    let selection = PaymentMethodSelection::new(vec![saved(1, "alipay")]);

    let mut ad = form("1000", "15.5", "10", "500");
    let err = service.submit(&mut ad, &selection, "").await.unwrap_err();
    assert_eq!(err, ServiceError::Form(FormError::NoPaymentMethodSelected));
    assert_eq!(ad.phase(), FormPhase::Editing);
    assert!(gateway.ads().await.is_empty());
}
