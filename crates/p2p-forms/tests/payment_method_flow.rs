//! End-to-end payment method flows through the application service

use std::sync::Arc;

use p2p_forms::{
    FormError, FormMode, FormPhase, GatewayError, InMemoryEventPublisher,
    InMemoryPaymentMethodGateway, PaymentMethodForm, PaymentMethodService, PaymentMethodUseCases,
    SavedPaymentMethod, ServiceError, SubmissionStatus,
};

struct Harness {
    gateway: Arc<InMemoryPaymentMethodGateway>,
    events: Arc<InMemoryEventPublisher>,
    service: PaymentMethodService,
}

fn harness() -> Harness {
    let gateway = Arc::new(InMemoryPaymentMethodGateway::new());
    let events = Arc::new(InMemoryEventPublisher::new());
    let service = PaymentMethodService::new(gateway.clone(), events.clone());
    Harness { gateway, events, service }
}

fn bank_form(account: &str) -> PaymentMethodForm {
    let mut form = PaymentMethodForm::open();
    form.select_category("bank_transfer").unwrap();
    form.edit_field("account", account).unwrap();
    form.edit_field("bank_name", "Bank Central Asia").unwrap();
    form
}

#[tokio::test]
async fn test_add_payment_method_closes_form() {
    let h = harness();
    let mut form = bank_form("1234567890");
    form.edit_field("instructions", "  Transfer before noon ").unwrap();

    let status = h.service.submit(&mut form).await.unwrap();
    assert!(status.is_accepted());
    assert_eq!(form.phase(), FormPhase::Closed);

    let saved = h.gateway.methods().await;
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].method, "bank_transfer");
    assert_eq!(saved[0].instructions(), Some("Transfer before noon"));
    assert_eq!(saved[0].field("branch"), Some(""));

    assert_eq!(
        h.events.event_types().await,
        vec![
            "form.opened",
            "form.category_selected",
            "form.submission_started",
            "form.submission_succeeded",
            "form.closed",
        ]
    );
}

#[tokio::test]
async fn test_duplicate_keeps_form_open() {
    let h = harness();
    let mut first = bank_form("1234567890");
    h.service.submit(&mut first).await.unwrap();

    let mut second = bank_form("1234567890");
    let before = second.values().clone();
    let status = h.service.submit(&mut second).await.unwrap();

    assert!(matches!(status, SubmissionStatus::Rejected { field: None, .. }));
    assert_eq!(second.phase(), FormPhase::Editing);
    assert_eq!(second.values(), &before);
    let notice = second.notice().expect("notice shown");
    assert!(!notice.message.is_empty());
    assert_eq!(h.gateway.methods().await.len(), 1);
}

#[tokio::test]
async fn test_pending_submission_blocks_second_call() {
    let h = harness();
    let mut form = bank_form("1234567890");
    form.begin_submission().unwrap();

    let err = h.service.submit(&mut form).await.unwrap_err();
    assert_eq!(err, ServiceError::Form(FormError::SubmissionInProgress));
    assert_eq!(h.gateway.submit_calls(), 0);
}

#[tokio::test]
async fn test_invalid_form_never_reaches_gateway() {
    let h = harness();
    let mut form = PaymentMethodForm::open();
    form.select_category("paypal").unwrap();

    let err = h.service.submit(&mut form).await.unwrap_err();
    assert_eq!(err, ServiceError::Form(FormError::InvalidForm));
    assert_eq!(h.gateway.submit_calls(), 0);
}

#[tokio::test]
async fn test_transport_failure_is_retryable() {
    let h = harness();
    h.gateway.fail_next(GatewayError::Transport("connection refused".into())).await;
    let mut form = bank_form("1234567890");

    let status = h.service.submit(&mut form).await.unwrap();
    let SubmissionStatus::Failed { notice } = status else {
        panic!("expected a failure status");
    };
    assert_eq!(notice.message, "Something went wrong. Please try again.");
    assert_eq!(form.phase(), FormPhase::Editing);

    assert!(h.service.submit(&mut form).await.unwrap().is_accepted());
    assert_eq!(h.gateway.submit_calls(), 2);
}

#[tokio::test]
async fn test_edit_saved_method() {
    let h = harness();
    let mut form = bank_form("1234567890");
    h.service.submit(&mut form).await.unwrap();
    let id = h.gateway.methods().await[0].id;

    let mut edit = h.service.open_edit(id).await.unwrap();
    assert_eq!(edit.mode(), FormMode::Edit { payment_method_id: id });
    assert_eq!(edit.value("account"), Some("1234567890"));
    assert_eq!(edit.select_category("alipay"), Err(FormError::CategoryLocked));

    edit.edit_field("branch", "Jakarta").unwrap();
    assert!(h.service.submit(&mut edit).await.unwrap().is_accepted());

    let saved = h.gateway.methods().await;
    let saved = &saved[0];
    assert_eq!(saved.field("branch"), Some("Jakarta"));
    assert_eq!(saved.field("account"), Some("1234567890"));
}

#[tokio::test]
async fn test_edit_saved_method_of_unregistered_category() {
    let cash = SavedPaymentMethod {
        id: 9,
        display_name: "Cash".into(),
        method: "cash".into(),
        method_type: "other".into(),
        fields: [("phone_number".to_string(), "08123456789".into())].into_iter().collect(),
    };
    let gateway = Arc::new(InMemoryPaymentMethodGateway::with_methods(vec![cash]));
    let service = PaymentMethodService::new(gateway.clone(), Arc::new(InMemoryEventPublisher::new()));

    let mut edit = service.open_edit(9).await.unwrap();
    assert_eq!(edit.method(), Some("cash"));
    edit.edit_field("phone_number", "08999000111").unwrap();
    assert!(service.submit(&mut edit).await.unwrap().is_accepted());

    let saved = gateway.methods().await;
    assert_eq!(saved[0].method, "cash");
    assert_eq!(saved[0].field("phone_number"), Some("08999000111"));
}

#[tokio::test]
async fn test_open_edit_unknown_id() {
    let h = harness();
    assert_eq!(h.service.open_edit(77).await.unwrap_err(), ServiceError::NotFound(77));
}

#[tokio::test]
async fn test_selection_from_saved_methods() {
    let h = harness();
    let mut form = bank_form("1234567890");
    h.service.submit(&mut form).await.unwrap();

    let mut selection = h.service.selection().await.unwrap();
    assert!(!selection.is_valid());
    let id = selection.available()[0].id;
    selection.toggle(id).unwrap();
    assert_eq!(selection.selected_method_names(), vec!["bank_transfer"]);
}
