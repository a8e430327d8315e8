//! End-to-end tests for the invoice draft service over in-memory ports

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use rust_decimal_macros::dec;

use core_kernel::{Money, PortError, TenantId};
use domain_billing::{
    compute_balance_due, compute_invoice_amounts, next_invoice_number, quarters_starting_in,
    resolve_quarter, BillingConfig, BillingError, BillingPeriod, InvoiceType, RentFrequency,
};
use test_utils::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Draft Service Tests
// ============================================================================

mod draft_tests {
    use super::*;

    #[tokio::test]
    async fn test_quarterly_draft_with_suggested_amount() {
        init_tracing();
        let store = InMemoryBillingStore::new();
        let tenancy = TenancyFixtures::abc_ltd();
        store.add_tenancy(tenancy.clone()).await;

        let draft = store
            .draft_service()
            .draft(DraftRequestBuilder::new(tenancy.tenant_id).build())
            .await
            .unwrap();

        assert_eq!(draft.invoice_number(), "12/ABC/RI/001");
        assert_eq!(draft.property_id, tenancy.property_id);
        assert_eq!(draft.period.start, date(2025, 3, 25));
        assert_eq!(draft.period.end, date(2025, 6, 23));
        assert_money_eq(&draft.amounts.net_amount, dec!(3000));
        assert_money_eq(&draft.amounts.vat_amount, dec!(600));
        assert_money_eq(&draft.amounts.total_amount, dec!(3600));
        assert_money_eq(&draft.amounts.prorated_daily_rate, dec!(82.19));
        assert_money_eq(&draft.amounts.prorated_period_total, dec!(7397.26));
        assert_money_eq(&draft.balance_due, dec!(3600));
        assert_eq!(draft.due_date, date(2025, 4, 19));
        assert_eq!(
            draft.notes,
            "Period 25/03/2025 to 23/06/2025 (90 days). Daily rate £82.19, prorated total £7,397.26."
        );
        assert_amounts_consistent(&draft.amounts);
    }

    #[tokio::test]
    async fn test_draft_continues_history_and_carries_arrears() {
        let store = InMemoryBillingStore::new();
        let tenancy = TenancyFixtures::abc_ltd();
        store.add_tenancy(tenancy.clone()).await;
        store
            .set_monetary_state(tenancy.tenant_id, TenancyFixtures::in_arrears())
            .await;
        for number in NumberFixtures::abc_rental_history() {
            store
                .record_issued(tenancy.property_id, tenancy.tenant_id, InvoiceType::Rental, number)
                .await;
        }

        let draft = store
            .draft_service()
            .draft(DraftRequestBuilder::new(tenancy.tenant_id).build())
            .await
            .unwrap();

        assert_eq!(draft.invoice_number(), "12/ABC/RI/003");
        assert_money_eq(&draft.balance_due, dec!(3850));
    }

    #[tokio::test]
    async fn test_net_amount_override() {
        let store = InMemoryBillingStore::new();
        let tenancy = TenancyFixtures::abc_ltd();
        store.add_tenancy(tenancy.clone()).await;
        store
            .set_monetary_state(
                tenancy.tenant_id,
                MonetaryStateBuilder::new()
                    .payment_made(Money::new(dec!(1500)))
                    .build(),
            )
            .await;

        let request = DraftRequestBuilder::new(tenancy.tenant_id)
            .net_amount(MoneyFixtures::net_1000())
            .build();
        let draft = store.draft_service().draft(request).await.unwrap();

        assert_money_eq(&draft.amounts.total_amount, dec!(1200));
        assert_money_eq(&draft.balance_due, dec!(-300));
        assert!(draft.is_credit());
    }

    #[tokio::test]
    async fn test_period_start_snaps_to_quarter() {
        let store = InMemoryBillingStore::new();
        let tenancy = TenancyFixtures::abc_ltd();
        store.add_tenancy(tenancy.clone()).await;

        let request = DraftRequestBuilder::new(tenancy.tenant_id)
            .period_start(DateFixtures::new_year_2026())
            .build();
        let draft = store.draft_service().draft(request).await.unwrap();

        assert_eq!(draft.period.start, DateFixtures::christmas_2025());
        assert_eq!(draft.period.end, date(2026, 3, 24));
    }

    #[tokio::test]
    async fn test_monthly_tenancy() {
        let store = InMemoryBillingStore::new();
        let tenancy = TenancyBuilder::new()
            .with_address("Flat 3, Mill Lane")
            .with_tenant_name("Zoë Smith")
            .with_annual_rent(Money::new(dec!(9000)))
            .monthly()
            .build();
        store.add_tenancy(tenancy.clone()).await;

        let request = DraftRequestBuilder::new(tenancy.tenant_id)
            .invoice_type(InvoiceType::ServiceCharge)
            .period_start(date(2025, 1, 31))
            .build();
        let draft = store.draft_service().draft(request).await.unwrap();

        assert_eq!(draft.invoice_number(), "FL/ZOS/SC/001");
        assert_eq!(draft.period.end, date(2025, 2, 27));
        assert_eq!(draft.amounts.days_in_period, 27);
        assert_money_eq(&draft.amounts.net_amount, dec!(750));
    }

    #[tokio::test]
    async fn test_saved_drafts_advance_the_sequence() {
        let store = InMemoryBillingStore::new();
        let tenancy = TenancyFixtures::abc_ltd();
        store.add_tenancy(tenancy.clone()).await;
        let service = store.draft_service();

        let mut numbers = Vec::new();
        for _ in 0..3 {
            let draft = service
                .draft(DraftRequestBuilder::new(tenancy.tenant_id).build())
                .await
                .unwrap();
            store.save_draft(&draft).await;
            numbers.push(draft.invoice_number().to_string());
        }

        assert_eq!(numbers, ["12/ABC/RI/001", "12/ABC/RI/002", "12/ABC/RI/003"]);
    }

    #[tokio::test]
    async fn test_invoice_types_have_separate_sequences() {
        let store = InMemoryBillingStore::new();
        let tenancy = TenancyFixtures::abc_ltd();
        store.add_tenancy(tenancy.clone()).await;
        store
            .record_issued(tenancy.property_id, tenancy.tenant_id, InvoiceType::Rental, "12/ABC/RI/007")
            .await;

        let request = DraftRequestBuilder::new(tenancy.tenant_id)
            .invoice_type(InvoiceType::Insurance)
            .build();
        let draft = store.draft_service().draft(request).await.unwrap();

        assert_eq!(draft.invoice_number(), "12/ABC/IN/001");
    }

    #[tokio::test]
    async fn test_configured_payment_terms() {
        let store = InMemoryBillingStore::new();
        let tenancy = TenancyFixtures::abc_ltd();
        store.add_tenancy(tenancy.clone()).await;

        let config = BillingConfig::from_toml("payment_terms_days = 14").unwrap();
        let service = store.draft_service().with_config(config);
        let draft = service
            .draft(DraftRequestBuilder::new(tenancy.tenant_id).build())
            .await
            .unwrap();

        assert_eq!(service.config().payment_terms_days, 14);
        assert_eq!(draft.due_date, date(2025, 4, 3));
    }
}

// ============================================================================
// Error Tests
// ============================================================================

mod error_tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_tenant() {
        let store = InMemoryBillingStore::new();
        let err = store
            .draft_service()
            .draft(DraftRequestBuilder::new(TenantId::new()).build())
            .await
            .unwrap_err();

        assert!(matches!(err, BillingError::Port(ref port) if port.is_not_found()));
    }

    #[tokio::test]
    async fn test_unavailable_backend_is_transient() {
        let store = InMemoryBillingStore::new();
        let tenancy = TenancyFixtures::abc_ltd();
        store.add_tenancy(tenancy.clone()).await;
        store.set_unavailable(true);

        let err = store
            .draft_service()
            .draft(DraftRequestBuilder::new(tenancy.tenant_id).build())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BillingError::Port(PortError::ServiceUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_negative_override_rejected() {
        let store = InMemoryBillingStore::new();
        let tenancy = TenancyFixtures::abc_ltd();
        store.add_tenancy(tenancy.clone()).await;

        let request = DraftRequestBuilder::new(tenancy.tenant_id)
            .net_amount(Money::new(dec!(-10)))
            .build();
        let err = store.draft_service().draft(request).await.unwrap_err();

        assert_eq!(err.field(), Some("net_amount"));
    }

    #[tokio::test]
    async fn test_negative_rent_on_record_rejected() {
        let store = InMemoryBillingStore::new();
        let tenancy = TenancyBuilder::new()
            .with_annual_rent(Money::new(dec!(-1)))
            .build();
        store.add_tenancy(tenancy.clone()).await;

        let err = store
            .draft_service()
            .draft(DraftRequestBuilder::new(tenancy.tenant_id).build())
            .await
            .unwrap_err();

        assert_eq!(err.field(), Some("annual_rent"));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn resolved_quarters_tile_the_calendar(date in date_strategy()) {
        let period = resolve_quarter(date);
        prop_assert!(period.contains(date));

        let quarters = quarters_starting_in(period.start.year());
        assert_contiguous_quarters(&quarters);
        prop_assert!(quarters.contains(&period));
    }

    #[test]
    fn generated_numbers_are_fresh_and_canonical(
        address in name_strategy(),
        tenant in name_strategy(),
        invoice_type in invoice_type_strategy(),
        rounds in 1usize..20,
    ) {
        let mut issued: Vec<String> = Vec::new();
        for expected in 1..=rounds {
            let identity = next_invoice_number(&address, &tenant, invoice_type, &issued).unwrap();
            let parsed = assert_canonical_number(identity.as_str());
            prop_assert_eq!(parsed.sequence as usize, expected);
            prop_assert!(!issued.contains(&identity.formatted));
            issued.push(identity.formatted);
        }
    }

    #[test]
    fn amounts_are_consistent(
        terms in rent_terms_strategy(),
        start in date_strategy(),
        net in non_negative_money_strategy(),
        state in monetary_state_strategy(),
    ) {
        let period = BillingPeriod::for_frequency(terms.frequency, start).unwrap();
        let amounts = compute_invoice_amounts(&terms, &period, net).unwrap();
        assert_amounts_consistent(&amounts);

        let balance = compute_balance_due(amounts.total_amount, &state).unwrap();
        prop_assert_eq!(
            balance,
            state.previous_balance + amounts.total_amount - state.payment_made - state.credit_note_amount
        );
        if terms.frequency == RentFrequency::Quarterly {
            prop_assert!((86..=96).contains(&amounts.days_in_period));
        }
    }
}
