use loan_amortization_rs::{AmortizationEngine, Decimal, Loan, Money, Rate};
use proptest::prelude::*;

fn loan_strategy() -> impl Strategy<Value = Loan> {
    (
        100_000i64..=50_000_000,
        1u32..=30,
        0u32..=1_500,
        0i64..=50,
        0i64..=2_000,
    )
        .prop_map(|(principal_cents, years, rate_bps, down_pct, extra)| {
            let principal = Money::from_minor(principal_cents);
            let down_payment = (principal * Decimal::from(down_pct) / Decimal::ONE_HUNDRED).round_cents();
            Loan::new("Generated", principal, Decimal::from(years), Rate::from_bps(rate_bps))
                .with_down_payment(down_payment)
                .with_additional_principal(Money::from_major(extra))
        })
}

proptest! {
    #[test]
    fn round_cents_is_idempotent(mantissa in any::<i64>(), scale in 0u32..=12) {
        let amount = Money::from_decimal(Decimal::new(mantissa, scale));
        let once = amount.round_cents();
        prop_assert_eq!(once.round_cents(), once);
    }

    #[test]
    fn zero_rate_payment_is_straight_line(loan in loan_strategy()) {
        let loan = Loan { rate: Rate::ZERO, ..loan };
        let expected = (loan.financed_principal() / loan.scheduled_payments()).round_cents();
        prop_assert_eq!(AmortizationEngine::default().payment_amount(&loan).unwrap(), expected);
    }

    #[test]
    fn interest_is_linear_in_principal(loan in loan_strategy()) {
        let rate = loan.rate.per_period(loan.payments_per_period).unwrap();
        let single = loan.principal.apply_rate(rate);
        let doubled = (loan.principal * Decimal::TWO).apply_rate(rate);
        // exact up to the last representable digit
        prop_assert!((doubled - single * Decimal::TWO).abs() <= Money::from_decimal(Decimal::new(1, 20)));

        let engine = AmortizationEngine::default();
        let rounded_single = engine.interest_amount_paid(&loan).unwrap();
        let rounded_doubled = engine
            .interest_amount_paid(&loan.with_principal(loan.principal * Decimal::TWO))
            .unwrap();
        prop_assert!((rounded_doubled - rounded_single * Decimal::TWO).abs() <= Money::CENT);
    }

    #[test]
    fn extra_principal_never_lengthens_the_loan(loan in loan_strategy(), bump in 1i64..=1_000) {
        let engine = AmortizationEngine::default();
        let base = engine.life_of_loan_amounts(&loan).unwrap();
        let faster = engine
            .life_of_loan_amounts(&loan.clone().with_additional_principal(loan.additional_principal + Money::from_major(bump)))
            .unwrap();
        prop_assert!(faster.number_of_payments <= base.number_of_payments);
    }

    #[test]
    fn down_payment_matches_smaller_principal(loan in loan_strategy()) {
        let engine = AmortizationEngine::default();
        let reduced = loan
            .with_principal(loan.financed_principal())
            .with_down_payment(Money::ZERO);
        prop_assert_eq!(
            engine.life_of_loan_amounts(&loan).unwrap(),
            engine.life_of_loan_amounts(&reduced).unwrap()
        );
    }

    #[test]
    fn schedule_agrees_with_life_of_loan(loan in loan_strategy()) {
        let engine = AmortizationEngine::default();
        let schedule = engine.schedule(&loan).unwrap();
        prop_assert_eq!(schedule.life_of_loan(), engine.life_of_loan_amounts(&loan).unwrap());
        prop_assert!(schedule.payments.last().map(|p| p.is_final).unwrap_or(false));
    }
}
