/// extra principal - how a down payment and a monthly top-up change the payoff
use loan_amortization_rs::chrono::NaiveDate;
use loan_amortization_rs::{AmortizationEngine, Decimal, Loan, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loan = Loan::builder()
        .loan_type("Mortgage")
        .principal(Money::from_major(100_000))
        .years(Decimal::from(15))
        .rate(Rate::from_percentage(Decimal::from(5)))
        .down_payment(Money::from_major(10_000))
        .build()?;

    let engine = AmortizationEngine::default();
    let savings = engine.savings_from_additional_principal(&loan, Money::from_major(100))?;

    println!(
        "baseline: {} payments, {} interest",
        savings.baseline.number_of_payments, savings.baseline.total_interest
    );
    println!(
        "with $100 extra: {} payments, {} interest",
        savings.accelerated.number_of_payments, savings.accelerated.total_interest
    );
    println!(
        "saved {} in interest and {} payments",
        savings.interest_saved, savings.payments_saved
    );

    let first_payment = NaiveDate::from_ymd_opt(2025, 1, 1).ok_or("invalid first payment date")?;
    let schedule = engine
        .schedule(&loan.with_additional_principal(Money::from_major(100)))?
        .with_dates(first_payment)?;

    for payment in schedule.payments.iter().take(3) {
        println!(
            "#{} {:?}: interest {}, principal {}, balance {}",
            payment.payment_number,
            payment.due_date,
            payment.interest_portion,
            payment.principal_portion + payment.additional_principal,
            payment.ending_balance
        );
    }
    if let Some(payoff) = schedule.payoff_date() {
        println!("paid off on {payoff}");
    }

    Ok(())
}
