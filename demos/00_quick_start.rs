/// quick start - payment and life-of-loan totals for a 30 year mortgage
use loan_amortization_rs::{AmortizationEngine, Decimal, Loan, LoanSummary, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // $200,000 over 30 years at 4%
    let loan = Loan::new(
        "Mortgage",
        Money::from_major(200_000),
        Decimal::from(30),
        Rate::from_percentage(Decimal::from(4)),
    );

    let engine = AmortizationEngine::default();
    println!("monthly payment: {}", engine.payment_amount(&loan)?);
    println!("first month interest: {}", engine.interest_amount_paid(&loan)?);

    let life = engine.life_of_loan_amounts(&loan)?;
    println!(
        "{} payments, {} total interest",
        life.number_of_payments, life.total_interest
    );

    println!("{}", LoanSummary::from_loan(&engine, &loan)?.to_json_pretty()?);

    Ok(())
}
