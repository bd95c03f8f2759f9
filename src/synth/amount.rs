//! Amount sampling for synthetic transactions.

use rand::Rng;
use rand::rngs::StdRng;

use crate::config::AmountSpec;

/// Sample a signed amount from `spec`, rounded to `ndigits` decimal places.
pub fn sample(spec: &AmountSpec, ndigits: u32, rng: &mut StdRng) -> f64 {
    let magnitude = rng.random_range(spec.low..=spec.high);
    let factor = 10f64.powi(ndigits as i32);
    (f64::from(spec.sign) * magnitude * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_expense_sign_and_bounds() {
        let spec = AmountSpec::expense(8.0, 120.0);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let amount = sample(&spec, 2, &mut rng);
            assert!(amount <= -8.0 && amount >= -120.0, "amount {amount}");
        }
    }

    #[test]
    fn test_income_sign() {
        let spec = AmountSpec::income(800.0, 2500.0);
        let mut rng = StdRng::seed_from_u64(7);
        let amount = sample(&spec, 2, &mut rng);
        assert!(amount >= 800.0 && amount <= 2500.0);
    }

    #[test]
    fn test_rounding() {
        let spec = AmountSpec::expense(1.0, 80.0);
        let mut rng = StdRng::seed_from_u64(7);
        let amount = sample(&spec, 2, &mut rng);
        let scaled = amount * 100.0;
        assert!((scaled - scaled.round()).abs() < 1e-9);
    }
}
