//! Property-based tests for lattice pricing invariants.
//!
//! These tests verify properties that must hold for any admissible inputs:
//! - European put-call parity
//! - American price never below European price
//! - Price non-decreasing in volatility
//! - Option lattices are strictly triangular

use binomial_options::prelude::*;
use proptest::prelude::*;

fn right() -> impl Strategy<Value = f64> {
    prop_oneof![Just(1.0), Just(-1.0)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_put_call_parity(
        t in 0.1f64..3.0,
        n in 10usize..150,
        s in 50.0f64..150.0,
        k in 50.0f64..150.0,
        r in 0.0f64..0.1,
        c in 0.0f64..0.08,
        sigma in 0.1f64..0.6,
    ) {
        let call = stock_option_european(t, n, s, r, c, sigma, k, 1.0).unwrap();
        let put = stock_option_european(t, n, s, r, c, sigma, k, -1.0).unwrap();
        let expected = s * (-c * t).exp() - k * (-r * t).exp();
        prop_assert!((call - put - expected).abs() < 1e-6);
    }

    #[test]
    fn prop_american_at_least_european(
        t in 0.1f64..2.0,
        n in 20usize..120,
        k in 60.0f64..140.0,
        r in 0.0f64..0.1,
        c in 0.0f64..0.08,
        sigma in 0.1f64..0.5,
        cp in right(),
    ) {
        let european = stock_option_european(t, n, 100.0, r, c, sigma, k, cp).unwrap();
        let (american, step) = stock_option_american(t, n, 100.0, r, c, sigma, k, cp).unwrap();
        prop_assert!(american >= european - 1e-9);
        prop_assert!(step <= n);
    }

    #[test]
    fn prop_american_futures_at_least_european(
        big_n in 5usize..80,
        frac in 0.1f64..1.0,
        k in 70.0f64..130.0,
        r in 0.0f64..0.1,
        sigma in 0.1f64..0.5,
        cp in right(),
    ) {
        let n = ((big_n as f64 * frac).ceil() as usize).clamp(1, big_n);
        let european = futures_option_european(1.0, n, big_n, 100.0, r, 0.01, sigma, k, cp).unwrap();
        let (american, step) =
            futures_option_american(1.0, n, big_n, 100.0, r, 0.01, sigma, k, cp).unwrap();
        prop_assert!(american >= european - 1e-9);
        prop_assert!(step <= n);
    }

    #[test]
    fn prop_monotone_in_volatility(
        t in 0.25f64..2.0,
        k in 80.0f64..120.0,
        r in 0.0f64..0.1,
        c in 0.0f64..0.08,
        sigma in 0.1f64..0.4,
        cp in right(),
    ) {
        let low = stock_option_european(t, 100, 100.0, r, c, sigma, k, cp).unwrap();
        let high = stock_option_european(t, 100, 100.0, r, c, sigma + 0.1, k, cp).unwrap();
        prop_assert!(high >= low - 1e-3);

        let (low, _) = stock_option_american(t, 100, 100.0, r, c, sigma, k, cp).unwrap();
        let (high, _) = stock_option_american(t, 100, 100.0, r, c, sigma + 0.1, k, cp).unwrap();
        prop_assert!(high >= low - 1e-3);
    }

    #[test]
    fn prop_lattices_are_triangular(n in 1usize..60, cp in right()) {
        let params = LatticeParams::derive(1.0, n, 0.3, 0.04, 0.01).unwrap();
        let prices = PriceLattice::build(100.0, &params).unwrap();
        let payoff = Payoff::new(100.0, OptionRight::from_sign(cp).unwrap());
        let option = backward_induction(
            prices.nodes(),
            n,
            &payoff,
            &params,
            &AmericanExercise::default(),
        )
        .unwrap();

        for lattice in [prices.nodes(), option.values()] {
            prop_assert_eq!(lattice.steps(), n);
            prop_assert_eq!(lattice.node_count(), (n + 1) * (n + 2) / 2);
            for (i, column) in lattice.columns().enumerate() {
                prop_assert_eq!(column.len(), i + 1);
                prop_assert!(lattice.get(i, i + 1).is_none());
            }
        }
    }
}
