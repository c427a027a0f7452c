//! Property-based tests for the identity laws and exact integer arithmetic

use arith_core::{Arithmetic, Registry, Value};
use proptest::prelude::*;
use std::sync::Arc;

fn arith() -> Arithmetic {
    let registry = Registry::new();
    arith_numbers::install(&registry).unwrap();
    Arithmetic::new(Arc::new(registry))
}

fn number() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => (-1_000_000i64..1_000_000).prop_map(Value::Integer),
        4 => (-1.0e6..1.0e6f64).prop_map(Value::Float),
        1 => prop::sample::select(vec![
            Value::Integer(0),
            Value::Integer(1),
            Value::Float(0.0),
            Value::Float(1.0),
        ]),
    ]
}

proptest! {
    #[test]
    fn prop_additive_identity(x in number()) {
        let arith = arith();
        let zero = Value::Integer(0);
        prop_assert_eq!(arith.add(&[x.clone(), zero.clone()]).unwrap(), x.clone());
        prop_assert_eq!(arith.add(&[zero.clone(), x.clone()]).unwrap(), x.clone());
        prop_assert_eq!(arith.sub(&[x.clone(), zero]).unwrap(), x);
    }

    #[test]
    fn prop_multiplicative_identity(x in number()) {
        let arith = arith();
        let one = Value::Integer(1);
        prop_assert_eq!(arith.mul(&[x.clone(), one.clone()]).unwrap(), x.clone());
        prop_assert_eq!(arith.mul(&[one.clone(), x.clone()]).unwrap(), x.clone());
        prop_assert_eq!(arith.div(&[x.clone(), one]).unwrap(), x);
    }

    #[test]
    fn prop_zero_minus_is_negate(x in number()) {
        let arith = arith();
        prop_assert_eq!(
            arith.sub(&[Value::Integer(0), x.clone()]).unwrap(),
            arith.negate(&x).unwrap()
        );
    }

    #[test]
    fn prop_integer_sum_is_exact(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
        let arith = arith();
        prop_assert_eq!(
            arith.add(&[Value::Integer(a), Value::Integer(b)]).unwrap(),
            Value::Integer(a + b)
        );
        prop_assert_eq!(
            arith.mul(&[Value::Integer(a), Value::Integer(b)]).unwrap(),
            Value::Integer(a * b)
        );
    }

    #[test]
    fn prop_quotient_remainder_reconstruct(
        a in any::<i32>(),
        b in any::<i32>().prop_filter("nonzero", |b| *b != 0),
    ) {
        let arith = arith();
        let (a, b) = (i64::from(a), i64::from(b));
        let int = |v: Value| v.as_integer().unwrap();
        let q = int(arith.quotient(&Value::Integer(a), &Value::Integer(b)).unwrap());
        let r = int(arith.remainder(&Value::Integer(a), &Value::Integer(b)).unwrap());
        prop_assert_eq!(q * b + r, a);

        let m = int(arith.modulo(&Value::Integer(a), &Value::Integer(b)).unwrap());
        prop_assert!(m == 0 || (m < 0) == (b < 0));
        prop_assert_eq!((a - m) % b, 0);
    }

    #[test]
    fn prop_sqrt_of_square_is_exact(n in 0i64..3_000_000) {
        let arith = arith();
        let square = arith.square(&Value::Integer(n)).unwrap();
        prop_assert_eq!(arith.sqrt(&square).unwrap(), Value::Integer(n));
    }
}
