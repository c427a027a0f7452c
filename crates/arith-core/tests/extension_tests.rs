//! Extending the engine from outside the crate, the way a datatype module does

use arith_core::operations::{ADD, DETERMINANT, MUL, NEGATE, TRANSPOSE};
use arith_core::{
    Arithmetic, DispatchKey, Error, IdentityEntry, Kind, OperationSpec, Registry, Value,
};
use std::sync::Arc;

/// Minimal 2x2 integer matrix payload
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix2([[i64; 2]; 2]);

impl Matrix2 {
    const ZERO: Matrix2 = Matrix2([[0, 0], [0, 0]]);
    const IDENTITY: Matrix2 = Matrix2([[1, 0], [0, 1]]);

    fn zip(self, other: Matrix2, f: impl Fn(i64, i64) -> i64) -> Matrix2 {
        let mut out = Matrix2::ZERO;
        for i in 0..2 {
            for j in 0..2 {
                out.0[i][j] = f(self.0[i][j], other.0[i][j]);
            }
        }
        out
    }

    fn matmul(self, other: Matrix2) -> Matrix2 {
        let mut out = Matrix2::ZERO;
        for i in 0..2 {
            for j in 0..2 {
                out.0[i][j] = (0..2).map(|k| self.0[i][k] * other.0[k][j]).sum();
            }
        }
        out
    }
}

fn matrix_kind() -> Kind {
    Kind::custom("matrix")
}

fn matrix(value: &Value) -> Matrix2 {
    match value {
        Value::Object(o) => *o.downcast_ref::<Matrix2>().unwrap(),
        other => panic!("not a matrix: {other}"),
    }
}

fn text(value: &Value) -> &str {
    match value {
        Value::Text(s) => s,
        other => panic!("not text: {other}"),
    }
}

fn m(rows: [[i64; 2]; 2]) -> Value {
    Value::object(Matrix2(rows))
}

/// Registry with integer add/mul/negate and a matrix module installed
fn setup() -> Arithmetic {
    let registry = Registry::new();

    registry
        .register_identity(
            Kind::Integer,
            IdentityEntry::constants(Value::Integer(0), Value::Integer(1)),
        )
        .unwrap();
    registry
        .register_method(ADD, [Kind::Integer, Kind::Integer], |_, args| {
            Ok(Value::Integer(args[0].as_integer().unwrap() + args[1].as_integer().unwrap()))
        })
        .unwrap();

    registry
        .register_kind(matrix_kind(), |v| {
            matches!(v, Value::Object(o) if o.is::<Matrix2>())
        })
        .unwrap();
    registry
        .register_identity(
            matrix_kind(),
            IdentityEntry::new()
                .with_zero(|v| matrix(v) == Matrix2::ZERO)
                .with_one(|v| matrix(v) == Matrix2::IDENTITY)
                .with_zero_like(|_| Ok(Value::object(Matrix2::ZERO)))
                .with_one_like(|_| Ok(Value::object(Matrix2::IDENTITY))),
        )
        .unwrap();
    registry
        .register_method(ADD, [matrix_kind(), matrix_kind()], |_, args| {
            Ok(Value::object(matrix(&args[0]).zip(matrix(&args[1]), |a, b| a + b)))
        })
        .unwrap();
    registry
        .register_method(MUL, [matrix_kind(), matrix_kind()], |_, args| {
            Ok(Value::object(matrix(&args[0]).matmul(matrix(&args[1]))))
        })
        .unwrap();
    // Mixed-kind method: scalar times matrix
    registry
        .register_method(MUL, [Kind::Integer, matrix_kind()], |_, args| {
            let k = args[0].as_integer().unwrap();
            let a = matrix(&args[1]);
            Ok(Value::object(a.zip(a, |x, _| k * x)))
        })
        .unwrap();
    registry
        .register_method(NEGATE, [matrix_kind()], |_, args| {
            let a = matrix(&args[0]);
            Ok(Value::object(a.zip(a, |x, _| -x)))
        })
        .unwrap();
    registry
        .register_method(TRANSPOSE, [matrix_kind()], |_, args| {
            let [[a, b], [c, d]] = matrix(&args[0]).0;
            Ok(m([[a, c], [b, d]]))
        })
        .unwrap();
    registry
        .register_method(DETERMINANT, [matrix_kind()], |_, args| {
            let [[a, b], [c, d]] = matrix(&args[0]).0;
            Ok(Value::Integer(a * d - b * c))
        })
        .unwrap();

    Arithmetic::new(Arc::new(registry))
}

#[test]
fn test_custom_kind_dispatch() {
    let arith = setup();
    let a = m([[1, 2], [3, 4]]);
    let b = m([[0, 1], [1, 0]]);

    assert_eq!(arith.kind_of(&a).unwrap(), matrix_kind());
    assert_eq!(matrix(&arith.add(&[a.clone(), b.clone()]).unwrap()), Matrix2([[1, 3], [4, 4]]));
    assert_eq!(matrix(&arith.mul(&[a.clone(), b.clone()]).unwrap()), Matrix2([[2, 1], [4, 3]]));
    assert_eq!(matrix(&arith.transpose(&a).unwrap()), Matrix2([[1, 3], [2, 4]]));
    assert_eq!(arith.determinant(&a).unwrap(), Value::Integer(-2));
}

#[test]
fn test_mixed_kind_methods_are_ordered() {
    let arith = setup();
    let a = m([[1, 2], [3, 4]]);
    assert_eq!(
        matrix(&arith.mul(&[Value::Integer(2), a.clone()]).unwrap()),
        Matrix2([[2, 4], [6, 8]])
    );
    // Only (integer, matrix) was registered
    match arith.mul(&[a, Value::Integer(2)]) {
        Err(Error::NoApplicableMethod { operation, kinds }) => {
            assert_eq!(operation, "mul");
            assert_eq!(kinds, DispatchKey::from([matrix_kind(), Kind::Integer]));
        }
        other => panic!("expected NoApplicableMethod, got {other:?}"),
    }
}

#[test]
fn test_custom_identities_short_circuit() {
    let arith = setup();
    let a = m([[1, 2], [3, 4]]);
    let zero = arith.zero_like(&a).unwrap();
    let one = arith.one_like(&a).unwrap();

    assert!(arith.is_zero(&zero).unwrap());
    assert!(arith.is_one(&one).unwrap());
    assert!(!arith.is_zero(&a).unwrap());

    // Matrix identities pass through integers too
    assert_eq!(arith.add(&[zero.clone(), Value::Integer(5)]).unwrap(), Value::Integer(5));
    assert_eq!(arith.mul(&[Value::Integer(5), one.clone()]).unwrap(), Value::Integer(5));
    // And the integer identity passes matrices through without a method
    assert_eq!(arith.sub(&[a.clone(), Value::Integer(0)]).unwrap(), a);
    // 0 - a is negate(a)
    assert_eq!(
        matrix(&arith.sub(&[Value::Integer(0), a.clone()]).unwrap()),
        Matrix2([[-1, -2], [-3, -4]])
    );
    // negate of the zero matrix is a fixed point
    assert_eq!(arith.negate(&zero).unwrap(), zero);
}

#[test]
fn test_unrecognised_objects_are_unclassifiable() {
    let arith = setup();
    let opaque = Value::object(String::from("not a matrix"));
    assert_eq!(arith.kind_of(&opaque).unwrap(), Kind::Native);
    match arith.add(&[Value::Integer(3), opaque.clone()]) {
        Err(Error::UnclassifiableOperand { operation, position, .. }) => {
            assert_eq!(operation, "add");
            assert_eq!(position, 1);
        }
        other => panic!("expected UnclassifiableOperand, got {other:?}"),
    }
    // The identity tier still answers
    assert_eq!(arith.add(&[Value::Integer(0), opaque.clone()]).unwrap(), opaque);
}

#[test]
fn test_registration_makes_calls_succeed() {
    let arith = Arithmetic::new(Arc::new(Registry::new()));
    let (x, y) = (Value::from("ab"), Value::from("cd"));
    assert!(matches!(
        arith.add(&[x.clone(), y.clone()]),
        Err(Error::NoApplicableMethod { .. })
    ));

    arith
        .registry()
        .register_method(ADD, [Kind::Text, Kind::Text], |_, args| {
            Ok(Value::Text(format!("{}{}", text(&args[0]), text(&args[1]))))
        })
        .unwrap();
    assert_eq!(arith.add(&[x.clone(), y]).unwrap(), Value::from("abcd"));
    // A different tuple still fails
    assert!(matches!(
        arith.add(&[x, Value::symbol("s")]),
        Err(Error::NoApplicableMethod { .. })
    ));
}

#[test]
fn test_most_specific_kind_wins() {
    let registry = Registry::new();
    let general = Kind::custom("native-number");
    let integral = Kind::custom("native-integral");
    registry.declare_kind(general.clone(), None).unwrap();
    registry
        .declare_kind(integral.clone(), Some(general.clone()))
        .unwrap();

    registry
        .register_kind(integral.clone(), |v| {
            matches!(v, Value::Object(o) if o.is::<u16>())
        })
        .unwrap();
    // Registered later, but less specific
    registry
        .register_kind(general.clone(), |v| {
            matches!(v, Value::Object(o) if o.is::<u16>() || o.is::<f32>())
        })
        .unwrap();

    assert_eq!(registry.kind_of(&Value::object(7u16)).unwrap(), integral);
    assert_eq!(registry.kind_of(&Value::object(0.5f32)).unwrap(), general);
    assert!(registry.is_kind_compatible(&integral, &general).unwrap());

    // A method on the general kind is not inherited; dispatch keys are exact
    let arith = Arithmetic::new(Arc::new(registry));
    arith
        .registry()
        .register_method(NEGATE, [general.clone()], |_, _| Ok(Value::symbol("negated")))
        .unwrap();
    assert!(arith.negate(&Value::object(0.5f32)).is_ok());
    assert!(matches!(
        arith.negate(&Value::object(7u16)),
        Err(Error::NoApplicableMethod { .. })
    ));
}

#[test]
fn test_identity_entries_are_inherited() {
    let registry = Registry::new();
    let general = Kind::custom("ring");
    let specific = Kind::custom("small-ring");
    registry.declare_kind(general.clone(), None).unwrap();
    registry.declare_kind(specific.clone(), Some(general.clone())).unwrap();
    registry
        .register_kind(specific, |v| matches!(v, Value::Object(o) if o.is::<u8>()))
        .unwrap();
    registry
        .register_identity(
            general,
            IdentityEntry::new().with_zero(|v| {
                matches!(v, Value::Object(o) if o.downcast_ref::<u8>() == Some(&0))
            }),
        )
        .unwrap();

    assert!(registry.is_additive_identity(&Value::object(0u8)).unwrap());
    assert!(!registry.is_additive_identity(&Value::object(3u8)).unwrap());
    assert!(!registry.is_multiplicative_identity(&Value::object(1u8)).unwrap());
}

#[test]
fn test_user_defined_operation() {
    let registry = Registry::new();
    registry
        .define_operation(OperationSpec::binary("concat"))
        .unwrap();
    assert!(matches!(
        registry.define_operation(OperationSpec::binary("concat")),
        Err(Error::MalformedRegistration(_))
    ));
    registry
        .register_method("concat", [Kind::Text, Kind::Integer], |_, args| {
            Ok(Value::Text(format!("{}{}", text(&args[0]), args[1])))
        })
        .unwrap();

    let arith = Arithmetic::new(Arc::new(registry));
    assert_eq!(
        arith.call("concat", &[Value::from("v"), Value::Integer(2)]).unwrap(),
        Value::from("v2")
    );
    assert!(matches!(
        arith.call("concat", &[Value::from("v")]),
        Err(Error::ArityMismatch { .. })
    ));
    assert!(matches!(
        arith.call("frobnicate", &[]),
        Err(Error::UnknownOperation(_))
    ));
}
