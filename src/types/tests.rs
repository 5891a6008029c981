//! Unit tests for the type lattice, coercion rules and literal ranges.

use super::{
    coercion::{
        can_adapt, can_coerce, check_scalar_conversion, is_precision_loss, ConversionDenial,
        MaterializationError,
    },
    literals::{validate_literal_coercion, validate_literal_range, LiteralValue},
    types::{widen, ComptimeArrayType, ConcreteArrayType, ConstructionError, DimSpec, Type},
};

const CONCRETE_NUMERIC: [Type; 4] = [Type::I32, Type::I64, Type::F32, Type::F64];

fn scalar_types() -> Vec<Type> {
    vec![
        Type::I32,
        Type::I64,
        Type::F32,
        Type::F64,
        Type::Bool,
        Type::String,
        Type::Void,
        Type::ComptimeInt,
        Type::ComptimeFloat,
        Type::Unknown,
        Type::Uninitialized,
    ]
}

fn concrete_scalars() -> Vec<Type> {
    scalar_types().into_iter().filter(|t| t.is_concrete()).collect()
}

fn comptime_ints(dims: Vec<usize>) -> ComptimeArrayType {
    ComptimeArrayType::new(Type::ComptimeInt, dims).unwrap()
}

fn i32_array(dims: Vec<DimSpec>) -> ConcreteArrayType {
    ConcreteArrayType::new(Type::I32, dims).unwrap()
}

#[test]
fn test_identity_coercion() {
    let mut all = scalar_types();
    all.push(Type::concrete_array(Type::I64, vec![DimSpec::Fixed(2)]));
    all.push(Type::comptime_array(Type::ComptimeFloat, vec![2, 2]));

    for ty in all.iter() {
        assert!(can_coerce(ty, ty), "{} should coerce to itself", ty);
    }
}

#[test]
fn test_comptime_int_coerces_to_every_numeric() {
    for target in CONCRETE_NUMERIC.iter() {
        assert!(can_coerce(&Type::ComptimeInt, target));
    }
}

#[test]
fn test_comptime_float_coerces_to_floats_only() {
    for target in CONCRETE_NUMERIC.iter() {
        assert_eq!(
            can_coerce(&Type::ComptimeFloat, target),
            target.is_float(),
            "comptime_float -> {}",
            target
        );
    }
}

#[test]
fn test_no_implicit_concrete_conversion() {
    for from in concrete_scalars() {
        for to in concrete_scalars() {
            if from != to {
                assert!(!can_coerce(&from, &to), "{} must not coerce to {}", from, to);
            }
        }
    }
    assert!(!can_coerce(&Type::I32, &Type::I64));
    assert!(!can_coerce(&Type::F32, &Type::F64));
}

#[test]
fn test_comptime_never_coerces_to_non_numeric() {
    for source in [Type::ComptimeInt, Type::ComptimeFloat] {
        assert!(!can_coerce(&source, &Type::Bool));
        assert!(!can_coerce(&source, &Type::String));
        assert!(!can_coerce(&source, &Type::Void));
    }
}

#[test]
fn test_precision_loss() {
    assert!(is_precision_loss(&Type::I64, &Type::I32));
    assert!(!is_precision_loss(&Type::I32, &Type::I64));
    assert!(is_precision_loss(&Type::F64, &Type::F32));
    assert!(!is_precision_loss(&Type::F32, &Type::F64));
    assert!(is_precision_loss(&Type::I64, &Type::F32));
    assert!(is_precision_loss(&Type::F64, &Type::I32));
    assert!(is_precision_loss(&Type::F32, &Type::I64));
    assert!(is_precision_loss(&Type::ComptimeFloat, &Type::I32));
    assert!(is_precision_loss(&Type::ComptimeFloat, &Type::I64));
    assert!(!is_precision_loss(&Type::ComptimeInt, &Type::I32));
    assert!(!is_precision_loss(&Type::I32, &Type::F64));
}

#[test]
fn test_can_adapt_allows_lossless_widening_only() {
    assert!(can_adapt(&Type::I32, &Type::I64));
    assert!(can_adapt(&Type::I32, &Type::F64));
    assert!(can_adapt(&Type::ComptimeInt, &Type::F32));
    assert!(!can_adapt(&Type::I64, &Type::I32));
    assert!(!can_adapt(&Type::F64, &Type::I64));
    assert!(!can_adapt(&Type::ComptimeFloat, &Type::I32));
    assert!(!can_adapt(&Type::Bool, &Type::I32));
}

#[test]
fn test_array_materialization_exact_or_inferred() {
    let literal = comptime_ints(vec![5]);

    assert!(!literal.can_materialize_to(&i32_array(vec![DimSpec::Fixed(3)])));
    assert!(literal.can_materialize_to(&i32_array(vec![DimSpec::Inferred])));
    assert!(literal.can_materialize_to(&i32_array(vec![DimSpec::Fixed(5)])));
}

#[test]
fn test_array_materialization_fills_inferred_dims() {
    let literal = comptime_ints(vec![2, 3]);
    let target = i32_array(vec![DimSpec::Inferred, DimSpec::Fixed(3)]);

    assert_eq!(
        literal.materialize(&target),
        Ok(Type::concrete_array(
            Type::I32,
            vec![DimSpec::Fixed(2), DimSpec::Fixed(3)]
        ))
    );
}

#[test]
fn test_array_dimension_count_mismatch_ignores_total() {
    // 2x3 and 6 hold the same number of elements but are not interchangeable
    let literal = comptime_ints(vec![2, 3]);
    let flat = i32_array(vec![DimSpec::Fixed(6)]);

    assert_eq!(
        literal.materialize(&flat),
        Err(MaterializationError::DimensionCount {
            expected: 1,
            actual: 2
        })
    );
    assert!(!can_coerce(
        &Type::ComptimeArray(literal),
        &Type::ConcreteArray(flat)
    ));
}

#[test]
fn test_array_materialization_reports_dimension() {
    let literal = comptime_ints(vec![2, 4]);
    let target = i32_array(vec![DimSpec::Fixed(2), DimSpec::Fixed(3)]);

    assert_eq!(
        literal.materialize(&target),
        Err(MaterializationError::DimensionSize {
            dimension: 1,
            expected: 3,
            actual: 4
        })
    );
}

#[test]
fn test_comptime_float_array_does_not_materialize_to_ints() {
    let literal = ComptimeArrayType::new(Type::ComptimeFloat, vec![3]).unwrap();

    assert!(!literal.can_materialize_to(&i32_array(vec![DimSpec::Inferred])));
    assert!(literal.can_materialize_to(
        &ConcreteArrayType::new(Type::F64, vec![DimSpec::Inferred]).unwrap()
    ));
}

#[test]
fn test_comptime_array_to_comptime_array_is_exact() {
    let a = Type::comptime_array(Type::ComptimeInt, vec![3]);
    let b = Type::comptime_array(Type::ComptimeInt, vec![4]);
    let c = Type::comptime_array(Type::ComptimeFloat, vec![3]);

    assert!(can_coerce(&a, &a.clone()));
    assert!(!can_coerce(&a, &b));
    assert!(!can_coerce(&a, &c));
}

#[test]
fn test_array_never_coerces_to_scalar() {
    let literal = Type::comptime_array(Type::ComptimeInt, vec![1]);
    let concrete = Type::concrete_array(Type::I32, vec![DimSpec::Fixed(1)]);

    for target in scalar_types() {
        assert!(!can_coerce(&literal, &target));
        assert!(!can_coerce(&concrete, &target));
    }
}

#[test]
fn test_concrete_array_fits_inferred_annotation() {
    let value = Type::concrete_array(Type::I32, vec![DimSpec::Fixed(3)]);
    let inferred = Type::concrete_array(Type::I32, vec![DimSpec::Inferred]);
    let wrong_element = Type::concrete_array(Type::I64, vec![DimSpec::Inferred]);

    assert!(can_coerce(&value, &inferred));
    assert!(!can_coerce(&value, &wrong_element));
}

#[test]
fn test_construction_rejects_bad_elements() {
    assert_eq!(
        ConcreteArrayType::new(Type::ComptimeInt, vec![DimSpec::Fixed(1)]),
        Err(ConstructionError::InvalidConcreteElement {
            element: "comptime_int".to_string()
        })
    );
    assert_eq!(
        ComptimeArrayType::new(Type::I32, vec![1]),
        Err(ConstructionError::InvalidComptimeElement {
            element: "i32".to_string()
        })
    );
    assert_eq!(
        ComptimeArrayType::new(Type::ComptimeInt, vec![]),
        Err(ConstructionError::EmptyDimensions)
    );
}

#[test]
#[should_panic(expected = "concrete array element")]
fn test_concrete_array_of_arrays_panics() {
    let inner = Type::concrete_array(Type::I32, vec![DimSpec::Fixed(2)]);
    Type::concrete_array(inner, vec![DimSpec::Fixed(2)]);
}

#[test]
#[should_panic(expected = "comptime array element")]
fn test_comptime_array_of_concrete_panics() {
    Type::comptime_array(Type::F64, vec![2]);
}

#[test]
fn test_classification() {
    assert!(Type::ComptimeInt.is_numeric() && Type::ComptimeInt.is_integer());
    assert!(Type::ComptimeFloat.is_float() && Type::ComptimeFloat.is_comptime());
    assert!(Type::I64.is_concrete() && !Type::I64.is_comptime());
    assert!(!Type::Bool.is_numeric());
    assert!(!Type::Void.is_concrete());
    assert!(!Type::Unknown.is_concrete() && !Type::Unknown.is_comptime());
    assert!(Type::comptime_array(Type::ComptimeInt, vec![2]).is_comptime());
    assert!(Type::concrete_array(Type::Bool, vec![DimSpec::Fixed(2)]).is_concrete());
}

#[test]
fn test_widen() {
    assert_eq!(widen(&Type::I32, &Type::I64), Some(Type::I64));
    assert_eq!(widen(&Type::F32, &Type::F64), Some(Type::F64));
    assert_eq!(widen(&Type::I64, &Type::F32), Some(Type::F32));
    assert_eq!(widen(&Type::ComptimeInt, &Type::I32), Some(Type::I32));
    assert_eq!(
        widen(&Type::ComptimeInt, &Type::ComptimeFloat),
        Some(Type::ComptimeFloat)
    );
    assert_eq!(widen(&Type::I32, &Type::I32), Some(Type::I32));
    assert_eq!(widen(&Type::Bool, &Type::I32), None);
}

#[test]
fn test_literal_range_i32_boundary() {
    assert!(validate_literal_range(LiteralValue::Int(2147483647), &Type::I32, "2147483647").is_ok());
    assert!(validate_literal_range(LiteralValue::Int(-2147483648), &Type::I32, "-2147483648").is_ok());

    let error =
        validate_literal_range(LiteralValue::Int(2147483648), &Type::I32, "2147483648").unwrap_err();
    let message = error.to_string();
    assert!(message.contains("2147483648"));
    assert!(message.contains("[-2147483648, 2147483647]"));
    assert_eq!(error.type_name, "i32");
    assert_eq!(
        error.suggestion(),
        "use explicit conversion if truncation is intended: 2147483648:i32"
    );
}

#[test]
fn test_literal_range_i64_and_floats() {
    assert!(validate_literal_range(
        LiteralValue::Int(9223372036854775807),
        &Type::I64,
        "9223372036854775807"
    )
    .is_ok());
    assert!(validate_literal_range(
        LiteralValue::Int(9223372036854775808),
        &Type::I64,
        "9223372036854775808"
    )
    .is_err());
    assert!(validate_literal_range(LiteralValue::Float(1e39), &Type::F32, "1e39").is_err());
    assert!(validate_literal_range(LiteralValue::Float(1e39), &Type::F64, "1e39").is_ok());
    assert!(validate_literal_range(LiteralValue::Int(5), &Type::Bool, "5").is_ok());
}

#[test]
fn test_validate_literal_coercion() {
    assert!(validate_literal_coercion(
        LiteralValue::Int(300),
        &Type::ComptimeInt,
        &Type::I32,
        None
    )
    .is_ok());

    let message = validate_literal_coercion(
        LiteralValue::Int(9223372036854775807),
        &Type::ComptimeInt,
        &Type::I32,
        Some("9223372036854775807"),
    )
    .unwrap_err();
    assert!(message.contains("9223372036854775807:i32"));

    // concrete sources are not literals
    assert!(validate_literal_coercion(
        LiteralValue::Int(9223372036854775807),
        &Type::I64,
        &Type::I32,
        None
    )
    .is_ok());
}

#[test]
fn test_scalar_conversion_rules() {
    for from in CONCRETE_NUMERIC.iter() {
        for to in CONCRETE_NUMERIC.iter() {
            assert!(check_scalar_conversion(from, to).is_ok());
        }
    }
    assert!(check_scalar_conversion(&Type::ComptimeFloat, &Type::I32).is_ok());
    assert_eq!(
        check_scalar_conversion(&Type::I32, &Type::Bool),
        Err(ConversionDenial::ToBool)
    );
    assert_eq!(
        check_scalar_conversion(&Type::F64, &Type::String),
        Err(ConversionDenial::ToString)
    );
    assert_eq!(
        check_scalar_conversion(&Type::Bool, &Type::I32),
        Err(ConversionDenial::FromBool)
    );
    assert_eq!(
        check_scalar_conversion(&Type::String, &Type::F64),
        Err(ConversionDenial::FromString)
    );
    assert_eq!(
        check_scalar_conversion(&Type::Void, &Type::I32),
        Err(ConversionDenial::NotConvertible)
    );
}

#[test]
fn test_type_display() {
    assert_eq!(Type::ComptimeFloat.to_string(), "comptime_float");
    assert_eq!(
        Type::concrete_array(Type::I32, vec![DimSpec::Inferred, DimSpec::Fixed(4)]).to_string(),
        "[_][4]i32"
    );
    assert_eq!(
        Type::comptime_array(Type::ComptimeInt, vec![3]).to_string(),
        "[3]comptime_int"
    );
}
