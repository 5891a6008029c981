use crate::ast::{
    ast::{BinaryOperator, Expr, Stmt},
    types::TypeAnnotation,
};
use crate::errors::errors::ErrorImpl;
use crate::types::{
    literals::LiteralValue,
    types::{DimSpec, Mutability, Type},
};

#[test]
fn test_resolve_builtin_annotations() {
    assert_eq!(TypeAnnotation::new("i32").resolve(), Ok(Type::I32));
    assert_eq!(TypeAnnotation::new("f64").resolve(), Ok(Type::F64));
    assert_eq!(TypeAnnotation::new("string").resolve(), Ok(Type::String));
    assert_eq!(TypeAnnotation::new(" bool ").resolve(), Ok(Type::Bool));
}

#[test]
fn test_resolve_array_annotations() {
    assert_eq!(
        TypeAnnotation::new("[3]i32").resolve(),
        Ok(Type::concrete_array(Type::I32, vec![DimSpec::Fixed(3)]))
    );
    assert_eq!(
        TypeAnnotation::new("[_][4]f64").resolve(),
        Ok(Type::concrete_array(
            Type::F64,
            vec![DimSpec::Inferred, DimSpec::Fixed(4)]
        ))
    );
}

#[test]
fn test_resolve_unknown_type() {
    assert_eq!(
        TypeAnnotation::new("u8").resolve(),
        Err(ErrorImpl::UnknownType {
            type_: "u8".to_string()
        })
    );
    assert_eq!(
        TypeAnnotation::new("[2]number").resolve(),
        Err(ErrorImpl::UnknownType {
            type_: "number".to_string()
        })
    );
    // comptime types cannot be spelled
    assert!(matches!(
        TypeAnnotation::new("comptime_int").resolve(),
        Err(ErrorImpl::UnknownType { .. })
    ));
}

#[test]
fn test_resolve_malformed_annotations() {
    for text in ["[3", "[x]i32", "[]i32", "[3]void", "i32[3]"] {
        assert!(
            matches!(
                TypeAnnotation::new(text).resolve(),
                Err(ErrorImpl::InvalidTypeAnnotation { .. })
            ),
            "{} should be rejected",
            text
        );
    }
}

#[test]
fn test_display_binary_and_conversion() {
    let sum = Expr::binary(Expr::int(10), BinaryOperator::Add, Expr::float_text("3.14", 3.14));
    assert_eq!(sum.to_string(), "10 + 3.14");
    assert_eq!(sum.to_conversion(Type::I32), "(10 + 3.14):i32");
    assert_eq!(Expr::float(2.0).to_conversion("i32"), "2.0:i32");

    let nested = Expr::binary(sum, BinaryOperator::Mul, Expr::symbol("x"));
    assert_eq!(nested.to_string(), "(10 + 3.14) * x");
}

#[test]
fn test_display_statements() {
    assert_eq!(
        Stmt::val_typed("y", "i32", Expr::int(1)).to_string(),
        "val y: i32 = 1"
    );
    assert_eq!(
        Stmt::undef(Mutability::Mutable, "z", Some("i64")).to_string(),
        "mut z: i64 = undef"
    );
    assert_eq!(
        Expr::block(vec![Stmt::val("a", Expr::int(2)), Stmt::assign(Expr::symbol("a"))])
            .to_string(),
        "{ val a = 2; assign a }"
    );
    assert_eq!(
        Expr::call("f", vec![Expr::int(1), Expr::float(2.0)]).to_string(),
        "f(1, 2.0)"
    );
    assert_eq!(Expr::array(vec![Expr::int(1), Expr::int(2)]).to_string(), "[1, 2]");
}

#[test]
fn test_literal_value() {
    assert_eq!(Expr::int(5).literal_value(), Some(LiteralValue::Int(5)));
    assert_eq!(
        Expr::neg(Expr::int(2147483649)).literal_value(),
        Some(LiteralValue::Int(-2147483649))
    );
    assert_eq!(Expr::float(1.5).literal_value(), Some(LiteralValue::Float(1.5)));
    assert_eq!(Expr::symbol("x").literal_value(), None);
    assert_eq!(
        Expr::binary(Expr::int(1), BinaryOperator::Add, Expr::int(2)).literal_value(),
        None
    );
}
