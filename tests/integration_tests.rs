//! End-to-end analysis of small programs.
//!
//! Each test builds a program tree the way a parser would hand it over and
//! checks the diagnostics and resolved types that come out.

use std::rc::Rc;

use analyzer::{
    ast::{
        ast::{BinaryOperator, Expr, Item, Program, Stmt},
        statements::FnDeclStmt,
    },
    errors::errors::{ErrorImpl, ErrorKind},
    format_error,
    type_checker::type_checker::{type_check, AnalyzerOptions},
    types::types::{DimSpec, Type},
    Span,
};

fn options() -> AnalyzerOptions {
    AnalyzerOptions::default().with_warn_unused(false)
}

fn program(stmts: Vec<Stmt>) -> Program {
    Program::new(stmts.into_iter().map(Item::from).collect())
}

fn ten_plus_pi() -> Expr {
    Expr::binary(Expr::int(10), BinaryOperator::Add, Expr::float_text("3.14", 3.14))
}

#[test]
fn test_comptime_value_without_annotation() {
    let (type_checker, diagnostics) = type_check(&program(vec![Stmt::val("x", ten_plus_pi())]), options());

    assert!(diagnostics.is_empty());
    assert_eq!(type_checker.binding_type("x"), Some(&Type::ComptimeFloat));
    assert_eq!(type_checker.resolved[0].to_string(), "val x: comptime_float");
}

#[test]
fn test_precision_loss_suggests_conversion() {
    let (_, diagnostics) = type_check(
        &program(vec![Stmt::val_typed("y", "i32", ten_plus_pi())]),
        options(),
    );

    let error = &diagnostics.errors()[0];
    assert_eq!(error.kind(), ErrorKind::PrecisionLoss);
    assert!(error.get_tip().to_string().contains("(10 + 3.14):i32"));
}

#[test]
fn test_literal_out_of_range_on_assignment() {
    let (_, diagnostics) = type_check(
        &program(vec![
            Stmt::mut_typed("z", "i32", Expr::int(5)),
            Stmt::assignment("z", Expr::int(9223372036854775807)),
        ]),
        options(),
    );

    assert_eq!(diagnostics.errors().len(), 1);
    assert_eq!(diagnostics.errors()[0].kind(), ErrorKind::LiteralRange);
    assert!(diagnostics.errors()[0]
        .to_string()
        .contains("9223372036854775807 exceeds i32 range"));
}

#[test]
fn test_argument_mismatch_names_position() {
    let f = FnDeclStmt::new(
        "f",
        &[("a", "i32"), ("b", "i32")],
        Some("i32"),
        vec![Stmt::ret(Some(Expr::binary(
            Expr::symbol("a"),
            BinaryOperator::Add,
            Expr::symbol("b"),
        )))],
    );
    let call = Stmt::expression(Expr::call("f", vec![Expr::int(1), Expr::float(2.0)]));

    let (_, diagnostics) = type_check(&Program::new(vec![f.into(), call.into()]), options());

    assert!(matches!(
        diagnostics.errors()[0].get_impl(),
        ErrorImpl::ArgumentTypeMismatch { index: 2, .. }
    ));
    assert!(diagnostics.errors()[0].get_tip().to_string().contains("2.0:i32"));
}

#[test]
fn test_analysis_collects_every_error() {
    let (_, diagnostics) = type_check(
        &program(vec![
            Stmt::val_typed("a", "i32", Expr::float(1.5)),
            Stmt::val("b", Expr::symbol("missing")),
            Stmt::val_typed("c", "bool", Expr::int(1)),
            Stmt::val_typed("d", "i32", Expr::int(1)),
        ]),
        options(),
    );

    assert_eq!(diagnostics.errors().len(), 3);
    assert_eq!(diagnostics.count_of(ErrorKind::Resolution), 1);
    assert!(diagnostics.into_result(()).is_err());
}

#[test]
fn test_clean_program_yields_ok() {
    let helper = FnDeclStmt::new(
        "scale",
        &[("values", "[3]f64"), ("factor", "f64")],
        Some("[3]f64"),
        vec![Stmt::ret(Some(Expr::symbol("values")))],
    );
    let main = FnDeclStmt::new(
        "main",
        &[],
        None,
        vec![
            Stmt::val_typed(
                "values",
                "[_]f64",
                Expr::array(vec![Expr::int(1), Expr::float(2.5), Expr::int(3)]),
            ),
            Stmt::val(
                "scaled",
                Expr::call("scale", vec![Expr::symbol("values"), Expr::int(2)]),
            ),
            Stmt::val(
                "total",
                Expr::block(vec![
                    Stmt::val("base", Expr::int(40)),
                    Stmt::assign(Expr::binary(
                        Expr::symbol("base"),
                        BinaryOperator::Add,
                        Expr::int(2),
                    )),
                ]),
            ),
            Stmt::expression(Expr::convert(Expr::symbol("scaled"), "[_]i64")),
            Stmt::expression(Expr::symbol("total")),
        ],
    );

    let (type_checker, diagnostics) =
        type_check(&Program::new(vec![helper.into(), main.into()]), AnalyzerOptions::default());

    assert_eq!(
        type_checker.binding_type("values"),
        Some(&Type::concrete_array(Type::F64, vec![DimSpec::Fixed(3)]))
    );
    assert_eq!(type_checker.binding_type("total"), Some(&Type::ComptimeInt));
    assert_eq!(diagnostics.into_result(42), Ok(42));
}

#[test]
fn test_rendered_diagnostic_points_at_value() {
    let file = Rc::new(String::from("main.hx"));
    let source = "val y: i32 = 10 + 3.14\n";
    let value = ten_plus_pi().with_span(Span::new(13, 22, Rc::clone(&file)));
    let decl = Stmt::val_typed("y", "i32", value).with_span(Span::new(0, 22, file));

    let (_, diagnostics) = type_check(&program(vec![decl]), options());
    let rendered = format_error(&diagnostics.errors()[0], source, "main.hx");
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines[0],
        "Error: PrecisionLoss (Use explicit conversion: (10 + 3.14):i32)"
    );
    assert_eq!(lines[3], "1 | val y: i32 = 10 + 3.14");
    assert_eq!(lines[4], "  | -------------^");
}
