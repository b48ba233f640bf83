#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;
    use frontend::ast::*;
    use frontend::token::is_keyword;
    use frontend::parse_source;

    fn parse_one(line: &str) -> Result<Statement, String> {
        let no_args: [&str; 0] = [];
        let program = parse_source(line, &no_args).map_err(|e| e.to_string())?;
        program.statements.into_iter().next().ok_or_else(|| "empty program".to_string())
    }

    // Strategy for generating identifiers that are not keywords
    fn valid_identifier() -> impl Strategy<Value = String> {
        "[a-z_][a-zA-Z0-9_]{0,5}".prop_map(|s| s.to_string())
            .prop_filter("Not a reserved keyword", |s| {
                !is_keyword(s) && !matches!(s.as_str(), "nl" | "tab" | "space" | "and" | "or")
            })
    }

    fn operand() -> impl Strategy<Value = String> {
        prop_oneof![
            valid_identifier(),
            (0i64..1000).prop_map(|n| n.to_string()),
            (0u32..100, 1u32..100).prop_map(|(a, b)| format!("{a}.{b}")),
        ]
    }

    fn operator() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["+", "-", "*", "/", "%", "^", "<", "==", "and"]).prop_map(|s| s.to_string())
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config {
            cases: 64,
            .. proptest::test_runner::Config::default()
        })]

        #[test]
        fn prop_declaration_operands_round_trip(
            name in valid_identifier(),
            left in operand(),
            tail in proptest::option::of((operator(), operand())),
        ) {
            let mut expected = vec![left.clone()];
            if let Some((op, right)) = &tail {
                expected.push(op.clone());
                expected.push(right.clone());
            }
            let line = format!("var {name} = {}", expected.join(" "));
            let stmt = parse_one(&line).map_err(TestCaseError::fail)?;
            prop_assert_eq!(stmt.kind, StatementKind::Init);
            prop_assert_eq!(stmt.operands(), expected.iter().map(|s| s.as_str()).collect::<Vec<_>>());
            prop_assert_eq!(stmt.to_source(), line);
        }

        #[test]
        fn prop_assignment_operands_round_trip(
            name in valid_identifier(),
            left in operand(),
            op in operator(),
            right in operand(),
        ) {
            let line = format!("{name} = {left} {op} {right}");
            let stmt = parse_one(&line).map_err(TestCaseError::fail)?;
            prop_assert_eq!(stmt.kind, StatementKind::Assign);
            prop_assert_eq!(stmt.target(), Some(name.as_str()));
            prop_assert_eq!(stmt.operands(), vec![left.as_str(), op.as_str(), right.as_str()]);
        }

        #[test]
        fn prop_array_literal_round_trip(
            name in valid_identifier(),
            elements in proptest::collection::vec(operand(), 0..=3),
        ) {
            let line = format!("var[] {name} = [ {} ]", elements.join(" "));
            let stmt = parse_one(&line).map_err(TestCaseError::fail)?;
            prop_assert_eq!(stmt.kind, StatementKind::ArrayInit);
            prop_assert_eq!(stmt.operands(), elements.iter().map(|s| s.as_str()).collect::<Vec<_>>());
        }

        #[test]
        fn prop_call_arguments_round_trip(
            name in valid_identifier(),
            args in proptest::collection::vec(operand(), 0..=3),
        ) {
            let line = format!("call {name} {}", args.join(" "));
            let stmt = parse_one(&line).map_err(TestCaseError::fail)?;
            prop_assert_eq!(stmt.kind, StatementKind::CallFunc);
            prop_assert_eq!(stmt.operands(), args.iter().map(|s| s.as_str()).collect::<Vec<_>>());
        }

        #[test]
        fn prop_unknown_leading_token_fails(first in valid_identifier(), second in valid_identifier()) {
            let line = format!("{first} {second} 1");
            prop_assert!(parse_one(&line).is_err());
        }
    }
}
