use crate::ast::*;
use crate::token::*;
use super::error::{ParserError, ParserErrorKind, ParserResult};

/// Decide the statement kind from the leading tokens of a line.
pub fn classify(tokens: &[Token], line: usize) -> ParserResult<StatementKind> {
    let first = match tokens.first() {
        Some(first) => first,
        None => return Err(ParserError::new(ParserErrorKind::UnknownStatement { token: String::new() }, line)),
    };

    if let Some(kind) = keyword_kind(first) {
        return Ok(kind);
    }

    match tokens.get(1) {
        Some(t) if t == ASSIGN => Ok(StatementKind::Assign),
        Some(t) => Err(ParserError::new(ParserErrorKind::MissingAssign { found: Some(t.clone()) }, line)),
        None => Err(ParserError::new(ParserErrorKind::UnknownStatement { token: first.clone() }, line)),
    }
}

fn check_token_count(kind: StatementKind, tokens: &[Token], line: usize) -> ParserResult<()> {
    if let Some((min, max)) = kind.token_range() {
        let found = tokens.len();
        if found < min || found > max {
            return Err(ParserError::new(ParserErrorKind::TokenCount { kind, found, min, max }, line));
        }
    }
    Ok(())
}

fn expect_token(tokens: &[Token], index: usize, expected: &str, line: usize) -> ParserResult<()> {
    match tokens.get(index) {
        Some(t) if t == expected => Ok(()),
        found => {
            let found = found.cloned();
            let kind = if expected == PARAM_SEPARATOR {
                ParserErrorKind::MissingParamSeparator { found }
            } else {
                ParserErrorKind::MissingAssign { found }
            };
            Err(ParserError::new(kind, line))
        }
    }
}

fn expect_block_open(kind: StatementKind, tokens: &[Token], line: usize) -> ParserResult<()> {
    if tokens.last().map(|t| t.as_str()) == Some(BLOCK_OPEN) {
        Ok(())
    } else {
        Err(ParserError::new(ParserErrorKind::MissingBlockOpen { kind }, line))
    }
}

/// Whether the statement on this line owns a `{ ... }` body to be parsed.
pub fn opens_body(kind: StatementKind, tokens: &[Token]) -> bool {
    kind.is_block() || (kind == StatementKind::CallFunc && tokens.last().map(|t| t.as_str()) == Some(BLOCK_OPEN))
}

/// Validate the token line of `kind` and fill its operand slots.
pub fn extract_expression(kind: StatementKind, tokens: &[Token], line: usize) -> ParserResult<Expression> {
    check_token_count(kind, tokens, line)?;
    let sz = tokens.len();

    let expression = match kind {
        StatementKind::Assign => Expression::from_tokens(&tokens[2..]),
        StatementKind::Init | StatementKind::Const => {
            expect_token(tokens, 2, ASSIGN, line)?;
            Expression::from_tokens(&tokens[3..])
        }
        StatementKind::ArrayInit => {
            expect_token(tokens, 2, ASSIGN, line)?;
            array_init_expression(tokens, line)?
        }
        StatementKind::ArrayAppend | StatementKind::ArraySet | StatementKind::ArrayPop => {
            Expression::from_tokens(&tokens[1..])
        }
        StatementKind::If | StatementKind::While | StatementKind::Else => {
            expect_block_open(kind, tokens, line)?;
            Expression::from_tokens(&tokens[1..sz - 1])
        }
        StatementKind::DefFunc => {
            // function NAME : A1 A2 A3 {
            expect_token(tokens, 2, PARAM_SEPARATOR, line)?;
            expect_block_open(kind, tokens, line)?;
            let params = &tokens[3..sz - 1];
            for (i, p) in params.iter().enumerate() {
                if params[..i].contains(p) {
                    return Err(ParserError::new(ParserErrorKind::DuplicateParameter { name: p.clone() }, line));
                }
            }
            Expression::from_tokens(params)
        }
        StatementKind::CallFunc => {
            // call NAME A1 A2 A3 [{]
            let end = if opens_body(kind, tokens) { sz - 1 } else { sz };
            let args = &tokens[2.min(end)..end];
            if end < 2 || args.len() > 3 {
                let max = if end == sz { 5 } else { 6 };
                return Err(ParserError::new(
                    ParserErrorKind::TokenCount { kind, found: sz, min: 2, max },
                    line,
                ));
            }
            Expression::from_tokens(args)
        }
        StatementKind::Print
        | StatementKind::PrintLn
        | StatementKind::ReadChar
        | StatementKind::ReadInt
        | StatementKind::ReadFloat
        | StatementKind::ReadStr
        | StatementKind::ReadLn => Expression::from_tokens(&tokens[1..]),
        StatementKind::Return => Expression::default(),
        StatementKind::Bracket | StatementKind::BlockOpen => {
            return Err(ParserError::new(
                ParserErrorKind::UnexpectedBlockMarker { marker: tokens[0].clone() },
                line,
            ));
        }
        StatementKind::None => {
            return Err(ParserError::new(ParserErrorKind::UnknownStatement { token: tokens[0].clone() }, line));
        }
    };

    Ok(expression)
}

// var[] NAME = $array_pop SRC
// var[] NAME = $array_at SRC IDX
// var[] NAME = [ E1 E2 E3 ]
fn array_init_expression(tokens: &[Token], line: usize) -> ParserResult<Expression> {
    let sz = tokens.len();
    let source = tokens[3].as_str();

    if source == ARRAY_POP && sz == 5 {
        return Ok(Expression::from_tokens(&tokens[3..5]));
    }
    if source == ARRAY_AT && sz == 6 {
        return Ok(Expression::from_tokens(&tokens[3..6]));
    }
    if source == ARRAY_LITERAL_OPEN && tokens[sz - 1] == ARRAY_LITERAL_CLOSE {
        return Ok(Expression::from_tokens(&tokens[4..sz - 1]));
    }

    Err(ParserError::new(ParserErrorKind::MalformedArrayLiteral, line))
}
