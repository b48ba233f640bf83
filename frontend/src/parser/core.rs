use crate::ast::*;
use crate::source::SourceLine;
use crate::token::{BLOCK_CLOSE, BLOCK_OPEN};
use super::error::{ParserError, ParserErrorKind, ParserResult};
use super::stmt::{classify, extract_expression, opens_body};

pub struct Parser<'a> {
    lines: &'a [SourceLine],
    pos: usize,
    args: [Token; ARGS_MAX_NUM],
}

impl<'a> Parser<'a> {
    /// Build a parser over `lines`. Only the top level receives `args`;
    /// nested block bodies are parsed without them.
    pub fn new(lines: &'a [SourceLine], args: Option<&[Token; ARGS_MAX_NUM]>) -> Self {
        Parser {
            lines,
            pos: 0,
            args: args.cloned().unwrap_or_default(),
        }
    }

    fn peek(&self) -> Option<&'a SourceLine> {
        self.lines.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a SourceLine> {
        let line = self.lines.get(self.pos)?;
        self.pos += 1;
        Some(line)
    }

    pub fn parse_program(&mut self) -> ParserResult<Program> {
        let mut statements = vec![];

        while self.peek().is_some() {
            if let Some(stmt) = self.parse_stmt()? {
                statements.push(stmt);
            }
        }

        Ok(Program::new(statements, std::mem::take(&mut self.args)))
    }

    fn parse_stmt(&mut self) -> ParserResult<Option<Statement>> {
        let line = match self.next() {
            Some(line) => line,
            None => return Ok(None),
        };

        let tokens = line.tokens();
        if tokens.is_empty() {
            return Ok(None);
        }

        let kind = classify(&tokens, line.number)?;
        let expression = extract_expression(kind, &tokens, line.number)?;
        let has_body = opens_body(kind, &tokens);

        let mut stmt = Statement::new(kind, tokens, line.number);
        stmt.expression = expression;
        if has_body {
            stmt.main_body = self.parse_body(line.number)?;
        }

        Ok(Some(stmt))
    }

    /// Collect the lines up to the matching `}` and parse them as a nested program.
    fn parse_body(&mut self, opener: usize) -> ParserResult<Vec<Statement>> {
        let start = self.pos;
        let mut depth = 1usize;

        while let Some(line) = self.next() {
            match line.last_token() {
                Some(BLOCK_CLOSE) => {
                    depth -= 1;
                    if depth == 0 {
                        let body = &self.lines[start..self.pos - 1];
                        let mut sub = Parser::new(body, None);
                        return Ok(sub.parse_program()?.statements);
                    }
                }
                Some(BLOCK_OPEN) => depth += 1,
                _ => (),
            }
        }

        Err(ParserError::new(ParserErrorKind::UnterminatedBlock, opener))
    }
}
