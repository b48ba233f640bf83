use std::collections::{HashMap, VecDeque};
use std::io::{BufRead, Write};
use frontend::ast::*;
use frontend::token::*;
use crate::calculator::{evaluate_bool, evaluate_relation, is_operator, Calculator};
use crate::environment::Environment;
use crate::error::{InterpreterError, InterpreterResult};
use crate::object::{strip_quotes, Object, VarKind};
use crate::plan::{ExecutionPlan, Handler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationResult {
    None,
    Return,
    Halt,
}

enum PrintPiece {
    Value(String),
    Format(char),
}

pub struct EvaluationContext<'a> {
    pub environment: Environment,
    function: HashMap<String, &'a Statement>,
    // formal parameter -> actual argument token, one frame per active call
    bindings: Vec<HashMap<String, String>>,
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
    pending_input: VecDeque<String>,
    recursion_depth: u32,
    max_recursion_depth: u32,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(input: &'a mut dyn BufRead, output: &'a mut dyn Write) -> Self {
        Self {
            environment: Environment::new(),
            function: HashMap::new(),
            bindings: vec![],
            input,
            output,
            pending_input: VecDeque::new(),
            recursion_depth: 0,
            max_recursion_depth: crate::DEFAULT_MAX_RECURSION_DEPTH,
        }
    }

    pub fn with_max_recursion_depth(mut self, depth: u32) -> Self {
        self.max_recursion_depth = depth;
        self
    }

    /// Seed `$ARGS` with the program's external arguments, then run it.
    pub fn execute_program(&mut self, program: &'a Program) -> InterpreterResult<EvaluationResult> {
        let args: Vec<Object> = program
            .args
            .iter()
            .filter(|a| !a.is_empty())
            .map(|a| Object::from_literal(a))
            .collect();
        self.environment.declare(ARGS_NAME, Object::Array(args), true);

        let plan = ExecutionPlan::new(&program.statements);
        let result = self.execute_plan(&plan);
        self.output.flush()?;
        result
    }

    pub fn execute_plan(&mut self, plan: &ExecutionPlan<'a>) -> InterpreterResult<EvaluationResult> {
        for step in plan.steps() {
            let flow = match step.handler {
                Some(handler) => self
                    .execute_step(handler, step.stmt)
                    .map_err(|e| e.at_line(step.stmt.line_no))?,
                None => EvaluationResult::Halt,
            };
            if flow != EvaluationResult::None {
                return Ok(flow);
            }
        }
        Ok(EvaluationResult::None)
    }

    fn execute_step(&mut self, handler: Handler, stmt: &'a Statement) -> InterpreterResult<EvaluationResult> {
        match handler {
            Handler::Init => self.execute_init(stmt)?,
            Handler::ArrayInit => self.execute_array_init(stmt)?,
            Handler::ArrayAppend => self.execute_array_append(stmt)?,
            Handler::ArraySet => self.execute_array_set(stmt)?,
            Handler::ArrayPop => self.execute_array_pop(stmt)?,
            Handler::Assign => self.execute_assign(stmt)?,
            Handler::Print => self.execute_print(stmt)?,
            Handler::Read => self.execute_read(stmt)?,
            Handler::Block => return self.execute_block(stmt),
            Handler::Call => return self.execute_call(stmt),
            Handler::Define => {
                if let Some(name) = stmt.target() {
                    self.function.insert(name.to_string(), stmt);
                }
            }
            Handler::Return => return Ok(EvaluationResult::Return),
        }
        Ok(EvaluationResult::None)
    }

    /// Replace a formal parameter of the active call with its argument token.
    fn subst(&self, token: &str) -> String {
        self.bindings
            .last()
            .and_then(|frame| frame.get(token))
            .cloned()
            .unwrap_or_else(|| token.to_string())
    }

    fn target_name(&self, stmt: &Statement) -> String {
        self.subst(stmt.target().unwrap_or_default())
    }

    /// A stored variable's value, or the token read as a literal.
    fn resolve(&self, token: &str) -> Object {
        if token.is_empty() {
            return Object::None;
        }
        let token = self.subst(token);
        match self.environment.get_value(&token) {
            Some(value) => value.clone(),
            None => Object::from_literal(&token),
        }
    }

    fn resolve_index(&self, token: &str) -> InterpreterResult<i64> {
        match self.resolve(token) {
            Object::Int(i) => Ok(i),
            other => Err(InterpreterError::InvalidIndex(other.to_string())),
        }
    }

    fn array(&self, name: &str) -> InterpreterResult<&Vec<Object>> {
        self.environment
            .get_value(name)
            .ok_or_else(|| InterpreterError::UndefinedVariable(name.to_string()))?
            .as_array()
            .ok_or_else(|| InterpreterError::NotAnArray(name.to_string()))
    }

    /// Mutable access to a non-const array; `None` when it is const.
    fn array_mut(&mut self, name: &str) -> InterpreterResult<Option<&mut Vec<Object>>> {
        let var = self
            .environment
            .get_mut(name)
            .ok_or_else(|| InterpreterError::UndefinedVariable(name.to_string()))?;
        if var.is_const {
            return match var.value {
                Object::Array(_) => Ok(None),
                _ => Err(InterpreterError::NotAnArray(name.to_string())),
            };
        }
        var.value
            .as_array_mut()
            .map(Some)
            .ok_or_else(|| InterpreterError::NotAnArray(name.to_string()))
    }

    fn checked_index(index: i64, size: usize) -> InterpreterResult<usize> {
        if index < 0 || index as usize >= size {
            Err(InterpreterError::IndexOutOfBounds { index, size })
        } else {
            Ok(index as usize)
        }
    }

    fn array_element(&self, src: &str, index: &str) -> InterpreterResult<Object> {
        let src = self.subst(src);
        let index = self.resolve_index(index)?;
        let elements = self.array(&src)?;
        let i = Self::checked_index(index, elements.len())?;
        Ok(elements[i].clone())
    }

    /// Remove the tail of `src`; a const array keeps it and only yields a copy.
    fn pop_tail(&mut self, src: &str, require_array: bool) -> InterpreterResult<Object> {
        let tail = self
            .array(src)?
            .last()
            .cloned()
            .ok_or_else(|| InterpreterError::EmptyArray(src.to_string()))?;
        if require_array && tail.as_array().is_none() {
            return Err(InterpreterError::NotAnArray(format!("tail of {src}")));
        }
        if let Some(elements) = self.array_mut(src)? {
            elements.pop();
        }
        Ok(tail)
    }

    pub fn evaluate_expression(&mut self, expr: &Expression, hint: Option<VarKind>) -> InterpreterResult<Object> {
        let left = self.subst(&expr.left);
        match left.as_str() {
            ARRAY_AT => self.array_element(&expr.middle, &expr.right),
            ARRAY_LEN => {
                let src = self.subst(&expr.middle);
                Ok(Object::Int(self.array(&src)?.len() as i64))
            }
            ARRAY_POP => {
                let src = self.subst(&expr.middle);
                self.pop_tail(&src, false)
            }
            _ => {
                let l = self.resolve(&expr.left);
                let r = self.resolve(&expr.right);
                let op = self.subst(&expr.middle);
                self.evaluate_binary(l, &op, r, hint)
            }
        }
    }

    fn evaluate_binary(&self, l: Object, op: &str, r: Object, hint: Option<VarKind>) -> InterpreterResult<Object> {
        if op.is_empty() {
            return Ok(l);
        }
        if is_relational(op) {
            return Ok(Object::Bool(self.compare(&l, op, &r)?));
        }
        if is_connective(op) {
            return Ok(Object::Bool(evaluate_bool(&l.to_string(), &r.to_string(), op)));
        }

        let mut chars = op.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if is_operator(c) => (),
            _ => return Err(InterpreterError::InvalidOperator(op.to_string())),
        }

        match (&l, &r) {
            (Object::String(_), _) | (_, Object::String(_)) if op == "+" && !r.is_none() => {
                Ok(Object::String(format!("{l}{r}")))
            }
            (Object::Int(_), Object::Int(_)) if hint != Some(VarKind::Double) => {
                let calculator = Calculator::new(&format!("{l} {op} {r}"));
                Ok(Object::Int(calculator.evaluate::<i64>()?))
            }
            _ if l.is_numeric() && r.is_numeric() => {
                let calculator = Calculator::new(&format!("{l} {op} {r}"));
                Ok(Object::Double(calculator.evaluate::<f64>()?))
            }
            _ => Err(InterpreterError::TypeError {
                operator: op.to_string(),
                left: l.get_kind(),
                right: r.get_kind(),
            }),
        }
    }

    fn compare(&self, l: &Object, op: &str, r: &Object) -> InterpreterResult<bool> {
        match (l, r) {
            (Object::Int(_), Object::Int(_)) => Ok(evaluate_relation::<i64>(&l.to_string(), &r.to_string(), op)?),
            _ if l.is_numeric() && r.is_numeric() => {
                Ok(evaluate_relation::<f64>(&l.to_string(), &r.to_string(), op)?)
            }
            _ if op == "==" => Ok(l.to_string() == r.to_string()),
            _ if op == "!=" => Ok(l.to_string() != r.to_string()),
            _ => Err(InterpreterError::TypeError {
                operator: op.to_string(),
                left: l.get_kind(),
                right: r.get_kind(),
            }),
        }
    }

    pub fn evaluate_condition(&self, expr: &Expression) -> InterpreterResult<bool> {
        let l = self.resolve(&expr.left);
        let r = self.resolve(&expr.right);
        let op = self.subst(&expr.middle);

        if is_relational(&op) {
            self.compare(&l, &op, &r)
        } else if op.is_empty() || is_connective(&op) {
            Ok(evaluate_bool(&l.to_string(), &r.to_string(), &op))
        } else {
            Err(InterpreterError::InvalidOperator(op))
        }
    }

    fn execute_init(&mut self, stmt: &Statement) -> InterpreterResult<()> {
        let name = self.target_name(stmt);
        if self.environment.contains(&name) {
            return Ok(());
        }
        let value = self.evaluate_expression(&stmt.expression, None)?;
        self.environment.declare(&name, value, stmt.kind == StatementKind::Const);
        Ok(())
    }

    fn execute_assign(&mut self, stmt: &Statement) -> InterpreterResult<()> {
        let name = self.target_name(stmt);
        let var = self
            .environment
            .get(&name)
            .ok_or_else(|| InterpreterError::UndefinedVariable(name.clone()))?;
        if var.is_const {
            return Ok(());
        }

        let hint = var.value.get_kind();
        let value = match self.evaluate_expression(&stmt.expression, Some(hint))? {
            Object::Int(v) if hint == VarKind::Double => Object::Double(v as f64),
            value => value,
        };
        if let Some(var) = self.environment.get_mut(&name) {
            var.value = value;
        }
        Ok(())
    }

    fn execute_array_init(&mut self, stmt: &Statement) -> InterpreterResult<()> {
        let name = self.target_name(stmt);
        if self.environment.contains(&name) {
            return Ok(());
        }

        let expr = &stmt.expression;
        let elements = match self.subst(&expr.left).as_str() {
            ARRAY_AT => match self.array_element(&expr.middle, &expr.right)? {
                Object::Array(elements) => elements,
                _ => return Err(InterpreterError::NotAnArray(format!("{}[{}]", expr.middle, expr.right))),
            },
            ARRAY_POP => {
                let src = self.subst(&expr.middle);
                match self.pop_tail(&src, true)? {
                    Object::Array(elements) => elements,
                    _ => return Err(InterpreterError::NotAnArray(src)),
                }
            }
            _ => expr
                .slots()
                .into_iter()
                .filter(|slot| !slot.is_empty())
                .map(|slot| self.resolve(slot))
                .collect(),
        };

        self.environment.declare(&name, Object::Array(elements), false);
        Ok(())
    }

    fn execute_array_append(&mut self, stmt: &Statement) -> InterpreterResult<()> {
        let name = self.subst(&stmt.expression.left);
        let value = self.resolve(&stmt.expression.middle);
        if let Some(elements) = self.array_mut(&name)? {
            elements.push(value);
        }
        Ok(())
    }

    fn execute_array_set(&mut self, stmt: &Statement) -> InterpreterResult<()> {
        let name = self.subst(&stmt.expression.left);
        let index = self.resolve_index(&stmt.expression.middle)?;
        let value = self.resolve(&stmt.expression.right);
        if let Some(elements) = self.array_mut(&name)? {
            let i = Self::checked_index(index, elements.len())?;
            elements[i] = value;
        }
        Ok(())
    }

    /// Pop the tail of an array. A tail that is a non-empty array empties
    /// the whole array; otherwise a SRC holding a non-empty array of size k
    /// removes k elements, and anything else removes one.
    fn execute_array_pop(&mut self, stmt: &Statement) -> InterpreterResult<()> {
        let name = self.subst(&stmt.expression.left);
        let src_len = match self.resolve(&stmt.expression.middle) {
            Object::Array(elements) if !elements.is_empty() => Some(elements.len()),
            _ => None,
        };

        let elements = match self.array_mut(&name)? {
            Some(elements) => elements,
            None => return Ok(()),
        };
        let count = match elements.last() {
            None => return Err(InterpreterError::EmptyArray(name)),
            Some(Object::Array(tail)) if !tail.is_empty() => elements.len(),
            Some(_) => src_len.unwrap_or(1).min(elements.len()),
        };
        elements.truncate(elements.len() - count);
        Ok(())
    }

    fn print_piece(&self, token: &str) -> PrintPiece {
        let token = self.subst(token);
        if let Some(value) = self.environment.get_value(&token) {
            PrintPiece::Value(value.to_string())
        } else if let Some(c) = format_keyword(&token) {
            PrintPiece::Format(c)
        } else {
            PrintPiece::Value(strip_quotes(&token).to_string())
        }
    }

    fn execute_print(&mut self, stmt: &Statement) -> InterpreterResult<()> {
        let pieces: Vec<PrintPiece> = stmt
            .expression
            .slots()
            .into_iter()
            .filter(|slot| !slot.is_empty())
            .map(|slot| self.print_piece(slot))
            .collect();

        let mut previous_value = false;
        for piece in pieces {
            match piece {
                PrintPiece::Value(text) => {
                    if previous_value {
                        write!(self.output, " ")?;
                    }
                    write!(self.output, "{text}")?;
                    previous_value = true;
                }
                PrintPiece::Format(c) => {
                    write!(self.output, "{c}")?;
                    previous_value = false;
                }
            }
        }

        if stmt.kind == StatementKind::PrintLn {
            writeln!(self.output)?;
        }
        Ok(())
    }

    fn next_input_word(&mut self) -> InterpreterResult<Option<String>> {
        while self.pending_input.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending_input.extend(line.split_whitespace().map(|w| w.to_string()));
        }
        Ok(self.pending_input.pop_front())
    }

    fn read_into(&mut self, token: &str, kind: StatementKind) -> InterpreterResult<()> {
        let name = self.subst(token);
        if !self.environment.contains(&name) {
            return Err(InterpreterError::UndefinedVariable(name));
        }
        self.output.flush()?;

        let invalid = |message: String| InterpreterError::InvalidInput { target: name.clone(), message };
        let word = self
            .next_input_word()?
            .ok_or_else(|| invalid("unexpected end of input".to_string()))?;
        let value = if kind == StatementKind::ReadInt {
            word.parse::<i64>().map(Object::Int).map_err(|e| invalid(format!("'{word}': {e}")))?
        } else {
            word.parse::<f64>().map(Object::Double).map_err(|e| invalid(format!("'{word}': {e}")))?
        };

        if let Some(var) = self.environment.get_mut(&name) {
            if !var.is_const {
                var.value = value;
            }
        }
        Ok(())
    }

    fn execute_read(&mut self, stmt: &Statement) -> InterpreterResult<()> {
        if !matches!(stmt.kind, StatementKind::ReadInt | StatementKind::ReadFloat) {
            // readchar, readstr and readln are accepted but do nothing
            return Ok(());
        }
        for slot in stmt.expression.slots() {
            if !slot.is_empty() {
                self.read_into(slot, stmt.kind)?;
            }
        }
        Ok(())
    }

    /// Run `body` in a fresh scope. The scope is popped on every exit path.
    fn execute_scoped(&mut self, body: &'a [Statement]) -> InterpreterResult<EvaluationResult> {
        self.environment.enter_block();
        let plan = ExecutionPlan::new(body);
        let result = self.execute_plan(&plan);
        self.environment.exit_block();
        result
    }

    fn execute_block(&mut self, stmt: &'a Statement) -> InterpreterResult<EvaluationResult> {
        loop {
            let truthy = match stmt.kind {
                StatementKind::DefFunc => true,
                StatementKind::Else if stmt.expression.is_empty() => true,
                _ => self.evaluate_condition(&stmt.expression)?,
            };
            if !truthy {
                return Ok(EvaluationResult::None);
            }

            let flow = self.execute_scoped(&stmt.main_body)?;
            if flow != EvaluationResult::None || stmt.kind != StatementKind::While {
                return Ok(flow);
            }
        }
    }

    fn execute_call(&mut self, stmt: &'a Statement) -> InterpreterResult<EvaluationResult> {
        let name = self.target_name(stmt);
        let def = *self
            .function
            .get(&name)
            .ok_or_else(|| InterpreterError::FunctionNotFound(name.clone()))?;
        if self.recursion_depth >= self.max_recursion_depth {
            return Err(InterpreterError::RecursionLimit(self.max_recursion_depth));
        }

        let frame: HashMap<String, String> = def
            .expression
            .slots()
            .into_iter()
            .zip(stmt.expression.slots())
            .filter(|(formal, actual)| !formal.is_empty() && !actual.is_empty())
            .map(|(formal, actual)| (formal.clone(), self.subst(actual)))
            .collect();

        self.bindings.push(frame);
        self.recursion_depth += 1;
        let result = self.execute_block(def);
        self.recursion_depth -= 1;
        self.bindings.pop();

        match result? {
            EvaluationResult::Return => Ok(EvaluationResult::None),
            flow => Ok(flow),
        }
    }
}
