use frontend::ast::{Statement, StatementKind};

/// Statement handler chosen once, when the plan is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Init,
    ArrayInit,
    ArrayAppend,
    ArraySet,
    ArrayPop,
    Assign,
    Print,
    Read,
    Block,
    Call,
    Define,
    Return,
}

impl Handler {
    /// `None` for kinds that have no handler; reaching one halts the program.
    pub fn for_kind(kind: StatementKind) -> Option<Handler> {
        let handler = match kind {
            StatementKind::Init | StatementKind::Const => Handler::Init,
            StatementKind::ArrayInit => Handler::ArrayInit,
            StatementKind::ArrayAppend => Handler::ArrayAppend,
            StatementKind::ArraySet => Handler::ArraySet,
            StatementKind::ArrayPop => Handler::ArrayPop,
            StatementKind::Assign => Handler::Assign,
            StatementKind::Print | StatementKind::PrintLn => Handler::Print,
            StatementKind::ReadChar
            | StatementKind::ReadInt
            | StatementKind::ReadFloat
            | StatementKind::ReadStr
            | StatementKind::ReadLn => Handler::Read,
            StatementKind::If | StatementKind::Else | StatementKind::While => Handler::Block,
            StatementKind::CallFunc => Handler::Call,
            StatementKind::DefFunc => Handler::Define,
            StatementKind::Return => Handler::Return,
            StatementKind::Bracket | StatementKind::BlockOpen | StatementKind::None => return None,
        };
        Some(handler)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PlanStep<'a> {
    pub stmt: &'a Statement,
    pub handler: Option<Handler>,
}

/// Ordered pairing of statements with their handlers.
#[derive(Debug, Clone)]
pub struct ExecutionPlan<'a> {
    steps: Vec<PlanStep<'a>>,
}

impl<'a> ExecutionPlan<'a> {
    pub fn new(statements: &'a [Statement]) -> Self {
        let steps = statements
            .iter()
            .map(|stmt| PlanStep { stmt, handler: Handler::for_kind(stmt.kind) })
            .collect();
        Self { steps }
    }

    pub fn steps(&self) -> &[PlanStep<'a>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
