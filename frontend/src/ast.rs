/// Maximum number of external arguments a program can receive.
pub const ARGS_MAX_NUM: usize = 10;

pub type Token = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    ReadChar,
    ReadInt,
    ReadFloat,
    ReadStr,
    ReadLn,
    Print,
    PrintLn,
    Init,
    Const,
    Assign,
    If,
    Else,
    While,
    Bracket,
    ArrayInit,
    ArrayAppend,
    ArraySet,
    ArrayPop,
    CallFunc,
    DefFunc,
    Return,
    BlockOpen,
    None,
}

impl StatementKind {
    /// Kinds whose line always opens a `{ ... }` body.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            StatementKind::If | StatementKind::Else | StatementKind::While | StatementKind::DefFunc
        )
    }

    pub fn is_read(&self) -> bool {
        matches!(
            self,
            StatementKind::ReadChar
                | StatementKind::ReadInt
                | StatementKind::ReadFloat
                | StatementKind::ReadStr
                | StatementKind::ReadLn
        )
    }

    /// Inclusive range of tokens accepted on a line of this kind.
    pub fn token_range(&self) -> Option<(usize, usize)> {
        match self {
            StatementKind::Init | StatementKind::Const => Some((4, 6)),
            StatementKind::Assign => Some((3, 5)),
            StatementKind::ArrayInit => Some((5, 8)),
            StatementKind::ArrayAppend => Some((3, 3)),
            StatementKind::ArraySet => Some((4, 4)),
            StatementKind::ArrayPop => Some((2, 3)),
            StatementKind::Print | StatementKind::PrintLn => Some((2, 4)),
            StatementKind::ReadChar
            | StatementKind::ReadInt
            | StatementKind::ReadFloat
            | StatementKind::ReadStr
            | StatementKind::ReadLn => Some((2, 4)),
            StatementKind::If | StatementKind::While => Some((3, 5)),
            StatementKind::Else => Some((2, 5)),
            StatementKind::DefFunc => Some((4, 7)),
            StatementKind::CallFunc => Some((2, 6)),
            StatementKind::Return => Some((1, 1)),
            StatementKind::Bracket | StatementKind::BlockOpen | StatementKind::None => None,
        }
    }
}

/// Fixed left/middle/right operand window of a statement.
///
/// The meaning of each slot depends on the statement kind: for an assignment
/// it holds `operand operator operand`, for an `if` it holds the condition,
/// for a function definition it holds the formal parameter names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expression {
    pub left: Token,
    pub middle: Token,
    pub right: Token,
}

impl Expression {
    pub fn new(left: &str, middle: &str, right: &str) -> Self {
        Self {
            left: left.to_string(),
            middle: middle.to_string(),
            right: right.to_string(),
        }
    }

    /// Fill the slots from consecutive tokens, leaving missing ones empty.
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let slot = |i: usize| tokens.get(i).cloned().unwrap_or_default();
        Self {
            left: slot(0),
            middle: slot(1),
            right: slot(2),
        }
    }

    pub fn slots(&self) -> [&Token; 3] {
        [&self.left, &self.middle, &self.right]
    }

    pub fn is_empty(&self) -> bool {
        self.slots().iter().all(|s| s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub line: Vec<Token>,
    pub line_no: usize,
    pub expression: Expression,
    pub main_body: Vec<Statement>,
    // Reserved for an else-branch attached to its `if`; `else` is parsed as
    // an independent statement, so nothing fills this yet.
    pub second_body: Vec<Statement>,
}

impl Statement {
    pub fn new(kind: StatementKind, line: Vec<Token>, line_no: usize) -> Self {
        Self {
            kind,
            line,
            line_no,
            expression: Expression::default(),
            main_body: vec![],
            second_body: vec![],
        }
    }

    /// Name declared or targeted by the statement, if the kind has one.
    pub fn target(&self) -> Option<&str> {
        match self.kind {
            StatementKind::Init
            | StatementKind::Const
            | StatementKind::ArrayInit
            | StatementKind::ArrayAppend
            | StatementKind::ArraySet
            | StatementKind::ArrayPop
            | StatementKind::DefFunc
            | StatementKind::CallFunc => self.line.get(1).map(|s| s.as_str()),
            StatementKind::Assign => self.line.first().map(|s| s.as_str()),
            _ => None,
        }
    }

    /// Non-empty operand slots, in slot order.
    pub fn operands(&self) -> Vec<&str> {
        self.expression
            .slots()
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str())
            .collect()
    }

    pub fn to_source(&self) -> String {
        self.line.join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub args: [Token; ARGS_MAX_NUM],
}

impl Program {
    pub fn new(statements: Vec<Statement>, args: [Token; ARGS_MAX_NUM]) -> Self {
        Self { statements, args }
    }
}
