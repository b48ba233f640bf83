use crate::ast::StatementKind;

pub const BLOCK_OPEN: &str = "{";
pub const BLOCK_CLOSE: &str = "}";
pub const ASSIGN: &str = "=";
pub const PARAM_SEPARATOR: &str = ":";
pub const ARRAY_LITERAL_OPEN: &str = "[";
pub const ARRAY_LITERAL_CLOSE: &str = "]";

pub const ARRAY_AT: &str = "$array_at";
pub const ARRAY_POP: &str = "$array_pop";
pub const ARRAY_LEN: &str = "$array_len";

/// Name of the constant array holding the external arguments.
pub const ARGS_NAME: &str = "$ARGS";

pub const AND: &str = "and";
pub const OR: &str = "or";

pub const QUOTE: char = '\'';

const KEYWORDS: [(&str, StatementKind); 21] = [
    ("var", StatementKind::Init),
    ("var[]", StatementKind::ArrayInit),
    ("$array_append", StatementKind::ArrayAppend),
    ("$array_set", StatementKind::ArraySet),
    ("$array_pop", StatementKind::ArrayPop),
    ("const", StatementKind::Const),
    ("print", StatementKind::Print),
    ("println", StatementKind::PrintLn),
    ("readchar", StatementKind::ReadChar),
    ("readint", StatementKind::ReadInt),
    ("readfloat", StatementKind::ReadFloat),
    ("readstr", StatementKind::ReadStr),
    ("readln", StatementKind::ReadLn),
    ("if", StatementKind::If),
    ("else", StatementKind::Else),
    ("while", StatementKind::While),
    ("}", StatementKind::Bracket),
    ("{", StatementKind::BlockOpen),
    ("function", StatementKind::DefFunc),
    ("call", StatementKind::CallFunc),
    ("return", StatementKind::Return),
];

pub fn keyword_kind(token: &str) -> Option<StatementKind> {
    KEYWORDS
        .iter()
        .find(|(keyword, _)| *keyword == token)
        .map(|(_, kind)| *kind)
}

pub fn is_keyword(token: &str) -> bool {
    keyword_kind(token).is_some()
}

/// Pseudo-operators that may stand in the first operand slot of a declaration.
pub fn is_array_source(token: &str) -> bool {
    matches!(token, ARRAY_AT | ARRAY_POP | ARRAY_LEN)
}

pub fn is_relational(token: &str) -> bool {
    matches!(token, "==" | "!=" | ">=" | ">" | "<=" | "<")
}

pub fn is_connective(token: &str) -> bool {
    token == AND || token == OR
}

/// Character printed for a reserved format word.
pub fn format_keyword(token: &str) -> Option<char> {
    match token {
        "nl" => Some('\n'),
        "tab" => Some('\t'),
        "space" => Some(' '),
        _ => None,
    }
}
