// Reserved vocabulary of the robot language

/// Words the lexer reclassifies into their own keyword token kinds.
pub const KEYWORDS: &[&str] = &[
    "EXEC", "NEW", "VAR", "MACRO", "if", "then", "else", "fi", "rep", "times", "per", "do", "od",
    "not", "nop",
];

/// Primitive robot actions. `nop` and `balloonsHere` also lex as a keyword
/// and a state constant respectively; the parser accepts both spellings.
pub const COMMANDS: &[&str] = &[
    "M",
    "R",
    "C",
    "B",
    "c",
    "b",
    "P",
    "J",
    "G",
    "turnToMy",
    "turnToThe",
    "walk",
    "jump",
    "drop",
    "pick",
    "grab",
    "letGo",
    "pop",
    "moves",
    "move",
    "safeExe",
    "balloonsHere",
    "nop",
];

/// Bare words accepted as motion/direction arguments.
pub const DIRECTIONS: &[&str] = &["left", "right", "forward", "back", "backwards"];

/// Predicate names usable inside `if (...)` and `do (...)`.
pub const CONDITIONS: &[&str] = &["isBlocked", "isFacing", "isZero", "not"];

/// Robot state names, lexed as their own constant token kinds.
pub const CONSTANTS: &[&str] = &[
    "size",
    "myX",
    "myY",
    "myChips",
    "myBalloons",
    "balloonsHere",
    "chipsHere",
    "roomForChips",
];

/// Commands whose bare-word arguments are directions rather than names.
const DIRECTIONAL_COMMANDS: &[&str] = &["moves", "move", "turnToMy", "turnToThe"];

/// Composite command wrapping exactly one nested command.
pub const SAFE_EXE: &str = "safeExe";

pub fn is_command(word: &str) -> bool {
    COMMANDS.contains(&word)
}

pub fn is_direction(word: &str) -> bool {
    DIRECTIONS.contains(&word)
}

pub fn is_condition(word: &str) -> bool {
    CONDITIONS.contains(&word)
}

pub fn is_directional_command(word: &str) -> bool {
    DIRECTIONAL_COMMANDS.contains(&word)
}

/// Names a macro may not take: they would always dispatch elsewhere.
pub fn is_reserved_name(word: &str) -> bool {
    is_command(word) || is_condition(word)
}
