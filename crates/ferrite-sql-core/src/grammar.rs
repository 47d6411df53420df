//! The built-in statement grammar.

/// Grammar for the statement families this crate parses natively.
///
/// Statements outside this surface are not an error: matching yields no
/// result and the caller falls back to its general parser.
pub const DEFAULT_GRAMMAR: &str = "\
# Statement families handled natively; anything else falls through.
Statement <- UseStatement / DeleteStatement / SetStatement / ResetStatement
UseStatement <- 'USE'i UseTarget
UseTarget <- DottedIdentifier
DeleteStatement <- 'DELETE'i Identifier
SetStatement <- 'SET'i (StandardAssignment / SetTimeZone)
StandardAssignment <- (SetVariable / SetSetting) SetAssignment
SetTimeZone <- 'TIME'i 'ZONE'i Expression
SetSetting <- SettingScope? SettingName
SetVariable <- VariableScope SettingName
SettingScope <- LocalScope / SessionScope / GlobalScope
LocalScope <- 'LOCAL'i
SessionScope <- 'SESSION'i
GlobalScope <- 'GLOBAL'i
VariableScope <- 'VARIABLE'i
SetAssignment <- VariableAssign VariableList
VariableAssign <- '=' / 'TO'i
VariableList <- List(Expression)
ResetStatement <- 'RESET'i (SetVariable / SetSetting)
SettingName <- Identifier
Expression <- Identifier / StringLiteral / NumberLiteral
DottedIdentifier <- Identifier ('.' Identifier)*
Identifier <- [a-zA-Z_]
List(D) <- D (',' D)* ','?
";
