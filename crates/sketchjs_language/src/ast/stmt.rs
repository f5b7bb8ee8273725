//! Statement nodes and local-name scanning.

use rustc_hash::FxHashSet;

use crate::ast::class::ClassDecl;
use crate::ast::expr::{Expression, FunctionDecl, Params};

/// One element of a statement stream.
///
/// The statement scanner preserves the source's whitespace by interleaving
/// `Raw` text segments between structured nodes; rendering a stream is the
/// concatenation of rendering its elements.
#[derive(Debug, Clone)]
pub enum Statement {
    /// Verbatim text: inter-statement whitespace and terminators.
    Raw(String),
    /// An expression statement (the terminating `;` lives in a `Raw`).
    Simple(SimpleStatement),
    /// A local variable declaration list.
    Var(VarStatement),
    /// A nested `{ .. }` block.
    Block(StatementsBlock),
    /// A `for` head; the loop body follows as its own statement.
    For(ForStatement),
    /// A `catch` head.
    Catch(CatchStatement),
    /// A control-flow keyword, with an argument for `if`/`while`/`switch`/`with`.
    Prefix(PrefixStatement),
    /// A `case expr:` arm.
    Case(SwitchCase),
    /// A `label:` (including `default:` in a switch).
    Label(Label),
    /// A class or interface declaration.
    Class(ClassDecl),
    /// A sketch-level method (typed function declaration).
    Method(MethodDecl),
    /// A `function` declaration.
    Function(FunctionDecl),
}

/// An expression statement.
#[derive(Debug, Clone)]
pub struct SimpleStatement {
    pub expr: Expression,
}

/// `type name [= expr], name2 [= expr2], ..` lowered to a `var` list.
#[derive(Debug, Clone)]
pub struct VarStatement {
    pub definitions: Vec<VarDefinition>,
    pub var_type: String,
}

impl VarStatement {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|d| d.name.as_str())
    }
}

/// One declared variable and its initializer.
#[derive(Debug, Clone)]
pub struct VarDefinition {
    pub name: String,
    pub value: VarValue,
}

/// Either the declared type's default literal or an explicit initializer.
#[derive(Debug, Clone)]
pub enum VarValue {
    Default(&'static str),
    Expr(Expression),
}

impl VarDefinition {
    pub fn is_default(&self) -> bool {
        matches!(self.value, VarValue::Default(_))
    }
}

/// The default literal a declared type falls back to without an initializer.
pub fn default_value_for_type(var_type: &str) -> &'static str {
    match var_type {
        "int" | "float" => "0",
        "boolean" => "false",
        "color" => "0x00000000",
        _ => "null",
    }
}

/// A `{ .. }` statements block. Rendering computes the block's local-name
/// set and shadows the enclosing resolution context with it.
#[derive(Debug, Clone, Default)]
pub struct StatementsBlock {
    pub statements: Vec<Statement>,
}

/// A `for` head in one of the three source forms.
#[derive(Debug, Clone)]
pub struct ForStatement {
    pub head: ForHead,
}

#[derive(Debug, Clone)]
pub enum ForHead {
    /// `for (init; condition; step)`
    Classic {
        init: Box<Statement>,
        condition: Expression,
        step: Expression,
    },
    /// `for (var key in container)` — key enumeration.
    In {
        init: Box<Statement>,
        container: Expression,
    },
    /// `for (Type x : container)` — element iteration via the host's
    /// `ObjectIterator`.
    Each {
        init: Box<Statement>,
        container: Expression,
    },
}

/// A `catch` head; the exception binding is a parameter list of one.
#[derive(Debug, Clone)]
pub struct CatchStatement {
    pub params: Params,
}

/// A bare control-flow keyword (`else`, `try`, `return`, ..) or one that
/// carries a parenthesized argument (`if`, `switch`, `while`, `with`).
#[derive(Debug, Clone)]
pub struct PrefixStatement {
    pub keyword: String,
    pub argument: Option<Expression>,
}

/// A `case expr:` arm of a switch.
#[derive(Debug, Clone)]
pub struct SwitchCase {
    pub expr: Expression,
}

/// A statement label, emitted verbatim.
#[derive(Debug, Clone)]
pub struct Label {
    pub text: String,
}

/// A method declared outside any class: at sketch level it is published
/// onto the host runtime object.
#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub name: String,
    pub params: Params,
    pub body: StatementsBlock,
}

/// Collects the names a statement stream declares, for scope shadowing:
/// variables (including classic-`for` inits), class/method/function names,
/// and catch parameters.
pub fn local_names(statements: &[Statement]) -> FxHashSet<String> {
    let mut names = FxHashSet::default();
    for statement in statements {
        match statement {
            Statement::Var(var) => names.extend(var.names().map(str::to_string)),
            Statement::For(for_stmt) => {
                let (ForHead::Classic { init, .. }
                | ForHead::In { init, .. }
                | ForHead::Each { init, .. }) = &for_stmt.head;
                if let Statement::Var(var) = init.as_ref() {
                    names.extend(var.names().map(str::to_string));
                }
            }
            Statement::Catch(catch) => {
                names.extend(catch.params.names().map(str::to_string));
            }
            Statement::Class(class) => {
                names.insert(class.name.clone());
            }
            Statement::Method(method) => {
                names.insert(method.name.clone());
            }
            Statement::Function(function) => {
                if let Some(name) = &function.name {
                    names.insert(name.clone());
                }
            }
            _ => {}
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_follow_declared_type() {
        assert_eq!(default_value_for_type("int"), "0");
        assert_eq!(default_value_for_type("float"), "0");
        assert_eq!(default_value_for_type("boolean"), "false");
        assert_eq!(default_value_for_type("color"), "0x00000000");
        assert_eq!(default_value_for_type("PImage"), "null");
    }

    #[test]
    fn local_names_sees_for_inits_and_catch_params() {
        let statements = vec![
            Statement::Var(VarStatement {
                definitions: vec![VarDefinition {
                    name: "a".into(),
                    value: VarValue::Default("0"),
                }],
                var_type: "int".into(),
            }),
            Statement::For(ForStatement {
                head: ForHead::Classic {
                    init: Box::new(Statement::Var(VarStatement {
                        definitions: vec![VarDefinition {
                            name: "i".into(),
                            value: VarValue::Default("0"),
                        }],
                        var_type: "int".into(),
                    })),
                    condition: Expression::plain("i < 10"),
                    step: Expression::plain("i++"),
                },
            }),
            Statement::Catch(CatchStatement {
                params: Params {
                    params: vec![crate::ast::expr::Param { name: "e".into() }],
                    rest: None,
                },
            }),
        ];
        let names = local_names(&statements);
        assert!(names.contains("a"));
        assert!(names.contains("i"));
        assert!(names.contains("e"));
    }
}
