//! Abstract syntax tree for the translated sketch.
//!
//! The tree is deliberately lightweight: statement and expression *text*
//! stays text (with placeholders for literals and embedded transforms), and
//! nodes exist only where emission or name resolution needs structure. It is
//! split into three submodules:
//!
//! - [`expr`]: expressions, parameter lists, function literals, inline
//!   objects
//! - [`stmt`]: statements, blocks, control-flow heads, local-name scanning
//! - [`class`]: class/interface declarations, bodies, members
//!
//! Nodes own their children outright. The one cyclic relationship in the
//! source model — inner class to enclosing class — lives in the
//! [`ClassRegistry`](crate::registry::ClassRegistry) as integer-indexed
//! links, so the tree itself stays acyclic.

pub mod class;
pub mod expr;
pub mod stmt;

pub use class::{
    BodyMisc, ClassBody, ClassDecl, ClassField, ClassMethod, Constructor, InterfaceBody, TypeBody,
};
pub use expr::{
    EmbeddedTransform, Expression, FunctionDecl, InlineObject, ObjectMember, Param, Params,
};
pub use stmt::{
    default_value_for_type, local_names, CatchStatement, ForHead, ForStatement, Label, MethodDecl,
    PrefixStatement, SimpleStatement, Statement, StatementsBlock, SwitchCase, VarDefinition,
    VarStatement, VarValue,
};

/// The whole translated document: classes and sketch-level statements.
///
/// Rendering wraps the statements in a single closure parameterized by the
/// host runtime, with classes emitted first in descending dependency weight.
#[derive(Debug, Clone, Default)]
pub struct Root {
    pub statements: Vec<Statement>,
}
