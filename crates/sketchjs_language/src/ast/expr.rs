//! Expression nodes.

use crate::ast::class::ClassDecl;
use crate::ast::stmt::StatementsBlock;

/// A lowered expression: processed text plus the structured transforms that
/// were cut out of it.
///
/// The text has every bracket atom expanded back in and every Java-ism
/// already rewritten. Structured islands (function literals, anonymous
/// classes, inline objects) are replaced by `!N` placeholders indexing into
/// `transforms`; the renderer substitutes identifiers in the text first and
/// splices the rendered transforms back in afterwards.
#[derive(Debug, Clone, Default)]
pub struct Expression {
    pub text: String,
    pub transforms: Vec<EmbeddedTransform>,
}

impl Expression {
    /// An expression with no embedded transforms.
    pub fn plain(text: impl Into<String>) -> Self {
        Expression {
            text: text.into(),
            transforms: Vec::new(),
        }
    }
}

/// A structured island cut out of expression text.
#[derive(Debug, Clone)]
pub enum EmbeddedTransform {
    /// A `function(..) { .. }` literal.
    Function(FunctionDecl),
    /// An anonymous class: `new T() { .. }`.
    InlineClass(Box<ClassDecl>),
    /// An object literal with labeled members.
    InlineObject(InlineObject),
}

/// An object literal `{ label: value, .. }`.
#[derive(Debug, Clone, Default)]
pub struct InlineObject {
    pub members: Vec<ObjectMember>,
}

/// One member of an inline object; the label is absent for positional
/// members that appeared without a `label:` prefix.
#[derive(Debug, Clone)]
pub struct ObjectMember {
    pub label: Option<String>,
    pub value: Expression,
}

/// A `function` literal or block-level function declaration.
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: Option<String>,
    pub params: Params,
    pub body: StatementsBlock,
}

/// A parameter list, with the trailing varargs parameter split out.
///
/// When `rest` is present the emitted function binds it to
/// `Array.prototype.slice.call(arguments, N)` at the top of its body.
#[derive(Debug, Clone, Default)]
pub struct Params {
    pub params: Vec<Param>,
    pub rest: Option<Param>,
}

impl Params {
    /// Declared parameter names, varargs included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params
            .iter()
            .map(|p| p.name.as_str())
            .chain(self.rest.iter().map(|p| p.name.as_str()))
    }

    /// Arity used for overload ids and constructor dispatch: the fixed
    /// parameters only.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn has_rest(&self) -> bool {
        self.rest.is_some()
    }
}

/// A single declared parameter. Types were erased during extraction; only
/// the name survives into the target language.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
}
