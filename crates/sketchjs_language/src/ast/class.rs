//! Class and interface declarations, bodies, and members.

use crate::ast::expr::{FunctionDecl, Params};
use crate::ast::stmt::{StatementsBlock, VarDefinition};
use crate::registry::ClassId;

/// A declared class or interface.
///
/// One node type serves every placement: a declaration in the sketch-level
/// statement stream, an inner class inside another body, or an anonymous
/// class embedded in an expression. The placement decides the emission (the
/// renderer publishes top-level classes onto the host object, while an
/// enclosing body assigns inner classes to its self pointer), but the shape
/// is the same; the registry carries the scope link.
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub id: ClassId,
    pub name: String,
    pub body: TypeBody,
    /// Declared `static` — meaningful for inner classes only.
    pub is_static: bool,
}

#[derive(Debug, Clone)]
pub enum TypeBody {
    Class(ClassBody),
    Interface(InterfaceBody),
}

/// The body of a class: everything between its braces, classified.
#[derive(Debug, Clone, Default)]
pub struct ClassBody {
    /// Dotted base class name from `extends`, unresolved.
    pub base_name: Option<String>,
    /// Dotted interface names from `implements`, unresolved.
    pub interface_names: Vec<String>,
    /// Plain `function` declarations in the body, emitted verbatim first.
    pub functions: Vec<FunctionDecl>,
    pub methods: Vec<ClassMethod>,
    pub fields: Vec<ClassField>,
    pub cstrs: Vec<Constructor>,
    pub inner_classes: Vec<ClassDecl>,
    pub misc: BodyMisc,
}

/// The body of an interface: method names, constant fields, inner types.
#[derive(Debug, Clone, Default)]
pub struct InterfaceBody {
    /// Dotted base interface names from `extends`, unresolved.
    pub base_names: Vec<String>,
    /// Declared method names, for the `$methods` metadata list.
    pub method_names: Vec<String>,
    /// Interface fields are constants; they emit as static members.
    pub fields: Vec<ClassField>,
    pub inner_classes: Vec<ClassDecl>,
}

/// A method declared in a class body.
///
/// Overload disambiguation happens at emission: each rendered method gets a
/// unique id `name$arity`, with `_2`, `_3`, .. suffixes for repeats, and is
/// registered on its targets through the host's `addMethod`.
#[derive(Debug, Clone)]
pub struct ClassMethod {
    pub name: String,
    pub params: Params,
    pub body: StatementsBlock,
    pub is_static: bool,
}

/// A constructor; emitted as `$constr_N` where `N` is the arity.
#[derive(Debug, Clone)]
pub struct Constructor {
    pub params: Params,
    pub body: StatementsBlock,
}

/// A field declaration list.
#[derive(Debug, Clone)]
pub struct ClassField {
    pub definitions: Vec<VarDefinition>,
    pub var_type: String,
    pub is_static: bool,
}

impl ClassField {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|d| d.name.as_str())
    }
}

/// Free-form body text that is not a declaration.
#[derive(Debug, Clone, Default)]
pub struct BodyMisc {
    /// Chunks between declarations that matched no declaration shape;
    /// emitted verbatim, each with its terminating semicolon.
    pub extras: Vec<String>,
    /// Text after the last semicolon in the body.
    pub tail: String,
}
