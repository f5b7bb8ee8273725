//! Class and interface body assembly.
//!
//! A body atom's text goes through declaration extraction (classes and
//! methods first, then constructors by the class's own name), leaving
//! markers that classify every member. What remains between semicolons is
//! fields — or, when a chunk matches no field shape, free-form text carried
//! through verbatim.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{declarations, trim_spaces, Transformer};
use crate::ast::{
    default_value_for_type, BodyMisc, ClassBody, ClassDecl, ClassField, Constructor,
    ClassMethod, InterfaceBody, StatementsBlock, TypeBody,
};
use crate::registry::ClassId;

static CLASS_MEMBER_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([DEGH])(\d+)""#).expect("valid regex"));

static IFACE_MEMBER_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([DE])(\d+)""#).expect("valid regex"));

static SEMICOLON_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r";(?:\s*;)*").expect("valid regex"));

static ANY_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""[A-I](\d+)""#).expect("valid regex"));

impl Transformer<'_> {
    /// Transforms an `E` atom into a class or interface declaration,
    /// registering it under the current scope.
    pub(crate) fn transform_class_declaration(&mut self, atom_text: &str) -> Option<ClassDecl> {
        let header = declarations::parse_class_header(atom_text)?;
        let outer = self.sess.current_class;
        let id = self
            .sess
            .classes
            .declare(header.name.clone(), outer, header.is_interface);
        self.sess.current_class = Some(id);
        let body_text = self.sess.atoms.resolve(header.body_atom).to_string();
        let body = if header.is_interface {
            TypeBody::Interface(self.transform_interface_body(&body_text, id, &header.extends))
        } else {
            TypeBody::Class(self.transform_class_body(
                &body_text,
                id,
                &header.name,
                &header.extends,
                &header.implements,
            ))
        };
        self.sess.current_class = outer;
        Some(ClassDecl {
            id,
            name: header.name,
            body,
            is_static: header.is_static,
        })
    }

    /// Assembles a class body from its brace atom.
    pub(crate) fn transform_class_body(
        &mut self,
        body_text: &str,
        id: ClassId,
        name: &str,
        extends: &[String],
        implements: &[String],
    ) -> ClassBody {
        let inner = strip_braces(body_text);
        let extracted = declarations::extract_classes_and_methods(self, inner);
        let extracted = declarations::extract_constructors(self, &extracted, name);

        let mut method_atoms = Vec::new();
        let mut class_atoms = Vec::new();
        let mut cstr_atoms = Vec::new();
        let mut function_atoms = Vec::new();
        let members_removed = CLASS_MEMBER_MARKER_RE
            .replace_all(&extracted, |caps: &Captures<'_>| {
                let index: usize = caps[2].parse().expect("marker digits");
                match &caps[1] {
                    "D" => method_atoms.push(index),
                    "E" => class_atoms.push(index),
                    "G" => cstr_atoms.push(index),
                    _ => function_atoms.push(index),
                }
                String::new()
            })
            .into_owned();

        let (fields, extras, tail) = self.split_fields(&members_removed);

        let methods: Vec<ClassMethod> = method_atoms
            .into_iter()
            .filter_map(|index| {
                let text = self.sess.atoms.resolve(index).to_string();
                self.transform_class_method(&text)
            })
            .collect();
        let cstrs: Vec<Constructor> = cstr_atoms
            .into_iter()
            .filter_map(|index| {
                let text = self.sess.atoms.resolve(index).to_string();
                self.transform_constructor(&text, name)
            })
            .collect();
        let inner_classes: Vec<ClassDecl> = class_atoms
            .into_iter()
            .filter_map(|index| {
                let text = self.sess.atoms.resolve(index).to_string();
                self.transform_class_declaration(&text)
            })
            .collect();
        let functions = function_atoms
            .into_iter()
            .map(|index| {
                let text = self.sess.atoms.resolve(index).to_string();
                self.transform_function(&text)
            })
            .collect();

        let base_name = extends.first().cloned();
        let interface_names = implements.to_vec();
        let record = self.sess.classes.get_mut(id);
        record.base_name = base_name.clone();
        record.interface_names = interface_names.clone();
        for field in &fields {
            for field_name in field.names() {
                record.fields.insert(field_name.to_string(), field.is_static);
            }
        }
        for method in &methods {
            record.methods.insert(method.name.clone(), method.is_static);
        }

        ClassBody {
            base_name,
            interface_names,
            functions,
            methods,
            fields,
            cstrs,
            inner_classes,
            misc: BodyMisc { extras, tail },
        }
    }

    /// Assembles an interface body: method names, constant fields, inner
    /// types.
    pub(crate) fn transform_interface_body(
        &mut self,
        body_text: &str,
        id: ClassId,
        extends: &[String],
    ) -> InterfaceBody {
        let inner = strip_braces(body_text);
        let extracted = declarations::extract_classes_and_methods(self, inner);

        let mut method_names = Vec::new();
        let mut class_atoms = Vec::new();
        let members_removed = IFACE_MEMBER_MARKER_RE
            .replace_all(&extracted, |caps: &Captures<'_>| {
                let index: usize = caps[2].parse().expect("marker digits");
                match &caps[1] {
                    "D" => {
                        let text = self.sess.atoms.resolve(index);
                        if let Some(header) = declarations::parse_method(text) {
                            method_names.push(header.name);
                        }
                    }
                    _ => class_atoms.push(index),
                }
                String::new()
            })
            .into_owned();

        let (fields, _extras, _tail) = self.split_fields(&members_removed);

        let inner_classes: Vec<ClassDecl> = class_atoms
            .into_iter()
            .filter_map(|index| {
                let text = self.sess.atoms.resolve(index).to_string();
                self.transform_class_declaration(&text)
            })
            .collect();

        let record = self.sess.classes.get_mut(id);
        record.interface_names = extends.to_vec();
        for field in &fields {
            for field_name in field.names() {
                record.fields.insert(field_name.to_string(), field.is_static);
            }
        }
        for method_name in &method_names {
            record.methods.insert(method_name.clone(), false);
        }

        InterfaceBody {
            base_names: extends.to_vec(),
            method_names,
            fields,
            inner_classes,
        }
    }

    /// Splits declaration-free body text on semicolon runs: every chunk but
    /// the last is a field (or, failing the field shape, free-form text);
    /// the last is the trailing tail.
    fn split_fields(&mut self, text: &str) -> (Vec<ClassField>, Vec<String>, String) {
        let chunks: Vec<&str> = SEMICOLON_RUN_RE.split(text).collect();
        let mut fields = Vec::new();
        let mut extras = Vec::new();
        let chunk_count = chunks.len();
        let mut tail = String::new();
        for (i, chunk) in chunks.into_iter().enumerate() {
            if i + 1 == chunk_count {
                tail = self.reinflate_markers(chunk);
                continue;
            }
            let middle = trim_spaces(chunk).middle.to_string();
            if middle.is_empty() {
                continue;
            }
            match self.transform_class_field(&middle) {
                Some(field) => fields.push(field),
                None => extras.push(self.reinflate_markers(&middle)),
            }
        }
        (fields, extras, tail)
    }

    fn transform_class_field(&mut self, chunk: &str) -> Option<ClassField> {
        let header = declarations::parse_field(chunk)?;
        let default = default_value_for_type(&header.var_type);
        let definitions_text = header.definitions.to_string();
        let var_type = header.var_type;
        let definitions = definitions_text
            .split(',')
            .map(|def| self.transform_var_definition(def, default))
            .collect();
        Some(ClassField {
            definitions,
            var_type,
            is_static: header.is_static,
        })
    }

    fn transform_class_method(&mut self, atom_text: &str) -> Option<ClassMethod> {
        let header = declarations::parse_method(atom_text)?;
        let params_text = self.sess.atoms.resolve(header.params_atom).to_string();
        let body = match header.body_atom {
            Some(index) => {
                let text = self.sess.atoms.resolve(index).to_string();
                self.transform_statements_block(&text)
            }
            // an abstract method body: nothing to run
            None => StatementsBlock::default(),
        };
        Some(ClassMethod {
            name: header.name,
            params: self.transform_params(&params_text),
            body,
            is_static: header.is_static,
        })
    }

    fn transform_constructor(&mut self, atom_text: &str, class_name: &str) -> Option<Constructor> {
        let header = declarations::parse_constructor(atom_text, class_name)?;
        let params_text = self.sess.atoms.resolve(header.params_atom).to_string();
        let body_text = self.sess.atoms.resolve(header.body_atom).to_string();
        Some(Constructor {
            params: self.transform_params(&params_text),
            body: self.transform_statements_block(&body_text),
        })
    }

    /// Expands any markers left in free-form text back into their source
    /// fragments, so no placeholder token can leak into the output.
    fn reinflate_markers(&mut self, text: &str) -> String {
        let mut current = text.to_string();
        while ANY_MARKER_RE.is_match(&current) {
            let mut next = String::with_capacity(current.len());
            let mut last = 0;
            while let Some(m) = ANY_MARKER_RE.find_at(&current, last) {
                next.push_str(&current[last..m.start()]);
                let index: usize = current[m.start() + 2..m.end() - 1]
                    .parse()
                    .expect("marker digits");
                next.push_str(self.sess.atoms.resolve(index));
                last = m.end();
            }
            next.push_str(&current[last..]);
            current = next;
        }
        current
    }
}

fn strip_braces(body_text: &str) -> &str {
    body_text
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .unwrap_or(body_text)
}
