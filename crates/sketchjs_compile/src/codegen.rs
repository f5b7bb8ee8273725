//! The JavaScript renderer.
//!
//! A single read-only walk over the AST produces the output text. The walk
//! threads an explicit *name-resolution stack*: every scope that can bind
//! names (the sketch root, a class body, a parameter list, a statements
//! block, an object literal) pushes a frame, and each free identifier in
//! expression text is rewritten by the topmost frame that knows it:
//!
//! - `this` → the `$this_K.$self`/`$this_K` pair a class frame selects
//! - a class field → `$this_K.name`, or `ClassName.name` when static
//! - an inner class → `$this_K.name`
//! - a class method → `$this_K.$self.name`, or `ClassName.name` when static
//! - a local, parameter, or catch binding → untouched
//! - a host-runtime member → `$p.name`
//! - anything else → untouched
//!
//! Classes emit as IIFEs that build a constructor function: self pointer,
//! `$superCstr`, inner functions, inner classes (heaviest first), fields,
//! overload-registered methods, trailing code, constructors, and the
//! arity dispatcher `$constr`. Interfaces emit a stub constructor that
//! throws, plus their metadata.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};

use sketchjs_language::ast::{
    local_names, CatchStatement, ClassBody, ClassDecl, ClassMethod, Constructor,
    EmbeddedTransform, Expression, ForHead, FunctionDecl, InlineObject, InterfaceBody,
    MethodDecl, Params, PrefixStatement, Root, Statement, StatementsBlock, TypeBody,
    VarDefinition, VarStatement, VarValue,
};
use sketchjs_language::builtins;
use sketchjs_language::{ClassRegistry, TranslateOptions};

static IDENTIFIER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(\.\s*)?((?:\b[A-Za-z_]|\$)[0-9A-Za-z_$]*)(\s*\.\s*([A-Za-z_$][0-9A-Za-z_$]*)(\s*\()?)?",
    )
    .expect("valid regex")
});

static TRANSFORM_SLOT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!(\d+)").expect("valid regex"));

static CSTR_REFERENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(superCstr|constr)\b").expect("valid regex"));

static VAR_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*var\s*").expect("valid regex"));

/// A free identifier occurrence, as the substitution regex sees it.
struct Subject<'t> {
    name: &'t str,
    member: Option<&'t str>,
    /// `true` when the member access is immediately called: `this.x()`.
    call: bool,
}

/// One entry of the name-resolution stack.
enum Frame {
    /// The sketch root: document locals, then the host-runtime globals.
    Root { locals: FxHashSet<String> },
    /// A class body with its aggregated member tables.
    Class(ClassFrame),
    /// Parameter lists, block locals, catch bindings.
    Names(FxHashSet<String>),
    /// An object literal: `this` stays `this`.
    ObjectLiteral,
}

struct ClassFrame {
    class_name: String,
    self_id: String,
    fields: FxHashMap<String, bool>,
    methods: FxHashMap<String, bool>,
    inners: FxHashSet<String>,
}

/// Renders one analyzed document.
pub struct Emitter<'a> {
    registry: &'a ClassRegistry,
    globals: FxHashSet<String>,
    frames: Vec<Frame>,
    iterator_seed: u32,
}

impl<'a> Emitter<'a> {
    pub fn new(registry: &'a ClassRegistry, options: &TranslateOptions) -> Self {
        let mut globals: FxHashSet<String> = builtins::GLOBAL_MEMBERS
            .iter()
            .map(|name| (*name).to_string())
            .collect();
        globals.extend(options.extra_globals().map(str::to_string));
        Emitter {
            registry,
            globals,
            frames: Vec::new(),
            iterator_seed: 0,
        }
    }

    /// Emits the whole document: classes first (heaviest weight first), then
    /// the remaining statements, wrapped in the host closure.
    pub fn render(&mut self, root: &Root) -> String {
        let mut classes: Vec<&ClassDecl> = Vec::new();
        let mut others: Vec<&Statement> = Vec::new();
        for statement in &root.statements {
            match statement {
                Statement::Class(class) => classes.push(class),
                other => others.push(other),
            }
        }
        classes.sort_by(|a, b| self.registry.weight(b.id).cmp(&self.registry.weight(a.id)));

        self.frames.push(Frame::Root {
            locals: local_names(&root.statements),
        });
        let mut out = String::from("// this code was autogenerated from PDE\n(function($p) {\n");
        for class in classes {
            out.push_str(&self.render_global_class(class));
        }
        out.push('\n');
        for statement in others {
            out.push_str(&self.render_statement(statement));
        }
        out.push_str("\n})");
        self.frames.pop();
        out
    }

    fn render_statement(&mut self, statement: &Statement) -> String {
        match statement {
            Statement::Raw(text) => text.clone(),
            Statement::Simple(simple) => self.render_expression(&simple.expr),
            Statement::Var(var) => self.render_var(var),
            Statement::Block(block) => self.render_block(block),
            Statement::For(for_stmt) => format!("for {}", self.render_for_head(&for_stmt.head)),
            Statement::Catch(catch) => self.render_catch(catch),
            Statement::Prefix(prefix) => self.render_prefix(prefix),
            Statement::Case(case) => format!("case {}:", self.render_expression(&case.expr)),
            Statement::Label(label) => label.text.clone(),
            Statement::Class(class) => self.render_global_class(class),
            Statement::Method(method) => self.render_global_method(method),
            Statement::Function(function) => self.render_function(function),
        }
    }

    // ------------------------------------------------------------------
    // Expressions and identifier substitution
    // ------------------------------------------------------------------

    fn render_expression(&mut self, expr: &Expression) -> String {
        let substituted = self.substitute_identifiers(&expr.text);
        // splice rendered transforms back over their `!N` slots
        let mut out = String::with_capacity(substituted.len());
        let mut last = 0;
        while let Some(caps) = TRANSFORM_SLOT_RE.captures_at(&substituted, last) {
            let m = caps.get(0).expect("match group 0");
            let index: usize = caps[1].parse().expect("slot digits");
            match expr.transforms.get(index) {
                Some(transform) => {
                    out.push_str(&substituted[last..m.start()]);
                    out.push_str(&self.render_transform(transform));
                }
                // a literal `!N` that never was a slot
                None => out.push_str(&substituted[last..m.end()]),
            }
            last = m.end();
        }
        out.push_str(&substituted[last..]);
        out
    }

    fn render_transform(&mut self, transform: &EmbeddedTransform) -> String {
        match transform {
            EmbeddedTransform::Function(function) => self.render_function(function),
            EmbeddedTransform::InlineClass(class) => {
                format!("new ({})", self.render_type_body(class))
            }
            EmbeddedTransform::InlineObject(object) => self.render_inline_object(object),
        }
    }

    fn substitute_identifiers(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        while let Some(caps) = IDENTIFIER_RE.captures_at(text, last) {
            let m = caps.get(0).expect("match group 0");
            out.push_str(&text[last..m.start()]);
            if caps.get(1).is_some() {
                // preceded by a dot: member position, leave it alone
                out.push_str(m.as_str());
            } else {
                let subject = Subject {
                    name: caps.get(2).expect("identifier").as_str(),
                    member: caps.get(4).map(|m| m.as_str()),
                    call: caps.get(5).is_some(),
                };
                out.push_str(&self.resolve(&subject));
                if let Some(suffix) = caps.get(3) {
                    out.push_str(suffix.as_str());
                }
            }
            last = m.end().max(m.start() + 1);
        }
        out.push_str(&text[last.min(text.len())..]);
        out
    }

    fn resolve(&self, subject: &Subject<'_>) -> String {
        for frame in self.frames.iter().rev() {
            match frame {
                Frame::Names(names) => {
                    if names.contains(subject.name) {
                        return subject.name.to_string();
                    }
                }
                Frame::ObjectLiteral => {
                    if subject.name == "this" {
                        return "this".to_string();
                    }
                }
                Frame::Class(class) => {
                    if subject.name == "this" {
                        // a call or a bare value needs the published object;
                        // plain member access reads the raw self pointer
                        return if subject.call || subject.member.is_none() {
                            format!("{}.$self", class.self_id)
                        } else {
                            class.self_id.clone()
                        };
                    }
                    if let Some(&is_static) = class.fields.get(subject.name) {
                        return if is_static {
                            format!("{}.{}", class.class_name, subject.name)
                        } else {
                            format!("{}.{}", class.self_id, subject.name)
                        };
                    }
                    if class.inners.contains(subject.name) {
                        return format!("{}.{}", class.self_id, subject.name);
                    }
                    if let Some(&is_static) = class.methods.get(subject.name) {
                        return if is_static {
                            format!("{}.{}", class.class_name, subject.name)
                        } else {
                            format!("{}.$self.{}", class.self_id, subject.name)
                        };
                    }
                }
                Frame::Root { locals } => {
                    if locals.contains(subject.name) {
                        return subject.name.to_string();
                    }
                    if self.globals.contains(subject.name) {
                        return format!("$p.{}", subject.name);
                    }
                    return subject.name.to_string();
                }
            }
        }
        subject.name.to_string()
    }

    /// Resolves a bare (possibly dotted) type name with the current context,
    /// the way base-class and interface references are emitted.
    fn resolve_name(&self, name: &str) -> String {
        self.resolve(&Subject {
            name,
            member: None,
            call: false,
        })
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn render_var(&mut self, var: &VarStatement) -> String {
        let definitions: Vec<String> = var
            .definitions
            .iter()
            .map(|def| self.render_var_definition(def))
            .collect();
        format!("var {}", definitions.join(","))
    }

    fn render_var_definition(&mut self, def: &VarDefinition) -> String {
        let value = match &def.value {
            VarValue::Default(default) => (*default).to_string(),
            VarValue::Expr(expr) => self.render_expression(expr).trim().to_string(),
        };
        format!("{} = {}", def.name, value)
    }

    fn render_block(&mut self, block: &StatementsBlock) -> String {
        let locals = local_names(&block.statements);
        let pushed = if locals.is_empty() {
            false
        } else {
            self.frames.push(Frame::Names(locals));
            true
        };
        let mut out = String::from("{\n");
        for statement in &block.statements {
            out.push_str(&self.render_statement(statement));
        }
        out.push_str("\n}");
        if pushed {
            self.frames.pop();
        }
        out
    }

    fn render_prefix(&mut self, prefix: &PrefixStatement) -> String {
        match &prefix.argument {
            Some(argument) => format!("{} {}", prefix.keyword, self.render_expression(argument)),
            None => prefix.keyword.clone(),
        }
    }

    fn render_catch(&mut self, catch: &CatchStatement) -> String {
        format!("catch {}", render_params(&catch.params))
    }

    fn render_for_head(&mut self, head: &ForHead) -> String {
        match head {
            ForHead::Classic {
                init,
                condition,
                step,
            } => {
                let init = self.render_statement(init);
                let condition = self.render_expression(condition);
                let step = self.render_expression(step);
                format!("({init}; {condition}; {step})")
            }
            ForHead::In { init, container } => {
                let init = self.render_statement(init);
                let head = init.split('=').next().unwrap_or("").to_string();
                format!("({head} in {})", self.render_expression(container))
            }
            ForHead::Each { init, container } => {
                let init = self.render_statement(init);
                let iterator = format!("$it{}", self.iterator_seed);
                self.iterator_seed += 1;
                let variable = VAR_PREFIX_RE.replace(&init, "").into_owned();
                let variable = variable.split('=').next().unwrap_or("").to_string();
                let container = self.render_expression(container);
                format!(
                    "(var {iterator} = new $p.ObjectIterator({container}), {variable} = void(0); \
                     {iterator}.hasNext() && (({variable} = {iterator}.next()) || true);)"
                )
            }
        }
    }

    // ------------------------------------------------------------------
    // Functions, methods, object literals
    // ------------------------------------------------------------------

    fn render_function(&mut self, function: &FunctionDecl) -> String {
        let mut names: FxHashSet<String> = function.params.names().map(str::to_string).collect();
        // a plain function keeps the caller's `this`
        names.insert("this".to_string());
        self.frames.push(Frame::Names(names));
        let body = prepend_rest_binding(&function.params, self.render_block(&function.body));
        self.frames.pop();
        let mut out = String::from("function");
        if let Some(name) = &function.name {
            out.push(' ');
            out.push_str(name);
        }
        out.push_str(&render_params(&function.params));
        out.push(' ');
        out.push_str(&body);
        out
    }

    fn render_global_method(&mut self, method: &MethodDecl) -> String {
        let names: FxHashSet<String> = method.params.names().map(str::to_string).collect();
        self.frames.push(Frame::Names(names));
        let body = prepend_rest_binding(&method.params, self.render_block(&method.body));
        self.frames.pop();
        format!(
            "function {name}{params} {body}\n$p.addMethod($p, '{name}', {name}, {rest});\n",
            name = method.name,
            params = render_params(&method.params),
            body = body,
            rest = method.params.has_rest(),
        )
    }

    fn render_class_method(&mut self, method: &ClassMethod, method_id: &str) -> String {
        let names: FxHashSet<String> = method.params.names().map(str::to_string).collect();
        self.frames.push(Frame::Names(names));
        let body = prepend_rest_binding(&method.params, self.render_block(&method.body));
        self.frames.pop();
        format!(
            "function {method_id}{} {}\n",
            render_params(&method.params),
            body
        )
    }

    fn render_constructor(&mut self, cstr: &Constructor) -> String {
        let names: FxHashSet<String> = cstr.params.names().map(str::to_string).collect();
        self.frames.push(Frame::Names(names));
        let mut body = prepend_rest_binding(&cstr.params, self.render_block(&cstr.body));
        self.frames.pop();
        if !CSTR_REFERENCE_RE.is_match(&body) {
            // neither $superCstr nor $constr appears: chain up implicitly
            body = format!("{{\n$superCstr();\n{}", &body[1..]);
        }
        format!(
            "function $constr_{}{}{}\n",
            cstr.params.arity(),
            render_params(&cstr.params),
            body
        )
    }

    fn render_inline_object(&mut self, object: &InlineObject) -> String {
        self.frames.push(Frame::ObjectLiteral);
        let members: Vec<String> = object
            .members
            .iter()
            .map(|member| {
                let value = self.render_expression(&member.value);
                match &member.label {
                    Some(label) => format!("{label}: {value}"),
                    None => value,
                }
            })
            .collect();
        self.frames.pop();
        members.join(", ")
    }

    // ------------------------------------------------------------------
    // Classes and interfaces
    // ------------------------------------------------------------------

    fn render_global_class(&mut self, class: &ClassDecl) -> String {
        format!(
            "var {name} = {body};\n$p.{name} = {name};\n",
            name = class.name,
            body = self.render_type_body(class),
        )
    }

    fn render_type_body(&mut self, class: &ClassDecl) -> String {
        match &class.body {
            TypeBody::Class(body) => self.render_class_body(class, body),
            TypeBody::Interface(body) => self.render_interface_body(class, body),
        }
    }

    fn class_frame(&self, class: &ClassDecl, self_id: &str) -> ClassFrame {
        let mut fields = FxHashMap::default();
        let mut methods = FxHashMap::default();
        let mut inners = FxHashSet::default();
        self.registry
            .collect_members(class.id, &mut fields, &mut methods, &mut inners);
        ClassFrame {
            class_name: class.name.clone(),
            self_id: self_id.to_string(),
            fields,
            methods,
            inners,
        }
    }

    fn sorted_inners<'c>(&self, inner_classes: &'c [ClassDecl]) -> Vec<&'c ClassDecl> {
        let mut inners: Vec<&ClassDecl> = inner_classes.iter().collect();
        inners.sort_by(|a, b| self.registry.weight(b.id).cmp(&self.registry.weight(a.id)));
        inners
    }

    fn render_class_body(&mut self, class: &ClassDecl, body: &ClassBody) -> String {
        let self_id = format!("$this_{}", self.registry.scope_depth(class.id));
        let class_name = class.name.clone();
        let record = self.registry.get(class.id);
        let base_resolved = record.base.is_some();
        let resolved_interfaces: Vec<bool> =
            record.interfaces.iter().map(Option::is_some).collect();

        let mut result = format!("var {self_id} = this;\n");
        let mut static_defs = String::new();
        let mut metadata = String::new();

        // base and interface names resolve with the enclosing context
        let resolved_base = body.base_name.as_ref().map(|name| self.resolve_name(name));
        match &resolved_base {
            Some(base) => {
                result.push_str(&format!("var $super = {{ $upcast: {self_id} }};\n"));
                result.push_str(&format!(
                    "function $superCstr(){{{base}.apply($super,arguments);if(!('$self' in $super)) $p.extendClassChain($super)}}\n"
                ));
                metadata.push_str(&format!("{class_name}.$base = {base};\n"));
                if base_resolved {
                    static_defs.push_str(&format!(
                        "$p.extendStaticMembers({class_name}, {base});\n"
                    ));
                }
            }
            None => {
                result.push_str(&format!(
                    "function $superCstr(){{$p.extendClassChain({self_id})}}\n"
                ));
            }
        }
        if !body.interface_names.is_empty() {
            let mut resolved = Vec::new();
            for (i, name) in body.interface_names.iter().enumerate() {
                if !resolved_interfaces.get(i).copied().unwrap_or(false) {
                    continue;
                }
                let interface = self.resolve_name(name);
                static_defs.push_str(&format!(
                    "$p.extendInterfaceMembers({class_name}, {interface});\n"
                ));
                resolved.push(interface);
            }
            metadata.push_str(&format!(
                "{class_name}.$interfaces = [{}];\n",
                resolved.join(", ")
            ));
        }

        let frame = self.class_frame(class, &self_id);
        self.frames.push(Frame::Class(frame));

        if !body.functions.is_empty() {
            let functions: Vec<String> = body
                .functions
                .iter()
                .map(|function| self.render_function(function))
                .collect();
            result.push_str(&functions.join("\n"));
            result.push('\n');
        }

        for inner in self.sorted_inners(&body.inner_classes) {
            let inner_body = self.render_type_body(inner);
            if inner.is_static {
                static_defs.push_str(&format!(
                    "{class_name}.{inner_name} = {inner_body};\n",
                    inner_name = inner.name
                ));
                result.push_str(&format!(
                    "{self_id}.{inner_name} = {class_name}.{inner_name};\n",
                    inner_name = inner.name
                ));
            } else {
                result.push_str(&format!(
                    "{self_id}.{inner_name} = {inner_body};\n",
                    inner_name = inner.name
                ));
            }
        }

        for field in &body.fields {
            let definitions: Vec<String> = field
                .definitions
                .iter()
                .map(|def| self.render_var_definition(def))
                .collect();
            if field.is_static {
                static_defs.push_str(&format!(
                    "{class_name}.{};\n",
                    definitions.join(&format!(";\n{class_name}."))
                ));
                for def in &field.definitions {
                    result.push_str(&format!(
                        "$p.defineProperty({self_id}, '{name}', {{get: function(){{return {class_name}.{name}}}, set: function(value){{{class_name}.{name} = value}}}});\n",
                        name = def.name
                    ));
                }
            } else {
                result.push_str(&format!(
                    "{self_id}.{};\n",
                    definitions.join(&format!(";\n{self_id}."))
                ));
            }
        }

        let mut overloads: FxHashMap<String, u32> = FxHashMap::default();
        for method in &body.methods {
            let count = overloads.entry(method.name.clone()).or_insert(0);
            *count += 1;
            let mut method_id = format!("{}${}", method.name, method.params.arity());
            if *count > 1 {
                method_id.push_str(&format!("_{count}"));
            }
            let has_rest = method.params.has_rest();
            let function = self.render_class_method(method, &method_id);
            if method.is_static {
                static_defs.push_str(&function);
                static_defs.push_str(&format!(
                    "$p.addMethod({class_name}, '{name}', {method_id}, {has_rest});\n",
                    name = method.name
                ));
                result.push_str(&format!(
                    "$p.addMethod({self_id}, '{name}', {method_id}, {has_rest});\n",
                    name = method.name
                ));
            } else {
                result.push_str(&function);
                result.push_str(&format!(
                    "$p.addMethod({self_id}, '{name}', {method_id}, {has_rest});\n",
                    name = method.name
                ));
            }
        }

        for extra in &body.misc.extras {
            result.push_str(&format!("{};\n", self.substitute_identifiers(extra.trim())));
        }
        result.push_str(body.misc.tail.trim());
        result.push('\n');

        if !body.cstrs.is_empty() {
            let cstrs: Vec<String> = body
                .cstrs
                .iter()
                .map(|cstr| self.render_constructor(cstr))
                .collect();
            result.push_str(&cstrs.join("\n"));
            result.push('\n');
        }
        result.push_str("function $constr() {\n");
        let branches: Vec<String> = body
            .cstrs
            .iter()
            .map(|cstr| {
                let comparison = if cstr.params.has_rest() { ">=" } else { "===" };
                format!(
                    "if(arguments.length {comparison} {arity}) {{ $constr_{arity}.apply({self_id}, arguments); }}",
                    arity = cstr.params.arity()
                )
            })
            .collect();
        if !branches.is_empty() {
            result.push_str(&branches.join(" else "));
            result.push_str(" else ");
        }
        result.push_str("$superCstr();\n}\n");
        result.push_str("$constr.apply(null, arguments);\n");

        self.frames.pop();

        format!(
            "(function() {{\nfunction {class_name}() {{\n{result}}}\n{static_defs}{metadata}return {class_name};\n}})()"
        )
    }

    fn render_interface_body(&mut self, class: &ClassDecl, body: &InterfaceBody) -> String {
        let self_id = format!("$this_{}", self.registry.scope_depth(class.id));
        let class_name = class.name.clone();
        let record = self.registry.get(class.id);
        let resolved_flags: Vec<bool> = record.interfaces.iter().map(Option::is_some).collect();

        let mut static_defs = String::new();
        let mut metadata = String::new();

        if !body.base_names.is_empty() {
            let mut resolved = Vec::new();
            for (i, name) in body.base_names.iter().enumerate() {
                if !resolved_flags.get(i).copied().unwrap_or(false) {
                    continue;
                }
                let interface = self.resolve_name(name);
                static_defs.push_str(&format!(
                    "$p.extendInterfaceMembers({class_name}, {interface});\n"
                ));
                resolved.push(interface);
            }
            metadata.push_str(&format!(
                "{class_name}.$interfaces = [{}];\n",
                resolved.join(", ")
            ));
        }
        metadata.push_str(&format!("{class_name}.$isInterface = true;\n"));
        let methods_list = body
            .method_names
            .iter()
            .map(|name| format!("'{name}'"))
            .collect::<Vec<String>>()
            .join(", ");
        metadata.push_str(&format!("{class_name}.$methods = [{methods_list}];\n"));

        let frame = self.class_frame(class, &self_id);
        self.frames.push(Frame::Class(frame));

        for inner in self.sorted_inners(&body.inner_classes) {
            let inner_body = self.render_type_body(inner);
            static_defs.push_str(&format!(
                "{class_name}.{inner_name} = {inner_body};\n",
                inner_name = inner.name
            ));
        }
        for field in &body.fields {
            let definitions: Vec<String> = field
                .definitions
                .iter()
                .map(|def| self.render_var_definition(def))
                .collect();
            static_defs.push_str(&format!(
                "{class_name}.{};\n",
                definitions.join(&format!(";\n{class_name}."))
            ));
        }

        self.frames.pop();

        format!(
            "(function() {{\nfunction {class_name}() {{ throw \"Unable to create the interface\"; }}\n{static_defs}{metadata}return {class_name};\n}})()"
        )
    }
}

fn render_params(params: &Params) -> String {
    let names: Vec<&str> = params.names().collect();
    format!("({})", names.join(", "))
}

/// Binds the varargs parameter to the argument tail at the top of a body.
fn prepend_rest_binding(params: &Params, body: String) -> String {
    match &params.rest {
        Some(rest) => format!(
            "{{\nvar {} = Array.prototype.slice.call(arguments, {});\n{}",
            rest.name,
            params.arity(),
            &body[1..]
        ),
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn params_render_with_rest() {
        use sketchjs_language::ast::Param;
        let params = Params {
            params: vec![Param { name: "a".into() }],
            rest: Some(Param { name: "xs".into() }),
        };
        assert_eq!(render_params(&params), "(a, xs)");
        let body = prepend_rest_binding(&params, "{\nx();\n}".to_string());
        assert!(body.starts_with("{\nvar xs = Array.prototype.slice.call(arguments, 1);\n"));
    }

    #[test]
    fn resolver_prefers_locals_over_globals() {
        let registry = ClassRegistry::new();
        let options = TranslateOptions::default();
        let mut emitter = Emitter::new(&registry, &options);
        let mut locals = FxHashSet::default();
        locals.insert("size".to_string());
        emitter.frames.push(Frame::Root { locals });
        let resolved = emitter.substitute_identifiers("size(200, 200); fill(255);");
        assert_eq!(resolved, "size(200, 200); $p.fill(255);");
    }

    #[test]
    fn member_positions_stay_untouched() {
        let registry = ClassRegistry::new();
        let options = TranslateOptions::default();
        let mut emitter = Emitter::new(&registry, &options);
        emitter.frames.push(Frame::Root {
            locals: FxHashSet::default(),
        });
        let resolved = emitter.substitute_identifiers("img.width = width");
        assert_eq!(resolved, "img.width = $p.width");
    }
}
