//! The statement scanner: atomized statement text into statement nodes.
//!
//! One alternation drives the scan: control-flow keywords (with or without a
//! parenthesized argument), block/declaration atoms, `case` arms, labels,
//! and semicolons. Text between hits is preserved verbatim as `Raw`
//! segments, so the emitted code keeps the source's line structure.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{declarations, trim_spaces, Transformer, IDENT};
use crate::ast::{
    default_value_for_type, CatchStatement, ForHead, ForStatement, Label, MethodDecl,
    PrefixStatement, SimpleStatement, Statement, StatementsBlock, SwitchCase, VarDefinition,
    VarStatement, VarValue,
};

static NEXT_STATEMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"\b(catch|for|if|switch|while|with)\s*"B(\d+)"|\b(do|else|finally|return|throw|try|break|continue)\b|"([ADEH])(\d+)"|\b(case)\s+([^:]+):|\b({IDENT}\s*:)|(;)"#
    ))
    .expect("valid regex")
});

static MULTI_CATCH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(catch\s*"B\d+"\s*"A\d+")(\s*catch\s*"B\d+"\s*"A\d+")+"#)
        .expect("valid regex")
});

static ARRAY_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\s*"C\d+")+"#).expect("valid regex"));

static IN_KEYWORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bin\b").expect("valid regex"));

impl Transformer<'_> {
    /// Scans one statement stream into nodes and raw segments.
    pub(crate) fn transform_statements(&mut self, text: &str) -> Vec<Statement> {
        let text = pre_statements_transform(text);
        let mut res: Vec<Statement> = Vec::new();
        let mut last = 0usize;
        let mut cursor = 0usize;
        while let Some(caps) = NEXT_STATEMENT_RE.captures_at(&text, cursor) {
            let m = caps.get(0).expect("match group 0");
            cursor = m.end();
            if let Some(keyword) = caps.get(1) {
                // catch/for/if/switch/while/with with a paren group
                res.push(Statement::Raw(text[last..m.start()].to_string()));
                let atom_index: usize = caps[2].parse().expect("marker digits");
                let atom_text = self.sess.atoms.resolve(atom_index).to_string();
                match keyword.as_str() {
                    "for" => res.push(Statement::For(ForStatement {
                        head: self.transform_for_expression(&atom_text),
                    })),
                    "catch" => res.push(Statement::Catch(CatchStatement {
                        params: self.transform_params(&atom_text),
                    })),
                    other => res.push(Statement::Prefix(PrefixStatement {
                        keyword: other.to_string(),
                        argument: Some(self.transform_expression(&atom_text)),
                    })),
                }
            } else if let Some(keyword) = caps.get(3) {
                // bare keyword: do/else/finally/return/throw/try/break/continue
                res.push(Statement::Raw(text[last..m.start()].to_string()));
                res.push(Statement::Prefix(PrefixStatement {
                    keyword: keyword.as_str().to_string(),
                    argument: None,
                }));
            } else if caps.get(4).is_some() {
                // a block/method/class/function atom in statement position
                let space = &text[last..m.start()];
                if !space.trim().is_empty() {
                    // not a statement: e.g. the brace group of `new int[] {..}`
                    continue;
                }
                res.push(Statement::Raw(space.to_string()));
                let atom_index: usize = caps[5].parse().expect("marker digits");
                let atom_text = self.sess.atoms.resolve(atom_index).to_string();
                match &caps[4] {
                    "D" => match self.transform_global_method(&atom_text) {
                        Some(method) => res.push(Statement::Method(method)),
                        None => res.push(Statement::Raw(atom_text)),
                    },
                    "E" => match self.transform_class_declaration(&atom_text) {
                        Some(class) => res.push(Statement::Class(class)),
                        None => res.push(Statement::Raw(atom_text)),
                    },
                    "H" => res.push(Statement::Function(self.transform_function(&atom_text))),
                    _ => res.push(Statement::Block(self.transform_statements_block(&atom_text))),
                }
            } else if caps.get(6).is_some() {
                // case <expr>:
                res.push(Statement::Raw(text[last..m.start()].to_string()));
                res.push(Statement::Case(SwitchCase {
                    expr: self.transform_expression(caps[7].trim()),
                }));
            } else if let Some(label) = caps.get(8) {
                let space = &text[last..m.start()];
                if !space.trim().is_empty() {
                    // not a label: the second half of a ?: expression
                    continue;
                }
                res.push(Statement::Raw(space.to_string()));
                res.push(Statement::Label(Label {
                    text: label.as_str().to_string(),
                }));
            } else {
                // semicolon: everything since the last hit is one statement
                let segment = trim_spaces(&text[last..m.start()]);
                res.push(Statement::Raw(segment.left.to_string()));
                res.push(self.transform_statement(segment.middle));
                res.push(Statement::Raw(format!("{};\n", segment.right)));
            }
            last = cursor;
        }
        let tail = trim_spaces(&text[last..]);
        res.push(Statement::Raw(tail.left.to_string()));
        if !tail.middle.is_empty() {
            res.push(self.transform_statement(tail.middle));
            res.push(Statement::Raw(format!(";{}", tail.right)));
        }
        res
    }

    /// Transforms a `{..}` atom into a statements block.
    pub(crate) fn transform_statements_block(&mut self, block_text: &str) -> StatementsBlock {
        let inner = block_text
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .unwrap_or(block_text);
        let content = trim_spaces(inner);
        StatementsBlock {
            statements: self.transform_statements(content.middle),
        }
    }

    /// A single statement: a variable declaration list if it parses as one,
    /// otherwise an expression.
    fn transform_statement(&mut self, text: &str) -> Statement {
        if let Some(field) = declarations::parse_field(text) {
            let default = default_value_for_type(&field.var_type);
            let definitions_text = field.definitions.to_string();
            let var_type = field.var_type;
            let definitions = definitions_text
                .split(',')
                .map(|def| self.transform_var_definition(def, default))
                .collect();
            return Statement::Var(VarStatement {
                definitions,
                var_type,
            });
        }
        Statement::Simple(SimpleStatement {
            expr: self.transform_expression(text),
        })
    }

    /// `name [= expr]`, with array suffix markers scrubbed off the name.
    pub(crate) fn transform_var_definition(
        &mut self,
        def: &str,
        default: &'static str,
    ) -> VarDefinition {
        match def.find('=') {
            None => VarDefinition {
                name: clean_definition_name(def),
                value: VarValue::Default(default),
            },
            Some(eq) => VarDefinition {
                name: clean_definition_name(&def[..eq]),
                value: VarValue::Expr(self.transform_expression(&def[eq + 1..])),
            },
        }
    }

    /// Classifies a `for` head into its three source forms.
    fn transform_for_expression(&mut self, paren_text: &str) -> ForHead {
        let inner = &paren_text[1..paren_text.len() - 1];
        if IN_KEYWORD_RE.is_match(paren_text) {
            let mut parts = IN_KEYWORD_RE.splitn(inner, 2);
            let init = parts.next().unwrap_or("");
            let container = parts.next().unwrap_or("");
            return ForHead::In {
                init: Box::new(self.transform_statement(init.trim())),
                container: self.transform_expression(container.trim()),
            };
        }
        if paren_text.contains(':') && !paren_text.contains(';') {
            let (init, container) = inner.split_once(':').unwrap_or((inner, ""));
            return ForHead::Each {
                init: Box::new(self.transform_statement(init.trim())),
                container: self.transform_expression(container.trim()),
            };
        }
        let mut parts = inner.splitn(3, ';');
        let init = parts.next().unwrap_or("");
        let condition = parts.next().unwrap_or("");
        let step = parts.next().unwrap_or("");
        ForHead::Classic {
            init: Box::new(self.transform_statement(init.trim())),
            condition: self.transform_expression(condition),
            step: self.transform_expression(step),
        }
    }

    /// A sketch-level method atom.
    fn transform_global_method(&mut self, atom_text: &str) -> Option<MethodDecl> {
        let header = declarations::parse_method(atom_text)?;
        let params_text = self.sess.atoms.resolve(header.params_atom).to_string();
        let body = match header.body_atom {
            Some(index) => {
                let body_text = self.sess.atoms.resolve(index).to_string();
                self.transform_statements_block(&body_text)
            }
            None => StatementsBlock::default(),
        };
        Some(MethodDecl {
            name: header.name,
            params: self.transform_params(&params_text),
            body,
        })
    }
}

/// Collapses a chain of `catch` clauses to its first one: the emitted code
/// has a single untyped binding, so later clauses could never be reached.
fn pre_statements_transform(statements: &str) -> String {
    MULTI_CATCH_RE.replace_all(statements, "$1").into_owned()
}

fn clean_definition_name(name: &str) -> String {
    ARRAY_SUFFIX_RE.replace_all(name, "").trim().to_string()
}
