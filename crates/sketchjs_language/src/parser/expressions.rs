//! Expression lowering: atom expansion and the Java-ism rewrites.
//!
//! [`Transformer::transform_expression`] expands an expression's bracket
//! atoms back into text, applying a fixed sequence of rewrites at every
//! nesting level:
//!
//! - `new T[] {..}` loses its array-creation prefix; `new T[e][f]` becomes a
//!   `$p.createJavaArray` call; `new T() {..}` becomes an anonymous class
//! - paren-cast deletion, with `(int)` surviving as an `__int_cast` call
//! - `super(..)`/`super.`/`this(..)` become their `$`-helper forms
//! - numeric literals normalize (leading zeros, `f` suffixes)
//! - `frameRate`/`keyPressed`/`mousePressed` fork into value vs call names
//! - primitive-conversion calls become `parse*` calls
//! - the `pixels` pseudo-array becomes proxy method calls
//! - Java `String`/`Object` methods become `__`-helper calls, and
//!   `instanceof` becomes `__instanceof`, both iterated to a fixed point
//!
//! Function literals, anonymous classes, and object literals are cut out as
//! atoms of their own and re-enter the node as structured transforms behind
//! `!N` placeholders.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{declarations, trim_spaces, Transformer, DOTTED, IDENT};
use crate::ast::{
    ClassDecl, EmbeddedTransform, Expression, FunctionDecl, InlineObject, ObjectMember, Param,
    Params, TypeBody,
};
use sketchjs_base::AtomKind;

static NEW_ARRAY_INIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"\bnew\s+{DOTTED}(?:\s*"C\d+")+\s*("A\d+")"#
    ))
    .expect("valid regex")
});

static NEW_INLINE_CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"\bnew\s+{DOTTED}\s*"B\d+"\s*"A\d+""#)).expect("valid regex")
});

static INLINE_CLASS_PARSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"\bnew\s+({DOTTED})\s*"B\d+"\s*"A(\d+)""#)).expect("valid regex")
});

static FUNCTION_LITERAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"\bfunction(?:\s+{IDENT})?\s*"B\d+"\s*"A\d+""#)).expect("valid regex")
});

static NEW_ARRAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"\bnew\s+({DOTTED})\s*("C\d+"(?:\s*"C\d+")*)"#
    ))
    .expect("valid regex")
});

static LENGTH_CALL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\.\s*length)\s*"B\d+""#).expect("valid regex"));

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#([0-9A-Fa-f]{6})\b").expect("valid regex"));

static CAST_CANDIDATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""B(\d+)"(\s*(?:[0-9A-Za-z_$']|"B))"#).expect("valid regex")
});

static CAST_SHAPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"^\(\s*{DOTTED}\s*(?:"C\d+"\s*)*\)$"#)).expect("valid regex")
});

static INT_CAST_PAREN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(\s*int\s*\)$").expect("valid regex"));

static C_MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""C(\d+)""#).expect("valid regex"));

static EMPTY_DIMS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[\s*\]$").expect("valid regex"));

static INT_CAST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(int\)([^,\]\)\}?:*+\-/\^|%&~<>=]+)").expect("valid regex")
});

static SUPER_CALL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bsuper(\s*"B\d+")"#).expect("valid regex"));

static SUPER_MEMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bsuper(\s*\.)").expect("valid regex"));

static LEADING_ZERO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b0+((\d*)(?:\.\d+)?(?:[eE][\-+]?\d+)?[fF]?)\b").expect("valid regex")
});

static FLOAT_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\.?\d+\.?)[fF]\b").expect("valid regex"));

static MODULO_SPACING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^\s])%([^=\s])").expect("valid regex"));

static VALUE_HOOK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(frameRate|keyPressed|mousePressed)\b(\s*"B)?"#).expect("valid regex")
});

static PARSE_CALL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(boolean|byte|char|float|int)(\s*"B)"#).expect("valid regex")
});

static PIXELS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bpixels\b\s*(("C(\d+)")|\.length)?(\s*=([^,\]\)\}]+))?"#)
        .expect("valid regex")
});

static METHOD_RENAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"((?:'\d+'|\b{IDENT}\s*(?:"[BC]\d+")*)\s*\.\s*(?:{IDENT}\s*(?:"[BC]\d+"\s*)*\.\s*)*)(replace|replaceAll|replaceFirst|contains|equals|equalsIgnoreCase|hashCode|toCharArray|printStackTrace|split|startsWith|endsWith|codePointAt|matches)\s*"B(\d+)""#
    ))
    .expect("valid regex")
});

static TRAILING_DOT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.\s*$").expect("valid regex"));

static INSTANCEOF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"((?:'\d+'|\b{IDENT}\s*(?:"[BC]\d+")*\s*|\.\s*)+)instanceof\s+({DOTTED})"#
    ))
    .expect("valid regex")
});

static THIS_CALL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bthis(\s*"B\d+")"#).expect("valid regex"));

static ABC_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""[ABC](\d+)""#).expect("valid regex"));

static H_MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""H(\d+)""#).expect("valid regex"));
static F_MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""F(\d+)""#).expect("valid regex"));
static I_MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""I(\d+)""#).expect("valid regex"));

static INLINE_OBJECT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^\{{\s*(?:{IDENT}|'\d+')\s*:")).expect("valid regex")
});

static PARAM_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"\b({IDENT})\s*(?:"[ABC]\d+"\s*)*$"#)).expect("valid regex")
});

impl Transformer<'_> {
    /// Lowers an expression's text into an [`Expression`] node, cutting
    /// function literals, anonymous classes, and object literals out into
    /// structured transforms.
    pub(crate) fn transform_expression(&mut self, expr: &str) -> Expression {
        let expanded = self.expand_expression(expr);
        let mut transforms: Vec<EmbeddedTransform> = Vec::new();

        let with_functions = {
            let step = H_MARKER_RE.replace_all(&expanded, |caps: &Captures<'_>| {
                let index: usize = caps[1].parse().expect("marker digits");
                let text = self.sess.atoms.resolve(index).to_string();
                transforms.push(EmbeddedTransform::Function(self.transform_function(&text)));
                format!("!{}", transforms.len() - 1)
            });
            step.into_owned()
        };
        let with_classes = {
            let step = F_MARKER_RE.replace_all(&with_functions, |caps: &Captures<'_>| {
                let index: usize = caps[1].parse().expect("marker digits");
                let text = self.sess.atoms.resolve(index).to_string();
                match self.transform_inline_class(&text) {
                    Some(class) => {
                        transforms.push(EmbeddedTransform::InlineClass(Box::new(class)));
                        format!("!{}", transforms.len() - 1)
                    }
                    None => text,
                }
            });
            step.into_owned()
        };
        let with_objects = {
            let step = I_MARKER_RE.replace_all(&with_classes, |caps: &Captures<'_>| {
                let index: usize = caps[1].parse().expect("marker digits");
                let text = self.sess.atoms.resolve(index).to_string();
                transforms.push(EmbeddedTransform::InlineObject(
                    self.transform_inline_object(&text),
                ));
                format!("!{}", transforms.len() - 1)
            });
            step.into_owned()
        };

        Expression {
            text: with_objects,
            transforms,
        }
    }

    /// Recursively expands bracket atoms back into text, rewriting at each
    /// level. A brace atom re-expands as an array literal unless it opens
    /// with a `label:` prefix, which marks an inline object instead.
    fn expand_expression(&mut self, expr: &str) -> String {
        if expr.len() >= 2 {
            let first = expr.as_bytes()[0];
            if first == b'(' || first == b'[' {
                let inner = self.expand_expression(&expr[1..expr.len() - 1]);
                return format!(
                    "{}{}{}",
                    &expr[..1],
                    inner,
                    &expr[expr.len() - 1..]
                );
            }
            if first == b'{' {
                if INLINE_OBJECT_RE.is_match(expr) {
                    let marker = self
                        .sess
                        .atoms
                        .add(AtomKind::InlineObject, expr[1..expr.len() - 1].to_string());
                    return format!("{{{marker}}}");
                }
                let inner = self.expand_expression(&expr[1..expr.len() - 1]);
                return format!("[{inner}]");
            }
        }
        let trimmed = trim_spaces(expr);
        let rewritten = self.pre_expression_transform(trimmed.middle);
        let mut expanded = String::with_capacity(rewritten.len());
        let mut last = 0;
        // Manual marker walk: the closure form would need `self` twice.
        while let Some(caps) = ABC_MARKER_RE.captures_at(&rewritten, last) {
            let m = caps.get(0).expect("match group 0");
            expanded.push_str(&rewritten[last..m.start()]);
            let index: usize = caps[1].parse().expect("marker digits");
            let atom_text = self.sess.atoms.resolve(index).to_string();
            expanded.push_str(&self.expand_expression(&atom_text));
            last = m.end();
        }
        expanded.push_str(&rewritten[last..]);
        trimmed.untrim(&expanded)
    }

    /// The rewrite sequence applied to one nesting level of expression text.
    fn pre_expression_transform(&mut self, expr: &str) -> String {
        let mut s = expr.to_string();

        // new T[] {..} --> {..}
        s = NEW_ARRAY_INIT_RE
            .replace_all(&s, |caps: &Captures<'_>| caps[1].to_string())
            .into_owned();

        // new T() {..} --> anonymous class atom
        s = NEW_INLINE_CLASS_RE
            .replace_all(&s, |caps: &Captures<'_>| {
                self.sess.atoms.add(AtomKind::InlineClass, caps[0].to_string())
            })
            .into_owned();

        // function literals --> function atom
        s = FUNCTION_LITERAL_RE
            .replace_all(&s, |caps: &Captures<'_>| {
                self.sess.atoms.add(AtomKind::Function, caps[0].to_string())
            })
            .into_owned();

        // new T[e][f] --> $p.createJavaArray('T', [e, f])
        s = NEW_ARRAY_RE
            .replace_all(&s, |caps: &Captures<'_>| {
                let mut dims = Vec::new();
                for dim in C_MARKER_RE.captures_iter(&caps[2]) {
                    let index: usize = dim[1].parse().expect("marker digits");
                    let text = self.sess.atoms.resolve(index);
                    let inner = text[1..text.len() - 1].trim();
                    dims.push(if inner.is_empty() { "null" } else { inner }.to_string());
                }
                format!("$p.createJavaArray('{}', [{}])", &caps[1], dims.join(", "))
            })
            .into_owned();

        // .length() --> .length
        s = LENGTH_CALL_RE.replace_all(&s, "$1").into_owned();

        // #RRGGBB --> 0xFFRRGGBB
        s = HEX_COLOR_RE
            .replace_all(&s, |caps: &Captures<'_>| format!("0xFF{}", &caps[1]))
            .into_owned();

        // (T)x --> x, except (int)x which survives reified for the next rule
        s = CAST_CANDIDATE_RE
            .replace_all(&s, |caps: &Captures<'_>| {
                let index: usize = caps[1].parse().expect("marker digits");
                let atom = self.sess.atoms.resolve(index).to_string();
                let next = &caps[2];
                if !CAST_SHAPE_RE.is_match(&atom) {
                    return caps[0].to_string();
                }
                if INT_CAST_PAREN_RE.is_match(&atom) {
                    return format!("(int){next}");
                }
                if let Some(dim) = C_MARKER_RE.captures(&atom) {
                    // `(T[])` keeps cast status only with empty dims.
                    let dim_index: usize = dim[1].parse().expect("marker digits");
                    if !EMPTY_DIMS_RE.is_match(self.sess.atoms.resolve(dim_index)) {
                        return caps[0].to_string();
                    }
                }
                next.to_string()
            })
            .into_owned();

        // (int)x --> __int_cast(x)
        s = INT_CAST_RE
            .replace_all(&s, |caps: &Captures<'_>| format!("__int_cast({})", &caps[1]))
            .into_owned();

        // super(..) --> $superCstr(..), super. --> $super.
        s = SUPER_CALL_RE
            .replace_all(&s, |caps: &Captures<'_>| format!("$superCstr{}", &caps[1]))
            .into_owned();
        s = SUPER_MEMBER_RE
            .replace_all(&s, |caps: &Captures<'_>| format!("$super{}", &caps[1]))
            .into_owned();

        // 000.43 --> 0.43 and 0010f --> 10f, but octal-looking 0010 stays
        s = LEADING_ZERO_RE
            .replace_all(&s, |caps: &Captures<'_>| {
                let number = &caps[1];
                let int_part = &caps[2];
                if number == int_part {
                    return caps[0].to_string();
                }
                if int_part.is_empty() {
                    format!("0{number}")
                } else {
                    number.to_string()
                }
            })
            .into_owned();

        // 3.5f --> 3.5
        s = FLOAT_SUFFIX_RE.replace_all(&s, "$1").into_owned();

        // breathing room around % so it cannot read as a regex context
        s = MODULO_SPACING_RE.replace_all(&s, "$1 % $2").into_owned();

        // value reads of frameRate/keyPressed/mousePressed fork from calls
        s = VALUE_HOOK_RE
            .replace_all(&s, |caps: &Captures<'_>| {
                if caps.get(2).is_some() {
                    caps[0].to_string()
                } else {
                    format!("__{}", &caps[1])
                }
            })
            .into_owned();

        // boolean(x) --> parseBoolean(x), likewise byte/char/float/int
        s = PARSE_CALL_RE
            .replace_all(&s, |caps: &Captures<'_>| {
                let name = &caps[1];
                let mut renamed = String::from("parse");
                let mut chars = name.chars();
                if let Some(first) = chars.next() {
                    renamed.push(first.to_ascii_uppercase());
                    renamed.push_str(chars.as_str());
                }
                format!("{renamed}{}", &caps[2])
            })
            .into_owned();

        // the pixels pseudo-array becomes proxy calls
        s = PIXELS_RE
            .replace_all(&s, |caps: &Captures<'_>| self.rewrite_pixels(caps))
            .into_owned();

        // subject.replace(..) --> __replace(subject, ..), iterated for chains
        loop {
            let mut changed = false;
            let pass = METHOD_RENAME_RE.replace_all(&s, |caps: &Captures<'_>| {
                changed = true;
                let subject = TRAILING_DOT_RE.replace(&caps[1], "").into_owned();
                let args_index: usize = caps[3].parse().expect("marker digits");
                let args_atom = self.sess.atoms.resolve(args_index).to_string();
                let args = trim_spaces(&args_atom[1..args_atom.len() - 1]).middle.to_string();
                let call = if args.is_empty() {
                    format!("({subject})")
                } else {
                    format!("({subject},{args})")
                };
                let marker = self.sess.atoms.add(AtomKind::Paren, call);
                format!("__{}{}", &caps[2], marker)
            });
            if !changed {
                break;
            }
            s = pass.into_owned();
        }

        // x instanceof T --> __instanceof(x, T), iterated
        loop {
            let mut changed = false;
            let pass = INSTANCEOF_RE.replace_all(&s, |caps: &Captures<'_>| {
                changed = true;
                let subject = caps[1].trim_end();
                let call = format!("({subject}, {})", &caps[2]);
                let marker = self.sess.atoms.add(AtomKind::Paren, call);
                format!("__instanceof{marker}")
            });
            if !changed {
                break;
            }
            s = pass.into_owned();
        }

        // this(..) --> $constr(..)
        s = THIS_CALL_RE
            .replace_all(&s, |caps: &Captures<'_>| format!("$constr{}", &caps[1]))
            .into_owned();

        s
    }

    fn rewrite_pixels(&mut self, caps: &Captures<'_>) -> String {
        let length_suffix = caps
            .get(1)
            .is_some_and(|suffix| suffix.as_str().starts_with('.'));
        let right_side = match (caps.get(4), caps.get(5)) {
            (Some(_), Some(right)) if !right.as_str().trim_start().starts_with('=') => {
                Some(right.as_str())
            }
            (Some(equals), _) => {
                // `pixels ==` comparison: not an assignment; re-emit the tail.
                return format!("{}{}", self.rewrite_pixels_bare(caps), equals.as_str());
            }
            _ => None,
        };
        if let Some(index) = caps.get(3) {
            let atom_index: usize = index.as_str().parse().expect("marker digits");
            let atom = self.sess.atoms.resolve(atom_index).to_string();
            let inner = atom[1..atom.len() - 1].to_string();
            return match right_side {
                Some(value) => {
                    let marker = self
                        .sess
                        .atoms
                        .add(AtomKind::Paren, format!("({inner},{value})"));
                    format!("pixels.setPixel{marker}")
                }
                None => {
                    let marker = self.sess.atoms.add(AtomKind::Paren, format!("({inner})"));
                    format!("pixels.getPixel{marker}")
                }
            };
        }
        if length_suffix {
            let marker = self.sess.atoms.add(AtomKind::Paren, "()".to_string());
            return format!("pixels.getLength{marker}");
        }
        if let Some(value) = right_side {
            let marker = self
                .sess
                .atoms
                .add(AtomKind::Paren, format!("({value})"));
            return format!("pixels.set{marker}");
        }
        let marker = self.sess.atoms.add(AtomKind::Paren, "()".to_string());
        format!("pixels.toArray{marker}")
    }

    /// The no-assignment reading of a `pixels` match, used when an `=` turns
    /// out to open `==`.
    fn rewrite_pixels_bare(&mut self, caps: &Captures<'_>) -> String {
        if let Some(index) = caps.get(3) {
            let atom_index: usize = index.as_str().parse().expect("marker digits");
            let atom = self.sess.atoms.resolve(atom_index).to_string();
            let inner = atom[1..atom.len() - 1].to_string();
            let marker = self.sess.atoms.add(AtomKind::Paren, format!("({inner})"));
            return format!("pixels.getPixel{marker}");
        }
        if caps
            .get(1)
            .is_some_and(|suffix| suffix.as_str().starts_with('.'))
        {
            let marker = self.sess.atoms.add(AtomKind::Paren, "()".to_string());
            return format!("pixels.getLength{marker}");
        }
        let marker = self.sess.atoms.add(AtomKind::Paren, "()".to_string());
        format!("pixels.toArray{marker}")
    }

    /// Parses a parameter list atom `(type a, type b, type... rest)`.
    pub(crate) fn transform_params(&mut self, paren_text: &str) -> Params {
        let inner = paren_text
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(paren_text)
            .trim();
        let mut params = Params::default();
        if inner.is_empty() {
            return params;
        }
        let pieces: Vec<&str> = inner.split(',').collect();
        let last = pieces.len() - 1;
        for (i, piece) in pieces.into_iter().enumerate() {
            let Some(caps) = PARAM_NAME_RE.captures(piece) else {
                continue;
            };
            let param = Param {
                name: caps[1].to_string(),
            };
            if i == last && piece.contains("...") {
                params.rest = Some(param);
                break;
            }
            params.params.push(param);
        }
        params
    }

    /// Parses an `F` atom (`new T "B.." "A.."`) into an anonymous class with
    /// the synthetic name `T$classN`, whose body implements `T`.
    pub(crate) fn transform_inline_class(&mut self, atom_text: &str) -> Option<ClassDecl> {
        let caps = INLINE_CLASS_PARSE_RE.captures(atom_text)?;
        let interface = caps[1].split_whitespace().collect::<String>();
        let body_atom: usize = caps[2].parse().ok()?;

        let outer = self.sess.current_class;
        let id = self.sess.classes.declare(String::new(), outer, false);
        let name = format!("{interface}${}", id.tag());
        self.sess.classes.get_mut(id).name = name.clone();
        self.sess.current_class = Some(id);
        let body_text = self.sess.atoms.resolve(body_atom).to_string();
        let body = self.transform_class_body(&body_text, id, &name, &[], &[interface]);
        self.sess.current_class = outer;

        Some(ClassDecl {
            id,
            name,
            body: TypeBody::Class(body),
            is_static: false,
        })
    }

    /// Parses an `H` atom into a function literal/declaration.
    pub(crate) fn transform_function(&mut self, atom_text: &str) -> FunctionDecl {
        match declarations::parse_function(atom_text) {
            Some(header) => {
                let params_text = self.sess.atoms.resolve(header.params_atom).to_string();
                let body_text = self.sess.atoms.resolve(header.body_atom).to_string();
                FunctionDecl {
                    name: header.name,
                    params: self.transform_params(&params_text),
                    body: self.transform_statements_block(&body_text),
                }
            }
            None => FunctionDecl {
                name: None,
                params: Params::default(),
                body: Default::default(),
            },
        }
    }

    /// Parses an `I` atom (object-literal members without the braces).
    fn transform_inline_object(&mut self, members_text: &str) -> InlineObject {
        let mut object = InlineObject::default();
        for member in members_text.split(',') {
            match member.find(':') {
                Some(colon) => object.members.push(ObjectMember {
                    label: Some(member[..colon].trim().to_string()),
                    value: self.transform_expression(member[colon + 1..].trim()),
                }),
                None => object.members.push(ObjectMember {
                    label: None,
                    value: self.transform_expression(member),
                }),
            }
        }
        object
    }
}
