//! IR Printer - Emits JavaScript strings from IR nodes
//!
//! The printer walks an `IRNode` tree and writes source text. It owns all
//! formatting decisions: indentation, quoting of property keys and string
//! literals, and the parentheses the grammar requires (an arrow function
//! returning an object literal, member access on an arrow function, ...).

use crate::ir::{IRNode, IRParam, IRProperty, IRPropertyKey};

const INDENT_UNIT: &str = "    ";

pub struct IRPrinter {
    output: String,
    indent_level: u32,
}

impl IRPrinter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
        }
    }

    /// Print one node with no leading indentation.
    pub fn emit_to_string(node: &IRNode) -> String {
        let mut printer = Self::new();
        printer.emit_node(node);
        printer.finish()
    }

    /// Start printing at the given indentation level (for members spliced
    /// into an existing class body).
    pub fn with_indent(indent_level: u32) -> Self {
        Self {
            output: String::new(),
            indent_level,
        }
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn write_line(&mut self) {
        self.output.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(INDENT_UNIT);
        }
    }

    fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn emit_node(&mut self, node: &IRNode) {
        match node {
            IRNode::NumericLiteral(text) => self.write(text),
            IRNode::StringLiteral(value) => self.emit_string_literal(value),
            IRNode::BooleanLiteral(value) => self.write(if *value { "true" } else { "false" }),
            IRNode::NullLiteral => self.write("null"),
            IRNode::Undefined => self.write("void 0"),
            IRNode::RegularExpressionLiteral(text) => self.write(text),
            IRNode::Identifier(name) => self.write(name),
            IRNode::This => self.write("this"),
            IRNode::PrefixUnaryExpr { operator, operand } => {
                self.write(operator);
                let is_word = operator.chars().all(|c| c.is_ascii_alphabetic());
                let needs_space = is_word
                    || matches!(
                        operand.as_ref(),
                        IRNode::PrefixUnaryExpr { operator: inner, .. }
                            if inner.starts_with(operator.as_str())
                    );
                if needs_space {
                    self.write(" ");
                }
                self.emit_node(operand);
            }
            IRNode::CallExpr { callee, arguments } => {
                self.emit_member_target(callee);
                self.write("(");
                self.emit_comma_separated(arguments);
                self.write(")");
            }
            IRNode::NewExpr { callee, arguments } => {
                self.write("new ");
                self.emit_member_target(callee);
                self.write("(");
                self.emit_comma_separated(arguments);
                self.write(")");
            }
            IRNode::PropertyAccess { object, property } => {
                self.emit_member_target(object);
                self.write(".");
                self.write(property);
            }
            IRNode::ElementAccess { object, index } => {
                self.emit_member_target(object);
                self.write("[");
                self.emit_node(index);
                self.write("]");
            }
            IRNode::Parenthesized(inner) => {
                self.write("(");
                self.emit_node(inner);
                self.write(")");
            }
            IRNode::ArrayLiteral(elements) => {
                self.write("[");
                self.emit_comma_separated(elements);
                self.write("]");
            }
            IRNode::ObjectLiteral {
                properties,
                multi_line,
            } => {
                if *multi_line {
                    self.emit_object_literal_multiline(properties);
                } else {
                    self.emit_object_literal_single_line(properties);
                }
            }
            IRNode::ArrowFunction {
                parameters,
                body,
                is_async,
            } => {
                self.emit_arrow_head(parameters, *is_async);
                if matches!(body.as_ref(), IRNode::ObjectLiteral { .. }) {
                    self.write("(");
                    self.emit_node(body);
                    self.write(")");
                } else {
                    self.emit_node(body);
                }
            }
            IRNode::ArrowFunctionBlock {
                parameters,
                body,
                is_async,
            } => {
                self.emit_arrow_head(parameters, *is_async);
                self.emit_block(body);
            }
            IRNode::AwaitExpr(inner) => {
                self.write("await ");
                self.emit_node(inner);
            }
            IRNode::ImportCall(specifier) => {
                self.write("import(");
                self.emit_string_literal(specifier);
                self.write(")");
            }
            IRNode::ConstDecl { name, initializer } => {
                self.write("const ");
                self.write(name);
                self.write(" = ");
                self.emit_node(initializer);
                self.write(";");
            }
            IRNode::ExpressionStatement(expr) => {
                self.emit_node(expr);
                self.write(";");
            }
            IRNode::ReturnStatement(expr) => {
                self.write("return");
                if let Some(expr) = expr {
                    self.write(" ");
                    self.emit_node(expr);
                }
                self.write(";");
            }
            IRNode::ExportDefault(expr) => {
                self.write("export default ");
                self.emit_node(expr);
                self.write(";");
            }
            IRNode::StaticMethod { name, body } => {
                self.write("static ");
                self.write(name);
                self.write("() ");
                self.emit_block(body);
            }
            IRNode::Raw(text) => self.write(text),
            IRNode::Sequence(nodes) => {
                for (i, node) in nodes.iter().enumerate() {
                    if i > 0 {
                        self.write_line();
                        self.write_indent();
                    }
                    self.emit_node(node);
                }
            }
        }
    }

    /// Emit the object of a member access or call, parenthesized when the
    /// grammar would otherwise bind differently.
    fn emit_member_target(&mut self, node: &IRNode) {
        let needs_parens = matches!(
            node,
            IRNode::ArrowFunction { .. }
                | IRNode::ArrowFunctionBlock { .. }
                | IRNode::PrefixUnaryExpr { .. }
                | IRNode::AwaitExpr(_)
                | IRNode::ObjectLiteral { .. }
                | IRNode::NewExpr { .. }
        );
        if needs_parens {
            self.write("(");
            self.emit_node(node);
            self.write(")");
        } else {
            self.emit_node(node);
        }
    }

    fn emit_arrow_head(&mut self, params: &[IRParam], is_async: bool) {
        if is_async {
            self.write("async ");
        }
        self.write("(");
        self.emit_parameters(params);
        self.write(") => ");
    }

    fn emit_block(&mut self, body: &[IRNode]) {
        if body.is_empty() {
            self.write("{ }");
            return;
        }
        self.write("{");
        self.write_line();
        self.increase_indent();
        for stmt in body {
            self.write_indent();
            self.emit_node(stmt);
            self.write_line();
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    fn emit_comma_separated(&mut self, nodes: &[IRNode]) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_node(node);
        }
    }

    fn emit_object_literal_single_line(&mut self, properties: &[IRProperty]) {
        if properties.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{ ");
        for (i, prop) in properties.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_property(prop);
        }
        self.write(" }");
    }

    fn emit_object_literal_multiline(&mut self, properties: &[IRProperty]) {
        if properties.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.write_line();
        self.increase_indent();
        for (i, prop) in properties.iter().enumerate() {
            self.write_indent();
            self.emit_property(prop);
            if i < properties.len() - 1 {
                self.write(",");
            }
            self.write_line();
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    fn emit_parameters(&mut self, params: &[IRParam]) {
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if param.rest {
                self.write("...");
            }
            self.write(&param.name);
        }
    }

    fn emit_property(&mut self, prop: &IRProperty) {
        match &prop.key {
            IRPropertyKey::Shorthand(name) => {
                self.write(name);
                return;
            }
            IRPropertyKey::Spread => {
                self.write("...");
                self.emit_node(&prop.value);
                return;
            }
            IRPropertyKey::Identifier(name) => {
                if is_identifier_name(name) {
                    self.write(name);
                } else {
                    self.emit_string_literal(name);
                }
            }
            IRPropertyKey::StringLiteral(name) => self.emit_string_literal(name),
            IRPropertyKey::NumericLiteral(text) => self.write(text),
            IRPropertyKey::Computed(expr) => {
                self.write("[");
                self.emit_node(expr);
                self.write("]");
            }
        }
        self.write(": ");
        self.emit_node(&prop.value);
    }

    fn emit_string_literal(&mut self, value: &str) {
        // JSON string escaping is a valid JavaScript string literal.
        match serde_json::to_string(value) {
            Ok(quoted) => self.write(&quoted),
            Err(_) => {
                self.write("\"");
                self.write(value);
                self.write("\"");
            }
        }
    }
}

impl Default for IRPrinter {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `name` can be written as a bare property key.
pub fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c == '$' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c == '$' || c.is_alphanumeric())
}

#[cfg(test)]
#[path = "../tests/ir_printer.rs"]
mod tests;
