//! Static value of string-producing expressions
//!
//! [`ConstantResolver`] answers "what string does this expression produce,
//! if that is knowable without running the program". It looks through
//! literals, parentheses, references to variables, string concatenation and
//! a fixed set of `String` methods with literal arguments. Everything else is
//! unresolvable, and so is any expression that needs an unresolvable part.
//! Values longer than `resolver.maxLength` UTF-16 units are unresolvable too.

use tracing::{debug, trace};

use crate::config::ResolverConfiguration;
use crate::syntax::{ExprShape, Qualifier, SyntaxTree};
use crate::value::{ConstValue, ValueType};

pub struct ConstantResolver<'t, T: SyntaxTree> {
    tree: &'t T,
    max_depth: usize,
    max_length: usize,
}

impl<'t, T: SyntaxTree> ConstantResolver<'t, T> {
    pub fn new(tree: &'t T) -> Self {
        Self::with_config(tree, &ResolverConfiguration::default())
    }

    pub fn with_config(tree: &'t T, config: &ResolverConfiguration) -> Self {
        Self {
            tree,
            max_depth: config.max_depth,
            max_length: config.max_length,
        }
    }

    /// Value of `node`, or `None` when it cannot be known statically
    pub fn resolve(&self, node: &T::Node) -> Option<ConstValue> {
        self.resolve_at(node, 0)
    }

    /// Value of `node` rendered as it would appear in a concatenation
    ///
    /// `null` renders as nothing.
    pub fn resolve_to_string(&self, node: &T::Node) -> Option<String> {
        self.resolve(node).map(|value| value.to_concat_string())
    }

    /// Text each of `operands[..limit]` contributes to a string
    /// concatenation, `None` for the unresolvable ones
    pub fn concatenation_parts(&self, operands: &[T::Node], limit: usize) -> Vec<Option<String>> {
        self.concatenation_parts_at(operands, limit, 0)
    }

    fn resolve_at(&self, node: &T::Node, depth: usize) -> Option<ConstValue> {
        if depth > self.max_depth {
            debug!("Giving up after {} nested lookups", self.max_depth);
            return None;
        }

        match self.tree.shape(node) {
            ExprShape::Literal(value) => value,
            ExprShape::Parenthesized(inner) => self.resolve_at(&inner?, depth + 1),
            ExprShape::Reference => {
                let declaration = self.tree.resolve(node)?;
                if let Some(constant) = declaration.constant {
                    return Some(constant);
                }
                let initializer = declaration.initializer?;
                self.resolve_at(&initializer, depth + 1)
            }
            ExprShape::Polyadic { operands, .. } => {
                if !self.tree.is_string_concatenation(node) {
                    return self.tree.fold_constant(node);
                }
                let mut value = String::new();
                for part in self.concatenation_parts_at(&operands, operands.len(), depth) {
                    value.push_str(&part?);
                    self.check_length(&value)?;
                }
                Some(ConstValue::Str(value))
            }
            ExprShape::MethodCall {
                qualifier,
                name,
                arguments,
            } => self.resolve_call(&qualifier, &name, &arguments, depth),
            ExprShape::Other => {
                trace!("Expression is not statically resolvable");
                None
            }
        }
    }

    fn concatenation_parts_at(
        &self,
        operands: &[T::Node],
        limit: usize,
        depth: usize,
    ) -> Vec<Option<String>> {
        operands
            .iter()
            .take(limit)
            .map(|operand| {
                self.resolve_at(operand, depth + 1)
                    .map(|value| value.to_concat_string())
            })
            .collect()
    }

    /// `Some(())` while `value` stays within the length bound
    fn check_length(&self, value: &str) -> Option<()> {
        // UTF-8 length bounds the UTF-16 length from above
        if value.len() <= self.max_length || value.encode_utf16().count() <= self.max_length {
            return Some(());
        }
        debug!("String value exceeds {} UTF-16 units", self.max_length);
        None
    }

    fn resolve_call(
        &self,
        qualifier: &Qualifier<T::Node>,
        name: &str,
        arguments: &[T::Node],
        depth: usize,
    ) -> Option<ConstValue> {
        match (name, arguments.len()) {
            ("toString", 0) => {
                let receiver = qualifier.receiver()?;
                return self.resolve_at(receiver, depth + 1);
            }
            ("valueOf", 1) if qualifier.is_string_class() => {
                return match self.resolve_at(&arguments[0], depth + 1)? {
                    ConstValue::Null => None,
                    value => Some(ConstValue::Str(value.to_concat_string())),
                };
            }
            _ => {}
        }

        let receiver = qualifier.receiver()?;
        if self.tree.value_type(receiver) != Some(ValueType::String) {
            trace!("Method '{}' called on a non-string receiver", name);
            return None;
        }

        match (name, arguments.len()) {
            ("concat", 1) => {
                let mut value = self.resolve_string(receiver, depth)?;
                self.resolve_at(&arguments[0], depth + 1)?
                    .append_to(&mut value);
                self.check_length(&value)?;
                Some(ConstValue::Str(value))
            }
            ("intern", 0) => self.resolve_string(receiver, depth).map(ConstValue::Str),
            ("repeat", 1) => {
                let count = usize::try_from(self.literal_int(&arguments[0])?).ok()?;
                let value = self.resolve_string(receiver, depth)?;
                let length = value.encode_utf16().count().checked_mul(count);
                if length.is_none_or(|length| length > self.max_length) {
                    debug!("repeat({}) exceeds {} UTF-16 units", count, self.max_length);
                    return None;
                }
                Some(ConstValue::Str(value.repeat(count)))
            }
            ("replace", 2) => {
                let char_typed = arguments
                    .iter()
                    .all(|argument| self.tree.value_type(argument) == Some(ValueType::Char));
                if !char_typed {
                    return None;
                }
                // The receiver comes back as is; the replacement is not applied
                debug!("replace(char, char) resolves to its unchanged receiver");
                self.resolve_string(receiver, depth).map(ConstValue::Str)
            }
            ("substring", 1 | 2) => {
                let value = self.resolve_string(receiver, depth)?;
                let units: Vec<u16> = value.encode_utf16().collect();
                let begin = usize::try_from(self.literal_int(&arguments[0])?).ok()?;
                let end = match arguments.get(1) {
                    Some(argument) => usize::try_from(self.literal_int(argument)?).ok()?,
                    None => units.len(),
                };
                if begin > end || end > units.len() {
                    debug!(
                        "substring({}, {}) is out of bounds for length {}",
                        begin,
                        end,
                        units.len()
                    );
                    return None;
                }
                String::from_utf16(&units[begin..end])
                    .ok()
                    .map(ConstValue::Str)
            }
            _ => {
                trace!("Method '{}' is not statically resolvable", name);
                None
            }
        }
    }

    /// Receiver of a string method, resolved to its text
    fn resolve_string(&self, receiver: &T::Node, depth: usize) -> Option<String> {
        self.resolve_at(receiver, depth + 1)?.into_string()
    }

    /// An argument written directly as an `int` literal
    fn literal_int(&self, argument: &T::Node) -> Option<i32> {
        match self.tree.shape(argument) {
            ExprShape::Literal(Some(ConstValue::Int(value))) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::java::JavaSourceTree;

    fn resolve_with(source: &str, config: &ResolverConfiguration) -> Option<ConstValue> {
        let tree = JavaSourceTree::parse(source);
        let initializer = tree.initializer_of("x").unwrap();
        ConstantResolver::with_config(&tree, config).resolve(&initializer)
    }

    fn resolve(source: &str) -> Option<ConstValue> {
        resolve_with(source, &ResolverConfiguration::default())
    }

    fn text(value: &str) -> Option<ConstValue> {
        Some(ConstValue::Str(value.to_string()))
    }

    #[test]
    fn test_concatenation_renders_each_operand() {
        assert_eq!(resolve(r#"String x = 1 + 2 + "a";"#), text("12a"));
        assert_eq!(resolve(r#"String x = "a" + 1 + 2;"#), text("a12"));
        assert_eq!(resolve(r#"String x = 'c' + 1 + "";"#), text("c1"));
        assert_eq!(resolve(r#"String x = "v" + 1.0 + true;"#), text("v1.0true"));
    }

    #[test]
    fn test_null_operand_is_empty() {
        assert_eq!(resolve(r#"String x = null + "abc";"#), text("abc"));
        assert_eq!(resolve(r#"String x = "ab".concat(null);"#), text("ab"));
    }

    #[test]
    fn test_unresolvable_operand_spoils_the_chain() {
        assert_eq!(resolve(r#"String x = "ab" + input + "c";"#), None);
    }

    #[test]
    fn test_numeric_polyadic_is_folded_by_host() {
        assert_eq!(resolve("int x = 1 + 2 * 3;"), Some(ConstValue::Int(7)));
    }

    #[test]
    fn test_value_of() {
        assert_eq!(resolve("String x = String.valueOf(12);"), text("12"));
        assert_eq!(resolve("String x = String.valueOf(null);"), None);
        assert_eq!(resolve("String x = Other.valueOf(12);"), None);
    }

    #[test]
    fn test_to_string_needs_a_receiver() {
        assert_eq!(resolve(r#"String x = "ab".toString();"#), text("ab"));
        assert_eq!(resolve("String x = toString();"), None);
    }

    #[test]
    fn test_repeat() {
        assert_eq!(resolve(r#"String x = "ab".repeat(0);"#), text(""));
        assert_eq!(resolve(r#"String x = "ab".repeat(2);"#), text("abab"));
        assert_eq!(resolve(r#"String x = "ab".repeat(-1);"#), None);
    }

    #[test]
    fn test_repeat_beyond_length_bound() {
        assert_eq!(
            resolve(r#"String x = "ab".repeat(100000).repeat(100000);"#),
            None
        );

        let config = ResolverConfiguration {
            max_length: 4,
            ..Default::default()
        };
        assert_eq!(resolve_with(r#"String x = "ab".repeat(2);"#, &config), text("abab"));
        assert_eq!(resolve_with(r#"String x = "ab".repeat(3);"#, &config), None);
    }

    #[test]
    fn test_concatenation_beyond_length_bound() {
        let config = ResolverConfiguration {
            max_length: 3,
            ..Default::default()
        };
        assert_eq!(resolve_with(r#"String x = "ab" + "c";"#, &config), text("abc"));
        assert_eq!(resolve_with(r#"String x = "ab" + "cd";"#, &config), None);
        assert_eq!(resolve_with(r#"String x = "ab".concat("cd");"#, &config), None);
    }

    #[test]
    fn test_substring() {
        assert_eq!(resolve(r#"String x = "abcd".substring(1, 3);"#), text("bc"));
        assert_eq!(resolve(r#"String x = "abcd".substring(4);"#), text(""));
        assert_eq!(resolve(r#"String x = "abcd".substring(3, 2);"#), None);
        assert_eq!(resolve(r#"String x = "abcd".substring(1, 5);"#), None);
    }

    #[test]
    fn test_substring_splitting_surrogate_pair() {
        assert_eq!(resolve("String x = \"😀a\".substring(1);"), None);
        assert_eq!(resolve("String x = \"😀a\".substring(2);"), text("a"));
    }

    #[test]
    fn test_replace_keeps_receiver() {
        assert_eq!(resolve(r#"String x = "abc".replace('a', 'b');"#), text("abc"));
        assert_eq!(resolve(r#"String x = "abc".replace("a", "b");"#), None);
    }

    #[test]
    fn test_string_methods_need_string_receiver() {
        assert_eq!(resolve("String x = list.concat(\"a\");"), None);
    }

    #[test]
    fn test_self_referential_concat_terminates() {
        assert_eq!(resolve(r#"class A { String x = x.concat("a"); }"#), None);
    }

    #[test]
    fn test_depth_bound() {
        let source = r#"class A { String a = "q"; String b = a; String x = b; }"#;
        assert_eq!(resolve(source), text("q"));

        let config = ResolverConfiguration {
            max_depth: 1,
            ..Default::default()
        };
        assert_eq!(resolve_with(source, &config), None);
    }
}
