use serde_json::Value;

/// A parsed extension function: a pure transform of one attribute value
///
/// The original metamodel stores the function as opaque source text; this
/// engine defines a four-operation grammar over it:
///
/// ```text
/// set "literal"            -- replace the value entirely
/// append "suffix"          -- string concatenation at the end
/// prepend "prefix"         -- string concatenation at the front
/// replace "from" "to"      -- substring replacement
/// ```
///
/// Literals may be single- or double-quoted; `\` escapes the quote
/// character and itself. Errors are plain reason strings; the applier
/// wraps them into `ExtensionEvaluationError` with extension and target
/// context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionFunction {
    Set(String),
    Append(String),
    Prepend(String),
    Replace { from: String, to: String },
}

impl ExtensionFunction {
    /// Parse an extension function from its stored source text
    pub fn parse(source: &str) -> Result<Self, String> {
        let trimmed = source.trim();
        let (keyword, rest) = match trimmed.find(char::is_whitespace) {
            Some(split) => (&trimmed[..split], trimmed[split..].trim_start()),
            None => (trimmed, ""),
        };

        let mut literals = parse_literals(rest)?;
        let arity = literals.len();

        match (keyword, arity) {
            ("set", 1) => Ok(ExtensionFunction::Set(literals.remove(0))),
            ("append", 1) => Ok(ExtensionFunction::Append(literals.remove(0))),
            ("prepend", 1) => Ok(ExtensionFunction::Prepend(literals.remove(0))),
            ("replace", 2) => {
                let from = literals.remove(0);
                let to = literals.remove(0);
                Ok(ExtensionFunction::Replace { from, to })
            }
            ("set" | "append" | "prepend", n) => Err(format!(
                "operation '{}' takes one literal, found {}",
                keyword, n
            )),
            ("replace", n) => Err(format!("operation 'replace' takes two literals, found {}", n)),
            ("", _) => Err("empty extension function".to_string()),
            (other, _) => Err(format!("unknown operation '{}'", other)),
        }
    }

    /// Apply this function to the current attribute value
    ///
    /// `set` replaces any value. The string operations require the current
    /// value to be a string (absent attributes arrive as `Null` and are
    /// treated as the empty string); any other value type is a mismatch.
    pub fn apply(&self, value: &Value) -> Result<Value, String> {
        if let ExtensionFunction::Set(literal) = self {
            return Ok(Value::String(literal.clone()));
        }

        let current = match value {
            Value::Null => "",
            Value::String(s) => s.as_str(),
            other => {
                return Err(format!(
                    "attribute value {} is not a string",
                    other
                ))
            }
        };

        let next = match self {
            ExtensionFunction::Append(suffix) => format!("{}{}", current, suffix),
            ExtensionFunction::Prepend(prefix) => format!("{}{}", prefix, current),
            ExtensionFunction::Replace { from, to } => current.replace(from.as_str(), to),
            ExtensionFunction::Set(_) => unreachable!("handled above"),
        };

        Ok(Value::String(next))
    }
}

/// Parse zero or more quoted literals separated by whitespace
fn parse_literals(input: &str) -> Result<Vec<String>, String> {
    let mut literals = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
            chars.next();
        }
        let Some(&quote) = chars.peek() else {
            return Ok(literals);
        };
        if quote != '"' && quote != '\'' {
            return Err(format!("expected quoted literal, found '{}'", quote));
        }
        chars.next();

        let mut literal = String::new();
        loop {
            match chars.next() {
                Some('\\') => match chars.next() {
                    Some(escaped @ ('\\' | '"' | '\'')) => literal.push(escaped),
                    Some(other) => return Err(format!("invalid escape '\\{}'", other)),
                    None => return Err("unterminated escape".to_string()),
                },
                Some(c) if c == quote => break,
                Some(c) => literal.push(c),
                None => return Err("unterminated literal".to_string()),
            }
        }
        literals.push(literal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_append() {
        let func = ExtensionFunction::parse("append \" [beta]\"").unwrap();
        assert_eq!(func, ExtensionFunction::Append(" [beta]".to_string()));
    }

    #[test]
    fn test_parse_single_quotes() {
        let func = ExtensionFunction::parse("prepend 'Draft: '").unwrap();
        assert_eq!(func, ExtensionFunction::Prepend("Draft: ".to_string()));
    }

    #[test]
    fn test_parse_replace() {
        let func = ExtensionFunction::parse("replace \"team\" \"squad\"").unwrap();
        assert_eq!(
            func,
            ExtensionFunction::Replace {
                from: "team".to_string(),
                to: "squad".to_string()
            }
        );
    }

    #[test]
    fn test_parse_escaped_quote() {
        let func = ExtensionFunction::parse(r#"set "a \"quoted\" word""#).unwrap();
        assert_eq!(func, ExtensionFunction::Set("a \"quoted\" word".to_string()));
    }

    #[test]
    fn test_parse_rejects_unknown_operation() {
        assert!(ExtensionFunction::parse("shout \"x\"").is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_arity() {
        assert!(ExtensionFunction::parse("append \"a\" \"b\"").is_err());
        assert!(ExtensionFunction::parse("replace \"a\"").is_err());
    }

    #[test]
    fn test_parse_rejects_unterminated_literal() {
        assert!(ExtensionFunction::parse("append \"open").is_err());
        assert!(ExtensionFunction::parse("").is_err());
    }

    #[test]
    fn test_apply_append() {
        let func = ExtensionFunction::Append(" [beta]".to_string());
        let result = func.apply(&json!("Original")).unwrap();
        assert_eq!(result, json!("Original [beta]"));
    }

    #[test]
    fn test_apply_to_absent_value() {
        let func = ExtensionFunction::Append("tail".to_string());
        assert_eq!(func.apply(&Value::Null).unwrap(), json!("tail"));
    }

    #[test]
    fn test_apply_set_replaces_any_value() {
        let func = ExtensionFunction::Set("fresh".to_string());
        assert_eq!(func.apply(&json!(42)).unwrap(), json!("fresh"));
    }

    #[test]
    fn test_apply_string_op_to_number_is_mismatch() {
        let func = ExtensionFunction::Append("tail".to_string());
        assert!(func.apply(&json!(42)).is_err());
    }

    #[test]
    fn test_apply_replace() {
        let func = ExtensionFunction::Replace {
            from: "team".to_string(),
            to: "squad".to_string(),
        };
        assert_eq!(
            func.apply(&json!("the team rules")).unwrap(),
            json!("the squad rules")
        );
    }
}
