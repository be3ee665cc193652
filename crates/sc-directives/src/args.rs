//! Directive and role invocation arguments.

use sc_doctree::{AttrValue, Node};

use crate::directive::Directive;
use crate::error::DirectiveError;
use crate::options::Options;

/// Prefix of pending-node attributes that carry directive options.
pub const OPTION_ATTR_PREFIX: &str = "option.";

/// A directive as written in the source, before validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectiveCall {
    /// Directive name.
    pub name: String,
    /// Argument text following the directive marker.
    pub argument_text: String,
    /// Options in source order; `None` for options written without a value.
    pub options: Vec<(String, Option<String>)>,
    /// Content block lines.
    pub content: Vec<String>,
    /// Whole directive source.
    pub block_text: String,
    /// Source line of the directive.
    pub line: usize,
}

impl DirectiveCall {
    /// Create a call with no arguments, options or content.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the argument text.
    #[must_use]
    pub fn argument(mut self, text: impl Into<String>) -> Self {
        self.argument_text = text.into();
        self
    }

    /// Add an option.
    #[must_use]
    pub fn option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push((name.into(), Some(value.into())));
        self
    }

    /// Add an option without a value.
    #[must_use]
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.options.push((name.into(), None));
        self
    }

    /// Set the content block, split into lines.
    #[must_use]
    pub fn content(mut self, text: &str) -> Self {
        self.content = text.lines().map(str::to_owned).collect();
        self
    }

    /// Read a call from a `pending` node.
    ///
    /// The node carries `arguments` (string or list), one `option.<name>`
    /// attribute per option and the content block as its text. Boolean
    /// option values mark flags.
    #[must_use]
    pub fn from_pending(name: &str, node: Node<'_>) -> Self {
        let argument_text = match node.get("arguments") {
            Some(AttrValue::List(items)) => items.join(" "),
            Some(value) => value.to_string(),
            None => String::new(),
        };
        let options = node
            .attrs()
            .iter()
            .filter_map(|(key, value)| {
                let option = key.strip_prefix(OPTION_ATTR_PREFIX)?;
                let value = match value {
                    AttrValue::Bool(_) => None,
                    other => Some(other.to_string()),
                };
                Some((option.to_owned(), value))
            })
            .collect();
        let content = node.astext();
        let line = match node.get("line") {
            Some(AttrValue::Int(n)) => usize::try_from(*n).unwrap_or_default(),
            _ => 0,
        };
        Self {
            name: name.to_owned(),
            argument_text,
            options,
            content: content.lines().map(str::to_owned).collect(),
            block_text: node.rawsource().to_owned(),
            line,
        }
    }
}

/// Validated arguments passed to [`Directive::run`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Directive name.
    pub name: String,
    /// Positional arguments.
    pub arguments: Vec<String>,
    /// Validated options in option-spec order.
    pub options: Options,
    /// Content block lines.
    pub content: Vec<String>,
    /// Whole directive source.
    pub block_text: String,
    /// Source line of the directive.
    pub line: usize,
}

impl DirectiveArgs {
    /// Validate `call` against the argument, option and content rules of `directive`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError`] for a wrong argument count, invalid
    /// options or content given to a directive without content.
    pub fn parse(directive: &dyn Directive, call: &DirectiveCall) -> Result<Self, DirectiveError> {
        let arguments = split_arguments(
            &call.argument_text,
            directive.required_arguments(),
            directive.optional_arguments(),
            directive.final_argument_whitespace(),
        )
        .map_err(|message| DirectiveError::InvalidArguments {
            construct: "Directive",
            name: call.name.clone(),
            message,
        })?;

        let options = Options::parse(&call.name, directive.option_spec(), &call.options)?;

        let has_text = call.content.iter().any(|line| !line.trim().is_empty());
        if has_text && !directive.has_content() {
            return Err(DirectiveError::UnexpectedContent {
                directive: call.name.clone(),
            });
        }

        Ok(Self {
            name: call.name.clone(),
            arguments,
            options,
            content: call.content.clone(),
            block_text: call.block_text.clone(),
            line: call.line,
        })
    }
}

/// Split argument text into at most `required + optional` arguments.
///
/// With `final_whitespace`, surplus words are kept in the last argument.
fn split_arguments(
    text: &str,
    required: usize,
    optional: usize,
    final_whitespace: bool,
) -> Result<Vec<String>, String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let max = required + optional;
    if words.len() < required {
        return Err(format!(
            "{required} argument(s) required, {} supplied",
            words.len()
        ));
    }
    if words.len() <= max {
        return Ok(words.into_iter().map(str::to_owned).collect());
    }
    if !final_whitespace || max == 0 {
        return Err(format!(
            "maximum {max} argument(s) allowed, {} supplied",
            words.len()
        ));
    }

    let mut arguments = Vec::with_capacity(max);
    let mut rest = text.trim();
    for _ in 1..max {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        arguments.push(rest[..end].to_owned());
        rest = rest[end..].trim_start();
    }
    arguments.push(rest.to_owned());
    Ok(arguments)
}

/// Arguments passed to [`Role::run`](crate::Role::run).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleArgs {
    /// Role name.
    pub name: String,
    /// Whole role source, e.g. ``:jira_issue:`CONF-1` ``.
    pub rawtext: String,
    /// Interpreted text.
    pub text: String,
    /// Source line of the role.
    pub line: usize,
}

impl RoleArgs {
    /// Create arguments for role `name` with interpreted `text`.
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let name = name.into();
        let text = text.into();
        Self {
            rawtext: format!(":{name}:`{text}`"),
            name,
            text,
            line: 0,
        }
    }

    /// Read role arguments from a `pending` node; its text is the interpreted text.
    #[must_use]
    pub fn from_pending(name: &str, node: Node<'_>) -> Self {
        let mut args = Self::new(name, node.astext());
        if !node.rawsource().is_empty() {
            args.rawtext = node.rawsource().to_owned();
        }
        if let Some(AttrValue::Int(n)) = node.get("line") {
            args.line = usize::try_from(*n).unwrap_or_default();
        }
        args
    }
}
