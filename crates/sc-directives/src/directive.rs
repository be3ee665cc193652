//! Directive and role traits.

use sc_doctree::Element;

use crate::args::{DirectiveArgs, RoleArgs};
use crate::error::DirectiveError;
use crate::options::OptionSpec;

/// Handler for a block directive such as `.. jira::`.
///
/// The registry validates arguments, options and content against the
/// declarations below before calling [`run`](Self::run), so `run` only sees
/// well-formed input.
///
/// # Example
///
/// ```
/// use sc_directives::{Directive, DirectiveArgs, DirectiveError};
/// use sc_doctree::{Element, NodeKind};
///
/// struct Rubric;
///
/// impl Directive for Rubric {
///     fn name(&self) -> &str { "rubric" }
///     fn required_arguments(&self) -> usize { 1 }
///     fn final_argument_whitespace(&self) -> bool { true }
///
///     fn run(&self, args: DirectiveArgs) -> Result<Vec<Element>, DirectiveError> {
///         Ok(vec![Element::new(NodeKind::Rubric).child(Element::text(&args.arguments[0]))])
///     }
/// }
/// ```
pub trait Directive: Send {
    /// Directive name.
    fn name(&self) -> &str;

    /// Accepted options and their validators.
    fn option_spec(&self) -> OptionSpec {
        &[]
    }

    /// Number of required positional arguments.
    fn required_arguments(&self) -> usize {
        0
    }

    /// Number of optional positional arguments.
    fn optional_arguments(&self) -> usize {
        0
    }

    /// Whether the last argument may contain whitespace.
    fn final_argument_whitespace(&self) -> bool {
        false
    }

    /// Whether a content block is allowed.
    fn has_content(&self) -> bool {
        false
    }

    /// Produce the nodes that replace the directive.
    fn run(&self, args: DirectiveArgs) -> Result<Vec<Element>, DirectiveError>;
}

/// Handler for an inline role such as ``:jira_issue:`CONF-1` ``.
pub trait Role: Send {
    /// Role name.
    fn name(&self) -> &str;

    /// Produce the inline nodes that replace the role.
    fn run(&self, args: RoleArgs) -> Result<Vec<Element>, DirectiveError>;
}
