//! Directive and role registry.
//!
//! Hosts that do not know the Confluence constructs leave them in the tree
//! as `pending` nodes; [`DirectiveRegistry::expand`] replaces those nodes
//! with the output of the registered producers.

use sc_doctree::{Document, Element, NodeId, NodeKind};

use crate::args::{DirectiveArgs, DirectiveCall, RoleArgs};
use crate::directive::{Directive, Role};
use crate::error::DirectiveError;
use crate::image::ImageConf;
use crate::jira::{JiraIssueRole, JiraIssues, JiraUserRole};
use crate::toctree::TocTree;

/// Named directives and roles.
///
/// Later registrations shadow earlier ones with the same name.
///
/// # Example
///
/// ```
/// use sc_directives::{DirectiveCall, DirectiveRegistry};
///
/// let registry = DirectiveRegistry::new().register_defaults();
/// let nodes = registry.run_directive(&DirectiveCall::new("toctree")).unwrap();
/// assert_eq!(nodes.len(), 1);
/// ```
#[derive(Default)]
pub struct DirectiveRegistry {
    directives: Vec<Box<dyn Directive>>,
    roles: Vec<Box<dyn Role>>,
}

impl DirectiveRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a directive.
    #[must_use]
    pub fn with_directive<D: Directive + 'static>(mut self, directive: D) -> Self {
        self.add_directive(Box::new(directive));
        self
    }

    /// Register a role.
    #[must_use]
    pub fn with_role<R: Role + 'static>(mut self, role: R) -> Self {
        self.add_role(Box::new(role));
        self
    }

    /// Register a boxed directive.
    pub fn add_directive(&mut self, directive: Box<dyn Directive>) {
        tracing::debug!(name = directive.name(), "Registered directive");
        self.directives.push(directive);
    }

    /// Register a boxed role.
    pub fn add_role(&mut self, role: Box<dyn Role>) {
        tracing::debug!(name = role.name(), "Registered role");
        self.roles.push(role);
    }

    /// Register `image`, `toctree`, `jira`, `jira_issue` and `jira_user`.
    #[must_use]
    pub fn register_defaults(self) -> Self {
        self.with_directive(ImageConf)
            .with_directive(TocTree)
            .with_directive(JiraIssues)
            .with_role(JiraIssueRole)
            .with_role(JiraUserRole)
    }

    /// Directive registered under `name`.
    #[must_use]
    pub fn directive(&self, name: &str) -> Option<&dyn Directive> {
        self.directives
            .iter()
            .rev()
            .find(|d| d.name() == name)
            .map(Box::as_ref)
    }

    /// Role registered under `name`.
    #[must_use]
    pub fn role(&self, name: &str) -> Option<&dyn Role> {
        self.roles
            .iter()
            .rev()
            .find(|r| r.name() == name)
            .map(Box::as_ref)
    }

    /// Names of all registered directives, in registration order.
    pub fn directive_names(&self) -> impl Iterator<Item = &str> {
        self.directives.iter().map(|d| d.name())
    }

    /// Names of all registered roles, in registration order.
    pub fn role_names(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(|r| r.name())
    }

    /// Validate and run a directive call.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::Unknown`] for unregistered names, otherwise
    /// whatever validation or the directive itself reports.
    pub fn run_directive(&self, call: &DirectiveCall) -> Result<Vec<Element>, DirectiveError> {
        let directive = self
            .directive(&call.name)
            .ok_or_else(|| DirectiveError::Unknown {
                construct: "directive",
                name: call.name.clone(),
            })?;
        let args = DirectiveArgs::parse(directive, call)?;
        directive.run(args)
    }

    /// Run a role.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::Unknown`] for unregistered names, otherwise
    /// whatever the role reports.
    pub fn run_role(&self, args: RoleArgs) -> Result<Vec<Element>, DirectiveError> {
        let role = self.role(&args.name).ok_or_else(|| DirectiveError::Unknown {
            construct: "role",
            name: args.name.clone(),
        })?;
        role.run(args)
    }

    /// Replace every `pending` node naming a directive or role with its output.
    ///
    /// Pending nodes without a `directive` or `role` attribute are left in
    /// place. Returns the number of nodes replaced.
    ///
    /// # Errors
    ///
    /// Stops at the first failing directive or role.
    pub fn expand(&self, document: &mut Document) -> Result<usize, DirectiveError> {
        let pending: Vec<NodeId> = document
            .descendants(document.root())
            .into_iter()
            .filter(|&id| *document.node(id).kind() == NodeKind::Pending)
            .collect();

        let mut replaced = 0;
        for id in pending {
            if !is_attached(document, id) {
                continue;
            }
            let node = document.node(id);
            let elements = if let Some(name) = node.get_str("directive") {
                let call = DirectiveCall::from_pending(name, node);
                self.run_directive(&call)?
            } else if let Some(name) = node.get_str("role") {
                self.run_role(RoleArgs::from_pending(name, node))?
            } else {
                continue;
            };
            tracing::debug!(path = %node.path(), nodes = elements.len(), "Expanded pending node");
            document.replace(id, elements)?;
            replaced += 1;
        }
        Ok(replaced)
    }
}

/// Whether `id` is still reachable from the root.
///
/// Replacing a pending node detaches any pending nodes nested inside it.
fn is_attached(document: &Document, id: NodeId) -> bool {
    let root = document.root();
    let mut current = document.node(id);
    loop {
        if current.id() == root {
            return true;
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return false,
        }
    }
}
