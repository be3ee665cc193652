//! Confluence macro directives and roles.
//!
//! Producers that turn source constructs into document tree nodes the
//! writer understands:
//!
//! - `image`: bare attachment image, without alignment or link target
//! - `toctree`: fixed Confluence `toc` macro
//! - `jira`: issue list from a JQL query
//! - `jira_issue` role: single issue by key
//! - `jira_user` role: link to a user profile
//!
//! Options are validated with the docutils option vocabulary
//! ([`OptionKind`]). Any invalid input fails the build with a
//! [`DirectiveError`].
//!
//! # Example
//!
//! ```
//! use sc_directives::{DirectiveCall, DirectiveRegistry};
//!
//! let registry = DirectiveRegistry::new().register_defaults();
//! let call = DirectiveCall::new("jira")
//!     .argument("project = CONF")
//!     .option("count", "true");
//!
//! let nodes = registry.run_directive(&call).unwrap();
//! let markup = &nodes[0].children[0].text;
//! assert!(markup.ends_with(
//!     r#"<ac:parameter ac:name="jqlQuery">project = CONF</ac:parameter></ac:structured-macro>"#
//! ));
//! ```

mod args;
mod directive;
mod error;
mod image;
mod jira;
mod options;
mod registry;
mod toctree;

pub use args::{DirectiveArgs, DirectiveCall, OPTION_ATTR_PREFIX, RoleArgs};
pub use directive::{Directive, Role};
pub use error::DirectiveError;
pub use image::ImageConf;
pub use jira::{JiraIssueRole, JiraIssues, JiraUserRole, underscore_to_camelcase};
pub use options::{ALIGN_VALUES, OptionKind, OptionSpec, OptionValue, Options, make_id, uri};
pub use registry::DirectiveRegistry;
pub use toctree::{TocTree, toc_macro};
