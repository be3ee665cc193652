//! Jira issue macros: the `jira` directive and the `jira_issue` and
//! `jira_user` roles.
//!
//! See <https://confluence.atlassian.com/display/DOC/JIRA+Issues+Macro>.

use sc_doctree::{Element, NodeKind};
use sc_writer::{StructuredMacro, user_link};

use crate::args::{DirectiveArgs, RoleArgs};
use crate::directive::{Directive, Role};
use crate::error::DirectiveError;
use crate::options::{OptionKind, OptionSpec};

const OPTION_SPEC: OptionSpec = &[
    ("server_id", OptionKind::Unchanged),
    ("baseurl", OptionKind::Unchanged),
    ("columns", OptionKind::Unchanged),
    ("count", OptionKind::TrueFalse),
    ("height", OptionKind::PositiveInt),
    ("title", OptionKind::Unchanged),
    ("render_mode", OptionKind::StaticDynamic),
    ("url", OptionKind::Unchanged),
    ("width", OptionKind::Unchanged),
    ("maximum_issues", OptionKind::PositiveInt),
];

fn jira_macro() -> StructuredMacro {
    StructuredMacro::new("jira").schema_version("1")
}

fn raw_html(markup: String) -> Element {
    Element::new(NodeKind::Raw)
        .attr("format", "html")
        .child(Element::text(markup))
}

/// Convert `maximum_issues` to `maximumIssues`.
///
/// The first segment is kept as is; later segments get an uppercase first letter.
#[must_use]
pub fn underscore_to_camelcase(name: &str) -> String {
    let mut segments = name.split('_');
    let mut out = segments.next().unwrap_or_default().to_owned();
    for segment in segments {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}

/// Issue list built from a JQL query.
#[derive(Debug, Default, Clone, Copy)]
pub struct JiraIssues;

impl Directive for JiraIssues {
    fn name(&self) -> &str {
        "jira"
    }

    fn option_spec(&self) -> OptionSpec {
        OPTION_SPEC
    }

    fn required_arguments(&self) -> usize {
        1
    }

    fn final_argument_whitespace(&self) -> bool {
        true
    }

    fn run(&self, args: DirectiveArgs) -> Result<Vec<Element>, DirectiveError> {
        let mut jira = jira_macro();
        for (name, value) in args.options.iter() {
            jira = jira.parameter(underscore_to_camelcase(name), value.to_string());
        }
        jira = jira.parameter("jqlQuery", &args.arguments[0]);
        Ok(vec![raw_html(jira.to_markup())])
    }
}

/// Single issue shown by key, without its summary.
#[derive(Debug, Default, Clone, Copy)]
pub struct JiraIssueRole;

impl Role for JiraIssueRole {
    fn name(&self) -> &str {
        "jira_issue"
    }

    fn run(&self, args: RoleArgs) -> Result<Vec<Element>, DirectiveError> {
        let key = args.text.trim();
        if key.is_empty() {
            return Err(DirectiveError::InvalidArguments {
                construct: "Role",
                name: args.name,
                message: "issue key required".to_owned(),
            });
        }
        let markup = jira_macro()
            .parameter("key", key)
            .parameter("showSummary", "false")
            .to_markup();
        Ok(vec![raw_html(markup)])
    }
}

/// Link to a Confluence user profile.
#[derive(Debug, Default, Clone, Copy)]
pub struct JiraUserRole;

impl Role for JiraUserRole {
    fn name(&self) -> &str {
        "jira_user"
    }

    fn run(&self, args: RoleArgs) -> Result<Vec<Element>, DirectiveError> {
        let username = args.text.trim();
        if username.is_empty() {
            return Err(DirectiveError::InvalidArguments {
                construct: "Role",
                name: args.name,
                message: "username required".to_owned(),
            });
        }
        Ok(vec![raw_html(user_link(username))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DirectiveCall;
    use pretty_assertions::assert_eq;

    fn markup(elements: &[Element]) -> &str {
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].kind, NodeKind::Raw);
        &elements[0].children[0].text
    }

    fn run_jira(call: &DirectiveCall) -> Result<Vec<Element>, DirectiveError> {
        let args = DirectiveArgs::parse(&JiraIssues, call)?;
        JiraIssues.run(args)
    }

    #[test]
    fn test_underscore_to_camelcase() {
        assert_eq!(underscore_to_camelcase("maximum_issues"), "maximumIssues");
        assert_eq!(underscore_to_camelcase("server_id"), "serverId");
        assert_eq!(underscore_to_camelcase("render_mode"), "renderMode");
        assert_eq!(underscore_to_camelcase("baseurl"), "baseurl");
    }

    #[test]
    fn test_jira_query() {
        let call = DirectiveCall::new("jira")
            .argument("project = CONF AND FixVersion=5.8")
            .option("maximum_issues", "20")
            .option("count", "true");

        let elements = run_jira(&call).unwrap();

        assert_eq!(
            markup(&elements),
            concat!(
                r#"<ac:structured-macro ac:name="jira" ac:schema-version="1">"#,
                r#"<ac:parameter ac:name="count">true</ac:parameter>"#,
                r#"<ac:parameter ac:name="maximumIssues">20</ac:parameter>"#,
                r#"<ac:parameter ac:name="jqlQuery">project = CONF AND FixVersion=5.8</ac:parameter>"#,
                "</ac:structured-macro>"
            )
        );
    }

    #[test]
    fn test_jira_query_escaped() {
        let call = DirectiveCall::new("jira")
            .argument("summary ~ \"<b>\" & x")
            .option("title", "Bugs & <more>");

        let elements = run_jira(&call).unwrap();

        let body = markup(&elements);
        assert!(body.contains(r#"<ac:parameter ac:name="title">Bugs &amp; &lt;more&gt;</ac:parameter>"#));
        assert!(body.contains("summary ~ &quot;&lt;b&gt;&quot; &amp; x"));
    }

    #[test]
    fn test_jira_rejects_invalid_options() {
        let count = DirectiveCall::new("jira").argument("x").option("count", "yes");
        assert!(matches!(run_jira(&count), Err(DirectiveError::InvalidOption { .. })));

        let height = DirectiveCall::new("jira").argument("x").option("height", "-5");
        assert!(matches!(run_jira(&height), Err(DirectiveError::InvalidOption { .. })));

        let mode = DirectiveCall::new("jira").argument("x").option("render_mode", "live");
        assert!(matches!(run_jira(&mode), Err(DirectiveError::InvalidOption { .. })));
    }

    #[test]
    fn test_jira_requires_query_and_no_content() {
        assert!(matches!(
            run_jira(&DirectiveCall::new("jira")),
            Err(DirectiveError::InvalidArguments { .. })
        ));
        assert!(matches!(
            run_jira(&DirectiveCall::new("jira").argument("x").content("body")),
            Err(DirectiveError::UnexpectedContent { .. })
        ));
    }

    #[test]
    fn test_jira_issue_role() {
        let elements = JiraIssueRole.run(RoleArgs::new("jira_issue", "CONF-42")).unwrap();

        assert_eq!(
            markup(&elements),
            concat!(
                r#"<ac:structured-macro ac:name="jira" ac:schema-version="1">"#,
                r#"<ac:parameter ac:name="key">CONF-42</ac:parameter>"#,
                r#"<ac:parameter ac:name="showSummary">false</ac:parameter>"#,
                "</ac:structured-macro>"
            )
        );
        assert!(JiraIssueRole.run(RoleArgs::new("jira_issue", " ")).is_err());
    }

    #[test]
    fn test_jira_user_role() {
        let elements = JiraUserRole.run(RoleArgs::new("jira_user", "jdoe")).unwrap();

        assert_eq!(markup(&elements), r#"<ac:link><ri:user ri:username="jdoe" /></ac:link>"#);
    }
}
