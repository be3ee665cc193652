//! `image` directive producing attachment images.

use sc_doctree::{Element, NodeKind};

use crate::args::DirectiveArgs;
use crate::directive::Directive;
use crate::error::DirectiveError;
use crate::options::{ALIGN_VALUES, OptionKind, OptionSpec, OptionValue, uri};

const OPTION_SPEC: OptionSpec = &[
    ("alt", OptionKind::Unchanged),
    ("height", OptionKind::LengthOrUnitless),
    ("width", OptionKind::LengthOrPercentageOrUnitless),
    ("scale", OptionKind::Percentage),
    ("align", OptionKind::Choice(ALIGN_VALUES)),
    ("name", OptionKind::Unchanged),
    ("target", OptionKind::UnchangedRequired),
    ("class", OptionKind::ClassOption),
];

/// Options validated but not carried onto the image node.
///
/// Confluence positions and links attachment images itself.
const DROPPED_OPTIONS: &[&str] = &["align", "target"];

/// Image directive that yields a bare `image` node.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageConf;

impl Directive for ImageConf {
    fn name(&self) -> &str {
        "image"
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
        let mut image = Element::new(NodeKind::Image)
            .attr("uri", uri(&args.arguments[0]))
            .rawsource(args.block_text);

        for (name, value) in args.options.iter() {
            if DROPPED_OPTIONS.contains(&name) {
                continue;
            }
            match name {
                "class" => image = image.attr("classes", value.to_attr()),
                "name" => {
                    if let OptionValue::Text(text) = value {
                        image = image.attr("names", vec![normalize_name(text)]);
                    }
                    image = image.attr("name", value.to_attr());
                }
                _ => image = image.attr(name, value.to_attr()),
            }
        }

        Ok(vec![image])
    }
}

/// Lowercase and collapse whitespace, the form used for reference names.
fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DirectiveCall;
    use pretty_assertions::assert_eq;
    use sc_doctree::AttrValue;

    fn run(call: &DirectiveCall) -> Result<Vec<Element>, DirectiveError> {
        let args = DirectiveArgs::parse(&ImageConf, call)?;
        ImageConf.run(args)
    }

    #[test]
    fn test_bare_image() {
        let elements = run(&DirectiveCall::new("image").argument("images/logo.png")).unwrap();

        assert_eq!(
            elements,
            vec![Element::new(NodeKind::Image).attr("uri", "images/logo.png")]
        );
    }

    #[test]
    fn test_uri_whitespace_removed() {
        let elements = run(&DirectiveCall::new("image").argument("images/very\n   long.png")).unwrap();

        assert_eq!(elements[0].attrs.get("uri"), Some(&AttrValue::from("images/verylong.png")));
    }

    #[test]
    fn test_align_and_target_dropped() {
        let call = DirectiveCall::new("image")
            .argument("a.png")
            .option("align", "center")
            .option("target", "https://example.com")
            .option("width", "200px");

        let elements = run(&call).unwrap();

        let keys: Vec<&str> = elements[0].attrs.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["uri", "width"]);
    }

    #[test]
    fn test_invalid_align_rejected() {
        let call = DirectiveCall::new("image").argument("a.png").option("align", "sideways");

        assert!(matches!(run(&call), Err(DirectiveError::InvalidOption { .. })));
    }

    #[test]
    fn test_class_and_name() {
        let call = DirectiveCall::new("image")
            .argument("a.png")
            .option("class", "Wide Shadow")
            .option("name", "Main  Logo")
            .option("scale", "50%")
            .option("alt", "Logo");

        let elements = run(&call).unwrap();

        let expected = Element::new(NodeKind::Image)
            .attr("uri", "a.png")
            .attr("alt", "Logo")
            .attr("scale", 50_i64)
            .attr("name", "Main  Logo")
            .attr("names", vec!["main logo"])
            .attr("classes", vec!["wide", "shadow"]);
        assert_eq!(elements, vec![expected]);
    }

    #[test]
    fn test_missing_uri_rejected() {
        let err = run(&DirectiveCall::new("image")).unwrap_err();

        assert_eq!(err.to_string(), "Directive `image`: 1 argument(s) required, 0 supplied");
    }
}
