//! Grammar for the binding micro-language.
//!
//! ```text
//! item-binding := "{" "binding" [ "Path=" ] path [ "," "converter" "=" ident ] "}"
//! sample-ref   := "@sampleData." path
//! state-ref    := "@state." path
//! ```
//!
//! A string that does not match one of these as a whole is a literal.

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, opt, peek, recognize},
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

use wirevana_core::binding::{Binding, BindingPath, BindingRef, ItemBinding};

/// Characters allowed in a dotted path.
fn is_path_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '$')
}

/// Parse a converter or keyword identifier.
fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

/// A single character surrounded by optional whitespace.
fn symbol<'a>(c: char) -> impl FnMut(&'a str) -> IResult<&'a str, char> {
    delimited(multispace0, char(c), multispace0)
}

/// The `binding` keyword, followed by whitespace or the closing brace.
fn binding_keyword(input: &str) -> IResult<&str, &str> {
    let (input, keyword) = tag_no_case("binding")(input)?;
    let (input, _) = alt((multispace1, peek(recognize(char('}')))))(input)?;
    Ok((input, keyword))
}

/// `converter=Name`
fn converter(input: &str) -> IResult<&str, &str> {
    preceded(
        pair(symbol(','), pair(tag_no_case("converter"), symbol('='))),
        identifier,
    )(input)
}

/// `{binding path[, converter=Name]}`, returning the path and converter.
fn item_binding(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    delimited(
        pair(char('{'), multispace0),
        preceded(
            binding_keyword,
            tuple((
                preceded(
                    opt(pair(tag_no_case("path"), symbol('='))),
                    take_while(is_path_char),
                ),
                opt(converter),
            )),
        ),
        pair(multispace0, char('}')),
    )(input)
}

/// `<prefix><path>`
fn prefixed_path<'a>(prefix: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    preceded(tag(prefix), take_while1(is_path_char))
}

/// Parse a prop string into a binding. Never fails: non-matching input is a literal.
pub fn parse_binding(source: &str) -> Binding {
    let text = source.trim();

    if let Ok((_, (path, converter))) = all_consuming(item_binding)(text) {
        return Binding::ItemBinding(ItemBinding {
            path: BindingPath::parse(path),
            converter: converter.map(str::to_string),
            source: source.to_string(),
        });
    }

    if let Ok((_, path)) = all_consuming(prefixed_path("@sampleData."))(text) {
        return Binding::SampleDataRef(BindingRef {
            path: BindingPath::parse(path),
            source: source.to_string(),
        });
    }

    if let Ok((_, path)) = all_consuming(prefixed_path("@state."))(text) {
        return Binding::StateRef(BindingRef {
            path: BindingPath::parse(path),
            source: source.to_string(),
        });
    }

    Binding::Literal(source.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn segments(path: &BindingPath) -> Vec<&str> {
        path.segments().collect()
    }

    #[test]
    fn test_item_binding() {
        match parse_binding("{binding itemName}") {
            Binding::ItemBinding(b) => {
                assert_eq!(segments(&b.path), vec!["itemName"]);
                assert_eq!(b.converter, None);
                assert_eq!(b.source, "{binding itemName}");
            }
            other => panic!("expected item binding, got {other:?}"),
        }
    }

    #[test]
    fn test_item_binding_with_converter() {
        let binding = parse_binding("{binding loanedOn, converter=RelativeDate}");
        assert_eq!(binding.converter(), Some("RelativeDate"));

        let spaced = parse_binding("{ Binding Path=completed ,converter = CompletedToStrikethrough }");
        assert_eq!(spaced.converter(), Some("CompletedToStrikethrough"));
        match spaced {
            Binding::ItemBinding(b) => assert_eq!(segments(&b.path), vec!["completed"]),
            other => panic!("expected item binding, got {other:?}"),
        }
    }

    #[test]
    fn test_item_binding_root() {
        for source in ["{binding}", "{binding .}"] {
            match parse_binding(source) {
                Binding::ItemBinding(b) => assert!(b.path.is_root(), "{source}"),
                other => panic!("expected item binding, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_sample_data_ref() {
        match parse_binding("@sampleData.currentWeather.icon") {
            Binding::SampleDataRef(r) => {
                assert_eq!(segments(&r.path), vec!["currentWeather", "icon"])
            }
            other => panic!("expected sample data ref, got {other:?}"),
        }
    }

    #[test]
    fn test_state_ref() {
        let binding = parse_binding("@state.form.itemId");
        assert_eq!(
            binding.state_path().map(|p| p.to_string()),
            Some("form.itemId".to_string())
        );
    }

    #[test]
    fn test_literals() {
        for text in [
            "Hello",
            "",
            "@sampleData",
            "@state.",
            "Due {binding due}",
            "{bindings x}",
            "{binding x",
            "actions.openCreateLoan",
        ] {
            assert_eq!(parse_binding(text), Binding::Literal(text.to_string()), "{text}");
        }
    }

    proptest! {
        #[test]
        fn plain_text_is_literal(text in "[^{@]*") {
            prop_assert_eq!(parse_binding(&text), Binding::Literal(text.clone()));
        }

        #[test]
        fn state_paths_round_trip(path in "[a-z][a-zA-Z0-9]{0,8}(\\.[a-z][a-zA-Z0-9]{0,8}){0,3}") {
            let source = format!("@state.{path}");
            let binding = parse_binding(&source);
            prop_assert_eq!(binding.source(), source.as_str());
            prop_assert_eq!(binding.state_path().map(|p| p.to_string()), Some(path));
        }
    }
}
