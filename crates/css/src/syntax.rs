// A single CSS property: "top: 12px"
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

// Set of selectors and declarations
#[derive(Debug)]
pub struct Rule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Universal,
    Type(String),  // element/tag selector
    Id(String),    // #id selector
    Class(String), // .class selector
    Attribute {
        name: String,
        value: Option<String>,
    }, // [name] or [name="value"]
}

// A full stylesheet: multiple rules
#[derive(Debug, Default)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

// input: "li, #id { top: 1px; } .moved { left: 12px; }"
// output: Stylesheet { rules: vec![Rule{ selectors: ..., declarations: ...}, ...] }
pub fn parse_stylesheet(input: &str) -> Stylesheet {
    let input = strip_comments(input);
    let mut rules = Vec::new();
    for block in input.split('}') {
        if let Some((selector_str, declaration_str)) = block.split_once('{') {
            let selectors = selector_str
                .split(',')
                .filter_map(|raw| {
                    let selector = parse_selector_one(raw);
                    if selector.is_none() && !raw.trim().is_empty() {
                        log::debug!(target: "css.syntax", "skipping unsupported selector {:?}", raw.trim());
                    }
                    selector
                })
                .collect::<Vec<_>>();
            if selectors.is_empty() {
                continue;
            }
            let declarations = parse_declarations(declaration_str);
            if declarations.is_empty() {
                continue;
            }
            rules.push(Rule {
                selectors,
                declarations,
            });
        }
    }
    Stylesheet { rules }
}

fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

// input: "left: 10px; top: 20px;"
// output: vec![Declaration { name: "left", value: "10px" }, Declaration { name: "top", value: "20px" }]
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    input
        .split(';')
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            let value = v.trim().trim_end_matches("!important").trim().to_string();
            Some(Declaration { name, value })
        })
        .collect()
}

// input: "#id", ".class", "div", "*", "[data-x]", "[data-x=\"a\"]"
// output: Some(Selector::Id("id")), ...
fn parse_selector_one(s: &str) -> Option<Selector> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    // compound and descendant selectors are not supported
    if s.contains(char::is_whitespace) && !s.starts_with('[') {
        return None;
    }
    if s == "*" {
        return Some(Selector::Universal);
    }
    if let Some(id) = s.strip_prefix('#') {
        return Some(Selector::Id(id.to_string()));
    }
    if let Some(class) = s.strip_prefix('.') {
        return Some(Selector::Class(class.to_string()));
    }
    if let Some(inner) = s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        return parse_attribute_selector(inner);
    }
    if s.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Some(Selector::Type(s.to_ascii_lowercase()));
    }
    None
}

fn parse_attribute_selector(inner: &str) -> Option<Selector> {
    let (name, value) = match inner.split_once('=') {
        Some((n, v)) => {
            let v = v.trim();
            let unquoted = v
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| v.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(v);
            (n.trim(), Some(unquoted.to_string()))
        }
        None => (inner.trim(), None),
    };
    let is_name = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':');
    if name.is_empty() || !name.chars().all(is_name) {
        return None;
    }
    Some(Selector::Attribute {
        name: name.to_ascii_lowercase(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rules_and_skips_unsupported_selectors() {
        let sheet = parse_stylesheet(
            "/* list */ li, .card { margin: 4px } ul > li { top: 1px } #x { }",
        );
        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(
            sheet.rules[0].selectors,
            vec![Selector::Type("li".into()), Selector::Class("card".into())]
        );
    }

    #[test]
    fn descendant_selectors_are_skipped_not_misread() {
        let sheet = parse_stylesheet("#a b { top: 1px } .card li { top: 2px } .card, p { top: 3px }");
        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(
            sheet.rules[0].selectors,
            vec![Selector::Class("card".into()), Selector::Type("p".into())]
        );
    }

    #[test]
    fn parses_attribute_selectors() {
        let sheet = parse_stylesheet(r#"[data-elm-flip-id="a"] { left: 3px } [hidden] { display: none }"#);
        assert_eq!(
            sheet.rules[0].selectors[0],
            Selector::Attribute {
                name: "data-elm-flip-id".into(),
                value: Some("a".into())
            }
        );
        assert_eq!(
            sheet.rules[1].selectors[0],
            Selector::Attribute {
                name: "hidden".into(),
                value: None
            }
        );
    }

    #[test]
    fn declarations_drop_important_and_lowercase_names() {
        let decls = parse_declarations("TOP: 4px !important; ; bogus");
        assert_eq!(
            decls,
            vec![Declaration {
                name: "top".into(),
                value: "4px".into()
            }]
        );
    }
}
