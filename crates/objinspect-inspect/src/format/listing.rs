use objinspect_core::{Class, Function, Inspected, Member, Method, Property};

use super::signature::{render_signature, type_tag};
use super::table::{paint, render_rows};
use super::{FormatOptions, first_line, theme};
use crate::namespace::Listing;

/// Longest variable value shown in a listing before it is cut.
const MAX_VALUE_LEN: usize = 50;
const RULE_WIDTH: usize = 80;

const MEMBER_STYLES: &[Option<&str>] = &[Some(theme::NAME), Some(theme::KEYWORD), None];
const PARAM_STYLES: &[Option<&str>] = &[Some(theme::NAME), Some(theme::TYPE), None];

/// Signature line, description, and one row per parameter.
#[must_use]
pub fn render_function(function: &Function, options: &FormatOptions) -> String {
    let mut lines = vec![render_signature(function, options)];
    let pad = " ".repeat(options.indent);
    if let Some(description) = &function.description {
        lines.push(format!(
            "{pad}{}",
            paint(description, Some(theme::DESCRIPTION), options.color)
        ));
    }
    let rows: Vec<Vec<String>> = function
        .parameters
        .iter()
        .map(|param| {
            vec![
                param.name.clone(),
                type_tag(&param.ty),
                first_line(param.description.as_deref()),
            ]
        })
        .collect();
    if !rows.is_empty() {
        lines.push(render_rows(&rows, PARAM_STYLES, options));
    }
    lines.join("\n")
}

/// `class Name:` header, description, and one aligned row per member.
#[must_use]
pub fn render_class(class: &Class, options: &FormatOptions) -> String {
    let header = format!(
        "{} {}:",
        paint("class", Some(theme::KEYWORD), options.color),
        paint(&class.name, Some(theme::FUNCTION), options.color)
    );
    let mut lines = vec![header];
    if let Some(description) = &class.description {
        lines.push(format!(
            "{}{}",
            " ".repeat(options.indent),
            paint(description, Some(theme::DESCRIPTION), options.color)
        ));
    }
    let rows: Vec<Vec<String>> = class
        .members
        .iter()
        .map(|member| {
            vec![
                member.name().to_string(),
                member_tag(member),
                first_line(member.description()),
            ]
        })
        .collect();
    if !rows.is_empty() {
        lines.push(render_rows(&rows, MEMBER_STYLES, options));
    }
    lines.join("\n")
}

/// Render whatever `inspect()` returned.
#[must_use]
pub fn render_inspected(inspected: &Inspected, options: &FormatOptions) -> String {
    match inspected {
        Inspected::Function(function) => render_function(function, options),
        Inspected::Method(method) => render_method(method, options),
        Inspected::Property(property) => render_property(property, options),
        Inspected::Class(class) => render_class(class, options),
    }
}

fn render_method(method: &Method, options: &FormatOptions) -> String {
    let tag = match method.binding {
        objinspect_core::MethodBinding::Instance => None,
        binding => Some(format!("@{binding}")),
    };
    let body = render_function(&method.function, options);
    match tag {
        Some(tag) => format!("{}\n{body}", paint(&tag, Some(theme::KEYWORD), options.color)),
        None => body,
    }
}

fn render_property(property: &Property, options: &FormatOptions) -> String {
    let mut line = paint(&property.name, Some(theme::NAME), options.color);
    let ty = type_tag(&property.ty);
    if !ty.is_empty() {
        line.push_str(": ");
        line.push_str(&paint(&ty, Some(theme::TYPE), options.color));
    }
    let mut lines = vec![line];
    if let Some(description) = &property.description {
        lines.push(format!(
            "{}{}",
            " ".repeat(options.indent),
            paint(description, Some(theme::DESCRIPTION), options.color)
        ));
    }
    lines.join("\n")
}

/// Kind tag shown next to a member name.
fn member_tag(member: &Member) -> String {
    match member {
        Member::Method(method) if method.is_constructor => "constructor".to_string(),
        Member::Method(method) => method.binding.as_str().to_string(),
        Member::Property(property) => {
            let ty = type_tag(&property.ty);
            let access = if property.writable { "property rw" } else { "property" };
            if ty.is_empty() {
                access.to_string()
            } else {
                format!("{access}: {ty}")
            }
        }
    }
}

/// Sectioned listing: `Variables`, `Classes`, `Methods`, `Functions`, and
/// `Dunders` when requested. Empty sections are left out.
#[must_use]
pub fn render_listing(listing: &Listing, include_dunders: bool, options: &FormatOptions) -> String {
    let pad = " ".repeat(options.indent);
    let mut sections: Vec<String> = Vec::new();
    let mut section = |title: &str, lines: Vec<String>| {
        if lines.is_empty() {
            return;
        }
        let mut block = vec![paint(&format!("{title}:"), Some(theme::HEADING), options.color)];
        block.extend(lines.into_iter().map(|line| format!("{pad}{line}")));
        sections.push(block.join("\n"));
    };

    section(
        "Variables",
        listing
            .variables
            .iter()
            .map(|(name, value)| {
                format!(
                    "{} = {}",
                    paint(name, Some(theme::NAME), options.color),
                    shorten(&value.to_string())
                )
            })
            .collect(),
    );
    section(
        "Classes",
        listing
            .classes
            .iter()
            .map(|class| {
                let mut line = paint(&class.name, Some(theme::FUNCTION), options.color);
                if !class.bases.is_empty() {
                    line.push_str(&format!("({})", class.bases.join(", ")));
                }
                if let Some(description) = &class.description {
                    line.push_str("  ");
                    line.push_str(&paint(description, Some(theme::DESCRIPTION), options.color));
                }
                line
            })
            .collect(),
    );
    let signatures = |functions: &[Function]| -> Vec<String> {
        functions
            .iter()
            .map(|function| render_signature(function, options))
            .collect()
    };
    section("Methods", signatures(&listing.methods));
    section("Functions", signatures(&listing.functions));
    if include_dunders {
        section("Dunders", signatures(&listing.dunders));
    }

    let body = sections.join("\n\n");
    if options.separator {
        let rule = "─".repeat(options.max_width.unwrap_or(RULE_WIDTH));
        format!("{rule}\n{body}\n{rule}")
    } else {
        body
    }
}

fn shorten(value: &str) -> String {
    if value.chars().count() <= MAX_VALUE_LEN {
        return value.to_string();
    }
    let mut out: String = value.chars().take(MAX_VALUE_LEN).collect();
    out.push_str("...");
    out
}
