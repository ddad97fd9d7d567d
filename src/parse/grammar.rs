use winnow::ascii::till_line_ending;
use winnow::combinator::{alt, cut_err, not, opt, preceded, repeat, separated, terminated};
use winnow::error::{ErrMode, ModalResult, ParserError, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_while};

use crate::RuleDef;

use super::parser::ParsedRules;

// -- Whitespace & comments --------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    let _: () = repeat(
        0..,
        alt((
            take_while(1.., |c: char| c.is_ascii_whitespace()).void(),
            ('#', till_line_ending).void(),
        )),
    )
    .parse_next(input)?;
    Ok(())
}

// -- Identifiers ------------------------------------------------------------

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn ident<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., is_ident_char),
    )
        .take()
        .parse_next(input)
}

/// A keyword that is not the prefix of a longer identifier.
fn keyword<'i>(kw: &'static str) -> impl FnMut(&mut &'i str) -> ModalResult<&'i str> {
    move |input: &mut &'i str| terminated(kw, not(one_of(is_ident_char))).parse_next(input)
}

// -- String literals --------------------------------------------------------

/// A double-quoted string. Only `\"` and `\\` are unescaped to a single
/// character, plus `\n` and `\t`; any other escape is kept verbatim so
/// regex escapes like `\d` and `\b` survive inside trigger patterns.
fn string_literal(input: &mut &str) -> ModalResult<String> {
    '"'.parse_next(input)?;
    let mut s = String::new();
    loop {
        let ch = cut_err(any).parse_next(input)?;
        match ch {
            '"' => return Ok(s),
            '\\' => {
                let esc = cut_err(any).parse_next(input)?;
                match esc {
                    '"' => s.push('"'),
                    '\\' => s.push('\\'),
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    other => {
                        s.push('\\');
                        s.push(other);
                    }
                }
            }
            c => s.push(c),
        }
    }
}

fn string_list(input: &mut &str) -> ModalResult<Vec<String>> {
    separated(1.., preceded(ws, string_literal), (ws, ','))
        .context(StrContext::Expected(StrContextValue::Description(
            "quoted string",
        )))
        .parse_next(input)
}

// -- Rule bodies ------------------------------------------------------------

#[derive(Debug)]
enum Statement {
    Triggers(Vec<String>),
    Replies(Vec<String>),
    Handler(String),
}

fn statement(input: &mut &str) -> ModalResult<Statement> {
    ws.parse_next(input)?;
    alt((
        preceded(keyword("triggers"), cut_err(string_list)).map(Statement::Triggers),
        preceded(keyword("replies"), cut_err(string_list)).map(Statement::Replies),
        preceded(
            (keyword("handler"), ws),
            cut_err(ident).context(StrContext::Expected(StrContextValue::Description(
                "handler name",
            ))),
        )
        .map(|name: &str| Statement::Handler(name.to_owned())),
    ))
    .parse_next(input)
}

fn admin_annotation(input: &mut &str) -> ModalResult<()> {
    (ws, '(', ws, keyword("admin"), ws, cut_err(')'))
        .void()
        .parse_next(input)
}

fn rule_def(input: &mut &str) -> ModalResult<RuleDef> {
    ws.parse_next(input)?;
    keyword("rule").parse_next(input)?;
    ws.parse_next(input)?;

    let name = cut_err(ident)
        .context(StrContext::Expected(StrContextValue::Description(
            "rule name",
        )))
        .parse_next(input)?;

    let requires_admin = opt(admin_annotation).parse_next(input)?.is_some();

    ws.parse_next(input)?;
    cut_err(':').parse_next(input)?;

    let statements: Vec<Statement> = repeat(0.., statement).parse_next(input)?;

    let mut def = RuleDef {
        name: name.to_owned(),
        requires_admin,
        ..RuleDef::default()
    };
    for statement in statements {
        match statement {
            Statement::Triggers(patterns) => def.patterns.extend(patterns),
            Statement::Replies(replies) => def
                .replies
                .get_or_insert_with(Vec::new)
                .extend(replies),
            Statement::Handler(handler) => {
                // A rule binds at most one handler
                if def.handler.is_some() {
                    return Err(ErrMode::from_input(input).cut());
                }
                def.handler = Some(handler);
            }
        }
    }

    Ok(def)
}

// -- Top-level parser -------------------------------------------------------

pub fn parse_rules(input: &mut &str) -> ModalResult<ParsedRules> {
    let rules: Vec<RuleDef> = repeat(0.., rule_def).parse_next(input)?;
    ws.parse_next(input)?;
    Ok(ParsedRules { rules })
}
