//! Shared fixtures for the integration tests

#![allow(dead_code)]

use rhtmx_pattern::Params;

/// One pattern, one input, and the expected captures (`None` = no match)
pub struct Case {
    pub name: &'static str,
    pub pattern: &'static str,
    pub input: &'static str,
    pub want: Option<&'static [(&'static str, &'static str)]>,
}

const fn case(
    name: &'static str,
    pattern: &'static str,
    input: &'static str,
    want: Option<&'static [(&'static str, &'static str)]>,
) -> Case {
    Case {
        name,
        pattern,
        input,
        want,
    }
}

/// Patterns that compile, matched against inputs
///
/// A single registered pattern must give the same answer through
/// `Pattern::lookup` and through `Store::find`.
pub const BASIC_CASES: &[Case] = &[
    case("C", "qwe", "", None),
    case("C", "qwe", "qwe", Some(&[])),
    case("C", "qwe", "qwe123", None),
    case("C", "qwe", "123qwe", None),
    case("C", "qwe", "qw123e", None),
    case("P", "{qwe}", "123", Some(&[("qwe", "123")])),
    case("P", "{qwe}", "", Some(&[("qwe", "")])),
    case("PC", "{qwe}foo", "", None),
    case("PC", "{qwe}foo", "123", None),
    case("PC", "{qwe}foo", "123foo", Some(&[("qwe", "123")])),
    case("PC", "{qwe}foo", "123foo123", None),
    case("PC", "{qwe}foo", "foo123", None),
    case("PC", "{qwe}foo", "foo", Some(&[("qwe", "")])),
    case("CP", "foo{qwe}", "", None),
    case("CP", "foo{qwe}", "123", None),
    case("CP", "foo{qwe}", "foo123", Some(&[("qwe", "123")])),
    case("CP", "foo{qwe}", "123foo123", None),
    case("CP", "foo{qwe}", "123foo", None),
    case("CP", "foo{qwe}", "foo", Some(&[("qwe", "")])),
    case("CPC", "foo{qwe}bar", "", None),
    case("CPC", "foo{qwe}bar", "foo", None),
    case("CPC", "foo{qwe}bar", "bar", None),
    case("CPC", "foo{qwe}bar", "barfoo", None),
    case("CPC", "foo{qwe}bar", "barfoo123", None),
    case("CPC", "foo{qwe}bar", "foo123", None),
    case("CPC", "foo{qwe}bar", "123bar", None),
    case("CPC", "foo{qwe}bar", "foobar", Some(&[("qwe", "")])),
    case("CPC", "foo{qwe}bar", "foo123bar", Some(&[("qwe", "123")])),
    case("CPC", "foo{qwe}bar", "123foo123bar", None),
    case("CPC", "foo{qwe}bar", "foo123bar123", None),
    case("CPC", "foo{qwe}bar", "foobar123", None),
    case("CPC", "foo{qwe}bar", "123foobar", None),
    case(
        "utf8 pattern",
        "foo{p1}日本語{p2}baz",
        "fooAAA日本語BBBbaz",
        Some(&[("p1", "AAA"), ("p2", "BBB")]),
    ),
    case(
        "utf8 param",
        "foo{p1}bar{p2}baz",
        "foo日本語barСЫРbaz",
        Some(&[("p1", "日本語"), ("p2", "СЫР")]),
    ),
    case("PCP", "{p1}qw{p2}", "", None),
    case("PCP", "{p1}qw{p2}", "123", None),
    case("PCP", "{p1}qw{p2}", "q", None),
    case("PCP", "{p1}qw{p2}", "w", None),
    case("PCP", "{p1}qw{p2}", "qw", Some(&[("p1", ""), ("p2", "")])),
    case("PCP", "{p1}qw{p2}", "qw123", Some(&[("p1", ""), ("p2", "123")])),
    case("PCP", "{p1}qw{p2}", "w123", None),
    case("PCP", "{p1}qw{p2}", "qw123456", Some(&[("p1", ""), ("p2", "123456")])),
    case("PCP", "{p1}qw{p2}", "123qw", Some(&[("p1", "123"), ("p2", "")])),
    case("PCP", "{p1}qw{p2}", "123q", None),
    case("PCP", "{p1}qw{p2}", "456123qw", Some(&[("p1", "456123"), ("p2", "")])),
    case("CPCPC", "foo{p1}bar{p2}baz", "", None),
    case("CPCPC", "foo{p1}bar{p2}baz", "foo", None),
    case("CPCPC", "foo{p1}bar{p2}baz", "foobaz", None),
    case("CPCPC", "foo{p1}bar{p2}baz", "barbaz", None),
    case("CPCPC", "foo{p1}bar{p2}baz", "foobar", None),
    case("CPCPC", "foo{p1}bar{p2}baz", "foobarbaz", Some(&[("p1", ""), ("p2", "")])),
    case("CPCPC", "foo{p1}bar{p2}baz", "foo123barbaz", Some(&[("p1", "123"), ("p2", "")])),
    case(
        "CPCPC",
        "foo{p1}bar{p2}baz",
        "foo123bar456baz",
        Some(&[("p1", "123"), ("p2", "456")]),
    ),
    case("CPCPC", "foo{p1}bar{p2}baz", "foo123bar456baz789", None),
    case("CPCPC", "foo{p1}bar{p2}baz", "foobar456baz789", None),
    case("CPCPC", "foo{p1}bar{p2}baz", "456foo123bar456baz", None),
    case("CPCPC", "foo{p1}bar{p2}baz", "456foobarbaz123", None),
    case("two params", "{foo}foo{bar}", "123foo", Some(&[("foo", "123"), ("bar", "")])),
    case("two params", "{foo}foo{bar}", "foo456", Some(&[("foo", ""), ("bar", "456")])),
    case("without params", "foobar", "foo123bar", None),
    case("short input", "#snippet-{boundary}", "foobar", None),
    case("short input", "verylongpattern-{p1}", "smallinput", None),
    case("leading param", "{v1}fooobar{v2}", "1fooobar2", Some(&[("v1", "1"), ("v2", "2")])),
    case("leading param", "{v1}fooobar{v2}", "1fooobar", Some(&[("v1", "1"), ("v2", "")])),
    case("leading param", "{v1}fooobar", "111fooobar", Some(&[("v1", "111")])),
    case("leading param", "{v1}fooobar", "fooobar", Some(&[("v1", "")])),
    case("trailing param", "fooobar{v2}", "fooobar222", Some(&[("v2", "222")])),
    case("trailing param", "fooobar{v2}", "fooobar", Some(&[("v2", "")])),
    case("reopened delimiter", "{{bar}", "{123", Some(&[("bar", "123")])),
];

/// Captures as `(name, value)` pairs, in placeholder order
pub fn pairs<'a>(params: &Params<'a>) -> Vec<(&'a str, &'a str)> {
    params.iter().map(|param| (param.name, param.value)).collect()
}

/// Installs a test-writer subscriber once per test binary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
