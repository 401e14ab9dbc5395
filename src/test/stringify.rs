use crate::{
    snbt::{self, parse, stringify, ParseOptions, Quote, StringifyOptions},
    ByteArray, IntArray, LongArray, Value,
};

fn s(v: &str) -> Value {
    Value::String(v.to_owned())
}

fn compound(entries: Vec<(&str, Value)>) -> Value {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v))
        .collect()
}

fn compact(v: &Value) -> String {
    stringify(v, &StringifyOptions::default())
}

fn broken() -> StringifyOptions {
    StringifyOptions {
        break_length: 0,
        ..StringifyOptions::pretty()
    }
}

fn sample() -> Value {
    compound(vec![
        ("byte", Value::Byte(-7)),
        ("short", Value::Short(i16::MIN)),
        ("int", Value::Int(i32::MAX)),
        ("long", Value::Long(i64::MIN)),
        ("float", Value::Float(f32::MAX)),
        ("tiny float", Value::Float(1e-10)),
        ("double", Value::Double(1.0)),
        ("big double", Value::Double(1e21)),
        ("small double", Value::Double(-1e-7)),
        ("quotes", s(r#"she said "it's \ fine""#)),
        ("looks like a number", s("12")),
        ("", s("")),
        ("bytes", Value::ByteArray(ByteArray::new(vec![-128, 0, 127]))),
        ("no ints", Value::IntArray(IntArray::new(vec![]))),
        ("longs", Value::LongArray(LongArray::new(vec![i64::MAX, -1]))),
        (
            "items",
            Value::List(vec![
                compound(vec![("id", s("minecraft:stone")), ("Count", Value::Byte(64))]),
                compound(vec![]),
            ]),
        ),
        (
            "nested",
            Value::List(vec![
                Value::List(vec![Value::Int(1), Value::Int(2)]),
                Value::List(vec![]),
            ]),
        ),
        ("empty", compound(vec![])),
    ])
}

#[test]
fn scalars() {
    assert_eq!(compact(&Value::Byte(1)), "1b");
    assert_eq!(compact(&Value::Short(-2)), "-2s");
    assert_eq!(compact(&Value::Int(3)), "3");
    assert_eq!(compact(&Value::Long(4)), "4l");
    assert_eq!(compact(&Value::Float(1.5)), "1.5f");
    assert_eq!(compact(&Value::Float(3.0)), "3f");
}

#[test]
fn doubles_keep_a_point() {
    assert_eq!(compact(&Value::Double(1.0)), "1.0");
    assert_eq!(compact(&Value::Double(0.25)), "0.25");
    assert_eq!(compact(&Value::Double(-0.0)), "-0.0");

    let opts = StringifyOptions {
        strict_double: true,
        ..Default::default()
    };
    assert_eq!(stringify(&Value::Double(1.0), &opts), "1.0d");
    assert_eq!(stringify(&Value::Double(1.5), &opts), "1.5d");
}

#[test]
fn strings_pick_quote() {
    assert_eq!(compact(&s("hello")), r#""hello""#);
    assert_eq!(compact(&s(r#"say "hi""#)), r#"'say "hi"'"#);
    assert_eq!(compact(&s(r#"abcdefghij""#)), r#""abcdefghij\"""#);
    assert_eq!(compact(&s("\\")), r#""\\""#);
}

#[test]
fn forced_quote() {
    let opts = StringifyOptions {
        quote: Some(Quote::Single),
        ..Default::default()
    };
    assert_eq!(stringify(&s("it's"), &opts), r#"'it\'s'"#);

    let opts = StringifyOptions {
        quote: Some(Quote::Double),
        ..Default::default()
    };
    assert_eq!(stringify(&s(r#"say "hi""#), &opts), r#""say \"hi\"""#);
}

#[test]
fn escaped_backslash_round_trip() {
    let text = "\"\\\\\"";
    let v = parse(text, &ParseOptions::default()).unwrap();
    assert_eq!(v, s("\\"));
    assert_eq!(compact(&v), text);
}

#[test]
fn booleans() {
    assert_eq!(compact(&Value::Bool(true)), r#""true""#);

    let opts = StringifyOptions {
        use_boolean: true,
        ..Default::default()
    };
    assert_eq!(stringify(&Value::Bool(false), &opts), "false");
}

#[test]
fn typed_arrays() {
    assert_eq!(
        compact(&Value::ByteArray(ByteArray::new(vec![1, -2]))),
        "[B;1,-2]"
    );
    assert_eq!(compact(&Value::IntArray(IntArray::new(vec![]))), "[I;]");
    assert_eq!(compact(&Value::LongArray(LongArray::new(vec![5]))), "[L;5]");
}

#[test]
fn compact_containers() {
    assert_eq!(compact(&compound(vec![])), "{}");
    assert_eq!(compact(&Value::List(vec![])), "[]");
    assert_eq!(
        compact(&compound(vec![("a", Value::Int(1)), ("b", s("x y"))])),
        r#"{ a: 1, b: "x y" }"#
    );
    assert_eq!(
        compact(&Value::List(vec![Value::Int(1), Value::Int(2)])),
        "[1, 2]"
    );
}

#[test]
fn keys_quoted_when_needed() {
    let v = compound(vec![
        ("minecraft.x", Value::Int(1)),
        ("b c", Value::Int(2)),
        ("", Value::Int(3)),
        ("say \"hi\"", Value::Int(4)),
    ]);
    assert_eq!(
        compact(&v),
        r#"{ minecraft.x: 1, "b c": 2, "": 3, 'say "hi"': 4 }"#
    );
}

#[test]
fn pretty_short_stays_on_one_line() {
    let v = compound(vec![("a", Value::Int(1)), ("b", Value::Int(2))]);
    assert_eq!(stringify(&v, &StringifyOptions::pretty()), "{ a: 1, b: 2 }");
}

#[test]
fn pretty_breaks_long_lines() {
    let v = compound(vec![("a", Value::Int(1)), ("b", Value::Int(2))]);
    assert_eq!(stringify(&v, &broken()), "{\n    a: 1,\n    b: 2\n}");

    let long = compound(vec![("text", s(&"x".repeat(80)))]);
    let out = stringify(&long, &StringifyOptions::pretty());
    assert_eq!(out, format!("{{\n    text: \"{}\"\n}}", "x".repeat(80)));
}

#[test]
fn pretty_without_commas() {
    let v = parse("{a:1,b:2}", &ParseOptions::default()).unwrap();
    let opts = StringifyOptions {
        pretty: true,
        skip_comma: true,
        break_length: 1,
        ..Default::default()
    };
    assert_eq!(stringify(&v, &opts), "{\n    a: 1\n    b: 2\n}");
}

#[test]
fn pretty_nested() {
    let v = compound(vec![
        ("a", compound(vec![("b", Value::Int(1))])),
        ("c", Value::List(vec![Value::Int(1), Value::Int(2)])),
    ]);
    assert_eq!(
        stringify(&v, &broken()),
        "{\n    a: {\n        b: 1\n    },\n    c: [\n        1,\n        2\n    ]\n}"
    );
}

#[test]
fn child_with_newline_breaks_parent() {
    let v = compound(vec![("s", s("a\nb"))]);
    assert_eq!(
        stringify(&v, &StringifyOptions::pretty()),
        "{\n    s: \"a\nb\"\n}"
    );

    let inner = Value::List(vec![s(&"y".repeat(40)), s(&"z".repeat(40))]);
    let v = compound(vec![("l", inner)]);
    let out = stringify(&v, &StringifyOptions::pretty());
    assert!(out.starts_with("{\n    l: [\n        \"yyy"));
    assert!(out.ends_with("\"\n    ]\n}"));
}

#[test]
fn custom_tab_and_newline() {
    let opts = StringifyOptions {
        tab: "\t".to_owned(),
        newline: "\r\n".to_owned(),
        ..broken()
    };
    let v = compound(vec![("a", compound(vec![("b", Value::Int(1))]))]);
    assert_eq!(stringify(&v, &opts), "{\r\n\ta: {\r\n\t\tb: 1\r\n\t}\r\n}");
}

#[test]
fn list_of_compounds_indents() {
    let v = compound(vec![(
        "items",
        Value::List(vec![
            compound(vec![("id", Value::Int(1))]),
            compound(vec![("id", Value::Int(2))]),
        ]),
    )]);
    assert_eq!(
        stringify(&v, &broken()),
        "{\n    items: [\n        {\n            id: 1\n        },\n        {\n            id: 2\n        }\n    ]\n}"
    );
}

#[test]
fn list_of_compounds_hugs() {
    let v = compound(vec![(
        "items",
        Value::List(vec![
            compound(vec![("id", Value::Int(1))]),
            compound(vec![("id", Value::Int(2))]),
        ]),
    )]);
    let opts = StringifyOptions {
        no_tag_list_tab: true,
        ..broken()
    };
    assert_eq!(
        stringify(&v, &opts),
        "{\n    items: [{\n        id: 1\n    }, {\n        id: 2\n    }]\n}"
    );

    // Only lists made entirely of compounds are hugged.
    let mixed = Value::List(vec![compound(vec![]), Value::Int(2)]);
    assert_eq!(stringify(&mixed, &opts), "[\n    {},\n    2\n]");
}

#[test]
fn hugged_list_breaks_when_too_long() {
    let items = Value::List(
        (0..20)
            .map(|i| compound(vec![("id", Value::Int(i))]))
            .collect(),
    );
    let opts = StringifyOptions {
        no_tag_list_tab: true,
        ..StringifyOptions::pretty()
    };

    let out = stringify(&items, &opts);
    assert!(out.starts_with("[{\n    id: 0\n}, {\n    id: 1\n}, {"));
    assert!(out.ends_with("}, {\n    id: 19\n}]"));
    assert_eq!(out.matches('\n').count(), 40);
    assert_eq!(parse(&out, &ParseOptions::default()).unwrap(), items);

    // Short enough lists stay on one line.
    let short = Value::List(vec![
        compound(vec![("id", Value::Int(1))]),
        compound(vec![("id", Value::Int(2))]),
    ]);
    assert_eq!(stringify(&short, &opts), "[{ id: 1 }, { id: 2 }]");
}

#[test]
fn hugged_list_without_commas() {
    let v = Value::List(vec![
        compound(vec![("a", Value::Int(1))]),
        compound(vec![("b", Value::Int(2))]),
    ]);
    let opts = StringifyOptions {
        no_tag_list_tab: true,
        skip_comma: true,
        ..broken()
    };

    let out = stringify(&v, &opts);
    assert_eq!(out, "[{\n    a: 1\n}\n{\n    b: 2\n}]");

    let parse_opts = ParseOptions {
        skip_comma: true,
        ..Default::default()
    };
    assert_eq!(parse(&out, &parse_opts).unwrap(), v);

    let nested = compound(vec![("l", v.clone())]);
    let out = stringify(&nested, &opts);
    assert_eq!(
        out,
        "{\n    l: [{\n        a: 1\n    }\n    {\n        b: 2\n    }]\n}"
    );
    assert_eq!(parse(&out, &parse_opts).unwrap(), nested);
}

#[test]
fn round_trip_compact() {
    let v = sample();
    assert_eq!(parse(&compact(&v), &ParseOptions::default()).unwrap(), v);
}

#[test]
fn round_trip_pretty() {
    let v = sample();
    let text = stringify(&v, &StringifyOptions::pretty());
    assert!(text.contains('\n'));
    assert_eq!(parse(&text, &ParseOptions::default()).unwrap(), v);

    let text = stringify(&v, &broken());
    assert_eq!(parse(&text, &ParseOptions::default()).unwrap(), v);
}

#[test]
fn round_trip_with_options() {
    let mut v = sample();
    if let Value::Compound(c) = &mut v {
        c.insert("flag".to_owned(), Value::Bool(true));
    }

    let opts = StringifyOptions {
        skip_comma: true,
        use_boolean: true,
        strict_double: true,
        no_tag_list_tab: true,
        quote: Some(Quote::Single),
        ..broken()
    };
    let parse_opts = ParseOptions {
        skip_comma: true,
        use_boolean: true,
    };

    let text = stringify(&v, &opts);
    assert_eq!(parse(&text, &parse_opts).unwrap(), v);
}

#[test]
fn display_is_compact() {
    let v = compound(vec![("a", Value::List(vec![Value::Byte(1)]))]);
    assert_eq!(v.to_string(), "{ a: [1b] }");
    assert_eq!(v.to_string().parse::<Value>().unwrap(), v);
}

#[test]
fn serialize_struct_to_string() {
    #[derive(serde::Serialize)]
    struct Item {
        id: String,
        #[serde(rename = "Count")]
        count: i8,
        damage: Option<i16>,
    }

    let out = snbt::to_string(
        &Item {
            id: "minecraft:diamond_sword".to_owned(),
            count: 1,
            damage: Some(3),
        },
        &StringifyOptions::default(),
    )
    .unwrap();
    assert_eq!(out, r#"{ id: "minecraft:diamond_sword", Count: 1b, damage: 3s }"#);
}

#[test]
fn options_from_json() {
    let opts: StringifyOptions = serde_json::from_str(
        r#"{"pretty": true, "breakLength": 0, "quote": "single", "noTagListTab": true}"#,
    )
    .unwrap();

    assert_eq!(
        opts,
        StringifyOptions {
            pretty: true,
            break_length: 0,
            quote: Some(Quote::Single),
            no_tag_list_tab: true,
            ..Default::default()
        }
    );
}
