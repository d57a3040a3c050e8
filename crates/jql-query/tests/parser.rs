//! Parser behaviour on well-formed queries.

#![allow(clippy::tests_outside_test_module)]

use jql_query::{
    Clause, HistoryPredicate, JqlQueryParser, Literal, Operand, Operator, Query, SortOrder,
    parse,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

/// Parses `input` and returns its clause.
fn clause(input: &str) -> Clause {
    parse(input)
        .unwrap_or_else(|e| panic!("{input:?}: {e}"))
        .clause()
        .cloned()
        .unwrap_or_else(|| panic!("{input:?} has no clause"))
}

/// Builds a terminal clause.
fn term(field: &str, operator: Operator, operand: Operand) -> Clause {
    Clause::terminal(field, operator, operand).unwrap()
}

/// `field = value` with a string value.
fn eq(field: &str, value: &str) -> Clause {
    term(field, Operator::Equals, Operand::string(value))
}

/// String list operand.
fn list(values: &[&str]) -> Operand {
    Operand::list(values.iter().map(|v| Operand::string(*v)).collect()).unwrap()
}

#[test]
fn whitespace_is_insignificant() {
    for input in [
        "priority = major",
        "priority=major",
        "  priority   =   major  ",
        "\npriority\r\n=\tmajor\n",
    ] {
        assert_eq!(clause(input), eq("priority", "major"), "{input:?}");
    }
}

#[test]
fn words_may_contain_dashes_and_dots() {
    assert_eq!(clause("key = one-1"), eq("key", "one-1"));
    assert_eq!(clause("-78a = a"), eq("-78a", "a"));
    assert_eq!(clause("version = 1.2.3"), eq("version", "1.2.3"));
}

#[test]
fn comparison_operators() {
    let cases = [
        ("a = b", Operator::Equals),
        ("a != b", Operator::NotEquals),
        ("a ~ b", Operator::Like),
        ("a !~ b", Operator::NotLike),
        ("a < b", Operator::LessThan),
        ("a <= b", Operator::LessThanEquals),
        ("a > b", Operator::GreaterThan),
        ("a >= b", Operator::GreaterThanEquals),
    ];
    for (input, operator) in cases {
        assert_eq!(clause(input), term("a", operator, Operand::string("b")), "{input}");
    }
    assert_eq!(
        clause("a >= -29202"),
        term("a", Operator::GreaterThanEquals, Operand::integer(-29202))
    );
}

#[test]
fn numbers_are_typed() {
    assert_eq!(clause("a = 12345"), term("a", Operator::Equals, Operand::integer(12345)));
    assert_eq!(clause("a = '12345'"), eq("a", "12345"));
    assert_eq!(clause("a = 12a345"), eq("a", "12a345"));
    assert_eq!(
        clause("a = 2.50"),
        term("a", Operator::Equals, Operand::decimal(Decimal::new(250, 2)))
    );
}

#[test]
fn membership() {
    for input in ["a in (x, y)", "a IN (x,y)", "a In(x , y)"] {
        assert_eq!(
            clause(input),
            term("a", Operator::In, list(&["x", "y"])),
            "{input}"
        );
    }
    for input in ["a not in (x)", "a NOT IN (x)", "a nOt iN (x)"] {
        assert_eq!(clause(input), term("a", Operator::NotIn, list(&["x"])), "{input}");
    }
    assert_eq!(
        clause("a in (EMPTY, 1, f())"),
        term(
            "a",
            Operator::In,
            Operand::list(vec![
                Operand::Empty,
                Operand::integer(1),
                Operand::function("f", vec![]).unwrap(),
            ])
            .unwrap()
        )
    );
    assert_eq!(
        clause("a in membersOf(devs)"),
        term(
            "a",
            Operator::In,
            Operand::function("membersOf", vec!["devs".into()]).unwrap()
        )
    );
}

#[test]
fn quoted_reserved_words_in_lists() {
    assert_eq!(
        clause("a in ('select', \"and\", 'empty')"),
        term("a", Operator::In, list(&["select", "and", "empty"]))
    );
}

#[test]
fn emptiness() {
    for input in ["a is empty", "a IS EMPTY", "a is null", "a = EMPTY"] {
        let parsed = clause(input);
        let Clause::Terminal(terminal) = &parsed else {
            panic!("{input}: not a terminal");
        };
        assert_eq!(terminal.operand(), &Operand::Empty, "{input}");
    }
    assert_eq!(
        clause("a is not null"),
        term("a", Operator::IsNot, Operand::Empty)
    );
    assert_eq!(clause("a = 'empty'"), eq("a", "empty"));
    assert_eq!(clause("a = \"NULL\""), eq("a", "NULL"));
}

#[test]
fn escapes_and_unicode() {
    assert_eq!(clause("a = 'don\\'t'"), eq("a", "don't"));
    assert_eq!(clause("a = \"tab\\there\""), eq("a", "tab\there"));
    assert_eq!(clause("a = \\u00e9t\\u00e9"), eq("a", "été"));
    assert_eq!(clause("a = 日本語"), eq("a", "日本語"));
    assert_eq!(clause("a = 'line\nbreak'"), eq("a", "line\nbreak"));
    assert_eq!(clause("a = my\\ value"), eq("a", "my value"));
}

#[test]
fn custom_fields() {
    assert_eq!(clause("cf[12345] = x"), eq("cf[12345]", "x"));
    assert_eq!(clause("Cf  [ 0005 ] = x"), eq("cf[5]", "x"));
    assert_eq!(clause("'cf[12]' = x"), eq("cf[12]", "x"));
}

#[test]
fn entity_properties() {
    let Clause::Terminal(terminal) = clause("issue.property['support level'] = gold") else {
        panic!("not a terminal");
    };
    assert_eq!(terminal.field(), "issue.property");
    assert_eq!(terminal.property().unwrap().keys(), ["support level"]);

    for key in ["[1234]", "[-1234]", "[a.b.c]"] {
        assert!(parse(&format!("issue.property{key} = x")).is_ok(), "{key}");
    }

    let Clause::Terminal(terminal) = clause("comment.prop[author].author.name = filip") else {
        panic!("not a terminal");
    };
    let property = terminal.property().unwrap();
    assert_eq!(property.key_path(), "author");
    assert_eq!(property.reference_path(), "author.name");
}

#[test]
fn functions() {
    let cases: [(&str, &str, &[&str]); 5] = [
        ("a = now()", "now", &[]),
        ("a = startOfDay(-1d)", "startOfDay", &["-1d"]),
        ("a = 'quoted name'(x, 'y z')", "quoted name", &["x", "y z"]),
        ("a = 4759879()", "4759879", &[]),
        ("a = f(99999999999999999999, 1.5)", "f", &["99999999999999999999", "1.5"]),
    ];
    for (input, name, args) in cases {
        let expected = Operand::function(name, args.iter().map(|a| a.to_string()).collect());
        assert_eq!(
            clause(input),
            term("a", Operator::Equals, expected.unwrap()),
            "{input}"
        );
    }
}

#[test]
fn symbolic_logical_operators() {
    let and = Clause::and(vec![eq("a", "b"), eq("c", "d")]).unwrap();
    let or = Clause::or(vec![eq("a", "b"), eq("c", "d")]).unwrap();
    assert_eq!(clause("a = b & c = d"), and);
    assert_eq!(clause("a = b && c = d"), and);
    assert_eq!(clause("a = b | c = d"), or);
    assert_eq!(clause("a = b || c = d"), or);
    assert_eq!(clause("!a = b"), Clause::not(eq("a", "b")));
    assert_eq!(clause("! a = b"), Clause::not(eq("a", "b")));
}

#[test]
fn or_chains_are_flat() {
    for n in 2..6 {
        let input = (0..n)
            .map(|i| format!("f{i} = v"))
            .collect::<Vec<_>>()
            .join(" OR ");
        let Clause::Or(or) = clause(&input) else {
            panic!("{input}: not an OR");
        };
        assert_eq!(or.children().len(), n);
    }
}

#[test]
fn precedence() {
    assert_eq!(
        clause("a = b AND c = d OR e = f AND NOT g = h"),
        Clause::or(vec![
            Clause::and(vec![eq("a", "b"), eq("c", "d")]).unwrap(),
            Clause::and(vec![eq("e", "f"), Clause::not(eq("g", "h"))]).unwrap(),
        ])
        .unwrap()
    );
    assert_eq!(
        clause("a = b AND (c = d OR e = f)"),
        Clause::and(vec![
            eq("a", "b"),
            Clause::or(vec![eq("c", "d"), eq("e", "f")]).unwrap(),
        ])
        .unwrap()
    );
    assert_eq!(
        clause("NOT (a = b AND c = d)"),
        Clause::not(Clause::and(vec![eq("a", "b"), eq("c", "d")]).unwrap())
    );
    assert_eq!(clause("NOT NOT a = b"), Clause::not(Clause::not(eq("a", "b"))));
    assert_eq!(clause("((a = b))"), eq("a", "b"));
}

#[test]
fn keywords_ignore_case_but_values_do_not() {
    assert_eq!(clause("a = Open and b = open"), clause("a = Open AND b = open"));
    assert_ne!(clause("a = Open"), clause("a = open"));
}

#[test]
fn order_by() {
    let query = parse("project = 'HSP' AND status != Closed ORDER BY priority DESC").unwrap();
    assert_eq!(
        query.clause(),
        Some(
            &Clause::and(vec![
                eq("project", "HSP"),
                term("status", Operator::NotEquals, Operand::string("Closed")),
            ])
            .unwrap()
        )
    );
    let sorts = query.order_by().sorts();
    assert_eq!(sorts.len(), 1);
    assert_eq!(sorts[0].field(), "priority");
    assert_eq!(sorts[0].order(), SortOrder::Desc);

    let query = parse("order by crap, cf[12345] ASC, issue.prop[x] desc").unwrap();
    assert!(query.clause().is_none());
    let sorts = query.order_by().sorts();
    assert_eq!(
        sorts.iter().map(|s| (s.field(), s.order())).collect::<Vec<_>>(),
        [
            ("crap", SortOrder::Asc),
            ("cf[12345]", SortOrder::Asc),
            ("issue.prop", SortOrder::Desc),
        ]
    );
    assert!(sorts[2].property().is_some());
}

#[test]
fn empty_queries() {
    for input in ["", "   ", "\n\t"] {
        assert_eq!(parse(input).unwrap(), Query::empty(), "{input:?}");
    }
}

#[test]
fn was_clauses() {
    let parsed = clause("status was Open by admin during ('2011/05/01','2011/05/31')");
    let Clause::Was(was) = &parsed else {
        panic!("not a WAS clause");
    };
    assert_eq!(was.operator(), Operator::Was);
    assert_eq!(was.operand(), &Operand::string("Open"));
    let expected = HistoryPredicate::all(vec![
        HistoryPredicate::By(Operand::string("admin")),
        HistoryPredicate::During(Operand::string("2011/05/01"), Operand::string("2011/05/31")),
    ])
    .unwrap();
    assert_eq!(was.predicate(), Some(&expected));

    let operators = [
        ("status was not Open", Operator::WasNot),
        ("status was in (Open)", Operator::WasIn),
        ("status was not in (Open, Closed)", Operator::WasNotIn),
    ];
    for (input, operator) in operators {
        let Clause::Was(was) = clause(input) else {
            panic!("{input}: not a WAS clause");
        };
        assert_eq!(was.operator(), operator, "{input}");
    }

    let Clause::Was(was) = clause("status was open") else {
        panic!("not a WAS clause");
    };
    assert!(was.predicate().is_none());
}

#[test]
fn changed_clauses() {
    let Clause::Changed(changed) =
        clause("assignee CHANGED FROM bob TO alice AFTER startOfWeek() BEFORE '2024-01-01'")
    else {
        panic!("not a CHANGED clause");
    };
    let Some(HistoryPredicate::And(group)) = changed.predicate() else {
        panic!("expected a predicate group");
    };
    assert_eq!(group.predicates().len(), 4);
    assert_eq!(
        group.predicates()[2],
        HistoryPredicate::After(Operand::function("startOfWeek", vec![]).unwrap())
    );

    let Clause::Changed(changed) = clause("assignee changed") else {
        panic!("not a CHANGED clause");
    };
    assert!(changed.predicate().is_none());
}

#[test]
fn fields_and_functions_are_collected() {
    let parsed = clause("a = x AND (b in f(1) OR NOT c was g()) AND d changed by h()");
    assert_eq!(parsed.fields(), ["a", "b", "c", "d"]);
    let names: Vec<&str> = parsed.functions().iter().map(|f| f.name()).collect();
    assert_eq!(names, ["f", "g", "h"]);
}

#[test]
fn strict_clause_parsing() {
    let parser = JqlQueryParser::default();
    assert_eq!(parser.parse_clause("a = b").unwrap(), eq("a", "b"));
    assert!(parser.parse_clause("").is_err());
}

#[test]
fn literal_serialization() {
    let Clause::Terminal(terminal) = clause("a = 7") else {
        panic!("not a terminal");
    };
    assert_eq!(terminal.operand(), &Operand::Single(Literal::Integer(7)));
    let json = serde_json::to_value(parse("a = 7 ORDER BY b").unwrap()).unwrap();
    assert_eq!(json["order_by"][0]["order"], "ASC");
    assert_eq!(json["clause"]["terminal"]["operator"], "EQUALS");
}
