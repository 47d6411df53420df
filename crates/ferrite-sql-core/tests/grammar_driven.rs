//! Tests driving the engine directly with custom grammars: choice
//! determinism, backtracking purity and consumed-text round-trips.

use ferrite_peg::{Grammar, Matcher, MatcherToken};
use ferrite_sql_core::{TransformValue, TransformerFactory, tokenize};

fn matched_texts(grammar: &str, sql: &str) -> Vec<String> {
    let grammar = Grammar::compile(grammar).expect("grammar should compile");
    let tokens = tokenize(sql).expect("tokenize should succeed");
    let mut matcher = Matcher::new(&grammar, &tokens);
    let root = matcher
        .match_root("Statement")
        .expect("match should not error")
        .expect("should match");
    matcher
        .arena()
        .leaf_texts(root)
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn consumed_text_round_trips() {
    let grammar = "Statement <- 'ATTACH'i StringLiteral ('AS'i Identifier)?\n\
                   Identifier <- [a-zA-Z_]\n";
    let texts = matched_texts(grammar, "attach 'analytics.db' AS db");
    assert_eq!(texts, vec!["attach", "analytics.db", "AS", "db"]);
}

#[test]
fn first_viable_alternative_always_wins() {
    // Both alternatives match "CHECKPOINT x"; declaration order decides.
    let grammar = "Statement <- Short / Long\n\
                   Short <- 'CHECKPOINT'i Identifier\n\
                   Long <- 'CHECKPOINT'i Identifier\n\
                   Identifier <- [a-zA-Z_]\n";
    let grammar = Grammar::compile(grammar).unwrap();
    let tokens = tokenize("CHECKPOINT mydb").unwrap();
    for _ in 0..3 {
        let mut matcher = Matcher::new(&grammar, &tokens);
        let root = matcher.match_root("Statement").unwrap().unwrap();
        let (child, selected) = matcher.arena().get(root).expect_choice().unwrap();
        assert_eq!(selected, 0);
        assert_eq!(matcher.arena().get(child).rule_name, "Short");
    }
}

#[test]
fn failed_alternative_leaves_no_trace_in_cursor() {
    // The first alternative consumes two tokens before failing; the
    // second must still see the full input.
    let grammar = "Statement <- Wrong / Right\n\
                   Wrong <- 'COPY'i Identifier 'TO'i StringLiteral\n\
                   Right <- 'COPY'i Identifier 'FROM'i StringLiteral\n\
                   Identifier <- [a-zA-Z_]\n";
    let texts = matched_texts(grammar, "COPY t FROM 'data.csv'");
    assert_eq!(texts, vec!["COPY", "t", "FROM", "data.csv"]);
}

#[test]
fn parameterized_list_rule_with_custom_payload() {
    let grammar = "Statement <- 'PRAGMA'i List(Setting)\n\
                   Setting <- Identifier\n\
                   Identifier <- [a-zA-Z_]\n\
                   List(D) <- D (',' D)* ','?\n";
    let texts = matched_texts(grammar, "PRAGMA threads, memory_limit");
    assert_eq!(texts, vec!["PRAGMA", "threads", ",", "memory_limit"]);
}

#[test]
fn factory_with_custom_rule_and_transform() {
    let mut factory =
        TransformerFactory::new("Statement <- 'CHECKPOINT'i Identifier\nIdentifier <- [a-zA-Z_]\n")
            .unwrap();
    factory.register_unary("Statement", |transformer, target| {
        Ok(TransformValue::Identifier(
            transformer.node(target).expect_identifier()?.to_string(),
        ))
    });

    let tokens = tokenize("CHECKPOINT mydb").unwrap();
    let mut matcher = Matcher::new(factory.grammar(), &tokens);
    let root = matcher.match_root("Statement").unwrap().unwrap();
    let arena = matcher.into_arena();
    let transformer = factory.transformer(&arena);
    let name: String = transformer.transform_as(root).unwrap();
    assert_eq!(name, "mydb");
}
