//! Property tests for the validation engine: determinism, re-validation
//! idempotence, and sibling error completeness.
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use conforma_core::{
    validate, Node, Number, ObjectSchema, Outcome, Schema, Value,
};
use indexmap::IndexMap;
use proptest::prelude::*;

fn arb_scalar() -> impl Strategy<Value = Node> {
    prop_oneof![
        Just(Node::Null),
        any::<bool>().prop_map(Node::Bool),
        any::<i64>().prop_map(|i| Node::Number(Number::Int(i))),
        (-1.0e9f64..1.0e9).prop_map(|f| Node::Number(Number::Float(f))),
        "[a-zA-Z0-9 _-]{0,12}".prop_map(Node::String),
    ]
}

fn arb_node() -> impl Strategy<Value = Node> {
    arb_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Node::Sequence),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..4).prop_map(|fields| {
                let mut map = IndexMap::new();
                for (key, value) in fields {
                    map.insert(key, value);
                }
                Node::Mapping(map)
            }),
        ]
    })
}

fn mixed_schema() -> Schema {
    Schema::object(
        ObjectSchema::builder()
            .field("id", Schema::integer())
            .field("label", Schema::string())
            .optional_field("tags", Schema::list(Schema::string()))
            .build()
            .unwrap(),
    )
}

proptest! {
    /// Repeated validation of the same document yields an identical
    /// outcome, including error order.
    #[test]
    fn validation_is_deterministic(node in arb_node()) {
        let schema = mixed_schema();
        let first = validate(&node, &schema);
        let second = validate(&node, &schema);
        prop_assert_eq!(first, second);
    }

    /// The typed output of a successful validation, re-serialized through
    /// the document representation, validates again and to the same value.
    #[test]
    fn revalidation_is_idempotent(id in any::<i64>(), label in "[a-z]{0,10}", tags in prop::collection::vec("[a-z]{1,5}", 0..4)) {
        let mut map = IndexMap::new();
        map.insert("id".to_string(), Node::Number(Number::Int(id)));
        map.insert("label".to_string(), Node::String(label));
        map.insert(
            "tags".to_string(),
            Node::Sequence(tags.into_iter().map(Node::String).collect()),
        );
        let node = Node::Mapping(map);

        let schema = mixed_schema();
        let first = validate(&node, &schema).into_result().unwrap();
        let second = validate(&first.to_node(), &schema).into_result().unwrap();
        prop_assert_eq!(first, second);
    }

    /// An object with k independently-broken fields reports exactly k
    /// errors, one per field, each with a distinct path.
    #[test]
    fn one_error_per_broken_sibling(broken in prop::collection::vec(any::<bool>(), 1..8)) {
        let mut builder = ObjectSchema::builder();
        let mut map = IndexMap::new();
        let mut expected_broken = 0usize;
        for (i, is_broken) in broken.iter().enumerate() {
            let name = format!("field_{}", i);
            builder = builder.field(name.clone(), Schema::integer());
            if *is_broken {
                map.insert(name, Node::String("definitely not a number".to_string()));
                expected_broken += 1;
            } else {
                map.insert(name, Node::Number(Number::Int(i as i64)));
            }
        }
        let schema = Schema::object(builder.build().unwrap());
        let outcome = validate(&Node::Mapping(map), &schema);

        match outcome {
            Outcome::Valid(value) => {
                prop_assert_eq!(expected_broken, 0);
                prop_assert_eq!(value.as_object().unwrap().len(), broken.len());
            }
            Outcome::Invalid(report) => {
                prop_assert_eq!(report.len(), expected_broken);
                let mut paths: Vec<String> =
                    report.iter().map(|e| e.path.to_string()).collect();
                let before = paths.len();
                paths.dedup();
                prop_assert_eq!(paths.len(), before);
            }
        }
    }

    /// Coercing a stringified integer always gives back the integer.
    #[test]
    fn numeric_string_coercion_round_trips(i in any::<i64>()) {
        let node = Node::String(i.to_string());
        let value = validate(&node, &Schema::integer()).into_result().unwrap();
        prop_assert_eq!(value, Value::Int(i));
    }
}
