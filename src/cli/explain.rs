//! Query -> JSON conversion for `--explain`

use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Value as Json, json};

use crate::{Condition, ElementRef, Query, Source, Value};

fn element_to_json(element: &ElementRef) -> Json {
    json!({
        "name": element.name,
        "attribute": element.attribute,
    })
}

fn literal_to_json(literal: &Value) -> Json {
    match literal {
        Value::Number(n) => {
            let number = if n.fract().is_zero() {
                n.to_i64().map(serde_json::Number::from)
            } else {
                n.to_f64().and_then(serde_json::Number::from_f64)
            };
            number
                .map(Json::Number)
                .unwrap_or_else(|| Json::String(n.to_string()))
        }
        Value::String(s) => Json::String(s.clone()),
    }
}

fn condition_to_json(condition: &Condition) -> Json {
    let mut object = Map::new();
    match condition {
        Condition::Leaf(comparison) => {
            object.insert("element".into(), element_to_json(&comparison.element));
            object.insert("op".into(), Json::String(comparison.op.to_string()));
            object.insert("literal".into(), literal_to_json(&comparison.literal));
        }
        Condition::And { children, .. } => {
            object.insert(
                "and".into(),
                Json::Array(children.iter().map(condition_to_json).collect()),
            );
        }
        Condition::Or { children, .. } => {
            object.insert(
                "or".into(),
                Json::Array(children.iter().map(condition_to_json).collect()),
            );
        }
        Condition::Group { child, .. } => {
            object.insert("group".into(), condition_to_json(child));
        }
    }
    if condition.is_negated() {
        object.insert("negated".into(), Json::Bool(true));
    }
    Json::Object(object)
}

/// Convert a parsed query to JSON
pub fn query_to_json(query: &Query) -> Json {
    let from = match &query.from {
        None => Json::Null,
        Some(Source::Root) => Json::String("ROOT".into()),
        Some(Source::Element(element)) => element_to_json(element),
    };

    let condition = query.condition.as_ref().map(condition_to_json);
    let order = query.order.as_ref().map(|order| {
        json!({
            "element": element_to_json(&order.element),
            "descending": order.descending,
        })
    });

    json!({
        "select": query.select,
        "limit": query.limit,
        "from": from,
        "where": condition,
        "order": order,
    })
}
