use std::collections::BTreeMap;

use minijinja::Value;

use crate::event::Check;

type Accessor = fn(&Check) -> Value;

/// Scalar fields a template may reference, by their template name.
const SCALARS: &[(&str, Accessor)] = &[
    ("Name", name),
    ("Namespace", namespace),
    ("Status", status),
    ("Output", output),
    ("Command", command),
    ("State", state),
    ("Interval", interval),
    ("Occurrences", occurrences),
    ("Issued", issued),
    ("Executed", executed),
    ("Duration", duration),
];

const LABELS: &str = "Labels";
const ANNOTATIONS: &str = "Annotations";

/// Render context for `check`: every scalar in the table plus the
/// `Labels` and `Annotations` maps. Nothing else is visible to a template.
pub(super) fn check_context(check: &Check) -> Value {
    let mut fields: BTreeMap<&'static str, Value> = SCALARS
        .iter()
        .map(|&(field, accessor)| (field, accessor(check)))
        .collect();
    fields.insert(LABELS, Value::from_serialize(&check.metadata.labels));
    fields.insert(ANNOTATIONS, Value::from_serialize(&check.metadata.annotations));
    Value::from_serialize(&fields)
}

fn name(check: &Check) -> Value {
    Value::from(check.metadata.name.as_str())
}

fn namespace(check: &Check) -> Value {
    Value::from(check.metadata.namespace.as_str())
}

fn status(check: &Check) -> Value {
    Value::from(check.status)
}

fn output(check: &Check) -> Value {
    Value::from(check.output.as_str())
}

fn command(check: &Check) -> Value {
    Value::from(check.command.as_str())
}

fn state(check: &Check) -> Value {
    Value::from(check.state.as_str())
}

fn interval(check: &Check) -> Value {
    Value::from(check.interval)
}

fn occurrences(check: &Check) -> Value {
    Value::from(check.occurrences)
}

fn issued(check: &Check) -> Value {
    Value::from(check.issued)
}

fn executed(check: &Check) -> Value {
    Value::from(check.executed)
}

fn duration(check: &Check) -> Value {
    Value::from(check.duration)
}
