use serde_json::{json, Value};

/// Bare array of records, each `{"Name": name, ...fields}`
#[allow(dead_code)]
pub fn records(items: &[(&str, Value)]) -> Value {
    Value::Array(
        items
            .iter()
            .map(|(name, fields)| {
                let mut record = json!({ "Name": name });
                if let (Some(target), Some(extra)) = (record.as_object_mut(), fields.as_object()) {
                    target.extend(extra.clone());
                }
                record
            })
            .collect(),
    )
}

/// Kubernetes-style list object as `kubectl get -o json` exports it
#[allow(dead_code)]
pub fn kube_list(kind: &str, items: Vec<Value>) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": format!("{kind}List"),
        "metadata": {"resourceVersion": ""},
        "items": items,
    })
}

/// One Kubernetes object with its metadata section filled in
#[allow(dead_code)]
pub fn kube_object(kind: &str, name: &str, namespace: &str, body: Value) -> Value {
    let mut object = json!({
        "apiVersion": "v1",
        "kind": kind,
        "metadata": {"name": name, "namespace": namespace},
    });
    if let (Some(target), Some(extra)) = (object.as_object_mut(), body.as_object()) {
        target.extend(extra.clone());
    }
    object
}
