//! In-place edits of `ServiceMeshControlPlane` resources.

use crate::error::IstioError;
use serde_yaml::{Mapping, Value};

/// Points `spec.istio.global` at `hub`/`tag`, creating the intermediate maps.
pub(crate) fn pin_images(cr: &mut Value, hub: &str, tag: &str) -> Result<(), IstioError> {
    let global = ["spec", "istio", "global"].into_iter().try_fold(cr, child_mapping)?;
    let Value::Mapping(global) = global else {
        return Err("`spec.istio.global` is not a mapping".into());
    };

    global.insert(Value::String("hub".to_owned()), Value::String(hub.to_owned()));
    global.insert(Value::String("tag".to_owned()), Value::String(tag.to_owned()));
    Ok(())
}

fn child_mapping<'a>(node: &'a mut Value, key: &str) -> Result<&'a mut Value, IstioError> {
    if node.is_null() {
        *node = Value::Mapping(Mapping::new());
    }
    let Value::Mapping(map) = node else {
        return Err(format!("Expected a mapping above `{key}`").into());
    };

    let child = map.entry(Value::String(key.to_owned())).or_insert(Value::Null);
    if child.is_null() {
        *child = Value::Mapping(Mapping::new());
    }
    Ok(child)
}
