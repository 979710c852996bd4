//! Applying [`Patch`] instructions to stored documents.
//!
//! Patch keys are dotted paths into the document (`address.city`).
//! Intermediate objects are created on write.

use serde_json::{Map, Number, Value};

use anykv_core::{KvError, KvResult, Patch, PatchOp};

/// Apply `patches` to `record` in order.
///
/// # Errors
///
/// Returns [`KvError::InvalidPatch`] for unknown ops, attempts to touch
/// `id`, paths through non-objects, or non-numeric `incr`/`decr` operands.
pub(crate) fn apply_patches(record: &mut Value, patches: &[Patch]) -> KvResult<()> {
    for patch in patches {
        apply(record, patch)?;
    }
    Ok(())
}

fn apply(record: &mut Value, patch: &Patch) -> KvResult<()> {
    let (parents, leaf) = split_path(&patch.key)?;
    match &patch.op {
        PatchOp::Set => {
            let map = container_mut(record, &parents, true, &patch.key)?
                .ok_or_else(|| path_error(&patch.key))?;
            map.insert(leaf.to_string(), patch.value.clone());
        },
        PatchOp::Del => {
            if let Some(map) = container_mut(record, &parents, false, &patch.key)? {
                map.remove(leaf);
            }
        },
        PatchOp::Incr | PatchOp::Decr => {
            let map = container_mut(record, &parents, true, &patch.key)?
                .ok_or_else(|| path_error(&patch.key))?;
            let current = map.get(leaf).cloned().unwrap_or_else(|| Value::from(0));
            let next = step(&current, &patch.value, patch.op == PatchOp::Decr, &patch.key)?;
            map.insert(leaf.to_string(), next);
        },
        PatchOp::Other(op) => {
            return Err(KvError::InvalidPatch(format!(
                "unsupported patch op \"{op}\" on \"{}\"",
                patch.key
            )));
        },
    }
    Ok(())
}

fn split_path(path: &str) -> KvResult<(Vec<&str>, &str)> {
    let mut segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(KvError::InvalidPatch(format!("invalid patch key \"{path}\"")));
    }
    if segments.first() == Some(&"id") {
        return Err(KvError::InvalidPatch("the id field cannot be patched".into()));
    }
    let leaf = segments
        .pop()
        .ok_or_else(|| KvError::InvalidPatch("empty patch key".into()))?;
    Ok((segments, leaf))
}

/// Walk to the object holding the leaf. With `create`, missing objects are
/// inserted along the way; without it, a missing segment yields `None`.
fn container_mut<'a>(
    root: &'a mut Value,
    parents: &[&str],
    create: bool,
    path: &str,
) -> KvResult<Option<&'a mut Map<String, Value>>> {
    let mut current = root;
    for segment in parents {
        let map = current.as_object_mut().ok_or_else(|| path_error(path))?;
        if create {
            current = map
                .entry((*segment).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        } else {
            match map.get_mut(*segment) {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
    }
    current
        .as_object_mut()
        .map(Some)
        .ok_or_else(|| path_error(path))
}

fn path_error(path: &str) -> KvError {
    KvError::InvalidPatch(format!("\"{path}\" does not address an object field"))
}

fn step(current: &Value, operand: &Value, negate: bool, path: &str) -> KvResult<Value> {
    let one = Value::from(1);
    let operand = if operand.is_null() { &one } else { operand };
    let (Value::Number(a), Value::Number(b)) = (current, operand) else {
        return Err(KvError::InvalidPatch(format!(
            "incr/decr on \"{path}\" needs numeric values"
        )));
    };

    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        let result = if negate {
            a.checked_sub(b)
        } else {
            a.checked_add(b)
        };
        return result
            .map(Value::from)
            .ok_or_else(|| KvError::InvalidPatch(format!("integer overflow on \"{path}\"")));
    }

    let a = a.as_f64().unwrap_or(f64::NAN);
    let b = b.as_f64().unwrap_or(f64::NAN);
    let result = if negate { a - b } else { a + b };
    Number::from_f64(result)
        .map(Value::Number)
        .ok_or_else(|| KvError::InvalidPatch(format!("non-finite result on \"{path}\"")))
}
