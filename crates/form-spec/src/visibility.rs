use crate::conditional::{FormValues, should_show_field};
use crate::spec::form::FormSpec;

pub type VisibilityMap = std::collections::BTreeMap<String, bool>;

pub fn resolve_visibility(spec: &FormSpec, values: &FormValues) -> VisibilityMap {
    spec.fields
        .iter()
        .map(|field| {
            let visible = should_show_field(field.conditional_logic.as_ref(), values);
            (field.id.clone(), visible)
        })
        .collect()
}

/// Copy of `values` without answers for fields that are currently hidden.
///
/// Dropping an answer can hide fields that depend on it, so pruning repeats
/// until every remaining answer belongs to a field visible under the result.
/// Keys that do not name a field are kept so validation can report them.
pub fn visible_values(spec: &FormSpec, values: &FormValues) -> FormValues {
    let mut settled = values.clone();
    loop {
        let visibility = resolve_visibility(spec, &settled);
        let before = settled.len();
        settled.retain(|key, _| visibility.get(key).copied().unwrap_or(true));
        if settled.len() == before {
            return settled;
        }
    }
}

/// Visibility under the answers that survive [`visible_values`].
///
/// Unlike [`resolve_visibility`] on raw answers, a hidden controlling field
/// never keeps its dependents visible.
pub fn settled_visibility(spec: &FormSpec, values: &FormValues) -> VisibilityMap {
    resolve_visibility(spec, &visible_values(spec, values))
}
