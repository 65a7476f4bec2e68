#![allow(missing_docs)]

pub mod answers;
pub mod check;
pub mod conditional;
pub mod progress;
pub mod render;
pub mod spec;
pub mod validate;
pub mod visibility;

pub use answers::{AnswerSet, Meta, ValidationError, ValidationResult};
pub use check::{FormCheckError, check_form};
pub use conditional::{
    ConditionalLogic, ConditionalRule, FormValues, LogicAction, RuleOperator, should_show_field,
};
pub use progress::{answered_count, is_answered, is_blank, next_field};
pub use render::{
    RenderField, RenderPayload, RenderProgress, RenderStatus, build_render_payload, render_json_ui,
    render_text,
};
pub use spec::{Constraint, FieldSpec, FieldType, FormSettings, FormSpec};
pub use validate::validate;
pub use visibility::{VisibilityMap, resolve_visibility, settled_visibility, visible_values};
