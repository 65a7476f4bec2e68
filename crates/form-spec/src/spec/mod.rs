pub mod field;
pub mod form;

pub use field::{Constraint, FieldSpec, FieldType};
pub use form::{FormSettings, FormSpec};
