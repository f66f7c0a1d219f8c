mod value;

use crate::schema::{FieldDescriptor, MessageDescriptor, ScalarType, Schema};

/// 覆盖各种字段形态的小 schema
pub(super) fn sample_schema() -> Schema {
    let mut schema = Schema::new();
    schema.add_message(MessageDescriptor::new(
        "Outer",
        vec![
            FieldDescriptor::scalar("name", ScalarType::String),
            FieldDescriptor::scalar("count", ScalarType::Int64),
            FieldDescriptor::scalar("ratio", ScalarType::Double),
            FieldDescriptor::scalar("enabled", ScalarType::Bool),
            FieldDescriptor::scalar("dims", ScalarType::Int64).repeated(),
            FieldDescriptor::scalar("size", ScalarType::Uint32),
            FieldDescriptor::message("inner", "Inner"),
            FieldDescriptor::message("items", "Inner").repeated(),
        ],
    ));
    schema.add_message(MessageDescriptor::new(
        "Inner",
        vec![
            FieldDescriptor::scalar("label", ScalarType::String),
            FieldDescriptor::scalar("values", ScalarType::Float).repeated(),
        ],
    ));
    schema
}
