use crate::proto::{FieldArg, Value};

#[test]
fn test_value_from_primitives() {
    assert_eq!(Value::from(3i32), Value::Int(3));
    assert_eq!(Value::from(7u32), Value::Int(7));
    // 无符号整数只接受能无损放入 i64 的宽度
    assert_eq!(Value::from(u32::MAX), Value::Int(i64::from(u32::MAX)));
    assert_eq!(Value::from(0.5f32), Value::Float(0.5));
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from("abc"), Value::Str("abc".to_string()));
    assert_eq!(Value::from(String::from("x")), Value::Str("x".to_string()));
}

#[test]
fn test_value_is_default() {
    assert!(Value::Int(0).is_default());
    assert!(Value::Float(0.0).is_default());
    assert!(Value::Bool(false).is_default());
    assert!(Value::Str(String::new()).is_default());
    assert!(!Value::Int(-1).is_default());
    assert!(!Value::Float(1e-9).is_default());
    assert!(!Value::Str(" ".to_string()).is_default());
}

#[test]
fn test_value_accessors() {
    assert_eq!(Value::Int(4).as_int(), Some(4));
    // 整数可以按浮点读取，反之不行
    assert_eq!(Value::Int(4).as_float(), Some(4.0));
    assert_eq!(Value::Float(4.0).as_int(), None);
    assert_eq!(Value::Bool(true).as_bool(), Some(true));
    assert_eq!(Value::Str("s".to_string()).as_str(), Some("s"));
    assert_eq!(Value::Int(1).as_str(), None);
}

#[test]
fn test_field_arg_from_sequences() {
    let single = FieldArg::from(5i64);
    assert!(!single.is_seq());
    assert_eq!(single, FieldArg::Single(Value::Int(5)));

    let from_vec = FieldArg::from(vec![1i64, 2, 3]);
    let from_array = FieldArg::from([1i64, 2, 3]);
    let from_slice = FieldArg::from(&[1i64, 2, 3][..]);
    assert!(from_vec.is_seq());
    assert_eq!(from_vec, from_array);
    assert_eq!(from_vec, from_slice);

    let empty = FieldArg::from(Vec::<f64>::new());
    assert_eq!(empty, FieldArg::Seq(Vec::new()));

    let names = FieldArg::from(["a", "b"]);
    assert_eq!(
        names,
        FieldArg::Seq(vec![Value::Str("a".to_string()), Value::Str("b".to_string())])
    );
}

#[test]
fn test_value_display() {
    assert_eq!(Value::Int(-3).to_string(), "-3");
    assert_eq!(Value::Float(1.0).to_string(), "1.0");
    assert_eq!(Value::Bool(false).to_string(), "false");
    assert_eq!(Value::Str("a\"b".to_string()).to_string(), "\"a\\\"b\"");
}
