/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 字段取值：标量值（Value）与节点参数（FieldArg）
 */

use std::fmt;

/// 标量值
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl Value {
    /// 类型名（用于错误提示）
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "整数",
            Self::Float(_) => "浮点数",
            Self::Bool(_) => "布尔值",
            Self::Str(_) => "字符串",
        }
    }

    /// 是否为 proto3 的默认值（文本格式中不输出）
    pub fn is_default(&self) -> bool {
        match self {
            Self::Int(v) => *v == 0,
            Self::Float(v) => *v == 0.0,
            Self::Bool(v) => !*v,
            Self::Str(v) => v.is_empty(),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v:?}"),
        }
    }
}

/// 节点构造时某个 schema 字段的取值：单个标量，或一个序列（对应 repeated 字段）
#[derive(Debug, Clone, PartialEq)]
pub enum FieldArg {
    Single(Value),
    Seq(Vec<Value>),
}

impl FieldArg {
    pub const fn is_seq(&self) -> bool {
        matches!(self, Self::Seq(_))
    }
}

impl From<Value> for FieldArg {
    fn from(value: Value) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<Value>> for FieldArg {
    fn from(values: Vec<Value>) -> Self {
        Self::Seq(values)
    }
}

macro_rules! impl_from_scalar {
    ($($t:ty => $variant:ident($conv:expr)),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Self::$variant($conv(v))
                }
            }

            impl From<$t> for FieldArg {
                fn from(v: $t) -> Self {
                    Self::Single(v.into())
                }
            }

            impl From<Vec<$t>> for FieldArg {
                fn from(vs: Vec<$t>) -> Self {
                    Self::Seq(vs.into_iter().map(Value::from).collect())
                }
            }

            impl From<&[$t]> for FieldArg {
                fn from(vs: &[$t]) -> Self {
                    Self::Seq(vs.iter().cloned().map(Value::from).collect())
                }
            }

            impl<const N: usize> From<[$t; N]> for FieldArg {
                fn from(vs: [$t; N]) -> Self {
                    Self::Seq(vs.into_iter().map(Value::from).collect())
                }
            }
        )*
    };
}

impl_from_scalar! {
    i32 => Int(i64::from),
    i64 => Int(std::convert::identity),
    u32 => Int(i64::from),
    f32 => Float(f64::from),
    f64 => Float(std::convert::identity),
    bool => Bool(std::convert::identity),
    String => Str(std::convert::identity),
    &str => Str(str::to_string),
}
