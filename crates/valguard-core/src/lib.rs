//! Composable single-value validation rules exposed as boolean functions.
//!
//! Each rule implements [`Validator`]. [`ValidationFunction`] wraps any
//! validator into a [`Function`] with uniform null/unknown handling, and
//! [`FunctionRegistry`] holds the frozen, name-unique catalog a host
//! exposes to its callers.

pub mod catalog;
pub mod diagnostic;
pub mod errors;
pub mod function;
pub mod registry;
pub mod rules;
pub mod utils;
pub mod validator;
pub mod value;

pub use catalog::{builtin_registry, compile_function, register_configured, RuleConfig};
pub use diagnostic::{Diagnostic, Diagnostics, Severity};
pub use errors::RuleError;
pub use function::{
    CallResponse, Function, FunctionDefinition, FunctionError, Parameter, ReturnType,
    ValidationFunction,
};
pub use registry::{FunctionConstructor, FunctionRegistry, RegistryBuilder};
pub use validator::{DescriptionStyle, Validator};
pub use value::{ParameterType, Scalar, Value};
