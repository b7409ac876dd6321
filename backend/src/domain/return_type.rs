//! Handler return-type descriptors and the matcher deciding decoration.
//!
//! Handlers do not expose their generic return type at runtime, so types that
//! take part in decoration describe themselves through [`DescribeType`]. The
//! descriptor is computed once per handler at route registration and the
//! [`ReturnTypeMatcher`] verdict is cached by the response pipeline.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

use super::model::{Content, EntityModel, PagedModel};

/// Exact name of a (possibly generic) type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName(Cow<'static, str>);

impl TypeName {
    /// The response wrapper handlers return decorated models in.
    pub const HAL: Self = Self(Cow::Borrowed("Hal"));
    /// Single-resource representation model.
    pub const ENTITY_MODEL: Self = Self(Cow::Borrowed("EntityModel"));
    /// Paged-collection representation model.
    pub const PAGED_MODEL: Self = Self(Cow::Borrowed("PagedModel"));
    /// Tagged payload carried by the models.
    pub const CONTENT: Self = Self(Cow::Borrowed("Content"));

    /// Name any other type.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Structural description of a declared return type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// A type without type arguments.
    Plain(TypeName),
    /// A generic type applied to its arguments.
    Parameterized {
        /// The generic type itself.
        raw: TypeName,
        /// Type arguments in declaration order.
        arguments: Vec<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    /// Shorthand for [`TypeDescriptor::Parameterized`].
    #[must_use]
    pub fn parameterized(raw: TypeName, arguments: Vec<TypeDescriptor>) -> Self {
        Self::Parameterized { raw, arguments }
    }

    /// The outer type name regardless of parameterisation.
    #[must_use]
    pub fn raw(&self) -> &TypeName {
        match self {
            Self::Plain(name) | Self::Parameterized { raw: name, .. } => name,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(name) => write!(f, "{name}"),
            Self::Parameterized { raw, arguments } => {
                write!(f, "{raw}<")?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                f.write_str(">")
            }
        }
    }
}

/// Types able to describe their own shape for return-type matching.
pub trait DescribeType {
    /// Descriptor of `Self`.
    fn type_descriptor() -> TypeDescriptor;
}

impl DescribeType for Content {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::Plain(TypeName::CONTENT)
    }
}

impl DescribeType for EntityModel {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::parameterized(TypeName::ENTITY_MODEL, vec![Content::type_descriptor()])
    }
}

impl DescribeType for PagedModel {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::parameterized(TypeName::PAGED_MODEL, vec![Content::type_descriptor()])
    }
}

impl DescribeType for Value {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::Plain(TypeName::new("Value"))
    }
}

/// Decides whether a handler's declared return type is eligible for one
/// model shape.
///
/// Eligible means exactly `Wrapper<Model<..>>`: the wrapper takes one type
/// argument and that argument is a parameterised type whose raw name is the
/// target model. Names are compared for identity, so a differently named
/// model built on top of the target is rejected.
///
/// # Examples
/// ```
/// use hypermedia::domain::{DescribeType, EntityModel, PagedModel, ReturnTypeMatcher, TypeDescriptor, TypeName};
///
/// let matcher = ReturnTypeMatcher::new(TypeName::ENTITY_MODEL);
/// let handler = TypeDescriptor::parameterized(TypeName::HAL, vec![EntityModel::type_descriptor()]);
/// assert!(matcher.supports(&handler));
///
/// let paged = TypeDescriptor::parameterized(TypeName::HAL, vec![PagedModel::type_descriptor()]);
/// assert!(!matcher.supports(&paged));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnTypeMatcher {
    wrapper: TypeName,
    target: TypeName,
}

impl ReturnTypeMatcher {
    /// Match `Hal<target<..>>`.
    #[must_use]
    pub const fn new(target: TypeName) -> Self {
        Self {
            wrapper: TypeName::HAL,
            target,
        }
    }

    /// Match `wrapper<target<..>>` for a custom response wrapper.
    #[must_use]
    pub const fn with_wrapper(wrapper: TypeName, target: TypeName) -> Self {
        Self { wrapper, target }
    }

    /// The model type this matcher accepts.
    #[must_use]
    pub const fn target(&self) -> &TypeName {
        &self.target
    }

    /// Pure predicate over the handler's declared return type.
    #[must_use]
    pub fn supports(&self, return_type: &TypeDescriptor) -> bool {
        let TypeDescriptor::Parameterized { raw, arguments } = return_type else {
            return false;
        };
        if raw != &self.wrapper {
            return false;
        }
        match arguments.as_slice() {
            [TypeDescriptor::Parameterized { raw: model, .. }] => model == &self.target,
            _ => false,
        }
    }
}
