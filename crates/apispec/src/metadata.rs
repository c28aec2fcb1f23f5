//! Per-declaration metadata table.
//!
//! A [`TypeMetadata`] is the table the [`Specifier`](crate::Specifier) reads:
//! the type's own tags plus, for every public method in declaration order, the
//! method's tags, its parameters' tags and its return value's tags.
//!
//! Tables are normally emitted by `#[derive(ApiType)]` and `#[api_methods]`,
//! but they can be built by hand:
//!
//! ```
//! use apispec::{ApiMethodTag, DescriptionTag, MethodMetadata, ParamMetadata, RequiredTag};
//!
//! let method = MethodMetadata::new("lookup")
//!     .with_annotation(ApiMethodTag)
//!     .with_annotation(DescriptionTag::new("Looks a user up"))
//!     .with_param(ParamMetadata::new("id").with_annotation(RequiredTag::new(true)));
//!
//! assert_eq!(method.param_names().collect::<Vec<_>>(), ["id"]);
//! assert!(method.returns().is_none());
//! ```

use indexmap::IndexMap;

use crate::annotation::{Annotation, Annotations};

/// One parameter of a method, receiver excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamMetadata {
    name: String,
    annotations: Annotations,
}

impl ParamMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Annotations::new(),
        }
    }

    pub fn with_annotation(mut self, tag: impl Into<Annotation>) -> Self {
        self.annotations.push(tag);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }
}

/// The return value of a method with a non-unit return type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReturnMetadata {
    annotations: Annotations,
}

impl ReturnMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_annotation(mut self, tag: impl Into<Annotation>) -> Self {
        self.annotations.push(tag);
        self
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }
}

/// A public method of the bound type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodMetadata {
    name: String,
    annotations: Annotations,
    params: Vec<ParamMetadata>,
    /// `None` when the method returns `()`.
    returns: Option<ReturnMetadata>,
}

impl MethodMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Annotations::new(),
            params: Vec::new(),
            returns: None,
        }
    }

    pub fn with_annotation(mut self, tag: impl Into<Annotation>) -> Self {
        self.annotations.push(tag);
        self
    }

    /// Append a parameter. Parameters keep the order they are added in.
    pub fn with_param(mut self, param: ParamMetadata) -> Self {
        self.params.push(param);
        self
    }

    /// Declare a non-unit return value.
    pub fn with_return(mut self, returns: ReturnMetadata) -> Self {
        self.returns = Some(returns);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub fn params(&self) -> &[ParamMetadata] {
        &self.params
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(ParamMetadata::name)
    }

    /// First parameter named `name`.
    pub fn param(&self, name: &str) -> Option<&ParamMetadata> {
        self.params.iter().find(|param| param.name == name)
    }

    pub fn returns(&self) -> Option<&ReturnMetadata> {
        self.returns.as_ref()
    }
}

/// Metadata table for one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMetadata {
    name: String,
    annotations: Annotations,
    methods: IndexMap<String, MethodMetadata>,
}

impl TypeMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Annotations::new(),
            methods: IndexMap::new(),
        }
    }

    /// Build the table for `T` from its [`ApiType`] and [`ApiMethods`] impls.
    pub fn of<T: Documented>() -> Self {
        Self::new(T::api_name())
            .with_annotations(T::api_annotations())
            .with_methods(T::api_methods())
    }

    pub fn with_annotation(mut self, tag: impl Into<Annotation>) -> Self {
        self.annotations.push(tag);
        self
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Register a method. A later method with the same name keeps the first
    /// one's position and does not replace it.
    pub fn with_method(mut self, method: MethodMetadata) -> Self {
        self.methods.entry(method.name.clone()).or_insert(method);
        self
    }

    pub fn with_methods(self, methods: impl IntoIterator<Item = MethodMetadata>) -> Self {
        methods.into_iter().fold(self, Self::with_method)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub fn method(&self, name: &str) -> Option<&MethodMetadata> {
        self.methods.get(name)
    }

    /// Methods in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = &MethodMetadata> {
        self.methods.values()
    }
}

/// Type-level tags. Usually derived with `#[derive(ApiType)]`.
pub trait ApiType {
    /// Name of the type as written in source.
    fn api_name() -> &'static str;

    fn api_annotations() -> Annotations {
        Annotations::new()
    }
}

/// Method-level tags. Usually generated by `#[api_methods]` on an inherent
/// impl block.
pub trait ApiMethods {
    fn api_methods() -> Vec<MethodMetadata> {
        Vec::new()
    }
}

/// A type whose full metadata table can be built.
pub trait Documented: ApiType + ApiMethods {}

impl<T: ApiType + ApiMethods> Documented for T {}
