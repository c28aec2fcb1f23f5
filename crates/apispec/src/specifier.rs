//! Query component bound to one documented type.

use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::annotation::Annotations;
use crate::describe::{CommonDescription, MethodDescription, ParamDescription};
use crate::error::{Result, SpecifierError};
use crate::metadata::{Documented, MethodMetadata, ParamMetadata, ReturnMetadata, TypeMetadata};

/// The query operations over a documented type.
///
/// Object safe, so specifiers bound to different types can sit behind
/// `&dyn ApiSpecifier`.
pub trait ApiSpecifier {
    /// Description attached to the type itself.
    fn api_description(&self) -> Option<String>;

    /// Names of the methods marked with [`ApiMethodTag`](crate::ApiMethodTag),
    /// in declaration order.
    fn api_method_names(&self) -> Vec<String>;

    /// Description of a method. The API marker is not checked.
    fn api_method_description(&self, method_name: &str) -> Result<Option<String>>;

    /// Parameter names of a method in declaration order.
    ///
    /// Fails with [`SpecifierError::InvalidOperation`] when the method has no
    /// description.
    fn api_method_param_names(&self, method_name: &str) -> Result<Vec<String>>;

    /// Description of one parameter, `None` if the method or parameter is
    /// missing.
    fn api_method_param_description(&self, method_name: &str, param_name: &str)
    -> Option<String>;

    /// Full description of one parameter. A missing parameter yields a record
    /// with only its name set.
    fn api_method_param_full_description(
        &self,
        method_name: &str,
        param_name: &str,
    ) -> ParamDescription;

    /// Full description of an API method, `None` if the method is missing or
    /// not marked as an API method.
    fn api_method_full_description(&self, method_name: &str) -> Option<MethodDescription>;
}

/// Answers documentation queries about `T`.
///
/// The metadata table is built once, when the specifier is created, and
/// never changes afterwards.
///
/// ```
/// use apispec::{api_methods, ApiSpecifier, ApiType, Specifier};
///
/// #[derive(ApiType)]
/// #[api(description = "Greeting service")]
/// struct Greeter;
///
/// #[api_methods]
/// impl Greeter {
///     #[api_method]
///     #[api_description("Greets someone by name")]
///     pub fn greet(&self, #[api_description("Who to greet")] name: &str) -> String {
///         format!("hello {name}")
///     }
/// }
///
/// let specifier = Specifier::<Greeter>::new();
/// assert_eq!(specifier.api_description().as_deref(), Some("Greeting service"));
/// assert_eq!(specifier.api_method_names(), ["greet"]);
/// assert_eq!(
///     specifier.api_method_param_description("greet", "name").as_deref(),
///     Some("Who to greet"),
/// );
/// ```
pub struct Specifier<T> {
    metadata: TypeMetadata,
    _bound: PhantomData<fn() -> T>,
}

impl<T: Documented> Specifier<T> {
    pub fn new() -> Self {
        let metadata = TypeMetadata::of::<T>();
        debug!(
            type_name = metadata.name(),
            methods = metadata.methods().count(),
            "specifier bound"
        );
        Self {
            metadata,
            _bound: PhantomData,
        }
    }
}

impl<T: Documented> Default for Specifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Specifier<T> {
    /// The bound type's metadata table.
    pub fn metadata(&self) -> &TypeMetadata {
        &self.metadata
    }

    pub fn type_name(&self) -> &str {
        self.metadata.name()
    }

    fn find_method(&self, method_name: &str) -> Option<&MethodMetadata> {
        let method = self.metadata.method(method_name);
        trace!(method = method_name, found = method.is_some(), "method lookup");
        method
    }

    fn require_method(&self, method_name: &str) -> Result<&MethodMetadata> {
        self.find_method(method_name).ok_or_else(|| {
            debug!(
                type_name = self.metadata.name(),
                method = method_name,
                "method not found"
            );
            SpecifierError::NotFound {
                type_name: self.metadata.name().to_string(),
                method: method_name.to_string(),
            }
        })
    }

    fn find_param(&self, method_name: &str, param_name: &str) -> Option<&ParamMetadata> {
        self.find_method(method_name)?.param(param_name)
    }
}

fn description_of(annotations: Option<&Annotations>) -> Option<String> {
    annotations?.description().map(str::to_owned)
}

fn describe_param(param_name: &str, param: Option<&ParamMetadata>) -> ParamDescription {
    let annotations = param.map(ParamMetadata::annotations);
    let mut result = ParamDescription::default();
    result.apply_validation(annotations);
    result.common = CommonDescription::new(param_name, description_of(annotations));
    result
}

fn describe_return(returns: &ReturnMetadata) -> ParamDescription {
    let annotations = returns.annotations();
    let mut result = ParamDescription::new(CommonDescription::new(
        String::new(),
        description_of(Some(annotations)),
    ));
    result.apply_validation(Some(annotations));
    result
}

impl<T> ApiSpecifier for Specifier<T> {
    fn api_description(&self) -> Option<String> {
        description_of(Some(self.metadata.annotations()))
    }

    fn api_method_names(&self) -> Vec<String> {
        self.metadata
            .methods()
            .filter(|method| method.annotations().is_api_method())
            .map(|method| method.name().to_string())
            .collect()
    }

    fn api_method_description(&self, method_name: &str) -> Result<Option<String>> {
        let method = self.require_method(method_name)?;
        Ok(description_of(Some(method.annotations())))
    }

    fn api_method_param_names(&self, method_name: &str) -> Result<Vec<String>> {
        let method = self.require_method(method_name)?;
        if method.annotations().description().is_none() {
            debug!(method = method_name, "method has no description");
            return Err(SpecifierError::InvalidOperation {
                method: method_name.to_string(),
            });
        }

        Ok(method.param_names().map(str::to_owned).collect())
    }

    fn api_method_param_description(
        &self,
        method_name: &str,
        param_name: &str,
    ) -> Option<String> {
        description_of(
            self.find_param(method_name, param_name)
                .map(ParamMetadata::annotations),
        )
    }

    #[tracing::instrument(
        level = "debug",
        name = "apispec.param_full_description",
        skip(self),
        fields(type_name = self.metadata.name())
    )]
    fn api_method_param_full_description(
        &self,
        method_name: &str,
        param_name: &str,
    ) -> ParamDescription {
        describe_param(param_name, self.find_param(method_name, param_name))
    }

    #[tracing::instrument(
        level = "debug",
        name = "apispec.method_full_description",
        skip(self),
        fields(type_name = self.metadata.name())
    )]
    fn api_method_full_description(&self, method_name: &str) -> Option<MethodDescription> {
        let method = self.find_method(method_name)?;
        if !method.annotations().is_api_method() {
            debug!(method = method_name, "method is not marked as an API method");
            return None;
        }

        let params = method
            .params()
            .iter()
            .map(|param| describe_param(param.name(), Some(param)))
            .collect();

        Some(MethodDescription {
            common: CommonDescription::new(
                method.name(),
                description_of(Some(method.annotations())),
            ),
            params,
            return_description: method.returns().map(describe_return),
        })
    }
}

impl<T> Clone for Specifier<T> {
    fn clone(&self) -> Self {
        Self {
            metadata: self.metadata.clone(),
            _bound: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Specifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specifier")
            .field("type_name", &self.metadata.name())
            .field("methods", &self.metadata.methods().count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{ApiMethodTag, DescriptionTag, IntRangeTag, RequiredTag};
    use crate::metadata::{ApiMethods, ApiType};

    struct Inventory;

    impl ApiType for Inventory {
        fn api_name() -> &'static str {
            "Inventory"
        }

        fn api_annotations() -> Annotations {
            Annotations::new().with(DescriptionTag::new("Warehouse stock"))
        }
    }

    impl ApiMethods for Inventory {
        fn api_methods() -> Vec<MethodMetadata> {
            vec![
                MethodMetadata::new("restock")
                    .with_annotation(ApiMethodTag)
                    .with_annotation(DescriptionTag::new("Adds items"))
                    .with_param(
                        ParamMetadata::new("count")
                            .with_annotation(DescriptionTag::new("How many"))
                            .with_annotation(IntRangeTag::new(1, 100))
                            .with_annotation(RequiredTag::new(true)),
                    )
                    .with_param(ParamMetadata::new("note"))
                    .with_return(
                        ReturnMetadata::new()
                            .with_annotation(DescriptionTag::new("New stock level"))
                            .with_annotation(IntRangeTag::new(0, 10_000)),
                    ),
                MethodMetadata::new("audit").with_annotation(DescriptionTag::new("Internal check")),
                MethodMetadata::new("flush"),
            ]
        }
    }

    fn specifier() -> Specifier<Inventory> {
        Specifier::new()
    }

    #[test]
    fn type_description() {
        assert_eq!(specifier().api_description().as_deref(), Some("Warehouse stock"));
        assert_eq!(specifier().type_name(), "Inventory");
    }

    #[test]
    fn only_marked_methods_are_listed() {
        assert_eq!(specifier().api_method_names(), ["restock"]);
    }

    #[test]
    fn method_description_ignores_marker() {
        let specifier = specifier();
        assert_eq!(
            specifier.api_method_description("audit").unwrap().as_deref(),
            Some("Internal check")
        );
        assert_eq!(specifier.api_method_description("flush").unwrap(), None);
        assert!(specifier.api_method_description("nope").unwrap_err().is_not_found());
    }

    #[test]
    fn param_names_require_description() {
        let specifier = specifier();
        assert_eq!(specifier.api_method_param_names("restock").unwrap(), ["count", "note"]);
        assert!(specifier.api_method_param_names("audit").unwrap().is_empty());
        assert_eq!(
            specifier.api_method_param_names("flush"),
            Err(SpecifierError::InvalidOperation {
                method: "flush".to_string()
            })
        );
        assert!(specifier.api_method_param_names("nope").unwrap_err().is_not_found());
    }

    #[test]
    fn param_description_never_fails() {
        let specifier = specifier();
        assert_eq!(
            specifier.api_method_param_description("restock", "count").as_deref(),
            Some("How many")
        );
        assert_eq!(specifier.api_method_param_description("restock", "note"), None);
        assert_eq!(specifier.api_method_param_description("restock", "nope"), None);
        assert_eq!(specifier.api_method_param_description("nope", "count"), None);
    }

    #[test]
    fn missing_param_yields_named_empty_record() {
        let description = specifier().api_method_param_full_description("nope", "ghost");
        assert_eq!(
            description,
            ParamDescription::new(CommonDescription::new("ghost", None))
        );
    }

    #[test]
    fn return_description_uses_return_tags() {
        let description = specifier().api_method_full_description("restock").unwrap();
        let returns = description.return_description.unwrap();

        assert_eq!(returns.common.name, "");
        assert_eq!(returns.common.description.as_deref(), Some("New stock level"));
        assert_eq!(returns.range(), Some((0, 10_000)));
        assert_eq!(returns.required, None);
    }

    #[test]
    fn unmarked_or_missing_method_has_no_full_description() {
        let specifier = specifier();
        assert_eq!(specifier.api_method_full_description("audit"), None);
        assert_eq!(specifier.api_method_full_description("nope"), None);
    }

    #[test]
    fn clone_and_debug_do_not_need_bounds_on_type() {
        let specifier = specifier();
        let cloned = specifier.clone();
        assert_eq!(cloned.metadata(), specifier.metadata());
        assert_eq!(
            format!("{specifier:?}"),
            "Specifier { type_name: \"Inventory\", methods: 3 }"
        );
    }

    #[test]
    fn usable_as_trait_object() {
        let specifier = specifier();
        let dynamic: &dyn ApiSpecifier = &specifier;
        assert_eq!(dynamic.api_method_names(), ["restock"]);
    }
}
