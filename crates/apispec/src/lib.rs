//! Query API documentation from annotations attached to a type.
//!
//! A host type documents itself with tags: a description on the type, and on
//! its public methods an API marker, descriptions, integer ranges and
//! requiredness flags for parameters and return values. A [`Specifier`]
//! bound to that type answers questions about it and assembles
//! [`MethodDescription`] trees.
//!
//! # Overview
//!
//! - [`annotation`] - the tag types and the per-declaration tag list
//! - [`metadata`] - the metadata table built from a type's tags
//! - [`describe`] - description records returned to callers
//! - [`Specifier`] / [`ApiSpecifier`] - the query operations
//!
//! # Example
//!
//! ```
//! use apispec::{api_methods, ApiSpecifier, ApiType, Specifier};
//!
//! #[derive(ApiType)]
//! #[api(description = "Order management")]
//! pub struct Orders;
//!
//! #[api_methods]
//! impl Orders {
//!     #[api_method]
//!     #[api_description("Places an order")]
//!     #[api_return(required)]
//!     pub fn place(
//!         &self,
//!         #[api_int_range(min = 1, max = 50)]
//!         #[api_required]
//!         quantity: i64,
//!     ) -> u64 {
//!         quantity as u64
//!     }
//! }
//!
//! let specifier = Specifier::<Orders>::new();
//! let place = specifier.api_method_full_description("place").unwrap();
//!
//! assert_eq!(place.common.description.as_deref(), Some("Places an order"));
//! assert_eq!(place.params[0].range(), Some((1, 50)));
//! assert_eq!(place.params[0].required, Some(true));
//! assert_eq!(place.return_description.unwrap().required, Some(true));
//! ```

// Generated code refers to `::apispec`, which must also resolve inside this crate.
extern crate self as apispec;

pub mod annotation;
pub mod describe;
pub mod error;
pub mod metadata;
mod specifier;

pub use annotation::{
    Annotation, AnnotationKind, Annotations, ApiMethodTag, DescriptionTag, IntRangeTag,
    RequiredTag, Tag,
};
pub use describe::{CommonDescription, MethodDescription, ParamDescription};
pub use error::{Result, SpecifierError};
pub use metadata::{
    ApiMethods, ApiType, Documented, MethodMetadata, ParamMetadata, ReturnMetadata, TypeMetadata,
};
pub use specifier::{ApiSpecifier, Specifier};

pub use apispec_derive::{ApiType, api_methods};
