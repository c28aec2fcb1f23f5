//! Annotation model.
//!
//! Annotations are the declarative tags a host type's author attaches to the
//! type itself, its methods, their parameters and their return values. They
//! carry no behavior; the [`Specifier`](crate::Specifier) reads them to build
//! description records.
//!
//! Lookup is keyed by tag type, mirroring how the tags are declared:
//!
//! ```
//! use apispec::{Annotations, IntRangeTag, RequiredTag};
//!
//! let annotations = Annotations::new()
//!     .with(IntRangeTag::new(1, 10))
//!     .with(RequiredTag::new(true));
//!
//! assert_eq!(annotations.get::<IntRangeTag>(), Some(&IntRangeTag::new(1, 10)));
//! assert_eq!(annotations.get::<RequiredTag>().map(|tag| tag.required), Some(true));
//! ```

/// Free-text description of a type, method, parameter or return value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DescriptionTag {
    pub text: String,
}

impl DescriptionTag {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Marks a method as part of the exposed API surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ApiMethodTag;

/// Inclusive integer bounds declared for a parameter or return value.
///
/// The bounds are documentation only; nothing checks argument values against
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntRangeTag {
    pub min: i64,
    pub max: i64,
}

impl IntRangeTag {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

/// Declares whether a parameter or return value is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequiredTag {
    pub required: bool,
}

impl RequiredTag {
    pub const fn new(required: bool) -> Self {
        Self { required }
    }
}

/// One tag attached to a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Annotation {
    Description(DescriptionTag),
    ApiMethod(ApiMethodTag),
    IntRange(IntRangeTag),
    Required(RequiredTag),
}

impl Annotation {
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Annotation::Description(_) => AnnotationKind::Description,
            Annotation::ApiMethod(_) => AnnotationKind::ApiMethod,
            Annotation::IntRange(_) => AnnotationKind::IntRange,
            Annotation::Required(_) => AnnotationKind::Required,
        }
    }
}

/// Discriminant of an [`Annotation`], used as the lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    Description,
    ApiMethod,
    IntRange,
    Required,
}

/// A concrete tag type that can be looked up in an [`Annotations`] list.
pub trait Tag: Into<Annotation> {
    const KIND: AnnotationKind;

    fn from_annotation(annotation: &Annotation) -> Option<&Self>;
}

macro_rules! impl_tag {
    ($tag:ty, $variant:ident) => {
        impl From<$tag> for Annotation {
            fn from(tag: $tag) -> Self {
                Annotation::$variant(tag)
            }
        }

        impl Tag for $tag {
            const KIND: AnnotationKind = AnnotationKind::$variant;

            fn from_annotation(annotation: &Annotation) -> Option<&Self> {
                match annotation {
                    Annotation::$variant(tag) => Some(tag),
                    _ => None,
                }
            }
        }
    };
}

impl_tag!(DescriptionTag, Description);
impl_tag!(ApiMethodTag, ApiMethod);
impl_tag!(IntRangeTag, IntRange);
impl_tag!(RequiredTag, Required);

/// The ordered tag list attached to a single declaration.
///
/// Several tags of different kinds may coexist. When a kind appears more than
/// once the first one wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Annotations(Vec<Annotation>);

impl Annotations {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a tag, builder style.
    pub fn with(mut self, tag: impl Into<Annotation>) -> Self {
        self.0.push(tag.into());
        self
    }

    pub fn push(&mut self, tag: impl Into<Annotation>) {
        self.0.push(tag.into());
    }

    /// First tag of type `T`, if any.
    pub fn get<T: Tag>(&self) -> Option<&T> {
        self.0.iter().find_map(T::from_annotation)
    }

    pub fn contains(&self, kind: AnnotationKind) -> bool {
        self.0.iter().any(|annotation| annotation.kind() == kind)
    }

    /// Text of the first [`DescriptionTag`].
    pub fn description(&self) -> Option<&str> {
        self.get::<DescriptionTag>().map(|tag| tag.text.as_str())
    }

    pub fn is_api_method(&self) -> bool {
        self.contains(AnnotationKind::ApiMethod)
    }

    pub fn int_range(&self) -> Option<IntRangeTag> {
        self.get::<IntRangeTag>().copied()
    }

    pub fn required(&self) -> Option<bool> {
        self.get::<RequiredTag>().map(|tag| tag.required)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<A: Into<Annotation>> FromIterator<A> for Annotations {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a Annotations {
    type Item = &'a Annotation;
    type IntoIter = std::slice::Iter<'a, Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_annotations_have_no_tags() {
        let annotations = Annotations::new();
        assert!(annotations.is_empty());
        assert_eq!(annotations.description(), None);
        assert!(!annotations.is_api_method());
        assert_eq!(annotations.int_range(), None);
        assert_eq!(annotations.required(), None);
    }

    #[test]
    fn tags_of_different_kinds_coexist() {
        let annotations = Annotations::new()
            .with(ApiMethodTag)
            .with(DescriptionTag::new("Adds two numbers"))
            .with(IntRangeTag::new(-5, 5))
            .with(RequiredTag::new(false));

        assert_eq!(annotations.len(), 4);
        assert!(annotations.is_api_method());
        assert_eq!(annotations.description(), Some("Adds two numbers"));
        assert_eq!(annotations.int_range(), Some(IntRangeTag::new(-5, 5)));
        assert_eq!(annotations.required(), Some(false));
    }

    #[test]
    fn first_tag_of_a_kind_wins() {
        let annotations = Annotations::new()
            .with(DescriptionTag::new("first"))
            .with(DescriptionTag::new("second"));

        assert_eq!(annotations.description(), Some("first"));
    }

    #[test]
    fn kind_matches_variant() {
        let annotation: Annotation = RequiredTag::new(true).into();
        assert_eq!(annotation.kind(), AnnotationKind::Required);
        assert_eq!(<RequiredTag as Tag>::KIND, AnnotationKind::Required);
        assert!(RequiredTag::from_annotation(&annotation).is_some());
        assert!(IntRangeTag::from_annotation(&annotation).is_none());
    }

    #[test]
    fn collects_from_iterator() {
        let annotations: Annotations = vec![RequiredTag::new(true), RequiredTag::new(false)]
            .into_iter()
            .collect();

        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations.required(), Some(true));
        assert!(!annotations.contains(AnnotationKind::IntRange));
    }
}
