use apispec::{ApiMethods, ApiSpecifier, ApiType, Specifier};

#[derive(ApiType)]
#[api(description = "Health probe")]
pub struct Probe;

impl ApiMethods for Probe {}

fn main() {
    let specifier = Specifier::<Probe>::new();
    assert_eq!(specifier.api_description().as_deref(), Some("Health probe"));
    assert!(specifier.api_method_names().is_empty());
}
