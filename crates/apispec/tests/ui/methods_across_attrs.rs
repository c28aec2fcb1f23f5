use apispec::{ApiSpecifier, ApiType, Specifier, api_methods};

#[derive(ApiType)]
pub struct Counter {
    value: i64,
}

#[api_methods]
impl Counter {
    /// Doc comments and other attributes survive expansion.
    #[api_method]
    #[api_description("Adds to the counter")]
    #[inline]
    #[must_use]
    #[api_return(int_range(min = -100, max = 100))]
    pub fn add(
        &mut self,
        #[api_int_range(min = -10, max = 10)]
        #[allow(unused_mut)]
        mut step: i64,
    ) -> i64 {
        self.value += step;
        self.value
    }
}

fn main() {
    let mut counter = Counter { value: 0 };
    assert_eq!(counter.add(3), 3);

    let specifier = Specifier::<Counter>::new();
    let add = specifier.api_method_full_description("add").unwrap();
    assert_eq!(add.params[0].range(), Some((-10, 10)));
    assert_eq!(add.return_description.unwrap().range(), Some((-100, 100)));
}
