//! trybuild compile-time tests for component_macros

#[test]
fn trybuild_autowire_derive() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/autowire_ok.rs");
    t.pass("tests/trybuild/autowire_attributes_ok.rs");
}
