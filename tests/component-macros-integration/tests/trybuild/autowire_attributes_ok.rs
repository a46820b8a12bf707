use component_macros::Autowire;
use di_abstractions::{Constructible, ParameterType};
use std::sync::Arc;

#[derive(Clone, Default)]
struct Settings;

#[derive(Autowire)]
struct Pool;

#[derive(Autowire)]
#[autowire(name = "orders", implements("Repository"))]
struct OrderRepository(Arc<Pool>, Settings, #[autowire(default)] u32);

fn main() {
    assert_eq!(OrderRepository::NAME, "orders");
    assert_eq!(OrderRepository::implements(), vec!["Repository"]);
    let parameters = OrderRepository::parameters();
    assert_eq!(parameters[1].kind, ParameterType::Named("Settings"));
    assert!(parameters[2].optional);
}
