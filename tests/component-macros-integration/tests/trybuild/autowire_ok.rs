use component_macros::Autowire;
use di_abstractions::{Constructible, ContainerExt};
use di_impl::AutowireContainerImpl;
use std::sync::Arc;

#[derive(Autowire)]
struct Repository;

#[derive(Autowire)]
struct Service {
    repository: Arc<Repository>,
}

fn main() {
    assert_eq!(Service::NAME, "Service");
    let container = AutowireContainerImpl::new();
    let service = container.resolve::<Service>().unwrap();
    let _repository: &Repository = &service.repository;
}
