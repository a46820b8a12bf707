//! 派生宏与自动装配容器的集中集成测试

use anyhow::Result;
use component_macros::Autowire;
use di_abstractions::{ContainerExt, DiContainer};
use di_impl::{AutowireContainerImpl, DiContainerBuilder};
use infrastructure_common::{AutowireError, ContainerError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Autowire)]
pub struct User;

#[derive(Debug, Autowire)]
pub struct G {
    user: Arc<User>,
}

#[derive(Autowire)]
pub struct H {
    some_arg: Vec<String>,
}

#[derive(Autowire)]
pub struct I {
    some_arg2: String,
}

#[derive(Debug, Autowire)]
#[autowire(implements("AuditLog"))]
pub struct FileAudit;

#[derive(Debug, Autowire)]
pub struct Checkout {
    user: Arc<User>,
    audit: Arc<FileAudit>,
    #[autowire(default)]
    attempts: u8,
}

#[derive(Autowire)]
pub struct Chicken {
    egg: Arc<Egg>,
}

#[derive(Autowire)]
pub struct Egg {
    chicken: Arc<Chicken>,
}

#[test]
fn test_autowire_from_global_registry() -> Result<()> {
    let container = AutowireContainerImpl::new();
    let g = container.resolve::<G>()?;
    let _user: &User = &g.user;
    assert!(container.has("User"));
    Ok(())
}

#[test]
fn test_unknown_parameter_type() {
    let container = AutowireContainerImpl::new();
    let error = container.get("H").unwrap_err();
    assert_eq!(
        error.to_string(),
        "The type of parameter \"some_arg\" of H::new() can't be determined."
    );
}

#[test]
fn test_unresolvable_parameter_type() -> Result<()> {
    let container = AutowireContainerImpl::new();
    let error = container.get("I").unwrap_err();
    assert!(matches!(
        error,
        ContainerError::Autowire(AutowireError::UnresolvableParameterType { .. })
    ));
    assert_eq!(
        error.to_string(),
        "The type of parameter \"some_arg2\" of I::new() is not resolvable."
    );

    container.add("String", String::from("configured"))?;
    let i = container.resolve::<I>()?;
    assert_eq!(i.some_arg2, "configured");
    Ok(())
}

#[test]
fn test_unknown_type_is_fine_when_defaulted() -> Result<()> {
    let container = AutowireContainerImpl::new();
    let checkout = container.resolve::<Checkout>()?;
    assert_eq!(checkout.attempts, 0);
    assert_eq!(container.keys(), vec!["User", "FileAudit", "Checkout"]);
    let _ = (&checkout.user, &checkout.audit);
    Ok(())
}

#[test]
fn test_capability_extender() -> Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let container = AutowireContainerImpl::new();
    container.extend_as::<FileAudit, _>("AuditLog", move |audit, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(audit)
    })?;

    container.resolve::<Checkout>()?;
    container.resolve::<FileAudit>()?;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    Ok(())
}

#[test]
fn test_cycle_between_derived_types() {
    let container = AutowireContainerImpl::new();
    let error = container.get("Chicken").unwrap_err();
    assert_eq!(
        error.to_string(),
        "Circular dependency detected: Chicken -> Egg -> Chicken"
    );
}

#[test]
fn test_shared_override_through_builder() -> Result<()> {
    let container = DiContainerBuilder::new()
        .autowire(true)
        .shared("User", |_: &dyn DiContainer| Ok(User))
        .build()?;

    let first = container.get_as::<G>("G")?;
    let second = container.get_as::<G>("G")?;
    assert!(Arc::ptr_eq(&first.user, &second.user));
    Ok(())
}
