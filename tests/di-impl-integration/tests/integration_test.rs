//! 依赖注入引擎的集中集成测试

use anyhow::Result;
use di_abstractions::{
    as_is, Arguments, Constructible, ContainerExt, DiContainer, Parameter, Value,
};
use di_impl::{AutowireContainerImpl, DiContainerBuilder, DiContainerImpl};
use infrastructure_common::{AutowireError, ContainerError, ContainerResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

#[derive(Debug)]
struct User;

impl Constructible for User {
    const NAME: &'static str = "User";

    fn parameters() -> Vec<Parameter> {
        Vec::new()
    }

    fn construct(_: Arguments) -> ContainerResult<Self> {
        Ok(Self)
    }
}

#[derive(Debug)]
struct G {
    user: Arc<User>,
}

impl Constructible for G {
    const NAME: &'static str = "G";

    fn parameters() -> Vec<Parameter> {
        vec![Parameter::required("user", "User")]
    }

    fn construct(mut arguments: Arguments) -> ContainerResult<Self> {
        Ok(Self {
            user: arguments.next::<User>()?,
        })
    }
}

/// 构造参数类型无法确定
struct H;

impl Constructible for H {
    const NAME: &'static str = "H";

    fn parameters() -> Vec<Parameter> {
        vec![Parameter::untyped("some_arg")]
    }

    fn construct(_: Arguments) -> ContainerResult<Self> {
        Ok(Self)
    }
}

/// 构造参数类型既不是已知类型也未定义
struct I;

impl Constructible for I {
    const NAME: &'static str = "I";

    fn parameters() -> Vec<Parameter> {
        vec![Parameter::required("some_arg2", "String")]
    }

    fn construct(_: Arguments) -> ContainerResult<Self> {
        Ok(Self)
    }
}

struct Ping;
struct Pong;

impl Constructible for Ping {
    const NAME: &'static str = "Ping";

    fn parameters() -> Vec<Parameter> {
        vec![Parameter::required("pong", "Pong")]
    }

    fn construct(_: Arguments) -> ContainerResult<Self> {
        Ok(Self)
    }
}

impl Constructible for Pong {
    const NAME: &'static str = "Pong";

    fn parameters() -> Vec<Parameter> {
        vec![Parameter::required("ping", "Ping")]
    }

    fn construct(_: Arguments) -> ContainerResult<Self> {
        Ok(Self)
    }
}

fn autowire_container() -> AutowireContainerImpl {
    let container = AutowireContainerImpl::new();
    container.register_type::<User>();
    container.register_type::<G>();
    container.register_type::<H>();
    container.register_type::<I>();
    container.register_type::<Ping>();
    container.register_type::<Pong>();
    container
}

#[test]
fn test_unregistered_identifier() {
    let container = DiContainerImpl::new();
    assert!(!container.has("x"));
    let error = container.get("x").unwrap_err();
    assert!(error.is_not_found());
    assert_eq!(error.to_string(), "The resource 'x' was not found.");
}

#[test]
fn test_duplicate_add_fails() -> Result<()> {
    let container = DiContainerImpl::new();
    container.add("a", 1_u8)?;

    let error = container.add("a", 2_u8).unwrap_err();
    assert!(matches!(error, ContainerError::AlreadyDefined { .. }));
    let error = container
        .add_shared("a", |_: &dyn DiContainer| Ok(3_u8))
        .unwrap_err();
    assert!(matches!(error, ContainerError::AlreadyDefined { .. }));
    assert_eq!(*container.get_as::<u8>("a")?, 1);
    Ok(())
}

#[test]
fn test_invalid_arguments_store_nothing() {
    let container = DiContainerImpl::new();
    assert!(container.add("", 1_u8).is_err());
    assert!(container.add_tagged("b", 1_u8, &[""]).is_err());
    assert!(!container.has("b"));
    assert!(container.keys().is_empty());
}

#[test]
fn test_shared_and_transient() -> Result<()> {
    let container = DiContainerImpl::new();
    container.add_shared("shared", |_: &dyn DiContainer| Ok(String::from("s")))?;
    container.add_factory("transient", |_: &dyn DiContainer| Ok(String::from("t")))?;

    let a = container.get("shared")?;
    let b = container.get("shared")?;
    assert!(a.ptr_eq(&b));

    let a = container.get("transient")?;
    let b = container.get("transient")?;
    assert!(!a.ptr_eq(&b));
    assert_eq!(a.downcast_ref::<String>(), b.downcast_ref::<String>());
    Ok(())
}

#[test]
fn test_literal_returns_same_value() -> Result<()> {
    let container = DiContainerImpl::new();
    container.add("literal", vec![1_u8, 2, 3])?;
    let a = container.get("literal")?;
    let b = container.get("literal")?;
    assert!(a.ptr_eq(&b));
    Ok(())
}

#[test]
fn test_manual_cycle() -> Result<()> {
    let container = DiContainerImpl::new();
    container.add_factory("A", |c: &dyn DiContainer| c.get("B").map(|_| "a"))?;
    container.add_factory("B", |c: &dyn DiContainer| c.get("A").map(|_| "b"))?;

    let error = container.get("A").unwrap_err();
    assert!(error.is_circular_dependency());
    assert_eq!(error.to_string(), "Circular dependency detected: A -> B -> A");

    let error = container.get("B").unwrap_err();
    assert_eq!(error.to_string(), "Circular dependency detected: B -> A -> B");
    Ok(())
}

#[test]
fn test_caught_error_leaves_stack_clean() -> Result<()> {
    let container = DiContainerImpl::new();
    container.add_factory("flaky", |c: &dyn DiContainer| c.get("missing").map(|_| 0_u8))?;
    container.add_factory("outer", |c: &dyn DiContainer| {
        Ok(c.get("flaky").map_or(2_u8, |_| 1_u8))
    })?;

    assert_eq!(*container.get_as::<u8>("outer")?, 2);
    assert!(container.get("flaky").unwrap_err().is_not_found());
    Ok(())
}

#[test]
fn test_extend_chain_composes() -> Result<()> {
    let container = DiContainerImpl::new();
    container.add_factory("n", |_: &dyn DiContainer| Ok(3_i64))?;
    // f(x) = x + 1, g(x) = x * 10
    container.extend_as::<i64, _>("n", |x, _| Ok(Arc::new(*x + 1)))?;
    container.extend_as::<i64, _>("n", |x, _| Ok(Arc::new(*x * 10)))?;

    assert_eq!(*container.get_as::<i64>("n")?, 40);
    Ok(())
}

#[test]
fn test_extend_shared_before_first_resolution() -> Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let container = DiContainerImpl::new();
    container.add_shared("list", move |_: &dyn DiContainer| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(vec![String::from("raw")])
    })?;
    container.extend_as::<Vec<String>, _>("list", |list, _| {
        let mut list = (*list).clone();
        list.push(String::from("extended"));
        Ok(Arc::new(list))
    })?;

    let first = container.get("list")?;
    let second = container.get("list")?;
    assert!(first.ptr_eq(&second));
    assert_eq!(
        first.downcast_ref::<Vec<String>>().map(Vec::len),
        Some(2)
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn test_extend_shared_after_resolution_never_reruns() -> Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let container = DiContainerImpl::new();
    container.add_shared("svc", move |_: &dyn DiContainer| {
        Ok(counter.fetch_add(1, Ordering::SeqCst))
    })?;

    let before = container.get("svc")?;
    container.extend_as::<usize, _>("svc", |n, _| Ok(Arc::new(*n + 100)))?;
    let after = container.get("svc")?;

    assert!(before.ptr_eq(&after));
    assert_eq!(after.downcast_ref::<usize>(), Some(&0));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn test_get_by_tag() -> Result<()> {
    let container = DiContainerImpl::new();
    container.add_tagged("second", 2_u8, &["numbers"])?;
    container.add_tagged("word", String::from("w"), &["words"])?;
    container.add_factory_tagged("first", |_: &dyn DiContainer| Ok(1_u8), &["numbers", "odd"])?;

    let numbers = container.get_by_tag_as::<u8>("numbers")?;
    assert_eq!(numbers.iter().map(|n| **n).collect::<Vec<_>>(), vec![2, 1]);
    assert_eq!(container.get_by_tag("odd")?.len(), 1);

    let error = container.get_by_tag("missing").unwrap_err();
    assert_eq!(error.to_string(), "The resource 'missing' was not found.");
    Ok(())
}

#[test]
fn test_get_by_tag_shares_cached_singleton() -> Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let container = DiContainerImpl::new();
    container.add_shared_tagged(
        "cache",
        move |_: &dyn DiContainer| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(String::from("lru"))
        },
        &["backend"],
    )?;

    let direct = container.get("cache")?;
    let tagged = container.get_by_tag("backend")?;
    assert_eq!(tagged.len(), 1);
    assert!(tagged[0].ptr_eq(&direct));
    container.get_by_tag("backend")?;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn test_get_by_tag_reports_cycle() -> Result<()> {
    let container = DiContainerImpl::new();
    container.add_factory_tagged("A", |c: &dyn DiContainer| c.get("B").map(|_| "a"), &["jobs"])?;
    container.add_factory("B", |c: &dyn DiContainer| c.get("A").map(|_| "b"))?;

    let error = container.get_by_tag("jobs").unwrap_err();
    assert!(matches!(error, ContainerError::CircularDependency { .. }));
    assert_eq!(error.to_string(), "Circular dependency detected: A -> B -> A");

    // 失败后解析栈已清空
    let error = container.get("B").unwrap_err();
    assert_eq!(error.to_string(), "Circular dependency detected: B -> A -> B");
    Ok(())
}

#[test]
fn test_as_is_callable() -> Result<()> {
    type Handler = fn(&str) -> String;
    fn shout(text: &str) -> String {
        text.to_uppercase()
    }

    let container = DiContainerImpl::new();
    container.add_definition("handler", as_is(shout as Handler), &[])?;
    let handler = container.get_as::<Handler>("handler")?;
    assert_eq!(handler("hi"), "HI");
    Ok(())
}

#[test]
fn test_autowire_resolves_dependencies() -> Result<()> {
    let container = autowire_container();
    let g = container.resolve::<G>()?;
    let _user: &User = &g.user;
    assert!(container.has("G"));
    assert!(container.has("User"));
    Ok(())
}

#[test]
fn test_autowire_uses_existing_definition() -> Result<()> {
    let container = autowire_container();
    container.add_shared("User", |_: &dyn DiContainer| Ok(User))?;

    let first = container.resolve::<G>()?;
    let second = container.resolve::<G>()?;
    assert!(!Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&first.user, &second.user));
    Ok(())
}

#[test]
fn test_autowire_unknown_parameter_type() {
    let container = autowire_container();
    let error = container.get("H").unwrap_err();
    assert!(matches!(
        error,
        ContainerError::Autowire(AutowireError::UnknownParameterType { .. })
    ));
    assert_eq!(
        error.to_string(),
        "The type of parameter \"some_arg\" of H::new() can't be determined."
    );
    assert!(!container.has("H"));
}

#[test]
fn test_autowire_unresolvable_parameter_type() -> Result<()> {
    let container = autowire_container();
    let error = container.get("I").unwrap_err();
    assert_eq!(
        error.to_string(),
        "The type of parameter \"some_arg2\" of I::new() is not resolvable."
    );

    // 参数类型作为标识符定义后即可装配
    container.add("String", String::from("configured"))?;
    assert!(container.get("I")?.is::<I>());
    Ok(())
}

#[test]
fn test_autowire_cycle() {
    let container = autowire_container();
    let error = container.get("Ping").unwrap_err();
    assert_eq!(
        error.to_string(),
        "Circular dependency detected: Ping -> Pong -> Ping"
    );
}

#[test]
fn test_autowire_cycle_during_instantiation() -> Result<()> {
    let container = autowire_container();
    container.add_factory("Pong", |c: &dyn DiContainer| c.get("Ping").map(|_| Pong))?;

    let error = container.get("Ping").unwrap_err();
    assert_eq!(
        error.to_string(),
        "Circular dependency detected: Ping -> Pong -> Ping"
    );
    Ok(())
}

#[test]
fn test_unknown_identifier_in_autowire_container() {
    let container = autowire_container();
    assert!(container.get("NotAType").unwrap_err().is_not_found());
}

#[test]
fn test_concurrent_shared_resolution_runs_factory_once() -> Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let container = Arc::new(DiContainerImpl::new());
    container.add_shared("slow", move |_: &dyn DiContainer| {
        counter.fetch_add(1, Ordering::SeqCst);
        thread::sleep(std::time::Duration::from_millis(20));
        Ok(String::from("ready"))
    })?;

    let barrier = Arc::new(Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let container = container.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                container.get("slow")
            })
        })
        .collect();

    let values = handles
        .into_iter()
        .map(|handle| handle.join().expect("resolver thread panicked"))
        .collect::<ContainerResult<Vec<Value>>>()?;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(values.windows(2).all(|pair| pair[0].ptr_eq(&pair[1])));
    Ok(())
}

#[test]
fn test_concurrent_autowire_plans_once() -> Result<()> {
    let container = Arc::new(autowire_container());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let container = container.clone();
            thread::spawn(move || container.get("G").map(|value| value.is::<G>()))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().expect("resolver thread panicked")?);
    }
    assert_eq!(container.keys(), vec!["User", "G"]);
    Ok(())
}

#[test]
fn test_builder_from_config() -> Result<()> {
    let mut config = infrastructure_common::ContainerConfig::autowired();
    config.max_resolution_depth = 0;

    let container = DiContainerBuilder::new()
        .with_config(config)
        .register_type::<User>()
        .register_type::<G>()
        .add_provider(|c: &dyn DiContainer| c.add("env", String::from("test")))
        .build()?;

    assert!(container.get("G")?.is::<G>());
    assert_eq!(*container.get_as::<String>("env")?, "test");
    Ok(())
}
