use trellis::handler::TestEvent;
use trellis::loader::{check, skip};
use trellis::{
    CompletionStatus, EventForwarder, Loader, Member, Module, ResultCollecter, TestCase, TestId,
    TestRunner, TypeInfo,
};

struct Sample;

impl Sample {
    fn test_pass(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn test_fail(&mut self) -> anyhow::Result<()> {
        check(false, "expected true")
    }

    fn test_skip(&mut self) -> anyhow::Result<()> {
        Err(skip("skip-me"))
    }
}

impl TestCase for Sample {
    const NAME: &'static str = "Sample";

    fn new(_method_name: &str) -> Self {
        Sample
    }

    fn members() -> Vec<Member<Self>> {
        vec![
            Member::method("test_pass", Self::test_pass),
            Member::method("test_fail", Self::test_fail),
            Member::method("test_skip", Self::test_skip),
        ]
    }
}

fn id(method: &str) -> TestId {
    TestId::new("Sample", method)
}

#[test]
fn sample_case_runs_in_declared_order() {
    let mut suite = Loader::new().load_case(&TypeInfo::of::<Sample>()).unwrap();
    assert_eq!(
        suite.test_ids(),
        vec![id("test_pass"), id("test_fail"), id("test_skip")]
    );

    let (forwarder, mut rx) = EventForwarder::channel();
    let mut collector = ResultCollecter::new();
    collector.add_result_handler(forwarder);
    let mut runner = TestRunner::new(collector);

    let successful = runner.run(&mut suite).unwrap();
    assert!(!successful);
    assert!(!runner.collector().was_successful());

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    assert_eq!(events.len(), 2 + 3 * 3);
    assert_eq!(events[0], TestEvent::RunStarted);
    assert_eq!(events[10], TestEvent::RunFinished);

    let expected = [
        ("test_pass", CompletionStatus::Success),
        ("test_fail", CompletionStatus::Failure),
        ("test_skip", CompletionStatus::Skipped),
    ];
    for (i, (method, status)) in expected.iter().enumerate() {
        let base = 1 + i * 3;
        assert_eq!(events[base], TestEvent::TestStarted { test: id(method) });
        assert_eq!(events[base + 2], TestEvent::TestStopped { test: id(method) });
        let TestEvent::TestFinished { result } = &events[base + 1] else {
            panic!("expected an outcome at {}, got {:?}", base + 1, events[base + 1]);
        };
        assert_eq!(result.test(), &id(method));
        assert_eq!(result.status(), *status);
    }

    let TestEvent::TestFinished { result: failed } = &events[5] else {
        unreachable!()
    };
    assert_eq!(failed.exception().unwrap().message, "expected true");
    let TestEvent::TestFinished { result: skipped } = &events[8] else {
        unreachable!()
    };
    assert_eq!(skipped.message(), Some("skip-me"));
    assert!(skipped.exception().is_none());
}

#[test]
fn module_with_non_test_types_loads_only_cases() {
    let module = Module::new("sample")
        .with_type(TypeInfo::plain("Helpers", [("test_like", true)]))
        .with_case::<Sample>()
        .with_value("FIXTURE_DIR");
    let loader = Loader::new();

    let suite = loader.load_module(&module).unwrap();
    assert_eq!(suite.len(), 1);
    assert_eq!(suite.count_test_cases(), 3);

    let err = loader
        .load_test(&TypeInfo::plain("Helpers", [("test_like", true)]), "test_like")
        .err()
        .unwrap();
    assert!(matches!(err, trellis::Error::NotATestCase { .. }));
}
