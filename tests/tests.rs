use http::Method;
use routebench::{
    adapters, scenario, success, BuiltRouter, Error, Harness, HarnessConfig, Iterations, Mode,
    PlaceholderStyle, Request, ResponseRecorder, ResponseWriter, RouterAdapter, ScenarioTable,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use test_harness::test;

type Result = std::result::Result<(), Box<dyn std::error::Error>>;

fn harness(test: impl FnOnce() -> Result) -> Result {
    let _ = env_logger::builder().is_test(true).try_init();
    test()
}

fn serve(router: &dyn BuiltRouter, method: Method, path: &str) -> ResponseRecorder {
    let mut response = ResponseRecorder::new();
    router.serve(&Request::new(method, path), &mut response);
    response
}

#[test(harness)]
fn five_params_on_every_adapter() -> Result {
    let scenario = scenario::by_name("Param5")?;
    for adapter in adapters::all() {
        let routes = adapter.translate(scenario.routes());
        let router = adapter.build(&routes, success)?;

        let response = serve(&*router, Method::GET, scenario::FIVE_ROUTE);
        assert_eq!(response.status(), 200, "{adapter:?}");
        assert_eq!(response.body(), b"success", "{adapter:?}");

        assert_eq!(serve(&*router, Method::GET, "/test/test/test/test").status(), 404);
        assert_eq!(serve(&*router, Method::POST, scenario::FIVE_ROUTE).status(), 404);
    }
    Ok(())
}

#[test(harness)]
fn every_adapter_agrees_on_the_api() -> Result {
    let api = scenario::by_name("api")?;
    assert_eq!(api.mode(), Mode::Sweep);

    let misses = [
        (Method::PATCH, "/users"),
        (Method::DELETE, "/search"),
        (Method::GET, "/users/42/comments"),
        (Method::GET, "/teams/42"),
        (Method::GET, "/"),
    ];

    for adapter in adapters::all() {
        let router = adapter.build(&adapter.translate(api.routes()), success)?;

        for request in api.requests().iter() {
            let response = serve(&*router, request.method().clone(), request.path());
            assert!(response.is_success(), "{adapter:?} {request}");
        }

        for (method, path) in misses.iter() {
            let response = serve(&*router, method.clone(), path);
            assert_eq!(response.status(), 404, "{adapter:?} {method} {path}");
            assert_eq!(response.body_string(), "404 page not found");
        }
    }
    Ok(())
}

#[test(harness)]
fn translated_tables_match_the_adapter_style() -> Result {
    let api = scenario::by_name("Api")?;
    for adapter in adapters::all() {
        let translated = adapter.translate(api.routes());
        assert_eq!(translated.len(), api.routes().len());
        for (canonical, translated) in api.routes().iter().zip(translated.iter()) {
            assert_eq!(canonical.method(), translated.method());
            let expected = adapter.placeholder_style().translate(canonical.path());
            assert_eq!(translated.path(), &*expected);
        }
    }

    let brace = adapters::by_name("matchit")?;
    assert_eq!(brace.placeholder_style(), PlaceholderStyle::Brace);
    let translated = brace.translate(api.routes());
    assert_eq!(translated[8].path(), "/users/{id}/posts/{post}");
    Ok(())
}

#[test(harness)]
fn unknown_methods_are_refused() -> Result {
    for adapter in adapters::all() {
        match adapter.build_single("FOOBAR", "/user/:name", success) {
            Err(Error::UnknownMethod { method, path }) => {
                assert_eq!(method, "FOOBAR");
                assert_eq!(path, "/user/:name");
            }
            other => panic!("{adapter:?}: expected UnknownMethod, got {other:?}", other = other.err()),
        }
    }
    Ok(())
}

#[test(harness)]
fn harness_runs_every_builtin() -> Result {
    let harness = Harness::new(
        HarnessConfig::new()
            .iterations(Iterations::Fixed(50))
            .settle_rounds(1),
    )?;
    let scenarios = harness.scenarios()?;
    assert_eq!(scenarios.len(), 4);

    let results = harness.run_all(&scenarios)?;
    assert_eq!(results.len(), 20);

    let names: Vec<_> = results.iter().map(|result| result.name.as_str()).collect();
    assert_eq!(
        &names[..5],
        [
            "ActixRouter_Param",
            "Matchit_Param",
            "PathTree_Param",
            "RouteRecognizer_Param",
            "Routefinder_Param"
        ]
    );
    assert_eq!(names[19], "Routefinder_Api");

    for result in &results {
        assert_eq!(result.iterations, 50);
        assert!(result.ns_per_op >= 0.0);
    }
    Ok(())
}

#[test(harness)]
fn config_filters_adapters_and_scenarios() -> Result {
    let harness = Harness::new(
        HarnessConfig::new()
            .iterations(Iterations::Fixed(10))
            .adapter("PATHTREE")
            .adapter("Routefinder")
            .scenario("param20"),
    )?;

    let adapters: Vec<_> = harness.adapters().map(|adapter| adapter.name()).collect();
    assert_eq!(adapters, ["PathTree", "Routefinder"]);

    let results = harness.run_all(&harness.scenarios()?)?;
    let names: Vec<_> = results.iter().map(|result| result.name.as_str()).collect();
    assert_eq!(names, ["PathTree_Param20", "Routefinder_Param20"]);
    Ok(())
}

#[test(harness)]
fn unknown_names() -> Result {
    assert!(matches!(
        Harness::new(HarnessConfig::new().adapter("gorilla")),
        Err(Error::UnknownAdapter(name)) if name == "gorilla"
    ));

    let harness = Harness::new(HarnessConfig::new().scenario("Param7"))?;
    assert!(matches!(
        harness.scenarios(),
        Err(Error::UnknownScenario(name)) if name == "Param7"
    ));
    Ok(())
}

#[derive(Debug)]
struct Deaf;

struct NotFound;

impl BuiltRouter for NotFound {
    fn serve(&self, _request: &Request, response: &mut dyn ResponseWriter) {
        response.write_status(404);
        response.write_body(b"nope");
    }
}

impl RouterAdapter for Deaf {
    fn name(&self) -> &'static str {
        "Deaf"
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Colon
    }

    fn build(
        &self,
        _routes: &ScenarioTable<'_>,
        _handler: routebench::Handler,
    ) -> routebench::Result<Box<dyn BuiltRouter>> {
        Ok(Box::new(NotFound))
    }
}

#[test(harness)]
fn verification_catches_a_router_that_never_matches() -> Result {
    let config = HarnessConfig::new().iterations(Iterations::Fixed(1));
    let harness = Harness::with_adapters(vec![Box::new(Deaf)], config.clone());
    let param = scenario::by_name("Param")?;

    match harness.run_one(&param, &Deaf) {
        Err(Error::Verification {
            adapter,
            method,
            path,
            status,
            body,
        }) => {
            assert_eq!(adapter, "Deaf");
            assert_eq!(method, "GET");
            assert_eq!(path, "/user/gordon");
            assert_eq!(status, 404);
            assert_eq!(body, "nope");
        }
        other => panic!("expected a verification error, got {:?}", other.err()),
    }

    let unverified = Harness::with_adapters(vec![Box::new(Deaf)], config.verify(false));
    let result = unverified.run_one(&param, &Deaf)?;
    assert_eq!(result.name.as_str(), "Deaf_Param");
    Ok(())
}

static WARMED: AtomicUsize = AtomicUsize::new(0);

struct NeedsWarmup;

impl RouterAdapter for NeedsWarmup {
    fn name(&self) -> &'static str {
        "NeedsWarmup"
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Brace
    }

    fn init(&self) {
        WARMED.fetch_add(1, Ordering::SeqCst);
    }

    fn build(
        &self,
        routes: &ScenarioTable<'_>,
        handler: routebench::Handler,
    ) -> routebench::Result<Box<dyn BuiltRouter>> {
        if WARMED.load(Ordering::SeqCst) == 0 {
            return Err(Error::Build {
                adapter: self.name(),
                path: routes[0].path().into(),
                reason: String::from("built before init"),
            });
        }
        adapters::Matchit.build(routes, handler)
    }
}

#[test(harness)]
fn run_one_initializes_before_building() -> Result {
    let harness = Harness::with_adapters(
        vec![Box::new(NeedsWarmup)],
        HarnessConfig::new().iterations(Iterations::Fixed(5)),
    );

    for scenario in harness.scenarios()? {
        let result = harness.run_one(&scenario, &NeedsWarmup)?;
        assert_eq!(result.iterations, 5);
    }
    assert_eq!(WARMED.load(Ordering::SeqCst), 1);
    Ok(())
}
