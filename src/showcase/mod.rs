//! Showcase Module
//!
//! The scenario tree that demonstrates each scoped helper:
//!
//! ```text
//! Showcase
//! ├── temp_dir     scenario-scoped directory
//! ├── set_env      env override restored at scenario end
//! ├── parallel     sequential vs. parallel children
//! ├── helper       #[track_caller] attribution (fails on purpose)
//! └── cleanup      LIFO cleanups and store isolation
//! ```

pub mod helpers;

use std::env;
use std::thread;
use std::time::Duration;

use crate::config::{Config, Section};
use crate::scenario::{Outcome, Scenario};
use crate::store::{DemoStore, StoreScope};
use helpers::{
    add, add_keys, bubble_outer, dispatch, fail_with_helper, fail_without_helper,
    log_store_on_cleanup, log_with_helper, log_without_helper, new_store, render,
};

/// Name of the root scenario
pub const ROOT: &str = "Showcase";

const SEQUENTIAL_CASES: [&str; 4] = ["first", "second", "third", "fourth"];

const PARALLEL_CASES: [&str; 9] = [
    "first",
    "second",
    "third",
    "fourth",
    "fifth",
    "sixth",
    "seventh",
    "eighth",
    "NINE THOUSAND",
];

/// Run the selected sections and return the finished tree
pub fn run(config: &Config) -> Outcome {
    Scenario::root(ROOT, config.clone(), |root| {
        for section in Section::ALL {
            if !root.config().runs(section) {
                continue;
            }
            let passed = match section {
                Section::TempDir => root.run(section.name(), temp_dir),
                Section::SetEnv => root.run(section.name(), set_env),
                Section::Parallel => root.run(section.name(), parallel),
                Section::Helper => root.run(section.name(), helper),
                Section::Cleanup => root.run(section.name(), cleanup),
            };
            tracing::info!(section = section.name(), passed, "section finished");
        }
    })
}

// =============================================================================
// temp_dir
// =============================================================================

fn temp_dir(s: &mut Scenario) {
    // removed once this scenario's cleanups run
    let dir = s.temp_dir();
    s.log(format!("testing dir: {}", dir.display()));
}

// =============================================================================
// set_env
// =============================================================================

fn set_env(s: &mut Scenario) {
    let key = s.config().env_key.clone();
    let value = s.config().env_value.clone();

    s.log(format!("env var before sub scenario executes: {:?}", env_value(&key)));
    let after_key = key.clone();
    s.cleanup(move |s| {
        s.log(format!("env var after sub scenario executes: {:?}", env_value(&after_key)));
    });

    s.run("isolated to a scenario", |s| {
        s.set_env(&key, &value);
        s.log(format!("{}={}", key, env_value(&key).unwrap_or_default()));
    });

    if s.config().include_failing {
        // the environment is process-wide; parallel scenarios may not touch it
        s.run_parallel(["refused in parallel"], |s, _| s.set_env(&key, &value));
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok()
}

// =============================================================================
// parallel
// =============================================================================

fn parallel(s: &mut Scenario) {
    let delay = s.config().case_delay;

    s.run("sequential", |s| {
        s.log("takes as long as all the cases combined");
        for case in SEQUENTIAL_CASES {
            s.run(case, |s| sleepy_case(s, case, delay));
        }
    });

    s.run("parallel", |s| {
        // not a panacea: thread start-up is a real cost
        s.log("takes as long as the slowest case plus scheduling");
        s.run_parallel(PARALLEL_CASES, |s, case| sleepy_case(s, case, delay));
    });
}

fn sleepy_case(s: &mut Scenario, case: &str, delay: Duration) {
    s.log(format!("starting case: {}", case));
    thread::sleep(delay);
    s.log(format!("finishing case: {}", case));
}

// =============================================================================
// helper
// =============================================================================

fn helper(s: &mut Scenario) {
    let failing = s.config().include_failing;

    if failing {
        s.run("without helper", fail_without_helper);
        s.run("with helper", |s| fail_with_helper(s));
    }

    s.run("logging from helpers", |s| {
        log_without_helper(s);
        log_with_helper(s);
    });

    if !failing {
        return;
    }

    s.run("heterogeneous helpers", |s| dispatch(s, &[&fail_without_helper]));

    s.run("descendant closures", |s| {
        dispatch(s, &[&|s: &mut Scenario| {
            dispatch(s, &[&|s: &mut Scenario| {
                // closures can't be #[track_caller]: reported here
                dispatch(s, &[&|s: &mut Scenario| {
                    s.fatal("I should bubble up error to the top");
                }]);
            }]);
        }]);
    });

    s.run("descendant helpers", |s| bubble_outer(s));
}

// =============================================================================
// cleanup
// =============================================================================

fn cleanup(s: &mut Scenario) {
    s.run("deferred", |s| {
        s.cleanup(|s| s.log("|-first log"));
        s.cleanup(|s| s.log("|--second log"));
        s.cleanup(|s| s.log("|---third log"));
        s.cleanup(|s| s.log("|----fourth log"));

        if s.config().include_failing {
            fail_with_helper(s);
        }
    });

    s.run("isolation", |s| {
        s.run("pollute", |s| {
            let store = new_store();
            log_store_on_cleanup(s, &store);

            let mut st = store.borrow_mut();
            st.add("first");
            st.add("second");
            st.add("third");
        });

        s.run("isolated", |s| {
            let store = new_store();
            log_store_on_cleanup(s, &store);

            for key in ["first", "second", "third"] {
                store.borrow_mut().add(key);
                let store = store.clone();
                s.cleanup(move |_| {
                    store.borrow_mut().remove(key);
                });
            }
        });

        s.run("helper_encapsulated", |s| {
            let store = new_store();
            log_store_on_cleanup(s, &store);

            add(s, &store, "first");
            add(s, &store, "second");
            add(s, &store, "third");

            add_keys(s, &store, &["fourth", "fifth", "sixth", "seventh"]);
        });

        s.run("store_scope", |s| {
            let mut store = DemoStore::new();
            {
                let mut scope = StoreScope::new(&mut store);
                for key in ["first", "second", "third"] {
                    scope.add(key);
                }
                let inside = render(s.config(), scope.store());
                s.log(format!("inside scope: {}", inside));
            }
            let after = render(s.config(), &store);
            s.log(format!("after scope: {}", after));
        });
    });
}
