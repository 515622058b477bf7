//! Mock-driven tests for the verification loop.

use super::*;
use crate::descriptor::describe::MockPackageDescriber;
use crate::descriptor::download::{FetchError, MockDescriptorFetcher};
use crate::descriptor::schema::{PackageDescriptor, Product};
use std::sync::{Arc, Mutex};

const DESCRIPTOR_BODY: &str = "// swift-tools-version:5.9\n";

fn entries(urls: &[&str]) -> Vec<ManifestEntry> {
    urls.iter().copied().map(ManifestEntry::from).collect()
}

fn config() -> VerifyConfig<'static> {
    VerifyConfig {
        branch: "master",
        quiet: false,
    }
}

fn descriptor(name: &str, products: usize) -> PackageDescriptor {
    PackageDescriptor {
        name: name.to_owned(),
        products: (0..products)
            .map(|i| Product {
                name: format!("{name}-{i}"),
            })
            .collect(),
    }
}

fn fetcher_returning_body() -> MockDescriptorFetcher {
    let mut fetcher = MockDescriptorFetcher::new();
    fetcher
        .expect_fetch()
        .returning(|_| Ok(DESCRIPTOR_BODY.to_owned()));
    fetcher
}

fn describer_returning(name: &'static str, products: usize) -> MockPackageDescriber {
    let mut describer = MockPackageDescriber::new();
    describer
        .expect_describe()
        .returning(move |_| Ok(descriptor(name, products)));
    describer
}

#[test]
fn all_entries_valid_yields_clean_report() {
    let list = entries(&[
        "https://github.com/a/b.git",
        "https://github.com/a/c.git",
    ]);
    let fetcher = fetcher_returning_body();
    let describer = describer_returning("Pkg", 1);
    let mut stderr = Vec::new();

    let report = verify_entries(&list, &fetcher, &describer, &config(), &mut stderr)
        .expect("verification should succeed");

    assert_eq!(report.valid_count(), 2);
    assert_eq!(report.skipped_count(), 0);
    assert_eq!(report.entries()[0].index, 0);
    assert_eq!(report.entries()[1].url, "https://github.com/a/c.git");
}

#[test]
fn fetcher_receives_the_derived_descriptor_url() {
    let list = entries(&["https://github.com/Alice/Foo.git"]);
    let mut fetcher = MockDescriptorFetcher::new();
    fetcher
        .expect_fetch()
        .withf(|url| {
            url == "https://raw.githubusercontent.com/Alice/Foo/master/Package.swift"
        })
        .returning(|_| Ok(DESCRIPTOR_BODY.to_owned()));
    let describer = describer_returning("Foo", 1);
    let mut stderr = Vec::new();

    verify_entries(&list, &fetcher, &describer, &config(), &mut stderr)
        .expect("verification should succeed");
}

#[test]
fn branch_override_reaches_the_fetcher() {
    let list = entries(&["https://github.com/Alice/Foo.git"]);
    let mut fetcher = MockDescriptorFetcher::new();
    fetcher
        .expect_fetch()
        .withf(|url| url.contains("/Foo/main/"))
        .returning(|_| Ok(DESCRIPTOR_BODY.to_owned()));
    let describer = describer_returning("Foo", 1);
    let verify_config = VerifyConfig {
        branch: "main",
        quiet: true,
    };
    let mut stderr = Vec::new();

    verify_entries(&list, &fetcher, &describer, &verify_config, &mut stderr)
        .expect("verification should succeed");
}

#[test]
fn unfetchable_entry_is_skipped_and_the_loop_continues() {
    let list = entries(&[
        "https://github.com/a/gone.git",
        "https://github.com/a/here.git",
    ]);
    let mut fetcher = MockDescriptorFetcher::new();
    fetcher.expect_fetch().returning(|url| {
        if url.contains("/gone/") {
            Err(FetchError::NotFound {
                url: url.to_owned(),
            })
        } else {
            Ok(DESCRIPTOR_BODY.to_owned())
        }
    });
    let describer = describer_returning("Here", 1);
    let mut stderr = Vec::new();

    let report = verify_entries(&list, &fetcher, &describer, &config(), &mut stderr)
        .expect("soft failures never abort");

    assert_eq!(report.skipped_count(), 1);
    assert_eq!(report.valid_count(), 1);
    assert!(matches!(
        report.entries()[0].outcome,
        EntryOutcome::SkippedUnfetchable { .. }
    ));
}

#[test]
fn describer_failure_is_skipped() {
    let list = entries(&["https://github.com/a/b.git"]);
    let fetcher = fetcher_returning_body();
    let mut describer = MockPackageDescriber::new();
    describer.expect_describe().returning(|_| {
        Err(crate::descriptor::describe::DescribeError::CommandFailed {
            detail: "manifest parse failure".to_owned(),
        })
    });
    let mut stderr = Vec::new();

    let report = verify_entries(&list, &fetcher, &describer, &config(), &mut stderr)
        .expect("soft failures never abort");

    let EntryOutcome::SkippedUnfetchable { reason } = &report.entries()[0].outcome else {
        panic!("expected SkippedUnfetchable");
    };
    assert!(reason.contains("manifest parse failure"));
}

#[test]
fn empty_product_list_is_skipped_as_no_product() {
    let list = entries(&["https://github.com/a/b.git"]);
    let fetcher = fetcher_returning_body();
    let describer = describer_returning("Bare", 0);
    let mut stderr = Vec::new();

    let report = verify_entries(&list, &fetcher, &describer, &config(), &mut stderr)
        .expect("soft failures never abort");

    assert_eq!(
        report.entries()[0].outcome,
        EntryOutcome::SkippedNoProduct {
            name: "Bare".to_owned(),
        }
    );
}

#[test]
fn unsupported_host_aborts_before_any_fetch() {
    let list = entries(&[
        "https://gitlab.com/a/b.git",
        "https://github.com/a/c.git",
    ]);
    let mut fetcher = MockDescriptorFetcher::new();
    fetcher.expect_fetch().times(0);
    let mut describer = MockPackageDescriber::new();
    describer.expect_describe().times(0);
    let mut stderr = Vec::new();

    let err = verify_entries(&list, &fetcher, &describer, &config(), &mut stderr)
        .expect_err("unknown host is a hard failure");

    assert!(matches!(
        err,
        GateError::UnsupportedHost { index: 0, ref host } if host == "gitlab.com"
    ));
}

#[test]
fn unparsable_url_aborts_with_invalid_url() {
    let list = entries(&["not a url"]);
    let fetcher = MockDescriptorFetcher::new();
    let describer = MockPackageDescriber::new();
    let mut stderr = Vec::new();

    let err = verify_entries(&list, &fetcher, &describer, &config(), &mut stderr)
        .expect_err("unparsable URL is a hard failure");

    assert!(matches!(err, GateError::InvalidUrl { index: 0, .. }));
}

#[test]
fn url_without_repo_segments_aborts_with_invalid_url() {
    let list = entries(&["https://github.com/only-user.git"]);
    let fetcher = MockDescriptorFetcher::new();
    let describer = MockPackageDescriber::new();
    let mut stderr = Vec::new();

    let err = verify_entries(&list, &fetcher, &describer, &config(), &mut stderr)
        .expect_err("missing segments is a hard failure");

    assert!(matches!(err, GateError::InvalidUrl { index: 0, .. }));
}

#[test]
fn each_entry_gets_its_own_staging_directory_with_the_descriptor() {
    let list = entries(&[
        "https://github.com/a/b.git",
        "https://github.com/a/c.git",
    ]);
    let fetcher = fetcher_returning_body();

    let seen_dirs: Arc<Mutex<Vec<std::path::PathBuf>>> = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&seen_dirs);
    let mut describer = MockPackageDescriber::new();
    describer.expect_describe().returning(move |dir| {
        let staged_file = dir.join(DESCRIPTOR_FILE_NAME);
        let content =
            std::fs::read_to_string(&staged_file).expect("descriptor should be staged");
        assert_eq!(content, DESCRIPTOR_BODY);
        recorded
            .lock()
            .expect("lock should not be poisoned")
            .push(dir.as_std_path().to_owned());
        Ok(descriptor("Pkg", 1))
    });
    let mut stderr = Vec::new();

    verify_entries(&list, &fetcher, &describer, &config(), &mut stderr)
        .expect("verification should succeed");

    let dirs = seen_dirs.lock().expect("lock should not be poisoned");
    assert_eq!(dirs.len(), 2);
    assert_ne!(dirs[0], dirs[1], "staging directories must not be shared");
}

#[test]
fn quiet_mode_still_reports_skips() {
    let list = entries(&["https://github.com/a/gone.git"]);
    let mut fetcher = MockDescriptorFetcher::new();
    fetcher.expect_fetch().returning(|url| {
        Err(FetchError::NotFound {
            url: url.to_owned(),
        })
    });
    let describer = MockPackageDescriber::new();
    let verify_config = VerifyConfig {
        branch: "master",
        quiet: true,
    };
    let mut stderr = Vec::new();

    verify_entries(&list, &fetcher, &describer, &verify_config, &mut stderr)
        .expect("soft failures never abort");

    let output = String::from_utf8(stderr).expect("stderr should be UTF-8");
    assert!(output.contains("warning"));
    assert!(!output.contains("[1/1]"), "progress lines should be suppressed");
}
