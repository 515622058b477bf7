//! Registry-gate CLI entrypoint.
//!
//! This binary validates a package-registry manifest and exits 0 only when
//! every check passes. All diagnostics go to stderr; the exit code is the
//! machine-readable result.

use clap::Parser;
use registry_gate::cli::Cli;
use registry_gate::descriptor::describe::SwiftPackageDescriber;
use registry_gate::descriptor::download::HttpFetcher;
use registry_gate::error::Result;
use registry_gate::manifest::SearchPaths;
use registry_gate::output::{verdict_line, write_stderr_line};
use registry_gate::run::{RunConfig, run_validation};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(&result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let config = RunConfig {
        search: SearchPaths::from_environment(cli.manifest.clone()),
        branch: cli.branch.clone(),
        strict: cli.strict,
        local_only: cli.local_only,
        quiet: cli.quiet,
    };

    run_validation(&config, &HttpFetcher, &SwiftPackageDescriber, stderr).map(|_| ())
}

fn exit_code_for_run_result(result: &Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => {
            write_stderr_line(stderr, verdict_line(true));
            0
        }
        Err(err) => {
            write_stderr_line(stderr, err);
            write_stderr_line(stderr, verdict_line(false));
            1
        }
    }
}
