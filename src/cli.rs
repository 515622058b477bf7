//! CLI argument definitions for registry-gate.
//!
//! This module defines the command-line interface using clap. It is
//! separated from the main entrypoint to keep the binary small and focused
//! on orchestration.

use crate::descriptor::location::DEFAULT_BRANCH;
use camino::Utf8PathBuf;
use clap::Parser;

/// Validate a package-registry manifest.
#[derive(Parser, Debug, Clone)]
#[command(name = "registry-gate")]
#[command(version, about)]
#[command(long_about = concat!(
    "Validate a package-registry manifest.\n\n",
    "The manifest is a JSON array of package source URLs. Three local checks ",
    "run first: every URL must end in .git, no two URLs may collide under ",
    "case-insensitive comparison, and the list must be sorted ",
    "case-insensitively (a sorted copy is written next to the manifest when ",
    "it is not).\n\n",
    "Each entry is then verified remotely: its package descriptor is fetched ",
    "from the hosting provider's raw-content mirror and handed to the ",
    "description tool, and the package must declare at least one product. ",
    "Entries whose descriptor cannot be fetched or described are skipped ",
    "with a warning; use --strict to treat skips as failures.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Validate ./packages.json:\n",
    "    $ registry-gate\n\n",
    "  Validate an explicit manifest:\n",
    "    $ registry-gate registry/packages.json\n\n",
    "  Local checks only (no network, no external tool):\n",
    "    $ registry-gate --local-only\n\n",
    "  Fail the run when any entry is skipped:\n",
    "    $ registry-gate --strict\n",
))]
pub struct Cli {
    /// Manifest path [default: ./packages.json, then next to the executable].
    #[arg(value_name = "MANIFEST")]
    pub manifest: Option<Utf8PathBuf>,

    /// Branch package descriptors are fetched from.
    #[arg(long, value_name = "NAME", default_value = DEFAULT_BRANCH)]
    pub branch: String,

    /// Treat skipped entries (unfetchable or product-less) as failures.
    #[arg(long)]
    pub strict: bool,

    /// Run only the local checks; skip remote verification entirely.
    #[arg(long)]
    pub local_only: bool,

    /// Suppress progress output (warnings and the verdict still print).
    #[arg(short, long)]
    pub quiet: bool,
}

impl Default for Cli {
    /// A `Cli` with no manifest argument and every flag disabled.
    ///
    /// Useful for tests and programmatic construction where only specific
    /// fields need to be set.
    fn default() -> Self {
        Self {
            manifest: None,
            branch: DEFAULT_BRANCH.to_owned(),
            strict: false,
            local_only: false,
            quiet: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn no_arguments_uses_defaults() {
        let cli = Cli::parse_from(["registry-gate"]);
        assert!(cli.manifest.is_none());
        assert_eq!(cli.branch, "master");
        assert!(!cli.strict);
        assert!(!cli.local_only);
        assert!(!cli.quiet);
    }

    #[test]
    fn positional_argument_is_the_manifest_path() {
        let cli = Cli::parse_from(["registry-gate", "registry/packages.json"]);
        assert_eq!(
            cli.manifest,
            Some(Utf8PathBuf::from("registry/packages.json"))
        );
    }

    #[test]
    fn branch_flag_overrides_the_default() {
        let cli = Cli::parse_from(["registry-gate", "--branch", "main"]);
        assert_eq!(cli.branch, "main");
    }

    #[rstest]
    #[case::strict(&["registry-gate", "--strict"])]
    #[case::local_only(&["registry-gate", "--local-only"])]
    #[case::quiet_short(&["registry-gate", "-q"])]
    fn boolean_flags_parse(#[case] args: &[&str]) {
        let cli = Cli::parse_from(args.iter().copied());
        assert!(cli.strict || cli.local_only || cli.quiet);
    }

    #[test]
    fn default_matches_bare_invocation() {
        let parsed = Cli::parse_from(["registry-gate"]);
        let default = Cli::default();
        assert_eq!(parsed.branch, default.branch);
        assert_eq!(parsed.strict, default.strict);
    }
}
