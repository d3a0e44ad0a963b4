//! Library integration tests.

use spin_preflight::PreflightError;

#[test]
fn error_types_are_public() {
    let err = PreflightError::UnknownProvider {
        name: "kind".into(),
    };
    assert!(err.to_string().contains("kind"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> spin_preflight::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use spin_preflight::cli::{Cli, Commands};

    let cli = Cli::parse_from(["spin-preflight", "check", "k8s", "--json"]);

    if let Some(Commands::Check(args)) = cli.command {
        assert_eq!(args.provider, "k8s");
        assert!(args.json);
    } else {
        panic!("Expected Check command");
    }
}

#[test]
fn matching_is_public() {
    use spin_preflight::matching::{matches, resolve};

    assert!(matches("1.7.11-k3s2", &["~1.6.8-0", "~1.7.6-0"]).unwrap());
    assert!(!matches("1.5.0", &["~1.6.8-0", "~1.7.6-0"]).unwrap());
    assert!(matches("not a version", &["*"]).is_err());

    let image = resolve("controller:2.3.1").unwrap();
    assert_eq!(image.short_name, "controller");
    assert_eq!(image.tag, "2.3.1");
}

#[test]
fn builtin_catalog_is_public() {
    use spin_preflight::checks::CheckRegistry;
    use spin_preflight::config::CheckCatalog;

    let catalog = CheckCatalog::builtin().unwrap();
    assert!(catalog.get("containerd-shim-spin").is_some());
    assert!(CheckRegistry::new().validate(catalog.checks()).is_ok());
}
