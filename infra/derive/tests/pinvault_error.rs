use pinvault_derive::pinvault_error;
use std::borrow::Cow;

#[pinvault_error]
pub enum DemoError {
    #[error("I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn missing_file() -> Result<Vec<u8>, DemoError> {
    std::fs::read("/definitely/not/here/pinvault").context("Reading fixture")
}

#[test]
fn pinvault_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/pinvault_error_pass.rs");
}

#[test]
fn source_errors_convert_with_context() {
    let err = missing_file().unwrap_err();
    assert!(matches!(err, DemoError::Io { context: Some(_), .. }));
    assert!(err.to_string().starts_with("I/O error (Reading fixture): "));
}

#[test]
fn context_is_attached_to_own_errors() {
    let result: Result<(), DemoError> =
        Err(DemoError::Rejected { message: "nope".into(), context: None });

    let err = result.context("while testing").unwrap_err();
    assert_eq!(err.to_string(), "Rejected (while testing): nope");
}

#[test]
fn strings_become_internal_errors() {
    let from_static: DemoError = "boom".into();
    let from_owned: DemoError = String::from("bang").into();

    assert!(matches!(from_static, DemoError::Internal { .. }));
    assert_eq!(from_owned.to_string(), "Internal error: bang");
}
