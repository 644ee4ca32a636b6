use std::{io::Write, path::PathBuf};

use plox_base::diagnostic::{Handler, Storage};
use plox_lexical::error;

use crate::{run, run_file, run_line, usage, Argument, Error, Parser, Printer, Status};

fn script(content: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("plox")
        .suffix(".lox")
        .tempfile()
        .unwrap();

    file.write_all(content).unwrap();
    file
}

#[test]
fn parse_arguments() {
    let argument = Argument::try_parse_from(["plox"]).unwrap();
    assert_eq!(argument.file, None);

    let argument = Argument::try_parse_from(["plox", "script.lox"]).unwrap();
    assert_eq!(argument.file, Some(PathBuf::from("script.lox")));
}

#[test]
fn too_many_arguments() {
    let error = Argument::try_parse_from(["plox", "a.lox", "b.lox"]).unwrap_err();
    assert_eq!(usage(&error), Status::Usage);
    assert_eq!(Status::Usage.code(), 64);
}

#[test]
fn help_is_not_a_failure() {
    let error = Argument::try_parse_from(["plox", "--help"]).unwrap_err();
    assert_eq!(usage(&error), Status::Success);
}

#[test]
fn file_mode_prints_tokens() {
    let file = script(b"1+2");
    let storage: Storage<error::Error> = Storage::new();
    let mut output = Vec::new();

    run_file(file.path(), &mut output, &storage).unwrap();

    assert!(storage.is_empty());
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "NUMBER 1 1.0\nPLUS + null\nNUMBER 2 2.0\nEOF  null\n"
    );
}

#[test]
fn file_mode_keeps_going_after_lexical_errors() {
    let file = script(b"a # b\n\"open");
    let storage: Storage<error::Error> = Storage::new();
    let mut output = Vec::new();

    run_file(file.path(), &mut output, &storage).unwrap();

    let errors = storage
        .into_vec()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    assert_eq!(
        errors,
        vec![
            "[line 1] Error: Unexpected character '#'.",
            "[line 2] Error: Unterminated string."
        ]
    );
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "IDENTIFIER a null\nIDENTIFIER b null\nEOF  null\n"
    );
}

#[test]
fn empty_file() {
    let file = script(b"");
    let storage: Storage<error::Error> = Storage::new();
    let mut output = Vec::new();

    run_file(file.path(), &mut output, &storage).unwrap();

    assert_eq!(String::from_utf8(output).unwrap(), "EOF  null\n");
}

#[test]
fn missing_file() {
    let path = std::env::temp_dir().join("plox-this-script-does-not-exist.lox");
    let mut output = Vec::new();

    let error = run_file(&path, &mut output, &Storage::<error::Error>::new()).unwrap_err();

    assert!(matches!(&error, Error::FileNotFound(missing) if *missing == path));
    assert_eq!(error.status(), Status::NoInput);
    assert!(output.is_empty());

    assert_eq!(run(Argument { file: Some(path) }), Status::NoInput);
}

#[test]
fn invalid_utf8_file() {
    let file = script(&[b'1', 0xFF, 0xFE]);
    let mut output = Vec::new();

    let error = run_file(file.path(), &mut output, &Storage::<error::Error>::new()).unwrap_err();

    assert_eq!(error.status(), Status::DataError);
}

#[test]
fn lexical_errors_fail_the_file_mode() {
    let file = script(b"var x = 1;\n@");
    assert_eq!(
        run(Argument {
            file: Some(file.path().to_owned())
        }),
        Status::DataError
    );
    assert_eq!(Status::DataError.code(), 65);

    let file = script(b"var x = 1;");
    assert_eq!(
        run(Argument {
            file: Some(file.path().to_owned())
        }),
        Status::Success
    );
}

#[test]
fn prompt_lines_start_over_at_line_one() {
    let storage: Storage<error::Error> = Storage::new();
    let mut output = Vec::new();

    run_line("\"first\nsecond\"", &mut output, &storage).unwrap();
    run_line("$", &mut output, &storage).unwrap();

    let errors = storage.into_vec();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line(), 1);

    let output = String::from_utf8(output).unwrap();
    assert_eq!(output, "STRING \"first\nsecond\" first\nsecond\nEOF  null\nEOF  null\n");
}

#[test]
fn printer_reset() {
    let printer = Printer::default();
    assert!(!printer.has_printed());

    printer.receive("[line 1] Error: Unexpected character '$'.");
    assert!(printer.has_printed());

    printer.reset();
    assert!(!printer.has_printed());
}
