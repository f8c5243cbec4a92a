use std::io::{Cursor, Write};
use stitchquote::error::{DecodeError, QuoteError};
use stitchquote::stitch::loader::{
    load_csv_stream, load_json_stream, load_stream_file, StreamFormat,
};
use stitchquote::stitch::{decode, RawCommand};

#[test]
fn test_csv_with_header_and_names() {
    let csv = "x,y,command\n0,0,STITCH\n100,50,0\n100,50,TRIM\n-20,80,jump\n-20,80,5\n";
    let stream = load_csv_stream(Cursor::new(csv)).unwrap();
    assert_eq!(stream.len(), 5);

    let geom = decode(&stream).unwrap();
    assert_eq!(geom.stitch_count, 2);
    assert_eq!(geom.trim_count, 1);
    assert_eq!(geom.jump_count, 1);
    assert_eq!(geom.color_count, 2);
    assert_eq!((geom.min_x, geom.max_x), (-20, 100));
}

#[test]
fn test_csv_without_header() {
    let stream = load_csv_stream(Cursor::new("1,2,0\n3,4,1\n")).unwrap();
    assert_eq!(stream.len(), 2);
}

#[test]
fn test_csv_missing_field_reported_by_decoder() {
    let csv = "0,0,0\n5,,0\n";
    let stream = load_csv_stream(Cursor::new(csv)).unwrap();
    let err = decode(&stream).unwrap_err();
    assert_eq!(err, DecodeError::MissingCoordinate { index: 1, axis: 'y' });
}

#[test]
fn test_csv_short_row_is_missing_command() {
    let stream = load_csv_stream(Cursor::new("0,0,0\n1,1\n")).unwrap();
    assert_eq!(
        decode(&stream).unwrap_err(),
        DecodeError::MissingCommand { index: 1 }
    );
}

#[test]
fn test_csv_bad_coordinate_names_index() {
    let result = load_csv_stream(Cursor::new("x,y,command\n0,0,0\n0,0,0\nabc,1,0\n"));
    match result {
        Err(QuoteError::Decode(e)) => assert_eq!(e.index(), Some(2)),
        other => panic!("expected decode error, got {:?}", other.map(|s| s.len())),
    }
}

#[test]
fn test_csv_bad_first_coordinate_is_not_a_header() {
    let result = load_csv_stream(Cursor::new("1O,20,0\n30,40,0\n"));
    match result {
        Err(QuoteError::Decode(e)) => assert_eq!(
            e,
            DecodeError::InvalidCoordinate {
                index: 0,
                axis: 'x',
                value: "1O".to_string(),
            }
        ),
        other => panic!("expected decode error, got {:?}", other.map(|s| s.len())),
    }
}

#[test]
fn test_json_array_entries_with_palette() {
    let json = r##"{
        "stitches": [[0, 0, 0], [10.4, 20, 0], [10, 20, 5], [30, 5, "jump"]],
        "palette": ["#112233", "#445566", "#778899"]
    }"##;
    let stream = load_json_stream(Cursor::new(json)).unwrap();
    assert_eq!(stream.len(), 4);
    assert_eq!(stream.entries[1].x, Some(10));
    assert_eq!(stream.entries[3].command, Some(RawCommand::Name("jump".into())));

    let geom = decode(&stream).unwrap();
    assert_eq!(geom.color_count, 3);
    assert_eq!(geom.jump_count, 1);
}

#[test]
fn test_json_bare_array_of_objects() {
    let json = r#"[{"x": 1, "y": 2, "command": 0}, {"x": 3, "y": 4, "cmd": "trim"}]"#;
    let stream = load_json_stream(Cursor::new(json)).unwrap();
    assert!(stream.palette.is_none());
    let geom = decode(&stream).unwrap();
    assert_eq!(geom.stitch_count, 1);
    assert_eq!(geom.trim_count, 1);
}

#[test]
fn test_json_null_coordinate_is_missing() {
    let json = r#"[[0, 0, 0], [null, 4, 0]]"#;
    let stream = load_json_stream(Cursor::new(json)).unwrap();
    assert_eq!(
        decode(&stream).unwrap_err(),
        DecodeError::MissingCoordinate { index: 1, axis: 'x' }
    );
}

#[test]
fn test_json_unknown_code_is_unknown_command() {
    let stream = load_json_stream(Cursor::new("[[0, 0, 0], [1, 1, 99]]")).unwrap();
    assert_eq!(
        decode(&stream).unwrap_err(),
        DecodeError::UnknownCommand { index: 1, code: "99".into() }
    );
}

#[test]
fn test_json_scalar_entry_names_index() {
    let result = load_json_stream(Cursor::new("[[0, 0, 0], 7]"));
    match result {
        Err(QuoteError::Decode(e)) => {
            assert_eq!(e, DecodeError::InvalidEntry { index: 1 });
            assert_eq!(e.index(), Some(1));
        }
        other => panic!("expected decode error, got {:?}", other.map(|s| s.len())),
    }
}

#[test]
fn test_format_from_extension() {
    assert_eq!(StreamFormat::from_path("a/design.CSV").unwrap(), StreamFormat::Csv);
    assert_eq!(StreamFormat::from_path("design.json").unwrap(), StreamFormat::Json);
    assert!(StreamFormat::from_path("design.dst").is_err());
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "x,y,command").unwrap();
    writeln!(file, "0,0,0").unwrap();
    writeln!(file, "254,254,0").unwrap();

    let stream = load_stream_file(file.path()).unwrap();
    assert_eq!(decode(&stream).unwrap().width_units(), 254);
}

#[test]
fn test_missing_file_is_io_error() {
    let result = load_stream_file("/definitely/not/here.csv");
    assert!(matches!(result, Err(QuoteError::Io(_))));
}
