//! Rating export conversion through files on disk.

use pretty_assertions::assert_eq;
use std::io::BufReader;
use versus_core::ratings::{HEADER, convert_ratings, write_rows};

#[test]
fn converts_export_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ratings.csv");
    let output = dir.path().join("converted.csv");
    std::fs::write(
        &input,
        "taste;1;apple;orange\n\
         taste;1;apple;orange\n\
         price;0;apple;orange\n\
         taste;0;apple;orange\n\
         taste;1;apple;orange\n\
         speed;1;python;java\n\
         speed;0;python;java\n",
    )
    .unwrap();

    let file = std::fs::File::open(&input).unwrap();
    let rows = convert_ratings(BufReader::new(file)).unwrap();
    write_rows(std::fs::File::create(&output).unwrap(), &rows).unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            HEADER,
            "apple;orange;taste;GOOD;0.75;3;1",
            "apple;orange;price;BAD;1.0;0;1",
            "python;java;speed;NONE;0.5;1;1",
        ]
    );
}

#[test]
fn pair_order_matters() {
    let rows = convert_ratings("taste;1;apple;orange\ntaste;0;orange;apple\n".as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].object_a, "apple");
    assert_eq!(rows[1].object_a, "orange");
}

#[test]
fn extra_fields_stay_in_second_object() {
    let rows = convert_ratings("taste;1;apple;orange;red\n".as_bytes()).unwrap();
    assert_eq!(rows[0].object_a, "apple");
    assert_eq!(rows[0].object_b, "orange///red");
}

#[test]
fn empty_input_writes_only_header() {
    let rows = convert_ratings("".as_bytes()).unwrap();
    let mut out = Vec::new();
    write_rows(&mut out, &rows).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), format!("{HEADER}\n"));
}
