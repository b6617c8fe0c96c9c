//! CSV import/export tests

use pretty_assertions::assert_eq;
use royalbit_tabular::delimited::{CsvExporter, CsvImporter};
use royalbit_tabular::{FieldMapping, TabularDocument, TabularError, Value};

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn row(pairs: &[(&str, Value)]) -> FieldMapping {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn export(doc: &TabularDocument) -> String {
    String::from_utf8(CsvExporter::new(doc).export().unwrap()).unwrap()
}

#[test]
fn test_export_two_rows_three_lines() {
    let doc = TabularDocument::from_rows(vec![
        row(&[("orderId", Value::Int(1)), ("shipTo", text("Lisbon"))]),
        row(&[("orderId", Value::Int(2)), ("shipTo", text("Porto"))]),
    ]);

    let out = export(&doc);
    let lines: Vec<&str> = out.split("\r\n").filter(|l| !l.is_empty()).collect();

    assert_eq!(lines, vec!["ORDER ID,SHIP TO", "1,Lisbon", "2,Porto"]);
}

#[test]
fn test_import_values_stay_text() {
    let input = "ORDER ID,TOTAL,PAID\r\n1001,9.50,true\r\n1002,,false\r\n";
    let doc = CsvImporter::new(input.as_bytes()).import().unwrap();

    assert_eq!(
        doc.rows().to_vec(),
        vec![
            row(&[
                ("orderId", text("1001")),
                ("total", text("9.50")),
                ("paid", text("true")),
            ]),
            row(&[
                ("orderId", text("1002")),
                ("total", text("")),
                ("paid", text("false")),
            ]),
        ]
    );
}

#[test]
fn test_import_short_rows_are_padded() {
    let input = "A,B,C\n1\n2,3\n";
    let doc = CsvImporter::new(input.as_bytes()).import().unwrap();

    assert_eq!(doc.len(), 2);
    assert_eq!(
        doc.rows()[0],
        row(&[("a", text("1")), ("b", text("")), ("c", text(""))])
    );
    assert_eq!(doc.rows()[1]["c"], text(""));
}

#[test]
fn test_import_empty_and_header_only() {
    assert!(CsvImporter::new(b"").import().unwrap().is_empty());
    assert!(CsvImporter::new(b"NAME,AGE\r\n").import().unwrap().is_empty());
}

#[test]
fn test_import_quoted_fields() {
    let input = "NOTE,QUOTE\r\n\"a, b\",\"say \"\"hi\"\"\"\r\n";
    let doc = CsvImporter::new(input.as_bytes()).import().unwrap();

    assert_eq!(doc.rows()[0]["note"], text("a, b"));
    assert_eq!(doc.rows()[0]["quote"], text("say \"hi\""));
}

#[test]
fn test_export_then_import_recovers_text() {
    let doc = TabularDocument::from_rows(vec![
        row(&[
            ("customerName", text("Ada, Countess")),
            ("orderCount", Value::Int(3)),
            ("ratio", Value::Float(0.25)),
        ]),
        row(&[
            ("customerName", text("Grace")),
            ("orderCount", Value::Int(12)),
            ("ratio", Value::Float(1.5)),
        ]),
    ]);

    let bytes = CsvExporter::new(&doc).export().unwrap();
    let back = CsvImporter::new(&bytes).import().unwrap();

    assert_eq!(back.columns(), vec!["customerName", "orderCount", "ratio"]);
    for (original, restored) in doc.rows().iter().zip(back.rows()) {
        for (key, value) in original {
            assert_eq!(restored[key.as_str()], text(&value.to_string()));
        }
    }
}
