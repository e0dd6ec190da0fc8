use serde::{Deserialize, Serialize};
use serde_json::json;
use upskill_utils::*;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Record {
    zeta: u32,
    alpha: Vec<String>,
}

#[test]
fn test_jsonify_sorts_nested_keys() {
    let value = json!({"b": {"y": 1, "x": 2}, "a": [{"d": 1, "c": 2}]});
    assert_eq!(
        jsonify(&value).unwrap(),
        r#"{"a":[{"c":2,"d":1}],"b":{"x":2,"y":1}}"#
    );
}

#[test]
fn test_dejsonify_reads_jsonify_output() {
    let record = Record {
        zeta: 7,
        alpha: vec!["candidate_000".to_string()],
    };
    let json_str = jsonify(&record).unwrap();
    assert_eq!(json_str, r#"{"alpha":["candidate_000"],"zeta":7}"#);
    assert_eq!(dejsonify::<Record>(&json_str).unwrap(), record);
}

#[test]
fn test_compressed_obj_restores_original() {
    let record = Record {
        zeta: 1,
        alpha: vec!["a".to_string(), "b".to_string()],
    };
    let compressed = compress_obj(&record).unwrap();
    assert_eq!(decompress_obj::<Record>(&compressed).unwrap(), record);
}

#[test]
fn test_decompress_obj_rejects_garbage() {
    assert!(decompress_obj::<Record>(b"not zlib").is_err());
}
