use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{to_string, to_value, Map, Value};
use std::io::{Read, Write};

pub fn dejsonify<'a, T>(json_str: &'a str) -> serde_json::Result<T>
where
    T: Deserialize<'a>,
{
    serde_json::from_str::<T>(json_str)
}

/// Serializes `obj` with object keys sorted at every level, so equal values always
/// produce byte-identical output.
pub fn jsonify<T>(obj: &T) -> serde_json::Result<String>
where
    T: Serialize,
{
    to_string(&jsonify_internal(&to_value(obj)?))
}

pub fn jsonify_internal(json_value: &Value) -> Value {
    match json_value {
        Value::Object(obj) => {
            let mut sorted_map = Map::new();
            let mut keys: Vec<&String> = obj.keys().collect();
            keys.sort();
            for key in keys {
                if let Some(value) = obj.get(key) {
                    sorted_map.insert(key.clone(), jsonify_internal(value));
                }
            }
            Value::Object(sorted_map)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(jsonify_internal).collect()),
        _ => json_value.clone(),
    }
}

pub fn decompress_obj<T>(input: &[u8]) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let mut decoder = ZlibDecoder::new(input);
    let mut decompressed = String::new();
    decoder.read_to_string(&mut decompressed)?;
    Ok(serde_json::from_str(&decompressed)?)
}

pub fn compress_obj<T>(input: &T) -> anyhow::Result<Vec<u8>>
where
    T: Serialize,
{
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(jsonify(input)?.as_bytes())?;
    Ok(encoder.finish()?)
}
