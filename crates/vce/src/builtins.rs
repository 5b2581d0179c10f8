//! Built-in capabilities
//!
//! A small set of constructors and loaders registered at compile time
//! under the `vce/builtin` module, useful for configuration-only
//! variants and as registration examples for host crates.

use serde_json::{Map, Value, json};

use vce_domain::TYPE_FIELD;
use vce_engine::capability::{
    CONSTRUCTOR_CAPABILITIES, ConstructorCapability, LOADER_CAPABILITIES, LoaderCapability,
};

/// Module the built-ins are published under
pub const BUILTIN_MODULE: &str = "vce/builtin";

#[linkme::distributed_slice(CONSTRUCTOR_CAPABILITIES)]
static RECORD: ConstructorCapability = ConstructorCapability {
    module: BUILTIN_MODULE,
    symbol: "record",
    description: "Returns the input object with the discriminant stripped",
    construct: |input, _ctx| {
        let fields: Map<String, Value> = input
            .as_object()
            .map(|map| {
                map.iter()
                    .filter(|(key, _)| key.as_str() != TYPE_FIELD)
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect()
            })
            .unwrap_or_default();
        Ok(Value::Object(fields))
    },
};

#[linkme::distributed_slice(LOADER_CAPABILITIES)]
static DATA: LoaderCapability = LoaderCapability {
    module: BUILTIN_MODULE,
    symbol: "data",
    description: "Returns the URI path and parameters as an object",
    load: |uri, _ctx| {
        let params: Map<String, Value> = uri
            .parameters()
            .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
            .collect();
        Ok(json!({"path": uri.path(), "params": params}))
    },
};
