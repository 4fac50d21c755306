//! Shared descriptor fixtures for the integration tests.

#![allow(dead_code)]

use odm_registry::descriptor_types::DataProductDescriptor;
use serde_json::{json, Value};

pub const DATA_PRODUCT_FQN: &str = "urn:dpds:acme:dataproducts:orders:1";

/// A complete, valid document with no generated identity fields.
pub fn orders_document() -> Value {
    json!({
        "dataProductDescriptor": "1.0.0",
        "info": {
            "fullyQualifiedName": DATA_PRODUCT_FQN,
            "name": "orders",
            "displayName": "Orders",
            "version": "1.0.0",
            "domain": "sales",
            "owner": { "id": "owner@acme.com", "name": "Sales Data Team" },
            "contactPoints": [
                { "name": "support", "channel": "email", "address": "data@acme.com" }
            ]
        },
        "interfaceComponents": {
            "inputPorts": [
                { "name": "raw-orders", "version": "1.0.0" }
            ],
            "outputPorts": [
                {
                    "name": "orders-api",
                    "version": "1.2.0",
                    "promises": {
                        "api": {
                            "name": "orders-api",
                            "version": "1.2.0",
                            "specification": "openapi",
                            "definition": { "openapi": "3.0.0", "paths": {} }
                        }
                    }
                }
            ]
        },
        "internalComponents": {
            "applicationComponents": [
                { "name": "orders-etl", "version": "0.3.1" }
            ],
            "infrastructuralComponents": [
                { "name": "orders-bucket" }
            ]
        }
    })
}

pub fn descriptor(value: Value) -> DataProductDescriptor {
    serde_json::from_value(value).expect("fixture should deserialize")
}

pub fn orders() -> DataProductDescriptor {
    descriptor(orders_document())
}
