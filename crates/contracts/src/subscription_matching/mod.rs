//! DTOs of the subscription-matching report consumed by the frontend.
//!
//! The payload is produced by the matcher outside of this workspace; the
//! frontend only reads it.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub type ProductId = i64;
pub type SystemId = i64;

pub type ProductMap = HashMap<ProductId, Product>;
pub type SystemMap = HashMap<SystemId, System>;

/// Subscription product as reported by the matcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_name: String,
    pub unmatched_system_count: u32,
    #[serde(default)]
    pub unmatched_system_ids: Vec<SystemId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct System {
    pub name: String,
    #[serde(rename = "type")]
    pub system_type: SystemType,
}

/// Kind of a system, used to pick its label icon.
///
/// Unknown tags are kept as-is so that newer matcher versions do not break
/// decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SystemType {
    NonVirtual,
    VirtualHost,
    VirtualGuest,
    Other(String),
}

impl SystemType {
    pub fn as_str(&self) -> &str {
        match self {
            SystemType::NonVirtual => "nonVirtual",
            SystemType::VirtualHost => "virtualHost",
            SystemType::VirtualGuest => "virtualGuest",
            SystemType::Other(tag) => tag,
        }
    }
}

impl From<String> for SystemType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "nonVirtual" => SystemType::NonVirtual,
            "virtualHost" => SystemType::VirtualHost,
            "virtualGuest" => SystemType::VirtualGuest,
            _ => SystemType::Other(tag),
        }
    }
}

impl From<&str> for SystemType {
    fn from(tag: &str) -> Self {
        SystemType::from(tag.to_string())
    }
}

impl From<SystemType> for String {
    fn from(system_type: SystemType) -> Self {
        system_type.as_str().to_string()
    }
}

impl fmt::Display for SystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the unmatched-products screen needs from a matcher run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionMatchingData {
    #[serde(default)]
    pub products: ProductMap,
    #[serde(default)]
    pub systems: SystemMap,
    #[serde(default)]
    pub unmatched_product_ids: Vec<ProductId>,
}

impl SubscriptionMatchingData {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid subscription matching payload")
    }
}
