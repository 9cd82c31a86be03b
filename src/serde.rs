//! # Serde module for HyperLogLog
//!
//! This module provides serde-based (serialization and deserialization) features for
//! `HyperLogLog`. It uses `serde`'s custom serialization and deserialization mechanisms.
//!
//! A sketch is fully described by its precision, seed and registers, so it is serialized
//! as the tuple `(precision, seed, registers)`.
//!
//! During deserialization the tuple goes through `HyperLogLog::from_registers`, which rejects
//! invalid precision, a register count other than `2^precision` and ranks above 32.
//!
//! Refer to the serde documentation for more details on custom serialization and deserialization:
//! - [Serialization](https://serde.rs/impl-serialize.html)
//! - [Deserialization](https://serde.rs/impl-deserialize.html)
use serde::de::Error;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize};

use crate::hyperloglog::HyperLogLog;

impl Serialize for HyperLogLog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut tup = serializer.serialize_tuple(3)?;
        tup.serialize_element(&self.precision())?;
        tup.serialize_element(&self.seed())?;
        tup.serialize_element(self.raw_registers())?;
        tup.end()
    }
}

impl<'de> Deserialize<'de> for HyperLogLog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (precision, seed, registers): (u8, u32, Vec<u8>) =
            Deserialize::deserialize(deserializer)?;
        HyperLogLog::from_registers(precision, seed, &registers).map_err(Error::custom)
    }
}
