//! Hash chain types
//!
//! A signature links its document hash to a calendar root in two stages:
//! the aggregation chain (document hash → aggregation root) and the calendar
//! chain (aggregation root → calendar root at publication time). The types
//! here only describe the chains; recomputation lives in `ksi-hashchain`.

use crate::hash::DataHash;
use serde::{Deserialize, Serialize};

/// One step of a hash chain
///
/// The variant names where the running hash enters the step:
/// `Left(sibling)` computes `H(running || sibling)`,
/// `Right(sibling)` computes `H(sibling || running)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HashLink {
    /// Running hash is the left input
    Left(DataHash),
    /// Running hash is the right input
    Right(DataHash),
}

/// Chain from the document hash to the aggregation root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationHashChain {
    /// Aggregation (signing) time in seconds since the Unix epoch
    pub aggregation_time: u64,
    /// First input of the chain, the signed document hash
    pub input_hash: DataHash,
    /// Chain steps, from the document towards the root
    #[serde(default)]
    pub links: Vec<HashLink>,
}

/// Chain from the aggregation root to a calendar root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarHashChain {
    /// Time of the calendar root this chain leads to
    pub publication_time: u64,
    /// Aggregation time the chain starts from
    pub aggregation_time: u64,
    /// The aggregation root hash
    pub input_hash: DataHash,
    /// Chain steps, from the aggregation root towards the calendar root
    #[serde(default)]
    pub links: Vec<HashLink>,
}
