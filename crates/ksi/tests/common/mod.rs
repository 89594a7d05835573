//! Shared fixtures: a consistent toy calendar and call-counting services

#![allow(dead_code)]

use ksi::client::{BoxFuture, ExtendResponse, ExtendService, PublicationsSource};
use ksi::Services;
use ksi_crypto::hasher::hash_bytes;
use ksi_crypto::{KeyPair, VerificationKey};
use ksi_hashchain::{aggregation_root, calendar_root};
use ksi_publications::PublicationsFile;
use ksi_types::{
    AggregationHashChain, CalendarHashChain, DataHash, HashAlgorithm, HashLink, PublicationData,
    PublicationRecord, Signature,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const DOCUMENT: &[u8] = b"The quick brown fox jumps over the lazy dog";
pub const SIGNING_TIME: u64 = 1_400_000_000;
pub const HEAD_TIME: u64 = 1_700_000_000;

fn h(byte: u8) -> DataHash {
    DataHash::new(HashAlgorithm::Sha2256, vec![byte; 32]).unwrap()
}

/// Unextended signature over [`DOCUMENT`]
pub fn unextended_signature() -> Signature {
    Signature::new(AggregationHashChain {
        aggregation_time: SIGNING_TIME,
        input_hash: hash_bytes(HashAlgorithm::Sha2256, DOCUMENT).unwrap(),
        links: vec![
            HashLink::Left(h(0x11)),
            HashLink::Right(h(0x22)),
            HashLink::Left(h(0x33)),
        ],
    })
    .with_signer_identity("GT :: testing :: anon")
}

/// Calendar chain from the signature's aggregation root to `publication_time`
pub fn calendar_chain(
    aggregation: &AggregationHashChain,
    publication_time: u64,
) -> CalendarHashChain {
    CalendarHashChain {
        publication_time,
        aggregation_time: aggregation.aggregation_time,
        input_hash: aggregation_root(aggregation),
        links: vec![
            HashLink::Right(h(publication_time as u8)),
            HashLink::Left(h((publication_time >> 8) as u8)),
        ],
    }
}

/// Publication the toy calendar makes at `publication_time`
pub fn publication(signature: &Signature, publication_time: u64) -> PublicationData {
    let chain = calendar_chain(signature.aggregation_chain(), publication_time);
    PublicationData::new(publication_time, calendar_root(&chain))
}

/// Record as it appears in the publications file
pub fn record(signature: &Signature, publication_time: u64) -> PublicationRecord {
    PublicationRecord::new(publication(signature, publication_time))
        .with_reference(format!("Test Gazette, issue {}", publication_time))
}

/// `signature` extended to `publication_time` with a matching record
pub fn extended_signature(signature: &Signature, publication_time: u64) -> Signature {
    signature
        .clone()
        .with_calendar_chain(calendar_chain(signature.aggregation_chain(), publication_time))
        .with_publication_record(Some(record(signature, publication_time)))
}

/// Publications file holding records for `times`
pub fn publications_file(signature: &Signature, times: &[u64]) -> PublicationsFile {
    PublicationsFile::new(times.iter().map(|t| record(signature, *t)).collect())
}

pub struct MockExtender {
    aggregation: AggregationHashChain,
    failure: Option<(u64, Option<String>)>,
    calls: Arc<Mutex<Vec<(u64, Option<u64>)>>>,
}

impl ExtendService for MockExtender {
    fn extend(
        &self,
        aggregation_time: u64,
        publication_time: Option<u64>,
    ) -> BoxFuture<'_, ksi::client::Result<CalendarHashChain>> {
        self.calls
            .lock()
            .unwrap()
            .push((aggregation_time, publication_time));
        let response = match &self.failure {
            Some((status, message)) => ExtendResponse::failure(*status, message.clone()),
            None => ExtendResponse::success(calendar_chain(
                &self.aggregation,
                publication_time.unwrap_or(HEAD_TIME),
            )),
        };
        Box::pin(async move { response.into_calendar_chain() })
    }
}

pub struct MockPublications {
    file: PublicationsFile,
    fetches: Arc<AtomicUsize>,
}

impl PublicationsSource for MockPublications {
    fn fetch(&self) -> BoxFuture<'_, ksi::client::Result<PublicationsFile>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let file = self.file.clone();
        Box::pin(async move { Ok(file) })
    }
}

/// Services backed by the toy calendar, with call counters
pub struct Harness {
    pub services: Services,
    pub extend_calls: Arc<Mutex<Vec<(u64, Option<u64>)>>>,
    pub fetches: Arc<AtomicUsize>,
}

impl Harness {
    /// Extender answering for `signature`, publications file holding `times`
    pub fn new(signature: &Signature, times: &[u64]) -> Self {
        Self::build(signature, publications_file(signature, times), None)
    }

    /// Extender that always fails with `status`
    pub fn failing(signature: &Signature, status: u64, message: Option<&str>) -> Self {
        Self::build(
            signature,
            publications_file(signature, &[]),
            Some((status, message.map(str::to_string))),
        )
    }

    fn build(
        signature: &Signature,
        file: PublicationsFile,
        failure: Option<(u64, Option<String>)>,
    ) -> Self {
        let extend_calls = Arc::new(Mutex::new(Vec::new()));
        let fetches = Arc::new(AtomicUsize::new(0));
        let services = Services {
            extender: Box::new(MockExtender {
                aggregation: signature.aggregation_chain().clone(),
                failure,
                calls: extend_calls.clone(),
            }),
            publications: Box::new(MockPublications {
                file,
                fetches: fetches.clone(),
            }),
            publications_key: None,
        };
        Self {
            services,
            extend_calls,
            fetches,
        }
    }

    /// Trust `key` for local publications files
    pub fn with_key(mut self, key: &KeyPair) -> Self {
        self.services.publications_key =
            Some(VerificationKey::new(key.public_key_bytes().to_vec()).unwrap());
        self
    }

    pub fn extend_count(&self) -> usize {
        self.extend_calls.lock().unwrap().len()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn network_calls(&self) -> usize {
        self.extend_count() + self.fetch_count()
    }
}
