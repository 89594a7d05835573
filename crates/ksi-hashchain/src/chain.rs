//! Hash chain recomputation and consistency checks

use crate::error::{Error, Result};
use crate::step::hash_step;
use ksi_types::{AggregationHashChain, CalendarHashChain, DataHash, HashLink, PublicationData};

/// Fold a list of links over an input hash
pub fn compute_chain(input: &DataHash, links: &[HashLink]) -> DataHash {
    links
        .iter()
        .fold(input.clone(), |running, link| hash_step(&running, link))
}

/// Compute the aggregation root of an aggregation chain
pub fn aggregation_root(chain: &AggregationHashChain) -> DataHash {
    compute_chain(&chain.input_hash, &chain.links)
}

/// Compute the calendar root a calendar chain leads to
pub fn calendar_root(chain: &CalendarHashChain) -> DataHash {
    compute_chain(&chain.input_hash, &chain.links)
}

/// Check that a calendar chain starts from the given aggregation chain
///
/// The calendar chain's input must be the aggregation root, the aggregation
/// times must agree, and the calendar chain cannot lead to a root older
/// than the aggregation time.
pub fn verify_calendar_input(
    aggregation: &AggregationHashChain,
    calendar: &CalendarHashChain,
) -> Result<()> {
    if calendar.aggregation_time != aggregation.aggregation_time {
        return Err(Error::TimeMismatch {
            field: "aggregation time",
            expected: aggregation.aggregation_time,
            actual: calendar.aggregation_time,
        });
    }

    if calendar.publication_time < calendar.aggregation_time {
        return Err(Error::InvalidChain(format!(
            "calendar chain publication time {} precedes aggregation time {}",
            calendar.publication_time, calendar.aggregation_time
        )));
    }

    let root = aggregation_root(aggregation);
    if root != calendar.input_hash {
        return Err(Error::HashMismatch {
            expected: root.to_string(),
            actual: calendar.input_hash.to_string(),
        });
    }

    Ok(())
}

/// Check that a calendar chain leads to the given publication
pub fn verify_calendar_publication(
    calendar: &CalendarHashChain,
    publication: &PublicationData,
) -> Result<()> {
    if calendar.publication_time != publication.publication_time {
        return Err(Error::TimeMismatch {
            field: "publication time",
            expected: publication.publication_time,
            actual: calendar.publication_time,
        });
    }

    let root = calendar_root(calendar);
    if root != publication.published_hash {
        return Err(Error::HashMismatch {
            expected: publication.published_hash.to_string(),
            actual: root.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ksi_types::HashAlgorithm;

    fn h(byte: u8) -> DataHash {
        DataHash::new(HashAlgorithm::Sha2256, vec![byte; 32]).unwrap()
    }

    fn aggregation() -> AggregationHashChain {
        AggregationHashChain {
            aggregation_time: 100,
            input_hash: h(1),
            links: vec![HashLink::Left(h(2)), HashLink::Right(h(3))],
        }
    }

    fn calendar(publication_time: u64) -> CalendarHashChain {
        CalendarHashChain {
            publication_time,
            aggregation_time: 100,
            input_hash: aggregation_root(&aggregation()),
            links: vec![HashLink::Right(h(9))],
        }
    }

    #[test]
    fn test_empty_chain_is_identity() {
        assert_eq!(compute_chain(&h(1), &[]), h(1));
    }

    #[test]
    fn test_calendar_input_ok() {
        verify_calendar_input(&aggregation(), &calendar(200)).unwrap();
    }

    #[test]
    fn test_calendar_input_wrong_root() {
        let mut cal = calendar(200);
        cal.input_hash = h(7);
        assert!(matches!(
            verify_calendar_input(&aggregation(), &cal),
            Err(Error::HashMismatch { .. })
        ));
    }

    #[test]
    fn test_calendar_input_wrong_time() {
        let mut cal = calendar(200);
        cal.aggregation_time = 101;
        assert!(matches!(
            verify_calendar_input(&aggregation(), &cal),
            Err(Error::TimeMismatch { field: "aggregation time", .. })
        ));
    }

    #[test]
    fn test_calendar_publication() {
        let cal = calendar(200);
        let publication = PublicationData::new(200, calendar_root(&cal));
        verify_calendar_publication(&cal, &publication).unwrap();

        let wrong_time = PublicationData::new(201, calendar_root(&cal));
        assert!(verify_calendar_publication(&cal, &wrong_time).is_err());

        let wrong_hash = PublicationData::new(200, h(0));
        assert!(matches!(
            verify_calendar_publication(&cal, &wrong_hash),
            Err(Error::HashMismatch { .. })
        ));
    }
}
