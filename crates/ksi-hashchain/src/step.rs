//! Hash chain step hashing
//!
//! A step concatenates the imprints (algorithm id followed by the digest)
//! of its two inputs and hashes them with the algorithm of the running hash.

use ksi_types::{DataHash, HashAlgorithm, HashLink};
use sha2::{Digest, Sha256, Sha384, Sha512};

/// Hash two imprints: `H(left.imprint || right.imprint)`
pub fn hash_pair(algorithm: HashAlgorithm, left: &DataHash, right: &DataHash) -> DataHash {
    let left = left.imprint();
    let right = right.imprint();
    let digest = match algorithm {
        HashAlgorithm::Sha2256 => digest_of::<Sha256>(&left, &right),
        HashAlgorithm::Sha2384 => digest_of::<Sha384>(&left, &right),
        HashAlgorithm::Sha2512 => digest_of::<Sha512>(&left, &right),
    };
    // digest length always matches the algorithm
    match DataHash::new(algorithm, digest) {
        Ok(hash) => hash,
        Err(e) => unreachable!("digest size invariant violated: {}", e),
    }
}

fn digest_of<D: Digest>(left: &[u8], right: &[u8]) -> Vec<u8> {
    let mut hasher = D::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().to_vec()
}

/// Apply one chain step to the running hash
pub fn hash_step(running: &DataHash, link: &HashLink) -> DataHash {
    let algorithm = running.algorithm();
    match link {
        HashLink::Left(sibling) => hash_pair(algorithm, running, sibling),
        HashLink::Right(sibling) => hash_pair(algorithm, sibling, running),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(byte: u8) -> DataHash {
        DataHash::new(HashAlgorithm::Sha2256, vec![byte; 32]).unwrap()
    }

    #[test]
    fn test_hash_pair_is_order_sensitive() {
        let ab = hash_pair(HashAlgorithm::Sha2256, &h(1), &h(2));
        let ba = hash_pair(HashAlgorithm::Sha2256, &h(2), &h(1));
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_hash_pair_covers_algorithm_id() {
        // Same digest bytes, different algorithm id -> different result
        let mut raw = Sha256::new();
        raw.update([1u8; 32]);
        raw.update([2u8; 32]);
        let without_ids = raw.finalize().to_vec();
        assert_ne!(hash_pair(HashAlgorithm::Sha2256, &h(1), &h(2)).digest(), &without_ids[..]);
    }

    #[test]
    fn test_step_direction() {
        let running = h(3);
        let sibling = h(4);
        assert_eq!(
            hash_step(&running, &HashLink::Left(sibling.clone())),
            hash_pair(HashAlgorithm::Sha2256, &running, &sibling)
        );
        assert_eq!(
            hash_step(&running, &HashLink::Right(sibling.clone())),
            hash_pair(HashAlgorithm::Sha2256, &sibling, &running)
        );
    }

    #[test]
    fn test_running_algorithm_is_used() {
        let running = DataHash::new(HashAlgorithm::Sha2512, vec![5u8; 64]).unwrap();
        let out = hash_step(&running, &HashLink::Left(h(6)));
        assert_eq!(out.algorithm(), HashAlgorithm::Sha2512);
        assert_eq!(out.digest().len(), 64);
    }
}
