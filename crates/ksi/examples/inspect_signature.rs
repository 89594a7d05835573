//! Example: Inspect a signature and verify it offline
//!
//! Usage:
//!   cargo run --example inspect_signature -- <signature.ksig> [document]

use ksi::types::Signature;
use ksi::verify::verify_internal;
use ksi::{FileHasher, SignatureCodec};
use std::env;
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <signature.ksig> [document]", args[0]);
        process::exit(1);
    }

    let signature: Signature = match SignatureCodec::load(&args[1]).await {
        Ok(sig) => sig,
        Err(e) => {
            eprintln!("Error loading signature: {}", e);
            process::exit(e.exit_code());
        }
    };

    println!("Signature Information:");
    println!("  Media Type: {}", signature.media_type());
    println!("  Signing Time: {}", signature.signing_time());
    println!("  Document Hash: {}", signature.document_hash());
    if let Some(identity) = signature.signer_identity() {
        println!("  Signer: {}", identity);
    }
    match signature.publication_record() {
        Some(record) => println!("  Publication: {}", record.published_data),
        None => println!("  Publication: not extended"),
    }

    match verify_internal(&signature) {
        Ok(result) => {
            println!("\nInternal verification succeeded");
            for step in &result.steps {
                println!("  - {}", step);
            }
        }
        Err(e) => {
            eprintln!("\nInternal verification failed: {}", e);
            process::exit(6);
        }
    }

    if let Some(document) = args.get(2) {
        let hash = match FileHasher::matching(signature.document_hash())
            .hash(document)
            .await
        {
            Ok(hash) => hash,
            Err(e) => {
                eprintln!("Error hashing {}: {}", document, e);
                process::exit(e.exit_code());
            }
        };
        if &hash == signature.document_hash() {
            println!("Document matches the signature");
        } else {
            println!("Document does NOT match the signature ({})", hash);
            process::exit(6);
        }
    }
}
